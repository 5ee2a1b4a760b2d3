use ::domain::Container as _;
use ::domain::Node;
use ::domain::NodeId;
use ::domain::NodeKind;
use ::domain::NodeLookup;
use ::domain::Video;

use crate::models::documents::ExportCollection;
use crate::models::documents::ExportDocument;
use crate::models::documents::ExportFilter;
use crate::models::documents::ExportMode;

/// Projects subtrees into portable documents. Fixed folders and videos without a source never
/// make it out, along with everything the filter excludes.
pub trait LibraryExport: NodeLookup {
    fn export_library(&self, roots: &[NodeId], mode: ExportMode, filter: ExportFilter) -> ExportCollection {
        let mut collection = ExportCollection::new();

        for root in roots {
            match mode {
                ExportMode::Nested => {
                    if let Some(document) = self.export_nested(*root, filter) {
                        collection.insert(*root, document);
                    }
                },

                ExportMode::Flat => self.export_flat(*root, filter, &mut collection),
            }
        }

        ::tracing::debug!(roots = roots.len(), exported = collection.len(), ?mode, "exported library");

        collection
    }

    /// Document for container `id` with its exported descendants, or `None` if it is excluded.
    fn export_nested(&self, id: NodeId, filter: ExportFilter) -> Option<ExportDocument> {
        let node = self.lookup(id).filter(|node| is_exported(node, filter))?;
        let container = node.as_container()?;

        let children = container
            .children()
            .iter()
            .filter_map(|child| match self.lookup(*child)? {
                Node::Video(video) => video_document(video, filter),
                _ => self.export_nested(*child, filter),
            })
            .map(|document| (document.id, document))
            .collect();

        Some(container_document(node, children))
    }

    /// Same as [`LibraryExport::export_nested`], except folders dissolve: their exported
    /// descendants land directly in `collection`.
    fn export_flat(&self, id: NodeId, filter: ExportFilter, collection: &mut ExportCollection) {
        let Some(node) = self.lookup(id).filter(|node| is_exported(node, filter)) else {
            return;
        };

        let Some(container) = node.as_container() else {
            return;
        };

        let mut children = ExportCollection::new();

        for child in container.children() {
            match self.lookup(*child) {
                Some(Node::Video(video)) => {
                    if let Some(document) = video_document(video, filter) {
                        match node {
                            Node::Folder(_) => collection.insert(document.id, document),
                            _ => children.insert(document.id, document),
                        };
                    }
                },

                Some(_) => self.export_flat(*child, filter, collection),
                None => {},
            }
        }

        if node.kind().is_remote() {
            collection.insert(id, container_document(node, children));
        }
    }
}

impl<Lookup: NodeLookup + ?Sized> LibraryExport for Lookup {}

fn is_exported(node: &Node, filter: ExportFilter) -> bool {
    match node {
        Node::Video(video) => filter.videos && video.source().is_some(),
        Node::Channel(_) => filter.channels,
        Node::Playlist(_) => filter.playlists,
        Node::Folder(folder) => !folder.is_fixed(),
    }
}

fn video_document(video: &Video, filter: ExportFilter) -> Option<ExportDocument> {
    let source = video.source().filter(|_| filter.videos)?;

    Some(ExportDocument {
        kind: NodeKind::Video,
        id: video.id(),
        name: video.name().to_owned(),
        nickname: None,
        source: Some(source.to_owned()),
        children: ExportCollection::new(),
    })
}

fn container_document(node: &Node, children: ExportCollection) -> ExportDocument {
    ExportDocument {
        kind: node.kind(),
        id: node.id(),
        name: node.name().to_owned(),
        nickname: Some(node.nickname().to_owned()),
        source: node.source().map(ToOwned::to_owned),
        children,
    }
}
