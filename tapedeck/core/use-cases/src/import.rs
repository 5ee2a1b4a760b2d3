use ::domain::Container as _;
use ::domain::Folder;
use ::domain::MediaRegistry;
use ::domain::Node;
use ::domain::NodeId;
use ::domain::NodeKind;
use ::domain::NodeLookup as _;
use ::domain::RegistryError;
use ::domain::RemoteContainer;
use ::domain::Video;

use crate::gateways::IdAllocator;
use crate::models::documents::ExportCollection;
use crate::models::documents::ExportDocument;
use crate::models::events::LibraryImportedEvent;
use crate::traversal::LibraryTraversal as _;

/// Rebuilds exported documents as fresh nodes under `parent`.
///
/// Ids in the documents are only used as keys; every node gets a new id from `ids`. Documents that
/// cannot be placed (a container under a channel, a video without a parent, anything deeper than
/// `max_depth`, a video whose source is already present) are skipped together with their subtree.
///
/// An error stops the import but leaves the nodes inserted so far in place, sorted.
pub fn import_collection(
    registry: &mut MediaRegistry, collection: &ExportCollection, parent: Option<NodeId>, ids: &dyn IdAllocator,
    max_depth: usize,
) -> Result<LibraryImportedEvent, RegistryError> {
    if let Some(parent) = parent {
        let found = kind_of(registry, parent)?;

        if found != NodeKind::Folder {
            return Err(RegistryError::UnexpectedKind { id: parent, found });
        }
    }

    let mut importer = Importer {
        registry,
        ids,
        max_depth,
        touched: Vec::new(),
        event: LibraryImportedEvent {
            roots: Vec::new(),
            imported: 0,
            skipped: 0,
        },
    };

    let outcome: Result<(), RegistryError> = collection.values().try_for_each(|document| {
        if let Some(id) = importer.import(document, parent)? {
            importer.event.roots.push(id);
        }

        Ok(())
    });

    let Importer { registry, touched, event, .. } = importer;

    // A failed import keeps what it inserted, so those containers still need their order.
    let mut sorted: Result<(), RegistryError> = Ok(());

    for id in touched {
        sorted = sorted.and(registry.sort_children(id));
    }

    if let Err(error) = &outcome {
        ::tracing::warn!(%error, imported = event.imported, "import stopped early");
    }

    outcome.and(sorted)?;

    ::tracing::info!(imported = event.imported, skipped = event.skipped, "imported library");

    Ok(event)
}

fn kind_of(registry: &MediaRegistry, id: NodeId) -> Result<NodeKind, RegistryError> {
    registry.lookup(id).map(Node::kind).ok_or(RegistryError::NotFound(id))
}

struct Importer<'a> {
    registry: &'a mut MediaRegistry,
    ids: &'a dyn IdAllocator,
    max_depth: usize,
    /// Containers that received children with their sort deferred.
    touched: Vec<NodeId>,
    event: LibraryImportedEvent,
}

impl Importer<'_> {
    fn import(&mut self, document: &ExportDocument, parent: Option<NodeId>) -> Result<Option<NodeId>, RegistryError> {
        if !self.fits(document, parent)? {
            self.skip(document);
            return Ok(None);
        }

        let id = self.ids.allocate();

        let node = match document.kind {
            NodeKind::Video => {
                let Some(parent) = parent else {
                    self.skip(document);
                    return Ok(None);
                };

                let mut video = Video::new(id, document.name.clone(), parent);
                video.set_source(document.source.clone());
                Node::Video(video)
            },

            NodeKind::Channel | NodeKind::Playlist => {
                let mut remote = RemoteContainer::new(id, document.name.clone(), parent);
                remote.set_source(document.source.clone());
                remote.core_mut().set_nickname(document.nickname.clone());

                match document.kind {
                    NodeKind::Channel => Node::Channel(remote),
                    _ => Node::Playlist(remote),
                }
            },

            NodeKind::Folder => {
                let mut folder = Folder::new(id, document.name.clone(), parent);
                folder.core_mut().set_nickname(document.nickname.clone());
                Node::Folder(folder)
            },
        };

        self.registry.insert_deferred(node)?;
        self.event.imported += 1;

        if let Some(parent) = parent.filter(|parent| !self.touched.contains(parent)) {
            self.touched.push(parent);
        }

        for child in document.children.values() {
            self.import(child, Some(id))?;
        }

        Ok(Some(id))
    }

    fn fits(&self, document: &ExportDocument, parent: Option<NodeId>) -> Result<bool, RegistryError> {
        let Some(parent) = parent else {
            return Ok(document.kind.is_container());
        };

        let parent_kind = kind_of(&*self.registry, parent)?;

        if parent_kind.is_remote() && document.kind != NodeKind::Video {
            ::tracing::warn!(%parent, child = %document.name, "only videos fit in a channel or playlist");
            return Ok(false);
        }

        if document.kind == NodeKind::Video {
            let duplicate = document
                .source
                .as_deref()
                .is_some_and(|source| self.registry.check_duplicate_video(parent, source));

            return Ok(!duplicate);
        }

        let depth = self.registry.depth(parent).unwrap_or(0) + 1;

        if depth > self.max_depth {
            ::tracing::warn!(%parent, child = %document.name, depth, max_depth = self.max_depth, "too deep to import");
            return Ok(false);
        }

        Ok(true)
    }

    fn skip(&mut self, document: &ExportDocument) {
        self.event.skipped += 1 + count_documents(&document.children);
    }
}

fn count_documents(collection: &ExportCollection) -> usize {
    collection.values().map(|document| 1 + count_documents(&document.children)).sum()
}
