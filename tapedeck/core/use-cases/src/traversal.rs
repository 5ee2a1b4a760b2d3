use ::domain::Container as _;
use ::domain::Node;
use ::domain::NodeId;
use ::domain::NodeLookup;

use crate::models::descriptors::DescendantCensus;

/// Read-only walks over a registry. Ids that do not resolve are skipped, never followed.
pub trait LibraryTraversal: NodeLookup {
    /// Pre-order list of every container under `root`, `root` included.
    fn collect_containers(&self, root: NodeId) -> Vec<NodeId> {
        let mut containers = Vec::new();
        let mut stack = vec![root];

        while let Some(id) = stack.pop() {
            let Some(container) = self.container(id).filter(|_| !containers.contains(&id)) else {
                continue;
            };

            containers.push(id);

            stack.extend(
                container
                    .children()
                    .iter()
                    .rev()
                    .filter(|child| self.lookup(**child).is_some_and(|node| node.kind().is_container())),
            );
        }

        containers
    }

    /// Every video under `root`, depth-first in child order.
    fn collect_videos(&self, root: NodeId) -> Vec<NodeId> {
        let mut videos = Vec::new();
        let mut visited = ::std::collections::HashSet::new();
        let mut stack = vec![root];

        while let Some(id) = stack.pop() {
            match self.lookup(id) {
                Some(Node::Video(_)) => videos.push(id),
                Some(node) if visited.insert(id) => {
                    if let Some(container) = node.as_container() {
                        stack.extend(container.children().iter().rev());
                    }
                },
                _ => {},
            }
        }

        videos
    }

    /// Counts everything below `root`, excluding `root` itself.
    fn count_descendants(&self, root: NodeId) -> DescendantCensus {
        let mut census = DescendantCensus::default();

        for id in self.collect_containers(root) {
            let Some(container) = self.container(id) else {
                continue;
            };

            for child in container.children().iter().filter_map(|child| self.lookup(*child)) {
                census.total += 1;

                match child {
                    Node::Video(_) => census.videos += 1,
                    Node::Channel(_) => census.channels += 1,
                    Node::Playlist(_) => census.playlists += 1,
                    Node::Folder(_) => census.folders += 1,
                }
            }
        }

        census
    }

    /// 1 for a root, 1 + the parent's depth otherwise. `None` if `id` does not resolve.
    fn depth(&self, id: NodeId) -> Option<usize> {
        let ancestry = self.ancestry(id);

        (!ancestry.is_empty()).then_some(ancestry.len())
    }

    /// Whether `id` is a hidden folder or sits anywhere below one.
    fn is_hidden(&self, id: NodeId) -> bool {
        self.ancestry(id)
            .iter()
            .filter_map(|id| self.lookup(*id).and_then(Node::as_folder))
            .any(|folder| folder.is_hidden())
    }

    /// Whether any container above `id` is marked favourite.
    fn ancestor_is_favourite(&self, id: NodeId) -> bool {
        self.ancestry(id)
            .iter()
            .skip(1)
            .filter_map(|id| self.container(*id))
            .any(|container| container.core().is_favourite())
    }

    /// Whether a direct video child of `container` already points at `source`.
    fn check_duplicate_video(&self, container: NodeId, source: &str) -> bool {
        self.container(container).is_some_and(|container| {
            container
                .children()
                .iter()
                .filter_map(|child| self.video(*child))
                .any(|video| video.source() == Some(source))
        })
    }

    /// `id` followed by its ancestors, nearest first. Stops at the first id that does not resolve.
    fn ancestry(&self, id: NodeId) -> Vec<NodeId> {
        let mut ancestry = Vec::new();
        let mut current = self.lookup(id);

        while let Some(node) = current {
            if ancestry.contains(&node.id()) {
                ::tracing::warn!(id = %node.id(), "parent links form a cycle");
                break;
            }

            ancestry.push(node.id());
            current = node.parent().and_then(|parent| self.lookup(parent));
        }

        ancestry
    }
}

impl<Lookup: NodeLookup + ?Sized> LibraryTraversal for Lookup {}
