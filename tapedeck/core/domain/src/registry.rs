use crate::containers::Container;
use crate::containers::Folder;
use crate::containers::RemoteContainer;
use crate::containers::VideoCounts;
use crate::errors::RegistryError;
use crate::utils::aliases::MaybeOwnedString;
use crate::video::Video;
use crate::video::VideoFlag;
use crate::Node;
use crate::NodeId;

/// Read access to nodes by id. Every operation that resolves parents or aliases goes through it.
pub trait NodeLookup {
    fn lookup(&self, id: NodeId) -> Option<&Node>;

    fn video(&self, id: NodeId) -> Option<&Video> {
        self.lookup(id).and_then(Node::as_video)
    }

    fn container(&self, id: NodeId) -> Option<&dyn Container> {
        self.lookup(id).and_then(Node::as_container)
    }
}

/// Arena owning every node. Parent and child links are ids resolved through it.
#[derive(Debug, Clone, Default)]
pub struct MediaRegistry {
    nodes: ::std::collections::HashMap<NodeId, Node>,
}

impl NodeLookup for MediaRegistry {
    fn lookup(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }
}

impl MediaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// Nodes without a parent, by ascending id.
    pub fn roots(&self) -> Vec<NodeId> {
        let mut roots: Vec<_> = self.nodes
            .values()
            .filter(|node| node.parent().is_none())
            .map(Node::id)
            .collect();

        roots.sort();
        roots
    }

    /// Registers a freshly constructed node, links it into its parent and re-sorts the parent.
    pub fn insert(&mut self, node: impl Into<Node>) -> Result<NodeId, RegistryError> {
        self.insert_with(node.into(), false)
    }

    /// Same as [`MediaRegistry::insert`], leaving the parent unsorted for a later
    /// [`MediaRegistry::sort_children`].
    pub fn insert_deferred(&mut self, node: impl Into<Node>) -> Result<NodeId, RegistryError> {
        self.insert_with(node.into(), true)
    }

    pub fn insert_folder(
        &mut self, id: NodeId, name: impl Into<MaybeOwnedString>, parent: Option<NodeId>,
    ) -> Result<NodeId, RegistryError> {
        self.insert(Folder::new(id, name, parent))
    }

    pub fn insert_channel(
        &mut self, id: NodeId, name: impl Into<MaybeOwnedString>, source: impl Into<MaybeOwnedString>,
        parent: Option<NodeId>,
    ) -> Result<NodeId, RegistryError> {
        self.insert(Node::Channel(RemoteContainer::new(id, name, parent).with_source(source)))
    }

    pub fn insert_playlist(
        &mut self, id: NodeId, name: impl Into<MaybeOwnedString>, source: impl Into<MaybeOwnedString>,
        parent: Option<NodeId>,
    ) -> Result<NodeId, RegistryError> {
        self.insert(Node::Playlist(RemoteContainer::new(id, name, parent).with_source(source)))
    }

    pub fn insert_video(
        &mut self, id: NodeId, name: impl Into<MaybeOwnedString>, parent: NodeId,
    ) -> Result<NodeId, RegistryError> {
        self.insert(Video::new(id, name, parent))
    }

    fn insert_with(&mut self, node: Node, defer_sort: bool) -> Result<NodeId, RegistryError> {
        let id = node.id();

        if self.nodes.contains_key(&id) {
            return Err(RegistryError::DuplicateId(id));
        }

        if let Some(parent) = node.parent() {
            self.check_accepts(parent, id, node.kind())?;
        }

        let parent = node.parent();
        self.nodes.insert(id, node);

        if let Some(parent) = parent {
            self.add_child(parent, id, defer_sort)?;
        }

        ::tracing::debug!(%id, ?parent, "registered node");

        Ok(id)
    }

    /// Links an already registered node under `parent`. Re-adding a present child is a no-op and
    /// answers `Ok(false)`. A child listed under another container is moved out of it first.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId, defer_sort: bool) -> Result<bool, RegistryError> {
        let child_node = self.nodes.get(&child).ok_or(RegistryError::NotFound(child))?;
        let flags = child_node.as_video().map(Video::counted_flags);
        let previous = child_node.parent().filter(|previous| *previous != parent);

        self.check_accepts(parent, child, child_node.kind())?;

        if self.require_container(parent)?.children().contains(&child) {
            return Ok(false);
        }

        if let Some(previous) = previous {
            self.remove_child(previous, child);
        }

        let core = self.require_container_mut(parent)?.core_mut();

        core.children.push(child);

        if let Some(flags) = flags {
            core.counts.include(flags);
        }

        if let Some(node) = self.nodes.get_mut(&child) {
            node.set_parent(parent);
        }

        if !defer_sort {
            self.sort_children(parent)?;
        }

        Ok(true)
    }

    /// Unlinks `child` from `parent`. The child stays registered and keeps its back-reference;
    /// its own descendants are left untouched.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> bool {
        let flags = self.nodes.get(&child).and_then(Node::as_video).map(Video::counted_flags);

        let Some(container) = self.nodes.get_mut(&parent).and_then(Node::as_container_mut) else {
            return false;
        };

        let core = container.core_mut();

        let Some(position) = core.children.iter().position(|id| *id == child) else {
            return false;
        };

        core.children.remove(position);

        if let Some(flags) = flags {
            core.counts.exclude(flags);
        }

        ::tracing::debug!(%parent, %child, "removed child");

        true
    }

    /// Drops a node from the arena, unlinking it from its parent first. Descendants of a
    /// container are not purged.
    pub fn forget(&mut self, id: NodeId) -> Option<Node> {
        if let Some(parent) = self.nodes.get(&id).and_then(Node::parent) {
            self.remove_child(parent, id);
        }

        self.nodes.remove(&id)
    }

    /// Edits a video in place, then re-derives the parent's counters and order from whatever changed.
    pub fn edit_video<R>(&mut self, id: NodeId, edit: impl FnOnce(&mut Video) -> R) -> Result<R, RegistryError> {
        let video = self.nodes
            .get_mut(&id)
            .ok_or(RegistryError::NotFound(id))?
            .as_video_mut()
            .ok_or(RegistryError::NotAVideo(id))?;

        let (flags_before, key_before) = (video.counted_flags(), video.ordering_key());
        let output = edit(video);
        let (flags_after, key_after) = (video.counted_flags(), video.ordering_key());
        let parent = video.parent();

        let Some(core) = self.nodes
            .get_mut(&parent)
            .and_then(Node::as_container_mut)
            .map(|container| container.core_mut())
            .filter(|core| core.children.contains(&id))
        else {
            return Ok(output);
        };

        core.counts.shift(flags_before, flags_after);

        if key_before != key_after {
            self.sort_children(parent)?;
        }

        Ok(output)
    }

    pub fn edit_remote<R>(
        &mut self, id: NodeId, edit: impl FnOnce(&mut RemoteContainer) -> R,
    ) -> Result<R, RegistryError> {
        let remote = match self.nodes.get_mut(&id) {
            Some(Node::Channel(remote) | Node::Playlist(remote)) => remote,
            Some(Node::Video(_)) => return Err(RegistryError::NotAContainer(id)),
            Some(node) => return Err(RegistryError::UnexpectedKind { id, found: node.kind() }),
            None => return Err(RegistryError::NotFound(id)),
        };

        let name_before = remote.core.name().to_owned();
        let output = edit(remote);
        let renamed = remote.core.name() != name_before;
        let parent = remote.core.parent();

        if let Some(parent) = parent.filter(|_| renamed) {
            self.resort(parent)?;
        }

        Ok(output)
    }

    pub fn edit_folder<R>(&mut self, id: NodeId, edit: impl FnOnce(&mut Folder) -> R) -> Result<R, RegistryError> {
        let folder = match self.nodes.get_mut(&id) {
            Some(Node::Folder(folder)) => folder,
            Some(Node::Video(_)) => return Err(RegistryError::NotAContainer(id)),
            Some(node) => return Err(RegistryError::UnexpectedKind { id, found: node.kind() }),
            None => return Err(RegistryError::NotFound(id)),
        };

        let (name_before, private_before) = (folder.core.name().to_owned(), folder.is_private());
        let output = edit(folder);
        let renamed = folder.core.name() != name_before;
        let private_changed = folder.is_private() != private_before;
        let parent = folder.core.parent();

        if private_changed {
            self.sort_children(id)?;
        }

        if let Some(parent) = parent.filter(|_| renamed) {
            self.resort(parent)?;
        }

        Ok(output)
    }

    /// Counter-aware flag setter. Answers whether the flag changed.
    pub fn mark_video(&mut self, id: NodeId, flag: VideoFlag, value: bool) -> Result<bool, RegistryError> {
        self.edit_video(id, |video| video.set_flag(flag, value))
    }

    /// Re-derives every counter of `id` from its direct video children.
    pub fn recalculate_counts(&mut self, id: NodeId) -> Result<VideoCounts, RegistryError> {
        let mut counts = VideoCounts::default();

        for child in self.require_container(id)?.children() {
            if let Some(video) = self.video(*child) {
                counts.include(video.counted_flags());
            }
        }

        self.require_container_mut(id)?.core_mut().counts = counts;

        Ok(counts)
    }

    pub fn push_error(&mut self, id: NodeId, message: impl Into<String>) -> Result<(), RegistryError> {
        self.nodes.get_mut(&id).ok_or(RegistryError::NotFound(id))?.push_error(message);
        Ok(())
    }

    pub fn push_warning(&mut self, id: NodeId, message: impl Into<String>) -> Result<(), RegistryError> {
        self.nodes.get_mut(&id).ok_or(RegistryError::NotFound(id))?.push_warning(message);
        Ok(())
    }

    pub fn reset_error_warning(&mut self, id: NodeId) -> Result<(), RegistryError> {
        self.nodes.get_mut(&id).ok_or(RegistryError::NotFound(id))?.reset_error_warning();
        Ok(())
    }

    pub(crate) fn require_container(&self, id: NodeId) -> Result<&dyn Container, RegistryError> {
        self.nodes
            .get(&id)
            .ok_or(RegistryError::NotFound(id))?
            .as_container()
            .ok_or(RegistryError::NotAContainer(id))
    }

    pub(crate) fn require_container_mut(&mut self, id: NodeId) -> Result<&mut dyn Container, RegistryError> {
        self.nodes
            .get_mut(&id)
            .ok_or(RegistryError::NotFound(id))?
            .as_container_mut()
            .ok_or(RegistryError::NotAContainer(id))
    }

    fn check_accepts(&self, parent: NodeId, child: NodeId, child_kind: crate::NodeKind) -> Result<(), RegistryError> {
        let parent_node = self.nodes.get(&parent).ok_or(RegistryError::NotFound(parent))?;
        let container = parent_node.as_container().ok_or(RegistryError::NotAContainer(parent))?;

        if parent == child || !container.accepts(child_kind) {
            return Err(RegistryError::RejectedChild {
                parent,
                parent_kind: parent_node.kind(),
                child,
                child_kind,
            });
        }

        Ok(())
    }

    fn resort(&mut self, id: NodeId) -> Result<(), RegistryError> {
        if !self.nodes.contains_key(&id) {
            ::tracing::warn!(%id, "parent missing from the registry, skipping re-sort");
            return Ok(());
        }

        self.sort_children(id)
    }
}
