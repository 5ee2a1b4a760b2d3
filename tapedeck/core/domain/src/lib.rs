pub mod aliasing;
pub mod containers;
pub mod errors;
pub mod ordering;
pub mod registry;
pub mod video;

pub(crate) mod utils;

pub use crate::aliasing::AliasViolation;
pub use crate::containers::Container;
pub use crate::containers::ContainerCore;
pub use crate::containers::Folder;
pub use crate::containers::FolderFlags;
pub use crate::containers::RemoteContainer;
pub use crate::containers::VideoCounts;
pub use crate::errors::RegistryError;
pub use crate::registry::MediaRegistry;
pub use crate::registry::NodeLookup;
pub use crate::utils::aliases::MaybeOwnedString;
pub use crate::utils::aliases::Timestamp;
pub use crate::video::Video;
pub use crate::video::VideoFlag;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[derive(::serde::Serialize, ::serde::Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub u64);

impl ::std::fmt::Display for NodeId {
    fn fmt(&self, formatter: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

impl From<u64> for NodeId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// Handle on a download-options object owned outside the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OptionsId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(::serde::Serialize, ::serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Video,
    Channel,
    Playlist,
    Folder,
}

impl NodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Video => "video",
            NodeKind::Channel => "channel",
            NodeKind::Playlist => "playlist",
            NodeKind::Folder => "folder",
        }
    }

    pub fn is_container(&self) -> bool {
        !matches!(self, NodeKind::Video)
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, NodeKind::Channel | NodeKind::Playlist)
    }
}

impl ::std::fmt::Display for NodeKind {
    fn fmt(&self, formatter: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Free-text messages reported by the download engine. Append-only until reset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl Diagnostics {
    pub fn reset(&mut self) {
        self.errors.clear();
        self.warnings.clear();
    }
}

#[derive(Debug, Clone)]
pub enum Node {
    Video(Video),
    Channel(RemoteContainer),
    Playlist(RemoteContainer),
    Folder(Folder),
}

impl Node {
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Video(_) => NodeKind::Video,
            Node::Channel(_) => NodeKind::Channel,
            Node::Playlist(_) => NodeKind::Playlist,
            Node::Folder(_) => NodeKind::Folder,
        }
    }

    pub fn id(&self) -> NodeId {
        match self {
            Node::Video(video) => video.id(),
            Node::Channel(remote) | Node::Playlist(remote) => remote.core().id(),
            Node::Folder(folder) => folder.core().id(),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Node::Video(video) => video.name(),
            Node::Channel(remote) | Node::Playlist(remote) => remote.core().name(),
            Node::Folder(folder) => folder.core().name(),
        }
    }

    pub fn nickname(&self) -> &str {
        match self {
            Node::Video(video) => video.nickname(),
            Node::Channel(remote) | Node::Playlist(remote) => remote.core().nickname(),
            Node::Folder(folder) => folder.core().nickname(),
        }
    }

    pub fn parent(&self) -> Option<NodeId> {
        match self {
            Node::Video(video) => Some(video.parent()),
            Node::Channel(remote) | Node::Playlist(remote) => remote.core().parent(),
            Node::Folder(folder) => folder.core().parent(),
        }
    }

    pub fn source(&self) -> Option<&str> {
        match self {
            Node::Video(video) => video.source(),
            Node::Channel(remote) | Node::Playlist(remote) => remote.source(),
            Node::Folder(_) => None,
        }
    }

    pub fn diagnostics(&self) -> Option<&Diagnostics> {
        match self {
            Node::Video(video) => Some(video.diagnostics()),
            Node::Channel(remote) | Node::Playlist(remote) => Some(remote.diagnostics()),
            Node::Folder(_) => None,
        }
    }

    /// Ignored on folders, which carry no diagnostics.
    pub fn push_error(&mut self, message: impl Into<String>) {
        if let Some(diagnostics) = self.diagnostics_mut() {
            diagnostics.errors.push(message.into());
        }
    }

    pub fn push_warning(&mut self, message: impl Into<String>) {
        if let Some(diagnostics) = self.diagnostics_mut() {
            diagnostics.warnings.push(message.into());
        }
    }

    pub fn reset_error_warning(&mut self) {
        if let Some(diagnostics) = self.diagnostics_mut() {
            diagnostics.reset();
        }
    }

    pub fn as_video(&self) -> Option<&Video> {
        match self {
            Node::Video(video) => Some(video),
            _ => None,
        }
    }

    pub fn as_folder(&self) -> Option<&Folder> {
        match self {
            Node::Folder(folder) => Some(folder),
            _ => None,
        }
    }

    pub fn as_remote(&self) -> Option<&RemoteContainer> {
        match self {
            Node::Channel(remote) | Node::Playlist(remote) => Some(remote),
            _ => None,
        }
    }

    pub fn as_container(&self) -> Option<&dyn Container> {
        match self {
            Node::Video(_) => None,
            Node::Channel(remote) | Node::Playlist(remote) => Some(remote),
            Node::Folder(folder) => Some(folder),
        }
    }

    pub(crate) fn as_video_mut(&mut self) -> Option<&mut Video> {
        match self {
            Node::Video(video) => Some(video),
            _ => None,
        }
    }

    pub(crate) fn as_container_mut(&mut self) -> Option<&mut dyn Container> {
        match self {
            Node::Video(_) => None,
            Node::Channel(remote) | Node::Playlist(remote) => Some(remote),
            Node::Folder(folder) => Some(folder),
        }
    }

    pub(crate) fn set_parent(&mut self, parent: NodeId) {
        match self {
            Node::Video(video) => video.parent = parent,
            Node::Channel(remote) | Node::Playlist(remote) => remote.core.parent = Some(parent),
            Node::Folder(folder) => folder.core.parent = Some(parent),
        }
    }

    fn diagnostics_mut(&mut self) -> Option<&mut Diagnostics> {
        match self {
            Node::Video(video) => Some(&mut video.diagnostics),
            Node::Channel(remote) | Node::Playlist(remote) => Some(&mut remote.diagnostics),
            Node::Folder(_) => None,
        }
    }
}

impl From<Video> for Node {
    fn from(video: Video) -> Self {
        Node::Video(video)
    }
}

impl From<Folder> for Node {
    fn from(folder: Folder) -> Self {
        Node::Folder(folder)
    }
}
