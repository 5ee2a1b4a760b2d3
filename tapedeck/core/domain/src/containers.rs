use crate::utils::aliases::MaybeOwnedString;
use crate::Diagnostics;
use crate::NodeId;
use crate::NodeKind;
use crate::OptionsId;

/// Shallow tallies over the *direct* video children of one container.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VideoCounts {
    pub total: usize,
    pub bookmarked: usize,
    pub downloaded: usize,
    pub favourite: usize,
    pub new: usize,
    pub waiting: usize,
}

impl VideoCounts {
    pub(crate) fn include(&mut self, flags: [bool; 5]) {
        self.total += 1;
        self.apply(flags, Self::increment);
    }

    pub(crate) fn exclude(&mut self, flags: [bool; 5]) {
        self.total = self.total.saturating_sub(1);
        self.apply(flags, Self::decrement);
    }

    pub(crate) fn shift(&mut self, before: [bool; 5], after: [bool; 5]) {
        for (slot, (before, after)) in self.slots().into_iter().zip(before.into_iter().zip(after)) {
            match (before, after) {
                (false, true) => Self::increment(slot),
                (true, false) => Self::decrement(slot),
                _ => {},
            }
        }
    }

    fn apply(&mut self, flags: [bool; 5], op: fn(&mut usize)) {
        for (slot, flag) in self.slots().into_iter().zip(flags) {
            if flag {
                op(slot);
            }
        }
    }

    fn slots(&mut self) -> [&mut usize; 5] {
        [
            &mut self.bookmarked,
            &mut self.downloaded,
            &mut self.favourite,
            &mut self.new,
            &mut self.waiting,
        ]
    }

    fn increment(slot: &mut usize) {
        *slot += 1;
    }

    fn decrement(slot: &mut usize) {
        *slot = slot.saturating_sub(1);
    }
}

/// State shared by channels, playlists and folders.
#[derive(Debug, Clone)]
pub struct ContainerCore {
    pub(crate) id: NodeId,
    pub(crate) parent: Option<NodeId>,
    options: Option<OptionsId>,

    name: MaybeOwnedString,
    nickname: MaybeOwnedString,

    pub(crate) children: Vec<NodeId>,
    pub(crate) counts: VideoCounts,

    pub(crate) master_id: NodeId,
    pub(crate) slave_ids: ::std::collections::BTreeSet<NodeId>,

    simulate_download: bool,
    download_disabled: bool,
    favourite: bool,
}

impl ContainerCore {
    pub(crate) fn new(id: NodeId, name: MaybeOwnedString, parent: Option<NodeId>) -> Self {
        Self {
            id,
            parent,
            options: None,
            nickname: name.clone(),
            name,
            children: Vec::new(),
            counts: VideoCounts::default(),
            master_id: id,
            slave_ids: Default::default(),
            simulate_download: false,
            download_disabled: false,
            favourite: false,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn options(&self) -> Option<OptionsId> {
        self.options
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn nickname(&self) -> &str {
        &self.nickname
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn counts(&self) -> &VideoCounts {
        &self.counts
    }

    pub fn master_id(&self) -> NodeId {
        self.master_id
    }

    pub fn slave_ids(&self) -> &::std::collections::BTreeSet<NodeId> {
        &self.slave_ids
    }

    pub fn is_aliased(&self) -> bool {
        self.master_id != self.id
    }

    pub fn simulates_download(&self) -> bool {
        self.simulate_download
    }

    pub fn is_download_disabled(&self) -> bool {
        self.download_disabled
    }

    pub fn is_favourite(&self) -> bool {
        self.favourite
    }

    pub fn set_options(&mut self, options: Option<OptionsId>) {
        self.options = options;
    }

    pub fn set_name(&mut self, name: impl Into<MaybeOwnedString>) {
        let name = name.into();

        if self.nickname == self.name {
            self.nickname = name.clone();
        }

        self.name = name;
    }

    pub fn set_nickname(&mut self, nickname: Option<impl Into<MaybeOwnedString>>) {
        self.nickname = match nickname.map(Into::into) {
            Some(nickname) if !nickname.is_empty() => nickname,
            _ => self.name.clone(),
        };
    }

    pub fn set_simulate_download(&mut self, flag: bool) {
        self.simulate_download = flag;
    }

    pub fn set_download_disabled(&mut self, flag: bool) {
        self.download_disabled = flag;
    }

    pub fn set_favourite(&mut self, flag: bool) {
        self.favourite = flag;
    }

    /// Overwrites every counter, e.g. when upgrading a database written by an older release.
    pub fn reset_counts(&mut self, counts: VideoCounts) {
        self.counts = counts;
    }

    pub(crate) fn add_slave_id(&mut self, id: NodeId) {
        self.slave_ids.insert(id);
    }

    pub(crate) fn remove_slave_id(&mut self, id: NodeId) -> bool {
        self.slave_ids.remove(&id)
    }
}

pub trait Container {
    fn core(&self) -> &ContainerCore;

    fn core_mut(&mut self) -> &mut ContainerCore;

    fn accepts(&self, kind: NodeKind) -> bool;

    fn id(&self) -> NodeId {
        self.core().id()
    }

    fn name(&self) -> &str {
        self.core().name()
    }

    fn children(&self) -> &[NodeId] {
        self.core().children()
    }

    fn counts(&self) -> &VideoCounts {
        self.core().counts()
    }

    fn master_id(&self) -> NodeId {
        self.core().master_id()
    }
}

/// A channel or playlist mirrored from a remote site. Holds videos only.
#[derive(Debug, Clone)]
pub struct RemoteContainer {
    pub(crate) core: ContainerCore,
    source: Option<MaybeOwnedString>,
    pub(crate) diagnostics: Diagnostics,
}

impl RemoteContainer {
    pub fn new(id: NodeId, name: impl Into<MaybeOwnedString>, parent: Option<NodeId>) -> Self {
        Self {
            core: ContainerCore::new(id, name.into(), parent),
            source: None,
            diagnostics: Diagnostics::default(),
        }
    }

    pub fn with_source(mut self, source: impl Into<MaybeOwnedString>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    pub fn set_source(&mut self, source: Option<impl Into<MaybeOwnedString>>) {
        self.source = source.map(Into::into);
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// Takes over the user-facing properties of a container that is about to be replaced, e.g.
    /// when a channel is converted into a playlist. Children and the video total are not copied.
    pub fn clone_properties(&mut self, other: &RemoteContainer) {
        let total = self.core.counts.total;

        self.core.set_options(other.core.options());
        self.core.nickname = other.core.nickname.clone();
        self.core.set_simulate_download(other.core.simulates_download());
        self.core.set_download_disabled(other.core.is_download_disabled());
        self.core.set_favourite(other.core.is_favourite());
        self.core.counts = VideoCounts { total, ..other.core.counts };
        self.source = other.source.clone();
        self.diagnostics = other.diagnostics.clone();
    }
}

impl Container for RemoteContainer {
    fn core(&self) -> &ContainerCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ContainerCore {
        &mut self.core
    }

    fn accepts(&self, kind: NodeKind) -> bool {
        kind == NodeKind::Video
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FolderFlags {
    /// Cannot be deleted by the user.
    pub fixed: bool,
    /// Reserved for system use.
    pub private: bool,
    /// Should only hold videos.
    pub restricted: bool,
    /// Contents are emptied on shutdown; the folder itself stays.
    pub temporary: bool,
    pub hidden: bool,
}

/// A local directory that may hold anything, including other folders.
#[derive(Debug, Clone)]
pub struct Folder {
    pub(crate) core: ContainerCore,
    flags: FolderFlags,
}

impl Folder {
    pub fn new(id: NodeId, name: impl Into<MaybeOwnedString>, parent: Option<NodeId>) -> Self {
        Self {
            core: ContainerCore::new(id, name.into(), parent),
            flags: FolderFlags::default(),
        }
    }

    pub fn with_flags(mut self, flags: FolderFlags) -> Self {
        self.flags = flags;
        self
    }

    pub fn flags(&self) -> FolderFlags {
        self.flags
    }

    pub fn is_fixed(&self) -> bool {
        self.flags.fixed
    }

    pub fn is_private(&self) -> bool {
        self.flags.private
    }

    pub fn is_restricted(&self) -> bool {
        self.flags.restricted
    }

    pub fn is_temporary(&self) -> bool {
        self.flags.temporary
    }

    pub fn is_hidden(&self) -> bool {
        self.flags.hidden
    }

    pub fn set_hidden(&mut self, flag: bool) {
        self.flags.hidden = flag;
    }

    pub fn set_fixed(&mut self, flag: bool) {
        self.flags.fixed = flag;
    }

    pub fn set_private(&mut self, flag: bool) {
        self.flags.private = flag;
    }

    pub fn set_restricted(&mut self, flag: bool) {
        self.flags.restricted = flag;
    }

    pub fn set_temporary(&mut self, flag: bool) {
        self.flags.temporary = flag;
    }
}

impl Container for Folder {
    fn core(&self) -> &ContainerCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ContainerCore {
        &mut self.core
    }

    fn accepts(&self, _: NodeKind) -> bool {
        true
    }
}
