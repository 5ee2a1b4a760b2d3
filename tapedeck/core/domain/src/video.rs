use crate::utils::aliases::MaybeOwnedString;
use crate::utils::aliases::Timestamp;
use crate::Diagnostics;
use crate::NodeId;
use crate::OptionsId;

/// A single downloadable item. Always owned by exactly one container.
#[derive(Debug, Clone)]
pub struct Video {
    pub(crate) id: NodeId,
    pub(crate) parent: NodeId,
    options: Option<OptionsId>,

    name: MaybeOwnedString,
    nickname: MaybeOwnedString,
    source: Option<MaybeOwnedString>,

    simulate_download: bool,
    archived: bool,
    bookmarked: bool,
    favourite: bool,
    new: bool,
    waiting: bool,
    downloaded: bool,

    file_name: Option<MaybeOwnedString>,
    file_ext: Option<MaybeOwnedString>,
    file_size: Option<u64>,

    upload_time: Option<Timestamp>,
    receive_time: Option<Timestamp>,
    duration: Option<u64>,
    playlist_index: Option<u64>,

    description: Option<String>,
    short_description: Option<String>,

    pub(crate) diagnostics: Diagnostics,
}

/// The flags a container keeps an aggregate count of, plus the two it doesn't.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VideoFlag {
    Bookmarked,
    Downloaded,
    Favourite,
    New,
    Waiting,
    Archived,
    SimulateDownload,
}

impl VideoFlag {
    pub const COUNTED: [VideoFlag; 5] = [
        VideoFlag::Bookmarked,
        VideoFlag::Downloaded,
        VideoFlag::Favourite,
        VideoFlag::New,
        VideoFlag::Waiting,
    ];
}

impl Video {
    pub fn new(id: NodeId, name: impl Into<MaybeOwnedString>, parent: NodeId) -> Self {
        let name = name.into();

        Self {
            id,
            parent,
            options: None,
            nickname: name.clone(),
            name,
            source: None,
            simulate_download: false,
            archived: false,
            bookmarked: false,
            favourite: false,
            new: false,
            waiting: false,
            downloaded: false,
            file_name: None,
            file_ext: None,
            file_size: None,
            upload_time: None,
            receive_time: None,
            duration: None,
            playlist_index: None,
            description: None,
            short_description: None,
            diagnostics: Diagnostics::default(),
        }
    }

    pub fn with_source(mut self, source: impl Into<MaybeOwnedString>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn with_upload_time(mut self, upload_time: Timestamp) -> Self {
        self.upload_time = Some(upload_time);
        self
    }

    pub fn with_receive_time(mut self, receive_time: Timestamp) -> Self {
        self.receive_time = Some(receive_time);
        self
    }

    pub fn with_playlist_index(mut self, index: u64) -> Self {
        self.playlist_index = Some(index);
        self
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn parent(&self) -> NodeId {
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

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    pub fn flag(&self, flag: VideoFlag) -> bool {
        match flag {
            VideoFlag::Bookmarked => self.bookmarked,
            VideoFlag::Downloaded => self.downloaded,
            VideoFlag::Favourite => self.favourite,
            VideoFlag::New => self.new,
            VideoFlag::Waiting => self.waiting,
            VideoFlag::Archived => self.archived,
            VideoFlag::SimulateDownload => self.simulate_download,
        }
    }

    pub fn is_bookmarked(&self) -> bool {
        self.bookmarked
    }

    pub fn is_downloaded(&self) -> bool {
        self.downloaded
    }

    pub fn is_favourite(&self) -> bool {
        self.favourite
    }

    pub fn is_new(&self) -> bool {
        self.new
    }

    pub fn is_waiting(&self) -> bool {
        self.waiting
    }

    pub fn is_archived(&self) -> bool {
        self.archived
    }

    pub fn simulates_download(&self) -> bool {
        self.simulate_download
    }

    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    pub fn file_ext(&self) -> Option<&str> {
        self.file_ext.as_deref()
    }

    pub fn file_size(&self) -> Option<u64> {
        self.file_size
    }

    pub fn upload_time(&self) -> Option<Timestamp> {
        self.upload_time
    }

    pub fn receive_time(&self) -> Option<Timestamp> {
        self.receive_time
    }

    pub fn duration(&self) -> Option<u64> {
        self.duration
    }

    pub fn playlist_index(&self) -> Option<u64> {
        self.playlist_index
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn short_description(&self) -> Option<&str> {
        self.short_description.as_deref()
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
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

    /// An empty nickname falls back to the current name.
    pub fn set_nickname(&mut self, nickname: Option<impl Into<MaybeOwnedString>>) {
        self.nickname = match nickname.map(Into::into) {
            Some(nickname) if !nickname.is_empty() => nickname,
            _ => self.name.clone(),
        };
    }

    pub fn set_source(&mut self, source: Option<impl Into<MaybeOwnedString>>) {
        self.source = source.map(Into::into);
    }

    /// Returns whether the flag actually changed.
    pub fn set_flag(&mut self, flag: VideoFlag, value: bool) -> bool {
        let slot = match flag {
            VideoFlag::Bookmarked => &mut self.bookmarked,
            VideoFlag::Downloaded => return self.set_downloaded(value),
            VideoFlag::Favourite => &mut self.favourite,
            VideoFlag::New => &mut self.new,
            VideoFlag::Waiting => &mut self.waiting,
            VideoFlag::Archived => &mut self.archived,
            VideoFlag::SimulateDownload => &mut self.simulate_download,
        };

        ::std::mem::replace(slot, value) != value
    }

    pub fn set_downloaded(&mut self, downloaded: bool) -> bool {
        self.set_downloaded_at(downloaded, crate::utils::clock::now())
    }

    /// The receive time is stamped the first time the video is marked downloaded, and kept after that.
    pub fn set_downloaded_at(&mut self, downloaded: bool, now: Timestamp) -> bool {
        if downloaded && self.receive_time.is_none() {
            self.receive_time = Some(now);
        }

        ::std::mem::replace(&mut self.downloaded, downloaded) != downloaded
    }

    pub fn set_file(&mut self, file_name: impl Into<MaybeOwnedString>, file_ext: impl Into<MaybeOwnedString>) {
        self.file_name = Some(file_name.into());
        self.file_ext = Some(file_ext.into());
    }

    /// Used when the merged output turned out to be an mkv rather than the requested container.
    pub fn set_mkv(&mut self) {
        self.file_ext = Some(".mkv".into());
    }

    pub fn set_file_size(&mut self, file_size: Option<u64>) {
        self.file_size = file_size;
    }

    pub fn set_upload_time(&mut self, upload_time: Option<Timestamp>) {
        self.upload_time = upload_time;
    }

    pub fn set_receive_time(&mut self, receive_time: Option<Timestamp>) {
        self.receive_time = receive_time;
    }

    pub fn stamp_receive_time(&mut self) {
        self.receive_time = Some(crate::utils::clock::now());
    }

    /// Fractional durations round up to the next whole second.
    pub fn set_duration(&mut self, seconds: Option<f64>) {
        self.duration = seconds
            .filter(|seconds| seconds.is_finite() && *seconds >= 0.0)
            .map(|seconds| seconds.ceil() as u64);
    }

    pub fn set_playlist_index(&mut self, index: Option<u64>) {
        self.playlist_index = index;
    }

    pub fn set_description(&mut self, description: Option<String>, short_description: Option<String>) {
        self.description = description;
        self.short_description = short_description;
    }

    pub(crate) fn counted_flags(&self) -> [bool; 5] {
        VideoFlag::COUNTED.map(|flag| self.flag(flag))
    }

    pub(crate) fn ordering_key(&self) -> (Option<Timestamp>, Option<Timestamp>, Option<u64>) {
        (self.upload_time, self.receive_time, self.playlist_index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn video() -> Video {
        Video::new(NodeId(2), "Some clip", NodeId(1))
    }

    #[test]
    fn nickname_follows_name_until_customised() {
        let mut video = video();

        video.set_name("Renamed clip");
        assert_eq!(video.nickname(), "Renamed clip");

        video.set_nickname(Some("Mine"));
        video.set_name("Renamed again");
        assert_eq!(video.nickname(), "Mine");

        video.set_nickname(None::<&str>);
        assert_eq!(video.nickname(), "Renamed again");

        video.set_nickname(Some(""));
        assert_eq!(video.nickname(), "Renamed again");
    }

    #[test]
    fn receive_time_is_stamped_once() {
        let mut video = video();

        assert!(video.set_downloaded_at(true, 100));
        assert_eq!(video.receive_time(), Some(100));

        assert!(video.set_downloaded_at(false, 200));
        assert!(video.set_downloaded_at(true, 300));
        assert_eq!(video.receive_time(), Some(100));

        video.set_receive_time(None);
        video.set_downloaded_at(true, 400);
        assert_eq!(video.receive_time(), Some(400));
    }

    #[test]
    fn not_downloaded_leaves_receive_time_unset() {
        let mut video = video();

        assert!(!video.set_downloaded_at(false, 100));
        assert_eq!(video.receive_time(), None);
    }

    #[test]
    fn fractional_durations_round_up() {
        let mut video = video();

        video.set_duration(Some(61.2));
        assert_eq!(video.duration(), Some(62));

        video.set_duration(Some(61.0));
        assert_eq!(video.duration(), Some(61));

        video.set_duration(None);
        assert_eq!(video.duration(), None);
    }

    #[test]
    fn set_flag_reports_changes() {
        let mut video = video();

        assert!(video.set_flag(VideoFlag::Bookmarked, true));
        assert!(!video.set_flag(VideoFlag::Bookmarked, true));
        assert!(video.is_bookmarked());
        assert_eq!(video.counted_flags(), [true, false, false, false, false]);
    }

    #[test]
    fn mkv_overrides_extension() {
        let mut video = video();

        video.set_file("clip", ".mp4");
        video.set_mkv();

        assert_eq!(video.file_name(), Some("clip"));
        assert_eq!(video.file_ext(), Some(".mkv"));
    }
}
