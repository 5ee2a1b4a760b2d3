use ::std::fmt::Write as _;
use ::std::path::Path;

use ::domain::Container as _;
use ::domain::MediaRegistry;
use ::domain::Node;
use ::domain::NodeId;
use ::domain::NodeKind;
use ::domain::NodeLookup;
use ::domain::RegistryError;
use ::domain::Timestamp;
use ::domain::Video;

use crate::gateways::TextFormatter;
use crate::models::descriptors::LibraryEntry;
use crate::paths::LibraryPaths;
use crate::traversal::LibraryTraversal as _;

const UNKNOWN: &str = " <unknown>";

/// Human-readable text for the library's nodes.
pub trait LibraryTooltips: LibraryPaths {
    /// `#id:   name`, the source (except for folders), the location and, when aliased, the download
    /// destination. Ampersands are escaped for markup.
    fn container_tooltip(
        &self, id: NodeId, downloads_dir: &Path, wrap: Option<(usize, &dyn TextFormatter)>,
    ) -> Result<String, RegistryError> {
        let node = self.lookup(id).ok_or(RegistryError::NotFound(id))?;
        let container = node.as_container().ok_or(RegistryError::NotAContainer(id))?;

        let mut text = format!("#{}:   {}\n\n", id, node.name());

        if node.kind() != NodeKind::Folder {
            let _ = write!(text, "Source:\n{}\n\n", node.source().unwrap_or(UNKNOWN));
        }

        let _ = write!(text, "Location:\n{}", self.default_dir(id, downloads_dir, None)?.display());

        if container.core().is_aliased() {
            let destination = self.lookup(container.master_id()).map_or(UNKNOWN, Node::name);
            let _ = write!(text, "\n\nDownload destination: {destination}");
        }

        let text = text.replace('&', "&amp;");

        Ok(wrap_text(text, wrap))
    }

    /// `#id:   name`, the parent, the source and the actual file path.
    fn video_tooltip(
        &self, id: NodeId, downloads_dir: &Path, wrap: Option<(usize, &dyn TextFormatter)>,
    ) -> Result<String, RegistryError> {
        let node = self.lookup(id).ok_or(RegistryError::NotFound(id))?;
        let video = node.as_video().ok_or(RegistryError::NotAVideo(id))?;

        let mut text = format!("#{}:   {}\n\n", id, video.name());

        if let Some(parent) = self.lookup(video.parent()) {
            let label = match parent.kind() {
                NodeKind::Channel => "Channel",
                NodeKind::Playlist => "Playlist",
                _ => "Folder",
            };

            let _ = write!(text, "{label}: {}\n\n", parent.name());
        }

        let _ = write!(text, "Source:\n{}\n\nFile:\n", video.source().unwrap_or(UNKNOWN));

        match video.file_name() {
            Some(_) => {
                let _ = write!(text, "{}", self.actual_path(id, downloads_dir)?.display());
            },
            None => text.push_str(UNKNOWN),
        }

        Ok(wrap_text(text, wrap))
    }
}

impl<Lookup: LibraryPaths> LibraryTooltips for Lookup {}

fn wrap_text(text: String, wrap: Option<(usize, &dyn TextFormatter)>) -> String {
    match wrap {
        Some((max_len, formatter)) => formatter.format(&text, max_len).full,
        None => text,
    }
}

/// Every node reachable from the roots, depth-first in child order.
pub fn list_library(registry: &MediaRegistry, downloads_dir: &Path, include_hidden: bool) -> Vec<LibraryEntry> {
    let mut entries = Vec::new();
    let mut stack: Vec<_> = registry.roots().into_iter().rev().collect();

    while let Some(id) = stack.pop() {
        let Some(node) = registry.lookup(id) else {
            continue;
        };

        let hidden = registry.is_hidden(id);

        if hidden && !include_hidden {
            continue;
        }

        let (counts, location) = match node.as_container() {
            Some(container) => {
                stack.extend(container.children().iter().rev());
                (Some(*container.counts()), registry.actual_dir(id, downloads_dir, None).ok())
            },
            None => (None, registry.actual_path(id, downloads_dir).ok()),
        };

        let video = node.as_video();

        entries.push(LibraryEntry {
            id,
            kind: node.kind(),
            name: node.nickname().to_owned(),
            depth: registry.depth(id).unwrap_or(1),
            hidden,
            counts,
            location,
            file_size: video.and_then(Video::file_size),
            upload_date: video.and_then(|video| video.upload_date_string(true)),
        });
    }

    entries
}

/// Stores the wrapped description of video `id` and its one-line summary. Empty text clears both.
pub fn set_video_description(
    registry: &mut MediaRegistry, id: NodeId, raw: &str, max_len: usize, formatter: &dyn TextFormatter,
) -> Result<(), RegistryError> {
    let description = (!raw.is_empty()).then(|| formatter.format(raw, max_len));

    registry.edit_video(id, |video| match description {
        Some(description) => video.set_description(Some(description.full), Some(description.short)),
        None => video.set_description(None, None),
    })
}

/// Display strings for a video's size and times, in the local timezone.
pub trait VideoDisplay {
    fn file_size_string(&self) -> Option<String>;

    /// `YYYY-MM-DD`; with `pretty`, `Today` and `Yesterday` where they apply.
    fn upload_date_string(&self, pretty: bool) -> Option<String>;

    fn upload_time_string(&self) -> Option<String>;

    fn receive_date_string(&self) -> Option<String>;

    fn receive_time_string(&self) -> Option<String>;
}

impl VideoDisplay for Video {
    fn file_size_string(&self) -> Option<String> {
        self.file_size()
            .filter(|size| *size > 0)
            .map(|size| ::bytesize::ByteSize(size).to_string())
    }

    fn upload_date_string(&self, pretty: bool) -> Option<String> {
        let today = ::chrono::Local::now().date_naive();

        date_string(self.upload_time()?, pretty.then_some(today))
    }

    fn upload_time_string(&self) -> Option<String> {
        time_string(self.upload_time()?)
    }

    fn receive_date_string(&self) -> Option<String> {
        date_string(self.receive_time()?, None)
    }

    fn receive_time_string(&self) -> Option<String> {
        time_string(self.receive_time()?)
    }
}

fn local(timestamp: Timestamp) -> Option<::chrono::DateTime<::chrono::Local>> {
    ::chrono::DateTime::from_timestamp(timestamp, 0).map(|time| time.with_timezone(&::chrono::Local))
}

pub(crate) fn date_string(timestamp: Timestamp, today: Option<::chrono::NaiveDate>) -> Option<String> {
    let date = local(timestamp)?.date_naive();

    let relative = today.and_then(|today| match (today - date).num_days() {
        0 => Some("Today".to_owned()),
        1 => Some("Yesterday".to_owned()),
        _ => None,
    });

    Some(relative.unwrap_or_else(|| date.format("%Y-%m-%d").to_string()))
}

fn time_string(timestamp: Timestamp) -> Option<String> {
    Some(local(timestamp)?.format("%Y-%m-%d %H:%M:%S").to_string())
}
