use ::async_trait::async_trait;
use ::domain::NodeKind;
use ::use_cases::boundaries::Activate;
use ::use_cases::boundaries::Update;
use ::use_cases::models::descriptors::LibraryEntry;
use ::use_cases::models::events::LibraryExportedEvent;
use ::use_cases::models::events::LibraryImportedEvent;
use ::use_cases::models::events::LibraryListedEvent;
use ::use_cases::models::events::SearchCompletedEvent;
use ::use_cases::models::events::VideoMatchedEvent;

use crate::utils::aliases::Fallible;

macro_rules! lazy_color {
    ($color:expr) => {
        ::once_cell::sync::Lazy::new(|| {
            use ::colored::Colorize as _;

            $color
        })
    };
}

pub struct ImportLibraryView;

#[async_trait]
impl Activate for ImportLibraryView {
    async fn activate(self: ::std::sync::Arc<Self>) -> Fallible<()> {
        Ok(())
    }

    async fn deactivate(self: ::std::sync::Arc<Self>) -> Fallible<()> {
        Ok(())
    }
}

#[async_trait]
impl Update<LibraryImportedEvent> for ImportLibraryView {
    async fn update(self: ::std::sync::Arc<Self>, event: &LibraryImportedEvent) -> Fallible<()> {
        println!("{}", render_imported(event));
        Ok(())
    }
}

pub struct ExportLibraryView;

#[async_trait]
impl Activate for ExportLibraryView {
    async fn activate(self: ::std::sync::Arc<Self>) -> Fallible<()> {
        Ok(())
    }

    async fn deactivate(self: ::std::sync::Arc<Self>) -> Fallible<()> {
        Ok(())
    }
}

#[async_trait]
impl Update<LibraryExportedEvent> for ExportLibraryView {
    async fn update(self: ::std::sync::Arc<Self>, event: &LibraryExportedEvent) -> Fallible<()> {
        use ::colored::Colorize as _;

        println!(
            "{} {} documents to {}",
            "Exported".green().bold(),
            event.documents,
            event.path.display().to_string().white().bold()
        );

        Ok(())
    }
}

/// Prints the library as an indented tree, one node per line.
pub struct ShowLibraryView;

#[async_trait]
impl Activate for ShowLibraryView {
    async fn activate(self: ::std::sync::Arc<Self>) -> Fallible<()> {
        println!();
        Ok(())
    }

    async fn deactivate(self: ::std::sync::Arc<Self>) -> Fallible<()> {
        Ok(())
    }
}

#[async_trait]
impl Update<LibraryListedEvent> for ShowLibraryView {
    async fn update(self: ::std::sync::Arc<Self>, event: &LibraryListedEvent) -> Fallible<()> {
        use ::colored::Colorize as _;

        if event.entries.is_empty() {
            println!("{}", "The library is empty".yellow());
        }

        for entry in &event.entries {
            println!("{}", render_entry(entry));
        }

        Ok(())
    }
}

pub struct FindVideoView;

#[async_trait]
impl Activate for FindVideoView {
    async fn activate(self: ::std::sync::Arc<Self>) -> Fallible<()> {
        Ok(())
    }

    async fn deactivate(self: ::std::sync::Arc<Self>) -> Fallible<()> {
        Ok(())
    }
}

#[async_trait]
impl Update<VideoMatchedEvent> for FindVideoView {
    async fn update(self: ::std::sync::Arc<Self>, event: &VideoMatchedEvent) -> Fallible<()> {
        println!("{}", render_match(event));
        Ok(())
    }
}

#[async_trait]
impl Update<SearchCompletedEvent> for FindVideoView {
    async fn update(self: ::std::sync::Arc<Self>, event: &SearchCompletedEvent) -> Fallible<()> {
        use ::colored::Colorize as _;

        let SearchCompletedEvent { candidate, matches } = event;

        match *matches {
            0 => println!("{} {}", "No video matches".yellow(), candidate.white().bold()),
            _ => println!("{} {} for {}", matches.to_string().green().bold(), "matches".green(), candidate.white().bold()),
        }

        Ok(())
    }
}

static NULL: ::once_cell::sync::Lazy<::colored::ColoredString> = lazy_color!("N/A".yellow().bold());

const GRAY: ::colored::Color = ::colored::Color::TrueColor { r: 150, g: 150, b: 150 };

fn render_imported(event: &LibraryImportedEvent) -> String {
    use ::colored::Colorize as _;

    let LibraryImportedEvent { roots, imported, skipped } = event;

    let mut line = format!("{} {} nodes under {} roots", "Imported".green().bold(), imported, roots.len());

    if *skipped > 0 {
        line.push_str(&format!(", {}", format!("{skipped} skipped").yellow()));
    }

    line
}

fn render_entry(entry: &LibraryEntry) -> String {
    use ::colored::Colorize as _;

    let indent = "  ".repeat(entry.depth.saturating_sub(1));

    let name = match entry.kind {
        NodeKind::Folder => entry.name.blue().bold(),
        NodeKind::Channel | NodeKind::Playlist => entry.name.cyan().bold(),
        NodeKind::Video => entry.name.white(),
    };

    let id = format!("#{}", entry.id).color(GRAY);

    let location = entry
        .location
        .as_deref()
        .map_or_else(|| NULL.clone(), |location| location.display().to_string().color(GRAY));

    let details = match entry.counts {
        Some(counts) => format!("[{} videos, {} new, {} downloaded]", counts.total, counts.new, counts.downloaded),
        None => format!(
            "{} {}",
            entry.file_size.map_or_else(|| NULL.to_string(), |size| FormattedBytes(size).to_string()),
            entry.upload_date.as_deref().map_or_else(|| NULL.to_string(), ToOwned::to_owned),
        ),
    };

    let mut row = format!("{indent}{name} {id} {details} {location}");

    if entry.hidden {
        row.push_str(&format!(" {}", "(hidden)".dimmed()));
    }

    row
}

fn render_match(event: &VideoMatchedEvent) -> String {
    use ::colored::Colorize as _;

    format!(
        "{} {} in {} {}",
        event.video_name.white().bold(),
        format!("#{}", event.video).color(GRAY),
        event.container_name.cyan(),
        format!("#{}", event.container).color(GRAY),
    )
}

struct FormattedBytes(u64);

impl ::std::fmt::Display for FormattedBytes {
    fn fmt(&self, formatter: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
        write!(formatter, "{}", ::bytesize::ByteSize::b(self.0))
    }
}
