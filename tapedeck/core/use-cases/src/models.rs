pub mod documents {
    use ::domain::NodeId;
    use ::domain::NodeKind;

    /// Top-level entries of an export, one per exported root.
    pub type ExportCollection = ::std::collections::BTreeMap<NodeId, ExportDocument>;

    /// Portable projection of one node and its exported descendants.
    #[derive(Debug, Clone, PartialEq, Eq)]
    #[derive(::serde::Serialize, ::serde::Deserialize)]
    pub struct ExportDocument {
        #[serde(rename = "type")]
        pub kind: NodeKind,

        #[serde(alias = "dbid")]
        pub id: NodeId,

        pub name: String,
        pub nickname: Option<String>,
        pub source: Option<String>,

        #[serde(default, alias = "db_dict")]
        pub children: ExportCollection,
    }

    /// Which kinds make it into an export. Folders are governed by their `fixed` flag instead.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ExportFilter {
        pub videos: bool,
        pub channels: bool,
        pub playlists: bool,
    }

    impl Default for ExportFilter {
        fn default() -> Self {
            Self {
                videos: true,
                channels: true,
                playlists: true,
            }
        }
    }

    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
    pub enum ExportMode {
        #[default]
        Nested,
        /// Folders dissolve; their exportable descendants join the nearest exported ancestor.
        Flat,
    }
}

pub mod settings {
    use ::derive_new::new;

    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
    pub enum MatchPolicy {
        #[default]
        ExactMatch,
        MatchFirst,
        IgnoreLast,
    }

    impl MatchPolicy {
        pub fn as_str(&self) -> &'static str {
            match self {
                MatchPolicy::ExactMatch => "exact-match",
                MatchPolicy::MatchFirst => "match-first",
                MatchPolicy::IgnoreLast => "ignore-last",
            }
        }
    }

    impl ::std::str::FromStr for MatchPolicy {
        type Err = ::anyhow::Error;

        fn from_str(string: &str) -> Result<Self, Self::Err> {
            match string.replace('_', "-").as_str() {
                "exact-match" => Ok(MatchPolicy::ExactMatch),
                "match-first" => Ok(MatchPolicy::MatchFirst),
                "ignore-last" => Ok(MatchPolicy::IgnoreLast),
                _ => Err(::anyhow::anyhow!("unknown match policy `{string}`")),
            }
        }
    }

    impl ::std::fmt::Display for MatchPolicy {
        fn fmt(&self, formatter: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
            formatter.write_str(self.as_str())
        }
    }

    #[derive(new)]
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct MatchSettings {
        pub policy: MatchPolicy,
        pub first_chars: usize,
        pub ignore_last: usize,
    }

    impl Default for MatchSettings {
        fn default() -> Self {
            Self::new(MatchPolicy::ExactMatch, 1, 1)
        }
    }

    #[derive(new)]
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct LibrarySettings {
        pub downloads_dir: ::std::path::PathBuf,
        pub matching: MatchSettings,
        /// Deepest level a container may be imported at; roots sit at level 1.
        pub max_depth: usize,
    }
}

pub mod descriptors {
    use ::domain::NodeId;
    use ::domain::NodeKind;
    use ::domain::VideoCounts;

    /// Full-subtree census, unlike the shallow per-container counters.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
    pub struct DescendantCensus {
        pub total: usize,
        pub videos: usize,
        pub channels: usize,
        pub playlists: usize,
        pub folders: usize,
    }

    /// Wrapped text plus its one-line summary.
    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    pub struct FormattedText {
        pub full: String,
        pub short: String,
    }

    /// One row of a library listing.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct LibraryEntry {
        pub id: NodeId,
        pub kind: NodeKind,
        pub name: String,
        pub depth: usize,
        pub hidden: bool,
        pub counts: Option<VideoCounts>,
        /// Where the node's files end up, after aliasing. `None` for unresolved videos.
        pub location: Option<::std::path::PathBuf>,
        pub file_size: Option<u64>,
        pub upload_date: Option<String>,
    }
}

pub mod events {
    use ::domain::NodeId;

    use crate::models::descriptors::LibraryEntry;

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct LibraryImportedEvent {
        pub roots: Vec<NodeId>,
        pub imported: usize,
        pub skipped: usize,
    }

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct LibraryExportedEvent {
        pub path: ::std::path::PathBuf,
        pub documents: usize,
    }

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct LibraryListedEvent {
        pub entries: Vec<LibraryEntry>,
    }

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct VideoMatchedEvent {
        pub container: NodeId,
        pub container_name: String,
        pub video: NodeId,
        pub video_name: String,
    }

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct SearchCompletedEvent {
        pub candidate: String,
        pub matches: usize,
    }
}
