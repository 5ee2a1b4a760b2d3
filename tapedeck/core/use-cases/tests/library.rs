use std::path::Path;
use std::path::PathBuf;
use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;

use domain::Container;
use domain::Folder;
use domain::FolderFlags;
use domain::MediaRegistry;
use domain::NodeId;
use domain::NodeKind;
use domain::NodeLookup;
use domain::RegistryError;
use domain::Video;
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use serde_json::json;
use use_cases::describe::list_library;
use use_cases::describe::set_video_description;
use use_cases::describe::LibraryTooltips;
use use_cases::export::LibraryExport;
use use_cases::gateways::IdAllocator;
use use_cases::gateways::TextFormatter;
use use_cases::import::import_collection;
use use_cases::matching::find_matching_video;
use use_cases::matching::normalize_name;
use use_cases::matching::search_library;
use use_cases::models::descriptors::DescendantCensus;
use use_cases::models::descriptors::FormattedText;
use use_cases::models::documents::ExportCollection;
use use_cases::models::documents::ExportDocument;
use use_cases::models::documents::ExportFilter;
use use_cases::models::documents::ExportMode;
use use_cases::models::settings::MatchSettings;
use use_cases::paths::LibraryPaths;
use use_cases::traversal::LibraryTraversal;

const ROOT: NodeId = NodeId(1);
const CHANNEL: NodeId = NodeId(2);
const OLDER: NodeId = NodeId(10);
const NEWER: NodeId = NodeId(11);

fn library() -> MediaRegistry {
    let mut registry = MediaRegistry::new();

    registry.insert_folder(ROOT, "Root", None).unwrap();
    registry.insert_channel(CHANNEL, "C1", "https://example.com/c1", Some(ROOT)).unwrap();
    registry
        .insert(Video::new(OLDER, "older", CHANNEL).with_source("https://example.com/v/older").with_upload_time(100))
        .unwrap();
    registry
        .insert(Video::new(NEWER, "newer", CHANNEL).with_source("https://example.com/v/newer").with_upload_time(200))
        .unwrap();

    registry
}

struct Sequence(AtomicU64);

impl IdAllocator for Sequence {
    fn allocate(&self) -> NodeId {
        NodeId(self.0.fetch_add(1, Ordering::Relaxed))
    }
}

struct Uppercase;

impl TextFormatter for Uppercase {
    fn format(&self, text: &str, _max_len: usize) -> FormattedText {
        FormattedText {
            full: text.to_uppercase(),
            short: text.lines().next().unwrap_or_default().to_uppercase(),
        }
    }
}

#[test]
fn videos_are_collected_depth_first() {
    let mut registry = MediaRegistry::new();

    registry.insert_folder(NodeId(1), "F", None).unwrap();
    registry.insert_channel(NodeId(2), "C", "https://example.com/c", Some(NodeId(1))).unwrap();
    registry.insert_folder(NodeId(3), "Sub", Some(NodeId(1))).unwrap();
    registry.insert_video(NodeId(4), "c", NodeId(1)).unwrap();
    registry.insert_video(NodeId(5), "a", NodeId(3)).unwrap();
    registry.insert_video(NodeId(6), "b", NodeId(2)).unwrap();

    assert_eq!(registry.collect_videos(NodeId(1)), vec![NodeId(5), NodeId(6), NodeId(4)]);
    assert_eq!(registry.collect_containers(NodeId(1)), vec![NodeId(1), NodeId(3), NodeId(2)]);
    assert!(registry.collect_videos(NodeId(99)).is_empty());
}

#[test]
fn census_covers_the_whole_subtree() {
    let mut registry = library();
    registry.insert_folder(NodeId(3), "Inner", Some(ROOT)).unwrap();
    registry.insert_playlist(NodeId(4), "P1", "https://example.com/p1", Some(NodeId(3))).unwrap();

    assert_eq!(
        registry.count_descendants(ROOT),
        DescendantCensus {
            total: 5,
            videos: 2,
            channels: 1,
            playlists: 1,
            folders: 1,
        },
    );
    assert_eq!(registry.count_descendants(CHANNEL).total, 2);
}

#[test]
fn depth_hidden_and_favourites_follow_ancestry() {
    let mut registry = library();

    assert_eq!(registry.depth(ROOT), Some(1));
    assert_eq!(registry.depth(OLDER), Some(3));
    assert_eq!(registry.depth(NodeId(99)), None);

    assert!(!registry.is_hidden(OLDER));
    registry.edit_folder(ROOT, |folder| folder.set_hidden(true)).unwrap();
    assert!(registry.is_hidden(OLDER));
    assert!(registry.is_hidden(ROOT));

    assert!(!registry.ancestor_is_favourite(CHANNEL));
    registry.edit_folder(ROOT, |folder| folder.core_mut().set_favourite(true)).unwrap();
    assert!(registry.ancestor_is_favourite(CHANNEL));
    assert!(!registry.ancestor_is_favourite(ROOT));
}

#[test]
fn duplicates_are_detected_by_source() {
    let registry = library();

    assert!(registry.check_duplicate_video(CHANNEL, "https://example.com/v/older"));
    assert!(!registry.check_duplicate_video(CHANNEL, "https://example.com/v/other"));
    assert!(!registry.check_duplicate_video(ROOT, "https://example.com/v/older"));
}

#[test]
fn aliases_redirect_the_actual_directory_only() {
    let mut registry = library();
    let downloads = Path::new("/downloads");

    registry.insert_folder(NodeId(5), "Elsewhere", None).unwrap();
    registry.edit_video(OLDER, |video| video.set_file("older", ".mp4")).unwrap();

    assert_eq!(registry.default_dir(CHANNEL, downloads, None).unwrap(), PathBuf::from("/downloads/Root/C1"));
    assert_eq!(registry.default_dir(CHANNEL, downloads, Some("C2")).unwrap(), PathBuf::from("/downloads/Root/C2"));

    registry.set_master_id(CHANNEL, NodeId(5)).unwrap();

    assert_eq!(registry.default_dir(CHANNEL, downloads, None).unwrap(), PathBuf::from("/downloads/Root/C1"));
    assert_eq!(registry.actual_dir(CHANNEL, downloads, Some("C2")).unwrap(), PathBuf::from("/downloads/Elsewhere"));
    assert_eq!(registry.relative_actual_dir(CHANNEL, None).unwrap(), PathBuf::from("Elsewhere"));

    assert_eq!(registry.default_path(OLDER, downloads).unwrap(), PathBuf::from("/downloads/Root/C1/older.mp4"));
    assert_eq!(registry.actual_path(OLDER, downloads).unwrap(), PathBuf::from("/downloads/Elsewhere/older.mp4"));
    assert_eq!(
        registry.actual_path_by_ext(OLDER, downloads, "jpg").unwrap(),
        PathBuf::from("/downloads/Elsewhere/older.jpg"),
    );
    assert_eq!(
        registry.default_path_by_ext(OLDER, downloads, ".info.json").unwrap(),
        PathBuf::from("/downloads/Root/C1/older.info.json"),
    );
}

#[test]
fn unresolved_paths_are_errors() {
    let registry = library();
    let downloads = Path::new("/downloads");

    assert_eq!(registry.default_path(NEWER, downloads), Err(RegistryError::Unresolved(NEWER)));
    assert_eq!(registry.default_path(CHANNEL, downloads), Err(RegistryError::NotAVideo(CHANNEL)));
    assert_eq!(registry.default_dir(OLDER, downloads, None), Err(RegistryError::NotAContainer(OLDER)));
    assert_eq!(registry.default_dir(NodeId(99), downloads, None), Err(RegistryError::NotFound(NodeId(99))));
}

#[test]
fn nested_export_keeps_the_tree() {
    let registry = library();

    let collection = registry.export_library(&[ROOT], ExportMode::Nested, ExportFilter::default());

    assert_eq!(
        serde_json::to_value(&collection).unwrap(),
        json!({
            "1": {
                "type": "folder",
                "id": 1,
                "name": "Root",
                "nickname": "Root",
                "source": null,
                "children": {
                    "2": {
                        "type": "channel",
                        "id": 2,
                        "name": "C1",
                        "nickname": "C1",
                        "source": "https://example.com/c1",
                        "children": {
                            "10": {
                                "type": "video",
                                "id": 10,
                                "name": "older",
                                "nickname": null,
                                "source": "https://example.com/v/older",
                                "children": {},
                            },
                            "11": {
                                "type": "video",
                                "id": 11,
                                "name": "newer",
                                "nickname": null,
                                "source": "https://example.com/v/newer",
                                "children": {},
                            },
                        },
                    },
                },
            },
        }),
    );
}

#[test]
fn flat_export_dissolves_folders() {
    let mut registry = library();
    registry.insert(Video::new(NodeId(20), "loose", ROOT).with_source("https://example.com/v/loose")).unwrap();
    registry.insert_video(NodeId(21), "sourceless", ROOT).unwrap();

    let collection = registry.export_library(&[ROOT], ExportMode::Flat, ExportFilter::default());

    assert_eq!(collection.keys().copied().collect::<Vec<_>>(), vec![CHANNEL, NodeId(20)]);
    assert_eq!(collection[&CHANNEL].children.len(), 2);
    assert_eq!(collection[&NodeId(20)].kind, NodeKind::Video);
}

#[test]
fn filters_and_fixed_folders_are_honoured() {
    let mut registry = library();
    registry.insert(Folder::new(NodeId(3), "System", None).with_flags(FolderFlags { fixed: true, ..Default::default() })).unwrap();

    let filter = ExportFilter {
        videos: false,
        ..Default::default()
    };
    let collection = registry.export_library(&registry.roots(), ExportMode::Nested, filter);

    assert_eq!(collection.keys().copied().collect::<Vec<_>>(), vec![ROOT]);
    assert!(collection[&ROOT].children[&CHANNEL].children.is_empty());

    let filter = ExportFilter {
        channels: false,
        ..Default::default()
    };
    let collection = registry.export_library(&[ROOT], ExportMode::Nested, filter);

    assert!(collection[&ROOT].children.is_empty());
}

#[test]
fn exports_import_as_fresh_nodes() {
    let collection = library().export_library(&[ROOT], ExportMode::Nested, ExportFilter::default());

    let mut registry = MediaRegistry::new();
    let ids = Sequence(AtomicU64::new(100));

    let event = import_collection(&mut registry, &collection, None, &ids, 4).unwrap();

    assert_eq!(event.imported, 4);
    assert_eq!(event.skipped, 0);
    assert_eq!(event.roots, vec![NodeId(100)]);

    let channel = registry.container(NodeId(100)).unwrap().children()[0];
    let names: Vec<_> = registry
        .container(channel)
        .unwrap()
        .children()
        .iter()
        .map(|id| registry.lookup(*id).unwrap().name().to_owned())
        .collect();

    assert_eq!(registry.lookup(channel).unwrap().source(), Some("https://example.com/c1"));
    assert_eq!(names.len(), 2);
    assert_eq!(registry.count_descendants(NodeId(100)).videos, 2);
}

#[test]
fn imports_skip_what_does_not_fit() {
    let collection = library().export_library(&[ROOT], ExportMode::Nested, ExportFilter::default());
    let ids = Sequence(AtomicU64::new(100));

    let mut shallow = MediaRegistry::new();
    let event = import_collection(&mut shallow, &collection, None, &ids, 1).unwrap();

    assert_eq!(event.imported, 1);
    assert_eq!(event.skipped, 3);

    let mut registry = library();
    let flat = registry.export_library(&[ROOT], ExportMode::Flat, ExportFilter::default());

    let event = import_collection(&mut registry, &flat, Some(ROOT), &ids, 4).unwrap();
    assert_eq!(event.imported, 3);

    assert_eq!(
        import_collection(&mut registry, &flat, Some(CHANNEL), &ids, 4),
        Err(RegistryError::UnexpectedKind {
            id: CHANNEL,
            found: NodeKind::Channel,
        }),
    );
}

fn document(kind: NodeKind, id: u64, name: &str, children: Vec<ExportDocument>) -> ExportDocument {
    ExportDocument {
        kind,
        id: NodeId(id),
        name: name.to_owned(),
        nickname: None,
        source: (kind != NodeKind::Folder).then(|| format!("https://example.com/{name}")),
        children: children.into_iter().map(|child| (child.id, child)).collect(),
    }
}

#[test]
fn failed_imports_leave_sorted_containers() {
    let collection: ExportCollection = [
        document(NodeKind::Folder, 1, "Root", vec![
            document(NodeKind::Video, 10, "clip", Vec::new()),
            document(NodeKind::Folder, 11, "Sub", Vec::new()),
        ]),
        document(NodeKind::Folder, 2, "Second", Vec::new()),
    ]
    .into_iter()
    .map(|document| (document.id, document))
    .collect();

    let mut registry = MediaRegistry::new();
    registry.insert_folder(NodeId(103), "Existing", None).unwrap();

    let ids = Sequence(AtomicU64::new(100));

    assert_eq!(
        import_collection(&mut registry, &collection, None, &ids, 4),
        Err(RegistryError::DuplicateId(NodeId(103))),
    );

    let names: Vec<_> = registry
        .container(NodeId(100))
        .unwrap()
        .children()
        .iter()
        .map(|id| registry.lookup(*id).unwrap().name().to_owned())
        .collect();

    assert_eq!(names, vec!["Sub", "clip"]);
    assert_eq!(registry.lookup(NodeId(103)).unwrap().name(), "Existing");
}

#[test]
fn legacy_documents_still_parse() {
    let collection: use_cases::models::documents::ExportCollection = serde_json::from_value(json!({
        "7": {
            "type": "channel",
            "dbid": 7,
            "name": "Legacy",
            "nickname": "Legacy",
            "source": "https://example.com/legacy",
            "db_dict": {
                "8": {
                    "type": "video",
                    "dbid": 8,
                    "name": "clip",
                    "nickname": null,
                    "source": "https://example.com/v/clip",
                },
            },
        },
    }))
    .unwrap();

    let channel = &collection[&NodeId(7)];
    assert_eq!(channel.kind, NodeKind::Channel);
    assert_eq!(channel.children[&NodeId(8)].source.as_deref(), Some("https://example.com/v/clip"));
}

#[test]
fn names_match_after_normalization() {
    let mut registry = MediaRegistry::new();
    registry.insert_channel(CHANNEL, "C1", "https://example.com/c1", None).unwrap();
    registry.insert_video(NodeId(3), "FooBar", CHANNEL).unwrap();
    registry.insert_video(NodeId(4), "Foo Bar Baz", CHANNEL).unwrap();
    registry.insert_video(NodeId(5), "Foo Bar", CHANNEL).unwrap();

    let settings = MatchSettings::default();

    assert_eq!(find_matching_video(&registry, CHANNEL, "Foo: Bar!", &settings), Some(NodeId(5)));
    assert_eq!(find_matching_video(&registry, CHANNEL, "Qux", &settings), None);
    assert_eq!(search_library(&registry, "Foo: Bar!", &settings), vec![(CHANNEL, NodeId(5))]);
}

#[test]
fn tooltips_describe_the_node() {
    let registry = library();
    let downloads = Path::new("/downloads");

    assert_eq!(
        registry.container_tooltip(CHANNEL, downloads, None).unwrap(),
        "#2:   C1\n\nSource:\nhttps://example.com/c1\n\nLocation:\n/downloads/Root/C1",
    );
    assert_eq!(
        registry.container_tooltip(ROOT, downloads, Some((80, &Uppercase))).unwrap(),
        "#1:   ROOT\n\nLOCATION:\n/DOWNLOADS/ROOT",
    );
    assert_eq!(
        registry.video_tooltip(OLDER, downloads, None).unwrap(),
        "#10:   older\n\nChannel: C1\n\nSource:\nhttps://example.com/v/older\n\nFile:\n <unknown>",
    );
    assert_eq!(registry.video_tooltip(CHANNEL, downloads, None), Err(RegistryError::NotAVideo(CHANNEL)));
}

#[test]
fn listings_skip_hidden_subtrees() {
    let mut registry = library();
    registry.insert(Folder::new(NodeId(3), "Secret", None).with_flags(FolderFlags { hidden: true, ..Default::default() })).unwrap();

    let entries = list_library(&registry, Path::new("/downloads"), false);
    let ids: Vec<_> = entries.iter().map(|entry| entry.id).collect();

    assert_eq!(ids, vec![ROOT, CHANNEL, NEWER, OLDER]);
    assert_eq!(entries[1].depth, 2);
    assert_eq!(entries[1].location, Some(PathBuf::from("/downloads/Root/C1")));
    assert_eq!(entries[2].location, None);

    let entries = list_library(&registry, Path::new("/downloads"), true);
    assert_eq!(entries.len(), 5);
    assert!(entries[4].hidden);
}

#[test]
fn descriptions_are_formatted_and_cleared() {
    let mut registry = library();

    set_video_description(&mut registry, OLDER, "first line\nsecond line", 80, &Uppercase).unwrap();
    let video = registry.video(OLDER).unwrap();
    assert_eq!(video.description(), Some("FIRST LINE\nSECOND LINE"));
    assert_eq!(video.short_description(), Some("FIRST LINE"));

    set_video_description(&mut registry, OLDER, "", 80, &Uppercase).unwrap();
    assert_eq!(registry.video(OLDER).unwrap().description(), None);
}

fn tree() -> impl Strategy<Value = Vec<(u8, prop::sample::Index)>> {
    prop::collection::vec((0..3u8, any::<prop::sample::Index>()), 0..48)
}

proptest! {
    #[test]
    fn normalizing_twice_changes_nothing(name in "\\PC{0,32}") {
        let once = normalize_name(&name);
        prop_assert_eq!(normalize_name(&once), once);
    }

    #[test]
    fn collected_videos_agree_with_the_census(nodes in tree()) {
        let mut registry = MediaRegistry::new();
        registry.insert_folder(ROOT, "Root", None).unwrap();

        let mut folders = vec![ROOT];
        let mut containers = vec![ROOT];

        for (offset, (kind, parent)) in nodes.into_iter().enumerate() {
            let id = NodeId(10 + offset as u64);

            match kind {
                0 => {
                    registry.insert_folder(id, format!("F{offset}"), Some(*parent.get(&folders))).unwrap();
                    folders.push(id);
                    containers.push(id);
                },
                1 => {
                    registry.insert_channel(id, format!("C{offset}"), "https://example.com/c", Some(*parent.get(&folders))).unwrap();
                    containers.push(id);
                },
                _ => {
                    registry.insert_video(id, format!("v{offset}"), *parent.get(&containers)).unwrap();
                },
            }
        }

        prop_assert_eq!(registry.collect_videos(ROOT).len(), registry.count_descendants(ROOT).videos);
    }
}
