use std::sync::Arc;

use domain::Container;
use domain::MediaRegistry;
use domain::NodeId;
use domain::NodeLookup;
use domain::Video;
use infrastructures::gateways::allocators::SequentialIdAllocator;
use infrastructures::gateways::repositories::JsonDocumentRepository;
use infrastructures::workers::RegistryWorker;
use pretty_assertions::assert_eq;
use use_cases::export::LibraryExport;
use use_cases::gateways::query;
use use_cases::gateways::DocumentRepository;
use use_cases::gateways::LibraryStore;
use use_cases::import::import_collection;
use use_cases::models::documents::ExportFilter;
use use_cases::models::documents::ExportMode;

fn library() -> MediaRegistry {
    let mut registry = MediaRegistry::new();

    registry.insert_folder(NodeId(1), "Root", None).unwrap();
    registry.insert_channel(NodeId(2), "C1", "https://example.com/c1", Some(NodeId(1))).unwrap();
    registry
        .insert(Video::new(NodeId(10), "clip", NodeId(2)).with_source("https://example.com/v/clip"))
        .unwrap();

    registry
}

#[tokio::test]
async fn documents_survive_a_trip_to_disk() {
    let directory = tempfile::tempdir().unwrap();
    let path = directory.path().join("nested").join("library.json");

    let collection = library().export_library(&[NodeId(1)], ExportMode::Nested, ExportFilter::default());
    let repository = Arc::new(JsonDocumentRepository::new(true));

    Arc::clone(&repository).save(path.clone().into(), collection.clone()).await.unwrap();
    let loaded = Arc::clone(&repository).load(path.clone().into()).await.unwrap();

    assert_eq!(loaded, collection);

    let text = tokio::fs::read_to_string(&path).await.unwrap();
    assert!(text.contains("\"type\": \"channel\""));
}

#[tokio::test]
async fn broken_documents_are_reported() {
    let directory = tempfile::tempdir().unwrap();
    let path = directory.path().join("broken.json");
    tokio::fs::write(&path, "{ not json").await.unwrap();

    let repository = Arc::new(JsonDocumentRepository::new(false));

    assert!(Arc::clone(&repository).load(path.into()).await.is_err());
    assert!(repository.load(directory.path().join("absent.json").into()).await.is_err());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn the_worker_applies_jobs_in_order() {
    let (worker, handle) = RegistryWorker::spawn(MediaRegistry::new());
    let store: Arc<dyn LibraryStore> = worker;

    let tasks: Vec<_> = (1..=20)
        .map(|id| {
            let store = Arc::clone(&store);

            tokio::spawn(async move {
                query(&store, move |registry| registry.insert_folder(NodeId(id), format!("F{id}"), None).is_ok()).await
            })
        })
        .collect();

    for task in tasks {
        assert!(task.await.unwrap().unwrap());
    }

    let roots = query(&store, |registry| registry.roots()).await.unwrap();
    assert_eq!(roots.len(), 20);

    drop(store);

    let registry = handle.await.unwrap();
    assert_eq!(registry.len(), 20);
}

#[tokio::test]
async fn the_worker_hosts_imports() {
    let collection = library().export_library(&[NodeId(1)], ExportMode::Flat, ExportFilter::default());

    let (worker, handle) = RegistryWorker::spawn(library());
    let store: Arc<dyn LibraryStore> = worker;

    let event = query(&store, move |registry| {
        let ids = SequentialIdAllocator::following(registry);
        import_collection(registry, &collection, Some(NodeId(1)), &ids, 4)
    })
    .await
    .unwrap()
    .unwrap();

    assert_eq!(event.imported, 2);
    assert_eq!(event.roots, vec![NodeId(11)]);

    drop(store);

    let registry = handle.await.unwrap();
    assert_eq!(registry.container(NodeId(1)).map(|root| root.children().len()), Some(2));
}
