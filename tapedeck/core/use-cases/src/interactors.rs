use ::async_trait::async_trait;
use ::derive_new::new;
use ::domain::NodeLookup as _;

use crate::boundaries::Accept;
use crate::boundaries::ExportLibraryOutputBoundary;
use crate::boundaries::ExportLibraryRequestModel;
use crate::boundaries::FindVideoOutputBoundary;
use crate::boundaries::FindVideoRequestModel;
use crate::boundaries::ImportLibraryOutputBoundary;
use crate::boundaries::ImportLibraryRequestModel;
use crate::boundaries::ShowLibraryOutputBoundary;
use crate::boundaries::ShowLibraryRequestModel;
use crate::boundaries::Update;
use crate::describe::list_library;
use crate::export::LibraryExport as _;
use crate::gateways::query;
use crate::gateways::DocumentRepository;
use crate::gateways::IdAllocator;
use crate::gateways::LibraryStore;
use crate::import::import_collection;
use crate::matching::search_library;
use crate::models::events::LibraryExportedEvent;
use crate::models::events::LibraryListedEvent;
use crate::models::events::SearchCompletedEvent;
use crate::models::events::VideoMatchedEvent;
use crate::models::settings::LibrarySettings;
use crate::utils::aliases::Fallible;

#[derive(new)]
pub struct ImportLibraryInteractor {
    pub output_boundary: ::std::sync::Arc<dyn ImportLibraryOutputBoundary>,

    pub documents: ::std::sync::Arc<dyn DocumentRepository>,
    pub store: ::std::sync::Arc<dyn LibraryStore>,
    pub ids: ::std::sync::Arc<dyn IdAllocator>,

    pub settings: ::std::sync::Arc<LibrarySettings>,
}

#[async_trait]
impl Accept<ImportLibraryRequestModel> for ImportLibraryInteractor {
    async fn accept(self: ::std::sync::Arc<Self>, request: ImportLibraryRequestModel) -> Fallible<()> {
        let ImportLibraryRequestModel { path, parent } = request;

        let collection = ::std::sync::Arc::clone(&self.documents).load(path.into()).await?;

        let ids = ::std::sync::Arc::clone(&self.ids);
        let max_depth = self.settings.max_depth;

        let event = query(&self.store, move |registry| {
            import_collection(registry, &collection, parent, &*ids, max_depth)
        })
        .await??;

        ::std::sync::Arc::clone(&self.output_boundary).activate().await?;
        ::std::sync::Arc::clone(&self.output_boundary).update(&event).await?;
        ::std::sync::Arc::clone(&self.output_boundary).deactivate().await?;

        Ok(())
    }
}

#[derive(new)]
pub struct ExportLibraryInteractor {
    pub output_boundary: ::std::sync::Arc<dyn ExportLibraryOutputBoundary>,

    pub documents: ::std::sync::Arc<dyn DocumentRepository>,
    pub store: ::std::sync::Arc<dyn LibraryStore>,
}

#[async_trait]
impl Accept<ExportLibraryRequestModel> for ExportLibraryInteractor {
    async fn accept(self: ::std::sync::Arc<Self>, request: ExportLibraryRequestModel) -> Fallible<()> {
        let ExportLibraryRequestModel { path, mode, filter } = request;

        let collection = query(&self.store, move |registry| {
            let roots = registry.roots();
            registry.export_library(&roots, mode, filter)
        })
        .await?;

        let event = LibraryExportedEvent {
            path: path.clone(),
            documents: collection.len(),
        };

        ::std::sync::Arc::clone(&self.documents).save(path.into(), collection).await?;

        ::std::sync::Arc::clone(&self.output_boundary).activate().await?;
        ::std::sync::Arc::clone(&self.output_boundary).update(&event).await?;
        ::std::sync::Arc::clone(&self.output_boundary).deactivate().await?;

        Ok(())
    }
}

#[derive(new)]
pub struct ShowLibraryInteractor {
    pub output_boundary: ::std::sync::Arc<dyn ShowLibraryOutputBoundary>,

    pub store: ::std::sync::Arc<dyn LibraryStore>,

    pub settings: ::std::sync::Arc<LibrarySettings>,
}

#[async_trait]
impl Accept<ShowLibraryRequestModel> for ShowLibraryInteractor {
    async fn accept(self: ::std::sync::Arc<Self>, request: ShowLibraryRequestModel) -> Fallible<()> {
        let settings = ::std::sync::Arc::clone(&self.settings);

        let entries = query(&self.store, move |registry| {
            list_library(registry, &settings.downloads_dir, request.include_hidden)
        })
        .await?;

        ::std::sync::Arc::clone(&self.output_boundary).activate().await?;
        ::std::sync::Arc::clone(&self.output_boundary).update(&LibraryListedEvent { entries }).await?;
        ::std::sync::Arc::clone(&self.output_boundary).deactivate().await?;

        Ok(())
    }
}

#[derive(new)]
pub struct FindVideoInteractor {
    pub output_boundary: ::std::sync::Arc<dyn FindVideoOutputBoundary>,

    pub store: ::std::sync::Arc<dyn LibraryStore>,

    pub settings: ::std::sync::Arc<LibrarySettings>,
}

#[async_trait]
impl Accept<FindVideoRequestModel> for FindVideoInteractor {
    async fn accept(self: ::std::sync::Arc<Self>, request: FindVideoRequestModel) -> Fallible<()> {
        let FindVideoRequestModel { name } = request;
        let matching = self.settings.matching;

        let (events, name) = query(&self.store, move |registry| {
            let events: Vec<_> = search_library(registry, &name, &matching)
                .into_iter()
                .map(|(container, video)| VideoMatchedEvent {
                    container,
                    container_name: registry.lookup(container).map_or_else(String::new, |node| node.name().to_owned()),
                    video,
                    video_name: registry.lookup(video).map_or_else(String::new, |node| node.name().to_owned()),
                })
                .collect();

            (events, name)
        })
        .await?;

        ::std::sync::Arc::clone(&self.output_boundary).activate().await?;

        for event in &events {
            Update::<VideoMatchedEvent>::update(::std::sync::Arc::clone(&self.output_boundary), event).await?;
        }

        let event = SearchCompletedEvent {
            candidate: name,
            matches: events.len(),
        };

        Update::<SearchCompletedEvent>::update(::std::sync::Arc::clone(&self.output_boundary), &event).await?;
        ::std::sync::Arc::clone(&self.output_boundary).deactivate().await?;

        Ok(())
    }
}
