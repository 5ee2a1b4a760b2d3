use ::async_trait::async_trait;
use ::domain::NodeId;

use crate::models::documents::ExportFilter;
use crate::models::documents::ExportMode;
use crate::models::events::LibraryExportedEvent;
use crate::models::events::LibraryImportedEvent;
use crate::models::events::LibraryListedEvent;
use crate::models::events::SearchCompletedEvent;
use crate::models::events::VideoMatchedEvent;
use crate::utils::aliases::Fallible;

#[async_trait]
pub trait Accept<Request>: Send + Sync {
    async fn accept(self: ::std::sync::Arc<Self>, request: Request) -> Fallible<()>;
}

#[async_trait]
pub trait Activate: Send + Sync {
    async fn activate(self: ::std::sync::Arc<Self>) -> Fallible<()>;

    async fn deactivate(self: ::std::sync::Arc<Self>) -> Fallible<()>;
}

#[async_trait]
pub trait Update<Event>: Send + Sync {
    async fn update(self: ::std::sync::Arc<Self>, event: &Event) -> Fallible<()>;
}

pub struct ImportLibraryRequestModel {
    pub path: ::std::path::PathBuf,
    /// Folder to import under. Top-level containers become roots when absent.
    pub parent: Option<NodeId>,
}

pub trait ImportLibraryOutputBoundary: Activate + Update<LibraryImportedEvent> {}

impl<Boundary> ImportLibraryOutputBoundary for Boundary where Boundary: Activate + Update<LibraryImportedEvent> {}

pub struct ExportLibraryRequestModel {
    pub path: ::std::path::PathBuf,
    pub mode: ExportMode,
    pub filter: ExportFilter,
}

pub trait ExportLibraryOutputBoundary: Activate + Update<LibraryExportedEvent> {}

impl<Boundary> ExportLibraryOutputBoundary for Boundary where Boundary: Activate + Update<LibraryExportedEvent> {}

pub struct ShowLibraryRequestModel {
    pub include_hidden: bool,
}

pub trait ShowLibraryOutputBoundary: Activate + Update<LibraryListedEvent> {}

impl<Boundary> ShowLibraryOutputBoundary for Boundary where Boundary: Activate + Update<LibraryListedEvent> {}

pub struct FindVideoRequestModel {
    pub name: String,
}

pub trait FindVideoOutputBoundary: Activate + Update<VideoMatchedEvent> + Update<SearchCompletedEvent> {}

impl<Boundary> FindVideoOutputBoundary for Boundary where
    Boundary: Activate + Update<VideoMatchedEvent> + Update<SearchCompletedEvent>
{
}
