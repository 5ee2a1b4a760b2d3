use ::async_trait::async_trait;
use ::domain::MediaRegistry;
use ::domain::NodeId;

use crate::models::descriptors::FormattedText;
use crate::models::documents::ExportCollection;
use crate::utils::aliases::Fallible;
use crate::utils::aliases::MaybeOwnedPath;

#[async_trait]
pub trait DocumentRepository: Send + Sync {
    async fn load(self: ::std::sync::Arc<Self>, path: MaybeOwnedPath) -> Fallible<ExportCollection>;

    async fn save(self: ::std::sync::Arc<Self>, path: MaybeOwnedPath, collection: ExportCollection) -> Fallible<()>;
}

pub type RegistryJob = ::std::boxed::Box<dyn FnOnce(&mut MediaRegistry) + Send>;

/// Sole owner of the registry. Jobs run one at a time, in submission order.
#[async_trait]
pub trait LibraryStore: Send + Sync {
    async fn execute(self: ::std::sync::Arc<Self>, job: RegistryJob) -> Fallible<()>;
}

/// Runs `job` against the store's registry and hands back its output.
pub async fn query<R, F>(store: &::std::sync::Arc<dyn LibraryStore>, job: F) -> Fallible<R>
where
    F: FnOnce(&mut MediaRegistry) -> R + Send + 'static,
    R: Send + 'static,
{
    let (output_tx, output_rx) = ::tokio::sync::oneshot::channel();

    ::std::sync::Arc::clone(store)
        .execute(::std::boxed::Box::new(move |registry| {
            let _ = output_tx.send(job(registry));
        }))
        .await?;

    Ok(output_rx.await?)
}

pub trait IdAllocator: Send + Sync {
    fn allocate(&self) -> NodeId;
}

pub trait TextFormatter: Send + Sync {
    fn format(&self, text: &str, max_len: usize) -> FormattedText;
}
