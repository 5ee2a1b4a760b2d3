use ::async_trait::async_trait;
use ::domain::MediaRegistry;
use ::use_cases::gateways::LibraryStore;
use ::use_cases::gateways::RegistryJob;

use crate::utils::aliases::Fallible;

/// Owns the registry on its own task and applies jobs one at a time, in the order they were sent.
pub struct RegistryWorker {
    jobs_tx: ::tokio::sync::mpsc::UnboundedSender<RegistryJob>,
}

impl RegistryWorker {
    /// The handle resolves to the registry once every clone of the worker is dropped.
    pub fn spawn(registry: MediaRegistry) -> (::std::sync::Arc<Self>, ::tokio::task::JoinHandle<MediaRegistry>) {
        let (jobs_tx, mut jobs_rx) = ::tokio::sync::mpsc::unbounded_channel::<RegistryJob>();

        let handle = ::tokio::spawn(async move {
            let mut registry = registry;
            let mut jobs = 0usize;

            while let Some(job) = jobs_rx.recv().await {
                job(&mut registry);
                jobs += 1;
            }

            ::tracing::debug!(jobs, nodes = registry.len(), "registry worker stopped");

            registry
        });

        (::std::sync::Arc::new(Self { jobs_tx }), handle)
    }
}

#[async_trait]
impl LibraryStore for RegistryWorker {
    async fn execute(self: ::std::sync::Arc<Self>, job: RegistryJob) -> Fallible<()> {
        self.jobs_tx
            .send(job)
            .map_err(|_| ::anyhow::anyhow!("registry worker is no longer running"))
    }
}
