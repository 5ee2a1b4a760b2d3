use ::anyhow::Context as _;
use ::async_trait::async_trait;
use ::derive_new::new;
use ::use_cases::gateways::DocumentRepository;
use ::use_cases::models::documents::ExportCollection;

use crate::utils::aliases::Fallible;
use crate::utils::aliases::MaybeOwnedPath;
use crate::utils::extensions::OptionExt;

/// Export collections stored as JSON files, one collection per file.
#[derive(new)]
pub struct JsonDocumentRepository {
    /// Indent the written JSON.
    pub pretty: bool,
}

#[async_trait]
impl DocumentRepository for JsonDocumentRepository {
    async fn load(self: ::std::sync::Arc<Self>, path: MaybeOwnedPath) -> Fallible<ExportCollection> {
        let bytes = ::tokio::fs::read(&path)
            .await
            .with_context(|| format!("could not read {}", path.display()))?;

        let collection: ExportCollection = ::serde_json::from_slice(&bytes)
            .with_context(|| format!("{} is not an exported library", path.display()))?;

        ::tracing::debug!(path = %path.display(), documents = collection.len(), "loaded documents");

        Ok(collection)
    }

    async fn save(self: ::std::sync::Arc<Self>, path: MaybeOwnedPath, collection: ExportCollection) -> Fallible<()> {
        let bytes = match self.pretty {
            true => ::serde_json::to_vec_pretty(&collection)?,
            false => ::serde_json::to_vec(&collection)?,
        };

        ::tokio::fs::create_dir_all(path.parent().ok()?).await?;
        ::tokio::fs::write(&path, bytes)
            .await
            .with_context(|| format!("could not write {}", path.display()))?;

        ::tracing::debug!(path = %path.display(), documents = collection.len(), "saved documents");

        Ok(())
    }
}
