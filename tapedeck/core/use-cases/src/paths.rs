use ::std::path::Path;
use ::std::path::PathBuf;

use ::domain::Container as _;
use ::domain::NodeId;
use ::domain::NodeLookup;
use ::domain::RegistryError;

use crate::traversal::LibraryTraversal as _;

/// Download locations. Segments are joined as-is, nothing is escaped or sanitized.
pub trait LibraryPaths: NodeLookup + Sized {
    /// The container's own directory: its ancestors' names, root first, then its own name (or
    /// `override_name`, to preview a rename).
    fn default_dir(&self, id: NodeId, downloads_dir: &Path, override_name: Option<&str>) -> Result<PathBuf, RegistryError> {
        Ok(downloads_dir.join(self.relative_default_dir(id, override_name)?))
    }

    /// Where the container's files actually go. An aliased container resolves to its master's
    /// default directory, one level only; `override_name` then has nothing to rename.
    fn actual_dir(&self, id: NodeId, downloads_dir: &Path, override_name: Option<&str>) -> Result<PathBuf, RegistryError> {
        Ok(downloads_dir.join(self.relative_actual_dir(id, override_name)?))
    }

    fn relative_default_dir(&self, id: NodeId, override_name: Option<&str>) -> Result<PathBuf, RegistryError> {
        let container = self.container(id).ok_or_else(|| missing_container(self, id))?;

        let mut segments: Vec<&str> = self
            .ancestry(id)
            .iter()
            .skip(1)
            .filter_map(|ancestor| self.lookup(*ancestor))
            .map(|ancestor| ancestor.name())
            .collect();

        segments.reverse();
        segments.push(override_name.unwrap_or(container.name()));

        Ok(segments.into_iter().collect())
    }

    fn relative_actual_dir(&self, id: NodeId, override_name: Option<&str>) -> Result<PathBuf, RegistryError> {
        let container = self.container(id).ok_or_else(|| missing_container(self, id))?;

        if container.core().is_aliased() {
            self.relative_default_dir(container.master_id(), None)
        } else {
            self.relative_default_dir(id, override_name)
        }
    }

    fn default_path(&self, video: NodeId, downloads_dir: &Path) -> Result<PathBuf, RegistryError> {
        video_path(self, video, downloads_dir, None, Self::default_dir)
    }

    fn actual_path(&self, video: NodeId, downloads_dir: &Path) -> Result<PathBuf, RegistryError> {
        video_path(self, video, downloads_dir, None, Self::actual_dir)
    }

    /// Sibling file of the video with another extension, e.g. its thumbnail. The leading dot is
    /// optional.
    fn default_path_by_ext(&self, video: NodeId, downloads_dir: &Path, ext: &str) -> Result<PathBuf, RegistryError> {
        video_path(self, video, downloads_dir, Some(ext), Self::default_dir)
    }

    fn actual_path_by_ext(&self, video: NodeId, downloads_dir: &Path, ext: &str) -> Result<PathBuf, RegistryError> {
        video_path(self, video, downloads_dir, Some(ext), Self::actual_dir)
    }
}

impl<Lookup: NodeLookup> LibraryPaths for Lookup {}

fn missing_container(registry: &(impl NodeLookup + ?Sized), id: NodeId) -> RegistryError {
    match registry.lookup(id) {
        Some(_) => RegistryError::NotAContainer(id),
        None => RegistryError::NotFound(id),
    }
}

fn video_path<Registry: LibraryPaths>(
    registry: &Registry, id: NodeId, downloads_dir: &Path, ext: Option<&str>,
    dir: fn(&Registry, NodeId, &Path, Option<&str>) -> Result<PathBuf, RegistryError>,
) -> Result<PathBuf, RegistryError> {
    let video = match registry.lookup(id) {
        Some(node) => node.as_video().ok_or(RegistryError::NotAVideo(id))?,
        None => return Err(RegistryError::NotFound(id)),
    };

    let file_name = video.file_name().ok_or(RegistryError::Unresolved(id))?;

    let ext = match ext {
        Some(ext) if ext.starts_with('.') => ext.to_owned(),
        Some(ext) => format!(".{ext}"),
        None => video.file_ext().ok_or(RegistryError::Unresolved(id))?.to_owned(),
    };

    Ok(dir(registry, video.parent(), downloads_dir, None)?.join(format!("{file_name}{ext}")))
}
