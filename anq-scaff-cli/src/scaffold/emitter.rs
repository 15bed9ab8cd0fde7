//! Writes rendered artifacts to disk

use super::error::{Result, ScaffoldError};
use super::generator::Artifact;
use std::fs;
use std::path::{Path, PathBuf};

/// Writes artifacts under a project root
///
/// Parent directories are created as needed and existing files are
/// overwritten. A failure stops the run; files already written stay.
#[derive(Debug, Clone)]
pub struct FileEmitter {
    root: PathBuf,
}

impl FileEmitter {
    /// Emitter rooted at `root`
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Project root
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Write every artifact, returning the absolute paths in order
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::Io`] naming the directory or file that could
    /// not be created.
    pub fn emit(&self, artifacts: &[Artifact]) -> Result<Vec<PathBuf>> {
        artifacts
            .iter()
            .map(|artifact| self.write(artifact))
            .collect()
    }

    fn write(&self, artifact: &Artifact) -> Result<PathBuf> {
        let full_path = self.root.join(&artifact.path);

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).map_err(|source| ScaffoldError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let existed = full_path.exists();
        fs::write(&full_path, &artifact.content).map_err(|source| ScaffoldError::Io {
            path: full_path.clone(),
            source,
        })?;

        tracing::debug!(path = %full_path.display(), overwritten = existed, "wrote artifact");
        Ok(full_path)
    }
}
