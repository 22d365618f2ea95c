use crate::{errors::IoError, vfs::VirtualFS};
use colored::Colorize;
use std::path::{Path, PathBuf};

/// Writes generated files under the bazel workspace root.
///
/// Every entry is also staged in a [`VirtualFS`]; with `dry_run` set nothing touches
/// the disk and the staged entries are all that is left.
#[derive(Debug)]
pub struct Workspace {
    root: PathBuf,
    dry_run: bool,
    staged: VirtualFS,
}
impl Workspace {
    pub fn new(root: impl Into<PathBuf>, dry_run: bool) -> Self {
        Self {
            root: root.into(),
            dry_run,
            staged: VirtualFS::new(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Creates `relative` and any missing parents. An existing directory is fine.
    ///
    /// # Errors
    ///
    /// Returns an [`IoError`] if the directory cannot be created.
    pub fn create_directory(&mut self, relative: impl AsRef<Path>) -> Result<(), IoError> {
        let relative = relative.as_ref();
        let path = self.root.join(relative);

        if !self.dry_run {
            std::fs::create_dir_all(&path).map_err(|error| IoError::mkdir(&path, error))?;
            log::debug!("ensured directory {}", path.display());
        }

        self.staged.push_dir(relative);

        Ok(())
    }

    /// Writes `contents` to `relative`, replacing whatever was there.
    ///
    /// # Errors
    ///
    /// Returns an [`IoError`] if writing fails, e.g. when the parent directory is missing.
    pub fn write_file(
        &mut self,
        relative: impl AsRef<Path>,
        contents: String,
    ) -> Result<(), IoError> {
        let relative = relative.as_ref();
        let path = self.root.join(relative);

        if !self.dry_run {
            let verb = if path.exists() {
                "overwrite".yellow()
            } else {
                "create".green()
            };

            std::fs::write(&path, &contents).map_err(|error| IoError::write(&path, error))?;

            log::info!("{} {}", verb, path.display());
        }

        self.staged.push_file(relative, contents);

        Ok(())
    }

    pub fn staged(&self) -> &VirtualFS {
        &self.staged
    }
}
