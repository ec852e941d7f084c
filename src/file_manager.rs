use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::ValueEnum;

use crate::fs_utils::{collect_images, dispose, PathFilter, DEFAULT_PATTERN};

/// What happens to a file on disk when it is deleted from the viewer.
#[derive(Copy, Clone, PartialEq, Eq, ValueEnum, Debug, Default)]
pub enum DeleteMode {
    /// Unlink the file permanently
    #[default]
    Remove,
    /// Move the file into a trash directory under the browsing root
    Discard,
    /// Move the file to the desktop recycle bin
    Recycle,
}

/// When the file list is rebuilt from disk.
#[derive(Copy, Clone, PartialEq, Eq, ValueEnum, Debug, Default)]
pub enum RefreshPolicy {
    /// Rescan the root before every navigation step
    #[default]
    Rescan,
    /// Only change the list when a file is deleted
    Incremental,
}

#[derive(Debug, Clone)]
pub struct ManagerOptions {
    pub pattern: String,
    pub delete_mode: DeleteMode,
    pub refresh: RefreshPolicy,
    pub dry_run: bool,
}

impl Default for ManagerOptions {
    fn default() -> Self {
        Self {
            pattern: DEFAULT_PATTERN.to_string(),
            delete_mode: DeleteMode::default(),
            refresh: RefreshPolicy::default(),
            dry_run: false,
        }
    }
}

/// Sorted list of images under a root directory plus a cursor into it.
///
/// The cursor is always a valid index while the list is non-empty and 0
/// otherwise.
pub struct ImageFileManager {
    root: PathBuf,
    filter: PathFilter,
    files: Vec<PathBuf>,
    current_index: usize,
    delete_mode: DeleteMode,
    refresh: RefreshPolicy,
    dry_run: bool,
}

impl ImageFileManager {
    /// Scans the directory of `target`. When `target` is a file the cursor
    /// starts on it.
    pub fn new(target: &Path, options: ManagerOptions) -> Result<Self> {
        let target = fs::canonicalize(target)
            .with_context(|| format!("Unable to resolve {}", target.display()))?;
        let (root, initial) = if target.is_file() {
            let parent = target
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from("."));
            (parent, Some(target))
        } else {
            (target, None)
        };

        let filter = PathFilter::new(&options.pattern)?;
        let files = collect_images(&root, &filter)?;
        let current_index = initial
            .and_then(|file| files.iter().position(|p| *p == file))
            .unwrap_or(0);
        tracing::debug!(
            "Found {} files matching {} in {}",
            files.len(),
            filter.pattern(),
            root.display()
        );

        Ok(Self {
            root,
            filter,
            files,
            current_index,
            delete_mode: options.delete_mode,
            refresh: options.refresh,
            dry_run: options.dry_run,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn pattern(&self) -> &str {
        self.filter.pattern()
    }

    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn has_files(&self) -> bool {
        !self.files.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_file(&self) -> Option<&Path> {
        self.files.get(self.current_index).map(PathBuf::as_path)
    }

    /// Rebuilds the list from disk, keeping the cursor on the file that was
    /// shown last or the closest survivor around it.
    pub fn refresh(&mut self) -> Result<()> {
        let files = collect_images(&self.root, &self.filter)?;
        self.current_index = resume_index(&self.files, self.current_index, &files);
        if files.len() != self.files.len() {
            tracing::debug!("File list changed: {} -> {} files", self.files.len(), files.len());
        }
        self.files = files;
        Ok(())
    }

    pub fn next_file(&mut self) -> Option<&Path> {
        self.step(true)
    }

    pub fn previous_file(&mut self) -> Option<&Path> {
        self.step(false)
    }

    /// Resynchronises with the disk when rescanning is enabled, then moves
    /// the cursor circularly over the fresh list.
    fn step(&mut self, forward: bool) -> Option<&Path> {
        let shown = self.current_file().map(Path::to_path_buf);
        self.rescan_if_enabled();

        let len = self.files.len();
        if len == 0 {
            return None;
        }
        match shown {
            Some(shown) if self.files.get(self.current_index) != Some(&shown) => {
                // The shown file is gone: step from the gap it left behind.
                let gap = self.files.partition_point(|p| *p < shown);
                self.current_index = if forward {
                    gap % len
                } else {
                    (gap + len - 1) % len
                };
            }
            Some(_) => {
                self.current_index = if forward {
                    (self.current_index + 1) % len
                } else {
                    (self.current_index + len - 1) % len
                };
            }
            None => {}
        }
        self.current_file()
    }

    fn rescan_if_enabled(&mut self) {
        if self.refresh == RefreshPolicy::Rescan {
            if let Err(err) = self.refresh() {
                tracing::warn!("Keeping previous file list: {err:#}");
            }
        }
    }

    /// Deletes the current file and returns the one now under the cursor,
    /// after a rescan when that policy is enabled.
    ///
    /// Failures are logged and leave the list untouched; `None` then means
    /// the same as an exhausted list.
    pub fn delete_current_file(&mut self) -> Option<&Path> {
        match self.try_delete_current() {
            Ok(next) => next,
            Err(err) => {
                tracing::error!("Failed to delete file: {err:#}");
                None
            }
        }
    }

    pub fn try_delete_current(&mut self) -> Result<Option<&Path>> {
        let Some(path) = self.files.get(self.current_index).cloned() else {
            return Ok(None);
        };

        if self.dry_run {
            tracing::info!("Dry run: would {:?} {}", self.delete_mode, path.display());
        } else {
            dispose(&path, self.delete_mode, &self.root)?;
            tracing::info!("Deleted {} ({:?})", path.display(), self.delete_mode);
        }

        self.files.remove(self.current_index);
        if self.current_index >= self.files.len() {
            self.current_index = 0;
        }
        // A dry run leaves the file on disk, so a rescan would bring it back.
        if !self.dry_run {
            self.rescan_if_enabled();
        }
        Ok(self.current_file())
    }
}

/// Position in `current` to continue from after the list changed underneath
/// the cursor `index` of `previous`.
pub fn resume_index(previous: &[PathBuf], index: usize, current: &[PathBuf]) -> usize {
    if current.is_empty() {
        return 0;
    }
    let position = |path: &PathBuf| current.iter().position(|p| p == path);

    if index < previous.len() {
        if let Some(found) = position(&previous[index]) {
            return found;
        }
        if let Some(found) = previous[index + 1..].iter().find_map(position) {
            return found;
        }
        if let Some(found) = previous[..index].iter().rev().find_map(position) {
            return (found + 1).min(current.len() - 1);
        }
    }
    index.min(current.len() - 1)
}
