use std::{
    ffi::OsStr,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{anyhow, Context, Result};
use globset::{GlobBuilder, GlobMatcher};
use walkdir::WalkDir;

use crate::file_manager::DeleteMode;

pub const TRASH_DIR: &str = ".pngviewer-trash";
pub const DEFAULT_PATTERN: &str = "**/*.png";

/// Checks the command-line target before any window is opened.
pub fn validate_target(target: &Path) -> Result<()> {
    if !target.exists() {
        return Err(anyhow!("{} does not exist", target.display()));
    }
    if target.is_file() && !is_png(target) {
        return Err(anyhow!("{} is not a PNG file", target.display()));
    }
    Ok(())
}

pub fn is_png(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map_or(false, |ext| ext.eq_ignore_ascii_case("png"))
}

/// Glob filter applied to paths relative to the browsing root.
#[derive(Debug, Clone)]
pub struct PathFilter {
    pattern: String,
    matcher: GlobMatcher,
}

impl PathFilter {
    pub fn new(pattern: &str) -> Result<Self> {
        let glob = GlobBuilder::new(pattern)
            .case_insensitive(true)
            .literal_separator(true)
            .build()
            .with_context(|| format!("Invalid file pattern {pattern}"))?;
        Ok(Self {
            pattern: pattern.to_string(),
            matcher: glob.compile_matcher(),
        })
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn is_match(&self, relative: &Path) -> bool {
        self.matcher.is_match(relative)
    }

    fn max_depth(&self) -> usize {
        if self.pattern.contains('/') {
            usize::MAX
        } else {
            1
        }
    }
}

/// Returns every file under `root` matching `filter`, sorted by path.
pub fn collect_images(root: &Path, filter: &PathFilter) -> Result<Vec<PathBuf>> {
    if !root.exists() {
        return Err(anyhow!("{} does not exist", root.display()));
    }
    if !root.is_dir() {
        return Err(anyhow!("{} is not a directory", root.display()));
    }

    let mut files = Vec::new();
    let walker = WalkDir::new(root)
        .follow_links(false)
        .max_depth(filter.max_depth())
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || entry.file_name() != OsStr::new(TRASH_DIR));
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                tracing::debug!("Skipping unreadable entry: {err}");
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let Ok(relative) = entry.path().strip_prefix(root) else {
            continue;
        };
        if filter.is_match(relative) {
            files.push(entry.into_path());
        }
    }
    files.sort();
    Ok(files)
}

/// Removes `path` from the browsing set according to `mode`.
pub fn dispose(path: &Path, mode: DeleteMode, root: &Path) -> Result<()> {
    match mode {
        DeleteMode::Remove => fs::remove_file(path)
            .with_context(|| format!("Unable to delete {}", path.display())),
        DeleteMode::Discard => {
            let dir = prepare_dir(&root.join(TRASH_DIR))?;
            move_with_unique_name(path, &dir)
        }
        DeleteMode::Recycle => trash::delete(path)
            .with_context(|| format!("Unable to move {} to the recycle bin", path.display())),
    }
}

pub fn prepare_dir(dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(dir).with_context(|| format!("Unable to create {}", dir.display()))?;
    Ok(dir.to_path_buf())
}

pub fn move_with_unique_name(source: &Path, target_dir: &Path) -> Result<()> {
    let file_name = source
        .file_name()
        .ok_or_else(|| anyhow!("{} has no file name", source.display()))?;
    let destination = unique_destination(target_dir, file_name);
    fs::rename(source, &destination).with_context(|| {
        format!(
            "Unable to move {} to {}",
            source.display(),
            destination.display()
        )
    })
}

pub fn unique_destination(dir: &Path, file_name: &OsStr) -> PathBuf {
    let mut candidate = dir.join(file_name);
    if !candidate.exists() {
        return candidate;
    }
    let (stem, ext) = split_name(file_name);
    for idx in 1.. {
        let new_name = if let Some(ext) = &ext {
            format!("{stem}-{idx}.{ext}")
        } else {
            format!("{stem}-{idx}")
        };
        candidate = dir.join(new_name);
        if !candidate.exists() {
            break;
        }
    }
    candidate
}

pub fn split_name(file_name: &OsStr) -> (String, Option<String>) {
    let name = file_name.to_string_lossy();
    if let Some((stem, ext)) = name.rsplit_once('.') {
        (stem.to_string(), Some(ext.to_string()))
    } else {
        (name.to_string(), None)
    }
}
