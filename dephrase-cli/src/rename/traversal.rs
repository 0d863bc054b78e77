use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

use crate::core::error::{DephraseError, Result};

/// Directory walker producing the files (and optionally folders) under a root
pub struct Traversal<'a> {
    root: &'a Path,

    /// Descend into subdirectories
    recurse: bool,

    /// Depth bound when recursing (1 = root only)
    max_depth: usize,

    /// Lower-case extensions without the leading dot
    exclude_extensions: &'a [String],

    /// Exact paths never returned, whatever their extension
    skipped: Vec<PathBuf>,
}

impl<'a> Traversal<'a> {
    pub fn new(root: &'a Path, recurse: bool, exclude_extensions: &'a [String]) -> Self {
        Self {
            root,
            recurse,
            max_depth: 64,
            exclude_extensions,
            skipped: Vec::new(),
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth.max(1);
        self
    }

    pub fn with_skipped(mut self, paths: Vec<PathBuf>) -> Self {
        self.skipped = paths;
        self
    }

    /// Files under the root, in listing order. Within a directory the files
    /// come before anything found in its subdirectories.
    pub fn files(&self) -> Result<Vec<PathBuf>> {
        self.check_root()?;

        let mut files = Vec::new();
        let walker = WalkDir::new(self.root)
            .min_depth(1)
            .max_depth(self.depth())
            .follow_links(false)
            .sort_by(|a, b| a.file_type().is_dir().cmp(&b.file_type().is_dir()));

        for entry in walker {
            let Some(entry) = self.accept(entry)? else {
                continue;
            };

            if is_file(&entry) && !self.is_excluded(entry.path()) {
                debug!("Found file {}", entry.path().display());
                files.push(entry.into_path());
            }
        }

        Ok(files)
    }

    /// Folders under the root (never the root itself), deepest first so a
    /// folder is always visited before its parent.
    pub fn folders(&self) -> Result<Vec<PathBuf>> {
        self.check_root()?;

        let mut folders = Vec::new();
        let walker = WalkDir::new(self.root)
            .min_depth(1)
            .max_depth(self.depth())
            .follow_links(false)
            .contents_first(true);

        for entry in walker {
            let Some(entry) = self.accept(entry)? else {
                continue;
            };

            if entry.file_type().is_dir() {
                debug!("Found folder {}", entry.path().display());
                folders.push(entry.into_path());
            }
        }

        Ok(folders)
    }

    fn depth(&self) -> usize {
        if self.recurse {
            self.max_depth
        } else {
            1
        }
    }

    fn check_root(&self) -> Result<()> {
        fs::read_dir(self.root).map_err(|source| DephraseError::DirectoryAccess {
            path: self.root.to_path_buf(),
            source,
        })?;
        Ok(())
    }

    /// Errors on the root are fatal; anything deeper is skipped with a warning.
    fn accept(&self, entry: walkdir::Result<DirEntry>) -> Result<Option<DirEntry>> {
        match entry {
            Ok(entry) => Ok(Some(entry)),
            Err(err) if err.depth() == 0 => {
                let path = err.path().unwrap_or(self.root).to_path_buf();
                let source = err
                    .into_io_error()
                    .unwrap_or_else(|| io::Error::new(io::ErrorKind::Other, "filesystem loop"));
                Err(DephraseError::DirectoryAccess { path, source })
            }
            Err(err) => {
                warn!("Skipping unreadable entry: {}", err);
                Ok(None)
            }
        }
    }

    fn is_excluded(&self, path: &Path) -> bool {
        is_excluded_extension(path, self.exclude_extensions)
            || self.skipped.iter().any(|skipped| skipped == path)
    }
}

fn is_file(entry: &DirEntry) -> bool {
    entry.file_type().is_file() || (entry.path_is_symlink() && entry.path().is_file())
}

/// Case-insensitive check of the path's extension against the exclusion list
pub fn is_excluded_extension(path: &Path, exclude_extensions: &[String]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let ext = ext.to_lowercase();
            exclude_extensions.iter().any(|excluded| *excluded == ext)
        })
        .unwrap_or(false)
}
