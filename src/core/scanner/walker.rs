//! Directory walking implementation using walkdir.

use super::{filter::ImageFilter, CandidateSource, Candidates};
use crate::error::ScanError;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::warn;
use walkdir::{DirEntry, WalkDir};

/// Configuration for the directory scanner
#[derive(Debug, Clone, Default)]
pub struct ScanConfig {
    /// Whether to follow symbolic links
    pub follow_symlinks: bool,
    /// Whether to include hidden files and directories
    pub include_hidden: bool,
    /// Maximum directory depth (None = unlimited)
    pub max_depth: Option<usize>,
}

/// Lazily discovers candidate images under one or more roots.
///
/// A root may be a directory (walked recursively) or a single file (kept
/// if it sniffs as an image). Every call to
/// [`candidates`](CandidateSource::candidates) starts a fresh walk.
pub struct WalkDirScanner {
    roots: Vec<PathBuf>,
    config: ScanConfig,
    filter: ImageFilter,
}

impl WalkDirScanner {
    /// Create a new scanner with the given roots and configuration
    pub fn new(roots: Vec<PathBuf>, config: ScanConfig) -> Self {
        let filter = ImageFilter::new().with_hidden(config.include_hidden);
        Self {
            roots,
            config,
            filter,
        }
    }

    /// Fail if a root is missing or, for directories, unreadable
    fn check_root(root: &Path) -> Result<(), ScanError> {
        let classify = |source: io::Error| match source.kind() {
            io::ErrorKind::NotFound => ScanError::RootNotFound {
                path: root.to_path_buf(),
            },
            io::ErrorKind::PermissionDenied => ScanError::PermissionDenied {
                path: root.to_path_buf(),
            },
            _ => ScanError::ReadDirectory {
                path: root.to_path_buf(),
                source,
            },
        };

        let metadata = fs::metadata(root).map_err(classify)?;
        if metadata.is_dir() {
            fs::read_dir(root).map_err(classify)?;
        }
        Ok(())
    }

    /// Regular files, including symlinks that resolve to one
    fn is_regular_file(entry: &DirEntry) -> bool {
        entry.file_type().is_file() || (entry.path_is_symlink() && entry.path().is_file())
    }

    fn walk_root<'a>(&'a self, root: &'a Path) -> Candidates<'a> {
        if root.is_file() {
            let keep = self.filter.should_include(root);
            return Box::new(keep.then(|| root.to_path_buf()).into_iter());
        }

        let filter = &self.filter;
        let mut walker = WalkDir::new(root).follow_links(self.config.follow_symlinks);
        if let Some(depth) = self.config.max_depth {
            walker = walker.max_depth(depth);
        }

        Box::new(
            walker
                .into_iter()
                .filter_entry(move |entry| filter.should_visit(entry))
                .filter_map(|result| match result {
                    Ok(entry) => Some(entry),
                    Err(e) => {
                        let path = e.path().map(Path::to_path_buf).unwrap_or_default();
                        warn!(path = %path.display(), error = %e, "skipping unreadable entry");
                        None
                    }
                })
                .filter(Self::is_regular_file)
                .map(DirEntry::into_path)
                .filter(move |path| filter.should_include(path)),
        )
    }
}

impl CandidateSource for WalkDirScanner {
    fn candidates(&self) -> Result<Candidates<'_>, ScanError> {
        for root in &self.roots {
            Self::check_root(root)?;
        }

        Ok(Box::new(
            self.roots.iter().flat_map(move |root| self.walk_root(root)),
        ))
    }
}
