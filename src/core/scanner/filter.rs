//! File filtering logic for the scanner.

use std::path::Path;
use tracing::debug;
use walkdir::DirEntry;

/// Whether the file at `path` is an image, judged by its magic bytes.
///
/// Unreadable files are reported as "not an image".
pub fn is_image(path: &Path) -> bool {
    match infer::get_from_path(path) {
        Ok(Some(kind)) => kind.mime_type().starts_with("image/"),
        Ok(None) => false,
        Err(e) => {
            debug!(path = %path.display(), error = %e, "content sniff failed");
            false
        }
    }
}

/// Whether a file or directory name marks it as hidden
pub fn is_hidden_name(name: &str) -> bool {
    name.starts_with('.')
}

/// Decides which walked entries become candidates
#[derive(Debug, Clone, Default)]
pub struct ImageFilter {
    /// Whether to include hidden files and directories
    include_hidden: bool,
}

impl ImageFilter {
    /// Create a new filter that skips hidden entries
    pub fn new() -> Self {
        Self::default()
    }

    /// Include hidden files (starting with .)
    pub fn with_hidden(mut self, include: bool) -> Self {
        self.include_hidden = include;
        self
    }

    /// Whether the walk should yield or descend into `entry`.
    ///
    /// The walk root itself is always kept, even if its name is hidden.
    pub fn should_visit(&self, entry: &DirEntry) -> bool {
        if self.include_hidden || entry.depth() == 0 {
            return true;
        }
        !entry
            .file_name()
            .to_str()
            .map(is_hidden_name)
            .unwrap_or(false)
    }

    /// Whether a regular file should become a candidate
    pub fn should_include(&self, path: &Path) -> bool {
        is_image(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma};
    use std::fs;
    use tempfile::TempDir;
    use walkdir::WalkDir;

    fn write_png(path: &Path) {
        GrayImage::from_pixel(2, 2, Luma([1]))
            .save_with_format(path, image::ImageFormat::Png)
            .unwrap();
    }

    #[test]
    fn sniff_ignores_extension() {
        let dir = TempDir::new().unwrap();
        let disguised = dir.path().join("image.txt");
        write_png(&disguised);
        let fake = dir.path().join("fake.jpg");
        fs::write(&fake, b"plain text pretending").unwrap();

        assert!(is_image(&disguised));
        assert!(!is_image(&fake));
    }

    #[test]
    fn sniff_handles_missing_file() {
        assert!(!is_image(Path::new("/nonexistent/photo.png")));
    }

    #[test]
    fn hidden_names() {
        assert!(is_hidden_name(".DS_Store"));
        assert!(is_hidden_name(".thumbnails"));
        assert!(!is_hidden_name("holiday.jpg"));
    }

    #[test]
    fn filter_skips_hidden_entries_but_not_root() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join(".gallery");
        fs::create_dir(&root).unwrap();
        fs::write(root.join(".hidden.png"), b"x").unwrap();
        fs::write(root.join("visible.png"), b"x").unwrap();

        let filter = ImageFilter::new();
        let names: Vec<_> = WalkDir::new(&root)
            .into_iter()
            .filter_entry(|e| filter.should_visit(e))
            .filter_map(|e| e.ok())
            .filter(|e| e.depth() > 0)
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .collect();

        assert_eq!(names, vec!["visible.png".to_string()]);
    }

    #[test]
    fn filter_can_include_hidden() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(".hidden.png"), b"x").unwrap();

        let filter = ImageFilter::new().with_hidden(true);
        let count = WalkDir::new(dir.path())
            .into_iter()
            .filter_entry(|e| filter.should_visit(e))
            .filter_map(|e| e.ok())
            .filter(|e| e.depth() > 0)
            .count();

        assert_eq!(count, 1);
    }
}
