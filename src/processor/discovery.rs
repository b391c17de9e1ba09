//! File discovery module for IMF archives
//!
//! Handles discovering IMF files below an input directory and counting
//! unique stations for processing statistics.

use crate::error::{ImfError, Result};
use glob::Pattern;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// File discovery component for IMF archives
#[derive(Debug)]
pub struct FileDiscovery {
    input_path: PathBuf,
    station_pattern: String,
    station_count: usize,
}

impl FileDiscovery {
    /// Create a new file discovery instance
    pub fn new(input_path: PathBuf, station_pattern: impl Into<String>) -> Self {
        Self {
            input_path,
            station_pattern: station_pattern.into(),
            station_count: 0,
        }
    }

    /// Get the current station count
    pub fn station_count(&self) -> usize {
        self.station_count
    }

    /// Glob pattern matched against the archive
    pub fn pattern(&self) -> String {
        let root = Pattern::escape(&self.input_path.to_string_lossy());
        format!("{}/*/{}/*.*", root, self.station_pattern)
    }

    /// Discover all IMF files and count stations
    ///
    /// Downloaded IMF archives follow this structure:
    /// ```text
    /// input/
    ///   2024/
    ///     ABK/
    ///       2024-01-01.abk
    ///       2024-01-02.abk
    ///     HER/
    ///       2024-01-01.her
    /// ```
    pub fn discover_imf_files(&mut self) -> Result<Vec<PathBuf>> {
        if !self.input_path.is_dir() {
            return Err(ImfError::InputNotFound {
                path: self.input_path.clone(),
            });
        }

        let pattern = self.pattern();
        debug!("Searching for IMF files matching: {}", pattern);

        let mut files = Vec::new();
        let mut stations = HashSet::new();

        for entry in glob::glob(&pattern)? {
            let path = match entry {
                Ok(path) => path,
                Err(e) => {
                    warn!("Skipping unreadable path {}: {}", e.path().display(), e);
                    continue;
                }
            };

            if !path.is_file() {
                continue;
            }

            if let Some(station) = station_of(&path) {
                stations.insert(station);
            }
            files.push(path);
        }

        files.sort();
        self.station_count = stations.len();

        debug!(
            "Found {} IMF files from {} stations",
            files.len(),
            self.station_count
        );

        Ok(files)
    }
}

/// Station directory name of a discovered file
fn station_of(path: &Path) -> Option<String> {
    path.parent()
        .and_then(|p| p.file_name())
        .map(|name| name.to_string_lossy().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(root: &Path, relative: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "").unwrap();
    }

    #[test]
    fn test_discovers_files_by_year_and_station() {
        let temp_dir = TempDir::new().unwrap();
        touch(temp_dir.path(), "2024/ABK/2024-01-01.abk");
        touch(temp_dir.path(), "2024/ABK/2024-01-02.abk");
        touch(temp_dir.path(), "2024/HER/2024-01-01.her");
        touch(temp_dir.path(), "2024/HER/README");
        touch(temp_dir.path(), "notes.txt");

        let mut discovery = FileDiscovery::new(temp_dir.path().to_path_buf(), "*");
        let files = discovery.discover_imf_files().unwrap();

        assert_eq!(files.len(), 3);
        assert_eq!(discovery.station_count(), 2);
        assert!(files[0].ends_with("2024/ABK/2024-01-01.abk"));
    }

    #[test]
    fn test_station_pattern_filters() {
        let temp_dir = TempDir::new().unwrap();
        touch(temp_dir.path(), "2024/ABK/2024-01-01.abk");
        touch(temp_dir.path(), "2023/HER/2023-12-31.her");

        let mut discovery = FileDiscovery::new(temp_dir.path().to_path_buf(), "HER");
        let files = discovery.discover_imf_files().unwrap();

        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("2023/HER/2023-12-31.her"));
    }

    #[test]
    fn test_missing_input_directory() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("nonexistent");

        let mut discovery = FileDiscovery::new(missing.clone(), "*");

        match discovery.discover_imf_files() {
            Err(ImfError::InputNotFound { path }) => assert_eq!(path, missing),
            other => panic!("Expected InputNotFound error, got {:?}", other),
        }
    }
}
