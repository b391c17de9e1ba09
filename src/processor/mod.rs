//! Main processing engine.
//!
//! Orchestrates conversion of an IMF archive: file discovery, per-file
//! parsing and serialization on blocking worker tasks, and statistics.
//! A file that fails to parse or write is recorded and skipped; it never
//! stops the rest of the run.

pub mod discovery;

#[cfg(test)]
pub mod tests;

use self::discovery::FileDiscovery;

use crate::config::ImfConfig;
use crate::constants::DEFAULT_ARCHIVE_DIR_NAME;
use crate::error::{ImfError, Result};
use crate::imf::read_imf;
use crate::models::{FailedFile, ProcessingStats};
use crate::output::build_sinks;

use colored::*;
use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tokio::task;
use tracing::{debug, warn};

/// Result of converting a single file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileOutcome {
    pub samples: usize,
    pub missing_samples: usize,
    pub series_written: usize,
}

/// Parse one IMF file and write it with every configured sink
pub fn convert_file(path: &Path, config: &ImfConfig, archive_root: &Path) -> Result<FileOutcome> {
    let observation = read_imf(path)?;

    let mut series_written = 0;
    for mut sink in build_sinks(config, archive_root)? {
        series_written += sink.write_observation(&observation)?.len();
    }

    let missing_samples = observation.iter().map(|s| s.missing_count()).sum();
    debug!(
        "Converted {}: {} samples per channel, {} files written",
        path.display(),
        observation.sample_count(),
        series_written
    );

    Ok(FileOutcome {
        samples: observation.sample_count(),
        missing_samples,
        series_written,
    })
}

/// Main processor for IMF archive conversion
#[derive(Debug)]
pub struct ImfProcessor {
    input_path: PathBuf,
    archive_path: PathBuf,
    config: ImfConfig,
}

impl ImfProcessor {
    /// Create a new processor; the archive defaults to a `miniseed`
    /// directory next to the input directory
    pub fn new(input_path: PathBuf, archive_path: Option<PathBuf>) -> Result<Self> {
        if !input_path.exists() {
            return Err(ImfError::InputNotFound { path: input_path });
        }

        let archive_path = archive_path.unwrap_or_else(|| {
            input_path
                .parent()
                .unwrap_or_else(|| Path::new("."))
                .join(DEFAULT_ARCHIVE_DIR_NAME)
        });

        Ok(Self {
            input_path,
            archive_path,
            config: ImfConfig::default(),
        })
    }

    /// Configure the processor
    pub fn with_config(mut self, config: ImfConfig) -> Self {
        self.config = config;
        self
    }

    pub fn archive_path(&self) -> &Path {
        &self.archive_path
    }

    pub fn config(&self) -> &ImfConfig {
        &self.config
    }

    /// Main processing entry point
    pub async fn process(&mut self) -> Result<ProcessingStats> {
        let start_time = Instant::now();
        self.config.validate()?;

        println!("{}", "Starting IMF archive conversion".bright_green().bold());
        println!("  {} {}", "Input:".bright_cyan(), self.input_path.display());
        println!("  {} {}", "Archive:".bright_cyan(), self.archive_path.display());

        let mut stats = ProcessingStats {
            archive_path: self.archive_path.clone(),
            ..Default::default()
        };

        // Step 1: Discover IMF files
        println!("\n{}", "Discovering IMF files...".bright_yellow());
        let mut discovery =
            FileDiscovery::new(self.input_path.clone(), self.config.station_pattern.clone());
        let files = discovery.discover_imf_files()?;
        stats.files_discovered = files.len();
        println!(
            "  {} {} files from {} stations",
            "Found".bright_green(),
            files.len().to_string().bright_white().bold(),
            discovery.station_count().to_string().bright_white().bold()
        );

        if files.is_empty() {
            stats.processing_time_ms = start_time.elapsed().as_millis();
            return Ok(stats);
        }

        // Step 2: Convert files concurrently, one blocking task per file
        let pb = ProgressBar::new(files.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );
        pb.set_message("Converting files");

        let config = Arc::new(self.config.clone());
        let archive_root = Arc::new(self.archive_path.clone());

        let mut results = stream::iter(files)
            .map(|path| {
                let config = Arc::clone(&config);
                let archive_root = Arc::clone(&archive_root);
                async move {
                    let task_path = path.clone();
                    let result = task::spawn_blocking(move || {
                        convert_file(&task_path, &config, &archive_root)
                    })
                    .await;
                    (path, result)
                }
            })
            .buffer_unordered(self.config.max_concurrent_files);

        while let Some((path, result)) = results.next().await {
            match result {
                Ok(Ok(outcome)) => {
                    stats.files_processed += 1;
                    stats.total_samples += outcome.samples;
                    stats.missing_samples += outcome.missing_samples;
                    stats.series_written += outcome.series_written;
                }
                Ok(Err(e)) => {
                    warn!("Failed to convert {}: {}", path.display(), e);
                    stats.files_failed += 1;
                    stats.failed_files.push(FailedFile {
                        path,
                        reason: e.to_string(),
                    });
                }
                Err(join_error) => {
                    warn!("Conversion task for {} aborted: {}", path.display(), join_error);
                    stats.files_failed += 1;
                    stats.failed_files.push(FailedFile {
                        path,
                        reason: format!("conversion task aborted: {}", join_error),
                    });
                }
            }
            pb.inc(1);
        }

        pb.finish_with_message("Conversion complete");
        stats.failed_files.sort_by(|a, b| a.path.cmp(&b.path));
        stats.processing_time_ms = start_time.elapsed().as_millis();

        Ok(stats)
    }
}
