//! Basic processing integration tests

use super::{imf_day, write_file};
use crate::config::{ImfConfig, OutputFormat};
use crate::processor::{ImfProcessor, convert_file};
use std::fs;
use tempfile::TempDir;

/// Purpose: Run discovery, parsing and miniSEED output over a small archive
/// Benefit: Validates the end-to-end conversion path and its statistics
#[tokio::test]
async fn test_basic_processing_pipeline() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("imf");
    write_file(&input, "2024/ABK/2024-01-01.abk", &imf_day("ABK"));
    write_file(&input, "2024/HER/2024-01-01.her", &imf_day("HER"));
    let archive = temp_dir.path().join("archive");

    let mut processor = ImfProcessor::new(input, Some(archive.clone()))
        .unwrap()
        .with_config(ImfConfig::default().with_max_concurrent_files(2));

    let stats = processor.process().await.unwrap();

    assert_eq!(stats.files_discovered, 2);
    assert_eq!(stats.files_processed, 2);
    assert_eq!(stats.files_failed, 0);
    assert_eq!(stats.total_samples, 8);
    assert_eq!(stats.missing_samples, 2);
    assert_eq!(stats.series_written, 8);
    assert_eq!(stats.archive_path, archive);

    for channel in ["UFN", "UFE", "UFZ", "UFT"] {
        let path = archive.join(format!(
            "2024/IM/ABK/{ch}.D/IM.ABK..{ch}.D.2024.001",
            ch = channel
        ));
        assert!(path.exists(), "missing {}", path.display());
        assert_eq!(fs::metadata(&path).unwrap().len(), 512);
    }
}

/// Purpose: Create a processor without an explicit archive path
/// Benefit: Ensures the default miniseed directory sits beside the input
#[tokio::test]
async fn test_default_archive_is_next_to_input() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("imf");
    write_file(&input, "2024/ABK/2024-01-01.abk", &imf_day("ABK"));

    let processor = ImfProcessor::new(input, None).unwrap();

    assert_eq!(processor.archive_path(), temp_dir.path().join("miniseed"));
}

/// Purpose: Process an input directory with no IMF files
/// Benefit: Confirms an empty run succeeds with zeroed statistics
#[tokio::test]
async fn test_empty_archive_processes_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("imf");
    fs::create_dir_all(&input).unwrap();

    let mut processor =
        ImfProcessor::new(input, Some(temp_dir.path().join("archive"))).unwrap();
    let stats = processor.process().await.unwrap();

    assert_eq!(stats.files_discovered, 0);
    assert_eq!(stats.files_processed, 0);
}

/// Purpose: Convert one file with miniSEED and Parquet output enabled
/// Benefit: Verifies every configured sink writes its files
#[test]
fn test_convert_file_with_both_formats() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_file(temp_dir.path(), "in/2024/ABK/day.abk", &imf_day("ABK"));
    let archive = temp_dir.path().join("out");
    let config = ImfConfig::default().with_output_format(OutputFormat::Both);

    let outcome = convert_file(&path, &config, &archive).unwrap();

    assert_eq!(outcome.samples, 4);
    assert_eq!(outcome.missing_samples, 1);
    // Four miniSEED day files plus one Parquet table
    assert_eq!(outcome.series_written, 5);
    assert!(archive.join("2024/IM/ABK/IM.ABK.2024.001.parquet").exists());
}
