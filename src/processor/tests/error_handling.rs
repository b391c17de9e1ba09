//! Error handling integration tests

use super::{imf_day, write_file};
use crate::config::ImfConfig;
use crate::error::ImfError;
use crate::processor::ImfProcessor;
use tempfile::TempDir;

/// Purpose: Create a processor for a missing input directory
/// Benefit: Ensures the error names the path that was not found
#[tokio::test]
async fn test_nonexistent_input_path() {
    let temp_dir = TempDir::new().unwrap();
    let nonexistent_path = temp_dir.path().join("nonexistent");

    let result = ImfProcessor::new(nonexistent_path.clone(), None);

    match result.unwrap_err() {
        ImfError::InputNotFound { path } => assert_eq!(path, nonexistent_path),
        other => panic!("Expected InputNotFound error, got {:?}", other),
    }
}

/// Purpose: Process an archive holding one good and one corrupt file
/// Benefit: Confirms a bad file is recorded and skipped without stopping the run
#[tokio::test]
async fn test_bad_files_are_isolated() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("imf");
    write_file(&input, "2024/ABK/2024-01-01.abk", &imf_day("ABK"));
    let broken = write_file(
        &input,
        "2024/ABK/2024-01-02.abk",
        &imf_day("ABK").replace("0467892", "04678x2"),
    );
    let truncated = write_file(
        &input,
        "2024/ABK/2024-01-03.abk",
        "ABK JAN0324 003 00 HDZF R GIN 06840198 000000 RRRRRRRRRRRR\n0183420 -002313\n",
    );

    let mut processor =
        ImfProcessor::new(input, Some(temp_dir.path().join("archive"))).unwrap();
    let stats = processor.process().await.unwrap();

    assert_eq!(stats.files_discovered, 3);
    assert_eq!(stats.files_processed, 1);
    assert_eq!(stats.files_failed, 2);
    assert_eq!(stats.total_samples, 4);

    assert_eq!(stats.failed_files[0].path, broken);
    assert!(stats.failed_files[0].reason.contains("line 4"));
    assert_eq!(stats.failed_files[1].path, truncated);
    assert!(stats.failed_files[1].reason.contains("too short"));
}

/// Purpose: Process a file whose header is unreadable
/// Benefit: Ensures header failures are reported per file
#[tokio::test]
async fn test_corrupted_header() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("imf");
    write_file(&input, "2024/ABK/2024-01-01.abk", "This is not an IMF file\n");

    let mut processor =
        ImfProcessor::new(input, Some(temp_dir.path().join("archive"))).unwrap();
    let stats = processor.process().await.unwrap();

    assert_eq!(stats.files_failed, 1);
    assert!(stats.failed_files[0].reason.contains("Invalid header"));
}

/// Purpose: Start processing with an invalid configuration
/// Benefit: Confirms configuration errors stop the run before any file is touched
#[tokio::test]
async fn test_invalid_config_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("imf");
    write_file(&input, "2024/ABK/2024-01-01.abk", &imf_day("ABK"));

    let mut processor = ImfProcessor::new(input, None)
        .unwrap()
        .with_config(ImfConfig::default().with_record_length(1000));

    assert!(matches!(
        processor.process().await,
        Err(ImfError::Configuration { .. })
    ));
}
