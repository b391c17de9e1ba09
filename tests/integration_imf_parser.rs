//! Integration tests for the IMF parser and archive output
//!
//! Builds full-day IMF files the way observatories publish them (24 hourly
//! blocks of 30 two-minute lines) and checks the public API end to end.

use byteorder::{BigEndian, ReadBytesExt};
use chrono::{TimeZone, Utc};
use imf_processor::imf::{LineKind, classify, parse_lines, parse_str, read_imf};
use imf_processor::output::{ArchiveLayout, MiniSeedSink, SeriesSink};
use imf_processor::{Channel, ImfError};
use std::fs;
use std::io::{Cursor, Write};
use tempfile::NamedTempFile;

/// Full day of minute data for a station; every value encodes its position
fn full_day(station: &str, date: &str) -> String {
    let mut text = String::new();
    for hour in 0..24 {
        text.push_str(&format!(
            "{} {} 001 {:02} HDZF R GIN 06840198 000000 RRRRRRRRRRRR\n",
            station, date, hour
        ));
        for pair in 0..30 {
            let minute = hour * 60 + pair * 2;
            let fields: Vec<String> = [minute, minute + 1]
                .iter()
                .flat_map(|m| [*m, -*m, 10_000 + *m, 50_000 + *m])
                .map(|v| format!("{:07}", v))
                .collect();
            text.push_str(&format!(
                "{}  {}\n",
                fields[..4].join(" "),
                fields[4..].join(" ")
            ));
        }
    }
    text
}

/// Purpose: Parse a full day of minute data published as 24 hourly blocks
/// Benefit: Validates sample counts, channel values and timing on realistic input
#[test]
fn test_full_day_file() {
    let observation = parse_str(&full_day("ABK", "JAN0124")).unwrap();

    // 24 blocks x 30 lines x 2 samples
    assert_eq!(observation.sample_count(), 1440);
    for series in &observation {
        assert_eq!(series.sample_count(), 1440);
        assert_eq!(
            series.start_time(),
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
        );
    }

    let north = observation.channel(Channel::North).values();
    assert!(north.iter().enumerate().all(|(i, &v)| v == i as i32));
    let east = observation.channel(Channel::East).values();
    assert_eq!(east[1439], -1439);
    let vertical = observation.channel(Channel::Vertical).values();
    assert_eq!(vertical[720], 10_720);
    let total = observation.channel(Channel::TotalField).values();
    assert_eq!(total[0], 50_000);

    assert_eq!(
        observation.channel(Channel::TotalField).end_time(),
        Some(Utc.with_ymd_and_hms(2024, 1, 1, 23, 59, 0).unwrap())
    );
}

/// Purpose: Compare samples per channel with the number of data lines
/// Benefit: Guards the two-samples-per-line rule across a whole day
#[test]
fn test_sample_count_is_twice_data_lines() {
    let text = full_day("HER", "JUN1523");
    let data_lines = text
        .lines()
        .enumerate()
        .skip(1)
        .filter(|(i, l)| matches!(classify(l, i + 1), Ok(LineKind::Data)))
        .count();

    let observation = parse_str(&text).unwrap();

    assert_eq!(data_lines, 720);
    assert_eq!(observation.sample_count(), 2 * data_lines);
}

/// Purpose: Parse the same day from disk and from memory
/// Benefit: Ensures the file reader and the line-source API agree
#[test]
fn test_read_from_file_matches_in_memory_parse() {
    let text = full_day("ABK", "JAN0124");
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(text.as_bytes()).unwrap();

    let from_disk = read_imf(temp_file.path()).unwrap();
    let in_memory = parse_lines(text.lines().map(|l| Ok(l.to_string()))).unwrap();

    for channel in Channel::ALL {
        assert_eq!(
            from_disk.channel(channel).values(),
            in_memory.channel(channel).values()
        );
    }
}

/// Purpose: Append one bad line at the end of a full day
/// Benefit: Confirms late errors discard the file and report the exact line
#[test]
fn test_late_failure_returns_no_observation() {
    let mut text = full_day("ABK", "JAN0124");
    text.push_str("0000001 0000002 0000003 0000004  0000005 0000006 0000007 000000X\n");

    let err = parse_str(&text).unwrap_err();

    // 24 markers/headers + 720 data lines precede the bad line
    assert!(matches!(err, ImfError::DataToken { line: 745, .. }));
}

/// Purpose: Write a full day to the miniSEED archive
/// Benefit: Verifies record count and total samples in the day file
#[test]
fn test_full_day_miniseed_archive() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let observation = parse_str(&full_day("ABK", "JAN0124")).unwrap();
    let mut sink = MiniSeedSink::new(ArchiveLayout::new(temp_dir.path(), "IM"), 512).unwrap();

    let written = sink.write_observation(&observation).unwrap();
    assert_eq!(written.len(), 4);

    let bytes = fs::read(temp_dir.path().join("2024/IM/ABK/UFN.D/IM.ABK..UFN.D.2024.001")).unwrap();
    // 112 samples per 512-byte record
    assert_eq!(bytes.len(), 1440_usize.div_ceil(112) * 512);

    let mut total = 0;
    for record in bytes.chunks(512) {
        let mut cursor = Cursor::new(&record[30..32]);
        total += cursor.read_u16::<BigEndian>().unwrap() as usize;
    }
    assert_eq!(total, 1440);
}
