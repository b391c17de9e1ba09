//! IMF header line parsing and metadata extraction.
//!
//! The first line of an IMF v1.22 file names the observatory and the start
//! of the data it holds, e.g.
//!
//! ```text
//! ABK JAN0124 001 00 HDZF R GIN 06840198 000000 RRRRRRRRRRRR
//! ```
//!
//! Token 0 is the IAGA station code, token 1 the date as `MonDDYY` and
//! token 3 the hour of day. Token 3 may also carry minutes as `HH:MM`.
//! Everything after token 3 is ignored.

use crate::constants::{HEADER_MIN_TOKENS, IMF_NETWORK_CODE, SAMPLE_INTERVAL_SECONDS};
use crate::error::{ImfError, Result};
use crate::models::HeaderMetadata;
use chrono::{NaiveDate, NaiveTime};
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

/// The header is always the first line of the file
pub const HEADER_LINE_NUMBER: usize = 1;

static DATE_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<month>[A-Za-z]{3})(?P<day>\d{2})(?P<year>\d{2})$")
        .expect("date token pattern is valid")
});

static TIME_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<hour>\d{1,2})(?::(?P<minute>\d{2}))?$").expect("time token pattern is valid")
});

/// Extract station identity and start time from the header line
pub fn parse_header_line(line: &str) -> Result<HeaderMetadata> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() < HEADER_MIN_TOKENS {
        return Err(ImfError::header_format(
            HEADER_LINE_NUMBER,
            format!(
                "expected at least {} tokens, found {}",
                HEADER_MIN_TOKENS,
                tokens.len()
            ),
        ));
    }

    let date = parse_date_token(tokens[1])?;
    let time = parse_time_token(tokens[3])?;
    let start_time = date.and_time(time).and_utc();

    debug!("Parsed header for station {}: start {}", tokens[0], start_time);

    Ok(HeaderMetadata {
        station_code: tokens[0].to_string(),
        network_code: IMF_NETWORK_CODE.to_string(),
        sample_interval_seconds: SAMPLE_INTERVAL_SECONDS,
        start_time,
    })
}

/// Parse `MonDDYY`; the month abbreviation is accepted in any case
fn parse_date_token(token: &str) -> Result<NaiveDate> {
    let captures = DATE_TOKEN.captures(token).ok_or_else(|| {
        ImfError::header_format(
            HEADER_LINE_NUMBER,
            format!("date token '{}' is not in MonDDYY form", token),
        )
    })?;

    let month = &captures["month"];
    let normalized = format!(
        "{}{}{}{}",
        month[..1].to_ascii_uppercase(),
        month[1..].to_ascii_lowercase(),
        &captures["day"],
        &captures["year"]
    );

    NaiveDate::parse_from_str(&normalized, "%b%d%y").map_err(|e| {
        ImfError::header_format(
            HEADER_LINE_NUMBER,
            format!("invalid date '{}': {}", token, e),
        )
    })
}

/// Parse `HH` or `HH:MM`; seconds are always zero
fn parse_time_token(token: &str) -> Result<NaiveTime> {
    let invalid = || {
        ImfError::header_format(
            HEADER_LINE_NUMBER,
            format!("time token '{}' is not in HH or HH:MM form", token),
        )
    };

    let captures = TIME_TOKEN.captures(token).ok_or_else(invalid)?;
    let hour: u32 = captures["hour"].parse().map_err(|_| invalid())?;
    let minute: u32 = match captures.name("minute") {
        Some(m) => m.as_str().parse().map_err(|_| invalid())?,
        None => 0,
    };

    NaiveTime::from_hms_opt(hour, minute, 0).ok_or_else(invalid)
}
