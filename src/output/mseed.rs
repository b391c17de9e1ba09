//! miniSEED v2 encoding.
//!
//! Each channel series is cut into fixed-length data records. A record is a
//! 48-byte fixed header, blockette 1000 describing the payload, padding up
//! to the data offset, then big-endian 32-bit integer samples. Unused space
//! at the end of the last record is zero-filled.

use super::SeriesSink;
use super::archive::{ArchiveLayout, discard_partial, ensure_parent_dir};
use crate::constants::mseed::*;
use crate::error::{ImfError, Result};
use crate::models::ChannelSeries;
use byteorder::{BigEndian, WriteBytesExt};
use chrono::{DateTime, Datelike, Timelike, Utc};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Encodes channel series into miniSEED data records
#[derive(Debug, Clone)]
pub struct MiniSeedEncoder {
    network: String,
    location: String,
    record_length: usize,
}

impl MiniSeedEncoder {
    pub fn new(network: impl Into<String>, record_length: usize) -> Result<Self> {
        if !record_length.is_power_of_two()
            || !(MIN_RECORD_LENGTH..=MAX_RECORD_LENGTH).contains(&record_length)
        {
            return Err(ImfError::encoding(format!(
                "unsupported record length {}",
                record_length
            )));
        }

        Ok(Self {
            network: network.into(),
            location: String::new(),
            record_length,
        })
    }

    pub fn record_length(&self) -> usize {
        self.record_length
    }

    /// Samples that fit in one record
    pub fn samples_per_record(&self) -> usize {
        (self.record_length - DATA_OFFSET) / SAMPLE_SIZE
    }

    /// Encode a series into consecutive records; empty series give no bytes
    pub fn encode(&self, series: &ChannelSeries) -> Result<Vec<u8>> {
        let chunk = self.samples_per_record();
        let record_count = series.sample_count().div_ceil(chunk);
        let mut out = Vec::with_capacity(record_count * self.record_length);

        for (index, samples) in series.values().chunks(chunk).enumerate() {
            let start = series.metadata().sample_time(index * chunk);
            let sequence = (index as u32 % MAX_SEQUENCE_NUMBER) + 1;
            self.encode_record(&mut out, sequence, series, start, samples)?;
        }

        Ok(out)
    }

    /// Encode a series and write it out, returning the number of records
    pub fn write_series<W: Write>(&self, series: &ChannelSeries, writer: &mut W) -> Result<usize> {
        let bytes = self.encode(series)?;
        writer.write_all(&bytes)?;
        Ok(bytes.len() / self.record_length)
    }

    fn encode_record(
        &self,
        out: &mut Vec<u8>,
        sequence: u32,
        series: &ChannelSeries,
        start: DateTime<Utc>,
        samples: &[i32],
    ) -> Result<()> {
        let record_start = out.len();

        // Fixed section of the data header
        out.extend_from_slice(format!("{:06}", sequence).as_bytes());
        out.push(QUALITY_INDICATOR);
        out.push(b' ');
        write_padded(out, "station", series.station_code(), STATION_WIDTH)?;
        write_padded(out, "location", &self.location, LOCATION_WIDTH)?;
        write_padded(out, "channel", series.label(), CHANNEL_WIDTH)?;
        write_padded(out, "network", &self.network, NETWORK_WIDTH)?;
        write_btime(out, start)?;
        out.write_u16::<BigEndian>(samples.len() as u16)?;

        // A negative factor is a sample period in seconds
        let period = i16::try_from(series.sample_interval_seconds()).map_err(|_| {
            ImfError::encoding(format!(
                "sample interval {}s cannot be expressed in a record header",
                series.sample_interval_seconds()
            ))
        })?;
        out.write_i16::<BigEndian>(-period)?;
        out.write_i16::<BigEndian>(1)?;

        out.push(0); // activity flags
        out.push(0); // I/O and clock flags
        out.push(0); // data quality flags
        out.push(1); // blockettes that follow
        out.write_i32::<BigEndian>(0)?; // time correction
        out.write_u16::<BigEndian>(DATA_OFFSET as u16)?;
        out.write_u16::<BigEndian>(FIXED_HEADER_SIZE as u16)?;

        // Blockette 1000
        out.write_u16::<BigEndian>(BLOCKETTE_1000)?;
        out.write_u16::<BigEndian>(0)?;
        out.push(ENCODING_INT32);
        out.push(WORD_ORDER_BIG_ENDIAN);
        out.push(self.record_length.trailing_zeros() as u8);
        out.push(0);

        out.resize(record_start + DATA_OFFSET, 0);
        for &sample in samples {
            out.write_i32::<BigEndian>(sample)?;
        }
        out.resize(record_start + self.record_length, 0);

        Ok(())
    }
}

/// Write `value` left-justified and space-padded to `width` bytes
fn write_padded(out: &mut Vec<u8>, field: &str, value: &str, width: usize) -> Result<()> {
    if value.len() > width || !value.bytes().all(|b| b.is_ascii_alphanumeric()) {
        return Err(ImfError::encoding(format!(
            "{} code '{}' must be at most {} alphanumeric characters",
            field, value, width
        )));
    }

    out.extend_from_slice(value.as_bytes());
    out.extend(std::iter::repeat_n(b' ', width - value.len()));
    Ok(())
}

/// SEED BTIME: year, day of year, h, m, s, unused, 1/10000 s
fn write_btime(out: &mut Vec<u8>, time: DateTime<Utc>) -> Result<()> {
    let year = u16::try_from(time.year())
        .map_err(|_| ImfError::encoding(format!("year {} out of range", time.year())))?;

    out.write_u16::<BigEndian>(year)?;
    out.write_u16::<BigEndian>(time.ordinal() as u16)?;
    out.push(time.hour() as u8);
    out.push(time.minute() as u8);
    out.push(time.second() as u8);
    out.push(0);
    out.write_u16::<BigEndian>((time.nanosecond() / 100_000) as u16)?;
    Ok(())
}

/// Writes each channel to its own day file in the archive
#[derive(Debug, Clone)]
pub struct MiniSeedSink {
    layout: ArchiveLayout,
    encoder: MiniSeedEncoder,
}

impl MiniSeedSink {
    pub fn new(layout: ArchiveLayout, record_length: usize) -> Result<Self> {
        let encoder = MiniSeedEncoder::new(layout.network(), record_length)?;
        Ok(Self { layout, encoder })
    }
}

impl SeriesSink for MiniSeedSink {
    fn write_series(&mut self, series: &ChannelSeries) -> Result<Option<PathBuf>> {
        if series.sample_count() == 0 {
            debug!(
                "Skipping empty {} series for {}",
                series.label(),
                series.station_code()
            );
            return Ok(None);
        }

        // Nothing touches the archive until the records are fully encoded
        let path = self.layout.mseed_path(series)?;
        let bytes = self.encoder.encode(series)?;

        ensure_parent_dir(&path)?;
        if let Err(e) = write_bytes(&path, &bytes) {
            discard_partial(&path);
            return Err(e);
        }

        debug!(
            "Wrote {} records to {}",
            bytes.len() / self.encoder.record_length(),
            path.display()
        );
        Ok(Some(path))
    }
}

fn write_bytes(path: &Path, bytes: &[u8]) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    writer.write_all(bytes)?;
    writer.flush()?;
    Ok(())
}
