//! Parquet output for analysis tools.
//!
//! A whole observation becomes one wide table with a `time` column and one
//! `i32` column per channel label. Single series are written as two-column
//! tables next to it.

use super::SeriesSink;
use super::archive::{ArchiveLayout, discard_partial, ensure_parent_dir};
use crate::config::CompressionAlgorithm;
use crate::error::{ImfError, Result};
use crate::models::{ChannelSeries, HeaderMetadata, ParsedObservation};
use polars::prelude::{
    Column, DataFrame, DataType, ParquetWriter as PolarsParquetWriter, TimeUnit,
};
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Name of the timestamp column
pub const TIME_COLUMN: &str = "time";

/// Parquet writer for parsed observations
#[derive(Debug, Clone)]
pub struct ParquetSink {
    layout: ArchiveLayout,
    compression: CompressionAlgorithm,
}

impl ParquetSink {
    pub fn new(layout: ArchiveLayout, compression: CompressionAlgorithm) -> Self {
        Self {
            layout,
            compression,
        }
    }

    /// Build the wide table for an observation
    pub fn observation_frame(observation: &ParsedObservation) -> Result<DataFrame> {
        let mut columns = vec![time_column(observation.metadata(), observation.sample_count())?];
        for series in observation {
            columns.push(Column::new(series.label().into(), series.values()));
        }
        Ok(DataFrame::new(columns)?)
    }

    /// Build the two-column table for one series
    pub fn series_frame(series: &ChannelSeries) -> Result<DataFrame> {
        let columns = vec![
            time_column(series.metadata(), series.sample_count())?,
            Column::new(series.label().into(), series.values()),
        ];
        Ok(DataFrame::new(columns)?)
    }

    fn write_frame(&self, mut df: DataFrame, path: &Path) -> Result<()> {
        ensure_parent_dir(path)?;
        let file = File::create(path)?;

        if let Err(e) = PolarsParquetWriter::new(file)
            .with_compression(self.compression.to_polars_compression())
            .finish(&mut df)
        {
            discard_partial(path);
            return Err(ImfError::encoding(format!(
                "failed to write {}: {}",
                path.display(),
                e
            )));
        }

        debug!("Wrote {} rows to {}", df.height(), path.display());
        Ok(())
    }
}

impl SeriesSink for ParquetSink {
    fn write_series(&mut self, series: &ChannelSeries) -> Result<Option<PathBuf>> {
        let path = self
            .layout
            .parquet_path(series.metadata())?
            .with_extension(format!("{}.parquet", series.label()));
        self.write_frame(Self::series_frame(series)?, &path)?;
        Ok(Some(path))
    }

    fn write_observation(&mut self, observation: &ParsedObservation) -> Result<Vec<PathBuf>> {
        let path = self.layout.parquet_path(observation.metadata())?;
        self.write_frame(Self::observation_frame(observation)?, &path)?;
        Ok(vec![path])
    }
}

/// Datetime column with one entry per sample
fn time_column(metadata: &HeaderMetadata, samples: usize) -> Result<Column> {
    let start_ms = metadata.start_time.timestamp_millis();
    let step_ms = i64::from(metadata.sample_interval_seconds) * 1000;
    let times: Vec<i64> = (0..samples as i64).map(|i| start_ms + i * step_ms).collect();

    Ok(Column::new(TIME_COLUMN.into(), times)
        .cast(&DataType::Datetime(TimeUnit::Milliseconds, None))?)
}
