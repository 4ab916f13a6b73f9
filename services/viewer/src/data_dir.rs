//! Directory-backed raster loader.
//!
//! Snapshots live under the data root as `YYYY/MM/DD/HHZ.json`, one file
//! per hour. Values are stored in millimeters and converted to inches at
//! load time; negative cells are masked.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::Deserialize;
use tracing::debug;
use walkdir::WalkDir;

use raster_common::{Axis, Raster, ViewError, ViewResult};
use viewer_core::{hour_label, RasterLoader, RawField, TimeEntry, TimeSelection};

const MM_PER_INCH: f64 = 25.4;

/// On-disk snapshot layout.
#[derive(Debug, Deserialize)]
struct SnapshotFile {
    /// Row-major values in millimeters, one inner list per grid row.
    values_mm: Vec<Vec<f64>>,
    /// X coordinates, one per column.
    x: Vec<f64>,
    /// Y coordinates, one per row.
    y: Vec<f64>,
}

/// Loads hourly precipitation snapshots from a directory tree.
pub struct DirectoryLoader {
    root: PathBuf,
}

impl DirectoryLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path_for(&self, time: &DateTime<Utc>) -> PathBuf {
        self.root.join(time.format("%Y/%m/%d/%HZ.json").to_string())
    }

    /// Parse the valid time from a snapshot path's trailing components
    /// (`YYYY/MM/DD/HHZ.json`). Returns `None` for paths that do not
    /// match the layout.
    fn time_from_path(&self, path: &Path) -> Option<DateTime<Utc>> {
        let parts: Vec<&str> = path.iter().rev().take(4).filter_map(|p| p.to_str()).collect();
        if parts.len() != 4 {
            return None;
        }
        let (file, day, month, year) = (parts[0], parts[1], parts[2], parts[3]);

        let hour: u32 = file.strip_suffix("Z.json")?.parse().ok()?;
        let date = NaiveDate::from_ymd_opt(
            year.parse().ok()?,
            month.parse().ok()?,
            day.parse().ok()?,
        )?;
        let naive = date.and_hms_opt(hour, 0, 0)?;
        Some(Utc.from_utc_datetime(&naive))
    }

    /// All parsable snapshots under the root, ascending by time.
    ///
    /// Files that do not match the layout are skipped, not fatal.
    fn scan_times(&self) -> Vec<(DateTime<Utc>, PathBuf)> {
        let mut found = Vec::new();
        for entry in WalkDir::new(&self.root).into_iter().filter_map(Result::ok) {
            if !entry.file_type().is_file() {
                continue;
            }
            match self.time_from_path(entry.path()) {
                Some(time) => found.push((time, entry.path().to_path_buf())),
                None => {
                    debug!(
                        path = %entry.path().display(),
                        "file does not match the snapshot layout"
                    );
                }
            }
        }
        found.sort_by_key(|(time, _)| *time);
        found
    }

    async fn read_snapshot(
        &self,
        path: &Path,
        valid_time: DateTime<Utc>,
    ) -> ViewResult<RawField> {
        let contents = match tokio::fs::read_to_string(path).await {
            Ok(contents) => contents,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Err(ViewError::NotFound(hour_label(&valid_time)));
            }
            Err(err) => return Err(err.into()),
        };
        let snapshot: SnapshotFile = serde_json::from_str(&contents)?;

        let height = snapshot.values_mm.len();
        let width = snapshot.values_mm.first().map(Vec::len).unwrap_or(0);

        let mut values = Vec::with_capacity(width * height);
        for row in &snapshot.values_mm {
            if row.len() != width {
                return Err(ViewError::FormatError(format!(
                    "ragged raster rows: expected {} values, found {}",
                    width,
                    row.len()
                )));
            }
            for &mm in row {
                let inches = mm / MM_PER_INCH;
                values.push(if inches < 0.0 { f32::NAN } else { inches as f32 });
            }
        }

        Ok(RawField {
            raster: Raster::new(values, width, height)?,
            x_axis: Axis::new(snapshot.x)?,
            y_axis: Axis::new(snapshot.y)?,
            valid_time,
        })
    }
}

#[async_trait]
impl RasterLoader for DirectoryLoader {
    async fn load(&self, selection: TimeSelection) -> ViewResult<RawField> {
        let (valid_time, path) = match selection {
            TimeSelection::At(time) => (time, self.path_for(&time)),
            TimeSelection::Latest => self
                .scan_times()
                .pop()
                .ok_or_else(|| ViewError::NotFound("latest".to_string()))?,
        };
        self.read_snapshot(&path, valid_time).await
    }

    async fn available_times(&self) -> ViewResult<Vec<TimeEntry>> {
        Ok(self
            .scan_times()
            .into_iter()
            .map(|(time, _)| TimeEntry {
                label: hour_label(&time),
                time,
            })
            .collect())
    }
}
