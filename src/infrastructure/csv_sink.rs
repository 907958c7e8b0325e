//! Append-only CSV output
//!
//! One row per court, flushed immediately so an interrupted run keeps what
//! it already wrote. The header row is written only when the file did not
//! exist before the first append.

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

use crate::domain::Court;

#[derive(Error, Debug)]
pub enum SinkError {
    #[error("Cannot open {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("CSV write failed: {0}")]
    Csv(#[from] csv::Error),
}

pub type SinkResult<T> = Result<T, SinkError>;

pub struct CsvSink {
    path: PathBuf,
    writer: Option<csv::Writer<File>>,
    rows_written: usize,
}

impl CsvSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            writer: None,
            rows_written: 0,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Rows appended through this sink, header excluded
    pub fn rows_written(&self) -> usize {
        self.rows_written
    }

    /// Append one normalized row for `court`
    pub fn append(&mut self, court: &Court) -> SinkResult<()> {
        let writer = self.writer()?;
        writer.write_record(court.csv_row())?;
        writer.flush().map_err(csv::Error::from)?;
        self.rows_written += 1;
        Ok(())
    }

    fn writer(&mut self) -> SinkResult<&mut csv::Writer<File>> {
        let writer = match self.writer.take() {
            Some(writer) => writer,
            None => self.open()?,
        };
        Ok(self.writer.insert(writer))
    }

    fn open(&self) -> SinkResult<csv::Writer<File>> {
        let io_error = |source| SinkError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_error)?;
        }

        let is_new = !self.path.exists();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(io_error)?;

        let mut writer = csv::Writer::from_writer(file);
        if is_new {
            writer.write_record(Court::CSV_HEADERS)?;
            writer.flush().map_err(csv::Error::from)?;
            info!("Created {} with header row", self.path.display());
        } else {
            debug!("Appending to existing {}", self.path.display());
        }

        Ok(writer)
    }
}
