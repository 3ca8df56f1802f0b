use crate::error::CrawlError;
use crate::results::{COLUMNS, ProductRecord};
use std::fs;
use std::path::{Path, PathBuf};

/// Destination for the records collected by a crawl
pub trait Sink {
    /// Persist every record, in order
    fn write_all(&mut self, records: &[ProductRecord]) -> Result<(), CrawlError>;

    /// Human-readable location, for the final summary
    fn describe(&self) -> String;
}

/// Writes records to a CSV file with the fixed product columns
#[derive(Debug, Clone)]
pub struct CsvSink {
    path: PathBuf,
}

impl CsvSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Sink for CsvSink {
    fn write_all(&mut self, records: &[ProductRecord]) -> Result<(), CrawlError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        // Header is written by hand so an empty crawl still gets one
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_path(&self.path)?;
        writer.write_record(COLUMNS)?;
        for record in records {
            writer.serialize(record)?;
        }
        writer.flush()?;

        ::log::debug!("Wrote {} rows to {}", records.len(), self.path.display());
        Ok(())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
