//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `accessibility.csv`
//! - `amenities.csv`
//!
//! Null distances are written as empty fields.

use std::fs::File;
use std::path::{Path, PathBuf};

use csv::{Writer, WriterBuilder};

use ax_access::AccessibilityTable;
use ax_poi::PoiRecord;

use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// Writes a report to two CSV files.
pub struct CsvWriter {
    dir:       PathBuf,
    amenities: Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Create `amenities.csv` in `dir` and write its header row.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut amenities = WriterBuilder::new()
            .has_headers(false)
            .from_path(dir.join("amenities.csv"))?;
        amenities.write_record(PoiRecord::COLUMNS)?;

        Ok(Self {
            dir: dir.to_path_buf(),
            amenities,
            finished: false,
        })
    }
}

impl OutputWriter for CsvWriter {
    fn write_table(&mut self, table: &AccessibilityTable) -> OutputResult<()> {
        if self.finished {
            return Err(OutputError::Finished);
        }
        let mut out = Writer::from_path(self.dir.join("accessibility.csv"))?;
        out.write_record(table.column_names())?;

        let columns = table.columns();
        for row in 0..table.num_rows() {
            out.write_record(columns.iter().map(|c| c.data.cell_text(row)))?;
        }
        out.flush()?;
        Ok(())
    }

    fn write_amenities(&mut self, rows: &[PoiRecord]) -> OutputResult<()> {
        if self.finished {
            return Err(OutputError::Finished);
        }
        for row in rows {
            self.amenities.serialize(row)?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.amenities.flush()?;
        Ok(())
    }
}
