//! The `OutputWriter` trait implemented by all backend writers.

use ax_access::{AccessibilityReport, AccessibilityTable};
use ax_poi::PoiRecord;

use crate::OutputResult;

/// Trait implemented by CSV, SQLite, and Parquet writers.
pub trait OutputWriter {
    /// Write the merged accessibility table.  Its column set is only known
    /// here, so each call replaces any table written before.
    fn write_table(&mut self, table: &AccessibilityTable) -> OutputResult<()>;

    /// Append amenity records.
    fn write_amenities(&mut self, rows: &[PoiRecord]) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent: safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}

/// Write both tables of `report` and finish the writer.
pub fn write_report<W: OutputWriter + ?Sized>(writer: &mut W, report: &AccessibilityReport) -> OutputResult<()> {
    writer.write_table(&report.table)?;
    writer.write_amenities(&report.amenities)?;
    writer.finish()?;
    log::info!(
        "wrote {} query rows and {} amenity records",
        report.table.num_rows(),
        report.amenities.len()
    );
    Ok(())
}
