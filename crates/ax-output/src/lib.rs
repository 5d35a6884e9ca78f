//! `ax-output` — tabular result sinks for accessibility reports.
//!
//! Three backends are provided behind Cargo features:
//!
//! | Feature   | Backend     | Files created                                   |
//! |-----------|-------------|-------------------------------------------------|
//! | *(none)*  | CSV         | `accessibility.csv`, `amenities.csv`            |
//! | `sqlite`  | SQLite      | `output.db`                                     |
//! | `parquet` | Parquet     | `accessibility.parquet`, `amenities.parquet`    |
//!
//! All backends implement [`OutputWriter`].  [`write_report`] writes both
//! tables of an `AccessibilityReport` and finishes the writer.
//!
//! # Usage
//!
//! ```rust,ignore
//! use ax_output::{CsvWriter, write_report};
//!
//! let mut writer = CsvWriter::new(Path::new("./output"))?;
//! write_report(&mut writer, &report)?;
//! ```

pub mod csv;
pub mod error;
pub mod writer;

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(feature = "parquet")]
pub mod parquet;


pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use writer::{OutputWriter, write_report};

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteWriter;

#[cfg(feature = "parquet")]
pub use parquet::ParquetWriter;
