//! `ax-access` — proximity accessibility scoring.
//!
//! For a set of query points inside an area of interest and one or more
//! groups of amenity tags, computes the network distance to the `k` nearest
//! POIs of each group and the number of POIs within a search radius, merged
//! into one table keyed by snapped network node.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                   |
//! |----------------|------------------------------------------------------------|
//! | [`calculator`] | `ProximityAccessibilityCalculator`, `Registration`         |
//! | [`config`]     | `AccessConfig` (`k`, search radius)                        |
//! | [`table`]      | `SnappedPoints`, `CategoryColumns`, `AccessibilityTable`   |
//! | [`report`]     | `AccessibilityReport`, warnings, per-group failures        |
//! | [`error`]      | `AccessError`, `AccessResult<T>`                           |
//!
//! # Example
//!
//! ```rust,ignore
//! let calc = ProximityAccessibilityCalculator::new(network, aoi, AccessConfig::new(3, 2_000.0)?)?;
//! let session = ProviderSession::anonymous("csv");
//! let report = calc.analyse(&source, &session, &points, &[vec!["hospital", "clinic"]])?;
//! for name in report.table.column_names() {
//!     println!("{name}");
//! }
//! ```

pub mod calculator;
pub mod config;
pub mod error;
pub mod report;
pub mod table;


pub use calculator::{ProximityAccessibilityCalculator, Registration};
pub use config::AccessConfig;
pub use error::{AccessError, AccessResult};
pub use report::{AccessWarning, AccessibilityReport, CategoryFailure};
pub use table::{AccessibilityTable, CategoryColumns, Column, ColumnData, SnappedPoints};
