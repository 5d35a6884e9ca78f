//! Results of a multi-group analysis.

use std::fmt;

use ax_core::CategoryKey;
use ax_poi::PoiRecord;

use crate::{AccessError, AccessibilityTable};

/// A non-fatal condition met while scoring.
#[derive(Clone, Debug, PartialEq)]
pub enum AccessWarning {
    /// No query point has a POI of this group within range.
    EmptyResult { category: CategoryKey },
    /// POIs that could not be snapped to the network were left out.
    SkippedPois { category: CategoryKey, skipped: usize },
}

impl fmt::Display for AccessWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyResult { category } => {
                write!(f, "{category}: no POIs within range of any query point")
            }
            Self::SkippedPois { category, skipped } => {
                write!(f, "{category}: {skipped} POIs outside the network coverage were skipped")
            }
        }
    }
}

/// A category group that could not be scored.
#[derive(Debug)]
pub struct CategoryFailure {
    pub tags:  Vec<String>,
    pub error: AccessError,
}

/// Everything an analysis produced.
#[derive(Debug)]
pub struct AccessibilityReport {
    /// Query table with one column block per successfully scored group.
    pub table:     AccessibilityTable,
    /// POI records loaded for the scored groups, deduplicated.
    pub amenities: Vec<PoiRecord>,
    pub warnings:  Vec<AccessWarning>,
    pub failures:  Vec<CategoryFailure>,
}

impl AccessibilityReport {
    /// `true` when every requested group was scored.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}
