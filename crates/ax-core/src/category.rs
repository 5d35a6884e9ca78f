//! Composite POI category keys and the column names derived from them.
//!
//! A category groups one or more OSM `amenity` tags so they can be queried as
//! a single POI set.  Tag order is preserved (it appears in column names);
//! repeated tags are dropped.

use std::fmt;

use crate::{CoreError, CoreResult};

/// Ordered, de-duplicated list of amenity tags addressed as one category.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CategoryKey {
    tags: Vec<String>,
}

impl CategoryKey {
    /// Build a key from amenity tags.
    ///
    /// Tags are trimmed.  An empty list, a blank tag, or a tag containing a
    /// double quote (which would break upstream tag filters) is rejected.
    pub fn new<I, S>(tags: I) -> CoreResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut out: Vec<String> = Vec::new();
        for tag in tags {
            let tag = tag.as_ref().trim();
            if tag.is_empty() {
                return Err(CoreError::InvalidCategory("blank amenity tag".into()));
            }
            if tag.contains('"') {
                return Err(CoreError::InvalidCategory(format!("amenity tag {tag:?} contains a quote")));
            }
            if !out.iter().any(|t| t == tag) {
                out.push(tag.to_owned());
            }
        }
        if out.is_empty() {
            return Err(CoreError::InvalidCategory("no amenity tags given".into()));
        }
        Ok(Self { tags: out })
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Tags joined with `_`, e.g. `hospital_clinic`.
    pub fn label(&self) -> String {
        self.tags.join("_")
    }

    /// Name the POI set is registered under on the network, e.g.
    /// `all_hospital_clinic`.
    pub fn registry_name(&self) -> String {
        format!("all_{}", self.label())
    }

    /// Column holding the `rank`-th nearest distance (1-based).
    pub fn nearest_column(&self, rank: usize) -> String {
        format!("nearest_{}_{rank}", self.label())
    }

    /// Column holding the POI count within `max_distance_m`.
    pub fn count_column(&self, max_distance_m: f64) -> String {
        format!("count_{}_within_{}km", self.label(), format_km(max_distance_m))
    }
}

impl fmt::Display for CategoryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.registry_name())
    }
}

/// Metres → kilometres, always printed with at least one decimal
/// (`2000 -> "2.0"`, `500 -> "0.5"`, `1250 -> "1.25"`).
pub fn format_km(metres: f64) -> String {
    let km = metres / 1000.0;
    if km.fract() == 0.0 {
        format!("{km:.1}")
    } else {
        format!("{km}")
    }
}
