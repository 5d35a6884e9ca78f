//! The merged query table handed to output sinks.
//!
//! Stored column-wise: one entry per input query point in every column, in
//! input order.  Query points that snapped to the same node carry identical
//! category values.

use ax_core::{CategoryKey, NodeId, QueryPoint};

/// Query points with the node each one snapped to.
#[derive(Clone, Debug, PartialEq)]
pub struct SnappedPoints {
    pub points: Vec<QueryPoint>,
    pub nodes:  Vec<NodeId>,
}

impl SnappedPoints {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Distinct snapped nodes, ascending.
    pub fn unique_nodes(&self) -> Vec<NodeId> {
        let mut nodes = self.nodes.clone();
        nodes.sort_unstable();
        nodes.dedup();
        nodes
    }
}

/// Scores of one category group, one entry per query row.
#[derive(Clone, Debug, PartialEq)]
pub struct CategoryColumns {
    pub key:            CategoryKey,
    pub max_distance_m: f64,
    /// `nearest[row]` has exactly `k` entries, ascending, `None`-padded.
    pub nearest:        Vec<Vec<Option<f64>>>,
    pub counts:         Vec<u32>,
}

impl CategoryColumns {
    /// `k` as reported by this group.
    pub fn num_pois(&self) -> usize {
        self.nearest.first().map_or(0, Vec::len)
    }

    /// `true` when no row has a POI within range.
    pub fn is_empty_result(&self) -> bool {
        self.counts.iter().all(|&c| c == 0)
            && self.nearest.iter().flatten().all(Option::is_none)
    }

    pub fn column_names(&self) -> Vec<String> {
        let mut names: Vec<String> =
            (1..=self.num_pois()).map(|rank| self.key.nearest_column(rank)).collect();
        names.push(self.key.count_column(self.max_distance_m));
        names
    }
}

/// Values of one output column.
#[derive(Clone, Debug, PartialEq)]
pub enum ColumnData {
    /// Nullable float column (coordinates, distances in metres).
    Float(Vec<Option<f64>>),
    /// Non-null unsigned integer column (node ids, counts).
    UInt(Vec<u32>),
}

impl ColumnData {
    pub fn len(&self) -> usize {
        match self {
            Self::Float(v) => v.len(),
            Self::UInt(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Text form of one cell; nulls render as an empty string.
    pub fn cell_text(&self, row: usize) -> String {
        match self {
            Self::Float(v) => v[row].map(|x| x.to_string()).unwrap_or_default(),
            Self::UInt(v) => v[row].to_string(),
        }
    }
}

/// One named output column.
#[derive(Clone, Debug, PartialEq)]
pub struct Column {
    pub name: String,
    pub data: ColumnData,
}

/// The query table with every scored category group outer-joined onto it.
#[derive(Clone, Debug, PartialEq)]
pub struct AccessibilityTable {
    pub points: Vec<QueryPoint>,
    pub nodes:  Vec<NodeId>,
    pub groups: Vec<CategoryColumns>,
}

impl AccessibilityTable {
    pub const LONGITUDE: &'static str = "longitude";
    pub const LATITUDE: &'static str = "latitude";
    pub const NODE_ID: &'static str = "node_id";

    /// A table with the query columns only.
    pub fn new(snapped: SnappedPoints) -> Self {
        Self { points: snapped.points, nodes: snapped.nodes, groups: Vec::new() }
    }

    pub fn num_rows(&self) -> usize {
        self.points.len()
    }

    pub fn push_group(&mut self, group: CategoryColumns) {
        debug_assert_eq!(group.counts.len(), self.num_rows());
        self.groups.push(group);
    }

    pub fn column_names(&self) -> Vec<String> {
        let mut names = vec![Self::LONGITUDE.to_owned(), Self::LATITUDE.to_owned(), Self::NODE_ID.to_owned()];
        for group in &self.groups {
            names.extend(group.column_names());
        }
        names
    }

    /// Every column in output order.
    pub fn columns(&self) -> Vec<Column> {
        let mut out = vec![
            Column {
                name: Self::LONGITUDE.to_owned(),
                data: ColumnData::Float(self.points.iter().map(|p| Some(p.lon)).collect()),
            },
            Column {
                name: Self::LATITUDE.to_owned(),
                data: ColumnData::Float(self.points.iter().map(|p| Some(p.lat)).collect()),
            },
            Column {
                name: Self::NODE_ID.to_owned(),
                data: ColumnData::UInt(self.nodes.iter().map(|n| n.0).collect()),
            },
        ];
        for group in &self.groups {
            for rank in 1..=group.num_pois() {
                out.push(Column {
                    name: group.key.nearest_column(rank),
                    data: ColumnData::Float(group.nearest.iter().map(|row| row[rank - 1]).collect()),
                });
            }
            out.push(Column {
                name: group.key.count_column(group.max_distance_m),
                data: ColumnData::UInt(group.counts.clone()),
            });
        }
        out
    }
}
