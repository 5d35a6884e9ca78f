//! Immutable network + POI category snapshots.
//!
//! Registering a category never mutates a network that someone else may be
//! querying: [`CategorizedNetwork::with_pois`] returns a new snapshot that
//! shares the street graph and every other category with its parent.  Two
//! callers can therefore register categories against the same base network
//! in any order without seeing each other's sets.

use std::collections::BTreeMap;
use std::sync::Arc;

use ax_core::{CategoryKey, NodeId};

use crate::provider::{Nearest, NodeMap, SpatialNetwork};
use crate::{PoiSet, SpatialError, SpatialResult};

/// A street network together with the POI categories registered on it.
pub struct CategorizedNetwork<N> {
    network:    Arc<N>,
    categories: Arc<BTreeMap<CategoryKey, Arc<PoiSet>>>,
}

impl<N> Clone for CategorizedNetwork<N> {
    fn clone(&self) -> Self {
        Self {
            network:    Arc::clone(&self.network),
            categories: Arc::clone(&self.categories),
        }
    }
}

impl<N: SpatialNetwork> CategorizedNetwork<N> {
    /// Wrap a network with no categories registered.
    pub fn new(network: N) -> Self {
        Self::from_shared(Arc::new(network))
    }

    /// Wrap an already shared network.
    pub fn from_shared(network: Arc<N>) -> Self {
        Self { network, categories: Arc::new(BTreeMap::new()) }
    }

    pub fn network(&self) -> &N {
        &self.network
    }

    /// Snapshot with `pois` registered under `key`.
    ///
    /// An existing set under the same key is replaced, so registering the
    /// same POIs twice is the same as registering them once.
    pub fn with_pois(&self, key: CategoryKey, pois: PoiSet) -> Self {
        let mut categories = (*self.categories).clone();
        log::debug!("registering {} POIs under {key}", pois.len());
        categories.insert(key, Arc::new(pois));
        Self {
            network:    Arc::clone(&self.network),
            categories: Arc::new(categories),
        }
    }

    /// The POI set registered under `key`.
    pub fn pois(&self, key: &CategoryKey) -> SpatialResult<&PoiSet> {
        self.categories
            .get(key)
            .map(|set| set.as_ref())
            .ok_or_else(|| SpatialError::UnknownCategory(key.clone()))
    }

    /// [`SpatialNetwork::nearest_k`] against a registered category.
    pub fn nearest_k(
        &self,
        sources: &[NodeId],
        key: &CategoryKey,
        k: usize,
        max_distance_m: f64,
    ) -> SpatialResult<NodeMap<Vec<Nearest>>> {
        let pois = self.pois(key)?;
        self.network.nearest_k(sources, pois, k, max_distance_m)
    }

    /// [`SpatialNetwork::count_within`] against a registered category.
    pub fn count_within(
        &self,
        sources: &[NodeId],
        key: &CategoryKey,
        max_distance_m: f64,
    ) -> SpatialResult<NodeMap<u32>> {
        let pois = self.pois(key)?;
        self.network.count_within(sources, pois, max_distance_m)
    }
}
