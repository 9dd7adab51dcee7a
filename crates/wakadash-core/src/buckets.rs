//! Closed-key accumulators
//!
//! A [`BucketSet`] binds every key of a [`BucketKey`] enumeration to zero
//! when it is created. Values only ever grow through [`BucketSet::add`],
//! and iteration always follows the key type's canonical order.

use crate::types::BucketKey;
use serde::{Serialize, Serializer, ser::SerializeMap};
use std::collections::BTreeMap;

/// Accumulated values for a closed set of buckets
///
/// # Examples
/// ```
/// use wakadash_core::buckets::BucketSet;
/// use wakadash_core::types::DayPhase;
///
/// let mut phases = BucketSet::<DayPhase>::new();
/// assert_eq!(phases.get(DayPhase::Night), 0);
///
/// phases.add(DayPhase::Night, 45);
/// phases.add(DayPhase::Night, 15);
/// assert_eq!(phases.get(DayPhase::Night), 60);
/// assert_eq!(phases.total(), 60);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BucketSet<K: BucketKey> {
    values: BTreeMap<K, u64>,
}

impl<K: BucketKey> BucketSet<K> {
    /// Create a set with every key bound to zero
    pub fn new() -> Self {
        Self {
            values: K::ALL.iter().map(|&k| (k, 0)).collect(),
        }
    }

    /// Add `amount` to a bucket
    pub fn add(&mut self, key: K, amount: u64) {
        // every key was inserted by `new`, so this never creates a bucket
        if let Some(value) = self.values.get_mut(&key) {
            *value = value.saturating_add(amount);
        }
    }

    /// Current value of a bucket
    pub fn get(&self, key: K) -> u64 {
        self.values.get(&key).copied().unwrap_or(0)
    }

    /// Sum over all buckets
    pub fn total(&self) -> u64 {
        self.values.values().sum()
    }

    /// Largest bucket value, zero for an all-empty set
    pub fn max(&self) -> u64 {
        self.values.values().copied().max().unwrap_or(0)
    }

    /// Whether every bucket is still zero
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Number of buckets, always `K::ALL.len()`
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Buckets in canonical order
    pub fn iter(&self) -> impl Iterator<Item = (K, u64)> + '_ {
        self.values.iter().map(|(&k, &v)| (k, v))
    }

    /// Each bucket's share of the total, in percent and canonical order
    ///
    /// All shares are zero when the total is zero.
    pub fn percentages(&self) -> Vec<(K, f64)> {
        let total = self.total();
        self.iter()
            .map(|(k, v)| (k, percentage(v, total)))
            .collect()
    }
}

impl<K: BucketKey> Default for BucketSet<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: BucketKey> Serialize for BucketSet<K> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (key, value) in self.iter() {
            map.serialize_entry(key.label(), &value)?;
        }
        map.end()
    }
}

/// `part` as a percentage of `whole`, defined as zero when `whole` is zero
pub fn percentage(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}
