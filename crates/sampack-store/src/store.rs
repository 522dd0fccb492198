//! The sample store and its secondary indexes.
//!
//! [`SampleStore`] keeps a `BTreeMap<String, Content>` keyed by
//! [`Content::id`]; that map is both the identity index and the id index.
//! The content, angle and frozen indexes map their derived key to the ids of
//! the samples sharing it, in insertion order.

use std::collections::btree_map::{self, BTreeMap};
use std::ops::RangeInclusive;

use sampack_types::{Angle, Content};
use tracing::debug;

/// A set of samples viewed through several orderings at once.
#[derive(Clone, Default)]
pub struct SampleStore {
    /// Owning map, ordered by id.
    samples: BTreeMap<String, Content>,
    /// Content hash -> ids.
    by_hash: BTreeMap<u64, Vec<String>>,
    /// Angle -> ids.
    by_angle: BTreeMap<Angle, Vec<String>>,
    /// Frozen id -> ids.
    by_frozen: BTreeMap<u64, Vec<String>>,
}

impl std::fmt::Debug for SampleStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SampleStore")
            .field("samples", &self.samples.len())
            .field("hashes", &self.by_hash.len())
            .field("angles", &self.by_angle.len())
            .field("frozen_groups", &self.by_frozen.len())
            .finish()
    }
}

impl SampleStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Returns `true` if the store holds no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Look up a sample by its id.
    pub fn get(&self, id: &str) -> Option<&Content> {
        self.samples.get(id)
    }

    /// Returns `true` if an equal sample is already stored.
    pub fn contains(&self, content: &Content) -> bool {
        self.samples.contains_key(&content.id())
    }

    /// Iterate over all samples in identity order (ascending id).
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.samples.values(),
        }
    }

    /// Iterate over all ids in ascending order.
    pub fn ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.samples.keys().map(String::as_str)
    }

    // ---------------------------------------------------------------
    // Mutation
    // ---------------------------------------------------------------

    /// Insert a sample unless an equal one is already present.
    ///
    /// Returns `true` if the sample was added. On success it is visible
    /// through every view.
    pub fn insert(&mut self, content: Content) -> bool {
        let id = content.id();
        if self.samples.contains_key(&id) {
            debug!(%id, "duplicate sample ignored");
            return false;
        }

        self.by_hash
            .entry(content.hash())
            .or_default()
            .push(id.clone());
        self.by_angle
            .entry(content.angle())
            .or_default()
            .push(id.clone());
        self.by_frozen
            .entry(content.frozen_id())
            .or_default()
            .push(id.clone());
        self.samples.insert(id, content);
        true
    }

    /// Remove a sample by id, detaching it from every view.
    pub fn remove(&mut self, id: &str) -> Option<Content> {
        let content = self.samples.remove(id)?;
        detach(&mut self.by_hash, &content.hash(), id);
        detach(&mut self.by_angle, &content.angle(), id);
        detach(&mut self.by_frozen, &content.frozen_id(), id);
        debug!(%id, "sample removed");
        Some(content)
    }

    /// Remove every sample.
    pub fn clear(&mut self) {
        self.samples.clear();
        self.by_hash.clear();
        self.by_angle.clear();
        self.by_frozen.clear();
    }

    // ---------------------------------------------------------------
    // Secondary views
    // ---------------------------------------------------------------

    /// Samples whose content hash equals `hash`.
    pub fn by_hash(&self, hash: u64) -> Vec<&Content> {
        self.resolve(self.by_hash.get(&hash))
    }

    /// Samples with the given angle.
    pub fn by_angle(&self, angle: Angle) -> Vec<&Content> {
        self.resolve(self.by_angle.get(&angle))
    }

    /// Samples whose angle lies in `range`, ascending by angle.
    ///
    /// A reversed range is empty.
    pub fn by_angle_range(&self, range: RangeInclusive<Angle>) -> Vec<&Content> {
        if range.start() > range.end() {
            return Vec::new();
        }
        self.by_angle
            .range(range)
            .flat_map(|(_, ids)| ids.iter())
            .filter_map(|id| self.samples.get(id))
            .collect()
    }

    /// Samples sharing the frozen id `frozen_id`, i.e. the same length.
    pub fn by_frozen_id(&self, frozen_id: u64) -> Vec<&Content> {
        self.resolve(self.by_frozen.get(&frozen_id))
    }

    /// Number of distinct frozen ids (underlying contents).
    pub fn frozen_group_count(&self) -> usize {
        self.by_frozen.len()
    }

    fn resolve(&self, ids: Option<&Vec<String>>) -> Vec<&Content> {
        ids.map(|ids| ids.iter().filter_map(|id| self.samples.get(id)).collect())
            .unwrap_or_default()
    }
}

/// Drop `id` from the group under `key`, removing the group once empty.
fn detach<K: Ord>(index: &mut BTreeMap<K, Vec<String>>, key: &K, id: &str) {
    if let Some(group) = index.get_mut(key) {
        group.retain(|member| member != id);
        if group.is_empty() {
            index.remove(key);
        }
    }
}

/// Identity-order iterator over a [`SampleStore`].
pub struct Iter<'a> {
    inner: btree_map::Values<'a, String, Content>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Content;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl<'a> IntoIterator for &'a SampleStore {
    type Item = &'a Content;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Extend<Content> for SampleStore {
    fn extend<I: IntoIterator<Item = Content>>(&mut self, iter: I) {
        for content in iter {
            self.insert(content);
        }
    }
}

impl FromIterator<Content> for SampleStore {
    fn from_iter<I: IntoIterator<Item = Content>>(iter: I) -> Self {
        let mut store = Self::new();
        store.extend(iter);
        store
    }
}
