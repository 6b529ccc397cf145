//! Value-ordered container with dual index/key addressing.
//!
//! A [`Standing`] stores `(key, value)` pairs sorted by value, highest first.
//! Equal values are ordered by descending key so that every key owns a
//! distinct rank ("ordinal ranking"). Sorting is lazy: a [`SortPolicy`] decides whether the
//! container re-sorts after a write, before a read, both, or never.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::hash::Hash;
use std::ops::Range;

use tracing::trace;

use crate::error::StandingError;

/// Requirements on a standing key: hashable identity with a total order used
/// to break value ties. The greater key ranks first among equal values.
pub trait StandingKey: Clone + Eq + Hash + Ord + fmt::Debug {}

impl<T: Clone + Eq + Hash + Ord + fmt::Debug> StandingKey for T {}

/// Default value assigned to keys added without one
pub const DEFAULT_VALUE: f64 = 0.0;

/// Default lower bound for values
pub const DEFAULT_LOWER: f64 = i32::MIN as f64;

/// Default upper bound for values
pub const DEFAULT_UPPER: f64 = i32::MAX as f64;

/// Default gap used by [`Standing::insert_at`] at the boundaries
pub const DEFAULT_STEP: f64 = 1.0;

/// When an unsorted standing restores its order.
///
/// Use `Get` for write-heavy code, `Set` for read-heavy code and `Never` only
/// when the order does not matter until an explicit
/// [`Standing::force_resort`]. While `Never` is active, index-based reads and
/// iteration order are unspecified after a write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortPolicy {
    /// Re-sort before order-dependent reads
    Get,
    /// Re-sort after every write
    #[default]
    Set,
    /// Re-sort at every opportunity
    Always,
    /// Never re-sort automatically
    Never,
}

impl SortPolicy {
    fn sorts_on_read(self) -> bool {
        matches!(self, SortPolicy::Get | SortPolicy::Always)
    }

    fn sorts_on_write(self) -> bool {
        matches!(self, SortPolicy::Set | SortPolicy::Always)
    }
}

/// Rank-ordered key/value container.
///
/// For every stored pair `(key, index)`:
/// `index_of(key) == index` and `get_by_index(index) == key`.
///
/// Values are clamped to `[lower, upper]` when they enter the standing.
/// Keys appear at most once.
///
/// Reads take `&self` and may re-sort in place, so a `Standing` is not `Sync`.
/// Share it across threads behind a lock.
#[derive(Debug, Clone)]
pub struct Standing<K> {
    /// `(key, value)` pairs, sorted descending by value unless `dirty`
    ranks: RefCell<Vec<(K, f64)>>,
    dirty: Cell<bool>,
    default: f64,
    lower: f64,
    upper: f64,
    step: f64,
    policy: SortPolicy,
    maintain: bool,
}

impl<K: StandingKey> Default for Standing<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: StandingKey> Standing<K> {
    pub fn new() -> Self {
        Self {
            ranks: RefCell::new(Vec::new()),
            dirty: Cell::new(false),
            default: DEFAULT_VALUE,
            lower: DEFAULT_LOWER,
            upper: DEFAULT_UPPER,
            step: DEFAULT_STEP,
            policy: SortPolicy::default(),
            maintain: true,
        }
    }

    /// Set the value given to keys added without one
    pub fn with_default(mut self, default: f64) -> Self {
        self.default = default;
        self
    }

    /// Set the value interval. Bounds given in the wrong order are swapped.
    pub fn with_bounds(mut self, lower: f64, upper: f64) -> Self {
        self.lower = lower.min(upper);
        self.upper = upper.max(lower);
        self
    }

    /// Set the gap used when inserting at the top or bottom
    pub fn with_step(mut self, step: f64) -> Self {
        self.step = step;
        self
    }

    pub fn with_policy(mut self, policy: SortPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn default_value(&self) -> f64 {
        self.default
    }

    pub fn bounds(&self) -> (f64, f64) {
        (self.lower, self.upper)
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn policy(&self) -> SortPolicy {
        self.policy
    }

    /// Whether automatic sorting is enabled at all
    pub fn is_maintained(&self) -> bool {
        self.maintain
    }

    /// Whether the stored order currently reflects the values
    pub fn is_sorted(&self) -> bool {
        !self.dirty.get()
    }

    pub fn len(&self) -> usize {
        self.ranks.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranks.borrow().is_empty()
    }

    pub fn contains(&self, key: &K) -> bool {
        self.ranks.borrow().iter().any(|(k, _)| k == key)
    }

    // --- sorting --- //

    /// Sort now, whatever the policy.
    pub fn force_resort(&self) {
        if !self.dirty.get() {
            return;
        }
        let mut ranks = self.ranks.borrow_mut();
        ranks.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| b.0.cmp(&a.0)));
        self.dirty.set(false);
        trace!(len = ranks.len(), "standing re-sorted");
    }

    /// Change the sorting controls. `None` keeps the current setting.
    ///
    /// `sorting = Some(false)` disables every automatic sort regardless of the
    /// policy.
    pub fn set_sorting(&mut self, sorting: Option<bool>, policy: Option<SortPolicy>) {
        if let Some(sorting) = sorting {
            self.maintain = sorting;
        }
        if let Some(policy) = policy {
            self.policy = policy;
        }
        self.after_write();
    }

    fn before_read(&self) {
        if self.maintain && self.policy.sorts_on_read() {
            self.force_resort();
        }
    }

    fn after_write(&self) {
        if self.maintain && self.policy.sorts_on_write() {
            self.force_resort();
        }
    }

    /// Sort ahead of a write whose effect depends on the current order.
    fn before_ordered_write(&self) {
        if self.maintain && self.policy != SortPolicy::Never {
            self.force_resort();
        }
    }

    // --- internal helpers --- //

    fn clamp(&self, value: f64) -> Result<f64, StandingError> {
        if value.is_nan() {
            return Err(StandingError::InvalidValue(value));
        }
        Ok(value.clamp(self.lower, self.upper))
    }

    fn position(&self, key: &K) -> Option<usize> {
        self.ranks.borrow().iter().position(|(k, _)| k == key)
    }

    fn lookup(&self, key: &K) -> Option<f64> {
        self.ranks
            .borrow()
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| *v)
    }

    fn out_of_range(&self, index: usize) -> StandingError {
        StandingError::IndexOutOfRange {
            index,
            len: self.len(),
        }
    }

    /// An empty standing sharing this one's configuration
    fn empty_like(&self) -> Self {
        Self {
            ranks: RefCell::new(Vec::new()),
            dirty: Cell::new(false),
            default: self.default,
            lower: self.lower,
            upper: self.upper,
            step: self.step,
            policy: self.policy,
            maintain: self.maintain,
        }
    }

    // --- writes --- //

    /// Add keys with their paired values.
    ///
    /// Keys beyond the end of `values` receive the default value. Fails with
    /// [`StandingError::KeyConflict`] if any key is already present (or is
    /// repeated in `keys`); in that case nothing is added.
    pub fn add<I>(&mut self, keys: I, values: &[f64]) -> Result<(), StandingError>
    where
        I: IntoIterator<Item = K>,
    {
        let keys: Vec<K> = keys.into_iter().collect();

        let mut seen = HashSet::with_capacity(keys.len());
        for key in &keys {
            if self.contains(key) || !seen.insert(key) {
                return Err(StandingError::KeyConflict(format!("{key:?}")));
            }
        }

        let mut entries = Vec::with_capacity(keys.len());
        for (i, key) in keys.into_iter().enumerate() {
            let value = match values.get(i) {
                Some(&value) => self.clamp(value)?,
                None => self.default,
            };
            entries.push((key, value));
        }

        if !entries.is_empty() {
            self.ranks.get_mut().extend(entries);
            self.dirty.set(true);
        }
        self.after_write();
        Ok(())
    }

    /// Dict-like assignment: update the value of `key`, adding it if absent.
    pub fn set_value(&mut self, key: K, value: f64) -> Result<(), StandingError> {
        let value = self.clamp(value)?;
        let ranks = self.ranks.get_mut();
        match ranks.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => ranks.push((key, value)),
        }
        self.dirty.set(true);
        self.after_write();
        Ok(())
    }

    /// List-like insertion: give `key` a value that ranks it at `index`.
    ///
    /// The value is the midpoint of its future neighbours, or one step above
    /// the top / below the bottom at the boundaries. If the neighbours share a
    /// value, the key tie-break decides the final position.
    pub fn insert_at(&mut self, index: usize, key: K) -> Result<(), StandingError> {
        if self.contains(&key) {
            return Err(StandingError::KeyConflict(format!("{key:?}")));
        }
        self.before_ordered_write();

        let len = self.len();
        if index > len {
            return Err(self.out_of_range(index));
        }

        let value = {
            let ranks = self.ranks.get_mut();
            if len == 0 {
                self.default
            } else if index == 0 {
                (ranks[0].1 + self.step).min(self.upper)
            } else if index == len {
                (ranks[len - 1].1 - self.step).max(self.lower)
            } else {
                (ranks[index - 1].1 + ranks[index].1) / 2.0
            }
        };

        self.ranks.get_mut().push((key, value));
        self.dirty.set(true);
        self.after_write();
        Ok(())
    }

    /// Dict-like delete.
    pub fn remove_key(&mut self, key: &K) -> Result<(), StandingError> {
        let index = self
            .position(key)
            .ok_or_else(|| StandingError::UnknownKey(format!("{key:?}")))?;
        self.ranks.get_mut().remove(index);
        self.after_write();
        Ok(())
    }

    /// Delete several keys. Fails without deleting anything if one is unknown.
    pub fn remove_keys(&mut self, keys: &[K]) -> Result<(), StandingError> {
        if let Some(missing) = keys.iter().find(|k| !self.contains(k)) {
            return Err(StandingError::UnknownKey(format!("{missing:?}")));
        }
        self.ranks.get_mut().retain(|(k, _)| !keys.contains(k));
        self.after_write();
        Ok(())
    }

    /// List-like delete.
    pub fn remove_index(&mut self, index: usize) -> Result<(), StandingError> {
        self.pop_index(index).map(|_| ())
    }

    /// Delete `key` and return the index it held.
    pub fn pop_key(&mut self, key: &K) -> Result<usize, StandingError> {
        self.before_ordered_write();
        let index = self
            .position(key)
            .ok_or_else(|| StandingError::UnknownKey(format!("{key:?}")))?;
        self.ranks.get_mut().remove(index);
        self.after_write();
        Ok(index)
    }

    /// Delete several keys and return the indices they held, in input order.
    pub fn pop_keys(&mut self, keys: &[K]) -> Result<Vec<usize>, StandingError> {
        self.before_ordered_write();
        let indices = keys
            .iter()
            .map(|key| {
                self.position(key)
                    .ok_or_else(|| StandingError::UnknownKey(format!("{key:?}")))
            })
            .collect::<Result<Vec<_>, _>>()?;
        self.ranks.get_mut().retain(|(k, _)| !keys.contains(k));
        self.after_write();
        Ok(indices)
    }

    /// Delete the entry at `index` and return its key.
    pub fn pop_index(&mut self, index: usize) -> Result<K, StandingError> {
        self.before_ordered_write();
        if index >= self.len() {
            return Err(self.out_of_range(index));
        }
        let (key, _) = self.ranks.get_mut().remove(index);
        self.after_write();
        Ok(key)
    }

    /// Delete a contiguous block of ranks and return its keys.
    pub fn pop_range(&mut self, range: Range<usize>) -> Result<Vec<K>, StandingError> {
        self.before_ordered_write();
        let len = self.len();
        if range.start > range.end || range.end > len {
            return Err(self.out_of_range(range.end));
        }
        let keys = self
            .ranks
            .get_mut()
            .drain(range)
            .map(|(k, _)| k)
            .collect();
        self.after_write();
        Ok(keys)
    }

    // --- reads --- //

    /// Key ranked at `index`
    pub fn get_by_index(&self, index: usize) -> Result<K, StandingError> {
        self.before_read();
        let ranks = self.ranks.borrow();
        ranks
            .get(index)
            .map(|(k, _)| k.clone())
            .ok_or(StandingError::IndexOutOfRange {
                index,
                len: ranks.len(),
            })
    }

    /// Keys ranked at each of `indices`
    pub fn get_by_indices(&self, indices: &[usize]) -> Result<Vec<K>, StandingError> {
        indices.iter().map(|&i| self.get_by_index(i)).collect()
    }

    /// Rank of `key`
    pub fn index_of(&self, key: &K) -> Result<usize, StandingError> {
        self.before_read();
        self.position(key)
            .ok_or_else(|| StandingError::UnknownKey(format!("{key:?}")))
    }

    /// Ranks of each of `keys`
    pub fn indices_of(&self, keys: &[K]) -> Result<Vec<usize>, StandingError> {
        keys.iter().map(|k| self.index_of(k)).collect()
    }

    pub fn value_of(&self, key: &K) -> Result<f64, StandingError> {
        self.lookup(key)
            .ok_or_else(|| StandingError::UnknownKey(format!("{key:?}")))
    }

    pub fn value_at(&self, index: usize) -> Result<f64, StandingError> {
        self.before_read();
        let ranks = self.ranks.borrow();
        ranks
            .get(index)
            .map(|(_, v)| *v)
            .ok_or(StandingError::IndexOutOfRange {
                index,
                len: ranks.len(),
            })
    }

    /// Keys in rank order
    pub fn keys(&self) -> Vec<K> {
        self.before_read();
        self.ranks.borrow().iter().map(|(k, _)| k.clone()).collect()
    }

    /// Values in rank order
    pub fn values(&self) -> Vec<f64> {
        self.before_read();
        self.ranks.borrow().iter().map(|(_, v)| *v).collect()
    }

    /// `(key, value)` pairs in rank order
    pub fn items(&self) -> Vec<(K, f64)> {
        self.before_read();
        self.ranks.borrow().clone()
    }

    /// Fraction of entries whose value is strictly below `value`.
    pub fn percentile(&self, value: f64) -> Result<f64, StandingError> {
        let ranks = self.ranks.borrow();
        if ranks.is_empty() {
            return Err(StandingError::Empty);
        }
        let below = ranks.iter().filter(|(_, v)| *v < value).count();
        Ok(below as f64 / ranks.len() as f64)
    }

    /// Fraction of entries whose value is strictly below the value of `key`.
    pub fn percentile_of(&self, key: &K) -> Result<f64, StandingError> {
        let value = self.value_of(key)?;
        self.percentile(value)
    }

    /// Whether at least two keys share a value.
    pub fn ties(&self) -> bool {
        let mut values = self.values();
        values.sort_by(f64::total_cmp);
        values.dedup();
        values.len() != self.len()
    }

    /// Groups of keys sharing a value, keyed by the (first, last) rank range
    /// they occupy.
    pub fn tied_items(&self) -> BTreeMap<(usize, usize), Vec<K>> {
        let items = self.items();
        let mut groups = BTreeMap::new();

        let mut start = 0;
        while start < items.len() {
            let mut end = start;
            while end + 1 < items.len() && items[end + 1].1 == items[start].1 {
                end += 1;
            }
            if end > start {
                let keys = items[start..=end].iter().map(|(k, _)| k.clone()).collect();
                groups.insert((start, end), keys);
            }
            start = end + 1;
        }
        groups
    }

    // --- derived standings --- //

    /// New standing holding exactly `keys`.
    ///
    /// Keys already present keep their value, the others get the default.
    /// `self` is not modified.
    pub fn fit(&self, keys: &[K]) -> Result<Self, StandingError> {
        let values: Vec<f64> = keys
            .iter()
            .map(|k| self.lookup(k).unwrap_or(self.default))
            .collect();
        let mut fitted = self.empty_like();
        fitted.add(keys.iter().cloned(), &values)?;
        Ok(fitted)
    }

    /// New standing with values redistributed over the current ranks.
    ///
    /// Directly, the key at index `i` receives the value held at index
    /// `permutation[i]`. With `inverse`, the key at index `permutation[i]`
    /// receives the value held at index `i`. Applying a permutation and then
    /// its inverse interpretation restores every key's value (when values are
    /// distinct).
    pub fn rerank(&self, permutation: &[usize], inverse: bool) -> Result<Self, StandingError> {
        let items = self.items();
        check_permutation(permutation, items.len())?;

        let mut keys = Vec::with_capacity(items.len());
        let mut values = Vec::with_capacity(items.len());
        for (i, &p) in permutation.iter().enumerate() {
            if inverse {
                keys.push(items[p].0.clone());
                values.push(items[i].1);
            } else {
                keys.push(items[i].0.clone());
                values.push(items[p].1);
            }
        }

        let mut reranked = self.empty_like();
        reranked.add(keys, &values)?;
        Ok(reranked)
    }
}

fn check_permutation(permutation: &[usize], len: usize) -> Result<(), StandingError> {
    if permutation.len() != len {
        return Err(StandingError::InvalidPermutation(format!(
            "expected {len} positions, got {}",
            permutation.len()
        )));
    }
    let mut seen = vec![false; len];
    for &p in permutation {
        match seen.get_mut(p) {
            Some(slot) if !*slot => *slot = true,
            Some(_) => {
                return Err(StandingError::InvalidPermutation(format!(
                    "position {p} appears twice"
                )))
            }
            None => {
                return Err(StandingError::InvalidPermutation(format!(
                    "position {p} out of range"
                )))
            }
        }
    }
    Ok(())
}

impl<K: StandingKey + fmt::Display> fmt::Display for Standing<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (key, value)) in self.items().iter().enumerate() {
            writeln!(f, "{:>5} {:>20} {:>10.1}", format!("{i}."), key, value)?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "standing_tests.rs"]
mod standing_tests;
