// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Ranked preference lists.
//!
//! A `Preferences<I>` carries two views of the same ranking. The *working*
//! list is what the engines consume: entries are deleted from it as pairs
//! become impossible, but it is never re-ordered. The *original* list is
//! frozen by the first call to `set` and answers every "who ranks higher"
//! question, because the working list loses absolute rank information as it
//! shrinks.
//!
//! Ranks are looked up through a hash table built once from the original
//! ranking, so `prefers` and `rank` are O(1). When a ranking contains the same
//! entry twice, the first occurrence defines its rank.

use rustc_hash::{FxHashMap, FxHashSet};
use std::hash::Hash;

/// Returned by `Preferences::favourite` when the working list is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, thiserror::Error)]
#[error("preference list is empty")]
pub struct EmptyPreferencesError;

/// A working ranking plus the frozen original ranking it was derived from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preferences<I>
where
    I: Eq + Hash,
{
    working: Vec<I>,
    original: Vec<I>,
    ranks: FxHashMap<I, usize>,
    frozen: bool,
}

impl<I> Default for Preferences<I>
where
    I: Copy + Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<I> Preferences<I>
where
    I: Copy + Eq + Hash,
{
    /// Creates an empty, not yet frozen preference list.
    #[inline]
    pub fn new() -> Self {
        Self {
            working: Vec::new(),
            original: Vec::new(),
            ranks: FxHashMap::default(),
            frozen: false,
        }
    }

    /// Creates a preference list whose original ranking is `ranking`.
    #[inline]
    pub fn from_ranking(ranking: Vec<I>) -> Self {
        let mut preferences = Self::new();
        preferences.set(ranking);
        preferences
    }

    /// Replaces the working list.
    ///
    /// The first call also freezes `ranking` as the original ranking. Later
    /// calls leave the original untouched and drop any entry it does not
    /// rank, so the working list never outgrows the original.
    pub fn set(&mut self, mut ranking: Vec<I>) {
        if self.frozen {
            ranking.retain(|entry| self.ranks.contains_key(entry));
        } else {
            let mut ranks = FxHashMap::default();
            ranks.reserve(ranking.len());
            for (position, &entry) in ranking.iter().enumerate() {
                ranks.entry(entry).or_insert(position);
            }
            self.original = ranking.clone();
            self.ranks = ranks;
            self.frozen = true;
        }
        self.working = ranking;
    }

    /// Returns `true` once an original ranking has been fixed.
    #[inline]
    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// The current working list, best first.
    #[inline]
    pub fn working(&self) -> &[I] {
        &self.working
    }

    /// The original ranking, best first.
    #[inline]
    pub fn original(&self) -> &[I] {
        &self.original
    }

    /// Number of entries left in the working list.
    #[inline]
    pub fn len(&self) -> usize {
        self.working.len()
    }

    /// Returns `true` if the working list is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.working.is_empty()
    }

    /// Position of `other` in the original ranking, if it was ranked at all.
    #[inline]
    pub fn rank(&self, other: I) -> Option<usize> {
        self.ranks.get(&other).copied()
    }

    /// Returns `true` if `other` appears in the original ranking.
    #[inline]
    pub fn ranks(&self, other: I) -> bool {
        self.ranks.contains_key(&other)
    }

    /// Returns `true` if `other` is still in the working list.
    #[inline]
    pub fn contains(&self, other: I) -> bool {
        self.working.contains(&other)
    }

    /// Returns `true` if `a` is ranked strictly ahead of `b` in the original ranking.
    ///
    /// A ranked entry beats an unranked one; two unranked entries are not ordered.
    #[inline]
    pub fn prefers(&self, a: I, b: I) -> bool {
        match (self.rank(a), self.rank(b)) {
            (Some(rank_a), Some(rank_b)) => rank_a < rank_b,
            (Some(_), None) => true,
            _ => false,
        }
    }

    /// Removes every occurrence of `other` from the working list.
    ///
    /// Returns `true` if anything was removed. The original ranking is unaffected.
    #[inline]
    pub fn forget(&mut self, other: I) -> bool {
        let before = self.working.len();
        self.working.retain(|&entry| entry != other);
        before != self.working.len()
    }

    /// Keeps only the working entries for which `keep` returns `true`.
    #[inline]
    pub fn retain<F>(&mut self, keep: F)
    where
        F: FnMut(&I) -> bool,
    {
        self.working.retain(keep);
    }

    /// The head of the working list.
    #[inline]
    pub fn favourite(&self) -> Result<I, EmptyPreferencesError> {
        self.working.first().copied().ok_or(EmptyPreferencesError)
    }

    /// The second entry of the working list.
    #[inline]
    pub fn second(&self) -> Option<I> {
        self.working.get(1).copied()
    }

    /// The last (worst) entry of the working list.
    #[inline]
    pub fn last(&self) -> Option<I> {
        self.working.last().copied()
    }

    /// The working entries ranked strictly below `anchor`, each once, in
    /// working order.
    ///
    /// Empty if `anchor` is not in the working list. Rank is taken from the
    /// original ranking, so a repeated entry never lands behind its own copy.
    pub fn successors_of(&self, anchor: I) -> Vec<I> {
        if !self.contains(anchor) {
            return Vec::new();
        }
        let Some(threshold) = self.rank(anchor) else {
            return Vec::new();
        };
        let mut seen = FxHashSet::default();
        self.working
            .iter()
            .copied()
            .filter(|&entry| self.rank(entry).is_some_and(|rank| rank > threshold))
            .filter(|&entry| seen.insert(entry))
            .collect()
    }

    /// Entries that appear more than once in the working list, in order of
    /// their second appearance.
    pub fn duplicates(&self) -> Vec<I> {
        let mut seen = FxHashSet::default();
        let mut duplicates = Vec::new();
        for &entry in &self.working {
            if !seen.insert(entry) && !duplicates.contains(&entry) {
                duplicates.push(entry);
            }
        }
        duplicates
    }

    /// Drops repeated entries from the working list, keeping first occurrences.
    pub fn deduplicate(&mut self) {
        let mut seen = FxHashSet::default();
        self.working.retain(|&entry| seen.insert(entry));
    }
}
