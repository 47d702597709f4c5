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

//! Capacitated party members.
//!
//! A `CapacitatedPlayer<O>` may hold up to `capacity` matches at once. Its
//! match list is kept sorted by original rank (best first) on every insertion,
//! so the worst current match is always the last element and the entries the
//! player will never accept once full are exactly the working entries after
//! that worst match.
//!
//! The `Capacitated` trait is the capability shared by every capacitated kind
//! (plain capacitated players, projects and supervisors). Projects and
//! supervisors compose a `CapacitatedPlayer` rather than extending it.

use crate::preferences::{EmptyPreferencesError, Preferences};
use std::hash::Hash;

/// Capability of a party member that holds an ordered, bounded set of matches.
pub trait Capacitated<O>
where
    O: Copy + Eq + Hash,
{
    /// Maximum number of simultaneous matches.
    fn capacity(&self) -> usize;

    /// Current matches, best first.
    fn matches(&self) -> &[O];

    /// Working preferences, consulted for successors.
    fn ranking(&self) -> &Preferences<O>;

    /// The worst current match.
    #[inline]
    fn worst_match(&self) -> Option<O> {
        self.matches().last().copied()
    }

    /// The working entries ranked strictly below the worst current match.
    ///
    /// Empty while nothing is matched.
    #[inline]
    fn successors(&self) -> Vec<O> {
        match self.worst_match() {
            Some(worst) => self.ranking().successors_of(worst),
            None => Vec::new(),
        }
    }

    /// Returns `true` once the match count has reached the capacity.
    #[inline]
    fn is_full(&self) -> bool {
        self.matches().len() >= self.capacity()
    }

    /// Returns `true` if the match count exceeds the capacity.
    #[inline]
    fn is_oversubscribed(&self) -> bool {
        self.matches().len() > self.capacity()
    }

    /// Number of matches that can still be taken on.
    #[inline]
    fn remaining_capacity(&self) -> usize {
        self.capacity().saturating_sub(self.matches().len())
    }
}

/// A party member with a capacity and an ordered match list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapacitatedPlayer<O>
where
    O: Eq + Hash,
{
    name: String,
    capacity: usize,
    preferences: Preferences<O>,
    matches: Vec<O>,
}

impl<O> CapacitatedPlayer<O>
where
    O: Copy + Eq + Hash,
{
    #[inline]
    pub fn new(name: impl Into<String>, capacity: usize) -> Self {
        Self {
            name: name.into(),
            capacity,
            preferences: Preferences::new(),
            matches: Vec::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn with_preferences(name: impl Into<String>, capacity: usize, ranking: Vec<O>) -> Self {
        Self {
            name: name.into(),
            capacity,
            preferences: Preferences::from_ranking(ranking),
            matches: Vec::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Overwrites the capacity; used when repairing inconsistent inputs.
    #[inline]
    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity;
    }

    #[inline]
    pub fn preferences(&self) -> &Preferences<O> {
        &self.preferences
    }

    #[inline]
    pub fn preferences_mut(&mut self) -> &mut Preferences<O> {
        &mut self.preferences
    }

    #[inline]
    pub fn set_preferences(&mut self, ranking: Vec<O>) {
        self.preferences.set(ranking);
    }

    #[inline]
    pub fn prefers(&self, a: O, b: O) -> bool {
        self.preferences.prefers(a, b)
    }

    #[inline]
    pub fn forget(&mut self, other: O) {
        self.preferences.forget(other);
    }

    #[inline]
    pub fn favourite(&self) -> Result<O, EmptyPreferencesError> {
        self.preferences.favourite()
    }

    #[inline]
    pub fn matches(&self) -> &[O] {
        &self.matches
    }

    #[inline]
    pub fn is_matched_with(&self, other: O) -> bool {
        self.matches.contains(&other)
    }

    /// Adds `other` to the match list, keeping it sorted best first.
    ///
    /// Adding an entry that is already matched is a no-op. Entries that do not
    /// appear in the original ranking sort after every ranked entry.
    pub fn match_with(&mut self, other: O) {
        if self.matches.contains(&other) {
            return;
        }
        self.matches.push(other);
        let preferences = &self.preferences;
        self.matches
            .sort_by_key(|&entry| preferences.rank(entry).unwrap_or(usize::MAX));
    }

    /// Removes `other` from the match list.
    #[inline]
    pub fn unmatch(&mut self, other: O) {
        self.matches.retain(|&entry| entry != other);
    }

    /// Drops every match.
    #[inline]
    pub fn clear_matches(&mut self) {
        self.matches.clear();
    }

    /// The first working entry not already matched to this player.
    #[inline]
    pub fn favourite_unmatched(&self) -> Option<O> {
        self.preferences
            .working()
            .iter()
            .copied()
            .find(|entry| !self.matches.contains(entry))
    }
}

impl<O> Capacitated<O> for CapacitatedPlayer<O>
where
    O: Copy + Eq + Hash,
{
    #[inline]
    fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    fn matches(&self) -> &[O] {
        &self.matches
    }

    #[inline]
    fn ranking(&self) -> &Preferences<O> {
        &self.preferences
    }
}

impl<O> std::fmt::Display for CapacitatedPlayer<O>
where
    O: Eq + Hash,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}
