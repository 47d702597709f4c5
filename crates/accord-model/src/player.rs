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

use crate::preferences::{EmptyPreferencesError, Preferences};
use std::hash::Hash;

/// A party member that holds at most one match at a time.
///
/// `O` is the index type of the party this player ranks. In a two-sided game
/// that is the opposite party; in stable roommates it is the player's own party.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player<O>
where
    O: Eq + Hash,
{
    name: String,
    preferences: Preferences<O>,
    partner: Option<O>,
}

impl<O> Player<O>
where
    O: Copy + Eq + Hash,
{
    /// Creates an unmatched player without a ranking.
    #[inline]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            preferences: Preferences::new(),
            partner: None,
        }
    }

    /// Creates an unmatched player whose original ranking is `ranking`.
    #[inline]
    pub fn with_preferences(name: impl Into<String>, ranking: Vec<O>) -> Self {
        Self {
            name: name.into(),
            preferences: Preferences::from_ranking(ranking),
            partner: None,
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn preferences(&self) -> &Preferences<O> {
        &self.preferences
    }

    #[inline]
    pub fn preferences_mut(&mut self) -> &mut Preferences<O> {
        &mut self.preferences
    }

    /// Replaces the working ranking; the first call also fixes the original.
    #[inline]
    pub fn set_preferences(&mut self, ranking: Vec<O>) {
        self.preferences.set(ranking);
    }

    /// Returns `true` if this player ranks `a` ahead of `b`.
    #[inline]
    pub fn prefers(&self, a: O, b: O) -> bool {
        self.preferences.prefers(a, b)
    }

    /// Removes `other` from the working ranking.
    #[inline]
    pub fn forget(&mut self, other: O) {
        self.preferences.forget(other);
    }

    /// The head of the working ranking.
    #[inline]
    pub fn favourite(&self) -> Result<O, EmptyPreferencesError> {
        self.preferences.favourite()
    }

    /// The working entries ranked strictly below the current partner.
    ///
    /// Empty while the player is unmatched.
    #[inline]
    pub fn successors(&self) -> Vec<O> {
        match self.partner {
            Some(partner) => self.preferences.successors_of(partner),
            None => Vec::new(),
        }
    }

    /// The current partner, if any.
    #[inline]
    pub fn partner(&self) -> Option<O> {
        self.partner
    }

    #[inline]
    pub fn is_matched(&self) -> bool {
        self.partner.is_some()
    }

    /// Sets the current partner, replacing any previous one.
    #[inline]
    pub fn match_with(&mut self, other: O) {
        self.partner = Some(other);
    }

    #[inline]
    pub fn unmatch(&mut self) {
        self.partner = None;
    }
}

impl<O> std::fmt::Display for Player<O>
where
    O: Eq + Hash,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::ReviewerIndex;

    fn ri(i: usize) -> ReviewerIndex {
        ReviewerIndex::new(i)
    }

    #[test]
    fn test_new_player_is_unmatched_and_unranked() {
        let p: Player<ReviewerIndex> = Player::new("A");
        assert_eq!(p.name(), "A");
        assert!(!p.is_matched());
        assert!(p.preferences().is_empty());
        assert!(!p.preferences().is_frozen());
        assert!(p.favourite().is_err());
    }

    #[test]
    fn test_successors_follow_partner() {
        let mut p = Player::with_preferences("A", vec![ri(0), ri(1), ri(2)]);
        assert!(p.successors().is_empty());
        p.match_with(ri(1));
        assert_eq!(p.successors(), vec![ri(2)]);
        p.unmatch();
        assert!(p.successors().is_empty());
    }

    #[test]
    fn test_forget_keeps_original_ranking() {
        let mut p = Player::with_preferences("A", vec![ri(0), ri(1)]);
        p.forget(ri(0));
        assert_eq!(p.favourite(), Ok(ri(1)));
        assert!(p.prefers(ri(0), ri(1)));
    }

    #[test]
    fn test_second_set_preferences_does_not_touch_original() {
        let mut p = Player::with_preferences("A", vec![ri(0), ri(1)]);
        p.set_preferences(vec![ri(1), ri(0)]);
        assert_eq!(p.favourite(), Ok(ri(1)));
        assert!(p.prefers(ri(0), ri(1)));
    }

    #[test]
    fn test_display_is_name() {
        let p: Player<ReviewerIndex> = Player::new("Jane");
        assert_eq!(format!("{}", p), "Jane");
    }
}
