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

//! Capability traits the engines are written against.
//!
//! The engines never ask what kind of entity they are looking at. A proposer
//! only needs a ranking and a single partner slot; a reviewer needs a ranking
//! and a way to hold, release and compare proposals. Every concrete entity in
//! `accord-model` implements the roles it can play, so one skeleton serves the
//! one-to-one and many-to-one problems alike.

use accord_model::{
    capacitated::{Capacitated, CapacitatedPlayer},
    hierarchy::{Project, Supervisor},
    index::StudentIndex,
    player::Player,
    preferences::Preferences,
};
use std::hash::Hash;

/// Access to a working preference list over `O`.
pub trait Ranking<O>
where
    O: Copy + Eq + Hash,
{
    fn candidates(&self) -> &Preferences<O>;
    fn candidates_mut(&mut self) -> &mut Preferences<O>;

    /// Head of the working list.
    #[inline]
    fn best_candidate(&self) -> Option<O> {
        self.candidates().working().first().copied()
    }

    /// Returns `true` if `other` is still in the working list.
    #[inline]
    fn accepts(&self, other: O) -> bool {
        self.candidates().contains(other)
    }

    /// Removes `other` from the working list.
    #[inline]
    fn drop_candidate(&mut self, other: O) -> bool {
        self.candidates_mut().forget(other)
    }

    #[inline]
    fn is_exhausted(&self) -> bool {
        self.candidates().is_empty()
    }
}

/// A party member that proposes and ends up with at most one partner.
pub trait Proposable<O>: Ranking<O>
where
    O: Copy + Eq + Hash,
{
    fn current_partner(&self) -> Option<O>;
    fn set_partner(&mut self, partner: Option<O>);
}

/// A party member that holds proposals from members of `P`.
pub trait Reviewable<P>: Ranking<P>
where
    P: Copy + Eq + Hash,
{
    /// `false` when the member can never hold anything.
    fn has_capacity(&self) -> bool;

    /// `true` once no further proposal can be held without an eviction.
    fn at_capacity(&self) -> bool;

    /// The least preferred proposal currently held.
    fn worst_held(&self) -> Option<P>;

    fn hold(&mut self, proposer: P);
    fn release(&mut self, proposer: P);

    /// Working entries that can no longer displace anything held.
    fn held_successors(&self) -> Vec<P>;
}

impl<O> Ranking<O> for Player<O>
where
    O: Copy + Eq + Hash,
{
    #[inline]
    fn candidates(&self) -> &Preferences<O> {
        self.preferences()
    }

    #[inline]
    fn candidates_mut(&mut self) -> &mut Preferences<O> {
        self.preferences_mut()
    }
}

impl<O> Proposable<O> for Player<O>
where
    O: Copy + Eq + Hash,
{
    #[inline]
    fn current_partner(&self) -> Option<O> {
        self.partner()
    }

    #[inline]
    fn set_partner(&mut self, partner: Option<O>) {
        match partner {
            Some(other) => self.match_with(other),
            None => self.unmatch(),
        }
    }
}

impl<O> Reviewable<O> for Player<O>
where
    O: Copy + Eq + Hash,
{
    #[inline]
    fn has_capacity(&self) -> bool {
        true
    }

    #[inline]
    fn at_capacity(&self) -> bool {
        self.is_matched()
    }

    #[inline]
    fn worst_held(&self) -> Option<O> {
        self.partner()
    }

    #[inline]
    fn hold(&mut self, proposer: O) {
        self.match_with(proposer);
    }

    #[inline]
    fn release(&mut self, proposer: O) {
        if self.partner() == Some(proposer) {
            self.unmatch();
        }
    }

    #[inline]
    fn held_successors(&self) -> Vec<O> {
        self.successors()
    }
}

impl<O> Ranking<O> for CapacitatedPlayer<O>
where
    O: Copy + Eq + Hash,
{
    #[inline]
    fn candidates(&self) -> &Preferences<O> {
        self.preferences()
    }

    #[inline]
    fn candidates_mut(&mut self) -> &mut Preferences<O> {
        self.preferences_mut()
    }
}

impl<O> Reviewable<O> for CapacitatedPlayer<O>
where
    O: Copy + Eq + Hash,
{
    #[inline]
    fn has_capacity(&self) -> bool {
        Capacitated::capacity(self) > 0
    }

    #[inline]
    fn at_capacity(&self) -> bool {
        self.is_full()
    }

    #[inline]
    fn worst_held(&self) -> Option<O> {
        self.worst_match()
    }

    #[inline]
    fn hold(&mut self, proposer: O) {
        self.match_with(proposer);
    }

    #[inline]
    fn release(&mut self, proposer: O) {
        self.unmatch(proposer);
    }

    #[inline]
    fn held_successors(&self) -> Vec<O> {
        self.successors()
    }
}

impl Ranking<StudentIndex> for Project {
    #[inline]
    fn candidates(&self) -> &Preferences<StudentIndex> {
        self.party().preferences()
    }

    #[inline]
    fn candidates_mut(&mut self) -> &mut Preferences<StudentIndex> {
        self.party_mut().preferences_mut()
    }
}

/// Supervisors rank students but never review proposals directly; a
/// proposal reaches them through one of their projects.
impl Ranking<StudentIndex> for Supervisor {
    #[inline]
    fn candidates(&self) -> &Preferences<StudentIndex> {
        self.party().preferences()
    }

    #[inline]
    fn candidates_mut(&mut self) -> &mut Preferences<StudentIndex> {
        self.party_mut().preferences_mut()
    }
}

impl Reviewable<StudentIndex> for Project {
    #[inline]
    fn has_capacity(&self) -> bool {
        Capacitated::capacity(self) > 0
    }

    #[inline]
    fn at_capacity(&self) -> bool {
        self.is_full()
    }

    #[inline]
    fn worst_held(&self) -> Option<StudentIndex> {
        self.worst_match()
    }

    #[inline]
    fn hold(&mut self, proposer: StudentIndex) {
        self.party_mut().match_with(proposer);
    }

    #[inline]
    fn release(&mut self, proposer: StudentIndex) {
        self.party_mut().unmatch(proposer);
    }

    #[inline]
    fn held_successors(&self) -> Vec<StudentIndex> {
        self.successors()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use accord_model::index::{ResidentIndex, ReviewerIndex, SupervisorIndex};

    #[test]
    fn test_player_as_reviewer_holds_one_proposal() {
        let r = ReviewerIndex::new;
        let mut player = Player::with_preferences("X", vec![r(0), r(1), r(2)]);
        assert!(!player.at_capacity());
        player.hold(r(1));
        assert!(player.at_capacity());
        assert_eq!(player.worst_held(), Some(r(1)));
        assert_eq!(player.held_successors(), vec![r(2)]);
        player.release(r(0));
        assert_eq!(player.current_partner(), Some(r(1)));
        player.release(r(1));
        assert_eq!(player.current_partner(), None);
    }

    #[test]
    fn test_ranking_defaults() {
        let r = ReviewerIndex::new;
        let mut player = Player::with_preferences("A", vec![r(1), r(0)]);
        assert_eq!(player.best_candidate(), Some(r(1)));
        assert!(player.accepts(r(0)));
        assert!(player.drop_candidate(r(1)));
        assert!(!player.drop_candidate(r(1)));
        assert_eq!(player.best_candidate(), Some(r(0)));
        player.drop_candidate(r(0));
        assert!(player.is_exhausted());
    }

    #[test]
    fn test_zero_capacity_reviewer_has_no_capacity() {
        let hospital: CapacitatedPlayer<ResidentIndex> =
            CapacitatedPlayer::with_preferences("H", 0, vec![ResidentIndex::new(0)]);
        assert!(!hospital.has_capacity());
        assert!(hospital.at_capacity());
        assert_eq!(hospital.worst_held(), None);
    }

    #[test]
    fn test_project_as_reviewer() {
        let s = StudentIndex::new;
        let mut project = Project::new("P", 1, SupervisorIndex::new(0));
        project.party_mut().set_preferences(vec![s(0), s(1)]);
        project.hold(s(0));
        assert!(project.at_capacity());
        assert_eq!(project.held_successors(), vec![s(1)]);
        project.release(s(0));
        assert!(!project.at_capacity());
    }
}
