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

//! Index-level views the deferred-acceptance skeleton runs against.
//!
//! A `ProposalMarket` names proposers and reviewers by index and exposes just
//! the moves the skeleton makes: look up a favourite, hold or release a
//! proposal, and strike a pair from both lists. `BipartiteMarket` adapts two
//! arenas (stable marriage in either direction, resident-optimal
//! hospital-resident). `RoommateMarket` adapts the single arena of the stable
//! roommates problem, where holding a proposal is one-directional: `q`
//! holding `p` says nothing about whom `p` holds.

use crate::role::{Proposable, Ranking, Reviewable};
use accord_model::{index::RoommateIndex, player::Player};
use std::{hash::Hash, marker::PhantomData};

/// The moves of a propose-and-reject search.
pub trait ProposalMarket {
    type Proposer: Copy + Eq + Into<usize>;
    type Reviewer: Copy + Eq + Into<usize>;

    /// Every proposer, in input order.
    fn proposers(&self) -> Vec<Self::Proposer>;

    /// Head of the proposer's working list.
    fn favourite(&self, proposer: Self::Proposer) -> Option<Self::Reviewer>;

    /// `true` if the reviewer's working list still contains the proposer.
    fn accepts(&self, reviewer: Self::Reviewer, proposer: Self::Proposer) -> bool;

    fn has_capacity(&self, reviewer: Self::Reviewer) -> bool;
    fn is_full(&self, reviewer: Self::Reviewer) -> bool;
    fn worst_held(&self, reviewer: Self::Reviewer) -> Option<Self::Proposer>;
    fn hold(&mut self, reviewer: Self::Reviewer, proposer: Self::Proposer);
    fn release(&mut self, reviewer: Self::Reviewer, proposer: Self::Proposer);

    /// Proposers ranked by the reviewer below everything it holds.
    fn successors(&self, reviewer: Self::Reviewer) -> Vec<Self::Proposer>;

    /// Strikes the pair from both working lists.
    fn forget_pair(&mut self, proposer: Self::Proposer, reviewer: Self::Reviewer);
}

/// Two arenas, proposers `P` indexed by `PI` and reviewers `R` indexed by `RI`.
pub struct BipartiteMarket<'a, PI, RI, P, R> {
    proposers: &'a mut [P],
    reviewers: &'a mut [R],
    _marker: PhantomData<(PI, RI)>,
}

impl<'a, PI, RI, P, R> BipartiteMarket<'a, PI, RI, P, R>
where
    PI: Copy + Eq + Hash,
    RI: Copy + Eq + Hash,
    P: Proposable<RI>,
    R: Reviewable<PI>,
{
    #[inline]
    pub fn new(proposers: &'a mut [P], reviewers: &'a mut [R]) -> Self {
        Self {
            proposers,
            reviewers,
            _marker: PhantomData,
        }
    }
}

impl<PI, RI, P, R> ProposalMarket for BipartiteMarket<'_, PI, RI, P, R>
where
    PI: Copy + Eq + Hash + From<usize> + Into<usize>,
    RI: Copy + Eq + Hash + From<usize> + Into<usize>,
    P: Proposable<RI>,
    R: Reviewable<PI>,
{
    type Proposer = PI;
    type Reviewer = RI;

    #[inline]
    fn proposers(&self) -> Vec<PI> {
        (0..self.proposers.len()).map(PI::from).collect()
    }

    #[inline]
    fn favourite(&self, proposer: PI) -> Option<RI> {
        self.proposers[proposer.into()].best_candidate()
    }

    #[inline]
    fn accepts(&self, reviewer: RI, proposer: PI) -> bool {
        self.reviewers[reviewer.into()].accepts(proposer)
    }

    #[inline]
    fn has_capacity(&self, reviewer: RI) -> bool {
        self.reviewers[reviewer.into()].has_capacity()
    }

    #[inline]
    fn is_full(&self, reviewer: RI) -> bool {
        self.reviewers[reviewer.into()].at_capacity()
    }

    #[inline]
    fn worst_held(&self, reviewer: RI) -> Option<PI> {
        self.reviewers[reviewer.into()].worst_held()
    }

    #[inline]
    fn hold(&mut self, reviewer: RI, proposer: PI) {
        self.reviewers[reviewer.into()].hold(proposer);
        self.proposers[proposer.into()].set_partner(Some(reviewer));
    }

    #[inline]
    fn release(&mut self, reviewer: RI, proposer: PI) {
        self.reviewers[reviewer.into()].release(proposer);
        let suitor = &mut self.proposers[proposer.into()];
        if suitor.current_partner() == Some(reviewer) {
            suitor.set_partner(None);
        }
    }

    #[inline]
    fn successors(&self, reviewer: RI) -> Vec<PI> {
        self.reviewers[reviewer.into()].held_successors()
    }

    #[inline]
    fn forget_pair(&mut self, proposer: PI, reviewer: RI) {
        self.proposers[proposer.into()].drop_candidate(reviewer);
        self.reviewers[reviewer.into()].drop_candidate(proposer);
    }
}

/// A single arena of roommates; a player's partner slot records whose
/// proposal it currently holds.
pub struct RoommateMarket<'a> {
    players: &'a mut [Player<RoommateIndex>],
}

impl<'a> RoommateMarket<'a> {
    #[inline]
    pub fn new(players: &'a mut [Player<RoommateIndex>]) -> Self {
        Self { players }
    }
}

impl ProposalMarket for RoommateMarket<'_> {
    type Proposer = RoommateIndex;
    type Reviewer = RoommateIndex;

    #[inline]
    fn proposers(&self) -> Vec<RoommateIndex> {
        RoommateIndex::range(self.players.len()).collect()
    }

    #[inline]
    fn favourite(&self, proposer: RoommateIndex) -> Option<RoommateIndex> {
        self.players[proposer.get()].best_candidate()
    }

    #[inline]
    fn accepts(&self, reviewer: RoommateIndex, proposer: RoommateIndex) -> bool {
        self.players[reviewer.get()].accepts(proposer)
    }

    #[inline]
    fn has_capacity(&self, _reviewer: RoommateIndex) -> bool {
        true
    }

    #[inline]
    fn is_full(&self, reviewer: RoommateIndex) -> bool {
        self.players[reviewer.get()].at_capacity()
    }

    #[inline]
    fn worst_held(&self, reviewer: RoommateIndex) -> Option<RoommateIndex> {
        self.players[reviewer.get()].worst_held()
    }

    #[inline]
    fn hold(&mut self, reviewer: RoommateIndex, proposer: RoommateIndex) {
        self.players[reviewer.get()].hold(proposer);
    }

    #[inline]
    fn release(&mut self, reviewer: RoommateIndex, proposer: RoommateIndex) {
        self.players[reviewer.get()].release(proposer);
    }

    #[inline]
    fn successors(&self, reviewer: RoommateIndex) -> Vec<RoommateIndex> {
        self.players[reviewer.get()].held_successors()
    }

    #[inline]
    fn forget_pair(&mut self, proposer: RoommateIndex, reviewer: RoommateIndex) {
        self.players[proposer.get()].drop_candidate(reviewer);
        self.players[reviewer.get()].drop_candidate(proposer);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use accord_model::index::{ReviewerIndex, SuitorIndex};

    #[test]
    fn test_bipartite_hold_and_release_update_both_sides() {
        let s = SuitorIndex::new;
        let r = ReviewerIndex::new;
        let mut suitors = vec![Player::with_preferences("A", vec![r(0)])];
        let mut reviewers = vec![Player::with_preferences("X", vec![s(0)])];
        let mut market =
            BipartiteMarket::<SuitorIndex, ReviewerIndex, _, _>::new(&mut suitors, &mut reviewers);
        assert_eq!(market.proposers(), vec![s(0)]);
        market.hold(r(0), s(0));
        assert!(market.is_full(r(0)));
        market.release(r(0), s(0));
        assert!(!market.is_full(r(0)));
        assert_eq!(suitors[0].partner(), None);
        assert_eq!(reviewers[0].partner(), None);
    }

    #[test]
    fn test_bipartite_forget_pair_is_mutual() {
        let s = SuitorIndex::new;
        let r = ReviewerIndex::new;
        let mut suitors = vec![Player::with_preferences("A", vec![r(0), r(1)])];
        let mut reviewers = vec![
            Player::with_preferences("X", vec![s(0)]),
            Player::with_preferences("Y", vec![s(0)]),
        ];
        let mut market =
            BipartiteMarket::<SuitorIndex, ReviewerIndex, _, _>::new(&mut suitors, &mut reviewers);
        market.forget_pair(s(0), r(0));
        assert_eq!(market.favourite(s(0)), Some(r(1)));
        assert!(!market.accepts(r(0), s(0)));
    }

    #[test]
    fn test_roommate_hold_is_one_directional() {
        let p = RoommateIndex::new;
        let mut players = vec![
            Player::with_preferences("A", vec![p(1), p(2)]),
            Player::with_preferences("B", vec![p(0), p(2)]),
            Player::with_preferences("C", vec![p(0), p(1)]),
        ];
        let mut market = RoommateMarket::new(&mut players);
        market.hold(p(1), p(0));
        assert!(market.is_full(p(1)));
        assert!(!market.is_full(p(0)));
        assert_eq!(market.successors(p(1)), vec![p(2)]);
    }
}
