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

//! Irving's algorithm for stable roommates.
//!
//! Phase one is the shared propose-and-reject skeleton on a `RoommateMarket`.
//! Afterwards every list is symmetric: `q` is in `p`'s list exactly when `p`
//! is in `q`'s, and the head of each list is the player holding its
//! proposal. A list that emptied during phase one means no stable matching
//! exists, but phase two still runs on the remaining lists.
//!
//! Phase two repeatedly finds an all-or-nothing cycle starting from the
//! first player (in input order) with more than one entry left and
//! eliminates it. The pairs to strike are collected for the whole rotation
//! before any of them is struck. Phase two stops once every list has at most
//! one entry. It stops early when a rotation empties a list or when no cycle
//! can be traced.
//!
//! The final matching pairs `p` with `q` only when their lists are exactly
//! `[q]` and `[p]`, so the result is symmetric even when no stable matching
//! exists.

use crate::{
    deferred_acceptance::propose_and_reject, market::RoommateMarket, role::Ranking,
    session::SolveSession,
};
use accord_model::{index::RoommateIndex, player::Player};
use fixedbitset::FixedBitSet;

/// What the roommates engine learned besides the matching itself.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RoommatesOutcome {
    /// Players whose list emptied during the proposal phase.
    pub exhausted: Vec<RoommateIndex>,
    /// `true` if rotation elimination stopped before every list was reduced
    /// to a single entry.
    pub stalled: bool,
    /// Players left without a partner.
    pub unmatched: Vec<RoommateIndex>,
}

impl RoommatesOutcome {
    /// `true` when every player ended up matched.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.exhausted.is_empty() && !self.stalled && self.unmatched.is_empty()
    }
}

/// Runs both phases and leaves each player's partner set to its roommate.
pub fn stable_roommates(
    players: &mut [Player<RoommateIndex>],
    session: &mut SolveSession<'_>,
) -> RoommatesOutcome {
    propose_and_reject(&mut RoommateMarket::new(players), session);

    let exhausted: Vec<RoommateIndex> = RoommateIndex::range(players.len())
        .filter(|&p| players[p.get()].is_exhausted())
        .collect();
    if !exhausted.is_empty() {
        ::log::debug!(
            "{} player(s) rejected by everyone during the proposal phase",
            exhausted.len()
        );
    }

    let stalled = eliminate_rotations(players, session);

    for player in players.iter_mut() {
        player.unmatch();
    }
    let mut unmatched = Vec::new();
    for p in RoommateIndex::range(players.len()) {
        match sole_entry(players, p) {
            Some(q) if sole_entry(players, q) == Some(p) => players[p.get()].match_with(q),
            _ => unmatched.push(p),
        }
    }

    RoommatesOutcome {
        exhausted,
        stalled,
        unmatched,
    }
}

#[inline]
fn sole_entry(players: &[Player<RoommateIndex>], p: RoommateIndex) -> Option<RoommateIndex> {
    match players[p.get()].preferences().working() {
        [only] => Some(*only),
        _ => None,
    }
}

/// Phase two. Returns `true` if it stopped before every list was reduced to
/// at most one entry.
fn eliminate_rotations(
    players: &mut [Player<RoommateIndex>],
    session: &mut SolveSession<'_>,
) -> bool {
    loop {
        let Some(start) = players
            .iter()
            .position(|player| player.preferences().len() > 1)
        else {
            return false;
        };

        let Some(rotation) = locate_rotation(players, RoommateIndex::new(start)) else {
            ::log::debug!("no all-or-nothing cycle can be traced from player {}", start);
            return true;
        };

        let mut strikes = Vec::new();
        for (position, &(_, second)) in rotation.iter().enumerate() {
            let (left, _) = rotation[(position + rotation.len() - 1) % rotation.len()];
            for successor in players[second.get()].preferences().successors_of(left) {
                strikes.push((second, successor));
            }
        }
        if strikes.is_empty() {
            return true;
        }

        session.rotation(rotation.len());
        let mut emptied = false;
        for (first, second) in strikes {
            let removed = players[first.get()].drop_candidate(second);
            players[second.get()].drop_candidate(first);
            if removed {
                session.deletion(first.get(), second.get());
            }
            emptied |= players[first.get()].is_exhausted() || players[second.get()].is_exhausted();
        }
        if emptied {
            ::log::debug!("a rotation emptied a preference list; no stable matching exists");
            return players.iter().any(|player| player.preferences().len() > 1);
        }
    }
}

/// Traces an all-or-nothing cycle from `start`.
///
/// Returns the cycle as `(last, second)` pairs, or `None` if some list on
/// the way is too short to continue.
fn locate_rotation(
    players: &[Player<RoommateIndex>],
    start: RoommateIndex,
) -> Option<Vec<(RoommateIndex, RoommateIndex)>> {
    let mut seen = FixedBitSet::with_capacity(players.len());
    let mut lasts = vec![start];
    let mut seconds = Vec::new();
    seen.insert(start.get());

    let mut current = start;
    loop {
        let second = players[current.get()].preferences().second()?;
        let worst = players[second.get()].preferences().last()?;
        seconds.push(second);
        lasts.push(worst);
        if seen.put(worst.get()) {
            break;
        }
        current = worst;
    }

    let repeated = *lasts.last()?;
    let first = lasts.iter().position(|&p| p == repeated)?;
    Some(
        lasts[first + 1..]
            .iter()
            .copied()
            .zip(seconds[first..].iter().copied())
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monitor::{no_op::NoOperationMonitor, solve_monitor::Algorithm};

    fn p(i: usize) -> RoommateIndex {
        RoommateIndex::new(i)
    }

    fn players(rankings: &[&[usize]]) -> Vec<Player<RoommateIndex>> {
        rankings
            .iter()
            .enumerate()
            .map(|(index, ranking)| {
                Player::with_preferences(
                    format!("P{}", index),
                    ranking.iter().map(|&i| p(i)).collect(),
                )
            })
            .collect()
    }

    fn solve(
        players: &mut [Player<RoommateIndex>],
    ) -> (RoommatesOutcome, crate::stats::EngineStatistics) {
        let mut monitor = NoOperationMonitor::new();
        let mut session = SolveSession::new(Algorithm::Roommates, &mut monitor);
        let outcome = stable_roommates(players, &mut session);
        (outcome, session.finish())
    }

    #[test]
    fn test_four_player_instance() {
        let mut roommates = players(&[&[1, 2, 3], &[0, 2, 3], &[0, 1, 3], &[0, 1, 2]]);
        let (outcome, stats) = solve(&mut roommates);
        assert!(outcome.is_complete());
        assert_eq!(stats.rotations, 0);
        let partners: Vec<_> = roommates.iter().map(|r| r.partner()).collect();
        assert_eq!(partners, vec![Some(p(1)), Some(p(0)), Some(p(3)), Some(p(2))]);
    }

    #[test]
    fn test_instance_without_stable_matching() {
        let mut roommates = players(&[&[1, 2, 3], &[2, 0, 3], &[0, 1, 3], &[0, 1, 2]]);
        let (outcome, stats) = solve(&mut roommates);
        assert_eq!(outcome.exhausted, vec![p(3)]);
        // The three-cycle left by phase one is still eliminated.
        assert_eq!(stats.rotations, 1);
        assert!(!outcome.stalled);
        assert!(!outcome.is_complete());
        assert!(roommates.iter().all(|r| r.partner().is_none()));
        assert_eq!(outcome.unmatched.len(), 4);
    }

    #[test]
    fn test_rotation_elimination() {
        // Phase one pairs 4 with 5 and leaves a four-cycle for a single rotation.
        let mut roommates = players(&[
            &[1, 3, 2, 5, 4],
            &[2, 4, 0, 5, 3],
            &[3, 5, 1, 0, 4],
            &[0, 4, 2, 1, 5],
            &[5, 1, 3, 0, 2],
            &[4, 2, 0, 3, 1],
        ]);
        let (outcome, stats) = solve(&mut roommates);
        assert!(outcome.is_complete());
        assert_eq!(stats.rotations, 1);
        for (index, roommate) in roommates.iter().enumerate() {
            let partner = roommate.partner().unwrap();
            assert_eq!(roommates[partner.get()].partner(), Some(p(index)));
        }
    }

    #[test]
    fn test_locate_rotation_returns_cycle_pairs() {
        let roommates = players(&[&[1, 2], &[2, 0], &[0, 1]]);
        let rotation = locate_rotation(&roommates, p(0)).unwrap();
        assert_eq!(rotation, vec![(p(1), p(2)), (p(2), p(0)), (p(0), p(1))]);
    }

    #[test]
    fn test_locate_rotation_gives_up_on_short_lists() {
        let roommates = players(&[&[1, 2], &[0], &[]]);
        assert_eq!(locate_rotation(&roommates, p(0)), None);
        let roommates = players(&[&[1], &[0]]);
        assert_eq!(locate_rotation(&roommates, p(0)), None);
    }
}
