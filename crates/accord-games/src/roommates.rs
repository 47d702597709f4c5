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

//! Stable roommates: a single party, everybody ranks everybody else.
//!
//! Some instances have no stable matching. That is not an error: the solve
//! still returns a (partial, symmetric) matching and records a
//! `NoStableMatching` diagnostic naming the players left alone.

use crate::{
    blocking::{prefers_to_current, ranked_once},
    diagnostics::{Diagnostic, Diagnostics},
    error::{GameError, MatchingError, ValidityIssue, into_result},
    options::GameOptions,
    sanitize::require_complete,
};
use accord_engine::{
    monitor::{
        no_op::NoOperationMonitor,
        solve_monitor::{Algorithm, SolveMonitor},
    },
    roommates::{RoommatesOutcome, stable_roommates},
    session::SolveSession,
    stats::EngineStatistics,
};
use accord_model::{
    index::RoommateIndex,
    loading::{NameIndex, PreferenceTable, load_players},
    matching::SingleMatching,
    player::Player,
    record::MatchingRecord,
};

#[derive(Debug, Clone)]
struct Solution {
    players: Vec<Player<RoommateIndex>>,
    matching: SingleMatching<RoommateIndex, RoommateIndex>,
    outcome: RoommatesOutcome,
    statistics: EngineStatistics,
    blocking_pairs: Vec<(RoommateIndex, RoommateIndex)>,
}

/// A stable roommates instance.
#[derive(Debug, Clone)]
pub struct StableRoommates {
    players: Vec<Player<RoommateIndex>>,
    options: GameOptions,
    diagnostics: Diagnostics,
    solution: Option<Solution>,
}

impl StableRoommates {
    /// Builds a game from ranked players; the players are cloned.
    pub fn new(players: &[Player<RoommateIndex>], options: GameOptions) -> Result<Self, GameError> {
        require_complete(players, "roommates", players.len(), true)?;
        Ok(Self {
            players: players.to_vec(),
            options,
            diagnostics: Diagnostics::new(),
            solution: None,
        })
    }

    /// Builds a game from name-keyed rankings.
    pub fn from_preferences(
        players: &PreferenceTable,
        options: GameOptions,
    ) -> Result<Self, GameError> {
        let names = NameIndex::<RoommateIndex>::from_table("roommate", players)?;
        let players = load_players(players, &names)?;
        Self::new(&players, options)
    }

    #[inline]
    pub fn players(&self) -> &[Player<RoommateIndex>] {
        &self.players
    }

    #[inline]
    pub fn options(&self) -> GameOptions {
        self.options
    }

    #[inline]
    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    #[inline]
    pub fn matching(&self) -> Option<&SingleMatching<RoommateIndex, RoommateIndex>> {
        self.solution.as_ref().map(|solution| &solution.matching)
    }

    #[inline]
    pub fn statistics(&self) -> Option<&EngineStatistics> {
        self.solution.as_ref().map(|solution| &solution.statistics)
    }

    /// `Some(true)` if the last solve found a stable matching.
    #[inline]
    pub fn has_stable_matching(&self) -> Option<bool> {
        self.solution
            .as_ref()
            .map(|solution| solution.outcome.is_complete())
    }

    pub fn solve(&mut self) -> Result<&SingleMatching<RoommateIndex, RoommateIndex>, GameError> {
        let mut monitor = NoOperationMonitor::new();
        self.solve_with_monitor(&mut monitor)
    }

    /// Solves a fresh copy of the game, reporting engine events to `monitor`.
    pub fn solve_with_monitor(
        &mut self,
        monitor: &mut dyn SolveMonitor,
    ) -> Result<&SingleMatching<RoommateIndex, RoommateIndex>, GameError> {
        let mut players = self.players.clone();
        let mut session = SolveSession::new(Algorithm::Roommates, monitor);
        let outcome = stable_roommates(&mut players, &mut session);
        let statistics = session.finish();
        ::log::debug!("{} finished\n{}", Algorithm::Roommates, statistics);

        self.diagnostics.clear_outcome();
        if !outcome.is_complete() {
            self.diagnostics.report(Diagnostic::NoStableMatching {
                players: outcome
                    .unmatched
                    .iter()
                    .map(|p| players[p.get()].name().to_string())
                    .collect(),
            });
        }

        let mut matching = SingleMatching::within(players.len());
        for (index, player) in players.iter().enumerate() {
            match player.partner() {
                Some(partner) if index < partner.get() => {
                    matching.set_symmetric(RoommateIndex::new(index), Some(partner))?;
                }
                _ => {}
            }
        }

        let solution = self.solution.insert(Solution {
            players,
            matching,
            outcome,
            statistics,
            blocking_pairs: Vec::new(),
        });
        Ok(&solution.matching)
    }

    /// Pairs `a` with `b` (or unmatches `a`), detaching both previous partners.
    pub fn set_match(
        &mut self,
        a: RoommateIndex,
        b: Option<RoommateIndex>,
    ) -> Result<(), GameError> {
        let solution = self.solution.get_or_insert_with(|| Solution {
            players: self.players.clone(),
            matching: SingleMatching::within(self.players.len()),
            outcome: RoommatesOutcome::default(),
            statistics: EngineStatistics::default(),
            blocking_pairs: Vec::new(),
        });
        solution.matching.set_symmetric(a, b)?;
        for (index, player) in solution.players.iter_mut().enumerate() {
            match solution.matching.get(RoommateIndex::new(index)) {
                Some(partner) => player.match_with(partner),
                None => player.unmatch(),
            }
        }
        Ok(())
    }

    /// Checks that matches are mutual, agree with the players, and are
    /// acceptable. When a stable matching exists everybody must be matched.
    pub fn check_validity(&self) -> Result<(), MatchingError> {
        let Some(solution) = &self.solution else {
            return into_result(vec![ValidityIssue::NotSolved]);
        };
        let players = &solution.players;
        let mut issues = Vec::new();

        for (index, player) in players.iter().enumerate() {
            let me = RoommateIndex::new(index);
            let partner = solution.matching.get(me);
            if player.partner() != partner {
                issues.push(ValidityIssue::Inconsistent {
                    player: player.name().to_string(),
                    partner: partner
                        .map_or_else(|| "-".to_string(), |p| players[p.get()].name().to_string()),
                });
            }
            match partner {
                None => {
                    if solution.outcome.is_complete() {
                        issues.push(ValidityIssue::Unmatched {
                            player: player.name().to_string(),
                        });
                    }
                }
                Some(other) => {
                    if solution.matching.get(other) != Some(me) {
                        issues.push(ValidityIssue::Inconsistent {
                            player: players[other.get()].name().to_string(),
                            partner: player.name().to_string(),
                        });
                    }
                    if !player.preferences().ranks(other) {
                        issues.push(ValidityIssue::Unacceptable {
                            player: player.name().to_string(),
                            partner: players[other.get()].name().to_string(),
                        });
                    }
                }
            }
        }

        into_result(issues)
    }

    /// Unordered pairs (smaller index first) that would rather be together.
    pub fn find_blocking_pairs(&self) -> Vec<(RoommateIndex, RoommateIndex)> {
        let Some(solution) = &self.solution else {
            return Vec::new();
        };
        let mut pairs = Vec::new();
        for (index, player) in solution.players.iter().enumerate() {
            let a = RoommateIndex::new(index);
            let current = solution.matching.get(a);
            for b in ranked_once(player.preferences(), solution.players.len()) {
                if b.get() <= index || current == Some(b) {
                    continue;
                }
                let other = &solution.players[b.get()];
                if prefers_to_current(player.preferences(), b, current)
                    && prefers_to_current(other.preferences(), a, solution.matching.get(b))
                {
                    pairs.push((a, b));
                }
            }
        }
        pairs
    }

    /// Returns `true` if there is no blocking pair; the pairs found are kept
    /// for `blocking_pairs`.
    pub fn check_stability(&mut self) -> bool {
        let pairs = self.find_blocking_pairs();
        let stable = pairs.is_empty();
        match &mut self.solution {
            Some(solution) => {
                solution.blocking_pairs = pairs;
                stable
            }
            None => false,
        }
    }

    #[inline]
    pub fn blocking_pairs(&self) -> &[(RoommateIndex, RoommateIndex)] {
        self.solution
            .as_ref()
            .map_or(&[], |solution| solution.blocking_pairs.as_slice())
    }

    pub fn to_record(&self) -> Option<MatchingRecord> {
        self.solution.as_ref().map(|solution| {
            solution.matching.to_record(
                |p| Some(self.players[p.get()].name()),
                |p| self.players[p.get()].name(),
            )
        })
    }
}
