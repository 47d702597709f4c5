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

//! Stable marriage: two equally sized parties, complete strict rankings.
//!
//! Construction rejects unequal parties and incomplete rankings outright;
//! there is nothing to repair in a one-to-one game. Solving clones the
//! validated input and runs the propose-and-reject skeleton with the chosen
//! side proposing, so one game can be solved for both sides and compared.

use crate::{
    blocking::{prefers_to_current, ranked_once},
    diagnostics::Diagnostics,
    error::{GameError, MatchingError, ValidityIssue, into_result},
    options::GameOptions,
    sanitize::require_complete,
};
use accord_engine::{
    deferred_acceptance::propose_and_reject,
    market::BipartiteMarket,
    monitor::{
        no_op::NoOperationMonitor,
        solve_monitor::{Algorithm, SolveMonitor},
    },
    session::SolveSession,
    stats::EngineStatistics,
};
use accord_model::{
    index::{ReviewerIndex, SuitorIndex},
    loading::{NameIndex, PreferenceTable, load_players},
    matching::SingleMatching,
    player::Player,
    record::MatchingRecord,
};

/// The party whose outcome a solve optimises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MarriageOptimal {
    #[default]
    Suitor,
    Reviewer,
}

impl MarriageOptimal {
    #[inline]
    fn algorithm(self) -> Algorithm {
        match self {
            MarriageOptimal::Suitor => Algorithm::SuitorOptimal,
            MarriageOptimal::Reviewer => Algorithm::ReviewerOptimal,
        }
    }
}

#[derive(Debug, Clone)]
struct Solution {
    suitors: Vec<Player<ReviewerIndex>>,
    reviewers: Vec<Player<SuitorIndex>>,
    matching: SingleMatching<SuitorIndex, ReviewerIndex>,
    statistics: EngineStatistics,
    blocking_pairs: Vec<(SuitorIndex, ReviewerIndex)>,
}

/// A stable marriage instance.
#[derive(Debug, Clone)]
pub struct StableMarriage {
    suitors: Vec<Player<ReviewerIndex>>,
    reviewers: Vec<Player<SuitorIndex>>,
    options: GameOptions,
    diagnostics: Diagnostics,
    solution: Option<Solution>,
}

impl StableMarriage {
    /// Builds a game from ranked players; the players are cloned.
    pub fn new(
        suitors: &[Player<ReviewerIndex>],
        reviewers: &[Player<SuitorIndex>],
        options: GameOptions,
    ) -> Result<Self, GameError> {
        if suitors.len() != reviewers.len() {
            return Err(GameError::UnequalPartySizes {
                left: "suitors",
                left_len: suitors.len(),
                right: "reviewers",
                right_len: reviewers.len(),
            });
        }
        require_complete(suitors, "reviewers", reviewers.len(), false)?;
        require_complete(reviewers, "suitors", suitors.len(), false)?;

        Ok(Self {
            suitors: suitors.to_vec(),
            reviewers: reviewers.to_vec(),
            options,
            diagnostics: Diagnostics::new(),
            solution: None,
        })
    }

    /// Builds a game from name-keyed rankings.
    pub fn from_preferences(
        suitors: &PreferenceTable,
        reviewers: &PreferenceTable,
        options: GameOptions,
    ) -> Result<Self, GameError> {
        let suitor_names = NameIndex::<SuitorIndex>::from_table("suitor", suitors)?;
        let reviewer_names = NameIndex::<ReviewerIndex>::from_table("reviewer", reviewers)?;
        let suitors = load_players(suitors, &reviewer_names)?;
        let reviewers = load_players(reviewers, &suitor_names)?;
        Self::new(&suitors, &reviewers, options)
    }

    #[inline]
    pub fn suitors(&self) -> &[Player<ReviewerIndex>] {
        &self.suitors
    }

    #[inline]
    pub fn reviewers(&self) -> &[Player<SuitorIndex>] {
        &self.reviewers
    }

    #[inline]
    pub fn options(&self) -> GameOptions {
        self.options
    }

    #[inline]
    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// The matching of the last solve, if any.
    #[inline]
    pub fn matching(&self) -> Option<&SingleMatching<SuitorIndex, ReviewerIndex>> {
        self.solution.as_ref().map(|solution| &solution.matching)
    }

    /// Statistics of the last solve, if any.
    #[inline]
    pub fn statistics(&self) -> Option<&EngineStatistics> {
        self.solution.as_ref().map(|solution| &solution.statistics)
    }

    pub fn solve(
        &mut self,
        optimal: MarriageOptimal,
    ) -> Result<&SingleMatching<SuitorIndex, ReviewerIndex>, GameError> {
        let mut monitor = NoOperationMonitor::new();
        self.solve_with_monitor(optimal, &mut monitor)
    }

    /// Solves a fresh copy of the game, reporting engine events to `monitor`.
    pub fn solve_with_monitor(
        &mut self,
        optimal: MarriageOptimal,
        monitor: &mut dyn SolveMonitor,
    ) -> Result<&SingleMatching<SuitorIndex, ReviewerIndex>, GameError> {
        let mut suitors = self.suitors.clone();
        let mut reviewers = self.reviewers.clone();

        let mut session = SolveSession::new(optimal.algorithm(), monitor);
        match optimal {
            MarriageOptimal::Suitor => propose_and_reject(
                &mut BipartiteMarket::<SuitorIndex, ReviewerIndex, _, _>::new(
                    &mut suitors,
                    &mut reviewers,
                ),
                &mut session,
            ),
            MarriageOptimal::Reviewer => propose_and_reject(
                &mut BipartiteMarket::<ReviewerIndex, SuitorIndex, _, _>::new(
                    &mut reviewers,
                    &mut suitors,
                ),
                &mut session,
            ),
        }
        let statistics = session.finish();
        ::log::debug!("{} finished\n{}", optimal.algorithm(), statistics);

        let mut matching = SingleMatching::new(suitors.len(), reviewers.len());
        for (index, suitor) in suitors.iter().enumerate() {
            if let Some(reviewer) = suitor.partner() {
                matching.set(SuitorIndex::new(index), Some(reviewer))?;
            }
        }

        let solution = self.solution.insert(Solution {
            suitors,
            reviewers,
            matching,
            statistics,
            blocking_pairs: Vec::new(),
        });
        Ok(&solution.matching)
    }

    /// Matches `suitor` to `reviewer` (or unmatches it), detaching both
    /// previous partners. An unsolved game starts from an empty matching.
    pub fn set_match(
        &mut self,
        suitor: SuitorIndex,
        reviewer: Option<ReviewerIndex>,
    ) -> Result<(), GameError> {
        let solution = self.solution.get_or_insert_with(|| Solution {
            suitors: self.suitors.clone(),
            reviewers: self.reviewers.clone(),
            matching: SingleMatching::new(self.suitors.len(), self.reviewers.len()),
            statistics: EngineStatistics::default(),
            blocking_pairs: Vec::new(),
        });
        solution.matching.set(suitor, reviewer)?;

        for (index, player) in solution.suitors.iter_mut().enumerate() {
            match solution.matching.get(SuitorIndex::new(index)) {
                Some(partner) => player.match_with(partner),
                None => player.unmatch(),
            }
        }
        for (index, player) in solution.reviewers.iter_mut().enumerate() {
            match solution.matching.key_of(ReviewerIndex::new(index)) {
                Some(partner) => player.match_with(partner),
                None => player.unmatch(),
            }
        }
        Ok(())
    }

    /// Checks that everybody is matched, that the players agree with the
    /// matching, and that every pair is mutually acceptable.
    pub fn check_validity(&self) -> Result<(), MatchingError> {
        let Some(solution) = &self.solution else {
            return into_result(vec![ValidityIssue::NotSolved]);
        };
        let mut issues = Vec::new();

        for (index, suitor) in solution.suitors.iter().enumerate() {
            let key = SuitorIndex::new(index);
            let value = solution.matching.get(key);
            if suitor.partner() != value {
                issues.push(ValidityIssue::Inconsistent {
                    player: suitor.name().to_string(),
                    partner: partner_name(&solution.reviewers, value.map(|r| r.get())),
                });
            }
            let Some(reviewer) = value else {
                issues.push(ValidityIssue::Unmatched {
                    player: suitor.name().to_string(),
                });
                continue;
            };
            let partner = &solution.reviewers[reviewer.get()];
            if !suitor.preferences().ranks(reviewer) {
                issues.push(ValidityIssue::Unacceptable {
                    player: suitor.name().to_string(),
                    partner: partner.name().to_string(),
                });
            }
            if !partner.preferences().ranks(key) {
                issues.push(ValidityIssue::Unacceptable {
                    player: partner.name().to_string(),
                    partner: suitor.name().to_string(),
                });
            }
        }

        for (index, reviewer) in solution.reviewers.iter().enumerate() {
            let key = solution.matching.key_of(ReviewerIndex::new(index));
            if reviewer.partner() != key {
                issues.push(ValidityIssue::Inconsistent {
                    player: reviewer.name().to_string(),
                    partner: partner_name(&solution.suitors, key.map(|s| s.get())),
                });
            }
            if key.is_none() {
                issues.push(ValidityIssue::Unmatched {
                    player: reviewer.name().to_string(),
                });
            }
        }

        into_result(issues)
    }

    /// Pairs that would both rather be with each other than with their
    /// current partners.
    pub fn find_blocking_pairs(&self) -> Vec<(SuitorIndex, ReviewerIndex)> {
        let Some(solution) = &self.solution else {
            return Vec::new();
        };
        let matching = &solution.matching;
        let mut pairs = Vec::new();
        for (index, suitor) in solution.suitors.iter().enumerate() {
            let s = SuitorIndex::new(index);
            let current = matching.get(s);
            for r in ranked_once(suitor.preferences(), solution.reviewers.len()) {
                if current == Some(r) || !prefers_to_current(suitor.preferences(), r, current) {
                    continue;
                }
                let reviewer = &solution.reviewers[r.get()];
                if prefers_to_current(reviewer.preferences(), s, matching.key_of(r)) {
                    pairs.push((s, r));
                }
            }
        }
        pairs
    }

    /// Returns `true` if the last solve (or manual matching) has no blocking
    /// pair; the pairs found are kept for `blocking_pairs`.
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

    /// Blocking pairs found by the last `check_stability`.
    #[inline]
    pub fn blocking_pairs(&self) -> &[(SuitorIndex, ReviewerIndex)] {
        self.solution
            .as_ref()
            .map_or(&[], |solution| solution.blocking_pairs.as_slice())
    }

    /// The matching by name, keyed by suitor.
    pub fn to_record(&self) -> Option<MatchingRecord> {
        self.solution.as_ref().map(|solution| {
            solution.matching.to_record(
                |s| Some(self.suitors[s.get()].name()),
                |r| self.reviewers[r.get()].name(),
            )
        })
    }
}

fn partner_name<O>(players: &[Player<O>], index: Option<usize>) -> String
where
    O: Copy + Eq + std::hash::Hash,
{
    index.map_or_else(|| "-".to_string(), |index| players[index].name().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng, seq::SliceRandom};

    fn example() -> StableMarriage {
        let suitors = PreferenceTable::from([
            ("A", vec!["X", "Y", "Z"]),
            ("B", vec!["Y", "X", "Z"]),
            ("C", vec!["Y", "Z", "X"]),
        ]);
        let reviewers = PreferenceTable::from([
            ("X", vec!["B", "A", "C"]),
            ("Y", vec!["A", "B", "C"]),
            ("Z", vec!["A", "B", "C"]),
        ]);
        StableMarriage::from_preferences(&suitors, &reviewers, GameOptions::default()).unwrap()
    }

    fn random_game(rng: &mut StdRng, size: usize) -> StableMarriage {
        let suitors: Vec<Player<ReviewerIndex>> = (0..size)
            .map(|i| {
                let mut ranking: Vec<ReviewerIndex> = ReviewerIndex::range(size).collect();
                ranking.shuffle(rng);
                Player::with_preferences(format!("S{}", i), ranking)
            })
            .collect();
        let reviewers: Vec<Player<SuitorIndex>> = (0..size)
            .map(|i| {
                let mut ranking: Vec<SuitorIndex> = SuitorIndex::range(size).collect();
                ranking.shuffle(rng);
                Player::with_preferences(format!("R{}", i), ranking)
            })
            .collect();
        StableMarriage::new(&suitors, &reviewers, GameOptions::default()).unwrap()
    }

    #[test]
    fn test_suitor_optimal_example() {
        let mut game = example();
        game.solve(MarriageOptimal::Suitor).unwrap();
        let record = game.to_record().unwrap();
        assert_eq!(record.to_string(), "{A: X, B: Y, C: Z}");
        assert!(game.check_validity().is_ok());
        assert!(game.check_stability());
    }

    #[test]
    fn test_reviewer_optimal_example() {
        let mut game = example();
        game.solve(MarriageOptimal::Reviewer).unwrap();
        let record = game.to_record().unwrap();
        assert_eq!(record.to_string(), "{A: Y, B: X, C: Z}");
        assert!(game.check_validity().is_ok());
        assert!(game.check_stability());
    }

    #[test]
    fn test_unequal_parties_are_fatal() {
        let suitors = PreferenceTable::from([("A", vec!["X"]), ("B", vec!["X"])]);
        let reviewers = PreferenceTable::from([("X", vec!["A", "B"])]);
        let error = StableMarriage::from_preferences(&suitors, &reviewers, GameOptions::default())
            .unwrap_err();
        assert!(matches!(error, GameError::UnequalPartySizes { .. }));
    }

    #[test]
    fn test_incomplete_rankings_are_fatal_even_when_clean() {
        let suitors = PreferenceTable::from([("A", vec!["X"]), ("B", vec!["Y", "X"])]);
        let reviewers = PreferenceTable::from([("X", vec!["A", "B"]), ("Y", vec!["B", "A"])]);
        let error = StableMarriage::from_preferences(
            &suitors,
            &reviewers,
            GameOptions::new().clean(true),
        )
        .unwrap_err();
        assert_eq!(
            error,
            GameError::IncompletePreferences {
                player: "A".into(),
                party: "reviewers"
            }
        );
    }

    #[test]
    fn test_unknown_names_are_fatal() {
        let suitors = PreferenceTable::from([("A", vec!["Q"])]);
        let reviewers = PreferenceTable::from([("X", vec!["A"])]);
        let error = StableMarriage::from_preferences(&suitors, &reviewers, GameOptions::default())
            .unwrap_err();
        assert!(matches!(error, GameError::Load(_)));
    }

    #[test]
    fn test_validity_before_solving() {
        let game = example();
        let error = game.check_validity().unwrap_err();
        assert_eq!(error.issues(), &[ValidityIssue::NotSolved]);
        assert!(game.matching().is_none());
    }

    #[test]
    fn test_manual_matching_can_be_unstable() {
        let mut game = example();
        game.solve(MarriageOptimal::Suitor).unwrap();
        // Swapping A and B gives the reviewer-optimal matching, which is stable too.
        game.set_match(SuitorIndex::new(0), Some(ReviewerIndex::new(1)))
            .unwrap();
        game.set_match(SuitorIndex::new(1), Some(ReviewerIndex::new(0)))
            .unwrap();
        assert!(game.check_validity().is_ok());
        assert!(game.check_stability());

        game.set_match(SuitorIndex::new(2), Some(ReviewerIndex::new(0)))
            .unwrap();
        let error = game.check_validity().unwrap_err();
        assert!(
            error
                .issues()
                .iter()
                .any(|issue| matches!(issue, ValidityIssue::Unmatched { .. }))
        );
        assert!(!game.check_stability());
        assert!(!game.blocking_pairs().is_empty());
    }

    #[test]
    fn test_out_of_range_update_is_refused() {
        let mut game = example();
        let error = game
            .set_match(SuitorIndex::new(7), Some(ReviewerIndex::new(0)))
            .unwrap_err();
        assert!(matches!(error, GameError::Update(_)));
    }

    #[test]
    fn test_random_instances_are_stable_and_side_optimal() {
        let mut rng = StdRng::seed_from_u64(7);
        for size in [1, 2, 5, 12, 30] {
            let mut game = random_game(&mut rng, size);
            let suitor_side = game.solve(MarriageOptimal::Suitor).unwrap().clone();
            assert!(game.check_validity().is_ok());
            assert!(game.check_stability());

            let reviewer_side = game.solve(MarriageOptimal::Reviewer).unwrap().clone();
            assert!(game.check_validity().is_ok());
            assert!(game.check_stability());

            for (suitor, player) in game.suitors().iter().enumerate() {
                let s = SuitorIndex::new(suitor);
                let (Some(best), Some(worst)) = (suitor_side.get(s), reviewer_side.get(s)) else {
                    panic!("suitor {} left unmatched", suitor);
                };
                assert!(best == worst || player.prefers(best, worst));
            }
        }
    }

    #[test]
    fn test_solving_is_deterministic_and_leaves_input_alone() {
        let mut rng = StdRng::seed_from_u64(11);
        let game = random_game(&mut rng, 15);
        let suitors = game.suitors().to_vec();

        let mut first = game.clone();
        let mut second = game.clone();
        let a = first.solve(MarriageOptimal::Suitor).unwrap().clone();
        let b = second.solve(MarriageOptimal::Suitor).unwrap().clone();
        assert_eq!(a, b);
        assert_eq!(first.suitors(), suitors.as_slice());
        assert!(first.suitors().iter().all(|suitor| suitor.partner().is_none()));
    }
}
