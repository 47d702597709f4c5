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

//! Hospital-resident: residents take one place, hospitals have capacities.
//!
//! Input problems are reported as diagnostics. Outside clean mode they are
//! left for the engines to cope with: an unreturned ranking is rejected
//! during the solve, a zero-capacity hospital rejects everyone. In clean mode
//! the game repairs them first; players that end up with nothing to rank are
//! excluded and left out of every check and of the record.

use crate::{
    blocking::{prefers_to_current, ranked_once, worst_of},
    diagnostics::Diagnostics,
    error::{GameError, MatchingError, ValidityIssue, into_result},
    options::GameOptions,
    sanitize::{
        names, prune_two_sided, report_empty, report_non_reciprocal, screen_capacities,
        screen_duplicates, screen_unknown,
    },
};
use accord_engine::{
    deferred_acceptance::propose_and_reject,
    hospital_resident::hospital_optimal,
    market::BipartiteMarket,
    monitor::{
        no_op::NoOperationMonitor,
        solve_monitor::{Algorithm, SolveMonitor},
    },
    session::SolveSession,
    stats::EngineStatistics,
};
use accord_model::{
    capacitated::CapacitatedPlayer,
    index::{HospitalIndex, ResidentIndex},
    loading::{NameIndex, PreferenceTable, keyed, load_capacitated, load_players},
    matching::MultipleMatching,
    player::Player,
    record::MatchingRecord,
};
use fixedbitset::FixedBitSet;

/// The party whose outcome a solve optimises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HospitalResidentOptimal {
    #[default]
    Resident,
    Hospital,
}

impl HospitalResidentOptimal {
    #[inline]
    fn algorithm(self) -> Algorithm {
        match self {
            HospitalResidentOptimal::Resident => Algorithm::ResidentOptimal,
            HospitalResidentOptimal::Hospital => Algorithm::HospitalOptimal,
        }
    }
}

#[derive(Debug, Clone)]
struct Solution {
    residents: Vec<Player<HospitalIndex>>,
    hospitals: Vec<CapacitatedPlayer<ResidentIndex>>,
    matching: MultipleMatching<HospitalIndex, ResidentIndex>,
    statistics: EngineStatistics,
    blocking_pairs: Vec<(ResidentIndex, HospitalIndex)>,
}

/// A hospital-resident instance.
#[derive(Debug, Clone)]
pub struct HospitalResident {
    residents: Vec<Player<HospitalIndex>>,
    hospitals: Vec<CapacitatedPlayer<ResidentIndex>>,
    excluded_residents: FixedBitSet,
    excluded_hospitals: FixedBitSet,
    options: GameOptions,
    diagnostics: Diagnostics,
    solution: Option<Solution>,
}

impl HospitalResident {
    /// Builds a game from ranked players; the players are cloned and then
    /// screened.
    pub fn new(
        residents: &[Player<HospitalIndex>],
        hospitals: &[CapacitatedPlayer<ResidentIndex>],
        options: GameOptions,
    ) -> Result<Self, GameError> {
        let mut residents = residents.to_vec();
        let mut hospitals = hospitals.to_vec();
        let mut excluded_residents = FixedBitSet::with_capacity(residents.len());
        let mut excluded_hospitals = FixedBitSet::with_capacity(hospitals.len());
        let mut diagnostics = Diagnostics::new();
        let clean = options.is_clean();

        screen_unknown(&mut residents, "hospital", hospitals.len(), clean, &mut diagnostics)?;
        screen_unknown(&mut hospitals, "resident", residents.len(), clean, &mut diagnostics)?;
        screen_duplicates(&mut residents, &names(&hospitals), clean, &mut diagnostics);
        screen_duplicates(&mut hospitals, &names(&residents), clean, &mut diagnostics);
        screen_capacities(&hospitals, &mut excluded_hospitals, clean, &mut diagnostics);
        report_non_reciprocal(&residents, &hospitals, clean, &mut diagnostics);
        report_non_reciprocal(&hospitals, &residents, clean, &mut diagnostics);

        if clean {
            prune_two_sided(
                &mut residents,
                &mut excluded_residents,
                &mut hospitals,
                &mut excluded_hospitals,
                &mut diagnostics,
            );
        } else {
            report_empty(&residents, &mut diagnostics);
            report_empty(&hospitals, &mut diagnostics);
        }

        Ok(Self {
            residents,
            hospitals,
            excluded_residents,
            excluded_hospitals,
            options,
            diagnostics,
            solution: None,
        })
    }

    /// Builds a game from name-keyed rankings and hospital capacities.
    pub fn from_preferences<K, C>(
        residents: &PreferenceTable,
        hospitals: &PreferenceTable,
        capacities: C,
        options: GameOptions,
    ) -> Result<Self, GameError>
    where
        K: Into<String>,
        C: IntoIterator<Item = (K, usize)>,
    {
        let resident_names = NameIndex::<ResidentIndex>::from_table("resident", residents)?;
        let hospital_names = NameIndex::<HospitalIndex>::from_table("hospital", hospitals)?;
        let capacities = keyed(capacities);
        let residents = load_players(residents, &hospital_names)?;
        let hospitals = load_capacitated(hospitals, &resident_names, &capacities)?;
        Self::new(&residents, &hospitals, options)
    }

    /// Residents after screening.
    #[inline]
    pub fn residents(&self) -> &[Player<HospitalIndex>] {
        &self.residents
    }

    /// Hospitals after screening.
    #[inline]
    pub fn hospitals(&self) -> &[CapacitatedPlayer<ResidentIndex>] {
        &self.hospitals
    }

    #[inline]
    pub fn is_resident_excluded(&self, resident: ResidentIndex) -> bool {
        self.excluded_residents.contains(resident.get())
    }

    #[inline]
    pub fn is_hospital_excluded(&self, hospital: HospitalIndex) -> bool {
        self.excluded_hospitals.contains(hospital.get())
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
    pub fn matching(&self) -> Option<&MultipleMatching<HospitalIndex, ResidentIndex>> {
        self.solution.as_ref().map(|solution| &solution.matching)
    }

    #[inline]
    pub fn statistics(&self) -> Option<&EngineStatistics> {
        self.solution.as_ref().map(|solution| &solution.statistics)
    }

    pub fn solve(
        &mut self,
        optimal: HospitalResidentOptimal,
    ) -> Result<&MultipleMatching<HospitalIndex, ResidentIndex>, GameError> {
        let mut monitor = NoOperationMonitor::new();
        self.solve_with_monitor(optimal, &mut monitor)
    }

    /// Solves a fresh copy of the game, reporting engine events to `monitor`.
    pub fn solve_with_monitor(
        &mut self,
        optimal: HospitalResidentOptimal,
        monitor: &mut dyn SolveMonitor,
    ) -> Result<&MultipleMatching<HospitalIndex, ResidentIndex>, GameError> {
        let mut residents = self.residents.clone();
        let mut hospitals = self.hospitals.clone();

        let mut session = SolveSession::new(optimal.algorithm(), monitor);
        match optimal {
            HospitalResidentOptimal::Resident => propose_and_reject(
                &mut BipartiteMarket::<ResidentIndex, HospitalIndex, _, _>::new(
                    &mut residents,
                    &mut hospitals,
                ),
                &mut session,
            ),
            HospitalResidentOptimal::Hospital => {
                hospital_optimal(&mut residents, &mut hospitals, &mut session)
            }
        }
        let statistics = session.finish();
        ::log::debug!("{} finished\n{}", optimal.algorithm(), statistics);

        let mut matching = MultipleMatching::new(hospitals.len(), residents.len());
        for (index, hospital) in hospitals.iter().enumerate() {
            matching.set(HospitalIndex::new(index), hospital.matches().to_vec())?;
        }

        let solution = self.solution.insert(Solution {
            residents,
            hospitals,
            matching,
            statistics,
            blocking_pairs: Vec::new(),
        });
        Ok(&solution.matching)
    }

    fn solution_mut(&mut self) -> &mut Solution {
        self.solution.get_or_insert_with(|| Solution {
            residents: self.residents.clone(),
            hospitals: self.hospitals.clone(),
            matching: MultipleMatching::new(self.hospitals.len(), self.residents.len()),
            statistics: EngineStatistics::default(),
            blocking_pairs: Vec::new(),
        })
    }

    /// Moves `resident` to `hospital` (or unmatches it).
    pub fn set_match(
        &mut self,
        resident: ResidentIndex,
        hospital: Option<HospitalIndex>,
    ) -> Result<(), GameError> {
        let solution = self.solution_mut();
        solution.matching.assign(resident, hospital)?;
        solution.sync_players();
        Ok(())
    }

    /// Replaces the residents held by `hospital`.
    pub fn set_matches(
        &mut self,
        hospital: HospitalIndex,
        residents: Vec<ResidentIndex>,
    ) -> Result<(), GameError> {
        let solution = self.solution_mut();
        solution.matching.set(hospital, residents)?;
        solution.sync_players();
        Ok(())
    }

    /// Checks capacities, agreement between the players and the matching,
    /// and that every pair is mutually acceptable. Unmatched residents are
    /// allowed.
    pub fn check_validity(&self) -> Result<(), MatchingError> {
        let Some(solution) = &self.solution else {
            return into_result(vec![ValidityIssue::NotSolved]);
        };
        let mut issues = Vec::new();

        for (index, resident) in solution.residents.iter().enumerate() {
            if self.excluded_residents.contains(index) {
                continue;
            }
            let me = ResidentIndex::new(index);
            let held_by = solution.matching.key_of(me);
            if resident.partner() != held_by {
                issues.push(ValidityIssue::Inconsistent {
                    player: resident.name().to_string(),
                    partner: held_by.map_or_else(
                        || "-".to_string(),
                        |h| solution.hospitals[h.get()].name().to_string(),
                    ),
                });
            }
            if let Some(h) = held_by {
                let hospital = &solution.hospitals[h.get()];
                if !resident.preferences().ranks(h) {
                    issues.push(ValidityIssue::Unacceptable {
                        player: resident.name().to_string(),
                        partner: hospital.name().to_string(),
                    });
                }
                if !hospital.preferences().ranks(me) {
                    issues.push(ValidityIssue::Unacceptable {
                        player: hospital.name().to_string(),
                        partner: resident.name().to_string(),
                    });
                }
            }
        }

        for (index, hospital) in solution.hospitals.iter().enumerate() {
            if self.excluded_hospitals.contains(index) {
                continue;
            }
            let held = solution.matching.get(HospitalIndex::new(index));
            let agrees = held.len() == hospital.matches().len()
                && held.iter().all(|&r| hospital.is_matched_with(r));
            if !agrees {
                issues.push(ValidityIssue::Inconsistent {
                    player: hospital.name().to_string(),
                    partner: held
                        .iter()
                        .map(|r| solution.residents[r.get()].name())
                        .collect::<Vec<_>>()
                        .join(", "),
                });
            }
            if held.len() > hospital.capacity() {
                issues.push(ValidityIssue::CapacityExceeded {
                    player: hospital.name().to_string(),
                    capacity: hospital.capacity(),
                    matched: held.len(),
                });
            }
        }

        into_result(issues)
    }

    /// Resident-hospital pairs that rank each other, where the resident would
    /// rather be at the hospital and the hospital has a free place or would
    /// drop its worst resident for this one.
    pub fn find_blocking_pairs(&self) -> Vec<(ResidentIndex, HospitalIndex)> {
        let Some(solution) = &self.solution else {
            return Vec::new();
        };
        let matching = &solution.matching;
        let mut pairs = Vec::new();
        for (index, resident) in solution.residents.iter().enumerate() {
            if self.excluded_residents.contains(index) {
                continue;
            }
            let r = ResidentIndex::new(index);
            let current = matching.key_of(r);
            for h in ranked_once(resident.preferences(), solution.hospitals.len()) {
                if current == Some(h)
                    || self.excluded_hospitals.contains(h.get())
                    || !prefers_to_current(resident.preferences(), h, current)
                {
                    continue;
                }
                let hospital = &solution.hospitals[h.get()];
                if !hospital.preferences().ranks(r) {
                    continue;
                }
                let held = matching.get(h);
                let wants = held.len() < hospital.capacity()
                    || worst_of(hospital.preferences(), held)
                        .is_some_and(|worst| hospital.prefers(r, worst));
                if wants {
                    pairs.push((r, h));
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
    pub fn blocking_pairs(&self) -> &[(ResidentIndex, HospitalIndex)] {
        self.solution
            .as_ref()
            .map_or(&[], |solution| solution.blocking_pairs.as_slice())
    }

    /// The matching by name, keyed by hospital; excluded hospitals are left out.
    pub fn to_record(&self) -> Option<MatchingRecord> {
        self.solution.as_ref().map(|solution| {
            solution.matching.to_record(
                |h| {
                    (!self.excluded_hospitals.contains(h.get()))
                        .then(|| self.hospitals[h.get()].name())
                },
                |r| self.residents[r.get()].name(),
            )
        })
    }
}

impl Solution {
    /// Rewrites every player's match state from the matching.
    fn sync_players(&mut self) {
        for (index, resident) in self.residents.iter_mut().enumerate() {
            match self.matching.key_of(ResidentIndex::new(index)) {
                Some(hospital) => resident.match_with(hospital),
                None => resident.unmatch(),
            }
        }
        for (index, hospital) in self.hospitals.iter_mut().enumerate() {
            hospital.clear_matches();
            for &resident in self.matching.get(HospitalIndex::new(index)) {
                hospital.match_with(resident);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::Diagnostic;
    use rand::{Rng, SeedableRng, rngs::StdRng, seq::SliceRandom};

    fn example() -> HospitalResident {
        let residents = PreferenceTable::from([
            ("A", vec!["X", "Y"]),
            ("B", vec!["Y", "X"]),
            ("C", vec!["X", "Y"]),
        ]);
        let hospitals =
            PreferenceTable::from([("X", vec!["A", "C", "B"]), ("Y", vec!["B", "A", "C"])]);
        HospitalResident::from_preferences(
            &residents,
            &hospitals,
            [("X", 2), ("Y", 1)],
            GameOptions::default(),
        )
        .unwrap()
    }

    fn random_game(rng: &mut StdRng, residents: usize, hospitals: usize) -> HospitalResident {
        let resident_players: Vec<Player<HospitalIndex>> = (0..residents)
            .map(|i| {
                let mut ranking: Vec<HospitalIndex> = HospitalIndex::range(hospitals).collect();
                ranking.shuffle(rng);
                ranking.truncate(rng.random_range(1..=hospitals));
                Player::with_preferences(format!("R{}", i), ranking)
            })
            .collect();
        let hospital_players: Vec<CapacitatedPlayer<ResidentIndex>> = (0..hospitals)
            .map(|h| {
                let mut ranking: Vec<ResidentIndex> = ResidentIndex::range(residents)
                    .filter(|r| {
                        resident_players[r.get()]
                            .preferences()
                            .ranks(HospitalIndex::new(h))
                    })
                    .collect();
                ranking.shuffle(rng);
                let capacity = rng.random_range(1..=3);
                CapacitatedPlayer::with_preferences(format!("H{}", h), capacity, ranking)
            })
            .collect();
        HospitalResident::new(&resident_players, &hospital_players, GameOptions::default()).unwrap()
    }

    #[test]
    fn test_resident_optimal_example() {
        let mut game = example();
        game.solve(HospitalResidentOptimal::Resident).unwrap();
        assert_eq!(game.to_record().unwrap().to_string(), "{X: [A, C], Y: [B]}");
        assert!(game.check_validity().is_ok());
        assert!(game.check_stability());
        assert!(game.diagnostics().is_empty());
    }

    #[test]
    fn test_hospital_optimal_example() {
        let mut game = example();
        game.solve(HospitalResidentOptimal::Hospital).unwrap();
        assert_eq!(game.to_record().unwrap().to_string(), "{X: [A, C], Y: [B]}");
        assert!(game.check_validity().is_ok());
        assert!(game.check_stability());
    }

    #[test]
    fn test_missing_capacity_is_fatal() {
        let residents = PreferenceTable::from([("A", vec!["X"])]);
        let hospitals = PreferenceTable::from([("X", vec!["A"])]);
        let error = HospitalResident::from_preferences(
            &residents,
            &hospitals,
            Vec::<(String, usize)>::new(),
            GameOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(error, GameError::Load(_)));
    }

    #[test]
    fn test_problems_are_reported_without_clean() {
        let residents = PreferenceTable::from([("A", vec!["X", "Y"]), ("B", vec!["X", "X"])]);
        let hospitals = PreferenceTable::from([("X", vec!["A"]), ("Y", vec!["A"])]);
        let mut game = HospitalResident::from_preferences(
            &residents,
            &hospitals,
            [("X", 1), ("Y", 0)],
            GameOptions::default(),
        )
        .unwrap();

        let diagnostics = game.diagnostics().as_slice();
        assert!(diagnostics.iter().all(|diagnostic| !diagnostic.is_repaired()));
        assert!(diagnostics.contains(&Diagnostic::DuplicateRanking {
            player: "B".into(),
            entry: "X".into(),
            repaired: false,
        }));
        assert!(diagnostics.contains(&Diagnostic::InvalidCapacity {
            player: "Y".into(),
            capacity: 0,
            repaired: false,
        }));
        assert!(diagnostics.contains(&Diagnostic::NonReciprocalRanking {
            player: "B".into(),
            entry: "X".into(),
            repaired: false,
        }));

        game.solve(HospitalResidentOptimal::Resident).unwrap();
        assert_eq!(game.to_record().unwrap().to_string(), "{X: [A], Y: []}");
        assert!(game.check_validity().is_ok());
        assert!(game.check_stability());
    }

    #[test]
    fn test_clean_mode_excludes_and_prunes() {
        let residents = PreferenceTable::from([
            ("A", vec!["X", "Y"]),
            ("B", vec!["Y"]),
            ("C", Vec::<&str>::new()),
        ]);
        let hospitals = PreferenceTable::from([("X", vec!["A", "B"]), ("Y", vec!["A", "B"])]);
        let mut game = HospitalResident::from_preferences(
            &residents,
            &hospitals,
            [("X", 1), ("Y", 0)],
            GameOptions::new().clean(true),
        )
        .unwrap();

        assert!(game.is_hospital_excluded(HospitalIndex::new(1)));
        assert!(game.is_resident_excluded(ResidentIndex::new(1)));
        assert!(game.is_resident_excluded(ResidentIndex::new(2)));
        assert_eq!(game.residents()[0].preferences().working(), &[HospitalIndex::new(0)]);
        assert_eq!(game.hospitals()[0].preferences().working(), &[ResidentIndex::new(0)]);
        assert!(game.diagnostics().iter().all(|diagnostic| diagnostic.is_repaired()));

        game.solve(HospitalResidentOptimal::Hospital).unwrap();
        assert_eq!(game.to_record().unwrap().to_string(), "{X: [A]}");
        assert!(game.check_validity().is_ok());
        assert!(game.check_stability());
    }

    #[test]
    fn test_unknown_index_is_fatal_unless_clean() {
        let residents = vec![Player::with_preferences("A", vec![HospitalIndex::new(3)])];
        let hospitals = vec![CapacitatedPlayer::with_preferences(
            "X",
            1,
            vec![ResidentIndex::new(0)],
        )];
        assert!(matches!(
            HospitalResident::new(&residents, &hospitals, GameOptions::default()),
            Err(GameError::UnknownPlayer { index: 3, .. })
        ));
        let game =
            HospitalResident::new(&residents, &hospitals, GameOptions::new().clean(true)).unwrap();
        assert!(game.is_resident_excluded(ResidentIndex::new(0)));
        assert!(game.is_hospital_excluded(HospitalIndex::new(0)));
    }

    #[test]
    fn test_repeated_ranking_keeps_both_directions_stable() {
        let h = HospitalIndex::new;
        let residents = vec![Player::with_preferences("R0", vec![h(0), h(1), h(0)])];
        let hospitals = vec![
            CapacitatedPlayer::with_preferences("Y", 1, vec![ResidentIndex::new(0)]),
            CapacitatedPlayer::with_preferences("X", 1, vec![ResidentIndex::new(0)]),
        ];
        let mut game =
            HospitalResident::new(&residents, &hospitals, GameOptions::default()).unwrap();
        assert!(game.diagnostics().as_slice().contains(&Diagnostic::DuplicateRanking {
            player: "R0".into(),
            entry: "Y".into(),
            repaired: false,
        }));

        for optimal in [HospitalResidentOptimal::Resident, HospitalResidentOptimal::Hospital] {
            game.solve(optimal).unwrap();
            assert_eq!(game.to_record().unwrap().to_string(), "{Y: [R0], X: []}");
            assert!(game.check_validity().is_ok());
            assert!(game.check_stability());
        }

        game.set_match(ResidentIndex::new(0), Some(h(1))).unwrap();
        assert!(!game.check_stability());
        assert_eq!(game.blocking_pairs(), &[(ResidentIndex::new(0), h(0))]);
    }

    #[test]
    fn test_clean_unknown_entry_is_ignored_by_stability() {
        let residents = vec![Player::with_preferences(
            "A",
            vec![HospitalIndex::new(5), HospitalIndex::new(0)],
        )];
        let hospitals = vec![CapacitatedPlayer::with_preferences(
            "X",
            1,
            vec![ResidentIndex::new(0)],
        )];
        let mut game =
            HospitalResident::new(&residents, &hospitals, GameOptions::new().clean(true)).unwrap();
        game.solve(HospitalResidentOptimal::Resident).unwrap();
        assert_eq!(game.to_record().unwrap().to_string(), "{X: [A]}");
        assert!(game.check_stability());
    }

    #[test]
    fn test_manual_overfill_is_invalid() {
        let mut game = example();
        game.solve(HospitalResidentOptimal::Resident).unwrap();
        game.set_match(ResidentIndex::new(1), Some(HospitalIndex::new(0)))
            .unwrap();
        let error = game.check_validity().unwrap_err();
        assert_eq!(
            error.issues(),
            &[ValidityIssue::CapacityExceeded {
                player: "X".into(),
                capacity: 2,
                matched: 3,
            }]
        );
        // Y is now empty and B would rather be there.
        assert!(!game.check_stability());
        assert_eq!(
            game.blocking_pairs(),
            &[(ResidentIndex::new(1), HospitalIndex::new(1))]
        );
    }

    #[test]
    fn test_random_instances() {
        let mut rng = StdRng::seed_from_u64(19);
        for _ in 0..25 {
            let residents = rng.random_range(1..=30);
            let hospitals = rng.random_range(1..=8);
            let mut game = random_game(&mut rng, residents, hospitals);

            let resident_side = game.solve(HospitalResidentOptimal::Resident).unwrap().clone();
            assert!(game.check_validity().is_ok());
            assert!(game.check_stability());

            let hospital_side = game.solve(HospitalResidentOptimal::Hospital).unwrap().clone();
            assert!(game.check_validity().is_ok());
            assert!(game.check_stability());

            for (index, resident) in game.residents().iter().enumerate() {
                let r = ResidentIndex::new(index);
                match (resident_side.key_of(r), hospital_side.key_of(r)) {
                    (Some(best), Some(worst)) => {
                        assert!(best == worst || resident.prefers(best, worst))
                    }
                    (None, Some(_)) => panic!("resident {} lost its place", index),
                    _ => {}
                }
            }
            assert!(game.residents().iter().all(|resident| resident.partner().is_none()));
        }
    }
}
