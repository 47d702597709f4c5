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

//! Student allocation: students are placed on projects, and every place also
//! counts against the supervisor that owns the project.
//!
//! Construction copies the caller's players, rebuilds the projects from their
//! name, capacity and owner, and derives each project's ranking from its
//! supervisor: the supervisor's ranking restricted to students that rank the
//! project. Rankings supplied on projects are not consulted.
//!
//! In clean mode, pruning runs to a fixpoint across all three parties: a
//! student keeps a project only if its supervisor ranks the student, a
//! supervisor keeps a student only if the student ranks one of its projects,
//! and a project nobody ranks is excluded along with every player left with
//! nothing to rank.

use crate::{
    blocking::{prefers_to_current, ranked_once, worst_of},
    diagnostics::{Diagnostic, Diagnostics},
    error::{GameError, MatchingError, ValidityIssue, into_result},
    options::GameOptions,
    sanitize::{
        exclude_empty, names, report_empty, screen_capacities, screen_duplicates, screen_unknown,
    },
};
use accord_engine::{
    monitor::{
        no_op::NoOperationMonitor,
        solve_monitor::{Algorithm, SolveMonitor},
    },
    session::SolveSession,
    stats::EngineStatistics,
    student_allocation::{Allocation, student_optimal, supervisor_optimal},
};
use accord_model::{
    hierarchy::{Project, Supervisor},
    index::{ProjectIndex, StudentIndex, SupervisorIndex},
    loading::{
        NameIndex, PreferenceTable, keyed, load_players, load_projects, load_supervisors,
    },
    matching::MultipleMatching,
    player::Player,
    record::MatchingRecord,
};
use fixedbitset::FixedBitSet;

/// The party whose outcome a solve optimises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AllocationOptimal {
    #[default]
    Student,
    Supervisor,
}

impl AllocationOptimal {
    #[inline]
    fn algorithm(self) -> Algorithm {
        match self {
            AllocationOptimal::Student => Algorithm::StudentOptimal,
            AllocationOptimal::Supervisor => Algorithm::SupervisorOptimal,
        }
    }
}

#[derive(Debug, Clone)]
struct Solution {
    students: Vec<Player<ProjectIndex>>,
    projects: Vec<Project>,
    supervisors: Vec<Supervisor>,
    matching: MultipleMatching<ProjectIndex, StudentIndex>,
    statistics: EngineStatistics,
    blocking_pairs: Vec<(StudentIndex, ProjectIndex)>,
}

/// Exclusion tombstones for the three parties.
#[derive(Debug, Clone)]
struct Excluded {
    students: FixedBitSet,
    projects: FixedBitSet,
    supervisors: FixedBitSet,
}

/// A student allocation instance.
#[derive(Debug, Clone)]
pub struct StudentAllocation {
    students: Vec<Player<ProjectIndex>>,
    projects: Vec<Project>,
    supervisors: Vec<Supervisor>,
    excluded: Excluded,
    options: GameOptions,
    diagnostics: Diagnostics,
    solution: Option<Solution>,
}

impl StudentAllocation {
    /// Builds a game from ranked students and supervisors and the projects
    /// they share.
    ///
    /// # Errors
    ///
    /// Fails if a project names a supervisor outside `supervisors`, or if a
    /// ranking points outside its party while clean mode is off.
    pub fn new(
        students: &[Player<ProjectIndex>],
        projects: &[Project],
        supervisors: &[Supervisor],
        options: GameOptions,
    ) -> Result<Self, GameError> {
        let mut students = students.to_vec();
        let mut supervisors = supervisors.to_vec();
        for supervisor in &mut supervisors {
            supervisor.detach_projects();
        }
        let mut projects = rebuild_projects(projects, &mut supervisors)?;

        let mut excluded = Excluded {
            students: FixedBitSet::with_capacity(students.len()),
            projects: FixedBitSet::with_capacity(projects.len()),
            supervisors: FixedBitSet::with_capacity(supervisors.len()),
        };
        let mut diagnostics = Diagnostics::new();
        let clean = options.is_clean();

        screen_unknown(&mut students, "project", projects.len(), clean, &mut diagnostics)?;
        screen_unknown(&mut supervisors, "student", students.len(), clean, &mut diagnostics)?;
        screen_duplicates(&mut students, &names(&projects), clean, &mut diagnostics);
        screen_duplicates(&mut supervisors, &names(&students), clean, &mut diagnostics);
        screen_capacities(&projects, &mut excluded.projects, clean, &mut diagnostics);
        screen_capacities(&supervisors, &mut excluded.supervisors, clean, &mut diagnostics);
        report_non_reciprocal(&students, &projects, &supervisors, clean, &mut diagnostics);

        if clean {
            prune(&mut students, &projects, &mut supervisors, &mut excluded, &mut diagnostics);
        } else {
            report_empty(&students, &mut diagnostics);
            report_empty(&supervisors, &mut diagnostics);
        }
        cap_capacities(&mut projects, &mut supervisors, &excluded, clean, &mut diagnostics);
        derive_project_rankings(&students, &mut projects, &supervisors, &excluded);

        Ok(Self {
            students,
            projects,
            supervisors,
            excluded,
            options,
            diagnostics,
            solution: None,
        })
    }

    /// Builds a game from name-keyed rankings.
    ///
    /// Projects are given as `(name, capacity)` pairs in arena order, each
    /// owned by the supervisor `owners` names for it.
    pub fn from_preferences<P, O, C, KP, KO, VO, KC>(
        students: &PreferenceTable,
        supervisors: &PreferenceTable,
        projects: P,
        owners: O,
        supervisor_capacities: C,
        options: GameOptions,
    ) -> Result<Self, GameError>
    where
        P: IntoIterator<Item = (KP, usize)>,
        O: IntoIterator<Item = (KO, VO)>,
        C: IntoIterator<Item = (KC, usize)>,
        KP: Into<String>,
        KO: Into<String>,
        VO: Into<String>,
        KC: Into<String>,
    {
        let student_names = NameIndex::<StudentIndex>::from_table("student", students)?;
        let supervisor_names = NameIndex::from_table("supervisor", supervisors)?;
        let projects: Vec<(String, usize)> = projects
            .into_iter()
            .map(|(name, capacity)| (name.into(), capacity))
            .collect();
        let owners = keyed(owners.into_iter().map(|(project, owner)| (project, owner.into())));

        let (project_names, projects) = load_projects(&projects, &owners, &supervisor_names)?;
        let students = load_players(students, &project_names)?;
        let supervisors =
            load_supervisors(supervisors, &student_names, &keyed(supervisor_capacities))?;
        Self::new(&students, &projects, &supervisors, options)
    }

    #[inline]
    pub fn students(&self) -> &[Player<ProjectIndex>] {
        &self.students
    }

    /// Projects as rebuilt by the game, with derived rankings.
    #[inline]
    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    #[inline]
    pub fn supervisors(&self) -> &[Supervisor] {
        &self.supervisors
    }

    #[inline]
    pub fn is_student_excluded(&self, student: StudentIndex) -> bool {
        self.excluded.students.contains(student.get())
    }

    #[inline]
    pub fn is_project_excluded(&self, project: ProjectIndex) -> bool {
        self.excluded.projects.contains(project.get())
    }

    #[inline]
    pub fn is_supervisor_excluded(&self, supervisor: SupervisorIndex) -> bool {
        self.excluded.supervisors.contains(supervisor.get())
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
    pub fn matching(&self) -> Option<&MultipleMatching<ProjectIndex, StudentIndex>> {
        self.solution.as_ref().map(|solution| &solution.matching)
    }

    #[inline]
    pub fn statistics(&self) -> Option<&EngineStatistics> {
        self.solution.as_ref().map(|solution| &solution.statistics)
    }

    pub fn solve(
        &mut self,
        optimal: AllocationOptimal,
    ) -> Result<&MultipleMatching<ProjectIndex, StudentIndex>, GameError> {
        let mut monitor = NoOperationMonitor::new();
        self.solve_with_monitor(optimal, &mut monitor)
    }

    /// Solves a fresh copy of the game, reporting engine events to `monitor`.
    pub fn solve_with_monitor(
        &mut self,
        optimal: AllocationOptimal,
        monitor: &mut dyn SolveMonitor,
    ) -> Result<&MultipleMatching<ProjectIndex, StudentIndex>, GameError> {
        let mut students = self.students.clone();
        let mut projects = self.projects.clone();
        let mut supervisors = self.supervisors.clone();

        let mut session = SolveSession::new(optimal.algorithm(), monitor);
        {
            let mut allocation = Allocation::new(&mut students, &mut projects, &mut supervisors);
            match optimal {
                AllocationOptimal::Student => student_optimal(&mut allocation, &mut session),
                AllocationOptimal::Supervisor => supervisor_optimal(&mut allocation, &mut session),
            }
        }
        let statistics = session.finish();
        ::log::debug!("{} finished\n{}", optimal.algorithm(), statistics);

        let mut matching = MultipleMatching::new(projects.len(), students.len());
        for (index, project) in projects.iter().enumerate() {
            matching.set(ProjectIndex::new(index), project.party().matches().to_vec())?;
        }

        let solution = self.solution.insert(Solution {
            students,
            projects,
            supervisors,
            matching,
            statistics,
            blocking_pairs: Vec::new(),
        });
        Ok(&solution.matching)
    }

    /// Moves `student` to `project` (or unmatches it).
    ///
    /// On an unsolved game this starts from an empty matching.
    pub fn set_match(
        &mut self,
        student: StudentIndex,
        project: Option<ProjectIndex>,
    ) -> Result<(), GameError> {
        let solution = self.solution.get_or_insert_with(|| Solution {
            students: self.students.clone(),
            projects: self.projects.clone(),
            supervisors: self.supervisors.clone(),
            matching: MultipleMatching::new(self.projects.len(), self.students.len()),
            statistics: EngineStatistics::default(),
            blocking_pairs: Vec::new(),
        });
        solution.matching.assign(student, project)?;
        solution.sync_players();
        Ok(())
    }

    /// Checks project and supervisor capacities, agreement between the
    /// players and the matching, and that each student ranks its project and
    /// is ranked by the project's supervisor.
    pub fn check_validity(&self) -> Result<(), MatchingError> {
        let Some(solution) = &self.solution else {
            return into_result(vec![ValidityIssue::NotSolved]);
        };
        let matching = &solution.matching;
        let mut issues = Vec::new();

        for (index, student) in solution.students.iter().enumerate() {
            if self.excluded.students.contains(index) {
                continue;
            }
            let me = StudentIndex::new(index);
            let held_by = matching.key_of(me);
            if student.partner() != held_by {
                issues.push(ValidityIssue::Inconsistent {
                    player: student.name().to_string(),
                    partner: held_by.map_or_else(
                        || "-".to_string(),
                        |p| solution.projects[p.get()].name().to_string(),
                    ),
                });
            }
            if let Some(p) = held_by {
                let project = &solution.projects[p.get()];
                let supervisor = &solution.supervisors[project.supervisor().get()];
                if !student.preferences().ranks(p) {
                    issues.push(ValidityIssue::Unacceptable {
                        player: student.name().to_string(),
                        partner: project.name().to_string(),
                    });
                }
                if !supervisor.party().preferences().ranks(me) {
                    issues.push(ValidityIssue::Unacceptable {
                        player: supervisor.name().to_string(),
                        partner: student.name().to_string(),
                    });
                }
            }
        }

        for (index, project) in solution.projects.iter().enumerate() {
            if self.excluded.projects.contains(index) {
                continue;
            }
            let held = matching.get(ProjectIndex::new(index));
            if !same_members(held, project.party().matches()) {
                issues.push(solution.inconsistent(project.name(), held));
            }
            let capacity = project.party().capacity();
            if held.len() > capacity {
                issues.push(ValidityIssue::CapacityExceeded {
                    player: project.name().to_string(),
                    capacity,
                    matched: held.len(),
                });
            }
        }

        for (index, supervisor) in solution.supervisors.iter().enumerate() {
            if self.excluded.supervisors.contains(index) {
                continue;
            }
            let load = solution.load(supervisor);
            if !same_members(&load, supervisor.party().matches()) {
                issues.push(solution.inconsistent(supervisor.name(), &load));
            }
            let capacity = supervisor.party().capacity();
            if load.len() > capacity {
                issues.push(ValidityIssue::CapacityExceeded {
                    player: supervisor.name().to_string(),
                    capacity,
                    matched: load.len(),
                });
            }
        }

        into_result(issues)
    }

    /// Student-project pairs that block the matching.
    ///
    /// The student must rank the project, be ranked by its supervisor and
    /// either be unplaced or prefer the project to its current one. The pair
    /// then blocks if the project has a free place and the supervisor either
    /// has room, already supervises the student, or would drop its worst
    /// student for this one; or if the project is full and the supervisor
    /// prefers the student to the project's worst.
    pub fn find_blocking_pairs(&self) -> Vec<(StudentIndex, ProjectIndex)> {
        let Some(solution) = &self.solution else {
            return Vec::new();
        };
        let matching = &solution.matching;
        let mut pairs = Vec::new();
        for (index, student) in solution.students.iter().enumerate() {
            if self.excluded.students.contains(index) {
                continue;
            }
            let s = StudentIndex::new(index);
            let current = matching.key_of(s);
            for p in ranked_once(student.preferences(), solution.projects.len()) {
                if current == Some(p)
                    || self.excluded.projects.contains(p.get())
                    || !prefers_to_current(student.preferences(), p, current)
                {
                    continue;
                }
                let project = &solution.projects[p.get()];
                let supervisor = &solution.supervisors[project.supervisor().get()];
                let ranking = supervisor.party().preferences();
                if !ranking.ranks(s) {
                    continue;
                }

                let held = matching.get(p);
                let blocks = if held.len() < project.party().capacity() {
                    let load = solution.load(supervisor);
                    load.len() < supervisor.party().capacity()
                        || current.is_some_and(|q| supervisor.owns(q))
                        || worst_of(ranking, &load).is_some_and(|worst| ranking.prefers(s, worst))
                } else {
                    worst_of(ranking, held).is_some_and(|worst| ranking.prefers(s, worst))
                };
                if blocks {
                    pairs.push((s, p));
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
    pub fn blocking_pairs(&self) -> &[(StudentIndex, ProjectIndex)] {
        self.solution
            .as_ref()
            .map_or(&[], |solution| solution.blocking_pairs.as_slice())
    }

    /// The matching by name, keyed by project; excluded projects are left out.
    pub fn to_record(&self) -> Option<MatchingRecord> {
        self.solution.as_ref().map(|solution| {
            solution.matching.to_record(
                |p| {
                    (!self.excluded.projects.contains(p.get()))
                        .then(|| self.projects[p.get()].name())
                },
                |s| self.students[s.get()].name(),
            )
        })
    }
}

impl Solution {
    /// Every student placed on one of `supervisor`'s projects.
    fn load(&self, supervisor: &Supervisor) -> Vec<StudentIndex> {
        supervisor
            .projects()
            .iter()
            .flat_map(|&project| self.matching.get(project).iter().copied())
            .collect()
    }

    fn inconsistent(&self, player: &str, held: &[StudentIndex]) -> ValidityIssue {
        ValidityIssue::Inconsistent {
            player: player.to_string(),
            partner: held
                .iter()
                .map(|s| self.students[s.get()].name())
                .collect::<Vec<_>>()
                .join(", "),
        }
    }

    /// Rewrites every player's match state from the matching.
    fn sync_players(&mut self) {
        for (index, student) in self.students.iter_mut().enumerate() {
            match self.matching.key_of(StudentIndex::new(index)) {
                Some(project) => student.match_with(project),
                None => student.unmatch(),
            }
        }
        for (index, project) in self.projects.iter_mut().enumerate() {
            let party = project.party_mut();
            party.clear_matches();
            for &student in self.matching.get(ProjectIndex::new(index)) {
                party.match_with(student);
            }
        }
        for supervisor in self.supervisors.iter_mut() {
            let owned = supervisor.projects().to_vec();
            let party = supervisor.party_mut();
            party.clear_matches();
            for project in owned {
                for &student in self.matching.get(project) {
                    party.match_with(student);
                }
            }
        }
    }
}

#[inline]
fn same_members(left: &[StudentIndex], right: &[StudentIndex]) -> bool {
    left.len() == right.len() && left.iter().all(|student| right.contains(student))
}

/// Rebuilds `projects` without rankings or matches and attaches each to its
/// owner in `supervisors`.
fn rebuild_projects(
    projects: &[Project],
    supervisors: &mut [Supervisor],
) -> Result<Vec<Project>, GameError> {
    let mut rebuilt = Vec::with_capacity(projects.len());
    for (index, project) in projects.iter().enumerate() {
        let owner = project.supervisor();
        let Some(supervisor) = supervisors.get_mut(owner.get()) else {
            return Err(GameError::MissingSupervisor {
                project: project.name().to_string(),
                index: owner.get(),
            });
        };
        supervisor.attach_project(ProjectIndex::new(index));
        rebuilt.push(Project::new(
            project.name(),
            project.party().capacity(),
            owner,
        ));
    }
    Ok(rebuilt)
}

/// Reports students ranking a project whose supervisor does not rank them,
/// and supervisors ranking a student that ranks none of their projects.
fn report_non_reciprocal(
    students: &[Player<ProjectIndex>],
    projects: &[Project],
    supervisors: &[Supervisor],
    clean: bool,
    diagnostics: &mut Diagnostics,
) {
    for (index, student) in students.iter().enumerate() {
        let me = StudentIndex::new(index);
        let ranking = student.preferences().working();
        for (position, &p) in ranking.iter().enumerate() {
            if ranking[..position].contains(&p) {
                continue;
            }
            let project = &projects[p.get()];
            let supervisor = &supervisors[project.supervisor().get()];
            if !supervisor.party().preferences().contains(me) {
                diagnostics.report(Diagnostic::NonReciprocalRanking {
                    player: student.name().to_string(),
                    entry: project.name().to_string(),
                    repaired: clean,
                });
            }
        }
    }

    for supervisor in supervisors {
        let ranking = supervisor.party().preferences().working();
        for (position, &s) in ranking.iter().enumerate() {
            if ranking[..position].contains(&s) {
                continue;
            }
            let student = &students[s.get()];
            let ranks_any = student
                .preferences()
                .working()
                .iter()
                .any(|&p| supervisor.owns(p));
            if !ranks_any {
                diagnostics.report(Diagnostic::NonReciprocalRanking {
                    player: supervisor.name().to_string(),
                    entry: student.name().to_string(),
                    repaired: clean,
                });
            }
        }
    }
}

/// Strikes unreturned rankings and excludes emptied players across all three
/// parties until nothing changes.
fn prune(
    students: &mut [Player<ProjectIndex>],
    projects: &[Project],
    supervisors: &mut [Supervisor],
    excluded: &mut Excluded,
    diagnostics: &mut Diagnostics,
) {
    loop {
        let mut changed = false;
        for (index, project) in projects.iter().enumerate() {
            if !excluded.projects.contains(index)
                && excluded.supervisors.contains(project.supervisor().get())
            {
                excluded.projects.insert(index);
                changed = true;
            }
        }

        for (index, student) in students.iter_mut().enumerate() {
            if excluded.students.contains(index) {
                student.preferences_mut().retain(|_| false);
                continue;
            }
            let me = StudentIndex::new(index);
            student.preferences_mut().retain(|&p| {
                let owner = projects[p.get()].supervisor();
                !excluded.projects.contains(p.get())
                    && supervisors[owner.get()].party().preferences().contains(me)
            });
        }

        for (index, supervisor) in supervisors.iter_mut().enumerate() {
            let owned = supervisor.projects().to_vec();
            let ranking = supervisor.party_mut().preferences_mut();
            if excluded.supervisors.contains(index) {
                ranking.retain(|_| false);
                continue;
            }
            ranking.retain(|&s| {
                !excluded.students.contains(s.get())
                    && students[s.get()]
                        .preferences()
                        .working()
                        .iter()
                        .any(|p| owned.contains(p))
            });
        }

        for (index, project) in projects.iter().enumerate() {
            if excluded.projects.contains(index) {
                continue;
            }
            let me = ProjectIndex::new(index);
            if !students.iter().any(|student| student.preferences().contains(me)) {
                excluded.projects.insert(index);
                diagnostics.report(Diagnostic::EmptyPreferences {
                    player: project.name().to_string(),
                    repaired: true,
                });
                changed = true;
            }
        }

        changed |= exclude_empty(students, &mut excluded.students, diagnostics);
        changed |= exclude_empty(supervisors, &mut excluded.supervisors, diagnostics);
        if !changed {
            break;
        }
    }
}

/// Reports projects offering more places than their supervisor, then
/// supervisors able to take more students than their projects offer.
/// Clean mode lowers the offending capacity.
fn cap_capacities(
    projects: &mut [Project],
    supervisors: &mut [Supervisor],
    excluded: &Excluded,
    clean: bool,
    diagnostics: &mut Diagnostics,
) {
    for (index, project) in projects.iter_mut().enumerate() {
        if excluded.projects.contains(index) {
            continue;
        }
        let supervisor = &supervisors[project.supervisor().get()];
        let limit = supervisor.party().capacity();
        let capacity = project.party().capacity();
        if limit == 0 || capacity <= limit {
            continue;
        }
        diagnostics.report(Diagnostic::ProjectCapacityExceedsSupervisor {
            project: project.name().to_string(),
            supervisor: supervisor.name().to_string(),
            project_capacity: capacity,
            supervisor_capacity: limit,
            repaired: clean,
        });
        if clean {
            project.party_mut().set_capacity(limit);
        }
    }

    for (index, supervisor) in supervisors.iter_mut().enumerate() {
        let capacity = supervisor.party().capacity();
        if excluded.supervisors.contains(index) || capacity == 0 {
            continue;
        }
        let total: usize = supervisor
            .projects()
            .iter()
            .filter(|p| !excluded.projects.contains(p.get()))
            .map(|p| projects[p.get()].party().capacity())
            .sum();
        if capacity <= total {
            continue;
        }
        diagnostics.report(Diagnostic::SupervisorCapacityExceedsProjects {
            supervisor: supervisor.name().to_string(),
            capacity,
            total,
            repaired: clean,
        });
        if clean {
            supervisor.party_mut().set_capacity(total);
        }
    }
}

/// Gives each project its supervisor's ranking, restricted to the students
/// that rank the project. Excluded projects rank nobody.
fn derive_project_rankings(
    students: &[Player<ProjectIndex>],
    projects: &mut [Project],
    supervisors: &[Supervisor],
    excluded: &Excluded,
) {
    for (index, project) in projects.iter_mut().enumerate() {
        let me = ProjectIndex::new(index);
        let mut seen = FixedBitSet::with_capacity(students.len());
        let ranking = if excluded.projects.contains(index) {
            Vec::new()
        } else {
            supervisors[project.supervisor().get()]
                .party()
                .preferences()
                .working()
                .iter()
                .copied()
                .filter(|s| students[s.get()].preferences().contains(me) && !seen.put(s.get()))
                .collect()
        };
        project.party_mut().set_preferences(ranking);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use accord_engine::monitor::log::LogMonitor;
    use rand::{Rng, SeedableRng, rngs::StdRng, seq::SliceRandom};

    fn s(i: usize) -> StudentIndex {
        StudentIndex::new(i)
    }

    fn p(i: usize) -> ProjectIndex {
        ProjectIndex::new(i)
    }

    fn shared_supervisor(options: GameOptions) -> StudentAllocation {
        let students = PreferenceTable::from([
            ("S0", vec!["P0", "P1"]),
            ("S1", vec!["P0"]),
            ("S2", vec!["P1", "P2"]),
        ]);
        let supervisors =
            PreferenceTable::from([("F0", vec!["S2", "S0", "S1"]), ("F1", vec!["S2"])]);
        StudentAllocation::from_preferences(
            &students,
            &supervisors,
            [("P0", 1), ("P1", 1), ("P2", 1)],
            [("P0", "F0"), ("P1", "F0"), ("P2", "F1")],
            [("F0", 2), ("F1", 1)],
            options,
        )
        .unwrap()
    }

    fn random_game(rng: &mut StdRng) -> StudentAllocation {
        let supervisor_count = rng.random_range(1..=3);
        let project_count = rng.random_range(1..=6);
        let student_count = rng.random_range(1..=15);

        let owners: Vec<usize> = (0..project_count)
            .map(|_| rng.random_range(0..supervisor_count))
            .collect();
        let students: Vec<Player<ProjectIndex>> = (0..student_count)
            .map(|i| {
                let mut ranking: Vec<ProjectIndex> = ProjectIndex::range(project_count).collect();
                ranking.shuffle(rng);
                ranking.truncate(rng.random_range(1..=project_count));
                Player::with_preferences(format!("S{}", i), ranking)
            })
            .collect();
        let projects: Vec<Project> = owners
            .iter()
            .enumerate()
            .map(|(i, &owner)| {
                let capacity = rng.random_range(1..=3);
                Project::new(format!("P{}", i), capacity, SupervisorIndex::new(owner))
            })
            .collect();
        let supervisors: Vec<Supervisor> = (0..supervisor_count)
            .map(|k| {
                let mut ranking: Vec<StudentIndex> = StudentIndex::range(student_count)
                    .filter(|student| {
                        students[student.get()]
                            .preferences()
                            .working()
                            .iter()
                            .any(|project| owners[project.get()] == k)
                    })
                    .collect();
                ranking.shuffle(rng);
                Supervisor::with_preferences(format!("F{}", k), rng.random_range(1..=5), ranking)
            })
            .collect();

        StudentAllocation::new(&students, &projects, &supervisors, GameOptions::new().clean(true))
            .unwrap()
    }

    #[test]
    fn test_student_optimal_example() {
        let mut game = shared_supervisor(GameOptions::default());
        assert!(game.diagnostics().is_empty());
        game.solve(AllocationOptimal::Student).unwrap();
        assert_eq!(
            game.to_record().unwrap().to_string(),
            "{P0: [S0], P1: [S2], P2: []}"
        );
        assert!(game.check_validity().is_ok());
        assert!(game.check_stability());
        assert_eq!(game.statistics().unwrap().evictions, 1);
    }

    #[test]
    fn test_supervisor_optimal_example() {
        let mut game = shared_supervisor(GameOptions::default());
        game.solve(AllocationOptimal::Supervisor).unwrap();
        assert_eq!(
            game.to_record().unwrap().to_string(),
            "{P0: [S0], P1: [S2], P2: []}"
        );
        assert!(game.check_validity().is_ok());
        assert!(game.check_stability());
    }

    #[test]
    fn test_project_rankings_are_derived() {
        let game = shared_supervisor(GameOptions::default());
        let ranking = |i: usize| game.projects()[i].party().preferences().working().to_vec();
        assert_eq!(ranking(0), vec![s(0), s(1)]);
        assert_eq!(ranking(1), vec![s(2), s(0)]);
        assert_eq!(ranking(2), vec![s(2)]);
        assert_eq!(game.supervisors()[0].projects(), &[p(0), p(1)]);
    }

    #[test]
    fn test_unplaced_student_blocks() {
        let mut game = shared_supervisor(GameOptions::default());
        game.solve(AllocationOptimal::Student).unwrap();
        game.set_match(s(0), None).unwrap();
        assert!(game.check_validity().is_ok());
        assert!(!game.check_stability());
        assert_eq!(game.blocking_pairs(), &[(s(0), p(0)), (s(1), p(0))]);
    }

    #[test]
    fn test_supervisor_overload_is_invalid() {
        let mut game = shared_supervisor(GameOptions::default());
        game.set_match(s(0), Some(p(0))).unwrap();
        game.set_match(s(2), Some(p(1))).unwrap();
        assert!(game.check_validity().is_ok());
        game.set_match(s(1), Some(p(0))).unwrap();
        let error = game.check_validity().unwrap_err();
        assert_eq!(
            error.issues(),
            &[
                ValidityIssue::CapacityExceeded {
                    player: "P0".into(),
                    capacity: 1,
                    matched: 2,
                },
                ValidityIssue::CapacityExceeded {
                    player: "F0".into(),
                    capacity: 2,
                    matched: 3,
                },
            ]
        );
    }

    #[test]
    fn test_missing_supervisor_is_fatal() {
        let students = vec![Player::with_preferences("S0", vec![p(0)])];
        let projects = vec![Project::new("P0", 1, SupervisorIndex::new(4))];
        let supervisors = vec![Supervisor::with_preferences("F0", 1, vec![s(0)])];
        assert_eq!(
            StudentAllocation::new(&students, &projects, &supervisors, GameOptions::default())
                .unwrap_err(),
            GameError::MissingSupervisor {
                project: "P0".into(),
                index: 4,
            }
        );
    }

    #[test]
    fn test_unknown_owner_fails_to_load() {
        let students = PreferenceTable::from([("S0", vec!["P0"])]);
        let supervisors = PreferenceTable::from([("F0", vec!["S0"])]);
        let error = StudentAllocation::from_preferences(
            &students,
            &supervisors,
            [("P0", 1)],
            [("P0", "F9")],
            [("F0", 1)],
            GameOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(error, GameError::Load(_)));
    }

    #[test]
    fn test_clean_mode_caps_and_prunes() {
        let students = PreferenceTable::from([
            ("S0", vec!["P0", "P2"]),
            ("S1", vec!["P2", "P1"]),
            ("S2", vec!["P1"]),
        ]);
        let supervisors =
            PreferenceTable::from([("F0", vec!["S0", "S1"]), ("F1", vec!["S0", "S1"])]);
        let mut game = StudentAllocation::from_preferences(
            &students,
            &supervisors,
            [("P0", 4), ("P1", 1), ("P2", 2)],
            [("P0", "F0"), ("P1", "F0"), ("P2", "F1")],
            [("F0", 3), ("F1", 5)],
            GameOptions::new().clean(true),
        )
        .unwrap();

        let diagnostics = game.diagnostics().as_slice();
        assert!(diagnostics.contains(&Diagnostic::NonReciprocalRanking {
            player: "S2".into(),
            entry: "P1".into(),
            repaired: true,
        }));
        assert!(diagnostics.contains(&Diagnostic::EmptyPreferences {
            player: "S2".into(),
            repaired: true,
        }));
        assert!(diagnostics.contains(&Diagnostic::ProjectCapacityExceedsSupervisor {
            project: "P0".into(),
            supervisor: "F0".into(),
            project_capacity: 4,
            supervisor_capacity: 3,
            repaired: true,
        }));
        assert!(diagnostics.contains(&Diagnostic::SupervisorCapacityExceedsProjects {
            supervisor: "F1".into(),
            capacity: 5,
            total: 2,
            repaired: true,
        }));
        assert!(game.is_student_excluded(s(2)));
        assert_eq!(game.projects()[0].party().capacity(), 3);
        assert_eq!(game.supervisors()[1].party().capacity(), 2);

        game.solve(AllocationOptimal::Student).unwrap();
        assert_eq!(
            game.to_record().unwrap().to_string(),
            "{P0: [S0], P1: [], P2: [S1]}"
        );
        assert!(game.check_validity().is_ok());
        assert!(game.check_stability());
    }

    #[test]
    fn test_problems_are_reported_without_clean() {
        let students = PreferenceTable::from([("S0", vec!["P0", "P1"]), ("S1", vec!["P1"])]);
        let supervisors = PreferenceTable::from([("F0", vec!["S0"]), ("F1", vec!["S1", "S0"])]);
        let mut game = StudentAllocation::from_preferences(
            &students,
            &supervisors,
            [("P0", 1), ("P1", 1)],
            [("P0", "F0"), ("P1", "F1")],
            [("F0", 0), ("F1", 1)],
            GameOptions::default(),
        )
        .unwrap();
        assert!(game.diagnostics().as_slice().contains(&Diagnostic::InvalidCapacity {
            player: "F0".into(),
            capacity: 0,
            repaired: false,
        }));
        assert!(!game.is_supervisor_excluded(SupervisorIndex::new(0)));

        game.solve(AllocationOptimal::Student).unwrap();
        assert!(game.check_validity().is_ok());
        assert!(game.check_stability());
        assert_eq!(
            game.to_record().unwrap().to_string(),
            "{P0: [], P1: [S1]}"
        );
    }

    #[test]
    fn test_supervisor_repeated_ranking_keeps_stability() {
        let students = vec![
            Player::with_preferences("S0", vec![p(0)]),
            Player::with_preferences("S1", vec![p(1)]),
        ];
        let projects = vec![
            Project::new("P0", 1, SupervisorIndex::new(0)),
            Project::new("P1", 1, SupervisorIndex::new(0)),
        ];
        let supervisors = vec![Supervisor::with_preferences("F0", 1, vec![s(1), s(0), s(1)])];
        let mut game =
            StudentAllocation::new(&students, &projects, &supervisors, GameOptions::default())
                .unwrap();
        assert!(game.diagnostics().as_slice().contains(&Diagnostic::DuplicateRanking {
            player: "F0".into(),
            entry: "S1".into(),
            repaired: false,
        }));

        for optimal in [AllocationOptimal::Student, AllocationOptimal::Supervisor] {
            game.solve(optimal).unwrap();
            assert_eq!(game.to_record().unwrap().to_string(), "{P0: [], P1: [S1]}");
            assert!(game.check_validity().is_ok());
            assert!(game.check_stability());
        }
    }

    #[test]
    fn test_random_instances() {
        let mut rng = StdRng::seed_from_u64(23);
        for _ in 0..30 {
            let mut game = random_game(&mut rng);

            let mut monitor = LogMonitor::new();
            let student_side = game
                .solve_with_monitor(AllocationOptimal::Student, &mut monitor)
                .unwrap()
                .clone();
            assert!(game.check_validity().is_ok());
            assert!(game.check_stability());

            let supervisor_side = game.solve(AllocationOptimal::Supervisor).unwrap().clone();
            assert!(game.check_validity().is_ok());
            assert!(game.check_stability());

            assert_eq!(student_side.matched_count(), supervisor_side.matched_count());
            for (index, student) in game.students().iter().enumerate() {
                if let (Some(best), Some(worst)) =
                    (student_side.key_of(s(index)), supervisor_side.key_of(s(index)))
                {
                    assert!(best == worst || student.prefers(best, worst));
                }
            }
        }
    }
}
