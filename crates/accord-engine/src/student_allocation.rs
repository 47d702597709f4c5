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

//! Student allocation: deferred acceptance through a project/supervisor
//! hierarchy.
//!
//! A student matched to a project also counts against the project's
//! supervisor, so every match, eviction and release touches three arenas.
//! The module keeps those three updates together in `assign` and `withdraw`.
//!
//! In the student-optimal direction a student that overfills a project
//! displaces the project's worst student; a student that overfills only the
//! supervisor displaces the supervisor's worst student, wherever that student
//! is placed. Once a project is full its successors are struck from both
//! lists. Once a supervisor is full, every student it ranks below its worst
//! is struck from all of its projects; the supervisor's own ranking is left
//! untouched.
//!
//! In the supervisor-optimal direction the free supervisors are recomputed in
//! input order after each offer and the last one moves next.

use crate::{
    role::{Ranking, Reviewable},
    session::SolveSession,
    worklist::Worklist,
};
use accord_model::{
    capacitated::Capacitated,
    hierarchy::{Project, Supervisor},
    index::{ProjectIndex, StudentIndex, SupervisorIndex},
    player::Player,
};

/// The three arenas of a student allocation instance.
pub struct Allocation<'a> {
    pub students: &'a mut [Player<ProjectIndex>],
    pub projects: &'a mut [Project],
    pub supervisors: &'a mut [Supervisor],
}

impl<'a> Allocation<'a> {
    #[inline]
    pub fn new(
        students: &'a mut [Player<ProjectIndex>],
        projects: &'a mut [Project],
        supervisors: &'a mut [Supervisor],
    ) -> Self {
        Self {
            students,
            projects,
            supervisors,
        }
    }

    #[inline]
    fn supervisor_of(&self, project: ProjectIndex) -> SupervisorIndex {
        self.projects[project.get()].supervisor()
    }

    /// Matches `student` to `project` and to the project's supervisor.
    fn assign(&mut self, student: StudentIndex, project: ProjectIndex) {
        let supervisor = self.supervisor_of(project);
        self.students[student.get()].match_with(project);
        self.projects[project.get()].hold(student);
        self.supervisors[supervisor.get()]
            .party_mut()
            .match_with(student);
    }

    /// Removes `student` from `project` and from the project's supervisor.
    fn withdraw(&mut self, student: StudentIndex, project: ProjectIndex) {
        let supervisor = self.supervisor_of(project);
        let player = &mut self.students[student.get()];
        if player.partner() == Some(project) {
            player.unmatch();
        }
        self.projects[project.get()].release(student);
        self.supervisors[supervisor.get()]
            .party_mut()
            .unmatch(student);
    }

    fn forget_pair(&mut self, student: StudentIndex, project: ProjectIndex) -> bool {
        let removed = self.students[student.get()].drop_candidate(project);
        self.projects[project.get()].drop_candidate(student) || removed
    }
}

/// Runs student-optimal allocation to completion.
pub fn student_optimal(allocation: &mut Allocation<'_>, session: &mut SolveSession<'_>) {
    let mut worklist: Worklist<StudentIndex> =
        StudentIndex::range(allocation.students.len()).collect();

    while let Some(student) = worklist.pop() {
        let Some(project) = allocation.students[student.get()].best_candidate() else {
            continue;
        };
        session.proposal(student.get(), project.get());

        let target = &allocation.projects[project.get()];
        if !target.accepts(student) || !target.has_capacity() {
            allocation.forget_pair(student, project);
            session.rejection(student.get(), project.get());
            worklist.push(student);
            continue;
        }

        let supervisor = allocation.supervisor_of(project);
        allocation.assign(student, project);

        let evicted = if allocation.projects[project.get()].is_oversubscribed() {
            allocation.projects[project.get()].worst_held()
        } else if allocation.supervisors[supervisor.get()].is_oversubscribed() {
            allocation.supervisors[supervisor.get()].worst_match()
        } else {
            None
        };
        if let Some(evicted) = evicted {
            if let Some(held_by) = allocation.students[evicted.get()].partner() {
                allocation.withdraw(evicted, held_by);
                session.eviction(evicted.get(), held_by.get());
            }
            if evicted == student {
                allocation.forget_pair(student, project);
            }
            worklist.push(evicted);
        }

        if allocation.projects[project.get()].is_full() {
            for successor in allocation.projects[project.get()].held_successors() {
                if allocation.forget_pair(successor, project) {
                    session.deletion(successor.get(), project.get());
                }
            }
        }

        let owner = &allocation.supervisors[supervisor.get()];
        if owner.is_full() {
            let owned = owner.projects().to_vec();
            for successor in owner.successors() {
                for &project in &owned {
                    if allocation.students[successor.get()].accepts(project)
                        && allocation.forget_pair(successor, project)
                    {
                        session.deletion(successor.get(), project.get());
                    }
                }
            }
        }
    }
}

/// The last supervisor, in input order, that can still make an offer, with
/// the student and project of that offer.
fn next_offer(
    allocation: &Allocation<'_>,
) -> Option<(SupervisorIndex, StudentIndex, ProjectIndex)> {
    for (index, supervisor) in allocation.supervisors.iter().enumerate().rev() {
        if supervisor.is_full() {
            continue;
        }
        let owner = SupervisorIndex::new(index);
        for &student in supervisor.party().preferences().working() {
            let player = &allocation.students[student.get()];
            let viable = player.preferences().working().iter().copied().find(|&project| {
                let candidate = &allocation.projects[project.get()];
                candidate.supervisor() == owner
                    && !candidate.is_full()
                    && player.partner() != Some(project)
            });
            if let Some(project) = viable {
                return Some((owner, student, project));
            }
        }
    }
    None
}

/// Runs supervisor-optimal allocation to completion.
pub fn supervisor_optimal(allocation: &mut Allocation<'_>, session: &mut SolveSession<'_>) {
    while let Some((supervisor, student, project)) = next_offer(allocation) {
        session.proposal(supervisor.get(), student.get());

        if !allocation.projects[project.get()].accepts(student) {
            allocation.forget_pair(student, project);
            session.rejection(supervisor.get(), student.get());
            continue;
        }

        if let Some(previous) = allocation.students[student.get()].partner() {
            allocation.withdraw(student, previous);
            session.eviction(student.get(), previous.get());
        }
        allocation.assign(student, project);

        for successor in allocation.students[student.get()].successors() {
            if allocation.forget_pair(student, successor) {
                session.deletion(student.get(), successor.get());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        monitor::{no_op::NoOperationMonitor, solve_monitor::Algorithm},
        stats::EngineStatistics,
    };

    fn s(i: usize) -> StudentIndex {
        StudentIndex::new(i)
    }

    fn pr(i: usize) -> ProjectIndex {
        ProjectIndex::new(i)
    }

    struct Instance {
        students: Vec<Player<ProjectIndex>>,
        projects: Vec<Project>,
        supervisors: Vec<Supervisor>,
    }

    impl Instance {
        /// Builds the arenas and derives each project's ranking from its
        /// supervisor's ranking.
        fn new(
            students: &[&[usize]],
            projects: &[(usize, usize)],
            supervisors: &[(usize, &[usize])],
        ) -> Self {
            let students: Vec<Player<ProjectIndex>> = students
                .iter()
                .enumerate()
                .map(|(i, ranking)| {
                    Player::with_preferences(
                        format!("S{}", i),
                        ranking.iter().map(|&p| pr(p)).collect(),
                    )
                })
                .collect();
            let mut supervisors: Vec<Supervisor> = supervisors
                .iter()
                .enumerate()
                .map(|(i, (capacity, ranking))| {
                    Supervisor::with_preferences(
                        format!("F{}", i),
                        *capacity,
                        ranking.iter().map(|&x| s(x)).collect(),
                    )
                })
                .collect();
            let projects: Vec<Project> = projects
                .iter()
                .enumerate()
                .map(|(i, &(capacity, owner))| {
                    let mut project =
                        Project::new(format!("P{}", i), capacity, SupervisorIndex::new(owner));
                    supervisors[owner].attach_project(pr(i));
                    let ranking = supervisors[owner]
                        .party()
                        .preferences()
                        .working()
                        .iter()
                        .copied()
                        .filter(|student| students[student.get()].preferences().ranks(pr(i)))
                        .collect();
                    project.party_mut().set_preferences(ranking);
                    project
                })
                .collect();
            Self {
                students,
                projects,
                supervisors,
            }
        }

        fn solve(&mut self, algorithm: Algorithm) -> EngineStatistics {
            let mut monitor = NoOperationMonitor::new();
            let mut session = SolveSession::new(algorithm, &mut monitor);
            let mut allocation =
                Allocation::new(&mut self.students, &mut self.projects, &mut self.supervisors);
            match algorithm {
                Algorithm::SupervisorOptimal => supervisor_optimal(&mut allocation, &mut session),
                _ => student_optimal(&mut allocation, &mut session),
            }
            session.finish()
        }

        fn partners(&self) -> Vec<Option<ProjectIndex>> {
            self.students.iter().map(|student| student.partner()).collect()
        }
    }

    fn shared_supervisor() -> Instance {
        Instance::new(
            &[&[0, 1], &[0], &[1, 2]],
            &[(1, 0), (1, 0), (1, 1)],
            &[(2, &[2, 0, 1]), (1, &[2])],
        )
    }

    #[test]
    fn test_student_optimal() {
        let mut instance = shared_supervisor();
        let stats = instance.solve(Algorithm::StudentOptimal);
        assert_eq!(instance.partners(), vec![Some(pr(0)), None, Some(pr(1))]);
        assert_eq!(stats.evictions, 1);
        assert_eq!(instance.supervisors[0].matches(), &[s(2), s(0)]);
        assert!(instance.supervisors[1].matches().is_empty());
    }

    #[test]
    fn test_supervisor_optimal() {
        let mut instance = shared_supervisor();
        let stats = instance.solve(Algorithm::SupervisorOptimal);
        assert_eq!(instance.partners(), vec![Some(pr(0)), None, Some(pr(1))]);
        assert_eq!(stats.proposals, 3);
        assert_eq!(stats.evictions, 1);
        assert!(instance.projects[2].matches().is_empty());
    }

    #[test]
    fn test_supervisor_capacity_evicts_across_projects() {
        // F0 can take one student over two projects and prefers S0.
        let mut instance = Instance::new(&[&[1], &[0]], &[(1, 0), (1, 0)], &[(1, &[0, 1])]);
        let stats = instance.solve(Algorithm::StudentOptimal);
        assert_eq!(instance.partners(), vec![Some(pr(1)), None]);
        assert_eq!(stats.evictions, 1);
        assert!(instance.projects[0].matches().is_empty());
        assert_eq!(instance.supervisors[0].matches(), &[s(0)]);
        assert!(instance.students[1].preferences().is_empty());
    }

    #[test]
    fn test_zero_capacity_project_rejects() {
        let mut instance = Instance::new(&[&[0, 1]], &[(0, 0), (1, 0)], &[(1, &[0])]);
        let stats = instance.solve(Algorithm::StudentOptimal);
        assert_eq!(instance.partners(), vec![Some(pr(1))]);
        assert_eq!(stats.rejections, 1);
    }

    #[test]
    fn test_zero_capacity_supervisor_terminates() {
        let mut instance = Instance::new(&[&[0]], &[(1, 0)], &[(0, &[0])]);
        instance.solve(Algorithm::StudentOptimal);
        assert_eq!(instance.partners(), vec![None]);
        assert!(instance.students[0].preferences().is_empty());
    }
}
