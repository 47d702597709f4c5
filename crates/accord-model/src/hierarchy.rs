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

//! Two-level capacitated entities for student allocation.
//!
//! A `Project` is a capacitated party owned by exactly one `Supervisor`; a
//! supervisor owns a set of projects and carries a capacity of its own that
//! bounds the number of students across all of them. Both compose a
//! `CapacitatedPlayer<StudentIndex>` and expose the shared `Capacitated`
//! capability; the relation itself is stored as indices on each side.

use crate::{
    capacitated::{Capacitated, CapacitatedPlayer},
    index::{ProjectIndex, StudentIndex, SupervisorIndex},
    preferences::Preferences,
};

/// A project offered by a supervisor.
///
/// A project's ranking of students is derived from its supervisor's ranking,
/// restricted to the students that rank the project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    party: CapacitatedPlayer<StudentIndex>,
    supervisor: SupervisorIndex,
}

impl Project {
    #[inline]
    pub fn new(name: impl Into<String>, capacity: usize, supervisor: SupervisorIndex) -> Self {
        Self {
            party: CapacitatedPlayer::new(name, capacity),
            supervisor,
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        self.party.name()
    }

    /// The supervisor that owns this project.
    #[inline]
    pub fn supervisor(&self) -> SupervisorIndex {
        self.supervisor
    }

    #[inline]
    pub fn party(&self) -> &CapacitatedPlayer<StudentIndex> {
        &self.party
    }

    #[inline]
    pub fn party_mut(&mut self) -> &mut CapacitatedPlayer<StudentIndex> {
        &mut self.party
    }
}

impl Capacitated<StudentIndex> for Project {
    #[inline]
    fn capacity(&self) -> usize {
        self.party.capacity()
    }

    #[inline]
    fn matches(&self) -> &[StudentIndex] {
        self.party.matches()
    }

    #[inline]
    fn ranking(&self) -> &Preferences<StudentIndex> {
        self.party.preferences()
    }
}

impl std::fmt::Display for Project {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.party.name())
    }
}

/// A supervisor owning one or more projects.
///
/// The supervisor's match list holds every student matched to any of its
/// projects, sorted by the supervisor's own ranking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Supervisor {
    party: CapacitatedPlayer<StudentIndex>,
    projects: Vec<ProjectIndex>,
}

impl Supervisor {
    #[inline]
    pub fn new(name: impl Into<String>, capacity: usize) -> Self {
        Self {
            party: CapacitatedPlayer::new(name, capacity),
            projects: Vec::new(),
        }
    }

    #[inline]
    pub fn with_preferences(
        name: impl Into<String>,
        capacity: usize,
        ranking: Vec<StudentIndex>,
    ) -> Self {
        Self {
            party: CapacitatedPlayer::with_preferences(name, capacity, ranking),
            projects: Vec::new(),
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        self.party.name()
    }

    /// The projects this supervisor owns, in arena order.
    #[inline]
    pub fn projects(&self) -> &[ProjectIndex] {
        &self.projects
    }

    #[inline]
    pub fn owns(&self, project: ProjectIndex) -> bool {
        self.projects.contains(&project)
    }

    /// Records ownership of `project`; repeated calls are no-ops.
    #[inline]
    pub fn attach_project(&mut self, project: ProjectIndex) {
        if !self.projects.contains(&project) {
            self.projects.push(project);
        }
    }

    #[inline]
    pub fn detach_projects(&mut self) {
        self.projects.clear();
    }

    #[inline]
    pub fn party(&self) -> &CapacitatedPlayer<StudentIndex> {
        &self.party
    }

    #[inline]
    pub fn party_mut(&mut self) -> &mut CapacitatedPlayer<StudentIndex> {
        &mut self.party
    }
}

impl Capacitated<StudentIndex> for Supervisor {
    #[inline]
    fn capacity(&self) -> usize {
        self.party.capacity()
    }

    #[inline]
    fn matches(&self) -> &[StudentIndex] {
        self.party.matches()
    }

    #[inline]
    fn ranking(&self) -> &Preferences<StudentIndex> {
        self.party.preferences()
    }
}

impl std::fmt::Display for Supervisor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.party.name())
    }
}
