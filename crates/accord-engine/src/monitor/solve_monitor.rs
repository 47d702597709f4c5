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

use crate::stats::EngineStatistics;

/// The engine a solve runs, reported to monitors on entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    SuitorOptimal,
    ReviewerOptimal,
    ResidentOptimal,
    HospitalOptimal,
    Roommates,
    StudentOptimal,
    SupervisorOptimal,
}

impl std::fmt::Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Algorithm::SuitorOptimal => "stable marriage (suitor-optimal)",
            Algorithm::ReviewerOptimal => "stable marriage (reviewer-optimal)",
            Algorithm::ResidentOptimal => "hospital-resident (resident-optimal)",
            Algorithm::HospitalOptimal => "hospital-resident (hospital-optimal)",
            Algorithm::Roommates => "stable roommates",
            Algorithm::StudentOptimal => "student allocation (student-optimal)",
            Algorithm::SupervisorOptimal => "student allocation (supervisor-optimal)",
        };
        write!(f, "{}", name)
    }
}

/// Observer of engine events.
///
/// Player positions are reported as plain arena positions; which arena they
/// refer to follows from the algorithm announced in `on_enter_solve`.
pub trait SolveMonitor {
    fn name(&self) -> &str;
    fn on_enter_solve(&mut self, algorithm: Algorithm);
    fn on_proposal(&mut self, proposer: usize, reviewer: usize);
    fn on_rejection(&mut self, proposer: usize, reviewer: usize);
    fn on_eviction(&mut self, evicted: usize, reviewer: usize);
    fn on_deletion(&mut self, first: usize, second: usize);
    fn on_rotation(&mut self, length: usize);
    fn on_exit_solve(&mut self, statistics: &EngineStatistics);
}

impl std::fmt::Debug for dyn SolveMonitor + '_ {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SolveMonitor({})", self.name())
    }
}

impl std::fmt::Display for dyn SolveMonitor + '_ {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SolveMonitor({})", self.name())
    }
}
