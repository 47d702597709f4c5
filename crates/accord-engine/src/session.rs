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

use crate::{
    monitor::solve_monitor::{Algorithm, SolveMonitor},
    stats::EngineStatistics,
};
use std::time::Instant;

/// Per-solve bookkeeping shared by every engine.
///
/// Bundles the caller's monitor with the running statistics so each engine
/// reports an event in one call. Creating a session announces the algorithm
/// to the monitor; `finish` stamps the duration and closes the solve.
pub struct SolveSession<'m> {
    algorithm: Algorithm,
    monitor: &'m mut dyn SolveMonitor,
    statistics: EngineStatistics,
    start_time: Instant,
}

impl<'m> SolveSession<'m> {
    pub fn new(algorithm: Algorithm, monitor: &'m mut dyn SolveMonitor) -> Self {
        monitor.on_enter_solve(algorithm);
        Self {
            algorithm,
            monitor,
            statistics: EngineStatistics::default(),
            start_time: Instant::now(),
        }
    }

    #[inline]
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    #[inline]
    pub fn statistics(&self) -> &EngineStatistics {
        &self.statistics
    }

    #[inline]
    pub fn proposal(&mut self, proposer: usize, reviewer: usize) {
        self.statistics.on_proposal();
        self.monitor.on_proposal(proposer, reviewer);
    }

    #[inline]
    pub fn rejection(&mut self, proposer: usize, reviewer: usize) {
        self.statistics.on_rejection();
        self.monitor.on_rejection(proposer, reviewer);
    }

    #[inline]
    pub fn eviction(&mut self, evicted: usize, reviewer: usize) {
        self.statistics.on_eviction();
        self.monitor.on_eviction(evicted, reviewer);
    }

    #[inline]
    pub fn deletion(&mut self, first: usize, second: usize) {
        self.statistics.on_deletion();
        self.monitor.on_deletion(first, second);
    }

    #[inline]
    pub fn rotation(&mut self, length: usize) {
        self.statistics.on_rotation();
        self.monitor.on_rotation(length);
    }

    /// Closes the solve and hands back its statistics.
    pub fn finish(mut self) -> EngineStatistics {
        self.statistics
            .set_solve_duration(self.start_time.elapsed());
        self.monitor.on_exit_solve(&self.statistics);
        self.statistics
    }
}

impl std::fmt::Debug for SolveSession<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SolveSession")
            .field("algorithm", &self.algorithm)
            .field("monitor", &self.monitor.name())
            .field("statistics", &self.statistics)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monitor::no_op::NoOperationMonitor;

    #[test]
    fn test_events_update_statistics() {
        let mut monitor = NoOperationMonitor::new();
        let mut session = SolveSession::new(Algorithm::ResidentOptimal, &mut monitor);
        session.proposal(0, 0);
        session.proposal(1, 0);
        session.eviction(0, 0);
        session.deletion(0, 0);
        session.rejection(2, 1);
        assert_eq!(session.algorithm(), Algorithm::ResidentOptimal);
        let stats = session.finish();
        assert_eq!(stats.proposals, 2);
        assert_eq!(stats.evictions, 1);
        assert_eq!(stats.deletions, 1);
        assert_eq!(stats.rejections, 1);
        assert_eq!(stats.rotations, 0);
    }
}
