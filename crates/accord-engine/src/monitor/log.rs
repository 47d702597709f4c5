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

/// Reports engine progress through the `log` facade.
///
/// Individual proposals, evictions and deletions are logged at `trace`,
/// rotations at `debug`, and a summary line at `info` on exit.
#[derive(Debug, Clone)]
pub struct LogMonitor {
    algorithm: Option<Algorithm>,
    start_time: Instant,
    events: u64,
}

impl LogMonitor {
    pub fn new() -> Self {
        Self {
            algorithm: None,
            start_time: Instant::now(),
            events: 0,
        }
    }

    /// Number of engine events observed since the last `on_enter_solve`.
    #[inline]
    pub fn events(&self) -> u64 {
        self.events
    }

    #[inline(always)]
    fn tick(&mut self) {
        self.events = self.events.saturating_add(1);
    }
}

impl Default for LogMonitor {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for LogMonitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.algorithm {
            Some(algorithm) => write!(f, "LogMonitor({})", algorithm),
            None => write!(f, "LogMonitor"),
        }
    }
}

impl SolveMonitor for LogMonitor {
    fn name(&self) -> &str {
        "LogMonitor"
    }

    fn on_enter_solve(&mut self, algorithm: Algorithm) {
        self.algorithm = Some(algorithm);
        self.start_time = Instant::now();
        self.events = 0;
        ::log::debug!("solving {}", algorithm);
    }

    fn on_proposal(&mut self, proposer: usize, reviewer: usize) {
        self.tick();
        ::log::trace!("{} proposes to {}", proposer, reviewer);
    }

    fn on_rejection(&mut self, proposer: usize, reviewer: usize) {
        self.tick();
        ::log::trace!("{} rejects {}", reviewer, proposer);
    }

    fn on_eviction(&mut self, evicted: usize, reviewer: usize) {
        self.tick();
        ::log::trace!("{} evicts {}", reviewer, evicted);
    }

    fn on_deletion(&mut self, first: usize, second: usize) {
        self.tick();
        ::log::trace!("deleting pair ({}, {})", first, second);
    }

    fn on_rotation(&mut self, length: usize) {
        self.tick();
        ::log::debug!("eliminating rotation of length {}", length);
    }

    fn on_exit_solve(&mut self, statistics: &EngineStatistics) {
        let elapsed = self.start_time.elapsed();
        match self.algorithm {
            Some(algorithm) => ::log::info!(
                "{} finished in {:.2?}: {} proposals, {} evictions, {} deletions, {} rotations",
                algorithm,
                elapsed,
                statistics.proposals,
                statistics.evictions,
                statistics.deletions,
                statistics.rotations
            ),
            None => ::log::info!("solve finished in {:.2?}", elapsed),
        }
    }
}
