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

use std::time::Duration;

/// Statistics collected while an engine runs.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EngineStatistics {
    /// Proposals made, including those rejected outright.
    pub proposals: u64,
    /// Proposals turned down without being held.
    pub rejections: u64,
    /// Held proposals displaced by a better one.
    pub evictions: u64,
    /// Pairs struck from both preference lists.
    pub deletions: u64,
    /// All-or-nothing cycles eliminated (stable roommates only).
    pub rotations: u64,
    /// Wall time from entering to leaving the engine.
    pub solve_duration: Duration,
}

impl EngineStatistics {
    #[inline]
    pub fn on_proposal(&mut self) {
        self.proposals = self.proposals.saturating_add(1);
    }

    #[inline]
    pub fn on_rejection(&mut self) {
        self.rejections = self.rejections.saturating_add(1);
    }

    #[inline]
    pub fn on_eviction(&mut self) {
        self.evictions = self.evictions.saturating_add(1);
    }

    #[inline]
    pub fn on_deletion(&mut self) {
        self.deletions = self.deletions.saturating_add(1);
    }

    #[inline]
    pub fn on_rotation(&mut self) {
        self.rotations = self.rotations.saturating_add(1);
    }

    #[inline]
    pub fn set_solve_duration(&mut self, duration: Duration) {
        self.solve_duration = duration;
    }
}

impl std::fmt::Display for EngineStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Accord Engine Statistics:")?;
        writeln!(f, "  Proposals:            {}", self.proposals)?;
        writeln!(f, "  Rejections:           {}", self.rejections)?;
        writeln!(f, "  Evictions:            {}", self.evictions)?;
        writeln!(f, "  Deletions:            {}", self.deletions)?;
        writeln!(f, "  Rotations:            {}", self.rotations)?;
        writeln!(f, "  Total time:           {:.2?}", self.solve_duration)?;
        Ok(())
    }
}
