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

//! Accord engine: the algorithms behind every matching game
//!
//! The engines work on arenas of `accord_model` entities addressed by typed
//! indices. They mutate working preference lists and match slots in place and
//! report every step to a `SolveSession`, which keeps statistics and forwards
//! events to a `monitor::solve_monitor::SolveMonitor`.
//!
//! Core flow
//! - Build the arenas (usually through `accord_games`).
//! - Open a `session::SolveSession` for the algorithm with a monitor.
//! - Run one engine over the arenas.
//! - Close the session to obtain `stats::EngineStatistics`.
//!
//! Guarantees
//! - Deterministic: the same arenas always produce the same matching.
//! - Every engine step shrinks some working list, so each run terminates.
//!
//! Module map
//! - `deferred_acceptance`: the propose-and-reject skeleton.
//! - `market`: index-level views the skeleton runs against.
//! - `role`: proposer and reviewer capabilities of the model entities.
//! - `hospital_resident`: the hospital-optimal dual.
//! - `roommates`: Irving's two-phase algorithm.
//! - `student_allocation`: both directions of the project/supervisor problem.
//! - `monitor`: solve monitors (no-op, log, composite).
//! - `session`: statistics and monitor plumbing for a single run.
//! - `stats`: counters and timing.
//! - `worklist`: the LIFO stack of free players.

pub mod deferred_acceptance;
pub mod hospital_resident;
pub mod market;
pub mod monitor;
pub mod role;
pub mod roommates;
pub mod session;
pub mod stats;
pub mod student_allocation;
pub mod worklist;
