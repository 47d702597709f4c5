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

//! # Accord Model
//!
//! **The preference-entity model shared by every Accord matching game.**
//!
//! This crate holds the data the engines mutate and the containers the games
//! hand back to callers. It knows nothing about how a matching is found.
//!
//! ## Architecture
//!
//! * **`index`**: Typed arena indices per party (`SuitorIndex`, `HospitalIndex`, ...).
//! * **`preferences`**: `Preferences<I>`, a working ranking that only shrinks plus
//!   the frozen original ranking every comparison is made against.
//! * **`player`**: `Player<O>`, a single-match party member.
//! * **`capacitated`**: `CapacitatedPlayer<O>` and the `Capacitated` capability.
//! * **`hierarchy`**: `Project` and `Supervisor`, composed from capacitated players
//!   for the two-level student allocation problem.
//! * **`matching`**: `SingleMatching` and `MultipleMatching`, result maps that keep
//!   their inverse consistent on every update.
//! * **`record`**: `MatchingRecord`, the plain name-keyed form of a matching.
//! * **`loading`**: `PreferenceTable` and `NameIndex`, which turn name-keyed rankings
//!   into arena entities.
//!
//! ## Design Philosophy
//!
//! 1.  **Indices, not references**: a match is an index into the opposite arena, so the
//!     entity graph has no reference cycles and cloning an arena deep-copies a game.
//! 2.  **Rank against the original**: the working list loses entries while solving,
//!     so comparisons always use the ranking fixed on first assignment.

pub mod capacitated;
pub mod hierarchy;
pub mod index;
pub mod loading;
pub mod matching;
pub mod player;
pub mod preferences;
pub mod record;
