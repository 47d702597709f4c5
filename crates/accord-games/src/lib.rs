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

//! # Accord Games
//!
//! **Stable matching games built on the Accord model and engines.**
//!
//! Each game owns a screened copy of its input, solves a fresh clone on
//! every call and keeps the result for validity and stability queries.
//!
//! ## Games
//!
//! * **`marriage`**: stable marriage, one-to-one between two equal parties.
//! * **`hospital_resident`**: many-to-one with hospital capacities.
//! * **`roommates`**: one-to-one inside a single party (Irving).
//! * **`student_allocation`**: students placed on projects whose supervisors
//!   carry a capacity of their own.
//!
//! ## Input handling
//!
//! Fatal problems (unequal or incomplete one-to-one parties, out-of-range
//! indices, loading errors) are returned as `error::GameError`. Everything
//! else becomes a `diagnostics::Diagnostic`, logged at warn level and kept on
//! the game. With `options::GameOptions::clean` set, the game repairs those
//! problems before solving and excludes players left with nothing to rank.
//!
//! ## Example
//!
//! ```
//! use accord_games::hospital_resident::{HospitalResident, HospitalResidentOptimal};
//! use accord_games::options::GameOptions;
//! use accord_model::loading::PreferenceTable;
//!
//! let residents = PreferenceTable::from([
//!     ("A", vec!["X", "Y"]),
//!     ("B", vec!["Y", "X"]),
//!     ("C", vec!["X", "Y"]),
//! ]);
//! let hospitals = PreferenceTable::from([("X", vec!["A", "C", "B"]), ("Y", vec!["B", "A", "C"])]);
//! let mut game = HospitalResident::from_preferences(
//!     &residents,
//!     &hospitals,
//!     [("X", 2), ("Y", 1)],
//!     GameOptions::default(),
//! )?;
//! game.solve(HospitalResidentOptimal::Resident)?;
//! assert_eq!(game.to_record().unwrap().to_string(), "{X: [A, C], Y: [B]}");
//! assert!(game.check_stability());
//! # Ok::<(), accord_games::error::GameError>(())
//! ```

mod blocking;
pub mod diagnostics;
pub mod error;
pub mod hospital_resident;
pub mod marriage;
pub mod options;
pub mod roommates;
pub(crate) mod sanitize;
pub mod student_allocation;
