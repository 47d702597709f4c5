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

//! Input problems found while a game is assembled.
//!
//! Every recoverable problem becomes a `Diagnostic`. It is logged at warn
//! level as it is found and kept on the game, so callers can inspect what
//! was reported (and, in clean mode, repaired) without scraping logs.

/// A recoverable problem with a game's input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// `player` ranks `entry` more than once.
    DuplicateRanking {
        player: String,
        entry: String,
        repaired: bool,
    },
    /// `player` ranks `entry`, which is not part of the game.
    UnknownRanking {
        player: String,
        entry: String,
        repaired: bool,
    },
    /// `player` ranks `entry` but `entry` does not rank `player` back.
    NonReciprocalRanking {
        player: String,
        entry: String,
        repaired: bool,
    },
    /// `player` has nobody left to rank; repairing removes it from the game.
    EmptyPreferences { player: String, repaired: bool },
    /// `player` has a capacity below one; repairing removes it from the game.
    InvalidCapacity {
        player: String,
        capacity: usize,
        repaired: bool,
    },
    /// A project offers more places than its supervisor; repairing caps it.
    ProjectCapacityExceedsSupervisor {
        project: String,
        supervisor: String,
        project_capacity: usize,
        supervisor_capacity: usize,
        repaired: bool,
    },
    /// A supervisor can take more students than its projects offer together;
    /// repairing caps it.
    SupervisorCapacityExceedsProjects {
        supervisor: String,
        capacity: usize,
        total: usize,
        repaired: bool,
    },
    /// Stable roommates: no stable matching exists for these players.
    NoStableMatching { players: Vec<String> },
}

impl Diagnostic {
    /// `true` if the game repaired the problem before solving.
    pub fn is_repaired(&self) -> bool {
        match self {
            Diagnostic::DuplicateRanking { repaired, .. }
            | Diagnostic::UnknownRanking { repaired, .. }
            | Diagnostic::NonReciprocalRanking { repaired, .. }
            | Diagnostic::EmptyPreferences { repaired, .. }
            | Diagnostic::InvalidCapacity { repaired, .. }
            | Diagnostic::ProjectCapacityExceedsSupervisor { repaired, .. }
            | Diagnostic::SupervisorCapacityExceedsProjects { repaired, .. } => *repaired,
            Diagnostic::NoStableMatching { .. } => false,
        }
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let suffix = |repaired: bool| if repaired { " (repaired)" } else { "" };
        match self {
            Diagnostic::DuplicateRanking {
                player,
                entry,
                repaired,
            } => write!(f, "{} ranks {} more than once{}", player, entry, suffix(*repaired)),
            Diagnostic::UnknownRanking {
                player,
                entry,
                repaired,
            } => write!(
                f,
                "{} ranks {}, which is not in the game{}",
                player,
                entry,
                suffix(*repaired)
            ),
            Diagnostic::NonReciprocalRanking {
                player,
                entry,
                repaired,
            } => write!(
                f,
                "{} ranks {}, but {} does not rank {}{}",
                player,
                entry,
                entry,
                player,
                suffix(*repaired)
            ),
            Diagnostic::EmptyPreferences { player, repaired } => {
                write!(f, "{} has an empty preference list{}", player, suffix(*repaired))
            }
            Diagnostic::InvalidCapacity {
                player,
                capacity,
                repaired,
            } => write!(
                f,
                "{} has capacity {}, expected at least 1{}",
                player,
                capacity,
                suffix(*repaired)
            ),
            Diagnostic::ProjectCapacityExceedsSupervisor {
                project,
                supervisor,
                project_capacity,
                supervisor_capacity,
                repaired,
            } => write!(
                f,
                "{} has capacity {}, more than its supervisor {} ({}){}",
                project,
                project_capacity,
                supervisor,
                supervisor_capacity,
                suffix(*repaired)
            ),
            Diagnostic::SupervisorCapacityExceedsProjects {
                supervisor,
                capacity,
                total,
                repaired,
            } => write!(
                f,
                "{} has capacity {}, but its projects only offer {}{}",
                supervisor,
                capacity,
                total,
                suffix(*repaired)
            ),
            Diagnostic::NoStableMatching { players } => write!(
                f,
                "no stable matching exists; left without a partner: [{}]",
                players.join(", ")
            ),
        }
    }
}

/// The diagnostics collected by one game.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Logs `diagnostic` and keeps it.
    pub fn report(&mut self, diagnostic: Diagnostic) {
        ::log::warn!("{}", diagnostic);
        self.entries.push(diagnostic);
    }

    #[inline]
    pub fn as_slice(&self) -> &[Diagnostic] {
        &self.entries
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.entries.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drops every `NoStableMatching` entry; used before a solve reports anew.
    pub(crate) fn clear_outcome(&mut self) {
        self.entries
            .retain(|entry| !matches!(entry, Diagnostic::NoStableMatching { .. }));
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
