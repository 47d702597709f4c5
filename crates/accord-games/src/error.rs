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

use accord_model::{loading::LoadError, matching::MatchingUpdateError};

/// A fatal problem with a game's input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("{left} has {left_len} members but {right} has {right_len}")]
    UnequalPartySizes {
        left: &'static str,
        left_len: usize,
        right: &'static str,
        right_len: usize,
    },
    #[error("{player} does not rank every member of the {party} exactly once")]
    IncompletePreferences { player: String, party: &'static str },
    #[error("{owner} refers to {party} {index}, which does not exist")]
    UnknownPlayer {
        owner: String,
        party: &'static str,
        index: usize,
    },
    #[error("project {project} refers to supervisor {index}, which does not exist")]
    MissingSupervisor { project: String, index: usize },
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    Update(#[from] MatchingUpdateError),
}

/// One broken rule found by a validity check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidityIssue {
    /// The game has not been solved yet.
    NotSolved,
    /// `player` should be matched but is not.
    Unmatched { player: String },
    /// The game's matching and `player`'s own record of its match disagree.
    Inconsistent { player: String, partner: String },
    /// `player` holds more matches than its capacity.
    CapacityExceeded {
        player: String,
        capacity: usize,
        matched: usize,
    },
    /// `player` is matched to `partner`, which it never ranked.
    Unacceptable { player: String, partner: String },
}

impl std::fmt::Display for ValidityIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidityIssue::NotSolved => write!(f, "the game has not been solved"),
            ValidityIssue::Unmatched { player } => write!(f, "{} is unmatched", player),
            ValidityIssue::Inconsistent { player, partner } => write!(
                f,
                "{} and the matching disagree about its match with {}",
                player, partner
            ),
            ValidityIssue::CapacityExceeded {
                player,
                capacity,
                matched,
            } => write!(
                f,
                "{} holds {} matches but has capacity {}",
                player, matched, capacity
            ),
            ValidityIssue::Unacceptable { player, partner } => {
                write!(f, "{} is matched to {}, which it does not rank", player, partner)
            }
        }
    }
}

/// Every rule a matching breaks, reported together.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub struct MatchingError {
    issues: Vec<ValidityIssue>,
}

impl MatchingError {
    #[inline]
    pub fn issues(&self) -> &[ValidityIssue] {
        &self.issues
    }
}

impl std::fmt::Display for MatchingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid matching ({} issue(s))", self.issues.len())?;
        for issue in &self.issues {
            write!(f, "\n  - {}", issue)?;
        }
        Ok(())
    }
}

/// Turns the collected issues into a result.
pub(crate) fn into_result(issues: Vec<ValidityIssue>) -> Result<(), MatchingError> {
    if issues.is_empty() {
        Ok(())
    } else {
        Err(MatchingError { issues })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matching_error_lists_every_issue() {
        let error = into_result(vec![
            ValidityIssue::Unmatched {
                player: "A".into(),
            },
            ValidityIssue::CapacityExceeded {
                player: "X".into(),
                capacity: 1,
                matched: 2,
            },
        ])
        .unwrap_err();
        assert_eq!(error.issues().len(), 2);
        assert_eq!(
            error.to_string(),
            "invalid matching (2 issue(s))\n  - A is unmatched\n  \
             - X holds 2 matches but has capacity 1"
        );
    }

    #[test]
    fn test_no_issues_is_ok() {
        assert!(into_result(Vec::new()).is_ok());
    }

    #[test]
    fn test_load_errors_convert() {
        let error: GameError = LoadError::MissingCapacity {
            name: "X".into(),
        }
        .into();
        assert_eq!(error.to_string(), "no capacity was given for `X`");
    }
}
