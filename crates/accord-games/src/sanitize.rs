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

//! Input screening shared by the games.
//!
//! One-to-one games reject anything but complete rankings outright. The
//! capacitated games report what they find and, in clean mode, repair it:
//! duplicate entries are dropped, out-of-range entries are pruned, and
//! rankings that are not returned are struck until every remaining list is
//! reciprocated. A player left with nothing to rank is excluded. Exclusion is
//! a tombstone bit, so arena positions never move.

use crate::{
    diagnostics::{Diagnostic, Diagnostics},
    error::GameError,
};
use accord_engine::role::Ranking;
use accord_model::{
    capacitated::{Capacitated, CapacitatedPlayer},
    hierarchy::{Project, Supervisor},
    index::StudentIndex,
    player::Player,
};
use fixedbitset::FixedBitSet;
use std::hash::Hash;

/// A named party member with a working ranking over `O`.
pub(crate) trait Member<O>: Ranking<O>
where
    O: Copy + Eq + Hash,
{
    fn label(&self) -> &str;
}

impl<O> Member<O> for Player<O>
where
    O: Copy + Eq + Hash,
{
    #[inline]
    fn label(&self) -> &str {
        self.name()
    }
}

impl<O> Member<O> for CapacitatedPlayer<O>
where
    O: Copy + Eq + Hash,
{
    #[inline]
    fn label(&self) -> &str {
        self.name()
    }
}

impl Member<StudentIndex> for Project {
    #[inline]
    fn label(&self) -> &str {
        self.name()
    }
}

impl Member<StudentIndex> for Supervisor {
    #[inline]
    fn label(&self) -> &str {
        self.name()
    }
}

/// Fails unless every member ranks each member of a party of `party_len`
/// exactly once. With `skip_self` the member's own position must be left out.
pub(crate) fn require_complete<O, E>(
    members: &[E],
    party: &'static str,
    party_len: usize,
    skip_self: bool,
) -> Result<(), GameError>
where
    O: Copy + Eq + Hash + Into<usize>,
    E: Member<O>,
{
    let expected = if skip_self {
        party_len.saturating_sub(1)
    } else {
        party_len
    };
    for (position, member) in members.iter().enumerate() {
        let ranking = member.candidates().working();
        let mut seen = FixedBitSet::with_capacity(party_len);
        let complete = ranking.len() == expected
            && ranking.iter().all(|&entry| {
                let entry: usize = entry.into();
                entry < party_len && !(skip_self && entry == position) && !seen.put(entry)
            });
        if !complete {
            return Err(GameError::IncompletePreferences {
                player: member.label().to_string(),
                party,
            });
        }
    }
    Ok(())
}

/// Handles entries that point outside a party of `party_len`.
///
/// They cannot be solved with, so outside clean mode the first one is fatal.
pub(crate) fn screen_unknown<O, E>(
    members: &mut [E],
    party: &'static str,
    party_len: usize,
    clean: bool,
    diagnostics: &mut Diagnostics,
) -> Result<(), GameError>
where
    O: Copy + Eq + Hash + Into<usize>,
    E: Member<O>,
{
    for member in members.iter_mut() {
        let unknown: Vec<usize> = member
            .candidates()
            .working()
            .iter()
            .map(|&entry| entry.into())
            .filter(|&entry| entry >= party_len)
            .collect();
        let Some(&first) = unknown.first() else {
            continue;
        };
        if !clean {
            return Err(GameError::UnknownPlayer {
                owner: member.label().to_string(),
                party,
                index: first,
            });
        }
        for index in unknown {
            diagnostics.report(Diagnostic::UnknownRanking {
                player: member.label().to_string(),
                entry: format!("{} {}", party, index),
                repaired: true,
            });
        }
        member
            .candidates_mut()
            .retain(|&entry| entry.into() < party_len);
    }
    Ok(())
}

/// Reports repeated entries and, in clean mode, keeps first occurrences only.
pub(crate) fn screen_duplicates<O, E>(
    members: &mut [E],
    others: &[String],
    clean: bool,
    diagnostics: &mut Diagnostics,
) where
    O: Copy + Eq + Hash + Into<usize>,
    E: Member<O>,
{
    for member in members.iter_mut() {
        let duplicates = member.candidates().duplicates();
        if duplicates.is_empty() {
            continue;
        }
        for entry in duplicates {
            diagnostics.report(Diagnostic::DuplicateRanking {
                player: member.label().to_string(),
                entry: others[entry.into()].clone(),
                repaired: clean,
            });
        }
        if clean {
            member.candidates_mut().deduplicate();
        }
    }
}

/// Reports capacities below one and, in clean mode, excludes those members.
pub(crate) fn screen_capacities<O, E>(
    members: &[E],
    excluded: &mut FixedBitSet,
    clean: bool,
    diagnostics: &mut Diagnostics,
) where
    O: Copy + Eq + Hash,
    E: Member<O> + Capacitated<O>,
{
    for (position, member) in members.iter().enumerate() {
        if member.capacity() > 0 {
            continue;
        }
        diagnostics.report(Diagnostic::InvalidCapacity {
            player: member.label().to_string(),
            capacity: member.capacity(),
            repaired: clean,
        });
        if clean {
            excluded.insert(position);
        }
    }
}

/// Reports every entry of `left` that the ranked member of `right` does not
/// rank back. Each pair is reported once.
pub(crate) fn report_non_reciprocal<L, R, A, B>(
    left: &[A],
    right: &[B],
    clean: bool,
    diagnostics: &mut Diagnostics,
) where
    L: Copy + Eq + Hash + From<usize>,
    R: Copy + Eq + Hash + Into<usize>,
    A: Member<R>,
    B: Member<L>,
{
    for (position, member) in left.iter().enumerate() {
        let me = L::from(position);
        let ranking = member.candidates().working();
        for (index, &entry) in ranking.iter().enumerate() {
            if ranking[..index].contains(&entry) {
                continue;
            }
            let other = &right[entry.into()];
            if !other.candidates().contains(me) {
                diagnostics.report(Diagnostic::NonReciprocalRanking {
                    player: member.label().to_string(),
                    entry: other.label().to_string(),
                    repaired: clean,
                });
            }
        }
    }
}

/// Reports members with an empty working list without excluding them.
pub(crate) fn report_empty<O, E>(members: &[E], diagnostics: &mut Diagnostics)
where
    O: Copy + Eq + Hash,
    E: Member<O>,
{
    for member in members.iter().filter(|member| member.is_exhausted()) {
        diagnostics.report(Diagnostic::EmptyPreferences {
            player: member.label().to_string(),
            repaired: false,
        });
    }
}

/// Excludes members whose working list is empty. Returns `true` if any
/// member was newly excluded.
pub(crate) fn exclude_empty<O, E>(
    members: &[E],
    excluded: &mut FixedBitSet,
    diagnostics: &mut Diagnostics,
) -> bool
where
    O: Copy + Eq + Hash,
    E: Member<O>,
{
    let mut any = false;
    for (position, member) in members.iter().enumerate() {
        if !excluded.contains(position) && member.is_exhausted() {
            excluded.insert(position);
            diagnostics.report(Diagnostic::EmptyPreferences {
                player: member.label().to_string(),
                repaired: true,
            });
            any = true;
        }
    }
    any
}

/// Keeps only the entries of `left` that are still in the game and rank the
/// member back. Excluded members of `left` lose their whole list.
pub(crate) fn keep_reciprocated<L, R, A, B>(
    left: &mut [A],
    left_excluded: &FixedBitSet,
    right: &[B],
    right_excluded: &FixedBitSet,
) where
    L: Copy + Eq + Hash + From<usize>,
    R: Copy + Eq + Hash + Into<usize>,
    A: Member<R>,
    B: Member<L>,
{
    for (position, member) in left.iter_mut().enumerate() {
        if left_excluded.contains(position) {
            member.candidates_mut().retain(|_| false);
            continue;
        }
        let me = L::from(position);
        member.candidates_mut().retain(|&entry| {
            let entry: usize = entry.into();
            !right_excluded.contains(entry) && right[entry].candidates().contains(me)
        });
    }
}

/// Strikes unreturned rankings from both sides and excludes emptied members
/// until nothing changes.
pub(crate) fn prune_two_sided<L, R, A, B>(
    left: &mut [A],
    left_excluded: &mut FixedBitSet,
    right: &mut [B],
    right_excluded: &mut FixedBitSet,
    diagnostics: &mut Diagnostics,
) where
    L: Copy + Eq + Hash + From<usize> + Into<usize>,
    R: Copy + Eq + Hash + From<usize> + Into<usize>,
    A: Member<R>,
    B: Member<L>,
{
    loop {
        keep_reciprocated(left, left_excluded, right, right_excluded);
        keep_reciprocated(right, right_excluded, left, left_excluded);
        let left_changed = exclude_empty(left, left_excluded, diagnostics);
        let right_changed = exclude_empty(right, right_excluded, diagnostics);
        if !left_changed && !right_changed {
            break;
        }
    }
}

/// Names of `members`, by position.
pub(crate) fn names<O, E>(members: &[E]) -> Vec<String>
where
    O: Copy + Eq + Hash,
    E: Member<O>,
{
    members
        .iter()
        .map(|member| member.label().to_string())
        .collect()
}
