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

use accord_model::preferences::Preferences;
use fixedbitset::FixedBitSet;
use std::hash::Hash;

/// The original ranking with each entry once, first occurrence kept, and
/// entries outside a party of `party_len` players skipped.
pub(crate) fn ranked_once<O>(
    preferences: &Preferences<O>,
    party_len: usize,
) -> impl Iterator<Item = O> + '_
where
    O: Copy + Eq + Hash + Into<usize>,
{
    let mut seen = FixedBitSet::with_capacity(party_len);
    preferences.original().iter().copied().filter(move |&entry| {
        let index: usize = entry.into();
        index < party_len && !seen.put(index)
    })
}

/// `true` if a player with `preferences` would leave `current` (or being
/// alone) for `candidate`.
#[inline]
pub(crate) fn prefers_to_current<O>(
    preferences: &Preferences<O>,
    candidate: O,
    current: Option<O>,
) -> bool
where
    O: Copy + Eq + Hash,
{
    preferences.ranks(candidate)
        && current.is_none_or(|current| preferences.prefers(candidate, current))
}

/// The worst of `held` by `preferences`, or `None` if nothing is held.
#[inline]
pub(crate) fn worst_of<O>(preferences: &Preferences<O>, held: &[O]) -> Option<O>
where
    O: Copy + Eq + Hash,
{
    held.iter()
        .copied()
        .max_by_key(|&entry| preferences.rank(entry).unwrap_or(usize::MAX))
}
