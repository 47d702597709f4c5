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

/// A last-in-first-out stack of free players.
///
/// Every engine pops the most recently pushed player first. The order is
/// part of the observable behaviour: different pop orders reach the same
/// optimal matching but through different intermediate states, and the
/// statistics and monitor events depend on it.
#[derive(Clone, Debug)]
pub struct Worklist<I> {
    entries: Vec<I>,
}

impl<I> Default for Worklist<I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I> Worklist<I> {
    /// Creates a new, empty `Worklist`.
    #[inline]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn push(&mut self, entry: I) {
        self.entries.push(entry);
    }

    /// Pops the most recently pushed player.
    #[inline]
    pub fn pop(&mut self) -> Option<I> {
        self.entries.pop()
    }
}

impl<I> Extend<I> for Worklist<I> {
    #[inline]
    fn extend<T: IntoIterator<Item = I>>(&mut self, iter: T) {
        self.entries.extend(iter);
    }
}

impl<I> FromIterator<I> for Worklist<I> {
    fn from_iter<T: IntoIterator<Item = I>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
