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

//! Plain, name-keyed form of a matching for external consumption.

/// The value side of a record entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RecordValue {
    /// A single partner, or `None` when unmatched.
    Single(Option<String>),
    /// Every partner of a capacitated player, best first.
    Multiple(Vec<String>),
}

impl RecordValue {
    /// The single partner, if this is a single-valued entry with a partner.
    #[inline]
    pub fn as_single(&self) -> Option<&str> {
        match self {
            RecordValue::Single(partner) => partner.as_deref(),
            RecordValue::Multiple(_) => None,
        }
    }

    /// The partners of a list-valued entry; empty for single-valued entries.
    #[inline]
    pub fn as_multiple(&self) -> &[String] {
        match self {
            RecordValue::Single(_) => &[],
            RecordValue::Multiple(partners) => partners,
        }
    }
}

impl std::fmt::Display for RecordValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordValue::Single(Some(name)) => write!(f, "{}", name),
            RecordValue::Single(None) => write!(f, "-"),
            RecordValue::Multiple(names) => write!(f, "[{}]", names.join(", ")),
        }
    }
}

/// A matching rendered as `(name, value)` entries in key order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MatchingRecord {
    entries: Vec<(String, RecordValue)>,
}

impl MatchingRecord {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn push(&mut self, name: impl Into<String>, value: RecordValue) {
        self.entries.push((name.into(), value));
    }

    /// Looks up the entry for `name`.
    #[inline]
    pub fn get(&self, name: &str) -> Option<&RecordValue> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (&str, &RecordValue)> {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl std::fmt::Display for MatchingRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{")?;
        for (position, (key, value)) in self.entries.iter().enumerate() {
            if position > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", key, value)?;
        }
        write!(f, "}}")
    }
}
