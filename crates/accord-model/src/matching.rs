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

//! Result containers.
//!
//! A matching container is a map from one party to the other that can be
//! read freely but only changed through methods that keep the inverse map in
//! step. Setting `a -> b` in a `SingleMatching` also detaches whoever `b` was
//! matched to before; setting a list in a `MultipleMatching` moves every listed
//! value away from its previous holder. Keys and values are typed indices, so
//! names only appear when the container is rendered as a `MatchingRecord`.

use crate::record::{MatchingRecord, RecordValue};

/// Reasons a container update is refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MatchingUpdateError {
    #[error("key index {index} is out of range for {len} keys")]
    KeyOutOfRange { index: usize, len: usize },
    #[error("value index {index} is out of range for {len} values")]
    ValueOutOfRange { index: usize, len: usize },
    #[error("value index {index} appears more than once in the update")]
    DuplicateValue { index: usize },
    #[error("index {index} cannot be matched to itself")]
    SelfMatch { index: usize },
}

#[inline]
fn check_range(index: usize, len: usize, key: bool) -> Result<(), MatchingUpdateError> {
    if index < len {
        Ok(())
    } else if key {
        Err(MatchingUpdateError::KeyOutOfRange { index, len })
    } else {
        Err(MatchingUpdateError::ValueOutOfRange { index, len })
    }
}

/// A one-to-one matching from keys `K` to values `V`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SingleMatching<K, V> {
    forward: Vec<Option<V>>,
    inverse: Vec<Option<K>>,
}

impl<K, V> SingleMatching<K, V>
where
    K: Copy + Eq + From<usize> + Into<usize>,
    V: Copy + Eq + From<usize> + Into<usize>,
{
    /// Creates an empty matching over `num_keys` keys and `num_values` values.
    #[inline]
    pub fn new(num_keys: usize, num_values: usize) -> Self {
        Self {
            forward: vec![None; num_keys],
            inverse: vec![None; num_values],
        }
    }

    /// Number of keys.
    #[inline]
    pub fn len(&self) -> usize {
        self.forward.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }

    /// The value matched to `key`, or `None` if unmatched or out of range.
    #[inline]
    pub fn get(&self, key: K) -> Option<V> {
        self.forward.get(key.into()).copied().flatten()
    }

    /// The key matched to `value`, or `None` if unmatched or out of range.
    #[inline]
    pub fn key_of(&self, value: V) -> Option<K> {
        self.inverse.get(value.into()).copied().flatten()
    }

    /// Number of matched keys.
    #[inline]
    pub fn matched_count(&self) -> usize {
        self.forward.iter().filter(|entry| entry.is_some()).count()
    }

    /// Matches `key` to `value` (or unmatches it when `value` is `None`).
    ///
    /// The previous value of `key` and the previous key of `value` are detached.
    pub fn set(&mut self, key: K, value: Option<V>) -> Result<(), MatchingUpdateError> {
        let k: usize = key.into();
        check_range(k, self.forward.len(), true)?;
        if let Some(v) = value {
            check_range(v.into(), self.inverse.len(), false)?;
        }

        if let Some(old) = self.forward[k].take() {
            self.inverse[old.into()] = None;
        }
        if let Some(v) = value {
            let v: usize = v.into();
            if let Some(old_key) = self.inverse[v].take() {
                self.forward[old_key.into()] = None;
            }
            self.inverse[v] = Some(key);
        }
        self.forward[k] = value;
        Ok(())
    }

    /// Iterates over every key with its value, in key order.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (K, Option<V>)> + '_ {
        self.forward
            .iter()
            .enumerate()
            .map(|(index, value)| (K::from(index), *value))
    }

    /// Renders the matching by name.
    ///
    /// Keys for which `key_name` returns `None` are left out of the record.
    pub fn to_record<'a, FK, FV>(&self, key_name: FK, value_name: FV) -> MatchingRecord
    where
        FK: Fn(K) -> Option<&'a str>,
        FV: Fn(V) -> &'a str,
    {
        let mut record = MatchingRecord::with_capacity(self.len());
        for (key, value) in self.iter() {
            if let Some(name) = key_name(key) {
                let partner = value.map(|v| value_name(v).to_string());
                record.push(name, RecordValue::Single(partner));
            }
        }
        record
    }
}

impl<K> SingleMatching<K, K>
where
    K: Copy + Eq + From<usize> + Into<usize>,
{
    /// Creates an empty matching within a single party of `len` members.
    #[inline]
    pub fn within(len: usize) -> Self {
        Self::new(len, len)
    }

    /// Matches `a` and `b` with each other, detaching both previous partners.
    ///
    /// Passing `None` unmatches `a` and its partner.
    pub fn set_symmetric(&mut self, a: K, b: Option<K>) -> Result<(), MatchingUpdateError> {
        let ai: usize = a.into();
        check_range(ai, self.forward.len(), true)?;
        if let Some(b) = b {
            let bi: usize = b.into();
            check_range(bi, self.forward.len(), false)?;
            if bi == ai {
                return Err(MatchingUpdateError::SelfMatch { index: ai });
            }
        }

        self.unlink(ai);
        if let Some(b) = b {
            let bi: usize = b.into();
            self.unlink(bi);
            self.forward[ai] = Some(b);
            self.inverse[ai] = Some(b);
            self.forward[bi] = Some(a);
            self.inverse[bi] = Some(a);
        }
        Ok(())
    }

    fn unlink(&mut self, index: usize) {
        if let Some(partner) = self.forward[index].take() {
            let p: usize = partner.into();
            self.forward[p] = None;
            self.inverse[p] = None;
        }
        self.inverse[index] = None;
    }
}

/// A many-to-one matching from capacitated keys `K` to lists of values `V`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultipleMatching<K, V> {
    forward: Vec<Vec<V>>,
    inverse: Vec<Option<K>>,
}

impl<K, V> MultipleMatching<K, V>
where
    K: Copy + Eq + From<usize> + Into<usize>,
    V: Copy + Eq + From<usize> + Into<usize>,
{
    #[inline]
    pub fn new(num_keys: usize, num_values: usize) -> Self {
        Self {
            forward: vec![Vec::new(); num_keys],
            inverse: vec![None; num_values],
        }
    }

    /// Number of keys.
    #[inline]
    pub fn len(&self) -> usize {
        self.forward.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }

    /// The values matched to `key`; empty if unmatched or out of range.
    #[inline]
    pub fn get(&self, key: K) -> &[V] {
        self.forward
            .get(key.into())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// The key holding `value`, if any.
    #[inline]
    pub fn key_of(&self, value: V) -> Option<K> {
        self.inverse.get(value.into()).copied().flatten()
    }

    /// Total number of matched values.
    #[inline]
    pub fn matched_count(&self) -> usize {
        self.inverse.iter().filter(|entry| entry.is_some()).count()
    }

    /// Replaces the values held by `key`.
    ///
    /// Values previously held by `key` but absent from `values` become
    /// unmatched; values held by another key move to `key`.
    pub fn set(&mut self, key: K, values: Vec<V>) -> Result<(), MatchingUpdateError> {
        let k: usize = key.into();
        check_range(k, self.forward.len(), true)?;
        for (position, &value) in values.iter().enumerate() {
            let v: usize = value.into();
            check_range(v, self.inverse.len(), false)?;
            if values[..position].contains(&value) {
                return Err(MatchingUpdateError::DuplicateValue { index: v });
            }
        }

        for old in std::mem::take(&mut self.forward[k]) {
            self.inverse[old.into()] = None;
        }
        for &value in &values {
            let v: usize = value.into();
            if let Some(previous) = self.inverse[v] {
                self.forward[previous.into()].retain(|&entry| entry != value);
            }
            self.inverse[v] = Some(key);
        }
        self.forward[k] = values;
        Ok(())
    }

    /// Moves a single `value` to `key` (appending it), or unmatches it.
    pub fn assign(&mut self, value: V, key: Option<K>) -> Result<(), MatchingUpdateError> {
        let v: usize = value.into();
        check_range(v, self.inverse.len(), false)?;
        if let Some(key) = key {
            check_range(key.into(), self.forward.len(), true)?;
        }

        if let Some(previous) = self.inverse[v].take() {
            self.forward[previous.into()].retain(|&entry| entry != value);
        }
        if let Some(key) = key {
            self.forward[key.into()].push(value);
            self.inverse[v] = Some(key);
        }
        Ok(())
    }

    /// Iterates over every key with its values, in key order.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (K, &[V])> + '_ {
        self.forward
            .iter()
            .enumerate()
            .map(|(index, values)| (K::from(index), values.as_slice()))
    }

    /// Renders the matching by name; keys mapped to `None` are left out.
    pub fn to_record<'a, FK, FV>(&self, key_name: FK, value_name: FV) -> MatchingRecord
    where
        FK: Fn(K) -> Option<&'a str>,
        FV: Fn(V) -> &'a str,
    {
        let mut record = MatchingRecord::with_capacity(self.len());
        for (key, values) in self.iter() {
            if let Some(name) = key_name(key) {
                let partners = values
                    .iter()
                    .map(|&value| value_name(value).to_string())
                    .collect();
                record.push(name, RecordValue::Multiple(partners));
            }
        }
        record
    }
}
