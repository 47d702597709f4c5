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

//! Name-keyed construction.
//!
//! Callers usually describe a game as a table of `name -> ranked names`
//! rows. `PreferenceTable` keeps those rows in the order given, `NameIndex`
//! assigns each name its arena position, and the `load_*` functions resolve
//! every ranking into typed indices. Any name that cannot be resolved is a
//! `LoadError`: the table itself is malformed, which is different from a
//! well-formed ranking that merely mentions an unacceptable partner.

use crate::{
    capacitated::CapacitatedPlayer,
    hierarchy::{Project, Supervisor},
    index::{ProjectIndex, StudentIndex, SupervisorIndex},
    player::Player,
};
use rustc_hash::FxHashMap;

/// Reasons a name-keyed table cannot be turned into entities.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoadError {
    #[error("{party} name `{name}` appears more than once")]
    DuplicateName { party: &'static str, name: String },
    #[error("`{owner}` ranks `{name}`, which is not a known {party}")]
    UnknownName {
        party: &'static str,
        owner: String,
        name: String,
    },
    #[error("no capacity was given for `{name}`")]
    MissingCapacity { name: String },
    #[error("project `{project}` has no supervisor")]
    MissingSupervisor { project: String },
    #[error("project `{project}` names unknown supervisor `{supervisor}`")]
    UnknownSupervisor { project: String, supervisor: String },
}

/// An ordered list of `(name, ranking)` rows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PreferenceTable {
    rows: Vec<(String, Vec<String>)>,
}

impl PreferenceTable {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a row.
    pub fn push<K, R, S>(&mut self, name: K, ranking: R)
    where
        K: Into<String>,
        R: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rows
            .push((name.into(), ranking.into_iter().map(Into::into).collect()));
    }

    /// Row names in insertion order.
    #[inline]
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().map(|(name, _)| name.as_str())
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.rows
            .iter()
            .map(|(name, ranking)| (name.as_str(), ranking.as_slice()))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl<K, R, S> FromIterator<(K, R)> for PreferenceTable
where
    K: Into<String>,
    R: IntoIterator<Item = S>,
    S: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, R)>>(iter: T) -> Self {
        let mut table = PreferenceTable::new();
        for (name, ranking) in iter {
            table.push(name, ranking);
        }
        table
    }
}

impl<K, R, S, const N: usize> From<[(K, R); N]> for PreferenceTable
where
    K: Into<String>,
    R: IntoIterator<Item = S>,
    S: Into<String>,
{
    fn from(rows: [(K, R); N]) -> Self {
        rows.into_iter().collect()
    }
}

/// Collects `(name, value)` pairs into a lookup map; later pairs win.
pub fn keyed<K, V, T>(pairs: T) -> FxHashMap<String, V>
where
    K: Into<String>,
    T: IntoIterator<Item = (K, V)>,
{
    pairs
        .into_iter()
        .map(|(name, value)| (name.into(), value))
        .collect()
}

/// Maps the names of one party to their arena positions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameIndex<I> {
    party: &'static str,
    names: Vec<String>,
    lookup: FxHashMap<String, I>,
}

impl<I> NameIndex<I>
where
    I: Copy + From<usize>,
{
    /// Assigns positions `0..n` to `names` in order.
    pub fn build<'a, T>(party: &'static str, names: T) -> Result<Self, LoadError>
    where
        T: IntoIterator<Item = &'a str>,
    {
        let mut index = Self {
            party,
            names: Vec::new(),
            lookup: FxHashMap::default(),
        };
        for name in names {
            if index.lookup.contains_key(name) {
                return Err(LoadError::DuplicateName {
                    party,
                    name: name.to_string(),
                });
            }
            index.lookup.insert(name.to_string(), I::from(index.names.len()));
            index.names.push(name.to_string());
        }
        Ok(index)
    }

    /// Indexes the row names of `table`.
    #[inline]
    pub fn from_table(party: &'static str, table: &PreferenceTable) -> Result<Self, LoadError> {
        Self::build(party, table.names())
    }

    #[inline]
    pub fn get(&self, name: &str) -> Option<I> {
        self.lookup.get(name).copied()
    }

    /// Resolves a name ranked by `owner`.
    pub fn resolve(&self, owner: &str, name: &str) -> Result<I, LoadError> {
        self.get(name).ok_or_else(|| LoadError::UnknownName {
            party: self.party,
            owner: owner.to_string(),
            name: name.to_string(),
        })
    }

    /// Resolves a whole ranking, preserving order and repeats.
    pub fn resolve_all(&self, owner: &str, ranking: &[String]) -> Result<Vec<I>, LoadError> {
        ranking
            .iter()
            .map(|name| self.resolve(owner, name))
            .collect()
    }

    #[inline]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Builds single-match players from `table`, ranking members of `others`.
pub fn load_players<O>(
    table: &PreferenceTable,
    others: &NameIndex<O>,
) -> Result<Vec<Player<O>>, LoadError>
where
    O: Copy + Eq + std::hash::Hash + From<usize>,
{
    table
        .iter()
        .map(|(name, ranking)| {
            let ranking = others.resolve_all(name, ranking)?;
            Ok(Player::with_preferences(name, ranking))
        })
        .collect()
}

/// Builds capacitated players from `table`; every row needs a capacity.
pub fn load_capacitated<O>(
    table: &PreferenceTable,
    others: &NameIndex<O>,
    capacities: &FxHashMap<String, usize>,
) -> Result<Vec<CapacitatedPlayer<O>>, LoadError>
where
    O: Copy + Eq + std::hash::Hash + From<usize>,
{
    table
        .iter()
        .map(|(name, ranking)| {
            let capacity =
                capacities
                    .get(name)
                    .copied()
                    .ok_or_else(|| LoadError::MissingCapacity {
                        name: name.to_string(),
                    })?;
            let ranking = others.resolve_all(name, ranking)?;
            Ok(CapacitatedPlayer::with_preferences(name, capacity, ranking))
        })
        .collect()
}

/// Wraps capacitated players as supervisors with no projects attached yet.
pub fn load_supervisors(
    table: &PreferenceTable,
    students: &NameIndex<StudentIndex>,
    capacities: &FxHashMap<String, usize>,
) -> Result<Vec<Supervisor>, LoadError> {
    table
        .iter()
        .map(|(name, ranking)| {
            let capacity =
                capacities
                    .get(name)
                    .copied()
                    .ok_or_else(|| LoadError::MissingCapacity {
                        name: name.to_string(),
                    })?;
            let ranking = students.resolve_all(name, ranking)?;
            Ok(Supervisor::with_preferences(name, capacity, ranking))
        })
        .collect()
}

/// Builds projects in the order of `capacities`, each owned by the supervisor
/// named in `owners`.
///
/// Project rankings are left empty; they are derived from the owning
/// supervisor when the game is assembled.
pub fn load_projects(
    capacities: &[(String, usize)],
    owners: &FxHashMap<String, String>,
    supervisors: &NameIndex<SupervisorIndex>,
) -> Result<(NameIndex<ProjectIndex>, Vec<Project>), LoadError> {
    let index = NameIndex::build("project", capacities.iter().map(|(name, _)| name.as_str()))?;
    let projects = capacities
        .iter()
        .map(|(name, capacity)| {
            let owner = owners
                .get(name)
                .ok_or_else(|| LoadError::MissingSupervisor {
                    project: name.clone(),
                })?;
            let supervisor =
                supervisors
                    .get(owner)
                    .ok_or_else(|| LoadError::UnknownSupervisor {
                        project: name.clone(),
                        supervisor: owner.clone(),
                    })?;
            Ok(Project::new(name.as_str(), *capacity, supervisor))
        })
        .collect::<Result<Vec<_>, LoadError>>()?;
    Ok((index, projects))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        capacitated::Capacitated,
        index::{ResidentIndex, ReviewerIndex},
    };

    #[test]
    fn test_table_keeps_row_order() {
        let table = PreferenceTable::from([("B", vec!["X"]), ("A", vec!["Y", "X"])]);
        let names: Vec<&str> = table.names().collect();
        assert_eq!(names, vec!["B", "A"]);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_name_index_rejects_duplicates() {
        let result = NameIndex::<ReviewerIndex>::build("reviewer", ["X", "Y", "X"]);
        assert_eq!(
            result,
            Err(LoadError::DuplicateName {
                party: "reviewer",
                name: "X".to_string()
            })
        );
    }

    #[test]
    fn test_load_players_resolves_rankings() {
        let reviewers = NameIndex::<ReviewerIndex>::build("reviewer", ["X", "Y"]).unwrap();
        let suitors = PreferenceTable::from([("A", vec!["Y", "X"]), ("B", vec!["X"])]);
        let players = load_players(&suitors, &reviewers).unwrap();
        assert_eq!(players[0].name(), "A");
        assert_eq!(
            players[0].preferences().working(),
            &[ReviewerIndex::new(1), ReviewerIndex::new(0)]
        );
        assert_eq!(players[1].preferences().working(), &[ReviewerIndex::new(0)]);
    }

    #[test]
    fn test_unknown_names_are_reported_with_their_owner() {
        let reviewers = NameIndex::<ReviewerIndex>::build("reviewer", ["X"]).unwrap();
        let suitors = PreferenceTable::from([("A", vec!["Q"])]);
        let error = load_players(&suitors, &reviewers).unwrap_err();
        assert_eq!(
            error,
            LoadError::UnknownName {
                party: "reviewer",
                owner: "A".to_string(),
                name: "Q".to_string()
            }
        );
        assert_eq!(error.to_string(), "`A` ranks `Q`, which is not a known reviewer");
    }

    #[test]
    fn test_load_capacitated_requires_capacity() {
        let residents = NameIndex::<ResidentIndex>::build("resident", ["A", "B"]).unwrap();
        let hospitals = PreferenceTable::from([("X", vec!["B", "A"]), ("Y", vec!["A"])]);
        let capacities = keyed([("X", 2)]);
        assert_eq!(
            load_capacitated(&hospitals, &residents, &capacities),
            Err(LoadError::MissingCapacity {
                name: "Y".to_string()
            })
        );

        let capacities = keyed([("X", 2), ("Y", 1)]);
        let loaded = load_capacitated(&hospitals, &residents, &capacities).unwrap();
        assert_eq!(loaded[0].capacity(), 2);
        assert_eq!(loaded[1].preferences().working(), &[ResidentIndex::new(0)]);
    }

    #[test]
    fn test_load_projects_checks_ownership() {
        let supervisors = NameIndex::<SupervisorIndex>::build("supervisor", ["F"]).unwrap();
        let capacities = vec![("P1".to_string(), 2), ("P2".to_string(), 1)];

        let owners = keyed([("P1", "F".to_string())]);
        assert_eq!(
            load_projects(&capacities, &owners, &supervisors).map(|(_, p)| p.len()),
            Err(LoadError::MissingSupervisor {
                project: "P2".to_string()
            })
        );

        let owners = keyed([("P1", "F".to_string()), ("P2", "G".to_string())]);
        assert_eq!(
            load_projects(&capacities, &owners, &supervisors).map(|(_, p)| p.len()),
            Err(LoadError::UnknownSupervisor {
                project: "P2".to_string(),
                supervisor: "G".to_string()
            })
        );

        let owners = keyed([("P1", "F".to_string()), ("P2", "F".to_string())]);
        let (index, projects) = load_projects(&capacities, &owners, &supervisors).unwrap();
        assert_eq!(index.get("P2"), Some(ProjectIndex::new(1)));
        assert_eq!(projects[0].supervisor(), SupervisorIndex::new(0));
        assert_eq!(projects[1].capacity(), 1);
    }

    #[test]
    fn test_load_supervisors() {
        let students = NameIndex::<StudentIndex>::build("student", ["S1", "S2"]).unwrap();
        let table = PreferenceTable::from([("F", vec!["S2", "S1"])]);
        let supervisors = load_supervisors(&table, &students, &keyed([("F", 3)])).unwrap();
        assert_eq!(supervisors[0].capacity(), 3);
        assert_eq!(
            supervisors[0].party().preferences().working(),
            &[StudentIndex::new(1), StudentIndex::new(0)]
        );
    }
}
