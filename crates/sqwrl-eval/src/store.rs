//! Query-scoped collection store
//!
//! Collections are identified by `(query, name)`. Each identity has one kind
//! (set or bag) for its whole lifetime and holds one container per group key,
//! with `""` for the ungrouped container. The number of grouping arguments
//! used with an identity is recorded once and checked on every reference.

use indexmap::{IndexMap, IndexSet};
use log::debug;
use serde::Serialize;
use sqwrl_types::BuiltInArgument;
use std::fmt;

use crate::error::{EvalResult, SqwrlError};

/// Identity of a named collection within a query
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct CollectionId {
    pub query: String,
    pub name: String,
}

impl CollectionId {
    pub fn new(query: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for CollectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.query, self.name)
    }
}

/// Set or bag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CollectionKind {
    Set,
    Bag,
}

impl fmt::Display for CollectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Set => f.write_str("set"),
            Self::Bag => f.write_str("bag"),
        }
    }
}

/// One grouped container
///
/// Sets keep each distinct element once; bags keep insertion order and
/// duplicates. Set equality ignores order, bag equality does not, and a set
/// never equals a bag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "elements")]
pub enum Collection {
    Set(IndexSet<BuiltInArgument>),
    Bag(Vec<BuiltInArgument>),
}

impl Collection {
    /// Create an empty container of the given kind
    pub fn new(kind: CollectionKind) -> Self {
        match kind {
            CollectionKind::Set => Self::Set(IndexSet::new()),
            CollectionKind::Bag => Self::Bag(Vec::new()),
        }
    }

    /// Build a container of the given kind from elements in order
    pub fn from_elements(kind: CollectionKind, elements: impl IntoIterator<Item = BuiltInArgument>) -> Self {
        match kind {
            CollectionKind::Set => Self::Set(elements.into_iter().collect()),
            CollectionKind::Bag => Self::Bag(elements.into_iter().collect()),
        }
    }

    pub fn kind(&self) -> CollectionKind {
        match self {
            Self::Set(_) => CollectionKind::Set,
            Self::Bag(_) => CollectionKind::Bag,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Set(set) => set.len(),
            Self::Bag(bag) => bag.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Add an element; sets ignore duplicates
    pub fn insert(&mut self, element: BuiltInArgument) {
        match self {
            Self::Set(set) => {
                set.insert(element);
            }
            Self::Bag(bag) => bag.push(element),
        }
    }

    pub fn contains(&self, element: &BuiltInArgument) -> bool {
        match self {
            Self::Set(set) => set.contains(element),
            Self::Bag(bag) => bag.contains(element),
        }
    }

    /// Elements in storage order
    pub fn iter(&self) -> Box<dyn Iterator<Item = &BuiltInArgument> + '_> {
        match self {
            Self::Set(set) => Box::new(set.iter()),
            Self::Bag(bag) => Box::new(bag.iter()),
        }
    }

    /// Owned copy of the elements in storage order
    pub fn to_vec(&self) -> Vec<BuiltInArgument> {
        self.iter().cloned().collect()
    }
}

#[derive(Debug, Clone)]
struct Entry {
    kind: CollectionKind,
    groups: IndexMap<String, Collection>,
}

/// All collections of one query evaluation
#[derive(Debug, Clone, Default)]
pub struct CollectionStore {
    entries: IndexMap<CollectionId, Entry>,
    arities: IndexMap<CollectionId, usize>,
}

impl CollectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if any group of the identity has been created
    pub fn is_declared(&self, id: &CollectionId) -> bool {
        self.entries.contains_key(id)
    }

    /// Check if the group's container has been created
    pub fn is_group_declared(&self, id: &CollectionId, group_key: &str) -> bool {
        self.entries
            .get(id)
            .is_some_and(|entry| entry.groups.contains_key(group_key))
    }

    /// Recorded kind of the identity
    pub fn kind_of(&self, id: &CollectionId) -> Option<CollectionKind> {
        self.entries.get(id).map(|entry| entry.kind)
    }

    /// Recorded group arity of the identity
    pub fn group_arity(&self, id: &CollectionId) -> Option<usize> {
        self.arities.get(id).copied()
    }

    /// Record the group arity, or check it against the recorded one
    pub fn declare_group_arity(&mut self, id: &CollectionId, arity: usize) -> EvalResult<()> {
        match self.arities.get(id) {
            Some(&recorded) if recorded != arity => Err(SqwrlError::GroupArityMismatch {
                collection: id.to_string(),
                recorded,
                requested: arity,
            }),
            Some(_) => Ok(()),
            None => {
                self.arities.insert(id.clone(), arity);
                Ok(())
            }
        }
    }

    /// Create an empty group container
    pub fn create(
        &mut self,
        id: &CollectionId,
        group_key: &str,
        kind: CollectionKind,
    ) -> EvalResult<&mut Collection> {
        self.insert_group(id, group_key, Collection::new(kind))
    }

    /// Store a computed group container
    ///
    /// Fails if the group already exists; callers check `is_group_declared`
    /// first when reuse is allowed.
    pub fn put(&mut self, id: &CollectionId, group_key: &str, collection: Collection) -> EvalResult<()> {
        self.insert_group(id, group_key, collection).map(|_| ())
    }

    /// The existing group container of the given kind, created if absent
    pub fn get_or_create(
        &mut self,
        id: &CollectionId,
        group_key: &str,
        kind: CollectionKind,
    ) -> EvalResult<&mut Collection> {
        self.check_kind(id, kind)?;
        if self.is_group_declared(id, group_key) {
            self.get_mut(id, group_key)
        } else {
            self.create(id, group_key, kind)
        }
    }

    /// Look up a group container
    pub fn get(&self, id: &CollectionId, group_key: &str) -> EvalResult<&Collection> {
        self.entries
            .get(id)
            .and_then(|entry| entry.groups.get(group_key))
            .ok_or_else(|| SqwrlError::collection_not_found(describe(id, group_key)))
    }

    /// Look up a group container for modification
    pub fn get_mut(&mut self, id: &CollectionId, group_key: &str) -> EvalResult<&mut Collection> {
        self.entries
            .get_mut(id)
            .and_then(|entry| entry.groups.get_mut(group_key))
            .ok_or_else(|| SqwrlError::collection_not_found(describe(id, group_key)))
    }

    /// All groups of an identity in creation order
    pub fn groups(&self, id: &CollectionId) -> EvalResult<impl Iterator<Item = (&str, &Collection)>> {
        self.entries
            .get(id)
            .map(|entry| entry.groups.iter().map(|(key, c)| (key.as_str(), c)))
            .ok_or_else(|| SqwrlError::collection_not_found(id))
    }

    /// Merge every group of an identity into one container of its kind
    pub fn ungrouped(&self, id: &CollectionId) -> EvalResult<Collection> {
        let entry = self
            .entries
            .get(id)
            .ok_or_else(|| SqwrlError::collection_not_found(id))?;
        Ok(Collection::from_elements(
            entry.kind,
            entry.groups.values().flat_map(Collection::to_vec),
        ))
    }

    /// Identities in creation order
    pub fn ids(&self) -> impl Iterator<Item = &CollectionId> {
        self.entries.keys()
    }

    /// Drop every collection, kind and arity record
    pub fn reset(&mut self) {
        debug!(
            "Resetting collection store ({} collections)",
            self.entries.len()
        );
        self.entries.clear();
        self.arities.clear();
    }

    fn check_kind(&self, id: &CollectionId, kind: CollectionKind) -> EvalResult<()> {
        match self.kind_of(id) {
            Some(recorded) if recorded != kind => Err(SqwrlError::CollectionKindMismatch {
                collection: id.to_string(),
                recorded: recorded.to_string(),
                requested: kind.to_string(),
            }),
            _ => Ok(()),
        }
    }

    fn insert_group(
        &mut self,
        id: &CollectionId,
        group_key: &str,
        collection: Collection,
    ) -> EvalResult<&mut Collection> {
        let kind = collection.kind();
        self.check_kind(id, kind)?;

        if self.is_group_declared(id, group_key) {
            return Err(SqwrlError::internal(format!(
                "group {} already exists",
                describe(id, group_key)
            )));
        }

        let entry = self.entries.entry(id.clone()).or_insert_with(|| {
            debug!("Declaring {} collection {}", kind, id);
            Entry {
                kind,
                groups: IndexMap::new(),
            }
        });

        debug!("Creating group {}", describe(id, group_key));
        Ok(entry
            .groups
            .entry(group_key.to_string())
            .or_insert(collection))
    }
}

fn describe(id: &CollectionId, group_key: &str) -> String {
    if group_key.is_empty() {
        id.to_string()
    } else {
        format!("{} with group key {}", id, group_key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqwrl_types::Literal;

    fn int(i: i32) -> BuiltInArgument {
        BuiltInArgument::literal(Literal::int(i))
    }

    #[test]
    fn set_equality_ignores_order() {
        let a = Collection::from_elements(CollectionKind::Set, vec![int(1), int(2)]);
        let b = Collection::from_elements(CollectionKind::Set, vec![int(2), int(1)]);
        assert_eq!(a, b);
    }

    #[test]
    fn bag_equality_is_ordered() {
        let a = Collection::from_elements(CollectionKind::Bag, vec![int(1), int(2)]);
        let b = Collection::from_elements(CollectionKind::Bag, vec![int(2), int(1)]);
        assert_ne!(a, b);
    }

    #[test]
    fn set_never_equals_bag() {
        let a = Collection::from_elements(CollectionKind::Set, vec![int(1)]);
        let b = Collection::from_elements(CollectionKind::Bag, vec![int(1)]);
        assert_ne!(a, b);
    }

    #[test]
    fn duplicate_group_creation_is_internal_error() {
        let mut store = CollectionStore::new();
        let id = CollectionId::new("q", "s");
        store.create(&id, "", CollectionKind::Set).unwrap();
        let err = store.create(&id, "", CollectionKind::Set).unwrap_err();
        assert!(matches!(err, SqwrlError::Internal { .. }));
    }
}
