//! Ordered field table and its ownership discipline
//!
//! A class's field declarations live in a `FieldTable`, ordered by
//! declaration. A schema built on top of a parent starts out sharing the
//! parent's frozen table by reference (`TableState::Inherited`); the first
//! declaration of its own triggers a copy into `TableState::Owned`, so a
//! child can never mutate an ancestor's (or a sibling's) table.

use std::sync::Arc;

use tracing::trace;

use super::decl::FieldDeclaration;

/// Field-key -> declaration table in declaration order.
///
/// Re-declaring an existing key replaces the declaration in place, keeping
/// its original position. Tables are small; a keyed scan over a `Vec` keeps
/// iteration order trivially correct.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldTable {
    entries: Vec<FieldDeclaration>,
}

impl FieldTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the declaration for its key.
    ///
    /// A replaced declaration keeps its original position in declaration
    /// order; nothing of the old declaration survives the replacement.
    pub fn insert(&mut self, declaration: FieldDeclaration) {
        match self.entries.iter_mut().find(|e| e.key == declaration.key) {
            Some(existing) => *existing = declaration,
            None => self.entries.push(declaration),
        }
    }

    /// Declaration for a field key
    pub fn get(&self, key: &str) -> Option<&FieldDeclaration> {
        self.entries.iter().find(|e| e.key == key)
    }

    /// Whether the table declares a field key
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Iterate declarations in declaration order
    pub fn iter(&self) -> impl Iterator<Item = &FieldDeclaration> {
        self.entries.iter()
    }

    /// Iterate field keys in declaration order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.key.as_str())
    }

    /// Number of declared fields
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no declarations
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Who owns a builder's field table.
///
/// `Inherited` shares a parent's frozen table; `Owned` is this builder's
/// private copy. The transition happens in exactly one place, [`to_mut`],
/// before the first own declaration is inserted.
///
/// [`to_mut`]: TableState::to_mut
#[derive(Debug, Clone)]
pub enum TableState {
    /// The builder's own mutable table
    Owned(FieldTable),
    /// A parent's frozen table, shared by reference
    Inherited(Arc<FieldTable>),
}

impl Default for TableState {
    fn default() -> Self {
        TableState::Owned(FieldTable::new())
    }
}

impl TableState {
    /// Share a parent's frozen table
    pub fn inherited(table: Arc<FieldTable>) -> Self {
        TableState::Inherited(table)
    }

    /// Read access regardless of ownership
    pub fn table(&self) -> &FieldTable {
        match self {
            TableState::Owned(table) => table,
            TableState::Inherited(shared) => shared,
        }
    }

    /// Mutable access, copying an inherited table first.
    ///
    /// The copy must happen before the new declaration is inserted, never
    /// after: the parent's table stays exactly as frozen.
    pub fn to_mut(&mut self) -> &mut FieldTable {
        if let TableState::Inherited(shared) = self {
            trace!("copying inherited field table ({} entries)", shared.len());
            *self = TableState::Owned((**shared).clone());
        }
        match self {
            TableState::Owned(table) => table,
            TableState::Inherited(_) => unreachable!("table was just made owned"),
        }
    }

    /// Freeze into a shareable handle.
    ///
    /// A still-inherited state hands back the parent's own handle: a class
    /// that declares nothing shares its ancestor's table all the way
    /// through.
    pub fn freeze(self) -> Arc<FieldTable> {
        match self {
            TableState::Owned(table) => Arc::new(table),
            TableState::Inherited(shared) => shared,
        }
    }

    /// Whether this builder owns its table
    pub fn is_owned(&self) -> bool {
        matches!(self, TableState::Owned(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::decl::FieldOptions;

    fn decl(key: &str, id: u32) -> FieldDeclaration {
        FieldDeclaration::from_options(key, FieldOptions::new(id))
    }

    #[test]
    fn test_insert_preserves_declaration_order() {
        let mut table = FieldTable::new();
        table.insert(decl("b", 2));
        table.insert(decl("a", 1));
        table.insert(decl("c", 3));

        let keys: Vec<_> = table.keys().collect();
        assert_eq!(keys, ["b", "a", "c"]);
    }

    #[test]
    fn test_reinsert_replaces_in_place() {
        let mut table = FieldTable::new();
        table.insert(decl("a", 1));
        table.insert(decl("b", 2));
        table.insert(decl("a", 9));

        let keys: Vec<_> = table.keys().collect();
        assert_eq!(keys, ["a", "b"]);
        assert_eq!(table.get("a").unwrap().id, 9);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_inherited_shares_until_first_mutation() {
        let mut parent = FieldTable::new();
        parent.insert(decl("x", 1));
        let parent = Arc::new(parent);

        let state = TableState::inherited(Arc::clone(&parent));
        assert!(!state.is_owned());

        // A child that declares nothing hands back the very same table
        let frozen = state.freeze();
        assert!(Arc::ptr_eq(&frozen, &parent));
    }

    #[test]
    fn test_mutation_copies_and_isolates() {
        let mut parent_table = FieldTable::new();
        parent_table.insert(decl("x", 1));
        let parent = Arc::new(parent_table);

        let mut state = TableState::inherited(Arc::clone(&parent));
        state.to_mut().insert(decl("y", 2));
        assert!(state.is_owned());

        // Child sees both fields; parent is untouched
        assert_eq!(state.table().len(), 2);
        assert_eq!(parent.len(), 1);
        assert!(!parent.contains("y"));

        let frozen = state.freeze();
        assert!(!Arc::ptr_eq(&frozen, &parent));
    }

    #[test]
    fn test_child_overwrite_does_not_leak_to_parent() {
        let mut parent_table = FieldTable::new();
        parent_table.insert(decl("x", 1));
        let parent = Arc::new(parent_table);

        let mut state = TableState::inherited(Arc::clone(&parent));
        state.to_mut().insert(decl("x", 5));

        assert_eq!(state.table().get("x").unwrap().id, 5);
        assert_eq!(parent.get("x").unwrap().id, 1);
    }
}
