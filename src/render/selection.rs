//! Selektions-Abfragen während des Renderns.

use crate::core::{Id, IdSet, IdType};
use indexmap::{IndexMap, IndexSet};

/// Art einer Selektion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SelectionKind {
    /// Dauerhafte Auswahl
    Selection,
    /// Element unter dem Mauszeiger
    MouseOver,
}

/// Vom Host bereitgestellte Selektions-Abfragen.
///
/// Beeinflusst nur die Tönung von Routen, nie deren Geometrie.
pub trait SelectionHost {
    /// Anzahl selektierter IDs aus `ids`.
    fn selected_count(&self, ids: &IdSet, kind: SelectionKind) -> usize;

    /// Ob eine einzelne ID selektiert ist.
    fn is_selected(&self, id: Id, kind: SelectionKind) -> bool;
}

/// Einfache Selektion über einen Identifier-Typ.
#[derive(Debug, Clone)]
pub struct IdSelection {
    id_type: IdType,
    selected: IndexMap<SelectionKind, IndexSet<Id>>,
}

impl IdSelection {
    /// Leere Selektion für einen Typ.
    pub fn new(id_type: IdType) -> Self {
        Self {
            id_type,
            selected: IndexMap::new(),
        }
    }

    /// Typ der selektierten IDs.
    pub fn id_type(&self) -> &IdType {
        &self.id_type
    }

    /// Fügt IDs zur Selektion hinzu.
    pub fn select(&mut self, kind: SelectionKind, ids: impl IntoIterator<Item = Id>) {
        self.selected.entry(kind).or_default().extend(ids);
    }

    /// Leert eine Selektionsart.
    pub fn clear(&mut self, kind: SelectionKind) {
        self.selected.shift_remove(&kind);
    }

    /// Anzahl selektierter IDs einer Art.
    pub fn len(&self, kind: SelectionKind) -> usize {
        self.selected.get(&kind).map_or(0, IndexSet::len)
    }

    /// Gibt `true` zurück, wenn keine ID dieser Art selektiert ist.
    pub fn is_empty(&self, kind: SelectionKind) -> bool {
        self.len(kind) == 0
    }
}

impl SelectionHost for IdSelection {
    fn selected_count(&self, ids: &IdSet, kind: SelectionKind) -> usize {
        if ids.id_type() != &self.id_type {
            return 0;
        }
        match self.selected.get(&kind) {
            Some(selected) => ids.iter().filter(|id| selected.contains(id)).count(),
            None => 0,
        }
    }

    fn is_selected(&self, id: Id, kind: SelectionKind) -> bool {
        self.selected
            .get(&kind)
            .is_some_and(|selected| selected.contains(&id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selected_count_respects_type_and_kind() {
        let gene = IdType::new("gene");
        let mut selection = IdSelection::new(gene.clone());
        selection.select(SelectionKind::Selection, [1, 3]);
        selection.select(SelectionKind::MouseOver, [2]);

        let ids = IdSet::new(gene, [1, 2, 3, 4]);
        assert_eq!(selection.selected_count(&ids, SelectionKind::Selection), 2);
        assert_eq!(selection.selected_count(&ids, SelectionKind::MouseOver), 1);

        let other = IdSet::new(IdType::new("sample"), [1, 2]);
        assert_eq!(selection.selected_count(&other, SelectionKind::Selection), 0);

        selection.clear(SelectionKind::Selection);
        assert!(selection.is_empty(SelectionKind::Selection));
        assert!(selection.is_selected(2, SelectionKind::MouseOver));
    }
}
