//! Typisierte, unveränderliche ID-Mengen mit Mengenalgebra.

use super::id_type::{Id, IdMappingRegistry, IdType, INVALID_ID};
use indexmap::IndexSet;
use std::sync::Arc;

/// Unveränderliche Menge von IDs eines Identifier-Typs.
///
/// Die Einfüge-Reihenfolge bleibt erhalten (deterministische Iteration),
/// Gleichheit ignoriert sie. Klonen ist O(1).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdSet {
    id_type: IdType,
    ids: Arc<IndexSet<Id>>,
}

impl IdSet {
    /// Erstellt eine Menge; Padding-IDs werden verworfen.
    pub fn new(id_type: IdType, ids: impl IntoIterator<Item = Id>) -> Self {
        let ids: IndexSet<Id> = ids.into_iter().filter(|&id| id != INVALID_ID).collect();
        Self {
            id_type,
            ids: Arc::new(ids),
        }
    }

    /// Leere Menge eines Typs.
    pub fn empty(id_type: IdType) -> Self {
        Self {
            id_type,
            ids: Arc::new(IndexSet::new()),
        }
    }

    /// Identifier-Typ der Menge.
    pub fn id_type(&self) -> &IdType {
        &self.id_type
    }

    /// Anzahl der IDs.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Gibt `true` zurück, wenn die Menge leer ist.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Prüft die Mitgliedschaft einer ID.
    pub fn contains(&self, id: Id) -> bool {
        self.ids.contains(&id)
    }

    /// Iteriert in Einfüge-Reihenfolge.
    pub fn iter(&self) -> impl Iterator<Item = Id> + '_ {
        self.ids.iter().copied()
    }

    /// IDs als Vec in Einfüge-Reihenfolge.
    pub fn to_vec(&self) -> Vec<Id> {
        self.iter().collect()
    }

    /// Prüft `self ⊆ other` (nur bei gleichem Typ sinnvoll).
    pub fn is_subset(&self, other: &IdSet) -> bool {
        self.id_type == other.id_type && self.ids.is_subset(&other.ids)
    }

    /// Bildet die Menge in einen anderen Identifier-Typ ab.
    ///
    /// `None`, wenn keine Abbildung registriert ist.
    pub fn map_to(&self, target: &IdType, registry: &IdMappingRegistry) -> Option<IdSet> {
        if &self.id_type == target {
            return Some(self.clone());
        }
        let mapping = registry.mapping(&self.id_type, target)?;
        Some(IdSet::new(
            target.clone(),
            self.iter().flat_map(|id| mapping.map(id)),
        ))
    }

    /// Schnittmenge. Ergebnis trägt den Typ von `self`.
    ///
    /// Ohne Abbildung zwischen den Typen ist das Ergebnis leer.
    pub fn intersect(&self, other: &IdSet, registry: &IdMappingRegistry) -> IdSet {
        match other.map_to(&self.id_type, registry) {
            Some(mapped) => {
                IdSet::new(self.id_type.clone(), self.iter().filter(|id| mapped.contains(*id)))
            }
            None => {
                log::debug!(
                    "Keine Abbildung {} → {}, Schnittmenge leer",
                    other.id_type,
                    self.id_type
                );
                IdSet::empty(self.id_type.clone())
            }
        }
    }

    /// Vereinigung. Ohne Abbildung bleibt `self` unverändert.
    pub fn union(&self, other: &IdSet, registry: &IdMappingRegistry) -> IdSet {
        match other.map_to(&self.id_type, registry) {
            Some(mapped) => IdSet::new(self.id_type.clone(), self.iter().chain(mapped.iter())),
            None => self.clone(),
        }
    }

    /// Differenz `self \ other`. Ohne Abbildung bleibt `self` unverändert.
    pub fn difference(&self, other: &IdSet, registry: &IdMappingRegistry) -> IdSet {
        match other.map_to(&self.id_type, registry) {
            Some(mapped) => {
                IdSet::new(self.id_type.clone(), self.iter().filter(|id| !mapped.contains(*id)))
            }
            None => self.clone(),
        }
    }
}
