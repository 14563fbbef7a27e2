//! Index der gemeinsamen IDs je Sequenz-Element (im Typ der gemeinsamen Menge).

use crate::core::{GroupedSequence, Id, IdMappingRegistry, IdSet};
use indexmap::IndexSet;
use std::ops::Range;

/// Kompakte Zuordnung Element-Index → gemeinsame IDs (CSR-Layout).
///
/// Die IDs liegen im Typ der gemeinsamen Menge, also im Typ der Quell-Seite;
/// Ziel-Elemente werden beim Aufbau abgebildet.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SharedIndex {
    offsets: Vec<usize>,
    ids: Vec<Id>,
}

impl SharedIndex {
    /// Baut den Index für eine Sequenz.
    pub fn build(sequence: &GroupedSequence, shared: &IdSet, registry: &IdMappingRegistry) -> Self {
        let mut offsets = Vec::with_capacity(sequence.len() + 1);
        let mut ids = Vec::new();
        offsets.push(0);

        match registry.mapping(sequence.id_type(), shared.id_type()) {
            Some(mapping) => {
                for &id in sequence.ids() {
                    let start = ids.len();
                    for mapped in mapping.map(id) {
                        if shared.contains(mapped) && !ids[start..].contains(&mapped) {
                            ids.push(mapped);
                        }
                    }
                    offsets.push(ids.len());
                }
            }
            None => {
                log::debug!(
                    "Keine Abbildung {} → {}, Index bleibt leer",
                    sequence.id_type(),
                    shared.id_type()
                );
                offsets.resize(sequence.len() + 1, 0);
            }
        }

        Self { offsets, ids }
    }

    /// Anzahl der Elemente.
    pub fn len(&self) -> usize {
        self.offsets.len().saturating_sub(1)
    }

    /// Gibt `true` zurück, wenn der Index keine Elemente hat.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Gemeinsame IDs eines Elements.
    pub fn element(&self, index: usize) -> &[Id] {
        match (self.offsets.get(index), self.offsets.get(index + 1)) {
            (Some(&start), Some(&end)) => &self.ids[start..end],
            _ => &[],
        }
    }

    /// Gibt `true` zurück, wenn das Element mindestens eine gemeinsame ID hat.
    pub fn is_shared(&self, index: usize) -> bool {
        !self.element(index).is_empty()
    }

    /// Anzahl der Elemente mit mindestens einer gemeinsamen ID.
    pub fn shared_count(&self) -> usize {
        (0..self.len()).filter(|&i| self.is_shared(i)).count()
    }

    /// Gemeinsame IDs eines Element-Bereichs in Reihenfolge des ersten Auftretens.
    pub fn ids_in(&self, range: Range<usize>) -> IndexSet<Id> {
        range
            .flat_map(|index| self.element(index).iter().copied())
            .collect()
    }

    /// Anzahl der Elemente im Bereich, die eine ID aus `ids` tragen.
    pub fn count_matching(&self, range: Range<usize>, ids: &IndexSet<Id>) -> usize {
        range
            .filter(|&index| self.element(index).iter().any(|id| ids.contains(id)))
            .count()
    }
}
