//! Mengenalgebra über Sequenzen und ID-Mengen inkl. gruppenerhaltender Varianten.
//!
//! Fehlt eine Abbildung zwischen zwei Identifier-Typen, ist das kein Fehler:
//! `intersect` liefert die leere Menge, `union`/`difference` den linken Operanden.

use super::id_set::IdSet;
use super::id_type::IdMappingRegistry;
use super::sequence::GroupedSequence;

/// Schnittmenge zweier Mengen (Typ des linken Operanden).
pub fn intersect(a: &IdSet, b: &IdSet, registry: &IdMappingRegistry) -> IdSet {
    a.intersect(b, registry)
}

/// Vereinigung zweier Mengen (Typ des linken Operanden).
pub fn union(a: &IdSet, b: &IdSet, registry: &IdMappingRegistry) -> IdSet {
    a.union(b, registry)
}

/// Differenz `a \ b` (Typ des linken Operanden).
pub fn difference(a: &IdSet, b: &IdSet, registry: &IdMappingRegistry) -> IdSet {
    a.difference(b, registry)
}

/// Gemeinsame Menge zweier Sequenzen im Typ von `source`.
pub fn shared_set(
    source: &GroupedSequence,
    target: &GroupedSequence,
    registry: &IdMappingRegistry,
) -> IdSet {
    source.as_set().intersect(target.as_set(), registry)
}

/// Gruppenerhaltende Schnittmenge.
///
/// Jede Gruppe von `sequence` wird mit den abgebildeten IDs von `other`
/// geschnitten; leere Gruppen entfallen, Label und Farbe bleiben erhalten.
/// Ohne Abbildung ist das Ergebnis eine leere Sequenz.
pub fn intersect_groups(
    sequence: &GroupedSequence,
    other: &IdSet,
    registry: &IdMappingRegistry,
) -> GroupedSequence {
    match other.map_to(sequence.id_type(), registry) {
        Some(mapped) => sequence.retain_elements(|id| mapped.contains(id)),
        None => {
            log::debug!(
                "Keine Abbildung {} → {}, gruppierte Schnittmenge leer",
                other.id_type(),
                sequence.id_type()
            );
            sequence.retain_elements(|_| false)
        }
    }
}

/// Gruppenerhaltende Differenz (siehe [`GroupedSequence::difference`]).
pub fn difference_groups(
    sequence: &GroupedSequence,
    other: &IdSet,
    registry: &IdMappingRegistry,
) -> GroupedSequence {
    sequence.difference(other, registry)
}

/// Gruppenerhaltende Vereinigung.
///
/// Die Gruppen von `sequence` bleiben unverändert; IDs aus `other`, die
/// noch nicht enthalten sind, werden als "Unmapped"-Gruppe angehängt.
pub fn union_groups(
    sequence: &GroupedSequence,
    other: &IdSet,
    registry: &IdMappingRegistry,
) -> GroupedSequence {
    let Some(mapped) = other.map_to(sequence.id_type(), registry) else {
        return sequence.clone();
    };
    let extra: Vec<_> = mapped
        .iter()
        .filter(|&id| !sequence.as_set().contains(id))
        .collect();
    if extra.is_empty() {
        return sequence.clone();
    }
    sequence.append_unmapped(extra)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GroupKind, GroupSpec, IdType};

    const RED: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
    const BLUE: [f32; 4] = [0.0, 0.0, 1.0, 1.0];

    fn gene() -> IdType {
        IdType::new("gene")
    }

    fn source() -> GroupedSequence {
        GroupedSequence::with_groups(
            gene(),
            vec![1, 2, 3, 4, 5],
            [GroupSpec::new("A", RED, 3), GroupSpec::new("B", BLUE, 2)],
        )
        .expect("gültige Gruppen")
    }

    #[test]
    fn test_set_properties_hold_for_reference_scene() {
        let registry = IdMappingRegistry::new();
        let a = source();
        let b = GroupedSequence::ungrouped(gene(), vec![2, 3, 4]);

        let shared = intersect(a.as_set(), b.as_set(), &registry);
        assert!(shared.is_subset(a.as_set()));
        assert!(shared.is_subset(b.as_set()));

        let all = union(a.as_set(), b.as_set(), &registry);
        assert!(a.as_set().is_subset(&all));

        let rest = difference(a.as_set(), b.as_set(), &registry);
        assert_eq!(rest.to_vec(), vec![1, 5]);
    }

    #[test]
    fn test_intersect_groups_keeps_labels_and_drops_empty() {
        let registry = IdMappingRegistry::new();
        let other = IdSet::new(gene(), [2, 3]);

        let result = intersect_groups(&source(), &other, &registry);
        assert_eq!(result.ids(), &[2, 3]);
        assert_eq!(result.groups().len(), 1);
        assert_eq!(result.groups()[0].label, "A");
        assert_eq!(result.groups()[0].color, RED);
    }

    #[test]
    fn test_intersect_groups_without_mapper_is_empty() {
        let registry = IdMappingRegistry::new();
        let other = IdSet::new(IdType::new("sample"), [2, 3]);

        let result = intersect_groups(&source(), &other, &registry);
        assert!(result.is_empty());
        assert!(result.groups().is_empty());
    }

    #[test]
    fn test_union_groups_appends_unmapped_group() {
        let registry = IdMappingRegistry::new();
        let other = IdSet::new(gene(), [5, 6, 7]);

        let result = union_groups(&source(), &other, &registry);
        assert_eq!(result.ids(), &[1, 2, 3, 4, 5, 6, 7]);
        let last = result.groups().last().expect("Gruppe erwartet");
        assert_eq!(last.kind, GroupKind::Unmapped);
        assert_eq!(last.range(), 5..7);
    }

    #[test]
    fn test_difference_groups_matches_set_difference() {
        let registry = IdMappingRegistry::new();
        let other = IdSet::new(gene(), [2, 3, 4]);

        let result = difference_groups(&source(), &other, &registry);
        assert_eq!(
            result.as_set(),
            &difference(source().as_set(), &other, &registry)
        );
    }
}
