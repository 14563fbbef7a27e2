use super::*;

const RED: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
const BLUE: [f32; 4] = [0.0, 0.0, 1.0, 1.0];

fn gene() -> IdType {
    IdType::new("gene")
}

fn sample() -> IdType {
    IdType::new("sample")
}

fn grouped_a_b() -> GroupedSequence {
    GroupedSequence::with_groups(
        gene(),
        vec![1, 2, 3, 4, 5],
        [GroupSpec::new("A", RED, 3), GroupSpec::new("B", BLUE, 2)],
    )
    .expect("gültige Gruppen")
}

#[test]
fn test_ungrouped_fabricates_single_group() {
    let seq = GroupedSequence::ungrouped(gene(), vec![4, 5, 6]);
    assert_eq!(seq.groups().len(), 1);
    assert_eq!(seq.groups()[0].kind, GroupKind::Ungrouped);
    assert_eq!(seq.groups()[0].label, UNGROUPED_LABEL);
    assert_eq!(seq.group_ids(0), &[4, 5, 6]);
}

#[test]
fn test_with_groups_appends_unmapped_rest() {
    let seq = GroupedSequence::with_groups(
        gene(),
        vec![1, 2, 3, 4],
        [GroupSpec::new("A", RED, 3)],
    )
    .expect("gültige Gruppen");

    assert_eq!(seq.groups().len(), 2);
    let rest = &seq.groups()[1];
    assert_eq!(rest.kind, GroupKind::Unmapped);
    assert_eq!(rest.range(), 3..4);
    assert_eq!(seq.group_ids(1), &[4]);
}

#[test]
fn test_with_groups_rejects_oversized_groups() {
    let result = GroupedSequence::with_groups(gene(), vec![1, 2], [GroupSpec::new("A", RED, 3)]);
    assert!(result.is_err());
}

#[test]
fn test_group_of_finds_contiguous_group() {
    let seq = grouped_a_b();
    assert_eq!(seq.group_of(0), Some(0));
    assert_eq!(seq.group_of(2), Some(0));
    assert_eq!(seq.group_of(3), Some(1));
    assert_eq!(seq.group_of(5), None);
}

#[test]
fn test_as_set_skips_padding_and_duplicates() {
    let seq = GroupedSequence::ungrouped(gene(), vec![1, INVALID_ID, 1, 2]);
    assert_eq!(seq.len(), 4);
    assert_eq!(seq.as_set().to_vec(), vec![1, 2]);
}

#[test]
fn test_difference_drops_empty_groups() {
    let registry = IdMappingRegistry::new();
    let seq = grouped_a_b();
    let other = IdSet::new(gene(), [4, 5, 1]);

    let rest = seq.difference(&other, &registry);
    assert_eq!(rest.ids(), &[2, 3]);
    assert_eq!(rest.groups().len(), 1);
    assert_eq!(rest.groups()[0].label, "A");
    assert_eq!(rest.groups()[0].color, RED);
}

#[test]
fn test_difference_without_mapper_keeps_sequence() {
    let registry = IdMappingRegistry::new();
    let seq = grouped_a_b();
    let other = IdSet::new(sample(), [1, 2]);

    let rest = seq.difference(&other, &registry);
    assert_eq!(rest.ids(), seq.ids());
}

#[test]
fn test_slice_maps_groups_and_collects_unmapped_padding() {
    let mut registry = IdMappingRegistry::new();
    registry.register(&gene(), &sample(), [(1, 10), (2, 20), (2, 21), (4, 40)]);

    let sliced = grouped_a_b()
        .slice(&sample(), &registry)
        .expect("Abbildung vorhanden");

    assert_eq!(sliced.id_type(), &sample());
    // A: 1→10, 2→20,21, 3→∅ ; B: 4→40, 5→∅
    assert_eq!(sliced.ids(), &[10, 20, 21, 40, INVALID_ID, INVALID_ID]);
    assert_eq!(sliced.groups().len(), 3);
    assert_eq!(sliced.groups()[0].range(), 0..3);
    assert_eq!(sliced.groups()[1].range(), 3..4);
    assert_eq!(sliced.groups()[2].kind, GroupKind::Unmapped);
    assert_eq!(sliced.groups()[2].len(), 2);
    assert_eq!(sliced.as_set().len(), 4);
}

#[test]
fn test_slice_without_mapper_is_none() {
    let registry = IdMappingRegistry::new();
    assert!(grouped_a_b().slice(&sample(), &registry).is_none());
}
