//! Geordnete, in zusammenhängende Gruppen partitionierte ID-Sequenz.

use super::id_set::IdSet;
use super::id_type::{Id, IdMappingRegistry, IdType, INVALID_ID};
use anyhow::{bail, Result};
use std::ops::Range;

/// Label der Pseudo-Gruppe, wenn keine Gruppierung existiert.
pub const UNGROUPED_LABEL: &str = "Ungrouped";
/// Label der Pseudo-Gruppe für nicht zugeordnete Rest-Elemente.
pub const UNMAPPED_LABEL: &str = "Unmapped";
/// Farbe der Ungrouped-Gruppe (RGBA: Grau).
pub const UNGROUPED_COLOR: [f32; 4] = [0.6, 0.6, 0.6, 1.0];
/// Farbe der Unmapped-Gruppe (RGBA: Hellgrau).
pub const UNMAPPED_COLOR: [f32; 4] = [0.85, 0.85, 0.85, 1.0];

/// Art einer Gruppe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GroupKind {
    /// Explizit angelegte Gruppe
    #[default]
    Regular,
    /// Pseudo-Gruppe für Sequenzen ohne Gruppierung
    Ungrouped,
    /// Pseudo-Gruppe für übrig gebliebene Elemente
    Unmapped,
}

/// Zusammenhängender, beschrifteter Abschnitt einer Sequenz.
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    /// Anzeigename
    pub label: String,
    /// Anzeigefarbe (RGBA)
    pub color: [f32; 4],
    /// Art der Gruppe
    pub kind: GroupKind,
    start: usize,
    len: usize,
}

impl Group {
    /// Index des ersten Elements in der Sequenz.
    pub fn start(&self) -> usize {
        self.start
    }

    /// Anzahl der Elemente.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Gibt `true` zurück, wenn die Gruppe keine Elemente hat.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Index hinter dem letzten Element.
    pub fn end(&self) -> usize {
        self.start + self.len
    }

    /// Element-Indizes der Gruppe.
    pub fn range(&self) -> Range<usize> {
        self.start..self.end()
    }
}

/// Deklaration einer Gruppe beim Aufbau einer Sequenz.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupSpec {
    /// Anzeigename
    pub label: String,
    /// Anzeigefarbe (RGBA)
    pub color: [f32; 4],
    /// Anzahl der Elemente
    pub len: usize,
}

impl GroupSpec {
    /// Erstellt eine neue Gruppen-Deklaration.
    pub fn new(label: impl Into<String>, color: [f32; 4], len: usize) -> Self {
        Self {
            label: label.into(),
            color,
            len,
        }
    }
}

/// Geordnete ID-Sequenz mit Gruppen-Partition.
///
/// Die Reihenfolge bestimmt den geometrischen Offset jedes Elements;
/// Duplikate und `INVALID_ID` (Padding) sind erlaubt.
#[derive(Debug, Clone)]
pub struct GroupedSequence {
    id_type: IdType,
    ids: Vec<Id>,
    groups: Vec<Group>,
    set: IdSet,
}

impl GroupedSequence {
    /// Sequenz ohne Gruppierung: eine einzige "Ungrouped"-Pseudo-Gruppe.
    pub fn ungrouped(id_type: IdType, ids: Vec<Id>) -> Self {
        let group = Group {
            label: UNGROUPED_LABEL.to_string(),
            color: UNGROUPED_COLOR,
            kind: GroupKind::Ungrouped,
            start: 0,
            len: ids.len(),
        };
        Self::from_parts(id_type, ids, vec![group])
    }

    /// Sequenz mit expliziten Gruppen.
    ///
    /// Decken die Gruppen nicht alle IDs ab, wird der Rest als
    /// "Unmapped"-Gruppe angehängt. Übersteigen sie die ID-Anzahl: Fehler.
    pub fn with_groups(
        id_type: IdType,
        ids: Vec<Id>,
        specs: impl IntoIterator<Item = GroupSpec>,
    ) -> Result<Self> {
        let specs: Vec<GroupSpec> = specs.into_iter().collect();
        if specs.is_empty() {
            return Ok(Self::ungrouped(id_type, ids));
        }

        let declared: usize = specs.iter().map(|spec| spec.len).sum();
        if declared > ids.len() {
            bail!(
                "Gruppen umfassen {} Elemente, Sequenz hat nur {}",
                declared,
                ids.len()
            );
        }

        let mut groups = Vec::with_capacity(specs.len() + 1);
        let mut start = 0;
        for spec in specs {
            if spec.len == 0 {
                log::debug!("Leere Gruppe '{}' übersprungen", spec.label);
                continue;
            }
            groups.push(Group {
                label: spec.label,
                color: spec.color,
                kind: GroupKind::Regular,
                start,
                len: spec.len,
            });
            start += spec.len;
        }

        if start < ids.len() {
            groups.push(unmapped_group(start, ids.len() - start));
        }

        Ok(Self::from_parts(id_type, ids, groups))
    }

    fn from_parts(id_type: IdType, ids: Vec<Id>, groups: Vec<Group>) -> Self {
        let set = IdSet::new(id_type.clone(), ids.iter().copied());
        Self {
            id_type,
            ids,
            groups,
            set,
        }
    }

    /// Identifier-Typ der Sequenz.
    pub fn id_type(&self) -> &IdType {
        &self.id_type
    }

    /// Alle IDs in Sequenz-Reihenfolge (inkl. Padding).
    pub fn ids(&self) -> &[Id] {
        &self.ids
    }

    /// Anzahl der Elemente (inkl. Padding).
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Gibt `true` zurück, wenn die Sequenz leer ist.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// ID an einer Position.
    pub fn get(&self, index: usize) -> Option<Id> {
        self.ids.get(index).copied()
    }

    /// Menge aller gültigen IDs.
    pub fn as_set(&self) -> &IdSet {
        &self.set
    }

    /// Gruppen in Sequenz-Reihenfolge.
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    /// Gruppe per Index.
    pub fn group(&self, index: usize) -> Option<&Group> {
        self.groups.get(index)
    }

    /// IDs einer Gruppe.
    pub fn group_ids(&self, index: usize) -> &[Id] {
        self.groups
            .get(index)
            .map(|group| &self.ids[group.range()])
            .unwrap_or(&[])
    }

    /// Index der Gruppe, die das Element an `index` enthält.
    pub fn group_of(&self, index: usize) -> Option<usize> {
        if index >= self.ids.len() {
            return None;
        }
        let pos = self.groups.partition_point(|group| group.end() <= index);
        (pos < self.groups.len()).then_some(pos)
    }

    /// Extrahiert die Sicht dieser Sequenz in einem anderen Identifier-Typ.
    ///
    /// Jedes Element wird auf seine Ziel-IDs abgebildet (1:n möglich).
    /// Elemente ohne Abbildung landen als Padding in einer angehängten
    /// "Unmapped"-Gruppe. `None`, wenn keine Abbildung registriert ist.
    pub fn slice(&self, target: &IdType, registry: &IdMappingRegistry) -> Option<Self> {
        if target == &self.id_type {
            return Some(self.clone());
        }
        let mapping = registry.mapping(&self.id_type, target)?;

        let mut ids = Vec::with_capacity(self.ids.len());
        let mut groups = Vec::with_capacity(self.groups.len() + 1);
        let mut unmapped = 0usize;

        for group in &self.groups {
            let start = ids.len();
            for &id in &self.ids[group.range()] {
                let before = ids.len();
                ids.extend(mapping.map(id));
                if ids.len() == before {
                    unmapped += 1;
                }
            }
            if ids.len() > start {
                groups.push(Group {
                    label: group.label.clone(),
                    color: group.color,
                    kind: group.kind,
                    start,
                    len: ids.len() - start,
                });
            }
        }

        if unmapped > 0 {
            groups.push(unmapped_group(ids.len(), unmapped));
            ids.extend(std::iter::repeat(INVALID_ID).take(unmapped));
        }

        Some(Self::from_parts(target.clone(), ids, groups))
    }

    /// Entfernt alle Elemente, deren ID in `other` (abgebildet) enthalten ist.
    ///
    /// Ohne Abbildung bleibt die Sequenz unverändert.
    pub fn difference(&self, other: &IdSet, registry: &IdMappingRegistry) -> Self {
        match other.map_to(&self.id_type, registry) {
            Some(mapped) => self.retain_elements(|id| !mapped.contains(id)),
            None => self.clone(),
        }
    }

    /// Behält nur Elemente, für die `keep` zutrifft; leere Gruppen entfallen.
    pub(crate) fn retain_elements(&self, keep: impl Fn(Id) -> bool) -> Self {
        let mut ids = Vec::with_capacity(self.ids.len());
        let mut groups = Vec::with_capacity(self.groups.len());

        for group in &self.groups {
            let start = ids.len();
            ids.extend(self.ids[group.range()].iter().copied().filter(|&id| keep(id)));
            if ids.len() > start {
                groups.push(Group {
                    label: group.label.clone(),
                    color: group.color,
                    kind: group.kind,
                    start,
                    len: ids.len() - start,
                });
            }
        }

        Self::from_parts(self.id_type.clone(), ids, groups)
    }

    /// Hängt IDs als "Unmapped"-Gruppe an.
    pub(crate) fn append_unmapped(&self, extra: Vec<Id>) -> Self {
        let mut ids = self.ids.clone();
        let mut groups = self.groups.clone();
        groups.push(unmapped_group(ids.len(), extra.len()));
        ids.extend(extra);
        Self::from_parts(self.id_type.clone(), ids, groups)
    }
}

fn unmapped_group(start: usize, len: usize) -> Group {
    Group {
        label: UNMAPPED_LABEL.to_string(),
        color: UNMAPPED_COLOR,
        kind: GroupKind::Unmapped,
        start,
        len,
    }
}

#[cfg(test)]
mod tests;
