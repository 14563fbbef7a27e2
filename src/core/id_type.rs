//! Identifier-Typen und Registry für typübergreifende ID-Abbildungen.

use indexmap::IndexMap;
use std::fmt;
use std::sync::Arc;

/// Numerischer Identifier eines Elements.
pub type Id = u64;

/// Reservierte Sentinel-ID für Padding-Elemente.
///
/// Darf in Sequenzen vorkommen, landet aber nie in einem `IdSet`.
pub const INVALID_ID: Id = u64::MAX;

/// Domäne eines Identifiers (z.B. "gene", "sample").
///
/// Zwei Mengen sind nur bei identischem Typ direkt kombinierbar.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IdType(Arc<str>);

impl IdType {
    /// Erstellt einen neuen Identifier-Typ.
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(Arc::from(name.as_ref()))
    }

    /// Name des Typs.
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IdType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Abbildungstabelle `Quell-ID → Ziel-IDs` (1:n, Reihenfolge stabil).
#[derive(Debug, Clone, Default)]
pub struct IdMapper {
    targets: IndexMap<Id, Vec<Id>>,
}

impl IdMapper {
    /// Ziel-IDs einer Quell-ID (leer, wenn nicht abbildbar).
    pub fn map_id(&self, id: Id) -> &[Id] {
        self.targets.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Anzahl abbildbarer Quell-IDs.
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    /// Gibt `true` zurück, wenn keine Abbildung eingetragen ist.
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    fn insert(&mut self, from: Id, to: Id) {
        let entry = self.targets.entry(from).or_default();
        if !entry.contains(&to) {
            entry.push(to);
        }
    }
}

/// Aufgelöste Abbildung zwischen zwei Typen.
#[derive(Debug, Clone, Copy)]
pub enum IdMapping<'a> {
    /// Gleicher Typ, jede ID bildet auf sich selbst ab
    Identity,
    /// Registrierte Tabelle
    Table(&'a IdMapper),
}

impl<'a> IdMapping<'a> {
    /// Bildet eine ID ab. Padding (`INVALID_ID`) liefert nie Treffer.
    pub fn map(&self, id: Id) -> MappedIds<'a> {
        if id == INVALID_ID {
            return MappedIds::One(None);
        }
        match self {
            Self::Identity => MappedIds::One(Some(id)),
            Self::Table(mapper) => MappedIds::Many(mapper.map_id(id).iter()),
        }
    }
}

/// Iterator über die Ziel-IDs einer einzelnen Abbildung.
#[derive(Debug, Clone)]
pub enum MappedIds<'a> {
    /// Höchstens eine ID (Identität)
    One(Option<Id>),
    /// Tabellen-Treffer
    Many(std::slice::Iter<'a, Id>),
}

impl Iterator for MappedIds<'_> {
    type Item = Id;

    fn next(&mut self) -> Option<Id> {
        match self {
            Self::One(id) => id.take(),
            Self::Many(iter) => iter.next().copied(),
        }
    }
}

/// Registry aller bekannten Abbildungen zwischen Identifier-Typen.
#[derive(Debug, Clone, Default)]
pub struct IdMappingRegistry {
    mappers: IndexMap<(IdType, IdType), IdMapper>,
}

impl IdMappingRegistry {
    /// Erstellt eine leere Registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registriert Paare `from → to`. Die Rückrichtung wird mit eingetragen.
    pub fn register(
        &mut self,
        from: &IdType,
        to: &IdType,
        pairs: impl IntoIterator<Item = (Id, Id)>,
    ) {
        if from == to {
            log::debug!("Abbildung {} → {} ist Identität, ignoriert", from, to);
            return;
        }

        let pairs: Vec<(Id, Id)> = pairs
            .into_iter()
            .filter(|&(a, b)| a != INVALID_ID && b != INVALID_ID)
            .collect();

        let forward = self
            .mappers
            .entry((from.clone(), to.clone()))
            .or_default();
        for &(a, b) in &pairs {
            forward.insert(a, b);
        }

        let backward = self
            .mappers
            .entry((to.clone(), from.clone()))
            .or_default();
        for &(a, b) in &pairs {
            backward.insert(b, a);
        }

        log::debug!(
            "Abbildung {} ↔ {} registriert ({} Paare)",
            from,
            to,
            pairs.len()
        );
    }

    /// Liefert die Abbildung `from → to`, falls vorhanden.
    pub fn mapping(&self, from: &IdType, to: &IdType) -> Option<IdMapping<'_>> {
        if from == to {
            return Some(IdMapping::Identity);
        }
        self.mappers
            .get(&(from.clone(), to.clone()))
            .map(IdMapping::Table)
    }

    /// Prüft ob zwischen zwei Typen eine Beziehung möglich ist.
    pub fn can_map(&self, from: &IdType, to: &IdType) -> bool {
        self.mapping(from, to).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_mapping_for_same_type() {
        let registry = IdMappingRegistry::new();
        let gene = IdType::new("gene");

        let mapping = registry.mapping(&gene, &gene).expect("Identität erwartet");
        assert_eq!(mapping.map(7).collect::<Vec<_>>(), vec![7]);
        assert_eq!(mapping.map(INVALID_ID).count(), 0);
    }

    #[test]
    fn test_register_adds_inverse_direction() {
        let mut registry = IdMappingRegistry::new();
        let gene = IdType::new("gene");
        let transcript = IdType::new("transcript");
        registry.register(&gene, &transcript, [(1, 10), (1, 11), (2, 20)]);

        let forward = registry.mapping(&gene, &transcript).expect("Vorwärts erwartet");
        assert_eq!(forward.map(1).collect::<Vec<_>>(), vec![10, 11]);

        let backward = registry.mapping(&transcript, &gene).expect("Rückwärts erwartet");
        assert_eq!(backward.map(11).collect::<Vec<_>>(), vec![1]);
        assert_eq!(backward.map(99).count(), 0);
    }

    #[test]
    fn test_missing_mapper_is_none() {
        let registry = IdMappingRegistry::new();
        assert!(!registry.can_map(&IdType::new("gene"), &IdType::new("sample")));
    }

    #[test]
    fn test_register_skips_invalid_pairs() {
        let mut registry = IdMappingRegistry::new();
        let a = IdType::new("a");
        let b = IdType::new("b");
        registry.register(&a, &b, [(INVALID_ID, 1), (2, 3)]);

        let mapping = registry.mapping(&a, &b).expect("Abbildung erwartet");
        assert_eq!(mapping.map(2).collect::<Vec<_>>(), vec![3]);
        let backward = registry.mapping(&b, &a).expect("Abbildung erwartet");
        assert_eq!(backward.map(1).count(), 0);
    }
}
