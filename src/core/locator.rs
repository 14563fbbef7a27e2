//! Locator: Abbildung logischer Positionen auf Pixel-Intervalle entlang einer Achse.
//!
//! Locators werden vom Block-Layout geliefert; die Band-Engine konsumiert sie
//! nur. Sie liegen in einer [`LocatorArena`] und werden über stabile Handles
//! referenziert.

use super::id_type::INVALID_ID;
use super::sequence::GroupedSequence;
use std::fmt;

/// Detailstufe eines Bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum LevelOfDetail {
    /// Ein Intervall für die gesamte Sequenz
    #[default]
    Overview,
    /// Ein Intervall pro Gruppe
    Groups,
    /// Ein Intervall pro Element
    Detail,
}

impl LevelOfDetail {
    /// Alle Stufen von grob nach fein.
    pub const ALL: [Self; 3] = [Self::Overview, Self::Groups, Self::Detail];

    /// Nächst feinere Stufe.
    pub fn finer(self) -> Option<Self> {
        match self {
            Self::Overview => Some(Self::Groups),
            Self::Groups => Some(Self::Detail),
            Self::Detail => None,
        }
    }

    /// Nächst gröbere Stufe.
    pub fn coarser(self) -> Option<Self> {
        match self {
            Self::Overview => None,
            Self::Groups => Some(Self::Overview),
            Self::Detail => Some(Self::Groups),
        }
    }
}

impl fmt::Display for LevelOfDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Overview => "overview",
            Self::Groups => "groups",
            Self::Detail => "detail",
        };
        f.write_str(name)
    }
}

/// 1D-Pixel-Intervall `(offset, size)`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Interval {
    /// Start-Offset in Pixeln
    pub offset: f32,
    /// Ausdehnung in Pixeln
    pub size: f32,
}

impl Interval {
    /// Erstellt ein neues Intervall.
    pub fn new(offset: f32, size: f32) -> Self {
        Self { offset, size }
    }

    /// Ende des Intervalls.
    pub fn end(&self) -> f32 {
        self.offset + self.size
    }

    /// Gibt `true` zurück, wenn Offset und Größe endlich sind.
    pub fn is_finite(&self) -> bool {
        self.offset.is_finite() && self.size.is_finite()
    }

    /// Relativer Anteil eines Pixel-Offsets bezogen auf dieses Intervall.
    pub fn fraction_of(&self, value: f32) -> f32 {
        if self.size.abs() <= f32::EPSILON {
            return 0.0;
        }
        (value - self.offset) / self.size
    }
}

/// Abbildung `(Detailstufe, Index) → Intervall` entlang einer Achse.
///
/// `None` bedeutet "keine geometrische Platzierung auf dieser Stufe".
pub trait Locator: fmt::Debug {
    /// Intervall des Index auf der gegebenen Stufe.
    fn locate(&self, level: LevelOfDetail, index: usize) -> Option<Interval>;

    /// Ob die Stufe überhaupt unterstützt wird.
    fn has_level(&self, level: LevelOfDetail) -> bool {
        level != LevelOfDetail::Detail
    }
}

/// Stabiles Handle auf einen Locator in der Arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LocatorHandle(usize);

impl LocatorHandle {
    /// Index in der Arena.
    pub fn index(self) -> usize {
        self.0
    }
}

/// Arena aller Locators, adressiert über [`LocatorHandle`].
#[derive(Debug, Default)]
pub struct LocatorArena {
    locators: Vec<Box<dyn Locator>>,
}

impl LocatorArena {
    /// Erstellt eine leere Arena.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fügt einen Locator hinzu.
    pub fn insert(&mut self, locator: impl Locator + 'static) -> LocatorHandle {
        self.locators.push(Box::new(locator));
        LocatorHandle(self.locators.len() - 1)
    }

    /// Ersetzt einen Locator. Abhängige Bands müssen danach invalidiert werden.
    pub fn replace(&mut self, handle: LocatorHandle, locator: impl Locator + 'static) -> bool {
        match self.locators.get_mut(handle.0) {
            Some(slot) => {
                *slot = Box::new(locator);
                true
            }
            None => false,
        }
    }

    /// Locator per Handle.
    pub fn get(&self, handle: LocatorHandle) -> Option<&dyn Locator> {
        self.locators.get(handle.0).map(|locator| locator.as_ref())
    }

    /// Anzahl der Locators.
    pub fn len(&self) -> usize {
        self.locators.len()
    }

    /// Gibt `true` zurück, wenn die Arena leer ist.
    pub fn is_empty(&self) -> bool {
        self.locators.is_empty()
    }
}

/// Standard-Locator für eine Sequenz mit gleich großen Elementen.
///
/// Gruppen erhalten proportional zu ihrer Elementanzahl Platz, getrennt
/// durch `group_gap`. Padding-Elemente sind auf DETAIL-Stufe undefiniert.
#[derive(Debug, Clone)]
pub struct SequenceLocator {
    extent: f32,
    groups: Vec<Interval>,
    elements: Option<Vec<Option<Interval>>>,
}

impl SequenceLocator {
    /// Baut den Locator für eine Sequenz über `extent` Pixel.
    pub fn new(sequence: &GroupedSequence, extent: f32, group_gap: f32, detail: bool) -> Self {
        let group_count = sequence.groups().len();
        let gaps = group_gap * group_count.saturating_sub(1) as f32;
        let usable = (extent - gaps).max(0.0);
        let element_size = if sequence.is_empty() {
            0.0
        } else {
            usable / sequence.len() as f32
        };

        let mut groups = Vec::with_capacity(group_count);
        let mut elements = vec![None; sequence.len()];
        let mut offset = 0.0f32;
        for group in sequence.groups() {
            let size = element_size * group.len() as f32;
            groups.push(Interval::new(offset, size));
            for (k, index) in group.range().enumerate() {
                if sequence.get(index) != Some(INVALID_ID) {
                    elements[index] = Some(Interval::new(
                        offset + element_size * k as f32,
                        element_size,
                    ));
                }
            }
            offset += size + group_gap;
        }

        Self {
            extent,
            groups,
            elements: detail.then_some(elements),
        }
    }
}

impl Locator for SequenceLocator {
    fn locate(&self, level: LevelOfDetail, index: usize) -> Option<Interval> {
        match level {
            LevelOfDetail::Overview => (index == 0).then(|| Interval::new(0.0, self.extent)),
            LevelOfDetail::Groups => self.groups.get(index).copied(),
            LevelOfDetail::Detail => self.elements.as_ref()?.get(index).copied().flatten(),
        }
    }

    fn has_level(&self, level: LevelOfDetail) -> bool {
        match level {
            LevelOfDetail::Detail => self.elements.is_some(),
            _ => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GroupSpec, IdType};
    use approx::assert_relative_eq;

    fn sequence() -> GroupedSequence {
        GroupedSequence::with_groups(
            IdType::new("gene"),
            vec![1, 2, 3, INVALID_ID, 5],
            [
                GroupSpec::new("A", [1.0; 4], 3),
                GroupSpec::new("B", [0.5; 4], 2),
            ],
        )
        .expect("gültige Gruppen")
    }

    #[test]
    fn test_level_order_and_steps() {
        assert!(LevelOfDetail::Overview < LevelOfDetail::Groups);
        assert_eq!(LevelOfDetail::Overview.coarser(), None);
        assert_eq!(LevelOfDetail::Detail.finer(), None);
        assert_eq!(LevelOfDetail::Groups.finer(), Some(LevelOfDetail::Detail));
    }

    #[test]
    fn test_sequence_locator_tiles_groups_with_gap() {
        let locator = SequenceLocator::new(&sequence(), 110.0, 10.0, true);

        let overview = locator.locate(LevelOfDetail::Overview, 0).expect("Overview");
        assert_relative_eq!(overview.size, 110.0);
        assert!(locator.locate(LevelOfDetail::Overview, 1).is_none());

        let a = locator.locate(LevelOfDetail::Groups, 0).expect("Gruppe A");
        let b = locator.locate(LevelOfDetail::Groups, 1).expect("Gruppe B");
        assert_relative_eq!(a.size, 60.0);
        assert_relative_eq!(b.offset, 70.0);
        assert_relative_eq!(b.size, 40.0);
    }

    #[test]
    fn test_padding_is_undefined_on_detail() {
        let locator = SequenceLocator::new(&sequence(), 110.0, 10.0, true);
        assert!(locator.locate(LevelOfDetail::Detail, 3).is_none());
        let last = locator.locate(LevelOfDetail::Detail, 4).expect("Element 5");
        assert_relative_eq!(last.offset, 90.0);
        assert_relative_eq!(last.size, 20.0);
    }

    #[test]
    fn test_detail_disabled_reports_missing_level() {
        let locator = SequenceLocator::new(&sequence(), 100.0, 0.0, false);
        assert!(!locator.has_level(LevelOfDetail::Detail));
        assert!(locator.locate(LevelOfDetail::Detail, 0).is_none());
    }

    #[test]
    fn test_arena_replace_keeps_handle_stable() {
        let mut arena = LocatorArena::new();
        let handle = arena.insert(SequenceLocator::new(&sequence(), 100.0, 0.0, false));
        assert!(!arena.get(handle).expect("Locator").has_level(LevelOfDetail::Detail));

        assert!(arena.replace(handle, SequenceLocator::new(&sequence(), 100.0, 0.0, true)));
        assert!(arena.get(handle).expect("Locator").has_level(LevelOfDetail::Detail));
        assert_eq!(arena.len(), 1);
    }
}
