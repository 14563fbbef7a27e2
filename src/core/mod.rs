//! Core-Domänentypen: Identifier, ID-Mengen, gruppierte Sequenzen, Locators.

pub mod algebra;
pub mod bounds;
pub mod id_set;
pub mod id_type;
pub mod locator;
pub mod sequence;

pub use bounds::{edge_normal, Axis, Bounds, EdgeSide};
pub use id_set::IdSet;
pub use id_type::{Id, IdMapper, IdMapping, IdMappingRegistry, IdType, MappedIds, INVALID_ID};
pub use locator::{Interval, LevelOfDetail, Locator, LocatorArena, LocatorHandle, SequenceLocator};
pub use sequence::{
    Group, GroupKind, GroupSpec, GroupedSequence, UNGROUPED_COLOR, UNGROUPED_LABEL,
    UNMAPPED_COLOR, UNMAPPED_LABEL,
};
