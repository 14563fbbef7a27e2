//! Band-Layout-Engine.
//! Mengenalgebra, Locators, Band-Geometrie und Detailstufen als Library für
//! Host-Anwendungen, Tests und Benchmarks.

pub mod band;
pub mod core;
pub mod geometry;
pub mod render;
pub mod shared;

pub use band::{
    Band, BandEnd, BandFactory, BandShape, Route, RouteKind, RouteList, RouteShape, ShapeKind,
};
pub use core::{
    Axis, Bounds, GroupSpec, GroupedSequence, Id, IdMappingRegistry, IdSet, IdType, Interval,
    LevelOfDetail, Locator, LocatorArena, LocatorHandle, SequenceLocator, INVALID_ID,
};
pub use geometry::{Area, BandLine, CrossGeometry, PolyLine, Side, Stub};
pub use render::{
    BandRenderer, DrawCommand, DrawSurface, IdSelection, RecordingSurface, RenderPass,
    SelectionHost, SelectionKind,
};
pub use shared::BandOptions;
