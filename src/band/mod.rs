//! Bands: gemeinsame Menge, Detailstufen, Routen-Aufbau und Form-Wahl.

pub mod factory;
pub mod lod;
pub mod route;
pub mod routes;
pub mod shape;
pub mod shared_index;

pub use factory::BandFactory;
pub use lod::{Band, BandEnd};
pub use route::{Route, RouteKind, RouteList, RouteShape};
pub use routes::{build_routes, RouteContext};
pub use shape::{BandShape, ShapeKind};
pub use shared_index::SharedIndex;
