//! Reiner Routen-Aufbau je Detailstufe.
//!
//! `build_routes` hängt nur von den übergebenen Eingaben ab; gleiche
//! Eingaben liefern identische Routenlisten (Paint- und Pick-Pass).

mod detail;
mod groups;
mod overview;

use super::route::{Route, RouteKind, RouteList};
use super::shape::BandShape;
use super::shared_index::SharedIndex;
use crate::core::{GroupedSequence, IdMappingRegistry, IdSet, Interval, LevelOfDetail, Locator};
use crate::geometry::Side;
use crate::shared::BandOptions;

/// Eingaben des Routen-Aufbaus.
#[derive(Debug, Clone, Copy)]
pub struct RouteContext<'a> {
    /// Quell-Sequenz S
    pub source: &'a GroupedSequence,
    /// Ziel-Sequenz T
    pub target: &'a GroupedSequence,
    /// Locator der Quell-Seite
    pub source_locator: &'a dyn Locator,
    /// Locator der Ziel-Seite
    pub target_locator: &'a dyn Locator,
    /// Gemeinsame Menge (Typ von S)
    pub shared: &'a IdSet,
    /// Gemeinsame IDs je S-Element
    pub source_index: &'a SharedIndex,
    /// Gemeinsame IDs je T-Element (in den Typ von S abgebildet)
    pub target_index: &'a SharedIndex,
    /// Abbildungen zwischen Identifier-Typen
    pub registry: &'a IdMappingRegistry,
    /// Aktive Geometrie
    pub shape: &'a BandShape,
    /// Laufzeit-Optionen
    pub options: &'a BandOptions,
}

impl RouteContext<'_> {
    /// OVERVIEW-Intervalle beider Seiten (Bezug für die Normierung).
    fn overview_intervals(&self) -> Option<(Interval, Interval)> {
        let source = self.source_locator.locate(LevelOfDetail::Overview, 0)?;
        let target = self.target_locator.locate(LevelOfDetail::Overview, 0)?;
        (source.is_finite() && target.is_finite()).then_some((source, target))
    }
}

/// Baut die Routen einer Stufe.
pub fn build_routes(level: LevelOfDetail, ctx: &RouteContext<'_>) -> RouteList {
    let Some((source_overview, target_overview)) = ctx.overview_intervals() else {
        log::debug!("Kein OVERVIEW-Intervall, keine Routen");
        return RouteList::empty(level);
    };
    let routes = match level {
        LevelOfDetail::Overview => overview::build(ctx),
        LevelOfDetail::Groups => groups::build(ctx, &source_overview, &target_overview),
        LevelOfDetail::Detail => detail::build(ctx, &source_overview, &target_overview),
    };
    RouteList::new(level, routes)
}

/// Normierter Bereich eines Pixel-Intervalls bezogen auf das OVERVIEW-Intervall.
fn normalize(overview: &Interval, offset: f32, end: f32) -> (f32, f32) {
    (overview.fraction_of(offset), overview.fraction_of(end))
}

/// Pixel-Teilbereich für `used` Elemente ab `acc` in einem Gruppen-Intervall.
fn sub_interval(interval: &Interval, count: usize, acc: usize, used: usize) -> (f32, f32) {
    if count == 0 {
        return (interval.offset, interval.offset);
    }
    let element = interval.size / count as f32;
    let start = (interval.offset + element * acc as f32).min(interval.end());
    let end = (start + element * used as f32).min(interval.end());
    (start, end)
}

/// Bildet IDs der Quell-Seite in den Typ der Ziel-Seite ab (leer ohne Abbildung).
fn map_to_target(ctx: &RouteContext<'_>, ids: &IdSet) -> IdSet {
    ids.map_to(ctx.target.id_type(), ctx.registry)
        .unwrap_or_else(|| IdSet::empty(ctx.target.id_type().clone()))
}

/// Not-Mapped-Stub für den Bereich `range` einer Seite.
fn not_mapped(
    ctx: &RouteContext<'_>,
    side: Side,
    label: String,
    range: (f32, f32),
    ids: IdSet,
) -> Option<Route> {
    let shape = ctx.shape.stub(side, range, ctx.options)?;
    let (source_ids, target_ids, source_range, target_range) = match side {
        Side::Source => (ids, IdSet::empty(ctx.target.id_type().clone()), Some(range), None),
        Side::Target => (IdSet::empty(ctx.source.id_type().clone()), ids, None, Some(range)),
    };
    Some(Route {
        label,
        kind: RouteKind::NotMapped,
        source_ids,
        target_ids,
        source_range,
        target_range,
        shape,
    })
}
