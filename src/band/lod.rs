//! Band mit Detailstufen-Zustandsmaschine und zwischengespeicherter Routenliste.

use super::factory::build_shape;
use super::route::{Route, RouteList};
use super::routes::{build_routes, RouteContext};
use super::shape::BandShape;
use super::shared_index::SharedIndex;
use crate::core::algebra::shared_set;
use crate::core::{
    Axis, Bounds, GroupedSequence, IdMappingRegistry, IdSet, LevelOfDetail, LocatorArena,
    LocatorHandle,
};
use crate::shared::BandOptions;
use std::sync::Arc;

/// Eine Seite eines Bands: Sequenz, Locator, Ankerrechteck und Achse.
#[derive(Debug, Clone)]
pub struct BandEnd {
    /// Sequenz des Blocks
    pub sequence: Arc<GroupedSequence>,
    /// Locator des Blocks in der Arena
    pub locator: LocatorHandle,
    /// Bildschirm-Rechteck des Blocks
    pub bounds: Bounds,
    /// Anordnungsrichtung der Elemente
    pub axis: Axis,
}

impl BandEnd {
    /// Erstellt eine Band-Seite.
    pub fn new(
        sequence: Arc<GroupedSequence>,
        locator: LocatorHandle,
        bounds: Bounds,
        axis: Axis,
    ) -> Self {
        Self {
            sequence,
            locator,
            bounds,
            axis,
        }
    }
}

/// Zuletzt gebaute Routen mit der angefragten Stufe.
#[derive(Debug, Clone)]
struct RouteCache {
    requested: LevelOfDetail,
    routes: RouteList,
}

/// Verbindung zweier Sequenzen mit Detailstufen.
///
/// Routen werden erst bei Bedarf gebaut und bis zur nächsten Invalidierung
/// (`reinitialize`, `invalidate`, Stufenwechsel) zwischengespeichert.
#[derive(Debug, Clone)]
pub struct Band {
    source: BandEnd,
    target: BandEnd,
    shared: IdSet,
    source_index: SharedIndex,
    target_index: SharedIndex,
    shape: BandShape,
    stub_shape: Option<BandShape>,
    level: LevelOfDetail,
    cache: Option<RouteCache>,
    options: BandOptions,
}

impl Band {
    pub(crate) fn new(
        source: BandEnd,
        target: BandEnd,
        shared: IdSet,
        shape: BandShape,
        registry: &IdMappingRegistry,
        options: BandOptions,
    ) -> Self {
        let source_index = SharedIndex::build(&source.sequence, &shared, registry);
        let target_index = SharedIndex::build(&target.sequence, &shared, registry);
        let mut band = Self {
            source,
            target,
            shared,
            source_index,
            target_index,
            shape,
            stub_shape: None,
            level: LevelOfDetail::Overview,
            cache: None,
            options,
        };
        band.apply_auto_stubify();
        band
    }

    /// Quell-Seite.
    pub fn source(&self) -> &BandEnd {
        &self.source
    }

    /// Ziel-Seite.
    pub fn target(&self) -> &BandEnd {
        &self.target
    }

    /// Gemeinsame Menge (Typ der Quell-Seite).
    pub fn shared(&self) -> &IdSet {
        &self.shared
    }

    /// Aktuelle Detailstufe.
    pub fn level(&self) -> LevelOfDetail {
        self.level
    }

    /// Aktive Geometrie (gekürzt, falls aktiviert).
    pub fn shape(&self) -> &BandShape {
        self.stub_shape.as_ref().unwrap_or(&self.shape)
    }

    /// Optionen, mit denen das Band gebaut wurde.
    pub fn options(&self) -> &BandOptions {
        &self.options
    }

    /// Gibt `true` zurück, wenn das Band gekürzt dargestellt wird.
    pub fn is_stubified(&self) -> bool {
        self.stub_shape.is_some()
    }

    /// Schaltet die gekürzte Darstellung um.
    pub fn set_stubified(&mut self, stubified: bool) {
        if stubified == self.is_stubified() {
            return;
        }
        if !stubified {
            self.stub_shape = None;
        } else if let Some(stubbed) = self.shape.stubify(self.options.stub_distance) {
            self.stub_shape = Some(stubbed);
        } else {
            log::debug!("Form {} wird nicht gekürzt", self.shape.kind());
            return;
        }
        self.invalidate();
    }

    /// Wechselt eine Stufe feiner (`increase`) oder gröber.
    ///
    /// Gibt `false` zurück, wenn der Wechsel nicht möglich ist: unterhalb
    /// OVERVIEW, oberhalb DETAIL oder DETAIL ohne Detail-Locator auf einer Seite.
    pub fn change_level(&mut self, increase: bool, arena: &LocatorArena) -> bool {
        let next = if increase {
            self.level.finer()
        } else {
            self.level.coarser()
        };
        let Some(next) = next else {
            return false;
        };
        if next == LevelOfDetail::Detail && !self.supports_detail(arena) {
            log::debug!("DETAIL nicht verfügbar, Stufe bleibt {}", self.level);
            return false;
        }
        self.level = next;
        self.invalidate();
        true
    }

    /// Prüft, ob beide Seiten einen DETAIL-Locator haben.
    pub fn supports_detail(&self, arena: &LocatorArena) -> bool {
        [self.source.locator, self.target.locator]
            .into_iter()
            .all(|handle| {
                arena
                    .get(handle)
                    .is_some_and(|locator| locator.has_level(LevelOfDetail::Detail))
            })
    }

    /// Routen der aktuellen Stufe (mit Rückfall auf gröbere Stufen).
    pub fn routes(&mut self, arena: &LocatorArena, registry: &IdMappingRegistry) -> &RouteList {
        self.render_level(self.level, arena, registry)
    }

    /// Routen einer Stufe; ist sie leer, wird die nächst gröbere gebaut.
    pub fn render_level(
        &mut self,
        requested: LevelOfDetail,
        arena: &LocatorArena,
        registry: &IdMappingRegistry,
    ) -> &RouteList {
        let cache = match self.cache.take() {
            Some(cache) if cache.requested == requested => cache,
            _ => RouteCache {
                requested,
                routes: self.build_with_fallback(requested, arena, registry),
            },
        };
        &self.cache.insert(cache).routes
    }

    fn build_with_fallback(
        &self,
        requested: LevelOfDetail,
        arena: &LocatorArena,
        registry: &IdMappingRegistry,
    ) -> RouteList {
        let (Some(source_locator), Some(target_locator)) =
            (arena.get(self.source.locator), arena.get(self.target.locator))
        else {
            log::warn!("Locator fehlt in der Arena, keine Routen");
            return RouteList::empty(requested);
        };
        let ctx = RouteContext {
            source: &self.source.sequence,
            target: &self.target.sequence,
            source_locator,
            target_locator,
            shared: &self.shared,
            source_index: &self.source_index,
            target_index: &self.target_index,
            registry,
            shape: self.shape(),
            options: &self.options,
        };

        let mut level = requested;
        loop {
            let routes = build_routes(level, &ctx);
            if !routes.is_empty() {
                return routes;
            }
            match level.coarser() {
                Some(coarser) => {
                    log::debug!("Stufe {} leer, Rückfall auf {}", level, coarser);
                    level = coarser;
                }
                None => return routes,
            }
        }
    }

    /// Zuletzt gebaute Routen, ohne neu zu bauen.
    pub fn cached_routes(&self) -> Option<&RouteList> {
        self.cache.as_ref().map(|cache| &cache.routes)
    }

    /// Route per Pick-Index (Listen-Index der zuletzt gebauten Routen).
    pub fn route_at(&self, index: usize) -> Option<&Route> {
        self.cached_routes()?.get(index)
    }

    /// Label per Pick-Index.
    pub fn label(&self, index: usize) -> Option<&str> {
        self.route_at(index).map(|route| route.label.as_str())
    }

    /// Verwirft die zwischengespeicherten Routen.
    pub fn invalidate(&mut self) {
        self.cache = None;
    }

    /// Baut Band-Zustand nach Änderungen an Sequenzen, Rechtecken oder Locators neu.
    ///
    /// Gibt `false` zurück, wenn keine Beziehung mehr darstellbar ist
    /// (leere gemeinsame Menge oder unpassende Anordnung); das Band bleibt
    /// dann unverändert und sollte vom Besitzer entfernt werden.
    pub fn reinitialize(
        &mut self,
        source: BandEnd,
        target: BandEnd,
        registry: &IdMappingRegistry,
    ) -> bool {
        let shared = shared_set(&source.sequence, &target.sequence, registry);
        if shared.is_empty() {
            log::info!("Band ohne gemeinsame Elemente nach Neuaufbau");
            return false;
        }
        let Some(shape) = build_shape(&source, &target, &self.options) else {
            log::info!("Band nach Neuaufbau nicht mehr darstellbar");
            return false;
        };

        let was_stubified = self.is_stubified();
        self.source_index = SharedIndex::build(&source.sequence, &shared, registry);
        self.target_index = SharedIndex::build(&target.sequence, &shared, registry);
        self.source = source;
        self.target = target;
        self.shared = shared;
        self.shape = shape;
        self.stub_shape = None;
        if was_stubified {
            self.set_stubified(true);
        } else {
            self.apply_auto_stubify();
        }
        self.invalidate();
        true
    }

    fn apply_auto_stubify(&mut self) {
        if self.shape.band_line().is_none() {
            return;
        }
        let distance = anchor_distance(&self.source.bounds, &self.target.bounds);
        if distance > self.options.stubify_min_length {
            log::debug!(
                "Anker-Abstand {:.0} > {:.0}, Band wird gekürzt",
                distance,
                self.options.stubify_min_length
            );
            self.set_stubified(true);
        }
    }
}

/// Abstand der Rechteck-Mittelpunkte.
fn anchor_distance(source: &Bounds, target: &Bounds) -> f32 {
    source.center().distance(target.center())
}
