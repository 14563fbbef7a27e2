//! Zeichnet die Routen eines Bands auf eine [`DrawSurface`].
//!
//! Paint- und Pick-Pass arbeiten auf derselben zwischengespeicherten
//! Routenliste und erzeugen dieselbe Geometrie.

use super::selection::{SelectionHost, SelectionKind};
use super::surface::{DrawSurface, RenderPass};
use crate::band::{Band, BandShape, Route, RouteKind, RouteShape};
use crate::core::{IdMappingRegistry, LocatorArena};
use crate::geometry::{Area, Side};
use crate::shared::BandOptions;

/// Zähler des letzten Render-Aufrufs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Gezeichnete Routen
    pub routes: usize,
    /// Gefüllte Polygone
    pub polygons: usize,
    /// Pfade
    pub paths: usize,
    /// Marker
    pub points: usize,
}

/// Renderer für Bands.
#[derive(Debug, Default)]
pub struct BandRenderer {
    stats: RenderStats,
}

impl BandRenderer {
    /// Erstellt einen neuen Renderer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Zähler des letzten Aufrufs.
    pub fn stats(&self) -> RenderStats {
        self.stats
    }

    /// Rendert die Routen der aktuellen Stufe eines Bands.
    ///
    /// Baut die Routen bei Bedarf; im Pick-Pass wird vor jeder Route
    /// `begin_pick(index)` aufgerufen.
    pub fn render(
        &mut self,
        band: &mut Band,
        arena: &LocatorArena,
        registry: &IdMappingRegistry,
        surface: &mut dyn DrawSurface,
        selection: &dyn SelectionHost,
        pass: RenderPass,
    ) {
        band.routes(arena, registry);
        self.stats = RenderStats::default();
        let Some(routes) = band.cached_routes() else {
            return;
        };
        let shape = band.shape();
        let options = band.options();
        if !shape.is_valid() {
            log::warn!("Band-Geometrie ungültig, Rendern übersprungen");
            return;
        }

        let alpha = options.route_alpha(routes.len());
        for (index, route) in routes.iter().enumerate() {
            match pass {
                RenderPass::Pick => surface.begin_pick(index),
                RenderPass::Paint => {
                    let factor = if route.is_stub() {
                        options.stub_alpha_factor
                    } else {
                        1.0
                    };
                    surface.set_color(with_alpha(options.band_color, alpha * factor));
                }
            }
            self.draw_route(surface, route, &route.shape);
            self.stats.routes += 1;

            if pass == RenderPass::Paint {
                self.tint_selection(surface, route, shape, selection, options, alpha);
            }
        }
    }

    fn draw_route(&mut self, surface: &mut dyn DrawSurface, route: &Route, shape: &RouteShape) {
        match shape {
            RouteShape::Band(area) => {
                self.draw_area(surface, area);
                if route.kind == RouteKind::Point {
                    if let Some(center) = area.centroid() {
                        surface.draw_point(center);
                        self.stats.points += 1;
                    }
                }
            }
            RouteShape::Cross {
                source,
                target,
                cell,
            } => {
                self.draw_area(surface, source);
                self.draw_area(surface, target);
                if route.kind == RouteKind::Point {
                    surface.draw_point(cell.center());
                    self.stats.points += 1;
                } else {
                    surface.fill_polygon(&cell.corners());
                    self.stats.polygons += 1;
                }
            }
            RouteShape::Stub(stub) => {
                surface.fill_polygon(&stub.polygon);
                self.stats.polygons += 1;
            }
        }
    }

    fn draw_area(&mut self, surface: &mut dyn DrawSurface, area: &Area) {
        match area {
            Area::Filled(polygons) => {
                for polygon in polygons {
                    surface.fill_polygon(polygon);
                    self.stats.polygons += 1;
                }
            }
            Area::Stroked(paths) => {
                for path in paths {
                    surface.draw_path(path, false);
                    self.stats.paths += 1;
                }
            }
        }
    }

    /// Tönt den selektierten Anteil einer Route.
    ///
    /// Der Anteil wird am Anfang der Route-Bereiche beider Seiten abgetragen.
    fn tint_selection(
        &mut self,
        surface: &mut dyn DrawSurface,
        route: &Route,
        shape: &BandShape,
        selection: &dyn SelectionHost,
        options: &BandOptions,
        alpha: f32,
    ) {
        for (kind, color) in [
            (SelectionKind::Selection, options.selection_color),
            (SelectionKind::MouseOver, options.mouse_over_color),
        ] {
            let fraction = selected_fraction(route, selection, kind);
            if fraction <= 0.0 {
                continue;
            }
            let partial = if fraction >= 1.0 {
                Some(route.shape.clone())
            } else {
                partial_shape(route, shape, fraction, options)
            };
            if let Some(partial) = partial {
                surface.set_color(with_alpha(color, alpha));
                self.draw_route(surface, route, &partial);
            }
        }
    }
}

/// Selektierter Anteil der IDs einer Route.
fn selected_fraction(route: &Route, selection: &dyn SelectionHost, kind: SelectionKind) -> f32 {
    let ids = if route.source_ids.is_empty() {
        &route.target_ids
    } else {
        &route.source_ids
    };
    if route.kind == RouteKind::Point {
        let first = ids.iter().next();
        return match first {
            Some(id) if selection.is_selected(id, kind) => 1.0,
            _ => 0.0,
        };
    }
    if ids.is_empty() {
        return 0.0;
    }
    selection.selected_count(ids, kind) as f32 / ids.len() as f32
}

/// Teilform über den ersten `fraction`-Anteil beider Bereiche.
fn partial_shape(
    route: &Route,
    shape: &BandShape,
    fraction: f32,
    options: &BandOptions,
) -> Option<RouteShape> {
    let shrink = |(a, b): (f32, f32)| (a, a + (b - a) * fraction);
    match (route.source_range, route.target_range) {
        (Some(source), Some(target)) => shape.area(shrink(source), shrink(target), options),
        (Some(source), None) => shape.stub(Side::Source, shrink(source), options),
        (None, Some(target)) => shape.stub(Side::Target, shrink(target), options),
        (None, None) => None,
    }
}

fn with_alpha(color: [f32; 4], alpha: f32) -> [f32; 4] {
    [color[0], color[1], color[2], color[3] * alpha]
}
