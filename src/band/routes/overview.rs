//! OVERVIEW: eine Route für die gesamte gemeinsame Menge plus Not-Mapped-Stubs.

use super::{map_to_target, not_mapped, RouteContext};
use crate::band::route::{Route, RouteKind};
use crate::core::IdSet;
use crate::geometry::Side;

pub(super) fn build(ctx: &RouteContext<'_>) -> Vec<Route> {
    let source_fraction = fraction(ctx.source_index.shared_count(), ctx.source.len());
    let target_fraction = fraction(ctx.target_index.shared_count(), ctx.target.len());

    let mut routes = Vec::with_capacity(3);
    let source_range = (0.0, source_fraction);
    let target_range = (0.0, target_fraction);
    let target_ids = map_to_target(ctx, ctx.shared);

    if let Some(shape) = ctx.shape.area(source_range, target_range, ctx.options) {
        routes.push(Route {
            label: format!("{} shared", ctx.shared.len()),
            kind: RouteKind::Overview,
            source_ids: ctx.shared.clone(),
            target_ids: target_ids.clone(),
            source_range: Some(source_range),
            target_range: Some(target_range),
            shape,
        });
    }

    if source_fraction < 1.0 {
        let rest = IdSet::new(
            ctx.source.id_type().clone(),
            ctx.source.as_set().iter().filter(|&id| !ctx.shared.contains(id)),
        );
        let label = format!("{} not mapped", rest.len());
        routes.extend(not_mapped(ctx, Side::Source, label, (source_fraction, 1.0), rest));
    }
    if target_fraction < 1.0 {
        let rest = IdSet::new(
            ctx.target.id_type().clone(),
            ctx.target
                .as_set()
                .iter()
                .filter(|&id| !target_ids.contains(id)),
        );
        let label = format!("{} not mapped", rest.len());
        routes.extend(not_mapped(ctx, Side::Target, label, (target_fraction, 1.0), rest));
    }

    routes
}

fn fraction(shared: usize, total: usize) -> f32 {
    if total == 0 {
        return 0.0;
    }
    shared as f32 / total as f32
}
