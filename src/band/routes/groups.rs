//! GROUPS: eine Route je überlappendem Gruppen-Paar, Reste als Not-Mapped-Stubs.
//!
//! Pro S-Gruppe läuft ein Akkumulator über alle T-Gruppen, pro T-Gruppe einer
//! über alle S-Gruppen. Jeder Akkumulator rückt um die verbrauchten Elemente
//! vor, sodass Teil-Routen einer Gruppe lückenlos und überlappungsfrei liegen.

use super::{map_to_target, normalize, not_mapped, sub_interval, RouteContext};
use crate::band::route::{Route, RouteKind};
use crate::core::{Group, Id, IdSet, Interval, LevelOfDetail, INVALID_ID};
use crate::geometry::Side;
use indexmap::IndexSet;

/// T-Gruppe mit vorberechneten gemeinsamen IDs.
struct TargetGroup<'a> {
    group: &'a Group,
    interval: Option<Interval>,
    shared: IndexSet<Id>,
}

pub(super) fn build(
    ctx: &RouteContext<'_>,
    source_overview: &Interval,
    target_overview: &Interval,
) -> Vec<Route> {
    let target_groups: Vec<TargetGroup<'_>> = ctx
        .target
        .groups()
        .iter()
        .enumerate()
        .map(|(j, group)| TargetGroup {
            group,
            interval: ctx
                .target_locator
                .locate(LevelOfDetail::Groups, j)
                .filter(Interval::is_finite),
            shared: ctx.target_index.ids_in(group.range()),
        })
        .collect();

    let mut target_acc = vec![0usize; target_groups.len()];
    let mut target_consumed: Vec<IndexSet<Id>> = vec![IndexSet::new(); target_groups.len()];
    let mut routes = Vec::new();

    for (i, source_group) in ctx.source.groups().iter().enumerate() {
        let Some(source_interval) = ctx
            .source_locator
            .locate(LevelOfDetail::Groups, i)
            .filter(Interval::is_finite)
        else {
            log::debug!("S-Gruppe '{}' ohne GROUPS-Intervall, übersprungen", source_group.label);
            continue;
        };
        let source_shared = ctx.source_index.ids_in(source_group.range());
        let mut source_acc = 0usize;
        let mut source_consumed: IndexSet<Id> = IndexSet::new();

        for (j, target_group) in target_groups.iter().enumerate() {
            let Some(target_interval) = target_group.interval else {
                continue;
            };
            let overlap: IndexSet<Id> = source_shared
                .iter()
                .filter(|id| target_group.shared.contains(*id))
                .copied()
                .collect();
            if overlap.is_empty() {
                continue;
            }

            let source_used = ctx
                .source_index
                .count_matching(source_group.range(), &overlap);
            let target_used = ctx
                .target_index
                .count_matching(target_group.group.range(), &overlap);

            let (s_start, s_end) =
                sub_interval(&source_interval, source_group.len(), source_acc, source_used);
            let (t_start, t_end) = sub_interval(
                &target_interval,
                target_group.group.len(),
                target_acc[j],
                target_used,
            );
            source_acc += source_used;
            target_acc[j] += target_used;

            let source_ids = IdSet::new(ctx.source.id_type().clone(), overlap.iter().copied());
            let target_ids = map_to_target(ctx, &source_ids);
            source_consumed.extend(overlap.iter().copied());
            target_consumed[j].extend(target_ids.iter());

            // 1:n-Abbildungen zählen ein Element für mehrere Gruppen; ist der
            // Bereich einer Seite bereits verbraucht, bleibt nichts zu zeichnen.
            if s_end - s_start <= f32::EPSILON || t_end - t_start <= f32::EPSILON {
                log::debug!(
                    "Teil-Route '{} x {}' ohne Ausdehnung übersprungen",
                    source_group.label,
                    target_group.group.label
                );
                continue;
            }
            let source_range = normalize(source_overview, s_start, s_end);
            let target_range = normalize(target_overview, t_start, t_end);

            let Some(shape) = ctx.shape.area(source_range, target_range, ctx.options) else {
                continue;
            };
            routes.push(Route {
                label: format!("{} x {}", source_group.label, target_group.group.label),
                kind: RouteKind::Group,
                source_ids,
                target_ids,
                source_range: Some(source_range),
                target_range: Some(target_range),
                shape,
            });
        }

        let remainder = source_group.len().saturating_sub(source_acc);
        if remainder > 0 {
            let (start, end) =
                sub_interval(&source_interval, source_group.len(), source_acc, remainder);
            let ids = IdSet::new(
                ctx.source.id_type().clone(),
                rest_ids(ctx.source.group_ids(i), &source_consumed),
            );
            routes.extend(not_mapped(
                ctx,
                Side::Source,
                format!("{} not mapped", source_group.label),
                normalize(source_overview, start, end),
                ids,
            ));
        }
    }

    for (j, target_group) in target_groups.iter().enumerate() {
        let Some(target_interval) = target_group.interval else {
            continue;
        };
        let len = target_group.group.len();
        let remainder = len.saturating_sub(target_acc[j]);
        if remainder == 0 {
            continue;
        }
        let (start, end) = sub_interval(&target_interval, len, target_acc[j], remainder);
        let ids = IdSet::new(
            ctx.target.id_type().clone(),
            rest_ids(ctx.target.group_ids(j), &target_consumed[j]),
        );
        routes.extend(not_mapped(
            ctx,
            Side::Target,
            format!("{} not mapped", target_group.group.label),
            normalize(target_overview, start, end),
            ids,
        ));
    }

    routes
}

/// IDs einer Gruppe, die von keiner Teil-Route verbraucht wurden (ohne Padding).
fn rest_ids<'a>(
    group_ids: &'a [Id],
    consumed: &'a IndexSet<Id>,
) -> impl Iterator<Item = Id> + 'a {
    group_ids
        .iter()
        .copied()
        .filter(move |id| *id != INVALID_ID && !consumed.contains(id))
}
