//! DETAIL: eine Route je Element-Paar, anschließende Paare werden zusammengefasst.

use super::{normalize, RouteContext};
use crate::band::route::{Route, RouteKind};
use crate::core::{Id, IdSet, Interval, LevelOfDetail};
use indexmap::IndexMap;

/// Offener Merge-Kandidat.
#[derive(Debug)]
struct Candidate {
    source_start: f32,
    source_end: f32,
    target_start: f32,
    target_end: f32,
    last_source: Interval,
    last_target: Interval,
    shared_ids: Vec<Id>,
    target_ids: Vec<Id>,
    pairs: usize,
}

impl Candidate {
    fn open(source: Interval, target: Interval, shared: Id, target_id: Id) -> Self {
        Self {
            source_start: source.offset,
            source_end: source.end(),
            target_start: target.offset,
            target_end: target.end(),
            last_source: source,
            last_target: target,
            shared_ids: vec![shared],
            target_ids: vec![target_id],
            pairs: 1,
        }
    }

    /// Nimmt das Paar auf, wenn beide Intervalle am Ende anschließen
    /// oder dem zuletzt aufgenommenen Paar entsprechen.
    fn try_merge(
        &mut self,
        source: Interval,
        target: Interval,
        shared: Id,
        target_id: Id,
        epsilon: f32,
    ) -> bool {
        let near = |a: f32, b: f32| (a - b).abs() <= epsilon;
        let continues =
            near(source.offset, self.source_end) && near(target.offset, self.target_end);
        let identical = near(source.offset, self.last_source.offset)
            && near(source.size, self.last_source.size)
            && near(target.offset, self.last_target.offset)
            && near(target.size, self.last_target.size);
        if !continues && !identical {
            return false;
        }
        if continues {
            self.source_end = source.end();
            self.target_end = target.end();
        }
        self.last_source = source;
        self.last_target = target;
        if !self.shared_ids.contains(&shared) {
            self.shared_ids.push(shared);
        }
        if !self.target_ids.contains(&target_id) {
            self.target_ids.push(target_id);
        }
        self.pairs += 1;
        true
    }
}

pub(super) fn build(
    ctx: &RouteContext<'_>,
    source_overview: &Interval,
    target_overview: &Interval,
) -> Vec<Route> {
    if !ctx.source_locator.has_level(LevelOfDetail::Detail)
        || !ctx.target_locator.has_level(LevelOfDetail::Detail)
    {
        return Vec::new();
    }

    // gemeinsame ID → T-Indizes
    let mut target_positions: IndexMap<Id, Vec<usize>> = IndexMap::new();
    for j in 0..ctx.target_index.len() {
        for &id in ctx.target_index.element(j) {
            target_positions.entry(id).or_default().push(j);
        }
    }

    let epsilon = ctx.options.merge_epsilon;
    let mut candidates: Vec<Candidate> = Vec::new();
    // Indizes der Kandidaten, die noch wachsen können
    let mut open: Vec<usize> = Vec::new();

    for i in 0..ctx.source_index.len() {
        let shared = ctx.source_index.element(i);
        if shared.is_empty() {
            continue;
        }
        let Some(source_interval) = ctx
            .source_locator
            .locate(LevelOfDetail::Detail, i)
            .filter(Interval::is_finite)
        else {
            continue;
        };
        // S-Intervalle steigen mit dem Index; Kandidaten, die vor dem
        // aktuellen Intervall enden, können nicht mehr anschließen.
        open.retain(|&index| candidates[index].source_end + epsilon >= source_interval.offset);

        for &id in shared {
            let Some(positions) = target_positions.get(&id) else {
                continue;
            };
            for &j in positions {
                let Some(target_interval) = ctx
                    .target_locator
                    .locate(LevelOfDetail::Detail, j)
                    .filter(Interval::is_finite)
                else {
                    continue;
                };
                let Some(target_id) = ctx.target.get(j) else {
                    continue;
                };

                let merged = open.iter().rev().any(|&index| {
                    candidates[index].try_merge(
                        source_interval,
                        target_interval,
                        id,
                        target_id,
                        epsilon,
                    )
                });
                if !merged {
                    open.push(candidates.len());
                    candidates.push(Candidate::open(
                        source_interval,
                        target_interval,
                        id,
                        target_id,
                    ));
                }
            }
        }
    }

    candidates
        .into_iter()
        .filter_map(|candidate| flush(ctx, candidate, source_overview, target_overview))
        .collect()
}

fn flush(
    ctx: &RouteContext<'_>,
    candidate: Candidate,
    source_overview: &Interval,
    target_overview: &Interval,
) -> Option<Route> {
    let source_range = normalize(source_overview, candidate.source_start, candidate.source_end);
    let target_range = normalize(target_overview, candidate.target_start, candidate.target_end);
    let shape = ctx.shape.area(source_range, target_range, ctx.options)?;

    let (kind, label) = if candidate.pairs == 1 {
        (RouteKind::Point, candidate.shared_ids[0].to_string())
    } else {
        let joined = candidate
            .shared_ids
            .iter()
            .map(Id::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        (RouteKind::List, joined)
    };

    Some(Route {
        label,
        kind,
        source_ids: IdSet::new(ctx.source.id_type().clone(), candidate.shared_ids),
        target_ids: IdSet::new(ctx.target.id_type().clone(), candidate.target_ids),
        source_range: Some(source_range),
        target_range: Some(target_range),
        shape,
    })
}
