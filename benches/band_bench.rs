use band_layout::{
    Axis, Band, BandEnd, BandFactory, BandLine, BandOptions, Bounds, GroupSpec, GroupedSequence,
    IdMappingRegistry, IdType, LevelOfDetail, LocatorArena, PolyLine, SequenceLocator,
};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use glam::Vec2;
use std::hint::black_box;
use std::sync::Arc;

/// Zwei Sequenzen mit Gruppen zu je 50 Elementen; jede zweite ID ist gemeinsam.
fn build_synthetic_band(element_count: usize) -> (LocatorArena, IdMappingRegistry, Band) {
    let gene = IdType::new("gene");
    let group_specs = |count: usize| {
        (0..count.div_ceil(50))
            .map(|group| {
                let len = (count - group * 50).min(50);
                GroupSpec::new(format!("G{group}"), [0.5, 0.5, 0.5, 1.0], len)
            })
            .collect::<Vec<_>>()
    };

    let source_ids: Vec<u64> = (1..=element_count as u64).collect();
    let target_ids: Vec<u64> = (1..=element_count as u64).map(|id| id * 2).collect();
    let source = GroupedSequence::with_groups(gene.clone(), source_ids, group_specs(element_count))
        .expect("Quell-Gruppen gültig");
    let target = GroupedSequence::with_groups(gene, target_ids, group_specs(element_count))
        .expect("Ziel-Gruppen gültig");

    let extent = element_count as f32 * 4.0;
    let mut arena = LocatorArena::new();
    let source_locator = arena.insert(SequenceLocator::new(&source, extent, 10.0, true));
    let target_locator = arena.insert(SequenceLocator::new(&target, extent, 10.0, true));

    let registry = IdMappingRegistry::new();
    let band = BandFactory::new(&registry, BandOptions::default())
        .create(
            BandEnd::new(
                Arc::new(source),
                source_locator,
                Bounds::from_origin_size(Vec2::ZERO, Vec2::new(20.0, extent)),
                Axis::Vertical,
            ),
            BandEnd::new(
                Arc::new(target),
                target_locator,
                Bounds::from_origin_size(Vec2::new(300.0, 0.0), Vec2::new(20.0, extent)),
                Axis::Vertical,
            ),
        )
        .expect("Band erwartet");
    (arena, registry, band)
}

fn bench_route_building(c: &mut Criterion) {
    let mut group = c.benchmark_group("route_building");

    for &element_count in &[1_000usize, 10_000usize] {
        let (arena, registry, mut band) = build_synthetic_band(element_count);

        for level in LevelOfDetail::ALL {
            group.bench_with_input(
                BenchmarkId::new(level.to_string(), element_count),
                &level,
                |b, &level| {
                    b.iter(|| {
                        band.invalidate();
                        let routes = band.render_level(black_box(level), &arena, &registry);
                        black_box(routes.len())
                    })
                },
            );
        }
    }

    group.finish();
}

fn bench_stubify(c: &mut Criterion) {
    let samples = 256;
    let top: Vec<Vec2> = (0..samples)
        .map(|i| {
            let t = i as f32 / (samples - 1) as f32;
            Vec2::new(t * 800.0, (t * std::f32::consts::PI).sin() * 120.0)
        })
        .collect();
    let bottom: Vec<Vec2> = top.iter().map(|p| *p + Vec2::new(0.0, 60.0)).collect();
    let line = BandLine::new(PolyLine::new(top, 0), PolyLine::new(bottom, 0));

    c.bench_function("band_line_stubify", |b| {
        b.iter(|| {
            let stubbed = line.stubify(black_box(30.0));
            black_box(stubbed.top().len())
        })
    });

    c.bench_function("band_line_compute_area", |b| {
        b.iter(|| {
            let area = line.compute_area(
                black_box(0.1),
                black_box(0.4),
                black_box(0.2),
                black_box(0.6),
                0.01,
            );
            black_box(area.parts().len())
        })
    });
}

criterion_group!(band_benches, bench_route_building, bench_stubify);
criterion_main!(band_benches);
