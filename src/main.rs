//! Band-Layout-Demo.
//!
//! Baut eine Referenz-Szene aus zwei gruppierten Sequenzen, loggt die Routen
//! jeder Detailstufe und rendert Paint- und Pick-Pass auf eine
//! aufzeichnende Zeichenfläche.
//!
//! Aufruf: `band-layout [optionen.toml] [--write-config]`

use anyhow::{bail, Context, Result};
use band_layout::{
    Axis, Band, BandEnd, BandFactory, BandOptions, BandRenderer, Bounds, GroupSpec,
    GroupedSequence, IdMappingRegistry, IdSelection, IdType, LevelOfDetail, LocatorArena,
    RecordingSurface, RenderPass, SelectionKind, SequenceLocator,
};
use glam::Vec2;
use std::path::PathBuf;
use std::sync::Arc;

fn main() -> Result<()> {
    // Logger initialisieren
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    log::info!("Band-Layout v{} startet...", env!("CARGO_PKG_VERSION"));

    let mut config_path = BandOptions::config_path();
    let mut write_config = false;
    for arg in std::env::args().skip(1) {
        if arg == "--write-config" {
            write_config = true;
        } else {
            config_path = PathBuf::from(arg);
        }
    }

    let options = BandOptions::load_from_file(&config_path);
    if write_config {
        options
            .save_to_file(&config_path)
            .with_context(|| format!("Optionen nicht speicherbar: {}", config_path.display()))?;
    }

    DemoRunner::new(options)?.run()
}

/// Referenz-Szene mit Arena, Registry und Band.
struct DemoRunner {
    arena: LocatorArena,
    registry: IdMappingRegistry,
    band: Band,
}

impl DemoRunner {
    /// S = A{1,2,3}, B{4,5} links; T = X{2,3,4} rechts daneben.
    fn new(options: BandOptions) -> Result<Self> {
        let gene = IdType::new("gene");
        let source = GroupedSequence::with_groups(
            gene.clone(),
            vec![1, 2, 3, 4, 5],
            [
                GroupSpec::new("A", [0.9, 0.3, 0.3, 1.0], 3),
                GroupSpec::new("B", [0.3, 0.3, 0.9, 1.0], 2),
            ],
        )
        .context("Quell-Sequenz ungültig")?;
        let target = GroupedSequence::with_groups(
            gene,
            vec![2, 3, 4],
            [GroupSpec::new("X", [0.3, 0.8, 0.3, 1.0], 3)],
        )
        .context("Ziel-Sequenz ungültig")?;

        let mut arena = LocatorArena::new();
        let source_locator = arena.insert(SequenceLocator::new(&source, 110.0, 10.0, true));
        let target_locator = arena.insert(SequenceLocator::new(&target, 60.0, 0.0, true));

        let registry = IdMappingRegistry::new();
        let Some(band) = BandFactory::new(&registry, options).create(
            BandEnd::new(
                Arc::new(source),
                source_locator,
                Bounds::from_origin_size(Vec2::new(40.0, 40.0), Vec2::new(20.0, 110.0)),
                Axis::Vertical,
            ),
            BandEnd::new(
                Arc::new(target),
                target_locator,
                Bounds::from_origin_size(Vec2::new(260.0, 60.0), Vec2::new(20.0, 60.0)),
                Axis::Vertical,
            ),
        ) else {
            bail!("Referenz-Szene ergibt kein Band");
        };

        Ok(Self {
            arena,
            registry,
            band,
        })
    }

    fn run(mut self) -> Result<()> {
        log::info!(
            "Band: {} gemeinsame Elemente, Form {}",
            self.band.shared().len(),
            self.band.shape().kind()
        );

        for level in LevelOfDetail::ALL {
            let routes = self.band.render_level(level, &self.arena, &self.registry);
            log::info!(
                "Stufe {} → {} Routen (gebaut auf {})",
                level,
                routes.len(),
                routes.level()
            );
            for (index, route) in routes.iter().enumerate() {
                log::info!("  [{}] {:?} '{}'", index, route.kind, route.label);
            }
        }

        while self.band.change_level(true, &self.arena) {}
        log::info!("Aktive Stufe: {}", self.band.level());

        let mut selection = IdSelection::new(self.band.shared().id_type().clone());
        selection.select(SelectionKind::Selection, [2]);

        let mut renderer = BandRenderer::new();
        let mut paint = RecordingSurface::new();
        renderer.render(
            &mut self.band,
            &self.arena,
            &self.registry,
            &mut paint,
            &selection,
            RenderPass::Paint,
        );
        log::info!("Paint-Pass: {:?}", renderer.stats());

        let mut pick = RecordingSurface::new();
        renderer.render(
            &mut self.band,
            &self.arena,
            &self.registry,
            &mut pick,
            &IdSelection::new(selection.id_type().clone()),
            RenderPass::Pick,
        );
        log::info!("Pick-Pass: {:?}", renderer.stats());

        if let Some(label) = self.band.label(0) {
            log::info!("Pick-Index 0 → '{}'", label);
        }

        let paint_routes = paint.commands().len();
        let pick_routes = pick.commands().len();
        if paint_routes == 0 || pick_routes == 0 {
            bail!("Keine Zeichenbefehle aufgezeichnet");
        }
        log::info!(
            "{} Paint- und {} Pick-Befehle aufgezeichnet",
            paint_routes,
            pick_routes
        );
        Ok(())
    }
}
