//! Cellular Automata
//!
//! A grid-based automaton engine with a library of transition rules
//! (Life-like, Generations, Rug diffusion and elementary 1-D), palette
//! mapping, incremental rendering and a fixed-interval driver.

pub mod automaton;
pub mod config;
pub mod driver;
pub mod error;
pub mod render;
pub mod utils;

pub use automaton::{CellChange, Engine, Grid, Palette, Preset, Rule, State, TransitionRule};
pub use config::Settings;
pub use driver::{Driver, DriverReport, RunGate};
pub use error::{CaError, CaResult, PatternParseError};
pub use render::Renderer;

use anyhow::{Context, Result};
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Everything needed to run one configured automaton
pub struct Session {
    pub name: String,
    pub engine: Engine<Rule>,
    pub palette: Palette,
    pub driver: Driver,
}

impl Session {
    /// Drive the engine into `renderer` until the driver stops
    pub fn run<P: Renderer + ?Sized>(&mut self, renderer: &mut P) -> CaResult<DriverReport> {
        self.driver.run(&mut self.engine, renderer, &self.palette)
    }
}

/// Build and seed an engine from validated settings
pub fn build_session(settings: &Settings) -> Result<Session> {
    settings.validate()?;

    let preset = Preset::from_config(&settings.rule).context("Failed to build rule preset")?;

    let (mut width, mut height) = (settings.grid.width, settings.grid.height);
    if width == 0 || height == 0 {
        let render = &settings.render;
        let fit = utils::fit_grid_to_surface(render.cell_size, render.surface_width, render.surface_height);
        if width == 0 {
            width = fit.grid_width;
        }
        if height == 0 {
            height = fit.grid_height;
        }
    }

    let grid = Grid::new(width, height, settings.grid.boundary)
        .and_then(|grid| grid.with_radius(settings.grid.neighborhood_radius))
        .context("Failed to create grid")?;

    let mut engine = Engine::new(grid, preset.rule);
    let seeded = match settings.seed {
        Some(seed) => engine.seed(&preset.seed, &mut StdRng::seed_from_u64(seed)),
        None => engine.seed(&preset.seed, &mut rand::rng()),
    };
    seeded.context("Failed to seed grid")?;

    info!(
        "[Session] Built '{}' on a {}x{} {:?} grid, {} alive",
        preset.name,
        width,
        height,
        settings.grid.boundary,
        engine.grid().population()
    );

    Ok(Session {
        name: preset.name,
        engine,
        palette: preset.palette,
        driver: Driver::from_config(&settings.driver),
    })
}
