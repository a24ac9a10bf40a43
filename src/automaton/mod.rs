//! Cellular automaton core: grid, rules, engine and palettes

pub mod engine;
pub mod grid;
pub mod io;
pub mod palette;
pub mod presets;
pub mod rules;

pub use engine::{step_ensemble, CellChange, Engine, NextGeneration, StepHooks};
pub use grid::{wrap, Grid, State};
pub use io::{load_pattern_from_file, parse_plaintext, pattern_to_plaintext, Pattern, PlaintextFormat};
pub use palette::{Palette, Rgb};
pub use presets::{Preset, Seed};
pub use rules::{GenerationsRule, LifeRule, Rule, RugRule, TransitionRule, WolframRule};
