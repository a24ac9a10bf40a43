//! Configuration management for automaton sessions

pub mod settings;

pub use settings::{
    Boundary, DriverConfig, GridConfig, RenderConfig, RulePreset, Settings,
};
