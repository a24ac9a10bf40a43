//! Formatting and sizing helpers

pub mod display;
pub mod fit;

pub use display::{Color, ColorOutput, GridFormatter};
pub use fit::{cell_size_to_fit, fit_grid_to_surface, SurfaceFit};
