//! Sizing grids and cells to a pixel surface

/// Grid dimensions that cover a surface at a given cell size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceFit {
    pub grid_width: usize,
    pub grid_height: usize,
    pub cell_size: usize,
}

/// How many cells of `cell_size` pixels fit the surface in each direction
///
/// Every dimension is at least 1.
pub fn fit_grid_to_surface(cell_size: usize, surface_width: usize, surface_height: usize) -> SurfaceFit {
    let cell_size = cell_size.max(1);
    SurfaceFit {
        grid_width: (surface_width / cell_size).max(1),
        grid_height: (surface_height / cell_size).max(1),
        cell_size,
    }
}

/// Largest square cell size that fits the whole grid on the surface, at least 1
pub fn cell_size_to_fit(grid_width: usize, grid_height: usize, surface_width: usize, surface_height: usize) -> usize {
    let across = surface_width / grid_width.max(1);
    let down = surface_height / grid_height.max(1);
    across.min(down).max(1)
}
