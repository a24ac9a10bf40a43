//! Grid representation, neighborhood queries and seeding primitives

use crate::config::Boundary;
use crate::error::{CaError, CaResult};
use itertools::iproduct;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Integer state held by a single cell
pub type State = u32;

/// Allowed drift of a distribution's sum away from 1.0
const DISTRIBUTION_TOLERANCE: f64 = 1e-6;

/// Map any integer coordinate into `[0, dimension)`
#[inline]
pub fn wrap(coord: isize, dimension: usize) -> usize {
    let n = dimension as isize;
    (((coord % n) + n) % n) as usize
}

/// Dense rectangular store of cell states
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "GridData")]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<State>,
    radius: usize,
    boundary: Boundary,
    generation: u64,
}

/// Unchecked serialized form, validated on the way into a `Grid`
#[derive(Deserialize)]
struct GridData {
    width: usize,
    height: usize,
    cells: Vec<State>,
    radius: usize,
    boundary: Boundary,
    generation: u64,
}

impl TryFrom<GridData> for Grid {
    type Error = CaError;

    fn try_from(data: GridData) -> CaResult<Self> {
        let GridData { width, height, cells, radius, boundary, generation } = data;
        if width == 0 || height == 0 || cells.len() != width * height {
            return Err(CaError::InvalidDimensions { width, height });
        }

        let grid = Self {
            width,
            height,
            cells,
            radius: 1,
            boundary,
            generation,
        };
        grid.with_radius(radius)
    }
}

impl Grid {
    /// Create a zeroed grid with a Moore neighborhood of radius 1
    pub fn new(width: usize, height: usize, boundary: Boundary) -> CaResult<Self> {
        if width == 0 || height == 0 {
            return Err(CaError::InvalidDimensions { width, height });
        }

        Ok(Self {
            width,
            height,
            cells: vec![0; width * height],
            radius: 1,
            boundary,
            generation: 0,
        })
    }

    /// Create a grid from rows of states; every row must have the same length
    pub fn from_cells(cells: Vec<Vec<State>>, boundary: Boundary) -> CaResult<Self> {
        let height = cells.len();
        let width = cells.first().map_or(0, Vec::len);

        if width == 0 || cells.iter().any(|row| row.len() != width) {
            return Err(CaError::InvalidDimensions { width, height });
        }

        Ok(Self {
            width,
            height,
            cells: cells.into_iter().flatten().collect(),
            radius: 1,
            boundary,
            generation: 0,
        })
    }

    /// Builder-style override of the neighborhood radius, which must be positive
    pub fn with_radius(mut self, radius: usize) -> CaResult<Self> {
        if radius == 0 {
            return Err(CaError::InvalidRadius(radius));
        }
        self.radius = radius;
        Ok(self)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn radius(&self) -> usize {
        self.radius
    }

    pub fn boundary(&self) -> Boundary {
        self.boundary
    }

    /// Completed generations since construction
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Row-major view of every cell
    pub fn cells(&self) -> &[State] {
        &self.cells
    }

    /// Row index of the grid center
    pub fn center_row(&self) -> usize {
        self.height / 2
    }

    /// Column index of the grid center
    pub fn center_col(&self) -> usize {
        self.width / 2
    }

    /// Number of cells in a full neighborhood, `(2R+1)^2 - 1`
    pub fn neighborhood_size(&self) -> usize {
        let side = 2 * self.radius + 1;
        side * side - 1
    }

    #[inline]
    pub fn index(&self, row: usize, col: usize) -> usize {
        row * self.width + col
    }

    /// Cell value at coordinates; out of range reads as 0
    pub fn get(&self, row: usize, col: usize) -> State {
        if row < self.height && col < self.width {
            self.cells[self.index(row, col)]
        } else {
            0
        }
    }

    /// Snapshot of the grid as nested rows
    pub fn to_rows(&self) -> Vec<Vec<State>> {
        self.cells
            .chunks(self.width)
            .map(<[State]>::to_vec)
            .collect()
    }

    pub fn in_bounds(&self, row: isize, col: isize) -> bool {
        0 <= row && row < self.height as isize && 0 <= col && col < self.width as isize
    }

    /// True when every coordinate lies inside the grid; vacuously true when empty
    pub fn all_in_bounds<I>(&self, coords: I) -> bool
    where
        I: IntoIterator<Item = (isize, isize)>,
    {
        coords.into_iter().all(|(row, col)| self.in_bounds(row, col))
    }

    /// Resolve a coordinate under the grid's boundary mode
    fn resolve(&self, row: isize, col: isize) -> Option<(usize, usize)> {
        match self.boundary {
            Boundary::Clamped => self
                .in_bounds(row, col)
                .then_some((row as usize, col as usize)),
            Boundary::Toroidal => Some((wrap(row, self.height), wrap(col, self.width))),
        }
    }

    fn neighbor_positions(&self, row: usize, col: usize) -> impl Iterator<Item = (usize, usize)> + '_ {
        let r = self.radius as isize;
        let (row, col) = (row as isize, col as isize);

        iproduct!(-r..=r, -r..=r)
            .filter(|&offset| offset != (0, 0))
            .filter_map(move |(dr, dc)| self.resolve(row + dr, col + dc))
    }

    /// All positions within Chebyshev distance R, excluding the center
    ///
    /// Clamped grids drop positions outside the grid. Toroidal grids always
    /// yield `(2R+1)^2 - 1` positions.
    pub fn neighbors(&self, row: usize, col: usize) -> Vec<(usize, usize)> {
        self.neighbor_positions(row, col).collect()
    }

    /// Neighbor positions whose current value equals `state`
    pub fn neighbors_in_state(&self, row: usize, col: usize, state: State) -> Vec<(usize, usize)> {
        self.neighbor_positions(row, col)
            .filter(|&(r, c)| self.cells[self.index(r, c)] == state)
            .collect()
    }

    /// Count of neighbors in `state`, without allocating
    pub fn count_neighbors_in_state(&self, row: usize, col: usize, state: State) -> usize {
        self.neighbor_positions(row, col)
            .filter(|&(r, c)| self.cells[self.index(r, c)] == state)
            .count()
    }

    /// Sum of every neighbor's value
    pub fn neighbor_sum(&self, row: usize, col: usize) -> u64 {
        self.neighbor_positions(row, col)
            .map(|(r, c)| u64::from(self.cells[self.index(r, c)]))
            .sum()
    }

    /// Boundary-aware write: toroidal grids wrap, clamped grids ignore
    /// coordinates outside the grid
    pub fn set_cell(&mut self, row: isize, col: isize, value: State) {
        if let Some((r, c)) = self.resolve(row, col) {
            let idx = self.index(r, c);
            self.cells[idx] = value;
        }
    }

    pub fn fill(&mut self, value: State) {
        self.cells.fill(value);
    }

    /// Fill `width` x `height` cells with their top-left corner at `(row, col)`
    pub fn fill_rectangle(&mut self, row: isize, col: isize, width: usize, height: usize, value: State) {
        for (i, j) in iproduct!(0..height as isize, 0..width as isize) {
            self.set_cell(row + i, col + j, value);
        }
    }

    /// Write a possibly jagged pattern with its top-left corner at `(row, col)`
    pub fn stamp<P: AsRef<[State]>>(&mut self, row: isize, col: isize, pattern: &[P]) {
        for (i, line) in pattern.iter().enumerate() {
            for (j, &value) in line.as_ref().iter().enumerate() {
                self.set_cell(row + i as isize, col + j as isize, value);
            }
        }
    }

    /// Assign state k with probability `distribution[k]`, using the thread RNG
    pub fn randomize(&mut self, distribution: &[f64]) -> CaResult<()> {
        self.randomize_with(distribution, &mut rand::rng())
    }

    /// Assign state k with probability `distribution[k]`
    ///
    /// The distribution is validated before any cell is written.
    pub fn randomize_with<R: Rng>(&mut self, distribution: &[f64], rng: &mut R) -> CaResult<()> {
        let cumulative = cumulative_thresholds(distribution)?;
        let last = cumulative.len() - 1;

        for cell in self.cells.iter_mut() {
            let u: f64 = rng.random();
            let state = cumulative.iter().position(|&t| t > u).unwrap_or(last);
            *cell = state as State;
        }

        Ok(())
    }

    /// Assign each of `state_count` states with equal probability
    pub fn randomize_uniform(&mut self, state_count: usize) -> CaResult<()> {
        self.randomize_uniform_with(state_count, &mut rand::rng())
    }

    pub fn randomize_uniform_with<R: Rng>(&mut self, state_count: usize, rng: &mut R) -> CaResult<()> {
        if state_count == 0 {
            return Err(CaError::InvalidDistribution(
                "state count must be positive".to_string(),
            ));
        }
        let distribution = vec![1.0 / state_count as f64; state_count];
        self.randomize_with(&distribution, rng)
    }

    /// Swap in a fully computed next generation
    pub(crate) fn commit(&mut self, next: Vec<State>) {
        debug_assert_eq!(next.len(), self.cells.len());
        self.cells = next;
        self.generation += 1;
    }

    /// Count cells holding a non-zero state
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell != 0).count()
    }
}

/// Validate a distribution and turn it into running sums
fn cumulative_thresholds(distribution: &[f64]) -> CaResult<Vec<f64>> {
    if distribution.is_empty() {
        return Err(CaError::InvalidDistribution(
            "distribution is empty".to_string(),
        ));
    }
    if let Some(p) = distribution.iter().find(|p| !p.is_finite() || **p < 0.0) {
        return Err(CaError::InvalidDistribution(format!(
            "probability {} is negative or not finite",
            p
        )));
    }

    let cumulative: Vec<f64> = distribution
        .iter()
        .scan(0.0, |sum, &p| {
            *sum += p;
            Some(*sum)
        })
        .collect();

    let total = cumulative[cumulative.len() - 1];
    if (total - 1.0).abs() > DISTRIBUTION_TOLERANCE {
        return Err(CaError::InvalidDistribution(format!(
            "probabilities sum to {}, expected 1.0",
            total
        )));
    }

    Ok(cumulative)
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.width) {
            for &cell in row {
                let symbol = match cell {
                    0 => '.',
                    1..=9 => char::from(b'0' + cell as u8),
                    _ => '#',
                };
                write!(f, "{}", symbol)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
