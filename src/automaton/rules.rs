//! Transition rules: pure next-state functions over a read-only grid

use super::{Grid, State};
use crate::error::{CaError, CaResult};
use serde::{Deserialize, Serialize};

/// Computes the next state of one cell from the current generation
///
/// Implementations must only read the grid. The engine evaluates a rule once
/// per cell per generation against the same unchanged grid.
pub trait TransitionRule {
    fn next_state(&self, grid: &Grid, row: usize, col: usize) -> State;

    /// Highest state this rule can produce from states it understands
    fn max_state(&self) -> State;
}

/// Life-like rule with a one-generation "just died" marker
///
/// States: 0 dead, 1 just died, 2 alive. Only alive cells are counted as
/// neighbors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifeRule {
    born: Vec<usize>,
    survive: Vec<usize>,
}

impl LifeRule {
    pub const DEAD: State = 0;
    pub const JUST_DIED: State = 1;
    pub const ALIVE: State = 2;

    pub fn new(born: Vec<usize>, survive: Vec<usize>) -> Self {
        Self { born, survive }
    }

    /// B3/S23
    pub fn game_of_life() -> Self {
        Self::new(vec![3], vec![2, 3])
    }

    /// B3/S45678
    pub fn coral() -> Self {
        Self::new(vec![3], vec![4, 5, 6, 7, 8])
    }

    /// B1/S1
    pub fn gnarl() -> Self {
        Self::new(vec![1], vec![1])
    }

    /// B35/S234578
    pub fn land_rush() -> Self {
        Self::new(vec![3, 5], vec![2, 3, 4, 5, 7, 8])
    }

    pub fn born(&self) -> &[usize] {
        &self.born
    }

    pub fn survive(&self) -> &[usize] {
        &self.survive
    }

    /// Next state given the current state and the number of alive neighbors
    pub fn apply(&self, current: State, alive_neighbors: usize) -> State {
        if current == Self::ALIVE {
            if self.survive.contains(&alive_neighbors) {
                Self::ALIVE
            } else {
                Self::JUST_DIED
            }
        } else if self.born.contains(&alive_neighbors) {
            Self::ALIVE
        } else {
            Self::DEAD
        }
    }
}

impl TransitionRule for LifeRule {
    fn next_state(&self, grid: &Grid, row: usize, col: usize) -> State {
        let alive = grid.count_neighbors_in_state(row, col, Self::ALIVE);
        self.apply(grid.get(row, col), alive)
    }

    fn max_state(&self) -> State {
        Self::ALIVE
    }
}

/// Generations rule: live cells age through `2..max_generation` before dying
///
/// Only freshly alive cells (state 1) count as neighbors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "GenerationsParams")]
pub struct GenerationsRule {
    born: Vec<usize>,
    survive: Vec<usize>,
    max_generation: State,
}

#[derive(Deserialize)]
struct GenerationsParams {
    born: Vec<usize>,
    survive: Vec<usize>,
    max_generation: State,
}

impl TryFrom<GenerationsParams> for GenerationsRule {
    type Error = CaError;

    fn try_from(params: GenerationsParams) -> CaResult<Self> {
        Self::new(params.born, params.survive, params.max_generation)
    }
}

impl GenerationsRule {
    pub const DEAD: State = 0;
    pub const ALIVE: State = 1;

    pub fn new(born: Vec<usize>, survive: Vec<usize>, max_generation: State) -> CaResult<Self> {
        if max_generation < 3 {
            return Err(CaError::InvalidRule(format!(
                "max_generation must be at least 3, got {}",
                max_generation
            )));
        }
        Ok(Self {
            born,
            survive,
            max_generation,
        })
    }

    /// B26/S345, 5 states
    pub fn transers() -> Self {
        Self {
            born: vec![2, 6],
            survive: vec![3, 4, 5],
            max_generation: 5,
        }
    }

    /// B26/S0345, 6 states
    pub fn transers_ii() -> Self {
        Self {
            born: vec![2, 6],
            survive: vec![0, 3, 4, 5],
            max_generation: 6,
        }
    }

    pub fn max_generation(&self) -> State {
        self.max_generation
    }

    pub fn apply(&self, current: State, alive_neighbors: usize) -> State {
        match current {
            Self::DEAD if self.born.contains(&alive_neighbors) => Self::ALIVE,
            Self::DEAD => Self::DEAD,
            Self::ALIVE if self.survive.contains(&alive_neighbors) => Self::ALIVE,
            Self::ALIVE => 2,
            aging if aging < self.max_generation - 1 => aging + 1,
            _ => Self::DEAD,
        }
    }
}

impl TransitionRule for GenerationsRule {
    fn next_state(&self, grid: &Grid, row: usize, col: usize) -> State {
        let current = grid.get(row, col);
        // Aging cells ignore their neighborhood
        if current > Self::ALIVE {
            return self.apply(current, 0);
        }
        let alive = grid.count_neighbors_in_state(row, col, Self::ALIVE);
        self.apply(current, alive)
    }

    fn max_state(&self) -> State {
        self.max_generation - 1
    }
}

/// Diffusion rule: neighborhood average plus one, modulo 256
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RugRule;

impl TransitionRule for RugRule {
    fn next_state(&self, grid: &Grid, row: usize, col: usize) -> State {
        // The divisor is the full neighborhood size even where edges clip it
        let average = grid.neighbor_sum(row, col) / grid.neighborhood_size() as u64;
        ((average + 1) % 256) as State
    }

    fn max_state(&self) -> State {
        255
    }
}

/// Elementary 1-D automaton drawn one row per generation
///
/// Row `g` is computed during generation `g` from row `g - 1`. Every other
/// row, and any cell of the live row that is already set, keeps its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WolframRule {
    rule_number: u8,
    table: [State; 8],
}

impl WolframRule {
    pub fn new(rule_number: u8) -> Self {
        let mut table = [0; 8];
        for (label, next) in table.iter_mut().enumerate() {
            *next = State::from((rule_number >> label) & 1);
        }
        Self { rule_number, table }
    }

    pub fn rule_number(&self) -> u8 {
        self.rule_number
    }

    /// Next state for a neighborhood label `left << 2 | center << 1 | right`
    pub fn lookup(&self, label: usize) -> State {
        self.table[label & 0b111]
    }
}

impl TransitionRule for WolframRule {
    fn next_state(&self, grid: &Grid, row: usize, col: usize) -> State {
        let current = grid.get(row, col);
        if row as u64 != grid.generation() || current != 0 {
            return current;
        }

        let (r, c) = (row as isize, col as isize);
        let above = [(r - 1, c - 1), (r - 1, c), (r - 1, c + 1)];
        if !grid.all_in_bounds(above) {
            return 0;
        }

        let label = above.iter().fold(0, |label, &(ar, ac)| {
            (label << 1) | usize::from(grid.get(ar as usize, ac as usize) != 0)
        });
        self.lookup(label)
    }

    fn max_state(&self) -> State {
        1
    }
}

/// Any of the built-in rule families
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    Life(LifeRule),
    Generations(GenerationsRule),
    Rug(RugRule),
    Wolfram(WolframRule),
}

impl TransitionRule for Rule {
    fn next_state(&self, grid: &Grid, row: usize, col: usize) -> State {
        match self {
            Rule::Life(rule) => rule.next_state(grid, row, col),
            Rule::Generations(rule) => rule.next_state(grid, row, col),
            Rule::Rug(rule) => rule.next_state(grid, row, col),
            Rule::Wolfram(rule) => rule.next_state(grid, row, col),
        }
    }

    fn max_state(&self) -> State {
        match self {
            Rule::Life(rule) => rule.max_state(),
            Rule::Generations(rule) => rule.max_state(),
            Rule::Rug(rule) => rule.max_state(),
            Rule::Wolfram(rule) => rule.max_state(),
        }
    }
}

impl From<LifeRule> for Rule {
    fn from(rule: LifeRule) -> Self {
        Rule::Life(rule)
    }
}

impl From<GenerationsRule> for Rule {
    fn from(rule: GenerationsRule) -> Self {
        Rule::Generations(rule)
    }
}

impl From<RugRule> for Rule {
    fn from(rule: RugRule) -> Self {
        Rule::Rug(rule)
    }
}

impl From<WolframRule> for Rule {
    fn from(rule: WolframRule) -> Self {
        Rule::Wolfram(rule)
    }
}
