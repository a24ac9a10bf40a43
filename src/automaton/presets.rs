//! Named automata: a rule, its seeding routine and its palette

use super::palette::{Palette, Rgb};
use super::rules::{GenerationsRule, LifeRule, Rule, RugRule, WolframRule};
use super::{Grid, State};
use crate::config::RulePreset;
use crate::error::CaResult;
use log::trace;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Initial population routine applied to a fresh grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Seed {
    /// State k with probability `distribution[k]`
    Random(Vec<f64>),
    /// Zeroed grid with one cell set at the center
    CenterCell(State),
    /// Zeroed grid with a `size` x `size` square centered on the grid
    CenterSquare { size: usize, value: State },
    /// One cell set at row 0, horizontal center
    TopCenter(State),
}

impl Seed {
    pub fn apply<R: Rng>(&self, grid: &mut Grid, rng: &mut R) -> CaResult<()> {
        trace!("Seeding {}x{} grid with {:?}", grid.width(), grid.height(), self);

        match self {
            Seed::Random(distribution) => grid.randomize_with(distribution, rng)?,
            Seed::CenterCell(state) => {
                grid.fill(0);
                let (row, col) = (grid.center_row(), grid.center_col());
                grid.set_cell(row as isize, col as isize, *state);
            }
            Seed::CenterSquare { size, value } => {
                grid.fill(0);
                let half = (*size / 2) as isize;
                let row = grid.center_row() as isize - half;
                let col = grid.center_col() as isize - half;
                grid.fill_rectangle(row, col, *size, *size, *value);
            }
            Seed::TopCenter(state) => {
                let col = grid.center_col();
                grid.set_cell(0, col as isize, *state);
            }
        }

        Ok(())
    }
}

/// A complete automaton recipe
#[derive(Debug, Clone, PartialEq)]
pub struct Preset {
    pub name: String,
    pub rule: Rule,
    pub seed: Seed,
    pub palette: Palette,
}

impl Preset {
    fn new(name: impl Into<String>, rule: impl Into<Rule>, seed: Seed, palette: Palette) -> Self {
        Self {
            name: name.into(),
            rule: rule.into(),
            seed,
            palette,
        }
    }

    /// Life-like rule seeded with 10% alive cells
    pub fn life(born: Vec<usize>, survive: Vec<usize>) -> Self {
        Self::new(
            "life",
            LifeRule::new(born, survive),
            Seed::Random(vec![0.9, 0.0, 0.1]),
            Palette::life(),
        )
    }

    pub fn game_of_life() -> Self {
        Self::new(
            "game_of_life",
            LifeRule::game_of_life(),
            Seed::Random(vec![0.8, 0.0, 0.2]),
            Palette::life(),
        )
    }

    pub fn coral() -> Self {
        Self::new(
            "coral",
            LifeRule::coral(),
            Seed::Random(vec![0.8, 0.0, 0.2]),
            Palette::life(),
        )
    }

    pub fn gnarl() -> Self {
        Self::new(
            "gnarl",
            LifeRule::gnarl(),
            Seed::CenterCell(LifeRule::ALIVE),
            Palette::life(),
        )
    }

    pub fn land_rush() -> Self {
        Self {
            name: "land_rush".to_string(),
            ..Self::life(vec![3, 5], vec![2, 3, 4, 5, 7, 8])
        }
    }

    /// Generations rule seeded with 20% fresh alive cells
    pub fn generations(born: Vec<usize>, survive: Vec<usize>, max_generation: State) -> CaResult<Self> {
        let rule = GenerationsRule::new(born, survive, max_generation)?;
        Ok(Self::from_generations("generations", rule))
    }

    pub fn transers() -> Self {
        Self::from_generations("transers", GenerationsRule::transers())
    }

    pub fn transers_ii() -> Self {
        Self::from_generations("transers_ii", GenerationsRule::transers_ii())
    }

    fn from_generations(name: &str, rule: GenerationsRule) -> Self {
        let palette = Palette::generations(rule.max_generation());
        Self::new(name, rule, Seed::Random(vec![0.8, 0.2]), palette)
    }

    pub fn rug() -> Self {
        Self::new(
            "rug",
            RugRule,
            Seed::CenterSquare { size: 50, value: 255 },
            Palette::rug_spectrum(),
        )
    }

    pub fn rug_grayscale() -> Self {
        Self {
            name: "rug_grayscale".to_string(),
            palette: Palette::rug_grayscale(),
            ..Self::rug()
        }
    }

    pub fn wolfram(rule_number: u8) -> Self {
        Self::new(
            format!("wolfram_{}", rule_number),
            WolframRule::new(rule_number),
            Seed::TopCenter(1),
            Palette::new(vec![Rgb::WHITE, Rgb::BLACK]),
        )
    }

    /// Build the preset a configuration names
    pub fn from_config(preset: &RulePreset) -> CaResult<Self> {
        Ok(match preset {
            RulePreset::GameOfLife => Self::game_of_life(),
            RulePreset::Coral => Self::coral(),
            RulePreset::Gnarl => Self::gnarl(),
            RulePreset::LandRush => Self::land_rush(),
            RulePreset::Life { born, survive } => Self::life(born.clone(), survive.clone()),
            RulePreset::Generations { born, survive, max_generation } => {
                Self::generations(born.clone(), survive.clone(), *max_generation)?
            }
            RulePreset::Transers => Self::transers(),
            RulePreset::TransersII => Self::transers_ii(),
            RulePreset::Rug { grayscale: false } => Self::rug(),
            RulePreset::Rug { grayscale: true } => Self::rug_grayscale(),
            RulePreset::Wolfram { rule_number } => Self::wolfram(*rule_number),
        })
    }
}
