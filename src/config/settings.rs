//! Configuration settings for an automaton session

use crate::automaton::rules::GenerationsRule;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub grid: GridConfig,
    pub rule: RulePreset,
    #[serde(default)]
    pub driver: DriverConfig,
    #[serde(default)]
    pub render: RenderConfig,
    /// Seed for the seeding RNG; the thread RNG is used when absent
    #[serde(default)]
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridConfig {
    /// Zero means "fit to the render surface"
    pub width: usize,
    pub height: usize,
    #[serde(default = "default_radius")]
    pub neighborhood_radius: usize,
    #[serde(default)]
    pub boundary: Boundary,
}

/// How neighbor lookups and writes treat coordinates outside the grid
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Boundary {
    /// Out-of-range positions are absent
    Clamped,
    /// Edges wrap to the opposite side
    #[default]
    Toroidal,
}

/// Named rule configurations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "preset", rename_all = "snake_case")]
pub enum RulePreset {
    GameOfLife,
    Coral,
    Gnarl,
    LandRush,
    Life {
        born: Vec<usize>,
        survive: Vec<usize>,
    },
    Generations {
        born: Vec<usize>,
        survive: Vec<usize>,
        max_generation: u32,
    },
    Transers,
    #[serde(rename = "transers_ii")]
    TransersII,
    Rug {
        #[serde(default)]
        grayscale: bool,
    },
    Wolfram {
        rule_number: u8,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriverConfig {
    pub tick_interval_ms: u64,
    #[serde(default)]
    pub max_ticks: Option<u64>,
    #[serde(default = "default_true")]
    pub start_running: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderConfig {
    pub cell_size: usize,
    pub surface_width: usize,
    pub surface_height: usize,
}

fn default_radius() -> usize {
    1
}

fn default_true() -> bool {
    true
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 50,
            max_ticks: None,
            start_running: true,
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            cell_size: 4,
            surface_width: 320,
            surface_height: 240,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            grid: GridConfig {
                width: 80,
                height: 60,
                neighborhood_radius: 1,
                boundary: Boundary::Toroidal,
            },
            rule: RulePreset::GameOfLife,
            driver: DriverConfig::default(),
            render: RenderConfig::default(),
            seed: None,
        }
    }
}

fn is_json(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "json")
}

impl Settings {
    /// Load settings from a YAML file, or JSON when the extension is `.json`
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let settings: Settings = if is_json(path) {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?
        } else {
            serde_yaml::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?
        };

        settings.validate()?;
        Ok(settings)
    }

    /// Parse and validate settings from YAML text
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let settings: Settings = serde_yaml::from_str(content)
            .context("Failed to parse settings")?;
        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to a file, creating parent directories as needed
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = if is_json(path) {
            serde_json::to_string_pretty(self).context("Failed to serialize settings")?
        } else {
            serde_yaml::to_string(self).context("Failed to serialize settings")?
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<()> {
        if self.grid.neighborhood_radius == 0 {
            anyhow::bail!("Neighborhood radius must be positive");
        }

        if self.driver.tick_interval_ms == 0 {
            anyhow::bail!("Tick interval must be positive");
        }

        if self.render.cell_size == 0 {
            anyhow::bail!("Cell size must be positive");
        }

        if (self.grid.width == 0 || self.grid.height == 0)
            && (self.render.surface_width == 0 || self.render.surface_height == 0)
        {
            anyhow::bail!("Grid dimensions are zero and there is no surface to fit them to");
        }

        if let RulePreset::Generations { born, survive, max_generation } = &self.rule {
            GenerationsRule::new(born.clone(), survive.clone(), *max_generation)
                .context("Invalid generations rule")?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_settings_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.grid.boundary, Boundary::Toroidal);
        assert_eq!(settings.rule, RulePreset::GameOfLife);
    }

    #[test]
    fn test_parse_yaml() {
        let yaml = r#"
grid:
  width: 40
  height: 30
  boundary: clamped
rule:
  preset: generations
  born: [2, 6]
  survive: [3, 4, 5]
  max_generation: 5
driver:
  tick_interval_ms: 10
  max_ticks: 100
seed: 9
"#;
        let settings = Settings::from_yaml_str(yaml).unwrap();
        assert_eq!(settings.grid.neighborhood_radius, 1);
        assert_eq!(settings.grid.boundary, Boundary::Clamped);
        assert_eq!(
            settings.rule,
            RulePreset::Generations {
                born: vec![2, 6],
                survive: vec![3, 4, 5],
                max_generation: 5,
            }
        );
        assert_eq!(settings.driver.max_ticks, Some(100));
        assert!(settings.driver.start_running);
        assert_eq!(settings.render, RenderConfig::default());
        assert_eq!(settings.seed, Some(9));
    }

    #[test]
    fn test_parse_named_presets() {
        let yaml = "grid: {width: 5, height: 5}\nrule: {preset: transers_ii}\n";
        assert_eq!(Settings::from_yaml_str(yaml).unwrap().rule, RulePreset::TransersII);

        let yaml = "grid: {width: 5, height: 5}\nrule: {preset: wolfram, rule_number: 90}\n";
        assert_eq!(
            Settings::from_yaml_str(yaml).unwrap().rule,
            RulePreset::Wolfram { rule_number: 90 }
        );

        let yaml = "grid: {width: 5, height: 5}\nrule: {preset: rug}\n";
        assert_eq!(
            Settings::from_yaml_str(yaml).unwrap().rule,
            RulePreset::Rug { grayscale: false }
        );
    }

    #[test]
    fn test_validation_errors() {
        let mut settings = Settings::default();
        settings.driver.tick_interval_ms = 0;
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.grid.neighborhood_radius = 0;
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.rule = RulePreset::Generations {
            born: vec![2],
            survive: vec![3],
            max_generation: 2,
        };
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.grid.width = 0;
        settings.render.surface_width = 0;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_file_round_trip() {
        let temp_dir = tempdir().unwrap();
        let mut settings = Settings::default();
        settings.rule = RulePreset::Wolfram { rule_number: 30 };
        settings.seed = Some(3);

        let yaml_path = temp_dir.path().join("config/session.yaml");
        settings.to_file(&yaml_path).unwrap();
        assert_eq!(Settings::from_file(&yaml_path).unwrap(), settings);

        let json_path = temp_dir.path().join("session.json");
        settings.to_file(&json_path).unwrap();
        assert_eq!(Settings::from_file(&json_path).unwrap(), settings);
    }

    #[test]
    fn test_missing_file() {
        let err = Settings::from_file("does/not/exist.yaml").unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
