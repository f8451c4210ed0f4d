//! Benchmark and preset configuration files
//!
//! ```toml
//! [bench]
//! effects = ["tunnel", "fountain"]
//! start_count = 1000
//! end_count = 301000
//! steps = 30
//! frames = 200
//!
//! [effects.fountain]
//! tint_color = [1.0, 0.4, 0.1, 1.0]
//! tint_mix = 0.5
//! ```

use anyhow::{bail, Context, Result};
use ember_effects::{resolve_effect_name, unknown_effect, PresetConfig, EFFECT_NAMES};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

/// Particle-count sweep driven by `ember bench`
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct BenchConfig {
    pub effects: Vec<String>,
    pub start_count: usize,
    pub end_count: usize,
    pub steps: usize,
    pub frames: u32,
    pub delta_time: f64,
    /// Counts below this are skipped
    pub min_count: Option<usize>,
    /// Counts above this are skipped
    pub max_count: Option<usize>,
    /// Seed for presets that don't set their own
    pub seed: Option<u64>,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            effects: EFFECT_NAMES.iter().map(|n| n.to_string()).collect(),
            start_count: 1000,
            end_count: 301_000,
            steps: 30,
            frames: 200,
            delta_time: 1.0 / 60.0,
            min_count: None,
            max_count: None,
            seed: None,
        }
    }
}

impl BenchConfig {
    pub fn validate(&self) -> Result<()> {
        if self.effects.is_empty() {
            bail!("bench needs at least one effect");
        }
        if let Some(name) = self
            .effects
            .iter()
            .find(|name| resolve_effect_name(name).is_none())
        {
            return Err(unknown_effect(name).into());
        }
        if !(self.delta_time > 0.0) {
            bail!("delta_time must be positive, got {}", self.delta_time);
        }
        if self.end_count < self.start_count {
            bail!(
                "end_count ({}) is below start_count ({})",
                self.end_count,
                self.start_count
            );
        }
        Ok(())
    }

    /// Particle counts to measure: `steps` evenly spaced values from
    /// `start_count`, excluding `end_count`, filtered by the optional window.
    pub fn counts(&self) -> Vec<usize> {
        if self.steps == 0 {
            return Vec::new();
        }
        let step = self.end_count.saturating_sub(self.start_count) / self.steps;
        (0..self.steps)
            .map(|i| self.start_count + i * step)
            .filter(|&n| self.min_count.map_or(true, |min| n >= min))
            .filter(|&n| self.max_count.map_or(true, |max| n <= max))
            .collect()
    }
}

/// Everything a config file can carry
#[derive(Debug, Clone, Default)]
pub struct ConfigFile {
    pub bench: BenchConfig,
    pub presets: HashMap<String, PresetConfig>,
}

impl ConfigFile {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("Invalid config {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        let table: toml::Table = content.parse().context("Failed to parse TOML")?;
        let mut file = Self::default();

        if let Some(bench) = table.get("bench") {
            file.bench = bench
                .clone()
                .try_into()
                .context("Invalid [bench] table")?;
        }

        if let Some(effects) = table.get("effects") {
            let Some(effects) = effects.as_table() else {
                bail!("[effects] must be a table of effect tables");
            };
            for (name, value) in effects {
                let Some(preset) = value.as_table() else {
                    bail!("[effects.{}] must be a table", name);
                };
                let preset = PresetConfig::from_toml(preset)
                    .with_context(|| format!("Invalid [effects.{}] table", name))?;
                file.presets.insert(name.clone(), preset);
            }
        }

        log::debug!(
            "loaded config: {} effect(s), {} preset override(s)",
            file.bench.effects.len(),
            file.presets.len()
        );
        Ok(file)
    }

    /// Preset for `name`, inheriting the bench seed when it has none.
    pub fn preset_for(&self, name: &str) -> PresetConfig {
        let mut preset = self.presets.get(name).cloned().unwrap_or_default();
        if preset.seed.is_none() {
            preset.seed = self.bench.seed;
        }
        preset
    }
}
