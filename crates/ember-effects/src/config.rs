//! Preset configuration (parsed from TOML)

use ember_core::{EmberError, Result};
use glam::Vec4;

/// Knobs shared by every effect preset.
///
/// `None` / zero fields fall back to the preset's own defaults; a preset
/// ignores overrides it has no use for (the tunnel has no floor).
#[derive(Debug, Clone, PartialEq)]
pub struct PresetConfig {
    /// Particle capacity; 0 selects the preset default
    pub max_particles: usize,
    /// Particles emitted per second, as a fraction of capacity (per emitter)
    pub emit_rate_scale: Option<f32>,
    pub tint_color: [f32; 4],
    pub tint_mix: f32,
    pub gravity: Option<[f32; 3]>,
    pub floor_y: Option<f32>,
    pub bounce_factor: Option<f32>,
    pub lifetime_min: Option<f32>,
    pub lifetime_max: Option<f32>,
    /// Fixed RNG seed; entropy when absent
    pub seed: Option<u64>,
}

impl Default for PresetConfig {
    fn default() -> Self {
        Self {
            max_particles: 0,
            emit_rate_scale: None,
            tint_color: [1.0, 1.0, 1.0, 1.0],
            tint_mix: 0.0,
            gravity: None,
            floor_y: None,
            bounce_factor: None,
            lifetime_min: None,
            lifetime_max: None,
            seed: None,
        }
    }
}

impl PresetConfig {
    /// Config with only the capacity set
    pub fn with_max_particles(max_particles: usize) -> Self {
        Self {
            max_particles,
            ..Self::default()
        }
    }

    /// Parse a PresetConfig from a TOML table
    pub fn from_toml(table: &toml::value::Table) -> Result<Self> {
        let mut config = Self::default();

        if let Some(v) = table.get("max_particles") {
            let n = v.as_integer().ok_or_else(|| {
                EmberError::InvalidConfig(format!("max_particles must be an integer, got {v}"))
            })?;
            if n < 0 {
                return Err(out_of_range("max_particles", 0.0, f64::MAX, n as f64));
            }
            config.max_particles = n as usize;
        }
        if let Some(v) = table.get("emit_rate_scale") {
            let scale = toml_f32(v, 0.0);
            if scale < 0.0 {
                return Err(out_of_range("emit_rate_scale", 0.0, f64::MAX, scale as f64));
            }
            config.emit_rate_scale = Some(scale);
        }
        if let Some(v) = table.get("tint_color") {
            config.tint_color = toml_vec4(v, config.tint_color);
        }
        if let Some(v) = table.get("tint_mix") {
            let mix = toml_f32(v, 0.0);
            if !(0.0..=1.0).contains(&mix) {
                return Err(out_of_range("tint_mix", 0.0, 1.0, mix as f64));
            }
            config.tint_mix = mix;
        }
        if let Some(v) = table.get("gravity") {
            config.gravity = Some(toml_vec3(v, [0.0, 0.0, 0.0]));
        }
        if let Some(v) = table.get("floor_y") {
            config.floor_y = Some(toml_f32(v, 0.0));
        }
        if let Some(v) = table.get("bounce_factor") {
            config.bounce_factor = Some(toml_f32(v, 0.0));
        }
        if let Some(v) = table.get("lifetime_min") {
            config.lifetime_min = Some(toml_f32(v, 1.0));
        }
        if let Some(v) = table.get("lifetime_max") {
            config.lifetime_max = Some(toml_f32(v, 1.0));
        }
        if let Some(v) = table.get("seed") {
            let seed = v.as_integer().ok_or_else(|| {
                EmberError::InvalidConfig(format!("seed must be an integer, got {v}"))
            })?;
            let seed = u64::try_from(seed).map_err(|_| {
                EmberError::InvalidConfig(format!("seed must not be negative, got {seed}"))
            })?;
            config.seed = Some(seed);
        }

        if let (Some(min), Some(max)) = (config.lifetime_min, config.lifetime_max) {
            if min > max {
                log::warn!("lifetime_min {min} > lifetime_max {max}; swapping");
                config.lifetime_min = Some(max);
                config.lifetime_max = Some(min);
            }
        }
        if config.lifetime_min.is_some_and(|l| l <= 0.0) {
            return Err(EmberError::InvalidConfig(
                "lifetime_min must be positive".to_string(),
            ));
        }

        Ok(config)
    }

    /// Capacity to allocate, substituting `default` for the zero sentinel
    pub fn particle_count(&self, default: usize) -> usize {
        if self.max_particles == 0 {
            default
        } else {
            self.max_particles
        }
    }

    /// Lifetime range, with the preset's range filling whichever end is unset
    pub fn lifetime(&self, default: (f32, f32)) -> (f32, f32) {
        let min = self.lifetime_min.unwrap_or(default.0);
        let max = self.lifetime_max.unwrap_or(default.1).max(min);
        (min, max)
    }

    pub fn tint(&self) -> Vec4 {
        Vec4::from_array(self.tint_color)
    }
}

fn out_of_range(field: &str, min: f64, max: f64, value: f64) -> EmberError {
    EmberError::ValueOutOfRange {
        field: field.to_string(),
        min,
        max,
        value,
    }
}

// ── TOML helpers (handle integer/float coercion) ──

fn toml_f32(v: &toml::Value, default: f32) -> f32 {
    v.as_float()
        .map(|f| f as f32)
        .or_else(|| v.as_integer().map(|i| i as f32))
        .unwrap_or(default)
}

fn toml_vec3(v: &toml::Value, default: [f32; 3]) -> [f32; 3] {
    if let Some(arr) = v.as_array() {
        if arr.len() >= 3 {
            return [
                toml_f32(&arr[0], default[0]),
                toml_f32(&arr[1], default[1]),
                toml_f32(&arr[2], default[2]),
            ];
        }
    }
    default
}

fn toml_vec4(v: &toml::Value, default: [f32; 4]) -> [f32; 4] {
    if let Some(arr) = v.as_array() {
        if arr.len() >= 4 {
            return [
                toml_f32(&arr[0], default[0]),
                toml_f32(&arr[1], default[1]),
                toml_f32(&arr[2], default[2]),
                toml_f32(&arr[3], default[3]),
            ];
        }
    }
    default
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(src: &str) -> Result<PresetConfig> {
        let table: toml::value::Table = toml::from_str(src).unwrap();
        PresetConfig::from_toml(&table)
    }

    #[test]
    fn default_config_uses_preset_defaults() {
        let config = PresetConfig::default();
        assert_eq!(config.particle_count(10_000), 10_000);
        assert_eq!(config.lifetime((1.0, 3.5)), (1.0, 3.5));
        assert_eq!(config.tint(), Vec4::ONE);
    }

    #[test]
    fn parse_from_toml() {
        let config = parse(
            r#"
max_particles = 5000
emit_rate_scale = 0.3
tint_color = [1.0, 0.5, 0.0, 1.0]
tint_mix = 0.25
gravity = [0, -9.81, 0]
floor_y = -1
seed = 42
"#,
        )
        .unwrap();
        assert_eq!(config.particle_count(10_000), 5000);
        assert_eq!(config.emit_rate_scale, Some(0.3));
        assert!((config.tint_color[1] - 0.5).abs() < 1e-6);
        assert!((config.tint_mix - 0.25).abs() < 1e-6);
        assert!((config.gravity.unwrap()[1] + 9.81).abs() < 1e-4);
        assert_eq!(config.floor_y, Some(-1.0));
        assert_eq!(config.seed, Some(42));
    }

    #[test]
    fn zero_capacity_means_default() {
        let config = parse("max_particles = 0").unwrap();
        assert_eq!(config.particle_count(250_000), 250_000);
    }

    #[test]
    fn rejects_out_of_range_values() {
        assert!(matches!(
            parse("tint_mix = 1.5"),
            Err(EmberError::ValueOutOfRange { .. })
        ));
        assert!(matches!(
            parse("max_particles = -3"),
            Err(EmberError::ValueOutOfRange { .. })
        ));
        assert!(matches!(
            parse("max_particles = 1.5"),
            Err(EmberError::InvalidConfig(_))
        ));
        assert!(parse("lifetime_min = 0").is_err());
    }

    #[test]
    fn seed_must_be_a_non_negative_integer() {
        assert_eq!(parse("seed = 0").unwrap().seed, Some(0));
        assert!(matches!(parse("seed = -1"), Err(EmberError::InvalidConfig(_))));
        assert!(matches!(parse("seed = 4.5"), Err(EmberError::InvalidConfig(_))));
        assert!(matches!(parse("seed = \"abc\""), Err(EmberError::InvalidConfig(_))));
    }

    #[test]
    fn reversed_lifetimes_are_swapped() {
        let config = parse("lifetime_min = 4.0\nlifetime_max = 2.0").unwrap();
        assert_eq!(config.lifetime((1.0, 1.0)), (2.0, 4.0));
    }

    #[test]
    fn partial_lifetime_override() {
        let config = parse("lifetime_max = 10").unwrap();
        assert_eq!(config.lifetime((1.0, 3.5)), (1.0, 10.0));
    }
}
