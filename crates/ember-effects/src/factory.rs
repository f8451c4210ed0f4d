//! Effect lookup by name

use crate::attractor::AttractorEffect;
use crate::config::PresetConfig;
use crate::effect::Effect;
use crate::fountain::FountainEffect;
use crate::tunnel::TunnelEffect;
use ember_core::{EmberError, Result};

/// Canonical preset names, in benchmark column order
pub const EFFECT_NAMES: [&str; 3] = ["tunnel", "attractors", "fountain"];

/// Canonical name for `name`, or `None` if no preset answers to it.
///
/// `attractor` is accepted as an alias for `attractors`.
pub fn resolve_effect_name(name: &str) -> Option<&'static str> {
    match name {
        "tunnel" => Some("tunnel"),
        "fountain" => Some("fountain"),
        "attractors" | "attractor" => Some("attractors"),
        _ => None,
    }
}

/// Build a preset by name.
pub fn create_effect(name: &str, config: &PresetConfig) -> Result<Box<dyn Effect>> {
    let effect: Box<dyn Effect> = match resolve_effect_name(name) {
        Some("tunnel") => Box::new(TunnelEffect::new(config)),
        Some("fountain") => Box::new(FountainEffect::new(config)),
        Some("attractors") => Box::new(AttractorEffect::new(config)),
        _ => return Err(unknown_effect(name)),
    };
    Ok(effect)
}

/// The error returned for a name no preset answers to
pub fn unknown_effect(name: &str) -> EmberError {
    EmberError::UnknownEffect {
        name: name.to_string(),
        available: EFFECT_NAMES.iter().map(|n| n.to_string()).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creates_every_named_effect() {
        let config = PresetConfig::with_max_particles(64);
        for name in EFFECT_NAMES {
            let effect = create_effect(name, &config).unwrap();
            assert_eq!(effect.name(), name);
            assert_eq!(effect.num_all_particles(), 64);
        }
    }

    #[test]
    fn alias_resolves() {
        let effect = create_effect("attractor", &PresetConfig::with_max_particles(8)).unwrap();
        assert_eq!(effect.name(), "attractors");
    }

    #[test]
    fn resolves_canonical_names_and_alias() {
        for name in EFFECT_NAMES {
            assert_eq!(resolve_effect_name(name), Some(name));
        }
        assert_eq!(resolve_effect_name("attractor"), Some("attractors"));
        assert_eq!(resolve_effect_name("Tunnel"), None);
    }

    #[test]
    fn unknown_name_is_an_error() {
        let err = create_effect("smoke", &PresetConfig::default()).err().unwrap();
        assert!(matches!(err, EmberError::UnknownEffect { .. }));
    }

    #[test]
    fn boxed_effects_run() {
        // large enough that every emitter spawns at least once per frame
        let config = PresetConfig {
            max_particles: 6000,
            seed: Some(1),
            ..PresetConfig::default()
        };
        for name in EFFECT_NAMES {
            let mut effect = create_effect(name, &config).unwrap();
            for _ in 0..10 {
                effect.update(1.0 / 60.0);
            }
            assert!(effect.num_alive_particles() > 0, "{name} spawned nothing");
            assert!(effect.num_alive_particles() < effect.num_all_particles());
            effect.reset();
            assert_eq!(effect.num_alive_particles(), 0);
        }
    }
}
