//! Ember Effects - Preset particle effects
//!
//! Each preset is a fixed parameterization of the generic engine:
//! - `TunnelEffect`: ring emitter streaming along +Z
//! - `FountainEffect`: gravity spray bouncing on a floor
//! - `AttractorEffect`: three orbiting emitters pulled by four attractors
//!
//! Presets are built by name through [`create_effect`] and tuned with a
//! [`PresetConfig`], typically loaded from TOML.

pub mod attractor;
pub mod config;
pub mod effect;
pub mod factory;
pub mod fountain;
pub mod tunnel;

pub use attractor::AttractorEffect;
pub use config::PresetConfig;
pub use effect::Effect;
pub use factory::{create_effect, resolve_effect_name, unknown_effect, EFFECT_NAMES};
pub use fountain::FountainEffect;
pub use tunnel::TunnelEffect;
