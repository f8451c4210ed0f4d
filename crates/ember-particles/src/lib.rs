//! Ember Particles - CPU particle engine
//!
//! Structure-of-arrays particle simulation with:
//! - `ParticleData` storage with an alive prefix and O(1) swap-remove kill
//! - Generators that initialize freshly spawned particles
//! - Rate-limited emitters driving a list of shared generators
//! - Updaters for integration, floor bounce, attraction, coloring and aging
//! - `ParticleSystem`, which sequences emitters and updaters each frame

pub mod curves;
pub mod data;
pub mod emitter;
pub mod generators;
pub mod rand;
pub mod system;
pub mod updaters;

pub use data::ParticleData;
pub use emitter::ParticleEmitter;
pub use generators::{
    BasicColorGenerator, BasicTimeGenerator, BasicVelocityGenerator, BoxPositionGenerator,
    ParticleGenerator, RoundPositionGenerator, SphereVelocityGenerator,
    VelocityFromPositionGenerator,
};
pub use rand::ParticleRng;
pub use system::ParticleSystem;
pub use updaters::{
    AttractorUpdater, BasicColorUpdater, BasicTimeUpdater, ColorTint, EulerUpdater,
    FloorUpdater, ParticleUpdater, PositionColorUpdater, VelocityColorUpdater,
};
