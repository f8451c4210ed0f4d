//! Effect trait

use ember_particles::ParticleSystem;
use glam::Vec4;

/// A preset: a configured particle system plus whatever per-frame animation
/// its emission sources need.
///
/// Every effect owns its own clock, so two instances never share state.
pub trait Effect: Send {
    /// Stable preset name, as accepted by [`create_effect`](crate::create_effect)
    fn name(&self) -> &str;

    /// Drop all alive particles and restart the effect clock
    fn reset(&mut self);

    /// Animate the emission sources, then advance the system by `dt` seconds
    fn update(&mut self, dt: f64);

    fn set_tint_color(&mut self, color: Vec4);

    fn set_tint_mix(&mut self, mix: f32);

    /// Moves the whole effect; the preset's animation is relative to this point.
    /// Takes effect from the next emission.
    fn set_center(&mut self, center: Vec4);

    /// Read-only access for renderers and diagnostics
    fn system(&self) -> &ParticleSystem;

    fn num_all_particles(&self) -> usize {
        self.system().num_all_particles()
    }

    fn num_alive_particles(&self) -> usize {
        self.system().num_alive_particles()
    }
}

/// Builds the system for a preset, honoring a configured seed.
pub(crate) fn new_system(count: usize, seed: Option<u64>) -> ParticleSystem {
    match seed {
        Some(seed) => ParticleSystem::with_seed(count, seed),
        None => ParticleSystem::new(count),
    }
}
