//! The particle system: one store, its emitters and its updater pipeline

use crate::data::ParticleData;
use crate::emitter::ParticleEmitter;
use crate::rand::ParticleRng;
use crate::updaters::ParticleUpdater;
use std::sync::Arc;

/// Owns a fixed-capacity [`ParticleData`] and advances it frame by frame.
///
/// Each [`update`](Self::update) runs every emitter in registration order,
/// clears all accelerations, then runs every updater in registration order.
/// The system does not reorder updaters; placing a force before or after the
/// integrator is the caller's decision.
pub struct ParticleSystem {
    particles: ParticleData,
    emitters: Vec<ParticleEmitter>,
    updaters: Vec<Arc<dyn ParticleUpdater>>,
    rng: ParticleRng,
}

impl ParticleSystem {
    /// Allocates storage for `max_count` particles, seeded from the OS.
    pub fn new(max_count: usize) -> Self {
        Self::with_rng(max_count, ParticleRng::from_entropy())
    }

    /// Deterministic variant for tests and benchmarks
    pub fn with_seed(max_count: usize, seed: u64) -> Self {
        Self::with_rng(max_count, ParticleRng::new(seed))
    }

    fn with_rng(max_count: usize, rng: ParticleRng) -> Self {
        let particles = ParticleData::new(max_count);
        log::debug!(
            "particle system: capacity {max_count}, {} KiB",
            particles.memory_usage() / 1024
        );
        Self {
            particles,
            emitters: Vec::new(),
            updaters: Vec::new(),
            rng,
        }
    }

    pub fn add_emitter(&mut self, emitter: ParticleEmitter) {
        self.emitters.push(emitter);
    }

    pub fn add_updater(&mut self, updater: Arc<dyn ParticleUpdater>) {
        self.updaters.push(updater);
    }

    /// Advance the simulation by `dt` seconds.
    pub fn update(&mut self, dt: f64) {
        for emitter in &self.emitters {
            emitter.emit(dt, &mut self.particles, &mut self.rng);
        }

        self.particles.zero_accelerations();

        for updater in &self.updaters {
            updater.update(dt, &mut self.particles);
        }
    }

    /// Kill every particle; capacity and pipeline stay as they are.
    pub fn reset(&mut self) {
        self.particles.reset();
    }

    pub fn num_all_particles(&self) -> usize {
        self.particles.count()
    }

    pub fn num_alive_particles(&self) -> usize {
        self.particles.alive_count()
    }

    /// Read-only view for renderers. Only valid between updates.
    pub fn final_data(&self) -> &ParticleData {
        &self.particles
    }

    pub fn emitter_count(&self) -> usize {
        self.emitters.len()
    }

    pub fn updater_count(&self) -> usize {
        self.updaters.len()
    }

    /// Bytes for the store plus a same-sized render copy.
    pub fn memory_usage(&self) -> usize {
        2 * self.particles.memory_usage()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::{
        BasicColorGenerator, BasicTimeGenerator, BasicVelocityGenerator, BoxPositionGenerator,
    };
    use crate::updaters::{
        AttractorUpdater, BasicColorUpdater, BasicTimeUpdater, EulerUpdater, FloorUpdater,
    };
    use glam::{Vec3, Vec4};

    fn emitter(rate: f32, life: f32) -> ParticleEmitter {
        ParticleEmitter::new(rate)
            .with_generator(Arc::new(BoxPositionGenerator::new(Vec4::ZERO, Vec4::ZERO)))
            .with_generator(Arc::new(BasicColorGenerator::new(
                Vec4::ONE,
                Vec4::ONE,
                Vec4::ZERO,
                Vec4::ZERO,
            )))
            .with_generator(Arc::new(BasicVelocityGenerator::new(Vec4::ZERO, Vec4::ZERO)))
            .with_generator(Arc::new(BasicTimeGenerator::new(life, life)))
    }

    #[test]
    fn update_spawns_then_integrates() {
        let mut system = ParticleSystem::with_seed(100, 7);
        system.add_emitter(emitter(10.0, 5.0));
        system.add_updater(Arc::new(EulerUpdater::new(Vec4::new(0.0, -10.0, 0.0, 0.0))));

        system.update(1.0);

        assert_eq!(system.num_alive_particles(), 10);
        let data = system.final_data();
        for i in 0..data.alive_count() {
            assert_eq!(data.velocity(i).y, -10.0);
            assert_eq!(data.position(i).y, -10.0);
        }
    }

    #[test]
    fn accelerations_reset_every_frame() {
        let mut system = ParticleSystem::with_seed(10, 7);
        system.add_emitter(emitter(1.0, 5.0));
        system.add_updater(Arc::new(EulerUpdater::new(Vec4::new(0.0, -1.0, 0.0, 0.0))));
        system.update(1.0);
        system.update(1.0);
        // gravity does not accumulate across frames
        assert_eq!(system.final_data().acceleration(0).y, -1.0);
    }

    #[test]
    fn time_updater_culls_expired_particles() {
        let mut system = ParticleSystem::with_seed(50, 7);
        system.add_emitter(emitter(10.0, 0.5));
        system.add_updater(Arc::new(BasicTimeUpdater));
        system.update(1.0);
        // every visited particle expires, but each kill moves an unvisited
        // particle into the freed slot where it waits a frame
        assert_eq!(system.num_alive_particles(), 5);
        assert!(system.final_data().alive_times().iter().all(|t| t.x == 0.5));
    }

    #[test]
    fn color_follows_age() {
        let mut system = ParticleSystem::with_seed(50, 7);
        system.add_emitter(emitter(4.0, 2.0));
        system.add_updater(Arc::new(BasicTimeUpdater));
        system.add_updater(Arc::new(BasicColorUpdater::new()));
        system.update(1.0);
        let data = system.final_data();
        // half-way through life: white fading to black
        for c in data.alive_colors() {
            assert!((c.x - 0.5).abs() < 1e-6);
        }
    }

    #[test]
    fn updater_order_changes_outcome() {
        let run = |attract_first: bool| {
            let mut system = ParticleSystem::with_seed(10, 1);
            system.add_emitter(
                ParticleEmitter::new(1.0)
                    .with_generator(Arc::new(BoxPositionGenerator::new(Vec4::X, Vec4::ZERO)))
                    .with_generator(Arc::new(BasicTimeGenerator::new(5.0, 5.0))),
            );
            let attractor = Arc::new(AttractorUpdater::new().with_attractor(Vec3::ZERO, 1.0));
            let euler = Arc::new(EulerUpdater::new(Vec4::ZERO));
            if attract_first {
                system.add_updater(attractor);
                system.add_updater(euler);
            } else {
                system.add_updater(euler);
                system.add_updater(attractor);
            }
            system.update(1.0);
            system.final_data().position(0).x
        };
        assert!(run(true) < 1.0);
        assert_eq!(run(false), 1.0);
    }

    #[test]
    fn floor_after_euler_bounces_next_frame() {
        let mut system = ParticleSystem::with_seed(10, 1);
        system.add_emitter(
            ParticleEmitter::new(1.0)
                .with_generator(Arc::new(BoxPositionGenerator::new(Vec4::ZERO, Vec4::ZERO)))
                .with_generator(Arc::new(BasicVelocityGenerator::new(
                    Vec4::new(0.0, -1.0, 0.0, 0.0),
                    Vec4::new(0.0, -1.0, 0.0, 0.0),
                )))
                .with_generator(Arc::new(BasicTimeGenerator::new(10.0, 10.0))),
        );
        system.add_updater(Arc::new(EulerUpdater::new(Vec4::ZERO)));
        system.add_updater(Arc::new(FloorUpdater::new(-0.5, 0.0)));
        system.update(1.0);
        let data = system.final_data();
        assert_eq!(data.position(0).y, -1.0);
        assert_eq!(data.velocity(0).y, 0.0);
    }

    #[test]
    fn reset_then_emit_repopulates() {
        let mut system = ParticleSystem::with_seed(20, 3);
        system.add_emitter(emitter(5.0, 5.0));
        system.update(1.0);
        system.update(1.0);
        assert_eq!(system.num_alive_particles(), 10);

        system.reset();
        assert_eq!(system.num_alive_particles(), 0);
        assert_eq!(system.num_all_particles(), 20);

        system.update(1.0);
        assert_eq!(system.num_alive_particles(), 5);
        assert!(system.final_data().alive_times().iter().all(|t| t.x == 5.0));
    }

    #[test]
    fn saturates_at_capacity() {
        let mut system = ParticleSystem::with_seed(10, 3);
        system.add_emitter(emitter(100.0, 50.0));
        for _ in 0..5 {
            system.update(1.0);
        }
        assert_eq!(system.num_alive_particles(), 9);
    }

    #[test]
    fn counts_and_memory() {
        let mut system = ParticleSystem::with_seed(32, 3);
        system.add_emitter(emitter(1.0, 1.0));
        system.add_updater(Arc::new(BasicTimeUpdater));
        assert_eq!(system.emitter_count(), 1);
        assert_eq!(system.updater_count(), 1);
        assert_eq!(
            system.memory_usage(),
            2 * system.final_data().memory_usage()
        );
    }

    #[test]
    fn systems_can_move_across_threads() {
        let mut system = ParticleSystem::with_seed(16, 3);
        system.add_emitter(emitter(4.0, 5.0));
        let handle = std::thread::spawn(move || {
            system.update(1.0);
            system.num_alive_particles()
        });
        assert_eq!(handle.join().unwrap(), 4);
    }
}
