//! Tunnel: a wobbling ring of particles streaming toward the viewer

use crate::config::PresetConfig;
use crate::effect::{new_system, Effect};
use ember_particles::{
    BasicColorGenerator, BasicColorUpdater, BasicTimeGenerator, BasicTimeUpdater,
    BasicVelocityGenerator, EulerUpdater, ParticleEmitter, ParticleSystem,
    RoundPositionGenerator,
};
use glam::Vec4;
use std::sync::Arc;

pub const DEFAULT_PARTICLES: usize = 10_000;
const EMIT_RATE_SCALE: f32 = 0.45;
const LIFETIME: (f32, f32) = (1.0, 3.5);
const RING_RADIUS: f32 = 0.15;

pub struct TunnelEffect {
    system: ParticleSystem,
    ring: Arc<RoundPositionGenerator>,
    color_updater: Arc<BasicColorUpdater>,
    center: Vec4,
    /// Seconds since start, drives the ring animation
    time: f32,
}

impl TunnelEffect {
    pub fn new(config: &PresetConfig) -> Self {
        let count = config.particle_count(DEFAULT_PARTICLES);
        let mut system = new_system(count, config.seed);

        let rate = config.emit_rate_scale.unwrap_or(EMIT_RATE_SCALE) * count as f32;
        let (life_min, life_max) = config.lifetime(LIFETIME);

        let ring = Arc::new(RoundPositionGenerator::new(
            Vec4::ZERO,
            RING_RADIUS,
            RING_RADIUS,
        ));
        let emitter = ParticleEmitter::new(rate)
            .with_generator(ring.clone())
            .with_generator(Arc::new(BasicColorGenerator::new(
                Vec4::new(0.7, 0.0, 0.7, 1.0),
                Vec4::new(1.0, 1.0, 1.0, 1.0),
                Vec4::new(0.5, 0.0, 0.6, 0.0),
                Vec4::new(0.7, 0.5, 1.0, 0.0),
            )))
            .with_generator(Arc::new(BasicVelocityGenerator::new(
                Vec4::new(0.0, 0.0, 0.15, 0.0),
                Vec4::new(0.0, 0.0, 0.45, 0.0),
            )))
            .with_generator(Arc::new(BasicTimeGenerator::new(life_min, life_max)));
        system.add_emitter(emitter);

        let color_updater = Arc::new(BasicColorUpdater::new());
        color_updater.tint.set_color(config.tint());
        color_updater.tint.set_mix(config.tint_mix);

        system.add_updater(Arc::new(BasicTimeUpdater));
        system.add_updater(color_updater.clone());
        system.add_updater(Arc::new(EulerUpdater::new(Vec4::ZERO)));

        log::debug!("tunnel: {count} particles, {rate:.0}/s");

        Self {
            system,
            ring,
            color_updater,
            center: Vec4::ZERO,
            time: 0.0,
        }
    }

    fn animate(&mut self, dt: f64) {
        self.time += dt as f32;
        let t = self.time;
        self.ring.set_center_and_radius(
            self.center + Vec4::new(0.1 * (t * 2.5).sin(), 0.1 * (t * 2.5).cos(), 0.0, 0.0),
            RING_RADIUS + 0.05 * t.sin(),
            RING_RADIUS + 0.05 * (t.sin() * (t * 0.5).cos()),
        );
    }
}

impl Effect for TunnelEffect {
    fn name(&self) -> &str {
        "tunnel"
    }

    fn reset(&mut self) {
        self.system.reset();
        self.time = 0.0;
    }

    fn update(&mut self, dt: f64) {
        self.animate(dt);
        self.system.update(dt);
    }

    fn set_tint_color(&mut self, color: Vec4) {
        self.color_updater.tint.set_color(color);
    }

    fn set_tint_mix(&mut self, mix: f32) {
        self.color_updater.tint.set_mix(mix);
    }

    fn set_center(&mut self, center: Vec4) {
        self.center = center;
    }

    fn system(&self) -> &ParticleSystem {
        &self.system
    }
}
