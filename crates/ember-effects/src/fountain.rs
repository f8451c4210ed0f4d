//! Fountain: a spray under gravity that bounces off a floor

use crate::config::PresetConfig;
use crate::effect::{new_system, Effect};
use ember_particles::{
    BasicColorGenerator, BasicColorUpdater, BasicTimeGenerator, BasicTimeUpdater,
    BasicVelocityGenerator, BoxPositionGenerator, EulerUpdater, FloorUpdater, ParticleEmitter,
    ParticleSystem,
};
use glam::Vec4;
use std::sync::Arc;

pub const DEFAULT_PARTICLES: usize = 10_000;
const EMIT_RATE_SCALE: f32 = 0.25;
const LIFETIME: (f32, f32) = (30.0, 40.0);
const GRAVITY: [f32; 3] = [0.0, -2.0, 0.0];
const FLOOR_Y: f32 = -3.5;
const BOUNCE_FACTOR: f32 = 2.0;

pub struct FountainEffect {
    system: ParticleSystem,
    source: Arc<BoxPositionGenerator>,
    color_updater: Arc<BasicColorUpdater>,
}

impl FountainEffect {
    pub fn new(config: &PresetConfig) -> Self {
        let count = config.particle_count(DEFAULT_PARTICLES);
        let mut system = new_system(count, config.seed);

        let rate = config.emit_rate_scale.unwrap_or(EMIT_RATE_SCALE) * count as f32;
        let (life_min, life_max) = config.lifetime(LIFETIME);

        let source = Arc::new(BoxPositionGenerator::new(
            Vec4::ZERO,
            Vec4::new(0.1, 0.0, 0.0, 0.0),
        ));
        let emitter = ParticleEmitter::new(rate)
            .with_generator(source.clone())
            .with_generator(Arc::new(BasicColorGenerator::new(
                Vec4::new(0.5, 0.5, 0.5, 1.0),
                Vec4::new(1.0, 1.0, 1.0, 1.0),
                Vec4::new(0.5, 0.0, 0.6, 0.0),
                Vec4::new(0.7, 0.5, 1.0, 0.0),
            )))
            .with_generator(Arc::new(BasicVelocityGenerator::new(
                Vec4::new(-0.5, 0.052, -0.05, 0.0),
                Vec4::new(0.5, 0.25, 0.05, 0.0),
            )))
            .with_generator(Arc::new(BasicTimeGenerator::new(life_min, life_max)));
        system.add_emitter(emitter);

        let color_updater = Arc::new(BasicColorUpdater::new());
        color_updater.tint.set_color(config.tint());
        color_updater.tint.set_mix(config.tint_mix);

        let gravity = config.gravity.unwrap_or(GRAVITY);
        let floor_y = config.floor_y.unwrap_or(FLOOR_Y);
        let bounce = config.bounce_factor.unwrap_or(BOUNCE_FACTOR);

        system.add_updater(Arc::new(BasicTimeUpdater));
        system.add_updater(color_updater.clone());
        system.add_updater(Arc::new(EulerUpdater::new(
            glam::Vec3::from_array(gravity).extend(0.0),
        )));
        // after integration: corrects this frame's motion, felt next frame
        system.add_updater(Arc::new(FloorUpdater::new(floor_y, bounce)));

        log::debug!("fountain: {count} particles, {rate:.0}/s, floor at {floor_y}");

        Self {
            system,
            source,
            color_updater,
        }
    }
}

impl Effect for FountainEffect {
    fn name(&self) -> &str {
        "fountain"
    }

    fn reset(&mut self) {
        self.system.reset();
    }

    fn update(&mut self, dt: f64) {
        self.system.update(dt);
    }

    fn set_tint_color(&mut self, color: Vec4) {
        self.color_updater.tint.set_color(color);
    }

    fn set_tint_mix(&mut self, mix: f32) {
        self.color_updater.tint.set_mix(mix);
    }

    fn set_center(&mut self, center: Vec4) {
        self.source.set_center(center);
    }

    fn system(&self) -> &ParticleSystem {
        &self.system
    }
}
