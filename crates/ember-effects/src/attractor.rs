//! Attractors: three orbiting emitters feeding a swarm held by four attractors

use crate::config::PresetConfig;
use crate::effect::{new_system, Effect};
use ember_particles::{
    AttractorUpdater, BasicColorGenerator, BasicTimeGenerator, BasicTimeUpdater,
    BoxPositionGenerator, EulerUpdater, ParticleEmitter, ParticleGenerator, ParticleSystem,
    SphereVelocityGenerator, VelocityColorUpdater,
};
use glam::{Vec3, Vec4};
use std::sync::Arc;

pub const DEFAULT_PARTICLES: usize = 250_000;
const EMIT_RATE_SCALE: f32 = 0.1;
const LIFETIME: (f32, f32) = (1.6, 4.0);
const ORBIT_RADIUS: f32 = 0.55;
const Z_SCALE: f32 = 1.0;
/// Angular speed and z sign of each orbiting emitter
const ORBITS: [(f32, f32, f32); 3] = [(2.5, 1.0, -1.0), (2.0, -1.0, 1.0), (1.5, -1.0, 1.0)];
const ATTRACTORS: [[f32; 3]; 4] = [
    [0.0, 0.0, 0.75],
    [0.0, 0.0, -0.75],
    [0.0, 0.75, 0.0],
    [0.0, -0.75, 0.0],
];

pub struct AttractorEffect {
    system: ParticleSystem,
    sources: [Arc<BoxPositionGenerator>; 3],
    color_updater: Arc<VelocityColorUpdater>,
    center: Vec4,
    time: f32,
}

impl AttractorEffect {
    pub fn new(config: &PresetConfig) -> Self {
        let count = config.particle_count(DEFAULT_PARTICLES);
        let mut system = new_system(count, config.seed);

        let rate = config.emit_rate_scale.unwrap_or(EMIT_RATE_SCALE) * count as f32;
        let (life_min, life_max) = config.lifetime(LIFETIME);

        // shared by all three emitters
        let color: Arc<dyn ParticleGenerator> = Arc::new(BasicColorGenerator::new(
            Vec4::new(0.39, 0.39, 0.39, 1.0),
            Vec4::new(0.69, 0.69, 0.69, 1.0),
            Vec4::new(0.09, 0.09, 0.09, 0.0),
            Vec4::new(0.39, 0.39, 0.39, 0.25),
        ));
        let velocity: Arc<dyn ParticleGenerator> = Arc::new(SphereVelocityGenerator::new(0.1, 0.1));
        let time: Arc<dyn ParticleGenerator> = Arc::new(BasicTimeGenerator::new(life_min, life_max));

        let sources = [
            Vec4::new(0.0, 0.0, -0.25, 0.0),
            Vec4::new(0.0, 0.0, 0.25, 0.0),
            Vec4::new(0.0, 0.0, 0.25, 0.0),
        ]
        .map(|center| Arc::new(BoxPositionGenerator::new(center, Vec4::ZERO)));

        for source in &sources {
            let emitter = ParticleEmitter::new(rate)
                .with_generator(source.clone())
                .with_generator(Arc::clone(&color))
                .with_generator(Arc::clone(&velocity))
                .with_generator(Arc::clone(&time));
            system.add_emitter(emitter);
        }

        let color_updater = Arc::new(VelocityColorUpdater::new(
            Vec4::new(-0.5, -0.5, -0.5, 0.0),
            Vec4::new(2.0, 2.0, 2.0, 2.0),
        ));
        color_updater.tint.set_color(config.tint());
        color_updater.tint.set_mix(config.tint_mix);

        let attractors = ATTRACTORS
            .iter()
            .fold(AttractorUpdater::new(), |updater, &pos| {
                updater.with_attractor(Vec3::from_array(pos), 1.0)
            });

        system.add_updater(Arc::new(BasicTimeUpdater));
        system.add_updater(color_updater.clone());
        // before integration: this frame's pull is integrated immediately
        system.add_updater(Arc::new(attractors));
        system.add_updater(Arc::new(EulerUpdater::new(Vec4::ZERO)));

        log::debug!("attractors: {count} particles, 3 x {rate:.0}/s");

        Self {
            system,
            sources,
            color_updater,
            center: Vec4::ZERO,
            time: 0.0,
        }
    }

    fn animate(&mut self, dt: f64) {
        self.time += dt as f32;
        let t = self.time;
        for (source, &(speed, x_sign, z_sign)) in self.sources.iter().zip(ORBITS.iter()) {
            let angle = t * speed;
            source.set_center(self.center + Vec4::new(
                x_sign * ORBIT_RADIUS * angle.sin(),
                ORBIT_RADIUS * angle.cos(),
                z_sign * Z_SCALE * 0.25 * angle.cos(),
                0.0,
            ));
        }
    }
}

impl Effect for AttractorEffect {
    fn name(&self) -> &str {
        "attractors"
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
