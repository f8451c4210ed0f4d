//! Rate-limited spawner driving an ordered list of generators

use crate::data::ParticleData;
use crate::generators::ParticleGenerator;
use crate::rand::ParticleRng;
use std::sync::Arc;

/// Spawns `floor(dt * emit_rate)` particles per call.
///
/// Generators are shared: the same generator may be registered on several
/// emitters, even across systems.
#[derive(Default)]
pub struct ParticleEmitter {
    emit_rate: f32,
    generators: Vec<Arc<dyn ParticleGenerator>>,
}

impl ParticleEmitter {
    pub fn new(emit_rate: f32) -> Self {
        Self {
            emit_rate,
            generators: Vec::new(),
        }
    }

    /// Particles per second
    pub fn emit_rate(&self) -> f32 {
        self.emit_rate
    }

    pub fn set_emit_rate(&mut self, emit_rate: f32) {
        self.emit_rate = emit_rate;
    }

    pub fn add_generator(&mut self, generator: Arc<dyn ParticleGenerator>) {
        self.generators.push(generator);
    }

    /// Builder-style [`add_generator`](Self::add_generator)
    pub fn with_generator(mut self, generator: Arc<dyn ParticleGenerator>) -> Self {
        self.add_generator(generator);
        self
    }

    pub fn generator_count(&self) -> usize {
        self.generators.len()
    }

    /// Fills the next dead slots and wakes them. Returns the number spawned.
    ///
    /// The spawn range is capped at `count - 1`, so one slot always stays
    /// dead and a saturated store spawns nothing.
    pub fn emit(&self, dt: f64, data: &mut ParticleData, rng: &mut ParticleRng) -> usize {
        let requested = (dt * f64::from(self.emit_rate)).max(0.0) as usize;
        let start_id = data.alive_count();
        let end_id = start_id
            .saturating_add(requested)
            .min(data.count().saturating_sub(1));

        if end_id <= start_id {
            return 0;
        }

        for generator in &self.generators {
            generator.generate(dt, data, rng, start_id, end_id);
        }

        for i in start_id..end_id {
            data.wake(i);
        }

        log::trace!("emitted {} particle(s) at [{start_id}, {end_id})", end_id - start_id);
        end_id - start_id
    }
}
