//! Generators: initialize attributes of freshly spawned particles

use crate::data::ParticleData;
use crate::rand::ParticleRng;
use glam::Vec4;
use std::f64::consts::{PI, TAU};
use std::sync::{Mutex, PoisonError};

/// Ring angles run slightly past a full turn so the seam at 0/2π gets covered.
pub const RING_ANGLE_OVERSHOOT: f64 = 1.005;

/// Writes a subset of attributes for the particles in `[start_id, end_id)`.
///
/// Generators never change the alive count; the emitter wakes the range
/// after every generator has run. A generator must not rely on another
/// generator's output, with one exception: [`VelocityFromPositionGenerator`]
/// reads the position written by an earlier position generator.
pub trait ParticleGenerator: Send + Sync {
    fn generate(
        &self,
        dt: f64,
        data: &mut ParticleData,
        rng: &mut ParticleRng,
        start_id: usize,
        end_id: usize,
    );
}

/// Uniform points inside an axis-aligned box
pub struct BoxPositionGenerator {
    center: Mutex<Vec4>,
    half_extents: Vec4,
}

impl BoxPositionGenerator {
    pub fn new(center: Vec4, half_extents: Vec4) -> Self {
        Self {
            center: Mutex::new(center),
            half_extents,
        }
    }

    /// Moves the box; takes effect on the next emission.
    pub fn set_center(&self, center: Vec4) {
        *self.center.lock().unwrap_or_else(PoisonError::into_inner) = center;
    }

    pub fn center(&self) -> Vec4 {
        *self.center.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ParticleGenerator for BoxPositionGenerator {
    fn generate(
        &self,
        _dt: f64,
        data: &mut ParticleData,
        rng: &mut ParticleRng,
        start_id: usize,
        end_id: usize,
    ) {
        let center = self.center();
        let min = (center - self.half_extents).truncate().extend(1.0);
        let max = (center + self.half_extents).truncate().extend(1.0);

        for i in start_id..end_id {
            data.set_position(i, rng.range_vec4(min, max));
        }
    }
}

#[derive(Clone, Copy)]
struct Ring {
    center: Vec4,
    radius_x: f32,
    radius_y: f32,
}

/// Points on an ellipse in the XY plane
pub struct RoundPositionGenerator {
    ring: Mutex<Ring>,
}

impl RoundPositionGenerator {
    pub fn new(center: Vec4, radius_x: f32, radius_y: f32) -> Self {
        Self {
            ring: Mutex::new(Ring {
                center,
                radius_x,
                radius_y,
            }),
        }
    }

    pub fn set_center_and_radius(&self, center: Vec4, radius_x: f32, radius_y: f32) {
        *self.ring.lock().unwrap_or_else(PoisonError::into_inner) = Ring {
            center,
            radius_x,
            radius_y,
        };
    }

    /// Current `(center, radius_x, radius_y)`
    pub fn shape(&self) -> (Vec4, f32, f32) {
        let ring = *self.ring.lock().unwrap_or_else(PoisonError::into_inner);
        (ring.center, ring.radius_x, ring.radius_y)
    }
}

impl ParticleGenerator for RoundPositionGenerator {
    fn generate(
        &self,
        _dt: f64,
        data: &mut ParticleData,
        rng: &mut ParticleRng,
        start_id: usize,
        end_id: usize,
    ) {
        let ring = *self.ring.lock().unwrap_or_else(PoisonError::into_inner);

        for i in start_id..end_id {
            let angle = rng.range_f64(0.0, TAU * RING_ANGLE_OVERSHOOT);
            let offset = Vec4::new(
                ring.radius_x * angle.sin() as f32,
                ring.radius_y * angle.cos() as f32,
                0.0,
                0.0,
            );
            data.set_position(i, (ring.center + offset).truncate().extend(1.0));
        }
    }
}

/// Start and end colors drawn per channel
pub struct BasicColorGenerator {
    min_start: Vec4,
    max_start: Vec4,
    min_end: Vec4,
    max_end: Vec4,
}

impl BasicColorGenerator {
    pub fn new(min_start: Vec4, max_start: Vec4, min_end: Vec4, max_end: Vec4) -> Self {
        Self {
            min_start,
            max_start,
            min_end,
            max_end,
        }
    }
}

impl ParticleGenerator for BasicColorGenerator {
    fn generate(
        &self,
        _dt: f64,
        data: &mut ParticleData,
        rng: &mut ParticleRng,
        start_id: usize,
        end_id: usize,
    ) {
        for i in start_id..end_id {
            data.set_start_color(i, rng.range_vec4(self.min_start, self.max_start));
            data.set_end_color(i, rng.range_vec4(self.min_end, self.max_end));
        }
    }
}

/// Velocity drawn per channel
pub struct BasicVelocityGenerator {
    min: Vec4,
    max: Vec4,
}

impl BasicVelocityGenerator {
    pub fn new(min: Vec4, max: Vec4) -> Self {
        Self { min, max }
    }
}

impl ParticleGenerator for BasicVelocityGenerator {
    fn generate(
        &self,
        _dt: f64,
        data: &mut ParticleData,
        rng: &mut ParticleRng,
        start_id: usize,
        end_id: usize,
    ) {
        for i in start_id..end_id {
            data.set_velocity(i, rng.range_vec4(self.min, self.max));
        }
    }
}

/// Random direction with a random speed.
///
/// Both spherical angles are sampled uniformly in `[-π, π]`, which bunches
/// directions toward the poles. Good enough for a visual spray.
pub struct SphereVelocityGenerator {
    min_speed: f32,
    max_speed: f32,
}

impl SphereVelocityGenerator {
    pub fn new(min_speed: f32, max_speed: f32) -> Self {
        Self {
            min_speed,
            max_speed,
        }
    }
}

impl ParticleGenerator for SphereVelocityGenerator {
    fn generate(
        &self,
        _dt: f64,
        data: &mut ParticleData,
        rng: &mut ParticleRng,
        start_id: usize,
        end_id: usize,
    ) {
        for i in start_id..end_id {
            let phi = rng.range_f64(-PI, PI) as f32;
            let theta = rng.range_f64(-PI, PI) as f32;
            let speed = rng.range(self.min_speed, self.max_speed);
            let r = speed * phi.sin();
            let w = data.velocity(i).w;
            data.set_velocity(
                i,
                Vec4::new(r * theta.cos(), r * theta.sin(), speed * phi.cos(), w),
            );
        }
    }
}

/// Velocity pointing away from `offset`, scaled by a random factor.
///
/// Must be registered after the emitter's position generator.
pub struct VelocityFromPositionGenerator {
    offset: Vec4,
    min_scale: f32,
    max_scale: f32,
}

impl VelocityFromPositionGenerator {
    pub fn new(offset: Vec4, min_scale: f32, max_scale: f32) -> Self {
        Self {
            offset,
            min_scale,
            max_scale,
        }
    }
}

impl ParticleGenerator for VelocityFromPositionGenerator {
    fn generate(
        &self,
        _dt: f64,
        data: &mut ParticleData,
        rng: &mut ParticleRng,
        start_id: usize,
        end_id: usize,
    ) {
        for i in start_id..end_id {
            let scale = rng.range(self.min_scale, self.max_scale);
            let velocity = (data.position(i) - self.offset) * scale;
            data.set_velocity(i, velocity);
        }
    }
}

/// Lifetime drawn uniformly; resets the age.
pub struct BasicTimeGenerator {
    min_life: f32,
    max_life: f32,
}

impl BasicTimeGenerator {
    pub fn new(min_life: f32, max_life: f32) -> Self {
        Self { min_life, max_life }
    }
}

impl ParticleGenerator for BasicTimeGenerator {
    fn generate(
        &self,
        _dt: f64,
        data: &mut ParticleData,
        rng: &mut ParticleRng,
        start_id: usize,
        end_id: usize,
    ) {
        for i in start_id..end_id {
            let life = rng.range(self.min_life, self.max_life);
            data.set_time(i, Vec4::new(life, life, 0.0, 1.0 / life));
        }
    }
}
