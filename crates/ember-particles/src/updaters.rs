//! Updaters: per-frame mutators of every alive particle

use crate::curves::{lerp_color, lerp_f32, scaled_channel};
use crate::data::ParticleData;
use glam::{Vec3, Vec4};
use std::sync::{Mutex, PoisonError};

/// Mutates attributes of the alive range `[0, alive_count)`.
///
/// Updaters run in the order they were registered on the system, and that
/// order is part of an effect's behavior. An updater may kill particles
/// while iterating.
pub trait ParticleUpdater: Send + Sync {
    fn update(&self, dt: f64, data: &mut ParticleData);
}

/// Semi-implicit Euler integration with a constant global acceleration.
///
/// Runs three full sweeps: acceleration, then velocity, then position.
pub struct EulerUpdater {
    global_acceleration: Vec4,
}

impl EulerUpdater {
    pub fn new(global_acceleration: Vec4) -> Self {
        Self {
            global_acceleration,
        }
    }
}

impl ParticleUpdater for EulerUpdater {
    fn update(&self, dt: f64, data: &mut ParticleData) {
        let n = data.alive_count();
        let dt = dt as f32;
        let global = (self.global_acceleration * dt).truncate().extend(0.0);

        for a in &mut data.acceleration[..n] {
            *a += global;
        }

        for (v, a) in data.velocity[..n].iter_mut().zip(&data.acceleration[..n]) {
            *v += *a * dt;
        }

        for (p, v) in data.position[..n].iter_mut().zip(&data.velocity[..n]) {
            *p += *v * dt;
        }
    }
}

/// Bounce off a horizontal plane.
///
/// Not a collision model: every frame a particle spends below `floor_y` it
/// loses any downward acceleration and has its vertical velocity reflected,
/// scaled by `1 + bounce_factor`.
pub struct FloorUpdater {
    floor_y: f32,
    bounce_factor: f32,
}

impl FloorUpdater {
    pub fn new(floor_y: f32, bounce_factor: f32) -> Self {
        Self {
            floor_y,
            bounce_factor,
        }
    }
}

impl ParticleUpdater for FloorUpdater {
    fn update(&self, _dt: f64, data: &mut ParticleData) {
        let n = data.alive_count();

        for i in 0..n {
            if data.position[i].y >= self.floor_y {
                continue;
            }

            let mut force = data.acceleration[i];
            let normal_factor = force.dot(Vec4::Y);
            if normal_factor < 0.0 {
                force -= Vec4::Y * normal_factor;
            }

            let vel_factor = data.velocity[i].dot(Vec4::Y);
            data.velocity[i] -= Vec4::Y * ((1.0 + self.bounce_factor) * vel_factor);
            data.acceleration[i] = force;
        }
    }
}

/// Inverse-square pull toward a set of points.
///
/// There is no guard for a particle sitting exactly on an attractor: the
/// force becomes non-finite and propagates through integration.
#[derive(Default)]
pub struct AttractorUpdater {
    /// xyz position, w strength
    attractors: Vec<Vec4>,
}

impl AttractorUpdater {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_attractor(&mut self, position: Vec3, strength: f32) {
        self.attractors.push(position.extend(strength));
    }

    pub fn with_attractor(mut self, position: Vec3, strength: f32) -> Self {
        self.add_attractor(position, strength);
        self
    }

    pub fn attractor_count(&self) -> usize {
        self.attractors.len()
    }
}

impl ParticleUpdater for AttractorUpdater {
    fn update(&self, _dt: f64, data: &mut ParticleData) {
        let n = data.alive_count();

        for (p, a) in data.position[..n].iter().zip(&mut data.acceleration[..n]) {
            for attractor in &self.attractors {
                let offset = (attractor.truncate() - p.truncate()).extend(0.0);
                let dist_sq = offset.dot(offset);
                *a += offset * (attractor.w / dist_sq);
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Tint {
    color: Vec4,
    mix: f32,
}

impl Default for Tint {
    fn default() -> Self {
        Self {
            color: Vec4::ONE,
            mix: 0.0,
        }
    }
}

/// Optional overlay blended on top of a computed particle color
#[derive(Default)]
pub struct ColorTint {
    tint: Mutex<Tint>,
}

impl ColorTint {
    pub fn set_color(&self, color: Vec4) {
        self.tint.lock().unwrap_or_else(PoisonError::into_inner).color = color;
    }

    /// 0 leaves colors alone, 1 replaces them with the tint
    pub fn set_mix(&self, mix: f32) {
        self.tint.lock().unwrap_or_else(PoisonError::into_inner).mix = mix.clamp(0.0, 1.0);
    }

    pub fn color(&self) -> Vec4 {
        self.snapshot().color
    }

    pub fn mix(&self) -> f32 {
        self.snapshot().mix
    }

    fn snapshot(&self) -> Tint {
        *self.tint.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Tint {
    fn apply(&self, color: Vec4) -> Vec4 {
        if self.mix > 0.0 {
            lerp_color(color, self.color, self.mix)
        } else {
            color
        }
    }
}

/// Blends start color into end color over the particle's life
#[derive(Default)]
pub struct BasicColorUpdater {
    pub tint: ColorTint,
}

impl BasicColorUpdater {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ParticleUpdater for BasicColorUpdater {
    fn update(&self, _dt: f64, data: &mut ParticleData) {
        let n = data.alive_count();
        let tint = self.tint.snapshot();

        for i in 0..n {
            let age = data.time[i].z;
            let color = lerp_color(data.start_color[i], data.end_color[i], age);
            data.color[i] = tint.apply(color);
        }
    }
}

/// RGB from a per-channel remap of some vector attribute, alpha from lifetime
fn remap_color(
    source: Vec4,
    min: Vec4,
    span: Vec4,
    start: Vec4,
    end: Vec4,
    age: f32,
    tint: &Tint,
) -> Vec4 {
    let color = Vec4::new(
        scaled_channel(source.x, min.x, span.x),
        scaled_channel(source.y, min.y, span.y),
        scaled_channel(source.z, min.z, span.z),
        lerp_f32(start.w, end.w, age),
    );
    tint.apply(color)
}

/// Colors particles by where they are
pub struct PositionColorUpdater {
    min: Vec4,
    max: Vec4,
    pub tint: ColorTint,
}

impl PositionColorUpdater {
    pub fn new(min: Vec4, max: Vec4) -> Self {
        Self {
            min,
            max,
            tint: ColorTint::default(),
        }
    }
}

impl ParticleUpdater for PositionColorUpdater {
    fn update(&self, _dt: f64, data: &mut ParticleData) {
        let n = data.alive_count();
        let span = self.max - self.min;
        let tint = self.tint.snapshot();

        for i in 0..n {
            data.color[i] = remap_color(
                data.position[i],
                self.min,
                span,
                data.start_color[i],
                data.end_color[i],
                data.time[i].z,
                &tint,
            );
        }
    }
}

/// Colors particles by how they move
pub struct VelocityColorUpdater {
    min: Vec4,
    max: Vec4,
    pub tint: ColorTint,
}

impl VelocityColorUpdater {
    pub fn new(min: Vec4, max: Vec4) -> Self {
        Self {
            min,
            max,
            tint: ColorTint::default(),
        }
    }
}

impl ParticleUpdater for VelocityColorUpdater {
    fn update(&self, _dt: f64, data: &mut ParticleData) {
        let n = data.alive_count();
        let span = self.max - self.min;
        let tint = self.tint.snapshot();

        for i in 0..n {
            data.color[i] = remap_color(
                data.velocity[i],
                self.min,
                span,
                data.start_color[i],
                data.end_color[i],
                data.time[i].z,
                &tint,
            );
        }
    }
}

/// Ages particles and kills the expired ones.
///
/// Normalized age is taken from the remaining life after this frame's
/// decrement, so a particle reaches age 1 on the frame it dies.
///
/// After a kill the index still advances, so the particle swapped into the
/// freed slot is not aged until the next frame.
#[derive(Default)]
pub struct BasicTimeUpdater;

impl BasicTimeUpdater {
    pub fn new() -> Self {
        Self
    }
}

impl ParticleUpdater for BasicTimeUpdater {
    fn update(&self, dt: f64, data: &mut ParticleData) {
        let mut end_id = data.alive_count();
        if end_id == 0 {
            return;
        }

        let dt = dt as f32;
        let mut i = 0;
        while i < end_id {
            let t = data.time[i];
            let remaining = t.x - dt;
            let age = 1.0 - remaining * t.w;
            data.time[i] = Vec4::new(remaining, t.y, age, t.w);

            if remaining < 0.0 {
                data.kill(i);
                end_id = data.alive_count();
            }
            i += 1;
        }
    }
}
