//! Linear blends used by the color updaters

use glam::Vec4;

/// Linear interpolation between two floats
pub fn lerp_f32(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Linear interpolation between two RGBA colors
pub fn lerp_color(a: Vec4, b: Vec4, t: f32) -> Vec4 {
    a + (b - a) * t
}

/// Remaps `value` from `[min, min + span]` into `[0, 1]`.
///
/// Values under `min` are folded back with `abs` first, so a symmetric
/// range colors positive and negative motion alike.
pub fn scaled_channel(value: f32, min: f32, span: f32) -> f32 {
    let v = if value < min { value.abs() } else { value };
    if span == 0.0 {
        return 0.0;
    }
    ((v - min) / span).clamp(0.0, 1.0)
}
