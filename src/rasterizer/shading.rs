// src/rasterizer/shading.rs

//! Lighting and final intensity for accepted samples.

use crate::color::Color;
use crate::rasterizer::surface::SurfacePoint;
use crate::rasterizer::transform::Rotation;

// Empirical tuning: inverse depth of the far rim maps to ~0, the near rim to ~1.
const DEPTH_OFFSET: f32 = 0.125;
const DEPTH_SCALE: f32 = 2.5;

const DIRECT_WEIGHT: f32 = 0.7;
const AMBIENT_WEIGHT: f32 = 0.3;

/// Lowest intensity of a lit sample; keeps visible surface off pure black.
pub const INTENSITY_FLOOR: u8 = 15;
const INTENSITY_RANGE: f32 = 240.0;

/// Surface normal dotted with the fixed light direction, after rotation.
pub fn luminance(p: &SurfacePoint, rotation: &Rotation) -> f32 {
    let Rotation {
        cos_a,
        sin_a,
        cos_b,
        sin_b,
    } = *rotation;

    p.cos_phi * p.cos_theta * sin_b - cos_a * p.cos_theta * p.sin_phi - sin_a * p.sin_theta
        + cos_b * (cos_a * p.sin_theta - p.cos_theta * sin_a * p.sin_phi)
}

/// Maps inverse depth into `[0, 1]`.
pub fn depth_norm(ooz: f32) -> f32 {
    ((ooz - DEPTH_OFFSET) * DEPTH_SCALE).clamp(0.0, 1.0)
}

/// Combined brightness in `[0, 1]` of a sample facing the light.
pub fn brightness(ooz: f32, luminance: f32) -> f32 {
    depth_norm(ooz) * (DIRECT_WEIGHT * luminance + AMBIENT_WEIGHT).clamp(0.0, 1.0)
}

/// Grayscale color for a sample, or `None` when it faces away from the light.
pub fn shade(ooz: f32, luminance: f32) -> Option<Color> {
    if !(luminance > 0.0) {
        return None;
    }
    let level = INTENSITY_FLOOR as f32 + (brightness(ooz, luminance) * INTENSITY_RANGE).round();
    Some(Color::gray(level.clamp(0.0, 255.0) as u8))
}
