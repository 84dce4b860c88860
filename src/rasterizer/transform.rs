// src/rasterizer/transform.rs

//! Rotation into camera space and perspective projection.

use crate::config::CameraConfig;
use crate::rasterizer::surface::SurfacePoint;

/// Screen-space projection constants for one grid size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// K1
    pub zoom: f32,
    /// K2, added to camera-space z during rotation.
    pub distance: f32,
    pub center_x: f32,
    pub center_y: f32,
}

impl Projection {
    pub fn new(camera: &CameraConfig, width: i32, height: i32) -> Self {
        Projection {
            zoom: camera.zoom,
            distance: camera.distance,
            center_x: width as f32 / 2.0,
            center_y: height as f32 / 2.0,
        }
    }
}

/// Sines and cosines of the two animation angles, computed once per frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rotation {
    pub cos_a: f32,
    pub sin_a: f32,
    pub cos_b: f32,
    pub sin_b: f32,
}

/// A sample after projection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projected {
    pub screen_x: f32,
    pub screen_y: f32,
    /// Inverse depth `1/z`; larger is closer. Zero for points at or behind the viewer.
    pub ooz: f32,
}

impl Projected {
    /// Pixel containing the projected point. May lie outside the grid.
    pub fn pixel(&self) -> (i32, i32) {
        (self.screen_x.floor() as i32, self.screen_y.floor() as i32)
    }
}

impl Rotation {
    pub fn new(a: f32, b: f32) -> Self {
        let (sin_a, cos_a) = a.sin_cos();
        let (sin_b, cos_b) = b.sin_cos();
        Rotation {
            cos_a,
            sin_a,
            cos_b,
            sin_b,
        }
    }

    /// Camera-space `(x, y, z)` of a surface point, `z` including the camera distance.
    pub fn rotate(&self, p: &SurfacePoint, distance: f32) -> (f32, f32, f32) {
        let Rotation {
            cos_a,
            sin_a,
            cos_b,
            sin_b,
        } = *self;

        let x = p.circle_x * (cos_b * p.cos_phi + sin_a * sin_b * p.sin_phi)
            - p.circle_y * cos_a * sin_b;
        let y = p.circle_x * (sin_b * p.cos_phi - sin_a * cos_b * p.sin_phi)
            + p.circle_y * cos_a * cos_b;
        let z = distance + cos_a * p.circle_x * p.sin_phi + p.circle_y * sin_a;
        (x, y, z)
    }

    pub fn project(&self, p: &SurfacePoint, projection: &Projection) -> Projected {
        let (x, y, z) = self.rotate(p, projection.distance);
        let ooz = if z > 0.0 { 1.0 / z } else { 0.0 };
        Projected {
            screen_x: projection.center_x + projection.zoom * ooz * x,
            screen_y: projection.center_y - projection.zoom * ooz * y,
            ooz,
        }
    }
}
