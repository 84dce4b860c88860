// src/rasterizer/surface.rs

//! Torus surface sampling.

use anyhow::{bail, Result};
use std::f32::consts::TAU;

use crate::config::TorusConfig;

/// Torus geometry: a circle of radius `tube_radius` (R1) swept around the
/// vertical axis at distance `ring_radius` (R2).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Torus {
    pub tube_radius: f32,
    pub ring_radius: f32,
}

impl From<&TorusConfig> for Torus {
    fn from(config: &TorusConfig) -> Self {
        Torus {
            tube_radius: config.tube_radius,
            ring_radius: config.ring_radius,
        }
    }
}

/// One `(theta, phi)` sample of the surface in object space.
///
/// `theta` walks around the tube cross-section, `phi` sweeps that circle
/// around the ring. The trig terms are kept because both the rotation and the
/// lighting term need them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfacePoint {
    pub theta: f32,
    pub phi: f32,
    pub cos_theta: f32,
    pub sin_theta: f32,
    pub cos_phi: f32,
    pub sin_phi: f32,
    /// `R2 + R1 * cos(theta)`
    pub circle_x: f32,
    /// `R1 * sin(theta)`
    pub circle_y: f32,
}

/// The fixed, precomputed sample sequence for one torus.
///
/// Order is outer `theta`, inner `phi`. The depth resolver keeps the first
/// sample on equal depth, so this order is part of the output.
#[derive(Debug, Clone)]
pub struct SurfaceSampler {
    torus: Torus,
    theta_count: usize,
    phi_count: usize,
    points: Vec<SurfacePoint>,
}

impl SurfaceSampler {
    pub fn new(torus: Torus, theta_step: f32, phi_step: f32) -> Result<Self> {
        if !(theta_step > 0.0 && phi_step > 0.0) {
            bail!(
                "Sampler steps must be positive, got theta_step={} phi_step={}",
                theta_step,
                phi_step
            );
        }

        let thetas = sweep(theta_step);
        let phis = sweep(phi_step);

        let mut points = Vec::with_capacity(thetas.len() * phis.len());
        for &theta in &thetas {
            let (sin_theta, cos_theta) = theta.sin_cos();
            let circle_x = torus.ring_radius + torus.tube_radius * cos_theta;
            let circle_y = torus.tube_radius * sin_theta;
            for &phi in &phis {
                let (sin_phi, cos_phi) = phi.sin_cos();
                points.push(SurfacePoint {
                    theta,
                    phi,
                    cos_theta,
                    sin_theta,
                    cos_phi,
                    sin_phi,
                    circle_x,
                    circle_y,
                });
            }
        }

        Ok(SurfaceSampler {
            torus,
            theta_count: thetas.len(),
            phi_count: phis.len(),
            points,
        })
    }

    pub fn from_config(config: &TorusConfig) -> Result<Self> {
        Self::new(Torus::from(config), config.theta_step, config.phi_step)
    }

    pub fn points(&self) -> &[SurfacePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn torus(&self) -> Torus {
        self.torus
    }

    /// `(theta samples, phi samples)`
    pub fn dimensions(&self) -> (usize, usize) {
        (self.theta_count, self.phi_count)
    }
}

/// Angles `0, step, 2*step, ...` strictly below a full turn.
fn sweep(step: f32) -> Vec<f32> {
    (0..)
        .map(|i| i as f32 * step)
        .take_while(|&angle| angle < TAU)
        .collect()
}
