// src/rasterizer/tests.rs

use super::shading::{self, INTENSITY_FLOOR};
use super::*;
use crate::color::Color;
use crate::config::{CameraConfig, GridConfig};
use crate::grid::GridMap;
use test_log::test;

fn point(theta: f32, phi: f32) -> SurfacePoint {
    let (sin_theta, cos_theta) = theta.sin_cos();
    let (sin_phi, cos_phi) = phi.sin_cos();
    SurfacePoint {
        theta,
        phi,
        cos_theta,
        sin_theta,
        cos_phi,
        sin_phi,
        circle_x: 2.0 + cos_theta,
        circle_y: sin_theta,
    }
}

fn projection() -> Projection {
    Projection::new(&CameraConfig::default(), 8, 8)
}

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-5
}

// --- Transform ---

#[test]
fn unrotated_outer_rim_projects_right_of_center() {
    let projected = Rotation::new(0.0, 0.0).project(&point(0.0, 0.0), &projection());
    // x = 3, y = 0, z = K2 = 5
    assert!(approx(projected.ooz, 0.2));
    assert!(approx(projected.screen_x, 4.0 + 5.0 * 0.2 * 3.0));
    assert!(approx(projected.screen_y, 4.0));
    assert_eq!(projected.pixel(), (7, 4));
}

#[test]
fn nearest_rim_has_largest_inverse_depth() {
    let rotation = Rotation::new(0.0, 0.0);
    let near = rotation.project(&point(0.0, -std::f32::consts::FRAC_PI_2), &projection());
    let far = rotation.project(&point(0.0, std::f32::consts::FRAC_PI_2), &projection());
    // z = 5 - 3 and z = 5 + 3
    assert!(approx(near.ooz, 0.5));
    assert!(approx(far.ooz, 0.125));
}

#[test]
fn rotation_b_spins_in_screen_plane() {
    let rotation = Rotation::new(0.0, std::f32::consts::FRAC_PI_2);
    let (x, y, z) = rotation.rotate(&point(0.0, 0.0), 5.0);
    assert!(approx(x, 0.0));
    assert!(approx(y, 3.0));
    assert!(approx(z, 5.0));
}

#[test]
fn points_behind_viewer_get_zero_inverse_depth() {
    let camera = CameraConfig {
        zoom: 5.0,
        distance: 1.0,
    };
    let projection = Projection::new(&camera, 8, 8);
    let projected = Rotation::new(0.0, 0.0).project(&point(0.0, -std::f32::consts::FRAC_PI_2), &projection);
    assert_eq!(projected.ooz, 0.0);
}

#[test]
fn pixel_floors_negative_coordinates() {
    let projected = Projected {
        screen_x: -0.25,
        screen_y: 3.9,
        ooz: 0.2,
    };
    assert_eq!(projected.pixel(), (-1, 3));
}

// --- Depth ---

#[test]
fn zbuffer_keeps_strictly_nearer_samples() {
    let mut zbuffer = ZBuffer::new(4);
    assert!(zbuffer.test_and_set(2, 0.2));
    assert!(!zbuffer.test_and_set(2, 0.1));
    assert!(zbuffer.test_and_set(2, 0.3));
    assert_eq!(zbuffer.get(2), Some(0.3));
}

#[test]
fn zbuffer_tie_keeps_first_sample() {
    let mut zbuffer = ZBuffer::new(1);
    assert!(zbuffer.test_and_set(0, 0.25));
    assert!(!zbuffer.test_and_set(0, 0.25));
}

#[test]
fn zbuffer_rejects_zero_depth_on_fresh_pixel() {
    let mut zbuffer = ZBuffer::new(1);
    assert!(!zbuffer.test_and_set(0, 0.0));
}

#[test]
fn resolve_discards_off_grid_samples() {
    let grid = GridMap::new(&GridConfig::default()).unwrap();
    let mut zbuffer = ZBuffer::new(grid.len());
    assert_eq!(zbuffer.resolve(&grid, -1, 3, 0.4), DepthTest::OffGrid);
    assert_eq!(zbuffer.resolve(&grid, 8, 3, 0.4), DepthTest::OffGrid);
    assert_eq!(zbuffer.resolve(&grid, 3, 8, 0.4), DepthTest::OffGrid);
    assert!(zbuffer.as_slice().iter().all(|&d| d == 0.0));
    assert_eq!(zbuffer.resolve(&grid, 7, 0, 0.4), DepthTest::Nearest(7));
    assert_eq!(zbuffer.resolve(&grid, 7, 0, 0.4), DepthTest::Occluded);
    assert_eq!(zbuffer.resolve(&grid, 7, 0, 0.5), DepthTest::Nearest(7));
}

#[test]
fn reset_zeroes_every_pixel() {
    let mut zbuffer = ZBuffer::new(3);
    zbuffer.test_and_set(1, 0.5);
    zbuffer.reset();
    assert_eq!(zbuffer.as_slice(), &[0.0, 0.0, 0.0]);
}

// --- Shading ---

#[test]
fn back_facing_samples_are_culled() {
    assert_eq!(shading::shade(0.5, 0.0), None);
    assert_eq!(shading::shade(0.5, -0.4), None);
}

#[test]
fn lit_samples_stay_within_floor_and_ceiling() {
    for ooz in [0.0, 0.1, 0.125, 0.2, 0.3, 0.5, 0.9, 2.0] {
        for l in [1e-4, 0.1, 0.5, 1.0, 1.4] {
            let color = shading::shade(ooz, l).unwrap();
            assert!(color.r >= INTENSITY_FLOOR);
            assert_eq!(color.r, color.g);
            assert_eq!(color.g, color.b);
        }
    }
}

#[test]
fn farthest_lit_sample_sits_at_floor() {
    assert_eq!(shading::shade(0.125, 1.0), Some(Color::gray(INTENSITY_FLOOR)));
}

#[test]
fn nearest_fully_lit_sample_saturates() {
    assert_eq!(shading::shade(0.6, 1.0), Some(Color::gray(255)));
    // depth_norm(0.5) = 0.9375
    assert_eq!(shading::shade(0.5, 1.0), Some(Color::gray(240)));
}

#[test]
fn luminance_at_rest() {
    let rotation = Rotation::new(0.0, 0.0);
    // L = sin(theta) - cos(theta) * sin(phi)
    assert!(approx(shading::luminance(&point(std::f32::consts::FRAC_PI_2, 0.0), &rotation), 1.0));
    assert!(approx(shading::luminance(&point(0.0, -std::f32::consts::FRAC_PI_2), &rotation), 1.0));
    assert!(approx(shading::luminance(&point(0.0, std::f32::consts::FRAC_PI_2), &rotation), -1.0));
}
