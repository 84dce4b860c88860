// src/compositor.rs

//! This module defines the `Compositor`, which runs one render cycle at a time.
//!
//! A cycle is strictly sequential:
//!
//! 1. Clear the frame buffer and reset the z-buffer.
//! 2. Run every surface sample through projection, the depth test and
//!    shading, writing accepted samples into the frame buffer.
//! 3. Commit the finished frame to the panel driver, then offer a copy to the
//!    diagnostic tap.
//! 4. Advance the animation angles.
//!
//! Pacing between cycles belongs to the caller (see `main`). The driver only
//! ever sees a fully resolved buffer because it is handed the frame after
//! step 2 completes.

use anyhow::{Context, Result};
use log::{debug, info};

use crate::calibration;
use crate::color::Color;
use crate::config::Config;
use crate::display::PanelDriver;
use crate::export::DiagnosticTap;
use crate::framebuffer::FrameBuffer;
use crate::grid::GridMap;
use crate::rasterizer::{shading, DepthTest, Projection, Rotation, SurfaceSampler, ZBuffer};

/// The two accumulating rotation angles, in radians.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AnimationState {
    pub a: f32,
    pub b: f32,
}

impl AnimationState {
    pub fn advance(&mut self, a_delta: f32, b_delta: f32) {
        self.a += a_delta;
        self.b += b_delta;
    }
}

/// All state mutated by a render cycle, owned by one compositor.
#[derive(Debug, Clone)]
pub struct RenderContext {
    pub frame: FrameBuffer,
    pub zbuffer: ZBuffer,
    pub animation: AnimationState,
}

impl RenderContext {
    pub fn new(grid: &GridMap) -> Self {
        RenderContext {
            frame: FrameBuffer::for_grid(grid),
            zbuffer: ZBuffer::new(grid.len()),
            animation: AnimationState::default(),
        }
    }
}

/// What the compositor draws each cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scene {
    Torus,
    /// Static wiring test pattern.
    Calibration,
}

/// Per-frame sample accounting, logged at debug level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameStats {
    pub samples: usize,
    pub off_grid: usize,
    pub occluded: usize,
    pub culled: usize,
    pub written: usize,
}

pub struct Compositor {
    grid: GridMap,
    sampler: SurfaceSampler,
    projection: Projection,
    a_delta: f32,
    b_delta: f32,
    scene: Scene,
    context: RenderContext,
    frames_rendered: u64,
}

impl Compositor {
    pub fn new(config: &Config) -> Result<Self> {
        config.validate().context("Invalid configuration")?;

        let grid = GridMap::new(&config.grid)?;
        let sampler = SurfaceSampler::from_config(&config.torus)?;
        let projection = Projection::new(&config.camera, grid.width(), grid.height());
        let context = RenderContext::new(&grid);
        let scene = if config.output.calibration {
            Scene::Calibration
        } else {
            Scene::Torus
        };

        let (thetas, phis) = sampler.dimensions();
        info!(
            "Compositor: {:?} scene, {} samples per frame ({} x {})",
            scene,
            sampler.len(),
            thetas,
            phis
        );

        Ok(Compositor {
            grid,
            sampler,
            projection,
            a_delta: config.animation.a_delta,
            b_delta: config.animation.b_delta,
            scene,
            context,
            frames_rendered: 0,
        })
    }

    /// Clears and redraws the frame at the current animation angles.
    pub fn render_frame(&mut self) -> FrameStats {
        match self.scene {
            Scene::Torus => {
                let AnimationState { a, b } = self.context.animation;
                self.rasterize(a, b)
            }
            Scene::Calibration => {
                self.context.zbuffer.reset();
                calibration::draw(&self.grid, &mut self.context.frame);
                FrameStats::default()
            }
        }
    }

    /// Clears and redraws the torus at explicit angles. Animation state is untouched.
    pub fn render_at(&mut self, a: f32, b: f32) -> FrameStats {
        self.rasterize(a, b)
    }

    /// One full cycle: render, commit to `driver`, offer to `tap`, advance.
    pub fn cycle(
        &mut self,
        driver: &mut dyn PanelDriver,
        tap: Option<&mut DiagnosticTap>,
    ) -> Result<FrameStats> {
        let stats = self.render_frame();

        driver
            .present(&self.context.frame)
            .with_context(|| format!("{} driver failed to present frame", driver.name()))?;
        if let Some(tap) = tap {
            tap.offer(&self.context.frame);
        }

        self.context.animation.advance(self.a_delta, self.b_delta);
        self.frames_rendered += 1;
        debug!("Compositor: frame {} {:?}", self.frames_rendered, stats);
        Ok(stats)
    }

    fn rasterize(&mut self, a: f32, b: f32) -> FrameStats {
        let RenderContext { frame, zbuffer, .. } = &mut self.context;
        frame.clear();
        zbuffer.reset();

        let rotation = Rotation::new(a, b);
        let mut stats = FrameStats {
            samples: self.sampler.len(),
            ..FrameStats::default()
        };

        for point in self.sampler.points() {
            let projected = rotation.project(point, &self.projection);
            let (px, py) = projected.pixel();
            let index = match zbuffer.resolve(&self.grid, px, py, projected.ooz) {
                DepthTest::Nearest(index) => index,
                DepthTest::OffGrid => {
                    stats.off_grid += 1;
                    continue;
                }
                DepthTest::Occluded => {
                    stats.occluded += 1;
                    continue;
                }
            };
            // The nearest sample owns the pixel even when it faces away.
            match shading::shade(projected.ooz, shading::luminance(point, &rotation)) {
                Some(color) => {
                    frame.set(index, color);
                    stats.written += 1;
                }
                None => {
                    frame.set(index, Color::default());
                    stats.culled += 1;
                }
            }
        }
        stats
    }

    pub fn grid(&self) -> &GridMap {
        &self.grid
    }

    pub fn sampler(&self) -> &SurfaceSampler {
        &self.sampler
    }

    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    pub fn frame(&self) -> &FrameBuffer {
        &self.context.frame
    }

    pub fn zbuffer(&self) -> &ZBuffer {
        &self.context.zbuffer
    }

    pub fn animation(&self) -> AnimationState {
        self.context.animation
    }

    pub fn scene(&self) -> Scene {
        self.scene
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }
}
