// src/rasterizer/depth.rs

//! Per-pixel nearest-sample selection.

use log::trace;

use crate::grid::GridMap;

/// Outcome of depth-testing one projected sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DepthTest {
    /// The sample projects outside the grid and is dropped.
    OffGrid,
    /// A nearer (or equally near, earlier) sample already owns the pixel.
    Occluded,
    /// The sample is now the nearest at this physical index.
    Nearest(usize),
}

/// Largest inverse depth accepted so far at each physical index.
#[derive(Debug, Clone, PartialEq)]
pub struct ZBuffer {
    depths: Vec<f32>,
}

impl ZBuffer {
    pub fn new(len: usize) -> Self {
        ZBuffer {
            depths: vec![0.0; len],
        }
    }

    pub fn reset(&mut self) {
        self.depths.fill(0.0);
    }

    pub fn get(&self, index: usize) -> Option<f32> {
        self.depths.get(index).copied()
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.depths
    }

    pub fn len(&self) -> usize {
        self.depths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.depths.is_empty()
    }

    /// Stores `ooz` at `index` iff it is strictly nearer than what is there.
    /// On a tie the earlier sample keeps the pixel.
    pub fn test_and_set(&mut self, index: usize, ooz: f32) -> bool {
        match self.depths.get_mut(index) {
            Some(stored) if ooz > *stored => {
                *stored = ooz;
                true
            }
            _ => false,
        }
    }

    /// Depth-tests a projected sample at pixel `(px, py)`.
    ///
    /// Off-grid samples are dropped, never clamped.
    pub fn resolve(&mut self, grid: &GridMap, px: i32, py: i32, ooz: f32) -> DepthTest {
        let Some(index) = grid.try_map(px, py) else {
            trace!("ZBuffer: discarding off-grid sample at ({}, {})", px, py);
            return DepthTest::OffGrid;
        };
        if self.test_and_set(index, ooz) {
            DepthTest::Nearest(index)
        } else {
            DepthTest::Occluded
        }
    }
}
