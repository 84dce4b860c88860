// src/framebuffer.rs

//! Color storage indexed by physical LED position.

use crate::color::{Color, ColorOrder};
use crate::grid::GridMap;

/// Ordered sequence of `N` colors, one per LED, in chain order.
///
/// Sized once from the grid; `clear` reuses the allocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    pixels: Vec<Color>,
}

impl FrameBuffer {
    pub fn new(len: usize) -> Self {
        FrameBuffer {
            pixels: vec![Color::default(); len],
        }
    }

    pub fn for_grid(grid: &GridMap) -> Self {
        Self::new(grid.len())
    }

    /// Resets every pixel to `background`.
    pub fn fill(&mut self, background: Color) {
        self.pixels.fill(background);
    }

    pub fn clear(&mut self) {
        self.fill(Color::default());
    }

    /// Writes at a physical index. Indices past the end are ignored.
    pub fn set(&mut self, index: usize, color: Color) {
        if let Some(pixel) = self.pixels.get_mut(index) {
            *pixel = color;
        }
    }

    pub fn get(&self, index: usize) -> Option<Color> {
        self.pixels.get(index).copied()
    }

    /// Writes at a logical coordinate, routed through `grid`.
    pub fn set_xy(&mut self, grid: &GridMap, x: i32, y: i32, color: Color) {
        self.set(grid.map(x, y), color);
    }

    /// Reads at a logical coordinate, routed through `grid`.
    pub fn get_xy(&self, grid: &GridMap, x: i32, y: i32) -> Color {
        self.get(grid.map(x, y)).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    pub fn as_slice(&self) -> &[Color] {
        &self.pixels
    }

    pub fn iter(&self) -> impl Iterator<Item = &Color> {
        self.pixels.iter()
    }

    /// Encodes the frame as the byte stream an LED controller expects:
    /// `3 * N` bytes in physical order, each channel scaled under `ceiling`
    /// and emitted in `order`.
    pub fn encode_wire(&self, order: ColorOrder, ceiling: u8) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.pixels.len() * 3);
        for pixel in &self.pixels {
            out.extend_from_slice(&order.apply(pixel.scaled(ceiling)));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{GridConfig, Wiring};
    use test_log::test;

    fn serpentine() -> GridMap {
        GridMap::new(&GridConfig {
            wiring: Wiring::Serpentine,
            ..GridConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn new_buffer_is_black() {
        let frame = FrameBuffer::new(64);
        assert_eq!(frame.len(), 64);
        assert!(frame.iter().all(Color::is_black));
    }

    #[test]
    fn set_xy_routes_through_addressing() {
        let grid = serpentine();
        let mut frame = FrameBuffer::for_grid(&grid);
        frame.set_xy(&grid, 0, 1, Color::gray(200));
        assert_eq!(frame.get(15), Some(Color::gray(200)));
        assert_eq!(frame.get_xy(&grid, 0, 1), Color::gray(200));
        assert_eq!(frame.get(8), Some(Color::default()));
    }

    #[test]
    fn set_past_end_is_ignored() {
        let mut frame = FrameBuffer::new(4);
        frame.set(4, Color::gray(1));
        assert!(frame.iter().all(Color::is_black));
    }

    #[test]
    fn clear_resets_without_resizing() {
        let mut frame = FrameBuffer::new(8);
        frame.fill(Color::new(1, 2, 3));
        frame.clear();
        assert_eq!(frame.len(), 8);
        assert!(frame.iter().all(Color::is_black));
    }

    #[test]
    fn encode_wire_applies_ceiling_then_order() {
        let mut frame = FrameBuffer::new(2);
        frame.set(0, Color::new(255, 0, 0));
        frame.set(1, Color::new(0, 255, 0));
        let bytes = frame.encode_wire(ColorOrder::Grb, 60);
        assert_eq!(bytes, vec![0, 60, 0, 60, 0, 0]);
        let bytes = frame.encode_wire(ColorOrder::Rgb, 255);
        assert_eq!(bytes, vec![255, 0, 0, 0, 255, 0]);
    }
}
