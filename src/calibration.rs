// src/calibration.rs

//! Wiring calibration pattern.
//!
//! Drawn entirely through logical coordinates, so on a correctly configured
//! panel the red pixel sits top-left, green runs along the top edge, blue runs
//! down the left edge and the white pixel sits bottom-right. Anything else
//! points at the wiring, flip or color-order settings.

use crate::color::palette;
use crate::framebuffer::FrameBuffer;
use crate::grid::GridMap;

pub fn draw(grid: &GridMap, frame: &mut FrameBuffer) {
    frame.clear();
    for x in 1..grid.width() {
        frame.set_xy(grid, x, 0, palette::GREEN);
    }
    for y in 1..grid.height() {
        frame.set_xy(grid, 0, y, palette::BLUE);
    }
    frame.set_xy(grid, 0, 0, palette::RED);
    frame.set_xy(grid, grid.width() - 1, grid.height() - 1, palette::WHITE);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::config::{GridConfig, Wiring};
    use test_log::test;

    fn grid(wiring: Wiring, flip_x: bool) -> GridMap {
        GridMap::new(&GridConfig {
            wiring,
            flip_x,
            ..GridConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn progressive_pattern_in_physical_order() {
        let grid = grid(Wiring::Progressive, false);
        let mut frame = FrameBuffer::for_grid(&grid);
        draw(&grid, &mut frame);

        assert_eq!(frame.get(0), Some(palette::RED));
        assert_eq!(frame.get(7), Some(palette::GREEN));
        assert_eq!(frame.get(8), Some(palette::BLUE));
        assert_eq!(frame.get(56), Some(palette::BLUE));
        assert_eq!(frame.get(63), Some(palette::WHITE));
        assert_eq!(frame.get(9), Some(Color::default()));
    }

    #[test]
    fn serpentine_moves_left_edge_to_row_ends() {
        let grid = grid(Wiring::Serpentine, false);
        let mut frame = FrameBuffer::for_grid(&grid);
        draw(&grid, &mut frame);

        // Row 1 runs right to left, so its left-edge pixel is the last in that row.
        assert_eq!(frame.get(15), Some(palette::BLUE));
        assert_eq!(frame.get(8), Some(Color::default()));
        assert_eq!(frame.get(16), Some(palette::BLUE));
    }

    #[test]
    fn flip_x_moves_origin_to_end_of_first_row() {
        let grid = grid(Wiring::Progressive, true);
        let mut frame = FrameBuffer::for_grid(&grid);
        draw(&grid, &mut frame);
        assert_eq!(frame.get(7), Some(palette::RED));
        assert_eq!(frame.get(0), Some(palette::GREEN));
    }

    #[test]
    fn logical_readback_is_layout_independent() {
        for wiring in [Wiring::Progressive, Wiring::Serpentine] {
            for flip_x in [false, true] {
                let grid = grid(wiring, flip_x);
                let mut frame = FrameBuffer::for_grid(&grid);
                draw(&grid, &mut frame);
                assert_eq!(frame.get_xy(&grid, 0, 0), palette::RED);
                assert_eq!(frame.get_xy(&grid, 5, 0), palette::GREEN);
                assert_eq!(frame.get_xy(&grid, 0, 5), palette::BLUE);
                assert_eq!(frame.get_xy(&grid, 7, 7), palette::WHITE);
            }
        }
    }
}
