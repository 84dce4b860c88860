// src/display/drivers/console.rs

//! Provides a `PanelDriver` that previews the panel in a truecolor terminal
//! using ANSI escape codes.
//!
//! The preview is drawn in logical layout: every cell at `(x, y)` is read back
//! from the frame through the grid's address map. A wrong wiring or flip
//! setting therefore shows up on screen exactly as it would on the LEDs.

use crate::color::Color;
use crate::display::driver::PanelDriver;
use crate::framebuffer::FrameBuffer;
use crate::grid::GridMap;

use anyhow::{Context, Result};
use log::{info, warn};
use std::io::Write;

// --- ANSI Escape Code Constants ---
const CURSOR_HIDE: &str = "\x1b[?25l";
const CURSOR_SHOW: &str = "\x1b[?25h";
const CURSOR_HOME: &str = "\x1b[H";
const CLEAR_SCREEN_AND_HOME: &str = "\x1b[2J\x1b[H";
const SGR_RESET: &str = "\x1b[0m";

// Each LED is drawn two columns wide so it looks roughly square.
const CELL: &str = "  ";

pub struct ConsoleDriver<W: Write> {
    grid: GridMap,
    out: W,
    started: bool,
    /// Reused line buffer; the whole frame is written in one call.
    scratch: String,
}

impl<W: Write> ConsoleDriver<W> {
    pub fn new(grid: GridMap, out: W) -> Self {
        info!(
            "Creating ConsoleDriver for a {}x{} panel.",
            grid.width(),
            grid.height()
        );
        ConsoleDriver {
            grid,
            out,
            started: false,
            scratch: String::new(),
        }
    }

    fn push_cell(&mut self, color: Color) {
        use std::fmt::Write as _;
        let _ = write!(
            self.scratch,
            "\x1b[48;2;{};{};{}m{}",
            color.r, color.g, color.b, CELL
        );
    }
}

impl<W: Write> PanelDriver for ConsoleDriver<W> {
    fn present(&mut self, frame: &FrameBuffer) -> Result<()> {
        self.scratch.clear();
        if !self.started {
            self.scratch.push_str(CURSOR_HIDE);
            self.scratch.push_str(CLEAR_SCREEN_AND_HOME);
            self.started = true;
        } else {
            self.scratch.push_str(CURSOR_HOME);
        }

        for y in 0..self.grid.height() {
            for x in 0..self.grid.width() {
                let color = frame.get_xy(&self.grid, x, y);
                self.push_cell(color);
            }
            self.scratch.push_str(SGR_RESET);
            self.scratch.push('\n');
        }

        self.out
            .write_all(self.scratch.as_bytes())
            .context("Failed to write frame to console")?;
        self.out.flush().context("Failed to flush console")?;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "console"
    }
}

impl<W: Write> Drop for ConsoleDriver<W> {
    fn drop(&mut self) {
        if self.started {
            if let Err(e) = write!(self.out, "{}{}", SGR_RESET, CURSOR_SHOW) {
                warn!("ConsoleDriver: failed to restore cursor: {}", e);
            }
            let _ = self.out.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{GridConfig, Wiring};
    use test_log::test;

    fn grid(wiring: Wiring) -> GridMap {
        GridMap::new(&GridConfig {
            width: 2,
            height: 2,
            wiring,
            ..GridConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn first_frame_clears_screen_and_draws_rows() {
        let grid = grid(Wiring::Progressive);
        let mut frame = FrameBuffer::for_grid(&grid);
        frame.set(1, Color::new(10, 20, 30));

        let mut out = Vec::new();
        let mut driver = ConsoleDriver::new(grid, &mut out);
        driver.present(&frame).unwrap();
        driver.present(&frame).unwrap();
        drop(driver);
        let text = String::from_utf8(out).unwrap();

        assert!(text.starts_with(CURSOR_HIDE));
        assert_eq!(text.matches(CLEAR_SCREEN_AND_HOME).count(), 1);
        assert_eq!(text.matches('\n').count(), 4);
        assert!(text.ends_with(CURSOR_SHOW));
        let first_row = text.lines().next().unwrap();
        assert!(first_row.ends_with(&format!("\x1b[48;2;10;20;30m{}{}", CELL, SGR_RESET)));
    }

    #[test]
    fn preview_follows_serpentine_addressing() {
        let grid = grid(Wiring::Serpentine);
        let mut frame = FrameBuffer::for_grid(&grid);
        // Physical 2 is the right-hand cell of row 1 on a 2-wide serpentine panel.
        frame.set(2, Color::new(9, 9, 9));

        let mut out = Vec::new();
        let mut driver = ConsoleDriver::new(grid, &mut out);
        driver.present(&frame).unwrap();
        drop(driver);
        let text = String::from_utf8(out).unwrap();

        let second_row = text.lines().nth(1).unwrap();
        assert!(second_row.ends_with(&format!("\x1b[48;2;9;9;9m{}{}", CELL, SGR_RESET)));
    }
}
