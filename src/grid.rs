// src/grid.rs

//! Logical-to-physical pixel addressing.
//!
//! Drawing code addresses the panel with logical `(x, y)` coordinates, origin
//! top-left. The LEDs themselves form one chain, so every logical coordinate
//! has to be translated into a position along that chain (the physical
//! index). `GridMap` owns that translation for one panel configuration.

use anyhow::Result;
use bitflags::bitflags;
use log::{info, warn};

use crate::config::{GridConfig, Wiring};

bitflags! {
    /// Mirroring applied to logical coordinates before indexing.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Orientation: u8 {
        const FLIP_X = 1 << 0;
        const FLIP_Y = 1 << 1;
    }
}

/// Maps logical coordinates to physical indices for one panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridMap {
    width: i32,
    height: i32,
    wiring: Wiring,
    orientation: Orientation,
    rotation: u16,
}

impl GridMap {
    /// Builds the map. Fails if the configuration describes an empty or invalid grid.
    pub fn new(config: &GridConfig) -> Result<Self> {
        config.validate()?;

        let mut orientation = Orientation::empty();
        orientation.set(Orientation::FLIP_X, config.flip_x);
        orientation.set(Orientation::FLIP_Y, config.flip_y);

        if config.rotation != 0 {
            warn!(
                "GridMap: rotation {} is configured but not applied by addressing",
                config.rotation
            );
        }
        info!(
            "GridMap: {}x{} {} wiring, orientation {:?}",
            config.width,
            config.height,
            config.wiring.as_str(),
            orientation
        );

        Ok(GridMap {
            width: config.width,
            height: config.height,
            wiring: config.wiring,
            orientation,
            rotation: config.rotation,
        })
    }

    /// Physical index of logical `(x, y)`.
    ///
    /// Out-of-range coordinates are saturated to the nearest edge, so this
    /// never fails.
    pub fn map(&self, x: i32, y: i32) -> usize {
        let x = x.clamp(0, self.width - 1);
        let y = y.clamp(0, self.height - 1);
        self.index_of(x, y)
    }

    /// Like `map`, but returns `None` instead of clamping.
    pub fn try_map(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || x >= self.width || y < 0 || y >= self.height {
            return None;
        }
        Some(self.index_of(x, y))
    }

    // Caller guarantees (x, y) is in bounds.
    fn index_of(&self, mut x: i32, mut y: i32) -> usize {
        if self.orientation.contains(Orientation::FLIP_Y) {
            y = self.height - 1 - y;
        }
        if self.orientation.contains(Orientation::FLIP_X) {
            x = self.width - 1 - x;
        }

        let column = match self.wiring {
            Wiring::Serpentine if y & 1 == 1 => self.width - 1 - x,
            _ => x,
        };
        (y * self.width + column) as usize
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Total pixel count `N`.
    pub fn len(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn wiring(&self) -> Wiring {
        self.wiring
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Configured rotation in degrees. Reported, not applied.
    pub fn rotation(&self) -> u16 {
        self.rotation
    }
}
