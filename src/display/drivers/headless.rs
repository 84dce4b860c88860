//! Headless panel driver implementation.

use crate::color::ColorOrder;
use crate::config::GridConfig;
use crate::display::driver::PanelDriver;
use crate::framebuffer::FrameBuffer;
use anyhow::Result;
use log::{info, trace};

/// Keeps the last committed frame and its wire encoding in memory.
pub struct HeadlessDriver {
    color_order: ColorOrder,
    brightness_ceiling: u8,
    last_frame: Option<FrameBuffer>,
    last_wire: Vec<u8>,
    frames_presented: u64,
}

impl HeadlessDriver {
    pub fn new(config: &GridConfig) -> Self {
        info!(
            "HeadlessDriver::new() order={:?} ceiling={}",
            config.color_order, config.brightness_ceiling
        );
        HeadlessDriver {
            color_order: config.color_order,
            brightness_ceiling: config.brightness_ceiling,
            last_frame: None,
            last_wire: Vec::new(),
            frames_presented: 0,
        }
    }

    pub fn last_frame(&self) -> Option<&FrameBuffer> {
        self.last_frame.as_ref()
    }

    /// Bytes that would have gone to the LED chain for the last frame.
    pub fn last_wire(&self) -> &[u8] {
        &self.last_wire
    }

    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }
}

impl PanelDriver for HeadlessDriver {
    fn present(&mut self, frame: &FrameBuffer) -> Result<()> {
        trace!("HeadlessDriver: Present");
        self.last_wire = frame.encode_wire(self.color_order, self.brightness_ceiling);
        match &mut self.last_frame {
            Some(last) => last.clone_from(frame),
            None => self.last_frame = Some(frame.clone()),
        }
        self.frames_presented += 1;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "headless"
    }
}
