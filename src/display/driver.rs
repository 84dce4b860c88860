// src/display/driver.rs
//! PanelDriver trait - the boundary between rendering and the physical panel.
//!
//! A driver receives each completed frame exactly once, in physical-index
//! order. It never sees a partially drawn frame and never writes back into
//! the compositor's buffer.

use crate::framebuffer::FrameBuffer;
use anyhow::Result;

pub trait PanelDriver {
    /// Displays a fully resolved frame.
    ///
    /// Drivers talking to LED hardware should send
    /// `frame.encode_wire(color_order, brightness_ceiling)`, which applies the
    /// channel order and the safety brightness limit.
    fn present(&mut self, frame: &FrameBuffer) -> Result<()>;

    /// Short name used in log and error messages.
    fn name(&self) -> &'static str;
}
