// src/export.rs

//! Line-oriented diagnostic export of committed frames.
//!
//! The protocol is plain text, one record per line:
//!
//! ```text
//! META:width=8,height=8,wiring=serpentine,rotation=0,flip_x=0,flip_y=0
//! FRAME:000000,0F0F0F,...        (N triplets, physical-index order)
//! ```
//!
//! The metadata line is written once, before the first frame. Frames are
//! handed to a writer thread through a bounded channel. The render loop only
//! ever calls `try_send`, so a slow or missing consumer costs dropped
//! diagnostic frames and never a stalled render cycle.

use anyhow::{Context, Result};
use log::{debug, info, warn};
use std::io::{self, Write};
use std::sync::mpsc::{self, Receiver, SyncSender, TrySendError};
use std::thread::{self, JoinHandle};

use crate::color::Color;
use crate::framebuffer::FrameBuffer;
use crate::grid::{GridMap, Orientation};

pub const META_PREFIX: &str = "META:";
pub const FRAME_PREFIX: &str = "FRAME:";

/// Frames buffered between the render loop and the writer thread.
pub const DEFAULT_TAP_CAPACITY: usize = 2;

/// The one-time line describing the panel.
pub fn metadata_line(grid: &GridMap) -> String {
    let orientation = grid.orientation();
    format!(
        "{}width={},height={},wiring={},rotation={},flip_x={},flip_y={}",
        META_PREFIX,
        grid.width(),
        grid.height(),
        grid.wiring().as_str(),
        grid.rotation(),
        orientation.contains(Orientation::FLIP_X) as u8,
        orientation.contains(Orientation::FLIP_Y) as u8,
    )
}

/// One frame as comma-separated `RRGGBB` triplets in physical-index order.
pub fn frame_line(pixels: &[Color]) -> String {
    let mut line = String::with_capacity(FRAME_PREFIX.len() + pixels.len() * 7);
    line.push_str(FRAME_PREFIX);
    for (i, pixel) in pixels.iter().enumerate() {
        if i > 0 {
            line.push(',');
        }
        line.push_str(&pixel.to_string());
    }
    line
}

/// Writes the export protocol to any `Write` sink.
pub struct FrameExporter<W: Write> {
    out: W,
    header: String,
    header_written: bool,
}

impl<W: Write> FrameExporter<W> {
    pub fn new(out: W, grid: &GridMap) -> Self {
        FrameExporter {
            out,
            header: metadata_line(grid),
            header_written: false,
        }
    }

    pub fn write_frame(&mut self, pixels: &[Color]) -> io::Result<()> {
        if !self.header_written {
            writeln!(self.out, "{}", self.header)?;
            self.header_written = true;
        }
        writeln!(self.out, "{}", frame_line(pixels))?;
        self.out.flush()
    }
}

/// Non-blocking hand-off of committed frames to a background `FrameExporter`.
pub struct DiagnosticTap {
    sender: Option<SyncSender<Vec<Color>>>,
    handle: Option<JoinHandle<()>>,
    offered: u64,
    dropped: u64,
}

impl DiagnosticTap {
    pub fn spawn<W>(out: W, grid: &GridMap, capacity: usize) -> Result<Self>
    where
        W: Write + Send + 'static,
    {
        let (sender, receiver) = mpsc::sync_channel(capacity);
        let exporter = FrameExporter::new(out, grid);
        let handle = thread::Builder::new()
            .name("diagnostics".to_string())
            .spawn(move || run_exporter(exporter, receiver))
            .context("Failed to spawn diagnostics thread")?;
        info!("DiagnosticTap: writer thread started (capacity {})", capacity);

        Ok(DiagnosticTap {
            sender: Some(sender),
            handle: Some(handle),
            offered: 0,
            dropped: 0,
        })
    }

    /// Offers a copy of `frame` to the writer. Never blocks.
    ///
    /// Returns whether the frame was queued.
    pub fn offer(&mut self, frame: &FrameBuffer) -> bool {
        let Some(sender) = &self.sender else {
            return false;
        };
        self.offered += 1;
        match sender.try_send(frame.as_slice().to_vec()) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) => {
                self.dropped += 1;
                debug!("DiagnosticTap: consumer busy, dropped frame {}", self.offered);
                false
            }
            Err(TrySendError::Disconnected(_)) => {
                warn!("DiagnosticTap: writer thread gone, disabling diagnostics");
                self.sender = None;
                false
            }
        }
    }

    pub fn is_active(&self) -> bool {
        self.sender.is_some()
    }

    pub fn dropped(&self) -> u64 {
        self.dropped
    }

    /// Closes the channel and waits for queued frames to be written.
    pub fn finish(mut self) {
        self.sender = None;
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                warn!("DiagnosticTap: writer thread panicked");
            }
        }
        info!(
            "DiagnosticTap: finished, {} offered, {} dropped",
            self.offered, self.dropped
        );
    }
}

fn run_exporter<W: Write>(mut exporter: FrameExporter<W>, receiver: Receiver<Vec<Color>>) {
    for pixels in receiver {
        if let Err(e) = exporter.write_frame(&pixels) {
            warn!("DiagnosticTap: write failed, stopping export: {}", e);
            return;
        }
    }
}
