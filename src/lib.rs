// src/lib.rs

//! Drives a small addressable LED grid: logical-to-physical pixel addressing
//! plus a software-rendered spinning torus.
//!
//! Other programs drawing on the panel only need `grid::GridMap` and
//! `framebuffer::FrameBuffer`; the binary in `main.rs` wires the full render
//! loop together.

pub mod calibration;
pub mod color;
pub mod compositor;
pub mod config;
pub mod display;
pub mod export;
pub mod framebuffer;
pub mod grid;
pub mod rasterizer;

pub use color::Color;
pub use compositor::{AnimationState, Compositor, RenderContext};
pub use config::{Config, GridConfig, Wiring};
pub use framebuffer::FrameBuffer;
pub use grid::GridMap;
