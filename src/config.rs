// src/config.rs

//! Defines the configuration structures for the panel renderer.
//!
//! Every section is deserialized from an optional JSON file. Missing fields
//! fall back to defaults that match the reference board: an 8x8 WS2812 panel
//! with progressive wiring, RGB channel order and a brightness limit of 60.
//!
//! The configuration is fixed at initialization. `Config::validate` rejects
//! values that would produce an unusable grid or sampler before anything is
//! built from them.

use anyhow::{bail, Context, Result};
use log::info;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::color::ColorOrder;

/// Environment variable consulted for a config path when none is passed on the command line.
pub const CONFIG_ENV_VAR: &str = "LED_TORUS_CONFIG";

// --- Top-Level Configuration Structure ---

/// Complete configuration for the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Panel geometry and wiring.
    pub grid: GridConfig,
    /// Surface shape and sampling density.
    pub torus: TorusConfig,
    /// Perspective projection constants.
    pub camera: CameraConfig,
    /// Per-frame rotation deltas and pacing.
    pub animation: AnimationConfig,
    /// Driver and diagnostics selection.
    pub output: OutputConfig,
}

impl Config {
    /// Loads a configuration from a JSON file. Fields absent from the file keep their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = Self::from_json(&text)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        info!("Configuration loaded from {}", path.display());
        Ok(config)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Resolves the config source: explicit path, then the environment, then defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load(path);
        }
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => Self::load(Path::new(&path)),
            None => {
                info!("No config file given, using defaults.");
                Ok(Self::default())
            }
        }
    }

    /// Checks every initialization invariant. Violations are fatal.
    pub fn validate(&self) -> Result<()> {
        self.grid.validate()?;
        self.torus.validate()?;
        self.camera.validate()?;
        Ok(())
    }
}

// --- Grid Configuration ---

/// How consecutive rows of LEDs are chained on the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Wiring {
    /// Every row runs left to right.
    #[default]
    Progressive,
    /// Odd rows run right to left.
    Serpentine,
}

impl Wiring {
    pub fn as_str(&self) -> &'static str {
        match self {
            Wiring::Progressive => "progressive",
            Wiring::Serpentine => "serpentine",
        }
    }
}

/// Panel geometry, wiring and output limits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub width: i32,
    pub height: i32,
    pub wiring: Wiring,
    /// Panel rotation in degrees: 0, 90, 180 or 270.
    pub rotation: u16,
    pub flip_x: bool,
    pub flip_y: bool,
    pub color_order: ColorOrder,
    /// Upper bound for any channel value sent to the LEDs.
    pub brightness_ceiling: u8,
}

impl Default for GridConfig {
    fn default() -> Self {
        GridConfig {
            width: 8,
            height: 8,
            wiring: Wiring::Progressive,
            rotation: 0,
            flip_x: false,
            flip_y: false,
            color_order: ColorOrder::Rgb,
            brightness_ceiling: 60,
        }
    }
}

impl GridConfig {
    pub fn validate(&self) -> Result<()> {
        if self.width <= 0 || self.height <= 0 {
            bail!(
                "Grid dimensions must be positive, got {}x{}",
                self.width,
                self.height
            );
        }
        if self.width.checked_mul(self.height).is_none() {
            bail!(
                "Grid {}x{} has more pixels than can be addressed",
                self.width,
                self.height
            );
        }
        if !matches!(self.rotation, 0 | 90 | 180 | 270) {
            bail!(
                "Grid rotation must be one of 0, 90, 180, 270; got {}",
                self.rotation
            );
        }
        Ok(())
    }

    /// Total pixel count `N`.
    pub fn pixel_count(&self) -> usize {
        self.width.max(0) as usize * self.height.max(0) as usize
    }
}

// --- Torus Configuration ---

/// Torus radii and the angular step of the surface sweep.
///
/// Coarser steps bound the per-frame sample count; finer steps trade frame
/// rate for surface density.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TorusConfig {
    /// R1, radius of the tube cross-section.
    pub tube_radius: f32,
    /// R2, distance from the torus center to the tube center.
    pub ring_radius: f32,
    pub theta_step: f32,
    pub phi_step: f32,
}

impl Default for TorusConfig {
    fn default() -> Self {
        TorusConfig {
            tube_radius: 1.0,
            ring_radius: 2.0,
            theta_step: 0.2,
            phi_step: 0.1,
        }
    }
}

impl TorusConfig {
    pub fn validate(&self) -> Result<()> {
        if !(self.theta_step > 0.0 && self.phi_step > 0.0) {
            bail!(
                "Sampler steps must be positive, got theta_step={} phi_step={}",
                self.theta_step,
                self.phi_step
            );
        }
        if !(self.tube_radius > 0.0 && self.ring_radius > 0.0) {
            bail!(
                "Torus radii must be positive, got tube_radius={} ring_radius={}",
                self.tube_radius,
                self.ring_radius
            );
        }
        Ok(())
    }
}

// --- Camera Configuration ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// K1, screen-space zoom.
    pub zoom: f32,
    /// K2, distance from the viewer to the torus center.
    pub distance: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        CameraConfig {
            zoom: 5.0,
            distance: 5.0,
        }
    }
}

impl CameraConfig {
    pub fn validate(&self) -> Result<()> {
        if !(self.distance > 0.0) {
            bail!("Camera distance must be positive, got {}", self.distance);
        }
        Ok(())
    }
}

// --- Animation Configuration ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Per-frame increment of rotation angle A (radians).
    pub a_delta: f32,
    /// Per-frame increment of rotation angle B (radians).
    pub b_delta: f32,
    /// Pacing delay between frames.
    pub frame_interval_ms: u64,
    /// Stop after this many frames. 0 runs until the process is terminated.
    pub max_frames: u64,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        AnimationConfig {
            a_delta: 0.04,
            b_delta: 0.02,
            frame_interval_ms: 100,
            max_frames: 0,
        }
    }
}

// --- Output Configuration ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DriverKind {
    /// Keeps the last committed frame in memory.
    Headless,
    /// Draws the panel in a truecolor terminal.
    #[default]
    Console,
}

/// Where the diagnostic frame export goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticsSink {
    #[default]
    Off,
    Stdout,
    Stderr,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct OutputConfig {
    pub driver: DriverKind,
    pub diagnostics: DiagnosticsSink,
    /// Show the wiring calibration pattern instead of the torus.
    pub calibration: bool,
}
