// src/display/mod.rs
//! Panel drivers: the hand-off point for completed frames.
//!
//! - PanelDriver: the trait a driver implements to receive committed frames
//! - drivers: headless (in-memory) and console (ANSI truecolor) implementations

pub mod driver;
pub mod drivers;

pub use driver::PanelDriver;
pub use drivers::{ConsoleDriver, HeadlessDriver};

use crate::config::{DriverKind, GridConfig};
use crate::grid::GridMap;
use log::info;

/// Builds the driver selected in the configuration.
pub fn create_driver(kind: DriverKind, grid: &GridMap, config: &GridConfig) -> Box<dyn PanelDriver> {
    info!("Creating {:?} panel driver", kind);
    match kind {
        DriverKind::Headless => Box::new(HeadlessDriver::new(config)),
        DriverKind::Console => Box::new(ConsoleDriver::new(grid.clone(), std::io::stdout())),
    }
}
