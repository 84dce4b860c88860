// src/display/drivers/mod.rs
//! Panel driver implementations.

pub mod console;
pub mod headless;

pub use console::ConsoleDriver;
pub use headless::HeadlessDriver;
