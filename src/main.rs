// src/main.rs

use led_torus::{
    config::{Config, DiagnosticsSink, DriverKind},
    display,
    export::{DiagnosticTap, DEFAULT_TAP_CAPACITY},
    Compositor,
};

// Logging
use anyhow::Context;
use log::{error, info, warn};
use std::path::PathBuf;
use std::time::Duration;

/// Main entry point for the `led-torus` renderer.
fn main() -> anyhow::Result<()> {
    // Initialize the logger. Default filter is "info" if RUST_LOG is not set.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_micros()
        .init();

    info!("Starting led-torus...");

    // --- Configuration ---
    let config_path = std::env::args_os().nth(1).map(PathBuf::from);
    let config =
        Config::load_or_default(config_path.as_deref()).context("Failed to load configuration")?;

    // --- Initialize Core Components ---
    let mut compositor = Compositor::new(&config).context("Failed to initialize compositor")?;
    let mut driver = display::create_driver(config.output.driver, compositor.grid(), &config.grid);

    if config.output.driver == DriverKind::Console
        && config.output.diagnostics == DiagnosticsSink::Stdout
    {
        warn!("Diagnostics and the console preview share stdout; the output will interleave.");
    }
    let mut tap = match config.output.diagnostics {
        DiagnosticsSink::Off => None,
        DiagnosticsSink::Stdout => Some(DiagnosticTap::spawn(
            std::io::stdout(),
            compositor.grid(),
            DEFAULT_TAP_CAPACITY,
        )?),
        DiagnosticsSink::Stderr => Some(DiagnosticTap::spawn(
            std::io::stderr(),
            compositor.grid(),
            DEFAULT_TAP_CAPACITY,
        )?),
    };

    // --- Main Render Loop ---
    let frame_interval = Duration::from_millis(config.animation.frame_interval_ms);
    let max_frames = config.animation.max_frames;
    info!(
        "Starting render loop: {} ms per frame, {}",
        config.animation.frame_interval_ms,
        if max_frames == 0 {
            "until terminated".to_string()
        } else {
            format!("{} frames", max_frames)
        }
    );

    let mut result = Ok(());
    while max_frames == 0 || compositor.frames_rendered() < max_frames {
        if let Err(e) = compositor.cycle(driver.as_mut(), tap.as_mut()) {
            error!(
                "Error in render cycle: {:#}. Root cause: {:?}. Exiting.",
                e,
                e.root_cause()
            );
            result = Err(e);
            break;
        }
        std::thread::sleep(frame_interval);
    }

    // --- Cleanup ---
    drop(driver);
    if let Some(tap) = tap {
        tap.finish();
    }
    info!(
        "led-torus exited after {} frames.",
        compositor.frames_rendered()
    );

    result
}
