//! VST Post-Process - Headless Entry Point
//!
//! Loads the layered configuration, applies command-line overrides and runs
//! the frame loop over the resulting application state.
//!
//! ```bash
//! # Grayscale GLSL effect with a CPU-generated grid texture
//! cargo run -- --post-process --shader glsl --texture grid --cpu-texture --grayscale
//!
//! # Build without the VR scene flag
//! cargo run --features headless -- --post-process --shader hlsl
//!
//! # Verbose logging
//! VST_LOG=vst_postprocess=trace cargo run -- --frames 10
//! ```

use clap::Parser;
use std::process::ExitCode;
use vst_postprocess::app::{Cli, FrameLoop, FrameLoopConfig};
use vst_postprocess::config::{LayeredSettings, Settings};
use vst_postprocess::logging::init_logging;
use vst_postprocess::Result;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "VST post-process sample failed");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    // An explicit --config must load; the default chain skips broken files
    let layered = match &cli.config {
        Some(path) => LayeredSettings::from_file(path)?,
        None => Settings::load()?,
    };

    let mut logging = layered.settings.logging.clone();
    logging.override_level(cli.log_level.as_deref());
    let _guard = init_logging(&logging.to_logging_config());
    layered.log_layers();

    let mut state = layered.settings.into_app_state()?;
    cli.apply(&mut state)?;

    if cli.print_state {
        println!("{}", serde_json::to_string_pretty(&state)?);
    }

    let config = FrameLoopConfig {
        fps: cli.fps,
        max_frames: cli.frames,
        texture_size: cli.texture_size,
        ..FrameLoopConfig::default()
    };
    FrameLoop::new(state, config).run()?;

    Ok(())
}
