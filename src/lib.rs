//! VST Post-Process Library
//!
//! Application state for post-processing the video-see-through camera feed
//! of a mixed-reality headset:
//! - Per-frame bookkeeping and post-process parameters (`app::state`)
//! - Layered TOML configuration and command-line overrides
//! - Synthetic test textures generated on the CPU
//! - A headless frame loop that drives the state

pub mod app;
pub mod config;
pub mod error;
pub mod logging;
pub mod postprocess;
pub mod test_texture;

pub use app::AppState;
pub use error::{Result, VstError};
