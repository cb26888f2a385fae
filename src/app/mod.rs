//! Application Layer
//!
//! Contains application-level components including the shared state,
//! command line handling, and the headless frame loop.

pub mod cli;
pub mod frame_loop;
pub mod state;

pub use cli::Cli;
pub use frame_loop::{FrameLoop, FrameLoopConfig, FrameOutput, FrameSummary};
pub use state::{AppState, General, PostProcess};
