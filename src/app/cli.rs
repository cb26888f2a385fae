//! Command Line
//!
//! Flags override values loaded from the configuration files. Only flags
//! that were actually given touch the state.

use crate::app::state::AppState;
use crate::error::ConfigResult;
use crate::postprocess::ShaderSource;
use crate::test_texture::TextureType;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Headless driver for the VST post-process sample")]
pub struct Cli {
    /// Configuration file to use instead of the user/project config chain
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Number of frames to simulate
    #[arg(long, default_value_t = 300)]
    pub frames: u64,

    /// Simulated display refresh rate
    #[arg(long, default_value_t = 90, value_parser = clap::value_parser!(u32).range(1..))]
    pub fps: u32,

    /// Side length in pixels of CPU-generated test textures
    #[arg(long, default_value_t = 256)]
    pub texture_size: u32,

    /// Enable the post-process effect
    #[arg(long, default_value_t = false)]
    pub post_process: bool,

    /// Shader source; also selects the matching graphics API
    #[arg(long, value_enum)]
    pub shader: Option<ShaderSource>,

    /// Synthetic test texture type
    #[arg(long, value_enum)]
    pub texture: Option<TextureType>,

    /// Generate the test texture on the CPU instead of the GPU
    #[arg(long, default_value_t = false)]
    pub cpu_texture: bool,

    /// Do not bind a test texture
    #[arg(long, default_value_t = false)]
    pub no_texture: bool,

    /// Convert the VST image to grayscale
    #[arg(long, default_value_t = false)]
    pub grayscale: bool,

    /// Pixel cluster size of the effect
    #[arg(long)]
    pub cluster_size: Option<i32>,

    /// Outline strength of the effect
    #[arg(long)]
    pub outline_strength: Option<f32>,

    /// Hide the video-see-through feed
    #[arg(long, default_value_t = false)]
    pub no_vst: bool,

    /// Render the VR scene
    #[cfg(not(feature = "headless"))]
    #[arg(long, default_value_t = false)]
    pub vr: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Print the initial application state as JSON before running
    #[arg(long, default_value_t = false)]
    pub print_state: bool,
}

impl Cli {
    /// Apply the given flags on top of `state`, then validate the result.
    /// On error `state` is left as it was.
    pub fn apply(&self, state: &mut AppState) -> ConfigResult<()> {
        let mut candidate = state.clone();
        let pp = &mut candidate.post_process;

        if self.post_process {
            pp.enabled = true;
        }
        if let Some(source) = self.shader {
            pp.select_shader(source);
        }
        if let Some(kind) = self.texture {
            pp.texture_type = kind;
        }
        if self.cpu_texture {
            pp.texture_generated_on_gpu = false;
        }
        if self.no_texture {
            pp.texture_enabled = false;
        }
        if self.grayscale {
            pp.grayscale = true;
        }
        if let Some(size) = self.cluster_size {
            pp.cluster_size = size;
        }
        if let Some(strength) = self.outline_strength {
            pp.outline_strength = strength;
        }

        if self.no_vst {
            candidate.general.vst_enabled = false;
        }
        #[cfg(not(feature = "headless"))]
        if self.vr {
            candidate.general.vr_enabled = true;
        }

        candidate.post_process.validate()?;
        *state = candidate;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::postprocess::GraphicsApi;

    #[test]
    fn test_no_flags_keep_state() {
        let cli = Cli::try_parse_from(["vst-postprocess"]).unwrap();
        let mut state = AppState::default();
        cli.apply(&mut state).unwrap();

        assert_eq!(state, AppState::default());
        assert_eq!(cli.frames, 300);
        assert_eq!(cli.fps, 90);
    }

    #[test]
    fn test_flags_override_state() {
        let cli = Cli::try_parse_from([
            "vst-postprocess",
            "--post-process",
            "--shader",
            "hlsl",
            "--texture",
            "grid",
            "--cpu-texture",
            "--grayscale",
            "--cluster-size",
            "3",
            "--outline-strength",
            "0.25",
            "--no-vst",
        ])
        .unwrap();

        let mut state = AppState::default();
        cli.apply(&mut state).unwrap();

        let pp = &state.post_process;
        assert!(pp.enabled);
        assert_eq!(pp.shader_source, ShaderSource::Hlsl);
        assert_eq!(pp.graphics_api, GraphicsApi::D3d11);
        assert_eq!(pp.texture_type, TextureType::Grid);
        assert!(!pp.texture_generated_on_gpu);
        assert!(pp.texture_enabled);
        assert!(pp.grayscale);
        assert_eq!(pp.cluster_size, 3);
        assert_eq!(pp.outline_strength, 0.25);
        assert!(!state.general.vst_enabled);
        assert!(pp.is_active());
    }

    #[test]
    fn test_invalid_cluster_size_rejected() {
        let cli = Cli::try_parse_from(["vst-postprocess", "--cluster-size", "0"]).unwrap();
        let mut state = AppState::default();
        assert!(cli.apply(&mut state).is_err());
    }

    #[test]
    fn test_rejected_overrides_leave_state_untouched() {
        let cli = Cli::try_parse_from([
            "vst-postprocess",
            "--post-process",
            "--grayscale",
            "--no-vst",
            "--cluster-size",
            "0",
        ])
        .unwrap();
        let mut state = AppState::default();
        state.post_process.cluster_size = 4;
        let before = state.clone();

        assert!(cli.apply(&mut state).is_err());
        assert_eq!(state, before);
    }

    #[test]
    fn test_zero_fps_rejected() {
        assert!(Cli::try_parse_from(["vst-postprocess", "--fps", "0"]).is_err());
    }

    #[cfg(not(feature = "headless"))]
    #[test]
    fn test_vr_flag() {
        let cli = Cli::try_parse_from(["vst-postprocess", "--vr"]).unwrap();
        let mut state = AppState::default();
        cli.apply(&mut state).unwrap();
        assert!(state.general.vr_enabled);
    }

    #[cfg(feature = "headless")]
    #[test]
    fn test_vr_flag_unavailable() {
        assert!(Cli::try_parse_from(["vst-postprocess", "--vr"]).is_err());
    }
}
