//! Application State
//!
//! Runtime configuration and per-frame counters shared by the frame loop,
//! the post-process renderer and the command line.

use crate::error::{ConfigError, ConfigResult};
use crate::postprocess::{GraphicsApi, ShaderConstants, ShaderSource};
use crate::test_texture::TextureType;
use serde::{Deserialize, Serialize};

/// Main application state
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AppState {
    /// Frame bookkeeping and feature flags
    #[serde(default)]
    pub general: General,

    /// VST post-process parameters
    #[serde(default)]
    pub post_process: PostProcess,
}

/// Per-session and per-frame bookkeeping
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct General {
    /// Current frame time in seconds
    pub frame_time: f64,
    /// Current frame count
    pub frame_count: i64,
    /// Mixed reality available flag
    pub mr_available: bool,
    /// Render VST image flag
    pub vst_enabled: bool,
    /// Render VR scene flag
    #[cfg(not(feature = "headless"))]
    pub vr_enabled: bool,
}

impl Default for General {
    fn default() -> Self {
        Self {
            frame_time: 0.0,
            frame_count: 0,
            mr_available: false,
            vst_enabled: true,
            #[cfg(not(feature = "headless"))]
            vr_enabled: false,
        }
    }
}

impl General {
    /// Record the start of a new frame
    pub fn begin_frame(&mut self, frame_time: f64) {
        self.frame_time = frame_time;
        self.frame_count += 1;
        tracing::trace!(
            frame = self.frame_count,
            frame_time = self.frame_time,
            "Frame started"
        );
    }

    /// Whether a VR scene is rendered on top of the VST feed
    #[must_use]
    pub fn renders_vr(&self) -> bool {
        #[cfg(not(feature = "headless"))]
        {
            self.vr_enabled
        }
        #[cfg(feature = "headless")]
        {
            false
        }
    }

    /// Update MR availability, logging only when it changes
    pub fn set_mr_available(&mut self, available: bool) {
        if self.mr_available != available {
            tracing::info!(available, "Mixed reality availability changed");
            self.mr_available = available;
        }
    }
}

/// VST post-process parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PostProcess {
    pub enabled: bool,
    pub shader_source: ShaderSource,
    pub graphics_api: GraphicsApi,
    pub texture_type: TextureType,

    // Texture params
    pub texture_enabled: bool,
    pub texture_generated_on_gpu: bool,

    pub grayscale: bool,
    pub cluster_size: i32,
    pub outline_strength: f32,
}

impl Default for PostProcess {
    fn default() -> Self {
        Self {
            enabled: false,
            shader_source: ShaderSource::None,
            graphics_api: GraphicsApi::None,
            texture_type: TextureType::Noise,
            texture_enabled: true,
            texture_generated_on_gpu: true,
            grayscale: false,
            cluster_size: 10,
            outline_strength: 1.0,
        }
    }
}

impl PostProcess {
    /// Whether the effect should run this frame
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.enabled
            && self.shader_source != ShaderSource::None
            && self.graphics_api != GraphicsApi::None
    }

    /// Select a shader source together with the API it targets
    pub fn select_shader(&mut self, source: ShaderSource) {
        let api = source.graphics_api();
        tracing::debug!(
            from = %self.shader_source,
            to = %source,
            graphics_api = %api,
            "Selecting post-process shader"
        );
        self.shader_source = source;
        self.graphics_api = api;
    }

    /// Whether the test texture must be filled on the CPU
    #[must_use]
    pub fn uses_cpu_texture(&self) -> bool {
        self.texture_enabled && !self.texture_generated_on_gpu
    }

    /// Constants handed to the shader for the current frame
    #[must_use]
    pub fn constants(&self, frame_time: f64) -> ShaderConstants {
        ShaderConstants {
            grayscale: self.grayscale,
            cluster_size: self.cluster_size,
            outline_strength: self.outline_strength,
            time: frame_time as f32,
            texture_enabled: self.texture_enabled,
        }
    }

    /// Check parameter ranges and shader/API consistency
    pub fn validate(&self) -> ConfigResult<()> {
        if self.cluster_size < 1 {
            return Err(ConfigError::Invalid {
                field: "post_process.cluster_size",
                reason: format!("must be at least 1 (got {})", self.cluster_size),
            });
        }

        if !self.outline_strength.is_finite() || self.outline_strength < 0.0 {
            return Err(ConfigError::Invalid {
                field: "post_process.outline_strength",
                reason: format!(
                    "must be a finite, non-negative number (got {})",
                    self.outline_strength
                ),
            });
        }

        if self.shader_source != ShaderSource::None
            && self.shader_source.graphics_api() != self.graphics_api
        {
            return Err(ConfigError::Invalid {
                field: "post_process.graphics_api",
                reason: format!(
                    "{} shaders require {} (got {})",
                    self.shader_source,
                    self.shader_source.graphics_api(),
                    self.graphics_api
                ),
            });
        }

        Ok(())
    }
}

impl AppState {
    /// Whether this build only alters the VST feed
    #[must_use]
    pub const fn is_headless() -> bool {
        cfg!(feature = "headless")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state() {
        let state = AppState::default();

        assert_eq!(state.general.frame_time, 0.0);
        assert_eq!(state.general.frame_count, 0);
        assert!(!state.general.mr_available);
        assert!(state.general.vst_enabled);
        #[cfg(not(feature = "headless"))]
        assert!(!state.general.vr_enabled);

        let pp = &state.post_process;
        assert!(!pp.enabled);
        assert_eq!(pp.shader_source, ShaderSource::None);
        assert_eq!(pp.graphics_api, GraphicsApi::None);
        assert_eq!(pp.texture_type, TextureType::Noise);
        assert!(pp.texture_enabled);
        assert!(pp.texture_generated_on_gpu);
        assert!(!pp.grayscale);
        assert_eq!(pp.cluster_size, 10);
        assert_eq!(pp.outline_strength, 1.0);
    }

    #[test]
    fn test_begin_frame_counts() {
        let mut general = General::default();
        general.begin_frame(0.011);
        general.begin_frame(0.022);
        general.begin_frame(0.033);

        assert_eq!(general.frame_count, 3);
        assert_eq!(general.frame_time, 0.033);
    }

    #[test]
    fn test_renders_vr() {
        let general = General::default();
        assert!(!general.renders_vr());

        #[cfg(not(feature = "headless"))]
        {
            let general = General {
                vr_enabled: true,
                ..General::default()
            };
            assert!(general.renders_vr());
        }
    }

    #[test]
    fn test_is_active_requires_shader_and_api() {
        let mut pp = PostProcess::default();
        assert!(!pp.is_active());

        pp.enabled = true;
        assert!(!pp.is_active());

        pp.select_shader(ShaderSource::Glsl);
        assert_eq!(pp.graphics_api, GraphicsApi::OpenGl);
        assert!(pp.is_active());

        pp.enabled = false;
        assert!(!pp.is_active());

        pp.enabled = true;
        pp.select_shader(ShaderSource::None);
        assert_eq!(pp.graphics_api, GraphicsApi::None);
        assert!(!pp.is_active());
    }

    #[test]
    fn test_cpu_texture_mode() {
        let mut pp = PostProcess::default();
        assert!(!pp.uses_cpu_texture());

        pp.texture_generated_on_gpu = false;
        assert!(pp.uses_cpu_texture());

        pp.texture_enabled = false;
        assert!(!pp.uses_cpu_texture());
    }

    #[test]
    fn test_constants_snapshot() {
        let pp = PostProcess {
            grayscale: true,
            cluster_size: 4,
            outline_strength: 0.5,
            ..PostProcess::default()
        };
        let c = pp.constants(2.5);
        assert!(c.grayscale);
        assert_eq!(c.cluster_size, 4);
        assert_eq!(c.outline_strength, 0.5);
        assert_eq!(c.time, 2.5);
        assert!(c.texture_enabled);
    }

    #[test]
    fn test_validate() {
        assert!(PostProcess::default().validate().is_ok());

        let pp = PostProcess {
            cluster_size: 0,
            ..PostProcess::default()
        };
        assert!(matches!(
            pp.validate(),
            Err(ConfigError::Invalid {
                field: "post_process.cluster_size",
                ..
            })
        ));

        let pp = PostProcess {
            outline_strength: f32::NAN,
            ..PostProcess::default()
        };
        assert!(pp.validate().is_err());

        let pp = PostProcess {
            shader_source: ShaderSource::Hlsl,
            graphics_api: GraphicsApi::OpenGl,
            ..PostProcess::default()
        };
        assert!(matches!(
            pp.validate(),
            Err(ConfigError::Invalid {
                field: "post_process.graphics_api",
                ..
            })
        ));
    }

    #[test]
    fn test_mr_availability_change() {
        let mut general = General::default();
        general.set_mr_available(true);
        assert!(general.mr_available);
        general.set_mr_available(false);
        assert!(!general.mr_available);
    }

    #[test]
    fn test_headless_flag() {
        assert_eq!(AppState::is_headless(), cfg!(feature = "headless"));
    }
}
