//! Headless Frame Loop
//!
//! Drives [`AppState`] the way the rendering loop does: one `begin_frame`
//! per display refresh, followed by the post-process step when the effect
//! is active. Time advances in fixed steps so runs are reproducible.

use crate::app::state::AppState;
use crate::error::Result;
use crate::postprocess::ShaderConstants;
use crate::test_texture::{TestTexture, TextureType};

/// Frame loop parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameLoopConfig {
    /// Simulated refresh rate; must be non-zero
    pub fps: u32,
    /// Number of frames [`FrameLoop::run`] simulates
    pub max_frames: u64,
    /// Side length of CPU-generated test textures
    pub texture_size: u32,
    /// Whether a mixed-reality headset is attached; the headless driver
    /// has none
    pub mr_available: bool,
}

impl Default for FrameLoopConfig {
    fn default() -> Self {
        Self {
            fps: 90,
            max_frames: 300,
            texture_size: 256,
            mr_available: false,
        }
    }
}

/// Result of a single frame
#[derive(Debug, Clone, PartialEq)]
pub struct FrameOutput {
    pub frame: i64,
    pub frame_time: f64,
    /// Shader constants, present when the effect ran this frame
    pub constants: Option<ShaderConstants>,
    /// Whether the CPU test texture was (re)generated this frame
    pub texture_generated: bool,
}

/// Totals over a [`FrameLoop::run`]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameSummary {
    pub frames: u64,
    pub processed_frames: u64,
    pub textures_generated: u64,
    pub elapsed: f64,
}

/// Main frame runner
pub struct FrameLoop {
    state: AppState,
    config: FrameLoopConfig,
    texture: Option<TestTexture>,
}

impl FrameLoop {
    /// Create a new frame loop around the initial state
    #[must_use]
    pub fn new(mut state: AppState, config: FrameLoopConfig) -> Self {
        state.general.set_mr_available(config.mr_available);
        Self {
            state,
            config,
            texture: None,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut AppState {
        &mut self.state
    }

    /// Most recent CPU test texture, if one was generated
    pub fn texture(&self) -> Option<&TestTexture> {
        self.texture.as_ref()
    }

    /// Advance by one frame
    pub fn tick(&mut self) -> Result<FrameOutput> {
        let next = self.state.general.frame_count + 1;
        let _span = tracing::trace_span!("frame", frame = next).entered();
        let frame_time = next as f64 / f64::from(self.config.fps.max(1));
        self.state.general.begin_frame(frame_time);

        let frame = self.state.general.frame_count;
        let pp = &self.state.post_process;

        // Nothing to post-process without a VST image
        if !self.state.general.vst_enabled || !pp.is_active() {
            return Ok(FrameOutput {
                frame,
                frame_time,
                constants: None,
                texture_generated: false,
            });
        }

        let mut texture_generated = false;
        if pp.uses_cpu_texture() {
            let stale = match &self.texture {
                Some(tex) => tex.kind != pp.texture_type || tex.kind == TextureType::Noise,
                None => true,
            };
            if stale {
                let size = self.config.texture_size;
                self.texture = Some(TestTexture::generate(pp.texture_type, size, size, frame)?);
                texture_generated = true;
            }
        } else {
            self.texture = None;
        }

        Ok(FrameOutput {
            frame,
            frame_time,
            constants: Some(pp.constants(frame_time)),
            texture_generated,
        })
    }

    /// Run `max_frames` frames and return the totals
    pub fn run(&mut self) -> Result<FrameSummary> {
        let _span =
            tracing::info_span!("frame_loop", fps = self.config.fps, frames = self.config.max_frames)
                .entered();
        let pp = &self.state.post_process;
        tracing::info!(
            post_process = pp.is_active(),
            shader = %pp.shader_source,
            graphics_api = %pp.graphics_api,
            vst = self.state.general.vst_enabled,
            vr = self.state.general.renders_vr(),
            headless = AppState::is_headless(),
            "Frame loop started"
        );

        let mut summary = FrameSummary::default();
        for _ in 0..self.config.max_frames {
            let output = self.tick()?;
            summary.frames += 1;
            summary.elapsed = output.frame_time;
            if output.constants.is_some() {
                summary.processed_frames += 1;
            }
            if output.texture_generated {
                summary.textures_generated += 1;
            }
        }

        tracing::info!(
            frames = summary.frames,
            processed = summary.processed_frames,
            textures = summary.textures_generated,
            elapsed = summary.elapsed,
            "Frame loop finished"
        );

        Ok(summary)
    }
}
