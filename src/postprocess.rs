//! Post-process shader selection
//!
//! Enumerates the shader sources and graphics APIs the VST post-process
//! pipeline can be driven with, plus the constant block the effect shader
//! reads every frame.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Shading language the post-process effect is supplied in.
///
/// `None` means no shader is bound and the effect is inactive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ShaderSource {
    #[default]
    None,
    /// GLSL source, run through the OpenGL path
    Glsl,
    /// HLSL source, run through the Direct3D 11 path
    Hlsl,
}

impl ShaderSource {
    /// Graphics API a shader of this kind is compiled for
    #[must_use]
    pub fn graphics_api(self) -> GraphicsApi {
        match self {
            ShaderSource::None => GraphicsApi::None,
            ShaderSource::Glsl => GraphicsApi::OpenGl,
            ShaderSource::Hlsl => GraphicsApi::D3d11,
        }
    }
}

impl fmt::Display for ShaderSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ShaderSource::None => "none",
            ShaderSource::Glsl => "glsl",
            ShaderSource::Hlsl => "hlsl",
        };
        f.write_str(name)
    }
}

/// Graphics API used to run the post-process shader
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GraphicsApi {
    #[default]
    None,
    D3d11,
    OpenGl,
}

impl fmt::Display for GraphicsApi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GraphicsApi::None => "none",
            GraphicsApi::D3d11 => "d3d11",
            GraphicsApi::OpenGl => "opengl",
        };
        f.write_str(name)
    }
}

/// Per-frame constants consumed by the post-process shader
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShaderConstants {
    pub grayscale: bool,
    pub cluster_size: i32,
    pub outline_strength: f32,
    /// Frame time in seconds, for animated effects
    pub time: f32,
    pub texture_enabled: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shader_source_maps_to_api() {
        assert_eq!(ShaderSource::None.graphics_api(), GraphicsApi::None);
        assert_eq!(ShaderSource::Glsl.graphics_api(), GraphicsApi::OpenGl);
        assert_eq!(ShaderSource::Hlsl.graphics_api(), GraphicsApi::D3d11);
    }

    #[test]
    fn test_defaults_are_none() {
        assert_eq!(ShaderSource::default(), ShaderSource::None);
        assert_eq!(GraphicsApi::default(), GraphicsApi::None);
    }

    #[test]
    fn test_graphics_api_serde() {
        #[derive(Deserialize)]
        struct Wrapper {
            v: GraphicsApi,
        }

        assert_eq!(
            toml::from_str::<Wrapper>("v = \"opengl\"").unwrap().v,
            GraphicsApi::OpenGl
        );
        assert_eq!(
            toml::from_str::<Wrapper>("v = \"d3d11\"").unwrap().v,
            GraphicsApi::D3d11
        );
        assert_eq!(
            toml::from_str::<Wrapper>("v = \"none\"").unwrap().v,
            GraphicsApi::None
        );
    }

    #[test]
    fn test_display_matches_serde_names() {
        assert_eq!(ShaderSource::Hlsl.to_string(), "hlsl");
        assert_eq!(GraphicsApi::OpenGl.to_string(), "opengl");
    }
}
