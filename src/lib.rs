#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::too_many_arguments)]

//! Shader-variant resolution, two-phase material binding and skinning
//! palettes for a skeletal mesh renderer.
//!
//! A [`MaterialInstance`] holds the capability [`AttributeSet`] of one
//! renderable, lazily compiles the matching shader variant through a
//! [`ShaderCompiler`], binds frame-wide and per-material state through a
//! [`ProgramBinder`], and draws primitives with their bone palette.

pub mod errors;
pub mod renderer;
pub mod resources;
pub mod scene;
pub mod utils;

pub use errors::{MaterialError, Result};
pub use renderer::{
    BindPhases, FrameContext, GraphicsDevice, MaterialConfig, MaterialInstance, MaterialState,
    ProgramBinder, ProgramHandle, RenderSettings, ShaderCompiler, ShaderVariant,
    ShaderVariantCache, SharedVariantCache,
};
pub use resources::{
    Attribute, AttributeSet, LayerKind, MaterialAsset, StandardMaterialAsset, TextureBinding,
    TextureHandle, TextureService,
};
pub use scene::{CameraState, PoseSource, Primitive, SkeletonPose};
