//! Renderer Module
//!
//! Everything between an attribute set and a draw call:
//!
//! - [`backend`]: the compilation and binding seams implemented by the host
//! - [`variant_cache`]: attribute set → compiled shader variant
//! - [`binding`]: global / local / post-process uniform binding
//! - [`skinning`]: per-draw bone matrix palette
//! - [`material`]: the [`MaterialInstance`] state machine driving all of the above
//! - [`settings`]: lighting, post-process and per-family configuration

pub mod backend;
pub mod binding;
pub mod material;
pub mod settings;
pub mod skinning;
pub mod variant_cache;

pub use backend::{
    CompareFunction, DepthState, GraphicsDevice, IndexedDraw, ProgramBinder, ProgramHandle,
    ShaderCompiler, UniformValue,
};
pub use binding::{BLUR_CUTOFF, BindPhases, FrameContext, MaterialBinder, uniform_names};
pub use material::{MaterialInstance, MaterialState};
pub use settings::{MaterialConfig, RenderSettings};
pub use skinning::{SkinningPalette, skinning_matrix};
pub use variant_cache::{SharedVariantCache, ShaderVariant, ShaderVariantCache, VariantId};
