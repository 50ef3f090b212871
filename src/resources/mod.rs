//! Core Resource Definitions
//!
//! Plain data consumed by the renderer, with no dependency on a graphics API:
//! - Attributes: shader capability flags
//! - Shader defines: the exact define set of a compiled variant
//! - Textures: handles and the texture service seam
//! - Material assets: per-family properties and texture layers
//! - Vertex layouts: standard and skinned vertex formats

pub mod attributes;
pub mod material_asset;
pub mod shader_defines;
pub mod texture;
pub mod vertex;

pub use attributes::{Attribute, AttributeSet};
pub use material_asset::{
    LayerKind, MaterialAsset, MaterialLayer, StandardMaterialAsset, SurfaceProperties,
};
pub use shader_defines::ShaderDefines;
pub use texture::{TextureBinding, TextureHandle, TextureService};
pub use vertex::{
    ComponentType, SkinnedVertex, StandardVertex, VertexAttributeDesc, VertexLayout,
};
