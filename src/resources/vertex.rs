//! Vertex Layout Descriptors
//!
//! The two vertex formats a material can draw, and compile-time tables of the
//! shader attributes inside them. Offsets come from `offset_of!` on the
//! `#[repr(C)]` vertex structs, so the tables cannot drift from the data.

use std::mem::{offset_of, size_of};

use bytemuck::{Pod, Zeroable};

/// Vertex of a rigid (non-skinned) mesh.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct StandardVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub tangent: [f32; 4],
    pub uv: [f32; 2],
}

/// Vertex of a skinned mesh: the standard fields plus four bone influences.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct SkinnedVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub tangent: [f32; 4],
    pub uv: [f32; 2],
    pub weights: [f32; 4],
    /// Palette indices, stored as floats for the shader.
    pub bone_indices: [f32; 4],
}

/// Scalar type of one vertex attribute component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentType {
    Float32,
}

impl ComponentType {
    #[inline]
    #[must_use]
    pub const fn size(self) -> usize {
        match self {
            Self::Float32 => 4,
        }
    }
}

/// One shader input inside an interleaved vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VertexAttributeDesc {
    pub name: &'static str,
    pub components: u32,
    pub component_type: ComponentType,
    pub offset: usize,
}

impl VertexAttributeDesc {
    #[inline]
    #[must_use]
    pub const fn byte_size(&self) -> usize {
        self.components as usize * self.component_type.size()
    }
}

/// Stride and attribute table of an interleaved vertex format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexLayout {
    pub stride: usize,
    pub attributes: &'static [VertexAttributeDesc],
}

macro_rules! float_attribute {
    ($name:literal, $vertex:ty, $field:ident, $components:literal) => {
        VertexAttributeDesc {
            name: $name,
            components: $components,
            component_type: ComponentType::Float32,
            offset: offset_of!($vertex, $field),
        }
    };
}

const STANDARD_ATTRIBUTES: [VertexAttributeDesc; 4] = [
    float_attribute!("in_position", StandardVertex, position, 3),
    float_attribute!("in_normal", StandardVertex, normal, 3),
    float_attribute!("in_tangent", StandardVertex, tangent, 4),
    float_attribute!("in_uv", StandardVertex, uv, 2),
];

const SKINNED_ATTRIBUTES: [VertexAttributeDesc; 6] = [
    float_attribute!("in_position", SkinnedVertex, position, 3),
    float_attribute!("in_normal", SkinnedVertex, normal, 3),
    float_attribute!("in_tangent", SkinnedVertex, tangent, 4),
    float_attribute!("in_uv", SkinnedVertex, uv, 2),
    float_attribute!("in_weights", SkinnedVertex, weights, 4),
    float_attribute!("in_bone_indices", SkinnedVertex, bone_indices, 4),
];

impl VertexLayout {
    pub const STANDARD: VertexLayout = VertexLayout {
        stride: size_of::<StandardVertex>(),
        attributes: &STANDARD_ATTRIBUTES,
    };

    pub const SKINNED: VertexLayout = VertexLayout {
        stride: size_of::<SkinnedVertex>(),
        attributes: &SKINNED_ATTRIBUTES,
    };

    /// The layout implied by the skinning attribute.
    #[inline]
    #[must_use]
    pub const fn for_skinning(skinning: bool) -> Self {
        if skinning { Self::SKINNED } else { Self::STANDARD }
    }

    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&VertexAttributeDesc> {
        self.attributes.iter().find(|a| a.name == name)
    }
}
