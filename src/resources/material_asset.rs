//! Material Asset Data
//!
//! The read-only material description a [`MaterialInstance`] is initialised
//! from. Families are a tagged enum rather than a type hierarchy: the binding
//! code asks for the standard family's surface properties and falls back to
//! neutral defaults for anything else.
//!
//! [`MaterialInstance`]: crate::renderer::MaterialInstance

use std::borrow::Cow;
use std::path::PathBuf;

use glam::Vec4;
use serde::{Deserialize, Serialize};

/// The kind of map a material layer carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayerKind {
    Unknown,
    Ambient,
    Diffuse,
    Specular,
    Opacity,
    Bump,
    SelfIllumination,
    Shine,
    ShineStrength,
    FilterColor,
    Reflect,
    Refract,
    Environment,
    Displacement,
    NormalMap,
}

/// One textured layer of a material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialLayer {
    pub kind: LayerKind,
    pub file_name: PathBuf,
}

impl MaterialLayer {
    pub fn new(kind: LayerKind, file_name: impl Into<PathBuf>) -> Self {
        Self {
            kind,
            file_name: file_name.into(),
        }
    }
}

/// Scalar properties and layers of the standard material family.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardMaterialAsset {
    pub name: Cow<'static, str>,
    pub diffuse: Vec4,
    pub specular: Vec4,
    pub shine: f32,
    pub shine_strength: f32,
    pub layers: Vec<MaterialLayer>,
}

impl StandardMaterialAsset {
    #[must_use]
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            diffuse: Vec4::ONE,
            specular: Vec4::ONE,
            shine: 25.0,
            shine_strength: 1.0,
            layers: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_layer(mut self, kind: LayerKind, file_name: impl Into<PathBuf>) -> Self {
        self.layers.push(MaterialLayer::new(kind, file_name));
        self
    }
}

/// A material asset of any family.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "family", rename_all = "snake_case")]
pub enum MaterialAsset {
    Standard(StandardMaterialAsset),
    /// A family this renderer has no specialised binding for.
    Other { name: Cow<'static, str> },
}

impl MaterialAsset {
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Standard(m) => &m.name,
            Self::Other { name } => name,
        }
    }

    /// The standard family's properties, if this asset belongs to it.
    #[inline]
    #[must_use]
    pub fn as_standard(&self) -> Option<&StandardMaterialAsset> {
        match self {
            Self::Standard(m) => Some(m),
            Self::Other { .. } => None,
        }
    }

    /// Ordered texture layers. Only the standard family carries any.
    #[must_use]
    pub fn layers(&self) -> &[MaterialLayer] {
        match self {
            Self::Standard(m) => &m.layers,
            Self::Other { .. } => &[],
        }
    }
}

/// Surface values the local binding phase writes, after family dispatch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceProperties {
    pub diffuse: Vec4,
    pub specular: Vec4,
    pub shine: f32,
    pub shine_strength: f32,
}

impl SurfaceProperties {
    /// Specular power used when the asset has no standard properties.
    pub const DEFAULT_SHINE: f32 = 25.0;

    /// Resolves the surface values for `asset`.
    ///
    /// The asset's diffuse color is only used when no diffuse texture was
    /// loaded (`diffuse_is_fallback`) and the asset is of the standard family.
    /// Otherwise the texture provides the color and the tint is white.
    #[must_use]
    pub fn resolve(asset: Option<&MaterialAsset>, diffuse_is_fallback: bool) -> Self {
        match asset.and_then(MaterialAsset::as_standard) {
            Some(standard) => Self {
                diffuse: if diffuse_is_fallback {
                    standard.diffuse
                } else {
                    Vec4::ONE
                },
                specular: standard.specular,
                shine: standard.shine,
                shine_strength: standard.shine_strength,
            },
            None => Self {
                diffuse: Vec4::ONE,
                specular: Vec4::ONE,
                shine: Self::DEFAULT_SHINE,
                shine_strength: 1.0,
            },
        }
    }
}
