//! Texture Handles and the Texture Service Seam
//!
//! Texture loading and caching live outside this crate. The material only sees
//! opaque [`TextureHandle`]s handed out by an injected [`TextureService`], which
//! also owns the engine-wide fallback textures.

use std::path::Path;

/// Opaque handle to a texture owned by the texture service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextureHandle(pub u32);

/// External texture loader and cache.
pub trait TextureService {
    /// Loads (or fetches from cache) the texture at `path`. `None` on failure.
    fn load_texture(&mut self, path: &Path) -> Option<TextureHandle>;

    /// Plain white texture, the fallback for diffuse and specular maps.
    fn white_texture(&self) -> TextureHandle;

    /// Flat tangent-space normal texture, the fallback for normal maps.
    fn default_normal_texture(&self) -> TextureHandle;
}

/// The three texture slots a material binds.
///
/// Never holds an empty slot: construction fills every slot with the service's
/// fallback texture and a failed load restores it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureBinding {
    pub diffuse_map: TextureHandle,
    pub specular_map: TextureHandle,
    pub normal_map: TextureHandle,
}

impl TextureBinding {
    /// All slots set to the fallback textures of `textures`.
    #[must_use]
    pub fn fallback(textures: &(impl TextureService + ?Sized)) -> Self {
        let white = textures.white_texture();
        Self {
            diffuse_map: white,
            specular_map: white,
            normal_map: textures.default_normal_texture(),
        }
    }
}
