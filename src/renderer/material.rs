//! Material Instance
//!
//! Ties together the attribute set, the shader variant cache, the binding
//! protocol and the skinning palette, and drives them per draw:
//!
//! ```text
//! Uninitialized ──init──► Initialized ──activate (variant resolved)──► Active
//!                              ▲   ▲                                    │
//!                              │   └──── activate (no variant) ─────────┤
//!                              └──────────── deactivate ────────────────┘
//! ```
//!
//! Per frame the caller runs `activate`, then `render` once per primitive
//! sharing the material, then `deactivate`. Every operation is synchronous and
//! must be called from the rendering thread that owns the instance.

use std::sync::Arc;

use glam::Mat4;
use log::{debug, error, warn};

use crate::errors::Result;
use crate::renderer::backend::{
    DepthState, GraphicsDevice, IndexedDraw, ProgramBinder, ShaderCompiler, UniformValue,
};
use crate::renderer::binding::{BindPhases, FrameContext, MaterialBinder, uniform_names};
use crate::renderer::settings::MaterialConfig;
use crate::renderer::skinning::SkinningPalette;
use crate::renderer::variant_cache::{ShaderVariant, ShaderVariantCache, SharedVariantCache};
use crate::resources::{
    Attribute, AttributeSet, LayerKind, MaterialAsset, MaterialLayer, SurfaceProperties,
    TextureBinding, TextureHandle, TextureService,
};
use crate::scene::{CameraState, PoseSource, Primitive};

/// Lifecycle state of a [`MaterialInstance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MaterialState {
    /// Created, no asset bound yet.
    Uninitialized,
    /// Asset bound; no variant is bound for drawing.
    Initialized,
    /// A variant is resolved and its state bound; `render` draws.
    Active,
}

/// A material bound to one renderable.
#[derive(Debug)]
pub struct MaterialInstance {
    config: MaterialConfig,
    attributes: AttributeSet,
    /// Raised by attribute changes, cleared after each resolution attempt.
    needs_resolve: bool,
    cache: SharedVariantCache,
    active: Option<Arc<ShaderVariant>>,
    textures: TextureBinding,
    white_texture: TextureHandle,
    normal_texture: TextureHandle,
    asset: Option<Arc<MaterialAsset>>,
    palette: SkinningPalette,
    state: MaterialState,
}

impl MaterialInstance {
    /// New instance with a private variant cache.
    #[must_use]
    pub fn new(config: MaterialConfig, textures: &(impl TextureService + ?Sized)) -> Self {
        let cache = ShaderVariantCache::from_config(&config).shared();
        Self::with_shared_cache(config, cache, textures)
    }

    /// New instance drawing its variants from `cache`, which other instances
    /// of the same family may also use.
    #[must_use]
    pub fn with_shared_cache(
        config: MaterialConfig,
        cache: SharedVariantCache,
        textures: &(impl TextureService + ?Sized),
    ) -> Self {
        Self {
            attributes: config.attributes,
            needs_resolve: true,
            palette: SkinningPalette::new(config.max_bones),
            config,
            cache,
            active: None,
            textures: TextureBinding::fallback(textures),
            white_texture: textures.white_texture(),
            normal_texture: textures.default_normal_texture(),
            asset: None,
            state: MaterialState::Uninitialized,
        }
    }

    // ========================================================================
    // Attributes
    // ========================================================================

    /// Sets one attribute. Only an actual change schedules a new variant lookup.
    pub fn set_attribute(&mut self, attribute: Attribute, enabled: bool) {
        if self.attributes.set(attribute, enabled) {
            self.needs_resolve = true;
        }
    }

    #[inline]
    #[must_use]
    pub fn attribute(&self, attribute: Attribute) -> bool {
        self.attributes.contains(attribute)
    }

    #[inline]
    #[must_use]
    pub fn attributes(&self) -> AttributeSet {
        self.attributes
    }

    /// Whether the next `activate` will look up the variant again.
    #[inline]
    #[must_use]
    pub fn needs_resolve(&self) -> bool {
        self.needs_resolve
    }

    /// Schedules another resolution with unchanged attributes, e.g. after a
    /// shader source was fixed following a compilation failure.
    pub fn retry_compilation(&mut self) {
        self.needs_resolve = true;
    }

    // ========================================================================
    // Initialization
    // ========================================================================

    /// Binds the material asset and loads its texture layers.
    ///
    /// Never fails: a layer whose texture cannot be loaded keeps the fallback
    /// texture, and layer kinds without a slot are ignored.
    pub fn init(&mut self, asset: Arc<MaterialAsset>, textures: &mut (impl TextureService + ?Sized)) {
        self.white_texture = textures.white_texture();
        self.normal_texture = textures.default_normal_texture();
        self.textures = TextureBinding::fallback(&*textures);

        for layer in asset.layers() {
            match layer.kind {
                LayerKind::Diffuse => {
                    self.textures.diffuse_map = self.load_layer(textures, layer, self.white_texture);
                }
                LayerKind::ShineStrength => {
                    self.textures.specular_map = self.load_layer(textures, layer, self.white_texture);
                }
                LayerKind::Bump | LayerKind::NormalMap => {
                    self.textures.normal_map = self.load_layer(textures, layer, self.normal_texture);
                }
                _ => {}
            }
        }

        debug!("Material '{}' initialized with {:?}", asset.name(), self.textures);
        self.asset = Some(asset);
        if self.state == MaterialState::Uninitialized {
            self.state = MaterialState::Initialized;
        }
    }

    fn load_layer(
        &self,
        textures: &mut (impl TextureService + ?Sized),
        layer: &MaterialLayer,
        fallback: TextureHandle,
    ) -> TextureHandle {
        let path = self.config.resolve_texture_path(&layer.file_name);
        textures.load_texture(&path).unwrap_or_else(|| {
            debug!(
                "Texture '{}' for {:?} layer failed to load, using fallback",
                path.display(),
                layer.kind
            );
            fallback
        })
    }

    /// Compiles the variants for `attribute_sets` up front, then switches the
    /// cache to runtime mode so later misses are reported.
    ///
    /// Stops at the first compilation error. Variants compiled before it stay
    /// cached and the cache still switches to runtime mode.
    pub fn prewarm(
        &self,
        attribute_sets: &[AttributeSet],
        compiler: &mut (impl ShaderCompiler + ?Sized),
    ) -> Result<()> {
        let mut cache = self.cache.lock();
        let result = attribute_sets
            .iter()
            .try_for_each(|attributes| cache.prewarm(attributes, compiler).map(drop));
        cache.finish_warmup();
        result
    }

    // ========================================================================
    // Per-frame protocol
    // ========================================================================

    /// Resolves the shader variant if attributes changed, then runs the
    /// requested binding phases and the post-process step.
    ///
    /// Without a variant (compilation failed) this is a no-op and the
    /// instance stays `Initialized`. If a binding phase fails the instance is
    /// left `Initialized` too, so nothing is drawn with a partly bound program.
    pub fn activate(
        &mut self,
        phases: BindPhases,
        device: &mut (impl GraphicsDevice + ?Sized),
        frame: &FrameContext<'_>,
    ) -> Result<()> {
        if self.state == MaterialState::Uninitialized {
            self.report_misuse("activate before init");
            return Ok(());
        }

        self.update_variant(device);
        self.state = MaterialState::Initialized;

        let Some(variant) = self.active.clone() else {
            return Ok(());
        };

        let mut binder = MaterialBinder::new(device, &variant);

        if phases.contains(BindPhases::GLOBAL) {
            let skinning = variant.is_defined(Attribute::Skinning.define_name());
            binder.bind_global(skinning, frame)?;
        }

        if phases.contains(BindPhases::LOCAL) {
            let surface = SurfaceProperties::resolve(
                self.asset.as_deref(),
                self.textures.diffuse_map == self.white_texture,
            );
            binder.bind_local(&surface, &self.textures, frame.settings)?;
        }

        binder.bind_post_process(frame.settings)?;

        self.state = MaterialState::Active;
        Ok(())
    }

    fn update_variant(&mut self, compiler: &mut (impl ShaderCompiler + ?Sized)) {
        if !self.needs_resolve {
            return;
        }

        self.active = None;
        match self.cache.lock().resolve(&self.attributes, compiler) {
            Ok(variant) => self.active = Some(variant),
            Err(e) => error!("Material variant unavailable, drawing disabled: {e}"),
        }
        self.needs_resolve = false;
    }

    /// Draws `primitive` with the active variant.
    ///
    /// Sets depth state, uploads the skinning palette when the bound variant
    /// was compiled with skinning, binds the world matrices and issues the
    /// indexed draw. Without an active variant nothing is drawn.
    ///
    /// Attribute changes made since `activate` take effect at the next
    /// `activate`; until then the bound variant decides.
    pub fn render(
        &mut self,
        primitive: &Primitive,
        pose: &(impl PoseSource + ?Sized),
        device: &mut (impl ProgramBinder + ?Sized),
        camera: &CameraState,
    ) -> Result<()> {
        if self.state != MaterialState::Active {
            self.report_misuse("render without an active shader variant");
            return Ok(());
        }
        let Some(variant) = self.active.as_ref() else {
            return Ok(());
        };
        let program = variant.program();
        let skinning = variant.is_defined(Attribute::Skinning.define_name());
        let index_count = primitive.index_count()?;

        device.set_depth_state(DepthState::OPAQUE)?;

        if skinning {
            let palette = self.palette.compute(primitive, pose)?;
            device.set_uniform_matrices(program, uniform_names::BONE_MATRICES, palette)?;
        }

        let world = Mat4::from(pose.global_transform(primitive.node_index)?);
        let world_inverse_transpose = world.inverse().transpose();
        let world_view = camera.view_matrix() * world;
        let world_view_projection = camera.view_projection_matrix() * world;

        device.set_uniform(program, uniform_names::WORLD, UniformValue::Mat4(world))?;
        device.set_uniform(
            program,
            uniform_names::WORLD_INVERSE_TRANSPOSE,
            UniformValue::Mat4(world_inverse_transpose),
        )?;
        device.set_uniform(program, uniform_names::WORLD_VIEW, UniformValue::Mat4(world_view))?;
        device.set_uniform(
            program,
            uniform_names::WORLD_VIEW_PROJECTION,
            UniformValue::Mat4(world_view_projection),
        )?;

        device.draw_indexed(IndexedDraw {
            first_index: primitive.index_offset,
            index_count,
        })
    }

    /// Releases the program bound by `activate`. No-op when nothing is active.
    pub fn deactivate(&mut self, device: &mut (impl ProgramBinder + ?Sized)) -> Result<()> {
        if self.state != MaterialState::Active {
            return Ok(());
        }
        if let Some(variant) = &self.active {
            device.release_program(variant.program())?;
        }
        self.state = MaterialState::Initialized;
        Ok(())
    }

    fn report_misuse(&self, what: &str) {
        if cfg!(debug_assertions) {
            warn!("Material misuse: {what} (state {:?})", self.state);
        } else {
            debug!("Material misuse: {what} (state {:?})", self.state);
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    #[inline]
    #[must_use]
    pub fn state(&self) -> MaterialState {
        self.state
    }

    /// The variant the last resolution produced, if any.
    #[inline]
    #[must_use]
    pub fn active_variant(&self) -> Option<&Arc<ShaderVariant>> {
        self.active.as_ref()
    }

    #[inline]
    #[must_use]
    pub fn textures(&self) -> &TextureBinding {
        &self.textures
    }

    #[inline]
    #[must_use]
    pub fn asset(&self) -> Option<&Arc<MaterialAsset>> {
        self.asset.as_ref()
    }

    #[inline]
    #[must_use]
    pub fn config(&self) -> &MaterialConfig {
        &self.config
    }

    /// Handle to the variant cache, for sharing it with another instance.
    #[must_use]
    pub fn variant_cache(&self) -> SharedVariantCache {
        Arc::clone(&self.cache)
    }
}
