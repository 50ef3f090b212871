//! Material Binding Protocol
//!
//! Binding is split into two independently requested phases plus one step that
//! always runs:
//!
//! | Phase          | Scope      | Writes                                                   |
//! |----------------|------------|----------------------------------------------------------|
//! | `GLOBAL`       | per frame  | program, vertex layout, camera matrices, light params    |
//! | `LOCAL`        | per material | texture maps, diffuse tint, specular color and power   |
//! | post-process   | always     | bloom threshold, depth-of-field planes, blur cutoff      |
//!
//! A caller binding many materials in one frame may request `GLOBAL` once and
//! `LOCAL` for each material. Global state must be bound before local state.

use bitflags::bitflags;

use crate::errors::Result;
use crate::renderer::backend::{ProgramBinder, UniformValue};
use crate::renderer::settings::RenderSettings;
use crate::renderer::variant_cache::ShaderVariant;
use crate::resources::{SurfaceProperties, TextureBinding, VertexLayout};
use crate::scene::CameraState;

bitflags! {
    /// Which binding phases an activation runs.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct BindPhases: u32 {
        const GLOBAL = 1 << 0;
        const LOCAL  = 1 << 1;
    }
}

/// Uniform names shared with the material shaders.
pub mod uniform_names {
    pub const VIEW_PROJECTION: &str = "mat_view_proj";
    pub const VIEW: &str = "mat_view";
    pub const MAIN_LIGHT_DIR: &str = "main_light_dir";
    pub const SKY_COLOR: &str = "sky_color";
    pub const GROUND_COLOR: &str = "ground_color";
    pub const EYE_POINT: &str = "eye_point";
    pub const RIM_LIGHT_DIR: &str = "rim_light_dir";
    pub const RIM_LIGHT_FACTOR: &str = "rim_light_factor";
    pub const RIM_WIDTH: &str = "rim_width";
    pub const RIM_LIGHT_COLOR: &str = "rim_light_color";

    pub const DIFFUSE_COLOR: &str = "diffuse_color";
    pub const SPECULAR_POWER: &str = "specular_power";
    pub const LIGHT_SPECULAR: &str = "light_specular";
    pub const DIFFUSE_MAP: &str = "diffuse_map";
    pub const SPECULAR_MAP: &str = "specular_map";
    pub const NORMAL_MAP: &str = "normal_map";

    pub const GLOW_THRESHOLD: &str = "glow_threshold";
    pub const FOCAL_PLANE_DEPTH: &str = "focal_plane_depth";
    pub const NEAR_PLANE_DEPTH: &str = "near_plane_depth";
    pub const FAR_PLANE_DEPTH: &str = "far_plane_depth";
    pub const BLUR_CUTOFF: &str = "blur_cutoff";

    pub const BONE_MATRICES: &str = "mat_bones";
    pub const WORLD: &str = "mat_world";
    pub const WORLD_INVERSE_TRANSPOSE: &str = "mat_world_it";
    pub const WORLD_VIEW: &str = "mat_world_view";
    pub const WORLD_VIEW_PROJECTION: &str = "mat_world_view_proj";
}

/// Blur cutoff written with the post-process parameters.
pub const BLUR_CUTOFF: f32 = 1.0;

/// Frame-wide inputs of the global phase.
#[derive(Debug, Clone, Copy)]
pub struct FrameContext<'a> {
    pub camera: &'a CameraState,
    pub settings: &'a RenderSettings,
}

impl<'a> FrameContext<'a> {
    #[must_use]
    pub fn new(camera: &'a CameraState, settings: &'a RenderSettings) -> Self {
        Self { camera, settings }
    }
}

/// Writes uniforms of one variant through a [`ProgramBinder`].
pub struct MaterialBinder<'a, B: ProgramBinder + ?Sized> {
    backend: &'a mut B,
    variant: &'a ShaderVariant,
}

impl<'a, B: ProgramBinder + ?Sized> MaterialBinder<'a, B> {
    pub fn new(backend: &'a mut B, variant: &'a ShaderVariant) -> Self {
        Self { backend, variant }
    }

    #[inline]
    fn uniform(&mut self, name: &str, value: impl Into<UniformValue>) -> Result<()> {
        self.backend
            .set_uniform(self.variant.program(), name, value.into())
    }

    /// Activates the program and binds vertex layout, camera and lighting.
    pub fn bind_global(&mut self, skinning: bool, frame: &FrameContext<'_>) -> Result<()> {
        use uniform_names as u;

        let program = self.variant.program();
        self.backend.use_program(program)?;

        let layout = VertexLayout::for_skinning(skinning);
        for attribute in layout.attributes {
            self.backend
                .set_vertex_attribute(program, attribute, layout.stride)?;
        }

        let camera = frame.camera;
        let settings = frame.settings;
        self.uniform(u::VIEW_PROJECTION, camera.view_projection_matrix())?;
        self.uniform(u::VIEW, camera.view_matrix())?;

        self.uniform(u::MAIN_LIGHT_DIR, settings.main_light_direction())?;
        self.uniform(u::SKY_COLOR, settings.lit_sky_color())?;
        self.uniform(u::GROUND_COLOR, settings.ground_color)?;
        self.uniform(u::EYE_POINT, camera.position())?;

        self.uniform(
            u::RIM_LIGHT_DIR,
            settings.rim_light_direction(camera.view_up()),
        )?;
        self.uniform(u::RIM_LIGHT_FACTOR, settings.rim_intensity)?;
        self.uniform(u::RIM_WIDTH, settings.rim_width)?;
        self.uniform(u::RIM_LIGHT_COLOR, settings.rim_color)
    }

    /// Binds the material's textures and surface colors.
    pub fn bind_local(
        &mut self,
        surface: &SurfaceProperties,
        textures: &TextureBinding,
        settings: &RenderSettings,
    ) -> Result<()> {
        use uniform_names as u;

        let specular = surface.specular
            * (surface.shine_strength * settings.main_light_intensity * settings.specular_intensity);

        self.uniform(u::DIFFUSE_COLOR, surface.diffuse)?;
        self.uniform(u::SPECULAR_POWER, surface.shine)?;
        self.uniform(u::LIGHT_SPECULAR, specular)?;
        self.uniform(u::NORMAL_MAP, textures.normal_map)?;
        self.uniform(u::DIFFUSE_MAP, textures.diffuse_map)?;
        self.uniform(u::SPECULAR_MAP, textures.specular_map)
    }

    /// Binds the renderer-wide post-process parameters.
    pub fn bind_post_process(&mut self, settings: &RenderSettings) -> Result<()> {
        use uniform_names as u;

        self.uniform(u::GLOW_THRESHOLD, settings.bloom_threshold)?;
        self.uniform(u::FOCAL_PLANE_DEPTH, settings.dof_focal_distance)?;
        self.uniform(u::NEAR_PLANE_DEPTH, settings.dof_near)?;
        self.uniform(u::FAR_PLANE_DEPTH, settings.dof_far)?;
        self.uniform(u::BLUR_CUTOFF, BLUR_CUTOFF)
    }
}
