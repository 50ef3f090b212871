//! Graphics Backend Seams
//!
//! The material never talks to a graphics API directly. Shader compilation goes
//! through [`ShaderCompiler`], and every state change or draw goes through
//! [`ProgramBinder`]. Both are implemented by the host renderer.

use glam::{Mat4, Vec3, Vec4};

use crate::errors::Result;
use crate::resources::{TextureHandle, VertexAttributeDesc};

/// Opaque handle of a compiled and linked shader program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProgramHandle(pub u32);

/// A single uniform value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UniformValue {
    Float(f32),
    Vec3(Vec3),
    /// RGBA colors and other four-component values.
    Vec4(Vec4),
    Mat4(Mat4),
    Texture(TextureHandle),
}

impl From<f32> for UniformValue {
    fn from(v: f32) -> Self {
        Self::Float(v)
    }
}

impl From<Vec3> for UniformValue {
    fn from(v: Vec3) -> Self {
        Self::Vec3(v)
    }
}

impl From<Vec4> for UniformValue {
    fn from(v: Vec4) -> Self {
        Self::Vec4(v)
    }
}

impl From<Mat4> for UniformValue {
    fn from(v: Mat4) -> Self {
        Self::Mat4(v)
    }
}

impl From<TextureHandle> for UniformValue {
    fn from(v: TextureHandle) -> Self {
        Self::Texture(v)
    }
}

/// Depth comparison used by the depth test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompareFunction {
    Less,
    LessEqual,
    Always,
}

/// Fixed-function state applied before each material draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DepthState {
    pub depth_test: bool,
    pub depth_compare: CompareFunction,
    pub depth_write: bool,
    /// RGBA write mask.
    pub color_mask: [bool; 4],
}

impl DepthState {
    /// Opaque geometry: test with `<=`, write depth, write all channels.
    pub const OPAQUE: DepthState = DepthState {
        depth_test: true,
        depth_compare: CompareFunction::LessEqual,
        depth_write: true,
        color_mask: [true; 4],
    };
}

/// An indexed triangle-list draw from 32-bit indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IndexedDraw {
    pub first_index: u32,
    pub index_count: u32,
}

impl IndexedDraw {
    /// Byte offset of the first index inside the index buffer.
    #[inline]
    #[must_use]
    pub const fn byte_offset(&self) -> u64 {
        self.first_index as u64 * size_of::<u32>() as u64
    }
}

/// External shader compilation service.
pub trait ShaderCompiler {
    /// Compiles and links `vertex` + `pixel` with the given defines.
    ///
    /// Failures are reported as [`MaterialError::ShaderCompilation`].
    ///
    /// [`MaterialError::ShaderCompilation`]: crate::errors::MaterialError::ShaderCompilation
    fn compile(&mut self, vertex: &str, pixel: &str, defines: &[&str]) -> Result<ProgramHandle>;
}

/// External binding layer: program activation, attribute and uniform writes,
/// fixed-function state and draws. Any error is fatal to the caller.
pub trait ProgramBinder {
    fn use_program(&mut self, program: ProgramHandle) -> Result<()>;

    fn release_program(&mut self, program: ProgramHandle) -> Result<()>;

    fn set_vertex_attribute(
        &mut self,
        program: ProgramHandle,
        attribute: &VertexAttributeDesc,
        stride: usize,
    ) -> Result<()>;

    fn set_uniform(&mut self, program: ProgramHandle, name: &str, value: UniformValue)
    -> Result<()>;

    /// Uploads a matrix array sized exactly to `values.len()`.
    fn set_uniform_matrices(
        &mut self,
        program: ProgramHandle,
        name: &str,
        values: &[Mat4],
    ) -> Result<()>;

    fn set_depth_state(&mut self, state: DepthState) -> Result<()>;

    fn draw_indexed(&mut self, draw: IndexedDraw) -> Result<()>;
}

/// Convenience bound for a backend that does both.
pub trait GraphicsDevice: ShaderCompiler + ProgramBinder {}

impl<T: ShaderCompiler + ProgramBinder + ?Sized> GraphicsDevice for T {}
