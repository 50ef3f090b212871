//! Shared test doubles: a recording graphics device and an in-memory texture
//! service.

#![allow(dead_code)]

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use glam::Mat4;

use actor_material::errors::{MaterialError, Result};
use actor_material::renderer::{
    DepthState, IndexedDraw, ProgramBinder, ProgramHandle, ShaderCompiler, UniformValue,
};
use actor_material::resources::{TextureHandle, TextureService, VertexAttributeDesc};

pub const EPSILON: f32 = 1e-5;

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

// ============================================================================
// RecordingDevice
// ============================================================================

/// One call made against the device, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    UseProgram(ProgramHandle),
    ReleaseProgram(ProgramHandle),
    VertexAttribute {
        program: ProgramHandle,
        name: &'static str,
        offset: usize,
        stride: usize,
    },
    Uniform {
        program: ProgramHandle,
        name: String,
        value: UniformValue,
    },
    UniformMatrices {
        program: ProgramHandle,
        name: String,
        values: Vec<Mat4>,
    },
    DepthState(DepthState),
    Draw(IndexedDraw),
}

#[derive(Debug, Default)]
pub struct RecordingDevice {
    /// Define lists of every compile request, successful or not.
    pub compilations: Vec<Vec<String>>,
    pub shader_sources: Vec<(String, String)>,
    pub fail_compilation: bool,
    /// Makes every uniform write fail.
    pub fail_uniforms: bool,
    pub commands: Vec<Command>,
    next_program: u32,
}

impl RecordingDevice {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail_compilation: true,
            ..Self::default()
        }
    }

    pub fn compile_count(&self) -> usize {
        self.compilations.len()
    }

    pub fn draw_count(&self) -> usize {
        self.draws().len()
    }

    pub fn draws(&self) -> Vec<IndexedDraw> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                Command::Draw(d) => Some(*d),
                _ => None,
            })
            .collect()
    }

    /// Last value written to the uniform `name`.
    pub fn uniform(&self, name: &str) -> Option<UniformValue> {
        self.commands.iter().rev().find_map(|c| match c {
            Command::Uniform { name: n, value, .. } if n == name => Some(*value),
            _ => None,
        })
    }

    pub fn uniform_matrices(&self, name: &str) -> Option<Vec<Mat4>> {
        self.commands.iter().rev().find_map(|c| match c {
            Command::UniformMatrices { name: n, values, .. } if n == name => Some(values.clone()),
            _ => None,
        })
    }

    pub fn vertex_attributes(&self) -> Vec<(&'static str, usize, usize)> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                Command::VertexAttribute {
                    name,
                    offset,
                    stride,
                    ..
                } => Some((*name, *offset, *stride)),
                _ => None,
            })
            .collect()
    }

    /// Position of the first command matching `pred`.
    pub fn position(&self, pred: impl Fn(&Command) -> bool) -> Option<usize> {
        self.commands.iter().position(pred)
    }

    pub fn clear_commands(&mut self) {
        self.commands.clear();
    }
}

impl ShaderCompiler for RecordingDevice {
    fn compile(&mut self, vertex: &str, pixel: &str, defines: &[&str]) -> Result<ProgramHandle> {
        let defines: Vec<String> = defines.iter().map(|d| (*d).to_string()).collect();
        self.compilations.push(defines.clone());
        self.shader_sources
            .push((vertex.to_string(), pixel.to_string()));

        if self.fail_compilation {
            return Err(MaterialError::ShaderCompilation {
                vertex: vertex.to_string(),
                pixel: pixel.to_string(),
                defines,
                reason: "error C1008: undefined variable".to_string(),
            });
        }

        self.next_program += 1;
        Ok(ProgramHandle(self.next_program))
    }
}

impl ProgramBinder for RecordingDevice {
    fn use_program(&mut self, program: ProgramHandle) -> Result<()> {
        self.commands.push(Command::UseProgram(program));
        Ok(())
    }

    fn release_program(&mut self, program: ProgramHandle) -> Result<()> {
        self.commands.push(Command::ReleaseProgram(program));
        Ok(())
    }

    fn set_vertex_attribute(
        &mut self,
        program: ProgramHandle,
        attribute: &VertexAttributeDesc,
        stride: usize,
    ) -> Result<()> {
        self.commands.push(Command::VertexAttribute {
            program,
            name: attribute.name,
            offset: attribute.offset,
            stride,
        });
        Ok(())
    }

    fn set_uniform(
        &mut self,
        program: ProgramHandle,
        name: &str,
        value: UniformValue,
    ) -> Result<()> {
        if self.fail_uniforms {
            return Err(MaterialError::Backend(format!("uniform '{name}' not found")));
        }
        self.commands.push(Command::Uniform {
            program,
            name: name.to_string(),
            value,
        });
        Ok(())
    }

    fn set_uniform_matrices(
        &mut self,
        program: ProgramHandle,
        name: &str,
        values: &[Mat4],
    ) -> Result<()> {
        self.commands.push(Command::UniformMatrices {
            program,
            name: name.to_string(),
            values: values.to_vec(),
        });
        Ok(())
    }

    fn set_depth_state(&mut self, state: DepthState) -> Result<()> {
        self.commands.push(Command::DepthState(state));
        Ok(())
    }

    fn draw_indexed(&mut self, draw: IndexedDraw) -> Result<()> {
        self.commands.push(Command::Draw(draw));
        Ok(())
    }
}

// ============================================================================
// FakeTextures
// ============================================================================

pub const WHITE: TextureHandle = TextureHandle(1);
pub const FLAT_NORMAL: TextureHandle = TextureHandle(2);

/// Serves textures for registered paths; every other path fails to load.
#[derive(Debug, Default)]
pub struct FakeTextures {
    available: HashMap<PathBuf, TextureHandle>,
    pub requests: Vec<PathBuf>,
}

impl FakeTextures {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, path: impl Into<PathBuf>, handle: u32) -> Self {
        self.available.insert(path.into(), TextureHandle(handle));
        self
    }
}

impl TextureService for FakeTextures {
    fn load_texture(&mut self, path: &Path) -> Option<TextureHandle> {
        self.requests.push(path.to_path_buf());
        self.available.get(path).copied()
    }

    fn white_texture(&self) -> TextureHandle {
        WHITE
    }

    fn default_normal_texture(&self) -> TextureHandle {
        FLAT_NORMAL
    }
}
