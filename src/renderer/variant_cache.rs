//! Shader Variant Cache
//!
//! Owns every program compiled for one material family. A variant is looked up
//! by exact attribute match and compiled on a miss:
//!
//! ```text
//! resolve(attrs) ──► linear scan (insertion order) ──hit──► Arc<ShaderVariant>
//!                          │
//!                         miss
//!                          ▼
//!             ShaderCompiler::compile(vs, ps, defines)
//!                 │                     │
//!                Ok                    Err ──► returned, nothing cached
//!                 ▼
//!          push + return new variant
//! ```
//!
//! Entries are immutable and never removed, so a given attribute combination is
//! compiled at most once per cache.

use std::borrow::Cow;
use std::sync::Arc;

use log::{debug, warn};
use parking_lot::Mutex;
use smallvec::SmallVec;

use crate::errors::Result;
use crate::renderer::backend::{ProgramHandle, ShaderCompiler};
use crate::renderer::settings::MaterialConfig;
use crate::resources::{Attribute, AttributeSet, ShaderDefines};
use crate::utils::interner;

/// Index of a variant inside its cache, in compilation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VariantId(u32);

impl VariantId {
    #[inline]
    #[must_use]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A compiled program and the exact defines it was built with.
#[derive(Debug)]
pub struct ShaderVariant {
    id: VariantId,
    program: ProgramHandle,
    defines: ShaderDefines,
}

impl ShaderVariant {
    #[inline]
    #[must_use]
    pub fn id(&self) -> VariantId {
        self.id
    }

    #[inline]
    #[must_use]
    pub fn program(&self) -> ProgramHandle {
        self.program
    }

    #[inline]
    #[must_use]
    pub fn defines(&self) -> &ShaderDefines {
        &self.defines
    }

    /// Whether the variant was compiled with `define`.
    #[inline]
    #[must_use]
    pub fn is_defined(&self, define: &str) -> bool {
        self.defines.contains(define)
    }

    /// Exact match on every attribute slot.
    #[inline]
    #[must_use]
    pub fn matches(&self, attributes: &AttributeSet) -> bool {
        self.defines.matches(attributes)
    }
}

/// A cache shared by several material instances of the same family.
pub type SharedVariantCache = Arc<Mutex<ShaderVariantCache>>;

/// Compiled variants of one material family.
#[derive(Debug)]
pub struct ShaderVariantCache {
    vertex_shader: Cow<'static, str>,
    pixel_shader: Cow<'static, str>,
    variants: Vec<Arc<ShaderVariant>>,
    /// Once set, a miss means a variant is compiled mid-frame.
    runtime: bool,
}

impl ShaderVariantCache {
    #[must_use]
    pub fn new(
        vertex_shader: impl Into<Cow<'static, str>>,
        pixel_shader: impl Into<Cow<'static, str>>,
    ) -> Self {
        interner::preload_attribute_defines();
        Self {
            vertex_shader: vertex_shader.into(),
            pixel_shader: pixel_shader.into(),
            variants: Vec::new(),
            runtime: false,
        }
    }

    #[must_use]
    pub fn from_config(config: &MaterialConfig) -> Self {
        Self::new(config.vertex_shader.clone(), config.pixel_shader.clone())
    }

    /// Wraps a new cache for sharing between instances.
    #[must_use]
    pub fn shared(self) -> SharedVariantCache {
        Arc::new(Mutex::new(self))
    }

    /// First cached variant matching `attributes` exactly.
    #[must_use]
    pub fn find(&self, attributes: &AttributeSet) -> Option<&Arc<ShaderVariant>> {
        self.variants.iter().find(|v| v.matches(attributes))
    }

    /// Returns the matching variant, compiling it on a miss.
    ///
    /// A failed compilation is returned as an error and leaves the cache
    /// untouched, so the next call with the same attributes compiles again.
    pub fn resolve(
        &mut self,
        attributes: &AttributeSet,
        compiler: &mut (impl ShaderCompiler + ?Sized),
    ) -> Result<Arc<ShaderVariant>> {
        if let Some(variant) = self.find(attributes) {
            debug!("Shader variant {:?} reused", variant.id());
            return Ok(Arc::clone(variant));
        }

        if self.runtime {
            warn!(
                "Compiling shader variant {:?} for {} at runtime; it should have been prewarmed",
                attributes.defines().collect::<SmallVec<[_; Attribute::COUNT]>>(),
                self.vertex_shader
            );
        }

        self.compile(attributes, compiler)
    }

    /// Compiles the variant for `attributes` ahead of time, if not cached yet.
    pub fn prewarm(
        &mut self,
        attributes: &AttributeSet,
        compiler: &mut (impl ShaderCompiler + ?Sized),
    ) -> Result<Arc<ShaderVariant>> {
        match self.find(attributes) {
            Some(variant) => Ok(Arc::clone(variant)),
            None => self.compile(attributes, compiler),
        }
    }

    /// Marks the end of loading. Later misses are logged as late compilations.
    pub fn finish_warmup(&mut self) {
        self.runtime = true;
    }

    #[inline]
    #[must_use]
    pub fn is_warmed_up(&self) -> bool {
        self.runtime
    }

    fn compile(
        &mut self,
        attributes: &AttributeSet,
        compiler: &mut (impl ShaderCompiler + ?Sized),
    ) -> Result<Arc<ShaderVariant>> {
        let define_names: SmallVec<[&'static str; Attribute::COUNT]> =
            attributes.defines().collect();

        let program = compiler.compile(&self.vertex_shader, &self.pixel_shader, &define_names)?;

        let id = VariantId(self.variants.len() as u32);
        debug!("Compiled shader variant {id:?} with defines {define_names:?}");

        let variant = Arc::new(ShaderVariant {
            id,
            program,
            defines: ShaderDefines::from_attributes(attributes),
        });
        self.variants.push(Arc::clone(&variant));
        Ok(variant)
    }

    /// Number of successfully compiled variants.
    #[inline]
    #[must_use]
    pub fn compile_count(&self) -> usize {
        self.variants.len()
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.variants.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }

    /// Variants in compilation order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<ShaderVariant>> {
        self.variants.iter()
    }

    #[must_use]
    pub fn vertex_shader(&self) -> &str {
        &self.vertex_shader
    }

    #[must_use]
    pub fn pixel_shader(&self) -> &str {
        &self.pixel_shader
    }
}
