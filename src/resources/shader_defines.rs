//! Shader Define Sets
//!
//! A [`ShaderDefines`] records the exact preprocessor defines a shader variant
//! was compiled with. Keys and values are interned [`Symbol`]s kept in sorted
//! order, so two variants compiled from the same attribute combination always
//! compare and hash equal.
//!
//! ```rust,ignore
//! use actor_material::resources::{AttributeSet, Attribute, ShaderDefines};
//!
//! let attrs = AttributeSet::from_attributes(&[Attribute::Skinning]);
//! let defines = ShaderDefines::from_attributes(&attrs);
//! assert!(defines.contains("SKINNING"));
//! assert!(defines.matches(&attrs));
//! ```

use std::hash::{Hash, Hasher};

use crate::resources::attributes::{Attribute, AttributeSet};
use crate::utils::interner::{self, Symbol};

/// Value assigned to every attribute define.
const DEFINE_ENABLED: &str = "1";

/// A sorted collection of shader define `(key, value)` pairs.
#[derive(Debug, Clone, Default)]
pub struct ShaderDefines {
    defines: Vec<(Symbol, Symbol)>,
}

impl ShaderDefines {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            defines: Vec::new(),
        }
    }

    #[inline]
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            defines: Vec::with_capacity(capacity),
        }
    }

    /// Defines `NAME = 1` for every enabled attribute.
    #[must_use]
    pub fn from_attributes(attributes: &AttributeSet) -> Self {
        let mut defines = Self::with_capacity(Attribute::COUNT);
        for name in attributes.defines() {
            defines.set(name, DEFINE_ENABLED);
        }
        defines
    }

    /// Sets a define, replacing the value of an existing key.
    pub fn set(&mut self, key: &str, value: &str) {
        let key_sym = interner::intern(key);
        let value_sym = interner::intern(value);
        match self.defines.binary_search_by_key(&key_sym, |&(k, _)| k) {
            Ok(idx) => self.defines[idx].1 = value_sym,
            Err(idx) => self.defines.insert(idx, (key_sym, value_sym)),
        }
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        interner::get(key).is_some_and(|key_sym| self.contains_symbol(key_sym))
    }

    #[inline]
    #[must_use]
    pub fn contains_symbol(&self, key: Symbol) -> bool {
        self.defines.binary_search_by_key(&key, |&(k, _)| k).is_ok()
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&'static str> {
        let key_sym = interner::get(key)?;
        self.defines
            .binary_search_by_key(&key_sym, |&(k, _)| k)
            .ok()
            .map(|idx| interner::resolve(self.defines[idx].1))
    }

    /// Exact match against an attribute set: every slot must agree, both
    /// "defined and required" and "not defined and not required".
    #[must_use]
    pub fn matches(&self, attributes: &AttributeSet) -> bool {
        attributes
            .iter()
            .all(|(attribute, enabled)| self.contains(attribute.define_name()) == enabled)
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.defines.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.defines.is_empty()
    }

    /// Iterates define names (sorted by symbol, not alphabetically).
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.defines.iter().map(|&(k, _)| interner::resolve(k))
    }

    /// Content hash, stable for identical define sets.
    #[must_use]
    pub fn compute_hash(&self) -> u64 {
        use std::hash::BuildHasher;

        rustc_hash::FxBuildHasher.hash_one(self)
    }
}

impl Hash for ShaderDefines {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.defines.hash(state);
    }
}

impl PartialEq for ShaderDefines {
    fn eq(&self, other: &Self) -> bool {
        self.defines == other.defines
    }
}

impl Eq for ShaderDefines {}
