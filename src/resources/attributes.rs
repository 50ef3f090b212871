//! Shader Capability Attributes
//!
//! An [`AttributeSet`] is the fixed-size boolean vector a material instance uses
//! to pick its shader variant. Every [`Attribute`] maps to exactly one bit and
//! one preprocessor define.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    struct AttributeBits: u32 {
        const LIGHTING  = 1 << 0;
        const SKINNING  = 1 << 1;
        const SHADOWS   = 1 << 2;
        const TEXTURING = 1 << 3;
    }
}

/// A named capability controlling shader variant selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Attribute {
    Lighting,
    Skinning,
    Shadows,
    Texturing,
}

impl Attribute {
    /// Number of attribute slots.
    pub const COUNT: usize = 4;

    /// All attributes in slot order.
    pub const ALL: [Attribute; Self::COUNT] = [
        Attribute::Lighting,
        Attribute::Skinning,
        Attribute::Shadows,
        Attribute::Texturing,
    ];

    /// The preprocessor define a variant is compiled with when this attribute is set.
    #[inline]
    #[must_use]
    pub const fn define_name(self) -> &'static str {
        match self {
            Self::Lighting => "LIGHTING",
            Self::Skinning => "SKINNING",
            Self::Shadows => "SHADOWS",
            Self::Texturing => "TEXTURING",
        }
    }

    #[inline]
    const fn bits(self) -> AttributeBits {
        match self {
            Self::Lighting => AttributeBits::LIGHTING,
            Self::Skinning => AttributeBits::SKINNING,
            Self::Shadows => AttributeBits::SHADOWS,
            Self::Texturing => AttributeBits::TEXTURING,
        }
    }
}

/// Fixed-size mapping from [`Attribute`] to `bool`.
///
/// The set itself carries no dirty state; the owning material instance tracks
/// whether a [`set`](Self::set) actually changed anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct AttributeSet {
    bits: AttributeBits,
}

impl AttributeSet {
    /// All attributes disabled.
    #[inline]
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            bits: AttributeBits::empty(),
        }
    }

    /// Builds a set from the listed attributes.
    #[must_use]
    pub fn from_attributes(attributes: &[Attribute]) -> Self {
        let mut set = Self::empty();
        for &attribute in attributes {
            set.set(attribute, true);
        }
        set
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, attribute: Attribute) -> bool {
        self.bits.contains(attribute.bits())
    }

    /// Sets one slot. Returns `true` only when the stored value changed.
    #[inline]
    pub fn set(&mut self, attribute: Attribute, enabled: bool) -> bool {
        if self.contains(attribute) == enabled {
            return false;
        }
        self.bits.set(attribute.bits(), enabled);
        true
    }

    /// Iterates `(attribute, enabled)` pairs in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (Attribute, bool)> + '_ {
        Attribute::ALL.into_iter().map(|a| (a, self.contains(a)))
    }

    /// Define names of every enabled slot, in slot order.
    pub fn defines(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.iter()
            .filter(|&(_, enabled)| enabled)
            .map(|(a, _)| a.define_name())
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }
}

impl Serialize for AttributeSet {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let enabled: Vec<Attribute> = self
            .iter()
            .filter(|&(_, on)| on)
            .map(|(a, _)| a)
            .collect();
        enabled.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for AttributeSet {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let enabled = Vec::<Attribute>::deserialize(deserializer)?;
        Ok(Self::from_attributes(&enabled))
    }
}
