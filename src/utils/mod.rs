//! Utility Module
//!
//! - [`interner`]: String interning for shader define names
//!
//! Interned strings ([`Symbol`]s) compare in O(1), which keeps the per-frame
//! variant match free of string comparisons.
//!
//! ```rust,ignore
//! use actor_material::utils::interner;
//!
//! let sym1 = interner::intern("SKINNING");
//! let sym2 = interner::intern("SKINNING");
//! assert_eq!(sym1, sym2);
//! ```

pub mod interner;

pub use interner::Symbol;
