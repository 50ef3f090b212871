//! Global String Interner
//!
//! Converts strings into compact integer [`Symbol`]s so shader define names can
//! be compared and hashed without touching string data.

use std::sync::LazyLock;

use lasso::{Spur, ThreadedRodeo};

static INTERNER: LazyLock<ThreadedRodeo> = LazyLock::new(ThreadedRodeo::new);

/// Compact identifier for an interned string.
pub type Symbol = Spur;

/// Interns a string, returning the existing symbol if it was seen before.
#[inline]
pub fn intern(s: &str) -> Symbol {
    INTERNER.get_or_intern(s)
}

/// Looks up a string without interning it.
#[inline]
pub fn get(s: &str) -> Option<Symbol> {
    INTERNER.get(s)
}

/// Resolves a symbol back to its string.
#[inline]
pub fn resolve(sym: Symbol) -> &'static str {
    let rodeo: &'static ThreadedRodeo = &INTERNER;
    rodeo.resolve(&sym)
}

/// Pre-interns the attribute define names and the common define value so the
/// per-frame variant match never allocates.
pub fn preload_attribute_defines() {
    for attribute in crate::resources::Attribute::ALL {
        intern(attribute.define_name());
    }
    intern("1");
}
