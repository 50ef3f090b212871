//! Error Types
//!
//! The main error type [`MaterialError`] covers:
//! - Shader variant compilation failures
//! - Failures reported by the graphics backend's binding primitives
//! - Out-of-range node or bone indices supplied by the pose store
//! - Configuration parsing errors
//!
//! All fallible public APIs return [`Result<T>`], an alias for
//! `std::result::Result<T, MaterialError>`.

use thiserror::Error;

/// The main error type for material activation, binding and rendering.
#[derive(Error, Debug)]
pub enum MaterialError {
    // ========================================================================
    // Shader Errors
    // ========================================================================
    /// The shader compiler rejected a variant.
    #[error("Failed to compile shader variant ({vertex} / {pixel}) with defines {defines:?}: {reason}")]
    ShaderCompilation {
        /// Vertex shader source name
        vertex: String,
        /// Pixel shader source name
        pixel: String,
        /// Defines the variant was requested with
        defines: Vec<String>,
        /// Compiler output
        reason: String,
    },

    // ========================================================================
    // Backend Errors
    // ========================================================================
    /// A binding or draw primitive failed inside the graphics backend.
    #[error("Graphics backend error: {0}")]
    Backend(String),

    // ========================================================================
    // Pose & Primitive Errors
    // ========================================================================
    /// A node index does not exist in the pose store.
    #[error("Node index out of range: {context} (index: {index}, len: {len})")]
    NodeIndexOutOfRange {
        /// Description of what was being accessed
        context: &'static str,
        /// The invalid index
        index: usize,
        /// Number of nodes available
        len: usize,
    },

    /// A primitive is influenced by more bones than the palette can hold.
    #[error("Primitive uses {bones} bones but the palette holds at most {max}")]
    BonePaletteOverflow {
        /// Bones influencing the primitive
        bones: usize,
        /// Configured palette capacity
        max: usize,
    },

    /// A primitive's triangle count does not fit a 32-bit index count.
    #[error("Primitive index count overflows u32 ({num_triangles} triangles)")]
    IndexCountOverflow {
        /// Triangle count of the primitive
        num_triangles: u32,
    },

    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// JSON configuration could not be parsed.
    #[error("Config parse error: {0}")]
    ConfigParse(#[from] serde_json::Error),

    /// File I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Alias for `Result<T, MaterialError>`.
pub type Result<T> = std::result::Result<T, MaterialError>;
