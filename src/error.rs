// src/error.rs
// Central error handling for tbngen
// Exists to give every pipeline entry point one recoverable error surface
// RELEVANT FILES:src/validate.rs,src/pipeline.rs

/// Centralized error type for all tangent-generation operations.
///
/// Degenerate geometry is never reported here; it is recovered locally with
/// stable fallbacks. Index-contract violations that slip past up-front
/// validation panic via slice indexing, since continuing would touch
/// unrelated memory.
#[derive(thiserror::Error, Debug)]
pub enum TbnError {
    #[error("attribute mismatch: {0}")]
    AttributeMismatch(String),

    #[error("index {index} out of bounds for {vertex_count} vertices")]
    IndexOutOfBounds { index: u32, vertex_count: usize },

    #[error("storage bits must be in 2..=32, got {0}")]
    InvalidStorageBits(u32),
}

/// Convenience alias used across the crate.
pub type TbnResult<T> = Result<T, TbnError>;
