//! Data and instruction memory model.

/// Bus access-width codes and decode errors.
pub mod access;
/// Wraparound byte store and hex-listing loader.
pub mod image;

pub use access::{AccessKind, AccessWidth, MemoryError};
pub use image::{ImageError, MemoryImage, ADDRESS_DIRECTIVE, DEFAULT_MEMORY_CAPACITY};
