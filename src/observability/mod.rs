//! # Observability
//!
//! Logging setup for the extractor binary.
//!
//! - `logging`: `tracing-subscriber` initialization (text or JSON)

pub mod logging;

// Re-export for convenience
pub use logging::{init_tracing, LogFormat};
