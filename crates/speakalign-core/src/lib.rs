//! speakalign-core - transcript data model shared by the speakalign crates
//!
//! Provides validated interval, chunk and speaker types plus the JSON and
//! subtitle exporters.

pub mod error;
pub mod exporter;
pub mod types;

pub use error::CoreError;
pub use exporter::{ExportError, ExportOptions, Exporter, OutputFormat};
pub use types::*;
