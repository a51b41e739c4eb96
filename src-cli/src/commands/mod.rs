//! Subcommand handlers

pub mod align;
pub mod batch;
pub mod format;
