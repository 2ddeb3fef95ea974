// Rust guideline compliant 2026-10-16

//! aid CLI library.
//!
//! This library exposes the CLI modules for use in tests and external code.

pub mod caller;
pub mod commands;
pub mod output;
pub mod snapshot;
pub mod terminal;

pub use caller::CallerArgs;
pub use output::{create_formatter, OutputFormatter};
pub use terminal::should_use_color;
