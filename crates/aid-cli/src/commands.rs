// Rust guideline compliant 2026-10-16

//! Command implementations for the aid CLI.
//!
//! Each command has a `run` function that returns its result and an
//! `execute` wrapper that prints it through the active formatter.

use aid_app::AppError;
use aid_core::Error as CoreError;
use std::str::FromStr;

pub mod approve;
pub mod check;
pub mod config;
pub mod nearby;
pub mod ratings;
pub mod reply;
pub mod transition;

/// Parses a vocabulary value from the command line.
pub(crate) fn parse_value<T>(value: &str) -> aid_app::Result<T>
where
    T: FromStr<Err = CoreError>,
{
    value.parse::<T>().map_err(AppError::from)
}

pub(crate) fn not_found(what: &str, id: &str) -> AppError {
    AppError::Core(CoreError::NotFound(format!("{what} {id}")))
}
