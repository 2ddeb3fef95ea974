// Rust guideline compliant 2026-10-16

//! Implementation of the `aid ratings` command.

use crate::snapshot::load_records;
use crate::OutputFormatter;
use aid_app::ratings::{summarize, RatingSummary};
use aid_app::Fields;
use aid_core::{Identity, Rating};
use anyhow::Result;
use std::path::Path;

/// Summarizes the ratings `user_id` received.
///
/// # Errors
///
/// Returns an error if the snapshot cannot be read or `user_id` is blank.
pub fn run(identity: &Identity, ratings_path: &Path, user_id: &str) -> Result<RatingSummary> {
    let rows: Vec<Rating> = load_records(ratings_path)?;
    let fields = Fields::new().with("user_id", user_id);
    Ok(summarize(identity, &fields, rows)?)
}

/// Prints the summary.
///
/// # Errors
///
/// See [`run`].
pub fn execute(
    identity: &Identity,
    ratings_path: &Path,
    user_id: &str,
    formatter: &dyn OutputFormatter,
) -> Result<()> {
    let summary = run(identity, ratings_path, user_id)?;
    println!("{}", formatter.format_ratings(&summary));
    Ok(())
}
