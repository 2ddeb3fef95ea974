// Rust guideline compliant 2026-10-16

//! Implementation of the `aid approve` command.

use crate::snapshot::{load_records, load_records_for_rewrite, save_records};
use crate::OutputFormatter;
use aid_app::approval::{apply_approval, prepare_approval, ApprovalPlan};
use aid_app::Fields;
use aid_core::{Identity, Profile};
use anyhow::Result;
use chrono::{DateTime, Utc};
use std::path::Path;

/// An approval decision as given on the command line.
#[derive(Debug, Clone)]
pub struct ApprovalRequest<'a> {
    pub profiles: &'a Path,
    pub user_id: &'a str,
    pub status: &'a str,
    pub role: Option<&'a str>,
    /// Store the new status in the snapshot.
    pub write: bool,
}

/// Decides a member's status.
///
/// # Errors
///
/// Returns `Forbidden` for non-admins, `NotFound` for an unknown member and
/// `InvalidInput` for a bad status or role.
pub fn run(
    identity: &Identity,
    request: &ApprovalRequest<'_>,
    now: DateTime<Utc>,
) -> Result<ApprovalPlan> {
    let mut profiles: Vec<Profile> = if request.write {
        load_records_for_rewrite(request.profiles)?
    } else {
        load_records(request.profiles)?
    };
    let mut fields = Fields::new()
        .with("user_id", request.user_id)
        .with("status", request.status);
    if let Some(role) = request.role {
        fields = fields.with("role", role);
    }

    let index = profiles.iter().position(|p| p.id == request.user_id);
    let plan = prepare_approval(identity, index.map(|i| &profiles[i]), &fields, now)?;

    if request.write {
        if let Some(profile) = index.and_then(|i| profiles.get_mut(i)) {
            apply_approval(profile, &plan);
            save_records(request.profiles, &profiles)?;
        }
    }

    Ok(plan)
}

/// Runs the decision and prints the confirmation.
///
/// # Errors
///
/// See [`run`].
pub fn execute(
    identity: &Identity,
    request: &ApprovalRequest<'_>,
    formatter: &dyn OutputFormatter,
) -> Result<()> {
    let plan = run(identity, request, aid_app::now())?;
    println!("{}", formatter.format_approval(&plan));
    Ok(())
}
