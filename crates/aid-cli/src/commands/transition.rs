// Rust guideline compliant 2026-10-16

//! Implementation of the `aid transition` command.
//!
//! Runs a status change through the transition engine against a JSONL
//! snapshot, applies it with compare-and-swap semantics and, with
//! `--write`, stores the updated snapshot.

use super::{not_found, parse_value};
use crate::output::TransitionReport;
use crate::snapshot::{load_records, load_records_for_rewrite, save_records};
use crate::OutputFormatter;
use aid_app::{apply_transition, AppError, Listed, StatusRecord};
use aid_core::fsm::StatusMachine;
use aid_core::{
    request_transition, Error as CoreError, Grievance, HelpPost, Identity, ResourceKind,
    SupportTicket,
};
use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;
use std::str::FromStr;

/// A requested status change.
#[derive(Debug, Clone, Copy)]
pub struct TransitionRequest<'a> {
    pub kind: &'a str,
    pub records: &'a Path,
    pub id: &'a str,
    pub status: &'a str,
    /// Rewrite the snapshot file after applying.
    pub write: bool,
}

/// Plans and applies a status change.
///
/// # Errors
///
/// Returns `Forbidden`, `InvalidTransition` or `NotFound` from the engine,
/// and `InvalidInput` for kinds without a status machine.
pub fn run(
    identity: &Identity,
    request: &TransitionRequest<'_>,
    now: DateTime<Utc>,
) -> Result<TransitionReport> {
    match parse_value::<ResourceKind>(request.kind)? {
        ResourceKind::HelpPost => transition_in::<HelpPost>(identity, request, now),
        ResourceKind::Grievance => transition_in::<Grievance>(identity, request, now),
        ResourceKind::SupportTicket => transition_in::<SupportTicket>(identity, request, now),
        other => Err(AppError::InvalidInput(format!("{other} has no status machine")).into()),
    }
}

fn transition_in<R>(
    identity: &Identity,
    request: &TransitionRequest<'_>,
    now: DateTime<Utc>,
) -> Result<TransitionReport>
where
    R: StatusRecord + Serialize + DeserializeOwned,
    R::Status: FromStr<Err = CoreError>,
{
    let target: R::Status = parse_value(request.status)?;
    let mut rows: Vec<R> = if request.write {
        load_records_for_rewrite(request.records)?
    } else {
        load_records(request.records)?
    };
    let record = rows
        .iter_mut()
        .find(|r| r.id() == request.id)
        .ok_or_else(|| not_found(<R::Status as StatusMachine>::KIND.as_str(), request.id))?;

    let transition = request_transition(identity, &*record, target, now).map_err(AppError::from)?;
    apply_transition(record, &transition, now)?;

    if request.write {
        save_records(request.records, &rows)?;
    }

    Ok(TransitionReport {
        resource: <R::Status as StatusMachine>::KIND,
        id: request.id.to_string(),
        from: transition.from.to_string(),
        to: transition.applied.to_string(),
        side_effects: transition.side_effects,
        written: request.write,
    })
}

/// Runs the change and prints the outcome.
///
/// # Errors
///
/// See [`run`].
pub fn execute(
    identity: &Identity,
    request: &TransitionRequest<'_>,
    formatter: &dyn OutputFormatter,
) -> Result<()> {
    let report = run(identity, request, aid_app::now())?;
    println!("{}", formatter.format_transition(&report));
    Ok(())
}
