// Rust guideline compliant 2026-10-16

//! Implementation of the `aid check` command.
//!
//! Asks the access policy whether the caller may perform an action, either
//! on a kind in general or on one record from a snapshot file.

use super::{not_found, parse_value};
use crate::output::DecisionReport;
use crate::snapshot::load_records;
use crate::OutputFormatter;
use aid_app::{AppError, Listed};
use aid_core::policy::{evaluate_subject, supports, AccessSubject, TicketThread};
use aid_core::{
    evaluate, AccessDecision, Action, Grievance, HelpPost, Identity, Profile, Rating, RatingDraft,
    ResourceKind, SupportTicket,
};
use anyhow::Result;
use serde::de::DeserializeOwned;
use std::path::Path;

/// What to check the action against.
#[derive(Debug, Clone, Default)]
pub struct CheckTarget<'a> {
    /// Snapshot file holding the record (tickets for `ticket_message`).
    pub records: Option<&'a Path>,
    /// Record id within `records`.
    pub id: Option<&'a str>,
    /// For rating creates: the member to be rated.
    pub rated_user: Option<&'a str>,
    /// For rating creates: the score.
    pub rating: Option<i64>,
}

/// Evaluates the policy for `kind` × `action`.
///
/// # Errors
///
/// Returns an error for unknown kinds or actions, a kind that has no such
/// action, a rating draft without a score, an unreadable snapshot or an id
/// that is not in it. A denial is a result, not an error.
pub fn run(
    identity: &Identity,
    kind: &str,
    action: &str,
    target: &CheckTarget<'_>,
) -> Result<DecisionReport> {
    let kind: ResourceKind = parse_value(kind)?;
    let action: Action = parse_value(action)?;
    if !supports(kind, action) {
        return Err(AppError::InvalidInput(format!("{kind} has no {action} action")).into());
    }

    let decision = match (target.records, target.id, target.rated_user) {
        (_, None, Some(rated_user)) if kind == ResourceKind::Rating => {
            let rating = target
                .rating
                .ok_or_else(|| AppError::InvalidInput("--rated-user needs --rating".to_string()))?;
            let draft = RatingDraft {
                rated_user_id: rated_user.to_string(),
                rating,
                help_post_id: None,
                comment: None,
            };
            evaluate_subject(identity, &draft, action)
        }
        (Some(path), Some(id), _) => on_kind(identity, kind, path, id, action)?,
        (None, Some(_), _) => {
            return Err(AppError::InvalidInput("--id needs --records".to_string()).into());
        }
        (_, None, _) => evaluate(identity, kind, None, action),
    };

    tracing::debug!(
        user_id = %identity.id,
        resource = %kind,
        action = %action,
        allowed = decision.allowed,
        "policy checked"
    );

    Ok(DecisionReport {
        resource: kind,
        action,
        decision,
    })
}

fn on_kind(
    identity: &Identity,
    kind: ResourceKind,
    path: &Path,
    id: &str,
    action: Action,
) -> Result<AccessDecision> {
    let decision = match kind {
        ResourceKind::HelpPost => on_record::<HelpPost>(identity, path, id, action)?,
        ResourceKind::Grievance => on_record::<Grievance>(identity, path, id, action)?,
        ResourceKind::SupportTicket => on_record::<SupportTicket>(identity, path, id, action)?,
        ResourceKind::Rating => on_record::<Rating>(identity, path, id, action)?,
        ResourceKind::TicketMessage => {
            let tickets: Vec<SupportTicket> = load_records(path)?;
            let ticket = tickets
                .iter()
                .find(|t| t.id == id)
                .ok_or_else(|| not_found("ticket", id))?;
            evaluate_subject(identity, &TicketThread(ticket), action)
        }
        ResourceKind::Profile => {
            let profiles: Vec<Profile> = load_records(path)?;
            let profile = profiles
                .iter()
                .find(|p| p.id == id)
                .ok_or_else(|| not_found("profile", id))?;
            evaluate_subject(identity, profile, action)
        }
    };
    Ok(decision)
}

fn on_record<R>(
    identity: &Identity,
    path: &Path,
    id: &str,
    action: Action,
) -> Result<AccessDecision>
where
    R: AccessSubject + Listed + DeserializeOwned,
{
    let rows: Vec<R> = load_records(path)?;
    let record = rows
        .iter()
        .find(|r| r.id() == id)
        .ok_or_else(|| not_found(R::KIND.as_str(), id))?;
    Ok(evaluate_subject(identity, record, action))
}

/// Runs the check and prints the decision.
///
/// # Errors
///
/// See [`run`].
pub fn execute(
    identity: &Identity,
    kind: &str,
    action: &str,
    target: &CheckTarget<'_>,
    formatter: &dyn OutputFormatter,
) -> Result<()> {
    let report = run(identity, kind, action, target)?;
    println!("{}", formatter.format_decision(&report));
    Ok(())
}
