// Rust guideline compliant 2026-10-16

//! Implementation of the `aid reply` command.

use crate::snapshot::{load_records, load_records_for_rewrite, save_records};
use crate::OutputFormatter;
use aid_app::tickets::{prepare_reply, ReplyPlan};
use aid_app::{apply_side_effects, Fields};
use aid_core::{Identity, SupportTicket};
use anyhow::Result;
use chrono::{DateTime, Utc};
use std::path::Path;

/// A reply as given on the command line.
#[derive(Debug, Clone)]
pub struct ReplyRequest<'a> {
    pub tickets: &'a Path,
    pub ticket_id: &'a str,
    pub message: &'a str,
    pub internal: bool,
    /// Store the ticket status cascade in the snapshot.
    pub write: bool,
}

/// Validates a reply and, with `write`, applies its status cascade.
///
/// # Errors
///
/// Returns `NotFound` for an unknown ticket, `Forbidden` for callers
/// outside the thread and `InvalidInput` for an empty message.
pub fn run(identity: &Identity, request: &ReplyRequest<'_>, now: DateTime<Utc>) -> Result<ReplyPlan> {
    let mut tickets: Vec<SupportTicket> = if request.write {
        load_records_for_rewrite(request.tickets)?
    } else {
        load_records(request.tickets)?
    };
    let fields = Fields::new()
        .with("ticket_id", request.ticket_id)
        .with("message", request.message)
        .with("is_internal", request.internal);

    let index = tickets.iter().position(|t| t.id == request.ticket_id);
    let plan = prepare_reply(identity, index.map(|i| &tickets[i]), &fields)?;

    if request.write && !plan.side_effects.is_empty() {
        if let Some(ticket) = index.and_then(|i| tickets.get_mut(i)) {
            if apply_side_effects(ticket, &plan.side_effects, now)? {
                save_records(request.tickets, &tickets)?;
            }
        }
    }

    Ok(plan)
}

/// Runs the reply and prints the plan.
///
/// # Errors
///
/// See [`run`].
pub fn execute(
    identity: &Identity,
    request: &ReplyRequest<'_>,
    formatter: &dyn OutputFormatter,
) -> Result<()> {
    let plan = run(identity, request, aid_app::now())?;
    println!("{}", formatter.format_reply(&plan));
    Ok(())
}
