// Rust guideline compliant 2026-10-16

//! Conditional application of transition plans to snapshots.
//!
//! Storage applies a plan with a compare-and-swap on the status column.
//! These helpers do the same against an in-memory snapshot so callers and
//! tests get identical semantics: a stale precondition is a `Conflict`,
//! never an `InvalidTransition`.

use crate::error::{AppError, Result};
use crate::list::Listed;
use aid_core::fsm::Governed;
use aid_core::{
    Error as CoreError, Grievance, GrievanceStatus, HelpPost, HelpPostStatus, SideEffect,
    SupportTicket, TicketStatus, Transition,
};
use chrono::{DateTime, Utc};

/// A snapshot whose status column a plan can write.
pub trait StatusRecord: Governed + Listed {
    /// Stores a new status.
    fn set_status(&mut self, status: Self::Status);

    /// Stores `resolved_at`.
    ///
    /// # Errors
    ///
    /// Returns an error for records without a `resolved_at` column.
    fn set_resolved_at(&mut self, at: DateTime<Utc>) -> Result<()>;

    /// Stores `updated_at`.
    fn set_updated_at(&mut self, at: DateTime<Utc>);
}

impl StatusRecord for HelpPost {
    fn set_status(&mut self, status: HelpPostStatus) {
        self.status = status;
    }

    fn set_resolved_at(&mut self, _at: DateTime<Utc>) -> Result<()> {
        Err(AppError::InvalidInput(
            "help posts do not record resolved_at".to_string(),
        ))
    }

    fn set_updated_at(&mut self, at: DateTime<Utc>) {
        self.updated_at = at;
    }
}

impl StatusRecord for Grievance {
    fn set_status(&mut self, status: GrievanceStatus) {
        self.status = status;
    }

    fn set_resolved_at(&mut self, at: DateTime<Utc>) -> Result<()> {
        self.resolved_at = Some(at);
        Ok(())
    }

    fn set_updated_at(&mut self, at: DateTime<Utc>) {
        self.updated_at = at;
    }
}

impl StatusRecord for SupportTicket {
    fn set_status(&mut self, status: TicketStatus) {
        self.status = status;
    }

    fn set_resolved_at(&mut self, at: DateTime<Utc>) -> Result<()> {
        self.resolved_at = Some(at);
        Ok(())
    }

    fn set_updated_at(&mut self, at: DateTime<Utc>) {
        self.updated_at = at;
    }
}

/// Applies `transition` to `record` if its status still matches.
///
/// # Arguments
///
/// * `record` - Snapshot to update in place
/// * `transition` - Plan from the transition engine
/// * `now` - Value for `updated_at`
///
/// # Errors
///
/// Returns `Conflict` if the record's status is no longer
/// `transition.from`. Nothing is written in that case.
pub fn apply_transition<R: StatusRecord>(
    record: &mut R,
    transition: &Transition<R::Status>,
    now: DateTime<Utc>,
) -> Result<()> {
    let current = record.status();
    if current != transition.from {
        return Err(CoreError::Conflict(format!(
            "{} {} is '{}', expected '{}'",
            R::KIND,
            record.id(),
            current,
            transition.from
        ))
        .into());
    }

    for effect in &transition.side_effects {
        match effect {
            SideEffect::SetResolvedAt { at } => record.set_resolved_at(*at)?,
            SideEffect::SetTicketStatus { ticket_id, .. } => {
                return Err(AppError::InvalidInput(format!(
                    "ticket {ticket_id} status change cannot ride on a {} transition",
                    R::KIND
                )))
            }
        }
    }

    record.set_status(transition.applied);
    record.set_updated_at(now);
    tracing::info!(
        resource = %R::KIND,
        id = record.id(),
        from = %transition.from,
        to = %transition.applied,
        "transition applied"
    );
    Ok(())
}

/// Applies cascading side effects to a ticket snapshot.
///
/// A status cascade only lands if the ticket is still in the expected
/// status; otherwise someone moved it first and the cascade is dropped.
///
/// # Returns
///
/// `true` if the ticket changed.
///
/// # Errors
///
/// Returns `NotFound` if an effect targets a different ticket.
pub fn apply_side_effects(
    ticket: &mut SupportTicket,
    effects: &[SideEffect],
    now: DateTime<Utc>,
) -> Result<bool> {
    let mut changed = false;
    for effect in effects {
        match effect {
            SideEffect::SetResolvedAt { at } => {
                ticket.resolved_at = Some(*at);
                changed = true;
            }
            SideEffect::SetTicketStatus {
                ticket_id,
                from,
                to,
            } => {
                if *ticket_id != ticket.id {
                    return Err(CoreError::NotFound(format!("ticket {ticket_id}")).into());
                }
                if ticket.status != *from {
                    tracing::debug!(
                        ticket_id = %ticket.id,
                        status = %ticket.status,
                        expected = %from,
                        "cascade skipped"
                    );
                    continue;
                }
                ticket.status = *to;
                changed = true;
            }
        }
    }
    if changed {
        ticket.updated_at = now;
    }
    Ok(changed)
}
