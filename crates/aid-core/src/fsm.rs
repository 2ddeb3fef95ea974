// Rust guideline compliant 2026-10-16

//! Finite state machines for resource status changes.
//!
//! - Help post: open → in_progress → completed, open|in_progress → cancelled
//! - Grievance: submitted → under_review → resolved → closed,
//!   submitted|under_review → closed
//! - Support ticket: open → in_progress → resolved → closed,
//!   open|in_progress → closed
//!
//! The engine never touches storage. A successful request returns a
//! [`Transition`] naming the expected current status (for a conditional
//! write) and the side effects to apply with it.

use crate::identity::Identity;
use crate::models::{
    Grievance, GrievanceStatus, HelpPost, HelpPostStatus, SupportTicket, TicketStatus,
};
use crate::policy::{authorize, AccessSubject, Action, ResourceKind, TicketThread};
use crate::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A status vocabulary with a fixed edge list.
pub trait StatusMachine: Copy + Eq + fmt::Debug + fmt::Display + 'static {
    /// Resource whose status this is.
    const KIND: ResourceKind;

    /// Statuses reachable in one step.
    fn successors(self) -> &'static [Self];

    /// Whether entering this status stamps `resolved_at`.
    fn stamps_resolved_at(self) -> bool {
        false
    }

    /// Checks if a transition to the target status is valid.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidTransition`] if `target` is not a successor.
    fn can_transition_to(self, target: Self) -> Result<()> {
        if self.successors().contains(&target) {
            Ok(())
        } else {
            Err(Error::InvalidTransition {
                kind: Self::KIND,
                from: self.to_string(),
                to: target.to_string(),
            })
        }
    }

    /// Returns the list of valid target states for the current status.
    fn valid_transitions(self) -> Vec<Self> {
        self.successors().to_vec()
    }

    /// Returns `true` if no transition leaves this status.
    fn is_terminal(self) -> bool {
        self.successors().is_empty()
    }
}

impl StatusMachine for HelpPostStatus {
    const KIND: ResourceKind = ResourceKind::HelpPost;

    fn successors(self) -> &'static [Self] {
        match self {
            HelpPostStatus::Open => &[HelpPostStatus::InProgress, HelpPostStatus::Cancelled],
            HelpPostStatus::InProgress => &[HelpPostStatus::Completed, HelpPostStatus::Cancelled],
            HelpPostStatus::Completed | HelpPostStatus::Cancelled => &[],
        }
    }
}

impl StatusMachine for GrievanceStatus {
    const KIND: ResourceKind = ResourceKind::Grievance;

    fn successors(self) -> &'static [Self] {
        match self {
            GrievanceStatus::Submitted => &[GrievanceStatus::UnderReview, GrievanceStatus::Closed],
            GrievanceStatus::UnderReview => &[GrievanceStatus::Resolved, GrievanceStatus::Closed],
            GrievanceStatus::Resolved => &[GrievanceStatus::Closed],
            GrievanceStatus::Closed => &[],
        }
    }

    fn stamps_resolved_at(self) -> bool {
        self == GrievanceStatus::Resolved
    }
}

impl StatusMachine for TicketStatus {
    const KIND: ResourceKind = ResourceKind::SupportTicket;

    fn successors(self) -> &'static [Self] {
        match self {
            TicketStatus::Open => &[TicketStatus::InProgress, TicketStatus::Closed],
            TicketStatus::InProgress => &[TicketStatus::Resolved, TicketStatus::Closed],
            TicketStatus::Resolved => &[TicketStatus::Closed],
            TicketStatus::Closed => &[],
        }
    }

    fn stamps_resolved_at(self) -> bool {
        matches!(self, TicketStatus::Resolved | TicketStatus::Closed)
    }
}

/// A state change storage must apply alongside the owning update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "effect", rename_all = "snake_case")]
pub enum SideEffect {
    /// Set the record's `resolved_at` column.
    SetResolvedAt {
        /// Timestamp to store.
        at: DateTime<Utc>,
    },
    /// Move a support ticket to another status, if it is still in `from`.
    SetTicketStatus {
        /// Ticket to update.
        ticket_id: String,
        /// Status the ticket must still have.
        from: TicketStatus,
        /// Status to store.
        to: TicketStatus,
    },
}

/// A validated status change, ready for a conditional write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition<S> {
    /// Status the record must still have when the write lands.
    pub from: S,
    /// Status to store.
    pub applied: S,
    /// Additional changes to apply in the same write.
    pub side_effects: Vec<SideEffect>,
}

/// A record whose status is governed by a state machine.
pub trait Governed: AccessSubject {
    type Status: StatusMachine;

    /// Current status of the snapshot.
    fn status(&self) -> Self::Status;
}

impl Governed for HelpPost {
    type Status = HelpPostStatus;

    fn status(&self) -> HelpPostStatus {
        self.status
    }
}

impl Governed for Grievance {
    type Status = GrievanceStatus;

    fn status(&self) -> GrievanceStatus {
        self.status
    }
}

impl Governed for SupportTicket {
    type Status = TicketStatus;

    fn status(&self) -> TicketStatus {
        self.status
    }
}

/// Plans a status change without consulting the access policy.
///
/// Used for system-triggered changes; callers acting for a member go through
/// [`request_transition`].
///
/// # Errors
///
/// Returns [`Error::InvalidTransition`] if the edge does not exist.
pub fn plan_transition<S: StatusMachine>(
    from: S,
    to: S,
    now: DateTime<Utc>,
) -> Result<Transition<S>> {
    from.can_transition_to(to)?;

    let mut side_effects = Vec::new();
    if to.stamps_resolved_at() {
        side_effects.push(SideEffect::SetResolvedAt { at: now });
    }

    Ok(Transition {
        from,
        applied: to,
        side_effects,
    })
}

/// Validates a status change requested by `identity`.
///
/// The policy is consulted first, so a caller without the right learns
/// nothing about the record's state.
///
/// # Arguments
///
/// * `identity` - The requesting caller
/// * `record` - Latest known snapshot of the record
/// * `target` - Requested status
/// * `now` - Timestamp for `resolved_at` side effects
///
/// # Errors
///
/// Returns [`Error::Forbidden`] if the policy denies the change, or
/// [`Error::InvalidTransition`] if the edge does not exist.
pub fn request_transition<R: Governed>(
    identity: &Identity,
    record: &R,
    target: R::Status,
    now: DateTime<Utc>,
) -> Result<Transition<R::Status>> {
    authorize(identity, record, Action::UpdateStatus)?;
    plan_transition(record.status(), target, now)
}

/// Side effects of posting a message on a ticket.
///
/// The first reply on an `open` ticket moves it to `in_progress`. That
/// change is system-triggered, so it does not need the admin-only status
/// right; the poster only needs to be allowed on the thread.
///
/// # Errors
///
/// Returns [`Error::Forbidden`] if `identity` may not post on the thread.
pub fn on_ticket_message(identity: &Identity, ticket: &SupportTicket) -> Result<Vec<SideEffect>> {
    authorize(identity, &TicketThread(ticket), Action::Create)?;

    if ticket.status != TicketStatus::Open {
        return Ok(Vec::new());
    }

    ticket.status.can_transition_to(TicketStatus::InProgress)?;
    Ok(vec![SideEffect::SetTicketStatus {
        ticket_id: ticket.id.clone(),
        from: TicketStatus::Open,
        to: TicketStatus::InProgress,
    }])
}
