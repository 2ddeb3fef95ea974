// Rust guideline compliant 2026-10-16

//! Support ticket requests: open, update, read, list and reply.

use crate::access::{guard, guard_kind};
use crate::apply::apply_transition;
use crate::error::{AppError, Result};
use crate::fields::Fields;
use crate::list::list_records;
use aid_core::policy::TicketThread;
use aid_core::{
    on_ticket_message, request_transition, Action, Error as CoreError, Identity, ResourceKind,
    SideEffect, SupportTicket, TicketMessage, TicketPriority, TicketStatus, Transition,
};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Row to insert for a new ticket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewTicket {
    pub user_id: String,
    pub subject: String,
    pub message: String,
    pub priority: TicketPriority,
    pub status: TicketStatus,
}

impl NewTicket {
    /// The thread's first message, once storage has assigned the ticket id.
    #[must_use]
    pub fn initial_message(&self, ticket_id: &str) -> NewTicketMessage {
        NewTicketMessage {
            ticket_id: ticket_id.to_string(),
            user_id: self.user_id.clone(),
            message: self.message.clone(),
            is_internal: false,
        }
    }
}

/// Row to insert for a new ticket message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewTicketMessage {
    pub ticket_id: String,
    pub user_id: String,
    pub message: String,
    pub is_internal: bool,
}

/// Validates a request to open a ticket.
///
/// # Errors
///
/// Returns `InvalidInput` if `subject` or `message` is missing or the
/// priority is unknown.
pub fn prepare_open(identity: &Identity, fields: &Fields) -> Result<NewTicket> {
    guard_kind(identity, ResourceKind::SupportTicket, Action::Create)?;

    Ok(NewTicket {
        user_id: identity.id.clone(),
        subject: fields.required_str("subject")?,
        message: fields.required_str("message")?,
        priority: fields.optional_parsed("priority")?.unwrap_or_default(),
        status: TicketStatus::Open,
    })
}

/// Changes to write for a ticket update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TicketUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transition: Option<Transition<TicketStatus>>,
    /// New assignee; `Some(None)` unassigns.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<TicketPriority>,
    pub updated_at: DateTime<Utc>,
}

/// Validates an update of `status`, `assigned_to` and/or `priority`.
///
/// Status goes through the transition engine. Assignment needs the assign
/// right and priority is triage, so both are admin-only as well.
///
/// # Errors
///
/// Returns `Forbidden`, `InvalidTransition`, or `InvalidInput` if nothing
/// updatable was sent.
pub fn prepare_update(
    identity: &Identity,
    ticket: &SupportTicket,
    fields: &Fields,
    now: DateTime<Utc>,
) -> Result<TicketUpdate> {
    let status = fields.optional_parsed::<TicketStatus>("status")?;
    let assigned_to = fields.nullable_str("assigned_to")?;
    let priority = fields.optional_parsed::<TicketPriority>("priority")?;
    if status.is_none() && assigned_to.is_none() && priority.is_none() {
        return Err(AppError::InvalidInput(
            "status, assigned_to or priority is required".to_string(),
        ));
    }

    let transition = match status {
        Some(target) if target != ticket.status => {
            Some(request_transition(identity, ticket, target, now)?)
        }
        Some(_) => {
            guard(identity, ticket, Action::UpdateStatus)?;
            None
        }
        None => None,
    };
    if assigned_to.is_some() {
        guard(identity, ticket, Action::Assign)?;
    }
    if priority.is_some() {
        guard(identity, ticket, Action::UpdateStatus)?;
    }

    Ok(TicketUpdate {
        transition,
        assigned_to,
        priority,
        updated_at: now,
    })
}

/// Applies an update to a snapshot.
///
/// # Errors
///
/// Returns `Conflict` if the status moved since the update was prepared.
pub fn apply_update(ticket: &mut SupportTicket, update: &TicketUpdate) -> Result<()> {
    if let Some(transition) = &update.transition {
        apply_transition(ticket, transition, update.updated_at)?;
    }
    if let Some(assignee) = &update.assigned_to {
        ticket.assigned_to = assignee.clone();
    }
    if let Some(priority) = update.priority {
        ticket.priority = priority;
    }
    ticket.updated_at = update.updated_at;
    Ok(())
}

/// A ticket, optionally with its thread.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TicketView {
    #[serde(flatten)]
    pub ticket: SupportTicket,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub messages: Option<Vec<TicketMessage>>,
}

/// Reads one ticket, attaching its messages oldest first when asked.
///
/// `messages` may hold rows of other tickets; only this ticket's are kept.
///
/// # Errors
///
/// Returns `Forbidden` unless the caller is the owner, the assignee or an
/// admin.
pub fn read(
    identity: &Identity,
    ticket: SupportTicket,
    messages: Vec<TicketMessage>,
    include_messages: bool,
) -> Result<TicketView> {
    guard(identity, &ticket, Action::Read)?;
    let messages = if include_messages {
        Some(thread(identity, &ticket, messages)?)
    } else {
        None
    };
    Ok(TicketView { ticket, messages })
}

/// Returns the messages of `ticket`, oldest first.
///
/// # Errors
///
/// Returns `Forbidden` unless the caller may read the thread.
pub fn thread(
    identity: &Identity,
    ticket: &SupportTicket,
    messages: Vec<TicketMessage>,
) -> Result<Vec<TicketMessage>> {
    guard(identity, &TicketThread(ticket), Action::Read)?;
    let mut messages: Vec<TicketMessage> = messages
        .into_iter()
        .filter(|m| m.ticket_id == ticket.id)
        .collect();
    messages.sort_by(|a, b| a.created_at.cmp(&b.created_at));
    Ok(messages)
}

/// Optional filters for listing tickets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TicketFilter {
    pub id: Option<String>,
    pub status: Option<TicketStatus>,
}

impl TicketFilter {
    /// Reads `id` and `status` from query fields.
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown status.
    pub fn from_fields(fields: &Fields) -> Result<Self> {
        Ok(Self {
            id: fields.optional_str("id")?,
            status: fields.optional_parsed("status")?,
        })
    }

    #[must_use]
    pub fn matches(&self, ticket: &SupportTicket) -> bool {
        self.id.as_ref().map_or(true, |id| ticket.id == *id)
            && self.status.map_or(true, |s| ticket.status == s)
    }
}

/// Lists tickets: everything for admins, owned or assigned rows otherwise.
pub fn list(
    identity: &Identity,
    rows: Vec<SupportTicket>,
    filter: &TicketFilter,
) -> Vec<SupportTicket> {
    list_records(identity, rows, |t| filter.matches(t))
}

/// A validated reply and the storage changes it triggers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReplyPlan {
    pub message: NewTicketMessage,
    pub side_effects: Vec<SideEffect>,
}

/// Validates a reply on a ticket thread.
///
/// `ticket` is the storage lookup for the `ticket_id` field; `None` means
/// no such ticket.
///
/// # Errors
///
/// Returns `InvalidInput` for a missing `ticket_id` or empty `message`,
/// `NotFound` for an unknown ticket and `Forbidden` for outsiders.
pub fn prepare_reply(
    identity: &Identity,
    ticket: Option<&SupportTicket>,
    fields: &Fields,
) -> Result<ReplyPlan> {
    let ticket_id = fields.required_str("ticket_id")?;
    let message = fields.required_str("message")?;
    let is_internal = fields.optional_bool("is_internal")?.unwrap_or(false);

    let ticket = ticket
        .filter(|t| t.id == ticket_id)
        .ok_or_else(|| CoreError::NotFound(format!("ticket {ticket_id}")))?;

    let side_effects = on_ticket_message(identity, ticket)?;
    if !side_effects.is_empty() {
        tracing::info!(ticket_id = %ticket.id, "first reply escalates ticket");
    }

    Ok(ReplyPlan {
        message: NewTicketMessage {
            ticket_id,
            user_id: identity.id.clone(),
            message,
            is_internal,
        },
        side_effects,
    })
}
