// Rust guideline compliant 2026-10-16

//! Grievance requests: submit, admin review and list.

use crate::access::{guard, guard_kind};
use crate::apply::apply_transition;
use crate::error::{AppError, Result};
use crate::fields::Fields;
use crate::list::list_records;
use aid_core::{
    request_transition, Action, Grievance, GrievanceStatus, Identity, ResourceKind, Transition,
};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Row to insert for a new grievance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewGrievance {
    pub user_id: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub status: GrievanceStatus,
}

/// Validates a submission. Any authenticated member may file one.
///
/// # Errors
///
/// Returns `InvalidInput` if `title`, `description` or `category` is missing.
pub fn prepare_submit(identity: &Identity, fields: &Fields) -> Result<NewGrievance> {
    guard_kind(identity, ResourceKind::Grievance, Action::Create)?;

    Ok(NewGrievance {
        user_id: identity.id.clone(),
        title: fields.required_str("title")?,
        description: fields.required_str("description")?,
        category: fields.required_str("category")?,
        status: GrievanceStatus::Submitted,
    })
}

/// Changes an admin review writes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GrievanceReview {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transition: Option<Transition<GrievanceStatus>>,
    /// New notes; `Some(None)` clears them.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_notes: Option<Option<String>>,
    pub updated_at: DateTime<Utc>,
}

/// Validates an admin review of `grievance`.
///
/// Both `status` and `admin_notes` sit behind the admin-only status rule.
///
/// # Errors
///
/// Returns `Forbidden` for non-admins, `InvalidTransition` for an illegal
/// status edge and `InvalidInput` if neither field was sent.
pub fn prepare_review(
    identity: &Identity,
    grievance: &Grievance,
    fields: &Fields,
    now: DateTime<Utc>,
) -> Result<GrievanceReview> {
    guard(identity, grievance, Action::UpdateStatus)?;

    let status = fields.optional_parsed::<GrievanceStatus>("status")?;
    let admin_notes = fields.nullable_str("admin_notes")?;
    if status.is_none() && admin_notes.is_none() {
        return Err(AppError::InvalidInput(
            "status or admin_notes is required".to_string(),
        ));
    }

    let transition = match status {
        Some(target) if target != grievance.status => {
            Some(request_transition(identity, grievance, target, now)?)
        }
        _ => None,
    };

    Ok(GrievanceReview {
        transition,
        admin_notes,
        updated_at: now,
    })
}

/// Applies a review to a snapshot.
///
/// # Errors
///
/// Returns `Conflict` if the status moved since the review was prepared.
pub fn apply_review(grievance: &mut Grievance, review: &GrievanceReview) -> Result<()> {
    if let Some(transition) = &review.transition {
        apply_transition(grievance, transition, review.updated_at)?;
    }
    if let Some(notes) = &review.admin_notes {
        grievance.admin_notes = notes.clone();
    }
    grievance.updated_at = review.updated_at;
    Ok(())
}

/// Optional filters for listing grievances.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GrievanceFilter {
    pub id: Option<String>,
    pub status: Option<GrievanceStatus>,
}

impl GrievanceFilter {
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
    pub fn matches(&self, grievance: &Grievance) -> bool {
        self.id.as_ref().map_or(true, |id| grievance.id == *id)
            && self.status.map_or(true, |s| grievance.status == s)
    }
}

/// Lists grievances: everything for admins, own rows for everyone else.
pub fn list(identity: &Identity, rows: Vec<Grievance>, filter: &GrievanceFilter) -> Vec<Grievance> {
    list_records(identity, rows, |g| filter.matches(g))
}

/// Reads one grievance.
///
/// # Errors
///
/// Returns `Forbidden` unless the caller owns it or is an admin.
pub fn read(identity: &Identity, grievance: Grievance) -> Result<Grievance> {
    guard(identity, &grievance, Action::Read)?;
    Ok(grievance)
}
