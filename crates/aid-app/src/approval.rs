// Rust guideline compliant 2026-10-16

//! Member approval by admins.

use crate::access::guard_kind;
use crate::error::{AppError, Result};
use crate::fields::Fields;
use aid_core::{Action, Error as CoreError, Identity, Profile, ResourceKind, Role, UserStatus};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Changes an approval decision writes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApprovalPlan {
    pub user_id: String,
    pub status: UserStatus,
    /// Role to upsert; only ever set for approvals.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grant_role: Option<Role>,
    pub updated_at: DateTime<Utc>,
}

impl ApprovalPlan {
    /// Confirmation text for the response body.
    #[must_use]
    pub fn message(&self) -> String {
        format!("User {} successfully", self.status)
    }
}

/// Validates an approval decision for the member named by `user_id`.
///
/// `profile` is the storage lookup for that id; `None` means no such member.
///
/// # Errors
///
/// Returns `Forbidden` for non-admins, `InvalidInput` for a missing field or
/// a status other than approved, rejected or suspended, and `NotFound` for an
/// unknown member.
pub fn prepare_approval(
    identity: &Identity,
    profile: Option<&Profile>,
    fields: &Fields,
    now: DateTime<Utc>,
) -> Result<ApprovalPlan> {
    guard_kind(identity, ResourceKind::Profile, Action::UpdateStatus)?;

    let user_id = fields.required_str("user_id")?;
    let status = fields.required_parsed::<UserStatus>("status")?;
    if status == UserStatus::Pending {
        return Err(AppError::InvalidInput(
            "status must be approved, rejected or suspended".to_string(),
        ));
    }
    let role = fields.optional_parsed::<Role>("role")?;

    if !profile.is_some_and(|p| p.id == user_id) {
        return Err(CoreError::NotFound(format!("profile {user_id}")).into());
    }

    let grant_role = if status == UserStatus::Approved { role } else { None };
    tracing::info!(user_id = %user_id, status = %status, "member status decided");

    Ok(ApprovalPlan {
        user_id,
        status,
        grant_role,
        updated_at: now,
    })
}

/// Applies a decision to a profile snapshot.
pub fn apply_approval(profile: &mut Profile, plan: &ApprovalPlan) {
    profile.status = plan.status;
    profile.updated_at = plan.updated_at;
}
