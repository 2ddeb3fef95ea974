// Rust guideline compliant 2026-10-16

//! Policy checks with logging.
//!
//! The core only returns decisions. This is where a denial gets recorded
//! before it is handed back to the transport.

use crate::error::Result;
use aid_core::policy::{evaluate, evaluate_subject, AccessSubject};
use aid_core::{AccessDecision, Action, Identity, ResourceKind};

/// Authorizes `action` on a concrete record.
///
/// # Errors
///
/// Returns the core error for a denied decision.
pub fn guard<S: AccessSubject>(identity: &Identity, subject: &S, action: Action) -> Result<()> {
    let decision = evaluate_subject(identity, subject, action);
    record(identity, S::KIND, action, decision)
}

/// Authorizes an action that has no target record yet, such as a create.
///
/// # Errors
///
/// Returns the core error for a denied decision.
pub fn guard_kind(identity: &Identity, kind: ResourceKind, action: Action) -> Result<()> {
    let decision = evaluate(identity, kind, None, action);
    record(identity, kind, action, decision)
}

fn record(
    identity: &Identity,
    kind: ResourceKind,
    action: Action,
    decision: AccessDecision,
) -> Result<()> {
    if decision.allowed {
        tracing::debug!(
            user_id = %identity.id,
            resource = %kind,
            action = %action,
            reason = %decision.reason,
            "access granted"
        );
    } else {
        tracing::info!(
            user_id = %identity.id,
            resource = %kind,
            action = %action,
            reason = %decision.reason,
            "access denied"
        );
    }
    Ok(decision.into_result()?)
}
