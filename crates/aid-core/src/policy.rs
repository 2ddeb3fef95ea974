// Rust guideline compliant 2026-10-16

//! Resource access policy.
//!
//! One rule table covers every resource type. A rule lists the grantors
//! that may perform an action (anyone authenticated, an approved member,
//! the owner, the assignee, an admin) plus any value checks that apply
//! regardless of role. Anything without a matching grantor is denied.
//!
//! | resource       | read                  | create                   | update own | update status | delete | assign |
//! |----------------|-----------------------|--------------------------|------------|---------------|--------|--------|
//! | help_post      | anyone                | approved member          | owner      | owner         | owner  | -      |
//! | grievance      | owner, admin          | anyone                   | -          | admin         | -      | -      |
//! | support_ticket | owner, assignee, admin| anyone                   | -          | admin         | -      | admin  |
//! | ticket_message | owner, assignee, admin (of the parent ticket) | same | -   | -             | -      | -      |
//! | rating         | anyone                | anyone, not self, 1..=5  | -          | -             | -      | -      |
//! | profile        | owner, admin          | -                        | -          | admin         | -      | -      |

use crate::identity::Identity;
use crate::models::{
    Grievance, HelpPost, Profile, Rating, RatingDraft, SupportTicket, MAX_RATING, MIN_RATING,
};
use crate::{Error, Result};
use self::Grantor::{Admin, Anyone, Approved, Assignee, Owner};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Resource types subject to access control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    HelpPost,
    Grievance,
    SupportTicket,
    TicketMessage,
    Rating,
    Profile,
}

impl ResourceKind {
    /// Returns the wire form of the kind.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::HelpPost => "help_post",
            ResourceKind::Grievance => "grievance",
            ResourceKind::SupportTicket => "support_ticket",
            ResourceKind::TicketMessage => "ticket_message",
            ResourceKind::Rating => "rating",
            ResourceKind::Profile => "profile",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceKind {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        match value {
            "help_post" => Ok(ResourceKind::HelpPost),
            "grievance" => Ok(ResourceKind::Grievance),
            "support_ticket" | "ticket" => Ok(ResourceKind::SupportTicket),
            "ticket_message" => Ok(ResourceKind::TicketMessage),
            "rating" => Ok(ResourceKind::Rating),
            "profile" => Ok(ResourceKind::Profile),
            other => Err(Error::InvalidInput(format!("Invalid resource kind: {other}"))),
        }
    }
}

/// Actions a caller may request on a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Read,
    Create,
    UpdateOwnFields,
    UpdateStatus,
    Delete,
    Assign,
}

impl Action {
    /// Every action, in table order.
    pub const ALL: &'static [Action] = &[
        Action::Read,
        Action::Create,
        Action::UpdateOwnFields,
        Action::UpdateStatus,
        Action::Delete,
        Action::Assign,
    ];

    /// Returns the wire form of the action.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Read => "read",
            Action::Create => "create",
            Action::UpdateOwnFields => "update_own_fields",
            Action::UpdateStatus => "update_status",
            Action::Delete => "delete",
            Action::Assign => "assign",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        Action::ALL
            .iter()
            .copied()
            .find(|action| action.as_str() == value)
            .ok_or_else(|| Error::InvalidInput(format!("Invalid action: {value}")))
    }
}

/// Why a decision came out the way it did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Reason {
    /// Granted to any authenticated caller.
    Authenticated,
    /// Granted because the caller passed the approval gate.
    ApprovedMember,
    /// Granted because the caller owns the resource.
    Owner,
    /// Granted because the caller is assigned to the resource.
    Assignee,
    /// Granted by the admin role.
    Admin,
    /// Caller has not been approved yet.
    NotApproved,
    /// Only admins may do this.
    AdminRequired,
    /// Only the owner may do this.
    NotOwner,
    /// Caller is neither owner, assignee nor admin.
    NotParticipant,
    /// Members may not rate themselves.
    SelfRating,
    /// Rating value outside the accepted range.
    RatingOutOfRange,
    /// The decision needs a resource snapshot that was not supplied.
    MissingResource,
    /// The resource type does not support the action.
    Unsupported,
}

impl Reason {
    /// Returns `true` for reasons that grant access.
    #[must_use]
    pub fn is_grant(&self) -> bool {
        matches!(
            self,
            Reason::Authenticated
                | Reason::ApprovedMember
                | Reason::Owner
                | Reason::Assignee
                | Reason::Admin
        )
    }
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Reason::Authenticated => "authenticated caller",
            Reason::ApprovedMember => "approved member",
            Reason::Owner => "resource owner",
            Reason::Assignee => "resource assignee",
            Reason::Admin => "admin role",
            Reason::NotApproved => "account is not approved yet",
            Reason::AdminRequired => "admin access required",
            Reason::NotOwner => "only the owner may do this",
            Reason::NotParticipant => "access denied",
            Reason::SelfRating => "cannot rate yourself",
            Reason::RatingOutOfRange => "rating must be an integer between 1 and 5",
            Reason::MissingResource => "resource snapshot required",
            Reason::Unsupported => "action not supported for this resource",
        };
        f.write_str(text)
    }
}

/// Outcome of a policy evaluation. Always a value, never a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessDecision {
    pub allowed: bool,
    pub reason: Reason,
}

impl AccessDecision {
    fn allow(reason: Reason) -> Self {
        Self {
            allowed: true,
            reason,
        }
    }

    fn deny(reason: Reason) -> Self {
        Self {
            allowed: false,
            reason,
        }
    }

    /// Converts the decision into a `Result`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] for self-rating and out-of-range
    /// scores, and [`Error::Forbidden`] for every other denial.
    pub fn into_result(self) -> Result<()> {
        if self.allowed {
            return Ok(());
        }
        match self.reason {
            Reason::SelfRating | Reason::RatingOutOfRange => {
                Err(Error::InvalidInput(self.reason.to_string()))
            }
            reason => Err(Error::Forbidden(reason)),
        }
    }
}

/// The uniform shape every rule is evaluated against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ResourceView<'a> {
    /// Member who owns the record.
    pub owner_id: Option<&'a str>,
    /// Member the record is assigned to.
    pub assignee_id: Option<&'a str>,
    /// For ratings: the member being rated.
    pub rated_user_id: Option<&'a str>,
    /// For ratings: the score.
    pub rating: Option<i64>,
}

impl<'a> ResourceView<'a> {
    /// View of a ticket's message thread. Thread access follows the ticket.
    #[must_use]
    pub fn thread(ticket: &'a SupportTicket) -> Self {
        ticket.view()
    }
}

/// A record the policy can reason about.
pub trait AccessSubject {
    /// Rule table row family for this record.
    const KIND: ResourceKind;

    /// Projects the record onto the fields rules look at.
    fn view(&self) -> ResourceView<'_>;
}

impl AccessSubject for HelpPost {
    const KIND: ResourceKind = ResourceKind::HelpPost;

    fn view(&self) -> ResourceView<'_> {
        ResourceView {
            owner_id: Some(&self.user_id),
            ..ResourceView::default()
        }
    }
}

impl AccessSubject for Grievance {
    const KIND: ResourceKind = ResourceKind::Grievance;

    fn view(&self) -> ResourceView<'_> {
        ResourceView {
            owner_id: Some(&self.user_id),
            ..ResourceView::default()
        }
    }
}

impl AccessSubject for SupportTicket {
    const KIND: ResourceKind = ResourceKind::SupportTicket;

    fn view(&self) -> ResourceView<'_> {
        ResourceView {
            owner_id: Some(&self.user_id),
            assignee_id: self.assigned_to.as_deref(),
            ..ResourceView::default()
        }
    }
}

impl AccessSubject for Rating {
    const KIND: ResourceKind = ResourceKind::Rating;

    fn view(&self) -> ResourceView<'_> {
        ResourceView {
            owner_id: Some(&self.rater_id),
            rated_user_id: Some(&self.rated_user_id),
            rating: Some(self.rating),
            ..ResourceView::default()
        }
    }
}

impl AccessSubject for RatingDraft {
    const KIND: ResourceKind = ResourceKind::Rating;

    fn view(&self) -> ResourceView<'_> {
        ResourceView {
            rated_user_id: Some(&self.rated_user_id),
            rating: Some(self.rating),
            ..ResourceView::default()
        }
    }
}

impl AccessSubject for Profile {
    const KIND: ResourceKind = ResourceKind::Profile;

    fn view(&self) -> ResourceView<'_> {
        ResourceView {
            owner_id: Some(&self.id),
            ..ResourceView::default()
        }
    }
}

/// The message thread of a support ticket.
#[derive(Debug, Clone, Copy)]
pub struct TicketThread<'a>(pub &'a SupportTicket);

impl AccessSubject for TicketThread<'_> {
    const KIND: ResourceKind = ResourceKind::TicketMessage;

    fn view(&self) -> ResourceView<'_> {
        ResourceView::thread(self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Grantor {
    Anyone,
    Approved,
    Owner,
    Assignee,
    Admin,
}

/// Most privileged first; decides which grant a decision reports.
const PRECEDENCE: [Grantor; 5] = [
    Grantor::Admin,
    Grantor::Owner,
    Grantor::Assignee,
    Grantor::Approved,
    Grantor::Anyone,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Check {
    NotSelfRating,
    RatingInRange,
}

#[derive(Debug)]
struct Rule {
    kind: ResourceKind,
    action: Action,
    grantors: &'static [Grantor],
    checks: &'static [Check],
}

const fn rule(
    kind: ResourceKind,
    action: Action,
    grantors: &'static [Grantor],
    checks: &'static [Check],
) -> Rule {
    Rule {
        kind,
        action,
        grantors,
        checks,
    }
}

const RULES: &[Rule] = &[
    rule(ResourceKind::HelpPost, Action::Read, &[Anyone], &[]),
    rule(ResourceKind::HelpPost, Action::Create, &[Approved], &[]),
    rule(ResourceKind::HelpPost, Action::UpdateOwnFields, &[Owner], &[]),
    rule(ResourceKind::HelpPost, Action::UpdateStatus, &[Owner], &[]),
    rule(ResourceKind::HelpPost, Action::Delete, &[Owner], &[]),
    rule(ResourceKind::Grievance, Action::Read, &[Owner, Admin], &[]),
    rule(ResourceKind::Grievance, Action::Create, &[Anyone], &[]),
    rule(ResourceKind::Grievance, Action::UpdateStatus, &[Admin], &[]),
    rule(ResourceKind::SupportTicket, Action::Read, &[Owner, Assignee, Admin], &[]),
    rule(ResourceKind::SupportTicket, Action::Create, &[Anyone], &[]),
    rule(ResourceKind::SupportTicket, Action::UpdateStatus, &[Admin], &[]),
    rule(ResourceKind::SupportTicket, Action::Assign, &[Admin], &[]),
    rule(ResourceKind::TicketMessage, Action::Read, &[Owner, Assignee, Admin], &[]),
    rule(ResourceKind::TicketMessage, Action::Create, &[Owner, Assignee, Admin], &[]),
    rule(ResourceKind::Rating, Action::Read, &[Anyone], &[]),
    rule(
        ResourceKind::Rating,
        Action::Create,
        &[Anyone],
        &[Check::NotSelfRating, Check::RatingInRange],
    ),
    rule(ResourceKind::Profile, Action::Read, &[Owner, Admin], &[]),
    rule(ResourceKind::Profile, Action::UpdateStatus, &[Admin], &[]),
];

fn find_rule(kind: ResourceKind, action: Action) -> Option<&'static Rule> {
    RULES
        .iter()
        .find(|rule| rule.kind == kind && rule.action == action)
}

/// Returns `true` if the rule table has a row for `kind` × `action`.
#[must_use]
pub fn supports(kind: ResourceKind, action: Action) -> bool {
    find_rule(kind, action).is_some()
}

/// Decides whether `identity` may perform `action`.
///
/// # Arguments
///
/// * `identity` - The resolved caller
/// * `kind` - Resource type
/// * `resource` - Snapshot of the target, `None` for creates and lists
/// * `action` - Requested action
///
/// # Returns
///
/// A decision. The evaluator holds no state, so the same inputs always yield
/// the same decision.
#[must_use]
pub fn evaluate(
    identity: &Identity,
    kind: ResourceKind,
    resource: Option<ResourceView<'_>>,
    action: Action,
) -> AccessDecision {
    let Some(rule) = find_rule(kind, action) else {
        return AccessDecision::deny(Reason::Unsupported);
    };

    let view = resource.unwrap_or_default();

    for check in rule.checks {
        if let Some(reason) = failed_check(*check, identity, resource.as_ref()) {
            return AccessDecision::deny(reason);
        }
    }

    for grantor in PRECEDENCE {
        if rule.grantors.contains(&grantor) {
            if let Some(reason) = grant(grantor, identity, &view) {
                return AccessDecision::allow(reason);
            }
        }
    }

    AccessDecision::deny(denial_reason(rule, resource.is_some()))
}

/// Evaluates the policy for a concrete record.
#[must_use]
pub fn evaluate_subject<S: AccessSubject>(
    identity: &Identity,
    subject: &S,
    action: Action,
) -> AccessDecision {
    evaluate(identity, S::KIND, Some(subject.view()), action)
}

/// Evaluates the policy for a concrete record and converts denials to errors.
///
/// # Errors
///
/// Returns an error if the policy denies the action; see
/// [`AccessDecision::into_result`].
pub fn authorize<S: AccessSubject>(identity: &Identity, subject: &S, action: Action) -> Result<()> {
    evaluate_subject(identity, subject, action).into_result()
}

fn grant(grantor: Grantor, identity: &Identity, view: &ResourceView<'_>) -> Option<Reason> {
    let granted = match grantor {
        Grantor::Anyone => true,
        Grantor::Approved => identity.is_approved,
        Grantor::Owner => view.owner_id.is_some_and(|owner| identity.is(owner)),
        Grantor::Assignee => view.assignee_id.is_some_and(|assignee| identity.is(assignee)),
        Grantor::Admin => identity.is_admin(),
    };
    granted.then_some(match grantor {
        Grantor::Anyone => Reason::Authenticated,
        Grantor::Approved => Reason::ApprovedMember,
        Grantor::Owner => Reason::Owner,
        Grantor::Assignee => Reason::Assignee,
        Grantor::Admin => Reason::Admin,
    })
}

fn failed_check(
    check: Check,
    identity: &Identity,
    resource: Option<&ResourceView<'_>>,
) -> Option<Reason> {
    let Some(view) = resource else {
        return Some(Reason::MissingResource);
    };
    match check {
        Check::NotSelfRating => match view.rated_user_id {
            None => Some(Reason::MissingResource),
            Some(rated) if identity.is(rated) => Some(Reason::SelfRating),
            Some(_) => None,
        },
        Check::RatingInRange => match view.rating {
            Some(value) if (MIN_RATING..=MAX_RATING).contains(&value) => None,
            _ => Some(Reason::RatingOutOfRange),
        },
    }
}

fn denial_reason(rule: &Rule, has_resource: bool) -> Reason {
    let needs_resource = rule
        .grantors
        .iter()
        .any(|g| matches!(g, Grantor::Owner | Grantor::Assignee));
    match rule.grantors {
        [Grantor::Approved] => Reason::NotApproved,
        [Grantor::Admin] => Reason::AdminRequired,
        _ if needs_resource && !has_resource => Reason::MissingResource,
        [Grantor::Owner] => Reason::NotOwner,
        _ => Reason::NotParticipant,
    }
}

/// Row restriction a list query must apply for a caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "scope", content = "user_id", rename_all = "snake_case")]
pub enum ListScope {
    /// Every row is visible.
    All,
    /// Only rows owned by the user.
    Owned(String),
    /// Only rows owned by or assigned to the user.
    OwnedOrAssigned(String),
}

impl ListScope {
    /// Returns `true` if a row with this view passes the pre-filter.
    #[must_use]
    pub fn admits(&self, view: &ResourceView<'_>) -> bool {
        match self {
            ListScope::All => true,
            ListScope::Owned(user) => view.owner_id == Some(user.as_str()),
            ListScope::OwnedOrAssigned(user) => {
                view.owner_id == Some(user.as_str()) || view.assignee_id == Some(user.as_str())
            }
        }
    }
}

/// Returns the pre-filter a list read of `kind` must honor for `identity`.
#[must_use]
pub fn list_scope(identity: &Identity, kind: ResourceKind) -> ListScope {
    match kind {
        ResourceKind::HelpPost | ResourceKind::Rating => ListScope::All,
        _ if identity.is_admin() => ListScope::All,
        ResourceKind::Grievance | ResourceKind::Profile => ListScope::Owned(identity.id.clone()),
        ResourceKind::SupportTicket | ResourceKind::TicketMessage => {
            ListScope::OwnedOrAssigned(identity.id.clone())
        }
    }
}
