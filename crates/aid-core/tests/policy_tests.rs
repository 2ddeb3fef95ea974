// Rust guideline compliant 2026-10-16

//! Unit tests for the resource access policy.

use aid_core::policy::{evaluate_subject, ResourceView, TicketThread};
use aid_core::{
    evaluate, list_scope, Action, Grievance, GrievanceStatus, HelpPost, HelpPostStatus,
    HelpPostType, Identity, ListScope, RatingDraft, Reason, ResourceKind, Role, SupportTicket,
    TicketPriority, TicketStatus,
};
use chrono::Utc;

fn help_post(owner: &str) -> HelpPost {
    HelpPost {
        id: "post-1".to_string(),
        user_id: owner.to_string(),
        post_type: HelpPostType::OfferHelp,
        title: "Spare ladder".to_string(),
        description: "Happy to lend it".to_string(),
        category: "tools".to_string(),
        latitude: Some(40.0),
        longitude: Some(-75.0),
        status: HelpPostStatus::Open,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn grievance(owner: &str) -> Grievance {
    Grievance {
        id: "grv-1".to_string(),
        user_id: owner.to_string(),
        title: "Blocked driveway".to_string(),
        description: "Again".to_string(),
        category: "parking".to_string(),
        status: GrievanceStatus::Submitted,
        admin_notes: None,
        resolved_at: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn ticket(owner: &str, assignee: Option<&str>) -> SupportTicket {
    SupportTicket {
        id: "tkt-1".to_string(),
        user_id: owner.to_string(),
        subject: "App crash".to_string(),
        message: "Crashes on start".to_string(),
        priority: TicketPriority::High,
        status: TicketStatus::Open,
        assigned_to: assignee.map(str::to_string),
        resolved_at: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn member(id: &str) -> Identity {
    Identity::new(id).with_role(Role::User).approved(true)
}

fn admin() -> Identity {
    Identity::new("admin-1").with_role(Role::Admin).approved(true)
}

#[test]
fn test_help_post_owner_can_update_stranger_cannot() {
    let post = help_post("alice");
    let owner = evaluate_subject(&member("alice"), &post, Action::UpdateOwnFields);
    assert!(owner.allowed);
    assert_eq!(owner.reason, Reason::Owner);

    let stranger = evaluate_subject(&member("bob"), &post, Action::UpdateOwnFields);
    assert!(!stranger.allowed);
    assert!(matches!(
        stranger.into_result(),
        Err(aid_core::Error::Forbidden(Reason::NotOwner))
    ));
}

#[test]
fn test_help_post_delete_is_owner_only() {
    let post = help_post("alice");
    assert!(evaluate_subject(&member("alice"), &post, Action::Delete).allowed);
    assert!(!evaluate_subject(&member("bob"), &post, Action::Delete).allowed);
    assert!(!evaluate_subject(&admin(), &post, Action::Delete).allowed);
}

#[test]
fn test_help_post_read_open_to_any_authenticated_caller() {
    let post = help_post("alice");
    let unapproved = Identity::new("newbie");
    let decision = evaluate_subject(&unapproved, &post, Action::Read);
    assert!(decision.allowed);
    assert_eq!(decision.reason, Reason::Authenticated);
}

#[test]
fn test_help_post_create_requires_approval_regardless_of_role() {
    let approved = member("alice");
    assert!(evaluate(&approved, ResourceKind::HelpPost, None, Action::Create).allowed);

    let unapproved_admin = Identity::new("root").with_role(Role::Admin).approved(false);
    let decision = evaluate(&unapproved_admin, ResourceKind::HelpPost, None, Action::Create);
    assert!(!decision.allowed);
    assert_eq!(decision.reason, Reason::NotApproved);
}

#[test]
fn test_help_post_assign_is_unsupported() {
    let decision = evaluate_subject(&admin(), &help_post("alice"), Action::Assign);
    assert_eq!(decision.reason, Reason::Unsupported);
}

#[test]
fn test_grievance_read_owner_or_admin() {
    let g = grievance("alice");
    assert!(evaluate_subject(&member("alice"), &g, Action::Read).allowed);
    assert_eq!(
        evaluate_subject(&admin(), &g, Action::Read).reason,
        Reason::Admin
    );
    assert!(!evaluate_subject(&member("bob"), &g, Action::Read).allowed);
}

#[test]
fn test_grievance_status_admin_only_even_for_owner() {
    let g = grievance("alice");
    assert!(evaluate_subject(&admin(), &g, Action::UpdateStatus).allowed);
    let owner = evaluate_subject(&member("alice"), &g, Action::UpdateStatus);
    assert!(!owner.allowed);
    assert_eq!(owner.reason, Reason::AdminRequired);
}

#[test]
fn test_grievance_create_by_unapproved_member() {
    let newbie = Identity::new("newbie");
    assert!(evaluate(&newbie, ResourceKind::Grievance, None, Action::Create).allowed);
}

#[test]
fn test_ticket_read_by_owner_assignee_admin() {
    let t = ticket("alice", Some("staff"));
    assert_eq!(
        evaluate_subject(&member("alice"), &t, Action::Read).reason,
        Reason::Owner
    );
    assert_eq!(
        evaluate_subject(&member("staff"), &t, Action::Read).reason,
        Reason::Assignee
    );
    assert!(evaluate_subject(&admin(), &t, Action::Read).allowed);
    assert_eq!(
        evaluate_subject(&member("bob"), &t, Action::Read).reason,
        Reason::NotParticipant
    );
}

#[test]
fn test_ticket_assign_admin_only() {
    let t = ticket("alice", Some("staff"));
    assert!(evaluate_subject(&admin(), &t, Action::Assign).allowed);
    assert!(!evaluate_subject(&member("staff"), &t, Action::Assign).allowed);
    assert!(!evaluate_subject(&member("alice"), &t, Action::Assign).allowed);
}

#[test]
fn test_ticket_content_update_unsupported() {
    let t = ticket("alice", None);
    assert_eq!(
        evaluate_subject(&member("alice"), &t, Action::UpdateOwnFields).reason,
        Reason::Unsupported
    );
}

#[test]
fn test_ticket_thread_follows_parent_ticket() {
    let t = ticket("alice", Some("staff"));
    let thread = TicketThread(&t);
    for who in ["alice", "staff"] {
        assert!(evaluate_subject(&member(who), &thread, Action::Create).allowed);
        assert!(evaluate_subject(&member(who), &thread, Action::Read).allowed);
    }
    assert!(evaluate_subject(&admin(), &thread, Action::Create).allowed);
    assert!(!evaluate_subject(&member("bob"), &thread, Action::Create).allowed);
    assert_eq!(ResourceView::thread(&t).owner_id, Some("alice"));
}

#[test]
fn test_self_rating_denied_regardless_of_role() {
    let draft = RatingDraft {
        rated_user_id: "admin-1".to_string(),
        rating: 5,
        help_post_id: None,
        comment: None,
    };
    let decision = evaluate_subject(&admin(), &draft, Action::Create);
    assert!(!decision.allowed);
    assert_eq!(decision.reason, Reason::SelfRating);
    assert!(matches!(
        decision.into_result(),
        Err(aid_core::Error::InvalidInput(_))
    ));
}

#[test]
fn test_rating_value_range() {
    for (value, allowed) in [(0, false), (1, true), (3, true), (5, true), (6, false), (-2, false)] {
        let draft = RatingDraft {
            rated_user_id: "bob".to_string(),
            rating: value,
            help_post_id: None,
            comment: None,
        };
        let decision = evaluate_subject(&member("alice"), &draft, Action::Create);
        assert_eq!(decision.allowed, allowed, "rating {value}");
        if !allowed {
            assert_eq!(decision.reason, Reason::RatingOutOfRange);
        }
    }
}

#[test]
fn test_rating_create_needs_a_draft() {
    let decision = evaluate(&member("alice"), ResourceKind::Rating, None, Action::Create);
    assert_eq!(decision.reason, Reason::MissingResource);
}

#[test]
fn test_profile_status_admin_only() {
    let view = ResourceView {
        owner_id: Some("alice"),
        ..ResourceView::default()
    };
    assert!(evaluate(&admin(), ResourceKind::Profile, Some(view), Action::UpdateStatus).allowed);
    assert!(
        !evaluate(&member("alice"), ResourceKind::Profile, Some(view), Action::UpdateStatus).allowed
    );
}

#[test]
fn test_list_scopes() {
    let alice = member("alice");
    assert_eq!(list_scope(&alice, ResourceKind::HelpPost), ListScope::All);
    assert_eq!(list_scope(&alice, ResourceKind::Rating), ListScope::All);
    assert_eq!(
        list_scope(&alice, ResourceKind::Grievance),
        ListScope::Owned("alice".to_string())
    );
    assert_eq!(
        list_scope(&alice, ResourceKind::SupportTicket),
        ListScope::OwnedOrAssigned("alice".to_string())
    );
    assert_eq!(list_scope(&admin(), ResourceKind::Grievance), ListScope::All);
    assert_eq!(list_scope(&admin(), ResourceKind::SupportTicket), ListScope::All);
}

#[test]
fn test_multiple_roles_take_most_privileged_rule() {
    let both = Identity::new("alice")
        .with_role(Role::User)
        .with_role(Role::Admin);
    let g = grievance("bob");
    assert_eq!(evaluate_subject(&both, &g, Action::UpdateStatus).reason, Reason::Admin);
    assert_eq!(list_scope(&both, ResourceKind::Grievance), ListScope::All);
}
