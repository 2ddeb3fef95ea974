// Rust guideline compliant 2026-10-16

//! Integration tests for CLI commands over snapshot files.

use aid_app::AppError;
use aid_cli::commands::approve::{self, ApprovalRequest};
use aid_cli::commands::check::{self, CheckTarget};
use aid_cli::commands::nearby::{self, NearbyQuery};
use aid_cli::commands::reply::{self, ReplyRequest};
use aid_cli::commands::transition::{self, TransitionRequest};
use aid_cli::commands::{config as config_cmd, ratings};
use aid_cli::snapshot::{load_records, save_records};
use aid_core::{
    Config, HelpPost, HelpPostStatus, HelpPostType, Identity, Profile, Rating, Role,
    SupportTicket, TicketPriority, TicketStatus, UserStatus,
};
use chrono::{DateTime, TimeZone, Utc};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn at(minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 5, 1, 12, minute, 0).unwrap()
}

fn member(id: &str) -> Identity {
    Identity::new(id).with_role(Role::User).approved(true)
}

fn admin() -> Identity {
    Identity::new("root").with_role(Role::Admin).approved(true)
}

fn post(id: &str, lat: Option<f64>, lon: Option<f64>) -> HelpPost {
    HelpPost {
        id: id.to_string(),
        user_id: "alice".to_string(),
        post_type: HelpPostType::NeedHelp,
        title: format!("Post {id}"),
        description: "d".to_string(),
        category: "groceries".to_string(),
        latitude: lat,
        longitude: lon,
        status: HelpPostStatus::Open,
        created_at: at(0),
        updated_at: at(0),
    }
}

fn ticket(id: &str, status: TicketStatus) -> SupportTicket {
    SupportTicket {
        id: id.to_string(),
        user_id: "alice".to_string(),
        subject: "Login".to_string(),
        message: "Cannot log in".to_string(),
        priority: TicketPriority::Medium,
        status,
        assigned_to: Some("staff".to_string()),
        resolved_at: None,
        created_at: at(0),
        updated_at: at(0),
    }
}

fn write_snapshot<T: serde::Serialize>(dir: &TempDir, name: &str, rows: &[T]) -> PathBuf {
    let path = dir.path().join(name);
    save_records(&path, rows).expect("Failed to write snapshot");
    path
}

fn app_status(err: &anyhow::Error) -> u16 {
    err.downcast_ref::<AppError>()
        .expect("command errors carry an AppError")
        .http_status()
}

#[test]
fn test_nearby_ranks_posts_from_snapshot() {
    let dir = TempDir::new().expect("Failed to create temp directory");
    let posts = write_snapshot(
        &dir,
        "posts.jsonl",
        &[
            post("A", Some(40.045), Some(-75.0)),
            post("B", Some(40.135), Some(-75.0)),
            post("C", None, None),
        ],
    );
    let query = NearbyQuery {
        latitude: 40.0,
        longitude: -75.0,
        radius_km: Some(10.0),
        ..NearbyQuery::default()
    };

    let response = nearby::run(&member("zed"), &Config::default(), &posts, &query).unwrap();
    assert_eq!(response.count, 1);
    assert_eq!(response.data[0].item.id, "A");
}

#[test]
fn test_nearby_rejects_radius_above_configured_max() {
    let dir = TempDir::new().expect("Failed to create temp directory");
    let posts = write_snapshot::<HelpPost>(&dir, "posts.jsonl", &[]);
    let config = Config {
        max_radius_km: 25.0,
        ..Config::default()
    };
    let query = NearbyQuery {
        latitude: 1.0,
        longitude: 1.0,
        radius_km: Some(30.0),
        ..NearbyQuery::default()
    };
    let err = nearby::run(&member("zed"), &config, &posts, &query).unwrap_err();
    assert_eq!(app_status(&err), 400);
}

#[test]
fn test_check_without_record() {
    let report = check::run(&member("zed"), "help_post", "create", &CheckTarget::default()).unwrap();
    assert!(report.decision.allowed);

    let pending = Identity::new("new").with_role(Role::User);
    let report = check::run(&pending, "help_post", "create", &CheckTarget::default()).unwrap();
    assert!(!report.decision.allowed);

    let err = check::run(&pending, "spaceship", "read", &CheckTarget::default()).unwrap_err();
    assert_eq!(app_status(&err), 400);
}

#[test]
fn test_check_against_ticket_snapshot() {
    let dir = TempDir::new().expect("Failed to create temp directory");
    let tickets = write_snapshot(&dir, "tickets.jsonl", &[ticket("tkt-1", TicketStatus::Open)]);
    let target = CheckTarget {
        records: Some(tickets.as_path()),
        id: Some("tkt-1"),
        ..CheckTarget::default()
    };

    assert!(check::run(&member("staff"), "support_ticket", "read", &target).unwrap().decision.allowed);
    assert!(check::run(&member("staff"), "ticket_message", "create", &target).unwrap().decision.allowed);
    assert!(!check::run(&member("mallory"), "support_ticket", "read", &target).unwrap().decision.allowed);

    let missing = CheckTarget {
        id: Some("tkt-404"),
        ..target.clone()
    };
    let err = check::run(&member("staff"), "support_ticket", "read", &missing).unwrap_err();
    assert_eq!(app_status(&err), 404);
}

#[test]
fn test_check_rating_draft() {
    let self_rating = CheckTarget {
        rated_user: Some("zed"),
        rating: Some(5),
        ..CheckTarget::default()
    };
    let report = check::run(&member("zed"), "rating", "create", &self_rating).unwrap();
    assert!(!report.decision.allowed);

    let fine = CheckTarget {
        rated_user: Some("amy"),
        rating: Some(4),
        ..CheckTarget::default()
    };
    assert!(check::run(&member("zed"), "rating", "create", &fine).unwrap().decision.allowed);

    let unscored = CheckTarget {
        rated_user: Some("amy"),
        ..CheckTarget::default()
    };
    let err = check::run(&member("zed"), "rating", "create", &unscored).unwrap_err();
    assert_eq!(app_status(&err), 400);
    assert!(err.to_string().contains("--rating"), "got {err}");
}

#[test]
fn test_check_rejects_action_the_kind_lacks() {
    let err = check::run(&admin(), "rating", "delete", &CheckTarget::default()).unwrap_err();
    assert_eq!(app_status(&err), 400);
    assert!(err.to_string().contains("rating has no delete action"), "got {err}");
}

#[test]
fn test_transition_dry_run_leaves_snapshot() {
    let dir = TempDir::new().expect("Failed to create temp directory");
    let tickets = write_snapshot(&dir, "tickets.jsonl", &[ticket("tkt-1", TicketStatus::InProgress)]);
    let request = TransitionRequest {
        kind: "ticket",
        records: &tickets,
        id: "tkt-1",
        status: "resolved",
        write: false,
    };

    let report = transition::run(&admin(), &request, at(30)).unwrap();
    assert_eq!(report.from, "in_progress");
    assert_eq!(report.to, "resolved");
    assert_eq!(report.side_effects.len(), 1);

    let stored: Vec<SupportTicket> = load_records(&tickets).unwrap();
    assert_eq!(stored[0].status, TicketStatus::InProgress);
}

#[test]
fn test_transition_write_persists_status_and_resolved_at() {
    let dir = TempDir::new().expect("Failed to create temp directory");
    let tickets = write_snapshot(&dir, "tickets.jsonl", &[ticket("tkt-1", TicketStatus::InProgress)]);
    let request = TransitionRequest {
        kind: "support_ticket",
        records: &tickets,
        id: "tkt-1",
        status: "resolved",
        write: true,
    };

    transition::run(&admin(), &request, at(30)).unwrap();
    let stored: Vec<SupportTicket> = load_records(&tickets).unwrap();
    assert_eq!(stored[0].status, TicketStatus::Resolved);
    assert_eq!(stored[0].resolved_at, Some(at(30)));
}

#[test]
fn test_transition_write_refuses_snapshot_with_malformed_lines() {
    let dir = TempDir::new().expect("Failed to create temp directory");
    let tickets = write_snapshot(&dir, "tickets.jsonl", &[ticket("tkt-1", TicketStatus::InProgress)]);
    let mut content = std::fs::read_to_string(&tickets).unwrap();
    content.push_str("{\"id\":\"tkt-2\",\"subject\":\"half a row\"}\n");
    std::fs::write(&tickets, &content).unwrap();

    let mut request = TransitionRequest {
        kind: "support_ticket",
        records: &tickets,
        id: "tkt-1",
        status: "resolved",
        write: true,
    };
    let err = transition::run(&admin(), &request, at(30)).unwrap_err();
    assert_eq!(app_status(&err), 400);
    assert_eq!(std::fs::read_to_string(&tickets).unwrap(), content);

    request.write = false;
    let report = transition::run(&admin(), &request, at(30)).unwrap();
    assert_eq!(report.to, "resolved");
}

#[test]
fn test_transition_errors() {
    let dir = TempDir::new().expect("Failed to create temp directory");
    let posts = write_snapshot(&dir, "posts.jsonl", &[post("p1", None, None)]);
    let records: &Path = &posts;
    let request = move |status: &'static str| TransitionRequest {
        kind: "help_post",
        records,
        id: "p1",
        status,
        write: true,
    };

    let err = transition::run(&member("bob"), &request("in_progress"), at(1)).unwrap_err();
    assert_eq!(app_status(&err), 403);

    let err = transition::run(&member("alice"), &request("completed"), at(1)).unwrap_err();
    assert_eq!(app_status(&err), 400);

    let err = transition::run(&member("alice"), &request("archived"), at(1)).unwrap_err();
    assert_eq!(app_status(&err), 400);

    let rating_request = TransitionRequest {
        kind: "rating",
        ..request("open")
    };
    assert!(transition::run(&member("alice"), &rating_request, at(1)).is_err());
}

#[test]
fn test_reply_escalates_open_ticket_on_write() {
    let dir = TempDir::new().expect("Failed to create temp directory");
    let tickets = write_snapshot(&dir, "tickets.jsonl", &[ticket("tkt-1", TicketStatus::Open)]);
    let request = ReplyRequest {
        tickets: &tickets,
        ticket_id: "tkt-1",
        message: "Looking into it",
        internal: false,
        write: true,
    };

    let plan = reply::run(&member("staff"), &request, at(5)).unwrap();
    assert_eq!(plan.side_effects.len(), 1);

    let stored: Vec<SupportTicket> = load_records(&tickets).unwrap();
    assert_eq!(stored[0].status, TicketStatus::InProgress);
    assert_eq!(stored[0].updated_at, at(5));

    let again = reply::run(&member("alice"), &request, at(6)).unwrap();
    assert!(again.side_effects.is_empty());
}

#[test]
fn test_reply_unknown_ticket_is_not_found() {
    let dir = TempDir::new().expect("Failed to create temp directory");
    let tickets = write_snapshot::<SupportTicket>(&dir, "tickets.jsonl", &[]);
    let request = ReplyRequest {
        tickets: &tickets,
        ticket_id: "tkt-9",
        message: "hello",
        internal: false,
        write: false,
    };
    let err = reply::run(&member("alice"), &request, at(1)).unwrap_err();
    assert_eq!(app_status(&err), 404);
}

#[test]
fn test_ratings_summary_from_snapshot() {
    let dir = TempDir::new().expect("Failed to create temp directory");
    let rating = |id: &str, score: i64, minute: u32| Rating {
        id: id.to_string(),
        rater_id: "zed".to_string(),
        rated_user_id: "amy".to_string(),
        help_post_id: None,
        rating: score,
        comment: None,
        created_at: at(minute),
    };
    let path = write_snapshot(&dir, "ratings.jsonl", &[rating("r1", 5, 1), rating("r2", 2, 2)]);

    let summary = ratings::run(&member("bob"), &path, "amy").unwrap();
    assert_eq!(summary.total_ratings, 2);
    assert_eq!(summary.average_rating, 3.5);
    assert_eq!(summary.data[0].id, "r2");
}

#[test]
fn test_approve_writes_profile_status() {
    let dir = TempDir::new().expect("Failed to create temp directory");
    let profile = Profile {
        id: "newbie".to_string(),
        full_name: "New Member".to_string(),
        status: UserStatus::Pending,
        created_at: at(0),
        updated_at: at(0),
    };
    let profiles = write_snapshot(&dir, "profiles.jsonl", &[profile]);
    let request = ApprovalRequest {
        profiles: &profiles,
        user_id: "newbie",
        status: "approved",
        role: Some("user"),
        write: true,
    };

    let err = approve::run(&member("alice"), &request, at(2)).unwrap_err();
    assert_eq!(app_status(&err), 403);

    let plan = approve::run(&admin(), &request, at(2)).unwrap();
    assert_eq!(plan.grant_role, Some(Role::User));
    let stored: Vec<Profile> = load_records(&profiles).unwrap();
    assert_eq!(stored[0].status, UserStatus::Approved);
}

#[test]
fn test_config_init_writes_defaults_once() {
    let dir = TempDir::new().expect("Failed to create temp directory");
    let written = config_cmd::init(dir.path(), false).unwrap();
    assert_eq!(written, Some(dir.path().join("config.toml")));
    assert_eq!(Config::load(dir.path()).unwrap(), Config::default());

    assert_eq!(config_cmd::init(dir.path(), false).unwrap(), None);
    assert!(config_cmd::init(dir.path(), true).unwrap().is_some());
}
