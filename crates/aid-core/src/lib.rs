// Rust guideline compliant 2026-10-16

//! Mutual Aid Core Library
//!
//! Decision logic shared by every resource on the platform:
//! - Identity context (resolved actor, roles, approval)
//! - Resource records and status vocabularies
//! - Access policy (deny-by-default rule table, list scoping)
//! - Status transitions and their side effects
//! - Great-circle distance and proximity ranking
//! - Error types and configuration
//!
//! Nothing in this crate performs I/O on behalf of a request. Every function
//! returns a value (a decision, a ranked list, a transition plan) for the
//! caller to act on.

pub mod config;
pub mod error;
pub mod fsm;
pub mod geo;
pub mod identity;
pub mod models;
pub mod policy;
pub mod proximity;

pub use config::{Config, OutputFormat};
pub use error::{Error, Result};
pub use fsm::{on_ticket_message, request_transition, SideEffect, StatusMachine, Transition};
pub use geo::{distance_km, GeoPoint};
pub use identity::{require_identity, Identity, Role};
pub use models::{
    Grievance, GrievanceStatus, HelpPost, HelpPostStatus, HelpPostType, Profile, Rating,
    RatingDraft, SupportTicket, TicketMessage, TicketPriority, TicketStatus, UserStatus,
};
pub use policy::{evaluate, list_scope, AccessDecision, Action, ListScope, Reason, ResourceKind};
pub use proximity::{find_nearby, rank_nearby, Candidate, ProximityResult, SearchRadius};
