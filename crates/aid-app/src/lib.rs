// Rust guideline compliant 2026-10-16

//! Request orchestration for the mutual aid platform.
//!
//! This crate sits between transport and storage. It turns untyped request
//! fields into validated rows, asks the core whether the caller may act,
//! and returns plans for storage to apply. It performs no I/O of its own
//! apart from installing the log subscriber.

pub mod access;
pub mod apply;
pub mod approval;
pub mod error;
pub mod fields;
pub mod grievances;
pub mod help_posts;
pub mod list;
pub mod logging;
pub mod nearby;
pub mod ratings;
pub mod response;
pub mod tickets;
pub mod time;

pub use access::guard;
pub use apply::{apply_side_effects, apply_transition, StatusRecord};
pub use error::{AppError, ErrorCode, Result};
pub use fields::Fields;
pub use list::{list_records, Listed};
pub use logging::{init_tracing, LogOptions};
pub use nearby::{search_nearby, NearbyParams, NearbyResponse};
pub use response::{ErrorEnvelope, SuccessEnvelope};
pub use time::now;
