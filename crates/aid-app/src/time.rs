// Rust guideline compliant 2026-10-16

//! Timestamp helpers.

use chrono::{DateTime, Utc};

/// Returns the current time. The core never reads the clock itself.
#[must_use]
pub fn now() -> DateTime<Utc> {
    Utc::now()
}
