// Rust guideline compliant 2026-10-16

//! Core data models for the mutual aid platform.
//!
//! Records mirror the rows the storage collaborator returns. The core reads
//! them as snapshots and never persists them.

use crate::geo::GeoPoint;
use crate::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Declares a closed vocabulary with its snake_case wire form.
macro_rules! vocabulary {
    (
        $(#[$meta:meta])*
        $name:ident, $label:literal {
            $($(#[$vmeta:meta])* $variant:ident => $wire:literal,)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($(#[$vmeta])* $variant,)+
        }

        impl $name {
            /// Every value of the vocabulary, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant,)+];

            /// Returns the wire form of the value.
            #[must_use]
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = Error;

            fn from_str(value: &str) -> Result<Self> {
                match value {
                    $($wire => Ok($name::$variant),)+
                    other => Err(Error::InvalidInput(format!(
                        concat!("Invalid ", $label, ": {}"),
                        other
                    ))),
                }
            }
        }
    };
}

vocabulary! {
    /// Lifecycle of a help request or offer.
    HelpPostStatus, "help post status" {
        /// Visible and waiting for a match.
        Open => "open",
        /// Someone is helping.
        InProgress => "in_progress",
        /// Help was delivered.
        Completed => "completed",
        /// Withdrawn by its owner.
        Cancelled => "cancelled",
    }
}

vocabulary! {
    /// Whether a post asks for help or offers it.
    HelpPostType, "help post type" {
        /// The owner needs help.
        NeedHelp => "need_help",
        /// The owner offers help.
        OfferHelp => "offer_help",
    }
}

vocabulary! {
    /// Lifecycle of a grievance.
    GrievanceStatus, "grievance status" {
        /// Filed, not yet looked at.
        Submitted => "submitted",
        /// An admin is reviewing it.
        UnderReview => "under_review",
        /// An outcome was reached.
        Resolved => "resolved",
        /// No further action.
        Closed => "closed",
    }
}

vocabulary! {
    /// Lifecycle of a support ticket.
    TicketStatus, "ticket status" {
        /// Raised, no reply yet.
        Open => "open",
        /// Conversation under way.
        InProgress => "in_progress",
        /// Answered.
        Resolved => "resolved",
        /// Finished.
        Closed => "closed",
    }
}

vocabulary! {
    /// Triage priority of a support ticket.
    TicketPriority, "ticket priority" {
        Low => "low",
        Medium => "medium",
        High => "high",
        Urgent => "urgent",
    }
}

vocabulary! {
    /// Signup approval state of a member profile.
    UserStatus, "user status" {
        /// Awaiting an admin decision.
        Pending => "pending",
        /// Full member.
        Approved => "approved",
        /// Signup refused.
        Rejected => "rejected",
        /// Membership paused by an admin.
        Suspended => "suspended",
    }
}

impl Default for TicketPriority {
    fn default() -> Self {
        TicketPriority::Medium
    }
}

/// A request for help or an offer of help.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HelpPost {
    /// Record identifier.
    pub id: String,
    /// Owner of the post.
    pub user_id: String,
    /// Need or offer.
    #[serde(rename = "type")]
    pub post_type: HelpPostType,
    /// One-line summary.
    pub title: String,
    /// Free-form details.
    pub description: String,
    /// Category chosen by the owner.
    pub category: String,
    /// Latitude in degrees, if the owner shared a location.
    #[serde(default)]
    pub latitude: Option<f64>,
    /// Longitude in degrees, if the owner shared a location.
    #[serde(default)]
    pub longitude: Option<f64>,
    /// Current status.
    pub status: HelpPostStatus,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last update time.
    pub updated_at: DateTime<Utc>,
}

impl HelpPost {
    /// Returns the post location.
    ///
    /// # Returns
    ///
    /// `Ok(None)` when the post has no coordinates.
    ///
    /// # Errors
    ///
    /// Returns an error if only one coordinate is set or either is out of range.
    pub fn location(&self) -> Result<Option<GeoPoint>> {
        GeoPoint::from_parts(self.latitude, self.longitude)
    }
}

/// A complaint filed with the moderators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grievance {
    pub id: String,
    /// Member who filed it.
    pub user_id: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub status: GrievanceStatus,
    /// Notes left by the reviewing admin.
    #[serde(default)]
    pub admin_notes: Option<String>,
    /// Set when the grievance entered `resolved`.
    #[serde(default)]
    pub resolved_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A support request raised with the platform team.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupportTicket {
    pub id: String,
    /// Member who raised it.
    pub user_id: String,
    pub subject: String,
    /// Opening message body.
    pub message: String,
    #[serde(default)]
    pub priority: TicketPriority,
    pub status: TicketStatus,
    /// Staff member handling the ticket.
    #[serde(default)]
    pub assigned_to: Option<String>,
    /// Set when the ticket entered `resolved` or `closed`.
    #[serde(default)]
    pub resolved_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One message in a support ticket thread.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TicketMessage {
    pub id: String,
    /// Parent ticket.
    pub ticket_id: String,
    /// Author of the message.
    pub user_id: String,
    pub message: String,
    /// Staff-only note.
    #[serde(default)]
    pub is_internal: bool,
    pub created_at: DateTime<Utc>,
}

/// A score one member gave another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rating {
    pub id: String,
    /// Member who gave the rating.
    pub rater_id: String,
    /// Member being rated.
    pub rated_user_id: String,
    /// Help post the rating refers to.
    #[serde(default)]
    pub help_post_id: Option<String>,
    /// Score, 1 to 5.
    pub rating: i64,
    #[serde(default)]
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A rating that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingDraft {
    /// Member being rated.
    pub rated_user_id: String,
    /// Proposed score.
    pub rating: i64,
    #[serde(default)]
    pub help_post_id: Option<String>,
    #[serde(default)]
    pub comment: Option<String>,
}

/// Lowest accepted rating score.
pub const MIN_RATING: i64 = 1;

/// Highest accepted rating score.
pub const MAX_RATING: i64 = 5;

/// A member profile, as far as the approval flow needs it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    pub full_name: String,
    pub status: UserStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vocabulary_wire_forms() {
        assert_eq!(HelpPostStatus::InProgress.as_str(), "in_progress");
        assert_eq!(GrievanceStatus::UnderReview.to_string(), "under_review");
        assert_eq!(
            "offer_help".parse::<HelpPostType>().unwrap(),
            HelpPostType::OfferHelp
        );
        assert_eq!(TicketPriority::default(), TicketPriority::Medium);
    }

    #[test]
    fn test_vocabulary_rejects_unknown_value() {
        let err = "done".parse::<HelpPostStatus>().unwrap_err();
        assert_eq!(err.to_string(), "Invalid input: Invalid help post status: done");
    }

    #[test]
    fn test_help_post_type_field_uses_wire_name() {
        let json = r#"{
            "id": "p1", "user_id": "u1", "type": "need_help",
            "title": "Groceries", "description": "Need a hand",
            "category": "errands", "status": "open",
            "created_at": "2026-01-01T00:00:00Z", "updated_at": "2026-01-01T00:00:00Z"
        }"#;
        let post: HelpPost = serde_json::from_str(json).unwrap();
        assert_eq!(post.post_type, HelpPostType::NeedHelp);
        assert_eq!(post.location().unwrap(), None);
    }

    #[test]
    fn test_help_post_location_rejects_half_coordinates() {
        let json = r#"{
            "id": "p1", "user_id": "u1", "type": "offer_help",
            "title": "Tools", "description": "Ladder to lend",
            "category": "tools", "status": "open", "latitude": 40.0,
            "created_at": "2026-01-01T00:00:00Z", "updated_at": "2026-01-01T00:00:00Z"
        }"#;
        let post: HelpPost = serde_json::from_str(json).unwrap();
        assert!(matches!(post.location(), Err(Error::InvalidInput(_))));
    }
}
