// Rust guideline compliant 2026-10-16

//! Help post requests: create, update, delete and list.

use crate::access::{guard, guard_kind};
use crate::apply::apply_transition;
use crate::error::{AppError, Result};
use crate::fields::Fields;
use crate::list::list_records;
use aid_core::{
    request_transition, Action, GeoPoint, HelpPost, HelpPostStatus, HelpPostType, Identity,
    ResourceKind, Transition,
};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Row to insert for a new help post.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewHelpPost {
    pub user_id: String,
    #[serde(rename = "type")]
    pub post_type: HelpPostType,
    pub title: String,
    pub description: String,
    pub category: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub status: HelpPostStatus,
}

/// Validates a create request.
///
/// `type`, `title`, `description` and `category` are required. Coordinates
/// are optional but must come as a pair.
///
/// # Errors
///
/// Returns `Forbidden` for unapproved callers and `InvalidInput` for bad
/// fields.
pub fn prepare_create(identity: &Identity, fields: &Fields) -> Result<NewHelpPost> {
    guard_kind(identity, ResourceKind::HelpPost, Action::Create)?;

    let post_type = fields
        .optional_parsed::<HelpPostType>("type")?
        .ok_or_else(|| AppError::InvalidInput("type is required".to_string()))?;
    let title = fields.required_str("title")?;
    let description = fields.required_str("description")?;
    let category = fields.required_str("category")?;
    let location =
        GeoPoint::from_parts(fields.optional_f64("latitude")?, fields.optional_f64("longitude")?)?;

    Ok(NewHelpPost {
        user_id: identity.id.clone(),
        post_type,
        title,
        description,
        category,
        latitude: location.map(|p| p.latitude),
        longitude: location.map(|p| p.longitude),
        status: HelpPostStatus::Open,
    })
}

/// Changes to write for a help post update.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HelpPostUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// New coordinates; `Some(None)` clears the location.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Option<GeoPoint>>,
    /// Status change, if the request asked for a different status.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transition: Option<Transition<HelpPostStatus>>,
    pub updated_at: DateTime<Utc>,
}

/// Validates an update request against the latest snapshot.
///
/// A `status` equal to the current one is not a transition and is dropped.
///
/// # Errors
///
/// Returns `Forbidden` unless the caller owns the post, `InvalidTransition`
/// for an illegal status edge and `InvalidInput` for bad fields.
pub fn prepare_update(
    identity: &Identity,
    post: &HelpPost,
    fields: &Fields,
    now: DateTime<Utc>,
) -> Result<HelpPostUpdate> {
    guard(identity, post, Action::UpdateOwnFields)?;

    let transition = match fields.optional_parsed::<HelpPostStatus>("status")? {
        Some(target) if target != post.status => {
            Some(request_transition(identity, post, target, now)?)
        }
        _ => None,
    };

    let latitude = fields.nullable_f64("latitude")?;
    let longitude = fields.nullable_f64("longitude")?;
    let location = if latitude.is_none() && longitude.is_none() {
        None
    } else {
        let merged_lat = latitude.unwrap_or(post.latitude);
        let merged_lon = longitude.unwrap_or(post.longitude);
        Some(GeoPoint::from_parts(merged_lat, merged_lon)?)
    };

    Ok(HelpPostUpdate {
        title: fields.optional_str("title")?,
        description: fields.optional_str("description")?,
        category: fields.optional_str("category")?,
        location,
        transition,
        updated_at: now,
    })
}

/// Applies an update to a snapshot.
///
/// # Errors
///
/// Returns `Conflict` if the status moved since the update was prepared.
pub fn apply_update(post: &mut HelpPost, update: &HelpPostUpdate) -> Result<()> {
    if let Some(transition) = &update.transition {
        apply_transition(post, transition, update.updated_at)?;
    }
    if let Some(title) = &update.title {
        post.title = title.clone();
    }
    if let Some(description) = &update.description {
        post.description = description.clone();
    }
    if let Some(category) = &update.category {
        post.category = category.clone();
    }
    if let Some(location) = update.location {
        post.latitude = location.map(|p| p.latitude);
        post.longitude = location.map(|p| p.longitude);
    }
    post.updated_at = update.updated_at;
    Ok(())
}

/// Authorizes a delete.
///
/// # Errors
///
/// Returns `Forbidden` unless the caller owns the post.
pub fn prepare_delete(identity: &Identity, post: &HelpPost) -> Result<()> {
    guard(identity, post, Action::Delete)
}

/// Optional equality filters for listing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HelpPostFilter {
    pub id: Option<String>,
    pub post_type: Option<HelpPostType>,
    pub status: Option<HelpPostStatus>,
    pub category: Option<String>,
}

impl HelpPostFilter {
    /// Reads `id`, `type`, `status` and `category` from query fields.
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown type or status.
    pub fn from_fields(fields: &Fields) -> Result<Self> {
        Ok(Self {
            id: fields.optional_str("id")?,
            post_type: fields.optional_parsed("type")?,
            status: fields.optional_parsed("status")?,
            category: fields.optional_str("category")?,
        })
    }

    /// Returns `true` if `post` passes every set filter.
    #[must_use]
    pub fn matches(&self, post: &HelpPost) -> bool {
        self.id.as_ref().map_or(true, |id| post.id == *id)
            && self.post_type.map_or(true, |t| post.post_type == t)
            && self.status.map_or(true, |s| post.status == s)
            && self.category.as_ref().map_or(true, |c| post.category == *c)
    }
}

/// Lists help posts visible to `identity`, newest first.
///
/// # Errors
///
/// Returns an error if the caller may not read help posts.
pub fn list(identity: &Identity, posts: Vec<HelpPost>, filter: &HelpPostFilter) -> Result<Vec<HelpPost>> {
    guard_kind(identity, ResourceKind::HelpPost, Action::Read)?;
    Ok(list_records(identity, posts, |post| filter.matches(post)))
}
