// Rust guideline compliant 2026-10-16

//! Nearby help search.

use crate::access::guard_kind;
use crate::error::{AppError, Result};
use crate::fields::Fields;
use aid_core::proximity::{rank_nearby_with_threshold, Nearby};
use aid_core::{
    Action, Config, GeoPoint, HelpPost, HelpPostStatus, HelpPostType, Identity, ResourceKind,
    SearchRadius,
};
use serde::Serialize;

/// Validated search parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct NearbyParams {
    pub origin: GeoPoint,
    pub radius: SearchRadius,
    pub post_type: Option<HelpPostType>,
    pub category: Option<String>,
}

impl NearbyParams {
    /// Reads search parameters from query fields.
    ///
    /// `latitude` and `longitude` are required; zero is a valid value.
    /// `radius_km` (or its alias `radius`) defaults to the configured radius
    /// and may not exceed the configured maximum.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for missing or unparseable coordinates, an
    /// out-of-range radius, or an unknown `type`.
    pub fn from_fields(fields: &Fields, config: &Config) -> Result<Self> {
        let (Some(latitude), Some(longitude)) = (
            fields.optional_f64("latitude")?,
            fields.optional_f64("longitude")?,
        ) else {
            return Err(AppError::InvalidInput(
                "latitude and longitude are required".to_string(),
            ));
        };
        let origin = GeoPoint::new(latitude, longitude)?;

        let requested = match fields.optional_f64("radius_km")? {
            Some(km) => Some(km),
            None => fields.optional_f64("radius")?,
        };
        let km = requested.unwrap_or(config.default_radius_km);
        if km > config.max_radius_km {
            return Err(AppError::InvalidInput(format!(
                "radius_km may not exceed {} km",
                config.max_radius_km
            )));
        }

        Ok(Self {
            origin,
            radius: SearchRadius::new(km)?,
            post_type: fields.optional_parsed("type")?,
            category: fields.optional_str("category")?,
        })
    }

    fn admits(&self, post: &HelpPost) -> bool {
        post.status == HelpPostStatus::Open
            && self.post_type.map_or(true, |t| post.post_type == t)
            && self.category.as_ref().map_or(true, |c| post.category == *c)
    }
}

/// Echo of the parameters a search ran with.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SearchParams {
    pub latitude: f64,
    pub longitude: f64,
    pub radius_km: f64,
}

/// Response body of a nearby search.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NearbyResponse {
    /// Matches, nearest first.
    pub data: Vec<Nearby<HelpPost>>,
    pub count: usize,
    pub search_params: SearchParams,
}

/// Finds open help posts near the origin.
///
/// Type and category filters run before any distance is computed. Posts
/// with one coordinate missing are skipped with a warning.
///
/// # Errors
///
/// Returns an error if the caller may not read help posts.
pub fn search_nearby(
    identity: &Identity,
    params: &NearbyParams,
    posts: Vec<HelpPost>,
    config: &Config,
) -> Result<NearbyResponse> {
    guard_kind(identity, ResourceKind::HelpPost, Action::Read)?;

    let candidates: Vec<(HelpPost, Option<GeoPoint>)> = posts
        .into_iter()
        .filter(|post| params.admits(post))
        .filter_map(|post| match post.location() {
            Ok(location) => Some((post, location)),
            Err(err) => {
                tracing::warn!(post_id = %post.id, error = %err, "skipping post with bad location");
                None
            }
        })
        .collect();

    let data: Vec<Nearby<HelpPost>> = rank_nearby_with_threshold(
        params.origin,
        params.radius,
        candidates,
        |(_, location)| *location,
        config.parallel_threshold,
    )
    .into_iter()
    .map(|nearby| Nearby {
        item: nearby.item.0,
        distance_km: nearby.distance_km,
    })
    .collect();

    tracing::debug!(
        user_id = %identity.id,
        radius_km = params.radius.km(),
        matches = data.len(),
        "nearby search"
    );

    Ok(NearbyResponse {
        count: data.len(),
        data,
        search_params: SearchParams {
            latitude: params.origin.latitude,
            longitude: params.origin.longitude,
            radius_km: params.radius.km(),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_radius_alias_and_default() {
        let config = Config::default();
        let fields = Fields::from_pairs([("latitude", "1"), ("longitude", "2"), ("radius", "3")]);
        assert_eq!(NearbyParams::from_fields(&fields, &config).unwrap().radius.km(), 3.0);

        let fields = Fields::from_pairs([("latitude", "1"), ("longitude", "2")]);
        assert_eq!(NearbyParams::from_fields(&fields, &config).unwrap().radius.km(), 10.0);
    }

    #[test]
    fn test_radius_km_wins_over_alias() {
        let fields = Fields::from_pairs([
            ("latitude", "1"),
            ("longitude", "2"),
            ("radius", "3"),
            ("radius_km", "4"),
        ]);
        let params = NearbyParams::from_fields(&fields, &Config::default()).unwrap();
        assert_eq!(params.radius.km(), 4.0);
    }

    #[test]
    fn test_radius_above_max_is_rejected() {
        let config = Config {
            max_radius_km: 50.0,
            ..Config::default()
        };
        let fields = Fields::from_pairs([("latitude", "1"), ("longitude", "2"), ("radius_km", "51")]);
        assert!(NearbyParams::from_fields(&fields, &config).is_err());
    }

    #[test]
    fn test_zero_coordinates_are_accepted() {
        let fields = Fields::from_pairs([("latitude", "0"), ("longitude", "0")]);
        let params = NearbyParams::from_fields(&fields, &Config::default()).unwrap();
        assert_eq!(params.origin, GeoPoint::new(0.0, 0.0).unwrap());
    }

    #[test]
    fn test_missing_coordinate_is_rejected() {
        let fields = Fields::from_pairs([("latitude", "40")]);
        let err = NearbyParams::from_fields(&fields, &Config::default()).unwrap_err();
        assert_eq!(err.http_status(), 400);
    }
}
