// Rust guideline compliant 2026-10-16

//! Radius-bounded, distance-ranked matching.
//!
//! The matcher works on the point set storage already returned. It never
//! fails: candidates without a location are left out, and an empty input or
//! nothing within range yields an empty result.

use crate::geo::{distance_km, round_km, GeoPoint};
use crate::{Error, Result};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Radius used when a search does not name one.
pub const DEFAULT_RADIUS_KM: f64 = 10.0;

/// Candidate count at which scoring switches to the rayon pool.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 1_000;

/// A validated search radius in kilometres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SearchRadius(f64);

impl SearchRadius {
    /// Creates a radius.
    ///
    /// # Errors
    ///
    /// Returns an error if `km` is not a finite number greater than zero.
    pub fn new(km: f64) -> Result<Self> {
        if km.is_finite() && km > 0.0 {
            Ok(Self(km))
        } else {
            Err(Error::InvalidInput(format!(
                "radius_km must be a positive number, got {km}"
            )))
        }
    }

    /// Returns the radius in kilometres.
    #[must_use]
    pub fn km(&self) -> f64 {
        self.0
    }
}

impl Default for SearchRadius {
    fn default() -> Self {
        Self(DEFAULT_RADIUS_KM)
    }
}

/// A resource id paired with its location, if it has one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: String,
    #[serde(default)]
    pub location: Option<GeoPoint>,
}

impl Candidate {
    pub fn new(id: impl Into<String>, location: Option<GeoPoint>) -> Self {
        Self {
            id: id.into(),
            location,
        }
    }
}

/// A matched resource and its distance from the origin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProximityResult {
    pub resource_id: String,
    /// Distance rounded to two decimals.
    pub distance_km: f64,
}

/// An item that fell within the search radius.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Nearby<T> {
    /// The matched item.
    #[serde(flatten)]
    pub item: T,
    /// Distance from the origin, rounded to two decimals and capped at the radius.
    pub distance_km: f64,
}

/// Finds candidates within `radius` of `origin`, nearest first.
///
/// # Arguments
///
/// * `origin` - Search centre
/// * `radius` - Inclusive search radius
/// * `candidates` - Ids with optional locations
///
/// # Returns
///
/// Results ordered by ascending distance; ties keep input order.
#[must_use]
pub fn find_nearby(
    origin: GeoPoint,
    radius: SearchRadius,
    candidates: &[Candidate],
) -> Vec<ProximityResult> {
    rank_nearby(origin, radius, candidates.iter().collect(), |c| c.location)
        .into_iter()
        .map(|nearby| ProximityResult {
            resource_id: nearby.item.id.clone(),
            distance_km: nearby.distance_km,
        })
        .collect()
}

/// Ranks arbitrary items by distance, keeping the items themselves.
///
/// `locate` returns `None` for items without a location; those are dropped.
#[must_use]
pub fn rank_nearby<T, F>(
    origin: GeoPoint,
    radius: SearchRadius,
    items: Vec<T>,
    locate: F,
) -> Vec<Nearby<T>>
where
    T: Send,
    F: Fn(&T) -> Option<GeoPoint> + Sync,
{
    rank_nearby_with_threshold(origin, radius, items, locate, DEFAULT_PARALLEL_THRESHOLD)
}

/// [`rank_nearby`] with an explicit parallel threshold.
#[must_use]
pub fn rank_nearby_with_threshold<T, F>(
    origin: GeoPoint,
    radius: SearchRadius,
    items: Vec<T>,
    locate: F,
    parallel_threshold: usize,
) -> Vec<Nearby<T>>
where
    T: Send,
    F: Fn(&T) -> Option<GeoPoint> + Sync,
{
    let limit = radius.km();
    // The radius test uses the unrounded distance.
    let score = |item: T| -> Option<(f64, T)> {
        let location = locate(&item)?;
        let distance = distance_km(origin, location);
        (distance <= limit).then_some((distance, item))
    };

    let mut scored: Vec<(f64, T)> = if items.len() >= parallel_threshold {
        items.into_par_iter().filter_map(&score).collect()
    } else {
        items.into_iter().filter_map(&score).collect()
    };

    // Stable sort keeps input order for equal distances.
    scored.sort_by(|a, b| a.0.total_cmp(&b.0));

    scored
        .into_iter()
        .map(|(distance, item)| Nearby {
            item,
            // Presented distance never exceeds the radius.
            distance_km: round_km(distance).min(limit),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_radius_validation() {
        assert!(SearchRadius::new(0.0).is_err());
        assert!(SearchRadius::new(-1.0).is_err());
        assert!(SearchRadius::new(f64::NAN).is_err());
        assert_eq!(SearchRadius::new(2.5).unwrap().km(), 2.5);
        assert_eq!(SearchRadius::default().km(), DEFAULT_RADIUS_KM);
    }

    #[test]
    fn test_parallel_path_matches_sequential() {
        let origin = GeoPoint::new(51.5, -0.12).unwrap();
        let items: Vec<(usize, Option<GeoPoint>)> = (0..64)
            .map(|i| {
                let offset = (i % 16) as f64 * 0.01;
                let location = if i % 7 == 0 {
                    None
                } else {
                    Some(GeoPoint::new(51.5 + offset, -0.12).unwrap())
                };
                (i, location)
            })
            .collect();
        let radius = SearchRadius::new(8.0).unwrap();

        let sequential =
            rank_nearby_with_threshold(origin, radius, items.clone(), |(_, p)| *p, usize::MAX);
        let parallel = rank_nearby_with_threshold(origin, radius, items, |(_, p)| *p, 1);

        let ids = |v: &[Nearby<(usize, Option<GeoPoint>)>]| -> Vec<usize> {
            v.iter().map(|n| n.item.0).collect()
        };
        assert_eq!(ids(&sequential), ids(&parallel));
        assert!(!sequential.is_empty());
    }
}
