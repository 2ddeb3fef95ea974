// Rust guideline compliant 2026-10-16

//! Property-based tests for the proximity matcher.

use aid_core::{find_nearby, Candidate, GeoPoint, SearchRadius};
use proptest::prelude::*;

fn arb_point_near(lat: f64, lon: f64) -> impl Strategy<Value = GeoPoint> {
    (-0.5f64..=0.5, -0.5f64..=0.5)
        .prop_map(move |(dlat, dlon)| GeoPoint::new(lat + dlat, lon + dlon).expect("in range"))
}

fn arb_candidates() -> impl Strategy<Value = Vec<Candidate>> {
    prop::collection::vec(prop::option::of(arb_point_near(40.0, -75.0)), 0..60).prop_map(
        |points| {
            points
                .into_iter()
                .enumerate()
                .map(|(i, location)| Candidate::new(format!("c{i}"), location))
                .collect()
        },
    )
}

proptest! {
    /// Every result lies within the radius, results are sorted, and
    /// candidates without a location never appear.
    #[test]
    fn prop_results_within_radius_and_sorted(
        candidates in arb_candidates(),
        radius_km in 0.5f64..80.0,
    ) {
        let origin = GeoPoint::new(40.0, -75.0).expect("valid origin");
        let radius = SearchRadius::new(radius_km).expect("positive radius");
        let results = find_nearby(origin, radius, &candidates);

        for result in &results {
            prop_assert!(result.distance_km <= radius_km);
            let candidate = candidates
                .iter()
                .find(|c| c.id == result.resource_id)
                .expect("result comes from the input");
            prop_assert!(candidate.location.is_some());
        }
        for pair in results.windows(2) {
            prop_assert!(pair[0].distance_km <= pair[1].distance_km);
        }
    }

    /// Growing the radius never drops a match.
    #[test]
    fn prop_larger_radius_is_superset(candidates in arb_candidates(), km in 1.0f64..40.0) {
        let origin = GeoPoint::new(40.0, -75.0).expect("valid origin");
        let small = find_nearby(origin, SearchRadius::new(km).expect("radius"), &candidates);
        let large = find_nearby(origin, SearchRadius::new(km * 2.0).expect("radius"), &candidates);
        for result in &small {
            prop_assert!(large.iter().any(|r| r.resource_id == result.resource_id));
        }
    }
}
