// Rust guideline compliant 2026-10-16

//! Implementation of the `aid nearby` command.

use crate::snapshot::load_records;
use crate::OutputFormatter;
use aid_app::{search_nearby, Fields, NearbyParams, NearbyResponse};
use aid_core::{Config, HelpPost, Identity};
use anyhow::Result;
use std::path::Path;

/// Search options as given on the command line.
#[derive(Debug, Clone, Default)]
pub struct NearbyQuery {
    pub latitude: f64,
    pub longitude: f64,
    pub radius_km: Option<f64>,
    pub post_type: Option<String>,
    pub category: Option<String>,
}

impl NearbyQuery {
    fn to_fields(&self) -> Fields {
        let mut fields = Fields::new()
            .with("latitude", self.latitude)
            .with("longitude", self.longitude);
        if let Some(radius) = self.radius_km {
            fields = fields.with("radius_km", radius);
        }
        if let Some(post_type) = &self.post_type {
            fields = fields.with("type", post_type.as_str());
        }
        if let Some(category) = &self.category {
            fields = fields.with("category", category.as_str());
        }
        fields
    }
}

/// Ranks the open posts in `posts_path` by distance from the query origin.
///
/// # Errors
///
/// Returns an error if the snapshot cannot be read or the query is invalid.
pub fn run(
    identity: &Identity,
    config: &Config,
    posts_path: &Path,
    query: &NearbyQuery,
) -> Result<NearbyResponse> {
    let params = NearbyParams::from_fields(&query.to_fields(), config)?;
    let posts: Vec<HelpPost> = load_records(posts_path)?;
    Ok(search_nearby(identity, &params, posts, config)?)
}

/// Runs the search and prints the ranked posts.
///
/// # Errors
///
/// See [`run`].
pub fn execute(
    identity: &Identity,
    config: &Config,
    posts_path: &Path,
    query: &NearbyQuery,
    formatter: &dyn OutputFormatter,
) -> Result<()> {
    let response = run(identity, config, posts_path, query)?;
    println!("{}", formatter.format_nearby(&response));
    Ok(())
}
