// Rust guideline compliant 2026-10-16

//! Listing helpers shared by every resource.

use aid_core::policy::{list_scope, AccessSubject};
use aid_core::proximity::DEFAULT_PARALLEL_THRESHOLD;
use aid_core::{Grievance, HelpPost, Identity, Rating, SupportTicket};
use chrono::{DateTime, Utc};
use rayon::prelude::*;

/// A record that can appear in a list read.
pub trait Listed: AccessSubject + Send {
    /// Record identifier.
    fn id(&self) -> &str;

    /// Creation time; lists are newest first.
    fn created_at(&self) -> DateTime<Utc>;
}

macro_rules! listed {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl Listed for $ty {
                fn id(&self) -> &str {
                    &self.id
                }

                fn created_at(&self) -> DateTime<Utc> {
                    self.created_at
                }
            }
        )+
    };
}

listed!(HelpPost, Grievance, SupportTicket, Rating);

/// Filters rows to what `identity` may see and sorts them newest first.
///
/// The list scope for the record kind is applied before `predicate`, so a
/// filter can never widen what the caller sees.
///
/// # Arguments
///
/// * `identity` - The requesting caller
/// * `rows` - Candidate rows as returned by storage
/// * `predicate` - Resource-specific filters
///
/// # Returns
///
/// The visible rows, newest first; ties keep input order.
pub fn list_records<T, P>(identity: &Identity, rows: Vec<T>, predicate: P) -> Vec<T>
where
    T: Listed,
    P: Fn(&T) -> bool + Sync,
{
    list_records_with_threshold(identity, rows, predicate, DEFAULT_PARALLEL_THRESHOLD)
}

/// [`list_records`] with an explicit parallel threshold.
pub fn list_records_with_threshold<T, P>(
    identity: &Identity,
    rows: Vec<T>,
    predicate: P,
    parallel_threshold: usize,
) -> Vec<T>
where
    T: Listed,
    P: Fn(&T) -> bool + Sync,
{
    let scope = list_scope(identity, T::KIND);
    let visible = |row: &T| scope.admits(&row.view()) && predicate(row);

    let mut rows: Vec<T> = if rows.len() >= parallel_threshold {
        rows.into_par_iter().filter(|row| visible(row)).collect()
    } else {
        rows.into_iter().filter(|row| visible(row)).collect()
    };

    rows.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
    rows
}
