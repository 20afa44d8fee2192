//! Annual indicator family
//!
//! An indicator turns an organization's records into a year-indexed series
//! of scalars over a requested year range, then optionally collapses the
//! series into one number with a merge function. Concrete indicators differ
//! in three places: which sub-entities are eligible, what each eligible
//! entity contributes to a year, and how the series merges.
//!
//! Contributions are independent per entity, so the accumulation runs in
//! parallel; the shared year buckets use an atomic entry+merge so no update
//! is lost when several entities land in the same year.

pub mod budget;
pub mod workforce;

use std::collections::BTreeMap;

use chrono::NaiveDate;
use dashmap::DashMap;
use rayon::prelude::*;

use crate::models::Organization;
use crate::temporal::year_bounds;

pub use budget::{
    AcademicProjectCountIndicator, NotAcademicProjectBudgetIndicator, TotalProjectBudgetIndicator,
};
pub use workforce::{
    PermanentResearcherFteIndicator, PhdStudentFteIndicator, PostdocFteIndicator,
};

/// Reduction collapsing a year→value series into one scalar.
/// An empty series merges to `None`.
pub type MergeFn = fn(&BTreeMap<i32, f64>) -> Option<f64>;

/// Built-in merge functions.
pub mod merge {
    use std::collections::BTreeMap;

    /// Sum of all yearly values.
    pub fn sum(values: &BTreeMap<i32, f64>) -> Option<f64> {
        if values.is_empty() {
            None
        } else {
            Some(values.values().sum())
        }
    }

    /// Arithmetic mean over the years present in the series. Absent years
    /// do not drag the mean down; they are not zeros.
    pub fn average(values: &BTreeMap<i32, f64>) -> Option<f64> {
        if values.is_empty() {
            None
        } else {
            Some(values.values().sum::<f64>() / values.len() as f64)
        }
    }
}

/// A named, mergeable year-indexed metric over one organization.
///
/// `values_per_year` is the workhorse: it filters the organization's
/// sub-entities by the indicator's eligibility rule over the window
/// [Jan 1 `start_year`, Dec 31 `end_year`], computes each survivor's
/// contribution per year, and accumulates by numeric addition. Years no
/// entity contributes to are absent from the map, never present as zero.
/// An inverted range (`start_year > end_year`) yields an empty map; that
/// is a caller mistake but not an error.
pub trait AnnualIndicator: Send + Sync {
    /// Stable key identifying the indicator in caches and exports.
    fn key(&self) -> &'static str;

    /// Human-readable label. Localization catalogs live outside the
    /// engine; the locale tag is passed through for callers that have one.
    fn label(&self, locale: &str) -> String;

    /// The merge function applied when a caller wants one scalar.
    fn merge(&self) -> MergeFn;

    /// Year→value series over `[start_year, end_year]`, both inclusive.
    fn values_per_year(
        &self,
        organization: &Organization,
        start_year: i32,
        end_year: i32,
    ) -> BTreeMap<i32, f64>;

    /// Series merged to a single scalar; `None` when no year contributed.
    fn merged_value(
        &self,
        organization: &Organization,
        start_year: i32,
        end_year: i32,
    ) -> Option<f64> {
        let values = self.values_per_year(organization, start_year, end_year);
        (self.merge())(&values)
    }

    /// Single-year convenience: the year-range query with both bounds set
    /// to `year`, merged.
    fn value_for_year(&self, organization: &Organization, year: i32) -> Option<f64> {
        self.merged_value(organization, year, year)
    }
}

/// All indicators the engine ships, in display order.
pub fn all_indicators() -> Vec<Box<dyn AnnualIndicator>> {
    vec![
        Box::new(PermanentResearcherFteIndicator),
        Box::new(PhdStudentFteIndicator),
        Box::new(PostdocFteIndicator),
        Box::new(TotalProjectBudgetIndicator),
        Box::new(NotAcademicProjectBudgetIndicator),
        Box::new(AcademicProjectCountIndicator),
    ]
}

/// Inclusive window [Jan 1 start_year, Dec 31 end_year], or `None` for an
/// inverted or unrepresentable range.
pub(crate) fn window_bounds(start_year: i32, end_year: i32) -> Option<(NaiveDate, NaiveDate)> {
    if start_year > end_year {
        return None;
    }
    let (window_start, _) = year_bounds(start_year)?;
    let (_, window_end) = year_bounds(end_year)?;
    Some((window_start, window_end))
}

/// Parallel map-then-reduce over eligible entities: each entity's per-year
/// contribution is computed independently, buckets merge atomically.
/// `contribution` returns `None` for years the entity does not touch.
pub(crate) fn accumulate<E, F>(
    entities: &[&E],
    start_year: i32,
    end_year: i32,
    contribution: F,
) -> BTreeMap<i32, f64>
where
    E: Sync + ?Sized,
    F: Fn(&E, i32) -> Option<f64> + Sync,
{
    if start_year > end_year {
        return BTreeMap::new();
    }
    let buckets: DashMap<i32, f64> = DashMap::new();
    entities.par_iter().for_each(|entity| {
        for year in start_year..=end_year {
            if let Some(value) = contribution(entity, year) {
                *buckets.entry(year).or_insert(0.0) += value;
            }
        }
    });
    buckets.into_iter().collect()
}
