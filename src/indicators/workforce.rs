//! Workforce indicators
//!
//! Full-time-equivalent series per personnel class. Each indicator filters
//! memberships with its own eligibility rule, prorates the status's usual
//! FTE by the days actually covered in each year, and averages when merged
//! to a scalar.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::indicators::{accumulate, merge, window_bounds, AnnualIndicator, MergeFn};
use crate::models::{MemberStatus, Membership, Organization};
use crate::temporal::TemporalSpan;

/// Shared series computation: filter by `eligible`, contribute the
/// prorated FTE for every year the membership actually covers.
fn fte_values<P>(
    organization: &Organization,
    start_year: i32,
    end_year: i32,
    eligible: P,
) -> BTreeMap<i32, f64>
where
    P: Fn(&Membership, NaiveDate, NaiveDate) -> bool + Sync,
{
    let Some((window_start, window_end)) = window_bounds(start_year, end_year) else {
        return BTreeMap::new();
    };
    let candidates: Vec<&Membership> = organization
        .memberships
        .iter()
        .filter(|m| eligible(m, window_start, window_end))
        .collect();
    accumulate(&candidates, start_year, end_year, |membership, year| {
        let days = membership.days_in_year(year);
        (days > 0).then(|| membership.annual_fte(year))
    })
}

/// FTEs of the permanent research staff: permanent, non-external
/// positions of researchers or technical staff, PhD students excluded
/// even when misflagged permanent.
pub struct PermanentResearcherFteIndicator;

impl PermanentResearcherFteIndicator {
    fn eligible(m: &Membership, window_start: NaiveDate, window_end: NaiveDate) -> bool {
        m.is_permanent_position()
            && !m.status.is_external_position()
            && m.status != MemberStatus::PhdStudent
            && (m.status.is_researcher() || m.status.is_technical_staff())
            && m.active_in(window_start, window_end)
    }
}

impl AnnualIndicator for PermanentResearcherFteIndicator {
    fn key(&self) -> &'static str {
        "permanent_researcher_fte"
    }

    fn label(&self, _locale: &str) -> String {
        "Permanent researcher full-time equivalents".to_string()
    }

    fn merge(&self) -> MergeFn {
        merge::average
    }

    fn values_per_year(
        &self,
        organization: &Organization,
        start_year: i32,
        end_year: i32,
    ) -> BTreeMap<i32, f64> {
        fte_values(organization, start_year, end_year, Self::eligible)
    }
}

/// FTEs of PhD students hosted by the organization.
pub struct PhdStudentFteIndicator;

impl PhdStudentFteIndicator {
    fn eligible(m: &Membership, window_start: NaiveDate, window_end: NaiveDate) -> bool {
        !m.status.is_external_position()
            && m.status == MemberStatus::PhdStudent
            && m.active_in(window_start, window_end)
    }
}

impl AnnualIndicator for PhdStudentFteIndicator {
    fn key(&self) -> &'static str {
        "phd_student_fte"
    }

    fn label(&self, _locale: &str) -> String {
        "PhD student full-time equivalents".to_string()
    }

    fn merge(&self) -> MergeFn {
        merge::average
    }

    fn values_per_year(
        &self,
        organization: &Organization,
        start_year: i32,
        end_year: i32,
    ) -> BTreeMap<i32, f64> {
        fte_values(organization, start_year, end_year, Self::eligible)
    }
}

/// FTEs of postdoctoral researchers.
pub struct PostdocFteIndicator;

impl PostdocFteIndicator {
    fn eligible(m: &Membership, window_start: NaiveDate, window_end: NaiveDate) -> bool {
        !m.status.is_external_position()
            && m.status == MemberStatus::Postdoc
            && m.active_in(window_start, window_end)
    }
}

impl AnnualIndicator for PostdocFteIndicator {
    fn key(&self) -> &'static str {
        "postdoc_fte"
    }

    fn label(&self, _locale: &str) -> String {
        "Postdoc full-time equivalents".to_string()
    }

    fn merge(&self) -> MergeFn {
        merge::average
    }

    fn values_per_year(
        &self,
        organization: &Organization,
        start_year: i32,
        end_year: i32,
    ) -> BTreeMap<i32, f64> {
        fte_values(organization, start_year, end_year, Self::eligible)
    }
}
