//! Project budget and count indicators
//!
//! Budget series attribute each project's whole budget to its start year.
//! Budgets are never prorated across the project duration; a three-year
//! project started in 2021 puts all of its money in 2021.

use std::collections::BTreeMap;

use crate::indicators::{accumulate, merge, AnnualIndicator, MergeFn};
use crate::models::{Organization, Project, ProjectCategory};

/// Shared series computation: filter projects by `eligible`, contribute
/// `amount` once, in the project's start year.
fn project_values<P, A>(
    organization: &Organization,
    start_year: i32,
    end_year: i32,
    eligible: P,
    amount: A,
) -> BTreeMap<i32, f64>
where
    P: Fn(&Project) -> bool + Sync,
    A: Fn(&Project) -> f64 + Sync,
{
    let candidates: Vec<&Project> = organization
        .projects
        .iter()
        .filter(|p| eligible(p))
        .collect();
    accumulate(&candidates, start_year, end_year, |project, year| {
        (project.start_year() == year).then(|| amount(project))
    })
}

/// Total budget of funded projects, open-source initiatives excluded.
pub struct TotalProjectBudgetIndicator;

impl AnnualIndicator for TotalProjectBudgetIndicator {
    fn key(&self) -> &'static str {
        "total_project_budget"
    }

    fn label(&self, _locale: &str) -> String {
        "Total project budget (k€)".to_string()
    }

    fn merge(&self) -> MergeFn {
        merge::sum
    }

    fn values_per_year(
        &self,
        organization: &Organization,
        start_year: i32,
        end_year: i32,
    ) -> BTreeMap<i32, f64> {
        project_values(
            organization,
            start_year,
            end_year,
            |p| p.category != ProjectCategory::OpenSource,
            |p| p.global_budget_keur,
        )
    }
}

/// Budget of industrial and service contracts only.
pub struct NotAcademicProjectBudgetIndicator;

impl AnnualIndicator for NotAcademicProjectBudgetIndicator {
    fn key(&self) -> &'static str {
        "not_academic_project_budget"
    }

    fn label(&self, _locale: &str) -> String {
        "Non-academic project budget (k€)".to_string()
    }

    fn merge(&self) -> MergeFn {
        merge::sum
    }

    fn values_per_year(
        &self,
        organization: &Organization,
        start_year: i32,
        end_year: i32,
    ) -> BTreeMap<i32, f64> {
        project_values(
            organization,
            start_year,
            end_year,
            |p| p.category == ProjectCategory::NotAcademic,
            |p| p.global_budget_keur,
        )
    }
}

/// Number of academic projects started per year.
pub struct AcademicProjectCountIndicator;

impl AnnualIndicator for AcademicProjectCountIndicator {
    fn key(&self) -> &'static str {
        "academic_project_count"
    }

    fn label(&self, _locale: &str) -> String {
        "Academic projects started".to_string()
    }

    fn merge(&self) -> MergeFn {
        merge::sum
    }

    fn values_per_year(
        &self,
        organization: &Organization,
        start_year: i32,
        end_year: i32,
    ) -> BTreeMap<i32, f64> {
        project_values(
            organization,
            start_year,
            end_year,
            |p| p.category.is_academic(),
            |_| 1.0,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn org_with(projects: Vec<Project>) -> Organization {
        let mut org = Organization::new("LAB", "Lab");
        org.projects = projects;
        org
    }

    #[test]
    fn test_budget_lands_whole_in_start_year() {
        let org = org_with(vec![Project::new(
            "TRI",
            ProjectCategory::CompetitiveCall,
            date(2021, 9, 1),
            36,
            120.0,
        )]);

        let values = TotalProjectBudgetIndicator.values_per_year(&org, 2020, 2024);
        assert_eq!(values.len(), 1);
        assert_eq!(values.get(&2021), Some(&120.0));
    }

    #[test]
    fn test_open_source_excluded_from_total_budget() {
        let org = org_with(vec![
            Project::new("OSS", ProjectCategory::OpenSource, date(2021, 1, 1), 12, 50.0),
            Project::new("ANR", ProjectCategory::CompetitiveCall, date(2021, 1, 1), 12, 80.0),
        ]);

        let values = TotalProjectBudgetIndicator.values_per_year(&org, 2021, 2021);
        assert_eq!(values.get(&2021), Some(&80.0));
    }

    #[test]
    fn test_not_academic_budget_only_counts_contracts() {
        let org = org_with(vec![
            Project::new("IND", ProjectCategory::NotAcademic, date(2020, 3, 1), 24, 200.0),
            Project::new("ANR", ProjectCategory::CompetitiveCall, date(2020, 3, 1), 24, 300.0),
        ]);

        let values = NotAcademicProjectBudgetIndicator.values_per_year(&org, 2020, 2020);
        assert_eq!(values.get(&2020), Some(&200.0));
    }

    #[test]
    fn test_budgets_accumulate_per_year() {
        let org = org_with(vec![
            Project::new("A", ProjectCategory::CompetitiveCall, date(2020, 1, 1), 12, 100.0),
            Project::new("B", ProjectCategory::NotAcademic, date(2020, 6, 1), 12, 40.0),
            Project::new("C", ProjectCategory::CompetitiveCall, date(2022, 1, 1), 12, 60.0),
        ]);

        let values = TotalProjectBudgetIndicator.values_per_year(&org, 2019, 2022);
        assert_eq!(values.get(&2020), Some(&140.0));
        assert_eq!(values.get(&2022), Some(&60.0));
        assert!(!values.contains_key(&2019));
        assert!(!values.contains_key(&2021));
    }

    #[test]
    fn test_project_outside_range_contributes_nothing() {
        let org = org_with(vec![Project::new(
            "OLD",
            ProjectCategory::CompetitiveCall,
            date(2015, 1, 1),
            60,
            500.0,
        )]);
        // Still running during 2019 by duration, but the budget belongs
        // to 2015 which is outside the query range.
        assert!(TotalProjectBudgetIndicator
            .values_per_year(&org, 2019, 2021)
            .is_empty());
    }

    #[test]
    fn test_academic_count_sums_per_year() {
        let org = org_with(vec![
            Project::new("A", ProjectCategory::CompetitiveCall, date(2021, 1, 1), 12, 10.0),
            Project::new("B", ProjectCategory::AutoFunding, date(2021, 2, 1), 12, 0.0),
            Project::new("C", ProjectCategory::NotAcademic, date(2021, 3, 1), 12, 90.0),
        ]);

        let values = AcademicProjectCountIndicator.values_per_year(&org, 2021, 2021);
        assert_eq!(values.get(&2021), Some(&2.0));
        assert_eq!(
            AcademicProjectCountIndicator.merged_value(&org, 2020, 2022),
            Some(2.0)
        );
    }
}
