//! Project records
//!
//! Funded or self-funded projects carried by a research organization. The
//! indicator engine only reads them: budget indicators attribute the whole
//! budget to the project's start year, never prorated.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::Error;

/// Funding category of a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectCategory {
    /// Funded through a competitive call (ANR, EU, regional...).
    CompetitiveCall,
    /// Industrial or service contract outside the academic funding circuit.
    NotAcademic,
    /// Open-source initiative without a dedicated budget line.
    OpenSource,
    /// Self-funded by the organization.
    AutoFunding,
}

impl ProjectCategory {
    pub const ALL: [ProjectCategory; 4] = [
        ProjectCategory::CompetitiveCall,
        ProjectCategory::NotAcademic,
        ProjectCategory::OpenSource,
        ProjectCategory::AutoFunding,
    ];

    /// Academic projects are those funded inside the academic circuit:
    /// competitive calls and self-funding.
    pub const fn is_academic(self) -> bool {
        matches!(
            self,
            ProjectCategory::CompetitiveCall | ProjectCategory::AutoFunding
        )
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            ProjectCategory::CompetitiveCall => "competitive_call",
            ProjectCategory::NotAcademic => "not_academic",
            ProjectCategory::OpenSource => "open_source",
            ProjectCategory::AutoFunding => "auto_funding",
        }
    }
}

impl fmt::Display for ProjectCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProjectCategory {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        ProjectCategory::ALL
            .iter()
            .copied()
            .find(|cat| cat.as_str() == wanted)
            .ok_or_else(|| Error::InvalidInput(format!("unknown project category: {s:?}")))
    }
}

/// A project belonging to a research organization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: Uuid,
    pub acronym: String,
    pub category: ProjectCategory,
    /// First day of the project.
    pub start_date: NaiveDate,
    /// Planned duration in months; the end date is derived.
    pub duration_months: u32,
    /// Global budget in thousands of currency units.
    pub global_budget_keur: f64,
    /// Scientific axes this project is attached to.
    pub axis_ids: Vec<Uuid>,
}

impl Project {
    pub fn new(
        acronym: impl Into<String>,
        category: ProjectCategory,
        start_date: NaiveDate,
        duration_months: u32,
        global_budget_keur: f64,
    ) -> Self {
        Project {
            id: Uuid::new_v4(),
            acronym: acronym.into(),
            category,
            start_date,
            duration_months,
            global_budget_keur,
            axis_ids: Vec::new(),
        }
    }

    /// Calendar year the project starts in. Budget indicators attribute
    /// the whole budget to this year.
    pub fn start_year(&self) -> i32 {
        self.start_date.year()
    }

    /// Last day of the project, derived from start date and duration.
    /// Saturates at the start date when the month arithmetic overflows.
    pub fn end_date(&self) -> NaiveDate {
        self.start_date
            .checked_add_months(Months::new(self.duration_months))
            .and_then(|d| d.pred_opt())
            .unwrap_or(self.start_date)
    }

    /// Calendar year the project ends in.
    pub fn end_year(&self) -> i32 {
        self.end_date().year()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_academic_categories() {
        assert!(ProjectCategory::CompetitiveCall.is_academic());
        assert!(ProjectCategory::AutoFunding.is_academic());
        assert!(!ProjectCategory::NotAcademic.is_academic());
        assert!(!ProjectCategory::OpenSource.is_academic());
    }

    #[test]
    fn test_category_parse() {
        assert_eq!(
            "Competitive_Call".parse::<ProjectCategory>().unwrap(),
            ProjectCategory::CompetitiveCall
        );
        assert!(matches!(
            "grant".parse::<ProjectCategory>(),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_end_date_from_duration() {
        let p = Project::new(
            "ACRO",
            ProjectCategory::CompetitiveCall,
            date(2021, 3, 1),
            36,
            250.0,
        );
        assert_eq!(p.end_date(), date(2024, 2, 29));
        assert_eq!(p.start_year(), 2021);
        assert_eq!(p.end_year(), 2024);
    }

    #[test]
    fn test_end_year_within_start_year() {
        let p = Project::new(
            "SHORT",
            ProjectCategory::AutoFunding,
            date(2020, 1, 1),
            6,
            10.0,
        );
        assert_eq!(p.end_date(), date(2020, 6, 30));
        assert_eq!(p.end_year(), 2020);
    }
}
