//! Scientific axes
//!
//! An axis is a research theme of the organization with a validity period.
//! Memberships and projects reference axes by id; the axis itself is a
//! plain temporal record.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::temporal::TemporalSpan;

/// Research theme with a validity window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScientificAxis {
    pub id: Uuid,
    pub acronym: String,
    pub name: String,
    /// First day of validity, inclusive. `None` = unbounded past.
    pub start_date: Option<NaiveDate>,
    /// Last day of validity, inclusive. `None` = still valid.
    pub end_date: Option<NaiveDate>,
}

impl ScientificAxis {
    pub fn new(acronym: impl Into<String>, name: impl Into<String>) -> Self {
        ScientificAxis {
            id: Uuid::new_v4(),
            acronym: acronym.into(),
            name: name.into(),
            start_date: None,
            end_date: None,
        }
    }
}

impl TemporalSpan for ScientificAxis {
    fn start(&self) -> Option<NaiveDate> {
        self.start_date
    }

    fn end(&self) -> Option<NaiveDate> {
        self.end_date
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_window() {
        let mut axis = ScientificAxis::new("DS", "Distributed systems");
        axis.start_date = NaiveDate::from_ymd_opt(2019, 1, 1);
        axis.end_date = NaiveDate::from_ymd_opt(2022, 6, 30);
        assert!(axis.active_in_year(2020));
        assert!(axis.active_in_year(2022));
        assert!(!axis.active_in_year(2023));
        assert_eq!(axis.days_in_year(2022), 181);
    }
}
