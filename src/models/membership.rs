//! Membership records
//!
//! A membership ties a person to a research organization for a period of
//! time under a given status. The period may be open at either end. All
//! windowed eligibility checks go through [`TemporalSpan`].

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::member_status::MemberStatus;
use crate::temporal::{days_in_civil_year, TemporalSpan};

/// Position held by a person inside a research organization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Membership {
    pub id: Uuid,
    pub person_id: Uuid,
    pub organization_id: Uuid,
    pub status: MemberStatus,
    /// Whether the position is permanent. Always false when the status
    /// does not allow permanent positions; [`Membership::set_permanent_position`]
    /// enforces the clamp.
    permanent_position: bool,
    /// Whether this is the person's main position in the organization.
    pub main_position: bool,
    /// First day of the membership, inclusive. `None` = unbounded past.
    pub since: Option<NaiveDate>,
    /// Last day of the membership, inclusive. `None` = still ongoing.
    pub until: Option<NaiveDate>,
    /// Scientific axes this membership is attached to.
    pub axis_ids: Vec<Uuid>,
}

impl Membership {
    /// Create an open-ended membership starting with no dates set.
    pub fn new(person_id: Uuid, organization_id: Uuid, status: MemberStatus) -> Self {
        Membership {
            id: Uuid::new_v4(),
            person_id,
            organization_id,
            status,
            permanent_position: false,
            main_position: true,
            since: None,
            until: None,
            axis_ids: Vec::new(),
        }
    }

    /// Mark the position permanent. The flag is clamped to false when the
    /// status does not allow permanent positions, so a PhD student can
    /// never be recorded as permanent no matter what the caller passes.
    pub fn set_permanent_position(&mut self, permanent: bool) {
        self.permanent_position = permanent && self.status.is_permanent_position_allowed();
    }

    pub fn is_permanent_position(&self) -> bool {
        self.permanent_position
    }

    /// Research full-time equivalent contributed by this membership over
    /// the given civil year: the status's usual fraction prorated by the
    /// share of the year the membership covers. Zero when the membership
    /// does not intersect the year.
    pub fn annual_fte(&self, year: i32) -> f64 {
        let days = self.days_in_year(year);
        if days == 0 {
            return 0.0;
        }
        self.status.usual_fte() * f64::from(days) / f64::from(days_in_civil_year(year))
    }
}

impl TemporalSpan for Membership {
    fn start(&self) -> Option<NaiveDate> {
        self.since
    }

    fn end(&self) -> Option<NaiveDate> {
        self.until
    }
}
