//! Member status catalog
//!
//! Closed set of position categories a person can hold inside a research
//! organization. Each category carries a static profile: the usual research
//! full-time-equivalent fraction and the predicate flags the indicator
//! eligibility rules are written against. The profile table is data-driven;
//! adding a category is one `profile()` row, not a new type.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Position category of a member inside a research organization.
///
/// Hierarchical level 0 is the most senior. The set is fixed at compile
/// time; records referencing a status parse it case-insensitively from the
/// canonical snake_case name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberStatus {
    EmeritusFullProfessor,
    FullProfessor,
    ResearchDirector,
    EmeritusAssociateProfessorHdr,
    EmeritusAssociateProfessor,
    AssociateProfessorHdr,
    AssociateProfessor,
    ContractualResearcherTeacherPhd,
    ContractualResearcherTeacher,
    ResearcherPhd,
    Researcher,
    Postdoc,
    ResearchEngineerPhd,
    ResearchEngineer,
    PhdStudent,
    EngineerPhd,
    Engineer,
    Admin,
    TeacherPhd,
    Teacher,
    MasterStudent,
    OtherStudent,
    AssociatedMemberPhd,
    AssociatedMember,
}

/// Static attributes of a member status.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatusProfile {
    /// Seniority level, 0 = most senior. Drives stable display ordering.
    pub hierarchical_level: u8,
    /// Usual research full-time-equivalent fraction in [0, 1].
    pub usual_fte: f64,
    /// Whether a permanent position is allowed for this status.
    pub permanent_position_allowed: bool,
    pub researcher: bool,
    pub teacher: bool,
    pub technical_staff: bool,
    pub administrative_staff: bool,
    pub phd_holder: bool,
    pub hdr_holder: bool,
    /// Whether a person with this status is supervised (students, postdocs).
    pub supervisable: bool,
    /// Whether a person with this status may supervise others.
    pub supervisor: bool,
    /// Whether the position is external to the organization.
    pub external: bool,
    pub emeritus: bool,
}

impl StatusProfile {
    const fn new(hierarchical_level: u8, usual_fte: f64) -> Self {
        StatusProfile {
            hierarchical_level,
            usual_fte,
            permanent_position_allowed: false,
            researcher: false,
            teacher: false,
            technical_staff: false,
            administrative_staff: false,
            phd_holder: false,
            hdr_holder: false,
            supervisable: false,
            supervisor: false,
            external: false,
            emeritus: false,
        }
    }

    const fn permanent(mut self) -> Self {
        self.permanent_position_allowed = true;
        self
    }
    const fn researcher(mut self) -> Self {
        self.researcher = true;
        self
    }
    const fn teacher(mut self) -> Self {
        self.teacher = true;
        self
    }
    const fn technical(mut self) -> Self {
        self.technical_staff = true;
        self
    }
    const fn administrative(mut self) -> Self {
        self.administrative_staff = true;
        self
    }
    const fn phd(mut self) -> Self {
        self.phd_holder = true;
        self
    }
    const fn hdr(mut self) -> Self {
        self.hdr_holder = true;
        self
    }
    const fn supervisable(mut self) -> Self {
        self.supervisable = true;
        self
    }
    const fn supervisor(mut self) -> Self {
        self.supervisor = true;
        self
    }
    const fn external(mut self) -> Self {
        self.external = true;
        self
    }
    const fn emeritus(mut self) -> Self {
        self.emeritus = true;
        self
    }
}

impl MemberStatus {
    /// All statuses, ordered by seniority then declaration order.
    pub const ALL: [MemberStatus; 24] = [
        MemberStatus::EmeritusFullProfessor,
        MemberStatus::FullProfessor,
        MemberStatus::ResearchDirector,
        MemberStatus::EmeritusAssociateProfessorHdr,
        MemberStatus::EmeritusAssociateProfessor,
        MemberStatus::AssociateProfessorHdr,
        MemberStatus::AssociateProfessor,
        MemberStatus::ContractualResearcherTeacherPhd,
        MemberStatus::ContractualResearcherTeacher,
        MemberStatus::ResearcherPhd,
        MemberStatus::Researcher,
        MemberStatus::Postdoc,
        MemberStatus::ResearchEngineerPhd,
        MemberStatus::ResearchEngineer,
        MemberStatus::PhdStudent,
        MemberStatus::EngineerPhd,
        MemberStatus::Engineer,
        MemberStatus::Admin,
        MemberStatus::TeacherPhd,
        MemberStatus::Teacher,
        MemberStatus::MasterStudent,
        MemberStatus::OtherStudent,
        MemberStatus::AssociatedMemberPhd,
        MemberStatus::AssociatedMember,
    ];

    /// Static profile of this status. One row per category.
    pub const fn profile(self) -> StatusProfile {
        type P = StatusProfile;
        match self {
            MemberStatus::EmeritusFullProfessor => {
                P::new(0, 0.0).researcher().teacher().phd().hdr().supervisor().emeritus()
            }
            MemberStatus::FullProfessor => {
                P::new(0, 0.5).permanent().researcher().teacher().phd().hdr().supervisor()
            }
            MemberStatus::ResearchDirector => {
                P::new(0, 1.0).permanent().researcher().phd().hdr().supervisor()
            }
            MemberStatus::EmeritusAssociateProfessorHdr => {
                P::new(1, 0.0).permanent().researcher().teacher().phd().hdr().supervisor().emeritus()
            }
            MemberStatus::EmeritusAssociateProfessor => {
                P::new(2, 0.0).permanent().researcher().teacher().phd().supervisor().emeritus()
            }
            MemberStatus::AssociateProfessorHdr => {
                P::new(1, 0.5).permanent().researcher().teacher().phd().hdr().supervisor()
            }
            MemberStatus::AssociateProfessor => {
                P::new(2, 0.5).permanent().researcher().teacher().phd().supervisor()
            }
            MemberStatus::ContractualResearcherTeacherPhd => {
                P::new(2, 0.5).permanent().researcher().teacher().phd().supervisor()
            }
            MemberStatus::ContractualResearcherTeacher => {
                P::new(2, 0.5).permanent().researcher().teacher().supervisor()
            }
            MemberStatus::ResearcherPhd => {
                P::new(2, 1.0).permanent().researcher().phd().supervisor()
            }
            MemberStatus::Researcher => P::new(2, 1.0).permanent().researcher().supervisor(),
            MemberStatus::Postdoc => P::new(3, 1.0).researcher().phd().supervisable().supervisor(),
            MemberStatus::ResearchEngineerPhd => {
                P::new(3, 1.0).permanent().technical().phd().supervisor()
            }
            MemberStatus::ResearchEngineer => P::new(3, 1.0).permanent().technical().supervisor(),
            MemberStatus::PhdStudent => P::new(4, 1.0).researcher().supervisable(),
            MemberStatus::EngineerPhd => P::new(4, 1.0).permanent().technical().phd().supervisor(),
            MemberStatus::Engineer => P::new(4, 1.0).permanent().technical(),
            MemberStatus::Admin => P::new(4, 0.0).permanent().administrative(),
            MemberStatus::TeacherPhd => P::new(4, 0.0).permanent().teacher().phd().supervisor(),
            MemberStatus::Teacher => P::new(4, 0.0).permanent().teacher(),
            MemberStatus::MasterStudent => P::new(5, 1.0).supervisable().external(),
            MemberStatus::OtherStudent => P::new(6, 1.0).supervisable().external(),
            MemberStatus::AssociatedMemberPhd => {
                P::new(7, 0.0).researcher().phd().supervisor().external()
            }
            MemberStatus::AssociatedMember => P::new(7, 0.0).researcher().supervisor().external(),
        }
    }

    /// Seniority level, 0 = most senior.
    pub const fn hierarchical_level(self) -> u8 {
        self.profile().hierarchical_level
    }

    /// Usual research full-time-equivalent fraction for this status.
    pub const fn usual_fte(self) -> f64 {
        self.profile().usual_fte
    }

    pub const fn is_permanent_position_allowed(self) -> bool {
        self.profile().permanent_position_allowed
    }

    pub const fn is_researcher(self) -> bool {
        self.profile().researcher
    }

    pub const fn is_teacher(self) -> bool {
        self.profile().teacher
    }

    pub const fn is_technical_staff(self) -> bool {
        self.profile().technical_staff
    }

    pub const fn is_administrative_staff(self) -> bool {
        self.profile().administrative_staff
    }

    pub const fn is_phd_holder(self) -> bool {
        self.profile().phd_holder
    }

    pub const fn is_hdr_holder(self) -> bool {
        self.profile().hdr_holder
    }

    pub const fn is_supervisable(self) -> bool {
        self.profile().supervisable
    }

    pub const fn is_supervisor(self) -> bool {
        self.profile().supervisor
    }

    /// True when the position is external to the organization. External
    /// positions never contribute to workforce indicators.
    pub const fn is_external_position(self) -> bool {
        self.profile().external
    }

    pub const fn is_emeritus(self) -> bool {
        self.profile().emeritus
    }

    /// Canonical snake_case name (stable across serialization).
    pub const fn as_str(self) -> &'static str {
        match self {
            MemberStatus::EmeritusFullProfessor => "emeritus_full_professor",
            MemberStatus::FullProfessor => "full_professor",
            MemberStatus::ResearchDirector => "research_director",
            MemberStatus::EmeritusAssociateProfessorHdr => "emeritus_associate_professor_hdr",
            MemberStatus::EmeritusAssociateProfessor => "emeritus_associate_professor",
            MemberStatus::AssociateProfessorHdr => "associate_professor_hdr",
            MemberStatus::AssociateProfessor => "associate_professor",
            MemberStatus::ContractualResearcherTeacherPhd => "contractual_researcher_teacher_phd",
            MemberStatus::ContractualResearcherTeacher => "contractual_researcher_teacher",
            MemberStatus::ResearcherPhd => "researcher_phd",
            MemberStatus::Researcher => "researcher",
            MemberStatus::Postdoc => "postdoc",
            MemberStatus::ResearchEngineerPhd => "research_engineer_phd",
            MemberStatus::ResearchEngineer => "research_engineer",
            MemberStatus::PhdStudent => "phd_student",
            MemberStatus::EngineerPhd => "engineer_phd",
            MemberStatus::Engineer => "engineer",
            MemberStatus::Admin => "admin",
            MemberStatus::TeacherPhd => "teacher_phd",
            MemberStatus::Teacher => "teacher",
            MemberStatus::MasterStudent => "master_student",
            MemberStatus::OtherStudent => "other_student",
            MemberStatus::AssociatedMemberPhd => "associated_member_phd",
            MemberStatus::AssociatedMember => "associated_member",
        }
    }

    /// Human-readable English label. Localization catalogs live outside
    /// the engine; callers wanting localized labels look the key up in
    /// their own message source.
    pub fn label(self) -> String {
        let mut out = String::with_capacity(self.as_str().len());
        let mut first = true;
        for part in self.as_str().split('_') {
            if !first {
                out.push(' ');
            }
            if first {
                let mut chars = part.chars();
                if let Some(c) = chars.next() {
                    out.extend(c.to_uppercase());
                    out.push_str(chars.as_str());
                }
            } else if part == "hdr" || part == "phd" {
                out.push_str(if part == "hdr" { "HDR" } else { "PhD" });
            } else {
                out.push_str(part);
            }
            first = false;
        }
        out
    }
}

impl fmt::Display for MemberStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MemberStatus {
    type Err = Error;

    /// Case-insensitive parse of the canonical name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        MemberStatus::ALL
            .iter()
            .copied()
            .find(|status| status.as_str() == wanted)
            .ok_or_else(|| Error::InvalidInput(format!("unknown member status: {s:?}")))
    }
}
