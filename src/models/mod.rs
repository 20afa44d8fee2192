//! Domain records read by the indicator engine
//!
//! These are snapshots of entities owned by external CRUD services; the
//! engine reads and filters them, never mutates them.

pub mod member_status;
pub mod membership;
pub mod organization;
pub mod project;
pub mod ranking;
pub mod scientific_axis;

pub use member_status::{MemberStatus, StatusProfile};
pub use membership::Membership;
pub use organization::Organization;
pub use project::{Project, ProjectCategory};
pub use ranking::{CoreRanking, JournalRanking, QuartileRanking};
pub use scientific_axis::ScientificAxis;
