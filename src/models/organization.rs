//! Research organization aggregate
//!
//! The unit the indicator queries walk: an organization owns memberships,
//! projects and scientific axes. Snapshots are serde round-trippable so the
//! CLI and the tests can load them from JSON files.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::membership::Membership;
use crate::models::project::Project;
use crate::models::scientific_axis::ScientificAxis;

/// A research organization and the records the indicator engine reads.
///
/// The engine never mutates the aggregate; lifecycle belongs to the CRUD
/// services feeding the snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Organization {
    pub id: Uuid,
    pub acronym: String,
    pub name: String,
    #[serde(default)]
    pub memberships: Vec<Membership>,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub axes: Vec<ScientificAxis>,
}

impl Organization {
    pub fn new(acronym: impl Into<String>, name: impl Into<String>) -> Self {
        Organization {
            id: Uuid::new_v4(),
            acronym: acronym.into(),
            name: name.into(),
            memberships: Vec::new(),
            projects: Vec::new(),
            axes: Vec::new(),
        }
    }
}
