use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::mission::{ContractType, Position};

/// Identifier wrapper for talent profiles.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TalentId(pub String);

/// Profile of an hospitality worker looking for missions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Talent {
    pub id: TalentId,
    pub user_id: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub position_types: BTreeSet<Position>,
    pub contract_preferences: BTreeSet<ContractType>,
    pub min_hourly_rate: Option<f64>,
    pub preferred_departments: BTreeSet<String>,
    /// Search radius in kilometres around the talent's base.
    pub search_radius: u32,
    pub accepts_coupure: bool,
    pub years_experience: u32,
}

impl Talent {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
