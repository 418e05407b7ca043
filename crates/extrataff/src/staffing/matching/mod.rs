//! Matching engine behind the talent feed.
//!
//! Every open mission is scored against a talent profile on a 0-100
//! scale built from five weighted factors. Scores are computed fresh on
//! every request; nothing is cached, so profile edits show up on the
//! next feed load.

mod category;
mod rules;
mod weights;

use serde::Serialize;

pub use category::MatchCategory;
pub use weights::MatchWeights;

use super::mission::{Mission, MissionId};
use super::talent::Talent;

/// Factors contributing to a match score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchFactor {
    Geolocation,
    Position,
    Availability,
    Rate,
    Contract,
}

/// One factor's contribution to a score, with a human-readable note.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreComponent {
    pub factor: MatchFactor,
    pub points: u16,
    pub notes: String,
}

/// Full scoring outcome for a single mission and talent pair.
#[derive(Debug, Clone, Serialize)]
pub struct MatchReport {
    pub mission_id: MissionId,
    pub total: u8,
    pub category: Option<MatchCategory>,
    pub components: Vec<ScoreComponent>,
}

/// A mission that cleared the feed cutoff, carrying the score it earned.
#[derive(Debug, Clone, Serialize)]
pub struct RankedMission {
    pub mission: Mission,
    pub match_score: u8,
    pub match_category: MatchCategory,
}

/// Scores missions against talent profiles using a fixed weight table.
#[derive(Debug, Clone, Default)]
pub struct MatchingEngine {
    weights: MatchWeights,
}

impl MatchingEngine {
    pub fn new(weights: MatchWeights) -> Self {
        Self { weights }
    }

    /// Score a single pair and report the component breakdown.
    pub fn score(&self, mission: &Mission, talent: &Talent) -> MatchReport {
        let (components, total) = rules::score_pair(mission, talent, &self.weights);
        MatchReport {
            mission_id: mission.id.clone(),
            total,
            category: MatchCategory::for_score(total),
            components,
        }
    }

    /// Build the talent feed: open missions only, scored, anything below
    /// the acceptable floor dropped, best matches first.
    pub fn matched_missions(&self, talent: &Talent, missions: &[Mission]) -> Vec<RankedMission> {
        let mut ranked: Vec<RankedMission> = missions
            .iter()
            .filter(|mission| mission.is_open())
            .filter_map(|mission| {
                let (_, total) = rules::score_pair(mission, talent, &self.weights);
                MatchCategory::for_score(total).map(|category| RankedMission {
                    mission: mission.clone(),
                    match_score: total,
                    match_category: category,
                })
            })
            .collect();

        // Vec::sort_by is stable, so equal scores keep their listing order.
        ranked.sort_by(|a, b| b.match_score.cmp(&a.match_score));
        ranked
    }
}
