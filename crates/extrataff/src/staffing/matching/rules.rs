use super::weights::MatchWeights;
use super::{MatchFactor, ScoreComponent};
use crate::staffing::mission::Mission;
use crate::staffing::talent::Talent;

/// Score one mission against one talent profile. Every factor emits a
/// component, including misses worth zero, so the breakdown always
/// explains the full scale.
pub(crate) fn score_pair(
    mission: &Mission,
    talent: &Talent,
    weights: &MatchWeights,
) -> (Vec<ScoreComponent>, u8) {
    let mut components = Vec::with_capacity(5);

    // TODO: replace the flat geolocation allowance once establishment
    // coordinates land in the mission record.
    components.push(ScoreComponent {
        factor: MatchFactor::Geolocation,
        points: weights.geolocation,
        notes: format!(
            "location {} assumed within the {} km search radius",
            mission.location_fuzzy, talent.search_radius
        ),
    });

    if talent.position_types.contains(&mission.position) {
        components.push(ScoreComponent {
            factor: MatchFactor::Position,
            points: weights.position,
            notes: format!("position {} is one of the talent's trades", mission.position.label()),
        });
    } else {
        components.push(ScoreComponent {
            factor: MatchFactor::Position,
            points: 0,
            notes: format!("talent does not work as {}", mission.position.label()),
        });
    }

    components.push(ScoreComponent {
        factor: MatchFactor::Availability,
        points: weights.availability,
        notes: "availability calendar not consulted, full allowance granted".to_string(),
    });

    match (mission.hourly_rate, talent.min_hourly_rate) {
        (Some(offered), Some(floor)) if offered >= floor => {
            components.push(ScoreComponent {
                factor: MatchFactor::Rate,
                points: weights.rate,
                notes: format!("hourly rate {offered:.2} meets the {floor:.2} floor"),
            });
        }
        (Some(offered), Some(floor)) => {
            components.push(ScoreComponent {
                factor: MatchFactor::Rate,
                points: 0,
                notes: format!("hourly rate {offered:.2} is below the {floor:.2} floor"),
            });
        }
        _ => {
            components.push(ScoreComponent {
                factor: MatchFactor::Rate,
                points: weights.rate_fallback,
                notes: "rate data incomplete, neutral allowance granted".to_string(),
            });
        }
    }

    if talent.contract_preferences.contains(&mission.contract_type) {
        components.push(ScoreComponent {
            factor: MatchFactor::Contract,
            points: weights.contract,
            notes: format!(
                "contract {} matches the talent's preferences",
                mission.contract_type.label()
            ),
        });
    } else {
        components.push(ScoreComponent {
            factor: MatchFactor::Contract,
            points: 0,
            notes: format!(
                "talent does not take {} contracts",
                mission.contract_type.label()
            ),
        });
    }

    let total: u16 = components.iter().map(|component| component.points).sum();
    (components, u8::try_from(total).unwrap_or(u8::MAX))
}
