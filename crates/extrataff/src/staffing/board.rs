//! Per-mission staffing overview shown on the establishment dashboard.

use serde::Serialize;

use super::hiring::{Application, ApplicationStatus};
use super::mission::Mission;

/// Seats spoken for: accepted candidates plus confirmed hires.
pub fn seats_filled(applications: &[Application]) -> u32 {
    applications
        .iter()
        .filter(|application| {
            matches!(
                application.status,
                ApplicationStatus::Accepted | ApplicationStatus::Confirmed
            )
        })
        .count() as u32
}

/// Candidates still in play: pending interest plus accepted.
pub fn candidate_count(applications: &[Application]) -> u32 {
    applications
        .iter()
        .filter(|application| {
            matches!(
                application.status,
                ApplicationStatus::Interested | ApplicationStatus::Accepted
            )
        })
        .count() as u32
}

/// Hires actually sealed.
pub fn hired_count(applications: &[Application]) -> u32 {
    applications
        .iter()
        .filter(|application| application.status == ApplicationStatus::Confirmed)
        .count() as u32
}

/// One board line. The three counts overlap on purpose and answer
/// different questions; do not collapse them.
#[derive(Debug, Clone, Serialize)]
pub struct MissionBoardEntry {
    pub mission_id: String,
    pub position: &'static str,
    pub status: &'static str,
    pub urgency_badge: &'static str,
    pub location_fuzzy: String,
    pub nb_postes: u32,
    pub nb_postes_pourvus: u32,
    pub seats_filled: u32,
    pub candidate_count: u32,
    pub hired_count: u32,
}

pub fn board_entry(mission: &Mission, applications: &[Application]) -> MissionBoardEntry {
    MissionBoardEntry {
        mission_id: mission.id.0.clone(),
        position: mission.position.label(),
        status: mission.status.label(),
        urgency_badge: mission.urgency_badge().label(),
        location_fuzzy: mission.location_fuzzy.clone(),
        nb_postes: mission.nb_postes,
        nb_postes_pourvus: mission.nb_postes_pourvus,
        seats_filled: seats_filled(applications),
        candidate_count: candidate_count(applications),
        hired_count: hired_count(applications),
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::staffing::hiring::ApplicationId;
    use crate::staffing::mission::MissionId;
    use crate::staffing::talent::TalentId;

    fn application(id: &str, status: ApplicationStatus) -> Application {
        let now = Utc.with_ymd_and_hms(2025, 11, 1, 9, 0, 0).single().expect("valid timestamp");
        let mut application = Application::new(
            ApplicationId(id.to_string()),
            MissionId("mission-001".to_string()),
            TalentId(format!("talent-{id}")),
            80,
            now,
        );
        application.status = status;
        application
    }

    #[test]
    fn the_three_counts_answer_different_questions() {
        let applications = vec![
            application("app-1", ApplicationStatus::Interested),
            application("app-2", ApplicationStatus::Accepted),
            application("app-3", ApplicationStatus::Rejected),
            application("app-4", ApplicationStatus::Confirmed),
        ];

        assert_eq!(seats_filled(&applications), 2);
        assert_eq!(candidate_count(&applications), 2);
        assert_eq!(hired_count(&applications), 1);
    }
}
