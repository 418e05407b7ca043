use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};

use super::domain::{Application, ApplicationId, ApplicationStatus, TransitionError};
use super::ratings::{
    self, Rating, RatingDirection, RatingId, RatingViolation, RatingVisibility,
};
use super::repository::{
    ApplicationNotice, MarketplaceRepository, NotificationDispatcher, RepositoryError,
};
use crate::staffing::board::{self, MissionBoardEntry};
use crate::staffing::matching::{MatchWeights, MatchingEngine, RankedMission};
use crate::staffing::mission::{Mission, MissionError, MissionId};
use crate::staffing::talent::TalentId;

static APPLICATION_SEQUENCE: AtomicU64 = AtomicU64::new(1);
static RATING_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_application_id() -> ApplicationId {
    let id = APPLICATION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    ApplicationId(format!("app-{id:06}"))
}

fn next_rating_id() -> RatingId {
    let id = RATING_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    RatingId(format!("rating-{id:06}"))
}

/// Facade over the hiring lifecycle. Owns the matching engine and talks
/// to storage and notifications through their traits.
#[derive(Debug)]
pub struct StaffingService<R, N> {
    repository: Arc<R>,
    notifier: Arc<N>,
    engine: Arc<MatchingEngine>,
}

impl<R, N> Clone for StaffingService<R, N> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            notifier: Arc::clone(&self.notifier),
            engine: Arc::clone(&self.engine),
        }
    }
}

impl<R, N> StaffingService<R, N>
where
    R: MarketplaceRepository,
    N: NotificationDispatcher,
{
    pub fn new(repository: Arc<R>, notifier: Arc<N>, weights: MatchWeights) -> Self {
        Self {
            repository,
            notifier,
            engine: Arc::new(MatchingEngine::new(weights)),
        }
    }

    /// Missions worth showing to this talent, best match first.
    pub fn feed(&self, talent_id: &TalentId) -> Result<Vec<RankedMission>, StaffingError> {
        let talent = self.repository.talent(talent_id)?;
        let missions = self.repository.open_missions()?;
        Ok(self.engine.matched_missions(&talent, &missions))
    }

    /// Register the talent's interest in a mission. The score the match
    /// earned here stays on the application for good.
    pub fn apply(
        &self,
        mission_id: &MissionId,
        talent_id: &TalentId,
        now: DateTime<Utc>,
    ) -> Result<Application, StaffingError> {
        let mission = self.repository.mission(mission_id)?;
        if !mission.is_open() {
            return Err(StaffingError::MissionNotOpen {
                status: mission.status.label(),
            });
        }

        let talent = self.repository.talent(talent_id)?;
        if self
            .repository
            .application_for_pair(mission_id, talent_id)?
            .is_some()
        {
            return Err(StaffingError::AlreadyApplied);
        }

        let report = self.engine.score(&mission, &talent);
        let application = Application::new(
            next_application_id(),
            mission_id.clone(),
            talent_id.clone(),
            report.total,
            now,
        );
        self.repository.insert_application(&application)?;

        let mut details = BTreeMap::new();
        details.insert("mission_id".to_string(), mission_id.0.clone());
        details.insert("talent".to_string(), talent.full_name());
        details.insert("match_score".to_string(), report.total.to_string());
        self.notify("application_received", &application.id, details);

        Ok(application)
    }

    /// Establishment shortlists the candidate.
    pub fn accept(
        &self,
        application_id: &ApplicationId,
        now: DateTime<Utc>,
    ) -> Result<Application, StaffingError> {
        let mut application = self.repository.application(application_id)?;
        application.accept(now)?;
        self.repository.update_application(&application)?;

        let mut details = BTreeMap::new();
        details.insert("mission_id".to_string(), application.mission_id.0.clone());
        self.notify("application_accepted", &application.id, details);

        Ok(application)
    }

    /// Establishment turns the candidate down. Only pending interest can
    /// be rejected; withdrawing an accepted candidate is not supported.
    pub fn reject(
        &self,
        application_id: &ApplicationId,
        now: DateTime<Utc>,
    ) -> Result<Application, StaffingError> {
        let mut application = self.repository.application(application_id)?;
        application.reject(now)?;
        self.repository.update_application(&application)?;

        let mut details = BTreeMap::new();
        details.insert("mission_id".to_string(), application.mission_id.0.clone());
        self.notify("application_rejected", &application.id, details);

        Ok(application)
    }

    /// Talent confirms they are still available after being accepted.
    pub fn talent_confirm(
        &self,
        application_id: &ApplicationId,
        now: DateTime<Utc>,
    ) -> Result<Application, StaffingError> {
        let mut application = self.repository.application(application_id)?;
        application.talent_confirm(now)?;
        self.repository.update_application(&application)?;

        let mut details = BTreeMap::new();
        details.insert("mission_id".to_string(), application.mission_id.0.clone());
        self.notify("talent_availability_confirmed", &application.id, details);

        Ok(application)
    }

    /// Seal the hire. Requires the talent's confirmation and a free seat;
    /// the seat check runs before the transition so a refused hire leaves
    /// the application accepted.
    pub fn confirm_hire(
        &self,
        application_id: &ApplicationId,
        now: DateTime<Utc>,
    ) -> Result<Application, StaffingError> {
        let mut application = self.repository.application(application_id)?;
        let mut mission = self.repository.mission(&application.mission_id)?;
        if mission.seats_remaining() == 0 {
            return Err(StaffingError::Mission(MissionError::SeatsExhausted {
                nb_postes: mission.nb_postes,
            }));
        }

        application.confirm_hire(now)?;
        self.repository.update_application(&application)?;

        // Application first; if the mission write fails the hire stands
        // and the seat ledger is corrected by hand.
        mission.register_confirmed_hire()?;
        self.repository.update_mission(&mission)?;

        let mut details = BTreeMap::new();
        details.insert("mission_id".to_string(), application.mission_id.0.clone());
        details.insert(
            "seats_remaining".to_string(),
            mission.seats_remaining().to_string(),
        );
        self.notify("hire_confirmed", &application.id, details);

        Ok(application)
    }

    pub fn application(
        &self,
        application_id: &ApplicationId,
    ) -> Result<Application, StaffingError> {
        Ok(self.repository.application(application_id)?)
    }

    /// Candidates still in play for a mission: pending interest plus
    /// accepted, confirmed hires excluded.
    pub fn candidates(&self, mission_id: &MissionId) -> Result<Vec<Application>, StaffingError> {
        self.repository.mission(mission_id)?;
        let applications = self.repository.applications_for_mission(mission_id)?;
        Ok(applications
            .into_iter()
            .filter(|application| {
                matches!(
                    application.status,
                    ApplicationStatus::Interested | ApplicationStatus::Accepted
                )
            })
            .collect())
    }

    /// Confirmed hires for a mission.
    pub fn hired(&self, mission_id: &MissionId) -> Result<Vec<Application>, StaffingError> {
        self.repository.mission(mission_id)?;
        let applications = self.repository.applications_for_mission(mission_id)?;
        Ok(applications
            .into_iter()
            .filter(|application| application.status == ApplicationStatus::Confirmed)
            .collect())
    }

    /// Per-mission staffing overview for one establishment.
    pub fn board(&self, establishment_id: &str) -> Result<Vec<MissionBoardEntry>, StaffingError> {
        let missions = self.repository.missions_for_establishment(establishment_id)?;
        let mut entries = Vec::with_capacity(missions.len());
        for mission in &missions {
            let applications = self.repository.applications_for_mission(&mission.id)?;
            entries.push(board::board_entry(mission, &applications));
        }
        Ok(entries)
    }

    pub fn close_mission(&self, mission_id: &MissionId) -> Result<Mission, StaffingError> {
        let mut mission = self.repository.mission(mission_id)?;
        mission.close()?;
        self.repository.update_mission(&mission)?;
        Ok(mission)
    }

    pub fn reopen_mission(&self, mission_id: &MissionId) -> Result<Mission, StaffingError> {
        let mut mission = self.repository.mission(mission_id)?;
        mission.reopen()?;
        self.repository.update_mission(&mission)?;
        Ok(mission)
    }

    /// Drop a mission and everything applied to it.
    pub fn delete_mission(&self, mission_id: &MissionId) -> Result<(), StaffingError> {
        Ok(self.repository.delete_mission(mission_id)?)
    }

    /// Establishment rates the talent once the engagement is over.
    pub fn rate_talent(
        &self,
        application_id: &ApplicationId,
        overall_score: u8,
        comment: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<Rating, StaffingError> {
        ratings::validate_rating_content(overall_score, comment.as_deref())?;

        let application = self.repository.application(application_id)?;
        let mission = self.repository.mission(&application.mission_id)?;
        ratings::validate_rating_window(&application, &mission, now.date_naive())?;

        if self
            .repository
            .rating_for(application_id, RatingDirection::EstablishmentToTalent)?
            .is_some()
        {
            return Err(StaffingError::Rating(RatingViolation::AlreadyRated));
        }

        let rating = Rating {
            id: next_rating_id(),
            mission_id: application.mission_id.clone(),
            application_id: application.id.clone(),
            rater_id: mission.establishment_id.clone(),
            rated_id: application.talent_id.0.clone(),
            rating_type: RatingDirection::EstablishmentToTalent,
            overall_score,
            comment,
            visibility: RatingVisibility::Public,
            created_at: now,
        };
        self.repository.insert_rating(&rating)?;
        Ok(rating)
    }

    /// Notices are best effort. A failed dispatch is logged and the
    /// triggering state change stands.
    fn notify(
        &self,
        template: &str,
        application_id: &ApplicationId,
        details: BTreeMap<String, String>,
    ) {
        let notice = ApplicationNotice {
            template: template.to_string(),
            application_id: application_id.clone(),
            details,
        };
        if let Err(error) = self.notifier.dispatch(notice) {
            tracing::warn!(
                application = %application_id.0,
                template,
                %error,
                "notification dispatch failed"
            );
        }
    }
}

/// Everything the hiring facade can refuse or fail with.
#[derive(Debug, thiserror::Error)]
pub enum StaffingError {
    #[error("mission is {status} and does not take applications")]
    MissionNotOpen { status: &'static str },
    #[error("talent has already applied to this mission")]
    AlreadyApplied,
    #[error(transparent)]
    Transition(#[from] TransitionError),
    #[error(transparent)]
    Rating(#[from] RatingViolation),
    #[error(transparent)]
    Mission(#[from] MissionError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
