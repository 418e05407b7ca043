use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde_json::Value;

use crate::staffing::hiring::domain::{Application, ApplicationId};
use crate::staffing::hiring::ratings::{Rating, RatingDirection};
use crate::staffing::hiring::repository::{
    ApplicationNotice, MarketplaceRepository, NotificationDispatcher, NotificationError,
    RepositoryError,
};
use crate::staffing::hiring::router::staffing_router;
use crate::staffing::hiring::service::StaffingService;
use crate::staffing::matching::MatchWeights;
use crate::staffing::mission::{ContractType, Mission, MissionId, MissionStatus, Position};
use crate::staffing::talent::{Talent, TalentId};

pub(super) fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 11, 1, 9, 0, 0)
        .single()
        .expect("valid timestamp")
}

/// The day after the fixture mission ends, when ratings open.
pub(super) fn after_mission_end() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 11, 6, 9, 0, 0)
        .single()
        .expect("valid timestamp")
}

/// Open one-seat mission without a published rate. Against the fixture
/// talent it scores 95: everything matches and the missing rate earns
/// the neutral allowance.
pub(super) fn mission(id: &str) -> Mission {
    Mission {
        id: MissionId(id.to_string()),
        establishment_id: "etab-001".to_string(),
        position: Position::Serveur,
        contract_type: ContractType::Extra,
        hourly_rate: None,
        salary_text: None,
        start_date: NaiveDate::from_ymd_opt(2025, 11, 3).expect("valid date"),
        end_date: Some(NaiveDate::from_ymd_opt(2025, 11, 5).expect("valid date")),
        shift_start_time: None,
        shift_end_time: None,
        urgency_level: None,
        nb_postes: 1,
        nb_postes_pourvus: 0,
        status: MissionStatus::Open,
        location_fuzzy: "Paris 11e".to_string(),
    }
}

pub(super) fn talent(id: &str) -> Talent {
    Talent {
        id: TalentId(id.to_string()),
        user_id: format!("user-{id}"),
        first_name: "Inès".to_string(),
        last_name: "Moreau".to_string(),
        phone: Some("+33612345678".to_string()),
        position_types: BTreeSet::from([Position::Serveur]),
        contract_preferences: BTreeSet::from([ContractType::Extra]),
        min_hourly_rate: Some(12.0),
        preferred_departments: BTreeSet::from(["75".to_string(), "92".to_string()]),
        search_radius: 25,
        accepts_coupure: true,
        years_experience: 3,
    }
}

pub(super) fn build_service() -> (
    StaffingService<MemoryMarketplace, MemoryNotifier>,
    Arc<MemoryMarketplace>,
    Arc<MemoryNotifier>,
) {
    let repository = Arc::new(MemoryMarketplace::default());
    let notifier = Arc::new(MemoryNotifier::default());
    let service = StaffingService::new(
        repository.clone(),
        notifier.clone(),
        MatchWeights::default(),
    );
    (service, repository, notifier)
}

#[derive(Default, Clone)]
pub(super) struct MemoryMarketplace {
    missions: Arc<Mutex<BTreeMap<MissionId, Mission>>>,
    talents: Arc<Mutex<BTreeMap<TalentId, Talent>>>,
    applications: Arc<Mutex<BTreeMap<ApplicationId, Application>>>,
    ratings: Arc<Mutex<Vec<Rating>>>,
}

impl MemoryMarketplace {
    pub(super) fn seed_mission(&self, mission: Mission) {
        self.missions
            .lock()
            .expect("mission mutex poisoned")
            .insert(mission.id.clone(), mission);
    }

    pub(super) fn seed_talent(&self, talent: Talent) {
        self.talents
            .lock()
            .expect("talent mutex poisoned")
            .insert(talent.id.clone(), talent);
    }

    pub(super) fn mission_snapshot(&self, id: &MissionId) -> Option<Mission> {
        self.missions
            .lock()
            .expect("mission mutex poisoned")
            .get(id)
            .cloned()
    }

    pub(super) fn application_snapshot(&self, id: &ApplicationId) -> Option<Application> {
        self.applications
            .lock()
            .expect("application mutex poisoned")
            .get(id)
            .cloned()
    }

    pub(super) fn rating_snapshots(&self) -> Vec<Rating> {
        self.ratings.lock().expect("rating mutex poisoned").clone()
    }
}

impl MarketplaceRepository for MemoryMarketplace {
    fn mission(&self, id: &MissionId) -> Result<Mission, RepositoryError> {
        self.missions
            .lock()
            .expect("mission mutex poisoned")
            .get(id)
            .cloned()
            .ok_or(RepositoryError::NotFound)
    }

    fn update_mission(&self, mission: &Mission) -> Result<(), RepositoryError> {
        let mut guard = self.missions.lock().expect("mission mutex poisoned");
        if !guard.contains_key(&mission.id) {
            return Err(RepositoryError::NotFound);
        }
        guard.insert(mission.id.clone(), mission.clone());
        Ok(())
    }

    fn delete_mission(&self, id: &MissionId) -> Result<(), RepositoryError> {
        let mut guard = self.missions.lock().expect("mission mutex poisoned");
        if guard.remove(id).is_none() {
            return Err(RepositoryError::NotFound);
        }
        drop(guard);

        self.applications
            .lock()
            .expect("application mutex poisoned")
            .retain(|_, application| application.mission_id != *id);
        Ok(())
    }

    fn open_missions(&self) -> Result<Vec<Mission>, RepositoryError> {
        let guard = self.missions.lock().expect("mission mutex poisoned");
        Ok(guard
            .values()
            .filter(|mission| mission.is_open())
            .cloned()
            .collect())
    }

    fn missions_for_establishment(
        &self,
        establishment_id: &str,
    ) -> Result<Vec<Mission>, RepositoryError> {
        let guard = self.missions.lock().expect("mission mutex poisoned");
        Ok(guard
            .values()
            .filter(|mission| mission.establishment_id == establishment_id)
            .cloned()
            .collect())
    }

    fn talent(&self, id: &TalentId) -> Result<Talent, RepositoryError> {
        self.talents
            .lock()
            .expect("talent mutex poisoned")
            .get(id)
            .cloned()
            .ok_or(RepositoryError::NotFound)
    }

    fn insert_application(&self, application: &Application) -> Result<(), RepositoryError> {
        let mut guard = self.applications.lock().expect("application mutex poisoned");
        if guard.contains_key(&application.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(application.id.clone(), application.clone());
        Ok(())
    }

    fn update_application(&self, application: &Application) -> Result<(), RepositoryError> {
        let mut guard = self.applications.lock().expect("application mutex poisoned");
        if !guard.contains_key(&application.id) {
            return Err(RepositoryError::NotFound);
        }
        guard.insert(application.id.clone(), application.clone());
        Ok(())
    }

    fn application(&self, id: &ApplicationId) -> Result<Application, RepositoryError> {
        self.applications
            .lock()
            .expect("application mutex poisoned")
            .get(id)
            .cloned()
            .ok_or(RepositoryError::NotFound)
    }

    fn applications_for_mission(
        &self,
        mission_id: &MissionId,
    ) -> Result<Vec<Application>, RepositoryError> {
        let guard = self.applications.lock().expect("application mutex poisoned");
        Ok(guard
            .values()
            .filter(|application| application.mission_id == *mission_id)
            .cloned()
            .collect())
    }

    fn application_for_pair(
        &self,
        mission_id: &MissionId,
        talent_id: &TalentId,
    ) -> Result<Option<Application>, RepositoryError> {
        let guard = self.applications.lock().expect("application mutex poisoned");
        Ok(guard
            .values()
            .find(|application| {
                application.mission_id == *mission_id && application.talent_id == *talent_id
            })
            .cloned())
    }

    fn insert_rating(&self, rating: &Rating) -> Result<(), RepositoryError> {
        let mut guard = self.ratings.lock().expect("rating mutex poisoned");
        if guard.iter().any(|existing| {
            existing.application_id == rating.application_id
                && existing.rating_type == rating.rating_type
        }) {
            return Err(RepositoryError::Conflict);
        }
        guard.push(rating.clone());
        Ok(())
    }

    fn rating_for(
        &self,
        application_id: &ApplicationId,
        direction: RatingDirection,
    ) -> Result<Option<Rating>, RepositoryError> {
        let guard = self.ratings.lock().expect("rating mutex poisoned");
        Ok(guard
            .iter()
            .find(|rating| {
                rating.application_id == *application_id && rating.rating_type == direction
            })
            .cloned())
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryNotifier {
    events: Arc<Mutex<Vec<ApplicationNotice>>>,
}

impl MemoryNotifier {
    pub(super) fn events(&self) -> Vec<ApplicationNotice> {
        self.events.lock().expect("notice mutex poisoned").clone()
    }
}

impl NotificationDispatcher for MemoryNotifier {
    fn dispatch(&self, notice: ApplicationNotice) -> Result<(), NotificationError> {
        self.events
            .lock()
            .expect("notice mutex poisoned")
            .push(notice);
        Ok(())
    }
}

pub(super) struct FailingNotifier;

impl NotificationDispatcher for FailingNotifier {
    fn dispatch(&self, _notice: ApplicationNotice) -> Result<(), NotificationError> {
        Err(NotificationError::Transport(
            "push gateway offline".to_string(),
        ))
    }
}

pub(super) struct UnavailableMarketplace;

impl UnavailableMarketplace {
    fn offline<T>() -> Result<T, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

impl MarketplaceRepository for UnavailableMarketplace {
    fn mission(&self, _id: &MissionId) -> Result<Mission, RepositoryError> {
        Self::offline()
    }

    fn update_mission(&self, _mission: &Mission) -> Result<(), RepositoryError> {
        Self::offline()
    }

    fn delete_mission(&self, _id: &MissionId) -> Result<(), RepositoryError> {
        Self::offline()
    }

    fn open_missions(&self) -> Result<Vec<Mission>, RepositoryError> {
        Self::offline()
    }

    fn missions_for_establishment(
        &self,
        _establishment_id: &str,
    ) -> Result<Vec<Mission>, RepositoryError> {
        Self::offline()
    }

    fn talent(&self, _id: &TalentId) -> Result<Talent, RepositoryError> {
        Self::offline()
    }

    fn insert_application(&self, _application: &Application) -> Result<(), RepositoryError> {
        Self::offline()
    }

    fn update_application(&self, _application: &Application) -> Result<(), RepositoryError> {
        Self::offline()
    }

    fn application(&self, _id: &ApplicationId) -> Result<Application, RepositoryError> {
        Self::offline()
    }

    fn applications_for_mission(
        &self,
        _mission_id: &MissionId,
    ) -> Result<Vec<Application>, RepositoryError> {
        Self::offline()
    }

    fn application_for_pair(
        &self,
        _mission_id: &MissionId,
        _talent_id: &TalentId,
    ) -> Result<Option<Application>, RepositoryError> {
        Self::offline()
    }

    fn insert_rating(&self, _rating: &Rating) -> Result<(), RepositoryError> {
        Self::offline()
    }

    fn rating_for(
        &self,
        _application_id: &ApplicationId,
        _direction: RatingDirection,
    ) -> Result<Option<Rating>, RepositoryError> {
        Self::offline()
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) fn staffing_router_with_service(
    service: StaffingService<MemoryMarketplace, MemoryNotifier>,
) -> axum::Router {
    staffing_router(Arc::new(service))
}
