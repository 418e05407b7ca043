use chrono::NaiveDate;
use extrataff::staffing::hiring::{
    Application, ApplicationId, ApplicationNotice, MarketplaceRepository, NotificationDispatcher,
    NotificationError, Rating, RatingDirection, RepositoryError,
};
use extrataff::staffing::mission::{Mission, MissionId};
use extrataff::staffing::talent::{Talent, TalentId};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::BTreeMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// In-memory marketplace store. BTreeMap keeps mission listing order
/// deterministic, which the feed relies on to break score ties.
#[derive(Default, Clone)]
pub(crate) struct InMemoryMarketplace {
    missions: Arc<Mutex<BTreeMap<MissionId, Mission>>>,
    talents: Arc<Mutex<BTreeMap<TalentId, Talent>>>,
    applications: Arc<Mutex<BTreeMap<ApplicationId, Application>>>,
    ratings: Arc<Mutex<Vec<Rating>>>,
}

impl InMemoryMarketplace {
    pub(crate) fn seed_mission(&self, mission: Mission) {
        let mut guard = self.missions.lock().expect("marketplace mutex poisoned");
        guard.insert(mission.id.clone(), mission);
    }

    pub(crate) fn seed_talent(&self, talent: Talent) {
        let mut guard = self.talents.lock().expect("marketplace mutex poisoned");
        guard.insert(talent.id.clone(), talent);
    }
}

impl MarketplaceRepository for InMemoryMarketplace {
    fn mission(&self, id: &MissionId) -> Result<Mission, RepositoryError> {
        let guard = self.missions.lock().expect("marketplace mutex poisoned");
        guard.get(id).cloned().ok_or(RepositoryError::NotFound)
    }

    fn update_mission(&self, mission: &Mission) -> Result<(), RepositoryError> {
        let mut guard = self.missions.lock().expect("marketplace mutex poisoned");
        if guard.contains_key(&mission.id) {
            guard.insert(mission.id.clone(), mission.clone());
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }

    fn delete_mission(&self, id: &MissionId) -> Result<(), RepositoryError> {
        let mut guard = self.missions.lock().expect("marketplace mutex poisoned");
        if guard.remove(id).is_none() {
            return Err(RepositoryError::NotFound);
        }
        drop(guard);
        self.applications
            .lock()
            .expect("marketplace mutex poisoned")
            .retain(|_, application| application.mission_id != *id);
        Ok(())
    }

    fn open_missions(&self) -> Result<Vec<Mission>, RepositoryError> {
        let guard = self.missions.lock().expect("marketplace mutex poisoned");
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
        let guard = self.missions.lock().expect("marketplace mutex poisoned");
        Ok(guard
            .values()
            .filter(|mission| mission.establishment_id == establishment_id)
            .cloned()
            .collect())
    }

    fn talent(&self, id: &TalentId) -> Result<Talent, RepositoryError> {
        let guard = self.talents.lock().expect("marketplace mutex poisoned");
        guard.get(id).cloned().ok_or(RepositoryError::NotFound)
    }

    fn insert_application(&self, application: &Application) -> Result<(), RepositoryError> {
        let mut guard = self.applications.lock().expect("marketplace mutex poisoned");
        if guard.contains_key(&application.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(application.id.clone(), application.clone());
        Ok(())
    }

    fn update_application(&self, application: &Application) -> Result<(), RepositoryError> {
        let mut guard = self.applications.lock().expect("marketplace mutex poisoned");
        if guard.contains_key(&application.id) {
            guard.insert(application.id.clone(), application.clone());
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }

    fn application(&self, id: &ApplicationId) -> Result<Application, RepositoryError> {
        let guard = self.applications.lock().expect("marketplace mutex poisoned");
        guard.get(id).cloned().ok_or(RepositoryError::NotFound)
    }

    fn applications_for_mission(
        &self,
        mission_id: &MissionId,
    ) -> Result<Vec<Application>, RepositoryError> {
        let guard = self.applications.lock().expect("marketplace mutex poisoned");
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
        let guard = self.applications.lock().expect("marketplace mutex poisoned");
        Ok(guard
            .values()
            .find(|application| {
                application.mission_id == *mission_id && application.talent_id == *talent_id
            })
            .cloned())
    }

    fn insert_rating(&self, rating: &Rating) -> Result<(), RepositoryError> {
        let mut guard = self.ratings.lock().expect("marketplace mutex poisoned");
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
        let guard = self.ratings.lock().expect("marketplace mutex poisoned");
        Ok(guard
            .iter()
            .find(|rating| {
                rating.application_id == *application_id && rating.rating_type == direction
            })
            .cloned())
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryNotifier {
    events: Arc<Mutex<Vec<ApplicationNotice>>>,
}

impl NotificationDispatcher for InMemoryNotifier {
    fn dispatch(&self, notice: ApplicationNotice) -> Result<(), NotificationError> {
        let mut guard = self.events.lock().expect("notifier mutex poisoned");
        guard.push(notice);
        Ok(())
    }
}

impl InMemoryNotifier {
    pub(crate) fn events(&self) -> Vec<ApplicationNotice> {
        self.events.lock().expect("notifier mutex poisoned").clone()
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}
