use std::collections::BTreeMap;

use super::domain::{Application, ApplicationId};
use super::ratings::{Rating, RatingDirection};
use crate::staffing::mission::{Mission, MissionId};
use crate::staffing::talent::{Talent, TalentId};

/// Storage boundary for marketplace records. Implementations supply
/// their own persistence; the service only cares about these lookups
/// and writes. Updates carry no version check, so concurrent writers
/// race and the last write wins.
pub trait MarketplaceRepository: Send + Sync {
    fn mission(&self, id: &MissionId) -> Result<Mission, RepositoryError>;

    fn update_mission(&self, mission: &Mission) -> Result<(), RepositoryError>;

    /// Removing a mission also removes its applications.
    fn delete_mission(&self, id: &MissionId) -> Result<(), RepositoryError>;

    fn open_missions(&self) -> Result<Vec<Mission>, RepositoryError>;

    fn missions_for_establishment(
        &self,
        establishment_id: &str,
    ) -> Result<Vec<Mission>, RepositoryError>;

    fn talent(&self, id: &TalentId) -> Result<Talent, RepositoryError>;

    fn insert_application(&self, application: &Application) -> Result<(), RepositoryError>;

    fn update_application(&self, application: &Application) -> Result<(), RepositoryError>;

    fn application(&self, id: &ApplicationId) -> Result<Application, RepositoryError>;

    fn applications_for_mission(
        &self,
        mission_id: &MissionId,
    ) -> Result<Vec<Application>, RepositoryError>;

    fn application_for_pair(
        &self,
        mission_id: &MissionId,
        talent_id: &TalentId,
    ) -> Result<Option<Application>, RepositoryError>;

    fn insert_rating(&self, rating: &Rating) -> Result<(), RepositoryError>;

    fn rating_for(
        &self,
        application_id: &ApplicationId,
        direction: RatingDirection,
    ) -> Result<Option<Rating>, RepositoryError>;
}

/// Failures the storage boundary can report.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Outbound notification describing an application event. Details carry
/// template variables keyed by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationNotice {
    pub template: String,
    pub application_id: ApplicationId,
    pub details: BTreeMap<String, String>,
}

/// Delivery boundary for application notices. Dispatch failures never
/// roll back the state change that triggered them.
pub trait NotificationDispatcher: Send + Sync {
    fn dispatch(&self, notice: ApplicationNotice) -> Result<(), NotificationError>;
}

#[derive(Debug, thiserror::Error)]
pub enum NotificationError {
    #[error("notification transport failed: {0}")]
    Transport(String),
}
