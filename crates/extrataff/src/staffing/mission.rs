use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for published missions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MissionId(pub String);

/// Hospitality roles an establishment can staff through the marketplace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Position {
    Serveur,
    ChefDeRang,
    Barman,
    Cuisinier,
    CommisCuisine,
    Plongeur,
    Receptionniste,
    FemmeDeChambre,
}

impl Position {
    pub const fn label(self) -> &'static str {
        match self {
            Position::Serveur => "serveur",
            Position::ChefDeRang => "chef_de_rang",
            Position::Barman => "barman",
            Position::Cuisinier => "cuisinier",
            Position::CommisCuisine => "commis_cuisine",
            Position::Plongeur => "plongeur",
            Position::Receptionniste => "receptionniste",
            Position::FemmeDeChambre => "femme_de_chambre",
        }
    }

    pub fn from_label(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "serveur" => Some(Position::Serveur),
            "chef_de_rang" | "chef de rang" => Some(Position::ChefDeRang),
            "barman" => Some(Position::Barman),
            "cuisinier" => Some(Position::Cuisinier),
            "commis_cuisine" | "commis de cuisine" => Some(Position::CommisCuisine),
            "plongeur" => Some(Position::Plongeur),
            "receptionniste" | "réceptionniste" => Some(Position::Receptionniste),
            "femme_de_chambre" | "femme de chambre" => Some(Position::FemmeDeChambre),
            _ => None,
        }
    }
}

/// Engagement forms recognized by French hospitality contracts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContractType {
    Extra,
    Cdd,
    Cdi,
    Saisonnier,
    Interim,
}

impl ContractType {
    pub const fn label(self) -> &'static str {
        match self {
            ContractType::Extra => "extra",
            ContractType::Cdd => "cdd",
            ContractType::Cdi => "cdi",
            ContractType::Saisonnier => "saisonnier",
            ContractType::Interim => "interim",
        }
    }

    pub fn from_label(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "extra" => Some(ContractType::Extra),
            "cdd" => Some(ContractType::Cdd),
            "cdi" => Some(ContractType::Cdi),
            "saisonnier" => Some(ContractType::Saisonnier),
            "interim" | "intérim" => Some(ContractType::Interim),
            _ => None,
        }
    }
}

/// Urgency marker an establishment attaches when publishing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UrgencyLevel {
    Urgent,
    Normal,
}

impl UrgencyLevel {
    pub fn from_label(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "urgent" => Some(UrgencyLevel::Urgent),
            "normal" => Some(UrgencyLevel::Normal),
            _ => None,
        }
    }
}

/// Display class derived from the urgency marker. Anything that is not
/// explicitly urgent, including an unset marker, renders as normal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UrgencyBadge {
    Urgent,
    Normal,
}

impl UrgencyBadge {
    pub const fn label(self) -> &'static str {
        match self {
            UrgencyBadge::Urgent => "urgent",
            UrgencyBadge::Normal => "normal",
        }
    }
}

/// Publication states of a mission listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissionStatus {
    Open,
    Closed,
    Filled,
    Archived,
}

impl MissionStatus {
    pub const fn label(self) -> &'static str {
        match self {
            MissionStatus::Open => "open",
            MissionStatus::Closed => "closed",
            MissionStatus::Filled => "filled",
            MissionStatus::Archived => "archived",
        }
    }
}

/// A staffing need published by an establishment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mission {
    pub id: MissionId,
    pub establishment_id: String,
    pub position: Position,
    pub contract_type: ContractType,
    pub hourly_rate: Option<f64>,
    pub salary_text: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub shift_start_time: Option<NaiveTime>,
    pub shift_end_time: Option<NaiveTime>,
    pub urgency_level: Option<UrgencyLevel>,
    pub nb_postes: u32,
    pub nb_postes_pourvus: u32,
    pub status: MissionStatus,
    pub location_fuzzy: String,
}

impl Mission {
    /// End of the engagement for rating purposes; single-day missions
    /// fall back to their start date.
    pub fn effective_end_date(&self) -> NaiveDate {
        self.end_date.unwrap_or(self.start_date)
    }

    pub fn urgency_badge(&self) -> UrgencyBadge {
        match self.urgency_level {
            Some(UrgencyLevel::Urgent) => UrgencyBadge::Urgent,
            _ => UrgencyBadge::Normal,
        }
    }

    pub fn seats_remaining(&self) -> u32 {
        self.nb_postes.saturating_sub(self.nb_postes_pourvus)
    }

    pub fn is_open(&self) -> bool {
        self.status == MissionStatus::Open
    }

    /// Withdraw the listing. Filled missions can still be closed early.
    pub fn close(&mut self) -> Result<(), MissionError> {
        match self.status {
            MissionStatus::Archived => Err(MissionError::Archived),
            MissionStatus::Closed => Err(MissionError::AlreadyClosed),
            MissionStatus::Open | MissionStatus::Filled => {
                self.status = MissionStatus::Closed;
                Ok(())
            }
        }
    }

    /// Put the listing back on the feed, typically after a hire withdrew.
    /// Seat counters are left as they stand; the next confirmation attempt
    /// fails if no seat is actually free.
    pub fn reopen(&mut self) -> Result<(), MissionError> {
        match self.status {
            MissionStatus::Archived => Err(MissionError::Archived),
            MissionStatus::Open => Err(MissionError::AlreadyOpen),
            MissionStatus::Closed | MissionStatus::Filled => {
                self.status = MissionStatus::Open;
                Ok(())
            }
        }
    }

    /// Record one confirmed hire against the seat counters, flipping the
    /// listing to filled when the last seat goes.
    pub fn register_confirmed_hire(&mut self) -> Result<(), MissionError> {
        if self.seats_remaining() == 0 {
            return Err(MissionError::SeatsExhausted {
                nb_postes: self.nb_postes,
            });
        }

        self.nb_postes_pourvus += 1;
        if self.seats_remaining() == 0 && self.status == MissionStatus::Open {
            self.status = MissionStatus::Filled;
        }
        Ok(())
    }
}

/// Lifecycle errors raised by mission mutations.
#[derive(Debug, thiserror::Error)]
pub enum MissionError {
    #[error("mission is archived and can no longer change")]
    Archived,
    #[error("mission is already open")]
    AlreadyOpen,
    #[error("mission is already closed")]
    AlreadyClosed,
    #[error("all {nb_postes} seats are already filled")]
    SeatsExhausted { nb_postes: u32 },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mission() -> Mission {
        Mission {
            id: MissionId("mission-001".to_string()),
            establishment_id: "etab-001".to_string(),
            position: Position::Serveur,
            contract_type: ContractType::Extra,
            hourly_rate: Some(14.5),
            salary_text: None,
            start_date: NaiveDate::from_ymd_opt(2025, 11, 3).expect("valid date"),
            end_date: None,
            shift_start_time: None,
            shift_end_time: None,
            urgency_level: None,
            nb_postes: 2,
            nb_postes_pourvus: 0,
            status: MissionStatus::Open,
            location_fuzzy: "Paris 11e".to_string(),
        }
    }

    #[test]
    fn effective_end_date_falls_back_to_start() {
        let mut mission = mission();
        assert_eq!(mission.effective_end_date(), mission.start_date);

        let end = NaiveDate::from_ymd_opt(2025, 11, 9).expect("valid date");
        mission.end_date = Some(end);
        assert_eq!(mission.effective_end_date(), end);
    }

    #[test]
    fn urgency_badge_defaults_to_normal() {
        let mut mission = mission();
        assert_eq!(mission.urgency_badge(), UrgencyBadge::Normal);

        mission.urgency_level = Some(UrgencyLevel::Normal);
        assert_eq!(mission.urgency_badge(), UrgencyBadge::Normal);

        mission.urgency_level = Some(UrgencyLevel::Urgent);
        assert_eq!(mission.urgency_badge(), UrgencyBadge::Urgent);
    }

    #[test]
    fn confirmed_hires_fill_the_mission_at_capacity() {
        let mut mission = mission();
        mission.register_confirmed_hire().expect("first seat");
        assert_eq!(mission.nb_postes_pourvus, 1);
        assert_eq!(mission.status, MissionStatus::Open);

        mission.register_confirmed_hire().expect("second seat");
        assert_eq!(mission.nb_postes_pourvus, 2);
        assert_eq!(mission.status, MissionStatus::Filled);

        match mission.register_confirmed_hire() {
            Err(MissionError::SeatsExhausted { nb_postes: 2 }) => {}
            other => panic!("expected seat exhaustion, got {other:?}"),
        }
        assert_eq!(mission.nb_postes_pourvus, 2);
    }

    #[test]
    fn close_and_reopen_round_trip() {
        let mut mission = mission();
        mission.close().expect("open mission closes");
        assert_eq!(mission.status, MissionStatus::Closed);
        assert!(matches!(mission.close(), Err(MissionError::AlreadyClosed)));

        mission.reopen().expect("closed mission reopens");
        assert_eq!(mission.status, MissionStatus::Open);
        assert!(matches!(mission.reopen(), Err(MissionError::AlreadyOpen)));
    }

    #[test]
    fn archived_missions_refuse_lifecycle_changes() {
        let mut mission = mission();
        mission.status = MissionStatus::Archived;
        assert!(matches!(mission.close(), Err(MissionError::Archived)));
        assert!(matches!(mission.reopen(), Err(MissionError::Archived)));
    }

    #[test]
    fn labels_round_trip_through_from_label() {
        assert_eq!(Position::from_label("serveur"), Some(Position::Serveur));
        assert_eq!(
            Position::from_label("Chef de rang"),
            Some(Position::ChefDeRang)
        );
        assert_eq!(Position::from_label("sommelier"), None);
        assert_eq!(ContractType::from_label("EXTRA"), Some(ContractType::Extra));
        assert_eq!(ContractType::from_label("stage"), None);
    }
}
