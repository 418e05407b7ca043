//! CSV import of mission plans. Establishments upload their staffing
//! plan as a spreadsheet export; rows that cannot become a valid open
//! mission are skipped and counted rather than failing the batch.

mod parser;

use std::fmt;
use std::fs::File;
use std::io;
use std::path::Path;

use parser::MissionPlanRow;

use super::mission::{ContractType, Mission, MissionId, MissionStatus, Position, UrgencyLevel};

/// Outcome of one import run.
#[derive(Debug)]
pub struct MissionPlanImport {
    pub missions: Vec<Mission>,
    pub skipped: usize,
}

pub struct MissionPlanImporter;

impl MissionPlanImporter {
    pub fn from_path(
        path: impl AsRef<Path>,
        establishment_id: &str,
    ) -> Result<MissionPlanImport, MissionPlanImportError> {
        let file = File::open(path)?;
        Self::from_reader(file, establishment_id)
    }

    pub fn from_reader<R: io::Read>(
        reader: R,
        establishment_id: &str,
    ) -> Result<MissionPlanImport, MissionPlanImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut missions = Vec::new();
        let mut skipped = 0usize;
        for row in csv_reader.deserialize::<MissionPlanRow>() {
            match build_mission(row?, establishment_id) {
                Some(mission) => missions.push(mission),
                None => skipped += 1,
            }
        }
        Ok(MissionPlanImport { missions, skipped })
    }
}

/// Rows missing an id, a known position or contract, a parseable start
/// date, or at least one seat do not become missions.
fn build_mission(row: MissionPlanRow, establishment_id: &str) -> Option<Mission> {
    if row.mission_id.trim().is_empty() {
        return None;
    }
    let position = Position::from_label(&row.position)?;
    let contract_type = ContractType::from_label(&row.contract)?;
    let start_date = parser::parse_plan_date(&row.start_date)?;
    let nb_postes = row.seats.trim().parse::<u32>().ok().filter(|seats| *seats > 0)?;

    let end_date = row.end_date.as_deref().and_then(parser::parse_plan_date);
    let hourly_rate = row
        .hourly_rate
        .as_deref()
        .and_then(|value| value.trim().parse::<f64>().ok());
    let urgency_level = row.urgency.as_deref().and_then(UrgencyLevel::from_label);

    Some(Mission {
        id: MissionId(row.mission_id),
        establishment_id: establishment_id.to_string(),
        position,
        contract_type,
        hourly_rate,
        salary_text: None,
        start_date,
        end_date,
        shift_start_time: None,
        shift_end_time: None,
        urgency_level,
        nb_postes,
        nb_postes_pourvus: 0,
        status: MissionStatus::Open,
        location_fuzzy: row.location,
    })
}

#[derive(Debug)]
pub enum MissionPlanImportError {
    Io(io::Error),
    Csv(csv::Error),
}

impl fmt::Display for MissionPlanImportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MissionPlanImportError::Io(error) => write!(f, "could not read mission plan: {error}"),
            MissionPlanImportError::Csv(error) => {
                write!(f, "could not parse mission plan: {error}")
            }
        }
    }
}

impl std::error::Error for MissionPlanImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MissionPlanImportError::Io(error) => Some(error),
            MissionPlanImportError::Csv(error) => Some(error),
        }
    }
}

impl From<io::Error> for MissionPlanImportError {
    fn from(error: io::Error) -> Self {
        MissionPlanImportError::Io(error)
    }
}

impl From<csv::Error> for MissionPlanImportError {
    fn from(error: csv::Error) -> Self {
        MissionPlanImportError::Csv(error)
    }
}
