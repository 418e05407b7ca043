use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};

/// One row of a mission plan export. Headers follow the back-office
/// spreadsheet, not our field names.
#[derive(Debug, Deserialize)]
pub(super) struct MissionPlanRow {
    #[serde(rename = "Mission ID")]
    pub(super) mission_id: String,
    #[serde(rename = "Position")]
    pub(super) position: String,
    #[serde(rename = "Contract")]
    pub(super) contract: String,
    #[serde(rename = "Start Date")]
    pub(super) start_date: String,
    #[serde(rename = "End Date", default, deserialize_with = "empty_string_as_none")]
    pub(super) end_date: Option<String>,
    #[serde(rename = "Hourly Rate", default, deserialize_with = "empty_string_as_none")]
    pub(super) hourly_rate: Option<String>,
    #[serde(rename = "Seats")]
    pub(super) seats: String,
    #[serde(rename = "Urgency", default, deserialize_with = "empty_string_as_none")]
    pub(super) urgency: Option<String>,
    #[serde(rename = "Location")]
    pub(super) location: String,
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.and_then(|value| {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }))
}

/// Exports come in ISO dates from the new back office and French
/// day-first dates from the old one.
pub(super) fn parse_plan_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(trimmed, "%d/%m/%Y"))
        .ok()
}
