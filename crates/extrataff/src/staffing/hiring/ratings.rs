use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{Application, ApplicationId, ApplicationStatus};
use crate::staffing::mission::{Mission, MissionId};

/// Identifier wrapper for ratings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RatingId(pub String);

/// Who is rating whom on a finished engagement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RatingDirection {
    EstablishmentToTalent,
    TalentToEstablishment,
}

impl RatingDirection {
    pub const fn label(self) -> &'static str {
        match self {
            RatingDirection::EstablishmentToTalent => "establishment_to_talent",
            RatingDirection::TalentToEstablishment => "talent_to_establishment",
        }
    }
}

/// Whether a rating shows on the rated party's profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RatingVisibility {
    Public,
    Hidden,
}

/// One side's verdict on a confirmed engagement. Write-once per
/// direction; editing or re-rating is not supported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    pub id: RatingId,
    pub mission_id: MissionId,
    pub application_id: ApplicationId,
    pub rater_id: String,
    pub rated_id: String,
    pub rating_type: RatingDirection,
    pub overall_score: u8,
    pub comment: Option<String>,
    pub visibility: RatingVisibility,
    pub created_at: DateTime<Utc>,
}

pub const MAX_COMMENT_CHARS: usize = 500;

/// Reasons a rating is refused.
#[derive(Debug, thiserror::Error)]
pub enum RatingViolation {
    #[error("only confirmed hires can be rated, application is {status}")]
    ApplicationNotConfirmed { status: &'static str },
    #[error("mission runs until {end_date}, rating opens the day after")]
    MissionStillRunning { end_date: NaiveDate },
    #[error("overall score {score} is outside the 1 to 5 range")]
    ScoreOutOfRange { score: u8 },
    #[error("comment is {length} characters, the limit is 500")]
    CommentTooLong { length: usize },
    #[error("this side has already rated the engagement")]
    AlreadyRated,
}

/// Ratings open strictly after the engagement ends. A mission without
/// an end date ends on its start date.
pub fn validate_rating_window(
    application: &Application,
    mission: &Mission,
    today: NaiveDate,
) -> Result<(), RatingViolation> {
    if application.status != ApplicationStatus::Confirmed {
        return Err(RatingViolation::ApplicationNotConfirmed {
            status: application.status.label(),
        });
    }

    let end_date = mission.effective_end_date();
    if today <= end_date {
        return Err(RatingViolation::MissionStillRunning { end_date });
    }
    Ok(())
}

/// Score must sit in 1..=5 and the comment, when present, within the
/// character limit. Length counts characters, not bytes.
pub fn validate_rating_content(
    overall_score: u8,
    comment: Option<&str>,
) -> Result<(), RatingViolation> {
    if !(1..=5).contains(&overall_score) {
        return Err(RatingViolation::ScoreOutOfRange {
            score: overall_score,
        });
    }

    if let Some(comment) = comment {
        let length = comment.chars().count();
        if length > MAX_COMMENT_CHARS {
            return Err(RatingViolation::CommentTooLong { length });
        }
    }
    Ok(())
}
