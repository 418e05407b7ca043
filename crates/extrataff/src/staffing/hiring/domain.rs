use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::staffing::mission::MissionId;
use crate::staffing::talent::TalentId;

/// Identifier wrapper for hiring applications.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ApplicationId(pub String);

/// Lifecycle states of an application. Rejected and confirmed are
/// terminal; nothing moves an application out of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    Interested,
    Accepted,
    Rejected,
    Confirmed,
}

impl ApplicationStatus {
    pub const fn label(self) -> &'static str {
        match self {
            ApplicationStatus::Interested => "interested",
            ApplicationStatus::Accepted => "accepted",
            ApplicationStatus::Rejected => "rejected",
            ApplicationStatus::Confirmed => "confirmed",
        }
    }

    pub const fn is_terminal(self) -> bool {
        matches!(
            self,
            ApplicationStatus::Rejected | ApplicationStatus::Confirmed
        )
    }
}

/// Actions the two sides can take on an application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HiringAction {
    Accept,
    Reject,
    TalentConfirm,
    ConfirmHire,
}

impl HiringAction {
    pub const fn label(self) -> &'static str {
        match self {
            HiringAction::Accept => "accept",
            HiringAction::Reject => "reject",
            HiringAction::TalentConfirm => "confirm availability for",
            HiringAction::ConfirmHire => "confirm the hire on",
        }
    }
}

/// Reasons a lifecycle action is refused.
#[derive(Debug, thiserror::Error)]
pub enum TransitionError {
    #[error("application is already {status} and can no longer change")]
    Terminal { status: &'static str },
    #[error("cannot {action} an application that is {status}")]
    InvalidAction {
        action: &'static str,
        status: &'static str,
    },
    #[error("talent has not confirmed their availability yet")]
    TalentNotConfirmed,
}

/// Transition table for the hiring lifecycle. Terminal states are
/// checked first so they shadow every action.
pub(crate) fn next_status(
    status: ApplicationStatus,
    action: HiringAction,
    talent_confirmed: bool,
) -> Result<ApplicationStatus, TransitionError> {
    if status.is_terminal() {
        return Err(TransitionError::Terminal {
            status: status.label(),
        });
    }

    match (status, action) {
        (ApplicationStatus::Interested, HiringAction::Accept) => Ok(ApplicationStatus::Accepted),
        (ApplicationStatus::Interested, HiringAction::Reject) => Ok(ApplicationStatus::Rejected),
        (ApplicationStatus::Accepted, HiringAction::TalentConfirm) => {
            Ok(ApplicationStatus::Accepted)
        }
        (ApplicationStatus::Accepted, HiringAction::ConfirmHire) => {
            if talent_confirmed {
                Ok(ApplicationStatus::Confirmed)
            } else {
                Err(TransitionError::TalentNotConfirmed)
            }
        }
        (status, action) => Err(TransitionError::InvalidAction {
            action: action.label(),
            status: status.label(),
        }),
    }
}

/// A talent's application to one mission. The match score is captured
/// once at application time and never recomputed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Application {
    pub id: ApplicationId,
    pub mission_id: MissionId,
    pub talent_id: TalentId,
    pub status: ApplicationStatus,
    pub match_score: u8,
    pub establishment_confirmed: bool,
    pub talent_confirmed: bool,
    pub confirmed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Application {
    pub fn new(
        id: ApplicationId,
        mission_id: MissionId,
        talent_id: TalentId,
        match_score: u8,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            mission_id,
            talent_id,
            status: ApplicationStatus::Interested,
            match_score,
            establishment_confirmed: false,
            talent_confirmed: false,
            confirmed_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn accept(&mut self, now: DateTime<Utc>) -> Result<(), TransitionError> {
        self.status = next_status(self.status, HiringAction::Accept, self.talent_confirmed)?;
        self.establishment_confirmed = true;
        self.updated_at = now;
        Ok(())
    }

    pub fn reject(&mut self, now: DateTime<Utc>) -> Result<(), TransitionError> {
        self.status = next_status(self.status, HiringAction::Reject, self.talent_confirmed)?;
        self.updated_at = now;
        Ok(())
    }

    pub fn talent_confirm(&mut self, now: DateTime<Utc>) -> Result<(), TransitionError> {
        self.status = next_status(self.status, HiringAction::TalentConfirm, self.talent_confirmed)?;
        self.talent_confirmed = true;
        self.updated_at = now;
        Ok(())
    }

    pub fn confirm_hire(&mut self, now: DateTime<Utc>) -> Result<(), TransitionError> {
        self.status = next_status(self.status, HiringAction::ConfirmHire, self.talent_confirmed)?;
        self.confirmed_at = Some(now);
        self.updated_at = now;
        Ok(())
    }
}
