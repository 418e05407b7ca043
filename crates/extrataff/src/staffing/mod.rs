//! Staffing marketplace workflows: mission and talent records, the
//! matching engine behind the talent feed, and the hiring lifecycle.

pub mod board;
pub mod hiring;
pub mod matching;
pub mod mission;
pub mod planning;
pub mod talent;

pub use hiring::{Application, ApplicationId, ApplicationStatus, StaffingError, StaffingService};
pub use matching::{MatchCategory, MatchWeights, MatchingEngine, RankedMission};
pub use mission::{Mission, MissionId, MissionStatus, Position, UrgencyBadge};
pub use talent::{Talent, TalentId};
