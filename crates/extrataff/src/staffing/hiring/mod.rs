//! The hiring lifecycle: a talent applies to a mission, the
//! establishment accepts or rejects, the talent confirms availability,
//! and the establishment seals the hire. Confirmed engagements can be
//! rated once they end.

pub mod domain;
pub mod ratings;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{Application, ApplicationId, ApplicationStatus, HiringAction, TransitionError};
pub use ratings::{Rating, RatingDirection, RatingId, RatingViolation, RatingVisibility};
pub use repository::{
    ApplicationNotice, MarketplaceRepository, NotificationDispatcher, NotificationError,
    RepositoryError,
};
pub use router::staffing_router;
pub use service::{StaffingError, StaffingService};
