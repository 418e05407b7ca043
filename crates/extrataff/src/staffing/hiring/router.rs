use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::domain::{Application, TransitionError};
use super::ratings::{Rating, RatingViolation};
use super::repository::{MarketplaceRepository, NotificationDispatcher, RepositoryError};
use super::service::{StaffingError, StaffingService};
use crate::staffing::matching::RankedMission;
use crate::staffing::mission::{MissionError, MissionId};
use crate::staffing::talent::TalentId;

#[derive(Debug, Deserialize)]
pub struct ApplyRequest {
    pub talent_id: String,
}

#[derive(Debug, Deserialize)]
pub struct RatingRequest {
    pub overall_score: u8,
    pub comment: Option<String>,
}

/// Wire shape of an application returned by every lifecycle endpoint.
#[derive(Debug, Serialize)]
pub struct ApplicationStatusView {
    pub application_id: String,
    pub mission_id: String,
    pub talent_id: String,
    pub status: &'static str,
    pub match_score: u8,
    pub establishment_confirmed: bool,
    pub talent_confirmed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confirmed_at: Option<DateTime<Utc>>,
}

impl From<&Application> for ApplicationStatusView {
    fn from(application: &Application) -> Self {
        Self {
            application_id: application.id.0.clone(),
            mission_id: application.mission_id.0.clone(),
            talent_id: application.talent_id.0.clone(),
            status: application.status.label(),
            match_score: application.match_score,
            establishment_confirmed: application.establishment_confirmed,
            talent_confirmed: application.talent_confirmed,
            confirmed_at: application.confirmed_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RatingView {
    pub rating_id: String,
    pub mission_id: String,
    pub application_id: String,
    pub rater_id: String,
    pub rated_id: String,
    pub rating_type: &'static str,
    pub overall_score: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl From<&Rating> for RatingView {
    fn from(rating: &Rating) -> Self {
        Self {
            rating_id: rating.id.0.clone(),
            mission_id: rating.mission_id.0.clone(),
            application_id: rating.application_id.0.clone(),
            rater_id: rating.rater_id.clone(),
            rated_id: rating.rated_id.clone(),
            rating_type: rating.rating_type.label(),
            overall_score: rating.overall_score,
            comment: rating.comment.clone(),
        }
    }
}

/// One feed line as the mobile clients consume it.
#[derive(Debug, Serialize)]
pub struct FeedEntryView {
    pub mission_id: String,
    pub position: &'static str,
    pub contract_type: &'static str,
    pub location_fuzzy: String,
    pub start_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hourly_rate: Option<f64>,
    pub urgency_badge: &'static str,
    pub match_score: u8,
    pub match_category: &'static str,
}

impl From<&RankedMission> for FeedEntryView {
    fn from(entry: &RankedMission) -> Self {
        Self {
            mission_id: entry.mission.id.0.clone(),
            position: entry.mission.position.label(),
            contract_type: entry.mission.contract_type.label(),
            location_fuzzy: entry.mission.location_fuzzy.clone(),
            start_date: entry.mission.start_date,
            hourly_rate: entry.mission.hourly_rate,
            urgency_badge: entry.mission.urgency_badge().label(),
            match_score: entry.match_score,
            match_category: entry.match_category.label(),
        }
    }
}

/// Routes for the hiring workflow, mounted under `/api/v1`.
pub fn staffing_router<R, N>(service: Arc<StaffingService<R, N>>) -> Router
where
    R: MarketplaceRepository + 'static,
    N: NotificationDispatcher + 'static,
{
    Router::new()
        .route(
            "/api/v1/missions/:mission_id/applications",
            post(apply::<R, N>),
        )
        .route(
            "/api/v1/applications/:application_id",
            get(application_status::<R, N>),
        )
        .route(
            "/api/v1/applications/:application_id/accept",
            post(accept::<R, N>),
        )
        .route(
            "/api/v1/applications/:application_id/reject",
            post(reject::<R, N>),
        )
        .route(
            "/api/v1/applications/:application_id/talent-confirm",
            post(talent_confirm::<R, N>),
        )
        .route(
            "/api/v1/applications/:application_id/confirm-hire",
            post(confirm_hire::<R, N>),
        )
        .route(
            "/api/v1/applications/:application_id/rating",
            post(rate_talent::<R, N>),
        )
        .route("/api/v1/talents/:talent_id/feed", get(talent_feed::<R, N>))
        .route(
            "/api/v1/establishments/:establishment_id/board",
            get(establishment_board::<R, N>),
        )
        .with_state(service)
}

pub(crate) async fn apply<R, N>(
    State(service): State<Arc<StaffingService<R, N>>>,
    Path(mission_id): Path<String>,
    Json(request): Json<ApplyRequest>,
) -> Response
where
    R: MarketplaceRepository + 'static,
    N: NotificationDispatcher + 'static,
{
    match service.apply(
        &MissionId(mission_id),
        &TalentId(request.talent_id),
        Utc::now(),
    ) {
        Ok(application) => (
            StatusCode::ACCEPTED,
            Json(ApplicationStatusView::from(&application)),
        )
            .into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn application_status<R, N>(
    State(service): State<Arc<StaffingService<R, N>>>,
    Path(application_id): Path<String>,
) -> Response
where
    R: MarketplaceRepository + 'static,
    N: NotificationDispatcher + 'static,
{
    application_response(service.application(&super::ApplicationId(application_id)))
}

pub(crate) async fn accept<R, N>(
    State(service): State<Arc<StaffingService<R, N>>>,
    Path(application_id): Path<String>,
) -> Response
where
    R: MarketplaceRepository + 'static,
    N: NotificationDispatcher + 'static,
{
    application_response(service.accept(&super::ApplicationId(application_id), Utc::now()))
}

pub(crate) async fn reject<R, N>(
    State(service): State<Arc<StaffingService<R, N>>>,
    Path(application_id): Path<String>,
) -> Response
where
    R: MarketplaceRepository + 'static,
    N: NotificationDispatcher + 'static,
{
    application_response(service.reject(&super::ApplicationId(application_id), Utc::now()))
}

pub(crate) async fn talent_confirm<R, N>(
    State(service): State<Arc<StaffingService<R, N>>>,
    Path(application_id): Path<String>,
) -> Response
where
    R: MarketplaceRepository + 'static,
    N: NotificationDispatcher + 'static,
{
    application_response(service.talent_confirm(&super::ApplicationId(application_id), Utc::now()))
}

pub(crate) async fn confirm_hire<R, N>(
    State(service): State<Arc<StaffingService<R, N>>>,
    Path(application_id): Path<String>,
) -> Response
where
    R: MarketplaceRepository + 'static,
    N: NotificationDispatcher + 'static,
{
    application_response(service.confirm_hire(&super::ApplicationId(application_id), Utc::now()))
}

pub(crate) async fn rate_talent<R, N>(
    State(service): State<Arc<StaffingService<R, N>>>,
    Path(application_id): Path<String>,
    Json(request): Json<RatingRequest>,
) -> Response
where
    R: MarketplaceRepository + 'static,
    N: NotificationDispatcher + 'static,
{
    match service.rate_talent(
        &super::ApplicationId(application_id),
        request.overall_score,
        request.comment,
        Utc::now(),
    ) {
        Ok(rating) => (StatusCode::CREATED, Json(RatingView::from(&rating))).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn talent_feed<R, N>(
    State(service): State<Arc<StaffingService<R, N>>>,
    Path(talent_id): Path<String>,
) -> Response
where
    R: MarketplaceRepository + 'static,
    N: NotificationDispatcher + 'static,
{
    match service.feed(&TalentId(talent_id)) {
        Ok(entries) => {
            let views: Vec<FeedEntryView> = entries.iter().map(FeedEntryView::from).collect();
            Json(views).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn establishment_board<R, N>(
    State(service): State<Arc<StaffingService<R, N>>>,
    Path(establishment_id): Path<String>,
) -> Response
where
    R: MarketplaceRepository + 'static,
    N: NotificationDispatcher + 'static,
{
    match service.board(&establishment_id) {
        Ok(entries) => Json(entries).into_response(),
        Err(error) => error_response(error),
    }
}

fn application_response(result: Result<Application, StaffingError>) -> Response {
    match result {
        Ok(application) => Json(ApplicationStatusView::from(&application)).into_response(),
        Err(error) => error_response(error),
    }
}

fn error_response(error: StaffingError) -> Response {
    let status = match &error {
        StaffingError::AlreadyApplied => StatusCode::CONFLICT,
        StaffingError::MissionNotOpen { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        StaffingError::Transition(TransitionError::TalentNotConfirmed) => StatusCode::CONFLICT,
        StaffingError::Transition(_) => StatusCode::UNPROCESSABLE_ENTITY,
        StaffingError::Rating(RatingViolation::AlreadyRated) => StatusCode::CONFLICT,
        StaffingError::Rating(_) => StatusCode::UNPROCESSABLE_ENTITY,
        StaffingError::Mission(MissionError::SeatsExhausted { .. }) => StatusCode::CONFLICT,
        StaffingError::Mission(_) => StatusCode::UNPROCESSABLE_ENTITY,
        StaffingError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        StaffingError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
        StaffingError::Repository(RepositoryError::Unavailable(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    (status, Json(json!({ "error": error.to_string() }))).into_response()
}
