use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use chrono::NaiveDate;
use extrataff::error::AppError;
use extrataff::staffing::hiring::{
    staffing_router, MarketplaceRepository, NotificationDispatcher, StaffingService,
};
use extrataff::staffing::mission::Mission;
use extrataff::staffing::planning::MissionPlanImporter;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::io::Cursor;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub(crate) struct PlanPreviewRequest {
    pub(crate) plan_csv: String,
    #[serde(default)]
    pub(crate) establishment_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct PlanPreviewResponse {
    pub(crate) imported: usize,
    pub(crate) skipped: usize,
    pub(crate) missions: Vec<PlanMissionView>,
}

/// What one imported plan row would publish as.
#[derive(Debug, Serialize)]
pub(crate) struct PlanMissionView {
    pub(crate) mission_id: String,
    pub(crate) position: &'static str,
    pub(crate) contract_type: &'static str,
    pub(crate) start_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) end_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) hourly_rate: Option<f64>,
    pub(crate) nb_postes: u32,
    pub(crate) urgency_badge: &'static str,
    pub(crate) location_fuzzy: String,
}

impl From<&Mission> for PlanMissionView {
    fn from(mission: &Mission) -> Self {
        Self {
            mission_id: mission.id.0.clone(),
            position: mission.position.label(),
            contract_type: mission.contract_type.label(),
            start_date: mission.start_date,
            end_date: mission.end_date,
            hourly_rate: mission.hourly_rate,
            nb_postes: mission.nb_postes,
            urgency_badge: mission.urgency_badge().label(),
            location_fuzzy: mission.location_fuzzy.clone(),
        }
    }
}

pub(crate) fn with_staffing_routes<R, N>(service: Arc<StaffingService<R, N>>) -> axum::Router
where
    R: MarketplaceRepository + 'static,
    N: NotificationDispatcher + 'static,
{
    staffing_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/plan/preview",
            axum::routing::post(plan_preview_endpoint),
        )
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

/// Dry-run a mission plan upload: parse the CSV and report what would be
/// published, without touching the marketplace.
pub(crate) async fn plan_preview_endpoint(
    Json(payload): Json<PlanPreviewRequest>,
) -> Result<Json<PlanPreviewResponse>, AppError> {
    let PlanPreviewRequest {
        plan_csv,
        establishment_id,
    } = payload;

    let establishment_id = establishment_id.unwrap_or_else(|| "etab-preview".to_string());
    let reader = Cursor::new(plan_csv.into_bytes());
    let import = MissionPlanImporter::from_reader(reader, &establishment_id)?;

    let missions: Vec<PlanMissionView> = import.missions.iter().map(PlanMissionView::from).collect();
    Ok(Json(PlanPreviewResponse {
        imported: import.missions.len(),
        skipped: import.skipped,
        missions,
    }))
}
