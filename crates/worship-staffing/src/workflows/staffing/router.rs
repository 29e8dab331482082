use std::io::Cursor;
use std::str::FromStr;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::alerts::AlertPublisher;
use super::domain::{EventId, EventStaffingRequest, EventType, MemberAssignment};
use super::report::views::StaffingSummary;
use super::service::{StaffingReview, StaffingService, StaffingServiceError};
use crate::workflows::roster_import::RosterImporter;

/// Body of `POST /api/v1/staffing/analyze`. CSV rows are appended after `assignments`.
#[derive(Debug, Deserialize)]
pub struct AnalyzeStaffingRequest {
    pub event_id: EventId,
    pub event_type: EventType,
    #[serde(default)]
    pub event_date: Option<NaiveDate>,
    #[serde(default)]
    pub today: Option<NaiveDate>,
    #[serde(default)]
    pub assignments: Vec<MemberAssignment>,
    #[serde(default)]
    pub roster_csv: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeStaffingResponse {
    #[serde(flatten)]
    pub review: StaffingReview,
    pub summary: StaffingSummary,
}

/// Router builder exposing staffing analysis and profile lookup.
pub fn staffing_router<A>(service: Arc<StaffingService<A>>) -> Router
where
    A: AlertPublisher + 'static,
{
    Router::new()
        .route("/api/v1/staffing/analyze", post(analyze_handler::<A>))
        .route(
            "/api/v1/staffing/profiles/:event_type",
            get(profile_handler::<A>),
        )
        .with_state(service)
}

pub(crate) async fn analyze_handler<A>(
    State(service): State<Arc<StaffingService<A>>>,
    axum::Json(request): axum::Json<AnalyzeStaffingRequest>,
) -> Response
where
    A: AlertPublisher + 'static,
{
    let AnalyzeStaffingRequest {
        event_id,
        event_type,
        event_date,
        today,
        mut assignments,
        roster_csv,
    } = request;

    if let Some(csv) = roster_csv {
        match RosterImporter::from_reader(Cursor::new(csv.into_bytes())) {
            Ok(imported) => assignments.extend(imported),
            Err(error) => {
                let payload = json!({ "error": error.to_string() });
                return (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response();
            }
        }
    }

    let staffing_request = EventStaffingRequest {
        event_id,
        event_type,
        event_date,
        assignments,
    };
    let today = today.unwrap_or_else(|| Local::now().date_naive());

    match service.review(&staffing_request, today) {
        Ok(review) => {
            let summary = review.result.summary();
            let body = AnalyzeStaffingResponse { review, summary };
            (StatusCode::OK, axum::Json(body)).into_response()
        }
        Err(error @ StaffingServiceError::DuplicateMember(_)) => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({ "error": other.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn profile_handler<A>(
    State(service): State<Arc<StaffingService<A>>>,
    Path(event_type): Path<String>,
) -> Response
where
    A: AlertPublisher + 'static,
{
    match EventType::from_str(&event_type) {
        Ok(event_type) => {
            let profile = service.analyzer().registry().profile_for(event_type);
            (StatusCode::OK, axum::Json(profile.clone())).into_response()
        }
        Err(error) => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
    }
}
