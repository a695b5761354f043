use actix_web::{HttpResponse, Responder, web};
use chrono::Utc;
use serde_json::json;

use crate::analytics::distance_tracker::{DistanceSummary, LocationInput};
use crate::analytics::report::resolve_range;
use crate::api::report::RangeQuery;
use crate::auth::auth::AuthUser;
use crate::model::visit::Visit;
use crate::state::AppState;

/// Start a visit at the caller's current position
#[utoipa::path(
    post,
    path = "/api/visits/{visit_id}/start",
    params(("visit_id", Path, description = "Visit ID")),
    request_body = LocationInput,
    responses(
        (status = 200, description = "Visit started", body = Visit),
        (status = 400, description = "Invalid coordinates"),
        (status = 404, description = "Visit not found"),
        (status = 409, description = "Visit already started or closed")
    ),
    security(("bearer_auth" = [])),
    tag = "Visits"
)]
pub async fn start_visit(
    _auth: AuthUser,
    state: web::Data<AppState>,
    path: web::Path<u64>,
    payload: web::Json<LocationInput>,
) -> actix_web::Result<impl Responder> {
    let visit = state
        .tracker
        .start(path.into_inner(), payload.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(visit))
}

/// Append a GPS sample to a visit's route
#[utoipa::path(
    post,
    path = "/api/visits/{visit_id}/route",
    params(("visit_id", Path, description = "Visit ID")),
    request_body = LocationInput,
    responses(
        (status = 200, description = "Route updated", body = Visit),
        (status = 400, description = "Invalid coordinates"),
        (status = 404, description = "Visit not found"),
        (status = 409, description = "Visit is closed")
    ),
    security(("bearer_auth" = [])),
    tag = "Visits"
)]
pub async fn update_route(
    _auth: AuthUser,
    state: web::Data<AppState>,
    path: web::Path<u64>,
    payload: web::Json<LocationInput>,
) -> actix_web::Result<impl Responder> {
    let visit = state
        .tracker
        .update_route(path.into_inner(), payload.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(visit))
}

/// Complete a visit at the caller's current position
#[utoipa::path(
    post,
    path = "/api/visits/{visit_id}/complete",
    params(("visit_id", Path, description = "Visit ID")),
    request_body = LocationInput,
    responses(
        (status = 200, description = "Visit completed", body = Visit),
        (status = 400, description = "Invalid coordinates"),
        (status = 404, description = "Visit not found"),
        (status = 409, description = "Visit is closed")
    ),
    security(("bearer_auth" = [])),
    tag = "Visits"
)]
pub async fn complete_visit(
    _auth: AuthUser,
    state: web::Data<AppState>,
    path: web::Path<u64>,
    payload: web::Json<LocationInput>,
) -> actix_web::Result<impl Responder> {
    let visit = state
        .tracker
        .complete(path.into_inner(), payload.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(visit))
}

/// Push one GPS ping into all of the caller's open visits
#[utoipa::path(
    post,
    path = "/api/visits/track",
    request_body = LocationInput,
    responses(
        (status = 200, description = "Number of visits updated", body = Object, example = json!({
            "updated": 2
        })),
        (status = 400, description = "Invalid coordinates")
    ),
    security(("bearer_auth" = [])),
    tag = "Visits"
)]
pub async fn track_movement(
    auth: AuthUser,
    state: web::Data<AppState>,
    payload: web::Json<LocationInput>,
) -> actix_web::Result<impl Responder> {
    let updated = state
        .tracker
        .track_user_movement(auth.user_id, payload.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(json!({ "updated": updated })))
}

/// Distance travelled on completed visits
#[utoipa::path(
    get,
    path = "/api/visits/distance-summary/{user_id}",
    params(
        ("user_id", Path, description = "User ID"),
        RangeQuery
    ),
    responses(
        (status = 200, description = "Distance summary", body = DistanceSummary),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Visits"
)]
pub async fn distance_summary(
    auth: AuthUser,
    state: web::Data<AppState>,
    path: web::Path<u64>,
    query: web::Query<RangeQuery>,
) -> actix_web::Result<impl Responder> {
    let user_id = path.into_inner();
    auth.require_self_or_hr(user_id)?;

    let (start, end) = resolve_range(query.start_date, query.end_date, Utc::now().date_naive());
    let summary = state
        .tracker
        .user_distance_summary(user_id, start, end)
        .await?;

    Ok(HttpResponse::Ok().json(summary))
}
