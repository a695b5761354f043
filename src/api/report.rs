use actix_web::{HttpResponse, Responder, web};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use tracing::info;
use utoipa::{IntoParams, ToSchema};

use crate::analytics::report::{AttendanceRangeReport, FleetReport, MonthlyReport, resolve_range};
use crate::analytics::working_days::WorkingDaysInfo;
use crate::auth::auth::AuthUser;
use crate::state::AppState;

#[derive(Debug, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct MonthQuery {
    #[schema(example = 2024)]
    /// Calendar year
    pub year: i32,
    #[schema(example = 1)]
    /// Month, 1-12
    pub month: u32,
    #[schema(example = "Sales")]
    /// Only used by the fleet report
    pub department: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct RangeQuery {
    #[schema(example = "2024-01-01", value_type = Option<String>, format = "date")]
    /// Defaults to 30 days before `end_date`
    pub start_date: Option<NaiveDate>,
    #[schema(example = "2024-01-31", value_type = Option<String>, format = "date")]
    /// Defaults to today
    pub end_date: Option<NaiveDate>,
    #[schema(example = "Sales")]
    pub department: Option<String>,
}

/// Monthly report for one user
#[utoipa::path(
    get,
    path = "/api/reports/monthly/{user_id}",
    params(
        ("user_id", Path, description = "User ID"),
        MonthQuery
    ),
    responses(
        (status = 200, description = "Monthly report", body = MonthlyReport),
        (status = 400, description = "Invalid month"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "User not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Reports"
)]
pub async fn monthly_report(
    auth: AuthUser,
    state: web::Data<AppState>,
    path: web::Path<u64>,
    query: web::Query<MonthQuery>,
) -> actix_web::Result<impl Responder> {
    let user_id = path.into_inner();
    auth.require_self_or_hr(user_id)?;

    let report = state
        .reports
        .build_monthly_report(user_id, query.year, query.month)
        .await?;

    Ok(HttpResponse::Ok().json(report))
}

/// Monthly report for every active user
#[utoipa::path(
    get,
    path = "/api/reports/fleet",
    params(MonthQuery),
    responses(
        (status = 200, description = "Fleet report", body = FleetReport),
        (status = 400, description = "Invalid month"),
        (status = 403, description = "Forbidden"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Reports"
)]
pub async fn fleet_report(
    auth: AuthUser,
    state: web::Data<AppState>,
    query: web::Query<MonthQuery>,
) -> actix_web::Result<impl Responder> {
    auth.require_hr_or_admin()?;

    info!(
        requested_by = auth.user_id,
        year = query.year,
        month = query.month,
        "Fleet report requested"
    );

    let report = state
        .reports
        .build_fleet_report(query.year, query.month, query.department.as_deref())
        .await?;

    Ok(HttpResponse::Ok().json(report))
}

/// Normalized attendance for all active users over a date range
#[utoipa::path(
    get,
    path = "/api/reports/attendance-summary",
    params(RangeQuery),
    responses(
        (status = 200, description = "Per-user attendance, sorted by name", body = AttendanceRangeReport),
        (status = 403, description = "Forbidden"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Reports"
)]
pub async fn attendance_summary(
    auth: AuthUser,
    state: web::Data<AppState>,
    query: web::Query<RangeQuery>,
) -> actix_web::Result<impl Responder> {
    auth.require_hr_or_admin()?;

    let report = state
        .reports
        .generate_attendance_summary_report(
            query.start_date,
            query.end_date,
            query.department.as_deref(),
            Utc::now().date_naive(),
        )
        .await?;

    Ok(HttpResponse::Ok().json(report))
}

/// Working days between two dates
#[utoipa::path(
    get,
    path = "/api/reports/working-days",
    params(RangeQuery),
    responses(
        (status = 200, description = "Working-day count", body = WorkingDaysInfo),
        (status = 403, description = "Forbidden"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Reports"
)]
pub async fn working_days(
    auth: AuthUser,
    state: web::Data<AppState>,
    query: web::Query<RangeQuery>,
) -> actix_web::Result<impl Responder> {
    auth.require_hr_or_admin()?;

    let (start, end) = resolve_range(query.start_date, query.end_date, Utc::now().date_naive());
    let info = state
        .reports
        .calculator()
        .compute_working_days(start, end)
        .await?;

    Ok(HttpResponse::Ok().json(info))
}
