use crate::analytics::attendance_summary::AttendanceSummary;
use crate::analytics::distance_tracker::{DistanceSummary, LocationInput, VisitDistanceDetail};
use crate::analytics::report::{
    AttendanceRangeReport, DailyAttendance, DailyBreakdownEntry, FleetReport, MonthlyReport,
    ReportPeriod, ReportSummary, UserAttendanceSummary, VisitDetail, VisitSummary,
};
use crate::analytics::working_days::WorkingDaysInfo;
use crate::api::report::{MonthQuery, RangeQuery};
use crate::model::attendance::{AttendanceRecord, AttendanceStatus};
use crate::model::holiday::{Holiday, HolidayType};
use crate::model::user::User;
use crate::model::visit::{RoutePoint, Visit, VisitStatus};
use utoipa::Modify;
use utoipa::OpenApi;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "HRM Attendance & Visit Analytics API",
        version = "1.0.0",
        description = r#"
## Attendance & Field-Visit Analytics

Working-day counts, attendance summaries and travel distances for the HRM admin application.

### 🔹 Key Features
- **Working days**
  - Weekly-off days and active holidays are excluded
- **Attendance summaries**
  - Raw tallies next to half-day-policy figures (first 4 half-days forgiven, the rest count half an absence)
- **Field visits**
  - Start, route and complete visits from GPS pings; distances by the Haversine formula in km
- **Reports**
  - Monthly per-user reports with a daily breakdown, fleet roll-ups and date-range summaries

### 🔐 Security
Every endpoint needs a **JWT Bearer** access token. Fleet and range reports are limited to **Admin** and **HR**.

---
Built with **Rust**, **Actix Web**, **SQLx**, and **Utoipa**.
"#,
    ),
    paths(
        crate::api::report::monthly_report,
        crate::api::report::fleet_report,
        crate::api::report::attendance_summary,
        crate::api::report::working_days,

        crate::api::visit::start_visit,
        crate::api::visit::update_route,
        crate::api::visit::complete_visit,
        crate::api::visit::track_movement,
        crate::api::visit::distance_summary
    ),
    components(
        schemas(
            MonthQuery,
            RangeQuery,
            MonthlyReport,
            FleetReport,
            AttendanceRangeReport,
            UserAttendanceSummary,
            ReportPeriod,
            ReportSummary,
            DailyBreakdownEntry,
            DailyAttendance,
            VisitSummary,
            VisitDetail,
            WorkingDaysInfo,
            AttendanceSummary,
            AttendanceStatus,
            AttendanceRecord,
            Holiday,
            HolidayType,
            User,
            Visit,
            VisitStatus,
            RoutePoint,
            LocationInput,
            DistanceSummary,
            VisitDistanceDetail
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Reports", description = "Attendance and monthly report APIs"),
        (name = "Visits", description = "Field-visit tracking APIs"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
