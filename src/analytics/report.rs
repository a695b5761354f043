use std::collections::HashMap;
use std::sync::Arc;

use chrono::{Days, Months, NaiveDate, NaiveDateTime};
use futures::stream::{self, StreamExt, TryStreamExt};
use serde::Serialize;
use tracing::{debug, info, instrument};
use utoipa::ToSchema;

use super::attendance_summary::{AttendanceSummary, summarize};
use super::distance_tracker::reported_distance;
use super::geo::round2;
use super::working_days::{WorkingDayCalculator, WorkingDaysInfo, day_name, days_inclusive};
use crate::error::{AnalyticsError, AnalyticsResult};
use crate::model::attendance::{AttendanceRecord, AttendanceStatus};
use crate::model::user::User;
use crate::model::visit::{Visit, VisitStatus};
use crate::store::{AttendanceStore, UserStore, VisitFilter, VisitStore};

/// Days covered by a range report when the caller gives no start date.
pub const DEFAULT_RANGE_DAYS: u64 = 30;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ReportPeriod {
    pub year: i32,
    pub month: u32,
    #[schema(value_type = String, format = "date")]
    pub start_date: NaiveDate,
    #[schema(value_type = String, format = "date")]
    pub end_date: NaiveDate,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DailyAttendance {
    pub status: AttendanceStatus,
    #[schema(value_type = String, format = "date-time", nullable = true)]
    pub login_time: Option<NaiveDateTime>,
    #[schema(value_type = String, format = "date-time", nullable = true)]
    pub logout_time: Option<NaiveDateTime>,
    pub hours_worked: f64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DailyBreakdownEntry {
    #[schema(value_type = String, format = "date")]
    pub date: NaiveDate,
    pub day_name: String,
    pub is_weekend: bool,
    pub is_holiday: bool,
    pub holiday_name: Option<String>,
    pub is_working_day: bool,
    pub attendance: Option<DailyAttendance>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct VisitDetail {
    pub visit_id: u64,
    pub address: String,
    pub status: VisitStatus,
    #[schema(value_type = String, format = "date-time", nullable = true)]
    pub visit_date: Option<chrono::DateTime<chrono::Utc>>,
    pub distance: f64,
    pub route_points: usize,
}

#[derive(Debug, Clone, Default, Serialize, ToSchema)]
pub struct VisitSummary {
    pub total_visits: usize,
    pub completed_visits: usize,
    pub total_distance_traveled: f64,
    pub average_distance_per_visit: f64,
    pub visit_details: Vec<VisitDetail>,
}

/// Headline figures. `absent_days` here is `working_days - present_days`
/// (floored at 0); the policy-adjusted absence lives in
/// `attendance.normalized_absent_days`. The two are kept side by side.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ReportSummary {
    pub working_days: u32,
    pub present_days: u32,
    pub absent_days: u32,
    pub attendance_percentage: f64,
    pub total_hours_worked: f64,
    pub total_visits: usize,
    pub total_distance_traveled: f64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MonthlyReport {
    pub user: User,
    pub period: ReportPeriod,
    pub summary: ReportSummary,
    pub working_days: WorkingDaysInfo,
    pub attendance: AttendanceSummary,
    pub visits: VisitSummary,
    pub daily_breakdown: Vec<DailyBreakdownEntry>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct FleetReport {
    pub period: ReportPeriod,
    pub department: Option<String>,
    pub total_users: usize,
    pub average_attendance: f64,
    pub total_distance_traveled: f64,
    pub total_visits_completed: usize,
    pub user_reports: Vec<MonthlyReport>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserAttendanceSummary {
    pub user_id: u64,
    pub name: String,
    pub department: Option<String>,
    pub working_days: u32,
    pub attendance_percentage: f64,
    pub summary: AttendanceSummary,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AttendanceRangeReport {
    #[schema(value_type = String, format = "date")]
    pub start_date: NaiveDate,
    #[schema(value_type = String, format = "date")]
    pub end_date: NaiveDate,
    pub department: Option<String>,
    pub working_days: u32,
    pub users: Vec<UserAttendanceSummary>,
}

/// First and last calendar day of `year`-`month`.
pub fn month_bounds(year: i32, month: u32) -> AnalyticsResult<(NaiveDate, NaiveDate)> {
    if !(1..=12).contains(&month) {
        return Err(AnalyticsError::validation(format!(
            "month must be between 1 and 12, got {month}"
        )));
    }
    let start = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| AnalyticsError::validation(format!("year {year} is out of range")))?;
    let end = start
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .ok_or_else(|| AnalyticsError::validation(format!("year {year} is out of range")))?;
    Ok((start, end))
}

/// Fills in the trailing default window and swaps a reversed range.
pub fn resolve_range(
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    today: NaiveDate,
) -> (NaiveDate, NaiveDate) {
    let end = end.unwrap_or(today);
    let start = start.unwrap_or_else(|| {
        end.checked_sub_days(Days::new(DEFAULT_RANGE_DAYS))
            .unwrap_or(end)
    });
    if start > end { (end, start) } else { (start, end) }
}

fn percentage(present: u32, working: u32) -> f64 {
    if working == 0 {
        0.0
    } else {
        round2(present as f64 / working as f64 * 100.0)
    }
}

fn visit_summary(visits: &[Visit]) -> VisitSummary {
    let visit_details: Vec<VisitDetail> = visits
        .iter()
        .map(|v| VisitDetail {
            visit_id: v.id,
            address: v.address.clone(),
            status: v.visit_status,
            visit_date: v.visit_date,
            distance: reported_distance(v),
            route_points: v.route_points.len(),
        })
        .collect();

    let completed: Vec<f64> = visit_details
        .iter()
        .filter(|d| d.status == VisitStatus::Completed)
        .map(|d| d.distance)
        .collect();
    let completed_visits = completed.len();
    let total_distance_traveled = round2(completed.iter().sum());
    let average_distance_per_visit = if completed_visits == 0 {
        0.0
    } else {
        round2(total_distance_traveled / completed_visits as f64)
    };

    VisitSummary {
        total_visits: visit_details.len(),
        completed_visits,
        total_distance_traveled,
        average_distance_per_visit,
        visit_details,
    }
}

/// Composes working days, attendance and visits into per-user and fleet reports.
pub struct ReportBuilder {
    calculator: WorkingDayCalculator,
    users: Arc<dyn UserStore>,
    attendance: Arc<dyn AttendanceStore>,
    visits: Arc<dyn VisitStore>,
    concurrency: usize,
}

impl ReportBuilder {
    pub fn new(
        calculator: WorkingDayCalculator,
        users: Arc<dyn UserStore>,
        attendance: Arc<dyn AttendanceStore>,
        visits: Arc<dyn VisitStore>,
        concurrency: usize,
    ) -> Self {
        Self {
            calculator,
            users,
            attendance,
            visits,
            concurrency: concurrency.max(1),
        }
    }

    pub fn calculator(&self) -> &WorkingDayCalculator {
        &self.calculator
    }

    #[instrument(skip(self))]
    pub async fn build_monthly_report(
        &self,
        user_id: u64,
        year: i32,
        month: u32,
    ) -> AnalyticsResult<MonthlyReport> {
        let (start, end) = month_bounds(year, month)?;
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AnalyticsError::user_not_found(user_id))?;

        let working_days = self.calculator.compute_working_days(start, end).await?;
        self.report_for(user, year, month, working_days).await
    }

    async fn report_for(
        &self,
        user: User,
        year: i32,
        month: u32,
        working_days: WorkingDaysInfo,
    ) -> AnalyticsResult<MonthlyReport> {
        let (start, end) = (working_days.start_date, working_days.end_date);

        let records = self
            .attendance
            .find_by_user_in_range(user.id, start, end)
            .await?;
        let attendance = summarize(&records);

        let visits = self
            .visits
            .find_by_user(user.id, VisitFilter::default().between(start, end))
            .await?;
        let visits = visit_summary(&visits);

        let daily_breakdown = self.daily_breakdown(&working_days, &records);

        let present_days = attendance.normalized_present_days;
        let summary = ReportSummary {
            working_days: working_days.working_days,
            present_days,
            absent_days: working_days.working_days.saturating_sub(present_days),
            attendance_percentage: percentage(present_days, working_days.working_days),
            total_hours_worked: attendance.total_hours_worked,
            total_visits: visits.completed_visits,
            total_distance_traveled: visits.total_distance_traveled,
        };

        debug!(
            user_id = user.id,
            year,
            month,
            attendance_percentage = summary.attendance_percentage,
            "Monthly report built"
        );

        Ok(MonthlyReport {
            user,
            period: ReportPeriod {
                year,
                month,
                start_date: start,
                end_date: end,
            },
            summary,
            working_days,
            attendance,
            visits,
            daily_breakdown,
        })
    }

    fn daily_breakdown(
        &self,
        working_days: &WorkingDaysInfo,
        records: &[AttendanceRecord],
    ) -> Vec<DailyBreakdownEntry> {
        let mut by_day: HashMap<NaiveDate, &AttendanceRecord> = HashMap::new();
        for record in records {
            by_day.entry(record.date).or_insert(record);
        }

        days_inclusive(working_days.start_date, working_days.end_date)
            .map(|day| {
                let is_weekend = self.calculator.is_weekly_off(day);
                let is_holiday = working_days.holiday_dates.contains(&day);
                DailyBreakdownEntry {
                    date: day,
                    day_name: day_name(day).to_string(),
                    is_weekend,
                    is_holiday,
                    holiday_name: working_days.holiday_name(day).map(str::to_string),
                    is_working_day: !is_weekend && !is_holiday,
                    attendance: by_day.get(&day).map(|r| DailyAttendance {
                        status: r.status,
                        login_time: r.login_time,
                        logout_time: r.logout_time,
                        hours_worked: round2(r.hours_worked()),
                    }),
                }
            })
            .collect()
    }

    /// Monthly report for every active user plus fleet-wide aggregates.
    /// Users are processed concurrently; output order follows the user store.
    #[instrument(skip(self))]
    pub async fn build_fleet_report(
        &self,
        year: i32,
        month: u32,
        department: Option<&str>,
    ) -> AnalyticsResult<FleetReport> {
        let (start, end) = month_bounds(year, month)?;
        let users = self.users.find_active(department).await?;
        let working_days = self.calculator.compute_working_days(start, end).await?;

        let user_reports: Vec<MonthlyReport> = stream::iter(users)
            .map(|user| self.report_for(user, year, month, working_days.clone()))
            .buffered(self.concurrency)
            .try_collect()
            .await?;

        let total_users = user_reports.len();
        let average_attendance = if total_users == 0 {
            0.0
        } else {
            let sum: f64 = user_reports
                .iter()
                .map(|r| r.summary.attendance_percentage)
                .sum();
            round2(sum / total_users as f64)
        };
        let total_distance_traveled = round2(
            user_reports
                .iter()
                .map(|r| r.visits.total_distance_traveled)
                .sum(),
        );
        let total_visits_completed = user_reports.iter().map(|r| r.visits.completed_visits).sum();

        info!(year, month, total_users, average_attendance, "Fleet report built");

        Ok(FleetReport {
            period: ReportPeriod {
                year,
                month,
                start_date: start,
                end_date: end,
            },
            department: department.map(str::to_string),
            total_users,
            average_attendance,
            total_distance_traveled,
            total_visits_completed,
            user_reports,
        })
    }

    /// Normalized attendance per active user over an arbitrary range, sorted by name.
    #[instrument(skip(self))]
    pub async fn generate_attendance_summary_report(
        &self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
        department: Option<&str>,
        today: NaiveDate,
    ) -> AnalyticsResult<AttendanceRangeReport> {
        let (start, end) = resolve_range(start, end, today);
        let working_days = self.calculator.compute_working_days(start, end).await?;
        let users = self.users.find_active(department).await?;
        let total_working = working_days.working_days;

        let mut rows: Vec<UserAttendanceSummary> = stream::iter(users)
            .map(|user| async move {
                let records = self
                    .attendance
                    .find_by_user_in_range(user.id, start, end)
                    .await?;
                let summary = summarize(&records);
                Ok::<_, AnalyticsError>(UserAttendanceSummary {
                    user_id: user.id,
                    name: user.name,
                    department: user.department,
                    working_days: total_working,
                    attendance_percentage: percentage(
                        summary.normalized_present_days,
                        total_working,
                    ),
                    summary,
                })
            })
            .buffered(self.concurrency)
            .try_collect()
            .await?;

        rows.sort_by_cached_key(|row| (row.name.to_lowercase(), row.name.clone()));

        Ok(AttendanceRangeReport {
            start_date: start,
            end_date: end,
            department: department.map(str::to_string),
            working_days: working_days.working_days,
            users: rows,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::holiday::{Holiday, HolidayType};
    use crate::model::visit::RoutePoint;
    use crate::store::memory::MemoryStore;
    use chrono::{Datelike, Utc, Weekday};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn user(id: u64, name: &str, department: &str) -> User {
        User {
            id,
            name: name.to_string(),
            department: Some(department.to_string()),
            is_active: true,
        }
    }

    fn punch(user_id: u64, day: NaiveDate, status: AttendanceStatus) -> AttendanceRecord {
        AttendanceRecord {
            user_id,
            date: day,
            login_time: day.and_hms_opt(9, 0, 0),
            logout_time: day.and_hms_opt(17, 0, 0),
            status,
        }
    }

    fn completed(id: u64, user_id: u64, day: NaiveDate, km: Option<f64>) -> Visit {
        let mut visit = Visit::new(id, user_id, format!("Site {id}"));
        visit.visit_status = VisitStatus::Completed;
        visit.distance_traveled = km;
        visit.visit_date = day.and_hms_opt(12, 0, 0).map(|d| d.and_utc());
        visit
    }

    fn builder(store: Arc<MemoryStore>) -> ReportBuilder {
        let calculator = WorkingDayCalculator::new(store.clone(), vec![Weekday::Sat, Weekday::Sun]);
        ReportBuilder::new(calculator, store.clone(), store.clone(), store, 4)
    }

    /// Punches present on each of the first `count` working days of February 2024.
    fn punch_working_days(store: &MemoryStore, user_id: u64, count: usize) {
        days_inclusive(date(2024, 2, 1), date(2024, 2, 29))
            .filter(|d| !matches!(d.weekday(), Weekday::Sat | Weekday::Sun))
            .take(count)
            .for_each(|d| store.add_attendance(punch(user_id, d, AttendanceStatus::Present)));
    }

    #[test]
    fn month_bounds_handles_leap_years_and_december() {
        assert_eq!(month_bounds(2024, 2).unwrap(), (date(2024, 2, 1), date(2024, 2, 29)));
        assert_eq!(month_bounds(2023, 2).unwrap().1, date(2023, 2, 28));
        assert_eq!(month_bounds(2024, 12).unwrap().1, date(2024, 12, 31));
        assert!(matches!(month_bounds(2024, 13), Err(AnalyticsError::Validation(_))));
        assert!(month_bounds(2024, 0).is_err());
    }

    #[test]
    fn resolve_range_defaults_and_swaps() {
        let today = date(2024, 3, 31);
        assert_eq!(resolve_range(None, None, today), (date(2024, 3, 1), today));
        assert_eq!(
            resolve_range(Some(date(2024, 3, 10)), Some(date(2024, 3, 1)), today),
            (date(2024, 3, 1), date(2024, 3, 10))
        );
    }

    #[actix_web::test]
    async fn monthly_report_composes_all_parts() {
        let store = Arc::new(MemoryStore::new());
        store.add_user(user(1, "Rahim", "Sales"));
        // 2024-02-21 is a Wednesday
        store.add_holiday(Holiday {
            id: 1,
            date: date(2024, 2, 21),
            name: "Language Day".into(),
            holiday_type: HolidayType::National,
            is_active: true,
            is_recurring: true,
        });
        store.add_attendance(punch(1, date(2024, 2, 1), AttendanceStatus::Present));
        store.add_attendance(punch(1, date(2024, 2, 2), AttendanceStatus::Late));
        store.add_attendance(punch(1, date(2024, 2, 5), AttendanceStatus::HalfDay));
        store.add_visit(completed(1, 1, date(2024, 2, 6), Some(3.25)));
        store.add_visit(completed(2, 1, date(2024, 2, 7), Some(1.75)));
        store.add_visit(completed(3, 1, date(2024, 3, 1), Some(8.0)));

        let report = builder(store).build_monthly_report(1, 2024, 2).await.unwrap();

        // 21 weekdays in February 2024, minus the holiday
        assert_eq!(report.working_days.working_days, 20);
        assert_eq!(report.attendance.present_days, 2);
        assert_eq!(report.attendance.late_days, 1);
        assert_eq!(report.summary.present_days, 3);
        assert_eq!(report.summary.absent_days, 17);
        assert_eq!(report.summary.attendance_percentage, 15.0);
        assert_eq!(report.summary.total_hours_worked, 24.0);
        assert_eq!(report.visits.completed_visits, 2);
        assert_eq!(report.visits.total_distance_traveled, 5.0);
        assert_eq!(report.visits.average_distance_per_visit, 2.5);
        assert_eq!(report.daily_breakdown.len(), 29);

        let holiday = &report.daily_breakdown[20];
        assert_eq!(holiday.date, date(2024, 2, 21));
        assert_eq!(holiday.day_name, "Wednesday");
        assert!(holiday.is_holiday && !holiday.is_working_day);
        assert_eq!(holiday.holiday_name.as_deref(), Some("Language Day"));

        let saturday = &report.daily_breakdown[2];
        assert!(saturday.is_weekend && !saturday.is_working_day);
        assert!(saturday.attendance.is_none());

        let late = report.daily_breakdown[1].attendance.as_ref().unwrap();
        assert_eq!(late.status, AttendanceStatus::Late);
        assert_eq!(late.hours_worked, 8.0);
    }

    #[actix_web::test]
    async fn unknown_user_is_not_found() {
        let store = Arc::new(MemoryStore::new());
        let err = builder(store).build_monthly_report(7, 2024, 2).await.unwrap_err();
        assert!(matches!(err, AnalyticsError::NotFound { entity: "user", id: 7 }));
    }

    #[actix_web::test]
    async fn invalid_month_is_rejected_before_store_access() {
        let store = Arc::new(MemoryStore::new());
        store.fail_reads.store(true, std::sync::atomic::Ordering::SeqCst);
        let err = builder(store).build_monthly_report(1, 2024, 13).await.unwrap_err();
        assert!(matches!(err, AnalyticsError::Validation(_)));
    }

    #[actix_web::test]
    async fn missing_distance_falls_back_to_start_and_end() {
        let store = Arc::new(MemoryStore::new());
        store.add_user(user(1, "Rahim", "Sales"));
        let mut visit = completed(1, 1, date(2024, 2, 6), Some(f64::NAN));
        let now = Utc::now();
        visit.start_location = Some(RoutePoint {
            latitude: 0.0,
            longitude: 0.0,
            timestamp: now,
        });
        visit.end_location = Some(RoutePoint {
            latitude: 1.0,
            longitude: 0.0,
            timestamp: now,
        });
        store.add_visit(visit);
        store.add_visit(completed(2, 1, date(2024, 2, 7), None));

        let report = builder(store).build_monthly_report(1, 2024, 2).await.unwrap();

        assert_eq!(report.visits.visit_details[0].distance, 111.19);
        assert_eq!(report.visits.visit_details[1].distance, 0.0);
        assert_eq!(report.visits.total_distance_traveled, 111.19);
    }

    #[actix_web::test]
    async fn fleet_average_is_mean_of_user_percentages() {
        let store = Arc::new(MemoryStore::new());
        store.add_user(user(1, "Rahim", "Sales"));
        store.add_user(user(2, "Karim", "Sales"));
        let mut inactive = user(3, "Gone", "Sales");
        inactive.is_active = false;
        store.add_user(inactive);
        // Leap Day off leaves 20 working days in February 2024.
        store.add_holiday(Holiday {
            id: 1,
            date: date(2024, 2, 29),
            name: "Leap Day".into(),
            holiday_type: HolidayType::Company,
            is_active: true,
            is_recurring: false,
        });
        punch_working_days(&store, 1, 20);
        punch_working_days(&store, 2, 16);
        store.add_visit(completed(1, 1, date(2024, 2, 6), Some(3.25)));
        store.add_visit(completed(2, 2, date(2024, 2, 7), Some(1.75)));

        let fleet = builder(store).build_fleet_report(2024, 2, None).await.unwrap();

        assert_eq!(fleet.total_users, 2);
        assert_eq!(fleet.user_reports[0].summary.attendance_percentage, 100.0);
        assert_eq!(fleet.user_reports[1].summary.attendance_percentage, 80.0);
        assert_eq!(fleet.average_attendance, 90.0);
        assert_eq!(fleet.total_distance_traveled, 5.0);
        assert_eq!(fleet.total_visits_completed, 2);
    }

    #[actix_web::test]
    async fn fleet_report_filters_by_department() {
        let store = Arc::new(MemoryStore::new());
        store.add_user(user(1, "Rahim", "Sales"));
        store.add_user(user(2, "Karim", "Support"));

        let fleet = builder(store)
            .build_fleet_report(2024, 2, Some("Support"))
            .await
            .unwrap();

        assert_eq!(fleet.total_users, 1);
        assert_eq!(fleet.user_reports[0].user.name, "Karim");
        assert_eq!(fleet.department.as_deref(), Some("Support"));
    }

    #[actix_web::test]
    async fn empty_fleet_has_zero_average() {
        let fleet = builder(Arc::new(MemoryStore::new()))
            .build_fleet_report(2024, 2, None)
            .await
            .unwrap();
        assert_eq!(fleet.total_users, 0);
        assert_eq!(fleet.average_attendance, 0.0);
    }

    #[actix_web::test]
    async fn fleet_report_propagates_store_failures() {
        let store = Arc::new(MemoryStore::new());
        store.add_user(user(1, "Rahim", "Sales"));
        store.fail_reads.store(true, std::sync::atomic::Ordering::SeqCst);

        let err = builder(store).build_fleet_report(2024, 2, None).await.unwrap_err();
        assert!(matches!(err, AnalyticsError::Upstream(_)));
    }

    #[actix_web::test]
    async fn range_report_is_sorted_by_name_and_swaps_dates() {
        let store = Arc::new(MemoryStore::new());
        store.add_user(user(1, "Zara", "Sales"));
        store.add_user(user(2, "Amir", "Sales"));
        store.add_user(user(3, "Nina", "Support"));
        // 2024-02-05 .. 2024-02-09 is Monday to Friday
        for day in 5..=9 {
            store.add_attendance(punch(2, date(2024, 2, day), AttendanceStatus::Present));
        }
        store.add_attendance(punch(1, date(2024, 2, 5), AttendanceStatus::HalfDay));

        let report = builder(store)
            .generate_attendance_summary_report(
                Some(date(2024, 2, 9)),
                Some(date(2024, 2, 5)),
                Some("Sales"),
                date(2024, 3, 1),
            )
            .await
            .unwrap();

        assert_eq!(report.start_date, date(2024, 2, 5));
        assert_eq!(report.end_date, date(2024, 2, 9));
        assert_eq!(report.working_days, 5);
        let names: Vec<&str> = report.users.iter().map(|u| u.name.as_str()).collect();
        assert_eq!(names, ["Amir", "Zara"]);
        assert_eq!(report.users[0].attendance_percentage, 100.0);
        assert_eq!(report.users[1].summary.normalized_present_days, 1);
        assert_eq!(report.users[1].attendance_percentage, 20.0);
    }

    #[actix_web::test]
    async fn range_report_sorts_names_ignoring_case() {
        let store = Arc::new(MemoryStore::new());
        store.add_user(user(1, "Zara", "Sales"));
        store.add_user(user(2, "amir", "Sales"));
        store.add_user(user(3, "Bilal", "Sales"));

        let report = builder(store)
            .generate_attendance_summary_report(
                Some(date(2024, 2, 5)),
                Some(date(2024, 2, 9)),
                None,
                date(2024, 3, 1),
            )
            .await
            .unwrap();

        let names: Vec<&str> = report.users.iter().map(|u| u.name.as_str()).collect();
        assert_eq!(names, ["amir", "Bilal", "Zara"]);
    }
}
