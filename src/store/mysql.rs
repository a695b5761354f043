use chrono::{NaiveDate, NaiveDateTime};
use futures::future::BoxFuture;
use sqlx::MySqlPool;
use sqlx::types::Json;
use tracing::debug;

use super::{AttendanceStore, HolidayStore, UserStore, VisitFilter, VisitStore};
use crate::error::{AnalyticsError, AnalyticsResult};
use crate::model::attendance::{AttendanceRecord, AttendanceRow};
use crate::model::holiday::{Holiday, HolidayRow};
use crate::model::user::User;
use crate::model::visit::{Visit, VisitRow};

const VISIT_COLUMNS: &str = r#"
    id, user_id, address, visit_status, start_location, end_location,
    route_points, distance_traveled, visit_date
"#;

// Helper enum for typed SQLx binding
enum FilterValue {
    U64(u64),
    Str(String),
    DateTime(NaiveDateTime),
}

/// All four stores backed by the shared MySQL pool.
#[derive(Clone)]
pub struct MySqlStore {
    pool: MySqlPool,
}

impl MySqlStore {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

fn start_of(day: NaiveDate) -> NaiveDateTime {
    day.and_time(chrono::NaiveTime::MIN)
}

impl HolidayStore for MySqlStore {
    fn find_active_in_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> BoxFuture<'_, AnalyticsResult<Vec<Holiday>>> {
        Box::pin(async move {
            let rows = sqlx::query_as::<_, HolidayRow>(
                r#"
                SELECT id, date, name, holiday_type, is_active, is_recurring
                FROM holidays
                WHERE is_active = TRUE
                AND date BETWEEN ? AND ?
                ORDER BY date
                "#,
            )
            .bind(start)
            .bind(end)
            .fetch_all(&self.pool)
            .await?;

            Ok(rows.into_iter().map(Holiday::from).collect())
        })
    }
}

impl UserStore for MySqlStore {
    fn find_active<'a>(
        &'a self,
        department: Option<&'a str>,
    ) -> BoxFuture<'a, AnalyticsResult<Vec<User>>> {
        Box::pin(async move {
            let users = match department {
                Some(department) => {
                    sqlx::query_as::<_, User>(
                        r#"
                        SELECT id, name, department, is_active
                        FROM users
                        WHERE is_active = TRUE AND department = ?
                        ORDER BY name
                        "#,
                    )
                    .bind(department)
                    .fetch_all(&self.pool)
                    .await?
                }
                None => {
                    sqlx::query_as::<_, User>(
                        r#"
                        SELECT id, name, department, is_active
                        FROM users
                        WHERE is_active = TRUE
                        ORDER BY name
                        "#,
                    )
                    .fetch_all(&self.pool)
                    .await?
                }
            };

            Ok(users)
        })
    }

    fn find_by_id(&self, id: u64) -> BoxFuture<'_, AnalyticsResult<Option<User>>> {
        Box::pin(async move {
            let user = sqlx::query_as::<_, User>(
                "SELECT id, name, department, is_active FROM users WHERE id = ?",
            )
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

            Ok(user)
        })
    }
}

impl AttendanceStore for MySqlStore {
    fn find_by_user_in_range(
        &self,
        user_id: u64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> BoxFuture<'_, AnalyticsResult<Vec<AttendanceRecord>>> {
        Box::pin(async move {
            let rows = sqlx::query_as::<_, AttendanceRow>(
                r#"
                SELECT user_id, date, login_time, logout_time, status
                FROM attendance
                WHERE user_id = ?
                AND date BETWEEN ? AND ?
                ORDER BY date, login_time
                "#,
            )
            .bind(user_id)
            .bind(start)
            .bind(end)
            .fetch_all(&self.pool)
            .await?;

            Ok(rows.into_iter().map(AttendanceRecord::from).collect())
        })
    }
}

impl VisitStore for MySqlStore {
    fn find_by_id(&self, id: u64) -> BoxFuture<'_, AnalyticsResult<Option<Visit>>> {
        Box::pin(async move {
            let sql = format!("SELECT {VISIT_COLUMNS} FROM visit_locations WHERE id = ?");
            let row = sqlx::query_as::<_, VisitRow>(&sql)
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

            row.map(Visit::try_from).transpose()
        })
    }

    fn find_by_user(
        &self,
        user_id: u64,
        filter: VisitFilter,
    ) -> BoxFuture<'_, AnalyticsResult<Vec<Visit>>> {
        Box::pin(async move {
            let mut conditions = vec!["user_id = ?"];
            let mut bindings = vec![FilterValue::U64(user_id)];

            if let Some(status) = filter.status {
                conditions.push("visit_status = ?");
                bindings.push(FilterValue::Str(status.to_string()));
            }
            if let Some(from) = filter.visit_date_from {
                conditions.push("visit_date >= ?");
                bindings.push(FilterValue::DateTime(start_of(from)));
            }
            if let Some(to) = filter.visit_date_to {
                let next = to.succ_opt().ok_or_else(|| {
                    AnalyticsError::validation(format!("date {to} is out of range"))
                })?;
                conditions.push("visit_date < ?");
                bindings.push(FilterValue::DateTime(start_of(next)));
            }

            let sql = format!(
                "SELECT {VISIT_COLUMNS} FROM visit_locations WHERE {} ORDER BY id",
                conditions.join(" AND ")
            );
            debug!(sql = %sql, user_id, "Fetching visits");

            let mut query = sqlx::query_as::<_, VisitRow>(&sql);
            for value in bindings {
                query = match value {
                    FilterValue::U64(v) => query.bind(v),
                    FilterValue::Str(v) => query.bind(v),
                    FilterValue::DateTime(v) => query.bind(v),
                };
            }

            let rows = query.fetch_all(&self.pool).await?;
            rows.into_iter().map(Visit::try_from).collect()
        })
    }

    fn save(&self, visit: Visit) -> BoxFuture<'_, AnalyticsResult<()>> {
        Box::pin(async move {
            let result = sqlx::query(
                r#"
                UPDATE visit_locations
                SET visit_status = ?,
                    start_location = ?,
                    end_location = ?,
                    route_points = ?,
                    distance_traveled = ?,
                    visit_date = ?
                WHERE id = ?
                "#,
            )
            .bind(visit.visit_status.to_string())
            .bind(visit.start_location.map(Json))
            .bind(visit.end_location.map(Json))
            .bind(Json(visit.route_points))
            .bind(visit.distance_traveled)
            .bind(visit.visit_date)
            .bind(visit.id)
            .execute(&self.pool)
            .await?;

            if result.rows_affected() == 0 {
                // MySQL reports 0 for unchanged rows too, so only a missing id is an error.
                let exists = sqlx::query_scalar::<_, i64>(
                    "SELECT COUNT(*) FROM visit_locations WHERE id = ?",
                )
                .bind(visit.id)
                .fetch_one(&self.pool)
                .await?;

                if exists == 0 {
                    return Err(AnalyticsError::visit_not_found(visit.id));
                }
            }

            Ok(())
        })
    }
}
