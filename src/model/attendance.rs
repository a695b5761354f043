use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};
use utoipa::ToSchema;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, AsRefStr, ToSchema,
)]
#[serde(rename_all = "kebab-case")]
#[strum(ascii_case_insensitive)]
pub enum AttendanceStatus {
    #[strum(serialize = "present")]
    Present,
    #[strum(serialize = "absent")]
    Absent,
    #[strum(serialize = "late")]
    Late,
    #[strum(to_string = "half-day", serialize = "half_day", serialize = "halfday")]
    HalfDay,
}

/// One punch record for a user on a calendar day.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AttendanceRecord {
    pub user_id: u64,
    #[schema(example = "2024-01-02", value_type = String, format = "date")]
    pub date: NaiveDate,
    #[schema(value_type = String, format = "date-time", nullable = true)]
    pub login_time: Option<NaiveDateTime>,
    #[schema(value_type = String, format = "date-time", nullable = true)]
    pub logout_time: Option<NaiveDateTime>,
    pub status: AttendanceStatus,
}

impl AttendanceRecord {
    /// Hours between login and logout; zero while the user is still punched in.
    pub fn hours_worked(&self) -> f64 {
        match (self.login_time, self.logout_time) {
            (Some(login), Some(logout)) if logout >= login => {
                (logout - login).num_seconds() as f64 / 3600.0
            }
            _ => 0.0,
        }
    }
}

/// Raw `attendance` row; status is free text in the table.
#[derive(Debug, sqlx::FromRow)]
pub struct AttendanceRow {
    pub user_id: u64,
    pub date: NaiveDate,
    pub login_time: Option<NaiveDateTime>,
    pub logout_time: Option<NaiveDateTime>,
    pub status: String,
}

impl From<AttendanceRow> for AttendanceRecord {
    fn from(row: AttendanceRow) -> Self {
        // Anything the punch subsystem writes that we don't recognise counts as absent.
        let status = row.status.parse().unwrap_or_else(|_| {
            tracing::warn!(
                user_id = row.user_id,
                date = %row.date,
                status = %row.status,
                "Unknown attendance status, counting as absent"
            );
            AttendanceStatus::Absent
        });

        AttendanceRecord {
            user_id: row.user_id,
            date: row.date,
            login_time: row.login_time,
            logout_time: row.logout_time,
            status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(status: &str) -> AttendanceRow {
        AttendanceRow {
            user_id: 1,
            date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            login_time: None,
            logout_time: None,
            status: status.to_string(),
        }
    }

    #[test]
    fn parses_known_statuses() {
        assert_eq!(AttendanceRecord::from(row("late")).status, AttendanceStatus::Late);
        assert_eq!(AttendanceRecord::from(row("half-day")).status, AttendanceStatus::HalfDay);
        assert_eq!(AttendanceRecord::from(row("half_day")).status, AttendanceStatus::HalfDay);
        assert_eq!(AttendanceRecord::from(row("Present")).status, AttendanceStatus::Present);
    }

    #[test]
    fn unknown_status_is_absent() {
        assert_eq!(AttendanceRecord::from(row("on-leave")).status, AttendanceStatus::Absent);
    }

    #[test]
    fn hours_worked_needs_both_punches() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let mut record = AttendanceRecord::from(row("present"));
        record.login_time = date.and_hms_opt(9, 0, 0);
        assert_eq!(record.hours_worked(), 0.0);

        record.logout_time = date.and_hms_opt(17, 30, 0);
        assert_eq!(record.hours_worked(), 8.5);
    }

    #[test]
    fn displays_half_day_with_hyphen() {
        assert_eq!(AttendanceStatus::HalfDay.to_string(), "half-day");
    }
}
