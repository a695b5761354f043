use serde::Serialize;
use utoipa::ToSchema;

use super::geo::round2;
use crate::model::attendance::{AttendanceRecord, AttendanceStatus};

/// Half-days forgiven per period before they start to count against attendance.
pub const HALF_DAY_THRESHOLD: u32 = 4;
/// Weight of each half-day beyond the threshold, as a fraction of a full absence.
pub const HALF_DAY_ABSENCE_RATIO: f64 = 0.5;

/// Raw tallies next to the half-day-policy figures.
#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
pub struct AttendanceSummary {
    /// Present or late days, before half-day conversion.
    pub present_days: u32,
    pub late_days: u32,
    pub half_days: u32,
    /// Absent (or unrecognised) days, before half-day conversion.
    pub absent_days: u32,
    pub normalized_present_days: u32,
    pub normalized_absent_days: f64,
    pub total_hours_worked: f64,
    pub total_records: usize,
}

pub fn summarize(records: &[AttendanceRecord]) -> AttendanceSummary {
    let mut summary = AttendanceSummary {
        total_records: records.len(),
        ..Default::default()
    };
    let mut hours = 0.0;

    for record in records {
        match record.status {
            AttendanceStatus::Present => summary.present_days += 1,
            AttendanceStatus::Late => {
                summary.present_days += 1;
                summary.late_days += 1;
            }
            AttendanceStatus::HalfDay => summary.half_days += 1,
            AttendanceStatus::Absent => summary.absent_days += 1,
        }
        hours += record.hours_worked();
    }

    let capped_half_days = summary.half_days.min(HALF_DAY_THRESHOLD);
    let excess_half_days = summary.half_days.saturating_sub(HALF_DAY_THRESHOLD);

    summary.normalized_present_days = summary.present_days + capped_half_days;
    summary.normalized_absent_days =
        summary.absent_days as f64 + excess_half_days as f64 * HALF_DAY_ABSENCE_RATIO;
    summary.total_hours_worked = round2(hours);

    summary
}
