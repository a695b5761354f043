use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::AnalyticsResult;
use crate::model::holiday::Holiday;
use crate::store::HolidayStore;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct WorkingDaysInfo {
    #[schema(value_type = String, format = "date")]
    pub start_date: NaiveDate,
    #[schema(value_type = String, format = "date")]
    pub end_date: NaiveDate,
    pub working_days: u32,
    pub total_days: u32,
    /// Number of holiday records returned for the range, duplicates included.
    pub holiday_count: usize,
    #[schema(value_type = Vec<String>)]
    pub holiday_dates: BTreeSet<NaiveDate>,
    pub holidays: Vec<Holiday>,
}

impl WorkingDaysInfo {
    /// Name of the first holiday recorded on `day`, if any.
    pub fn holiday_name(&self, day: NaiveDate) -> Option<&str> {
        self.holidays
            .iter()
            .find(|h| h.date == day)
            .map(|h| h.name.as_str())
    }
}

/// Every calendar day of `[start, end]`, inclusive.
pub fn days_inclusive(start: NaiveDate, end: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    start.iter_days().take_while(move |d| *d <= end)
}

/// Counts working days: not a weekly-off day and not an active holiday.
#[derive(Clone)]
pub struct WorkingDayCalculator {
    holidays: Arc<dyn HolidayStore>,
    weekly_off: Vec<Weekday>,
}

impl WorkingDayCalculator {
    pub fn new(holidays: Arc<dyn HolidayStore>, weekly_off: Vec<Weekday>) -> Self {
        Self {
            holidays,
            weekly_off,
        }
    }

    pub fn is_weekly_off(&self, day: NaiveDate) -> bool {
        self.weekly_off.contains(&day.weekday())
    }

    /// Expects `start <= end`; callers swap reversed ranges first.
    pub async fn compute_working_days(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> AnalyticsResult<WorkingDaysInfo> {
        let holidays = self.holidays.find_active_in_range(start, end).await?;
        Ok(self.tally(start, end, holidays))
    }

    fn tally(&self, start: NaiveDate, end: NaiveDate, holidays: Vec<Holiday>) -> WorkingDaysInfo {
        let holiday_dates: BTreeSet<NaiveDate> = holidays.iter().map(|h| h.date).collect();

        let total_days = ((end - start).num_days() + 1).max(0) as u32;
        let working_days = days_inclusive(start, end)
            .filter(|day| !self.is_weekly_off(*day) && !holiday_dates.contains(day))
            .count() as u32;

        WorkingDaysInfo {
            start_date: start,
            end_date: end,
            working_days,
            total_days,
            holiday_count: holidays.len(),
            holiday_dates,
            holidays,
        }
    }
}

/// Weekday name used in daily breakdowns ("Monday", ...).
pub fn day_name(day: NaiveDate) -> &'static str {
    const NAMES: [&str; 7] = [
        "Monday",
        "Tuesday",
        "Wednesday",
        "Thursday",
        "Friday",
        "Saturday",
        "Sunday",
    ];
    NAMES[day.weekday().num_days_from_monday() as usize]
}
