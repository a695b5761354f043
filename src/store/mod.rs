//! Narrow read/write interfaces onto the record stores owned by other
//! subsystems. The analytics core only ever talks to these traits.

use chrono::NaiveDate;
use futures::future::BoxFuture;

use crate::error::AnalyticsResult;
use crate::model::attendance::AttendanceRecord;
use crate::model::holiday::Holiday;
use crate::model::user::User;
use crate::model::visit::{Visit, VisitStatus};

#[cfg(test)]
pub mod memory;
pub mod mysql;

pub trait HolidayStore: Send + Sync {
    /// Active holidays whose date falls inside `[start, end]`.
    fn find_active_in_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> BoxFuture<'_, AnalyticsResult<Vec<Holiday>>>;
}

pub trait UserStore: Send + Sync {
    fn find_active<'a>(
        &'a self,
        department: Option<&'a str>,
    ) -> BoxFuture<'a, AnalyticsResult<Vec<User>>>;

    fn find_by_id(&self, id: u64) -> BoxFuture<'_, AnalyticsResult<Option<User>>>;
}

pub trait AttendanceStore: Send + Sync {
    fn find_by_user_in_range(
        &self,
        user_id: u64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> BoxFuture<'_, AnalyticsResult<Vec<AttendanceRecord>>>;
}

/// Selection applied by [`VisitStore::find_by_user`]. Date bounds are
/// inclusive calendar days matched against `visit_date`.
#[derive(Debug, Clone, Default)]
pub struct VisitFilter {
    pub status: Option<VisitStatus>,
    pub visit_date_from: Option<NaiveDate>,
    pub visit_date_to: Option<NaiveDate>,
}

impl VisitFilter {
    pub fn with_status(status: VisitStatus) -> Self {
        VisitFilter {
            status: Some(status),
            ..Default::default()
        }
    }

    pub fn between(mut self, from: NaiveDate, to: NaiveDate) -> Self {
        self.visit_date_from = Some(from);
        self.visit_date_to = Some(to);
        self
    }

    pub fn matches(&self, visit: &Visit) -> bool {
        if let Some(status) = self.status {
            if visit.visit_status != status {
                return false;
            }
        }
        if self.visit_date_from.is_none() && self.visit_date_to.is_none() {
            return true;
        }
        let Some(day) = visit.visit_date.map(|d| d.date_naive()) else {
            return false;
        };
        self.visit_date_from.is_none_or(|from| day >= from)
            && self.visit_date_to.is_none_or(|to| day <= to)
    }
}

pub trait VisitStore: Send + Sync {
    fn find_by_id(&self, id: u64) -> BoxFuture<'_, AnalyticsResult<Option<Visit>>>;

    fn find_by_user(
        &self,
        user_id: u64,
        filter: VisitFilter,
    ) -> BoxFuture<'_, AnalyticsResult<Vec<Visit>>>;

    /// Persists the whole visit in one write.
    fn save(&self, visit: Visit) -> BoxFuture<'_, AnalyticsResult<()>>;
}
