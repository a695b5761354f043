use std::collections::BTreeMap;
use std::sync::RwLock;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use chrono::NaiveDate;
use futures::future::{BoxFuture, FutureExt, ready};

use super::{AttendanceStore, HolidayStore, UserStore, VisitFilter, VisitStore};
use crate::error::{AnalyticsError, AnalyticsResult};
use crate::model::attendance::AttendanceRecord;
use crate::model::holiday::Holiday;
use crate::model::user::User;
use crate::model::visit::Visit;

/// In-memory stand-in for every store, used by the unit tests.
#[derive(Default)]
pub struct MemoryStore {
    pub holidays: RwLock<Vec<Holiday>>,
    pub users: RwLock<Vec<User>>,
    pub attendance: RwLock<Vec<AttendanceRecord>>,
    pub visits: RwLock<BTreeMap<u64, Visit>>,
    pub holiday_reads: AtomicUsize,
    pub fail_reads: AtomicBool,
    pub fail_writes: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_holiday(&self, holiday: Holiday) {
        self.holidays.write().unwrap().push(holiday);
    }

    pub fn add_user(&self, user: User) {
        self.users.write().unwrap().push(user);
    }

    pub fn add_attendance(&self, record: AttendanceRecord) {
        self.attendance.write().unwrap().push(record);
    }

    pub fn add_visit(&self, visit: Visit) {
        self.visits.write().unwrap().insert(visit.id, visit);
    }

    pub fn visit(&self, id: u64) -> Option<Visit> {
        self.visits.read().unwrap().get(&id).cloned()
    }

    fn check_upstream(&self) -> AnalyticsResult<()> {
        if self.fail_reads.load(Ordering::SeqCst) {
            Err(AnalyticsError::Upstream("connection refused".into()))
        } else {
            Ok(())
        }
    }
}

impl HolidayStore for MemoryStore {
    fn find_active_in_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> BoxFuture<'_, AnalyticsResult<Vec<Holiday>>> {
        self.holiday_reads.fetch_add(1, Ordering::SeqCst);
        let result: AnalyticsResult<Vec<Holiday>> = self.check_upstream().map(|_| {
            self.holidays
                .read()
                .unwrap()
                .iter()
                .filter(|h| h.is_active && h.date >= start && h.date <= end)
                .cloned()
                .collect()
        });
        ready(result).boxed()
    }
}

impl UserStore for MemoryStore {
    fn find_active<'a>(
        &'a self,
        department: Option<&'a str>,
    ) -> BoxFuture<'a, AnalyticsResult<Vec<User>>> {
        let result: AnalyticsResult<Vec<User>> = self.check_upstream().map(|_| {
            self.users
                .read()
                .unwrap()
                .iter()
                .filter(|u| u.is_active)
                .filter(|u| department.is_none_or(|d| u.department.as_deref() == Some(d)))
                .cloned()
                .collect()
        });
        ready(result).boxed()
    }

    fn find_by_id(&self, id: u64) -> BoxFuture<'_, AnalyticsResult<Option<User>>> {
        let result = self
            .check_upstream()
            .map(|_| self.users.read().unwrap().iter().find(|u| u.id == id).cloned());
        ready(result).boxed()
    }
}

impl AttendanceStore for MemoryStore {
    fn find_by_user_in_range(
        &self,
        user_id: u64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> BoxFuture<'_, AnalyticsResult<Vec<AttendanceRecord>>> {
        let result: AnalyticsResult<Vec<AttendanceRecord>> = self.check_upstream().map(|_| {
            self.attendance
                .read()
                .unwrap()
                .iter()
                .filter(|r| r.user_id == user_id && r.date >= start && r.date <= end)
                .cloned()
                .collect()
        });
        ready(result).boxed()
    }
}

impl VisitStore for MemoryStore {
    fn find_by_id(&self, id: u64) -> BoxFuture<'_, AnalyticsResult<Option<Visit>>> {
        let result = self.check_upstream().map(|_| self.visit(id));
        ready(result).boxed()
    }

    fn find_by_user(
        &self,
        user_id: u64,
        filter: VisitFilter,
    ) -> BoxFuture<'_, AnalyticsResult<Vec<Visit>>> {
        let result: AnalyticsResult<Vec<Visit>> = self.check_upstream().map(|_| {
            self.visits
                .read()
                .unwrap()
                .values()
                .filter(|v| v.user_id == user_id && filter.matches(v))
                .cloned()
                .collect()
        });
        ready(result).boxed()
    }

    fn save(&self, visit: Visit) -> BoxFuture<'_, AnalyticsResult<()>> {
        if self.fail_writes.load(Ordering::SeqCst) {
            let result: AnalyticsResult<()> =
                Err(AnalyticsError::Upstream("lock wait timeout exceeded".into()));
            return ready(result).boxed();
        }
        let mut visits = self.visits.write().unwrap();
        let result = match visits.get_mut(&visit.id) {
            Some(slot) => {
                *slot = visit;
                Ok(())
            }
            None => Err(AnalyticsError::visit_not_found(visit.id)),
        };
        ready(result).boxed()
    }
}
