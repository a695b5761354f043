use std::sync::Arc;

use crate::analytics::distance_tracker::DistanceTracker;
use crate::analytics::report::ReportBuilder;
use crate::analytics::working_days::WorkingDayCalculator;
use crate::config::Config;
use crate::store::{AttendanceStore, HolidayStore, UserStore, VisitStore};
use crate::utils::visit_locks::VisitLocks;

/// Shared services handed to every handler through `web::Data`.
#[derive(Clone)]
pub struct AppState {
    pub reports: Arc<ReportBuilder>,
    pub tracker: Arc<DistanceTracker>,
}

impl AppState {
    pub fn new(
        config: &Config,
        holidays: Arc<dyn HolidayStore>,
        users: Arc<dyn UserStore>,
        attendance: Arc<dyn AttendanceStore>,
        visits: Arc<dyn VisitStore>,
    ) -> Self {
        let calculator = WorkingDayCalculator::new(holidays, config.weekly_off_days.clone());
        let reports = ReportBuilder::new(
            calculator,
            users,
            attendance,
            visits.clone(),
            config.report_concurrency,
        );
        let tracker = DistanceTracker::new(visits, VisitLocks::new());

        Self {
            reports: Arc::new(reports),
            tracker: Arc::new(tracker),
        }
    }
}
