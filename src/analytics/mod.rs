pub mod attendance_summary;
pub mod distance_tracker;
pub mod geo;
pub mod report;
pub mod working_days;
