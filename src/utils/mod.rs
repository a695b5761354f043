pub mod holiday_cache;
pub mod visit_locks;
