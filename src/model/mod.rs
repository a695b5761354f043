pub mod attendance;
pub mod holiday;
pub mod role;
pub mod user;
pub mod visit;
