pub mod auth;
pub mod checkin;
pub mod dashboard;
pub mod users;
