pub mod checkin_service;
pub mod error;
pub mod mood_analysis;
pub mod scheduler;
pub mod sentiment;
pub mod video_search;
