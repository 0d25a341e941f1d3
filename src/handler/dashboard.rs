use std::collections::HashSet;
use std::sync::Arc;

use axum::{middleware, response::IntoResponse, routing::get, Extension, Json, Router};

use crate::{
    dtos::{
        AlertDto, LeaderDashboardData, LeaderDashboardResponseDto, MoodStatDto,
        PlayableAnalysisDto, StudentDashboardData, StudentDashboardResponseDto,
    },
    error::HttpError,
    middleware::{role_check, SessionAuthMiddleware},
    models::{
        moodmodel::{Mood, MoodRecord},
        usermodel::{User, UserRole},
    },
    store::{MoodStoreExt, UserStoreExt},
    AppState,
};

pub fn dashboard_handler() -> Router {
    Router::new()
        .route(
            "/student",
            get(student_dashboard).layer(middleware::from_fn(|state, req, next| {
                role_check(state, req, next, vec![UserRole::Student])
            })),
        )
        .route(
            "/leader",
            get(leader_dashboard).layer(middleware::from_fn(|state, req, next| {
                role_check(state, req, next, vec![UserRole::Leader])
            })),
        )
}

pub async fn student_dashboard(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<SessionAuthMiddleware>,
) -> Result<impl IntoResponse, HttpError> {
    let records = app_state
        .store
        .load_records()
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let mut history: Vec<MoodRecord> = records
        .into_iter()
        .filter(|r| r.student_id == auth.user.id)
        .collect();

    let current_mood = history.last().cloned();
    history.reverse();

    let last_analysis = app_state
        .store
        .load_last_analysis()
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .map(|analysis| PlayableAnalysisDto::from_analysis(&analysis));

    Ok(Json(StudentDashboardResponseDto {
        status: "success".to_string(),
        data: StudentDashboardData {
            current_mood,
            history,
            last_analysis,
        },
    }))
}

pub async fn leader_dashboard(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<SessionAuthMiddleware>,
) -> Result<impl IntoResponse, HttpError> {
    let leader_code = auth.user.referral_code.clone().unwrap_or_default();

    let users = app_state
        .store
        .load_users()
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let records = app_state
        .store
        .load_records()
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let students: Vec<&User> = users
        .iter()
        .filter(|u| {
            u.role == UserRole::Student && u.vouched_by.as_deref() == Some(leader_code.as_str())
        })
        .collect();

    let student_ids: HashSet<&str> = students.iter().map(|s| s.id.as_str()).collect();

    let branch_records: Vec<MoodRecord> = records
        .into_iter()
        .filter(|r| student_ids.contains(r.student_id.as_str()))
        .collect();

    let data = LeaderDashboardData {
        student_count: students.len(),
        check_in_count: branch_records.len(),
        mood_stats: mood_tally(&branch_records),
        recent_alerts: recent_alerts(&branch_records, &students),
    };

    Ok(Json(LeaderDashboardResponseDto {
        status: "success".to_string(),
        data,
    }))
}

/// Frequency of every mood in a fixed order; absent moods count zero.
fn mood_tally(records: &[MoodRecord]) -> Vec<MoodStatDto> {
    Mood::ALL
        .iter()
        .map(|mood| MoodStatDto {
            name: mood.to_str().to_string(),
            value: records.iter().filter(|r| r.mood == *mood).count(),
        })
        .collect()
}

/// Up to 5 most recent negative-mood records, newest first. Records are
/// stored in append order, so newest means scanning from the back.
fn recent_alerts(records: &[MoodRecord], students: &[&User]) -> Vec<AlertDto> {
    records
        .iter()
        .rev()
        .filter(|r| r.mood.is_negative())
        .take(5)
        .map(|r| AlertDto {
            id: r.id.clone(),
            student_id: r.student_id.clone(),
            student_name: students
                .iter()
                .find(|s| s.id == r.student_id)
                .map(|s| s.name.clone())
                .unwrap_or_else(|| "Unknown".to_string()),
            mood: r.mood,
            timestamp: r.timestamp,
            input: r.input.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn record(id: &str, student_id: &str, mood: Mood, minutes_ago: i64) -> MoodRecord {
        MoodRecord {
            id: id.to_string(),
            student_id: student_id.to_string(),
            timestamp: Utc::now() - Duration::minutes(minutes_ago),
            mood,
            input: format!("entry {}", id),
            rating: 3,
        }
    }

    fn student(id: &str, name: &str) -> User {
        User {
            id: id.to_string(),
            email: format!("{}@example.com", id),
            name: name.to_string(),
            role: UserRole::Student,
            branch: Some("Computer Science".to_string()),
            settings: None,
            referral_code: None,
            vouched_by: Some("CS-LEADER-101".to_string()),
        }
    }

    #[test]
    fn tally_reports_all_six_moods_in_fixed_order() {
        let records = vec![
            record("r1", "s1", Mood::Happy, 30),
            record("r2", "s1", Mood::Happy, 20),
            record("r3", "s1", Mood::Sad, 10),
        ];

        let stats = mood_tally(&records);

        assert_eq!(stats.len(), 6);
        assert_eq!(
            stats[0],
            MoodStatDto {
                name: "Happy".to_string(),
                value: 2
            }
        );
        assert_eq!(stats[3].name, "Sad");
        assert_eq!(stats[3].value, 1);
        assert_eq!(stats[4], MoodStatDto { name: "Neutral".to_string(), value: 0 });
        assert_eq!(stats.iter().map(|s| s.value).sum::<usize>(), records.len());
    }

    #[test]
    fn tally_of_no_records_is_all_zeroes() {
        let stats = mood_tally(&[]);
        assert_eq!(stats.len(), 6);
        assert!(stats.iter().all(|s| s.value == 0));
    }

    #[test]
    fn alerts_keep_only_negative_moods_newest_first() {
        let records = vec![
            record("r1", "s1", Mood::Sad, 50),
            record("r2", "s1", Mood::Happy, 40),
            record("r3", "s1", Mood::Anxious, 30),
            record("r4", "s1", Mood::Calm, 20),
            record("r5", "s1", Mood::Stressed, 10),
        ];
        let students = vec![student("s1", "Alex Johnson")];
        let student_refs: Vec<&User> = students.iter().collect();

        let alerts = recent_alerts(&records, &student_refs);

        assert_eq!(alerts.len(), 3);
        assert_eq!(alerts[0].id, "r5");
        assert_eq!(alerts[1].id, "r3");
        assert_eq!(alerts[2].id, "r1");
        assert!(alerts.iter().all(|a| a.student_name == "Alex Johnson"));
    }

    #[test]
    fn alerts_cap_at_five() {
        let records: Vec<MoodRecord> = (0..8)
            .map(|i| record(&format!("r{}", i), "s1", Mood::Stressed, 80 - i as i64))
            .collect();
        let students = vec![student("s1", "Alex Johnson")];
        let student_refs: Vec<&User> = students.iter().collect();

        let alerts = recent_alerts(&records, &student_refs);

        assert_eq!(alerts.len(), 5);
        assert_eq!(alerts[0].id, "r7");
        assert_eq!(alerts[4].id, "r3");
    }

    #[test]
    fn alert_for_unknown_student_still_renders() {
        let records = vec![record("r1", "ghost", Mood::Sad, 5)];

        let alerts = recent_alerts(&records, &[]);

        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].student_name, "Unknown");
    }
}
