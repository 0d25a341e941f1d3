use std::sync::Arc;

use axum::{
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use chrono::Utc;
use validator::Validate;

use crate::{
    dtos::CheckInRequestDto,
    error::HttpError,
    middleware::SessionAuthMiddleware,
    models::moodmodel::MoodRecord,
    store::MoodStoreExt,
    utils::ids::generate_entity_id,
    AppState,
};

pub fn checkin_handler() -> Router {
    Router::new()
        .route("/", post(create_checkin))
        .route("/prompt", get(prompt_status))
}

pub async fn create_checkin(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<SessionAuthMiddleware>,
    Json(body): Json<CheckInRequestDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let input = body.input.unwrap_or_default();

    // Nothing is persisted until the whole pipeline has succeeded.
    let analysis = app_state.checkins.run(&input, body.rating).await?;

    let now = Utc::now();
    let record = MoodRecord {
        id: generate_entity_id(),
        student_id: auth.user.id.clone(),
        timestamp: now,
        mood: analysis.mood,
        input,
        rating: body.rating,
    };

    app_state
        .store
        .append_record(record.clone())
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    app_state
        .store
        .save_last_analysis(&analysis)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    app_state
        .store
        .save_last_checkin_ms(now.timestamp_millis())
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    app_state.scheduler.cancel().await;

    tracing::info!("recorded {} check-in for {}", record.mood.to_str(), auth.user.email);

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": {
            "record": record,
            "analysis": analysis
        }
    })))
}

pub async fn prompt_status(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    Ok(Json(serde_json::json!({
        "status": "success",
        "data": {
            "promptPending": app_state.scheduler.prompt_pending()
        }
    })))
}
