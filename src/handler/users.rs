//13
use std::sync::Arc;

use axum::{
    middleware,
    response::IntoResponse,
    routing::{get, put},
    Extension, Json, Router,
};
use validator::Validate;

use crate::{
    dtos::{FilterUserDto, SettingsUpdateDto, UserData, UserResponseDto},
    error::{ErrorMessage, HttpError},
    handler::auth::start_prompt_schedule,
    middleware::{role_check, SessionAuthMiddleware},
    models::usermodel::{UserRole, UserSettings},
    store::UserStoreExt,
    AppState,
};

pub fn users_handler() -> Router {
    Router::new()
        .route(
            "/me",
            get(get_me).layer(middleware::from_fn(|state, req, next| {
                role_check(state, req, next, vec![UserRole::Student, UserRole::Leader])
            })),
        )
        .route("/settings", put(update_settings))
}

pub async fn get_me(
    Extension(_app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<SessionAuthMiddleware>,
) -> Result<impl IntoResponse, HttpError> {
    let filtered_user = FilterUserDto::filter_user(&auth.user);

    let response_data = UserResponseDto {
        status: "success".to_string(),
        data: UserData {
            user: filtered_user,
        },
    };

    Ok(Json(response_data))
}

pub async fn update_settings(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<SessionAuthMiddleware>,
    Json(body): Json<SettingsUpdateDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let mut user = auth.user;

    user.settings = Some(UserSettings {
        check_in_frequency: body.check_in_frequency,
        preferred_time: body.preferred_time,
    });

    let updated = app_state
        .store
        .update_user(&user)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let user = updated.ok_or(HttpError::unauthorized(
        ErrorMessage::UserNoLongerExist.to_string(),
    ))?;

    app_state
        .store
        .set_session_user(&user)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    // The new frequency may change whether a prompt is due.
    start_prompt_schedule(&app_state, &user).await;

    let response = UserResponseDto {
        data: UserData {
            user: FilterUserDto::filter_user(&user),
        },
        status: "success".to_string(),
    };

    Ok(Json(response))
}
