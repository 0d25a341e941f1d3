//12
use std::sync::Arc;

use axum::{response::IntoResponse, routing::post, Extension, Json, Router};
use validator::Validate;

use crate::{
    dtos::{FilterUserDto, LoginUserDto, RegisterUserDto, Response, UserData, UserResponseDto},
    error::{ErrorMessage, HttpError},
    models::usermodel::{User, UserRole, UserSettings},
    store::{MoodStoreExt, UserStoreExt},
    utils::ids::{generate_entity_id, generate_referral_code},
    AppState,
};

pub fn auth_handler() -> Router {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/logout", post(logout))
}

pub async fn register(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<RegisterUserDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let existing_user = app_state
        .store
        .get_user_by_email(&body.email)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    if existing_user.is_some() {
        return Err(HttpError::bad_request(ErrorMessage::EmailExist.to_string()));
    }

    let user = match body.role {
        UserRole::Student => {
            let code = body.vouch_code.clone().unwrap_or_default();

            let leader = app_state
                .store
                .get_leader_by_referral_code(&code)
                .await
                .map_err(|e| HttpError::server_error(e.to_string()))?;

            let leader = leader.ok_or(HttpError::bad_request(
                ErrorMessage::InvalidVouchCode.to_string(),
            ))?;

            User {
                id: generate_entity_id(),
                email: body.email,
                name: body.name,
                role: UserRole::Student,
                branch: Some(
                    leader
                        .branch
                        .clone()
                        .unwrap_or_else(|| "Unknown".to_string()),
                ),
                settings: Some(UserSettings::default()),
                referral_code: None,
                vouched_by: leader.referral_code.clone(),
            }
        }
        UserRole::Leader => {
            let branch = body.branch.clone().unwrap_or_default();

            if branch.trim().is_empty() {
                return Err(HttpError::bad_request(
                    "Branch is required for leader accounts".to_string(),
                ));
            }

            User {
                id: generate_entity_id(),
                email: body.email,
                name: body.name,
                role: UserRole::Leader,
                referral_code: Some(generate_referral_code(&branch)),
                branch: Some(branch),
                settings: Some(UserSettings::default()),
                vouched_by: None,
            }
        }
    };

    let mut users = app_state
        .store
        .load_users()
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    users.push(user.clone());

    app_state
        .store
        .save_users(&users)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    app_state
        .store
        .set_session_user(&user)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    start_prompt_schedule(&app_state, &user).await;

    tracing::info!("registered {} account for {}", user.role.to_str(), user.email);

    let filtered_user = FilterUserDto::filter_user(&user);

    Ok(Json(UserResponseDto {
        status: "success".to_string(),
        data: UserData {
            user: filtered_user,
        },
    }))
}

pub async fn login(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<LoginUserDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    // No stored credential to compare against; only empty passwords are rejected.
    if body.password.is_empty() {
        return Err(HttpError::bad_request(
            ErrorMessage::WrongCredentials.to_string(),
        ));
    }

    let result = app_state
        .store
        .get_user_by_email(&body.email)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let user = result.ok_or(HttpError::bad_request(
        ErrorMessage::WrongCredentials.to_string(),
    ))?;

    app_state
        .store
        .set_session_user(&user)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    start_prompt_schedule(&app_state, &user).await;

    let filtered_user = FilterUserDto::filter_user(&user);

    Ok(Json(UserResponseDto {
        status: "success".to_string(),
        data: UserData {
            user: filtered_user,
        },
    }))
}

pub async fn logout(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    app_state
        .store
        .clear_session_user()
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    app_state.scheduler.cancel().await;

    let response = Response {
        message: "Logged out.".to_string(),
        status: "success",
    };

    Ok(Json(response))
}

/// Re-arms the check-in prompt for a freshly established session. Leaders
/// never get prompts, but taking over the session still cancels any prompt
/// left behind by a previous student session.
pub async fn start_prompt_schedule(app_state: &Arc<AppState>, user: &User) {
    if user.role != UserRole::Student {
        app_state.scheduler.cancel().await;
        return;
    }

    let last_checkin = match app_state.store.load_last_checkin_ms().await {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!("could not read last check-in timestamp: {}", e);
            None
        }
    };

    app_state
        .scheduler
        .on_session_start(last_checkin, user.frequency())
        .await;
}
