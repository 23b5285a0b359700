use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use tracing::{info, instrument, warn};

use crate::auth::dto::{
    AuthResponse, ChangePasswordRequest, LoginRequest, MessageResponse, PublicUser,
    RegisterRequest, UpdateProfileRequest,
};
use crate::auth::jwt::{AuthUser, JwtKeys};
use crate::auth::password::{hash_password, verify_password};
use crate::auth::repo::User;
use crate::auth::role::Role;
use crate::auth::service::{is_valid_email, verify_credentials};
use crate::error::ApiError;
use crate::state::AppState;

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
}

pub fn profile_routes() -> Router<AppState> {
    Router::new()
        .route("/users/profile", get(get_profile).put(update_profile))
        .route("/users/password", put(change_password))
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(mut payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    payload.email = payload.email.trim().to_lowercase();

    if !is_valid_email(&payload.email) {
        warn!(email = %payload.email, "invalid email");
        return Err(ApiError::Validation("Invalid email format".into()));
    }

    if payload.password.len() < 8 {
        warn!("password too short");
        return Err(ApiError::Validation("Password too short".into()));
    }

    if payload.role == Role::Student {
        if payload.roll_number.as_deref().unwrap_or("").is_empty() {
            return Err(ApiError::Validation(
                "Roll number is required for students".into(),
            ));
        }
        if !payload.email.ends_with(&state.config.student_email_domain) {
            warn!(email = %payload.email, "email outside college domain");
            return Err(ApiError::Validation(
                "Please use your college email address".into(),
            ));
        }
    }

    if User::find_by_email(&state.db, &payload.email).await?.is_some() {
        warn!(email = %payload.email, "email already registered");
        return Err(ApiError::DuplicateEmail);
    }

    let hash = hash_password(&payload.password)?;
    let user = User::create(
        &state.db,
        &payload.name,
        &payload.email,
        &hash,
        payload.role,
        payload.department.as_deref(),
        payload.roll_number.as_deref(),
    )
    .await?;

    let keys = JwtKeys::from_ref(&state);
    let token = keys.sign(user.id, &user.email, user.role)?;

    info!(user_id = %user.id, email = %user.email, role = %user.role, "user registered");
    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            token,
            user: user.into(),
        }),
    ))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(mut payload): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    payload.email = payload.email.trim().to_lowercase();

    let user = verify_credentials(&state.db, &payload.email, &payload.password, payload.role).await?;

    let keys = JwtKeys::from_ref(&state);
    let token = keys.sign(user.id, &user.email, user.role)?;

    info!(user_id = %user.id, email = %user.email, "user logged in");
    Ok(Json(AuthResponse {
        token,
        user: user.into(),
    }))
}

#[instrument(skip(state, claims))]
pub async fn get_profile(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
) -> Result<Json<PublicUser>, ApiError> {
    let user = User::find_by_id(&state.db, claims.sub)
        .await?
        .ok_or(ApiError::UserNotFound)?;
    Ok(Json(user.into()))
}

#[instrument(skip(state, claims, payload))]
pub async fn update_profile(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Json(payload): Json<UpdateProfileRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    User::update_profile(
        &state.db,
        claims.sub,
        &payload.name,
        payload.department.as_deref(),
        payload.profile_pic.as_deref(),
    )
    .await?;

    info!(user_id = %claims.sub, "profile updated");
    Ok(Json(MessageResponse {
        message: "Profile updated successfully".into(),
    }))
}

#[instrument(skip(state, claims, payload))]
pub async fn change_password(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Json(payload): Json<ChangePasswordRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    if payload.new_password.len() < 8 {
        return Err(ApiError::Validation("Password too short".into()));
    }

    let user = User::find_by_id(&state.db, claims.sub)
        .await?
        .ok_or(ApiError::UserNotFound)?;

    if !verify_password(&payload.current_password, &user.password_hash)? {
        warn!(user_id = %user.id, "change password with wrong current password");
        return Err(ApiError::IncorrectPassword);
    }

    let hash = hash_password(&payload.new_password)?;
    User::update_password(&state.db, user.id, &hash).await?;

    info!(user_id = %user.id, "password updated");
    Ok(Json(MessageResponse {
        message: "Password updated successfully".into(),
    }))
}

#[cfg(test)]
mod dto_tests {
    use super::*;
    use time::OffsetDateTime;
    use uuid::Uuid;

    #[test]
    fn auth_response_never_contains_password_hash() {
        let user = User {
            id: Uuid::new_v4(),
            name: "Arun Kumar".into(),
            email: "student@panimalar.edu".into(),
            password_hash: "$argon2id$v=19$secret".into(),
            role: Role::Student,
            department: Some("Computer Science".into()),
            roll_number: Some("19CSE101".into()),
            joined_at: OffsetDateTime::now_utc(),
            profile_pic: None,
        };
        let response = AuthResponse {
            token: "header.payload.sig".into(),
            user: user.into(),
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("student@panimalar.edu"));
        assert!(json.contains("\"role\":\"student\""));
        assert!(!json.contains("argon2"));
        assert!(!json.contains("password_hash"));
    }
}
