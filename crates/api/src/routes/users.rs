use axum::{
    extract::{Path, State},
    http::HeaderMap,
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    routes::auth::{MessageResponse, UserProfileResponse, UserResponse},
    util::require_bearer,
    ApiError, AppState,
};

#[derive(Debug, Serialize, ToSchema)]
pub struct UsersResponse {
    pub users: Vec<UserResponse>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateUserRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

impl UpdateUserRequest {
    fn into_request(self) -> roster_accounts::UpdateAccountRequest {
        roster_accounts::UpdateAccountRequest {
            name: self.name,
            email: self.email,
            password: self.password,
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/users",
    tag = "Users",
    responses(
        (status = 200, description = "Most recently created users", body = UsersResponse)
    )
)]
pub async fn list_users(State(state): State<AppState>) -> Result<Json<UsersResponse>, ApiError> {
    let users = state.accounts().list_users().await?;

    Ok(Json(UsersResponse {
        users: users.into_iter().map(UserResponse::from).collect(),
    }))
}

#[utoipa::path(
    get,
    path = "/api/users/me",
    tag = "Users",
    security(("bearerAuth" = [])),
    responses(
        (status = 200, description = "Current user profile", body = UserProfileResponse),
        (status = 401, description = "Authentication required", body = crate::ErrorResponse)
    )
)]
pub async fn get_current_user(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<UserProfileResponse>, ApiError> {
    let token = require_bearer(&headers)?;
    let user = state.authenticate(&token).await?;

    Ok(Json(UserProfileResponse { user: user.into() }))
}

#[utoipa::path(
    get,
    path = "/api/users/{user_id}",
    tag = "Users",
    params(("user_id" = String, Path, description = "Public user id")),
    responses(
        (status = 200, description = "User profile", body = UserProfileResponse),
        (status = 404, description = "Unknown user", body = crate::ErrorResponse)
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<UserProfileResponse>, ApiError> {
    let user = state.accounts().get_user(&user_id).await?;

    Ok(Json(UserProfileResponse { user: user.into() }))
}

#[utoipa::path(
    put,
    path = "/api/users/{user_id}",
    tag = "Users",
    security(("bearerAuth" = [])),
    params(("user_id" = String, Path, description = "Public user id")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "Updated user profile", body = UserProfileResponse),
        (status = 400, description = "Invalid fields", body = crate::ErrorResponse),
        (status = 401, description = "Authentication required", body = crate::ErrorResponse),
        (status = 404, description = "Unknown user", body = crate::ErrorResponse),
        (status = 409, description = "Email already in use", body = crate::ErrorResponse)
    )
)]
pub async fn update_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    headers: HeaderMap,
    Json(payload): Json<UpdateUserRequest>,
) -> Result<Json<UserProfileResponse>, ApiError> {
    let token = require_bearer(&headers)?;
    state.authenticate(&token).await?;

    let updated = state
        .accounts()
        .update_user(&user_id, payload.into_request())
        .await?;

    Ok(Json(UserProfileResponse {
        user: updated.into(),
    }))
}

#[utoipa::path(
    delete,
    path = "/api/users/{user_id}",
    tag = "Users",
    security(("bearerAuth" = [])),
    params(("user_id" = String, Path, description = "Public user id")),
    responses(
        (status = 200, description = "User deleted", body = MessageResponse),
        (status = 401, description = "Authentication required", body = crate::ErrorResponse),
        (status = 404, description = "Unknown user", body = crate::ErrorResponse)
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<MessageResponse>, ApiError> {
    let token = require_bearer(&headers)?;
    state.authenticate(&token).await?;

    state.accounts().delete_user(&user_id).await?;

    Ok(Json(MessageResponse {
        message: "User deleted.".to_string(),
    }))
}
