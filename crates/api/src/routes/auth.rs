use axum::{extract::State, http::StatusCode, Json};
use roster_accounts::User;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{ApiError, AppState};

#[derive(Debug, Deserialize, ToSchema)]
pub struct RegisterRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

impl RegisterRequest {
    fn into_request(self) -> roster_accounts::RegisterRequest {
        roster_accounts::RegisterRequest {
            name: self.name,
            email: self.email,
            password: self.password,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<User> for UserResponse {
    fn from(value: User) -> Self {
        Self {
            id: value.public_id,
            name: value.name,
            email: value.email,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UserProfileResponse {
    pub user: UserResponse,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SessionResponse {
    pub token: String,
    pub user: UserResponse,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

#[utoipa::path(
    post,
    path = "/api/auth/register",
    tag = "Auth",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = UserProfileResponse),
        (status = 400, description = "Missing or invalid fields", body = crate::ErrorResponse),
        (status = 409, description = "Email already in use", body = crate::ErrorResponse)
    )
)]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<UserProfileResponse>), ApiError> {
    let user = state.accounts().register(payload.into_request()).await?;

    Ok((
        StatusCode::CREATED,
        Json(UserProfileResponse { user: user.into() }),
    ))
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "Auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login succeeded", body = SessionResponse),
        (status = 400, description = "Missing fields", body = crate::ErrorResponse),
        (status = 401, description = "Invalid credentials", body = crate::ErrorResponse)
    )
)]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<SessionResponse>, ApiError> {
    let (Some(email), Some(password)) = (payload.email, payload.password) else {
        return Err(ApiError::bad_request("Email and password are required."));
    };

    let user = state.accounts().authenticate(&email, &password).await?;
    let token = state.signer().issue(&user.public_id).map_err(ApiError::from)?;

    Ok(Json(SessionResponse {
        token,
        user: user.into(),
    }))
}

#[utoipa::path(
    post,
    path = "/api/auth/logout",
    tag = "Auth",
    responses(
        (status = 200, description = "Logout acknowledged", body = MessageResponse)
    )
)]
pub async fn logout() -> Json<MessageResponse> {
    // Sessions are stateless tokens; there is nothing to revoke server-side.
    // The endpoint exists so clients can clear their stored session against
    // an acknowledged request.
    Json(MessageResponse {
        message: "Logged out.".to_string(),
    })
}
