//! Account endpoints

use axum::{extract::State, Extension, Json};

use crate::error::{ApiError, Result};
use crate::models::{AccountStatusResponse, RegisterRequest, RegisterResponse};
use crate::routes::auth::AuthenticatedUser;
use crate::AppState;

/// POST /api/account/register
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<Json<RegisterResponse>> {
    let user = state.db.create_user(payload.display_name.as_deref()).await?;

    Ok(Json(RegisterResponse {
        user_id: user.id,
        token: user.token,
    }))
}

/// GET /api/account/status
pub async fn status(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
) -> Result<Json<AccountStatusResponse>> {
    let user = state
        .db
        .get_user_by_token(&auth.token)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Invalid token".to_string()))?;

    Ok(Json(AccountStatusResponse {
        user_id: user.id,
        last_seen_at: user.last_seen_at,
    }))
}
