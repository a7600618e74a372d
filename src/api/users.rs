use crate::api::AppState;
use crate::api::middleware::AuthUser;
use crate::api::schemas::users::{AuthTokenResponse, Authenticate, CreateUser, UpdateUser};
use crate::domain::user::serialize_for_output;
use crate::error::Result;
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};

pub async fn create_user(State(state): State<AppState>, Json(payload): Json<CreateUser>) -> Result<impl IntoResponse> {
    let user = state
        .user_service
        .create(
            payload.name.unwrap_or_default(),
            payload.email.unwrap_or_default(),
            payload.password.unwrap_or_default(),
        )
        .await?;
    Ok((StatusCode::CREATED, Json(serialize_for_output(&user))))
}

pub async fn authenticate(
    State(state): State<AppState>,
    Json(payload): Json<Authenticate>,
) -> Result<impl IntoResponse> {
    let token = state.account_service.authenticate(&payload.email, &payload.password).await?;
    Ok(Json(AuthTokenResponse::from(token)))
}

pub async fn me(auth_user: AuthUser, State(state): State<AppState>) -> Result<impl IntoResponse> {
    let user = state.user_service.find(auth_user.user_id).await?;
    Ok(Json(serialize_for_output(&user)))
}

pub async fn update_me(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Json(payload): Json<UpdateUser>,
) -> Result<impl IntoResponse> {
    let user = state.user_service.update(auth_user.user_id, payload.into()).await?;
    Ok(Json(serialize_for_output(&user)))
}

pub async fn delete_me(auth_user: AuthUser, State(state): State<AppState>) -> Result<impl IntoResponse> {
    state.user_service.delete(auth_user.user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
