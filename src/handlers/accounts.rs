//! Account handlers: register and login.

use crate::error::{AppError, ErrorBody};
use crate::extractors::JsonBody;
use crate::models::{AccountOut, Credentials};
use crate::response::{message, MessageBody};
use crate::service::AccountService;
use crate::state::AppState;
use axum::{extract::State, Json};

#[utoipa::path(
    post,
    path = "/register",
    request_body = Credentials,
    responses(
        (status = 200, description = "Account created", body = AccountOut),
        (status = 400, description = "Username taken or weak password", body = ErrorBody),
    )
)]
pub async fn register(
    State(state): State<AppState>,
    JsonBody(creds): JsonBody<Credentials>,
) -> Result<Json<AccountOut>, AppError> {
    let account = AccountService::register(state.store.as_ref(), &creds).await?;
    Ok(Json(account))
}

#[utoipa::path(
    post,
    path = "/login",
    request_body = Credentials,
    responses(
        (status = 200, description = "Credentials accepted", body = MessageBody),
        (status = 401, description = "Invalid username or password", body = ErrorBody),
    )
)]
pub async fn login(
    State(state): State<AppState>,
    JsonBody(creds): JsonBody<Credentials>,
) -> Result<Json<MessageBody>, AppError> {
    AccountService::login(state.store.as_ref(), &creds).await?;
    Ok(message("Login successful."))
}
