//! Account endpoints

use crate::{
    error::HttpError, middleware::AuthenticatedUser, state::AppState, types::Account,
};
use axum::{extract::State, response::Json};
use tracing::{info, instrument};
use utoipa_axum::{router::OpenApiRouter, routes};

/// Get the account of the authenticated user
#[utoipa::path(
    get,
    path = "/api/account",
    responses(
        (status = 200, description = "Current account", body = Account),
        (status = 401, description = "Missing or invalid token", body = crate::error::ErrorResponse),
        (status = 404, description = "No account for this login", body = crate::error::ErrorResponse),
    ),
    security(("bearer" = [])),
    tag = "account"
)]
#[instrument(name = "get_account", skip_all, fields(login = %user.login))]
pub async fn get_account(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<Account>, HttpError> {
    app_state.accounts.get(&user.login).await.map(Json)
}

/// Update the account of the authenticated user
#[utoipa::path(
    post,
    path = "/api/account",
    request_body = Account,
    responses(
        (status = 200, description = "Account saved", body = Account),
        (status = 400, description = "Login does not match the caller", body = crate::error::ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = crate::error::ErrorResponse),
    ),
    security(("bearer" = [])),
    tag = "account"
)]
#[instrument(name = "save_account", skip_all, fields(login = %user.login))]
pub async fn save_account(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Json(account): Json<Account>,
) -> Result<Json<Account>, HttpError> {
    let saved = app_state.accounts.save(&user.login, account).await?;
    info!("Account updated");
    Ok(Json(saved))
}

pub fn add_routes(router: OpenApiRouter<AppState>) -> OpenApiRouter<AppState> {
    router.routes(routes!(get_account, save_account))
}
