//! Login endpoint issuing bearer tokens

use crate::{
    error::HttpError,
    state::AppState,
    types::{AuthenticateResponse, Credentials},
};
use axum::{
    extract::State,
    http::{HeaderMap, HeaderValue, header},
    response::Json,
};
use tracing::{info, instrument};
use utoipa_axum::{router::OpenApiRouter, routes};

/// Authenticate with username and password
///
/// The token is returned in the body as `id_token` and in the
/// `Authorization` response header.
#[utoipa::path(
    post,
    path = "/api/authenticate",
    request_body = Credentials,
    responses(
        (status = 200, description = "Token issued", body = AuthenticateResponse),
        (status = 401, description = "Bad credentials", body = crate::error::ErrorResponse),
    ),
    tag = "authentication"
)]
#[instrument(
    name = "authenticate",
    skip_all,
    fields(
        login = %credentials.username,
        remember_me = credentials.remember_me
    )
)]
pub async fn authenticate(
    State(app_state): State<AppState>,
    Json(credentials): Json<Credentials>,
) -> Result<(HeaderMap, Json<AuthenticateResponse>), HttpError> {
    let user = app_state
        .user_details
        .authenticate(&credentials.username, &credentials.password)?;

    let token = app_state.token_provider.create_token(
        &user.login,
        &user.authorities,
        credentials.remember_me,
    )?;

    let mut headers = HeaderMap::new();
    let bearer = HeaderValue::from_str(&format!("Bearer {token}"))
        .map_err(|e| HttpError::InternalServerError(format!("Invalid token header: {e}")))?;
    headers.insert(header::AUTHORIZATION, bearer);

    info!("User authenticated");

    Ok((
        headers,
        Json(AuthenticateResponse {
            id_token: Some(token),
        }),
    ))
}

pub fn add_routes(router: OpenApiRouter<AppState>) -> OpenApiRouter<AppState> {
    router.routes(routes!(authenticate))
}
