//! Coffee specialties endpoint

use crate::{middleware::AuthenticatedUser, state::AppState};
use axum::{extract::State, response::Json};
use tracing::{debug, instrument};
use utoipa_axum::{router::OpenApiRouter, routes};

/// List the coffee specialties
#[utoipa::path(
    get,
    path = "/api/coffee-specialties",
    responses(
        (status = 200, description = "Specialty names in display order", body = Vec<String>),
        (status = 401, description = "Missing or invalid token", body = crate::error::ErrorResponse),
    ),
    security(("bearer" = [])),
    tag = "coffee"
)]
#[instrument(name = "get_coffee_specialties", skip_all, fields(login = %user.login))]
pub async fn get_coffee_specialties(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
) -> Json<Vec<String>> {
    debug!(count = app_state.coffee_specialties.len(), "Serving coffee specialties");
    Json(app_state.coffee_specialties.as_ref().clone())
}

pub fn add_routes(router: OpenApiRouter<AppState>) -> OpenApiRouter<AppState> {
    router.routes(routes!(get_coffee_specialties))
}
