//! API route definitions
use crate::{error::HttpError, middleware::auth_middleware, state::AppState};
use axum::{http::Uri, routing::any};
use utoipa::{
    Modify, OpenApi,
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
};
use utoipa_axum::router::OpenApiRouter;

pub mod account;
pub mod authenticate;
pub mod health;
pub mod specialties;


#[derive(OpenApi)]
#[openapi(
    modifiers(&BearerSecurity),
    components(
        schemas(crate::error::ErrorResponse)
    ),
    tags(
        (name = "authentication", description = "Login and token issuing"),
        (name = "account", description = "Account of the authenticated user"),
        (name = "coffee", description = "Coffee specialties"),
        (name = "health", description = "Liveness probe"),
    ),
)]
struct ApiDoc;

/// Declares the `bearer` scheme referenced by protected paths
struct BearerSecurity;

impl Modify for BearerSecurity {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

/// All API routes with their OpenAPI description
pub fn router() -> OpenApiRouter<AppState> {
    let mut router = OpenApiRouter::with_openapi(ApiDoc::openapi());

    router = health::add_routes(router);
    router = authenticate::add_routes(router);
    router = specialties::add_routes(router);
    router = account::add_routes(router);

    router
}

/// Attach the bearer auth middleware and the state
///
/// Unknown paths below `/api/` are routed to a JSON 404 so they pass through
/// the middleware too. Other unmatched paths and any fallback service are not
/// authenticated.
pub fn with_auth(router: axum::Router<AppState>, state: AppState) -> axum::Router {
    router
        .route("/api/{*path}", any(api_not_found))
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ))
        .with_state(state)
}

async fn api_not_found(uri: Uri) -> HttpError {
    HttpError::NotFound(format!("No API endpoint at {}", uri.path()))
}

/// Router with every API route, authenticated, without docs or static files
pub fn app(state: AppState) -> axum::Router {
    let (router, _api) = router().split_for_parts();
    with_auth(router, state)
}
