//! List of coffee specialties

use crate::app::Route;
use crate::auth::use_services;
use coffee_http::client::{
    AccountService, ClientError, CoffeeSpecialtiesService, display_specialties,
};
use yew::prelude::*;
use yew_router::prelude::*;

/// Loaded content of the list view
#[derive(Debug, Clone, PartialEq, Eq)]
struct LoadedList {
    specialties: String,
    login: Option<String>,
}

/// Load the specialties, then the account
///
/// The account is only requested once the list loaded, so a missing session
/// yields a single 401.
async fn load_list(
    specialties_service: &CoffeeSpecialtiesService,
    account_service: &AccountService,
) -> Result<LoadedList, ClientError> {
    let specialties = specialties_service.get_coffee_specialties().await?;
    tracing::debug!(?specialties, "Loaded coffee specialties");

    let login = match account_service.get().await {
        Ok(account) => Some(account.login),
        Err(e) => {
            tracing::debug!("No account available: {e}");
            None
        }
    };

    Ok(LoadedList {
        specialties: display_specialties(&specialties),
        login,
    })
}

#[function_component(CoffeeList)]
pub fn coffee_list() -> Html {
    let services = use_services();
    let navigator = use_navigator();
    let coffee_specialties = use_state(|| None::<String>);
    let load_error = use_state(|| false);
    let login = use_state(|| None::<String>);

    // Fetch fresh on every mount
    {
        let specialties_service = services.coffee_specialties_service.clone();
        let account_service = services.account_service.clone();
        let coffee_specialties = coffee_specialties.clone();
        let load_error = load_error.clone();
        let login = login.clone();
        use_effect_with((), move |_| {
            wasm_bindgen_futures::spawn_local(async move {
                match load_list(&specialties_service, &account_service).await {
                    Ok(loaded) => {
                        coffee_specialties.set(Some(loaded.specialties));
                        login.set(loaded.login);
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load coffee specialties: {e}");
                        load_error.set(true);
                    }
                }
            });
        });
    }

    let on_logout = {
        let login_service = services.login_service.clone();
        Callback::from(move |_: MouseEvent| {
            login_service.logout();
            if let Some(navigator) = &navigator {
                navigator.push(&Route::Login);
            }
        })
    };

    let token = services
        .session
        .token()
        .map(|token| token.into_inner())
        .unwrap_or_default();

    html! {
        <div class="coffee-list">
            <h2>{"Coffee specialties"}</h2>
            if let Some(login) = (*login).clone() {
                <p class="account">{format!("Signed in as {login}")}</p>
            }
            if *load_error {
                <div class="alert alert-danger">{"Coffee specialties could not be loaded."}</div>
            } else {
                <p class="specialties">{(*coffee_specialties).clone().unwrap_or_default()}</p>
            }
            <p class="token">
                <span>{"Token: "}</span>
                <code>{token}</code>
            </p>
            <button class="btn btn-secondary" onclick={on_logout}>{"Logout"}</button>
        </div>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use coffee_core::{JwtToken, SessionContext};
    use coffee_http::client::{AuthExpiredInterceptor, AuthInterceptor, CoffeeClient};
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn services(
        server: &MockServer,
        session: &SessionContext,
        fired: Arc<AtomicUsize>,
    ) -> (CoffeeSpecialtiesService, AccountService) {
        let client = CoffeeClient::builder()
            .base_url(format!("{}/api", server.uri()))
            .interceptor(AuthInterceptor::new(session.clone()))
            .interceptor(
                AuthExpiredInterceptor::new(session.clone()).with_hook(Arc::new(move || {
                    fired.fetch_add(1, Ordering::SeqCst);
                })),
            )
            .build()
            .unwrap();

        (
            CoffeeSpecialtiesService::new(
                client.clone(),
                format!("{}/api/coffee-specialties", server.uri()),
            ),
            AccountService::new(client),
        )
    }

    #[tokio::test]
    async fn loads_specialties_then_account() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/coffee-specialties"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"["Espresso","Latte"]"#))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/account"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(r#"{"login":"joe","authorities":["ROLE_USER"]}"#),
            )
            .mount(&server)
            .await;

        let session = SessionContext::in_memory();
        session.store_token(&JwtToken::new("tok"), true).unwrap();
        let fired = Arc::new(AtomicUsize::new(0));
        let (specialties, accounts) = services(&server, &session, fired.clone());

        let loaded = load_list(&specialties, &accounts).await.unwrap();

        assert_eq!(
            loaded,
            LoadedList {
                specialties: "Espresso,Latte".to_string(),
                login: Some("joe".to_string()),
            }
        );
        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn unauthenticated_visit_fires_hook_once() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/coffee-specialties"))
            .respond_with(ResponseTemplate::new(401))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/account"))
            .respond_with(ResponseTemplate::new(401))
            .expect(0)
            .mount(&server)
            .await;

        let session = SessionContext::in_memory();
        let fired = Arc::new(AtomicUsize::new(0));
        let (specialties, accounts) = services(&server, &session, fired.clone());

        let result = load_list(&specialties, &accounts).await;

        assert!(matches!(result, Err(ClientError::AuthenticationFailed(_))));
        assert_eq!(fired.load(Ordering::SeqCst), 1);
        server.verify().await;
    }
}
