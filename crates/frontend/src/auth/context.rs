//! Services shared through the component tree

use super::error_handler::trigger_auth_error;
use crate::config::AppConfig;
use crate::storage::BrowserTokenStorage;
use coffee_core::SessionContext;
use coffee_http::client::{
    AccountService, AuthExpiredInterceptor, AuthInterceptor, AuthServerProvider, ClientError,
    CoffeeClient, CoffeeSpecialtiesService, LoginService,
};
use std::sync::Arc;
use yew::prelude::*;

/// Session and API services for the current page
#[derive(Clone, Debug)]
pub struct ApiServices {
    pub session: SessionContext,
    pub login_service: LoginService,
    pub coffee_specialties_service: CoffeeSpecialtiesService,
    pub account_service: AccountService,
}

impl ApiServices {
    /// Wire the services over `session`
    pub fn new(config: &AppConfig, session: SessionContext) -> Result<Self, ClientError> {
        let client = CoffeeClient::builder()
            .base_url(&config.api_url)
            .interceptor(AuthInterceptor::new(session.clone()))
            .interceptor(
                AuthExpiredInterceptor::new(session.clone()).with_hook(Arc::new(trigger_auth_error)),
            )
            .build()?;

        Ok(Self {
            login_service: LoginService::new(AuthServerProvider::new(
                client.clone(),
                session.clone(),
            )),
            coffee_specialties_service: CoffeeSpecialtiesService::new(
                client.clone(),
                &config.coffee_specialties_url,
            ),
            account_service: AccountService::new(client),
            session,
        })
    }
}

impl PartialEq for ApiServices {
    fn eq(&self, other: &Self) -> bool {
        self.session == other.session
    }
}

#[derive(Properties, PartialEq)]
pub struct ServicesProviderProps {
    pub children: Children,
}

/// Provides [`ApiServices`] backed by browser storage
#[function_component(ServicesProvider)]
pub fn services_provider(props: &ServicesProviderProps) -> Html {
    let services = use_memo((), |_| {
        let config = AppConfig::load();
        tracing::debug!(api_url = %config.api_url, "Configuring API services");
        ApiServices::new(&config, SessionContext::new(Arc::new(BrowserTokenStorage)))
            .inspect_err(|e| tracing::error!("Failed to create API client: {e}"))
            .ok()
    });

    match services.as_ref() {
        Some(services) => html! {
            <ContextProvider<ApiServices> context={services.clone()}>
                {props.children.clone()}
            </ContextProvider<ApiServices>>
        },
        None => html! {
            <div class="alert alert-danger">{"The application could not be started."}</div>
        },
    }
}

/// Hook to use the API services
#[hook]
pub fn use_services() -> ApiServices {
    use_context::<ApiServices>()
        .expect("ApiServices not found. Make sure to wrap your component with ServicesProvider")
}
