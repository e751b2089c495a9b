//! End-to-end tests against a running server

use axum::http::StatusCode;
use coffee_core::{SessionContext, StorageKind};
use coffee_http::client::{
    AccountService, AuthExpiredInterceptor, AuthInterceptor, AuthServerProvider, CoffeeClient,
    CoffeeSpecialtiesService, LoginService, display_specialties, error::ClientError,
};
use coffee_http::types::Credentials;
use coffee_server::{ServerBuilder, Settings};
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::time::timeout;

fn test_settings() -> Settings {
    let mut settings = Settings::default();
    settings.security.jwt_secret =
        Some("integration-test-secret-integration-test-secret".to_string());
    settings.security.token_validity_seconds = 60;
    settings.security.token_validity_seconds_for_remember_me = 600;
    settings
}

/// Helper to start a test server
async fn start_test_server() -> Result<(SocketAddr, tokio::task::JoinHandle<()>), anyhow::Error> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;

    let app = ServerBuilder::new(test_settings()).build().await?;

    let handle = tokio::spawn(async move {
        axum::serve(listener, app)
            .await
            .expect("Server failed to start");
    });

    Ok((addr, handle))
}

fn client(addr: SocketAddr, session: &SessionContext) -> CoffeeClient {
    CoffeeClient::builder()
        .base_url(format!("http://{addr}/api"))
        .timeout(Duration::from_secs(5))
        .interceptor(AuthInterceptor::new(session.clone()))
        .interceptor(AuthExpiredInterceptor::new(session.clone()))
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_server_starts_and_responds() {
    let (addr, handle) = start_test_server()
        .await
        .expect("Failed to start test server");

    let response = timeout(
        Duration::from_secs(5),
        reqwest::get(format!("http://{addr}/health")),
    )
    .await
    .expect("Request timed out")
    .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["status"], "healthy");
    assert!(body["version"].is_string());
    assert!(body["timestamp"].is_string());

    handle.abort();
}

#[tokio::test]
async fn test_login_then_list_specialties() {
    let (addr, handle) = start_test_server().await.unwrap();
    let session = SessionContext::in_memory();
    let client = client(addr, &session);

    let login = LoginService::new(AuthServerProvider::new(client.clone(), session.clone()));
    login
        .login(&Credentials::new("joe", "joe", true))
        .await
        .unwrap();
    assert_eq!(session.token_source(), Some(StorageKind::Local));

    let specialties = CoffeeSpecialtiesService::new(
        client.clone(),
        format!("http://{addr}/api/coffee-specialties"),
    )
    .get_coffee_specialties()
    .await
    .unwrap();
    assert_eq!(display_specialties(&specialties), "Espresso,Cappuccino");

    let account = AccountService::new(client).get().await.unwrap();
    assert_eq!(account.login, "joe");

    handle.abort();
}

#[tokio::test]
async fn test_wrong_password_leaves_no_token() {
    let (addr, handle) = start_test_server().await.unwrap();
    let session = SessionContext::in_memory();

    let login = LoginService::new(AuthServerProvider::new(
        client(addr, &session),
        session.clone(),
    ));
    let result = login.login(&Credentials::new("joe", "tea", false)).await;

    assert!(matches!(result, Err(ClientError::AuthenticationFailed(_))));
    assert!(!session.is_authenticated());

    handle.abort();
}

#[tokio::test]
async fn test_specialties_without_login_are_rejected() {
    let (addr, handle) = start_test_server().await.unwrap();

    let response = reqwest::get(format!("http://{addr}/api/coffee-specialties"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "authentication_failed");

    handle.abort();
}
