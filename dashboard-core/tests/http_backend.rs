//! Integration tests for the HTTP backend client and the components built on it,
//! run against a wiremock server.

use std::{sync::Arc, time::Duration};

use dashboard_core::{
    AppRoot, AppState, AuthForm, AuthGateway, AuthIntent, AuthOutcome, DashboardController,
    DashboardError, FileSessionStore, SessionStore, WeatherBackend, WeatherClient,
    error::NETWORK_ERROR_MESSAGE,
};
use reqwest::{StatusCode, Url};
use wiremock::matchers::{body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> WeatherClient {
    let url = Url::parse(&server.uri()).unwrap();
    WeatherClient::new(url, Duration::from_secs(5)).unwrap()
}

fn paris_json() -> serde_json::Value {
    serde_json::json!({
        "city": "Paris",
        "country": "FR",
        "coordinates": {"lat": 48.85, "lon": 2.35},
        "current_weather": {
            "temperature": 21.4,
            "description": "Light Rain And Clouds",
            "humidity": 72,
            "wind_speed": 4.1
        },
        "forecast": [
            {"datetime": "2025-06-01 12:00:00", "temp": 20.0, "description": "Light Rain"},
            {"datetime": "2025-06-01 15:00:00", "temp": 21.0, "description": "Overcast Clouds"},
            {"datetime": "2025-06-02 00:00:00", "temp": 15.0, "description": "Clear Sky"}
        ]
    })
}

#[tokio::test]
async fn login_posts_form_and_returns_token() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/login"))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string_contains("username=ana"))
        .and(body_string_contains("password=s3cret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": "jwt-token",
            "token_type": "bearer"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let token = client(&server).login("ana", "s3cret").await.unwrap();
    assert_eq!(token.access_token, "jwt-token");
}

#[tokio::test]
async fn register_error_carries_detail() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/register"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(serde_json::json!({"detail": "User exists"})),
        )
        .mount(&server)
        .await;

    let err = client(&server).register("ana", "pw").await.unwrap_err();
    match err {
        DashboardError::Api { status, message } => {
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(message.as_deref(), Some("User exists"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn error_without_json_body_has_no_detail() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>bad gateway</html>"))
        .mount(&server)
        .await;

    let err = client(&server).current_weather("Paris", "tok").await.unwrap_err();
    assert_eq!(err.user_message("Failed to fetch weather data"), "Failed to fetch weather data");
}

#[tokio::test]
async fn weather_and_plot_send_bearer_token() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("city", "Paris"))
        .and(header("authorization", "Bearer tok"))
        .respond_with(ResponseTemplate::new(200).set_body_json(paris_json()))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/weather/plot"))
        .and(query_param("city", "Paris"))
        .and(header("authorization", "Bearer tok"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(b"\x89PNG".to_vec(), "image/png"))
        .mount(&server)
        .await;

    let backend = client(&server);
    let snapshot = backend.current_weather("Paris", "tok").await.unwrap();
    assert_eq!(snapshot.country, "FR");
    assert_eq!(snapshot.forecast.len(), 3);

    let png = backend.trend_image("Paris", "tok").await.unwrap();
    assert_eq!(png, b"\x89PNG");
}

#[tokio::test]
async fn unreachable_backend_is_a_network_error() {
    // Nothing listens on the discard port.
    let url = Url::parse("http://127.0.0.1:9").unwrap();
    let backend = WeatherClient::new(url, Duration::from_secs(2)).unwrap();

    let err = backend.login("ana", "pw").await.unwrap_err();
    assert!(matches!(err, DashboardError::Network(_)));
    assert_eq!(err.user_message("Authentication failed"), NETWORK_ERROR_MESSAGE);
}

#[tokio::test]
async fn login_search_logout_flow() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"access_token": "flow-tok"})),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(header("authorization", "Bearer flow-tok"))
        .respond_with(ResponseTemplate::new(200).set_body_json(paris_json()))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/weather/plot"))
        .respond_with(ResponseTemplate::new(500).set_body_json(serde_json::json!({})))
        .mount(&server)
        .await;

    let backend: Arc<dyn WeatherBackend> = Arc::new(client(&server));
    let session: Arc<dyn SessionStore> =
        Arc::new(FileSessionStore::new(dir.path().join("session.toml")));

    let mut root = AppRoot::start(session.as_ref()).unwrap();
    assert_eq!(root.state(), AppState::Unauthenticated);

    let mut gateway = AuthGateway::new(backend.clone(), session.clone());
    let report = gateway.submit(AuthIntent::Login, &AuthForm::new("ana", "pw")).await;
    assert_eq!(report.outcome, AuthOutcome::Authenticated);
    root.on_auth(&report.outcome);
    assert!(root.is_authenticated());
    assert_eq!(session.token().unwrap().as_deref(), Some("flow-tok"));

    let mut dashboard = DashboardController::new(backend, session.clone(), "Paris");
    let loaded = dashboard.mount().await;
    assert_eq!(loaded.description, "Weather data loaded for Paris");
    assert!(dashboard.trend_image().is_none());

    let text = dashboard.render();
    assert!(text.contains("rainy"), "rain outranks clouds for the backdrop: {text}");
    assert!(text.contains("48.85°, 2.35°"));

    dashboard.logout().unwrap();
    root.on_logout();
    assert_eq!(root.state(), AppState::Unauthenticated);
    assert_eq!(session.token().unwrap(), None);

    // A restart sees no session either.
    let restarted = AppRoot::start(&FileSessionStore::new(dir.path().join("session.toml"))).unwrap();
    assert_eq!(restarted.state(), AppState::Unauthenticated);
}
