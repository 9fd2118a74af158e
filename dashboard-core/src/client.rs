use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, Url};
use std::{fmt::Debug, sync::Arc, time::Duration};
use tracing::{debug, warn};

use crate::{
    Config, DashboardError,
    model::{ErrorBody, TokenResponse, WeatherSnapshot},
};

/// The backend operations the dashboard needs.
#[async_trait]
pub trait WeatherBackend: Send + Sync + Debug {
    async fn login(&self, username: &str, password: &str) -> Result<TokenResponse, DashboardError>;

    async fn register(&self, username: &str, password: &str) -> Result<(), DashboardError>;

    /// `GET /weather?city=` with the bearer token attached.
    async fn current_weather(&self, city: &str, token: &str)
    -> Result<WeatherSnapshot, DashboardError>;

    /// `GET /weather/plot?city=`, returning the raw image bytes.
    async fn trend_image(&self, city: &str, token: &str) -> Result<Vec<u8>, DashboardError>;
}

/// HTTP implementation of [`WeatherBackend`].
#[derive(Debug, Clone)]
pub struct WeatherClient {
    base_url: Url,
    http: Client,
}

impl WeatherClient {
    pub fn new(mut base_url: Url, timeout: Duration) -> Result<Self, DashboardError> {
        // Relative joins drop the last path segment unless it ends with '/'.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let http = Client::builder().timeout(timeout).build()?;

        Ok(Self { base_url, http })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Url {
        self.base_url.join(path).unwrap_or_else(|_| self.base_url.clone())
    }

    async fn send(&self, what: &str, request: RequestBuilder) -> Result<Response, DashboardError> {
        let res = request.send().await.map_err(|e| {
            warn!(request = what, error = %e, "request failed to complete");
            DashboardError::Network(e)
        })?;

        let status = res.status();
        debug!(request = what, %status, "backend responded");

        if status.is_success() {
            return Ok(res);
        }

        let body = res.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body).ok().and_then(|b| b.detail);

        if message.is_none() {
            debug!(request = what, body = %truncate_body(&body), "error response without detail");
        }

        Err(DashboardError::Api { status, message })
    }

    async fn post_credentials(
        &self,
        endpoint: &str,
        username: &str,
        password: &str,
    ) -> Result<Response, DashboardError> {
        let request = self
            .http
            .post(self.endpoint(endpoint))
            .form(&[("username", username), ("password", password)]);

        self.send(endpoint, request).await
    }

    fn authorized_get(&self, path: &str, city: &str, token: &str) -> RequestBuilder {
        self.http.get(self.endpoint(path)).query(&[("city", city)]).bearer_auth(token)
    }
}

#[async_trait]
impl WeatherBackend for WeatherClient {
    async fn login(&self, username: &str, password: &str) -> Result<TokenResponse, DashboardError> {
        let res = self.post_credentials("login", username, password).await?;
        let body = res.text().await?;

        Ok(serde_json::from_str(&body)?)
    }

    async fn register(&self, username: &str, password: &str) -> Result<(), DashboardError> {
        self.post_credentials("register", username, password).await?;
        Ok(())
    }

    async fn current_weather(
        &self,
        city: &str,
        token: &str,
    ) -> Result<WeatherSnapshot, DashboardError> {
        let res = self.send("weather", self.authorized_get("weather", city, token)).await?;
        let body = res.text().await?;

        Ok(serde_json::from_str(&body)?)
    }

    async fn trend_image(&self, city: &str, token: &str) -> Result<Vec<u8>, DashboardError> {
        let res = self.send("weather/plot", self.authorized_get("weather/plot", city, token)).await?;

        Ok(res.bytes().await?.to_vec())
    }
}

/// Construct the HTTP backend described by `config`.
pub fn backend_from_config(config: &Config) -> anyhow::Result<Arc<dyn WeatherBackend>> {
    let client = WeatherClient::new(config.api_url()?, config.request_timeout())?;
    Ok(Arc::new(client))
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
