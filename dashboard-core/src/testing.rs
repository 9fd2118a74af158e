//! In-process backend double for unit tests.

use async_trait::async_trait;
use reqwest::StatusCode;
use std::{collections::HashMap, sync::Mutex};

use crate::{
    DashboardError, WeatherBackend,
    model::{Coordinates, CurrentConditions, TokenResponse, WeatherSnapshot},
};

#[derive(Debug, Default)]
pub(crate) struct FakeBackend {
    /// Token handed out by `login`; `None` rejects every login.
    pub token: Option<String>,
    pub weather: HashMap<String, WeatherSnapshot>,
    /// Chart bytes; `None` makes the plot endpoint fail.
    pub plot: Option<Vec<u8>>,
    calls: Mutex<Vec<String>>,
}

impl FakeBackend {
    pub fn with_token(mut self, token: &str) -> Self {
        self.token = Some(token.to_string());
        self
    }

    pub fn with_plot(mut self, bytes: &[u8]) -> Self {
        self.plot = Some(bytes.to_vec());
        self
    }

    pub fn with_city(mut self, snapshot: WeatherSnapshot) -> Self {
        self.weather.insert(snapshot.city.to_lowercase(), snapshot);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

fn api(status: StatusCode, detail: Option<&str>) -> DashboardError {
    DashboardError::Api { status, message: detail.map(str::to_string) }
}

#[async_trait]
impl WeatherBackend for FakeBackend {
    async fn login(&self, username: &str, _password: &str) -> Result<TokenResponse, DashboardError> {
        self.record(format!("login {username}"));
        match &self.token {
            Some(token) => {
                Ok(TokenResponse { access_token: token.clone(), token_type: "bearer".into() })
            }
            None => Err(api(StatusCode::UNAUTHORIZED, Some("Invalid Credentials"))),
        }
    }

    async fn register(&self, username: &str, _password: &str) -> Result<(), DashboardError> {
        self.record(format!("register {username}"));
        if username == "taken" {
            return Err(api(StatusCode::BAD_REQUEST, Some("User exists")));
        }
        Ok(())
    }

    async fn current_weather(
        &self,
        city: &str,
        token: &str,
    ) -> Result<WeatherSnapshot, DashboardError> {
        self.record(format!("weather {city} {token}"));
        self.weather
            .get(&city.to_lowercase())
            .cloned()
            .ok_or_else(|| api(StatusCode::NOT_FOUND, Some("City not found")))
    }

    async fn trend_image(&self, city: &str, token: &str) -> Result<Vec<u8>, DashboardError> {
        self.record(format!("plot {city} {token}"));
        self.plot.clone().ok_or_else(|| api(StatusCode::INTERNAL_SERVER_ERROR, None))
    }
}

pub(crate) fn snapshot(city: &str, temperature: f64, description: &str) -> WeatherSnapshot {
    WeatherSnapshot {
        city: city.to_string(),
        country: "XX".to_string(),
        coordinates: Coordinates { lat: 10.0, lon: 20.0 },
        current_weather: CurrentConditions {
            temperature,
            description: description.to_string(),
            humidity: 50,
            wind_speed: 2.5,
        },
        forecast: Vec::new(),
    }
}
