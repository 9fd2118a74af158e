use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub temperature: f64,
    pub description: String,
    pub humidity: u8,
    pub wind_speed: f64,
}

/// One point of the server-side forecast, usually three hours apart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastSample {
    #[serde(with = "sample_time")]
    pub datetime: NaiveDateTime,
    pub temp: f64,
    pub description: String,
}

/// Weather for one city as returned by `GET /weather`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub city: String,
    pub country: String,
    pub coordinates: Coordinates,
    pub current_weather: CurrentConditions,
    /// Ordered by time ascending.
    #[serde(default)]
    pub forecast: Vec<ForecastSample>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

/// Error body shape used by the backend for every non-2xx answer.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub detail: Option<String>,
}

/// Rounds half-up toward positive infinity, so `-2.5` becomes `-2`.
pub fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

mod sample_time {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    const FORMAT: &str = "%Y-%m-%d %H:%M:%S";
    const ISO_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

    pub fn serialize<S: Serializer>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&value.format(FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&raw, FORMAT)
            .or_else(|_| NaiveDateTime::parse_from_str(&raw, ISO_FORMAT))
            .map_err(|e| D::Error::custom(format!("invalid forecast datetime '{raw}': {e}")))
    }
}
