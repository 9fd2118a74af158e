//! Core library for the weather dashboard.
//!
//! This crate defines:
//! - Configuration and the persisted session token
//! - The backend client (login, register, weather, trend chart)
//! - The auth gateway, dashboard controller and app state machine
//! - Pure text views for current conditions, forecast and backdrop
//!
//! It is used by `dashboard-cli`, but can also be driven by other front ends.

pub mod app;
pub mod auth;
pub mod client;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod model;
pub mod notify;
pub mod session;
pub mod trend;
pub mod view;

#[cfg(test)]
mod testing;

pub use app::{AppRoot, AppState};
pub use auth::{AuthForm, AuthGateway, AuthIntent, AuthOutcome, AuthReport};
pub use client::{WeatherBackend, WeatherClient, backend_from_config};
pub use config::Config;
pub use dashboard::{DashboardController, DashboardScreen, SearchResult, SearchTicket};
pub use error::DashboardError;
pub use model::{ForecastSample, WeatherSnapshot};
pub use notify::{Level, Notification};
pub use session::{FileSessionStore, MemorySessionStore, SessionStore};
pub use trend::TrendImage;
