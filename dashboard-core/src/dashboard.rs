//! Search state and orchestration for the weather dashboard.
//!
//! Every search takes a [`SearchTicket`] carrying a sequence number. A result
//! is installed only if its ticket is still the newest one issued, so a slow
//! answer for an old search can never overwrite a newer one. The snapshot and
//! its trend image are installed together and always belong to the same search.

use std::{fmt, sync::Arc};
use tracing::{debug, info, warn};

use crate::{
    DashboardError, Notification, SessionStore, TrendImage, WeatherBackend,
    model::WeatherSnapshot,
    notify::Level,
    view::{Backdrop, ForecastView, WeatherView},
};

const EMPTY_CITY_MESSAGE: &str = "Please enter a city name";
const FETCH_FAILED_MESSAGE: &str = "Failed to fetch weather data";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    seq: u64,
    city: String,
}

impl SearchTicket {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn city(&self) -> &str {
        &self.city
    }
}

/// The outcome of one fetch, waiting to be installed.
#[derive(Debug)]
pub struct SearchResult {
    ticket: SearchTicket,
    outcome: Result<(WeatherSnapshot, Option<TrendImage>), DashboardError>,
}

#[derive(Debug)]
pub struct DashboardController {
    backend: Arc<dyn WeatherBackend>,
    session: Arc<dyn SessionStore>,
    default_city: String,
    search_text: String,
    snapshot: Option<WeatherSnapshot>,
    trend: Option<TrendImage>,
    in_flight: bool,
    latest_seq: u64,
}

impl DashboardController {
    pub fn new(
        backend: Arc<dyn WeatherBackend>,
        session: Arc<dyn SessionStore>,
        default_city: impl Into<String>,
    ) -> Self {
        Self {
            backend,
            session,
            default_city: default_city.into(),
            search_text: String::new(),
            snapshot: None,
            trend: None,
            in_flight: false,
            latest_seq: 0,
        }
    }

    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.search_text = text.into();
    }

    pub fn snapshot(&self) -> Option<&WeatherSnapshot> {
        self.snapshot.as_ref()
    }

    pub fn trend_image(&self) -> Option<&TrendImage> {
        self.trend.as_ref()
    }

    /// True while the newest search has not completed. Resubmission is disabled meanwhile.
    pub fn is_loading(&self) -> bool {
        self.in_flight
    }

    /// Initial search for the configured default city.
    pub async fn mount(&mut self) -> Notification {
        let city = self.default_city.clone();
        self.search(&city).await
    }

    /// Searches for whatever is currently in the search box.
    pub async fn submit_search(&mut self) -> Notification {
        let city = self.search_text.clone();
        self.search(&city).await
    }

    pub async fn search(&mut self, city: &str) -> Notification {
        let ticket = match self.begin_search(city) {
            Ok(ticket) => ticket,
            Err(notification) => return notification,
        };

        let result = self.fetch(&ticket).await;
        self.complete(result).unwrap_or_else(|| {
            Notification::new(Level::Info, "Superseded", "A newer search replaced this one")
        })
    }

    /// Validates the city and issues a ticket for it. No request is made yet.
    ///
    /// `is_loading` stays true until the newest ticket is passed to `complete`.
    /// A caller that abandons a ticket leaves the dashboard loading until the
    /// next search completes; the newer ticket supersedes the abandoned one.
    pub fn begin_search(&mut self, city: &str) -> Result<SearchTicket, Notification> {
        let city = city.trim();
        if city.is_empty() {
            return Err(Notification::error(EMPTY_CITY_MESSAGE));
        }

        self.latest_seq += 1;
        self.in_flight = true;
        debug!(seq = self.latest_seq, city, "search started");

        Ok(SearchTicket { seq: self.latest_seq, city: city.to_string() })
    }

    /// Fetches weather and, best effort, the trend chart for a ticket.
    pub async fn fetch(&self, ticket: &SearchTicket) -> SearchResult {
        let outcome = self.fetch_city(&ticket.city).await;
        SearchResult { ticket: ticket.clone(), outcome }
    }

    async fn fetch_city(
        &self,
        city: &str,
    ) -> Result<(WeatherSnapshot, Option<TrendImage>), DashboardError> {
        let token = self
            .session
            .token()
            .map_err(DashboardError::Session)?
            .ok_or(DashboardError::Unauthenticated)?;

        let snapshot = self.backend.current_weather(city, &token).await?;

        let trend = match self.backend.trend_image(city, &token).await {
            Ok(bytes) => TrendImage::from_png(city, &bytes)
                .map_err(|e| warn!(city, error = %e, "could not store trend image"))
                .ok(),
            Err(err) => {
                warn!(city, error = %err, "trend image unavailable");
                None
            }
        };

        Ok((snapshot, trend))
    }

    /// Installs a result if its ticket is still the newest.
    ///
    /// Returns `None` when the result was stale and has been discarded. A failed
    /// search leaves the previous snapshot on screen.
    pub fn complete(&mut self, result: SearchResult) -> Option<Notification> {
        let SearchResult { ticket, outcome } = result;

        if ticket.seq != self.latest_seq {
            debug!(
                seq = ticket.seq,
                latest = self.latest_seq,
                city = %ticket.city,
                "discarding stale search result"
            );
            return None;
        }

        self.in_flight = false;

        match outcome {
            Ok((snapshot, trend)) => {
                info!(city = %snapshot.city, has_trend = trend.is_some(), "weather loaded");
                let notification =
                    Notification::success(format!("Weather data loaded for {}", snapshot.city));
                self.snapshot = Some(snapshot);
                // Replacing drops the previous chart, deleting its file.
                self.trend = trend;
                Some(notification)
            }
            Err(err) => {
                warn!(city = %ticket.city, error = %err, "weather search failed");
                Some(Notification::from_error(&err, FETCH_FAILED_MESSAGE))
            }
        }
    }

    /// Clears the session and the displayed data.
    ///
    /// On success the caller hands control back to the login screen.
    pub fn logout(&mut self) -> Result<Notification, DashboardError> {
        self.session.clear().map_err(DashboardError::Session)?;

        self.snapshot = None;
        self.trend = None;
        self.in_flight = false;
        // Anything still in flight belongs to the old session.
        self.latest_seq += 1;

        Ok(Notification::logged_out())
    }

    /// Full dashboard as text: backdrop, current conditions, chart and forecast.
    pub fn render(&self) -> String {
        self.screen().to_string()
    }

    pub fn screen(&self) -> DashboardScreen<'_> {
        DashboardScreen {
            loading: self.in_flight,
            snapshot: self.snapshot.as_ref(),
            trend: self.trend.as_ref(),
        }
    }
}

/// What the dashboard currently shows.
#[derive(Debug, Clone, Copy)]
pub struct DashboardScreen<'a> {
    loading: bool,
    snapshot: Option<&'a WeatherSnapshot>,
    trend: Option<&'a TrendImage>,
}

impl fmt::Display for DashboardScreen<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", Backdrop::for_snapshot(self.snapshot))?;
        writeln!(f, "Weather Dashboard")?;
        writeln!(f)?;

        if self.loading {
            return write!(f, "Loading weather data...");
        }

        let Some(snapshot) = self.snapshot else {
            return write!(f, "Search for a city to see weather information");
        };

        writeln!(f, "{}", WeatherView::new(snapshot))?;
        writeln!(f)?;

        if let Some(trend) = self.trend {
            writeln!(f, "Temperature Trend: {}", trend.path().display())?;
            writeln!(f)?;
        }

        write!(f, "{}", ForecastView::new(&snapshot.forecast))
    }
}
