//! Pure renderers: each view is a function of fetched data and produces text.

pub mod background;
pub mod forecast;
pub mod weather;

pub use background::{Backdrop, Category, Decoration};
pub use forecast::{DailyForecast, ForecastView};
pub use weather::{WeatherIcon, WeatherView};
