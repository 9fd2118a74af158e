use std::fmt;

use crate::model::{WeatherSnapshot, round_half_up};

/// Icon shown on the current-conditions card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeatherIcon {
    Sun,
    Cloud,
    Rain,
    Moon,
}

impl WeatherIcon {
    /// First matching rule wins: sun/clear, cloud, rain/drizzle, night.
    pub fn classify(description: &str) -> Self {
        let desc = description.to_lowercase();

        if desc.contains("sun") || desc.contains("clear") {
            WeatherIcon::Sun
        } else if desc.contains("cloud") {
            WeatherIcon::Cloud
        } else if desc.contains("rain") || desc.contains("drizzle") {
            WeatherIcon::Rain
        } else if desc.contains("night") {
            WeatherIcon::Moon
        } else {
            WeatherIcon::Cloud
        }
    }

    pub fn glyph(&self) -> &'static str {
        match self {
            WeatherIcon::Sun => "☀",
            WeatherIcon::Cloud => "☁",
            WeatherIcon::Rain => "🌧",
            WeatherIcon::Moon => "☾",
        }
    }
}

/// Current-conditions card for one snapshot.
#[derive(Debug, Clone, Copy)]
pub struct WeatherView<'a> {
    snapshot: &'a WeatherSnapshot,
}

impl<'a> WeatherView<'a> {
    pub fn new(snapshot: &'a WeatherSnapshot) -> Self {
        Self { snapshot }
    }

    pub fn title(&self) -> String {
        format!("{}, {}", self.snapshot.city, self.snapshot.country)
    }

    pub fn icon(&self) -> WeatherIcon {
        WeatherIcon::classify(&self.snapshot.current_weather.description)
    }

    pub fn temperature(&self) -> String {
        format!("{}°C", round_half_up(self.snapshot.current_weather.temperature))
    }

    pub fn coordinates(&self) -> String {
        let coords = self.snapshot.coordinates;
        format!("{:.2}°, {:.2}°", coords.lat, coords.lon)
    }

    pub fn humidity(&self) -> String {
        format!("{}%", self.snapshot.current_weather.humidity)
    }

    pub fn wind_speed(&self) -> String {
        format!("{} m/s", self.snapshot.current_weather.wind_speed)
    }
}

impl fmt::Display for WeatherView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title())?;
        writeln!(f, "  {}  {}", self.icon().glyph(), self.temperature())?;
        writeln!(f, "  {}", self.snapshot.current_weather.description)?;
        writeln!(f, "  Humidity     {}", self.humidity())?;
        writeln!(f, "  Wind Speed   {}", self.wind_speed())?;
        write!(f, "  Coordinates  {}", self.coordinates())
    }
}
