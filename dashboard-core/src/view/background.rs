use std::fmt;

use crate::model::WeatherSnapshot;

/// Coarse weather category driving the decorative backdrop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Sunny,
    Cloudy,
    Rainy,
    Night,
}

impl Category {
    /// First match wins: sun/clear, rain/drizzle, cloud, night. Anything else is cloudy.
    pub fn classify(description: &str) -> Self {
        let desc = description.to_lowercase();

        if desc.contains("sun") || desc.contains("clear") {
            Category::Sunny
        } else if desc.contains("rain") || desc.contains("drizzle") {
            Category::Rainy
        } else if desc.contains("cloud") {
            Category::Cloudy
        } else if desc.contains("night") {
            Category::Night
        } else {
            Category::Cloudy
        }
    }

    /// Category for whatever is on screen; cloudy before the first search lands.
    pub fn for_snapshot(snapshot: Option<&WeatherSnapshot>) -> Self {
        snapshot
            .map(|s| Self::classify(&s.current_weather.description))
            .unwrap_or(Category::Cloudy)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Sunny => "sunny",
            Category::Cloudy => "cloudy",
            Category::Rainy => "rainy",
            Category::Night => "night",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decoration {
    Sun,
    Moon,
    Cloud,
    RainDrop,
    Star,
}

impl Decoration {
    fn glyph(&self) -> char {
        match self {
            Decoration::Sun => '☀',
            Decoration::Moon => '☾',
            Decoration::Cloud => '☁',
            Decoration::RainDrop => '╎',
            Decoration::Star => '✦',
        }
    }
}

const RAIN_DROPS: usize = 20;
const STARS: usize = 15;

/// Decorative variant for a category. Purely cosmetic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Backdrop {
    pub category: Category,
    pub palette: &'static str,
    pub decorations: Vec<Decoration>,
}

impl Backdrop {
    pub fn for_category(category: Category) -> Self {
        use Decoration::*;

        let (palette, decorations) = match category {
            Category::Sunny => ("weather-sunny", vec![Sun, Cloud, Cloud]),
            Category::Cloudy => ("weather-cloudy", vec![Cloud; 4]),
            Category::Rainy => {
                let mut d = vec![Cloud, Cloud];
                d.extend(std::iter::repeat_n(RainDrop, RAIN_DROPS));
                ("weather-rainy", d)
            }
            Category::Night => {
                let mut d = vec![Moon, Cloud];
                d.extend(std::iter::repeat_n(Star, STARS));
                ("weather-night", d)
            }
        };

        Self { category, palette, decorations }
    }

    pub fn for_snapshot(snapshot: Option<&WeatherSnapshot>) -> Self {
        Self::for_category(Category::for_snapshot(snapshot))
    }
}

impl fmt::Display for Backdrop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let banner: String = self
            .decorations
            .iter()
            .map(|d| d.glyph())
            .flat_map(|c| [c, ' '])
            .collect();

        write!(f, "{} {}", banner.trim_end(), self.category)
    }
}
