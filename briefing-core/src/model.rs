use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Where to ask the provider about: a two-letter region code and a city.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub region: String,
    pub city: String,
}

impl Location {
    pub fn new(region: impl Into<String>, city: impl Into<String>) -> Self {
        Self { region: region.into(), city: city.into() }
    }

    /// Free-text query understood by the search-style providers, e.g. "Seattle,WA".
    pub fn query(&self) -> String {
        format!("{},{}", self.city.trim(), self.region.trim())
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}, {}", self.city, self.region)
    }
}

/// Snapshot of current weather, normalized from whatever provider produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub temperature_f: f64,
    pub condition_text: String,
    pub observed_at: DateTime<Utc>,
    pub wind: Option<String>,
}

/// Face assets the robot can always display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IconRef {
    Clear,
    PartlyCloudy,
    Cloudy,
    Fog,
    Rain,
    Sleet,
    Snow,
    Thunderstorm,
    Unknown,
}

impl IconRef {
    pub fn as_str(&self) -> &'static str {
        match self {
            IconRef::Clear => "clear",
            IconRef::PartlyCloudy => "partly_cloudy",
            IconRef::Cloudy => "cloudy",
            IconRef::Fog => "fog",
            IconRef::Rain => "rain",
            IconRef::Sleet => "sleet",
            IconRef::Snow => "snow",
            IconRef::Thunderstorm => "thunderstorm",
            IconRef::Unknown => "unknown",
        }
    }

    /// Glyph used when the face is simulated on a terminal.
    pub fn glyph(&self) -> &'static str {
        match self {
            IconRef::Clear => "☀",
            IconRef::PartlyCloudy => "⛅",
            IconRef::Cloudy => "☁",
            IconRef::Fog => "🌫",
            IconRef::Rain => "🌧",
            IconRef::Sleet => "🌨",
            IconRef::Snow => "❄",
            IconRef::Thunderstorm => "⛈",
            IconRef::Unknown => "?",
        }
    }

    pub const fn all() -> &'static [IconRef] {
        &[
            IconRef::Clear,
            IconRef::PartlyCloudy,
            IconRef::Cloudy,
            IconRef::Fog,
            IconRef::Rain,
            IconRef::Sleet,
            IconRef::Snow,
            IconRef::Thunderstorm,
            IconRef::Unknown,
        ]
    }
}

impl std::fmt::Display for IconRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the robot says and shows for one weather sample.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Advisory {
    pub phrase: String,
    pub icon: IconRef,
}

impl Advisory {
    pub fn new(phrase: impl Into<String>, icon: IconRef) -> Self {
        Self { phrase: phrase.into(), icon }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn icon_names_are_unique() {
        let mut names: Vec<_> = IconRef::all().iter().map(IconRef::as_str).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), IconRef::all().len());
    }

    #[test]
    fn icon_serializes_as_its_name() {
        let json = serde_json::to_string(&IconRef::PartlyCloudy).unwrap();
        assert_eq!(json, "\"partly_cloudy\"");
    }

    #[test]
    fn location_query_trims_parts() {
        let loc = Location::new(" WA", "Seattle ");
        assert_eq!(loc.query(), "Seattle,WA");
    }
}
