//! Static mapping from provider vocabulary to what the robot says and shows.
//!
//! A [`RuleTable`] is built once at startup and only borrowed afterwards.
//! Condition rules are tried in order, so the table lists specific phrasing
//! ("thunderstorm", "freezing rain") before the generic words it contains.

use serde::{Deserialize, Serialize};

use crate::model::{Advisory, IconRef};

pub const FALLBACK_PHRASE: &str = "Current weather conditions are unavailable.";

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum RuleError {
    #[error("condition rule #{index} has no patterns")]
    NoPatterns { index: usize },
    #[error("condition rule #{index} has an empty pattern")]
    EmptyPattern { index: usize },
    #[error("condition rule #{index} has an empty phrase")]
    EmptyPhrase { index: usize },
    #[error("temperature rule #{index} has an empty clause")]
    EmptyClause { index: usize },
    #[error("temperature remark #{index} is empty")]
    EmptyRemark { index: usize },
    #[error("fallback advisory has an empty phrase")]
    EmptyFallback,
    #[error("temperature thresholds must satisfy cold < cool <= hot (got {cold}, {cool}, {hot})")]
    Thresholds { cold: f64, cool: f64, hot: f64 },
}

/// Case-insensitive substring patterns mapped to one advisory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionRule {
    pub patterns: Vec<String>,
    pub advisory: Advisory,
}

impl ConditionRule {
    pub fn new(patterns: &[&str], phrase: &str, icon: IconRef) -> Self {
        Self {
            patterns: patterns.iter().map(|p| p.to_lowercase()).collect(),
            advisory: Advisory::new(phrase, icon),
        }
    }

    /// `text` must already be lowercased.
    pub fn matches(&self, text: &str) -> bool {
        self.patterns.iter().any(|p| text.contains(p.as_str()))
    }
}

/// Fahrenheit range a temperature clause applies to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemperatureRange {
    Below(f64),
    /// Lower bound inclusive, upper bound exclusive.
    Between(f64, f64),
    /// Both bounds inclusive.
    Within(f64, f64),
    Above(f64),
}

impl TemperatureRange {
    pub fn contains(&self, temperature_f: f64) -> bool {
        match *self {
            TemperatureRange::Below(max) => temperature_f < max,
            TemperatureRange::Between(min, max) => temperature_f >= min && temperature_f < max,
            TemperatureRange::Within(min, max) => temperature_f >= min && temperature_f <= max,
            TemperatureRange::Above(min) => temperature_f > min,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemperatureRule {
    pub range: TemperatureRange,
    pub clause: String,
}

/// Thresholds for the temperature remarks, in degrees Fahrenheit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    pub cold_below_f: f64,
    pub cool_below_f: f64,
    pub hot_above_f: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self { cold_below_f: 40.0, cool_below_f: 60.0, hot_above_f: 80.0 }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RuleTable {
    conditions: Vec<ConditionRule>,
    temperatures: Vec<TemperatureRule>,
    /// Spoken on their own after the advisory, never folded into its phrase.
    remarks: Vec<TemperatureRule>,
    fallback: Advisory,
}

impl RuleTable {
    /// Build a table, rejecting rules that could produce an empty phrase or never match.
    pub fn new(
        conditions: Vec<ConditionRule>,
        temperatures: Vec<TemperatureRule>,
        fallback: Advisory,
    ) -> Result<Self, RuleError> {
        for (index, rule) in conditions.iter().enumerate() {
            if rule.patterns.is_empty() {
                return Err(RuleError::NoPatterns { index });
            }
            if rule.patterns.iter().any(|p| p.trim().is_empty()) {
                return Err(RuleError::EmptyPattern { index });
            }
            if rule.advisory.phrase.trim().is_empty() {
                return Err(RuleError::EmptyPhrase { index });
            }
        }
        for (index, rule) in temperatures.iter().enumerate() {
            if rule.clause.trim().is_empty() {
                return Err(RuleError::EmptyClause { index });
            }
        }
        if fallback.phrase.trim().is_empty() {
            return Err(RuleError::EmptyFallback);
        }

        let conditions = conditions
            .into_iter()
            .map(|mut rule| {
                rule.patterns = rule.patterns.iter().map(|p| p.to_lowercase()).collect();
                rule
            })
            .collect();

        Ok(Self { conditions, temperatures, remarks: Vec::new(), fallback })
    }

    /// Attach standalone temperature remarks.
    pub fn with_remarks(mut self, remarks: Vec<TemperatureRule>) -> Result<Self, RuleError> {
        if let Some(index) = remarks.iter().position(|r| r.clause.trim().is_empty()) {
            return Err(RuleError::EmptyRemark { index });
        }
        self.remarks = remarks;
        Ok(self)
    }

    /// The built-in table with the default temperature thresholds.
    pub fn standard() -> Self {
        Self {
            conditions: standard_conditions(),
            temperatures: standard_temperatures(Thresholds::default()),
            remarks: standard_remarks(Thresholds::default()),
            fallback: fallback_advisory(),
        }
    }

    /// The built-in condition rules with custom temperature thresholds.
    pub fn with_thresholds(thresholds: Thresholds) -> Result<Self, RuleError> {
        let Thresholds { cold_below_f: cold, cool_below_f: cool, hot_above_f: hot } = thresholds;
        if !(cold < cool && cool <= hot) {
            return Err(RuleError::Thresholds { cold, cool, hot });
        }

        Self::new(standard_conditions(), standard_temperatures(thresholds), fallback_advisory())?
            .with_remarks(standard_remarks(thresholds))
    }

    pub fn conditions(&self) -> &[ConditionRule] {
        &self.conditions
    }

    pub fn temperatures(&self) -> &[TemperatureRule] {
        &self.temperatures
    }

    pub fn remarks(&self) -> &[TemperatureRule] {
        &self.remarks
    }

    pub fn fallback(&self) -> &Advisory {
        &self.fallback
    }
}

impl Default for RuleTable {
    fn default() -> Self {
        Self::standard()
    }
}

fn fallback_advisory() -> Advisory {
    Advisory::new(FALLBACK_PHRASE, IconRef::Unknown)
}

fn standard_conditions() -> Vec<ConditionRule> {
    vec![
        ConditionRule::new(
            &["thunderstorm", "t-storm", "thunder"],
            "There are thunderstorms in the area today",
            IconRef::Thunderstorm,
        ),
        ConditionRule::new(
            &["freezing rain", "freezing drizzle", "sleet", "ice pellets"],
            "Watch out for sleet and ice today",
            IconRef::Sleet,
        ),
        ConditionRule::new(&["snow", "flurries", "blizzard"], "It's snowy today", IconRef::Snow),
        ConditionRule::new(&["rain", "drizzle", "shower"], "It's rainy today", IconRef::Rain),
        ConditionRule::new(&["fog", "mist", "haze"], "It's foggy today", IconRef::Fog),
        ConditionRule::new(
            &["partly cloudy", "partly sunny", "scattered clouds", "few clouds"],
            "It's partly cloudy today",
            IconRef::PartlyCloudy,
        ),
        ConditionRule::new(
            &["mostly cloudy", "overcast", "broken clouds", "cloudy"],
            "It's cloudy today",
            IconRef::Cloudy,
        ),
        ConditionRule::new(&["clear", "sunny", "fair"], "It's clear today", IconRef::Clear),
    ]
}

fn standard_temperatures(t: Thresholds) -> Vec<TemperatureRule> {
    vec![
        TemperatureRule {
            range: TemperatureRange::Below(t.cold_below_f),
            clause: "It is cold outside right now. You should wear a jacket to prevent system failure!"
                .to_string(),
        },
        TemperatureRule {
            range: TemperatureRange::Between(t.cold_below_f, t.cool_below_f),
            clause: "It is cool outside right now. You might want a sweater to maintain proper operating temperature."
                .to_string(),
        },
        TemperatureRule {
            range: TemperatureRange::Above(t.hot_above_f),
            clause: "It's pretty hot right now. Don't overheat your circuits!".to_string(),
        },
    ]
}

fn standard_remarks(t: Thresholds) -> Vec<TemperatureRule> {
    vec![TemperatureRule {
        range: TemperatureRange::Within(t.cool_below_f, t.hot_above_f),
        clause: "It is a comfortable temperature for humans outside right now.".to_string(),
    }]
}
