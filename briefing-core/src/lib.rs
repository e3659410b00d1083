//! Core library for the `briefing` CLI.
//!
//! This crate defines:
//! - Weather advisory resolution (rule table + advisor)
//! - Abstraction over weather providers and the robot's voice and face
//! - The morning briefing flow and alarm time handling
//! - Configuration & credentials handling
//!
//! It is used by `briefing-cli`, but the advisor is pure and can be reused on its own.

pub mod advisor;
pub mod alarm;
pub mod briefing;
pub mod config;
pub mod model;
pub mod provider;
pub mod robot;
pub mod rules;

pub use advisor::WeatherAdvisor;
pub use alarm::{AlarmError, AlarmWatch, parse_alarm_time};
pub use briefing::Briefing;
pub use config::{Config, ProviderConfig};
pub use model::{Advisory, CurrentConditions, IconRef, Location};
pub use provider::{ProviderError, ProviderId, WeatherProvider, fetch_or_none};
pub use robot::{ConsoleRobot, Robot};
pub use rules::{ConditionRule, RuleTable, TemperatureRange, TemperatureRule, Thresholds};
