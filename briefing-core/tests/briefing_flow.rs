//! End-to-end briefing with a recording robot.

use async_trait::async_trait;
use briefing_core::{
    Briefing, CurrentConditions, IconRef, Location, ProviderError, ProviderId, Robot, RuleTable,
    WeatherAdvisor, WeatherProvider,
};
use chrono::{FixedOffset, TimeZone, Utc};
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq)]
enum Action {
    Say(String),
    Show(IconRef),
}

#[derive(Debug, Default)]
struct RecordingRobot {
    actions: Mutex<Vec<Action>>,
}

impl RecordingRobot {
    fn actions(&self) -> Vec<Action> {
        self.actions.lock().unwrap().clone()
    }
}

#[async_trait]
impl Robot for RecordingRobot {
    async fn speak(&self, text: &str) -> anyhow::Result<()> {
        self.actions.lock().unwrap().push(Action::Say(text.to_string()));
        Ok(())
    }

    async fn render(&self, icon: IconRef) -> anyhow::Result<()> {
        self.actions.lock().unwrap().push(Action::Show(icon));
        Ok(())
    }
}

#[derive(Debug)]
struct FixedProvider(Option<CurrentConditions>);

#[async_trait]
impl WeatherProvider for FixedProvider {
    fn id(&self) -> ProviderId {
        ProviderId::OpenWeather
    }

    async fn fetch_current(&self, _location: &Location) -> Result<CurrentConditions, ProviderError> {
        self.0
            .clone()
            .ok_or_else(|| ProviderError::Malformed("missing current_observation".into()))
    }
}

fn morning() -> chrono::DateTime<FixedOffset> {
    FixedOffset::west_opt(5 * 3600).unwrap().with_ymd_and_hms(2026, 10, 17, 6, 45, 0).unwrap()
}

#[tokio::test]
async fn full_briefing_speaks_greeting_date_and_weather() {
    let robot = RecordingRobot::default();
    let provider = FixedProvider(Some(CurrentConditions {
        temperature_f: 28.4,
        condition_text: "Light Snow".into(),
        observed_at: Utc::now(),
        wind: Some("From the N at 10 MPH".into()),
    }));
    let table = RuleTable::standard();
    let location = Location::new("MN", "Duluth");

    let briefing = Briefing {
        robot: &robot,
        provider: &provider,
        advisor: WeatherAdvisor::new(&table),
        location: &location,
    };
    let advisory = briefing.run(&morning()).await.unwrap();

    assert_eq!(advisory.icon, IconRef::Snow);
    assert_eq!(
        robot.actions(),
        vec![
            Action::Say("Attention, Human! It's 6:45".into()),
            Action::Say(
                "Human, listen up and get ready for your daily briefing! Here it comes at 6:45".into()
            ),
            Action::Say("Today is Saturday, October 17, 2026".into()),
            Action::Show(IconRef::Snow),
            Action::Say(
                "Right now the weather is Light Snow. The wind is From the N at 10 MPH. \
                 The temperature is currently 28 degrees Fahrenheit."
                    .into()
            ),
            Action::Say(
                "It's snowy today. It is cold outside right now. \
                 You should wear a jacket to prevent system failure!"
                    .into()
            ),
        ]
    );
}

#[tokio::test]
async fn failed_fetch_still_completes_with_fallback() {
    let robot = RecordingRobot::default();
    let provider = FixedProvider(None);
    let table = RuleTable::standard();
    let location = Location::new("MN", "Duluth");

    let briefing = Briefing {
        robot: &robot,
        provider: &provider,
        advisor: WeatherAdvisor::new(&table),
        location: &location,
    };
    let advisory = briefing.weather().await.unwrap();

    assert_eq!(advisory.icon, IconRef::Unknown);
    assert_eq!(
        robot.actions(),
        vec![
            Action::Show(IconRef::Unknown),
            Action::Say("Current weather conditions are unavailable.".into()),
        ]
    );
}

#[tokio::test]
async fn unrecognized_condition_is_not_read_out() {
    let robot = RecordingRobot::default();
    let provider = FixedProvider(Some(CurrentConditions {
        temperature_f: 70.0,
        condition_text: "Smoke".into(),
        observed_at: Utc::now(),
        wind: Some("Calm".into()),
    }));
    let table = RuleTable::standard();
    let location = Location::new("CA", "Fresno");

    let briefing = Briefing {
        robot: &robot,
        provider: &provider,
        advisor: WeatherAdvisor::new(&table),
        location: &location,
    };
    briefing.weather().await.unwrap();

    assert_eq!(
        robot.actions(),
        vec![
            Action::Show(IconRef::Unknown),
            Action::Say("Current weather conditions are unavailable.".into()),
        ]
    );
}

#[tokio::test]
async fn comfortable_temperature_adds_separate_remark() {
    let robot = RecordingRobot::default();
    let provider = FixedProvider(Some(CurrentConditions {
        temperature_f: 75.0,
        condition_text: "Partly Cloudy".into(),
        observed_at: Utc::now(),
        wind: None,
    }));
    let table = RuleTable::standard();
    let location = Location::new("CA", "Fresno");

    let briefing = Briefing {
        robot: &robot,
        provider: &provider,
        advisor: WeatherAdvisor::new(&table),
        location: &location,
    };
    let advisory = briefing.weather().await.unwrap();

    assert_eq!(advisory.phrase, "It's partly cloudy today");
    assert_eq!(
        robot.actions(),
        vec![
            Action::Show(IconRef::PartlyCloudy),
            Action::Say(
                "Right now the weather is Partly Cloudy. \
                 The temperature is currently 75 degrees Fahrenheit."
                    .into()
            ),
            Action::Say("It's partly cloudy today".into()),
            Action::Say("It is a comfortable temperature for humans outside right now.".into()),
        ]
    );
}
