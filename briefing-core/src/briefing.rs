use chrono::{DateTime, Datelike, TimeZone, Timelike};

use crate::{
    advisor::WeatherAdvisor,
    model::{Advisory, CurrentConditions, Location},
    provider::{WeatherProvider, fetch_or_none},
    robot::Robot,
};

/// Spoken clock time, e.g. "7:05".
pub fn short_time<Tz: TimeZone>(now: &DateTime<Tz>) -> String {
    format!("{}:{:02}", now.hour(), now.minute())
}

/// Lines spoken before the weather: alarm greeting, briefing intro and the date.
pub fn opening_lines<Tz: TimeZone>(now: &DateTime<Tz>) -> Vec<String>
where
    Tz::Offset: std::fmt::Display,
{
    let time = short_time(now);
    vec![
        format!("Attention, Human! It's {time}"),
        format!("Human, listen up and get ready for your daily briefing! Here it comes at {time}"),
        format!("Today is {}", now.format("%A, %B %d, %Y")),
    ]
}

/// Spoken observation read before the advisory.
pub fn weather_report(conditions: &CurrentConditions) -> String {
    let mut report = format!("Right now the weather is {}.", conditions.condition_text);
    if let Some(wind) = &conditions.wind {
        report.push_str(&format!(" The wind is {wind}."));
    }
    report.push_str(&format!(
        " The temperature is currently {:.0} degrees Fahrenheit.",
        conditions.temperature_f
    ));
    report
}

/// One full briefing: greeting, date, then the weather advisory.
#[derive(Debug)]
pub struct Briefing<'a> {
    pub robot: &'a dyn Robot,
    pub provider: &'a dyn WeatherProvider,
    pub advisor: WeatherAdvisor<'a>,
    pub location: &'a Location,
}

impl Briefing<'_> {
    pub async fn run<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> anyhow::Result<Advisory>
    where
        Tz::Offset: std::fmt::Display,
    {
        tracing::info!(date = now.day(), "starting briefing at {}", short_time(now));

        for line in opening_lines(now) {
            self.robot.speak(&line).await?;
        }

        self.weather().await
    }

    /// Fetch, resolve and present the weather. Provider failures end up as the fallback advisory.
    pub async fn weather(&self) -> anyhow::Result<Advisory> {
        let conditions = fetch_or_none(self.provider, self.location).await;
        let advisory = self.advisor.resolve(conditions.as_ref());

        tracing::info!(icon = %advisory.icon, phrase = %advisory.phrase, "resolved advisory");

        // Only conditions the table recognizes are read out.
        let recognized = conditions.as_ref().filter(|c| self.advisor.recognizes(c));

        self.robot.render(advisory.icon).await?;
        if let Some(conditions) = recognized {
            self.robot.speak(&weather_report(conditions)).await?;
        }
        self.robot.speak(&advisory.phrase).await?;
        if let Some(remark) = recognized.and_then(|c| self.advisor.remark(c)) {
            self.robot.speak(remark).await?;
        }

        Ok(advisory)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};

    #[test]
    fn opening_lines_format_time_and_date() {
        let tz = FixedOffset::west_opt(7 * 3600).unwrap();
        let now = tz.with_ymd_and_hms(2026, 10, 17, 7, 5, 0).unwrap();

        let lines = opening_lines(&now);
        assert_eq!(lines[0], "Attention, Human! It's 7:05");
        assert!(lines[1].ends_with("Here it comes at 7:05"));
        assert_eq!(lines[2], "Today is Saturday, October 17, 2026");
    }

    #[test]
    fn report_skips_unknown_wind() {
        let mut c = CurrentConditions {
            temperature_f: 71.6,
            condition_text: "Clear".into(),
            observed_at: Utc::now(),
            wind: None,
        };
        assert_eq!(
            weather_report(&c),
            "Right now the weather is Clear. The temperature is currently 72 degrees Fahrenheit."
        );

        c.wind = Some("Calm".into());
        assert!(weather_report(&c).contains(" The wind is Calm. "));
    }
}
