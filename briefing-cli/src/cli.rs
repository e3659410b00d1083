use anyhow::Context;
use briefing_core::{
    AlarmWatch, Briefing, Config, ConsoleRobot, Location, ProviderId, WeatherAdvisor,
    parse_alarm_time, provider::default_provider_from_config,
};
use chrono::Local;
use clap::{Parser, Subcommand};
use inquire::{Password, Text};
use std::time::Duration;

const CLOCK_POLL: Duration = Duration::from_millis(100);

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "briefing", version, about = "Robot morning briefing: alarm, date and weather")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Configure credentials and location for a weather provider.
    Configure {
        /// Provider short name: "openweather", "weatherapi" or "wunderground".
        provider: String,
    },

    /// Run the briefing right now.
    Run,

    /// Wait until the alarm time, run the briefing, then exit.
    Alarm {
        /// 24-hour time, e.g. `7:30`, `7 30` or `07:30:15`.
        #[arg(required = true, num_args = 1..)]
        time: Vec<String>,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure { provider } => configure(&provider),
            Command::Run => briefing_now().await,
            Command::Alarm { time } => {
                let alarm = parse_alarm_time(time.as_slice()).context("Invalid alarm time")?;
                // Fail on bad config before waiting, not at the alarm.
                let config = Config::load()?;
                config.location()?;
                default_provider_from_config(&config)?;

                println!("Alarm set for {alarm}. Press CTRL-C to quit.");
                wait_for(AlarmWatch::new(alarm)).await;
                briefing_now().await
            }
        }
    }
}

fn configure(provider: &str) -> anyhow::Result<()> {
    let id = ProviderId::try_from(provider)?;
    let mut config = Config::load()?;

    let api_key = Password::new(&format!("API key for {id}:"))
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;
    if api_key.trim().is_empty() {
        anyhow::bail!("API key must not be empty");
    }

    let current = config.location.clone();
    let region = Text::new("Two-letter region code (e.g. WA):")
        .with_default(current.as_ref().map_or("", |l| l.region.as_str()))
        .prompt()
        .context("Failed to read region")?;
    let city = Text::new("City:")
        .with_default(current.as_ref().map_or("", |l| l.city.as_str()))
        .prompt()
        .context("Failed to read city")?;

    let region = region.trim().to_uppercase();
    if region.len() != 2 || !region.chars().all(|c| c.is_ascii_alphabetic()) {
        anyhow::bail!("Region must be a two-letter code, got '{region}'");
    }
    if city.trim().is_empty() {
        anyhow::bail!("City must not be empty");
    }

    config.upsert_provider_api_key(id, api_key.trim().to_string());
    config.set_default_provider(id);
    config.set_location(Location::new(region, city.trim()));

    let path = config.save()?;
    println!("Saved {id} configuration to {}", path.display());
    Ok(())
}

async fn briefing_now() -> anyhow::Result<()> {
    let config = Config::load()?;
    let table = config.rule_table()?;
    let location = config.location()?;
    let provider = default_provider_from_config(&config)?;
    let robot = ConsoleRobot::stdout();

    let briefing = Briefing {
        robot: &robot,
        provider: provider.as_ref(),
        advisor: WeatherAdvisor::new(&table),
        location,
    };

    briefing.run(&Local::now()).await?;
    Ok(())
}

async fn wait_for(mut watch: AlarmWatch) {
    let mut ticker = tokio::time::interval(CLOCK_POLL);
    loop {
        ticker.tick().await;
        if watch.observe(Local::now().time()) {
            tracing::info!(alarm = %watch.alarm(), "alarm time reached");
            return;
        }
    }
}
