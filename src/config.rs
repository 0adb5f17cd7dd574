use std::net::SocketAddr;
use std::time::Duration;

use clap::Parser;

pub const DEFAULT_SCHEDULE_URL: &str =
    "https://pretalx.hackerhotel.nl/2025/schedule/export/schedule.ics";

/// Startup configuration. Flags take precedence over environment variables.
#[derive(Parser, Clone)]
#[command(name = "roomcal")]
#[command(about = "Serve a location-filtered view of an iCalendar schedule as ICS or XML")]
pub struct Config {
    /// URL to the iCal schedule
    #[arg(
        short = 's',
        long = "schedule",
        env = "SCHEDULE_URL",
        value_name = "URL",
        default_value = DEFAULT_SCHEDULE_URL
    )]
    pub schedule_url: String,

    /// Authentication token, sent upstream as `Authorization: Token <token>`
    #[arg(
        short = 't',
        long = "token",
        env = "TOKEN",
        value_name = "TOKEN",
        hide_env_values = true
    )]
    pub token: String,

    /// Address to listen on
    #[arg(
        short = 'l',
        long = "listen",
        env = "LISTEN_ADDRESS",
        value_name = "BIND ADDRESS",
        default_value = "0.0.0.0:5000"
    )]
    pub listen_address: SocketAddr,

    /// Upstream request timeout in seconds (no timeout when unset)
    #[arg(long = "timeout", env = "UPSTREAM_TIMEOUT", value_name = "SECONDS")]
    pub timeout_secs: Option<u64>,

    /// Start serving without first checking that the schedule can be fetched
    #[arg(long, env = "SKIP_SELF_TEST")]
    pub skip_self_test: bool,
}

impl Config {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

// Token stays out of Debug output so it never ends up in logs.
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("schedule_url", &self.schedule_url)
            .field("token", &"<redacted>")
            .field("listen_address", &self.listen_address)
            .field("timeout_secs", &self.timeout_secs)
            .field("skip_self_test", &self.skip_self_test)
            .finish()
    }
}
