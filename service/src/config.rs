use clap::builder::TypedValueParser as _;
use clap::Parser;
use dotenvy::dotenv;
use log::LevelFilter;
use std::fmt;
use std::str::FromStr;

/// Base URL of a locally running match-tracking service.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api/v1";

/// The payload schema the seeder speaks. The remote API changed shape over
/// time, so each historical schema is kept as its own variant rather than
/// merged into one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ApiVariant {
    /// Current schema: generated names, full kit colors, times derived from now,
    /// and a match that is started once everyone is registered.
    Live,
    /// Fixed schedule in the future with literal player names.
    FixedSchedule,
    /// Like `FixedSchedule` but the match is created in the SCHEDULED state and
    /// registrations carry no team.
    Scheduled,
}

#[derive(Debug, PartialEq, Eq)]
pub struct ApiVariantParseError;

impl FromStr for ApiVariant {
    type Err = ApiVariantParseError;
    fn from_str(variant: &str) -> Result<ApiVariant, Self::Err> {
        match variant.to_lowercase().replace('_', "-").as_str() {
            "live" => Ok(ApiVariant::Live),
            "fixed-schedule" => Ok(ApiVariant::FixedSchedule),
            "scheduled" => Ok(ApiVariant::Scheduled),
            _ => Err(ApiVariantParseError),
        }
    }
}

impl fmt::Display for ApiVariant {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ApiVariant::Live => write!(f, "live"),
            ApiVariant::FixedSchedule => write!(f, "fixed-schedule"),
            ApiVariant::Scheduled => write!(f, "scheduled"),
        }
    }
}

#[derive(Clone, Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Base URL of the match-tracking API that fixtures are created against
    #[arg(short, long, env, default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Which payload schema to seed with
    #[arg(
        long,
        env,
        default_value_t = ApiVariant::Live,
        value_parser = clap::builder::PossibleValuesParser::new([
            "live", "fixed-schedule", "scheduled",
            "LIVE", "FIXED_SCHEDULE", "SCHEDULED",
        ])
            .map(|s| s.parse::<ApiVariant>().unwrap()),
    )]
    pub variant: ApiVariant,

    /// Set the log level verbosity threshold (level) to control what gets displayed on console output
    #[arg(
        short,
        long,
        env,
        default_value_t = LevelFilter::Info,
        value_parser = clap::builder::PossibleValuesParser::new(["OFF", "ERROR", "WARN", "INFO", "DEBUG", "TRACE"])
            .map(|s| s.parse::<LevelFilter>().unwrap()),
        )]
    pub log_level_filter: LevelFilter,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    pub fn new() -> Self {
        // Load .env file first
        dotenv().ok();
        // Then parse the command line parameters and flags
        Config::parse()
    }

    /// Base URL as given; `ApiClient` appends endpoint segments to it.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn variant(&self) -> ApiVariant {
        self.variant
    }
}
