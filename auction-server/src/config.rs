use {
    crate::auction::service,
    anyhow::Result,
    clap::{
        crate_authors,
        crate_description,
        crate_name,
        crate_version,
        Args,
        Parser,
    },
    std::{
        fs,
        time::Duration,
    },
};

mod database;

pub use database::Options as DatabaseOptions;

// Command-line arguments of the auction room server.
#[derive(Parser, Debug)]
#[command(name = crate_name!())]
#[command(author = crate_authors!())]
#[command(about = crate_description!())]
#[command(version = crate_version!())]
pub enum Options {
    /// Run the auction room service.
    Run(RunOptions),
    /// Apply pending database migrations and exit.
    Migrate(MigrateOptions),
}

#[derive(Args, Clone, Debug)]
pub struct RunOptions {
    #[command(flatten)]
    pub database: DatabaseOptions,

    #[command(flatten)]
    pub config: ConfigOptions,
}

#[derive(Args, Clone, Debug)]
pub struct MigrateOptions {
    #[command(flatten)]
    pub database: DatabaseOptions,
}

#[derive(Args, Clone, Debug)]
#[command(next_help_heading = "Config Options")]
#[group(id = "Config")]
pub struct ConfigOptions {
    /// Path to a configuration file with the auction tuning knobs.
    #[arg(long = "config")]
    #[arg(env = "AUCTION_CONFIG")]
    #[arg(default_value = "config.yaml")]
    pub config: String,
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Config {
    #[serde(default)]
    pub auction: AuctionConfig,
}

impl Config {
    pub fn load(path: &str) -> Result<Config> {
        let yaml_content = fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&yaml_content)?;
        Ok(config)
    }
}

fn default_lock_timeout() -> Duration {
    service::Config::default().lock_timeout
}

fn default_lock_cleanup_interval() -> Duration {
    service::Config::default().lock_cleanup_interval
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AuctionConfig {
    /// Longest a request waits for an auction lock before retrying once, e.g. `5s`.
    #[serde(with = "humantime_serde", default = "default_lock_timeout")]
    pub lock_timeout:          Duration,
    /// How often lock entries of closed auctions are dropped.
    #[serde(with = "humantime_serde", default = "default_lock_cleanup_interval")]
    pub lock_cleanup_interval: Duration,
}

impl Default for AuctionConfig {
    fn default() -> Self {
        Self {
            lock_timeout:          default_lock_timeout(),
            lock_cleanup_interval: default_lock_cleanup_interval(),
        }
    }
}

impl From<AuctionConfig> for service::Config {
    fn from(config: AuctionConfig) -> Self {
        Self {
            lock_timeout:          config.lock_timeout,
            lock_cleanup_interval: config.lock_cleanup_interval,
        }
    }
}
