use std::collections::HashSet;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Deserializer, Serialize};

/// Environment variable naming the configuration file path.
pub const CONFIG_ENV: &str = "WHITTLE_CONFIG";

const DEFAULT_API_BASE: &str = "https://api.twitter.com/1.1";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub consumer_key: String,
    pub consumer_secret: String,
    pub access_token: String,
    pub access_token_secret: String,
    /// Post ids exempt from deletion regardless of age.
    /// Accepts numbers or strings (config files often quote snowflake ids).
    #[serde(default, deserialize_with = "ids_from_numbers_or_strings")]
    pub ignore_list: Vec<u64>,
    /// Number of newest posts to preserve each cycle.
    pub max_tweets_keep: usize,
    /// Seconds between trim cycles.
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
    /// Stop the process when a cycle fails outright (authentication or
    /// first-page fetch). When false, a failed cycle is retried at the
    /// next scheduled wake.
    #[serde(default)]
    pub halt_on_cycle_error: bool,
    /// Platform API root. Overridable so tests can point at a local server.
    #[serde(default = "default_api_base")]
    pub api_base: String,
}

fn default_interval_secs() -> u64 {
    3600
}

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

fn ids_from_numbers_or_strings<'de, D>(deserializer: D) -> Result<Vec<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum IdRepr {
        Number(u64),
        Text(String),
    }

    let raw = Vec::<IdRepr>::deserialize(deserializer)?;
    raw.into_iter()
        .map(|id| match id {
            IdRepr::Number(n) => Ok(n),
            IdRepr::Text(s) => s
                .trim()
                .parse()
                .map_err(|_| serde::de::Error::custom(format!("invalid post id: {s:?}"))),
        })
        .collect()
}

impl Config {
    /// Load config from the file named by `WHITTLE_CONFIG`.
    pub fn from_env() -> anyhow::Result<Config> {
        let path = std::env::var(CONFIG_ENV)
            .with_context(|| format!("{CONFIG_ENV} environment variable not set"))?;
        Self::load_from_file(Path::new(&path))
    }

    /// Load and validate config from a JSON file.
    pub fn load_from_file(path: &Path) -> anyhow::Result<Config> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        let config: Config = serde_json::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the config for obvious errors.
    pub fn validate(&self) -> anyhow::Result<()> {
        for (name, value) in [
            ("consumer_key", &self.consumer_key),
            ("consumer_secret", &self.consumer_secret),
            ("access_token", &self.access_token),
            ("access_token_secret", &self.access_token_secret),
        ] {
            if value.trim().is_empty() {
                anyhow::bail!("{} must not be empty", name);
            }
        }
        if self.interval_secs == 0 {
            anyhow::bail!("interval_secs must be at least 1");
        }
        if !self.api_base.starts_with("http://") && !self.api_base.starts_with("https://") {
            anyhow::bail!("api_base must start with http:// or https://: {}", self.api_base);
        }
        Ok(())
    }

    /// The ignore list as a set, duplicates collapsed.
    pub fn exclusion_set(&self) -> HashSet<u64> {
        self.ignore_list.iter().copied().collect()
    }
}
