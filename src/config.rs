use crate::error::Error;
use std::env;
use tokio::time::Duration;

pub const WATCH_NAMESPACE_ENV: &str = "EXAMPLE_OPERATOR_WATCH_NAMESPACE";
pub const RETRY_SECS_ENV: &str = "EXAMPLE_OPERATOR_RETRY_SECS";
pub const REPORT_SECS_ENV: &str = "EXAMPLE_OPERATOR_REPORT_SECS";

#[derive(Clone, Debug, PartialEq)]
pub struct OperatorConfig {
    /// Namespace to watch; every namespace when unset.
    pub watch_namespace: Option<String>,
    /// Pause before polling a watch again after it failed.
    pub retry_after: Duration,
    pub report_interval: Duration,
}

impl Default for OperatorConfig {
    fn default() -> Self {
        OperatorConfig {
            watch_namespace: None,
            retry_after: Duration::from_secs(5),
            report_interval: Duration::from_secs(60),
        }
    }
}

impl OperatorConfig {
    pub fn from_env() -> Result<OperatorConfig, Error> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from `lookup`, falling back to the defaults for unset or empty keys.
    pub fn from_lookup<F>(lookup: F) -> Result<OperatorConfig, Error>
    where
        F: Fn(&'static str) -> Option<String>,
    {
        let defaults = OperatorConfig::default();
        let get = |key| lookup(key).filter(|value: &String| !value.trim().is_empty());

        let watch_namespace = get(WATCH_NAMESPACE_ENV).map(|ns| ns.trim().to_string());
        let retry_after = match get(RETRY_SECS_ENV) {
            Some(value) => parse_secs(RETRY_SECS_ENV, value)?,
            None => defaults.retry_after,
        };
        let report_interval = match get(REPORT_SECS_ENV) {
            Some(value) => parse_secs(REPORT_SECS_ENV, value)?,
            None => defaults.report_interval,
        };

        Ok(OperatorConfig {
            watch_namespace,
            retry_after,
            report_interval,
        })
    }
}

fn parse_secs(key: &'static str, value: String) -> Result<Duration, Error> {
    match value.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(Error::InvalidConfig { key, value }),
    }
}
