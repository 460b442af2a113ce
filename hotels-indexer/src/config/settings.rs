//! Service settings read from the environment.

use std::env;
use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;

use hotels_pipeline::{CrawlerConfig, ReadApiFetcherConfig, WorkerConfig};

use crate::errors::IndexingError;

const DEFAULT_DATABASE_URL: &str = "sqlite://.dev.sqlite?mode=rwc";
const DEFAULT_READ_API_URL: &str = "http://localhost:3000";
const DEFAULT_CRAWLER_TIMEOUT_MS: u64 = 30_000;
const DEFAULT_CRAWLER_PAGE_SIZE: u32 = 10;

/// When catalog syncs are scheduled.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SyncSchedule {
    /// Enqueue one `syncAll` right after startup.
    pub initial: bool,
    /// Enqueue `syncAll` periodically.
    pub interval: Option<Duration>,
}

/// Complete service configuration.
#[derive(Debug, Clone)]
pub struct Settings {
    pub database_url: String,
    pub fetcher: ReadApiFetcherConfig,
    pub crawler: CrawlerConfig,
    /// Callback URL sent along with notification subscriptions.
    pub notifications_callback_url: Option<String>,
    pub sync: SyncSchedule,
    pub worker: WorkerConfig,
}

impl Settings {
    /// Reads the settings from environment variables, applying defaults for
    /// unset ones.
    ///
    /// # Returns
    ///
    /// * `Err(IndexingError::ConfigError)` - a variable holds a malformed value
    pub fn from_env() -> Result<Self, IndexingError> {
        let crawler_defaults = CrawlerConfig::default();
        let worker_defaults = WorkerConfig::default();

        let fetcher = ReadApiFetcherConfig {
            read_api_url: var("READ_API_URL")
                .unwrap_or_else(|| DEFAULT_READ_API_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            timeout: Duration::from_millis(parse_var(
                "CRAWLER_TIMEOUT_MS",
                DEFAULT_CRAWLER_TIMEOUT_MS,
            )?),
            page_size: parse_var("CRAWLER_PAGE_SIZE", DEFAULT_CRAWLER_PAGE_SIZE)?,
        };

        let crawler = CrawlerConfig {
            trigger_indexing: parse_flag(
                "CRAWLER_TRIGGER_INDEXING",
                crawler_defaults.trigger_indexing,
            )?,
            subscribe_for_notifications: parse_flag(
                "CRAWLER_SUBSCRIBE_FOR_NOTIFICATIONS",
                crawler_defaults.subscribe_for_notifications,
            )?,
            max_concurrent_syncs: parse_var(
                "CRAWLER_MAX_CONCURRENT_SYNCS",
                crawler_defaults.max_concurrent_syncs,
            )?,
        };

        let sync = SyncSchedule {
            initial: parse_flag("SYNC_INITIAL", false)?,
            interval: match var("SYNC_INTERVAL_SECS") {
                Some(raw) => Some(Duration::from_secs(parse("SYNC_INTERVAL_SECS", &raw)?)),
                None => None,
            },
        };

        let worker = WorkerConfig {
            concurrency: parse_var("WORKER_CONCURRENCY", worker_defaults.concurrency)?,
            max_attempts: parse_var("WORKER_MAX_ATTEMPTS", worker_defaults.max_attempts)?,
            retry_delay: match var("WORKER_RETRY_DELAY_MS") {
                Some(raw) => Duration::from_millis(parse("WORKER_RETRY_DELAY_MS", &raw)?),
                None => worker_defaults.retry_delay,
            },
        };

        let settings = Self {
            database_url: var("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            fetcher,
            crawler,
            notifications_callback_url: var("NOTIFICATIONS_CALLBACK_URL"),
            sync,
            worker,
        };
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), IndexingError> {
        if self.fetcher.page_size == 0 {
            return Err(IndexingError::config("CRAWLER_PAGE_SIZE must be positive"));
        }
        if self.crawler.max_concurrent_syncs == 0 {
            return Err(IndexingError::config(
                "CRAWLER_MAX_CONCURRENT_SYNCS must be positive",
            ));
        }
        if self.worker.concurrency == 0 {
            return Err(IndexingError::config("WORKER_CONCURRENCY must be positive"));
        }
        if self.worker.max_attempts == 0 {
            return Err(IndexingError::config("WORKER_MAX_ATTEMPTS must be positive"));
        }
        if self.sync.interval == Some(Duration::ZERO) {
            return Err(IndexingError::config("SYNC_INTERVAL_SECS must be positive"));
        }
        Ok(())
    }
}

/// Value of a variable, with empty values treated as unset.
fn var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parse<T>(name: &str, raw: &str) -> Result<T, IndexingError>
where
    T: FromStr,
    T::Err: Display,
{
    raw.parse()
        .map_err(|e| IndexingError::config(format!("invalid value {raw:?} for {name}: {e}")))
}

fn parse_var<T>(name: &str, default: T) -> Result<T, IndexingError>
where
    T: FromStr,
    T::Err: Display,
{
    match var(name) {
        Some(raw) => parse(name, &raw),
        None => Ok(default),
    }
}

fn parse_flag(name: &str, default: bool) -> Result<bool, IndexingError> {
    let Some(raw) = var(name) else {
        return Ok(default);
    };
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(IndexingError::config(format!(
            "invalid value {raw:?} for {name}: expected a boolean"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARIABLES: [&str; 13] = [
        "DATABASE_URL",
        "READ_API_URL",
        "CRAWLER_TIMEOUT_MS",
        "CRAWLER_PAGE_SIZE",
        "CRAWLER_MAX_CONCURRENT_SYNCS",
        "CRAWLER_TRIGGER_INDEXING",
        "CRAWLER_SUBSCRIBE_FOR_NOTIFICATIONS",
        "NOTIFICATIONS_CALLBACK_URL",
        "SYNC_INITIAL",
        "SYNC_INTERVAL_SECS",
        "WORKER_CONCURRENCY",
        "WORKER_MAX_ATTEMPTS",
        "WORKER_RETRY_DELAY_MS",
    ];

    fn clear_env() {
        for name in VARIABLES {
            env::remove_var(name);
        }
    }

    #[test]
    #[serial]
    fn test_defaults() {
        clear_env();

        let settings = Settings::from_env().unwrap();
        assert_eq!(settings.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(settings.fetcher.read_api_url, DEFAULT_READ_API_URL);
        assert_eq!(settings.fetcher.timeout, Duration::from_secs(30));
        assert_eq!(settings.fetcher.page_size, 10);
        assert_eq!(settings.crawler.max_concurrent_syncs, 10);
        assert!(settings.crawler.trigger_indexing);
        assert!(settings.crawler.subscribe_for_notifications);
        assert!(settings.notifications_callback_url.is_none());
        assert_eq!(settings.sync, SyncSchedule::default());
        assert_eq!(settings.worker.concurrency, 8);
        assert_eq!(settings.worker.max_attempts, 3);
        assert_eq!(settings.worker.retry_delay, Duration::from_millis(500));
    }

    #[test]
    #[serial]
    fn test_overrides() {
        clear_env();
        env::set_var("READ_API_URL", "https://read-api.example/");
        env::set_var("CRAWLER_PAGE_SIZE", "50");
        env::set_var("CRAWLER_TRIGGER_INDEXING", "false");
        env::set_var("NOTIFICATIONS_CALLBACK_URL", "https://indexer.example/notifications");
        env::set_var("SYNC_INITIAL", "yes");
        env::set_var("SYNC_INTERVAL_SECS", "3600");
        env::set_var("WORKER_RETRY_DELAY_MS", "100");

        let settings = Settings::from_env().unwrap();
        clear_env();

        assert_eq!(settings.fetcher.read_api_url, "https://read-api.example");
        assert_eq!(settings.fetcher.page_size, 50);
        assert!(!settings.crawler.trigger_indexing);
        assert_eq!(
            settings.notifications_callback_url.as_deref(),
            Some("https://indexer.example/notifications")
        );
        assert!(settings.sync.initial);
        assert_eq!(settings.sync.interval, Some(Duration::from_secs(3600)));
        assert_eq!(settings.worker.retry_delay, Duration::from_millis(100));
    }

    #[test]
    #[serial]
    fn test_empty_values_fall_back_to_defaults() {
        clear_env();
        env::set_var("CRAWLER_PAGE_SIZE", "");
        env::set_var("NOTIFICATIONS_CALLBACK_URL", "  ");

        let settings = Settings::from_env().unwrap();
        clear_env();

        assert_eq!(settings.fetcher.page_size, DEFAULT_CRAWLER_PAGE_SIZE);
        assert!(settings.notifications_callback_url.is_none());
    }

    #[test]
    #[serial]
    fn test_rejects_malformed_values() {
        for (name, value) in [
            ("CRAWLER_TIMEOUT_MS", "soon"),
            ("CRAWLER_PAGE_SIZE", "-1"),
            ("CRAWLER_TRIGGER_INDEXING", "maybe"),
            ("SYNC_INTERVAL_SECS", "0"),
            ("WORKER_CONCURRENCY", "0"),
        ] {
            clear_env();
            env::set_var(name, value);

            let result = Settings::from_env();
            assert!(
                matches!(result, Err(IndexingError::ConfigError(_))),
                "{name}={value} should be rejected"
            );
        }
        clear_env();
    }
}
