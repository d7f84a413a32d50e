//! Runtime configuration.

use std::env;

/// Default SQLite database URL.
pub const DEFAULT_DATABASE_URL: &str = "sqlite:keeper.db?mode=rwc";

/// Configuration values consumed by the assistant core.
///
/// Loading is the binary's job; library code only receives the values.
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite database URL.
    pub database_url: String,

    /// Upper bound for `recent [n]`; caller-supplied values are clamped.
    pub max_recent_messages: usize,

    /// Maximum number of search results returned.
    pub max_search_results: usize,

    /// Inbound text longer than this is truncated before storage.
    pub max_stored_text_len: usize,

    /// Inbound images larger than this are rejected before extraction.
    pub max_image_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            max_recent_messages: 50,
            max_search_results: 10,
            max_stored_text_len: 4000,
            max_image_bytes: 10 * 1024 * 1024,
        }
    }
}

impl Config {
    /// Create configuration from environment variables.
    ///
    /// Optional environment variables:
    /// - `KEEPER_DATABASE_URL` - SQLite URL (default: `sqlite:keeper.db?mode=rwc`)
    /// - `KEEPER_MAX_RECENT_MESSAGES` - recent-messages cap (default: 50)
    /// - `KEEPER_MAX_SEARCH_RESULTS` - search-results cap (default: 10)
    /// - `KEEPER_MAX_STORED_TEXT_LEN` - stored-text cap in chars (default: 4000)
    /// - `KEEPER_MAX_IMAGE_BYTES` - inbound image cap (default: 10 MiB)
    ///
    /// Unset or unparseable values fall back to the defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            database_url: env::var("KEEPER_DATABASE_URL")
                .unwrap_or(defaults.database_url),
            max_recent_messages: parse_var("KEEPER_MAX_RECENT_MESSAGES")
                .unwrap_or(defaults.max_recent_messages),
            max_search_results: parse_var("KEEPER_MAX_SEARCH_RESULTS")
                .unwrap_or(defaults.max_search_results),
            max_stored_text_len: parse_var("KEEPER_MAX_STORED_TEXT_LEN")
                .unwrap_or(defaults.max_stored_text_len),
            max_image_bytes: parse_var("KEEPER_MAX_IMAGE_BYTES")
                .unwrap_or(defaults.max_image_bytes),
        }
    }
}

fn parse_var(name: &str) -> Option<usize> {
    env::var(name).ok().and_then(|v| v.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(config.max_recent_messages, 50);
        assert_eq!(config.max_search_results, 10);
        assert_eq!(config.max_stored_text_len, 4000);
        assert_eq!(config.max_image_bytes, 10 * 1024 * 1024);
    }

    // Environment-based tests are combined into a single test to avoid
    // race conditions when tests run in parallel (env vars are process-global).
    #[test]
    fn test_from_env_scenarios() {
        use std::sync::Mutex;
        static ENV_LOCK: Mutex<()> = Mutex::new(());
        let _guard = ENV_LOCK.lock().unwrap();

        fn clear_all_keeper_vars() {
            std::env::remove_var("KEEPER_DATABASE_URL");
            std::env::remove_var("KEEPER_MAX_RECENT_MESSAGES");
            std::env::remove_var("KEEPER_MAX_SEARCH_RESULTS");
            std::env::remove_var("KEEPER_MAX_STORED_TEXT_LEN");
            std::env::remove_var("KEEPER_MAX_IMAGE_BYTES");
        }

        // Scenario 1: nothing set, defaults used
        clear_all_keeper_vars();
        let config = Config::from_env();
        assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(config.max_recent_messages, 50);

        // Scenario 2: all vars set
        clear_all_keeper_vars();
        std::env::set_var("KEEPER_DATABASE_URL", "sqlite:/tmp/test.db?mode=rwc");
        std::env::set_var("KEEPER_MAX_RECENT_MESSAGES", "20");
        std::env::set_var("KEEPER_MAX_SEARCH_RESULTS", "5");
        std::env::set_var("KEEPER_MAX_STORED_TEXT_LEN", "1000");
        std::env::set_var("KEEPER_MAX_IMAGE_BYTES", "1024");

        let config = Config::from_env();
        assert_eq!(config.database_url, "sqlite:/tmp/test.db?mode=rwc");
        assert_eq!(config.max_recent_messages, 20);
        assert_eq!(config.max_search_results, 5);
        assert_eq!(config.max_stored_text_len, 1000);
        assert_eq!(config.max_image_bytes, 1024);

        // Scenario 3: unparseable values fall back
        clear_all_keeper_vars();
        std::env::set_var("KEEPER_MAX_RECENT_MESSAGES", "lots");

        let config = Config::from_env();
        assert_eq!(config.max_recent_messages, 50);

        // Cleanup
        clear_all_keeper_vars();
    }
}
