use std::time::Duration;

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";
pub const DEFAULT_TIMEOUT_SECS: u64 = 20;

const USER_AGENT_ENV: &str = "EVENT_SCRAPE_USER_AGENT";
const TIMEOUT_ENV: &str = "EVENT_SCRAPE_TIMEOUT_SECS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapeConfig {
    pub user_agent: String,
    pub timeout: Duration,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl ScrapeConfig {
    /// Defaults overlaid with `EVENT_SCRAPE_USER_AGENT` and
    /// `EVENT_SCRAPE_TIMEOUT_SECS`. Blank or unparsable values are ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(agent) = lookup(USER_AGENT_ENV) {
            config = config.with_user_agent(agent);
        }
        if let Some(secs) = lookup(TIMEOUT_ENV).and_then(|raw| raw.trim().parse::<u64>().ok()) {
            config = config.with_timeout_secs(secs);
        }
        config
    }

    pub fn with_user_agent(mut self, agent: impl Into<String>) -> Self {
        let agent = agent.into();
        if !agent.trim().is_empty() {
            self.user_agent = agent.trim().to_string();
        }
        self
    }

    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        if secs > 0 {
            self.timeout = Duration::from_secs(secs);
        }
        self
    }
}
