use anyhow::{ensure, Result};
use figment::providers::{Env, Format, Toml};
use figment::Figment;
use serde::Deserialize;
use url::Url;

pub static CONFIG_FILE: &str = "config.toml";
pub static ENV_PREFIX: &str = "TIKTAKTOE_";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Most links taken from a single message
    #[serde(default = "default_max_links")]
    pub max_links: usize,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_short_link_host")]
    pub short_link_host: String,
    #[serde(default = "default_video_host")]
    pub video_host: String,
    #[serde(default = "default_detail_endpoint")]
    pub detail_endpoint: Url,
    /// Sent instead of links when the detail lookup fails
    #[serde(default = "default_fallback_reply")]
    pub fallback_reply: String,
}

fn default_max_links() -> usize {
    5
}

fn default_request_timeout_secs() -> u64 {
    5
}

fn default_short_link_host() -> String {
    "vm.tiktok.com".into()
}

fn default_video_host() -> String {
    "www.tiktok.com".into()
}

fn default_detail_endpoint() -> Url {
    Url::parse("https://api.tiktokv.com/aweme/v1/multi/aweme/detail/")
        .expect("default detail endpoint is a valid url")
}

fn default_fallback_reply() -> String {
    "unexpected error".into()
}

impl Config {
    pub fn figment() -> Figment {
        Figment::new()
            .merge(Toml::file(CONFIG_FILE))
            .merge(Env::prefixed(ENV_PREFIX))
    }

    pub fn get_config() -> Result<Self> {
        let config: Self = Self::figment().extract()?;
        ensure!(config.max_links > 0, "max_links must be at least 1");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use figment::Jail;

    use super::*;

    #[test]
    fn test_defaults() {
        Jail::expect_with(|_jail| {
            let config: Config = Config::figment().extract()?;
            assert_eq!(5, config.max_links);
            assert_eq!(5, config.request_timeout_secs);
            assert_eq!("vm.tiktok.com", config.short_link_host);
            assert_eq!("www.tiktok.com", config.video_host);
            assert_eq!(
                "https://api.tiktokv.com/aweme/v1/multi/aweme/detail/",
                config.detail_endpoint.as_str()
            );
            assert_eq!("unexpected error", config.fallback_reply);
            Ok(())
        });
    }

    #[test]
    fn test_file_and_env() {
        Jail::expect_with(|jail| {
            jail.create_file(CONFIG_FILE, "max_links = 3\nvideo_host = \"m.tiktok.com\"")?;
            jail.set_env("TIKTAKTOE_VIDEO_HOST", "tiktok.com");
            jail.set_env("TIKTAKTOE_REQUEST_TIMEOUT_SECS", "10");
            let config: Config = Config::figment().extract()?;
            assert_eq!(3, config.max_links);
            assert_eq!(10, config.request_timeout_secs);
            assert_eq!("tiktok.com", config.video_host);
            Ok(())
        });
    }

    #[test]
    fn test_zero_max_links() {
        Jail::expect_with(|jail| {
            jail.set_env("TIKTAKTOE_MAX_LINKS", "0");
            assert!(Config::get_config().is_err());
            Ok(())
        });
    }

    #[test]
    fn test_bad_endpoint() {
        Jail::expect_with(|jail| {
            jail.set_env("TIKTAKTOE_DETAIL_ENDPOINT", "not a url");
            assert!(Config::figment().extract::<Config>().is_err());
            Ok(())
        });
    }
}
