mod aweme;
mod candidates;
mod detail;
mod error;
mod unshorten;

use std::time::Duration;

use futures::{stream, StreamExt};
use itertools::Itertools;
use tracing::{debug, error, info, warn};
use url::Url;

use crate::config::Config;

use self::aweme::AwemeId;
use self::candidates::candidate_links;
use self::detail::{AwemeDetails, DetailClient};
use self::error::CandidateError;
use self::unshorten::{ShortLinkResolver, Unshorten};

/// Outcome of resolving the TikTok links in one message
#[derive(Debug, Default, PartialEq)]
pub struct Resolution {
    pub download_urls: Vec<Url>,
    /// The detail lookup itself failed, as opposed to finding nothing
    pub failed: bool,
}

impl Resolution {
    fn failed() -> Self {
        Self {
            download_urls: Vec::new(),
            failed: true,
        }
    }

    pub fn resolved_any(&self) -> bool {
        !self.download_urls.is_empty()
    }

    /// Text to reply with, `None` if the message should be left alone
    pub fn reply(&self, fallback: &str) -> Option<String> {
        if self.failed {
            Some(fallback.to_owned())
        } else if self.resolved_any() {
            Some(self.download_urls.iter().join("\n"))
        } else {
            None
        }
    }
}

pub struct TikTokResolver<U, D> {
    unshortener: U,
    details: D,
    video_host: String,
    max_links: usize,
}

impl TikTokResolver<ShortLinkResolver, DetailClient> {
    pub fn from_config(config: &Config) -> reqwest::Result<Self> {
        let timeout = Duration::from_secs(config.request_timeout_secs);
        Ok(Self::new(
            ShortLinkResolver::new(config.short_link_host.as_str(), timeout)?,
            DetailClient::new(config.detail_endpoint.clone(), timeout)?,
            config.video_host.as_str(),
            config.max_links,
        ))
    }
}

impl<U, D> TikTokResolver<U, D>
where
    U: Unshorten,
    D: AwemeDetails,
{
    pub fn new(unshortener: U, details: D, video_host: impl Into<String>, max_links: usize) -> Self {
        Self {
            unshortener,
            details,
            video_host: video_host.into(),
            max_links,
        }
    }

    pub async fn resolve_message(&self, text: &str) -> Resolution {
        let links = candidate_links(text, self.max_links);
        if links.is_empty() {
            return Resolution::default();
        }
        self.resolve_links(&links).await
    }

    /// Resolve every link concurrently, then look up all video ids in one request
    pub async fn resolve_links(&self, links: &[Url]) -> Resolution {
        let results: Vec<_> = stream::iter(links)
            .map(|link| async move { (link, self.aweme_id(link).await) })
            .buffered(links.len().max(1))
            .collect()
            .await;

        let ids: Vec<_> = results
            .into_iter()
            .filter_map(|(link, result)| match result {
                Ok(id) => Some(id),
                Err(e @ CandidateError::NotVideo(_)) => {
                    debug!(%link, error = %e, "Skipping link");
                    None
                }
                Err(e) => {
                    warn!(%link, error = %e, "Could not resolve link");
                    None
                }
            })
            .unique()
            .collect();
        if ids.is_empty() {
            return Resolution::default();
        }

        match self.details.download_urls(&ids).await {
            Ok(download_urls) => {
                if !download_urls.is_empty() {
                    info!(urls = %download_urls.iter().join(", "), "Extracted videos");
                }
                Resolution {
                    download_urls,
                    failed: false,
                }
            }
            Err(e) => {
                error!(links = %links.iter().join(", "), error = %e, "Could not get video urls");
                Resolution::failed()
            }
        }
    }

    async fn aweme_id(&self, link: &Url) -> Result<AwemeId, CandidateError> {
        let canonical = self.unshortener.unshorten(link).await?;
        AwemeId::from_url(&canonical, &self.video_host).ok_or(CandidateError::NotVideo(canonical))
    }
}
