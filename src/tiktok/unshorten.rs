use std::time::Duration;

use reqwest::{header, redirect, Client};
use tracing::info;
use url::Url;

use super::error::UnshortenError;

pub trait Unshorten {
    /// Resolve a share link to the link it redirects to
    async fn unshorten(&self, url: &Url) -> Result<Url, UnshortenError>;
}

/// Follows a single redirect for links on the short link host, other links are returned as is
pub struct ShortLinkResolver {
    client: Client,
    host: String,
}

impl ShortLinkResolver {
    pub fn new(host: impl Into<String>, timeout: Duration) -> reqwest::Result<Self> {
        let client = Client::builder()
            .use_rustls_tls()
            .redirect(redirect::Policy::none())
            .timeout(timeout)
            .build()?;
        Ok(Self {
            client,
            host: host.into(),
        })
    }
}

impl Unshorten for ShortLinkResolver {
    async fn unshorten(&self, url: &Url) -> Result<Url, UnshortenError> {
        if url.host_str() != Some(self.host.as_str()) {
            return Ok(url.clone());
        }

        info!(%url, "Unshortening url");
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_redirection() {
            return Err(UnshortenError::NotRedirect(status));
        }

        let location = response
            .headers()
            .get(header::LOCATION)
            .ok_or(UnshortenError::MissingLocation)?;
        let location = location.to_str().map_err(|_| {
            UnshortenError::BadLocation(String::from_utf8_lossy(location.as_bytes()).into_owned())
        })?;
        url.join(location)
            .map_err(|_| UnshortenError::BadLocation(location.to_owned()))
    }
}
