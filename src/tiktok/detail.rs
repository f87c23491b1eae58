use std::time::Duration;

use itertools::Itertools;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;
use url::Url;

use super::aweme::AwemeId;
use super::error::DetailError;

static IDS_PARAM: &str = "aweme_ids";

pub trait AwemeDetails {
    /// Look up playable addresses for all `ids` in one request
    async fn download_urls(&self, ids: &[AwemeId]) -> Result<Vec<Url>, DetailError>;
}

pub struct DetailClient {
    client: Client,
    endpoint: Url,
}

impl DetailClient {
    pub fn new(endpoint: Url, timeout: Duration) -> reqwest::Result<Self> {
        let client = Client::builder()
            .use_rustls_tls()
            .timeout(timeout)
            .build()?;
        Ok(Self { client, endpoint })
    }
}

impl AwemeDetails for DetailClient {
    async fn download_urls(&self, ids: &[AwemeId]) -> Result<Vec<Url>, DetailError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let body = self
            .client
            .get(self.endpoint.clone())
            .query(&[(IDS_PARAM, ids_param(ids))])
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;
        let response: Response = serde_json::from_slice(&body)?;

        Ok(response.download_urls(ids))
    }
}

#[derive(Debug, Deserialize)]
struct Response {
    aweme_details: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct AwemeDetail {
    aweme_id: String,
    video: Video,
}

#[derive(Debug, Deserialize)]
struct Video {
    play_addr: PlayAddr,
}

#[derive(Debug, Deserialize)]
struct PlayAddr {
    url_list: Vec<String>,
}

impl Response {
    /// Details are parsed one at a time so a bad record only drops itself
    fn download_urls(self, ids: &[AwemeId]) -> Vec<Url> {
        self.aweme_details
            .into_iter()
            .filter_map(|detail| match serde_json::from_value::<AwemeDetail>(detail) {
                Ok(detail) => Some(detail),
                Err(e) => {
                    debug!(error = %e, "Skipping malformed aweme detail");
                    None
                }
            })
            .filter(|detail| ids.iter().any(|id| id.as_str() == detail.aweme_id))
            .filter_map(|detail| {
                let address = detail.video.play_addr.url_list.into_iter().next();
                if address.is_none() {
                    debug!(aweme_id = %detail.aweme_id, "No play address");
                }
                address
            })
            .filter_map(|address| download_url(&address))
            .collect()
    }
}

/// `[id1, id2, ...]`, the format the detail endpoint expects
fn ids_param(ids: &[AwemeId]) -> String {
    format!("[{}]", ids.iter().join(", "))
}

/// Force https and drop everything but host and path
fn download_url(address: &str) -> Option<Url> {
    let url = Url::parse(address).ok()?;
    let host = url.host_str()?;
    Url::parse(&format!("https://{}{}", host, url.path())).ok()
}
