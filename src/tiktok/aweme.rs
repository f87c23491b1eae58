use std::fmt::Display;

use url::Url;

/// Validated TikTok video id
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AwemeId(Box<str>);

impl AwemeId {
    pub fn new(id: &str) -> Option<Self> {
        if is_id_valid(id) {
            Some(Self(id.into()))
        } else {
            None
        }
    }

    /// Extract the id from the last path segment of a video link on `video_host`
    pub fn from_url(url: &Url, video_host: &str) -> Option<Self> {
        if url.host_str() != Some(video_host) {
            return None;
        }
        url.path_segments()?.last().and_then(Self::new)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for AwemeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

fn is_id_valid(id: &str) -> bool {
    !id.is_empty() && id.chars().all(char::is_alphanumeric)
}
