use reqwest::StatusCode;
use thiserror::Error;
use url::Url;

#[derive(Debug, Error)]
pub enum UnshortenError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("expected a redirect, got {0}")]
    NotRedirect(StatusCode),
    #[error("no location header")]
    MissingLocation,
    #[error("invalid location header {0:?}")]
    BadLocation(String),
}

/// Why a single link dropped out of a batch
#[derive(Debug, Error)]
pub enum CandidateError {
    #[error("could not unshorten: {0}")]
    Unshorten(#[from] UnshortenError),
    #[error("not a video link: {0}")]
    NotVideo(Url),
}

#[derive(Debug, Error)]
pub enum DetailError {
    #[error("aweme detail request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("unexpected aweme detail response: {0}")]
    Malformed(#[from] serde_json::Error),
}
