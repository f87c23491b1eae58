use itertools::Itertools;
use url::Url;

const LINK_PREFIX: &str = "https://";

/// Links in `text` worth resolving, in order of first appearance
pub fn candidate_links(text: &str, max_links: usize) -> Vec<Url> {
    text.split_whitespace()
        .filter(|token| token.starts_with(LINK_PREFIX))
        .filter_map(|token| Url::parse(token).ok())
        .unique()
        .take(max_links)
        .collect()
}
