use anyhow::Result;
use async_trait::async_trait;

pub mod dir_fetcher;
pub mod http_fetcher;

pub use dir_fetcher::DirFetcher;
pub use http_fetcher::HttpFetcher;

/// Retrieves the raw text of one document from the post store.
#[async_trait]
pub trait DocumentFetcher: Send + Sync {
    /// `path` is the configured document path, e.g. `游戏/Game_1_拯救森林.md`.
    async fn fetch(&self, path: &str) -> Result<String>;
}

/// Percent-encodes every segment of a document path on its own, keeping
/// `/` as the separator.
pub fn encode_document_path(path: &str) -> String {
    path.split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_document_path() {
        assert_eq!(encode_document_path("C++/C++面试题（1）.md"),
                   "C%2B%2B/C%2B%2B%E9%9D%A2%E8%AF%95%E9%A2%98%EF%BC%881%EF%BC%89.md");
        assert_eq!(encode_document_path("Life/a b#c?.md"), "Life/a%20b%23c%3F.md");
        assert_eq!(encode_document_path("plain.md"), "plain.md");
    }
}
