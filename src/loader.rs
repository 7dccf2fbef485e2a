use std::sync::Arc;

use futures::future::join_all;
use spdlog::{debug, error, info};

use crate::content::parse;
use crate::fetch::DocumentFetcher;
use crate::post::Post;

/// Loads every configured document and parses it into a post.
pub struct ContentLoader {
    fetcher: Arc<dyn DocumentFetcher>,
    documents: Vec<String>,
}

impl ContentLoader {
    pub fn new(fetcher: Arc<dyn DocumentFetcher>, documents: Vec<String>) -> Self {
        ContentLoader { fetcher, documents }
    }

    /// All fetches are in flight at the same time. A document that fails
    /// is logged and left out; the rest keep the configured order.
    pub async fn load_all(&self) -> Vec<Post> {
        let requests = self.documents.iter().map(|path| self.load_one(path));
        let results = join_all(requests).await;

        let posts: Vec<Post> = results.into_iter().flatten().collect();
        info!("Loaded {} of {} posts", posts.len(), self.documents.len());
        posts
    }

    async fn load_one(&self, path: &str) -> Option<Post> {
        match self.fetcher.fetch(path).await {
            Ok(text) => {
                debug!("Fetched {} ({} bytes)", path, text.len());
                Some(parse(path, &text))
            }
            Err(e) => {
                error!("Error loading post {}: {:#}", path, e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::time::Duration;

    use anyhow::{anyhow, Result};
    use async_trait::async_trait;

    use crate::test_data::{FOG_POST, FOREST_POST, INTERVIEW_POST};

    use super::*;

    /// Serves fixed documents, finishing in reverse order of the delays.
    struct FakeFetcher {
        documents: HashMap<String, (String, u64)>,
    }

    #[async_trait]
    impl DocumentFetcher for FakeFetcher {
        async fn fetch(&self, path: &str) -> Result<String> {
            match self.documents.get(path) {
                Some((text, delay_ms)) => {
                    tokio::time::sleep(Duration::from_millis(*delay_ms)).await;
                    Ok(text.clone())
                }
                None => Err(anyhow!("HTTP 404 Not Found")),
            }
        }
    }

    fn fake(entries: &[(&str, &str, u64)]) -> Arc<dyn DocumentFetcher> {
        let documents = entries.iter()
            .map(|(path, text, delay)| (path.to_string(), (text.to_string(), *delay)))
            .collect();
        Arc::new(FakeFetcher { documents })
    }

    #[tokio::test(start_paused = true)]
    async fn test_partial_failure_keeps_order() {
        let fetcher = fake(&[
            ("游戏/Game_1_拯救森林.md", FOREST_POST, 30),
            ("C++/C++面试题（1）.md", INTERVIEW_POST, 10),
        ]);
        let loader = ContentLoader::new(fetcher, vec![
            "游戏/Game_1_拯救森林.md".to_string(),
            "游戏/Game_2_迷雾森林.md".to_string(),
            "C++/C++面试题（1）.md".to_string(),
        ]);

        let posts = loader.load_all().await;
        let ids: Vec<_> = posts.iter().map(|p| p.id.0.as_str()).collect();
        assert_eq!(ids, ["游戏/Game_1_拯救森林.md", "C++/C++面试题（1）.md"]);
        assert_eq!(posts[1].categories, ["C++", "面试题"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_completion_order_does_not_matter() {
        let fetcher = fake(&[
            ("a.md", FOREST_POST, 50),
            ("b.md", FOG_POST, 20),
            ("c.md", INTERVIEW_POST, 0),
        ]);
        let loader = ContentLoader::new(fetcher, vec!["a.md".to_string(), "b.md".to_string(), "c.md".to_string()]);

        let titles: Vec<_> = loader.load_all().await.into_iter().map(|p| p.title).collect();
        assert_eq!(titles, ["拯救森林：Unity 2D 塔防", "迷雾森林", "C++面试题（1）"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_fetches_run_concurrently() {
        let fetcher = fake(&[("a.md", "a", 100), ("b.md", "b", 100), ("c.md", "c", 100)]);
        let loader = ContentLoader::new(fetcher, vec!["a.md".to_string(), "b.md".to_string(), "c.md".to_string()]);

        let start = tokio::time::Instant::now();
        let posts = loader.load_all().await;
        assert_eq!(posts.len(), 3);
        assert!(start.elapsed() < Duration::from_millis(150));
    }

    #[tokio::test]
    async fn test_everything_fails() {
        let loader = ContentLoader::new(fake(&[]), vec!["x.md".to_string()]);
        assert!(loader.load_all().await.is_empty());

        let loader = ContentLoader::new(fake(&[]), vec![]);
        assert!(loader.load_all().await.is_empty());
    }
}
