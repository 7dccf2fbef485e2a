use std::path::PathBuf;

use anyhow::{Context, Result};
use async_trait::async_trait;

use crate::fetch::DocumentFetcher;

/// Reads documents from `<root>/posts/<path>` on the local disk.
pub struct DirFetcher {
    root_dir: PathBuf,
}

impl DirFetcher {
    pub fn new(root_dir: PathBuf) -> Self {
        DirFetcher { root_dir }
    }

    pub fn document_path(&self, path: &str) -> PathBuf {
        let mut full_path = self.root_dir.join("posts");
        for segment in path.split('/').filter(|s| !s.is_empty()) {
            full_path.push(segment);
        }
        full_path
    }
}

#[async_trait]
impl DocumentFetcher for DirFetcher {
    async fn fetch(&self, path: &str) -> Result<String> {
        if path.split('/').any(|segment| segment == "..") {
            anyhow::bail!("Access forbidden: {}", path);
        }

        let full_path = self.document_path(path);
        tokio::fs::read_to_string(&full_path)
            .await
            .with_context(|| format!("Error reading {}", full_path.display()))
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    fn temp_site(name: &str) -> PathBuf {
        let root = std::env::temp_dir().join(format!("folio-dir-fetcher-{}-{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&root);
        fs::create_dir_all(root.join("posts").join("游戏")).unwrap();
        root
    }

    #[tokio::test]
    async fn test_fetch_existing_document() {
        let root = temp_site("existing");
        fs::write(root.join("posts").join("游戏").join("Game_1.md"), "---\ntitle: x\n---\nbody").unwrap();

        let fetcher = DirFetcher::new(root.clone());
        let text = fetcher.fetch("游戏/Game_1.md").await.unwrap();
        assert_eq!(text, "---\ntitle: x\n---\nbody");

        let _ = fs::remove_dir_all(&root);
    }

    #[tokio::test]
    async fn test_fetch_missing_document_fails() {
        let root = temp_site("missing");
        let fetcher = DirFetcher::new(root.clone());
        assert!(fetcher.fetch("游戏/nope.md").await.is_err());
        assert!(fetcher.fetch("../secret.md").await.is_err());
        let _ = fs::remove_dir_all(&root);
    }
}
