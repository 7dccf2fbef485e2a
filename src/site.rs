use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use rand::Rng;
use spdlog::info;

use crate::config::Config;
use crate::content::CategoryRegistry;
use crate::fetch::{DirFetcher, DocumentFetcher, HttpFetcher};
use crate::i18n::Translator;
use crate::loader::ContentLoader;
use crate::player::{Player, SimulatedMedia, Track};
use crate::post_index::PostIndex;

/// Everything a view needs, built once from the configuration and passed
/// around explicitly.
pub struct SiteContext {
    config: Config,
    registry: CategoryRegistry,
    translator: Translator,
    loader: ContentLoader,
}

impl SiteContext {
    /// Fetches over HTTP when the base is a URL, from disk otherwise.
    pub fn new(config: Config) -> Result<Self> {
        let fetcher: Arc<dyn DocumentFetcher> = if config.site.is_remote() {
            Arc::new(HttpFetcher::new(&config.site.base)?)
        } else {
            Arc::new(DirFetcher::new(PathBuf::from(&config.site.base)))
        };
        info!("Reading posts from {}", config.site.base);
        Ok(Self::with_fetcher(config, fetcher))
    }

    pub fn with_fetcher(config: Config, fetcher: Arc<dyn DocumentFetcher>) -> Self {
        let registry = CategoryRegistry::new(config.categories.clone());
        let translator = config.translator();
        let loader = ContentLoader::new(fetcher, config.site.posts.clone());
        SiteContext {
            config,
            registry,
            translator,
            loader,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn registry(&self) -> &CategoryRegistry {
        &self.registry
    }

    pub fn translator(&self) -> &Translator {
        &self.translator
    }

    pub fn translator_mut(&mut self) -> &mut Translator {
        &mut self.translator
    }

    pub fn tracks(&self) -> &[Track] {
        &self.config.tracks
    }

    pub async fn load_posts(&self) -> PostIndex {
        PostIndex::new(self.loader.load_all().await)
    }

    /// A player over the configured tracks. Fails when there are none.
    pub fn new_player<R: Rng>(&self, rng: R) -> Result<Player<SimulatedMedia, R>> {
        let media = SimulatedMedia::new(self.config.player.simulated_track_secs);
        Player::new(self.config.tracks.clone(), media, rng, self.config.player.settings())
    }
}
