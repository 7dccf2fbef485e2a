pub mod config;
pub mod logger;
pub mod post;
pub mod content;
pub mod fetch;
pub mod loader;
pub mod post_index;
pub mod filter;
pub mod i18n;
pub mod player;
pub mod site;
pub mod text_utils;
mod test_data;
