pub mod category;
pub mod frontmatter;
pub mod parsing_utils;

pub use category::{CategoryGroup, CategoryRegistry, ALL_CATEGORIES};
pub use frontmatter::parse;
