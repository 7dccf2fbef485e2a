use std::fmt;
use std::fmt::{Display, Formatter};

use serde::Serialize;

/// Placeholder values used when a document does not carry the real data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sentinel {
    Unknown,
    Untitled,
    Uncategorized,
}

impl Sentinel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sentinel::Unknown => "unknown",
            Sentinel::Untitled => "untitled",
            Sentinel::Uncategorized => "uncategorized",
        }
    }
}

impl Display for Sentinel {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Source path of a document, e.g. `游戏/Game_1_拯救森林.md`
#[derive(Debug, Clone, Eq, Hash, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PostId(pub String);

impl Display for PostId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Post {
    pub id: PostId,
    pub slug: String,
    pub title: String,
    pub date: String,
    pub excerpt: String,
    pub content: String,
    // Never empty, the folder category (if any) comes first
    pub categories: Vec<String>,
}

impl Post {
    pub fn has_category(&self, label: &str) -> bool {
        self.categories.iter().any(|c| c == label)
    }

    /// Lowercased text the search box looks into.
    pub fn searchable_text(&self) -> String {
        format!("{} {} {} {}",
                self.title,
                self.excerpt,
                self.content,
                self.categories.join(" "),
        ).to_lowercase()
    }
}

impl Display for Post {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "id={}, slug={}, date={}, categories=[{}]\ntitle={}\nexcerpt={}\ncontent:\n{}",
               self.id,
               self.slug,
               self.date,
               self.categories.join(", "),
               self.title,
               self.excerpt,
               self.content
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post_with(categories: &[&str]) -> Post {
        Post {
            id: PostId("C++/C++面试题（1）.md".to_string()),
            slug: "c-面试题-1".to_string(),
            title: "C++面试题（1）".to_string(),
            date: "2025-01-02".to_string(),
            excerpt: "虚函数".to_string(),
            content: "Virtual TABLE".to_string(),
            categories: categories.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_sentinel_strings() {
        assert_eq!(Sentinel::Unknown.as_str(), "unknown");
        assert_eq!(Sentinel::Untitled.to_string(), "untitled");
        assert_eq!(Sentinel::Uncategorized.as_str(), "uncategorized");
    }

    #[test]
    fn test_searchable_text() {
        let post = post_with(&["C++", "面试题"]);
        let text = post.searchable_text();
        assert_eq!(text, "c++面试题（1） 虚函数 virtual table c++ 面试题");
    }

    #[test]
    fn test_has_category() {
        let post = post_with(&["C++", "面试题"]);
        assert!(post.has_category("面试题"));
        assert!(!post.has_category("算法题"));
        assert!(!post.has_category("面试"));
    }

    #[test]
    fn test_serialize_id_transparent() {
        let post = post_with(&["C++"]);
        let json = serde_json::to_value(&post).unwrap();
        assert_eq!(json["id"], "C++/C++面试题（1）.md");
        assert_eq!(json["categories"][0], "C++");
    }
}
