use std::collections::HashMap;

use crate::content::parsing_utils::{extract_header_key_val, normalize_line_endings, parse_meta_value, slugify, split_category_list, split_frontmatter, strip_md_extension, MetaValue};
use crate::post::{Post, PostId, Sentinel};

/// Where a document lives: `C++/C++面试题（1）.md` has folder `C++` and bare
/// name `C++面试题（1）.md`.
struct DocumentPath<'a> {
    folder: Option<&'a str>,
    bare: &'a str,
}

impl<'a> DocumentPath<'a> {
    fn from(identifier: &'a str) -> Self {
        match identifier.split_once('/') {
            Some((folder, bare)) => DocumentPath {
                folder: if folder.is_empty() { None } else { Some(folder) },
                bare,
            },
            None => DocumentPath { folder: None, bare: identifier },
        }
    }

    fn stem(&self) -> &'a str {
        strip_md_extension(self.bare)
    }
}

/// Builds a post out of a markdown document with an optional frontmatter block.
///
/// Never fails: missing or malformed metadata falls back to values derived
/// from the path, or to [`Sentinel`] values.
pub fn parse(identifier: &str, raw_text: &str) -> Post {
    let path = DocumentPath::from(identifier);
    let text = normalize_line_endings(raw_text);

    let Some((meta_block, body)) = split_frontmatter(&text) else {
        let categories = match path.folder {
            Some(folder) => vec![folder.to_string()],
            None => vec![Sentinel::Uncategorized.as_str().to_string()],
        };
        return Post {
            id: PostId(identifier.to_string()),
            slug: fallback_slug(&path),
            title: match path.stem() {
                "" => Sentinel::Untitled.as_str().to_string(),
                stem => stem.to_string(),
            },
            date: Sentinel::Unknown.as_str().to_string(),
            excerpt: String::new(),
            content: raw_text.to_string(),
            categories,
        };
    };

    let metadata = parse_metadata(meta_block);
    let text_field = |key: &str| -> Option<String> {
        metadata.get(key)
            .map(|v| v.to_text())
            .filter(|v| !v.is_empty())
    };

    let title = text_field("title");
    let slug = title.as_deref()
        .map(slugify)
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| fallback_slug(&path));

    Post {
        id: PostId(identifier.to_string()),
        slug,
        title: title.unwrap_or_else(|| Sentinel::Untitled.as_str().to_string()),
        date: text_field("date").unwrap_or_else(|| Sentinel::Unknown.as_str().to_string()),
        excerpt: text_field("excerpt").unwrap_or_default(),
        content: body.trim().to_string(),
        categories: resolve_categories(&metadata, path.folder),
    }
}

/// Later lines override earlier ones with the same key.
pub fn parse_metadata(block: &str) -> HashMap<String, MetaValue> {
    let mut metadata = HashMap::new();
    for line in block.lines() {
        if let Some((key, val)) = extract_header_key_val(line) {
            metadata.insert(key.to_string(), parse_meta_value(val));
        }
    }
    metadata
}

fn resolve_categories(metadata: &HashMap<String, MetaValue>, folder: Option<&str>) -> Vec<String> {
    let raw = metadata.get("categories")
        .filter(|v| !v.is_empty())
        .or_else(|| metadata.get("category"));

    let mut categories: Vec<String> = match raw {
        Some(MetaValue::List(items)) => items.iter()
            .filter(|item| !item.is_empty())
            .cloned()
            .collect(),
        Some(MetaValue::Text(s)) => split_category_list(s),
        None => vec![],
    };

    if let Some(folder) = folder {
        if !categories.iter().any(|c| c == folder) {
            categories.insert(0, folder.to_string());
        }
    }

    if categories.is_empty() {
        categories.push(Sentinel::Uncategorized.as_str().to_string());
    }

    categories
}

fn fallback_slug(path: &DocumentPath) -> String {
    let stem = path.stem();
    let slug = slugify(stem);
    if !slug.is_empty() {
        slug
    } else if !stem.is_empty() {
        stem.to_string()
    } else {
        Sentinel::Untitled.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use crate::test_data::{FOREST_POST, INTERVIEW_POST};

    use super::*;

    #[test]
    fn test_parse_full_frontmatter() {
        let post = parse("游戏/Game_1_拯救森林.md", FOREST_POST);
        assert_eq!(post.id, PostId("游戏/Game_1_拯救森林.md".to_string()));
        assert_eq!(post.title, "拯救森林：Unity 2D 塔防");
        assert_eq!(post.slug, "拯救森林-unity-2d-塔防");
        assert_eq!(post.date, "2025-03-01");
        assert_eq!(post.excerpt, "一个关于守护森林的塔防小游戏");
        assert_eq!(post.categories, ["游戏", "独立游戏", "游戏设计"]);
        assert!(post.content.starts_with("## 起因"));
        assert!(post.content.ends_with("敬请期待。"));
    }

    #[test]
    fn test_no_frontmatter_with_folder() {
        let post = parse("A/B.md", "Just some text\n");
        assert_eq!(post.categories, ["A"]);
        assert_eq!(post.slug, "b");
        assert_eq!(post.title, "B");
        assert_eq!(post.id.0, "A/B.md");
        assert_eq!(post.date, "unknown");
        assert_eq!(post.excerpt, "");
        assert_eq!(post.content, "Just some text\n");
    }

    #[test]
    fn test_no_frontmatter_without_folder() {
        let post = parse("notes.md", "---\nnot closed");
        assert_eq!(post.categories, ["uncategorized"]);
        assert_eq!(post.title, "notes");
        assert_eq!(post.slug, "notes");
        assert_eq!(post.content, "---\nnot closed");
    }

    #[test]
    fn test_list_categories_keep_order() {
        let post = parse("post.md", "---\ntitle: Tags\ncategories: [Tag1, 'Tag2']\n---\nbody");
        assert_eq!(post.categories, ["Tag1", "Tag2"]);
    }

    #[test]
    fn test_folder_category_is_prepended() {
        let post = parse("C++/foo.md", INTERVIEW_POST);
        assert_eq!(post.categories, ["C++", "面试题"]);

        let post = parse("C++/foo.md", "---\ncategories: 面试题, C++\n---\nbody");
        assert_eq!(post.categories, ["面试题", "C++"]);
    }

    #[test]
    fn test_categories_win_over_category() {
        let post = parse("x.md", "---\ncategory: Old\ncategories: New，Newer\n---\n");
        assert_eq!(post.categories, ["New", "Newer"]);

        let post = parse("x.md", "---\ncategory: Old\ncategories:\n---\n");
        assert_eq!(post.categories, ["Old"]);

        let post = parse("x.md", "---\ncategory: Old\ncategories: []\n---\n");
        assert_eq!(post.categories, ["Old"]);
    }

    #[test]
    fn test_empty_category_list_falls_back() {
        let post = parse("x.md", "---\ntitle: T\ncategories: []\n---\n");
        assert_eq!(post.categories, ["uncategorized"]);

        let post = parse("Life/x.md", "---\ntitle: T\ncategory: , ，\n---\n");
        assert_eq!(post.categories, ["Life"]);
    }

    #[test]
    fn test_missing_fields_use_sentinels() {
        let post = parse("Life/walk.md", "---\nmood: fine\n---\nWalked.");
        assert_eq!(post.title, "untitled");
        assert_eq!(post.slug, "walk");
        assert_eq!(post.date, "unknown");
        assert_eq!(post.excerpt, "");
        assert_eq!(post.content, "Walked.");
    }

    #[test]
    fn test_title_without_sluggable_chars() {
        let post = parse("Life/日记.md", "---\ntitle: ！！！\n---\n");
        assert_eq!(post.title, "！！！");
        assert_eq!(post.slug, "日记");

        let post = parse("Life/（）.md", "---\ntitle: ???\n---\n");
        assert_eq!(post.slug, "（）");

        let post = parse(".md", "");
        assert_eq!(post.slug, "untitled");
    }

    #[test]
    fn test_value_with_colons_and_crlf() {
        let post = parse("x.md", "---\r\ntitle: Rust: the book\r\ndate: 2025-01-01 10:00\r\n---\r\nbody\r\n");
        assert_eq!(post.title, "Rust: the book");
        assert_eq!(post.slug, "rust-the-book");
        assert_eq!(post.date, "2025-01-01 10:00");
        assert_eq!(post.content, "body");
    }

    #[test]
    fn test_list_in_scalar_field() {
        let post = parse("x.md", "---\ntitle: [a, b]\n---\n");
        assert_eq!(post.title, "a,b");
        assert_eq!(post.slug, "a-b");

        let post = parse("x.md", "---\ntitle: [a, , b]\ncategories: [a, , b]\n---\n");
        assert_eq!(post.title, "a,,b");
        assert_eq!(post.categories, ["a", "b"]);

        let post = parse("x.md", "---\ntitle: []\n---\n");
        assert_eq!(post.title, "untitled");
    }

    #[test]
    fn test_frontmatter_after_leading_text() {
        let post = parse("Life/x.md", "Preface\n---\ntitle: Late\n---\nBody\n");
        assert_eq!(post.title, "Late");
        assert_eq!(post.content, "Body");
        assert_eq!(post.categories, ["Life"]);
    }

    #[test]
    fn test_parse_is_total() {
        let inputs = [
            "",
            "---",
            "---\n---\n",
            "---\n\n---\n",
            ":::\n---\n:\n---\n",
            "\u{FEFF}---\ntitle: \n---\n",
            "---\n[[[\n---\n]]]",
            "\0\u{1F600}\r\r\n",
        ];
        let ids = ["", "/", "a/", "/b.md", "x/y/z.md", "名字.md"];
        for id in ids {
            for input in inputs {
                let post = parse(id, input);
                assert!(!post.categories.is_empty(), "id={} input={:?}", id, input);
                assert!(!post.slug.is_empty(), "id={} input={:?}", id, input);
            }
        }
    }

    #[test]
    fn test_nested_path_keeps_rest_as_bare_name() {
        let post = parse("游戏/2025/回顾.md", "text");
        assert_eq!(post.categories, ["游戏"]);
        assert_eq!(post.title, "2025/回顾");
        assert_eq!(post.slug, "2025-回顾");
    }
}
