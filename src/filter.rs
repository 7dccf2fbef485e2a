use crate::content::{CategoryGroup, CategoryRegistry, ALL_CATEGORIES};
use crate::post::Post;

/// How a selected category label is interpreted.
#[derive(Debug, Clone, PartialEq)]
pub enum CategorySelection<'a> {
    All,
    /// Matches the group name or any of its children
    Group(&'a CategoryGroup),
    /// Matches one exact label
    Label(&'a str),
}

impl<'a> CategorySelection<'a> {
    pub fn resolve(registry: &'a CategoryRegistry, selected: &'a str) -> Self {
        if selected == ALL_CATEGORIES {
            return CategorySelection::All;
        }
        match registry.find_group(selected) {
            Some(group) => CategorySelection::Group(group),
            None => CategorySelection::Label(selected),
        }
    }

    pub fn accepts(&self, post: &Post) -> bool {
        match self {
            CategorySelection::All => true,
            CategorySelection::Group(group) => post.categories.iter().any(|c| group.matches(c)),
            CategorySelection::Label(label) => post.has_category(label),
        }
    }
}

/// Whitespace separated, lowercased keywords. Every one must be found.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
    keywords: Vec<String>,
}

impl SearchQuery {
    pub fn from(query: &str) -> Self {
        let keywords = query.trim()
            .to_lowercase()
            .split_whitespace()
            .map(|k| k.to_string())
            .collect();
        SearchQuery { keywords }
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    pub fn accepts(&self, post: &Post) -> bool {
        if self.keywords.is_empty() {
            return true;
        }
        let text = post.searchable_text();
        self.keywords.iter().all(|k| text.contains(k.as_str()))
    }
}

/// Posts visible for a category selection and a search box content, in
/// input order. The category narrows first, then the search.
pub fn filter_posts<'p>(posts: &'p [Post], registry: &CategoryRegistry, selected: &str, query: &str) -> Vec<&'p Post> {
    let selection = CategorySelection::resolve(registry, selected);
    let search = SearchQuery::from(query);

    let mut result: Vec<&Post> = match selection {
        CategorySelection::All => posts.iter().collect(),
        _ => posts.iter().filter(|p| selection.accepts(p)).collect(),
    };

    if !search.is_empty() {
        result.retain(|p| search.accepts(p));
    }

    result
}
