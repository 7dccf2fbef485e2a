use serde::Deserialize;

/// Selecting this label disables category filtering.
pub const ALL_CATEGORIES: &str = "All";

/// A parent label and its child labels. Groups don't own posts, posts
/// only carry labels.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CategoryGroup {
    pub name: String,
    #[serde(default)]
    pub items: Vec<String>,
}

impl CategoryGroup {
    pub fn new(name: &str, items: &[&str]) -> Self {
        CategoryGroup {
            name: name.to_string(),
            items: items.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// The group name or any of its child labels.
    pub fn matches(&self, label: &str) -> bool {
        self.name == label || self.items.iter().any(|item| item == label)
    }

    /// Whether the group should be shown expanded for the current selection.
    pub fn is_active(&self, selected: &str) -> bool {
        self.matches(selected)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum NavEntry<'a> {
    All,
    Group(&'a CategoryGroup),
    Item { group: &'a CategoryGroup, label: &'a str },
}

impl NavEntry<'_> {
    /// Value to select when the entry is picked.
    pub fn selection(&self) -> &str {
        match self {
            NavEntry::All => ALL_CATEGORIES,
            NavEntry::Group(group) => group.name.as_str(),
            NavEntry::Item { label, .. } => label,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryRegistry {
    groups: Vec<CategoryGroup>,
}

impl CategoryRegistry {
    pub fn new(groups: Vec<CategoryGroup>) -> Self {
        CategoryRegistry { groups }
    }

    pub fn groups(&self) -> &[CategoryGroup] {
        &self.groups
    }

    pub fn find_group(&self, name: &str) -> Option<&CategoryGroup> {
        self.groups.iter().find(|g| g.name == name)
    }

    /// `All` first, then every group followed by its child labels.
    pub fn navigation(&self) -> Vec<NavEntry<'_>> {
        let mut entries = vec![NavEntry::All];
        for group in self.groups.iter() {
            entries.push(NavEntry::Group(group));
            for label in group.items.iter() {
                entries.push(NavEntry::Item { group, label: label.as_str() });
            }
        }
        entries
    }
}
