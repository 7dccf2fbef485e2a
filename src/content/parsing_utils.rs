use std::borrow::Cow;

use lazy_static::lazy_static;
use regex::Regex;

/// Value of a `key: value` metadata line.
#[derive(Debug, Clone, PartialEq)]
pub enum MetaValue {
    Text(String),
    List(Vec<String>),
}

impl MetaValue {
    /// Lists are joined with `,`, the way they stringify in the browser.
    pub fn to_text(&self) -> String {
        match self {
            MetaValue::Text(s) => s.clone(),
            MetaValue::List(items) => items.join(","),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            MetaValue::Text(s) => s.is_empty(),
            MetaValue::List(items) => items.iter().all(|item| item.is_empty()),
        }
    }
}

pub fn normalize_line_endings(raw: &str) -> Cow<'_, str> {
    if raw.contains('\r') {
        Cow::Owned(raw.replace("\r\n", "\n"))
    } else {
        Cow::Borrowed(raw)
    }
}

/// Finds the first `---\n<metadata>\n---\n<body>` block. Text before it is
/// not part of the body.
pub fn split_frontmatter(text: &str) -> Option<(&str, &str)> {
    lazy_static! {
        static ref FRONTMATTER_REGEX: Regex = Regex::new(
            r"(?s)---\n(?P<meta>.*?)\n---\n(?P<body>.*)"
        ).unwrap();
    }

    FRONTMATTER_REGEX.captures(text).and_then(|cap| {
        let meta = cap.name("meta").map(|m| m.as_str());
        let body = cap.name("body").map(|b| b.as_str());
        match (meta, body) {
            (Some(meta), Some(body)) => Some((meta, body)),
            _ => None
        }
    })
}

/// `title: a: b` gives `("title", "a: b")`. Lines without a colon are not metadata.
pub fn extract_header_key_val(line: &str) -> Option<(&str, &str)> {
    let (key, val) = line.split_once(':')?;
    Some((key.trim(), val.trim()))
}

/// `[a, 'b']` is a list, anything else is text. Elements are kept as
/// written, empty ones included.
pub fn parse_meta_value(val: &str) -> MetaValue {
    if val.len() >= 2 && val.starts_with('[') && val.ends_with(']') {
        let items = val[1..val.len() - 1]
            .split(',')
            .map(|s| strip_quotes(s.trim()).to_string())
            .collect();
        MetaValue::List(items)
    } else {
        MetaValue::Text(val.to_string())
    }
}

/// Removes one leading and one trailing quote character.
pub fn strip_quotes(s: &str) -> &str {
    let s = s.strip_prefix(['\'', '"']).unwrap_or(s);
    s.strip_suffix(['\'', '"']).unwrap_or(s)
}

/// Splits `a, b，c` on ASCII and CJK commas, dropping empty parts.
pub fn split_category_list(s: &str) -> Vec<String> {
    s.split([',', '，'])
        .map(|part| part.trim())
        .filter(|part| !part.is_empty())
        .map(|part| part.to_string())
        .collect()
}

pub fn strip_md_extension(path: &str) -> &str {
    path.strip_suffix(".md").unwrap_or(path)
}

/// Lowercases and collapses every run outside `[a-z0-9]` and the CJK
/// unified ideographs into a single `-`.
pub fn slugify(text: &str) -> String {
    lazy_static! {
        static ref SLUG_REGEX: Regex = Regex::new(r"[^a-z0-9\x{4E00}-\x{9FFF}]+").unwrap();
    }

    let lower = text.to_lowercase();
    let slug = SLUG_REGEX.replace_all(&lower, "-");
    slug.trim_matches('-').to_string()
}
