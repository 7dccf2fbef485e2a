use std::collections::HashMap;

use crate::post::Post;

/// Outcome of opening a post from a link.
#[derive(Debug, PartialEq)]
pub enum PostLookup<'a> {
    Found(&'a Post),
    NotFound { slug: String },
}

/// Posts of one load cycle, addressable by slug.
pub struct PostIndex {
    posts: Vec<Post>,
    slug_to_pos: HashMap<String, usize>,
}

impl PostIndex {
    /// On a slug collision the earlier post keeps the link.
    pub fn new(posts: Vec<Post>) -> PostIndex {
        let mut slug_to_pos = HashMap::new();
        for (pos, post) in posts.iter().enumerate() {
            slug_to_pos.entry(post.slug.clone()).or_insert(pos);
        }

        PostIndex {
            posts,
            slug_to_pos,
        }
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    pub fn from_slug(&self, slug: &str) -> Option<&Post> {
        self.slug_to_pos.get(slug).and_then(|pos| self.posts.get(*pos))
    }

    pub fn lookup(&self, slug: &str) -> PostLookup<'_> {
        match self.from_slug(slug) {
            Some(post) => PostLookup::Found(post),
            None => PostLookup::NotFound { slug: slug.to_string() },
        }
    }
}
