use std::{
    collections::{HashMap, HashSet},
    fmt::Display,
};

use crate::Post;

/// Identity of a post within one rendered list.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PostKey(String);

impl PostKey {
    /// The record's `id` when it has one, otherwise its canonical JSON text.
    pub fn for_post(post: &Post) -> Self {
        Self(post.id().unwrap_or_else(|| post.to_canonical_json()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for PostKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Pairs every post with a key that is unique within `posts`, keeping order.
///
/// Repeated keys get their occurrence number appended (`1`, `1#2`, `1#3`).
pub fn keyed(posts: &[Post]) -> Vec<(PostKey, &Post)> {
    let mut used = HashSet::with_capacity(posts.len());
    // Next occurrence number to try for each base key.
    let mut next: HashMap<String, usize> = HashMap::new();
    let mut duplicates = 0usize;

    let keyed = posts
        .iter()
        .map(|post| {
            let base = PostKey::for_post(post);
            let mut occurrence = next.get(base.as_str()).copied().unwrap_or(1);
            let mut key = suffixed(&base, occurrence);

            while !used.insert(key.0.clone()) {
                occurrence += 1;
                key = suffixed(&base, occurrence);
            }

            if occurrence > 1 {
                duplicates += 1;
            }
            next.insert(base.0, occurrence + 1);

            (key, post)
        })
        .collect();

    if duplicates > 0 {
        tracing::warn!(duplicates, "Posts share a render key, suffixing repeats");
    }

    keyed
}

fn suffixed(base: &PostKey, occurrence: usize) -> PostKey {
    if occurrence == 1 {
        base.clone()
    } else {
        PostKey(format!("{base}#{occurrence}"))
    }
}
