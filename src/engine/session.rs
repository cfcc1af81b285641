use std::collections::HashSet;

use crate::hashing::hash_post_id;

use super::types::PostRecord;

/// Session-scoped post state: the insertion-ordered known posts and the
/// append-only seen-set.
///
/// Seen-set membership is taken at arrival time, before posts reach the batch
/// buffer, so duplicates inside a single ingest batch are dropped too. Posts
/// keep their arrival order for the session; that order is the deterministic
/// tie-break for show-mode ranking.
#[derive(Debug, Default)]
pub struct SessionState {
    posts: Vec<PostRecord>,
    seen: HashSet<u64>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a post id as seen. Returns `false` if it was already known.
    pub fn mark_seen(&mut self, id: &str) -> bool {
        self.seen.insert(hash_post_id(id))
    }

    /// Appends a drained batch to the known posts.
    pub fn absorb(&mut self, batch: Vec<PostRecord>) {
        self.posts.extend(batch);
    }

    pub fn posts(&self) -> &[PostRecord] {
        &self.posts
    }

    pub fn posts_mut(&mut self) -> &mut [PostRecord] {
        &mut self.posts
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    /// Number of posts currently hidden.
    pub fn hidden_count(&self) -> usize {
        self.posts.iter().filter(|p| !p.visible).count()
    }
}
