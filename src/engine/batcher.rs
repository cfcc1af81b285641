use std::time::Duration;

use tokio::time::Instant;

use super::types::PostRecord;

/// Accumulates newly observed posts until a scoring pass should run.
///
/// Two triggers: the buffer reaching `batch_size` (checked by the caller via
/// [`is_full`](Batcher::is_full)), or the debounce deadline elapsing. The
/// deadline is re-armed on every push, so it measures idle time since the last
/// arrival, not a fixed period. Draining clears the deadline, which is how a
/// size-triggered pass cancels a pending idle timer.
#[derive(Debug)]
pub struct Batcher {
    pending: Vec<PostRecord>,
    deadline: Option<Instant>,
    batch_size: usize,
    debounce: Duration,
}

impl Batcher {
    pub fn new(batch_size: usize, debounce: Duration) -> Self {
        Self {
            pending: Vec::new(),
            deadline: None,
            batch_size,
            debounce,
        }
    }

    /// Buffers a post and re-arms the idle deadline.
    pub fn push(&mut self, post: PostRecord) {
        self.pending.push(post);
        self.deadline = Some(Instant::now() + self.debounce);
    }

    /// `true` once the buffer has reached the batch size.
    pub fn is_full(&self) -> bool {
        self.pending.len() >= self.batch_size
    }

    /// The pending idle deadline, if any posts are waiting.
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Takes exactly the current buffer contents and clears the deadline.
    pub fn drain(&mut self) -> Vec<PostRecord> {
        self.deadline = None;
        std::mem::take(&mut self.pending)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
