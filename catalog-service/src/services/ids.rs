//! Product identifier generation.
//!
//! Identifiers are the creation time in milliseconds since the Unix epoch,
//! rendered as a decimal string. Two creations inside the same millisecond
//! would collide, so the generator never hands out a value twice: if the
//! clock has not moved past the last issued value, the next one is
//! `last + 1`.

use chrono::Utc;
use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Default)]
pub struct ProductIdGenerator {
    last: AtomicU64,
}

impl ProductIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&self) -> String {
        let now = u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0);
        self.next_after(now).to_string()
    }

    fn next_after(&self, now: u64) -> u64 {
        let previous = self
            .last
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
                Some(now.max(last.saturating_add(1)))
            })
            .unwrap_or_else(|last| last);
        now.max(previous.saturating_add(1))
    }
}
