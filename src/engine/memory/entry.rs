//! Memory Entry Module
//!
//! A single stored value together with its deadline.

use std::time::{Duration, Instant};

// == Memory Entry ==
/// A value held by the memory engine.
#[derive(Debug, Clone)]
pub struct MemoryEntry {
    /// The stored value
    pub value: String,
    /// Deadline after which the entry reads as absent, None = no expiration
    pub expires_at: Option<Instant>,
}

impl MemoryEntry {
    // == Constructor ==
    /// Creates an entry expiring `ttl` from now. A zero TTL never expires.
    pub fn new(value: String, ttl: Duration) -> Self {
        let now = Instant::now();
        let expires_at = if ttl.is_zero() {
            None
        } else {
            now.checked_add(ttl)
        };

        Self { value, expires_at }
    }

    // == Is Expired ==
    /// An entry is expired once the current time reaches its deadline.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }

    pub fn is_expired_at(&self, now: Instant) -> bool {
        match self.expires_at {
            Some(deadline) => now >= deadline,
            None => false,
        }
    }

    // == Time To Live ==
    /// Remaining lifetime, zero once expired, None if the entry never expires.
    pub fn remaining(&self) -> Option<Duration> {
        self.expires_at
            .map(|deadline| deadline.saturating_duration_since(Instant::now()))
    }
}
