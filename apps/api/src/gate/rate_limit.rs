//! Fixed-window per-client rate limiting for the LLM-backed endpoints.
//!
//! Each endpoint constructs its own limiter instance with its own key-space;
//! there is no module-level singleton, so tests (and endpoints) never share
//! counters.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::http::HeaderMap;
use dashmap::DashMap;

/// Key used when no client address can be determined.
pub const UNKNOWN_CLIENT: &str = "unknown";

struct WindowEntry {
    count: u32,
    reset_at: Instant,
}

/// In-memory fixed-window counter keyed by client IP.
///
/// Not a sliding window or token bucket: a client straddling a window boundary
/// can burst up to 2x the limit. That approximation is intentional.
#[derive(Clone)]
pub struct RateLimiter {
    inner: Arc<RateLimiterInner>,
}

struct RateLimiterInner {
    limit: u32,
    window: Duration,
    entries: DashMap<String, WindowEntry>,
}

impl RateLimiter {
    pub fn new(limit: u32, window: Duration) -> Self {
        Self {
            inner: Arc::new(RateLimiterInner {
                limit,
                window,
                entries: DashMap::new(),
            }),
        }
    }

    /// Returns `true` if the request is admitted, `false` if over budget.
    ///
    /// Fresh key or expired window: counter resets to 1 and the request is
    /// admitted regardless of prior count. At the limit: rejected without
    /// mutating the entry. The `entry()` guard holds the shard lock, so the
    /// read-check-mutate is atomic under concurrent handlers.
    pub fn check(&self, key: &str) -> bool {
        let now = Instant::now();
        let mut entry = self
            .inner
            .entries
            .entry(key.to_owned())
            .or_insert(WindowEntry {
                count: 0,
                reset_at: now + self.inner.window,
            });

        if now >= entry.reset_at {
            entry.count = 1;
            entry.reset_at = now + self.inner.window;
            return true;
        }
        if entry.count < self.inner.limit {
            entry.count += 1;
            return true;
        }
        false
    }

    /// Drops entries whose window has expired. Called from a background sweep
    /// so the map stays bounded under many distinct client IPs.
    pub fn cleanup(&self) {
        let now = Instant::now();
        self.inner.entries.retain(|_, entry| now < entry.reset_at);
    }

    #[cfg(test)]
    fn tracked_keys(&self) -> usize {
        self.inner.entries.len()
    }
}

/// Resolves the rate-limit key for a request: the first `X-Forwarded-For`
/// entry when behind a proxy, else the socket peer address, else
/// [`UNKNOWN_CLIENT`].
pub fn client_key(headers: &HeaderMap, peer: Option<SocketAddr>) -> String {
    if let Some(forwarded) = headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
    {
        return forwarded.to_string();
    }
    peer.map(|addr| addr.ip().to_string())
        .unwrap_or_else(|| UNKNOWN_CLIENT.to_string())
}
