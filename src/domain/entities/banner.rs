use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Duration, Utc};

use crate::domain::value_objects::severity::Severity;

/// Default lifetime of a banner before it removes itself
pub const DEFAULT_BANNER_TTL_MS: i64 = 5_000;

/// A dismissible banner shown in the alert area
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub id: u64,
    pub message: String,
    pub severity: Severity,
    pub raised_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Banner {
    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

#[derive(Debug, Default)]
struct BoardInner {
    next_id: u64,
    banners: Vec<Banner>,
}

/// Shared alert area. Banners are appended in raise order and each one
/// expires `ttl` after it was raised, regardless of what is raised later.
#[derive(Debug)]
pub struct BannerBoard {
    ttl: Duration,
    inner: Mutex<BoardInner>,
}

impl BannerBoard {
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            inner: Mutex::new(BoardInner::default()),
        }
    }

    #[must_use]
    pub fn with_ttl_ms(ttl_ms: u64) -> Self {
        let ttl_ms = i64::try_from(ttl_ms).unwrap_or(i64::MAX);
        Self::new(Duration::milliseconds(ttl_ms))
    }

    fn lock(&self) -> MutexGuard<'_, BoardInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Append a banner raised at `now` and return its id. Banners already
    /// expired at `now` are dropped first, so the board stays bounded even
    /// when nobody calls [`BannerBoard::prune`].
    pub fn raise(&self, message: &str, severity: Severity, now: DateTime<Utc>) -> u64 {
        let mut inner = self.lock();
        inner.banners.retain(|b| !b.is_expired(now));
        inner.next_id += 1;
        let id = inner.next_id;
        inner.banners.push(Banner {
            id,
            message: message.to_string(),
            severity,
            raised_at: now,
            expires_at: now + self.ttl,
        });
        id
    }

    /// Remove a banner before it expires. Returns `false` if it was already gone.
    pub fn dismiss(&self, id: u64) -> bool {
        let mut inner = self.lock();
        let before = inner.banners.len();
        inner.banners.retain(|b| b.id != id);
        inner.banners.len() != before
    }

    /// Drop expired banners, returning how many were removed
    pub fn prune(&self, now: DateTime<Utc>) -> usize {
        let mut inner = self.lock();
        let before = inner.banners.len();
        inner.banners.retain(|b| !b.is_expired(now));
        before - inner.banners.len()
    }

    /// Banners still visible at `now`, oldest first
    #[must_use]
    pub fn active(&self, now: DateTime<Utc>) -> Vec<Banner> {
        self.lock()
            .banners
            .iter()
            .filter(|b| !b.is_expired(now))
            .cloned()
            .collect()
    }
}

impl Default for BannerBoard {
    fn default() -> Self {
        Self::new(Duration::milliseconds(DEFAULT_BANNER_TTL_MS))
    }
}
