// src/challenge.rs
//! One outstanding, single-use challenge per identity.
//!
//! Expiry is enforced lazily on read; nothing sweeps the map in the
//! background.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use dashmap::{mapref::entry::Entry, DashMap};
use serde::Serialize;
use tracing::debug;
use uuid::Uuid;

use crate::error::{AuthError, Result};

pub const DEFAULT_TTL_SECS: u64 = 300;

pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

#[derive(Debug, Clone)]
struct Pending {
    value: String,
    expires_at: DateTime<Utc>,
}

impl Pending {
    fn is_active(&self, now: DateTime<Utc>) -> bool {
        now <= self.expires_at
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IssuedChallenge {
    pub id: String,
    pub challenge: String,
    pub ttl_seconds: u64,
}

pub struct ChallengeStore {
    pending: DashMap<String, Pending>,
    clock: Clock,
}

impl Default for ChallengeStore {
    fn default() -> Self {
        Self::with_clock(Arc::new(Utc::now))
    }
}

impl ChallengeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_clock(clock: Clock) -> Self {
        Self {
            pending: DashMap::new(),
            clock,
        }
    }

    /// Issue a fresh challenge for `id`, silently replacing any outstanding one.
    pub fn issue(&self, id: &str, ttl_seconds: u64) -> Result<IssuedChallenge> {
        if id.is_empty() {
            return Err(AuthError::MissingId);
        }

        let now = (self.clock)();
        let value = gen_challenge(now);
        let expires_at = i64::try_from(ttl_seconds)
            .ok()
            .and_then(Duration::try_seconds)
            .and_then(|ttl| now.checked_add_signed(ttl))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);

        self.pending.insert(
            id.to_owned(),
            Pending {
                value: value.clone(),
                expires_at,
            },
        );
        debug!(id, %expires_at, "challenge issued");

        Ok(IssuedChallenge {
            id: id.to_owned(),
            challenge: value,
            ttl_seconds,
        })
    }

    /// The active challenge for `id`, purging it if it has expired.
    pub fn peek(&self, id: &str) -> Option<String> {
        let now = (self.clock)();
        match self.pending.entry(id.to_owned()) {
            Entry::Occupied(e) if e.get().is_active(now) => Some(e.get().value.clone()),
            Entry::Occupied(e) => {
                e.remove();
                debug!(id, "expired challenge purged");
                None
            }
            Entry::Vacant(_) => None,
        }
    }

    /// Drop whatever is stored for `id`.
    pub fn consume(&self, id: &str) {
        self.pending.remove(id);
    }

    /// Atomically check `presented` against the active challenge for `id`
    /// and take it out of the store when it matches.
    ///
    /// Expired entries are purged and reported missing. A mismatch leaves
    /// the stored challenge in place. On a match the server-held value is
    /// returned and can never be redeemed again, whatever the signature
    /// check that follows decides.
    pub fn redeem(&self, id: &str, presented: &str) -> Result<String> {
        let now = (self.clock)();
        match self.pending.entry(id.to_owned()) {
            Entry::Vacant(_) => Err(AuthError::ChallengeExpiredOrMissing),
            Entry::Occupied(e) if !e.get().is_active(now) => {
                e.remove();
                debug!(id, "expired challenge purged");
                Err(AuthError::ChallengeExpiredOrMissing)
            }
            Entry::Occupied(e) if e.get().value.as_bytes() != presented.as_bytes() => {
                Err(AuthError::ChallengeMismatch)
            }
            Entry::Occupied(e) => Ok(e.remove().value),
        }
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

// UUIDv4 supplies the entropy; the millisecond suffix keeps tokens distinct
// across issuances even in the unlikely event of a UUID repeat.
fn gen_challenge(now: DateTime<Utc>) -> String {
    format!("{}-{}", Uuid::new_v4(), now.timestamp_millis())
}
