// src/registry.rs
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use tracing::info;

use crate::error::{AuthError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    pub id: String,
    pub name: String,
    /// Kept exactly as registered (trimmed); decoded only when verifying.
    pub public_key_b64: String,
    pub updated_at: DateTime<Utc>,
}

/// In-memory participant registry keyed by id. Re-registering an id
/// replaces the previous entry, key included.
#[derive(Debug, Default)]
pub struct Registry {
    participants: DashMap<String, Participant>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite `id`, returning how many participants are registered.
    pub fn register(&self, id: &str, name: &str, public_key_b64: &str) -> Result<usize> {
        let public_key_b64 = public_key_b64.trim();
        if id.is_empty() || name.is_empty() || public_key_b64.is_empty() {
            return Err(AuthError::MissingFields);
        }

        let participant = Participant {
            id: id.to_owned(),
            name: name.to_owned(),
            public_key_b64: public_key_b64.to_owned(),
            updated_at: Utc::now(),
        };
        let replaced = self.participants.insert(id.to_owned(), participant).is_some();
        let count = self.participants.len();
        info!(id, replaced, count, "participant registered");
        Ok(count)
    }

    pub fn lookup(&self, id: &str) -> Option<Participant> {
        self.participants.get(id).map(|p| p.value().clone())
    }

    pub fn len(&self) -> usize {
        self.participants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_counts_distinct_ids() {
        let reg = Registry::new();
        assert_eq!(reg.register("u1", "Alice", "AAAA").unwrap(), 1);
        assert_eq!(reg.register("u2", "Bob", "BBBB").unwrap(), 2);
        assert_eq!(reg.register("u1", "Alice again", "CCCC").unwrap(), 2);
        assert_eq!(reg.len(), 2);
    }

    #[test]
    fn last_registration_wins() {
        let reg = Registry::new();
        reg.register("u1", "Alice", "OLDKEY").unwrap();
        let first = reg.lookup("u1").unwrap();
        reg.register("u1", "Alice", "NEWKEY").unwrap();

        let p = reg.lookup("u1").unwrap();
        assert_eq!(p.public_key_b64, "NEWKEY");
        assert!(p.updated_at >= first.updated_at);
    }

    #[test]
    fn key_is_trimmed_but_id_and_name_are_not() {
        let reg = Registry::new();
        reg.register(" u1", "Al ", "  KEY\n").unwrap();
        let p = reg.lookup(" u1").unwrap();
        assert_eq!(p.name, "Al ");
        assert_eq!(p.public_key_b64, "KEY");
        assert!(reg.lookup("u1").is_none());
    }

    #[test]
    fn empty_fields_are_rejected() {
        let reg = Registry::new();
        assert_eq!(reg.register("", "n", "k"), Err(AuthError::MissingFields));
        assert_eq!(reg.register("i", "", "k"), Err(AuthError::MissingFields));
        assert_eq!(reg.register("i", "n", " \t "), Err(AuthError::MissingFields));
        assert!(reg.is_empty());
    }

    #[test]
    fn lookup_of_unknown_id_is_none() {
        assert!(Registry::new().lookup("nobody").is_none());
    }
}
