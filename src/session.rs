//! Session storage shared between the client and the surrounding application.
//!
//! The customers client never reads from the session when it builds requests.
//! It carries a [`SessionStore`] so that adjacent code (for example a web
//! handler remembering the authenticated customer) can reach the same store
//! through [`CustomersClient::session`](crate::CustomersClient::session).
//!
//! # Example
//!
//! ```rust
//! use paloma_shop::{MemorySession, SessionStore};
//! use serde_json::json;
//!
//! let session = MemorySession::new();
//! session.set("customer_id", json!("cust-1"));
//! assert_eq!(session.get("customer_id"), Some(json!("cust-1")));
//! ```

use std::collections::HashMap;
use std::fmt;
use std::sync::{PoisonError, RwLock};

use chrono::{DateTime, Utc};
use rand::distributions::Alphanumeric;
use rand::Rng;
use serde_json::Value;

/// Length of generated session identifiers.
const SESSION_ID_LENGTH: usize = 32;

/// A pluggable key/value session store.
///
/// Implementations must be safe to share across threads; all methods take
/// `&self`.
pub trait SessionStore: Send + Sync + fmt::Debug {
    /// Returns the session identifier.
    fn id(&self) -> &str;

    /// Returns the value stored under `key`, if any.
    fn get(&self, key: &str) -> Option<Value>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: Value);

    /// Removes and returns the value stored under `key`.
    fn remove(&self, key: &str) -> Option<Value>;

    /// Removes all values.
    fn clear(&self);
}

/// In-process [`SessionStore`] used when no session is injected.
pub struct MemorySession {
    id: String,
    started_at: DateTime<Utc>,
    attributes: RwLock<HashMap<String, Value>>,
}

impl MemorySession {
    /// Creates an empty session with a random identifier.
    #[must_use]
    pub fn new() -> Self {
        let id: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(SESSION_ID_LENGTH)
            .map(char::from)
            .collect();
        Self::with_id(id)
    }

    /// Creates an empty session with the given identifier.
    #[must_use]
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            started_at: Utc::now(),
            attributes: RwLock::new(HashMap::new()),
        }
    }

    /// Returns the number of stored values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.attributes
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns `true` if no values are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for MemorySession {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for MemorySession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Values may hold customer data; only show the shape.
        f.debug_struct("MemorySession")
            .field("id", &self.id)
            .field("started_at", &self.started_at)
            .field("len", &self.len())
            .finish()
    }
}

impl SessionStore for MemorySession {
    fn id(&self) -> &str {
        &self.id
    }

    fn get(&self, key: &str) -> Option<Value> {
        self.attributes
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: Value) {
        self.attributes
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value);
    }

    fn remove(&self, key: &str) -> Option<Value> {
        self.attributes
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key)
    }

    fn clear(&self) {
        self.attributes
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_session_generates_distinct_ids() {
        let first = MemorySession::new();
        let second = MemorySession::new();

        assert_eq!(first.id().len(), SESSION_ID_LENGTH);
        assert!(first.id().chars().all(|c| c.is_ascii_alphanumeric()));
        assert_ne!(first.id(), second.id());
    }

    #[test]
    fn test_set_get_remove() {
        let session = MemorySession::with_id("s-1");
        assert!(session.is_empty());

        session.set("customer_id", json!("cust-1"));
        assert_eq!(session.get("customer_id"), Some(json!("cust-1")));
        assert_eq!(session.len(), 1);

        assert_eq!(session.remove("customer_id"), Some(json!("cust-1")));
        assert!(session.get("customer_id").is_none());
    }

    #[test]
    fn test_set_replaces_value() {
        let session = MemorySession::new();
        session.set("cart", json!({"items": 1}));
        session.set("cart", json!({"items": 2}));
        assert_eq!(session.get("cart"), Some(json!({"items": 2})));
    }

    #[test]
    fn test_clear_removes_everything() {
        let session = MemorySession::new();
        session.set("a", json!(1));
        session.set("b", json!(2));
        session.clear();
        assert!(session.is_empty());
    }

    #[test]
    fn test_debug_hides_values() {
        let session = MemorySession::with_id("s-1");
        session.set("password", json!("hunter2"));
        let debug_str = format!("{session:?}");
        assert!(debug_str.contains("s-1"));
        assert!(!debug_str.contains("hunter2"));
    }

    #[test]
    fn test_session_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<MemorySession>();
    }
}
