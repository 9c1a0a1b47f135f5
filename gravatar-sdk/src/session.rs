//! Bearer-token sessions keyed by email.
//!
//! The SDK never logs in by itself: an app obtains a token (OAuth or
//! otherwise) and stores it in a [`SessionStore`]. Services that act on behalf
//! of a user read the token back from there.

use std::collections::HashMap;
use std::sync::RwLock;

use gravatar_common::normalize_email;

use crate::errors::{Error, Result};

/// Contract for whatever caches bearer tokens between requests.
///
/// Implementations decide on persistence; all methods take the raw email and
/// are expected to normalize it themselves.
pub trait SessionStore: Send + Sync {
    /// Whether a token is stored for `email`.
    fn has_session(&self, email: &str) -> bool {
        self.session_token(email).is_some()
    }

    /// The stored token for `email`, if any.
    fn session_token(&self, email: &str) -> Option<String>;

    /// The stored token for `email`, or [`Error::InvalidAccountInfo`] when
    /// there is none.
    fn retrieve_access_token(&self, email: &str) -> Result<String> {
        self.session_token(email)
            .filter(|token| !token.is_empty())
            .ok_or(Error::InvalidAccountInfo)
    }

    /// Forget the token for `email`. No-op if there is none.
    fn delete_session(&self, email: &str);

    /// Store `token` for `email`, replacing any previous one.
    fn save_session(&self, email: &str, token: &str);
}

/// In-memory [`SessionStore`]. Nothing survives the process.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    tokens: RwLock<HashMap<String, String>>,
}

impl MemorySessionStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn session_token(&self, email: &str) -> Option<String> {
        let tokens = self.tokens.read().unwrap_or_else(|e| e.into_inner());
        tokens.get(&normalize_email(email)).cloned()
    }

    fn delete_session(&self, email: &str) {
        let mut tokens = self.tokens.write().unwrap_or_else(|e| e.into_inner());
        tokens.remove(&normalize_email(email));
    }

    fn save_session(&self, email: &str, token: &str) {
        let mut tokens = self.tokens.write().unwrap_or_else(|e| e.into_inner());
        tokens.insert(normalize_email(email), token.to_string());
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    #[test]
    fn lifecycle() {
        let store = MemorySessionStore::new();
        assert!(!store.has_session("a@b.com"));
        assert!(matches!(
            store.retrieve_access_token("a@b.com"),
            Err(Error::InvalidAccountInfo)
        ));

        store.save_session(" A@B.com ", "token-1");
        assert!(store.has_session("a@b.com"));
        assert_eq!(store.session_token("a@b.com").as_deref(), Some("token-1"));
        assert_eq!(store.retrieve_access_token("A@B.COM").unwrap(), "token-1");

        store.save_session("a@b.com", "token-2");
        assert_eq!(store.session_token("a@b.com").as_deref(), Some("token-2"));

        store.delete_session("a@b.com");
        assert!(!store.has_session("a@b.com"));
    }

    #[test]
    fn empty_token_is_not_an_access_token() {
        let store = MemorySessionStore::new();
        store.save_session("a@b.com", "");
        assert!(matches!(
            store.retrieve_access_token("a@b.com"),
            Err(Error::InvalidAccountInfo)
        ));
    }

    #[test]
    fn concurrent_access() {
        let store = Arc::new(MemorySessionStore::new());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    let email = format!("user{i}@example.com");
                    store.save_session(&email, &format!("t{i}"));
                    store.session_token(&email)
                })
            })
            .collect();

        for (i, handle) in handles.into_iter().enumerate() {
            assert_eq!(handle.join().unwrap(), Some(format!("t{i}")));
        }
    }
}
