//! Session state: the signed-in record, its persistence criterion, and the
//! storage abstraction the gate writes through.
//!
//! The persisted form is three string entries in a key-value store (see
//! [`keys`]). The store itself is injected via [`SessionStore`], so the gate
//! is testable against [`MemoryStore`] and the web layer can plug in its
//! per-browser session without the gate knowing.

pub mod redirect;

use std::collections::HashMap;
use std::convert::Infallible;
use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};

use crate::types::Email;

/// Persisted entry keys.
///
/// The names are part of the stored format; changing them orphans existing
/// sessions.
pub mod keys {
    /// Flag entry; the literal string `"true"` means authenticated.
    pub const IS_AUTHENTICATED: &str = "isAuthenticated";
    /// Signed-in email address.
    pub const USER_EMAIL: &str = "userEmail";
    /// Display name shown in the header.
    pub const USER_NAME: &str = "userName";

    /// The only flag value that counts as authenticated.
    pub const AUTHENTICATED: &str = "true";
}

/// The signed-in user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionRecord {
    email: Email,
    name: Option<String>,
}

impl SessionRecord {
    /// Create a record. An empty name is normalized to `None` so the
    /// display name falls back to the email local part.
    #[must_use]
    pub fn new(email: Email, name: Option<String>) -> Self {
        Self {
            email,
            name: name.filter(|name| !name.is_empty()),
        }
    }

    /// Rebuild a record from raw persisted entries.
    ///
    /// This is the sole restore criterion: the flag must be exactly
    /// [`keys::AUTHENTICATED`] and the email entry must parse. Partial or
    /// corrupt leftovers yield `None` (an unauthenticated session), never an
    /// error.
    #[must_use]
    pub fn from_entries(
        flag: Option<&str>,
        email: Option<&str>,
        name: Option<&str>,
    ) -> Option<Self> {
        if flag != Some(keys::AUTHENTICATED) {
            return None;
        }
        let email = Email::parse(email?).ok()?;
        Some(Self::new(email, name.map(str::to_owned)))
    }

    /// The signed-in email.
    #[must_use]
    pub const fn email(&self) -> &Email {
        &self.email
    }

    /// Explicit display name, when one was provided at sign-up.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Name shown in the header: the explicit name when present, otherwise
    /// the email local part.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .unwrap_or_else(|| self.email.local_part())
    }
}

/// Injected key-value persistence for session entries.
///
/// String keys, string values. Implementations decide durability; the gate
/// only relies on read-your-writes within one store instance.
pub trait SessionStore: Send + Sync {
    /// Storage backend failure.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Read an entry.
    fn get(
        &self,
        key: &str,
    ) -> impl Future<Output = Result<Option<String>, Self::Error>> + Send;

    /// Write an entry, replacing any previous value.
    fn set(
        &self,
        key: &str,
        value: &str,
    ) -> impl Future<Output = Result<(), Self::Error>> + Send;

    /// Delete an entry. Deleting an absent key is not an error.
    fn remove(&self, key: &str) -> impl Future<Output = Result<(), Self::Error>> + Send;
}

/// In-memory [`SessionStore`] for tests and non-web embedding.
///
/// Clones share the same underlying map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    /// An empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether an entry exists right now.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.lock().contains_key(key)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl SessionStore for MemoryStore {
    type Error = Infallible;

    async fn get(&self, key: &str) -> Result<Option<String>, Infallible> {
        Ok(self.lock().get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), Infallible> {
        self.lock().insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), Infallible> {
        self.lock().remove(key);
        Ok(())
    }
}

/// Owned session state over an injected store.
///
/// One gate per session scope: restore once, then read the flag and record
/// through it. `login` and `logout` keep the store and the in-memory view in
/// step.
#[derive(Debug)]
pub struct SessionGate<S> {
    store: S,
    user: Option<SessionRecord>,
}

impl<S: SessionStore> SessionGate<S> {
    /// Restore a gate from whatever the store currently holds.
    ///
    /// Reads the three entries once and applies the
    /// [`SessionRecord::from_entries`] criterion.
    ///
    /// # Errors
    ///
    /// Returns the store's error if any read fails. Corrupt or partial
    /// entries are not errors.
    pub async fn restore(store: S) -> Result<Self, S::Error> {
        let flag = store.get(keys::IS_AUTHENTICATED).await?;
        let email = store.get(keys::USER_EMAIL).await?;
        let name = store.get(keys::USER_NAME).await?;

        let user = SessionRecord::from_entries(flag.as_deref(), email.as_deref(), name.as_deref());
        Ok(Self { store, user })
    }

    /// Whether a signed-in user is present.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// The signed-in user, when authenticated.
    #[must_use]
    pub const fn user(&self) -> Option<&SessionRecord> {
        self.user.as_ref()
    }

    /// Persist a signed-in record and flip the gate authenticated.
    ///
    /// Writes all three entries; the stored name is the record's display
    /// name, so a restore round-trips to the same greeting.
    ///
    /// # Errors
    ///
    /// Returns the store's error if any write fails.
    pub async fn login(&mut self, record: SessionRecord) -> Result<(), S::Error> {
        self.store
            .set(keys::IS_AUTHENTICATED, keys::AUTHENTICATED)
            .await?;
        self.store
            .set(keys::USER_EMAIL, record.email().as_str())
            .await?;
        self.store.set(keys::USER_NAME, record.display_name()).await?;
        self.user = Some(record);
        Ok(())
    }

    /// Remove all persisted entries and flip the gate unauthenticated.
    ///
    /// Idempotent: a second call removes nothing and ends in the same state.
    ///
    /// # Errors
    ///
    /// Returns the store's error if any removal fails.
    pub async fn logout(&mut self) -> Result<(), S::Error> {
        self.store.remove(keys::IS_AUTHENTICATED).await?;
        self.store.remove(keys::USER_EMAIL).await?;
        self.store.remove(keys::USER_NAME).await?;
        self.user = None;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn record(email: &str, name: Option<&str>) -> SessionRecord {
        SessionRecord::new(Email::parse(email).unwrap(), name.map(str::to_owned))
    }

    #[tokio::test]
    async fn test_login_then_restore() {
        let store = MemoryStore::new();
        let mut gate = SessionGate::restore(store.clone()).await.unwrap();
        assert!(!gate.is_authenticated());

        gate.login(record("a@b.com", None)).await.unwrap();
        assert!(gate.is_authenticated());
        assert_eq!(gate.user().unwrap().display_name(), "a");

        // A fresh gate over the same store sees the persisted session.
        let restored = SessionGate::restore(store).await.unwrap();
        assert!(restored.is_authenticated());
        assert_eq!(restored.user().unwrap().email().as_str(), "a@b.com");
        assert_eq!(restored.user().unwrap().display_name(), "a");
    }

    #[tokio::test]
    async fn test_logout_clears_entries_and_is_idempotent() {
        let store = MemoryStore::new();
        let mut gate = SessionGate::restore(store.clone()).await.unwrap();
        gate.login(record("a@b.com", None)).await.unwrap();

        gate.logout().await.unwrap();
        assert!(!gate.is_authenticated());
        assert!(!store.contains(keys::IS_AUTHENTICATED));
        assert!(!store.contains(keys::USER_EMAIL));
        assert!(!store.contains(keys::USER_NAME));

        // Second logout: same end state, no error.
        gate.logout().await.unwrap();
        assert!(!gate.is_authenticated());
        assert!(!store.contains(keys::USER_EMAIL));
    }

    #[tokio::test]
    async fn test_restore_requires_exact_flag_value() {
        for bad_flag in ["TRUE", "1", "yes", ""] {
            let store = MemoryStore::new();
            store.set(keys::IS_AUTHENTICATED, bad_flag).await.unwrap();
            store.set(keys::USER_EMAIL, "a@b.com").await.unwrap();

            let gate = SessionGate::restore(store).await.unwrap();
            assert!(
                !gate.is_authenticated(),
                "flag {bad_flag:?} must not restore a session"
            );
        }
    }

    #[tokio::test]
    async fn test_restore_requires_parseable_email() {
        let store = MemoryStore::new();
        store
            .set(keys::IS_AUTHENTICATED, keys::AUTHENTICATED)
            .await
            .unwrap();
        store.set(keys::USER_EMAIL, "not-an-email").await.unwrap();

        let gate = SessionGate::restore(store).await.unwrap();
        assert!(!gate.is_authenticated(), "corrupt email must not restore");
    }

    #[tokio::test]
    async fn test_restore_with_flag_but_no_email_is_unauthenticated() {
        let store = MemoryStore::new();
        store
            .set(keys::IS_AUTHENTICATED, keys::AUTHENTICATED)
            .await
            .unwrap();

        let gate = SessionGate::restore(store).await.unwrap();
        assert!(!gate.is_authenticated());
    }

    #[test]
    fn test_from_entries_criterion() {
        assert!(SessionRecord::from_entries(Some("true"), Some("a@b.com"), None).is_some());
        assert!(SessionRecord::from_entries(None, Some("a@b.com"), None).is_none());
        assert!(SessionRecord::from_entries(Some("true"), None, None).is_none());
        assert!(SessionRecord::from_entries(Some("true"), Some(""), None).is_none());
        assert!(SessionRecord::from_entries(Some("false"), Some("a@b.com"), None).is_none());
    }

    #[test]
    fn test_display_name_prefers_explicit_name() {
        assert_eq!(record("jane@shop.test", Some("Jane")).display_name(), "Jane");
        assert_eq!(record("jane@shop.test", None).display_name(), "jane");
    }

    #[test]
    fn test_empty_name_normalizes_to_local_part() {
        let rec = SessionRecord::from_entries(Some("true"), Some("jo@shop.test"), Some("")).unwrap();
        assert_eq!(rec.name(), None);
        assert_eq!(rec.display_name(), "jo");
    }

    #[tokio::test]
    async fn test_memory_store_roundtrip() {
        let store = MemoryStore::new();
        assert_eq!(store.get("k").await.unwrap(), None);

        store.set("k", "v").await.unwrap();
        assert_eq!(store.get("k").await.unwrap().as_deref(), Some("v"));

        store.set("k", "v2").await.unwrap();
        assert_eq!(store.get("k").await.unwrap().as_deref(), Some("v2"));

        store.remove("k").await.unwrap();
        assert_eq!(store.get("k").await.unwrap(), None);
        store.remove("k").await.unwrap();
    }
}
