//! Signed-in staff session over a pluggable key/value token store.
//!
//! The session is an explicit value handed to whatever needs the bearer token
//! (the API client, the booking flow); storage is injected so tests and
//! headless tools can run without any browser-like environment.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{SlotError, SlotResult};

const TOKEN_KEY: &str = "auth_token";
const USER_KEY: &str = "current_user";

#[cfg_attr(test, mockall::automock)]
pub trait TokenStorage: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: String);
    fn clear(&self);
}

#[derive(Debug, Default)]
pub struct MemoryTokenStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryTokenStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStorage for MemoryTokenStorage {
    fn get(&self, key: &str) -> Option<String> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.get(key).cloned()
    }

    fn set(&self, key: &str, value: String) {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.insert(key.to_string(), value);
    }

    fn clear(&self) {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.clear();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StaffRole {
    Admin,
    FrontDesk,
    Clinician,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub role: StaffRole,
}

pub struct Session<S: TokenStorage> {
    storage: S,
}

impl<S: TokenStorage> Session<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn sign_in(&self, token: impl Into<String>, user: &CurrentUser) -> SlotResult<()> {
        let user = serde_json::to_string(user).map_err(|e| SlotError::Internal(Box::new(e)))?;
        self.storage.set(TOKEN_KEY, token.into());
        self.storage.set(USER_KEY, user);
        Ok(())
    }

    /// Stores a token issued out of band, without a user profile.
    pub fn set_token(&self, token: impl Into<String>) {
        self.storage.set(TOKEN_KEY, token.into());
    }

    pub fn token(&self) -> Option<String> {
        self.storage.get(TOKEN_KEY)
    }

    /// `None` when signed out or when the stored profile no longer parses.
    pub fn current_user(&self) -> Option<CurrentUser> {
        self.storage
            .get(USER_KEY)
            .and_then(|raw| serde_json::from_str(&raw).ok())
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    pub fn sign_out(&self) {
        self.storage.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::predicate::eq;

    fn front_desk_user() -> CurrentUser {
        CurrentUser {
            id: Uuid::new_v4(),
            email: "desk@centre.example".to_string(),
            name: "Front Desk".to_string(),
            role: StaffRole::FrontDesk,
        }
    }

    #[test]
    fn test_sign_in_writes_token_and_user() {
        let user = front_desk_user();
        let expected_user = serde_json::to_string(&user).unwrap();

        let mut storage = MockTokenStorage::new();
        storage
            .expect_set()
            .with(eq(TOKEN_KEY), eq("token-123".to_string()))
            .times(1)
            .return_const(());
        storage
            .expect_set()
            .with(eq(USER_KEY), eq(expected_user))
            .times(1)
            .return_const(());

        let session = Session::new(storage);
        session.sign_in("token-123", &user).unwrap();
    }

    #[test]
    fn test_sign_out_clears_storage() {
        let mut storage = MockTokenStorage::new();
        storage.expect_clear().times(1).return_const(());

        let session = Session::new(storage);
        session.sign_out();
    }

    #[test]
    fn test_corrupt_user_profile_reads_as_signed_out_user() {
        let mut storage = MockTokenStorage::new();
        storage
            .expect_get()
            .with(eq(USER_KEY))
            .return_const(Some("not json".to_string()));

        let session = Session::new(storage);
        assert!(session.current_user().is_none());
    }

    #[test]
    fn test_memory_storage_round_trip() {
        let session = Session::new(MemoryTokenStorage::new());
        assert!(!session.is_authenticated());

        let user = front_desk_user();
        session.sign_in("abc", &user).unwrap();
        assert_eq!(session.token().as_deref(), Some("abc"));
        assert_eq!(session.current_user(), Some(user));

        session.sign_out();
        assert!(!session.is_authenticated());
        assert!(session.current_user().is_none());
    }
}
