//! # Application State
//!
//! Shared state for the Axum application, passed to all route handlers
//! via the `State` extractor.
//!
//! ## Architecture
//!
//! - **Users** — accounts with role and identity documents.
//! - **Requests** — travel requests and their fulfillment lifecycle.
//! - **Mail templates** — notification templates, thin CRUD rows.
//! - **Policy** — the single [`PolicyConfig`], replaced whole-object by
//!   policy edits and read by every evaluation.
//!
//! All stores are in-memory, replace-whole-object. There is no external
//! persistence layer.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use tdesk_core::{Role, TemplateId, Timestamp, UserId};
use tdesk_policy::PolicyConfig;
use tdesk_state::{DocumentSet, TravelRequest};

// ── Generic In-Memory Store ──────────────────────────────────────────

/// Thread-safe, cloneable in-memory key-value store.
///
/// All operations are synchronous (the RwLock is `parking_lot`, not
/// `tokio::sync`) because the lock is never held across `.await` points.
/// `parking_lot::RwLock` is non-poisonable — a panicking writer does not
/// permanently corrupt the store.
#[derive(Debug)]
pub struct Store<T: Clone + Send + Sync> {
    data: Arc<RwLock<HashMap<Uuid, T>>>,
}

impl<T: Clone + Send + Sync> Clone for Store<T> {
    fn clone(&self) -> Self {
        Self {
            data: Arc::clone(&self.data),
        }
    }
}

impl<T: Clone + Send + Sync> Store<T> {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Insert a record, returning the previous value if the key existed.
    pub fn insert(&self, id: Uuid, value: T) -> Option<T> {
        self.data.write().insert(id, value)
    }

    /// Retrieve a record by ID.
    pub fn get(&self, id: &Uuid) -> Option<T> {
        self.data.read().get(id).cloned()
    }

    /// List all records.
    pub fn list(&self) -> Vec<T> {
        self.data.read().values().cloned().collect()
    }

    /// Update a record in place. Returns the updated record, or `None` if
    /// not found.
    pub fn update(&self, id: &Uuid, f: impl FnOnce(&mut T)) -> Option<T> {
        let mut guard = self.data.write();
        if let Some(entry) = guard.get_mut(id) {
            f(entry);
            Some(entry.clone())
        } else {
            None
        }
    }

    /// Atomically read-validate-update a record.
    ///
    /// The closure receives a `&mut T` and may inspect the current state,
    /// validate preconditions, mutate the record, and return `Ok(R)` or
    /// `Err(E)`. The entire operation runs under a single write lock,
    /// eliminating TOCTOU races between read and update.
    ///
    /// Returns `None` if the record doesn't exist, or `Some(result)` with
    /// the closure's `Result`.
    pub fn try_update<R, E>(
        &self,
        id: &Uuid,
        f: impl FnOnce(&mut T) -> Result<R, E>,
    ) -> Option<Result<R, E>> {
        self.data.write().get_mut(id).map(f)
    }

    /// Remove a record by ID.
    pub fn remove(&self, id: &Uuid) -> Option<T> {
        self.data.write().remove(id)
    }

    /// Check if a record exists.
    pub fn contains(&self, id: &Uuid) -> bool {
        self.data.read().contains_key(id)
    }

    /// Return the number of records.
    pub fn len(&self) -> usize {
        self.data.read().len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: Clone + Send + Sync> Default for Store<T> {
    fn default() -> Self {
        Self::new()
    }
}

// ── Record Types ─────────────────────────────────────────────────────

/// A user account with role and identity documents.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserRecord {
    #[schema(value_type = String)]
    pub id: UserId,
    /// Display name.
    pub name: String,
    pub email: String,
    /// The user's role, driving every capability check.
    #[schema(value_type = String)]
    pub role: Role,
    /// Identity documents read by the verification gate.
    #[schema(value_type = Object)]
    pub documents: DocumentSet,
    #[schema(value_type = String)]
    pub created_at: Timestamp,
    #[schema(value_type = String)]
    pub updated_at: Timestamp,
}

/// A notification mail template.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MailTemplateRecord {
    #[schema(value_type = String)]
    pub id: TemplateId,
    /// Template identifier, e.g. "request_approved".
    pub name: String,
    pub subject: String,
    pub body: String,
    #[schema(value_type = String)]
    pub updated_at: Timestamp,
}

// ── Application State ────────────────────────────────────────────────

/// Application configuration.
///
/// Custom `Debug` redacts the `auth_token` to prevent credential leakage
/// in logs.
#[derive(Clone)]
pub struct AppConfig {
    /// Port to bind the HTTP server to.
    pub port: u16,
    /// Static bearer token secret. If `None`, authentication is disabled.
    pub auth_token: Option<String>,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("port", &self.port)
            .field("auth_token", &self.auth_token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            auth_token: None,
        }
    }
}

/// Shared application state accessible to all route handlers.
///
/// Clone-friendly via `Arc` internals in each `Store`. The policy is an
/// `Arc<RwLock<PolicyConfig>>` so a `PUT /v1/policy` replaces it atomically
/// and the next evaluation sees the new rules — nothing caches derived
/// policy state.
#[derive(Debug, Clone)]
pub struct AppState {
    pub users: Store<UserRecord>,
    pub requests: Store<TravelRequest>,
    pub mail_templates: Store<MailTemplateRecord>,
    pub policy: Arc<RwLock<PolicyConfig>>,
    pub config: AppConfig,
}

impl AppState {
    /// Create application state with default configuration and the
    /// standard policy.
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    /// Create application state with the given configuration.
    pub fn with_config(config: AppConfig) -> Self {
        Self {
            users: Store::new(),
            requests: Store::new(),
            mail_templates: Store::new(),
            policy: Arc::new(RwLock::new(PolicyConfig::standard())),
            config,
        }
    }

    /// A clone of the current policy. Handlers evaluate against this copy
    /// so the read lock is never held during evaluation.
    pub fn policy_snapshot(&self) -> PolicyConfig {
        self.policy.read().clone()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user(id: Uuid) -> UserRecord {
        let now = Timestamp::now();
        UserRecord {
            id: UserId::from_uuid(id),
            name: "Ayesha Khan".to_string(),
            email: "ayesha@example.com".to_string(),
            role: Role::Employee,
            documents: DocumentSet::default(),
            created_at: now,
            updated_at: now,
        }
    }

    // ── Store tests ──────────────────────────────────────────────────

    #[test]
    fn store_new_creates_empty_store() {
        let store: Store<UserRecord> = Store::new();
        assert!(store.is_empty());
        assert!(store.list().is_empty());
    }

    #[test]
    fn store_insert_and_get_roundtrip() {
        let store = Store::new();
        let id = Uuid::new_v4();
        assert!(store.insert(id, sample_user(id)).is_none());

        let retrieved = store.get(&id).unwrap();
        assert_eq!(*retrieved.id.as_uuid(), id);
        assert_eq!(retrieved.name, "Ayesha Khan");
    }

    #[test]
    fn store_insert_returns_previous_value() {
        let store = Store::new();
        let id = Uuid::new_v4();
        store.insert(id, sample_user(id));
        assert!(store.insert(id, sample_user(id)).is_some());
    }

    #[test]
    fn store_update_modifies_existing() {
        let store = Store::new();
        let id = Uuid::new_v4();
        store.insert(id, sample_user(id));

        let updated = store.update(&id, |u| u.role = Role::Admin).unwrap();
        assert_eq!(updated.role, Role::Admin);
        assert_eq!(store.get(&id).unwrap().role, Role::Admin);
    }

    #[test]
    fn store_update_returns_none_for_missing_key() {
        let store: Store<UserRecord> = Store::new();
        assert!(store.update(&Uuid::new_v4(), |_| {}).is_none());
    }

    #[test]
    fn store_try_update_propagates_closure_result() {
        let store = Store::new();
        let id = Uuid::new_v4();
        store.insert(id, sample_user(id));

        let ok: Option<Result<(), String>> = store.try_update(&id, |u| {
            u.name = "updated".to_string();
            Ok(())
        });
        assert!(matches!(ok, Some(Ok(()))));

        let err: Option<Result<(), String>> =
            store.try_update(&id, |_| Err("validation failed".to_string()));
        assert!(matches!(err, Some(Err(_))));

        let missing: Option<Result<(), String>> =
            store.try_update(&Uuid::new_v4(), |_| Ok(()));
        assert!(missing.is_none());
    }

    #[test]
    fn store_remove_deletes_item() {
        let store = Store::new();
        let id = Uuid::new_v4();
        store.insert(id, sample_user(id));
        assert!(store.remove(&id).is_some());
        assert!(store.get(&id).is_none());
        assert!(store.remove(&id).is_none());
    }

    #[test]
    fn store_clone_shares_underlying_data() {
        let store = Store::new();
        let id = Uuid::new_v4();
        store.insert(id, sample_user(id));

        let clone = store.clone();
        assert!(clone.contains(&id));

        let id2 = Uuid::new_v4();
        clone.insert(id2, sample_user(id2));
        assert_eq!(store.len(), 2);
    }

    // ── AppState tests ───────────────────────────────────────────────

    #[test]
    fn app_state_new_creates_empty_stores() {
        let state = AppState::new();
        assert!(state.users.is_empty());
        assert!(state.requests.is_empty());
        assert!(state.mail_templates.is_empty());
    }

    #[test]
    fn app_state_starts_with_standard_policy() {
        let state = AppState::new();
        let policy = state.policy_snapshot();
        assert_eq!(policy, PolicyConfig::standard());
    }

    #[test]
    fn app_config_debug_redacts_token() {
        let config = AppConfig {
            port: 3000,
            auth_token: Some("super-secret".to_string()),
        };
        let debug = format!("{config:?}");
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn policy_replacement_is_visible_to_snapshots() {
        let state = AppState::new();
        *state.policy.write() = PolicyConfig::permissive();
        assert_eq!(state.policy_snapshot(), PolicyConfig::permissive());
    }
}
