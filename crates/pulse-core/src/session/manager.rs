use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::{Mutex, watch};
use tracing::{debug, error, info, warn};

use super::auth::AuthProvider;
use crate::error::{PulseError, Result};
use crate::storage::{KeyValueStore, USER_STORAGE_KEY};
use crate::user::User;

/// Whether a user is currently signed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum AuthState {
    Unauthenticated,
    Authenticated,
}

/// Clears the loading flag when the operation task finishes.
struct LoadingGuard(Arc<SessionState>);

impl LoadingGuard {
    fn start(state: Arc<SessionState>) -> Self {
        state.loading.store(true, Ordering::SeqCst);
        Self(state)
    }
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        self.0.loading.store(false, Ordering::SeqCst);
    }
}

/// State shared between the manager handle and its operation tasks.
struct SessionState {
    auth: Arc<dyn AuthProvider>,
    store: Arc<dyn KeyValueStore>,
    /// Current user; the sender doubles as the in-memory copy.
    user: watch::Sender<Option<User>>,
    loading: AtomicBool,
}

/// Owns the signed-in user and keeps it in step with the durable slot.
///
/// `SessionManager` is responsible for:
/// - Restoring the persisted user on startup
/// - Signing in and registering through an [`AuthProvider`]
/// - Writing every identity change through to the [`KeyValueStore`]
/// - Publishing identity changes to subscribers
///
/// Operations run one at a time: each holds an internal FIFO lock for its
/// whole duration, so overlapping calls complete in the order they were made
/// and the last call decides the final state.
///
/// Once an operation has taken the lock it runs on its own task. Dropping the
/// returned future does not retract it: the operation still completes and
/// updates storage and memory together.
pub struct SessionManager {
    state: Arc<SessionState>,
    op_lock: Arc<Mutex<()>>,
}

impl SessionManager {
    /// Creates a new `SessionManager`.
    ///
    /// The manager starts `Unauthenticated` and reports `is_loading()` until
    /// [`restore`](Self::restore) has run.
    ///
    /// # Arguments
    ///
    /// * `auth` - The authority consulted by login and register
    /// * `store` - The key-value store holding the durable slot
    pub fn new(auth: Arc<dyn AuthProvider>, store: Arc<dyn KeyValueStore>) -> Self {
        let (user, _) = watch::channel(None);
        Self {
            state: Arc::new(SessionState {
                auth,
                store,
                user,
                loading: AtomicBool::new(true),
            }),
            op_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Returns a copy of the signed-in user, if any.
    pub fn current_user(&self) -> Option<User> {
        self.state.user.borrow().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.user.borrow().is_some()
    }

    pub fn state(&self) -> AuthState {
        if self.is_authenticated() {
            AuthState::Authenticated
        } else {
            AuthState::Unauthenticated
        }
    }

    /// Advisory flag: an operation is in progress (or restore has not run yet).
    pub fn is_loading(&self) -> bool {
        self.state.loading.load(Ordering::SeqCst)
    }

    /// Subscribes to identity changes.
    ///
    /// The receiver observes the current value immediately and every
    /// replacement made by restore, login, register or logout.
    pub fn subscribe(&self) -> watch::Receiver<Option<User>> {
        self.state.user.subscribe()
    }

    /// Restores the persisted user; intended to run once at startup.
    ///
    /// A missing slot leaves the session signed out. A slot that cannot be
    /// read or decoded is logged and also leaves the session signed out.
    ///
    /// # Returns
    ///
    /// The restored user, or `None` when the session starts signed out.
    pub async fn restore(&self) -> Option<User> {
        self.run(|state| async move { state.restore().await })
            .await
            .unwrap_or_else(|e| {
                error!(error = %e, "Restore did not complete");
                None
            })
    }

    /// Signs in and persists the returned user.
    ///
    /// # Errors
    ///
    /// - `InvalidCredentials` if the provider rejects the credentials; nothing
    ///   is written and the current session is kept.
    /// - `StorageWrite` if the user could not be persisted; the in-memory
    ///   session is left unchanged.
    pub async fn login(&self, email: &str, password: &str) -> Result<User> {
        let (email, password) = (email.to_string(), password.to_string());
        self.run(move |state| async move { state.login(&email, &password).await })
            .await?
    }

    /// Registers an account, then signs in as it.
    ///
    /// # Errors
    ///
    /// - `InvalidRegistrationData` if the provider rejects the data.
    /// - `StorageWrite` if the user could not be persisted.
    pub async fn register(&self, name: &str, email: &str, password: &str) -> Result<User> {
        let (name, email, password) = (name.to_string(), email.to_string(), password.to_string());
        self.run(move |state| async move { state.register(&name, &email, &password).await })
            .await?
    }

    /// Signs out. Always succeeds and is idempotent.
    ///
    /// The in-memory session is cleared even if removing the durable slot
    /// fails; that failure is only logged.
    pub async fn logout(&self) {
        if let Err(e) = self.run(|state| async move { state.logout().await }).await {
            error!(error = %e, "Logout did not complete");
        }
    }

    /// Takes the operation lock, then drives `op` to completion on a
    /// dedicated task that owns the lock and the loading flag.
    async fn run<T, F, Fut>(&self, op: F) -> Result<T>
    where
        F: FnOnce(Arc<SessionState>) -> Fut,
        Fut: Future<Output = T> + Send + 'static,
        T: Send + 'static,
    {
        let permit = Arc::clone(&self.op_lock).lock_owned().await;
        let loading = LoadingGuard::start(Arc::clone(&self.state));
        let task = op(Arc::clone(&self.state));

        let handle = tokio::spawn(async move {
            let _permit = permit;
            let _loading = loading;
            task.await
        });

        match handle.await {
            Ok(output) => Ok(output),
            Err(e) if e.is_panic() => std::panic::resume_unwind(e.into_panic()),
            Err(e) => Err(PulseError::internal(format!("Session task failed: {}", e))),
        }
    }
}

impl SessionState {
    async fn restore(&self) -> Option<User> {
        let restored = match self.store.get(USER_STORAGE_KEY).await {
            Ok(Some(raw)) => match User::from_json(&raw) {
                Ok(user) => Some(user),
                Err(e) => {
                    warn!(error = %e, "Stored session is unreadable; starting signed out");
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                error!(error = %e, "Failed to load user from storage");
                None
            }
        };

        match &restored {
            Some(user) => info!(email = %user.email, "Restored session"),
            None => debug!("No session to restore"),
        }
        self.user.send_replace(restored.clone());
        restored
    }

    async fn login(&self, email: &str, password: &str) -> Result<User> {
        let user = self.auth.login(email, password).await.inspect_err(|e| {
            warn!(error = %e, "Login failed");
        })?;
        self.replace_user(user).await
    }

    async fn register(&self, name: &str, email: &str, password: &str) -> Result<User> {
        let user = self
            .auth
            .register(name, email, password)
            .await
            .inspect_err(|e| {
                warn!(error = %e, "Registration failed");
            })?;
        self.replace_user(user).await
    }

    async fn logout(&self) {
        let previous = self.user.send_replace(None);
        if let Err(e) = self.store.remove(USER_STORAGE_KEY).await {
            error!(error = %e, "Logout failed to clear stored session");
        }
        if let Some(user) = previous {
            info!(email = %user.email, "Signed out");
        }
    }

    /// Writes `user` to the durable slot, then makes it current.
    async fn replace_user(&self, user: User) -> Result<User> {
        let raw = user.to_json()?;
        self.store
            .set(USER_STORAGE_KEY, &raw)
            .await
            .inspect_err(|e| {
                error!(error = %e, "Failed to persist session");
            })?;

        info!(email = %user.email, "Signed in");
        self.user.send_replace(Some(user.clone()));
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PulseError;
    use crate::session::auth::MockAuthProvider;
    use crate::storage::MemoryKeyValueStore;
    use std::time::Duration;

    fn manager_with(store: Arc<MemoryKeyValueStore>) -> SessionManager {
        SessionManager::new(Arc::new(MockAuthProvider::instant()), store)
    }

    #[tokio::test]
    async fn test_starts_unauthenticated_and_loading() {
        let manager = manager_with(Arc::new(MemoryKeyValueStore::new()));
        assert_eq!(manager.state(), AuthState::Unauthenticated);
        assert!(manager.is_loading());

        assert!(manager.restore().await.is_none());
        assert!(!manager.is_loading());
        assert!(manager.current_user().is_none());
    }

    #[tokio::test]
    async fn test_login_then_restore_in_fresh_manager() {
        let store = Arc::new(MemoryKeyValueStore::new());
        let manager = manager_with(store.clone());

        let user = manager.login("a@b.com", "pw").await.unwrap();
        assert_eq!(user.email, "a@b.com");
        assert_eq!(user.name, "John Doe");
        assert_eq!(manager.state(), AuthState::Authenticated);

        // Simulated process restart: only the store survives
        let restarted = manager_with(store);
        let restored = restarted.restore().await.unwrap();
        assert_eq!(restored.email, "a@b.com");
        assert!(restarted.is_authenticated());
    }

    #[tokio::test]
    async fn test_login_with_empty_email_is_rejected() {
        let store = Arc::new(MemoryKeyValueStore::new());
        let manager = manager_with(store.clone());
        manager.restore().await;

        let err = manager.login("", "pw").await.unwrap_err();
        assert_eq!(err, PulseError::InvalidCredentials);
        assert_eq!(manager.state(), AuthState::Unauthenticated);
        assert!(store.is_empty().await);
        assert!(!manager.is_loading());
    }

    #[tokio::test]
    async fn test_failed_login_keeps_existing_session() {
        let manager = manager_with(Arc::new(MemoryKeyValueStore::new()));
        manager.login("a@b.com", "pw").await.unwrap();

        assert!(manager.login("other@b.com", "").await.is_err());
        assert_eq!(manager.current_user().unwrap().email, "a@b.com");
    }

    #[tokio::test]
    async fn test_register_uses_supplied_name() {
        let manager = manager_with(Arc::new(MemoryKeyValueStore::new()));
        manager.register("Jane", "jane@x.com", "secret").await.unwrap();

        let user = manager.current_user().unwrap();
        assert_eq!(user.name, "Jane");
        assert_eq!(user.email, "jane@x.com");
    }

    #[tokio::test]
    async fn test_register_with_missing_field_is_rejected() {
        let store = Arc::new(MemoryKeyValueStore::new());
        let manager = manager_with(store.clone());

        let err = manager.register("Jane", "", "secret").await.unwrap_err();
        assert_eq!(err, PulseError::InvalidRegistrationData);
        assert!(!manager.is_authenticated());
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_login_replaces_previous_user() {
        let store = Arc::new(MemoryKeyValueStore::new());
        let manager = manager_with(store.clone());
        manager.register("Jane", "jane@x.com", "secret").await.unwrap();
        manager.login("a@b.com", "pw").await.unwrap();

        assert_eq!(manager.current_user().unwrap().email, "a@b.com");
        let raw = store.get(USER_STORAGE_KEY).await.unwrap().unwrap();
        assert_eq!(User::from_json(&raw).unwrap().email, "a@b.com");
    }

    #[tokio::test]
    async fn test_logout_is_idempotent() {
        let store = Arc::new(MemoryKeyValueStore::new());
        let manager = manager_with(store.clone());

        manager.logout().await;
        assert!(!manager.is_authenticated());
        assert!(store.get(USER_STORAGE_KEY).await.unwrap().is_none());

        manager.login("a@b.com", "pw").await.unwrap();
        manager.logout().await;
        manager.logout().await;
        assert!(!manager.is_authenticated());
        assert!(store.get(USER_STORAGE_KEY).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_logout_clears_memory_when_storage_fails() {
        let store = Arc::new(MemoryKeyValueStore::new());
        let manager = manager_with(store.clone());
        manager.login("a@b.com", "pw").await.unwrap();

        store.set_fail_writes(true);
        manager.logout().await;
        assert!(!manager.is_authenticated());
    }

    #[tokio::test]
    async fn test_login_write_failure_is_reported() {
        let store = Arc::new(MemoryKeyValueStore::new());
        store.set_fail_writes(true);
        let manager = manager_with(store.clone());

        let err = manager.login("a@b.com", "pw").await.unwrap_err();
        assert!(matches!(err, PulseError::StorageWrite(_)));
        assert!(!manager.is_authenticated());
    }

    #[tokio::test]
    async fn test_restore_ignores_corrupt_slot() {
        let store = Arc::new(MemoryKeyValueStore::with_entries([(
            USER_STORAGE_KEY,
            "{not json",
        )]));
        let manager = manager_with(store);

        assert!(manager.restore().await.is_none());
        assert_eq!(manager.state(), AuthState::Unauthenticated);
        assert!(!manager.is_loading());
    }

    #[tokio::test]
    async fn test_restore_survives_read_failure() {
        let store = Arc::new(MemoryKeyValueStore::with_entries([(
            USER_STORAGE_KEY,
            r#"{"id":"1","name":"Jane","email":"jane@x.com"}"#,
        )]));
        store.set_fail_reads(true);
        let manager = manager_with(store);

        assert!(manager.restore().await.is_none());
        assert!(!manager.is_authenticated());
    }

    #[tokio::test]
    async fn test_subscribers_see_changes() {
        let manager = manager_with(Arc::new(MemoryKeyValueStore::new()));
        let mut rx = manager.subscribe();
        assert!(rx.borrow_and_update().is_none());

        manager.login("a@b.com", "pw").await.unwrap();
        assert!(rx.has_changed().unwrap());
        assert_eq!(
            rx.borrow_and_update().as_ref().map(|u| u.email.clone()),
            Some("a@b.com".to_string())
        );

        manager.logout().await;
        assert!(rx.has_changed().unwrap());
        assert!(rx.borrow_and_update().is_none());
    }

    fn slow_manager(store: Arc<MemoryKeyValueStore>) -> SessionManager {
        SessionManager::new(
            Arc::new(MockAuthProvider::new(Duration::from_secs(1))),
            store,
        )
    }

    #[tokio::test(start_paused = true)]
    async fn test_loading_flag_while_login_pending() {
        let manager = slow_manager(Arc::new(MemoryKeyValueStore::new()));
        manager.restore().await;
        assert!(!manager.is_loading());

        let (result, observed) = tokio::join!(manager.login("a@b.com", "pw"), async {
            tokio::task::yield_now().await;
            manager.is_loading()
        });
        assert!(result.is_ok());
        assert!(observed);
        assert!(!manager.is_loading());
    }

    #[tokio::test(start_paused = true)]
    async fn test_overlapping_logins_resolve_in_call_order() {
        let store = Arc::new(MemoryKeyValueStore::new());
        let manager = slow_manager(store.clone());

        let (first, second) = tokio::join!(
            manager.login("first@b.com", "pw"),
            manager.login("second@b.com", "pw")
        );
        assert!(first.is_ok() && second.is_ok());
        assert_eq!(manager.current_user().unwrap().email, "second@b.com");

        let raw = store.get(USER_STORAGE_KEY).await.unwrap().unwrap();
        assert_eq!(User::from_json(&raw).unwrap().email, "second@b.com");
    }

    #[tokio::test(start_paused = true)]
    async fn test_logout_called_after_login_wins() {
        let store = Arc::new(MemoryKeyValueStore::new());
        let manager = slow_manager(store.clone());

        let (login, ()) = tokio::join!(manager.login("a@b.com", "pw"), manager.logout());
        assert!(login.is_ok());
        assert!(!manager.is_authenticated());
        assert!(store.get(USER_STORAGE_KEY).await.unwrap().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_abandoned_login_still_completes() {
        let store = Arc::new(MemoryKeyValueStore::new());
        let manager = slow_manager(store.clone());
        manager.restore().await;

        let abandoned =
            tokio::time::timeout(Duration::from_millis(10), manager.login("a@b.com", "pw")).await;
        assert!(abandoned.is_err());
        assert!(manager.is_loading());

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert!(!manager.is_loading());
        assert_eq!(manager.current_user().unwrap().email, "a@b.com");
        let raw = store.get(USER_STORAGE_KEY).await.unwrap().unwrap();
        assert_eq!(User::from_json(&raw).unwrap(), manager.current_user().unwrap());
    }

    #[tokio::test(start_paused = true)]
    async fn test_operation_after_abandoned_login_waits_for_it() {
        let store = Arc::new(MemoryKeyValueStore::new());
        let manager = slow_manager(store.clone());

        let _ = tokio::time::timeout(
            Duration::from_millis(10),
            manager.register("Jane", "jane@x.com", "secret"),
        )
        .await;
        manager.logout().await;

        assert!(!manager.is_authenticated());
        assert!(store.get(USER_STORAGE_KEY).await.unwrap().is_none());
    }
}
