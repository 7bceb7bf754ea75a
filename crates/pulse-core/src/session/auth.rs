//! Authentication authority.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::{PulseError, Result};
use crate::user::{DEFAULT_USER_ID, DEFAULT_USER_NAME, User};

/// Authority that turns credentials into a [`User`].
///
/// This is the extension point for a real backend. The session manager only
/// relies on the returned record; verification is entirely the provider's.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Signs in with existing credentials.
    ///
    /// # Errors
    ///
    /// Returns `PulseError::InvalidCredentials` when the credentials are rejected.
    async fn login(&self, email: &str, password: &str) -> Result<User>;

    /// Creates an account and signs in.
    ///
    /// # Errors
    ///
    /// Returns `PulseError::InvalidRegistrationData` when the data is rejected.
    async fn register(&self, name: &str, email: &str, password: &str) -> Result<User>;
}

/// Mocked authority: any non-empty credentials succeed after `latency`.
///
/// # Example
///
/// ```
/// use pulse_core::session::MockAuthProvider;
///
/// let provider = MockAuthProvider::instant();
/// assert!(provider.latency().is_zero());
/// ```
#[derive(Debug, Clone)]
pub struct MockAuthProvider {
    latency: Duration,
}

impl MockAuthProvider {
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }

    /// A provider that resolves without simulated latency.
    pub fn instant() -> Self {
        Self::new(Duration::ZERO)
    }

    pub fn latency(&self) -> Duration {
        self.latency
    }

    async fn round_trip(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}

impl Default for MockAuthProvider {
    fn default() -> Self {
        Self::new(Duration::from_secs(1))
    }
}

#[async_trait]
impl AuthProvider for MockAuthProvider {
    async fn login(&self, email: &str, password: &str) -> Result<User> {
        self.round_trip().await;

        if email.is_empty() || password.is_empty() {
            return Err(PulseError::InvalidCredentials);
        }
        Ok(User::new(DEFAULT_USER_ID, DEFAULT_USER_NAME, email))
    }

    async fn register(&self, name: &str, email: &str, password: &str) -> Result<User> {
        self.round_trip().await;

        if name.is_empty() || email.is_empty() || password.is_empty() {
            return Err(PulseError::InvalidRegistrationData);
        }
        Ok(User::new(DEFAULT_USER_ID, name, email))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_login_returns_default_profile() {
        let user = MockAuthProvider::instant()
            .login("a@b.com", "pw")
            .await
            .unwrap();
        assert_eq!(user, User::new("1", "John Doe", "a@b.com"));
    }

    #[tokio::test]
    async fn test_login_rejects_empty_fields() {
        let provider = MockAuthProvider::instant();
        assert_eq!(
            provider.login("", "pw").await.unwrap_err(),
            PulseError::InvalidCredentials
        );
        assert_eq!(
            provider.login("a@b.com", "").await.unwrap_err(),
            PulseError::InvalidCredentials
        );
    }

    #[tokio::test]
    async fn test_register_keeps_supplied_name() {
        let user = MockAuthProvider::instant()
            .register("Jane", "jane@x.com", "secret")
            .await
            .unwrap();
        assert_eq!(user.name, "Jane");
        assert_eq!(user.email, "jane@x.com");
        assert_eq!(user.id, DEFAULT_USER_ID);
    }

    #[tokio::test]
    async fn test_register_rejects_empty_fields() {
        let provider = MockAuthProvider::instant();
        for (name, email, password) in [("", "e@x.com", "pw"), ("n", "", "pw"), ("n", "e@x.com", "")] {
            assert_eq!(
                provider.register(name, email, password).await.unwrap_err(),
                PulseError::InvalidRegistrationData
            );
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_round_trip_waits_for_latency() {
        let provider = MockAuthProvider::new(Duration::from_secs(1));
        let started = tokio::time::Instant::now();
        provider.login("a@b.com", "pw").await.unwrap();
        assert!(started.elapsed() >= Duration::from_secs(1));
    }
}
