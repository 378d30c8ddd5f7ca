//! Sign-in and role selection
//!
//! A failed sign-in blocks by default. The prototype let users through
//! regardless of the answer; that behavior is kept behind
//! [`LoginPolicy::Permissive`] and always logs a warning.

use crate::error::{Result, TranzrError};
use crate::service::BookingService;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Customer,
    Driver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginPolicy {
    #[default]
    Strict,
    Permissive,
}

impl LoginPolicy {
    pub fn from_flag(allow_failed_login: bool) -> Self {
        if allow_failed_login {
            LoginPolicy::Permissive
        } else {
            LoginPolicy::Strict
        }
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

/// How a sign-in ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignIn {
    Accepted,
    /// Refused by the service but let through by a permissive policy
    Overridden,
}

#[derive(Debug, Clone)]
pub struct Session {
    role: Role,
    policy: LoginPolicy,
    credentials: Option<Credentials>,
    authenticated: bool,
}

impl Session {
    pub fn new(role: Role, policy: LoginPolicy) -> Self {
        Self {
            role,
            policy,
            credentials: None,
            authenticated: false,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    pub fn has_credentials(&self) -> bool {
        self.credentials.is_some()
    }

    /// Store credentials for a later sign-in; clears any previous sign-in
    pub fn set_credentials(&mut self, credentials: Credentials) {
        self.credentials = Some(credentials);
        self.authenticated = false;
    }

    /// Sign in with the stored credentials
    pub async fn sign_in(&mut self, service: &dyn BookingService) -> Result<SignIn> {
        let credentials = self
            .credentials
            .clone()
            .ok_or_else(|| TranzrError::Validation("Sign in to continue".into()))?;

        let accepted = service
            .authenticate(&credentials.email, &credentials.password)
            .await?;

        if accepted {
            tracing::info!(email = %credentials.email, role = ?self.role, "signed in");
            self.authenticated = true;
            return Ok(SignIn::Accepted);
        }

        match self.policy {
            LoginPolicy::Strict => {
                tracing::warn!(email = %credentials.email, "sign-in refused");
                Err(TranzrError::AuthenticationFailed(credentials.email))
            }
            LoginPolicy::Permissive => {
                tracing::warn!(
                    email = %credentials.email,
                    "sign-in refused by the service, continuing because failed logins are allowed"
                );
                self.authenticated = true;
                Ok(SignIn::Overridden)
            }
        }
    }

    /// Create an account. Name, email and password must be non-blank.
    pub async fn register(
        &mut self,
        service: &dyn BookingService,
        name: &str,
        credentials: Credentials,
    ) -> Result<SignIn> {
        if name.trim().is_empty() {
            return Err(TranzrError::Validation("Enter your name to create an account".into()));
        }
        if credentials.email.trim().is_empty() || credentials.password.trim().is_empty() {
            return Err(TranzrError::Validation(
                "Enter an email and password to create an account".into(),
            ));
        }

        tracing::info!(name = name.trim(), "registering account");
        self.set_credentials(credentials);
        self.sign_in(service).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::MockBookingService;

    #[tokio::test]
    async fn test_sign_in_accepted() {
        let service = MockBookingService::instant();
        let mut session = Session::new(Role::Customer, LoginPolicy::Strict);
        session.set_credentials(Credentials::new("jo@example.com", "pw"));

        assert_eq!(session.sign_in(&service).await.unwrap(), SignIn::Accepted);
        assert!(session.is_authenticated());
    }

    #[tokio::test]
    async fn test_strict_policy_blocks_refused_sign_in() {
        let service = MockBookingService::instant();
        let mut session = Session::new(Role::Driver, LoginPolicy::Strict);
        session.set_credentials(Credentials::new("jo@example.com", ""));

        let err = session.sign_in(&service).await.unwrap_err();
        assert!(matches!(err, TranzrError::AuthenticationFailed(_)));
        assert!(!session.is_authenticated());
    }

    #[tokio::test]
    async fn test_permissive_policy_overrides() {
        let service = MockBookingService::instant();
        let mut session = Session::new(Role::Driver, LoginPolicy::Permissive);
        session.set_credentials(Credentials::new("", ""));

        assert_eq!(session.sign_in(&service).await.unwrap(), SignIn::Overridden);
        assert!(session.is_authenticated());
    }

    #[tokio::test]
    async fn test_sign_in_without_credentials() {
        let service = MockBookingService::instant();
        let mut session = Session::new(Role::Customer, LoginPolicy::Strict);
        assert!(matches!(
            session.sign_in(&service).await,
            Err(TranzrError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_register_requires_name() {
        let service = MockBookingService::instant();
        let mut session = Session::new(Role::Customer, LoginPolicy::Strict);

        let err = session
            .register(&service, " ", Credentials::new("jo@example.com", "pw"))
            .await
            .unwrap_err();
        assert!(matches!(err, TranzrError::Validation(_)));
        assert!(!session.has_credentials());

        session
            .register(&service, "Jo", Credentials::new("jo@example.com", "pw"))
            .await
            .unwrap();
        assert!(session.is_authenticated());
    }

    #[test]
    fn test_credentials_debug_hides_password() {
        let debug = format!("{:?}", Credentials::new("jo@example.com", "hunter2"));
        assert!(!debug.contains("hunter2"));
    }
}
