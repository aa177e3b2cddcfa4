use crate::verifier::{AcceptAnyPassword, CredentialVerifier, Credentials};
use crate::wire::WireIdentity;
use crate::{Identity, Role, SessionConfig, SessionState, SessionStorage};
use errors::{LoginError, LogoutError, ValidationError};
use redact::Secret;
use tracing_log_error::log_error;

use crate::storage::errors::StoreError;

/// The single source of truth for "who is logged in".
///
/// `SessionStore` owns the current [`SessionState`] and keeps it in sync with
/// its durable copy in [`SessionStorage`]:
///
/// - [`restore`](Self::restore) loads the persisted session, exactly once, when the
///   application starts;
/// - [`login`](Self::login) and [`logout`](Self::logout) change the state and
///   persist the change before returning.
///
/// Whenever one of these methods returns, the in-memory state and the persisted
/// one agree.
#[derive(Debug)]
pub struct SessionStore {
    state: SessionState,
    storage: SessionStorage,
    storage_key: String,
    verifier: Box<dyn CredentialVerifier>,
}

impl SessionStore {
    /// Create a new session store on top of the given storage.
    ///
    /// The store starts [`Uninitialized`](SessionState::Uninitialized):
    /// call [`restore`](Self::restore) before evaluating any navigation.
    /// Credentials are checked with [`AcceptAnyPassword`] unless a different
    /// verifier is provided via [`with_verifier`](Self::with_verifier).
    pub fn new(storage: SessionStorage, config: &SessionConfig) -> Self {
        Self {
            state: SessionState::Uninitialized,
            storage,
            storage_key: config.storage_key(),
            verifier: Box::new(AcceptAnyPassword),
        }
    }

    /// Use `verifier` to check credentials on login.
    pub fn with_verifier<V>(mut self, verifier: V) -> Self
    where
        V: CredentialVerifier + 'static,
    {
        self.verifier = Box::new(verifier);
        self
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.state.identity()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.is_authenticated()
    }

    /// `true` once [`restore`](Self::restore) has completed. It never goes back to `false`.
    pub fn is_ready(&self) -> bool {
        self.state.is_ready()
    }

    /// The key the session is persisted under.
    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }

    /// Restore the persisted session, if there is one.
    ///
    /// A missing, unreadable or malformed record leaves the store
    /// [`Anonymous`](SessionState::Anonymous). This method never fails.
    ///
    /// Restoring happens at most once: subsequent calls leave the state untouched.
    #[tracing::instrument(
        name = "Restore persisted session",
        level = tracing::Level::DEBUG,
        skip_all
    )]
    pub fn restore(&mut self) -> &SessionState {
        if self.state.is_ready() {
            tracing::debug!("The session has already been restored, ignoring the request.");
            return &self.state;
        }
        self.state = match self.load_persisted() {
            Some(identity) => {
                tracing::debug!(user.id = %identity.id(), user.role = %identity.role(), "Restored persisted session");
                SessionState::Authenticated(identity)
            }
            None => SessionState::Anonymous,
        };
        &self.state
    }

    fn load_persisted(&self) -> Option<Identity> {
        let raw = match self.storage.load(&self.storage_key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                log_error!(
                    e,
                    level: tracing::Level::WARN,
                    "Failed to read the persisted session. Starting without a session."
                );
                return None;
            }
        };
        let wire = match WireIdentity::parse(&raw) {
            Ok(wire) => wire,
            Err(e) => {
                log_error!(
                    e,
                    level: tracing::Level::WARN,
                    "Invalid persisted session. Starting without a session."
                );
                return None;
            }
        };
        let identity = wire.into_identity();
        if identity.is_none() {
            tracing::warn!("The persisted session has an empty id or name. Starting without a session.");
        }
        identity
    }

    /// Log a user in.
    ///
    /// The id, the password and the role must all be provided. The password
    /// is handed over to the configured [`CredentialVerifier`].
    /// On success, the new identity is persisted and returned.
    /// On failure, the state is left unchanged.
    ///
    /// Logging in while another user is authenticated replaces their identity.
    #[tracing::instrument(name = "Log in", level = tracing::Level::DEBUG, skip_all)]
    pub fn login(
        &mut self,
        id: &str,
        password: &str,
        role: Option<Role>,
    ) -> Result<Identity, LoginError> {
        let outcome = self.try_login(id, password, role);
        match &outcome {
            Ok(identity) => {
                tracing::info!(user.id = %identity.id(), user.role = %identity.role(), "User logged in");
            }
            Err(e) => {
                tracing::info!(user.id = %id, reason = %e, "Login attempt rejected");
            }
        }
        outcome
    }

    fn try_login(
        &mut self,
        id: &str,
        password: &str,
        role: Option<Role>,
    ) -> Result<Identity, LoginError> {
        if !self.state.is_ready() {
            return Err(LoginError::NotReady);
        }
        let role = role.ok_or(ValidationError::MissingRole)?;
        let identity = Identity::new(id, role)?;
        if password.is_empty() {
            return Err(ValidationError::MissingPassword.into());
        }

        let password = Secret::new(password.to_owned());
        self.verifier.verify(&Credentials {
            id,
            password: &password,
            role,
        })?;

        let record =
            serde_json::to_string(&WireIdentity::from(&identity)).map_err(StoreError::from)?;
        self.storage.store(&self.storage_key, &record)?;
        self.state = SessionState::Authenticated(identity.clone());
        Ok(identity)
    }

    /// Log the current user out and delete the persisted session.
    ///
    /// Logging out when nobody is logged in is a no-op.
    #[tracing::instrument(name = "Log out", level = tracing::Level::DEBUG, skip_all)]
    pub fn logout(&mut self) -> Result<(), LogoutError> {
        if !self.state.is_ready() {
            return Err(LogoutError::NotReady);
        }
        self.storage.delete(&self.storage_key)?;
        if let SessionState::Authenticated(identity) = &self.state {
            tracing::info!(user.id = %identity.id(), "User logged out");
        }
        self.state = SessionState::Anonymous;
        Ok(())
    }
}

/// Errors that can occur when changing the session state.
pub mod errors {
    use crate::storage::errors::{DeleteError, StoreError};
    use crate::verifier::VerificationError;

    #[non_exhaustive]
    #[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
    /// The submitted credentials are incomplete.
    pub enum ValidationError {
        #[error("Please select a role")]
        MissingRole,
        #[error("Please enter your ID and password")]
        MissingId,
        #[error("Please enter your ID and password")]
        MissingPassword,
    }

    #[non_exhaustive]
    #[derive(Debug, thiserror::Error)]
    /// The error returned by [`SessionStore::login`][super::SessionStore::login].
    pub enum LoginError {
        /// The persisted session hasn't been restored yet.
        #[error("Cannot log in before the persisted session has been restored.")]
        NotReady,
        #[error(transparent)]
        Validation(#[from] ValidationError),
        #[error(transparent)]
        /// The credential verifier refused the credentials.
        Rejected(#[from] VerificationError),
        /// The new session could not be persisted.
        #[error("Failed to persist the new session.")]
        Storage(#[from] StoreError),
    }

    #[non_exhaustive]
    #[derive(Debug, thiserror::Error)]
    /// The error returned by [`SessionStore::logout`][super::SessionStore::logout].
    pub enum LogoutError {
        /// The persisted session hasn't been restored yet.
        #[error("Cannot log out before the persisted session has been restored.")]
        NotReady,
        /// The persisted session could not be deleted.
        #[error("Failed to delete the persisted session.")]
        Storage(#[from] DeleteError),
    }
}
