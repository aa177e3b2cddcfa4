use crate::Role;
use redact::Secret;

#[derive(Debug)]
/// The credentials submitted by a user trying to log in.
///
/// The password is wrapped in a [`Secret`] to keep it out of logs.
pub struct Credentials<'a> {
    pub id: &'a str,
    pub password: &'a Secret<String>,
    pub role: Role,
}

/// Decides whether a set of credentials is genuine.
///
/// [`SessionStore`](crate::SessionStore) validates the shape of the credentials
/// (non-empty id and password, a role) before calling the verifier.
pub trait CredentialVerifier: std::fmt::Debug + Send + Sync {
    fn verify(&self, credentials: &Credentials<'_>) -> Result<(), VerificationError>;
}

#[derive(Debug, Default, Clone, Copy)]
/// A verifier that accepts every (non-empty) password.
///
/// There is no identity provider behind the application shell yet:
/// this is the verifier used by default.
pub struct AcceptAnyPassword;

impl CredentialVerifier for AcceptAnyPassword {
    fn verify(&self, _credentials: &Credentials<'_>) -> Result<(), VerificationError> {
        Ok(())
    }
}

#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
/// The error returned by [`CredentialVerifier::verify`].
pub enum VerificationError {
    /// The credentials were checked and they don't match.
    #[error("Invalid credentials")]
    InvalidCredentials,
    /// The verifier could not reach a verdict.
    #[error("Failed to verify the submitted credentials.")]
    Other(#[source] anyhow::Error),
}
