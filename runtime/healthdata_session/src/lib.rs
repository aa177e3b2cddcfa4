/*!
Session management for the HealthData application shell.

# Sessions

A user logs into the application as either a [`Role::Doctor`] or a [`Role::Staff`]
member. The resulting [`Identity`] is kept by the [`SessionStore`], which is the only
component allowed to change it.

The session survives restarts: the identity is persisted, as a small JSON record, in a
[`SessionStorage`] scoped to the current user profile. When the application starts, the
store is [`restored`](SessionStore::restore) from that record.

# Lifecycle

A [`SessionStore`] is always in one of three states (see [`SessionState`]):

- `Uninitialized`, until the persisted session has been restored;
- `Anonymous`, when nobody is logged in;
- `Authenticated`, when a user is logged in.

Restoring moves the store out of `Uninitialized`, exactly once.
Afterwards, [`login`](SessionStore::login) and [`logout`](SessionStore::logout)
move it between `Anonymous` and `Authenticated`.

# Persisted format

The session is stored under `<namespace>.session` (see [`SessionConfig`]) as:

```json
{ "id": "P1001", "name": "Dr. P1001", "role": "doctor" }
```

Records that don't match this shape are ignored: the store starts `Anonymous`.
*/
mod identity;
mod role;
mod state;
mod storage_;
mod store_;
mod verifier;
pub(crate) mod wire;

pub use identity::Identity;
pub use role::{AllowedRoles, Role, UnknownRoleError};
pub use state::SessionState;
pub use storage_::SessionStorage;
pub use store_::SessionStore;
pub use verifier::{AcceptAnyPassword, CredentialVerifier, Credentials, VerificationError};

pub mod storage {
    //! Types and traits related to [`SessionStorage`][super::SessionStorage].
    pub use crate::storage_::SessionStorageBackend;
    pub use crate::storage_::errors;
}

pub mod errors {
    //! Errors returned when logging in or out.
    pub use crate::store_::errors::*;
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
/// Configure how sessions are persisted.
pub struct SessionConfig {
    /// The namespace of the storage key.
    ///
    /// The session is persisted under `<namespace>.session`.
    ///
    /// # Default
    ///
    /// `healthdata`, i.e. the session key is `healthdata.session`.
    #[serde(default = "default_namespace")]
    pub namespace: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            namespace: default_namespace(),
        }
    }
}

impl SessionConfig {
    /// The key the session record is persisted under.
    pub fn storage_key(&self) -> String {
        format!("{}.session", self.namespace)
    }
}

fn default_namespace() -> String {
    "healthdata".to_owned()
}
