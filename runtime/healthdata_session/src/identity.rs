use crate::Role;
use crate::store_::errors::ValidationError;

/// How many characters of the user id end up in the derived display name.
const NAME_ID_PREFIX_LEN: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
/// The authenticated user: their id, display name and role.
///
/// An `Identity` always has a non-empty id, a non-empty name and a role.
/// "No role" is represented by the absence of an identity, never by an
/// identity with a missing role.
pub struct Identity {
    id: String,
    name: String,
    role: Role,
}

impl Identity {
    /// Build the identity for a user logging in with the given id and role.
    ///
    /// The display name is derived from the role and the first five characters
    /// of the id, e.g. `Dr. P1001` or `Staff S2002`.
    pub fn new(id: impl Into<String>, role: Role) -> Result<Self, ValidationError> {
        let id = id.into();
        if id.is_empty() {
            return Err(ValidationError::MissingId);
        }
        let name = derive_name(&id, role);
        Ok(Self { id, name, role })
    }

    /// Reassemble an identity from its persisted parts.
    ///
    /// Returns `None` if any of the invariants is violated.
    pub(crate) fn from_parts(id: String, name: String, role: Role) -> Option<Self> {
        if id.is_empty() || name.is_empty() {
            return None;
        }
        Some(Self { id, name, role })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn role(&self) -> Role {
        self.role
    }

    /// The first character of the display name, used for avatars.
    pub fn initial(&self) -> char {
        // The name is never empty.
        self.name.chars().next().unwrap_or('?')
    }
}

fn derive_name(id: &str, role: Role) -> String {
    let prefix: String = id.chars().take(NAME_ID_PREFIX_LEN).collect();
    match role {
        Role::Doctor => format!("Dr. {prefix}"),
        Role::Staff => format!("Staff {prefix}"),
    }
}
