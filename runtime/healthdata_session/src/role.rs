use std::fmt::{Display, Formatter};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
/// The role a user authenticates into.
///
/// The role determines which routes a user may visit and which
/// navigation entries are shown to them.
pub enum Role {
    Doctor,
    Staff,
}

impl Role {
    /// The canonical (lowercase) representation, as persisted in the session blob.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Doctor => "doctor",
            Role::Staff => "staff",
        }
    }

    /// A human-readable label, suitable for a user menu.
    pub fn label(&self) -> &'static str {
        match self {
            Role::Doctor => "Doctor",
            Role::Staff => "Staff",
        }
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = UnknownRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "doctor" => Ok(Role::Doctor),
            "staff" => Ok(Role::Staff),
            s => Err(UnknownRoleError { role: s.to_owned() }),
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("`{role}` is not a known role. Expected either `doctor` or `staff`.")]
/// The error returned when parsing a [`Role`] from an unknown string.
pub struct UnknownRoleError {
    pub role: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
/// The set of roles allowed to see a route or a navigation entry.
///
/// Route tables and menus are tagged with the same vocabulary, but they are
/// authored independently: a route can be reachable without being listed
/// in the menu, and vice versa.
pub enum AllowedRoles {
    DoctorOnly,
    StaffOnly,
    Either,
}

impl AllowedRoles {
    /// Returns `true` if `role` belongs to this set.
    pub fn permits(&self, role: Role) -> bool {
        match self {
            AllowedRoles::DoctorOnly => role == Role::Doctor,
            AllowedRoles::StaffOnly => role == Role::Staff,
            AllowedRoles::Either => true,
        }
    }
}
