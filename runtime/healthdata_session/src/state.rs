use crate::Identity;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Who is logged in, as far as the application knows.
pub enum SessionState {
    /// The persisted session has not been restored yet.
    Uninitialized,
    /// Nobody is logged in.
    Anonymous,
    /// A user is logged in.
    Authenticated(Identity),
}

impl SessionState {
    /// The current identity, if there is one.
    pub fn identity(&self) -> Option<&Identity> {
        match self {
            SessionState::Authenticated(identity) => Some(identity),
            SessionState::Uninitialized | SessionState::Anonymous => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionState::Authenticated(_))
    }

    /// `false` until the persisted session has been restored.
    pub fn is_ready(&self) -> bool {
        !matches!(self, SessionState::Uninitialized)
    }
}
