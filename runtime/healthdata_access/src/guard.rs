use crate::{AccessConfig, RouteTable, UnmatchedRoutePolicy, routes::normalize_path};
use healthdata_session::SessionState;

#[derive(Debug, Clone, PartialEq, Eq)]
/// A navigation attempt.
pub struct NavigationRequest {
    pub path: String,
}

impl NavigationRequest {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// The outcome of [`AuthorizationGuard::evaluate`].
pub enum GuardDecision {
    /// The session hasn't been restored yet: show a loading indicator.
    Pending,
    /// Navigate to `target` instead of the requested path.
    RedirectTo {
        target: String,
        /// The path that was originally requested, if the user may want
        /// to go back to it after logging in.
        return_to: Option<String>,
    },
    /// Render the requested view.
    Allow,
}

#[derive(Debug, Clone, Copy)]
/// Decides whether the current user may see the page they asked for.
///
/// The guard holds no state of its own: every decision is computed from the
/// session state and the requested path.
///
/// - Before the session is restored, the decision is [`GuardDecision::Pending`].
/// - Anonymous users are redirected to the login page.
/// - Authenticated users are redirected to their landing page if the route
///   doesn't allow their role.
pub struct AuthorizationGuard<'a> {
    routes: &'a RouteTable,
    config: &'a AccessConfig,
}

impl<'a> AuthorizationGuard<'a> {
    pub fn new(routes: &'a RouteTable, config: &'a AccessConfig) -> Self {
        Self { routes, config }
    }

    pub fn evaluate(&self, state: &SessionState, request: &NavigationRequest) -> GuardDecision {
        let identity = match state {
            SessionState::Uninitialized => return GuardDecision::Pending,
            SessionState::Anonymous => {
                tracing::debug!(url.path = %request.path, "Access denied: user not authenticated");
                return GuardDecision::RedirectTo {
                    target: self.config.login_path.clone(),
                    return_to: Some(request.path.clone()),
                };
            }
            SessionState::Authenticated(identity) => identity,
        };

        let role = identity.role();
        let allowed = match self.routes.lookup(&request.path) {
            Some(route) => route.allowed_roles.permits(role),
            None => {
                tracing::trace!(
                    url.path = %normalize_path(&request.path),
                    "No route matches the requested path, applying the unmatched route policy"
                );
                self.config.unmatched_routes == UnmatchedRoutePolicy::Allow
            }
        };
        if allowed {
            GuardDecision::Allow
        } else {
            tracing::debug!(
                url.path = %request.path,
                user.role = %role,
                "Access denied: the route is not available to the user's role"
            );
            GuardDecision::RedirectTo {
                target: self.config.home_for(role).to_owned(),
                return_to: None,
            }
        }
    }
}
