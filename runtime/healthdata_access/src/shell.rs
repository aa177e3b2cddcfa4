use crate::guard::{AuthorizationGuard, GuardDecision, NavigationRequest};
use crate::menu::{CapabilityFilter, CapabilitySet};
use crate::routes::{Route, RouteTable, RouteTableError, normalize_path};
use crate::AccessConfig;
use healthdata_session::{Identity, SessionState};

/// The maximum number of redirects [`Shell::resolve`] follows before giving up.
const MAX_REDIRECTS: usize = 4;

#[derive(Debug, Clone)]
/// The application shell.
///
/// It ties together the route table, the navigation menu and the access
/// configuration, and decides what should be on screen for a given path.
pub struct Shell {
    routes: RouteTable,
    menu: CapabilityFilter,
    config: AccessConfig,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// What the shell renders.
pub enum Screen<'a> {
    /// The session is still being restored.
    Loading,
    /// The public login page.
    Login {
        /// Where the user was headed before being asked to log in.
        return_to: Option<String>,
    },
    /// A protected view, framed by the navigation menu and the header.
    View {
        route: &'a Route,
        menu: CapabilitySet<'a>,
        identity: &'a Identity,
    },
    /// No view is mounted for the requested path.
    NotFound { path: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// The outcome of a single navigation step.
pub enum Navigation<'a> {
    Render(Screen<'a>),
    Redirect {
        target: String,
        return_to: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// The outcome of [`Shell::resolve`].
pub struct Resolved<'a> {
    /// The path of the screen that ended up being rendered.
    pub path: String,
    pub screen: Screen<'a>,
}

impl Shell {
    pub fn new(routes: RouteTable, menu: CapabilityFilter, config: AccessConfig) -> Self {
        Self {
            routes,
            menu,
            config,
        }
    }

    /// The HealthData shell, using the given access configuration.
    pub fn healthdata(config: AccessConfig) -> Result<Self, RouteTableError> {
        Ok(Self::new(
            RouteTable::healthdata()?,
            CapabilityFilter::healthdata(),
            config,
        ))
    }

    pub fn guard(&self) -> AuthorizationGuard<'_> {
        AuthorizationGuard::new(&self.routes, &self.config)
    }

    pub fn config(&self) -> &AccessConfig {
        &self.config
    }

    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    /// The navigation menu for the current session.
    pub fn menu<'a>(&'a self, state: &'a SessionState) -> CapabilitySet<'a> {
        self.menu.menu(state.identity())
    }

    /// Take a single navigation step towards `path`.
    pub fn navigate<'a>(&'a self, state: &'a SessionState, path: &str) -> Navigation<'a> {
        let normalized = normalize_path(path);
        if normalized == "/" {
            return match state {
                SessionState::Uninitialized => Navigation::Render(Screen::Loading),
                SessionState::Anonymous => Navigation::Redirect {
                    target: self.config.login_path.clone(),
                    return_to: None,
                },
                SessionState::Authenticated(identity) => Navigation::Redirect {
                    target: self.config.home_for(identity.role()).to_owned(),
                    return_to: None,
                },
            };
        }
        if normalized == normalize_path(&self.config.login_path) {
            return Navigation::Render(Screen::Login { return_to: None });
        }

        match self.guard().evaluate(state, &NavigationRequest::new(path)) {
            GuardDecision::Pending => Navigation::Render(Screen::Loading),
            GuardDecision::RedirectTo { target, return_to } => {
                Navigation::Redirect { target, return_to }
            }
            GuardDecision::Allow => {
                let screen = match (self.routes.lookup(path), state.identity()) {
                    (Some(route), Some(identity)) => Screen::View {
                        route,
                        menu: self.menu(state),
                        identity,
                    },
                    _ => Screen::NotFound {
                        path: normalized.to_owned(),
                    },
                };
                Navigation::Render(screen)
            }
        }
    }

    /// Navigate to `path`, following redirects until a screen is rendered.
    ///
    /// The `return_to` of the first redirect is carried over to the login screen.
    pub fn resolve<'a>(
        &'a self,
        state: &'a SessionState,
        path: &str,
    ) -> Result<Resolved<'a>, ShellError> {
        let mut current = path.to_owned();
        let mut carried_return_to: Option<String> = None;
        let mut redirects = 0;
        loop {
            match self.navigate(state, &current) {
                Navigation::Render(screen) => {
                    let screen = match screen {
                        Screen::Login { return_to: None } => Screen::Login {
                            return_to: carried_return_to,
                        },
                        screen => screen,
                    };
                    return Ok(Resolved {
                        path: current,
                        screen,
                    });
                }
                Navigation::Redirect { target, return_to } => {
                    if redirects == MAX_REDIRECTS {
                        return Err(ShellError::RedirectLoop {
                            path: path.to_owned(),
                            hops: redirects,
                        });
                    }
                    redirects += 1;
                    tracing::trace!(from = %current, to = %target, "Following redirect");
                    if carried_return_to.is_none() {
                        carried_return_to = return_to;
                    }
                    current = target;
                }
            }
        }
    }

    /// Where to send `identity` right after a successful login.
    ///
    /// `return_to` is honoured if the user is allowed to see it,
    /// otherwise the user lands on their role's home page.
    pub fn post_login_destination(&self, identity: &Identity, return_to: Option<&str>) -> String {
        let home = self.config.home_for(identity.role());
        let Some(return_to) = return_to else {
            return home.to_owned();
        };
        let normalized = normalize_path(return_to);
        if normalized == "/" || normalized == normalize_path(&self.config.login_path) {
            return home.to_owned();
        }
        let state = SessionState::Authenticated(identity.clone());
        match self
            .guard()
            .evaluate(&state, &NavigationRequest::new(return_to))
        {
            GuardDecision::Allow => return_to.to_owned(),
            GuardDecision::Pending | GuardDecision::RedirectTo { .. } => home.to_owned(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
/// The error returned by [`Shell::resolve`].
pub enum ShellError {
    #[error("Navigating to `{path}` did not settle after {hops} redirects")]
    RedirectLoop { path: String, hops: usize },
}
