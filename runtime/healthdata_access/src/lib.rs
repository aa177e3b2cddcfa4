//! Route authorization and role-based navigation for the HealthData application shell.
//!
//! - [`AuthorizationGuard`] decides whether the current session may see a given path.
//! - [`CapabilityFilter`] derives the navigation menu a user is entitled to.
//! - [`Shell`] combines both, following redirects until a [`Screen`] is rendered.
//!
//! Routes and menu entries are tagged with [`AllowedRoles`](healthdata_session::AllowedRoles),
//! but they are authored independently.
mod config;
mod guard;
mod menu;
mod routes;
mod shell;

pub use config::{AccessConfig, UnmatchedRoutePolicy};
pub use guard::{AuthorizationGuard, GuardDecision, NavigationRequest};
pub use menu::{CapabilityFilter, CapabilitySet, Icon, MenuEntry};
pub use routes::{Route, RouteTable, RouteTableError, normalize_path};
pub use shell::{Navigation, Resolved, Screen, Shell, ShellError};
