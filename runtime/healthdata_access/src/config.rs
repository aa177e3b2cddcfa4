use healthdata_session::Role;

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
/// Configure where users are sent when they can't see the page they asked for.
pub struct AccessConfig {
    /// Where anonymous users are redirected to.
    ///
    /// # Default
    ///
    /// `/login`
    #[serde(default = "default_login_path")]
    pub login_path: String,
    /// The landing page for doctors.
    ///
    /// # Default
    ///
    /// `/doctor/dashboard`
    #[serde(default = "default_doctor_home")]
    pub doctor_home: String,
    /// The landing page for staff members.
    ///
    /// # Default
    ///
    /// `/staff/dashboard`
    #[serde(default = "default_staff_home")]
    pub staff_home: String,
    /// What to do when an authenticated user asks for a path that
    /// doesn't match any entry in the route table.
    #[serde(default)]
    pub unmatched_routes: UnmatchedRoutePolicy,
}

impl Default for AccessConfig {
    fn default() -> Self {
        Self {
            login_path: default_login_path(),
            doctor_home: default_doctor_home(),
            staff_home: default_staff_home(),
            unmatched_routes: Default::default(),
        }
    }
}

impl AccessConfig {
    /// The landing page for the given role.
    pub fn home_for(&self, role: Role) -> &str {
        match role {
            Role::Doctor => &self.doctor_home,
            Role::Staff => &self.staff_home,
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
/// How to treat paths that match no entry in the route table.
pub enum UnmatchedRoutePolicy {
    /// Unknown paths are visible to every authenticated user.
    ///
    /// This is the default.
    #[default]
    Allow,
    /// Unknown paths redirect authenticated users to their landing page.
    Deny,
}

fn default_login_path() -> String {
    "/login".to_owned()
}

fn default_doctor_home() -> String {
    "/doctor/dashboard".to_owned()
}

fn default_staff_home() -> String {
    "/staff/dashboard".to_owned()
}
