use healthdata_session::AllowedRoles;

#[derive(Debug, Clone, PartialEq, Eq)]
/// A protected route, tagged with the roles that may visit it.
pub struct Route {
    /// The path pattern, using [`matchit`]'s syntax (e.g. `/patient/{id}`).
    pub pattern: String,
    /// The name of the view rendered for this route.
    pub name: String,
    pub allowed_roles: AllowedRoles,
}

impl Route {
    pub fn new(
        pattern: impl Into<String>,
        name: impl Into<String>,
        allowed_roles: AllowedRoles,
    ) -> Self {
        Self {
            pattern: pattern.into(),
            name: name.into(),
            allowed_roles,
        }
    }
}

/// The table of protected routes.
///
/// It maps a path to the [`Route`] it belongs to.
#[derive(Debug, Clone)]
pub struct RouteTable {
    router: matchit::Router<usize>,
    routes: Vec<Route>,
}

impl RouteTable {
    /// Build a route table.
    ///
    /// It fails if a pattern is invalid or conflicts with one registered earlier.
    pub fn new(routes: impl IntoIterator<Item = Route>) -> Result<Self, RouteTableError> {
        let mut router = matchit::Router::new();
        let routes: Vec<_> = routes.into_iter().collect();
        for (i, route) in routes.iter().enumerate() {
            router
                .insert(route.pattern.clone(), i)
                .map_err(|source| RouteTableError {
                    pattern: route.pattern.clone(),
                    source,
                })?;
        }
        Ok(Self { router, routes })
    }

    /// The protected routes of the HealthData application.
    pub fn healthdata() -> Result<Self, RouteTableError> {
        use AllowedRoles::*;

        Self::new([
            Route::new("/doctor", "doctor_area", DoctorOnly),
            Route::new("/doctor/{*rest}", "doctor_area", DoctorOnly),
            Route::new("/doctor/dashboard", "doctor_dashboard", DoctorOnly),
            Route::new("/doctor/upload", "doctor_upload", DoctorOnly),
            Route::new("/reports", "reports", Either),
            Route::new("/staff/dashboard", "staff_dashboard", Either),
            Route::new("/staff/upload", "staff_upload", StaffOnly),
            Route::new("/staff/upload/{*rest}", "staff_upload", StaffOnly),
            Route::new("/patients", "patients", Either),
            Route::new("/patient/{id}", "patient", Either),
            Route::new("/documents", "documents", Either),
            Route::new("/settings", "settings", Either),
        ])
    }

    /// Find the route matching `path`, if any.
    ///
    /// The path is [normalized](normalize_path) before the lookup.
    pub fn lookup(&self, path: &str) -> Option<&Route> {
        let matched = self.router.at(normalize_path(path)).ok()?;
        self.routes.get(*matched.value)
    }

    /// All registered routes, in registration order.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }
}

/// Strip the query string, the fragment and any trailing slash from `path`.
///
/// An empty path is treated as `/`.
pub fn normalize_path(path: &str) -> &str {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    let path = path[..end].trim_end_matches('/');
    if path.is_empty() { "/" } else { path }
}

#[derive(Debug, thiserror::Error)]
#[error("Failed to register the route pattern `{pattern}`")]
/// The error returned by [`RouteTable::new`].
pub struct RouteTableError {
    pub pattern: String,
    #[source]
    pub source: matchit::InsertError,
}
