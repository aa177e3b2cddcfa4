use healthdata_session::{AllowedRoles, Identity};
use std::fmt::Formatter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
/// The icon shown next to a menu entry.
pub enum Icon {
    Home,
    Users,
    FileText,
    Upload,
    ClipboardList,
    Settings,
}

impl Icon {
    pub fn as_str(&self) -> &'static str {
        match self {
            Icon::Home => "home",
            Icon::Users => "users",
            Icon::FileText => "file-text",
            Icon::Upload => "upload",
            Icon::ClipboardList => "clipboard-list",
            Icon::Settings => "settings",
        }
    }
}

impl std::fmt::Display for Icon {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// An entry in the navigation menu.
pub struct MenuEntry {
    pub label: String,
    pub path: String,
    pub icon: Icon,
    pub allowed_roles: AllowedRoles,
}

impl MenuEntry {
    pub fn new(
        label: impl Into<String>,
        path: impl Into<String>,
        icon: Icon,
        allowed_roles: AllowedRoles,
    ) -> Self {
        Self {
            label: label.into(),
            path: path.into(),
            icon,
            allowed_roles,
        }
    }
}

#[derive(Debug, Clone)]
/// Derives the navigation menu a user is entitled to from a master list of entries.
///
/// The relative order of the master list is preserved.
pub struct CapabilityFilter {
    master: Vec<MenuEntry>,
}

impl CapabilityFilter {
    pub fn new(master: impl IntoIterator<Item = MenuEntry>) -> Self {
        Self {
            master: master.into_iter().collect(),
        }
    }

    /// The navigation menu of the HealthData application.
    pub fn healthdata() -> Self {
        use AllowedRoles::*;

        Self::new([
            MenuEntry::new("Dashboard", "/doctor/dashboard", Icon::Home, DoctorOnly),
            MenuEntry::new("Dashboard", "/staff/dashboard", Icon::Home, StaffOnly),
            MenuEntry::new("Patients", "/patients", Icon::Users, Either),
            MenuEntry::new("Documents", "/documents", Icon::FileText, Either),
            MenuEntry::new("Upload", "/doctor/upload", Icon::Upload, DoctorOnly),
            MenuEntry::new("Upload", "/staff/upload", Icon::Upload, StaffOnly),
            MenuEntry::new("Reports", "/reports", Icon::ClipboardList, DoctorOnly),
            MenuEntry::new("Settings", "/settings", Icon::Settings, Either),
        ])
    }

    /// The entries visible to `identity`.
    ///
    /// Anonymous users get an empty menu.
    pub fn menu(&self, identity: Option<&Identity>) -> CapabilitySet<'_> {
        let Some(identity) = identity else {
            return CapabilitySet(Vec::new());
        };
        let role = identity.role();
        CapabilitySet(
            self.master
                .iter()
                .filter(|entry| entry.allowed_roles.permits(role))
                .collect(),
        )
    }

    pub fn master_list(&self) -> &[MenuEntry] {
        &self.master
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// The menu entries available to a user, in display order.
pub struct CapabilitySet<'a>(Vec<&'a MenuEntry>);

impl<'a> CapabilitySet<'a> {
    pub fn iter(&self) -> impl Iterator<Item = &'a MenuEntry> + '_ {
        self.0.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether `path` is one of the entries' destinations.
    pub fn contains_path(&self, path: &str) -> bool {
        self.0.iter().any(|entry| entry.path == path)
    }
}

impl<'a> IntoIterator for CapabilitySet<'a> {
    type Item = &'a MenuEntry;
    type IntoIter = std::vec::IntoIter<&'a MenuEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
