use crate::{Identity, Role};
use std::borrow::Cow;

#[derive(serde::Deserialize, serde::Serialize)]
#[serde(deny_unknown_fields)]
/// The schema for the persisted session blob.
///
/// Anything that doesn't match this shape exactly is treated as "no session".
pub(crate) struct WireIdentity<'a> {
    pub(crate) id: Cow<'a, str>,
    pub(crate) name: Cow<'a, str>,
    pub(crate) role: Role,
}

impl<'a> From<&'a Identity> for WireIdentity<'a> {
    fn from(identity: &'a Identity) -> Self {
        Self {
            id: Cow::Borrowed(identity.id()),
            name: Cow::Borrowed(identity.name()),
            role: identity.role(),
        }
    }
}

impl WireIdentity<'static> {
    /// Parse a persisted record.
    ///
    /// The record must be a JSON object: serde's derived `Deserialize` would
    /// otherwise accept a sequence of the field values as well.
    pub(crate) fn parse(raw: &str) -> Result<Self, serde_json::Error> {
        let fields: serde_json::Map<String, serde_json::Value> = serde_json::from_str(raw)?;
        serde_json::from_value(serde_json::Value::Object(fields))
    }
}

impl WireIdentity<'_> {
    /// Convert into an [`Identity`], returning `None` if the record
    /// violates any of the identity invariants.
    pub(crate) fn into_identity(self) -> Option<Identity> {
        Identity::from_parts(self.id.into_owned(), self.name.into_owned(), self.role)
    }
}
