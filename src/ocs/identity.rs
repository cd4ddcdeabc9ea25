//! User identifiers as rendered inside OCS payloads.

use serde::{Deserialize, Serialize};

/// Identifier of a user as issued by an identity provider.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserId {
    /// Identity provider. Empty for local users.
    #[serde(default)]
    pub idp: String,

    pub opaque_id: String,
}

impl UserId {
    pub fn new(opaque_id: impl Into<String>, idp: impl Into<String>) -> Self {
        Self {
            idp: idp.into(),
            opaque_id: opaque_id.into(),
        }
    }
}

/// Render a user id as `<opaque id>[@<idp>]`.
///
/// An absent id, or one with an empty opaque id, renders as `""`.
pub fn user_id_to_string(user_id: Option<&UserId>) -> String {
    match user_id {
        Some(id) if !id.opaque_id.is_empty() => {
            if id.idp.is_empty() {
                id.opaque_id.clone()
            } else {
                format!("{}@{}", id.opaque_id, id.idp)
            }
        }
        _ => String::new(),
    }
}
