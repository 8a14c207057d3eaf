use serde::{Deserialize, Serialize};

use crate::models::Role;

/// One account as the Remote User Directory reports it. The local copy is
/// a read-mostly snapshot: replaced wholesale on every fetch, never patched.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub profile_image: Option<String>,
    /// Raw role string, preserved verbatim even when unrecognized.
    #[serde(default)]
    pub role: String,
}

impl UserRecord {
    pub fn role(&self) -> Role {
        Role::from_raw(&self.role)
    }

    /// `"firstName lastName"` with missing parts skipped; empty when
    /// neither is present.
    pub fn full_name(&self) -> String {
        let mut parts = Vec::new();
        if let Some(first) = self.first_name.as_deref() {
            if !first.trim().is_empty() {
                parts.push(first.trim());
            }
        }
        if let Some(last) = self.last_name.as_deref() {
            if !last.trim().is_empty() {
                parts.push(last.trim());
            }
        }
        parts.join(" ")
    }

    /// Display name with the username as fallback for records without
    /// name parts.
    pub fn display_name(&self) -> String {
        let full = self.full_name();
        if full.is_empty() {
            self.username.clone()
        } else {
            full
        }
    }
}
