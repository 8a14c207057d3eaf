use serde::{Deserialize, Serialize};

use crate::models::UserRecord;

/// Flattened table-row projection of a [`UserRecord`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRow {
    pub id: String,
    pub username: String,
    pub display_name: String,
    pub email: String,
    pub role_label: String,
    pub protected: bool,
}

impl UserRow {
    pub fn from_record(rec: &UserRecord, protected_username: &str) -> Self {
        UserRow {
            id: rec.id.clone(),
            username: rec.username.clone(),
            display_name: rec.display_name(),
            email: rec.email.clone().unwrap_or_default(),
            role_label: rec.role().as_str().to_string(),
            protected: rec.username.eq_ignore_ascii_case(protected_username),
        }
    }
}
