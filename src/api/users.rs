use serde_json::{json, Value};

use crate::models::{Role, UserRecord};

use super::client::api_call;
use super::error::ApiError;

/// Fetch the entire user collection. The directory does no server-side
/// filtering or paging in this design; the console derives both locally.
/// The payload may be a bare array or wrapped in a `data` envelope.
pub async fn load_users(
    client: &reqwest::Client,
    api_base_url: &str,
    api_token: &str,
) -> Result<Vec<UserRecord>, ApiError> {
    let payload = api_call(client, api_base_url, api_token, "GET", "/users", None).await?;
    let arr = payload
        .as_array()
        .or_else(|| payload.get("data").and_then(|d| d.as_array()))
        .or_else(|| payload.get("users").and_then(|d| d.as_array()))
        .ok_or_else(|| ApiError::Malformed("expected an array of users".into()))?;
    Ok(arr.iter().filter_map(user_from_value).collect())
}

/// Change one user's role. Any 2xx is success; no response body is
/// consumed beyond the status signal.
pub async fn update_user_role(
    client: &reqwest::Client,
    api_base_url: &str,
    api_token: &str,
    user_id: &str,
    role: Role,
) -> Result<(), ApiError> {
    let endpoint = format!("/users/{}/role", user_id);
    api_call(
        client,
        api_base_url,
        api_token,
        "PUT",
        &endpoint,
        Some(json!({ "role": role.as_str() })),
    )
    .await?;
    Ok(())
}

/// Tolerant record parse. Records without an id or username are skipped;
/// every optional field falls back to `None` instead of failing the whole
/// fetch. Ids arrive as strings or numbers depending on the backend.
pub fn user_from_value(value: &Value) -> Option<UserRecord> {
    let obj = value.as_object()?;

    let id = match obj.get("id") {
        Some(Value::String(s)) if !s.trim().is_empty() => s.trim().to_string(),
        Some(Value::Number(n)) => n.to_string(),
        _ => return None,
    };
    let username = obj
        .get("username")
        .and_then(|v| v.as_str())
        .map(str::trim)
        .filter(|s| !s.is_empty())?
        .to_string();

    let text_field = |camel: &str, snake: &str| -> Option<String> {
        obj.get(camel)
            .or_else(|| obj.get(snake))
            .and_then(|v| v.as_str())
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    };

    let role = obj
        .get("role")
        .and_then(|v| v.as_str())
        .unwrap_or(Role::User.as_str())
        .to_string();

    Some(UserRecord {
        id,
        username,
        first_name: text_field("firstName", "first_name"),
        last_name: text_field("lastName", "last_name"),
        email: text_field("email", "email"),
        profile_image: text_field("profileImage", "profile_image"),
        role,
    })
}
