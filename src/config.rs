use std::env;
use std::path::Path;

// Default configuration constants
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_API_BASE_URL: &str = "";
pub const DEFAULT_API_TOKEN: &str = "";
pub const DEFAULT_PUBLIC_BASE_URL: &str = "";
pub const DEFAULT_PROFILE_BASE_URL: &str = "";
/// Username of the account that can never be edited through this console.
pub const DEFAULT_PROTECTED_USERNAME: &str = "protected-user";
/// Users shown per table page; fixed for the session.
pub const DEFAULT_PAGE_SIZE: usize = 10;
/// Seconds before a status notification auto-dismisses.
pub const NOTIFICATION_TTL_SECS: u64 = 5;

pub fn load_env_file(env_file: Option<&str>) {
    if let Some(path) = env_file {
        dotenvy::from_path(Path::new(path)).ok();
    } else {
        dotenvy::dotenv().ok();
    }
}

pub fn get_api_base_url() -> String {
    sanitize_base_url(&env::var("DIRECTORY_API_BASE_URL").unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string()))
}

pub fn get_api_token() -> String {
    env::var("DIRECTORY_API_TOKEN").unwrap_or_else(|_| DEFAULT_API_TOKEN.to_string())
}

pub fn get_public_base_url() -> String {
    sanitize_base_url(&env::var("PUBLIC_BASE_URL").unwrap_or_else(|_| DEFAULT_PUBLIC_BASE_URL.to_string()))
}

/// Base URL of the external profile pages the console hands usernames off to.
pub fn get_profile_base_url() -> String {
    sanitize_base_url(&env::var("PROFILE_BASE_URL").unwrap_or_else(|_| DEFAULT_PROFILE_BASE_URL.to_string()))
}

pub fn get_protected_username() -> String {
    let raw = env::var("PROTECTED_USERNAME").unwrap_or_default();
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        DEFAULT_PROTECTED_USERNAME.to_string()
    } else {
        trimmed.to_lowercase()
    }
}

pub fn sanitize_base_url(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        "http://localhost:5000".to_string()
    } else {
        trimmed.to_string()
    }
}
