use crate::models::{RoleFilter, UserRecord};

/// Derive the visible subset of the collection. Pure and order-preserving:
/// the output is always a subsequence of `users` in arrival order. Role
/// filter is applied first (typically more selective), then a
/// case-insensitive substring match of the trimmed search text against the
/// username, the email, and the concatenated full name. Blank search text
/// filters nothing.
pub fn filter_users<'a>(users: &'a [UserRecord], search_text: &str, role_filter: RoleFilter) -> Vec<&'a UserRecord> {
    let needle = search_text.trim().to_lowercase();
    users
        .iter()
        .filter(|u| role_filter.matches(u.role()))
        .filter(|u| matches_search(u, &needle))
        .collect()
}

fn matches_search(user: &UserRecord, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    if user.username.to_lowercase().contains(needle) {
        return true;
    }
    if let Some(email) = user.email.as_deref() {
        if email.to_lowercase().contains(needle) {
            return true;
        }
    }
    user.full_name().to_lowercase().contains(needle)
}
