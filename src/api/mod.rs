// Remote User Directory client
pub mod client;
pub mod error;
pub mod users;

// Re-export commonly used functions
pub use client::api_call;
pub use error::ApiError;
pub use users::{load_users, update_user_role, user_from_value};
