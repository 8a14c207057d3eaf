pub mod directory_service;

// Re-export commonly used functions
pub use directory_service::{commit_role_change, ensure_loaded, load_directory};
