pub mod api;
pub mod config;
pub mod console;
pub mod handlers;
pub mod models;
pub mod services;
pub mod templates;
pub mod utils;
