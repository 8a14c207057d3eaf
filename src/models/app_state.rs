use std::sync::{Arc, Mutex};

use crate::console::Console;

#[derive(Clone)]
pub struct AppState {
    /// The console core (snapshot, workflow, notifier). Single writer per
    /// concern; everything else reads through this lock.
    pub console: Arc<Mutex<Console>>,
    pub api_base_url: String,
    pub api_token: String,
    pub public_base_url: String,
    /// External profile pages; `/users/:username/profile` redirects here.
    pub profile_base_url: String,
    pub client: reqwest::Client,
    pub custom_css: Option<String>,
}
