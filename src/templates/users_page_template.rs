use askama::Template;

use crate::models::UserRow;
use crate::templates::{BaseTemplate, NoticeView};

#[derive(Template)]
#[template(path = "users.html")]
pub struct UsersPageTemplate {
    pub api_hostname: String,
    pub base_url: String,
    pub notice: Option<NoticeView>,

    pub rows: Vec<UserRow>,
    pub search_text: String,
    pub role_filter: String,
    pub page: usize,
    pub page_count: usize,
    pub total: usize,
    pub prev_page: Option<usize>,
    pub next_page: Option<usize>,
    /// Pre-encoded `&search=...&role=...` suffix for pagination links.
    pub query_suffix: String,
    pub loading: bool,
    pub refreshing: bool,
    pub last_refreshed: Option<String>,
}

crate::impl_base_template!(UsersPageTemplate);
