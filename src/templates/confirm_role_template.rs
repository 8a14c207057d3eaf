use askama::Template;

use crate::templates::{BaseTemplate, NoticeView};

#[derive(Template)]
#[template(path = "confirm_role.html")]
pub struct ConfirmRoleTemplate {
    pub api_hostname: String,
    pub base_url: String,
    pub notice: Option<NoticeView>,

    pub username: String,
    pub display_name: String,
    pub current_role: String,
    pub roles: Vec<String>,
}

crate::impl_base_template!(ConfirmRoleTemplate);
