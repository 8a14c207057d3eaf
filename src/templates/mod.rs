// Base template trait for inheritance
pub mod base_template;
pub use base_template::{BaseTemplate, NoticeView};

// Individual template files
pub mod confirm_role_template;
pub mod users_page_template;

pub use confirm_role_template::ConfirmRoleTemplate;
pub use users_page_template::UsersPageTemplate;
