pub mod app_state;
pub mod role;
pub mod user_record;
pub mod user_row;

pub use app_state::AppState;
pub use role::{Role, RoleFilter};
pub use user_record::UserRecord;
pub use user_row::UserRow;
