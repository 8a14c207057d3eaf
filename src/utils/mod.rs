pub mod url;

pub use url::{absolute_url, hostname_from_url};
