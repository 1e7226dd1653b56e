pub mod admin;
pub mod auth;
pub mod comments;
pub mod validation;

pub use admin::Stats;
pub use comments::{SortKey, SortOrder};
