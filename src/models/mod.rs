pub mod comment;
pub mod user;

pub use comment::{Category, Comment, CommentId, CommentPatch};
pub use user::{User, UserId, UserPatch};
