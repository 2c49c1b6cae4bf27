pub mod comment_status;
pub mod content_status;
mod parse;
pub mod storage;
pub mod user_role;

pub use comment_status::CommentStatus;
pub use content_status::ContentStatus;
pub use parse::ParseEnumError;
pub use user_role::UserRole;
