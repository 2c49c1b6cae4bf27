pub mod category;
pub mod comment;
pub mod content;
pub mod content_tag;
pub mod media;
pub mod tag;
pub mod user;
