pub mod auth;
pub mod avatar;
pub mod category;
pub mod comment;
pub mod content;
pub mod media;
pub mod tag;
