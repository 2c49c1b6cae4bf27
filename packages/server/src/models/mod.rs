pub mod auth;
pub mod category;
pub mod comment;
pub mod content;
pub mod media;
pub mod shared;
pub mod tag;
