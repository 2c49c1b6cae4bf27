pub mod hash;
pub mod jwt;
pub mod slug;
pub mod upload;
pub mod visibility;
