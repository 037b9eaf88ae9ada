pub mod delegated_identity;
pub mod feed;
pub mod media;
pub mod post;
