//! Feed retrieval for the yral app: ranked candidates from the ML feed,
//! enriched with post details from each publishing canister.

pub mod agent_wrapper;
pub mod canister;
pub mod config;
pub mod consts;
pub mod engine;
mod error;
pub mod identity;
pub mod like;
pub mod resolver;
pub mod session;
#[cfg(test)]
mod test_utils;

pub use error::*;

pub use canister::{IcPostCanister, PostCanister};
pub use config::FeedConfig;
pub use engine::{FeedEngine, FeedPage};
pub use identity::{IdentityProvider, WireIdentityProvider};
pub use like::LikeToggle;
pub use ml_feed_client::MlFeedClient;
pub use resolver::PostDetailResolver;
pub use session::FeedSession;
