#[cfg(feature = "local")]
mod local;
#[cfg(not(feature = "local"))]
mod remote;

#[cfg(feature = "local")]
pub use local::*;
#[cfg(not(feature = "local"))]
pub use remote::*;

pub use ml_feed_client::consts::ML_FEED_URL;
pub use types::media::CDN_PREFIX;

pub const DEFAULT_MAX_CONCURRENT_RESOLUTIONS: usize = 32;
pub const MAX_CONCURRENT_RESOLUTIONS_ENV: &str = "FEED_MAX_CONCURRENT_RESOLUTIONS";

/// Posts remembered per session, oldest are forgotten first
pub const MAX_SESSION_HISTORY: usize = 1000;
