use std::time::Duration;

#[cfg(not(feature = "local"))]
pub const ML_FEED_URL: &str = "https://yral-ml-feed-server.fly.dev";
#[cfg(feature = "local")]
pub const ML_FEED_URL: &str = "http://localhost:50051";

pub const RANKING_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
pub const RANKING_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
