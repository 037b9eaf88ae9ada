use serde::{Deserialize, Serialize};

use super::sealed_metric::SealedMetric;

/// One ranked page handed to the UI
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct FeedPageServed {
    /// empty for unauthenticated callers
    pub caller: String,
    pub requested: u32,
    pub ranked: u32,
    pub resolved: u32,
    pub dropped: u32,
}

impl SealedMetric for FeedPageServed {
    fn tag(&self) -> String {
        "feed_page_served".to_string()
    }

    fn user_id(&self) -> Option<String> {
        (!self.caller.is_empty()).then(|| self.caller.clone())
    }
}
