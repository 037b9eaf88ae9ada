use serde::{Deserialize, Serialize};

use super::sealed_metric::SealedMetric;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct LikeToggled {
    pub caller: String,
    pub post_id: u64,
    /// state reported back by the canister
    pub liked: bool,
}

impl SealedMetric for LikeToggled {
    fn tag(&self) -> String {
        "like_toggled".to_string()
    }

    fn user_id(&self) -> Option<String> {
        Some(self.caller.clone())
    }
}
