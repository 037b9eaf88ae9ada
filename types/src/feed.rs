use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Parameters for one ranked feed fetch.
///
/// `caller_principal` is empty for unauthenticated callers, the ranking
/// service decides what to serve them.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct FeedRequest {
    pub caller_principal: String,
    pub filtered_post_ids: BTreeSet<String>,
    pub num_results: u32,
}

impl FeedRequest {
    pub fn new(
        caller_principal: impl Into<String>,
        filtered_post_ids: impl IntoIterator<Item = String>,
        num_results: u32,
    ) -> Self {
        Self {
            caller_principal: caller_principal.into(),
            filtered_post_ids: filtered_post_ids.into_iter().collect(),
            num_results,
        }
    }
}
