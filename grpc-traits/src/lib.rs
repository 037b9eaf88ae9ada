use std::future::Future;

use thiserror::Error;
use types::{feed::FeedRequest, post::FeedCandidate};

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RankingError {
    /// The ranking service could not be reached, worth retrying
    #[error("ranking service unavailable: {0}")]
    Unavailable(String),
    /// The ranking service refused the request
    #[error("ranking request rejected: {0}")]
    Rejected(String),
}

impl RankingError {
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Unavailable(_))
    }
}

/// Source of ranked feed candidates.
///
/// Implementations must return candidates in ranking order and must not retry.
pub trait FeedRankingProvider {
    fn fetch_ranked(
        &self,
        request: &FeedRequest,
    ) -> impl Future<Output = Result<Vec<FeedCandidate>, RankingError>> + Send;
}

impl<T: FeedRankingProvider + Sync> FeedRankingProvider for &T {
    fn fetch_ranked(
        &self,
        request: &FeedRequest,
    ) -> impl Future<Output = Result<Vec<FeedCandidate>, RankingError>> + Send {
        (**self).fetch_ranked(request)
    }
}

impl<T: FeedRankingProvider + Send + Sync> FeedRankingProvider for std::sync::Arc<T> {
    fn fetch_ranked(
        &self,
        request: &FeedRequest,
    ) -> impl Future<Output = Result<Vec<FeedCandidate>, RankingError>> + Send {
        (**self).fetch_ranked(request)
    }
}
