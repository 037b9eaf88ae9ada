use grpc_traits::RankingError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("{0}")]
    Ranking(#[from] RankingError),
    #[error("failed to mint delegated identity: {0}")]
    IdentityUnavailable(String),
    #[error("failed to construct actor for canister {canister}: {reason}")]
    ActorConstructionFailed { canister: String, reason: String },
    #[error("failed to fetch post details: {0}")]
    DetailFetchFailed(String),
    #[error("post {post_id} not found in canister {canister}")]
    PostNotFound { canister: String, post_id: u64 },
    #[error("invalid media url: {0}")]
    InvalidMediaUrl(#[from] types::media::MediaUrlError),
    #[error("authentication failed: {0}")]
    AuthenticationFailed(String),
    #[error("failed to toggle like: {0}")]
    ToggleFailed(String),
}

impl Error {
    /// Failures scoped to a single feed candidate,
    /// these drop the candidate instead of failing the page
    pub fn is_soft(&self) -> bool {
        matches!(
            self,
            Self::IdentityUnavailable(_)
                | Self::ActorConstructionFailed { .. }
                | Self::DetailFetchFailed(_)
                | Self::PostNotFound { .. }
                | Self::InvalidMediaUrl(_)
        )
    }

    /// Network class failures, as opposed to rejections
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Ranking(e) => e.is_retryable(),
            Self::DetailFetchFailed(_) | Self::ToggleFailed(_) => true,
            _ => false,
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
