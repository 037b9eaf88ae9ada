use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::media::{thumbnail_url, video_url, MediaUrlError};

/// Ranked reference to a post, as returned by the ML feed
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct FeedCandidate {
    pub canister_id: String,
    pub post_id: u64,
}

impl FeedCandidate {
    pub fn new(canister_id: impl Into<String>, post_id: u64) -> Self {
        Self {
            canister_id: canister_id.into(),
            post_id,
        }
    }
}

impl Eq for FeedCandidate {}

impl PartialEq for FeedCandidate {
    fn eq(&self, other: &Self) -> bool {
        self.canister_id == other.canister_id && self.post_id == other.post_id
    }
}

impl Hash for FeedCandidate {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.canister_id.hash(state);
        self.post_id.hash(state);
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct PostDetail {
    pub video_reference_id: String,
    pub description: String,
    pub like_count: u64,
    pub liked_by_caller: bool,
    pub creator_profile_photo_url: Option<String>,
}

/// Display ready feed item
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct FeedResult {
    pub post_id: String,
    pub video_id: String,
    pub canister_id: String,
    pub video_url: Url,
    pub thumbnail_url: Url,
    pub description: String,
    pub profile_image_url: Option<Url>,
    pub like_count: u64,
    pub is_liked: bool,
}

impl FeedResult {
    /// Media URLs are derived from the video token with `cdn_prefix`.
    /// A malformed profile photo URL is dropped, malformed media URLs are an error
    pub fn from_parts(
        cdn_prefix: &str,
        candidate: &FeedCandidate,
        detail: PostDetail,
    ) -> Result<Self, MediaUrlError> {
        let video_url = video_url(cdn_prefix, &detail.video_reference_id)?;
        let thumbnail_url = thumbnail_url(cdn_prefix, &detail.video_reference_id)?;

        Ok(Self {
            post_id: candidate.post_id.to_string(),
            video_id: detail.video_reference_id,
            canister_id: candidate.canister_id.clone(),
            video_url,
            thumbnail_url,
            description: detail.description,
            profile_image_url: detail
                .creator_profile_photo_url
                .and_then(|url| Url::parse(&url).ok()),
            like_count: detail.like_count,
            is_liked: detail.liked_by_caller,
        })
    }

    /// `(canister_id, post_id)`, unique across the network
    pub fn key(&self) -> (&str, &str) {
        (&self.canister_id, &self.post_id)
    }
}
