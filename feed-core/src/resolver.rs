use candid::Principal;
use types::post::{FeedCandidate, PostDetail};

use crate::{canister::PostCanister, identity::IdentityProvider, Error, Result};

/// Fetches the details behind a single ranked candidate.
///
/// Holds no per call state, so [`PostDetailResolver::resolve`]
/// may run concurrently for any number of candidates.
pub struct PostDetailResolver<I, C> {
    identity: I,
    canisters: C,
}

impl<I: IdentityProvider, C: PostCanister> PostDetailResolver<I, C> {
    pub fn new(identity: I, canisters: C) -> Self {
        Self {
            identity,
            canisters,
        }
    }

    pub fn identity(&self) -> &I {
        &self.identity
    }

    pub async fn resolve(&self, candidate: &FeedCandidate) -> Result<PostDetail> {
        // minted per candidate, even when canisters repeat
        let identity = self.identity.mint_delegated_identity().await?;
        let canister = Principal::from_text(&candidate.canister_id).map_err(|e| {
            Error::ActorConstructionFailed {
                canister: candidate.canister_id.clone(),
                reason: e.to_string(),
            }
        })?;

        self.canisters
            .post_details(canister, identity, candidate.post_id)
            .await
    }
}
