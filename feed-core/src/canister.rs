use std::{future::Future, sync::Arc};

use candid::Principal;
use canisters_client::individual_user_template::{
    IndividualUserTemplate, PostDetailsForFrontend, PostStatus,
};
use ic_agent::Identity;
use types::post::PostDetail;

use crate::{agent_wrapper::AgentWrapper, consts::AGENT_URL, Error, Result};

/// Calls against the canister hosting a user's posts
pub trait PostCanister: Send + Sync {
    fn post_details(
        &self,
        canister: Principal,
        identity: Arc<dyn Identity>,
        post_id: u64,
    ) -> impl Future<Output = Result<PostDetail>> + Send;

    /// Returns the like state after toggling, as reported by the canister
    fn toggle_like(
        &self,
        canister: Principal,
        identity: Arc<dyn Identity>,
        post_id: u64,
    ) -> impl Future<Output = Result<bool>> + Send;
}

impl<T: PostCanister> PostCanister for Arc<T> {
    fn post_details(
        &self,
        canister: Principal,
        identity: Arc<dyn Identity>,
        post_id: u64,
    ) -> impl Future<Output = Result<PostDetail>> + Send {
        (**self).post_details(canister, identity, post_id)
    }

    fn toggle_like(
        &self,
        canister: Principal,
        identity: Arc<dyn Identity>,
        post_id: u64,
    ) -> impl Future<Output = Result<bool>> + Send {
        (**self).toggle_like(canister, identity, post_id)
    }
}

#[derive(Clone, Debug)]
pub struct IcPostCanister {
    agent_url: String,
}

impl Default for IcPostCanister {
    fn default() -> Self {
        Self::new(AGENT_URL)
    }
}

impl IcPostCanister {
    pub fn new(agent_url: impl Into<String>) -> Self {
        Self {
            agent_url: agent_url.into(),
        }
    }

    async fn agent(&self, canister: Principal, identity: Arc<dyn Identity>) -> Result<AgentWrapper> {
        AgentWrapper::build(&self.agent_url, identity)
            .await
            .map_err(|e| Error::ActorConstructionFailed {
                canister: canister.to_text(),
                reason: e.to_string(),
            })
    }
}

impl PostCanister for IcPostCanister {
    async fn post_details(
        &self,
        canister: Principal,
        identity: Arc<dyn Identity>,
        post_id: u64,
    ) -> Result<PostDetail> {
        let agent = self.agent(canister, identity).await?;
        let user = IndividualUserTemplate(canister, agent.get_agent());
        let details = user
            .get_individual_post_details_by_id(post_id)
            .await
            .map_err(|e| Error::DetailFetchFailed(e.to_string()))?;

        post_detail_from_canister(canister, post_id, details)
    }

    async fn toggle_like(
        &self,
        canister: Principal,
        identity: Arc<dyn Identity>,
        post_id: u64,
    ) -> Result<bool> {
        let agent = self.agent(canister, identity).await?;
        let user = IndividualUserTemplate(canister, agent.get_agent());
        user.update_post_toggle_like_status_by_caller(post_id)
            .await
            .map_err(|e| Error::ToggleFailed(e.to_string()))
    }
}

/// Deleted and reported posts are reported as absent
pub fn post_detail_from_canister(
    canister: Principal,
    post_id: u64,
    details: PostDetailsForFrontend,
) -> Result<PostDetail> {
    if matches!(
        details.status,
        PostStatus::Deleted | PostStatus::BannedDueToUserReporting
    ) {
        return Err(Error::PostNotFound {
            canister: canister.to_text(),
            post_id,
        });
    }

    Ok(PostDetail {
        video_reference_id: details.video_uid,
        description: details.description,
        like_count: details.like_count,
        liked_by_caller: details.liked_by_me,
        creator_profile_photo_url: details.created_by_profile_photo_url,
    })
}
