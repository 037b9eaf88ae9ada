use metrics::{
    metric_sender::{
        mock::MaybeMockMetricEventTx, vectordb::VectorDbMetricTx, MetricEventTx, MetricTx,
    },
    metrics::{EventSource, LikeToggled},
};

use crate::{canister::PostCanister, identity::IdentityProvider, Error, Result};

/// Toggles the caller's like on a post.
///
/// No local state is kept, the returned value is always
/// the one reported by the canister.
pub struct LikeToggle<I, C, Tx = MaybeMockMetricEventTx<VectorDbMetricTx>> {
    identity: I,
    canisters: C,
    metrics: MetricTx<Tx>,
}

impl<I: IdentityProvider, C: PostCanister> LikeToggle<I, C> {
    pub fn new(identity: I, canisters: C) -> Self {
        Self {
            identity,
            canisters,
            metrics: MetricTx::new(EventSource::FeedCore, MaybeMockMetricEventTx::default()),
        }
    }
}

impl<I: IdentityProvider, C: PostCanister, Tx: MetricEventTx> LikeToggle<I, C, Tx> {
    pub fn with_metrics<NewTx: MetricEventTx>(self, tx: NewTx) -> LikeToggle<I, C, NewTx> {
        LikeToggle {
            identity: self.identity,
            canisters: self.canisters,
            metrics: MetricTx::new(EventSource::FeedCore, tx),
        }
    }

    pub async fn toggle_like(&self, post_id: u64) -> Result<bool> {
        let Some(principal) = self.identity.current_principal() else {
            return Err(Error::AuthenticationFailed(
                "no principal available for caller".into(),
            ));
        };
        let identity = self
            .identity
            .mint_delegated_identity()
            .await
            .map_err(|e| Error::AuthenticationFailed(e.to_string()))?;

        let liked = self
            .canisters
            .toggle_like(principal, identity, post_id)
            .await
            .map_err(|e| match e {
                Error::ToggleFailed(_) => e,
                other => Error::ToggleFailed(other.to_string()),
            })?;

        self.metrics
            .push_or_log(LikeToggled {
                caller: principal.to_text(),
                post_id,
                liked,
            })
            .await;

        Ok(liked)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::test_utils::{MockCanister, MockIdentity, RecordingMetricTx};

    use super::*;

    #[tokio::test]
    async fn returns_state_reported_by_canister() {
        let canisters = Arc::new(MockCanister::default().liked(7));
        let toggle = LikeToggle::new(MockIdentity::default(), canisters.clone());

        assert!(!toggle.toggle_like(7).await.unwrap());
        assert!(toggle.toggle_like(7).await.unwrap());
        assert!(toggle.toggle_like(8).await.unwrap());
    }

    #[tokio::test]
    async fn targets_callers_canister_with_given_post() {
        let canisters = Arc::new(MockCanister::default());
        let toggle = LikeToggle::new(MockIdentity::default(), canisters.clone());

        toggle.toggle_like(1234).await.unwrap();
        assert_eq!(canisters.toggles(), vec![(MockIdentity::principal(), 1234)]);
    }

    #[tokio::test]
    async fn missing_principal_fails_before_minting() {
        let identity = Arc::new(MockIdentity::anonymous());
        let canisters = Arc::new(MockCanister::default());
        let toggle = LikeToggle::new(identity.clone(), canisters.clone());

        let err = toggle.toggle_like(1).await.unwrap_err();
        assert!(matches!(err, Error::AuthenticationFailed(_)));
        assert_eq!(identity.mints(), 0);
        assert!(canisters.toggles().is_empty());
    }

    #[tokio::test]
    async fn mint_failure_is_authentication_failure() {
        let toggle = LikeToggle::new(MockIdentity::failing(), MockCanister::default());
        let err = toggle.toggle_like(1).await.unwrap_err();
        assert!(matches!(err, Error::AuthenticationFailed(_)));
    }

    #[tokio::test]
    async fn canister_failure_is_toggle_failure() {
        let toggle = LikeToggle::new(
            MockIdentity::default(),
            MockCanister::default().failing_toggle(),
        );
        let err = toggle.toggle_like(1).await.unwrap_err();
        assert!(matches!(err, Error::ToggleFailed(_)));
        assert!(err.is_retryable());
    }

    #[tokio::test]
    async fn toggle_metric_carries_reported_state() {
        let recorder = RecordingMetricTx::default();
        let toggle = LikeToggle::new(MockIdentity::default(), MockCanister::default())
            .with_metrics(recorder.clone());

        toggle.toggle_like(3).await.unwrap();
        let events = recorder.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0]["tag"], "like_toggled");
        assert_eq!(events[0]["metric"]["post_id"], 3);
        assert_eq!(events[0]["metric"]["liked"], true);
    }
}
