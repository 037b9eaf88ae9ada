use std::{
    collections::{HashMap, HashSet},
    convert::Infallible,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex,
    },
    time::Duration,
};

use candid::Principal;
use grpc_traits::{FeedRankingProvider, RankingError};
use ic_agent::{identity::AnonymousIdentity, Identity};
use metrics::{
    metric_sender::MetricEventTx,
    metrics::{Metric, MetricEvent},
};
use types::{
    feed::FeedRequest,
    post::{FeedCandidate, PostDetail},
};

use crate::{canister::PostCanister, identity::IdentityProvider, Error, Result};

pub fn canister_text(n: u8) -> String {
    Principal::from_slice(&[0, 0, 0, 0, 0, 0, 0, n, 1, 1]).to_text()
}

pub struct MockRanking {
    result: std::result::Result<Vec<FeedCandidate>, RankingError>,
    requests: Mutex<Vec<FeedRequest>>,
}

impl MockRanking {
    pub fn ok(candidates: Vec<FeedCandidate>) -> Self {
        Self {
            result: Ok(candidates),
            requests: Mutex::default(),
        }
    }

    pub fn err(err: RankingError) -> Self {
        Self {
            result: Err(err),
            requests: Mutex::default(),
        }
    }

    pub fn requests(&self) -> Vec<FeedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl FeedRankingProvider for MockRanking {
    async fn fetch_ranked(
        &self,
        request: &FeedRequest,
    ) -> std::result::Result<Vec<FeedCandidate>, RankingError> {
        self.requests.lock().unwrap().push(request.clone());
        self.result.clone()
    }
}

pub struct MockIdentity {
    principal: Option<Principal>,
    fail: bool,
    mints: AtomicUsize,
}

impl Default for MockIdentity {
    fn default() -> Self {
        Self {
            principal: Some(Self::principal()),
            fail: false,
            mints: AtomicUsize::new(0),
        }
    }
}

impl MockIdentity {
    pub fn principal() -> Principal {
        Principal::from_slice(&[0, 0, 0, 0, 0, 0, 0, 42, 1, 1])
    }

    pub fn anonymous() -> Self {
        Self {
            principal: None,
            ..Default::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn mints(&self) -> usize {
        self.mints.load(Ordering::SeqCst)
    }
}

impl IdentityProvider for MockIdentity {
    fn current_principal(&self) -> Option<Principal> {
        self.principal
    }

    async fn mint_delegated_identity(&self) -> Result<Arc<dyn Identity>> {
        self.mints.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(Error::IdentityUnavailable("mock mint failure".into()));
        }
        Ok(Arc::new(AnonymousIdentity))
    }
}

#[derive(Default)]
pub struct MockCanister {
    failing: HashSet<u64>,
    delays_ms: HashMap<u64, u64>,
    video_tokens: HashMap<u64, String>,
    fail_toggle: bool,
    detail_calls: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    identities: Mutex<Vec<Arc<dyn Identity>>>,
    likes: Mutex<HashMap<u64, bool>>,
    toggles: Mutex<Vec<(Principal, u64)>>,
}

impl MockCanister {
    pub fn failing_post(mut self, post_id: u64) -> Self {
        self.failing.insert(post_id);
        self
    }

    pub fn with_delay(mut self, post_id: u64, ms: u64) -> Self {
        self.delays_ms.insert(post_id, ms);
        self
    }

    pub fn with_video_token(mut self, post_id: u64, token: &str) -> Self {
        self.video_tokens.insert(post_id, token.to_string());
        self
    }

    pub fn failing_toggle(mut self) -> Self {
        self.fail_toggle = true;
        self
    }

    pub fn liked(self, post_id: u64) -> Self {
        self.likes.lock().unwrap().insert(post_id, true);
        self
    }

    pub fn detail_calls(&self) -> usize {
        self.detail_calls.load(Ordering::SeqCst)
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    pub fn toggles(&self) -> Vec<(Principal, u64)> {
        self.toggles.lock().unwrap().clone()
    }

    pub fn identities_are_distinct(&self) -> bool {
        let ids = self.identities.lock().unwrap();
        ids.iter()
            .enumerate()
            .all(|(i, a)| ids[i + 1..].iter().all(|b| !Arc::ptr_eq(a, b)))
    }
}

impl PostCanister for MockCanister {
    async fn post_details(
        &self,
        canister: Principal,
        identity: Arc<dyn Identity>,
        post_id: u64,
    ) -> Result<PostDetail> {
        self.detail_calls.fetch_add(1, Ordering::SeqCst);
        self.identities.lock().unwrap().push(identity);

        let guard = InFlight::enter(&self.in_flight);
        self.max_in_flight.fetch_max(guard.count, Ordering::SeqCst);
        if let Some(ms) = self.delays_ms.get(&post_id) {
            tokio::time::sleep(Duration::from_millis(*ms)).await;
        }
        drop(guard);

        if self.failing.contains(&post_id) {
            return Err(Error::DetailFetchFailed(format!(
                "mock failure for {canister} {post_id}"
            )));
        }

        Ok(PostDetail {
            video_reference_id: self
                .video_tokens
                .get(&post_id)
                .cloned()
                .unwrap_or_else(|| format!("vid{post_id}")),
            description: format!("post {post_id}"),
            like_count: post_id * 10,
            liked_by_caller: false,
            creator_profile_photo_url: None,
        })
    }

    async fn toggle_like(
        &self,
        canister: Principal,
        identity: Arc<dyn Identity>,
        post_id: u64,
    ) -> Result<bool> {
        self.identities.lock().unwrap().push(identity);
        self.toggles.lock().unwrap().push((canister, post_id));
        if self.fail_toggle {
            return Err(Error::ToggleFailed("mock toggle failure".into()));
        }

        let mut likes = self.likes.lock().unwrap();
        let liked = likes.entry(post_id).or_default();
        *liked = !*liked;
        Ok(*liked)
    }
}

/// Released on drop, so cancelled calls are counted out too
struct InFlight<'a> {
    counter: &'a AtomicUsize,
    count: usize,
}

impl<'a> InFlight<'a> {
    fn enter(counter: &'a AtomicUsize) -> Self {
        let count = counter.fetch_add(1, Ordering::SeqCst) + 1;
        Self { counter, count }
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.counter.fetch_sub(1, Ordering::SeqCst);
    }
}

#[derive(Clone, Default)]
pub struct RecordingMetricTx {
    events: Arc<Mutex<Vec<serde_json::Value>>>,
}

impl RecordingMetricTx {
    pub fn events(&self) -> Vec<serde_json::Value> {
        self.events.lock().unwrap().clone()
    }
}

impl MetricEventTx for RecordingMetricTx {
    type Error = Infallible;

    async fn push<M: Metric + Send + 'static>(
        &self,
        ev: MetricEvent<M>,
    ) -> std::result::Result<(), Self::Error> {
        let value = serde_json::to_value(&ev).expect("metric serializes");
        self.events.lock().unwrap().push(value);
        Ok(())
    }
}
