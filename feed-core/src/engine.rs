use futures_util::{stream, StreamExt};
use grpc_traits::FeedRankingProvider;
use metrics::{
    metric_sender::{
        mock::MaybeMockMetricEventTx, vectordb::VectorDbMetricTx, MetricEventTx, MetricTx,
    },
    metrics::{EventSource, FeedPageServed},
};
use types::{
    feed::FeedRequest,
    post::{FeedCandidate, FeedResult},
};

use crate::{
    canister::PostCanister, config::FeedConfig, consts::CDN_PREFIX, identity::IdentityProvider,
    resolver::PostDetailResolver, Result,
};

/// Resolved page in ranking order,
/// along with the candidates that had to be dropped
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FeedPage {
    pub items: Vec<FeedResult>,
    pub dropped: Vec<FeedCandidate>,
}

impl FeedPage {
    pub fn ranked(&self) -> usize {
        self.items.len() + self.dropped.len()
    }

    /// Ranking returned candidates, but none of them resolved
    pub fn all_dropped(&self) -> bool {
        self.items.is_empty() && !self.dropped.is_empty()
    }
}

/// Ranks a page with the ML feed, then resolves every candidate
/// against its canister with bounded concurrency.
pub struct FeedEngine<R, I, C, Tx = MaybeMockMetricEventTx<VectorDbMetricTx>> {
    ranking: R,
    resolver: PostDetailResolver<I, C>,
    config: FeedConfig,
    metrics: MetricTx<Tx>,
}

impl<R, I, C> FeedEngine<R, I, C>
where
    R: FeedRankingProvider + Sync,
    I: IdentityProvider,
    C: PostCanister,
{
    pub fn new(ranking: R, identity: I, canisters: C, config: FeedConfig) -> Self {
        Self {
            ranking,
            resolver: PostDetailResolver::new(identity, canisters),
            config,
            metrics: MetricTx::new(EventSource::FeedCore, MaybeMockMetricEventTx::default()),
        }
    }
}

impl<R, I, C, Tx> FeedEngine<R, I, C, Tx>
where
    R: FeedRankingProvider + Sync,
    I: IdentityProvider,
    C: PostCanister,
    Tx: MetricEventTx,
{
    pub fn with_metrics<NewTx: MetricEventTx>(self, tx: NewTx) -> FeedEngine<R, I, C, NewTx> {
        FeedEngine {
            ranking: self.ranking,
            resolver: self.resolver,
            config: self.config,
            metrics: MetricTx::new(EventSource::FeedCore, tx),
        }
    }

    /// Request on behalf of the current caller, anonymous if there is none
    pub fn request_for(
        &self,
        filtered_post_ids: impl IntoIterator<Item = String>,
        num_results: u32,
    ) -> FeedRequest {
        let caller = self
            .resolver
            .identity()
            .current_principal()
            .map(|p| p.to_text())
            .unwrap_or_default();
        FeedRequest::new(caller, filtered_post_ids, num_results)
    }

    /// Fails only when ranking fails, unresolvable posts are left out
    pub async fn fetch_page(&self, request: &FeedRequest) -> Result<Vec<FeedResult>> {
        Ok(self.fetch_page_detailed(request).await?.items)
    }

    pub async fn fetch_page_detailed(&self, request: &FeedRequest) -> Result<FeedPage> {
        let candidates = self.ranking.fetch_ranked(request).await?;
        let fan_out = self.config.fan_out_for(candidates.len());

        // `buffered` yields in input order, dropping the stream cancels in flight calls
        let resolved: Vec<_> = stream::iter(candidates)
            .map(|candidate| async move {
                let res = self.resolve_one(&candidate).await;
                (candidate, res)
            })
            .buffered(fan_out)
            .collect()
            .await;

        let mut page = FeedPage::default();
        for (candidate, res) in resolved {
            match res {
                Ok(item) => page.items.push(item),
                Err(e) => {
                    log::warn!(
                        "dropping post {} from canister {}: {e}",
                        candidate.post_id,
                        candidate.canister_id
                    );
                    page.dropped.push(candidate);
                }
            }
        }

        if page.all_dropped() {
            log::warn!(
                "ranking returned {} posts but none could be resolved",
                page.dropped.len()
            );
        }
        log::debug!(
            "feed page: {} ranked, {} resolved, {} dropped",
            page.ranked(),
            page.items.len(),
            page.dropped.len()
        );

        self.metrics
            .push_or_log(FeedPageServed {
                caller: request.caller_principal.clone(),
                requested: request.num_results,
                ranked: page.ranked() as u32,
                resolved: page.items.len() as u32,
                dropped: page.dropped.len() as u32,
            })
            .await;

        Ok(page)
    }

    async fn resolve_one(&self, candidate: &FeedCandidate) -> Result<FeedResult> {
        let detail = self.resolver.resolve(candidate).await?;
        Ok(FeedResult::from_parts(CDN_PREFIX, candidate, detail)?)
    }
}
