use std::{
    collections::{HashSet, VecDeque},
    hash::Hash,
};

use grpc_traits::FeedRankingProvider;
use metrics::metric_sender::MetricEventTx;
use types::post::FeedResult;

use crate::{
    canister::PostCanister, consts::MAX_SESSION_HISTORY, engine::FeedEngine,
    identity::IdentityProvider, Result,
};

/// Insertion ordered set that forgets its oldest entries past `limit`
struct History<T> {
    order: VecDeque<T>,
    seen: HashSet<T>,
    limit: usize,
}

impl<T: Clone + Eq + Hash> History<T> {
    fn new(limit: usize) -> Self {
        Self {
            order: VecDeque::new(),
            seen: HashSet::new(),
            limit,
        }
    }

    fn insert(&mut self, value: T) -> bool {
        if !self.seen.insert(value.clone()) {
            return false;
        }
        self.order.push_back(value);
        while self.order.len() > self.limit {
            if let Some(old) = self.order.pop_front() {
                self.seen.remove(&old);
            }
        }
        true
    }

    fn iter(&self) -> impl Iterator<Item = &T> {
        self.order.iter()
    }

    fn len(&self) -> usize {
        self.order.len()
    }

    fn clear(&mut self) {
        self.order.clear();
        self.seen.clear();
    }
}

/// Pages through the ranked feed for one viewer.
///
/// Everything served or dropped so far is sent as the filter set,
/// so the ranking service moves on to unseen posts. Only the most
/// recent posts are remembered, see [`MAX_SESSION_HISTORY`].
pub struct FeedSession<'a, R, I, C, Tx> {
    engine: &'a FeedEngine<R, I, C, Tx>,
    page_size: u32,
    filtered: History<String>,
    served: History<(String, String)>,
}

impl<'a, R, I, C, Tx> FeedSession<'a, R, I, C, Tx>
where
    R: FeedRankingProvider + Sync,
    I: IdentityProvider,
    C: PostCanister,
    Tx: MetricEventTx,
{
    pub fn new(engine: &'a FeedEngine<R, I, C, Tx>, page_size: u32) -> Self {
        Self::with_history_limit(engine, page_size, MAX_SESSION_HISTORY)
    }

    pub fn with_history_limit(
        engine: &'a FeedEngine<R, I, C, Tx>,
        page_size: u32,
        limit: usize,
    ) -> Self {
        Self {
            engine,
            page_size,
            filtered: History::new(limit),
            served: History::new(limit),
        }
    }

    pub fn served_count(&self) -> usize {
        self.served.len()
    }

    pub async fn next_page(&mut self) -> Result<Vec<FeedResult>> {
        let request = self
            .engine
            .request_for(self.filtered.iter().cloned(), self.page_size);
        let page = self.engine.fetch_page_detailed(&request).await?;

        for candidate in &page.dropped {
            self.filtered.insert(candidate.post_id.to_string());
        }

        let mut items = page.items;
        items.retain(|item| {
            let (canister, post) = item.key();
            self.served.insert((canister.to_string(), post.to_string()))
        });
        for item in &items {
            self.filtered.insert(item.post_id.clone());
        }

        Ok(items)
    }

    /// Starts over from the top of the feed
    pub fn reset(&mut self) {
        self.filtered.clear();
        self.served.clear();
    }
}
