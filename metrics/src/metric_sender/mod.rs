pub mod mock;
pub mod vectordb;

use std::{error::Error, future::Future};

use crate::metrics::{EventSource, Metric, MetricEvent};

pub trait MetricEventTx: Send + Sync {
    type Error: Error;

    fn push<M: Metric + Send + 'static>(
        &self,
        ev: MetricEvent<M>,
    ) -> impl Future<Output = Result<(), Self::Error>> + Send;
}

#[derive(Clone)]
pub struct MetricTx<Tx> {
    source: EventSource,
    tx: Tx,
}

impl<Tx: MetricEventTx> MetricTx<Tx> {
    pub fn new(source: EventSource, tx: Tx) -> Self {
        Self { source, tx }
    }

    pub async fn push(&self, metric: impl Metric + Send + 'static) -> Result<(), Tx::Error> {
        self.tx.push(MetricEvent::new(self.source, metric)).await
    }

    /// Metrics are best effort, failures are only logged
    pub async fn push_or_log(&self, metric: impl Metric + Send + 'static) {
        if let Err(e) = self.push(metric).await {
            log::warn!("failed to send metric {e}");
        }
    }
}
