use reqwest::Url;

use crate::metrics::{Metric, MetricEvent};

use super::MetricEventTx;

const VECTOR_DB_URL: &str = "https://vector-dev-yral.fly.dev/";

/// Sends metrics to Yral's vectordb instance
#[derive(Clone)]
pub struct VectorDbMetricTx {
    client: reqwest::Client,
    ingest_url: Url,
}

impl VectorDbMetricTx {
    pub fn new(ingest_url: Url) -> Self {
        Self::with_client(reqwest::Client::new(), ingest_url)
    }

    pub fn with_client(client: reqwest::Client, ingest_url: Url) -> Self {
        Self { client, ingest_url }
    }
}

impl Default for VectorDbMetricTx {
    fn default() -> Self {
        Self::new(Url::parse(VECTOR_DB_URL).expect("vector db url is valid"))
    }
}

impl MetricEventTx for VectorDbMetricTx {
    type Error = reqwest::Error;

    async fn push<M: Metric + Send + 'static>(
        &self,
        ev: MetricEvent<M>,
    ) -> Result<(), Self::Error> {
        let req = self.client.post(self.ingest_url.clone()).json(&ev);
        req.send().await?.error_for_status()?;
        Ok(())
    }
}
