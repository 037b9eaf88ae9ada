mod feed_page;
mod like_toggled;

pub use feed_page::FeedPageServed;
pub use like_toggled::LikeToggled;

use sealed_metric::SealedMetric;
use serde::Serialize;
use web_time::{SystemTime, UNIX_EPOCH};

mod sealed_metric {
    use std::fmt::Debug;

    use serde::Serialize;

    pub trait SealedMetric: Serialize + Debug {
        fn tag(&self) -> String;

        fn user_id(&self) -> Option<String> {
            None
        }
    }
}

pub trait Metric: SealedMetric {}

impl<T: SealedMetric> Metric for T {}

#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventSource {
    FeedCore,
}

#[derive(Serialize, Debug)]
pub struct MetricEvent<M: Metric> {
    pub source: EventSource,
    pub tag: String,
    pub user_id: Option<String>,
    pub metric: M,
    pub unix_timestamp_secs: u64,
}

impl<M: Metric> MetricEvent<M> {
    pub fn new(source: EventSource, metric: M) -> Self {
        Self {
            source,
            tag: metric.tag(),
            user_id: metric.user_id(),
            metric,
            unix_timestamp_secs: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .unwrap_or_default()
                .as_secs(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_takes_tag_and_user_from_metric() {
        let ev = MetricEvent::new(
            EventSource::FeedCore,
            LikeToggled {
                caller: "caller".into(),
                post_id: 4,
                liked: true,
            },
        );
        assert_eq!(ev.tag, "like_toggled");
        assert_eq!(ev.user_id.as_deref(), Some("caller"));

        let json = serde_json::to_value(&ev).unwrap();
        assert_eq!(json["source"], "FeedCore");
        assert_eq!(json["metric"]["post_id"], 4);
    }
}
