//! Generated from `proto/ml_feed.proto`

tonic::include_proto!("ml_feed");

pub use ml_feed_client::MlFeedClient as MlFeedGrpcClient;
