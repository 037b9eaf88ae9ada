pub mod consts;
pub mod proto;

use consts::{ML_FEED_URL, RANKING_CONNECT_TIMEOUT, RANKING_REQUEST_TIMEOUT};
use grpc_traits::{FeedRankingProvider, RankingError};
use proto::MlFeedGrpcClient;
use tonic::{
    transport::{Channel, ClientTlsConfig, Endpoint},
    Code, Status,
};
use types::{feed::FeedRequest, post::FeedCandidate};

/// Ranked feed client backed by a single persistent gRPC channel.
/// Cloning is cheap and shares the channel
#[derive(Debug, Clone)]
pub struct MlFeedClient {
    client: MlFeedGrpcClient<Channel>,
}

impl MlFeedClient {
    pub fn new(channel: Channel) -> Self {
        Self {
            client: MlFeedGrpcClient::new(channel),
        }
    }

    pub async fn connect(url: impl Into<String>) -> Result<Self, RankingError> {
        let channel = endpoint(url.into())?
            .connect()
            .await
            .map_err(|e| RankingError::Unavailable(e.to_string()))?;
        Ok(Self::new(channel))
    }

    /// Channel connects on first use, connection failures surface per call
    pub fn connect_lazy(url: impl Into<String>) -> Result<Self, RankingError> {
        Ok(Self::new(endpoint(url.into())?.connect_lazy()))
    }

    pub async fn connect_default() -> Result<Self, RankingError> {
        Self::connect(ML_FEED_URL).await
    }
}

fn endpoint(url: String) -> Result<Endpoint, RankingError> {
    let is_tls = url.starts_with("https://");
    let mut endpoint = Endpoint::from_shared(url)
        .map_err(|e| RankingError::Rejected(format!("invalid ranking endpoint: {e}")))?
        .connect_timeout(RANKING_CONNECT_TIMEOUT)
        .timeout(RANKING_REQUEST_TIMEOUT);
    if is_tls {
        endpoint = endpoint
            .tls_config(ClientTlsConfig::new())
            .map_err(|e| RankingError::Rejected(format!("invalid tls config: {e}")))?;
    }
    Ok(endpoint)
}

pub fn classify_status(status: &Status) -> RankingError {
    match status.code() {
        Code::Unavailable
        | Code::DeadlineExceeded
        | Code::Cancelled
        | Code::ResourceExhausted
        | Code::Aborted => RankingError::Unavailable(status.message().to_string()),
        // tonic reports some connection failures as Unknown, server side Unknown is a protocol error
        Code::Unknown if is_transport_failure(status) => {
            RankingError::Unavailable(status.message().to_string())
        }
        code => RankingError::Rejected(format!("{code:?}: {}", status.message())),
    }
}

fn is_transport_failure(status: &Status) -> bool {
    let mut source = std::error::Error::source(status);
    while let Some(err) = source {
        if err.is::<tonic::transport::Error>() || err.is::<std::io::Error>() {
            return true;
        }
        source = err.source();
    }
    false
}

pub fn to_proto_request(request: &FeedRequest) -> Result<proto::FeedRequest, RankingError> {
    if request.num_results == 0 {
        return Err(RankingError::Rejected(
            "num_results must be greater than 0".into(),
        ));
    }

    Ok(proto::FeedRequest {
        canister_id: request.caller_principal.clone(),
        filter_posts: request.filtered_post_ids.iter().cloned().collect(),
        num_results: request.num_results,
    })
}

pub fn from_proto_response(response: proto::FeedResponse) -> Vec<FeedCandidate> {
    response
        .feed
        .into_iter()
        .map(|item| FeedCandidate::new(item.canister_id, item.post_id))
        .collect()
}

impl FeedRankingProvider for MlFeedClient {
    async fn fetch_ranked(&self, request: &FeedRequest) -> Result<Vec<FeedCandidate>, RankingError> {
        let req = to_proto_request(request)?;
        let mut client = self.client.clone();
        let res = client
            .get_feed_clean(req)
            .await
            .map_err(|status| classify_status(&status))?;
        let candidates = from_proto_response(res.into_inner());
        log::debug!(
            "ml feed ranked {} candidates for {:?}",
            candidates.len(),
            request.caller_principal
        );

        Ok(candidates)
    }
}
