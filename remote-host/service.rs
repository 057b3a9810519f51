//! Bridges the wire service onto a local batching host.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tonic::{Request, Response, Status};

use model_host::{Batcher, HostError, ModelHost, Predictor};

use crate::proto::{PredictRequest, PredictResponse};

/// gRPC front for one local host.
///
/// Each RPC carries a single JSON-encoded payload, becomes one local
/// submission, and returns that submission's result. Aggregation happens
/// entirely inside the host: concurrent RPCs batch together exactly like
/// concurrent in-process callers.
pub struct PredictService<P, B>
where
    P: Predictor,
    B: Batcher<Batch = P::Batch, BatchOutput = P::Output>,
{
    host: Arc<ModelHost<P, B>>,
}

impl<P, B> PredictService<P, B>
where
    P: Predictor,
    B: Batcher<Batch = P::Batch, BatchOutput = P::Output>,
{
    pub fn new(host: Arc<ModelHost<P, B>>) -> Self {
        Self { host }
    }
}

#[tonic::async_trait]
impl<P, B> crate::proto::model_host_server::ModelHost for PredictService<P, B>
where
    P: Predictor,
    B: Batcher<Batch = P::Batch, BatchOutput = P::Output>,
    B::Item: DeserializeOwned,
    B::Output: Serialize,
{
    async fn predict(
        &self,
        request: Request<PredictRequest>,
    ) -> Result<Response<PredictResponse>, Status> {
        let payload = request.into_inner().payload;
        let item: B::Item = serde_json::from_slice(&payload)
            .map_err(|e| Status::invalid_argument(format!("malformed request payload: {e}")))?;

        let output = self.host.predict(item).await.map_err(status_from_host_error)?;

        let payload = serde_json::to_vec(&output)
            .map_err(|e| Status::internal(format!("failed to encode result: {e}")))?;
        Ok(Response::new(PredictResponse { payload }))
    }
}

/// Host failures travel on the RPC's native error channel, not in the
/// response body.
fn status_from_host_error(err: HostError) -> Status {
    match err {
        HostError::HostStopped => Status::unavailable(err.to_string()),
        other => Status::internal(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let status = status_from_host_error(HostError::HostStopped);
        assert_eq!(status.code(), tonic::Code::Unavailable);

        let status = status_from_host_error(HostError::Predictor("weights missing".into()));
        assert_eq!(status.code(), tonic::Code::Internal);
        assert!(status.message().contains("weights missing"));
    }
}
