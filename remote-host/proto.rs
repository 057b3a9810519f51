//! Wire types and service plumbing for the `ModelHost` gRPC service.
//!
//! Hand-written prost messages and tonic client/server glue for the
//! single unary method, kept in-tree instead of relying on build-time
//! codegen. The payloads are opaque byte blobs: the service has no
//! opinion about their internal schema.

/// One serialized argument payload.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct PredictRequest {
    #[prost(bytes = "vec", tag = "1")]
    pub payload: ::prost::alloc::vec::Vec<u8>,
}

/// One serialized result payload.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct PredictResponse {
    #[prost(bytes = "vec", tag = "1")]
    pub payload: ::prost::alloc::vec::Vec<u8>,
}

/// Client for the `ModelHost` service.
pub mod model_host_client {
    #![allow(unused_variables, dead_code, missing_docs)]

    use tonic::codegen::http::uri::PathAndQuery;
    use tonic::codegen::*;

    #[derive(Debug, Clone)]
    pub struct ModelHostClient<T> {
        inner: tonic::client::Grpc<T>,
    }

    impl ModelHostClient<tonic::transport::Channel> {
        /// Connect to a remote host at the given endpoint.
        pub async fn connect<D>(dst: D) -> Result<Self, tonic::transport::Error>
        where
            D: TryInto<tonic::transport::Endpoint>,
            D::Error: Into<StdError>,
        {
            let conn = tonic::transport::Endpoint::new(dst)?.connect().await?;
            Ok(Self::new(conn))
        }

        pub fn new(inner: tonic::transport::Channel) -> Self {
            Self {
                inner: tonic::client::Grpc::new(inner),
            }
        }

        /// Submit one serialized payload and wait for its result.
        pub async fn predict(
            &mut self,
            request: impl tonic::IntoRequest<super::PredictRequest>,
        ) -> std::result::Result<tonic::Response<super::PredictResponse>, tonic::Status> {
            self.inner.ready().await.map_err(|e| {
                tonic::Status::new(tonic::Code::Unknown, format!("Service was not ready: {e}"))
            })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = PathAndQuery::from_static("/ModelHost/predict");
            self.inner.unary(request.into_request(), path, codec).await
        }
    }
}

/// Server plumbing for the `ModelHost` service.
pub mod model_host_server {
    #![allow(unused_variables, dead_code, missing_docs)]

    use tonic::codegen::*;

    /// The service contract: one unary `predict`.
    #[async_trait]
    pub trait ModelHost: Send + Sync + 'static {
        async fn predict(
            &self,
            request: tonic::Request<super::PredictRequest>,
        ) -> std::result::Result<tonic::Response<super::PredictResponse>, tonic::Status>;
    }

    #[derive(Debug)]
    pub struct ModelHostServer<T: ModelHost> {
        inner: Arc<T>,
    }

    impl<T: ModelHost> ModelHostServer<T> {
        pub fn new(inner: T) -> Self {
            Self::from_arc(Arc::new(inner))
        }

        pub fn from_arc(inner: Arc<T>) -> Self {
            Self { inner }
        }
    }

    impl<T, B> Service<http::Request<B>> for ModelHostServer<T>
    where
        T: ModelHost,
        B: Body + Send + 'static,
        B::Error: Into<StdError> + Send + 'static,
    {
        type Response = http::Response<tonic::body::BoxBody>;
        type Error = std::convert::Infallible;
        type Future = BoxFuture<Self::Response, Self::Error>;

        fn poll_ready(
            &mut self,
            _cx: &mut Context<'_>,
        ) -> Poll<std::result::Result<(), Self::Error>> {
            Poll::Ready(Ok(()))
        }

        fn call(&mut self, req: http::Request<B>) -> Self::Future {
            match req.uri().path() {
                "/ModelHost/predict" => {
                    struct PredictSvc<T: ModelHost>(Arc<T>);
                    impl<T: ModelHost> tonic::server::UnaryService<super::PredictRequest>
                        for PredictSvc<T>
                    {
                        type Response = super::PredictResponse;
                        type Future = BoxFuture<tonic::Response<Self::Response>, tonic::Status>;
                        fn call(
                            &mut self,
                            request: tonic::Request<super::PredictRequest>,
                        ) -> Self::Future {
                            let inner = Arc::clone(&self.0);
                            Box::pin(async move { inner.predict(request).await })
                        }
                    }
                    let inner = Arc::clone(&self.inner);
                    Box::pin(async move {
                        let method = PredictSvc(inner);
                        let codec = tonic::codec::ProstCodec::default();
                        let mut grpc = tonic::server::Grpc::new(codec);
                        Ok(grpc.unary(method, req).await)
                    })
                }
                _ => Box::pin(async move {
                    Ok(http::Response::builder()
                        .status(200)
                        .header("grpc-status", "12")
                        .header("content-type", "application/grpc")
                        .body(empty_body())
                        .unwrap())
                }),
            }
        }
    }

    impl<T: ModelHost> Clone for ModelHostServer<T> {
        fn clone(&self) -> Self {
            Self {
                inner: Arc::clone(&self.inner),
            }
        }
    }

    impl<T: ModelHost> tonic::server::NamedService for ModelHostServer<T> {
        const NAME: &'static str = "ModelHost";
    }
}
