//! Remote model host server
//!
//! Demo entry point: serves an identity predictor behind the `ModelHost`
//! gRPC service, batching concurrent RPCs through one local host.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use log::info;

use model_host::{FnPredictor, HostConfig, Hosted, IdentityBatcher};
use remote_host::proto::model_host_server::ModelHostServer;
use remote_host::PredictService;

#[derive(Parser, Debug)]
#[command(about = "Remote model host - batching gRPC predict server")]
struct Args {
    #[arg(long, default_value = "50051")]
    port: u16,

    #[arg(long, default_value = "32")]
    max_batch_size: usize,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    // Demo model: echoes every JSON payload back through the batch path.
    let predictor = FnPredictor::new(|batch: Vec<serde_json::Value>| Ok(batch));
    let host = Arc::new(predictor.host(
        IdentityBatcher::new(),
        HostConfig {
            max_batch_size: args.max_batch_size,
        },
    ));
    host.start()?;

    let addr: SocketAddr = format!("0.0.0.0:{}", args.port).parse()?;
    info!("Remote model host listening on {}", addr);
    info!("  max batch size: {}", args.max_batch_size);

    tonic::transport::Server::builder()
        .add_service(ModelHostServer::new(PredictService::new(Arc::clone(&host))))
        .serve(addr)
        .await?;

    host.stop().await?;
    Ok(())
}
