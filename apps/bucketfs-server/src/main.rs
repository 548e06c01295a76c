//! BucketFS Server - a virtual filesystem over flat object buckets.
//!
//! Serves the BucketFS JSON endpoints (folder listing, project tree,
//! browsing, upload, bulk delete, key listing and URL export) over
//! in-memory buckets registered at startup.
//!
//! # Usage
//!
//! ```text
//! BUCKETFS_BUCKETS=MEDIA,ARCHIVE GATEWAY_LISTEN=0.0.0.0:8787 bucketfs-server
//! ```
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `GATEWAY_LISTEN` | `0.0.0.0:8787` | Bind address |
//! | `BUCKETFS_BUCKETS` | *(empty)* | Comma-separated in-memory bucket bindings |
//! | `BUCKETFS_VAR_<NAME>` | *(unset)* | Plain value binding `<NAME>` |
//! | `BUCKETFS_PAGE_SIZE` | `100` | Browse page size |
//! | `BUCKETFS_DELETE_CHUNK_SIZE` | `1000` | Keys per delete call |
//! | `BUCKETFS_DEFAULT_CONTENT_TYPE` | `application/octet-stream` | Upload fallback type |
//! | `LOG_LEVEL` | `info` | Log level filter |
//! | `LOG_FORMAT` | `text` | `json` for structured log lines |
//! | `RUST_LOG` | *(unset)* | Fine-grained tracing filter (overrides `LOG_LEVEL`) |

mod bindings;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use bucketfs_core::BucketFsConfig;
use bucketfs_http::{BucketFsHttpConfig, BucketFsHttpService};
use bucketfs_vfs::BucketFs;
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto::Builder as HttpConnBuilder;
use tokio::net::TcpListener;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use crate::bindings::build_gateway;

/// Server version reported by `/buckets` and `/health`.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the tracing subscriber.
///
/// Uses `RUST_LOG` if set, otherwise falls back to the `LOG_LEVEL` config value.
fn init_tracing(log_level: &str, json: bool) -> Result<()> {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::try_new(log_level)
            .with_context(|| format!("invalid log level filter: {log_level}"))?
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }

    Ok(())
}

/// Run the accept loop, serving connections until a shutdown signal is received.
async fn serve(listener: TcpListener, service: BucketFsHttpService) -> Result<()> {
    let graceful = hyper_util::server::graceful::GracefulShutdown::new();
    let http = HttpConnBuilder::new(TokioExecutor::new());

    let shutdown = async {
        tokio::signal::ctrl_c().await.ok();
        info!("received shutdown signal, draining connections");
    };

    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            result = listener.accept() => {
                let (stream, peer_addr) = match result {
                    Ok(conn) => conn,
                    Err(e) => {
                        warn!(error = %e, "failed to accept connection");
                        continue;
                    }
                };

                let conn = http.serve_connection(TokioIo::new(stream), service.clone());
                let conn = graceful.watch(conn.into_owned());

                tokio::spawn(async move {
                    if let Err(e) = conn.await {
                        error!(peer_addr = %peer_addr, error = %e, "connection error");
                    }
                });
            }

            () = &mut shutdown => {
                info!("shutting down gracefully");
                break;
            }
        }
    }

    graceful.shutdown().await;
    info!("all connections drained, exiting");

    Ok(())
}

/// Request `/health` from a running server.
async fn run_health_check(addr: &str) -> Result<()> {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpStream;

    let stream = TcpStream::connect(addr)
        .await
        .with_context(|| format!("cannot connect to {addr}"))?;
    let (mut reader, mut writer) = stream.into_split();

    let request = format!("GET /health HTTP/1.1\r\nHost: {addr}\r\nConnection: close\r\n\r\n");
    writer.write_all(request.as_bytes()).await?;
    writer.shutdown().await?;

    let mut response = String::new();
    reader.read_to_string(&mut response).await?;

    if response.contains("200 OK") && response.contains("\"status\":\"running\"") {
        Ok(())
    } else {
        anyhow::bail!("unhealthy response from {addr}")
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = BucketFsConfig::from_env();

    if std::env::args().any(|a| a == "--health-check") {
        let addr = config.gateway_listen.replace("0.0.0.0", "127.0.0.1");
        let healthy = run_health_check(&addr).await.is_ok();
        std::process::exit(i32::from(!healthy));
    }

    let json_logs = std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));
    init_tracing(&config.log_level, json_logs)?;

    info!(
        gateway_listen = %config.gateway_listen,
        buckets = ?config.buckets,
        page_size = config.page_size,
        delete_chunk_size = config.effective_chunk_size(),
        version = VERSION,
        "starting BucketFS server",
    );
    if config.buckets.is_empty() {
        warn!("no buckets configured; set BUCKETFS_BUCKETS to register some");
    }

    let gateway = Arc::new(build_gateway(&config, std::env::vars()));
    let addr: SocketAddr = config
        .gateway_listen
        .parse()
        .with_context(|| format!("invalid bind address: {}", config.gateway_listen))?;

    let fs = Arc::new(BucketFs::new(gateway, Arc::new(config)));
    let service = BucketFsHttpService::new(
        fs,
        BucketFsHttpConfig {
            version: VERSION.to_owned(),
            ..BucketFsHttpConfig::default()
        },
    );

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind to {addr}"))?;

    info!(%addr, "listening for connections");

    serve(listener, service).await
}
