//! Frontdesk Server - a front-controller HTTP server.
//!
//! Every request path of the form `/controller/method?query` is routed to a
//! registered controller operation. Non-canonical URIs are redirected to their
//! canonical form.
//!
//! # Usage
//!
//! ```text
//! FRONTDESK_LISTEN=127.0.0.1:8080 frontdesk-server
//! ```
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `FRONTDESK_LISTEN` | `0.0.0.0:8080` | Bind address |
//! | `DEFAULT_CONTROLLER` | `default_page` | Controller for URIs that name none |
//! | `CONTROLLER_NAMESPACE` | `app::controllers` | Registry namespace |
//! | `CASE_STRATEGY` | `camel_case_with_first_upper` | Controller name casing |
//! | `REDIRECT_STATUS` | `301` | Redirect status (301 or 307) |
//! | `LOG_LEVEL` | `info` | Log level filter |
//! | `RUST_LOG` | *(unset)* | Fine-grained tracing filter (overrides `LOG_LEVEL`) |

mod controllers;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use frontdesk_core::{ControllerRegistry, Dispatcher, RouterConfig};
use frontdesk_http::{FrontdeskHttpConfig, FrontdeskService};
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto::Builder as HttpConnBuilder;
use tokio::net::TcpListener;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use crate::controllers::{DefaultPage, Greeting};

/// Server version reported at startup.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the tracing subscriber.
///
/// Uses `RUST_LOG` if set, otherwise falls back to the `LOG_LEVEL` config value.
fn init_tracing(log_level: &str) -> Result<()> {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::try_new(log_level)
            .with_context(|| format!("invalid log level filter: {log_level}"))?
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    Ok(())
}

/// Register the controllers this server exposes.
fn build_registry(config: &RouterConfig) -> ControllerRegistry {
    let mut registry = ControllerRegistry::new(&config.controller_namespace);
    registry
        .register_type::<DefaultPage>()
        .register_type::<Greeting>();
    registry
}

/// Build the HTTP service from the router configuration.
fn build_service(config: RouterConfig) -> FrontdeskService {
    let registry = build_registry(&config);
    let dispatcher = Dispatcher::new(config, Arc::new(registry));
    FrontdeskService::new(Arc::new(dispatcher), FrontdeskHttpConfig::default())
}

/// Run the accept loop, serving connections until a shutdown signal is received.
async fn serve(listener: TcpListener, service: FrontdeskService) -> Result<()> {
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

#[tokio::main]
async fn main() -> Result<()> {
    let config = RouterConfig::from_env();

    init_tracing(&config.log_level)?;

    info!(
        listen = %config.listen,
        default_controller = %config.default_controller,
        controller_namespace = %config.controller_namespace,
        case_strategy = %config.case_strategy,
        redirect_status = config.redirect_status,
        version = VERSION,
        "starting Frontdesk server",
    );

    let addr: SocketAddr = config
        .listen
        .parse()
        .with_context(|| format!("invalid bind address: {}", config.listen))?;

    let service = build_service(config);

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind to {addr}"))?;

    info!(%addr, "listening for connections");

    serve(listener, service).await
}
