use anyhow::Context;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};
use tubetune_proxy::{
    catalog::{
        CatalogHandle,
        ytmusic::YtMusicClient,
    },
    routers::{app, ROUTES},
    secrets::{Mode, SECRET_MANAGER},
    state::AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let mut filter = EnvFilter::from_default_env();
    for directive in Mode::from_env().log_directives() {
        filter = filter.add_directive(
            directive
                .parse()
                .with_context(|| format!("Invalid log directive {}", directive))?,
        );
    }
    fmt().with_env_filter(filter).with_target(false).init();

    // Anonymous client; a failure here still leaves the health check up.
    let catalog = match YtMusicClient::new(&SECRET_MANAGER.ytmusic()) {
        Ok(client) => {
            info!("🎵 YTMusic initialized (anonymous)");
            CatalogHandle::ready(client)
        }
        Err(e) => {
            error!("❌ Failed to initialize YTMusic: {}", e);
            CatalogHandle::unavailable(e.to_string())
        }
    };

    let bind_addr = SECRET_MANAGER.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("Failed to bind to {}", bind_addr))?;

    info!("🎧 TubeTune proxy listening on {}", bind_addr);
    for route in ROUTES {
        info!("📡 GET {}", route);
    }

    axum::serve(listener, app(AppState::new(catalog)))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}
