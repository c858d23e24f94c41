use std::future::IntoFuture;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tokio::sync::watch;

use guildrelay::ai::GeminiClient;
use guildrelay::config::Config;
use guildrelay::gateway::discord::DiscordGateway;
use guildrelay::gateway::supervisor;
use guildrelay::gateway::{GatewayEvents, SessionTracker};
use guildrelay::relay::{Broadcaster, ChannelFilter, ClientRegistry};
use guildrelay::state::AppState;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "guildrelay=debug,tower_http=debug".into()),
        )
        .init();

    let config = Config::from_env();
    print_banner(&config);

    let channel = ChannelFilter::new(config.channel_id);
    let registry = ClientRegistry::new();

    let (sink, events) = GatewayEvents::channel();
    let gateway = Arc::new(DiscordGateway::new(SessionTracker::new(), sink));

    let broadcaster = Broadcaster::new(registry.clone(), channel);
    tokio::spawn(broadcaster.run(events));

    let mut state = AppState::new(gateway.clone(), registry, channel)
        .with_legacy_status(config.legacy_status);
    if let Some(ref gemini) = config.gemini {
        state = state.with_gemini(GeminiClient::new(
            gemini.base_url.clone(),
            gemini.model.clone(),
            gemini.api_key.clone(),
        ));
    }

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        shutdown_signal().await;
        let _ = shutdown_tx.send(true);
    });

    let api_listener = TcpListener::bind(("0.0.0.0", config.port))
        .await
        .expect("failed to bind");
    let push_listener = if config.separate_push_listener() {
        Some(
            TcpListener::bind(("0.0.0.0", config.ws_port))
                .await
                .expect("failed to bind push listener"),
        )
    } else {
        None
    };

    eprintln!("  \x1b[32m→ api on 0.0.0.0:{}\x1b[0m", config.port);
    if push_listener.is_some() {
        eprintln!("  \x1b[32m→ push on 0.0.0.0:{}\x1b[0m", config.ws_port);
    }
    eprintln!();

    let api = axum::serve(api_listener, guildrelay::routes::router(state.clone()))
        .with_graceful_shutdown(wait_for_shutdown(shutdown_rx.clone()))
        .into_future();
    let push_rx = shutdown_rx.clone();
    let push = async move {
        match push_listener {
            Some(listener) => {
                axum::serve(listener, guildrelay::routes::push_router(state))
                    .with_graceful_shutdown(wait_for_shutdown(push_rx))
                    .await
            }
            None => Ok(()),
        }
    };

    let session_gateway = gateway.clone();
    let credentials = config.credentials.clone();
    let session = async move {
        supervisor::supervise(&config.reconnect, || session_gateway.connect(&credentials)).await
    };

    tokio::select! {
        served = async { tokio::try_join!(api, push) } => {
            if let Err(e) = served {
                tracing::error!("server error: {e}");
            }
            tracing::info!("shutting down");
            gateway.shutdown().await;
        }
        err = session => {
            // Without a session there is nothing to relay.
            tracing::error!("gateway session ended: {err}");
            std::process::exit(1);
        }
    }
}

fn print_banner(config: &Config) {
    let version = env!("CARGO_PKG_VERSION");

    eprintln!();
    eprintln!("  \x1b[1;36mguildrelay\x1b[0m \x1b[2mv{version}\x1b[0m");
    eprintln!();
    eprintln!("  \x1b[2mchannel\x1b[0m      {}", config.channel_id);
    eprintln!("  \x1b[2mapi port\x1b[0m     {}", config.port);
    eprintln!("  \x1b[2mpush port\x1b[0m    {}", config.ws_port);
    let gemini = match config.gemini {
        Some(ref g) => g.model.as_str(),
        None => "disabled",
    };
    eprintln!("  \x1b[2mgemini\x1b[0m       {gemini}");
    if config.reconnect.enabled {
        eprintln!("  \x1b[2mreconnect\x1b[0m    up to {:?}", config.reconnect.max_delay);
    }
    if config.legacy_status {
        eprintln!();
        eprintln!("  \x1b[33m! legacy status codes enabled\x1b[0m");
    }
    eprintln!();
}

async fn wait_for_shutdown(mut rx: watch::Receiver<bool>) {
    let _ = rx.wait_for(|stop| *stop).await;
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
