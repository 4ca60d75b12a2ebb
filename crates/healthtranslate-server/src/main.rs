mod config;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::HeaderValue;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use healthtranslate_api::accounts::{CredentialStore, SeedAccount};
use healthtranslate_api::auth::{AppState, AppStateInner};
use healthtranslate_api::chat::ChatRepository;
use healthtranslate_api::routes;
use healthtranslate_api::together::TogetherClient;
use healthtranslate_api::token::TokenService;
use healthtranslate_crypto::{MessageCipher, keys};
use healthtranslate_db::Database;

use crate::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if std::env::args().any(|arg| arg == "--generate-key") {
        println!("{}", keys::key_to_base64(&keys::generate_key()));
        return Ok(());
    }

    // Load .env if present
    let _ = dotenvy::dotenv();

    // Init logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "healthtranslate=debug,tower_http=debug".into()),
        )
        .init();

    // Config
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("FATAL: {:#}", e);
            eprintln!("       Set it in your .env file and restart.");
            eprintln!("       A fresh ENCRYPTION_KEY can be made with `healthtranslate --generate-key`.");
            std::process::exit(1);
        }
    };

    let cipher = MessageCipher::from_base64(&config.encryption_key)
        .map_err(|e| anyhow::anyhow!("ENCRYPTION_KEY: {}", e))?;

    // Init database
    let db = Arc::new(Database::open(&config.db_path)?);

    let seed = SeedAccount::new(&config.seed_email, &config.seed_username, &config.seed_password)?;
    info!("Seeded account {}", config.seed_email);

    let together = match config.together_api_key.clone() {
        Some(key) => Some(TogetherClient::new(key, config.together_base_url.clone())?),
        None => {
            warn!("TOGETHER_AI_API_KEY is not set; translation endpoints will fail");
            None
        }
    };

    // Shared state
    let state: AppState = Arc::new(AppStateInner {
        tokens: TokenService::new(&config.jwt_secret),
        credentials: CredentialStore::new(Arc::new(seed))?,
        chats: ChatRepository::new(db, cipher),
        together,
    });

    let app = routes::router(state)
        .layer(cors_layer(&config.cors_origins)?)
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    info!("HealthTranslate API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Credentialed CORS for the configured frontends. Methods and headers are
/// mirrored because wildcards are not allowed alongside credentials.
fn cors_layer(origins: &[String]) -> anyhow::Result<CorsLayer> {
    let origins = origins
        .iter()
        .map(|o| HeaderValue::from_str(o))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true))
}

async fn shutdown_signal() {
    let ctrl_c = tokio::signal::ctrl_c();
    #[cfg(unix)]
    {
        let mut sigterm =
            match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
                Ok(sigterm) => sigterm,
                Err(e) => {
                    warn!("Failed to install SIGTERM handler: {}", e);
                    ctrl_c.await.ok();
                    return;
                }
            };
        tokio::select! {
            _ = ctrl_c => info!("Received Ctrl+C, shutting down..."),
            _ = sigterm.recv() => info!("Received SIGTERM, shutting down..."),
        }
    }
    #[cfg(not(unix))]
    {
        ctrl_c.await.ok();
        info!("Received Ctrl+C, shutting down...");
    }
}
