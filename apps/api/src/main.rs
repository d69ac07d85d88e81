mod clients;
mod config;
mod draft;
mod editor;
mod errors;
mod export;
mod layout;
mod models;
mod routes;
mod session;
mod state;
mod sync;
mod templates;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::clients::{ApiClient, ProfileClient, RestCollection};
use crate::config::Config;
use crate::draft::backend::RedisDraftBackend;
use crate::draft::DraftStore;
use crate::export::RenderClient;
use crate::models::resume::{Certificate, Internship, Project, Skill};
use crate::routes::build_router;
use crate::state::{AppState, RemoteStore};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Folio API v{}", env!("CARGO_PKG_VERSION"));

    // Draft store: Redis-backed whole-record persistence
    let redis = redis::Client::open(config.redis_url.clone())?;
    let drafts = DraftStore::new(Arc::new(RedisDraftBackend::new(redis)));
    info!("Draft store initialized (Redis)");

    // Portal API clients: profile plus the four entity collections
    let portal = ApiClient::new(config.portal_api_url.clone(), config.portal_api_token.clone());
    let remote = RemoteStore {
        profile: Arc::new(ProfileClient::new(portal.clone())),
        projects: Arc::new(RestCollection::<Project>::new(portal.clone())),
        internships: Arc::new(RestCollection::<Internship>::new(portal.clone())),
        skills: Arc::new(RestCollection::<Skill>::new(portal.clone())),
        certificates: Arc::new(RestCollection::<Certificate>::new(portal)),
    };
    info!("Portal API clients initialized ({})", config.portal_api_url);

    // Document-compile collaborator for the export surface
    let compiler = RenderClient::new(config.render_api_url.clone());
    info!("Compile client initialized ({})", config.render_api_url);

    // Build app state
    let state = AppState {
        drafts,
        remote,
        compiler,
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
