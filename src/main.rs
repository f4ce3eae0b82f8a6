use actix_cors::Cors;
use actix_web::{middleware, App, HttpServer};
use skillmatch::auth::AuthConfig;
use skillmatch::config::{Settings, StorageBackend};
use skillmatch::core::Recommender;
use skillmatch::routes::{self, AppState};
use skillmatch::services::{InMemoryStore, OpportunityStore, PostgresClient, UserStore};
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

fn init_logging() {
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "json".to_string());

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("skillmatch={},actix_web=info", log_level)));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if log_format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.json().init();
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    init_logging();

    info!("Starting SkillMatch recommendation service...");

    let settings = Settings::load().map_err(|e| {
        error!("Failed to load configuration: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e)
    })?;

    info!("Configuration loaded successfully");

    let (opportunities, users): (Arc<dyn OpportunityStore>, Arc<dyn UserStore>) =
        match settings.storage.backend {
            StorageBackend::Postgres => {
                let postgres = Arc::new(
                    PostgresClient::from_settings(
                        &settings.database.url,
                        settings.database.max_connections,
                        settings.database.min_connections,
                        settings.database.acquire_timeout_secs,
                        settings.database.idle_timeout_secs,
                    )
                    .await
                    .map_err(|e| {
                        error!("Failed to connect to PostgreSQL: {}", e);
                        std::io::Error::new(std::io::ErrorKind::ConnectionRefused, e)
                    })?,
                );
                info!(
                    "PostgreSQL store initialized (max: {} connections)",
                    settings.database.max_connections.unwrap_or(10)
                );
                let opportunities: Arc<dyn OpportunityStore> = postgres.clone();
                let users: Arc<dyn UserStore> = postgres;
                (opportunities, users)
            }
            StorageBackend::Memory => {
                warn!("Using in-memory store; data will not survive a restart");
                let memory = Arc::new(InMemoryStore::new());
                let opportunities: Arc<dyn OpportunityStore> = memory.clone();
                let users: Arc<dyn UserStore> = memory;
                (opportunities, users)
            }
        };

    let recommender = Recommender::new(opportunities.clone(), settings.recommendation.timeout());

    info!("Recommender initialized with timeout: {:?}", recommender.timeout());

    let app_state = AppState {
        opportunities,
        users,
        recommender,
        auth: AuthConfig::new(&settings.auth.jwt_secret),
    };

    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .configure(routes::configure_app(app_state.clone()))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
