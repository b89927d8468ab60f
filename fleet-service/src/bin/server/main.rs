use std::sync::Arc;

use auth::Authenticator;
use axum::Router;
use fleet_service::config::Config;
use fleet_service::config::StorageBackend;
use fleet_service::domain::account::ports::AccountRepository;
use fleet_service::domain::account::service::AccountService;
use fleet_service::domain::fleet::ports::DriverRepository;
use fleet_service::domain::fleet::ports::TruckRepository;
use fleet_service::domain::trip::ports::TripRepository;
use fleet_service::domain::trip::service::TripService;
use fleet_service::inbound::http::router::create_router;
use fleet_service::outbound::repositories::MemoryStore;
use fleet_service::outbound::repositories::PostgresAccountRepository;
use fleet_service::outbound::repositories::PostgresDriverRepository;
use fleet_service::outbound::repositories::PostgresTripRepository;
use fleet_service::outbound::repositories::PostgresTruckRepository;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fleet_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "fleet-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        backend = ?config.database.backend,
        http_port = config.server.http_port,
        token_ttl_hours = config.jwt.expiration_hours,
        enforce_transitions = config.trips.enforce_transitions,
        "Configuration loaded"
    );

    let authenticator = Arc::new(Authenticator::new(
        config.jwt.secret.as_bytes(),
        config.jwt.expiration_hours,
    ));

    let http_application = match config.database.backend {
        StorageBackend::Postgres => {
            let pg_pool = PgPoolOptions::new()
                .max_connections(config.database.max_connections)
                .connect(&config.database.url)
                .await?;
            tracing::info!(
                max_connections = config.database.max_connections,
                database = "postgresql",
                "Database connection pool created"
            );

            sqlx::migrate!("./migrations").run(&pg_pool).await?;
            tracing::info!(database = "postgresql", "Database migrations completed");

            build_application(
                Arc::new(PostgresAccountRepository::new(pg_pool.clone())),
                Arc::new(PostgresTripRepository::new(pg_pool.clone())),
                Arc::new(PostgresTruckRepository::new(pg_pool.clone())),
                Arc::new(PostgresDriverRepository::new(pg_pool)),
                authenticator,
                &config,
            )
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage; data is lost on restart");
            let store = Arc::new(MemoryStore::new());
            build_application(
                Arc::clone(&store),
                Arc::clone(&store),
                Arc::clone(&store),
                store,
                authenticator,
                &config,
            )
        }
    };

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    axum::serve(http_listener, http_application).await?;

    Ok(())
}

fn build_application<AR, TR, TK, DR>(
    accounts: Arc<AR>,
    trips: Arc<TR>,
    trucks: Arc<TK>,
    drivers: Arc<DR>,
    authenticator: Arc<Authenticator>,
    config: &Config,
) -> Router
where
    AR: AccountRepository,
    TR: TripRepository,
    TK: TruckRepository,
    DR: DriverRepository,
{
    let account_service = Arc::new(AccountService::new(accounts, authenticator));
    let trip_service = Arc::new(
        TripService::new(trips, trucks, drivers)
            .with_transition_enforcement(config.trips.enforce_transitions),
    );

    create_router(account_service, trip_service)
}
