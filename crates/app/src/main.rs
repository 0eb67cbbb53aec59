use migration::{Migrator, MigratorTrait};
use settings::Database;

mod settings;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let settings = settings::Settings::new()?;
    let mut tasks = tokio::task::JoinSet::new();

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "spendly={level},server={level},engine={level}",
            level = settings.app.level
        ))
        .init();

    let server = settings.server;
    tasks.spawn(async move {
        let db = match parse_database(&server.database).await {
            Ok(db) => db,
            Err(err) => {
                tracing::error!("failed to initialize database: {err}");
                return;
            }
        };

        let engine = match engine::Engine::builder().database(db).build().await {
            Ok(engine) => engine,
            Err(err) => {
                tracing::error!("failed to build engine from database: {err}");
                return;
            }
        };
        if let Err(err) = engine.ping().await {
            tracing::error!("database is not reachable: {err}");
            return;
        }

        let config = server::ServerConfig {
            bind: server.bind,
            port: server.port,
            jwt: server::JwtConfig {
                secret: server.jwt_secret,
                expiration_hours: server.jwt_expiration_hours,
            },
            google_client_id: server.google_client_id,
            cors_origins: server.cors_origins,
        };
        server::run(engine, config).await;
    });

    tokio::select! {
        _ = tasks.join_next() => {}
        result = tokio::signal::ctrl_c() => {
            if let Err(err) = result {
                tracing::error!("failed to listen for shutdown signal: {err}");
            }
            tracing::info!("shutting down");
        }
    }
    tasks.shutdown().await;

    Ok(())
}

async fn parse_database(
    config: &Database,
) -> Result<sea_orm::DatabaseConnection, Box<dyn std::error::Error + Send + Sync>> {
    let url = match config {
        Database::Memory => String::from("sqlite::memory:"),
        Database::Sqlite(path) => format!("sqlite:{}?mode=rwc", path),
    };
    tracing::info!("connecting to {url}");

    let database = sea_orm::Database::connect(url).await?;
    Migrator::up(&database, None).await?;
    Ok(database)
}
