use std::fs::File;

use gym_axum::{router, start_server};
use gym_sqlite::Db;
use gymdemo::{AppConfig, Cli, impls::DemoApp};
use tracing::{Level, event};
use tracing_subscriber::{layer::SubscriberExt as _, util::SubscriberInitExt as _};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // By convention, we leverage `tracing` to instrument and log various
    // operations throughout this project, so subscribe to those events and
    // write them to stdio.
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::import()?;
    let AppConfig { server, database } = AppConfig::load(&cli)?;

    let db = Db::open(&database).await?;
    match &database.database_path {
        Some(path) => event!(Level::INFO, path = %path.display(), "opened gym database"),
        None => event!(Level::INFO, "opened in-memory gym database"),
    }
    let app = DemoApp { db };

    // If requested, dump the schema and exit.
    if let Some(path) = cli.schema {
        let (_, schema) = router(app, server);
        serde_json::to_writer_pretty(File::create(&path)?, &*schema)?;
        event!(Level::INFO, path = %path.display(), "wrote OpenAPI schema");
        return Ok(());
    }

    start_server(server, app).await?;
    Ok(())
}
