pub mod backend;

use anyhow::Result;
use log::info;

use backend::{
    config::{Backend, LedgerConfig},
    create_router, initialize_backend,
    storage::{Connection, DbConnection, MemoryConnection},
};

/// Start serving the ledger with the configured storage backend
pub async fn run(config: LedgerConfig) -> Result<()> {
    match config.storage.backend {
        Backend::Memory => {
            info!("Using in-memory storage");
            serve(MemoryConnection::new(), &config).await
        }
        Backend::Sqlite => {
            info!("Setting up database at {}", config.storage.database_url);
            serve(DbConnection::init(&config.storage).await?, &config).await
        }
    }
}

async fn serve<C: Connection>(connection: C, config: &LedgerConfig) -> Result<()> {
    let app_state = initialize_backend(connection, &config.storage).await?;
    let app = create_router(app_state, &config.server)?;

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on http://{}{}", addr, config.server.base_path);

    axum::serve(listener, app).await?;
    Ok(())
}
