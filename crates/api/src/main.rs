use std::sync::Arc;

use factureclair_store::MemoryStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    factureclair_observability::init();

    let port: u16 = match std::env::var("PORT") {
        Ok(raw) => raw.parse()?,
        Err(_) => 8080,
    };

    let store = Arc::new(MemoryStore::new());
    let app = factureclair_api::app::build_app(store);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
