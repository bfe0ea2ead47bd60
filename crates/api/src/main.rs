use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    bookstore_observability::init();

    let services = bookstore_api::app::services::build_services_from_env().await?;
    let app = bookstore_api::app::build_app(Arc::new(services));

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
