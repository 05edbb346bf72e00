pub mod routers;

use travel::{
	dependencies::{config, storage},
	services::response::ServiceError,
	AppState,
};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), ServiceError> {
	let config = config()?;

	// ! Tracing
	let log_level = config.log_level.clone();
	tracing_subscriber::registry()
		.with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
			// axum logs rejections from built-in extractors with the `axum::rejection`
			// target, at `TRACE` level. `axum::rejection=trace` enables showing those events
			format!("travel={log_level},web={log_level},tower_http={log_level},axum::rejection=trace").into()
		}))
		.with(tracing_subscriber::fmt::layer())
		.init();

	// ! Connection
	tracing::info!("Connections are being pooled...");
	let storage = storage(config).await?;
	let state = AppState::new(config, storage)?;

	let app = routers::app(state, config);

	let listener = tokio::net::TcpListener::bind(&config.server_ip_port).await?;
	tracing::info!("Start web server on {}", listener.local_addr()?);
	axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;
	tracing::info!("Web server exited");
	Ok(())
}

async fn shutdown_signal() {
	if let Err(err) = tokio::signal::ctrl_c().await {
		tracing::error!("Failed to listen for shutdown signal: {}", err);
		std::future::pending::<()>().await;
	}
	tracing::info!("Shutdown requested");
}
