use std::sync::{Arc, OnceLock};

use sqlx::PgPool;

use crate::{
	adapters::repositories::{MemoryStorage, PgStorage, Storage},
	config::Config,
	database,
	services::response::ServiceError,
};

pub fn config() -> Result<&'static Config, ServiceError> {
	static CONFIG: OnceLock<Config> = OnceLock::new();
	let config = match CONFIG.get() {
		None => {
			let config = Config::new()?;

			CONFIG.get_or_init(|| config)
		}
		Some(config) => config,
	};
	Ok(config)
}

pub async fn connection_pool(
	url: &str,
	max_connections: u32,
) -> Result<&'static PgPool, ServiceError> {
	static POOL: OnceLock<PgPool> = OnceLock::new();

	let p = match POOL.get() {
		None => {
			let pool = database::connect(url, max_connections).await?;
			database::migrate(&pool).await?;
			POOL.get_or_init(|| pool)
		}
		Some(pool) => pool,
	};
	Ok(p)
}

/// Postgres when `DATABASE_URL` is set, the in-process store otherwise.
pub async fn storage(config: &Config) -> Result<Arc<dyn Storage>, ServiceError> {
	match config.database_url.as_deref() {
		Some(url) => {
			let pool = connection_pool(url, config.database_max_connections).await?;
			tracing::info!("Connected to Postgres");
			Ok(Arc::new(PgStorage::new(pool.clone())))
		}
		None => {
			tracing::warn!("DATABASE_URL is not set, data is kept in memory only");
			Ok(Arc::new(MemoryStorage::new()))
		}
	}
}
