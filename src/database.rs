use std::mem;

use sqlx::postgres::PgPoolOptions;
use sqlx::{postgres::PgPool, Postgres, Transaction};

use crate::services::response::ServiceError;

/// Holds at most one open transaction over a pool.
pub struct DatabaseExecutor {
	pool: PgPool,
	transaction: Option<Transaction<'static, Postgres>>,
}

impl DatabaseExecutor {
	pub fn new(pool: PgPool) -> Self {
		Self { pool, transaction: None }
	}
	pub fn transaction(&mut self) -> Result<&mut Transaction<'static, Postgres>, ServiceError> {
		self.transaction
			.as_mut()
			.ok_or(ServiceError::TransactionError("transaction has not begun"))
	}

	pub(crate) async fn begin(&mut self) -> Result<(), ServiceError> {
		match self.transaction.as_mut() {
			None => {
				self.transaction = Some(self.pool.begin().await?);
				Ok(())
			}
			Some(_trx) => {
				tracing::warn!("Transaction begun already");
				Err(ServiceError::TransactionError("transaction begun already"))
			}
		}
	}

	pub(crate) async fn commit(&mut self) -> Result<(), ServiceError> {
		let Some(trx) = mem::take(&mut self.transaction) else {
			return Err(ServiceError::TransactionError("transaction has not begun"));
		};
		trx.commit().await.map_err(|err| {
			tracing::error!("Error occurred during commit operation : {:?}", err);
			ServiceError::DatabaseError(err)
		})
	}

	pub(crate) async fn rollback(&mut self) -> Result<(), ServiceError> {
		let Some(trx) = mem::take(&mut self.transaction) else {
			return Err(ServiceError::TransactionError("transaction has not begun"));
		};
		trx.rollback().await.map_err(ServiceError::DatabaseError)
	}
}

/// Returns the error that aborted the transaction; a failed rollback is only logged.
pub(crate) fn rolled_back<T>(
	cause: ServiceError,
	rollback: Result<(), ServiceError>,
) -> Result<T, ServiceError> {
	if let Err(err) = rollback {
		tracing::error!("Rollback failed after `{}`: {}", cause, err);
	}
	Err(cause)
}

pub async fn connect(
	url: &str,
	max_connections: u32,
) -> Result<PgPool, ServiceError> {
	let pool = PgPoolOptions::new().max_connections(max_connections).connect(url).await?;
	Ok(pool)
}

pub async fn migrate(pool: &PgPool) -> Result<(), ServiceError> {
	sqlx::migrate!("./migrations").run(pool).await?;
	Ok(())
}
