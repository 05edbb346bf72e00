use axum::{
	http::StatusCode,
	response::{IntoResponse, Response},
	Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
	#[error("{0}")]
	BadRequest(String),

	#[error("{0} not found")]
	EntityNotFound(&'static str),

	#[error("no results for {0}")]
	NoResults(String),

	#[error("{0} is not configured")]
	NotConfigured(&'static str),

	#[error("invalid configuration: {0}")]
	ConfigError(String),

	#[error("database error: {0}")]
	DatabaseError(#[from] sqlx::Error),

	#[error("migration error: {0}")]
	MigrationError(#[from] sqlx::migrate::MigrateError),

	#[error("transaction error: {0}")]
	TransactionError(&'static str),

	#[error("http error: {0}")]
	HttpError(reqwest::Error),

	#[error("upstream error: {0}")]
	UpstreamError(String),

	#[error("parsing error: {0}")]
	ParsingError(String),

	#[error("io error: {0}")]
	IoError(#[from] std::io::Error),
}

// Request urls carry API keys in their query, so they never reach a message.
impl From<reqwest::Error> for ServiceError {
	fn from(value: reqwest::Error) -> Self {
		Self::HttpError(value.without_url())
	}
}

impl ServiceError {
	pub fn bad_request(message: impl Into<String>) -> Self {
		Self::BadRequest(message.into())
	}

	pub fn status(&self) -> StatusCode {
		match self {
			ServiceError::BadRequest(_) => StatusCode::BAD_REQUEST,
			ServiceError::EntityNotFound(_) | ServiceError::NoResults(_) => StatusCode::NOT_FOUND,
			_ => StatusCode::INTERNAL_SERVER_ERROR,
		}
	}
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
	pub error: String,
}

impl IntoResponse for ServiceError {
	fn into_response(self) -> Response {
		let status = self.status();
		if status.is_server_error() {
			tracing::error!("Request failed: {}", self);
		} else {
			tracing::warn!("Request rejected: {}", self);
		}

		(status, Json(ErrorResponse { error: self.to_string() })).into_response()
	}
}
