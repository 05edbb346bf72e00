use axum::{
	async_trait,
	extract::{FromRequest, Request},
	Json,
};
use serde::de::DeserializeOwned;

use crate::services::response::ServiceError;

/// Field level checks run on a request body right after it is deserialized.
pub trait Validate {
	fn validate(&self) -> Result<(), ServiceError>;
}

/// `Json` extractor that turns rejections and validation failures into `ServiceError::BadRequest`.
pub struct ValidJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidJson<T>
where
	T: DeserializeOwned + Validate,
	S: Send + Sync,
{
	type Rejection = ServiceError;

	async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
		let Json(value) = Json::<T>::from_request(req, state)
			.await
			.map_err(|rejection| ServiceError::BadRequest(rejection.body_text()))?;
		value.validate()?;
		Ok(Self(value))
	}
}

pub fn require(field: &str, value: &str) -> Result<(), ServiceError> {
	if value.trim().is_empty() {
		return Err(ServiceError::bad_request(format!("{field} is required")));
	}
	Ok(())
}

pub fn max_chars(field: &str, value: &str, max: usize) -> Result<(), ServiceError> {
	if value.chars().count() > max {
		return Err(ServiceError::bad_request(format!("{field} must be at most {max} characters")));
	}
	Ok(())
}

pub fn in_range(field: &str, value: f64, min: f64, max: f64) -> Result<(), ServiceError> {
	if !value.is_finite() || value < min || value > max {
		return Err(ServiceError::bad_request(format!("{field} must be between {min} and {max}")));
	}
	Ok(())
}

/// Trims the value and drops it when nothing is left.
pub fn non_blank(value: Option<String>) -> Option<String> {
	value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}
