use std::{fmt::Display, str::FromStr};

use crate::services::response::ServiceError;

pub const DEFAULT_GOOGLE_MAPS_BASE_URL: &str = "https://maps.googleapis.com/maps/api";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";

#[derive(Clone, Debug)]
pub struct Config {
	/// Which errors we want to log
	pub log_level: String,

	/// Port server is listening to
	pub server_ip_port: String,

	/// Falls back to the in-process store when unset
	pub database_url: Option<String>,
	pub database_max_connections: u32,
	pub allow_origins: String,

	pub google_maps_api_key: Option<String>,
	pub google_maps_base_url: String,
	pub gemini_api_key: Option<String>,
	pub gemini_model: String,
	pub gemini_base_url: String,

	/// Timeout applied to every outbound call to Google and Gemini
	pub http_timeout_secs: u64,
}

impl Config {
	/// Loads `.env` when present, then reads the process environment.
	pub fn new() -> Result<Config, ServiceError> {
		dotenv::dotenv().ok();
		Self::from_lookup(|key| std::env::var(key).ok())
	}

	pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Config, ServiceError> {
		let var = |key: &str| lookup(key).map(|value| value.trim().to_string()).filter(|value| !value.is_empty());

		Ok(Config {
			log_level: var("LOG_LEVEL").unwrap_or("warn".to_string()),
			server_ip_port: var("SERVER_IP_PORT").unwrap_or("0.0.0.0:80".into()),
			database_url: var("DATABASE_URL"),
			database_max_connections: parse_or(var("DATABASE_MAX_CONNECTIONS"), "DATABASE_MAX_CONNECTIONS", 30)?,
			allow_origins: var("ALLOW_ORIGINS").unwrap_or("http://localhost:3000,http://localhost:3001".to_string()),
			google_maps_api_key: var("GOOGLE_MAPS_API_KEY"),
			google_maps_base_url: var("GOOGLE_MAPS_BASE_URL").unwrap_or(DEFAULT_GOOGLE_MAPS_BASE_URL.into()),
			gemini_api_key: var("GEMINI_API_KEY"),
			gemini_model: var("GEMINI_MODEL").unwrap_or(DEFAULT_GEMINI_MODEL.into()),
			gemini_base_url: var("GEMINI_BASE_URL").unwrap_or(DEFAULT_GEMINI_BASE_URL.into()),
			http_timeout_secs: parse_or(var("HTTP_TIMEOUT_SECS"), "HTTP_TIMEOUT_SECS", 30)?,
		})
	}
}

fn parse_or<T: FromStr>(value: Option<String>, key: &str, default: T) -> Result<T, ServiceError>
where
	T::Err: Display,
{
	match value {
		None => Ok(default),
		Some(raw) => raw
			.parse()
			.map_err(|err| ServiceError::ConfigError(format!("{key}={raw}: {err}"))),
	}
}

#[cfg(test)]
mod test {
	use std::collections::HashMap;

	use super::Config;
	use crate::services::response::ServiceError;

	fn config_from(pairs: &[(&str, &str)]) -> Result<Config, ServiceError> {
		let env: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
		Config::from_lookup(|key| env.get(key).cloned())
	}

	#[test]
	fn test_defaults_when_environment_is_empty() {
		let config = config_from(&[]).unwrap();

		assert_eq!(config.log_level, "warn");
		assert_eq!(config.server_ip_port, "0.0.0.0:80");
		assert!(config.database_url.is_none());
		assert_eq!(config.database_max_connections, 30);
		assert_eq!(config.gemini_model, "gemini-1.5-flash");
		assert_eq!(config.http_timeout_secs, 30);
		assert!(config.google_maps_api_key.is_none());
	}

	#[test]
	fn test_blank_values_count_as_unset() {
		let config = config_from(&[("DATABASE_URL", "   "), ("GEMINI_API_KEY", "")]).unwrap();

		assert!(config.database_url.is_none());
		assert!(config.gemini_api_key.is_none());
	}

	#[test]
	fn test_invalid_number_is_a_config_error() {
		let err = config_from(&[("HTTP_TIMEOUT_SECS", "soon")]).unwrap_err();
		assert!(matches!(err, ServiceError::ConfigError(_)));
	}

	#[test]
	fn test_new_reads_process_environment() {
		std::env::set_var("SERVER_IP_PORT", "127.0.0.1:8088");
		let config = Config::new().unwrap();
		assert_eq!(config.server_ip_port, "127.0.0.1:8088");
	}
}
