use std::{sync::Arc, time::Duration, time::SystemTime};

use crate::{
	adapters::{gemini::GeminiClient, google_maps::MapsClient, repositories::Storage},
	config::Config,
	domain::chat::ChatRooms,
	services::response::ServiceError,
};

/// Everything a request handler may touch.
#[derive(Clone)]
pub struct AppState {
	pub storage: Arc<dyn Storage>,
	pub rooms: ChatRooms,
	pub maps: MapsClient,
	pub gemini: GeminiClient,
	pub started_at: SystemTime,
}

impl AppState {
	pub fn new(
		config: &Config,
		storage: Arc<dyn Storage>,
	) -> Result<Self, ServiceError> {
		let http = reqwest::Client::builder()
			.timeout(Duration::from_secs(config.http_timeout_secs))
			.build()?;

		Ok(Self {
			storage,
			rooms: ChatRooms::default(),
			maps: MapsClient::new(http.clone(), &config.google_maps_base_url, config.google_maps_api_key.clone()),
			gemini: GeminiClient::new(
				http,
				&config.gemini_base_url,
				&config.gemini_model,
				config.gemini_api_key.clone(),
			),
			started_at: SystemTime::now(),
		})
	}
}
