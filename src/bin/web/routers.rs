use axum::{
	http::{
		header::{AUTHORIZATION, CONTENT_TYPE},
		HeaderValue, Method,
	},
	Router,
};
use tower::ServiceBuilder;
use tower_http::{
	cors::{AllowOrigin, Any, CorsLayer},
	trace::TraceLayer,
};
use travel::{config::Config, create_routes, AppState};

pub fn app(
	state: AppState,
	config: &Config,
) -> Router {
	create_routes(state).layer(
		ServiceBuilder::new()
			.layer(TraceLayer::new_for_http())
			.layer(cors_layer(&config.allow_origins)),
	)
}

/// `*` allows any origin, otherwise a comma separated list of origins.
pub fn cors_layer(allow_origins: &str) -> CorsLayer {
	let cors = CorsLayer::new()
		.allow_methods([Method::GET, Method::POST, Method::OPTIONS])
		.allow_headers([CONTENT_TYPE, AUTHORIZATION]);

	if allow_origins.trim() == "*" {
		return cors.allow_origin(Any);
	}

	let origins: Vec<HeaderValue> = allow_origins
		.split(',')
		.map(str::trim)
		.filter(|origin| !origin.is_empty())
		.filter_map(|origin| match origin.parse::<HeaderValue>() {
			Ok(value) => Some(value),
			Err(_) => {
				tracing::warn!("Ignoring invalid origin `{}`", origin);
				None
			}
		})
		.collect();
	cors.allow_origin(AllowOrigin::list(origins))
}
