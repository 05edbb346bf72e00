#![allow(dead_code)]
use std::{collections::HashMap, sync::Arc};

use axum::{
	body::Body,
	http::{Request, StatusCode},
	Router,
};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;
use travel::{adapters::repositories::MemoryStorage, config::Config, create_routes, AppState};

pub fn test_config(
	maps_base_url: Option<&str>,
	gemini_base_url: Option<&str>,
) -> Config {
	let mut env: HashMap<&str, String> = HashMap::new();
	if let Some(base_url) = maps_base_url {
		env.insert("GOOGLE_MAPS_BASE_URL", base_url.to_string());
		env.insert("GOOGLE_MAPS_API_KEY", "maps-key".to_string());
	}
	if let Some(base_url) = gemini_base_url {
		env.insert("GEMINI_BASE_URL", base_url.to_string());
		env.insert("GEMINI_API_KEY", "gemini-key".to_string());
		env.insert("GEMINI_MODEL", "test-model".to_string());
	}
	env.insert("HTTP_TIMEOUT_SECS", "5".to_string());
	Config::from_lookup(|key| env.get(key).cloned()).unwrap()
}

pub fn app_state(config: &Config) -> AppState {
	AppState::new(config, Arc::new(MemoryStorage::new())).unwrap()
}

pub fn router() -> Router {
	create_routes(app_state(&test_config(None, None)))
}

async fn send(
	router: &Router,
	request: Request<Body>,
) -> (StatusCode, Value) {
	let response = router.clone().oneshot(request).await.unwrap();
	let status = response.status();
	let bytes = response.into_body().collect().await.unwrap().to_bytes();
	let body = if bytes.is_empty() {
		Value::Null
	} else {
		serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
	};
	(status, body)
}

pub async fn post_raw(
	router: &Router,
	uri: &str,
	body: &str,
) -> (StatusCode, Value) {
	let request = Request::builder()
		.method("POST")
		.uri(uri)
		.header("content-type", "application/json")
		.body(Body::from(body.to_string()))
		.unwrap();
	send(router, request).await
}

pub async fn post_json(
	router: &Router,
	uri: &str,
	body: Value,
) -> (StatusCode, Value) {
	post_raw(router, uri, &body.to_string()).await
}

pub async fn get(
	router: &Router,
	uri: &str,
) -> (StatusCode, Value) {
	let request = Request::builder().method("GET").uri(uri).body(Body::empty()).unwrap();
	send(router, request).await
}

/// Serves `router` on an ephemeral local port and returns its base url.
pub async fn spawn(router: Router) -> String {
	let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
	let addr = listener.local_addr().unwrap();
	tokio::spawn(async move { axum::serve(listener, router).await.unwrap() });
	format!("http://{addr}")
}
