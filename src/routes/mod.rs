mod chat;
mod hotel;
mod place;
mod posts;
mod trip;

use axum::{
	extract::State,
	http::StatusCode,
	response::IntoResponse,
	routing::{get, post},
	Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::{services::response::ErrorResponse, state::AppState};

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
	pub status: String,
	pub uptime_secs: u64,
	pub storage: String,
}

pub fn create_routes(state: AppState) -> Router {
	let api = Router::new()
		.route("/chat/send", post(chat::send_message))
		.route("/chat/fetch", post(chat::fetch_messages))
		.route("/chat/ws", get(chat::chat_websocket_route))
		.route("/posts/create", post(posts::create_post))
		.route("/posts/list", post(posts::list_posts))
		.route("/posts/like", post(posts::like_post))
		.route("/hotels/add", post(hotel::add_hotel))
		.route("/hotels/list", post(hotel::list_hotels))
		.route("/hotels/book", post(hotel::book_hotel))
		.route("/hotels/bookings", post(hotel::list_bookings))
		.route("/geocode", post(place::geocode))
		.route("/reverse-geocode", post(place::reverse_geocode))
		.route("/places/search", post(place::search_places))
		.route("/trip/plan", post(trip::plan_trip))
		.route("/trip/research", post(trip::research_destination));

	Router::new()
		.route("/health", get(health))
		.nest("/api", api)
		.fallback(not_found)
		.with_state(state)
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
	let uptime_secs = state.started_at.elapsed().map(|d| d.as_secs()).unwrap_or(0);
	(
		StatusCode::OK,
		Json(HealthResponse {
			status: "ok".to_string(),
			uptime_secs,
			storage: state.storage.kind().to_string(),
		}),
	)
}

async fn not_found() -> impl IntoResponse {
	(
		StatusCode::NOT_FOUND,
		Json(ErrorResponse {
			error: "endpoint not found".to_string(),
		}),
	)
}
