use axum::{
	extract::{Query, State, WebSocketUpgrade},
	http::StatusCode,
	response::IntoResponse,
	Json,
};
use axum_macros::debug_handler;

use crate::{
	common::validation::{require, ValidJson},
	domain::chat::schemas::{ChatMessageList, ChatMessageSent, ChatRoomQuery, FetchChatMessages, SendChatMessage},
	services::{handlers::ChatHandler, response::ServiceError},
	state::AppState,
};

#[debug_handler]
pub async fn send_message(
	State(state): State<AppState>,
	ValidJson(request): ValidJson<SendChatMessage>,
) -> Result<impl IntoResponse, ServiceError> {
	let message = ChatHandler::send(&state, request).await?;
	Ok((StatusCode::CREATED, Json(ChatMessageSent { message })))
}

pub async fn fetch_messages(
	State(state): State<AppState>,
	ValidJson(request): ValidJson<FetchChatMessages>,
) -> Result<Json<ChatMessageList>, ServiceError> {
	let messages = ChatHandler::fetch(&state, request).await?;
	Ok(Json(ChatMessageList { messages }))
}

pub async fn chat_websocket_route(
	ws: WebSocketUpgrade,
	Query(room): Query<ChatRoomQuery>,
	State(state): State<AppState>,
) -> Result<impl IntoResponse, ServiceError> {
	require("location", &room.location)?;
	let location = room.location.trim().to_string();

	Ok(ws.on_upgrade(|socket| ChatHandler::run_socket_broker(socket, location, state)))
}
