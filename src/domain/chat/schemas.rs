use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::entity::ChatMessage;
use crate::common::validation::{max_chars, require, Validate};
use crate::services::response::ServiceError;

pub const MAX_MESSAGE_CHARS: usize = 2000;

#[derive(Debug, Deserialize, Serialize)]
pub struct SendChatMessage {
	pub location: String,
	pub user_id: String,
	pub user_name: String,
	pub message: String,
}

impl Validate for SendChatMessage {
	fn validate(&self) -> Result<(), ServiceError> {
		require("location", &self.location)?;
		require("user_id", &self.user_id)?;
		require("user_name", &self.user_name)?;
		require("message", &self.message)?;
		max_chars("message", self.message.trim(), MAX_MESSAGE_CHARS)
	}
}

#[derive(Debug, Deserialize, Serialize)]
pub struct FetchChatMessages {
	pub location: String,
	#[serde(default)]
	pub limit: Option<i64>,
	#[serde(default)]
	pub since: Option<DateTime<Utc>>,
}

impl Validate for FetchChatMessages {
	fn validate(&self) -> Result<(), ServiceError> {
		require("location", &self.location)
	}
}

#[derive(Debug, Deserialize)]
pub struct ChatRoomQuery {
	pub location: String,
}

/// Text frame a websocket client sends to write into the room it joined.
#[derive(Debug, Deserialize, Serialize)]
pub struct ClientMessage {
	pub user_id: String,
	pub user_name: String,
	pub message: String,
}

impl ClientMessage {
	pub fn into_send(
		self,
		location: &str,
	) -> SendChatMessage {
		SendChatMessage {
			location: location.to_string(),
			user_id: self.user_id,
			user_name: self.user_name,
			message: self.message,
		}
	}
}

#[derive(Debug, PartialEq, Eq)]
pub enum SocketError {
	UserCloseConnection,
	Unsupported,
	Malformed(String),
}

impl TryFrom<axum::extract::ws::Message> for ClientMessage {
	type Error = SocketError;
	fn try_from(value: axum::extract::ws::Message) -> Result<Self, Self::Error> {
		match value {
			axum::extract::ws::Message::Text(string_value) => {
				serde_json::from_str::<ClientMessage>(&string_value).map_err(|err| SocketError::Malformed(err.to_string()))
			}
			axum::extract::ws::Message::Binary(_) => Err(SocketError::Malformed("binary frames are not supported".into())),
			axum::extract::ws::Message::Close(_close_frame) => Err(SocketError::UserCloseConnection),
			_ => Err(SocketError::Unsupported),
		}
	}
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ChatMessageSent {
	pub message: ChatMessage,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ChatMessageList {
	pub messages: Vec<ChatMessage>,
}
