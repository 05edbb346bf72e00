use axum::extract::ws::{Message, WebSocket};
use futures::{
	stream::{SplitSink, SplitStream},
	SinkExt, StreamExt,
};
use tokio::{
	sync::{broadcast, mpsc},
	task::JoinHandle,
};

use crate::{
	common::validation::Validate,
	domain::{
		chat::{
			entity::ChatMessage,
			schemas::{ClientMessage, FetchChatMessages, SendChatMessage, SocketError},
		},
		clamp_limit,
	},
	services::response::{ErrorResponse, ServiceError},
	state::AppState,
};

const REPLY_BUFFER: usize = 16;

pub struct ChatHandler;
impl ChatHandler {
	/// Stores the message, then pushes it to live subscribers of its location.
	pub async fn send(
		state: &AppState,
		request: SendChatMessage,
	) -> Result<ChatMessage, ServiceError> {
		let message: ChatMessage = request.into();
		state.storage.insert_chat_message(&message).await?;

		let received = state.rooms.publish(&message).await;
		tracing::debug!("Chat message {} in `{}` pushed to {} subscriber(s)", message.id, message.location, received);
		Ok(message)
	}

	pub async fn fetch(
		state: &AppState,
		request: FetchChatMessages,
	) -> Result<Vec<ChatMessage>, ServiceError> {
		state
			.storage
			.list_chat_messages(&request.location, request.since, clamp_limit(request.limit))
			.await
	}

	/// This function deals with a single websocket connection, i.e., a single
	/// connected client / user, for which we will spawn two independent tasks (for
	/// receiving / sending chat messages).
	pub async fn run_socket_broker(
		stream: WebSocket,
		location: String,
		state: AppState,
	) {
		let (sender, receiver) = stream.split();
		let room = state.rooms.subscribe(&location).await;
		tracing::info!("User joined chat room `{}`", location);

		// Errors for this user only, the room never sees them
		let (reply_tx, reply_rx) = mpsc::channel(REPLY_BUFFER);

		let mut send_task = ChatHandler::_send_messages_from_room_to_this_user(room, reply_rx, sender);

		let mut recv_task = ChatHandler::_receive_messages_from_this_user(receiver, location.clone(), reply_tx, state);

		// Waits on multiple concurrent branches, returning when the first branch completes,
		// cancelling the remaining branches.
		tokio::select! {
			_ = (&mut send_task) => recv_task.abort(),
			_ = (&mut recv_task) => send_task.abort(),
		};
		tracing::info!("User left chat room `{}`", location);
	}

	fn _send_messages_from_room_to_this_user(
		mut room: broadcast::Receiver<String>,
		mut replies: mpsc::Receiver<String>,
		mut sender: SplitSink<WebSocket, Message>,
	) -> JoinHandle<()> {
		tokio::spawn(async move {
			loop {
				let outgoing = tokio::select! {
					msg = room.recv() => match msg {
						Ok(msg) => msg,
						Err(broadcast::error::RecvError::Lagged(skipped)) => {
							tracing::warn!("Chat subscriber lagged behind, {} message(s) skipped", skipped);
							continue;
						}
						Err(broadcast::error::RecvError::Closed) => break,
					},
					reply = replies.recv() => match reply {
						Some(reply) => reply,
						None => break,
					},
				};
				if sender.send(Message::Text(outgoing)).await.is_err() {
					break;
				}
			}
		})
	}

	fn _receive_messages_from_this_user(
		mut receiver: SplitStream<WebSocket>,
		location: String,
		replies: mpsc::Sender<String>,
		state: AppState,
	) -> JoinHandle<()> {
		tokio::spawn(async move {
			while let Some(Ok(frame)) = receiver.next().await {
				let outcome = match ClientMessage::try_from(frame) {
					Ok(client_message) => {
						let request = client_message.into_send(&location);
						match request.validate() {
							Ok(()) => ChatHandler::send(&state, request).await.map(|_| ()),
							Err(err) => Err(err),
						}
					}
					Err(SocketError::UserCloseConnection) => break,
					Err(SocketError::Unsupported) => continue,
					Err(SocketError::Malformed(reason)) => Err(ServiceError::BadRequest(reason)),
				};

				if let Err(err) = outcome {
					tracing::warn!("Rejected chat frame in `{}`: {}", location, err);
					if replies.send(error_frame(&err)).await.is_err() {
						break;
					}
				}
			}
		})
	}
}

fn error_frame(err: &ServiceError) -> String {
	serde_json::to_string(&ErrorResponse { error: err.to_string() }).unwrap_or_else(|_| err.to_string())
}
