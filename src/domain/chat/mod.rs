pub mod entity;
pub mod schemas;
use std::{
	collections::{hash_map::Entry, HashMap},
	ops::{Deref, DerefMut},
	sync::Arc,
};

// domain for the location scoped chat
use chrono::Utc;
use tokio::sync::{broadcast, Mutex, MutexGuard};
use uuid::Uuid;

use self::{entity::ChatMessage, schemas::SendChatMessage};
use super::location_key;

pub const ROOM_CAPACITY: usize = 100;

impl From<SendChatMessage> for ChatMessage {
	fn from(value: SendChatMessage) -> Self {
		ChatMessage {
			id: Uuid::new_v4(),
			location: value.location.trim().to_string(),
			user_id: value.user_id.trim().to_string(),
			user_name: value.user_name.trim().to_string(),
			message: value.message.trim().to_string(),
			create_dt: Utc::now(),
		}
	}
}

#[derive(Default)]
pub struct ChatState {
	pub room: HashMap<RoomKey, Chatters>,
}

impl Deref for ChatState {
	type Target = HashMap<RoomKey, Chatters>;
	fn deref(&self) -> &Self::Target {
		&self.room
	}
}
impl DerefMut for ChatState {
	fn deref_mut(&mut self) -> &mut Self::Target {
		&mut self.room
	}
}

/// Live chat rooms, one broadcast channel per location.
#[derive(Clone, Default)]
pub struct ChatRooms(pub Arc<Mutex<ChatState>>);
impl ChatRooms {
	pub(crate) async fn write(&self) -> MutexGuard<'_, ChatState> {
		self.0.lock().await
	}

	/// Joins the room of `location`, creating it when nobody is listening yet.
	/// The receiver is taken while the registry is locked.
	pub async fn subscribe(
		&self,
		location: &str,
	) -> broadcast::Receiver<String> {
		match self.write().await.entry(location.into()) {
			Entry::Occupied(occupied_entry) => occupied_entry.get().subscribe(),
			Entry::Vacant(vacant_entry) => {
				let (tx, rx) = broadcast::channel(ROOM_CAPACITY);
				vacant_entry.insert(tx.into());
				rx
			}
		}
	}

	/// Pushes the message to everyone listening on its location.
	/// Returns how many subscribers received it; rooms nobody listens to are dropped.
	pub async fn publish(
		&self,
		message: &ChatMessage,
	) -> usize {
		let key: RoomKey = message.location.as_str().into();
		let mut state = self.write().await;
		let Some(chatters) = state.get(&key) else {
			return 0;
		};

		let payload = match serde_json::to_string(message) {
			Ok(payload) => payload,
			Err(err) => {
				tracing::error!("Failed to serialize chat message {}: {:?}", message.id, err);
				return 0;
			}
		};
		match chatters.send(payload) {
			Ok(received) => received,
			Err(_) => {
				state.remove(&key);
				0
			}
		}
	}

	pub async fn room_count(&self) -> usize {
		self.write().await.len()
	}
}

#[derive(Eq, Hash, PartialEq, Clone, Debug)]
pub struct RoomKey(String);
impl From<&str> for RoomKey {
	fn from(value: &str) -> Self {
		Self(location_key(value))
	}
}

#[derive(Clone)]
pub struct Chatters(pub(crate) broadcast::Sender<String>);
impl From<broadcast::Sender<String>> for Chatters {
	fn from(value: broadcast::Sender<String>) -> Self {
		Self(value)
	}
}
impl Deref for Chatters {
	type Target = broadcast::Sender<String>;
	fn deref(&self) -> &Self::Target {
		&self.0
	}
}

#[cfg(test)]
mod test {
	use super::{schemas::SendChatMessage, ChatRooms};
	use crate::domain::chat::entity::ChatMessage;

	fn message(location: &str) -> ChatMessage {
		SendChatMessage {
			location: location.into(),
			user_id: "u1".into(),
			user_name: "Migo".into(),
			message: " hello ".into(),
		}
		.into()
	}

	#[tokio::test]
	async fn test_publish_reaches_room_subscribers() {
		'_given: {
			let rooms = ChatRooms::default();
			let mut rx = rooms.subscribe("Hanoi").await;

			'_when: {
				let received = rooms.publish(&message(" hanoi")).await;

				'_then: {
					assert_eq!(received, 1);
					let payload = rx.recv().await.unwrap();
					let echoed: ChatMessage = serde_json::from_str(&payload).unwrap();
					assert_eq!(echoed.message, "hello");
					assert_eq!(echoed.location, "hanoi");
				}
			}
		}
	}

	#[tokio::test]
	async fn test_publish_without_room_is_noop() {
		let rooms = ChatRooms::default();
		assert_eq!(rooms.publish(&message("Nowhere")).await, 0);
		assert_eq!(rooms.room_count().await, 0);
	}

	#[tokio::test]
	async fn test_abandoned_room_is_dropped() {
		let rooms = ChatRooms::default();
		{
			let _rx = rooms.subscribe("Cusco").await;
		}
		assert_eq!(rooms.room_count().await, 1);

		assert_eq!(rooms.publish(&message("Cusco")).await, 0);
		assert_eq!(rooms.room_count().await, 0);
	}

	#[tokio::test]
	async fn test_rejoining_dropped_room_gets_live_channel() {
		'_given: {
			let rooms = ChatRooms::default();
			drop(rooms.subscribe("Quito").await);
			assert_eq!(rooms.publish(&message("Quito")).await, 0);

			'_when: {
				let mut rx = rooms.subscribe("quito").await;
				let received = rooms.publish(&message("Quito")).await;

				'_then: {
					assert_eq!(received, 1);
					assert_eq!(rooms.room_count().await, 1);
					assert!(rx.recv().await.is_ok());
				}
			}
		}
	}

	#[tokio::test]
	async fn test_concurrent_joins_share_one_channel() {
		let rooms = ChatRooms::default();
		let joins = (0..16).map(|_| {
			let rooms = rooms.clone();
			tokio::spawn(async move { rooms.subscribe("Lima").await })
		});
		let mut receivers = Vec::new();
		for join in joins {
			receivers.push(join.await.unwrap());
		}

		assert_eq!(rooms.room_count().await, 1);
		assert_eq!(rooms.publish(&message("Lima")).await, receivers.len());
		for rx in receivers.iter_mut() {
			assert!(rx.recv().await.is_ok());
		}
	}
}
