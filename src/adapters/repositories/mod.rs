pub(crate) mod chat_repository;
pub(crate) mod hotel_repository;
pub mod memory;
pub(crate) mod post_repository;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
	domain::{
		chat::entity::ChatMessage,
		hotel::entity::{Booking, Hotel, HotelFilter},
		post::entity::{LikeOutcome, Post, PostView},
	},
	services::response::ServiceError,
};

pub use memory::MemoryStorage;

#[async_trait]
pub trait ChatRepository {
	async fn insert_chat_message(
		&self,
		message: &ChatMessage,
	) -> Result<(), ServiceError>;

	/// The `limit` most recent messages of a location newer than `since`, oldest first.
	async fn list_chat_messages(
		&self,
		location: &str,
		since: Option<DateTime<Utc>>,
		limit: i64,
	) -> Result<Vec<ChatMessage>, ServiceError>;
}

#[async_trait]
pub trait PostRepository {
	async fn insert_post(
		&self,
		post: &Post,
	) -> Result<(), ServiceError>;

	/// Newest first; `liked` is computed for `viewer`.
	async fn list_posts(
		&self,
		location: &str,
		viewer: Option<&str>,
		limit: i64,
	) -> Result<Vec<PostView>, ServiceError>;

	/// Likes the post when `user_id` has not liked it yet, unlikes it otherwise.
	/// The like row and the counter change together.
	async fn toggle_like(
		&self,
		post_id: Uuid,
		user_id: &str,
	) -> Result<LikeOutcome, ServiceError>;
}

#[async_trait]
pub trait HotelRepository {
	async fn insert_hotel(
		&self,
		hotel: &Hotel,
	) -> Result<(), ServiceError>;

	/// Cheapest first.
	async fn list_hotels(
		&self,
		filter: &HotelFilter,
	) -> Result<Vec<Hotel>, ServiceError>;

	async fn find_hotel(
		&self,
		id: Uuid,
	) -> Result<Option<Hotel>, ServiceError>;

	async fn insert_booking(
		&self,
		booking: &Booking,
	) -> Result<(), ServiceError>;

	/// Newest first.
	async fn list_bookings(
		&self,
		user_id: &str,
	) -> Result<Vec<Booking>, ServiceError>;
}

pub trait Storage: ChatRepository + PostRepository + HotelRepository + Send + Sync {
	fn kind(&self) -> &'static str;
}

pub struct PgStorage {
	pub pool: PgPool,
}

impl PgStorage {
	pub fn new(pool: PgPool) -> Self {
		Self { pool }
	}
}

impl Storage for PgStorage {
	fn kind(&self) -> &'static str {
		"postgres"
	}
}
