use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{ChatRepository, HotelRepository, PostRepository, Storage};
use crate::{
	domain::{
		chat::entity::ChatMessage,
		hotel::entity::{Booking, Hotel, HotelFilter},
		location_key,
		post::entity::{LikeOutcome, Post, PostLike, PostView},
	},
	services::response::ServiceError,
};

#[derive(Default)]
struct Tables {
	chat_messages: Vec<ChatMessage>,
	posts: Vec<Post>,
	post_likes: Vec<PostLike>,
	hotels: Vec<Hotel>,
	bookings: Vec<Booking>,
}

/// Process local store used when no database is configured. Nothing survives a restart.
#[derive(Clone, Default)]
pub struct MemoryStorage {
	tables: Arc<RwLock<Tables>>,
}

impl MemoryStorage {
	pub fn new() -> Self {
		Self::default()
	}
}

impl Storage for MemoryStorage {
	fn kind(&self) -> &'static str {
		"memory"
	}
}

fn same_location(
	stored: &str,
	key: &str,
) -> bool {
	location_key(stored) == key
}

#[async_trait]
impl ChatRepository for MemoryStorage {
	async fn insert_chat_message(
		&self,
		message: &ChatMessage,
	) -> Result<(), ServiceError> {
		self.tables.write().await.chat_messages.push(message.clone());
		Ok(())
	}

	async fn list_chat_messages(
		&self,
		location: &str,
		since: Option<DateTime<Utc>>,
		limit: i64,
	) -> Result<Vec<ChatMessage>, ServiceError> {
		let key = location_key(location);
		let tables = self.tables.read().await;
		let mut messages: Vec<ChatMessage> = tables
			.chat_messages
			.iter()
			.filter(|m| same_location(&m.location, &key))
			.filter(|m| since.map_or(true, |since| m.create_dt > since))
			.cloned()
			.collect();
		messages.sort_by_key(|m| m.create_dt);

		let keep = usize::try_from(limit).unwrap_or(0);
		let skip = messages.len().saturating_sub(keep);
		Ok(messages.split_off(skip))
	}
}

#[async_trait]
impl PostRepository for MemoryStorage {
	async fn insert_post(
		&self,
		post: &Post,
	) -> Result<(), ServiceError> {
		self.tables.write().await.posts.push(post.clone());
		Ok(())
	}

	async fn list_posts(
		&self,
		location: &str,
		viewer: Option<&str>,
		limit: i64,
	) -> Result<Vec<PostView>, ServiceError> {
		let key = location_key(location);
		let tables = self.tables.read().await;
		let mut posts: Vec<PostView> = tables
			.posts
			.iter()
			.filter(|p| same_location(&p.location, &key))
			.map(|p| PostView {
				post: p.clone(),
				liked: viewer.is_some_and(|viewer| {
					tables.post_likes.iter().any(|like| like.post_id == p.id && like.user_id == viewer)
				}),
			})
			.collect();
		posts.sort_by(|a, b| b.post.create_dt.cmp(&a.post.create_dt));
		posts.truncate(usize::try_from(limit).unwrap_or(0));
		Ok(posts)
	}

	async fn toggle_like(
		&self,
		post_id: Uuid,
		user_id: &str,
	) -> Result<LikeOutcome, ServiceError> {
		let mut tables = self.tables.write().await;
		let Tables { posts, post_likes, .. } = &mut *tables;

		let post = posts
			.iter_mut()
			.find(|p| p.id == post_id)
			.ok_or(ServiceError::EntityNotFound("post"))?;

		let existing = post_likes.iter().position(|like| like.post_id == post_id && like.user_id == user_id);
		let liked = match existing {
			Some(index) => {
				post_likes.swap_remove(index);
				post.likes = (post.likes - 1).max(0);
				false
			}
			None => {
				post_likes.push(PostLike {
					post_id,
					user_id: user_id.to_string(),
					create_dt: Utc::now(),
				});
				post.likes += 1;
				true
			}
		};

		Ok(LikeOutcome {
			post_id,
			liked,
			likes: post.likes,
		})
	}
}

#[async_trait]
impl HotelRepository for MemoryStorage {
	async fn insert_hotel(
		&self,
		hotel: &Hotel,
	) -> Result<(), ServiceError> {
		self.tables.write().await.hotels.push(hotel.clone());
		Ok(())
	}

	async fn list_hotels(
		&self,
		filter: &HotelFilter,
	) -> Result<Vec<Hotel>, ServiceError> {
		let location = filter.location.as_deref().map(location_key);
		let tables = self.tables.read().await;
		let mut hotels: Vec<Hotel> = tables
			.hotels
			.iter()
			.filter(|h| location.as_deref().map_or(true, |key| same_location(&h.location, key)))
			.filter(|h| filter.owner_id.as_deref().map_or(true, |owner| h.owner_id == owner))
			.filter(|h| filter.max_price.map_or(true, |max| h.price_per_night <= max))
			.cloned()
			.collect();
		hotels.sort_by(|a, b| {
			a.price_per_night
				.total_cmp(&b.price_per_night)
				.then_with(|| b.create_dt.cmp(&a.create_dt))
		});
		Ok(hotels)
	}

	async fn find_hotel(
		&self,
		id: Uuid,
	) -> Result<Option<Hotel>, ServiceError> {
		Ok(self.tables.read().await.hotels.iter().find(|h| h.id == id).cloned())
	}

	async fn insert_booking(
		&self,
		booking: &Booking,
	) -> Result<(), ServiceError> {
		let mut tables = self.tables.write().await;
		if !tables.hotels.iter().any(|h| h.id == booking.hotel_id) {
			return Err(ServiceError::EntityNotFound("hotel"));
		}
		tables.bookings.push(booking.clone());
		Ok(())
	}

	async fn list_bookings(
		&self,
		user_id: &str,
	) -> Result<Vec<Booking>, ServiceError> {
		let user_id = user_id.trim();
		let tables = self.tables.read().await;
		let mut bookings: Vec<Booking> = tables.bookings.iter().filter(|b| b.user_id == user_id).cloned().collect();
		bookings.sort_by(|a, b| b.create_dt.cmp(&a.create_dt));
		Ok(bookings)
	}
}
