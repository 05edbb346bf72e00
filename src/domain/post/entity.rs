use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct Post {
	pub id: Uuid,
	pub user_id: String,
	pub user_name: String,
	pub location: String,
	pub content: String,
	pub image_url: Option<String>,
	pub likes: i64,
	pub create_dt: DateTime<Utc>,
}

/// A post as seen by one viewer.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct PostView {
	#[serde(flatten)]
	#[sqlx(flatten)]
	pub post: Post,
	pub liked: bool,
}

/// One user's like of one post.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct PostLike {
	pub post_id: Uuid,
	pub user_id: String,
	pub create_dt: DateTime<Utc>,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct LikeOutcome {
	pub post_id: Uuid,
	pub liked: bool,
	pub likes: i64,
}
