use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::entity::{Post, PostView};
use crate::common::validation::{max_chars, require, Validate};
use crate::services::response::ServiceError;

pub const MAX_CONTENT_CHARS: usize = 5000;

#[derive(Debug, Deserialize, Serialize)]
pub struct CreatePost {
	pub user_id: String,
	pub user_name: String,
	pub location: String,
	pub content: String,
	#[serde(default)]
	pub image_url: Option<String>,
}

impl Validate for CreatePost {
	fn validate(&self) -> Result<(), ServiceError> {
		require("user_id", &self.user_id)?;
		require("user_name", &self.user_name)?;
		require("location", &self.location)?;
		require("content", &self.content)?;
		max_chars("content", self.content.trim(), MAX_CONTENT_CHARS)
	}
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ListPosts {
	pub location: String,
	#[serde(default)]
	pub user_id: Option<String>,
	#[serde(default)]
	pub limit: Option<i64>,
}

impl Validate for ListPosts {
	fn validate(&self) -> Result<(), ServiceError> {
		require("location", &self.location)
	}
}

#[derive(Debug, Deserialize, Serialize)]
pub struct LikePost {
	pub post_id: Uuid,
	pub user_id: String,
}

impl Validate for LikePost {
	fn validate(&self) -> Result<(), ServiceError> {
		require("user_id", &self.user_id)
	}
}

#[derive(Debug, Deserialize, Serialize)]
pub struct PostCreated {
	pub post: Post,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct PostList {
	pub posts: Vec<PostView>,
}

#[test]
fn test_create_post_validation() {
	let post = CreatePost {
		user_id: "u-1".into(),
		user_name: "Ana".into(),
		location: "Porto".into(),
		content: " ".into(),
		image_url: None,
	};
	assert_eq!(post.validate().unwrap_err().to_string(), "content is required");

	let post = CreatePost {
		content: "x".repeat(MAX_CONTENT_CHARS + 1),
		..post
	};
	assert!(post.validate().is_err());
}

#[test]
fn test_like_post_rejects_malformed_id() {
	let parsed = serde_json::from_str::<LikePost>(r#"{"post_id": "not-a-uuid", "user_id": "u"}"#);
	assert!(parsed.is_err());
}
