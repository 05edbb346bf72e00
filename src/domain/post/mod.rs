pub mod entity;
pub mod schemas;

use chrono::Utc;
use uuid::Uuid;

use self::{entity::Post, schemas::CreatePost};
use crate::common::validation::non_blank;

impl From<CreatePost> for Post {
	fn from(value: CreatePost) -> Self {
		Post {
			id: Uuid::new_v4(),
			user_id: value.user_id.trim().to_string(),
			user_name: value.user_name.trim().to_string(),
			location: value.location.trim().to_string(),
			content: value.content.trim().to_string(),
			image_url: non_blank(value.image_url),
			likes: 0,
			create_dt: Utc::now(),
		}
	}
}
