use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct ChatMessage {
	pub id: Uuid,
	pub location: String,
	pub user_id: String,
	pub user_name: String,
	pub message: String,
	pub create_dt: DateTime<Utc>,
}
