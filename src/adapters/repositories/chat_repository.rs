use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::{ChatRepository, PgStorage};
use crate::{domain::chat::entity::ChatMessage, services::response::ServiceError};

#[async_trait]
impl ChatRepository for PgStorage {
	async fn insert_chat_message(
		&self,
		message: &ChatMessage,
	) -> Result<(), ServiceError> {
		sqlx::query(
			"INSERT INTO chat_messages (id, location, user_id, user_name, message, create_dt)
			VALUES ($1, $2, $3, $4, $5, $6)",
		)
		.bind(message.id)
		.bind(&message.location)
		.bind(&message.user_id)
		.bind(&message.user_name)
		.bind(&message.message)
		.bind(message.create_dt)
		.execute(&self.pool)
		.await?;
		Ok(())
	}

	async fn list_chat_messages(
		&self,
		location: &str,
		since: Option<DateTime<Utc>>,
		limit: i64,
	) -> Result<Vec<ChatMessage>, ServiceError> {
		let messages = sqlx::query_as::<_, ChatMessage>(
			"SELECT * FROM (
				SELECT id, location, user_id, user_name, message, create_dt
				FROM chat_messages
				WHERE lower(location) = lower($1)
					AND ($2::timestamptz IS NULL OR create_dt > $2)
				ORDER BY create_dt DESC
				LIMIT $3
			) recent
			ORDER BY create_dt ASC",
		)
		.bind(location.trim())
		.bind(since)
		.bind(limit)
		.fetch_all(&self.pool)
		.await?;
		Ok(messages)
	}
}
