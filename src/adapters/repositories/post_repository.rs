use async_trait::async_trait;
use sqlx::PgConnection;
use uuid::Uuid;

use super::{PgStorage, PostRepository};
use crate::{
	database::{rolled_back, DatabaseExecutor},
	domain::post::entity::{LikeOutcome, Post, PostView},
	services::response::ServiceError,
};

#[async_trait]
impl PostRepository for PgStorage {
	async fn insert_post(
		&self,
		post: &Post,
	) -> Result<(), ServiceError> {
		sqlx::query(
			"INSERT INTO posts (id, user_id, user_name, location, content, image_url, likes, create_dt)
			VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
		)
		.bind(post.id)
		.bind(&post.user_id)
		.bind(&post.user_name)
		.bind(&post.location)
		.bind(&post.content)
		.bind(&post.image_url)
		.bind(post.likes)
		.bind(post.create_dt)
		.execute(&self.pool)
		.await?;
		Ok(())
	}

	async fn list_posts(
		&self,
		location: &str,
		viewer: Option<&str>,
		limit: i64,
	) -> Result<Vec<PostView>, ServiceError> {
		let posts = sqlx::query_as::<_, PostView>(
			"SELECT p.id, p.user_id, p.user_name, p.location, p.content, p.image_url, p.likes, p.create_dt,
				EXISTS (SELECT 1 FROM post_likes l WHERE l.post_id = p.id AND l.user_id = $2) AS liked
			FROM posts p
			WHERE lower(p.location) = lower($1)
			ORDER BY p.create_dt DESC
			LIMIT $3",
		)
		.bind(location.trim())
		.bind(viewer)
		.bind(limit)
		.fetch_all(&self.pool)
		.await?;
		Ok(posts)
	}

	async fn toggle_like(
		&self,
		post_id: Uuid,
		user_id: &str,
	) -> Result<LikeOutcome, ServiceError> {
		let mut executor = DatabaseExecutor::new(self.pool.clone());
		executor.begin().await?;

		let outcome = toggle_like_in(&mut **executor.transaction()?, post_id, user_id).await;
		match outcome {
			Ok(outcome) => {
				executor.commit().await?;
				Ok(outcome)
			}
			Err(err) => rolled_back(err, executor.rollback().await),
		}
	}
}

// The post row stays locked until commit, so concurrent toggles on one post serialize.
async fn toggle_like_in(
	conn: &mut PgConnection,
	post_id: Uuid,
	user_id: &str,
) -> Result<LikeOutcome, ServiceError> {
	let locked: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM posts WHERE id = $1 FOR UPDATE")
		.bind(post_id)
		.fetch_optional(&mut *conn)
		.await?;
	if locked.is_none() {
		return Err(ServiceError::EntityNotFound("post"));
	}

	let removed = sqlx::query("DELETE FROM post_likes WHERE post_id = $1 AND user_id = $2")
		.bind(post_id)
		.bind(user_id)
		.execute(&mut *conn)
		.await?
		.rows_affected();

	let (liked, likes): (bool, i64) = if removed > 0 {
		let (likes,): (i64,) =
			sqlx::query_as("UPDATE posts SET likes = GREATEST(likes - 1, 0) WHERE id = $1 RETURNING likes")
				.bind(post_id)
				.fetch_one(&mut *conn)
				.await?;
		(false, likes)
	} else {
		sqlx::query("INSERT INTO post_likes (post_id, user_id) VALUES ($1, $2)")
			.bind(post_id)
			.bind(user_id)
			.execute(&mut *conn)
			.await?;
		let (likes,): (i64,) = sqlx::query_as("UPDATE posts SET likes = likes + 1 WHERE id = $1 RETURNING likes")
			.bind(post_id)
			.fetch_one(&mut *conn)
			.await?;
		(true, likes)
	};

	Ok(LikeOutcome { post_id, liked, likes })
}
