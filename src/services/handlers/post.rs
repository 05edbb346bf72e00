use crate::{
	common::validation::non_blank,
	domain::{
		clamp_limit,
		post::{
			entity::{LikeOutcome, Post, PostView},
			schemas::{CreatePost, LikePost, ListPosts},
		},
	},
	services::response::ServiceError,
	state::AppState,
};

pub struct PostHandler;
impl PostHandler {
	pub async fn create(
		state: &AppState,
		request: CreatePost,
	) -> Result<Post, ServiceError> {
		let post: Post = request.into();
		state.storage.insert_post(&post).await?;
		tracing::info!("Post {} created in `{}`", post.id, post.location);
		Ok(post)
	}

	pub async fn list(
		state: &AppState,
		request: ListPosts,
	) -> Result<Vec<PostView>, ServiceError> {
		let viewer = non_blank(request.user_id);
		state
			.storage
			.list_posts(&request.location, viewer.as_deref(), clamp_limit(request.limit))
			.await
	}

	pub async fn like(
		state: &AppState,
		request: LikePost,
	) -> Result<LikeOutcome, ServiceError> {
		let outcome = state.storage.toggle_like(request.post_id, request.user_id.trim()).await?;
		tracing::debug!(
			"Post {} {} by {}, now {} like(s)",
			outcome.post_id,
			if outcome.liked { "liked" } else { "unliked" },
			request.user_id,
			outcome.likes
		);
		Ok(outcome)
	}
}
