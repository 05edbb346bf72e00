use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use axum_macros::debug_handler;

use crate::{
	common::validation::ValidJson,
	domain::post::{
		entity::LikeOutcome,
		schemas::{CreatePost, LikePost, ListPosts, PostCreated, PostList},
	},
	services::{handlers::PostHandler, response::ServiceError},
	state::AppState,
};

#[debug_handler]
pub async fn create_post(
	State(state): State<AppState>,
	ValidJson(request): ValidJson<CreatePost>,
) -> Result<impl IntoResponse, ServiceError> {
	let post = PostHandler::create(&state, request).await?;
	Ok((StatusCode::CREATED, Json(PostCreated { post })))
}

pub async fn list_posts(
	State(state): State<AppState>,
	ValidJson(request): ValidJson<ListPosts>,
) -> Result<Json<PostList>, ServiceError> {
	let posts = PostHandler::list(&state, request).await?;
	Ok(Json(PostList { posts }))
}

pub async fn like_post(
	State(state): State<AppState>,
	ValidJson(request): ValidJson<LikePost>,
) -> Result<Json<LikeOutcome>, ServiceError> {
	Ok(Json(PostHandler::like(&state, request).await?))
}
