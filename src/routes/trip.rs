use axum::{extract::State, Json};

use crate::{
	common::validation::ValidJson,
	domain::trip::schemas::{DestinationResearched, PlanTrip, ResearchDestination, TripPlanned},
	services::{handlers::TripHandler, response::ServiceError},
	state::AppState,
};

pub async fn plan_trip(
	State(state): State<AppState>,
	ValidJson(request): ValidJson<PlanTrip>,
) -> Result<Json<TripPlanned>, ServiceError> {
	let plan = TripHandler::plan(&state, request).await?;
	Ok(Json(TripPlanned { plan }))
}

pub async fn research_destination(
	State(state): State<AppState>,
	ValidJson(request): ValidJson<ResearchDestination>,
) -> Result<Json<DestinationResearched>, ServiceError> {
	let research = TripHandler::research(&state, request).await?;
	Ok(Json(DestinationResearched { research }))
}
