use axum::{extract::State, Json};

use crate::{
	common::validation::ValidJson,
	domain::place::{
		schemas::{Geocode, PlaceList, ReverseGeocode, SearchPlaces},
		GeocodedAddress, ReverseGeocodedAddress,
	},
	services::{handlers::PlaceHandler, response::ServiceError},
	state::AppState,
};

pub async fn geocode(
	State(state): State<AppState>,
	ValidJson(request): ValidJson<Geocode>,
) -> Result<Json<GeocodedAddress>, ServiceError> {
	Ok(Json(PlaceHandler::geocode(&state, request).await?))
}

pub async fn reverse_geocode(
	State(state): State<AppState>,
	ValidJson(request): ValidJson<ReverseGeocode>,
) -> Result<Json<ReverseGeocodedAddress>, ServiceError> {
	Ok(Json(PlaceHandler::reverse_geocode(&state, request).await?))
}

pub async fn search_places(
	State(state): State<AppState>,
	ValidJson(request): ValidJson<SearchPlaces>,
) -> Result<Json<PlaceList>, ServiceError> {
	let places = PlaceHandler::search(&state, request).await?;
	Ok(Json(PlaceList { places }))
}
