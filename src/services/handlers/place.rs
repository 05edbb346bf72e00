use crate::{
	domain::place::{
		schemas::{Geocode, ReverseGeocode, SearchPlaces},
		GeocodedAddress, Place, ReverseGeocodedAddress,
	},
	services::response::ServiceError,
	state::AppState,
};

pub struct PlaceHandler;
impl PlaceHandler {
	pub async fn geocode(
		state: &AppState,
		request: Geocode,
	) -> Result<GeocodedAddress, ServiceError> {
		state.maps.geocode(&request.address).await
	}

	pub async fn reverse_geocode(
		state: &AppState,
		request: ReverseGeocode,
	) -> Result<ReverseGeocodedAddress, ServiceError> {
		state.maps.reverse_geocode((&request).into()).await
	}

	pub async fn search(
		state: &AppState,
		request: SearchPlaces,
	) -> Result<Vec<Place>, ServiceError> {
		state.maps.search_places(&request.into()).await
	}
}
