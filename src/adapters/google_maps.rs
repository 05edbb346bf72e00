//! Google Maps Geocoding and Places Text Search.
//!
//! Google answers 200 for most failures and reports them in `status`, so the
//! status is checked before any result is read. `ZERO_RESULTS` is not an
//! error for text search, only for geocoding where the caller asked for a
//! single answer.
use serde::Deserialize;

use crate::{
	domain::place::{Coordinates, GeocodedAddress, Place, PlaceQuery, ReverseGeocodedAddress},
	services::response::ServiceError,
};

#[derive(Clone)]
pub struct MapsClient {
	http: reqwest::Client,
	base_url: String,
	api_key: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
	status: String,
	#[serde(default)]
	results: Vec<GeocodeResult>,
	error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
	formatted_address: String,
	#[serde(default)]
	place_id: String,
	geometry: Geometry,
	#[serde(default)]
	address_components: Vec<AddressComponent>,
}

#[derive(Debug, Deserialize)]
struct Geometry {
	location: LatLng,
}

#[derive(Debug, Deserialize)]
struct LatLng {
	lat: f64,
	lng: f64,
}

#[derive(Debug, Deserialize)]
struct AddressComponent {
	long_name: String,
	#[serde(default)]
	types: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct PlacesResponse {
	status: String,
	#[serde(default)]
	results: Vec<PlaceResult>,
	error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PlaceResult {
	place_id: String,
	name: String,
	formatted_address: Option<String>,
	geometry: Geometry,
	rating: Option<f64>,
	user_ratings_total: Option<i64>,
	#[serde(default)]
	types: Vec<String>,
	#[serde(default)]
	photos: Vec<Photo>,
	opening_hours: Option<OpeningHours>,
}

#[derive(Debug, Deserialize)]
struct Photo {
	photo_reference: String,
}

#[derive(Debug, Deserialize)]
struct OpeningHours {
	open_now: Option<bool>,
}

impl From<PlaceResult> for Place {
	fn from(value: PlaceResult) -> Self {
		Place {
			place_id: value.place_id,
			name: value.name,
			address: value.formatted_address,
			lat: value.geometry.location.lat,
			lng: value.geometry.location.lng,
			rating: value.rating,
			user_ratings_total: value.user_ratings_total,
			types: value.types,
			photo_reference: value.photos.into_iter().next().map(|photo| photo.photo_reference),
			open_now: value.opening_hours.and_then(|hours| hours.open_now),
		}
	}
}

enum Outcome {
	Results,
	Empty,
}

fn check_status(
	status: &str,
	error_message: Option<&str>,
) -> Result<Outcome, ServiceError> {
	match status {
		"OK" => Ok(Outcome::Results),
		"ZERO_RESULTS" => Ok(Outcome::Empty),
		other => Err(ServiceError::UpstreamError(match error_message {
			Some(message) => format!("Google Maps returned {other}: {message}"),
			None => format!("Google Maps returned {other}"),
		})),
	}
}

fn component(
	components: &[AddressComponent],
	kinds: &[&str],
) -> Option<String> {
	kinds.iter().find_map(|kind| {
		components
			.iter()
			.find(|c| c.types.iter().any(|t| t.as_str() == *kind))
			.map(|c| c.long_name.clone())
	})
}

impl MapsClient {
	pub fn new(
		http: reqwest::Client,
		base_url: impl Into<String>,
		api_key: Option<String>,
	) -> Self {
		Self {
			http,
			base_url: base_url.into().trim_end_matches('/').to_string(),
			api_key,
		}
	}

	fn key(&self) -> Result<&str, ServiceError> {
		self.api_key.as_deref().ok_or(ServiceError::NotConfigured("GOOGLE_MAPS_API_KEY"))
	}

	async fn geocode_request(
		&self,
		params: &[(&str, &str)],
	) -> Result<Vec<GeocodeResult>, ServiceError> {
		let key = self.key()?;
		let response: GeocodeResponse = self
			.http
			.get(format!("{}/geocode/json", self.base_url))
			.query(params)
			.query(&[("key", key)])
			.send()
			.await?
			.error_for_status()?
			.json()
			.await?;

		match check_status(&response.status, response.error_message.as_deref())? {
			Outcome::Results => Ok(response.results),
			Outcome::Empty => Ok(vec![]),
		}
	}

	pub async fn geocode(
		&self,
		address: &str,
	) -> Result<GeocodedAddress, ServiceError> {
		let address = address.trim();
		tracing::debug!("Geocoding `{}`", address);

		let result = self
			.geocode_request(&[("address", address)])
			.await?
			.into_iter()
			.next()
			.ok_or_else(|| ServiceError::NoResults(address.to_string()))?;

		Ok(GeocodedAddress {
			lat: result.geometry.location.lat,
			lng: result.geometry.location.lng,
			formatted_address: result.formatted_address,
			place_id: result.place_id,
		})
	}

	pub async fn reverse_geocode(
		&self,
		at: Coordinates,
	) -> Result<ReverseGeocodedAddress, ServiceError> {
		let latlng = format!("{},{}", at.lat, at.lng);
		tracing::debug!("Reverse geocoding {}", latlng);

		let result = self
			.geocode_request(&[("latlng", latlng.as_str())])
			.await?
			.into_iter()
			.next()
			.ok_or_else(|| ServiceError::NoResults(latlng.clone()))?;

		Ok(ReverseGeocodedAddress {
			city: component(&result.address_components, &["locality", "postal_town", "administrative_area_level_2"]),
			country: component(&result.address_components, &["country"]),
			formatted_address: result.formatted_address,
			place_id: result.place_id,
		})
	}

	pub async fn search_places(
		&self,
		query: &PlaceQuery,
	) -> Result<Vec<Place>, ServiceError> {
		let key = self.key()?;
		tracing::debug!("Searching places for `{}`", query.text);

		let mut request = self
			.http
			.get(format!("{}/place/textsearch/json", self.base_url))
			.query(&[("query", query.text.as_str()), ("key", key)]);
		if let Some(near) = query.near {
			request = request.query(&[
				("location", format!("{},{}", near.lat, near.lng)),
				("radius", query.radius.to_string()),
			]);
		}

		let response: PlacesResponse = request.send().await?.error_for_status()?.json().await?;
		match check_status(&response.status, response.error_message.as_deref())? {
			Outcome::Results => Ok(response.results.into_iter().map(Place::from).collect()),
			Outcome::Empty => Ok(vec![]),
		}
	}
}

#[cfg(test)]
mod test {
	use std::collections::HashMap;

	use axum::{extract::Query, http::StatusCode, routing::get, Json, Router};
	use serde_json::{json, Value};

	use super::MapsClient;
	use crate::{
		domain::place::{Coordinates, PlaceQuery},
		services::response::ServiceError,
	};

	async fn mock_maps() -> String {
		async fn geocode(Query(params): Query<HashMap<String, String>>) -> (StatusCode, Json<Value>) {
			match params.get("address").map(String::as_str) {
				Some("Atlantis") => return (StatusCode::OK, Json(json!({"status": "ZERO_RESULTS", "results": []}))),
				Some("Gateway") => return (StatusCode::BAD_GATEWAY, Json(json!({}))),
				_ => {}
			}
			if params.get("key").map(String::as_str) != Some("test-key") {
				return (
					StatusCode::OK,
					Json(json!({"status": "REQUEST_DENIED", "error_message": "The provided API key is invalid."})),
				);
			}
			(StatusCode::OK, Json(json!({
				"status": "OK",
				"results": [{
					"formatted_address": "Eiffel Tower, Paris, France",
					"place_id": "eiffel",
					"geometry": {"location": {"lat": 48.8584, "lng": 2.2945}},
					"address_components": [
						{"long_name": "Paris", "short_name": "Paris", "types": ["locality", "political"]},
						{"long_name": "France", "short_name": "FR", "types": ["country", "political"]}
					]
				}]
			})))
		}
		async fn textsearch(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
			let biased = params.contains_key("location") && params.get("radius").map(String::as_str) == Some("2000");
			let name = if biased { "Near Cafe" } else { "Cafe" };
			Json(json!({
				"status": "OK",
				"results": [{
					"place_id": "p1",
					"name": name,
					"formatted_address": "1 Rue",
					"geometry": {"location": {"lat": 1.0, "lng": 2.0}},
					"rating": 4.4,
					"user_ratings_total": 120,
					"types": ["cafe"],
					"photos": [{"photo_reference": "ref-1"}],
					"opening_hours": {"open_now": true}
				}]
			}))
		}

		let app = Router::new()
			.route("/geocode/json", get(geocode))
			.route("/place/textsearch/json", get(textsearch));
		let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
		let addr = listener.local_addr().unwrap();
		tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });
		format!("http://{addr}")
	}

	fn client(
		base_url: &str,
		key: Option<&str>,
	) -> MapsClient {
		MapsClient::new(reqwest::Client::new(), base_url, key.map(str::to_string))
	}

	#[tokio::test]
	async fn test_geocode_first_result() {
		let base_url = mock_maps().await;
		let geocoded = client(&base_url, Some("test-key")).geocode(" Eiffel Tower ").await.unwrap();

		assert_eq!(geocoded.place_id, "eiffel");
		assert_eq!(geocoded.lat, 48.8584);
	}

	#[tokio::test]
	async fn test_geocode_zero_results_is_not_found() {
		let base_url = mock_maps().await;
		let err = client(&base_url, Some("test-key")).geocode("Atlantis").await.unwrap_err();
		assert!(matches!(err, ServiceError::NoResults(_)));
	}

	#[tokio::test]
	async fn test_denied_request_carries_google_message() {
		let base_url = mock_maps().await;
		let err = client(&base_url, Some("wrong")).geocode("Paris").await.unwrap_err();
		assert_eq!(
			err.to_string(),
			"upstream error: Google Maps returned REQUEST_DENIED: The provided API key is invalid."
		);
	}

	#[tokio::test]
	async fn test_http_failure_hides_key() {
		let base_url = mock_maps().await;
		let err = client(&base_url, Some("test-key")).geocode("Gateway").await.unwrap_err();

		assert!(matches!(err, ServiceError::HttpError(_)));
		assert!(err.to_string().contains("502"));
		assert!(!err.to_string().contains("test-key"));
	}

	#[tokio::test]
	async fn test_missing_key_fails_before_calling_google() {
		let err = client("http://127.0.0.1:9", None).geocode("Paris").await.unwrap_err();
		assert!(matches!(err, ServiceError::NotConfigured("GOOGLE_MAPS_API_KEY")));
	}

	#[tokio::test]
	async fn test_reverse_geocode_extracts_city_and_country() {
		let base_url = mock_maps().await;
		let address = client(&base_url, Some("test-key"))
			.reverse_geocode(Coordinates { lat: 48.8584, lng: 2.2945 })
			.await
			.unwrap();

		assert_eq!(address.city.as_deref(), Some("Paris"));
		assert_eq!(address.country.as_deref(), Some("France"));
	}

	#[tokio::test]
	async fn test_search_places_maps_results() {
		let base_url = mock_maps().await;
		let maps = client(&base_url, Some("test-key"));

		let places = maps
			.search_places(&PlaceQuery {
				text: "cafe in Paris".into(),
				near: None,
				radius: 5000,
			})
			.await
			.unwrap();
		assert_eq!(places[0].name, "Cafe");
		assert_eq!(places[0].photo_reference.as_deref(), Some("ref-1"));
		assert_eq!(places[0].open_now, Some(true));

		let places = maps
			.search_places(&PlaceQuery {
				text: "cafe".into(),
				near: Some(Coordinates { lat: 1.0, lng: 2.0 }),
				radius: 2000,
			})
			.await
			.unwrap();
		assert_eq!(places[0].name, "Near Cafe");
	}
}
