pub mod schemas;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
pub struct Coordinates {
	pub lat: f64,
	pub lng: f64,
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct GeocodedAddress {
	pub lat: f64,
	pub lng: f64,
	pub formatted_address: String,
	pub place_id: String,
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct ReverseGeocodedAddress {
	pub formatted_address: String,
	pub place_id: String,
	pub city: Option<String>,
	pub country: Option<String>,
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct Place {
	pub place_id: String,
	pub name: String,
	pub address: Option<String>,
	pub lat: f64,
	pub lng: f64,
	pub rating: Option<f64>,
	pub user_ratings_total: Option<i64>,
	pub types: Vec<String>,
	pub photo_reference: Option<String>,
	pub open_now: Option<bool>,
}

/// Text search input after validation.
#[derive(Clone, PartialEq, Debug)]
pub struct PlaceQuery {
	pub text: String,
	pub near: Option<Coordinates>,
	pub radius: u32,
}
