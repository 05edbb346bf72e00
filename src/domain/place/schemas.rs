use serde::{Deserialize, Serialize};

use super::{Coordinates, Place, PlaceQuery};
use crate::common::validation::{in_range, non_blank, require, Validate};
use crate::services::response::ServiceError;

pub const DEFAULT_RADIUS: u32 = 5_000;
pub const MAX_RADIUS: u32 = 50_000;

#[derive(Debug, Deserialize, Serialize)]
pub struct Geocode {
	pub address: String,
}

impl Validate for Geocode {
	fn validate(&self) -> Result<(), ServiceError> {
		require("address", &self.address)
	}
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ReverseGeocode {
	pub lat: f64,
	pub lng: f64,
}

impl Validate for ReverseGeocode {
	fn validate(&self) -> Result<(), ServiceError> {
		in_range("lat", self.lat, -90.0, 90.0)?;
		in_range("lng", self.lng, -180.0, 180.0)
	}
}

impl From<&ReverseGeocode> for Coordinates {
	fn from(value: &ReverseGeocode) -> Self {
		Coordinates {
			lat: value.lat,
			lng: value.lng,
		}
	}
}

#[derive(Debug, Deserialize, Serialize)]
pub struct SearchPlaces {
	pub query: String,
	#[serde(default)]
	pub location: Option<String>,
	#[serde(default)]
	pub lat: Option<f64>,
	#[serde(default)]
	pub lng: Option<f64>,
	#[serde(default)]
	pub radius: Option<u32>,
}

impl Validate for SearchPlaces {
	fn validate(&self) -> Result<(), ServiceError> {
		require("query", &self.query)?;
		match (self.lat, self.lng) {
			(Some(lat), Some(lng)) => {
				in_range("lat", lat, -90.0, 90.0)?;
				in_range("lng", lng, -180.0, 180.0)
			}
			(None, None) => Ok(()),
			_ => Err(ServiceError::bad_request("lat and lng must be given together")),
		}
	}
}

impl From<SearchPlaces> for PlaceQuery {
	fn from(value: SearchPlaces) -> Self {
		let query = value.query.trim().to_string();
		let text = match non_blank(value.location) {
			Some(location) => format!("{query} in {location}"),
			None => query,
		};
		let near = match (value.lat, value.lng) {
			(Some(lat), Some(lng)) => Some(Coordinates { lat, lng }),
			_ => None,
		};

		PlaceQuery {
			text,
			near,
			radius: value.radius.unwrap_or(DEFAULT_RADIUS).clamp(1, MAX_RADIUS),
		}
	}
}

#[derive(Debug, Deserialize, Serialize)]
pub struct PlaceList {
	pub places: Vec<Place>,
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn test_search_query_appends_location() {
		let query: PlaceQuery = SearchPlaces {
			query: " ramen ".into(),
			location: Some("Sapporo".into()),
			lat: None,
			lng: None,
			radius: Some(1_000_000),
		}
		.into();

		assert_eq!(query.text, "ramen in Sapporo");
		assert_eq!(query.near, None);
		assert_eq!(query.radius, MAX_RADIUS);
	}

	#[test]
	fn test_search_requires_both_coordinates() {
		let search = SearchPlaces {
			query: "museum".into(),
			location: None,
			lat: Some(10.0),
			lng: None,
			radius: None,
		};
		assert!(search.validate().is_err());
	}

	#[test]
	fn test_reverse_geocode_bounds() {
		assert!(ReverseGeocode { lat: 48.85, lng: 2.35 }.validate().is_ok());
		assert!(ReverseGeocode { lat: 91.0, lng: 2.35 }.validate().is_err());
		assert!(ReverseGeocode { lat: 0.0, lng: -181.0 }.validate().is_err());
	}
}
