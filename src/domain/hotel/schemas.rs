use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::entity::{Booking, Hotel, HotelFilter};
use crate::common::validation::{in_range, non_blank, require, Validate};
use crate::services::response::ServiceError;

#[derive(Debug, Deserialize, Serialize)]
pub struct AddHotel {
	pub owner_id: String,
	pub name: String,
	pub location: String,
	pub price_per_night: f64,
	#[serde(default)]
	pub address: Option<String>,
	#[serde(default)]
	pub description: Option<String>,
	#[serde(default)]
	pub rating: Option<f64>,
	#[serde(default)]
	pub amenities: Vec<String>,
	#[serde(default)]
	pub image_url: Option<String>,
	#[serde(default)]
	pub contact: Option<String>,
}

impl Validate for AddHotel {
	fn validate(&self) -> Result<(), ServiceError> {
		require("owner_id", &self.owner_id)?;
		require("name", &self.name)?;
		require("location", &self.location)?;
		if !self.price_per_night.is_finite() || self.price_per_night <= 0.0 {
			return Err(ServiceError::bad_request("price_per_night must be greater than 0"));
		}
		if let Some(rating) = self.rating {
			in_range("rating", rating, 0.0, 5.0)?;
		}
		Ok(())
	}
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ListHotels {
	#[serde(default)]
	pub location: Option<String>,
	#[serde(default)]
	pub owner_id: Option<String>,
	#[serde(default)]
	pub max_price: Option<f64>,
}

impl Validate for ListHotels {
	fn validate(&self) -> Result<(), ServiceError> {
		match self.max_price {
			Some(max_price) if !max_price.is_finite() || max_price < 0.0 => {
				Err(ServiceError::bad_request("max_price must not be negative"))
			}
			_ => Ok(()),
		}
	}
}

impl From<ListHotels> for HotelFilter {
	fn from(value: ListHotels) -> Self {
		HotelFilter {
			location: non_blank(value.location),
			owner_id: non_blank(value.owner_id),
			max_price: value.max_price,
		}
	}
}

#[derive(Debug, Deserialize, Serialize)]
pub struct BookHotel {
	pub hotel_id: Uuid,
	pub user_id: String,
	pub check_in: NaiveDate,
	pub check_out: NaiveDate,
	pub guests: i32,
}

impl Validate for BookHotel {
	fn validate(&self) -> Result<(), ServiceError> {
		require("user_id", &self.user_id)?;
		if self.guests < 1 {
			return Err(ServiceError::bad_request("guests must be at least 1"));
		}
		if self.check_out <= self.check_in {
			return Err(ServiceError::bad_request("check_out must be after check_in"));
		}
		Ok(())
	}
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ListBookings {
	pub user_id: String,
}

impl Validate for ListBookings {
	fn validate(&self) -> Result<(), ServiceError> {
		require("user_id", &self.user_id)
	}
}

#[derive(Debug, Deserialize, Serialize)]
pub struct HotelAdded {
	pub hotel: Hotel,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct HotelList {
	pub hotels: Vec<Hotel>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct BookingCreated {
	pub booking: Booking,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct BookingList {
	pub bookings: Vec<Booking>,
}
