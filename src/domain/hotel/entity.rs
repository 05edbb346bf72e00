use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct Hotel {
	pub id: Uuid,
	pub owner_id: String,
	pub name: String,
	pub location: String,
	pub address: Option<String>,
	pub description: Option<String>,
	pub price_per_night: f64,
	pub rating: Option<f64>,
	pub amenities: Vec<String>,
	pub image_url: Option<String>,
	pub contact: Option<String>,
	pub create_dt: DateTime<Utc>,
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct Booking {
	pub id: Uuid,
	pub hotel_id: Uuid,
	pub user_id: String,
	pub check_in: NaiveDate,
	pub check_out: NaiveDate,
	pub guests: i32,
	pub total_price: f64,
	pub status: String,
	pub create_dt: DateTime<Utc>,
}

pub const BOOKING_CONFIRMED: &str = "confirmed";

/// Filters for listing hotels; `None` means "any".
#[derive(Clone, Debug, Default)]
pub struct HotelFilter {
	pub location: Option<String>,
	pub owner_id: Option<String>,
	pub max_price: Option<f64>,
}
