pub mod entity;
pub mod schemas;

use chrono::Utc;
use uuid::Uuid;

use self::{
	entity::{Booking, Hotel, BOOKING_CONFIRMED},
	schemas::{AddHotel, BookHotel},
};
use crate::{common::validation::non_blank, services::response::ServiceError};

pub const MAX_NIGHTS: i64 = 60;

impl From<AddHotel> for Hotel {
	fn from(value: AddHotel) -> Self {
		Hotel {
			id: Uuid::new_v4(),
			owner_id: value.owner_id.trim().to_string(),
			name: value.name.trim().to_string(),
			location: value.location.trim().to_string(),
			address: non_blank(value.address),
			description: non_blank(value.description),
			price_per_night: value.price_per_night,
			rating: value.rating,
			amenities: value
				.amenities
				.into_iter()
				.map(|amenity| amenity.trim().to_string())
				.filter(|amenity| !amenity.is_empty())
				.collect(),
			image_url: non_blank(value.image_url),
			contact: non_blank(value.contact),
			create_dt: Utc::now(),
		}
	}
}

impl Booking {
	/// Prices a stay at `hotel`; the request is expected to be validated already.
	pub fn quote(
		hotel: &Hotel,
		request: BookHotel,
	) -> Result<Booking, ServiceError> {
		let nights = (request.check_out - request.check_in).num_days();
		if nights < 1 {
			return Err(ServiceError::bad_request("check_out must be after check_in"));
		}
		if nights > MAX_NIGHTS {
			return Err(ServiceError::bad_request(format!("a stay can last at most {MAX_NIGHTS} nights")));
		}

		Ok(Booking {
			id: Uuid::new_v4(),
			hotel_id: hotel.id,
			user_id: request.user_id.trim().to_string(),
			check_in: request.check_in,
			check_out: request.check_out,
			guests: request.guests,
			total_price: nights as f64 * hotel.price_per_night,
			status: BOOKING_CONFIRMED.to_string(),
			create_dt: Utc::now(),
		})
	}
}
