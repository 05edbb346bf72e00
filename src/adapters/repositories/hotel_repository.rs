use async_trait::async_trait;
use uuid::Uuid;

use super::{HotelRepository, PgStorage};
use crate::{
	domain::hotel::entity::{Booking, Hotel, HotelFilter},
	services::response::ServiceError,
};

const HOTEL_COLUMNS: &str =
	"id, owner_id, name, location, address, description, price_per_night, rating, amenities, image_url, contact, create_dt";

#[async_trait]
impl HotelRepository for PgStorage {
	async fn insert_hotel(
		&self,
		hotel: &Hotel,
	) -> Result<(), ServiceError> {
		sqlx::query(&format!(
			"INSERT INTO hotels ({HOTEL_COLUMNS}) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)"
		))
		.bind(hotel.id)
		.bind(&hotel.owner_id)
		.bind(&hotel.name)
		.bind(&hotel.location)
		.bind(&hotel.address)
		.bind(&hotel.description)
		.bind(hotel.price_per_night)
		.bind(hotel.rating)
		.bind(&hotel.amenities)
		.bind(&hotel.image_url)
		.bind(&hotel.contact)
		.bind(hotel.create_dt)
		.execute(&self.pool)
		.await?;
		Ok(())
	}

	async fn list_hotels(
		&self,
		filter: &HotelFilter,
	) -> Result<Vec<Hotel>, ServiceError> {
		let hotels = sqlx::query_as::<_, Hotel>(&format!(
			"SELECT {HOTEL_COLUMNS} FROM hotels
			WHERE ($1::text IS NULL OR lower(location) = lower($1))
				AND ($2::text IS NULL OR owner_id = $2)
				AND ($3::float8 IS NULL OR price_per_night <= $3)
			ORDER BY price_per_night ASC, create_dt DESC"
		))
		.bind(filter.location.as_deref())
		.bind(filter.owner_id.as_deref())
		.bind(filter.max_price)
		.fetch_all(&self.pool)
		.await?;
		Ok(hotels)
	}

	async fn find_hotel(
		&self,
		id: Uuid,
	) -> Result<Option<Hotel>, ServiceError> {
		let hotel = sqlx::query_as::<_, Hotel>(&format!("SELECT {HOTEL_COLUMNS} FROM hotels WHERE id = $1"))
			.bind(id)
			.fetch_optional(&self.pool)
			.await?;
		Ok(hotel)
	}

	async fn insert_booking(
		&self,
		booking: &Booking,
	) -> Result<(), ServiceError> {
		sqlx::query(
			"INSERT INTO bookings (id, hotel_id, user_id, check_in, check_out, guests, total_price, status, create_dt)
			VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
		)
		.bind(booking.id)
		.bind(booking.hotel_id)
		.bind(&booking.user_id)
		.bind(booking.check_in)
		.bind(booking.check_out)
		.bind(booking.guests)
		.bind(booking.total_price)
		.bind(&booking.status)
		.bind(booking.create_dt)
		.execute(&self.pool)
		.await?;
		Ok(())
	}

	async fn list_bookings(
		&self,
		user_id: &str,
	) -> Result<Vec<Booking>, ServiceError> {
		let bookings = sqlx::query_as::<_, Booking>(
			"SELECT id, hotel_id, user_id, check_in, check_out, guests, total_price, status, create_dt
			FROM bookings
			WHERE user_id = $1
			ORDER BY create_dt DESC",
		)
		.bind(user_id.trim())
		.fetch_all(&self.pool)
		.await?;
		Ok(bookings)
	}
}
