use crate::{
	domain::hotel::{
		entity::{Booking, Hotel},
		schemas::{AddHotel, BookHotel, ListBookings, ListHotels},
	},
	services::response::ServiceError,
	state::AppState,
};

pub struct HotelHandler;
impl HotelHandler {
	pub async fn add(
		state: &AppState,
		request: AddHotel,
	) -> Result<Hotel, ServiceError> {
		let hotel: Hotel = request.into();
		state.storage.insert_hotel(&hotel).await?;
		tracing::info!("Hotel {} listed in `{}`", hotel.id, hotel.location);
		Ok(hotel)
	}

	pub async fn list(
		state: &AppState,
		request: ListHotels,
	) -> Result<Vec<Hotel>, ServiceError> {
		state.storage.list_hotels(&request.into()).await
	}

	pub async fn book(
		state: &AppState,
		request: BookHotel,
	) -> Result<Booking, ServiceError> {
		let hotel = state
			.storage
			.find_hotel(request.hotel_id)
			.await?
			.ok_or(ServiceError::EntityNotFound("hotel"))?;

		let booking = Booking::quote(&hotel, request)?;
		state.storage.insert_booking(&booking).await?;
		tracing::info!("Booking {} confirmed at hotel {}", booking.id, hotel.id);
		Ok(booking)
	}

	pub async fn bookings(
		state: &AppState,
		request: ListBookings,
	) -> Result<Vec<Booking>, ServiceError> {
		state.storage.list_bookings(&request.user_id).await
	}
}
