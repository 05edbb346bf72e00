use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::{
	common::validation::ValidJson,
	domain::hotel::schemas::{
		AddHotel, BookHotel, BookingCreated, BookingList, HotelAdded, HotelList, ListBookings, ListHotels,
	},
	services::{handlers::HotelHandler, response::ServiceError},
	state::AppState,
};

pub async fn add_hotel(
	State(state): State<AppState>,
	ValidJson(request): ValidJson<AddHotel>,
) -> Result<impl IntoResponse, ServiceError> {
	let hotel = HotelHandler::add(&state, request).await?;
	Ok((StatusCode::CREATED, Json(HotelAdded { hotel })))
}

pub async fn list_hotels(
	State(state): State<AppState>,
	ValidJson(request): ValidJson<ListHotels>,
) -> Result<Json<HotelList>, ServiceError> {
	let hotels = HotelHandler::list(&state, request).await?;
	Ok(Json(HotelList { hotels }))
}

pub async fn book_hotel(
	State(state): State<AppState>,
	ValidJson(request): ValidJson<BookHotel>,
) -> Result<impl IntoResponse, ServiceError> {
	let booking = HotelHandler::book(&state, request).await?;
	Ok((StatusCode::CREATED, Json(BookingCreated { booking })))
}

pub async fn list_bookings(
	State(state): State<AppState>,
	ValidJson(request): ValidJson<ListBookings>,
) -> Result<Json<BookingList>, ServiceError> {
	let bookings = HotelHandler::bookings(&state, request).await?;
	Ok(Json(BookingList { bookings }))
}
