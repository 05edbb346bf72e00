mod chat;
mod hotel;
mod place;
mod post;
mod trip;

pub use chat::ChatHandler;
pub use hotel::HotelHandler;
pub use place::PlaceHandler;
pub use post::PostHandler;
pub use trip::TripHandler;
