pub mod adapters;
pub mod common;
pub mod config;
pub mod database;
pub mod dependencies;
pub mod domain;
pub mod routes;
pub mod services;
pub mod state;

pub use routes::create_routes;
pub use state::AppState;
