pub mod blueprint;
pub mod config;
pub mod error;
pub mod estimate;
pub mod features;
pub mod model;
pub mod pages;
pub mod routes;
pub mod types;

pub use routes::{router, AppState};
