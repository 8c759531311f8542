pub mod config;
pub mod rocket;

pub use config::RocketConfig;
pub use rocket::Rocket;
