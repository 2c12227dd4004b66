pub mod bot_state;
pub mod config;
pub mod database;
pub mod engine;
pub mod error;
pub mod handlers;
pub mod models;

pub use bot_state::BotState;
pub use config::{Config, GymInfo};
pub use database::Database;
pub use error::{BookingError, ConfigError, LookupError, StorageError};
