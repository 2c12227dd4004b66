pub mod app_state;
pub mod booking;
pub mod plan;
pub mod trainer;
pub mod user;

pub use app_state::AppState;
pub use booking::Booking;
pub use plan::Plan;
pub use trainer::{default_slots, default_trainers, Trainer, TrainerId};
pub use user::User;
