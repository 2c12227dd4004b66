use serde::{Serialize, Deserialize};
use chrono::{DateTime, Utc};

use super::TrainerId;

/// Запись клиента к тренеру. Создаётся только движком бронирования и больше не меняется.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    pub user_id: i64,
    #[serde(rename = "trainer")]
    pub trainer_id: TrainerId,
    pub time_slot: String,
    #[serde(with = "chrono::serde::ts_seconds")]
    pub booked_at: DateTime<Utc>,
}
