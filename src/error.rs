use std::path::PathBuf;
use thiserror::Error;

use crate::models::TrainerId;

/// Ошибки файла состояния. При старте любая из них фатальна.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("state file {path} is unreadable: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("state file {path} is corrupt: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode state: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("тренер не найден")]
    TrainerNotFound(TrainerId),

    #[error("пользователь не найден")]
    UserNotFound(i64),
}

/// Нарушения правил записи. Текст показывается пользователю как есть.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BookingError {
    #[error("вы уже записаны к другому тренеру. Можно записываться только к одному тренеру.")]
    DifferentTrainer { committed: TrainerId },

    #[error("лимит: максимум {limit} записи у одного тренера.")]
    LimitExceeded { trainer_id: TrainerId, limit: usize },

    #[error("тренер не найден")]
    TrainerNotFound(TrainerId),

    #[error("слот уже занят или не существует")]
    SlotUnavailable { trainer_id: TrainerId, slot: String },

    #[error("сначала оплатите абонемент.")]
    NotPaid,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(&'static str),

    #[error("{name} is invalid: {message}")]
    Invalid { name: &'static str, message: String },
}
