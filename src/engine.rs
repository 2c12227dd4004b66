use chrono::{DateTime, Utc};

use crate::error::BookingError;
use crate::models::{AppState, Booking, TrainerId};

/// Сколько записей один клиент может иметь у своего тренера.
pub const MAX_BOOKINGS_PER_TRAINER: usize = 3;

/// Проверяет правила и бронирует слот: слот уходит из списка свободных,
/// в журнал добавляется запись. При отказе состояние не меняется.
///
/// Вызывается только внутри `BotState::transaction`, поэтому проверка и
/// изменение выполняются под одной блокировкой. Сохранение на диск не делает.
pub fn book_slot(
    state: &mut AppState,
    user_id: i64,
    trainer_id: TrainerId,
    slot: &str,
    now: DateTime<Utc>,
) -> Result<Booking, BookingError> {
    let mut committed: Option<TrainerId> = None;
    let mut with_this_trainer = 0usize;
    for booking in state.user_bookings(user_id) {
        committed.get_or_insert(booking.trainer_id);
        if booking.trainer_id == trainer_id {
            with_this_trainer += 1;
        }
    }

    if let Some(committed) = committed {
        if committed != trainer_id {
            return Err(BookingError::DifferentTrainer { committed });
        }
    }
    if with_this_trainer >= MAX_BOOKINGS_PER_TRAINER {
        return Err(BookingError::LimitExceeded {
            trainer_id,
            limit: MAX_BOOKINGS_PER_TRAINER,
        });
    }

    let trainer = state
        .trainer_by_id_mut(trainer_id)
        .ok_or(BookingError::TrainerNotFound(trainer_id))?;

    let pos = trainer
        .slots
        .iter()
        .position(|s| s == slot)
        .ok_or_else(|| BookingError::SlotUnavailable {
            trainer_id,
            slot: slot.to_string(),
        })?;
    trainer.slots.remove(pos);

    let booking = Booking {
        user_id,
        trainer_id,
        time_slot: slot.to_string(),
        booked_at: now,
    };
    state.bookings.push(booking.clone());

    Ok(booking)
}
