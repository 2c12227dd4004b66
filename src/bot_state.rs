use std::sync::Arc;
use chrono::{SubsecRound, Utc};
use tokio::sync::Mutex;

use crate::database::Database;
use crate::engine;
use crate::error::{BookingError, LookupError, StorageError};
use crate::models::{AppState, Booking, Trainer, TrainerId, User};

/// Общее состояние бота. Создаётся один раз в `main` и раздаётся обработчикам.
///
/// Все чтения и изменения проходят через одну блокировку. Наружу отдаются
/// только копии данных, поэтому блокировка никогда не держится во время
/// сетевых вызовов.
#[derive(Clone)]
pub struct BotState {
    db: Database,
    state: Arc<Mutex<AppState>>,
}

impl BotState {
    /// Загружает состояние с диска. Ошибка здесь означает, что стартовать нельзя.
    pub async fn initialize(db: Database) -> Result<Self, StorageError> {
        let state = db.load().await?;
        Ok(Self::with_state(db, state))
    }

    pub fn with_state(db: Database, state: AppState) -> Self {
        Self {
            db,
            state: Arc::new(Mutex::new(state)),
        }
    }

    /// Выполняет `f` под эксклюзивной блокировкой всего состояния.
    pub async fn transaction<R>(&self, f: impl FnOnce(&mut AppState) -> R) -> R {
        let mut state = self.state.lock().await;
        f(&mut *state)
    }

    pub async fn snapshot(&self) -> AppState {
        self.transaction(|state| state.clone()).await
    }

    /// Сохраняет текущее состояние на диск.
    pub async fn flush(&self) -> Result<(), StorageError> {
        self.db.save_from(self.snapshot()).await
    }

    /// Как `flush`, но ошибка только логируется: изменение в памяти уже применено и не откатывается.
    pub async fn flush_or_log(&self) {
        if let Err(e) = self.flush().await {
            log::error!("Error saving state to {}: {}", self.db.path().display(), e);
        }
    }

    /// Возвращает пользователя и признак того, что он только что создан.
    pub async fn resolve_user(&self, id: i64, name_hint: &str) -> (User, bool) {
        self.transaction(|state| {
            let created = !state.users.contains_key(&id);
            (state.get_or_create_user(id, name_hint).clone(), created)
        })
        .await
    }

    /// `resolve_user` для обработчиков: нового пользователя сразу сохраняет на диск.
    pub async fn remember_user(&self, id: i64, name_hint: &str) -> User {
        let (user, created) = self.resolve_user(id, name_hint).await;
        if created {
            log::info!("New user {} registered", id);
            self.flush_or_log().await;
        }
        user
    }

    pub async fn list_trainers(&self) -> Vec<Trainer> {
        self.transaction(|state| state.trainers.clone()).await
    }

    pub async fn get_trainer(&self, id: TrainerId) -> Result<Trainer, LookupError> {
        self.transaction(|state| state.trainer_by_id(id).cloned())
            .await
            .ok_or(LookupError::TrainerNotFound(id))
    }

    pub async fn available_slots(&self, trainer_id: TrainerId) -> Result<Vec<String>, LookupError> {
        self.transaction(|state| state.trainer_by_id(trainer_id).map(|t| t.slots.clone()))
            .await
            .ok_or(LookupError::TrainerNotFound(trainer_id))
    }

    pub async fn user_bookings(&self, user_id: i64) -> Vec<Booking> {
        self.transaction(|state| state.user_bookings(user_id).cloned().collect())
            .await
    }

    /// Записывает пользователя к тренеру. Проверка оплаты и правила записи
    /// выполняются под одной блокировкой. Сохранение на диск остаётся за вызывающим.
    pub async fn book(
        &self,
        user_id: i64,
        trainer_id: TrainerId,
        slot: &str,
    ) -> Result<Booking, BookingError> {
        let now = Utc::now().trunc_subsecs(0);
        let result = self
            .transaction(|state| {
                let has_paid = state.user(user_id).map_or(false, |u| u.has_paid);
                if !has_paid {
                    return Err(BookingError::NotPaid);
                }
                engine::book_slot(state, user_id, trainer_id, slot, now)
            })
            .await;

        match &result {
            Ok(booking) => log::info!(
                "User {} booked trainer {} at {}",
                booking.user_id,
                booking.trainer_id,
                booking.time_slot
            ),
            Err(e) => log::warn!(
                "Booking rejected for user {} (trainer {}, slot {}): {:?}",
                user_id,
                trainer_id,
                slot,
                e
            ),
        }
        result
    }

    /// Выдаёт право на запись. Повторный вызов ничего не меняет.
    pub async fn grant_payment_entitlement(&self, user_id: i64) -> Result<(), LookupError> {
        self.transaction(|state| match state.users.get_mut(&user_id) {
            Some(user) => {
                user.has_paid = true;
                Ok(())
            }
            None => Err(LookupError::UserNotFound(user_id)),
        })
        .await?;

        log::info!("Payment entitlement granted to user {}", user_id);
        Ok(())
    }
}
