use std::collections::BTreeMap;
use serde::{Deserialize, Deserializer, Serialize};

use super::{default_trainers, Booking, Trainer, TrainerId, User};

/// Всё состояние приложения. Именно в таком виде оно сохраняется на диск.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppState {
    #[serde(default, deserialize_with = "null_as_default")]
    pub users: BTreeMap<i64, User>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub trainers: Vec<Trainer>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub bookings: Vec<Booking>,
}

// `null` в файле считаем пустой секцией, как и отсутствующее поле.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl AppState {
    /// Пустое состояние с каталогом тренеров по умолчанию.
    pub fn seeded() -> Self {
        Self {
            users: BTreeMap::new(),
            trainers: default_trainers(),
            bookings: Vec::new(),
        }
    }

    pub fn trainer_by_id(&self, id: TrainerId) -> Option<&Trainer> {
        self.trainers.iter().find(|t| t.id == id)
    }

    pub fn trainer_by_id_mut(&mut self, id: TrainerId) -> Option<&mut Trainer> {
        self.trainers.iter_mut().find(|t| t.id == id)
    }

    pub fn user(&self, id: i64) -> Option<&User> {
        self.users.get(&id)
    }

    /// Возвращает пользователя, создавая его без оплаты при первом обращении.
    /// Имя существующего пользователя не перезаписывается.
    pub fn get_or_create_user(&mut self, id: i64, name: &str) -> &mut User {
        self.users.entry(id).or_insert_with(|| User::new(id, name))
    }

    pub fn user_bookings(&self, user_id: i64) -> impl Iterator<Item = &Booking> + '_ {
        self.bookings.iter().filter(move |b| b.user_id == user_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trainer_lookup_scans_by_id_not_position() {
        let mut state = AppState::seeded();
        state.trainers.reverse();

        let trainer = state.trainer_by_id(2).unwrap();
        assert_eq!(trainer.name, "Алия Жаксылыкова");
        assert!(state.trainer_by_id(0).is_none());
        assert!(state.trainer_by_id(42).is_none());
    }

    #[test]
    fn user_is_created_once_and_unpaid() {
        let mut state = AppState::default();

        let user = state.get_or_create_user(7, "Аружан");
        assert!(!user.has_paid);
        user.has_paid = true;

        let again = state.get_or_create_user(7, "Другое имя");
        assert_eq!(again.name, "Аружан");
        assert!(again.has_paid);
        assert_eq!(state.users.len(), 1);
    }

    #[test]
    fn missing_sections_deserialize_as_empty() {
        let state: AppState = serde_json::from_str("{}").unwrap();
        assert!(state.users.is_empty());
        assert!(state.trainers.is_empty());
        assert!(state.bookings.is_empty());
    }

    #[test]
    fn null_sections_deserialize_as_empty() {
        let state: AppState =
            serde_json::from_str(r#"{"users": null, "trainers": null, "bookings": null}"#).unwrap();
        assert_eq!(state, AppState::default());
    }
}
