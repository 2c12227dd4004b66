use std::collections::HashSet;

use gym_booking_bot::models::{default_trainers, AppState};
use gym_booking_bot::{BookingError, BotState, Database};
use tempfile::TempDir;

async fn paid_user(state: &BotState, id: i64, name: &str) {
    state.resolve_user(id, name).await;
    state.grant_payment_entitlement(id).await.unwrap();
}

#[tokio::test]
async fn test_full_booking_scenario_from_fresh_state() {
    let temp_dir = TempDir::new().unwrap();
    let db = Database::new(temp_dir.path().join("state.json"));
    let state = BotState::initialize(db).await.unwrap();
    paid_user(&state, 100, "Самат").await;

    let booking = state.book(100, 1, "08:00").await.unwrap();
    assert_eq!((booking.user_id, booking.trainer_id, booking.time_slot.as_str()), (100, 1, "08:00"));
    assert!(!state.available_slots(1).await.unwrap().contains(&"08:00".to_string()));
    assert_eq!(state.user_bookings(100).await.len(), 1);

    assert_eq!(
        state.book(100, 2, "08:00").await,
        Err(BookingError::DifferentTrainer { committed: 1 })
    );

    assert!(matches!(
        state.book(100, 1, "08:00").await,
        Err(BookingError::SlotUnavailable { trainer_id: 1, .. })
    ));

    state.book(100, 1, "09:00").await.unwrap();
    state.book(100, 1, "10:00").await.unwrap();
    let before = state.snapshot().await;
    assert!(matches!(
        state.book(100, 1, "11:00").await,
        Err(BookingError::LimitExceeded { trainer_id: 1, limit: 3 })
    ));
    assert_eq!(state.snapshot().await, before);

    let trainers: HashSet<_> = state
        .user_bookings(100)
        .await
        .iter()
        .map(|b| b.trainer_id)
        .collect();
    assert_eq!(trainers.len(), 1);
}

#[tokio::test]
async fn test_state_survives_restart() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("state.json");

    let state = BotState::initialize(Database::new(&path)).await.unwrap();
    paid_user(&state, 1, "Жанна").await;
    state.resolve_user(2, "Бауыржан").await;
    state.book(1, 4, "17:00").await.unwrap();
    state.flush().await.unwrap();
    let before_restart = state.snapshot().await;
    drop(state);

    let restarted = BotState::initialize(Database::new(&path)).await.unwrap();

    assert_eq!(restarted.snapshot().await, before_restart);
    assert!(matches!(
        restarted.book(1, 4, "17:00").await,
        Err(BookingError::SlotUnavailable { .. })
    ));
    assert_eq!(restarted.book(2, 4, "18:00").await, Err(BookingError::NotPaid));
}

#[tokio::test]
async fn test_remembered_user_survives_restart_without_other_writes() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("state.json");

    let state = BotState::initialize(Database::new(&path)).await.unwrap();
    state.remember_user(42, "Данияр").await;
    drop(state);

    let restarted = BotState::initialize(Database::new(&path)).await.unwrap();
    let (user, created) = restarted.resolve_user(42, "Другое имя").await;

    assert!(!created);
    assert_eq!(user.name, "Данияр");
    assert!(restarted.snapshot().await.users.contains_key(&42));
}

#[tokio::test]
async fn test_seeding_is_idempotent() {
    let first_dir = TempDir::new().unwrap();
    let second_dir = TempDir::new().unwrap();

    let first = Database::new(first_dir.path().join("state.json")).load().await.unwrap();
    let second = Database::new(second_dir.path().join("state.json")).load().await.unwrap();
    let reloaded = Database::new(first_dir.path().join("state.json")).load().await.unwrap();

    assert_eq!(first, second);
    assert_eq!(first, reloaded);
    assert_eq!(first.trainers, default_trainers());
    assert!(first.trainers.iter().all(|t| t.slots.len() == 13));
    assert_eq!(first, AppState::seeded());
}

#[tokio::test]
async fn test_corrupt_state_prevents_startup() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("state.json");
    std::fs::write(&path, "not json at all").unwrap();

    let result = BotState::initialize(Database::new(&path)).await;

    assert!(result.is_err());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_bookings_of_one_slot_have_single_winner() {
    let temp_dir = TempDir::new().unwrap();
    let state = BotState::initialize(Database::new(temp_dir.path().join("state.json")))
        .await
        .unwrap();
    for user_id in 0..20 {
        paid_user(&state, user_id, "Клиент").await;
    }

    let mut handles = Vec::new();
    for user_id in 0..20 {
        let state = state.clone();
        handles.push(tokio::spawn(async move {
            let result = state.book(user_id, 3, "12:00").await;
            state.flush_or_log().await;
            result
        }));
    }

    let mut winners = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => winners += 1,
            Err(e) => assert!(matches!(e, BookingError::SlotUnavailable { .. })),
        }
    }

    assert_eq!(winners, 1);
    let snapshot = state.snapshot().await;
    assert_eq!(snapshot.bookings.len(), 1);
    assert_eq!(snapshot.trainer_by_id(3).unwrap().slots.len(), 12);

    // Последнее сохранение содержит итоговое состояние.
    let on_disk = Database::new(temp_dir.path().join("state.json")).load().await.unwrap();
    assert_eq!(on_disk, snapshot);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_bookings_by_one_user_respect_limit() {
    let temp_dir = TempDir::new().unwrap();
    let state = BotState::initialize(Database::new(temp_dir.path().join("state.json")))
        .await
        .unwrap();
    paid_user(&state, 7, "Арман").await;

    let slots = ["08:00", "09:00", "10:00", "11:00", "12:00", "13:00"];
    let handles: Vec<_> = slots
        .iter()
        .map(|slot| {
            let state = state.clone();
            let slot = slot.to_string();
            tokio::spawn(async move { state.book(7, 2, &slot).await })
        })
        .collect();

    let mut ok = 0;
    for handle in handles {
        if handle.await.unwrap().is_ok() {
            ok += 1;
        }
    }

    assert_eq!(ok, 3);
    assert_eq!(state.user_bookings(7).await.len(), 3);
    assert_eq!(state.available_slots(2).await.unwrap().len(), 10);
}
