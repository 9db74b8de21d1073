// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Logging workouts through the workout service.

use kratos_fitness::error::AppError;
use kratos_fitness::models::CalorieModel;
use kratos_fitness::services::WorkoutService;

mod common;
use common::FakeStore;

#[tokio::test]
async fn test_log_workout_persists_with_estimate() {
    let store = FakeStore::default();
    let service = WorkoutService::new(store.clone(), "runner-1", CalorieModel::default());

    let saved = service.log_workout(" Tempo run ", "30").await.unwrap();

    assert_eq!(saved.id.as_deref(), Some("generated-1"));
    assert_eq!(saved.owner_id, "runner-1");
    assert_eq!(saved.name, "Tempo run");
    assert_eq!(saved.calories_burned, 393);
    assert!(saved.occurred_at.is_some());
    assert_eq!(store.stored_ids(), vec!["generated-1"]);
}

#[tokio::test]
async fn test_logged_workout_shows_up_after_refresh() {
    let store = FakeStore::default();
    let service = WorkoutService::new(store, "runner-1", CalorieModel::default());

    service.log_workout("Swim", "20").await.unwrap();
    assert!(service.workouts().await.is_empty());

    let summary = service.refresh().await.unwrap();
    assert_eq!(service.workouts().await.len(), 1);
    assert_eq!(summary.workouts_this_week, 1);
    assert_eq!(summary.calories_this_week, 262);
    assert_eq!(summary.active_streak_days, 1);
}

#[tokio::test]
async fn test_invalid_input_never_reaches_store() {
    let store = FakeStore::default();
    let service = WorkoutService::new(store.clone(), "runner-1", CalorieModel::default());

    for (name, duration) in [("", "30"), ("Run", "0"), ("Run", "-10"), ("Run", "ten")] {
        let result = service.log_workout(name, duration).await;
        assert!(
            matches!(result, Err(AppError::BadRequest(_))),
            "{:?}/{:?} should be rejected",
            name,
            duration
        );
    }
    assert!(store.stored_ids().is_empty());
}

#[tokio::test]
async fn test_custom_calorie_model() {
    let store = FakeStore::default();
    let calories = CalorieModel {
        met: 8.0,
        weight_kg: 60.0,
    };
    let service = WorkoutService::new(store, "runner-1", calories);

    // 8 * 3.5 * 60 / 200 = 8.4 kcal/min, * 10 min * 2 = 168
    let saved = service.log_workout("Intervals", "10").await.unwrap();
    assert_eq!(saved.calories_burned, 168);
}
