// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout list service.
//!
//! Owns the signed-in user's workout list and keeps its summary current:
//! 1. Load or receive snapshots from the store
//! 2. Log new workouts
//! 3. Delete workouts optimistically, restoring them if the store refuses
//! 4. Publish a fresh [`WorkoutSummary`] after every list change

use std::future::Future;

use chrono::{Local, TimeZone, Utc};
use tokio::sync::{watch, Mutex};

use crate::error::Result;
use crate::models::{CalorieModel, NewWorkout, WorkoutRecord, WorkoutSummary};
use crate::services::optimistic::{DeleteOutcome, ListObserver, OptimisticList};

/// Remote document store holding workouts.
pub trait WorkoutStore: Send + Sync {
    /// All workouts of `owner_id`, most recent first.
    fn list_workouts(&self, owner_id: &str)
        -> impl Future<Output = Result<Vec<WorkoutRecord>>> + Send;

    /// Persist a new workout and return it with its assigned ID.
    fn add_workout(
        &self,
        workout: &WorkoutRecord,
    ) -> impl Future<Output = Result<WorkoutRecord>> + Send;

    /// Delete the workout with document ID `id`.
    fn delete_workout(&self, id: &str) -> impl Future<Output = Result<()>> + Send;
}

/// Workout list for one signed-in user.
///
/// Summary calendar days are taken in `Tz`.
pub struct WorkoutService<S, Tz = Local> {
    store: S,
    owner_id: String,
    calories: CalorieModel,
    tz: Tz,
    list: Mutex<OptimisticList<WorkoutRecord>>,
    summary: watch::Sender<WorkoutSummary>,
}

impl<S: WorkoutStore> WorkoutService<S, Local> {
    /// Service whose summaries follow the device's local calendar.
    pub fn new(store: S, owner_id: impl Into<String>, calories: CalorieModel) -> Self {
        Self::with_zone(store, owner_id, calories, Local)
    }
}

impl<S: WorkoutStore, Tz: TimeZone> WorkoutService<S, Tz> {
    pub fn with_zone(
        store: S,
        owner_id: impl Into<String>,
        calories: CalorieModel,
        tz: Tz,
    ) -> Self {
        let (summary, _) = watch::channel(WorkoutSummary::default());
        Self {
            store,
            owner_id: owner_id.into(),
            calories,
            tz,
            list: Mutex::new(OptimisticList::default()),
            summary,
        }
    }

    pub fn owner_id(&self) -> &str {
        &self.owner_id
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Receiver that always holds the summary of the current list.
    pub fn summaries(&self) -> watch::Receiver<WorkoutSummary> {
        self.summary.subscribe()
    }

    /// Latest published summary.
    pub fn summary(&self) -> WorkoutSummary {
        *self.summary.borrow()
    }

    /// Register an observer for row-level list changes.
    pub async fn subscribe(&self, observer: impl ListObserver + 'static) {
        self.list.lock().await.subscribe(observer);
    }

    /// Copy of the current list.
    pub async fn workouts(&self) -> Vec<WorkoutRecord> {
        self.list.lock().await.items().to_vec()
    }

    /// Reload the list from the store.
    pub async fn refresh(&self) -> Result<WorkoutSummary> {
        let workouts = self.store.list_workouts(&self.owner_id).await?;
        tracing::debug!(
            owner_id = %self.owner_id,
            count = workouts.len(),
            "Loaded workouts"
        );
        Ok(self.apply_snapshot(workouts).await)
    }

    /// Replace the list with a live-query snapshot (most recent first).
    pub async fn apply_snapshot(&self, workouts: Vec<WorkoutRecord>) -> WorkoutSummary {
        let mut list = self.list.lock().await;
        list.replace_all(workouts);
        self.publish(&list)
    }

    /// Validate form input and persist a new workout.
    ///
    /// The list itself is updated by the next snapshot, which carries the
    /// store-assigned ID and timestamp.
    pub async fn log_workout(&self, name: &str, duration: &str) -> Result<WorkoutRecord> {
        let record = NewWorkout::parse(name, duration)?.into_record(
            &self.owner_id,
            &self.calories,
            Utc::now(),
        );

        let saved = self.store.add_workout(&record).await?;
        tracing::info!(
            owner_id = %self.owner_id,
            workout_id = saved.id.as_deref().unwrap_or_default(),
            calories = saved.calories_burned,
            "Workout logged"
        );
        Ok(saved)
    }

    /// Delete a workout optimistically.
    ///
    /// The row disappears (and observers hear about it) before the store is
    /// called. If the store fails, the row is restored and the outcome
    /// carries the error. The list lock is never held across the remote
    /// call, so deletes of different rows may overlap.
    pub async fn delete_workout(&self, id: &str) -> Result<DeleteOutcome> {
        let pending = {
            let mut list = self.list.lock().await;
            let pending = list.begin_delete(id)?;
            self.publish(&list);
            pending
        };

        let remote = self.store.delete_workout(id).await;

        let mut list = self.list.lock().await;
        let outcome = list.settle(pending, remote);
        match &outcome {
            DeleteOutcome::Deleted { .. } => {
                tracing::info!(owner_id = %self.owner_id, workout_id = id, "Workout deleted");
            }
            DeleteOutcome::Restored { index, error } => {
                tracing::warn!(
                    owner_id = %self.owner_id,
                    workout_id = id,
                    index,
                    error_code = error.code(),
                    "Workout delete failed, restored"
                );
                self.publish(&list);
            }
        }
        Ok(outcome)
    }

    fn publish(&self, list: &OptimisticList<WorkoutRecord>) -> WorkoutSummary {
        let summary = WorkoutSummary::summarize_at(list.items(), Utc::now(), &self.tz);
        self.summary.send_replace(summary);
        summary
    }
}
