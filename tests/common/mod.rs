// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use chrono::{DateTime, Utc};
use kratos_fitness::db::FirestoreDb;
use kratos_fitness::error::{AppError, Result};
use kratos_fitness::models::WorkoutRecord;
use kratos_fitness::services::optimistic::{ListChange, ListObserver};
use kratos_fitness::services::WorkoutStore;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use tokio::sync::oneshot;

/// Check if emulator is available via environment variable.
#[allow(dead_code)]
pub fn emulator_available() -> bool {
    std::env::var("FIRESTORE_EMULATOR_HOST").is_ok()
}

/// Skip test with message if emulator not available.
#[macro_export]
macro_rules! require_emulator {
    () => {
        if !crate::common::emulator_available() {
            eprintln!("⚠️  Skipping: FIRESTORE_EMULATOR_HOST not set");
            return;
        }
    };
}

/// Create a test database connection.
#[allow(dead_code)]
pub async fn test_db() -> FirestoreDb {
    FirestoreDb::new("test-project")
        .await
        .expect("Failed to connect to Firestore emulator")
}

/// Build a persisted workout.
#[allow(dead_code)]
pub fn workout(id: &str, at: Option<DateTime<Utc>>, calories: u32) -> WorkoutRecord {
    WorkoutRecord {
        id: Some(id.to_string()),
        owner_id: "test-user".to_string(),
        name: format!("Workout {}", id),
        duration_minutes: 30,
        calories_burned: calories,
        occurred_at: at,
    }
}

/// IDs of `workouts`, in order.
#[allow(dead_code)]
pub fn ids(workouts: &[WorkoutRecord]) -> Vec<String> {
    workouts.iter().filter_map(|w| w.id.clone()).collect()
}

/// In-memory store; deletes of IDs in `failing` are refused.
#[derive(Clone, Default)]
#[allow(dead_code)]
pub struct FakeStore {
    state: Arc<Mutex<FakeState>>,
}

#[derive(Default)]
struct FakeState {
    workouts: Vec<WorkoutRecord>,
    failing: HashSet<String>,
    delete_calls: Vec<String>,
    next_id: u64,
}

#[allow(dead_code)]
impl FakeStore {
    pub fn with_workouts(workouts: Vec<WorkoutRecord>) -> Self {
        let store = Self::default();
        store.state.lock().unwrap().workouts = workouts;
        store
    }

    pub fn fail_deletes_of(&self, id: &str) {
        self.state.lock().unwrap().failing.insert(id.to_string());
    }

    pub fn delete_calls(&self) -> Vec<String> {
        self.state.lock().unwrap().delete_calls.clone()
    }

    pub fn stored_ids(&self) -> Vec<String> {
        ids(&self.state.lock().unwrap().workouts)
    }
}

impl WorkoutStore for FakeStore {
    async fn list_workouts(&self, owner_id: &str) -> Result<Vec<WorkoutRecord>> {
        let mut workouts: Vec<WorkoutRecord> = self
            .state
            .lock()
            .unwrap()
            .workouts
            .iter()
            .filter(|w| w.owner_id == owner_id)
            .cloned()
            .collect();
        workouts.sort_by(|a, b| b.occurred_at.cmp(&a.occurred_at));
        Ok(workouts)
    }

    async fn add_workout(&self, workout: &WorkoutRecord) -> Result<WorkoutRecord> {
        let mut state = self.state.lock().unwrap();
        state.next_id += 1;
        let mut saved = workout.clone();
        saved.id = Some(format!("generated-{}", state.next_id));
        state.workouts.push(saved.clone());
        Ok(saved)
    }

    async fn delete_workout(&self, id: &str) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.delete_calls.push(id.to_string());
        if state.failing.contains(id) {
            return Err(AppError::Database(format!("delete of {} refused", id)));
        }
        state.workouts.retain(|w| w.id.as_deref() != Some(id));
        Ok(())
    }
}

/// Store whose deletes wait until the test releases them, so the order in
/// which overlapping deletes complete can be chosen.
#[derive(Default)]
#[allow(dead_code)]
pub struct GatedStore {
    gates: Mutex<HashMap<String, oneshot::Receiver<Result<()>>>>,
}

#[allow(dead_code)]
impl GatedStore {
    /// Hold the next delete of `id` until a result is sent.
    pub fn gate(&self, id: &str) -> oneshot::Sender<Result<()>> {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().unwrap().insert(id.to_string(), rx);
        tx
    }
}

impl WorkoutStore for GatedStore {
    async fn list_workouts(&self, _owner_id: &str) -> Result<Vec<WorkoutRecord>> {
        Ok(Vec::new())
    }

    async fn add_workout(&self, workout: &WorkoutRecord) -> Result<WorkoutRecord> {
        Ok(workout.clone())
    }

    async fn delete_workout(&self, id: &str) -> Result<()> {
        let gate = self.gates.lock().unwrap().remove(id);
        match gate {
            Some(rx) => rx
                .await
                .unwrap_or_else(|_| Err(AppError::Database("gate dropped".to_string()))),
            None => Ok(()),
        }
    }
}

/// Observer that records every change.
#[derive(Clone, Default)]
#[allow(dead_code)]
pub struct Recorder(pub Arc<Mutex<Vec<ListChange>>>);

#[allow(dead_code)]
impl Recorder {
    pub fn changes(&self) -> Vec<ListChange> {
        self.0.lock().unwrap().clone()
    }
}

impl ListObserver for Recorder {
    fn on_change(&mut self, change: ListChange) {
        self.0.lock().unwrap().push(change);
    }
}
