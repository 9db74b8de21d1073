// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Workout model for storage, logging and summaries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{AppError, Result};
use crate::services::optimistic::Identified;

/// Stored workout record in Firestore (`workouts/{id}`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutRecord {
    /// Document ID; `None` until the first successful persist
    #[serde(
        default,
        alias = "_firestore_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    /// Owning user's UID
    #[serde(rename = "userId")]
    pub owner_id: String,
    /// Free-text label
    #[serde(rename = "workoutName")]
    pub name: String,
    /// Duration in minutes (positive)
    pub duration_minutes: u32,
    /// Client-side calorie estimate
    #[serde(default)]
    pub calories_burned: u32,
    /// When the workout happened; null until the server assigns it
    #[serde(
        default,
        rename = "timestamp",
        with = "firestore::serialize_as_optional_timestamp"
    )]
    pub occurred_at: Option<DateTime<Utc>>,
}

impl Identified for WorkoutRecord {
    fn id(&self) -> Option<&str> {
        self.id.as_deref().filter(|id| !id.is_empty())
    }
}

/// Calorie estimation parameters.
///
/// `kcal/min = MET × 3.5 × weight_kg / 200`, scaled by [`INTENSITY_FACTOR`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalorieModel {
    pub met: f64,
    pub weight_kg: f64,
}

/// Multiplier applied on top of the MET formula.
pub const INTENSITY_FACTOR: f64 = 2.0;

impl Default for CalorieModel {
    fn default() -> Self {
        Self {
            met: 5.0,
            weight_kg: 75.0,
        }
    }
}

impl CalorieModel {
    /// Estimated calories for a workout of `duration_minutes`, truncated.
    pub fn estimate(&self, duration_minutes: u32) -> u32 {
        let per_minute = self.met * 3.5 * self.weight_kg / 200.0;
        let total = per_minute * f64::from(duration_minutes) * INTENSITY_FACTOR;
        if total.is_finite() && total > 0.0 {
            total as u32
        } else {
            0
        }
    }
}

/// A workout as entered by the user, before it is persisted.
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct NewWorkout {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    // At most one full day.
    #[validate(range(min = 1, max = 1440))]
    pub duration_minutes: u32,
}

impl NewWorkout {
    /// Build a draft from raw form input, trimming both fields.
    pub fn parse(name: &str, duration: &str) -> Result<Self> {
        let name = name.trim();
        let duration = duration.trim();

        if name.is_empty() || duration.is_empty() {
            return Err(AppError::BadRequest(
                "Workout name and duration are required".to_string(),
            ));
        }

        let duration_minutes = duration
            .parse::<i64>()
            .ok()
            .filter(|minutes| *minutes > 0)
            .and_then(|minutes| u32::try_from(minutes).ok())
            .ok_or_else(|| {
                AppError::BadRequest(format!("Invalid duration '{}': must be positive", duration))
            })?;

        let draft = Self {
            name: name.to_string(),
            duration_minutes,
        };
        draft.validate()?;
        Ok(draft)
    }

    /// Turn the draft into an unsaved record owned by `owner_id`.
    ///
    /// `now` is a placeholder timestamp until the store assigns its own.
    pub fn into_record(
        self,
        owner_id: &str,
        calories: &CalorieModel,
        now: DateTime<Utc>,
    ) -> WorkoutRecord {
        WorkoutRecord {
            id: None,
            owner_id: owner_id.to_string(),
            calories_burned: calories.estimate(self.duration_minutes),
            name: self.name,
            duration_minutes: self.duration_minutes,
            occurred_at: Some(now),
        }
    }
}
