// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Weekly workout totals and the active-day streak.
//!
//! The summary is recomputed from the current workout snapshot whenever the
//! list changes; nothing here is stored.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::models::WorkoutRecord;
use crate::time_utils::{calendar_days_between, local_day, one_week_before};

/// Derived dashboard figures for one user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(feature = "binding-generation", ts(export))]
pub struct WorkoutSummary {
    /// Workouts in the last seven days
    pub workouts_this_week: u32,
    /// Calories burned in the last seven days
    pub calories_this_week: u64,
    /// Consecutive active days ending today or yesterday
    pub active_streak_days: u32,
}

impl WorkoutSummary {
    /// Summarize `workouts` as of `now`, with calendar days taken in `tz`.
    ///
    /// `workouts` must be sorted most recent first.
    pub fn summarize_at<Tz: TimeZone>(
        workouts: &[WorkoutRecord],
        now: DateTime<Utc>,
        tz: &Tz,
    ) -> Self {
        let (workouts_this_week, calories_this_week) = weekly_totals(workouts, now, tz);
        Self {
            workouts_this_week,
            calories_this_week,
            active_streak_days: active_streak(workouts, now, tz),
        }
    }
}

/// Count and calorie sum of workouts strictly after one week before `now`.
pub fn weekly_totals<Tz: TimeZone>(
    workouts: &[WorkoutRecord],
    now: DateTime<Utc>,
    tz: &Tz,
) -> (u32, u64) {
    let cutoff = one_week_before(now, tz);

    workouts
        .iter()
        .filter(|w| w.occurred_at.is_some_and(|at| at > cutoff))
        .fold((0u32, 0u64), |(count, calories), w| {
            (
                count.saturating_add(1),
                calories.saturating_add(u64::from(w.calories_burned)),
            )
        })
}

/// Number of consecutive calendar days with a workout, counting back from
/// the most recent one.
///
/// Zero when the most recent workout has no timestamp or is older than
/// yesterday. Several workouts on one day count once; the first missing
/// day ends the run.
pub fn active_streak<Tz: TimeZone>(
    workouts: &[WorkoutRecord],
    now: DateTime<Utc>,
    tz: &Tz,
) -> u32 {
    let Some(most_recent) = workouts.first().and_then(|w| w.occurred_at) else {
        return 0;
    };

    let today = local_day(now, tz);
    let mut anchor = local_day(most_recent, tz);
    if calendar_days_between(today, anchor) > 1 {
        return 0;
    }

    let mut streak = 1u32;
    for at in workouts[1..].iter().filter_map(|w| w.occurred_at) {
        let day = local_day(at, tz);
        match calendar_days_between(anchor, day) {
            1 => {
                streak += 1;
                anchor = day;
            }
            // Same day as the anchor, or out of order: ignore.
            d if d <= 0 => {}
            _ => break,
        }
    }

    streak
}
