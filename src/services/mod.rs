// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod optimistic;
pub mod workouts;

pub use optimistic::{DeleteOutcome, Identified, ListChange, ListObserver, OptimisticList};
pub use workouts::{WorkoutService, WorkoutStore};
