// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod message;
pub mod summary;
pub mod user;
pub mod workout;

pub use message::Message;
pub use summary::WorkoutSummary;
pub use user::{SessionIdentity, UserProfile};
pub use workout::{CalorieModel, NewWorkout, WorkoutRecord};
