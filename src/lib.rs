// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Kratos: workout logging and summaries for a social fitness app
//!
//! This crate holds the client-side workout logic: weekly totals and the
//! active-day streak, plus optimistic deletes that roll back when the
//! document store refuses them.

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod services;
pub mod time_utils;
