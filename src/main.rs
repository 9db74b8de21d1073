// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Kratos workout summary
//!
//! Loads one user's workouts from Firestore and logs the weekly totals and
//! active streak shown on the dashboard cards.

use chrono::{TimeZone, Utc};
use kratos_fitness::{
    config::Config,
    db::FirestoreDb,
    services::{WorkoutService, WorkoutStore},
    time_utils::format_utc_rfc3339,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    let config = Config::from_env()?;
    tracing::info!(
        user_id = %config.user_id,
        utc_calendar = config.use_utc_calendar,
        "Starting Kratos workout summary"
    );

    let db = FirestoreDb::new(&config.gcp_project_id).await?;

    if config.use_utc_calendar {
        let service =
            WorkoutService::with_zone(db, config.user_id.clone(), config.calories, Utc);
        report(&service).await
    } else {
        let service = WorkoutService::new(db, config.user_id.clone(), config.calories);
        report(&service).await
    }
}

/// Load the workouts, then log and print the summary.
async fn report<S: WorkoutStore, Tz: TimeZone>(
    service: &WorkoutService<S, Tz>,
) -> Result<(), Box<dyn std::error::Error>> {
    let summary = service.refresh().await?;

    let workouts = service.workouts().await;
    let latest = workouts
        .first()
        .and_then(|w| w.occurred_at)
        .map(format_utc_rfc3339);

    tracing::info!(
        user_id = %service.owner_id(),
        total = workouts.len(),
        latest = latest.as_deref().unwrap_or("none"),
        workouts_this_week = summary.workouts_this_week,
        calories_this_week = summary.calories_this_week,
        active_streak_days = summary.active_streak_days,
        "Workout summary"
    );

    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("kratos_fitness=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
