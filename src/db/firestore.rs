// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore client wrapper with typed operations.
//!
//! Provides high-level operations for:
//! - Users (profile documents at `users/{uid}`)
//! - Workouts (`workouts/{id}`, the store behind [`WorkoutService`])
//!
//! [`WorkoutService`]: crate::services::WorkoutService

use crate::db::collections;
use crate::error::AppError;
use crate::models::user::other_people;
use crate::models::{SessionIdentity, UserProfile, WorkoutRecord};
use crate::services::WorkoutStore;

/// Firestore database client.
#[derive(Clone)]
pub struct FirestoreDb {
    client: Option<firestore::FirestoreDb>,
}

impl FirestoreDb {
    /// Create a new Firestore client.
    ///
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn new(project_id: &str) -> Result<Self, AppError> {
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::create_emulator_client(project_id).await;
        }

        let client = firestore::FirestoreDb::new(project_id)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to Firestore: {}", e)))?;

        tracing::info!(project = project_id, "Connected to Firestore");

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a Firestore client for the emulator with unauthenticated access.
    async fn create_emulator_client(project_id: &str) -> Result<Self, AppError> {
        tracing::info!("Using unauthenticated connection for Firestore Emulator");

        let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
            Ok(gcloud_sdk::Token {
                token_type: "Bearer".to_string(),
                token: gcloud_sdk::SecretValue::new(
                    "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJ0ZXN0In0."
                        .to_string()
                        .into(),
                ),
                expiry: chrono::Utc::now() + chrono::Duration::hours(1),
            })
        });

        let options = firestore::FirestoreDbOptions::new(project_id.to_string());

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await
        .map_err(|e| {
            AppError::Database(format!("Failed to connect to Firestore Emulator: {}", e))
        })?;

        tracing::info!(
            project = project_id,
            "Connected to Firestore (Emulator/Unauthenticated)"
        );

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a mock Firestore client for testing (offline mode).
    ///
    /// All database operations will return an error if called.
    pub fn new_mock() -> Self {
        Self { client: None }
    }

    fn get_client(&self) -> Result<&firestore::FirestoreDb, AppError> {
        self.client
            .as_ref()
            .ok_or_else(|| AppError::Database("Database not connected (offline mode)".to_string()))
    }

    // ─── User Operations ─────────────────────────────────────────

    /// Get a user profile by UID.
    pub async fn get_user(&self, uid: &str) -> Result<Option<UserProfile>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::USERS)
            .obj()
            .one(uid)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create or replace a user profile.
    pub async fn upsert_user(&self, user: &UserProfile) -> Result<(), AppError> {
        if user.uid.is_empty() {
            return Err(AppError::BadRequest("Profile has no UID".to_string()));
        }

        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::USERS)
            .document_id(&user.uid)
            .object(user)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Return the signed-in user's profile, creating a minimal one from the
    /// identity provider's data if none exists yet.
    pub async fn ensure_profile(
        &self,
        identity: &SessionIdentity,
    ) -> Result<UserProfile, AppError> {
        if let Some(profile) = self.get_user(&identity.uid).await? {
            return Ok(profile);
        }

        let profile = UserProfile::seed_from(identity, chrono::Utc::now().timestamp_millis());
        self.upsert_user(&profile).await?;
        tracing::info!(uid = %profile.uid, "Created user profile");
        Ok(profile)
    }

    /// Profiles of everyone except `me`.
    pub async fn list_people(&self, me: &str) -> Result<Vec<UserProfile>, AppError> {
        let all: Vec<UserProfile> = self
            .get_client()?
            .fluent()
            .select()
            .from(collections::USERS)
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(other_people(all, me))
    }

    // ─── Workout Operations ──────────────────────────────────────

    /// Get workouts for a user, most recent first.
    pub async fn get_workouts_for_user(
        &self,
        owner_id: &str,
    ) -> Result<Vec<WorkoutRecord>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .from(collections::WORKOUTS)
            .filter(|q| q.for_all([q.field("userId").eq(owner_id)]))
            .order_by([("timestamp", firestore::FirestoreQueryDirection::Descending)])
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Store a new workout under a generated document ID.
    pub async fn insert_workout(&self, workout: &WorkoutRecord) -> Result<WorkoutRecord, AppError> {
        let saved: WorkoutRecord = self
            .get_client()?
            .fluent()
            .insert()
            .into(collections::WORKOUTS)
            .generate_document_id()
            .object(workout)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(saved)
    }

    /// Delete a workout document.
    pub async fn remove_workout(&self, id: &str) -> Result<(), AppError> {
        self.get_client()?
            .fluent()
            .delete()
            .from(collections::WORKOUTS)
            .document_id(id)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }
}

impl WorkoutStore for FirestoreDb {
    async fn list_workouts(&self, owner_id: &str) -> Result<Vec<WorkoutRecord>, AppError> {
        self.get_workouts_for_user(owner_id).await
    }

    async fn add_workout(&self, workout: &WorkoutRecord) -> Result<WorkoutRecord, AppError> {
        self.insert_workout(workout).await
    }

    async fn delete_workout(&self, id: &str) -> Result<(), AppError> {
        self.remove_workout(id).await
    }
}
