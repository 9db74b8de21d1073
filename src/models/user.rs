// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User profile model for storage.

use serde::{Deserialize, Serialize};
use validator::ValidateEmail;

/// Display name used when the identity has neither a name nor an email.
pub const FALLBACK_DISPLAY_NAME: &str = "User";

/// User profile stored in Firestore (`users/{uid}`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// Identity provider UID (also used as document ID)
    pub uid: String,
    /// Name shown throughout the app
    pub display_name: String,
    /// Email address (empty for anonymous users)
    #[serde(default)]
    pub email: String,
    /// Avatar URL
    #[serde(default)]
    pub photo_url: Option<String>,
    /// Current push messaging token
    #[serde(default)]
    pub fcm_token: Option<String>,
    /// Creation time (epoch milliseconds)
    #[serde(default)]
    pub created_at: i64,
}

/// What the identity provider knows about the signed-in user.
#[derive(Debug, Clone, Default)]
pub struct SessionIdentity {
    pub uid: String,
    pub display_name: Option<String>,
    pub email: Option<String>,
    pub photo_url: Option<String>,
}

impl UserProfile {
    /// Minimal profile seeded from the identity provider.
    ///
    /// Display name falls back to the email, then to [`FALLBACK_DISPLAY_NAME`].
    pub fn seed_from(identity: &SessionIdentity, created_at: i64) -> Self {
        let display_name = identity
            .display_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .or(identity.email.as_deref().filter(|email| !email.is_empty()))
            .unwrap_or(FALLBACK_DISPLAY_NAME)
            .to_string();

        Self {
            uid: identity.uid.clone(),
            display_name,
            email: identity.email.clone().unwrap_or_default(),
            photo_url: identity.photo_url.clone(),
            fcm_token: None,
            created_at,
        }
    }
}

/// Profiles to show in the people browser: everyone but `me`, skipping
/// documents without a UID.
pub fn other_people(profiles: Vec<UserProfile>, me: &str) -> Vec<UserProfile> {
    profiles
        .into_iter()
        .filter(|p| !p.uid.trim().is_empty() && p.uid != me)
        .collect()
}

/// Check that `email` looks like an email address.
pub fn is_valid_email(email: &str) -> bool {
    !email.is_empty() && email.validate_email()
}
