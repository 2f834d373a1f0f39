//! Request and response models.
//!
//! User variants embed [`UserBase`] by value and flatten it on the wire, so
//! every variant carries the same `email`/`full_name` fields.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct UserBase {
    #[schemars(example = &"john@example.com")]
    pub email: String,
    #[serde(default)]
    #[schemars(example = &"John Doe")]
    pub full_name: Option<String>,
}

/// Payload for creating a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema, Validate)]
pub struct UserCreate {
    #[serde(flatten)]
    pub base: UserBase,
    #[validate(length(min = 8))]
    #[schemars(example = &"secret123")]
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct UserResponse {
    pub id: i64,
    #[serde(flatten)]
    pub base: UserBase,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl UserResponse {
    /// An active user created now.
    pub fn active(id: i64, base: UserBase) -> Self {
        Self {
            id,
            base,
            is_active: true,
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub price: f64,
    #[serde(default)]
    pub category: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct HealthStatus {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Message {
    pub message: String,
}
