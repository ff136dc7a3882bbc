use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::{Role, user_entity};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RegisterRequest {
    #[schema(example = "ayse.k")]
    pub username: String,
    #[schema(example = "secret123")]
    pub password: String,
    #[schema(example = "Ayşe Kaya")]
    pub full_name: String,
    #[schema(example = "ayse@example.com")]
    pub email: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginRequest {
    #[schema(example = "ayse.k")]
    pub username: String,
    #[schema(example = "secret123")]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    pub full_name: String,
    pub email: Option<String>,
    pub role: Role,
    pub is_approved: bool,
    pub profile_color: String,
    pub created_at: DateTime<Utc>,
}

impl From<user_entity::Model> for UserResponse {
    fn from(m: user_entity::Model) -> Self {
        Self {
            id: m.id,
            username: m.username,
            full_name: m.full_name,
            email: m.email,
            role: m.role,
            is_approved: m.is_approved,
            profile_color: m.profile_color,
            created_at: m.created_at.unwrap_or_else(Utc::now),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AuthResponse {
    pub user: UserResponse,
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: i64,
}

/// Admin user overview
#[derive(Debug, Serialize, ToSchema)]
pub struct UserListResponse {
    /// Registered, waiting for approval
    pub pending: Vec<UserResponse>,
    pub approved: Vec<UserResponse>,
}
