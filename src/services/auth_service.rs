use crate::config::AdminConfig;
use crate::entities::{Role, user_entity as users};
use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::utils::*;
use chrono::Utc;
use rand::seq::SliceRandom;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set, SqlErr,
};

/// Avatar colours handed out at registration
pub const PROFILE_COLORS: [&str; 7] = [
    "#3B82F6", "#10B981", "#F59E0B", "#EF4444", "#8B5CF6", "#EC4899", "#06B6D4",
];

const BAD_CREDENTIALS: &str = "Invalid username or password";

#[derive(Clone)]
pub struct AuthService {
    pool: DatabaseConnection,
    jwt_service: JwtService,
}

impl AuthService {
    pub fn new(pool: DatabaseConnection, jwt_service: JwtService) -> Self {
        Self { pool, jwt_service }
    }

    /// Creates an unapproved staff account. It can log in once an admin
    /// approves it.
    pub async fn register(&self, request: RegisterRequest) -> AppResult<UserResponse> {
        let username = request.username.trim().to_string();
        validate_username(&username)?;
        validate_password(&request.password)?;
        let full_name = require_text("full_name", &request.full_name, 100)?;
        let email = request
            .email
            .map(|e| e.trim().to_string())
            .filter(|e| !e.is_empty());

        if self.find_by_username(&username).await?.is_some() {
            return Err(AppError::ValidationError(
                "Username already taken".to_string(),
            ));
        }

        let profile_color = PROFILE_COLORS
            .choose(&mut rand::thread_rng())
            .copied()
            .unwrap_or(PROFILE_COLORS[0]);

        let created = users::ActiveModel {
            username: Set(username),
            email: Set(email),
            password_hash: Set(hash_password(&request.password)?),
            full_name: Set(full_name),
            is_approved: Set(false),
            role: Set(Role::Staff),
            profile_color: Set(profile_color.to_string()),
            created_at: Set(Some(Utc::now())),
            ..Default::default()
        }
        .insert(&self.pool)
        .await
        .map_err(|e| match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => {
                AppError::ValidationError("Username already taken".to_string())
            }
            _ => AppError::from(e),
        })?;

        log::info!("User {} ({}) registered, awaiting approval", created.id, created.username);
        Ok(created.into())
    }

    pub async fn login(&self, request: LoginRequest) -> AppResult<AuthResponse> {
        let user = self
            .find_by_username(request.username.trim())
            .await?
            .ok_or_else(|| AppError::AuthError(BAD_CREDENTIALS.to_string()))?;

        if !verify_password(&request.password, &user.password_hash)? {
            log::warn!("Failed login for {}", user.username);
            return Err(AppError::AuthError(BAD_CREDENTIALS.to_string()));
        }

        if !user.is_approved {
            return Err(AppError::AuthError("Account not approved yet".to_string()));
        }

        let access_token = self.jwt_service.generate_access_token(user.id, &user.username)?;
        let refresh_token = self.jwt_service.generate_refresh_token(user.id, &user.username)?;

        Ok(AuthResponse {
            user: user.into(),
            access_token,
            refresh_token,
            expires_in: self.jwt_service.get_access_token_expires_in(),
        })
    }

    /// New access token for a still existing, still approved account
    pub async fn refresh_token(&self, refresh_token: &str) -> AppResult<AuthResponse> {
        let claims = self.jwt_service.verify_refresh_token(refresh_token)?;
        let user_id = claims.user_id()?;

        let user = users::Entity::find_by_id(user_id)
            .one(&self.pool)
            .await?
            .filter(|u| u.is_approved)
            .ok_or_else(|| AppError::AuthError("Account no longer active".to_string()))?;

        let access_token = self.jwt_service.generate_access_token(user.id, &user.username)?;

        Ok(AuthResponse {
            user: user.into(),
            access_token,
            refresh_token: refresh_token.to_string(),
            expires_in: self.jwt_service.get_access_token_expires_in(),
        })
    }

    /// Creates the configured admin account if it does not exist yet.
    pub async fn bootstrap_admin(&self, admin: &AdminConfig) -> AppResult<()> {
        if !admin.is_enabled() {
            return Ok(());
        }

        if self.find_by_username(&admin.username).await?.is_some() {
            log::debug!("Admin account {} already present", admin.username);
            return Ok(());
        }

        validate_username(&admin.username)?;
        validate_password(&admin.password)?;

        let created = users::ActiveModel {
            username: Set(admin.username.clone()),
            email: Set(None),
            password_hash: Set(hash_password(&admin.password)?),
            full_name: Set(require_text("admin.full_name", &admin.full_name, 100)?),
            is_approved: Set(true),
            role: Set(Role::Admin),
            profile_color: Set(PROFILE_COLORS[0].to_string()),
            created_at: Set(Some(Utc::now())),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?;

        log::info!("Bootstrapped admin account {} (id {})", created.username, created.id);
        Ok(())
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<users::Model>> {
        Ok(users::Entity::find()
            .filter(users::Column::Username.eq(username))
            .one(&self.pool)
            .await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::memory_pool;
    use crate::services::UserService;
    use crate::services::test_support::*;

    fn service(pool: DatabaseConnection) -> AuthService {
        AuthService::new(pool, JwtService::new("test-secret", 3600, 86400))
    }

    fn register_request(username: &str) -> RegisterRequest {
        RegisterRequest {
            username: username.to_string(),
            password: "secret123".to_string(),
            full_name: "Ayşe Kaya".to_string(),
            email: Some(" ".to_string()),
        }
    }

    fn login_request(username: &str, password: &str) -> LoginRequest {
        LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_register_then_login_after_approval() {
        let pool = memory_pool().await;
        let admin = insert_user(&pool, "boss", Role::Admin, true).await;
        let auth = service(pool.clone());

        let user = auth.register(register_request("ayse.k")).await.unwrap();
        assert!(!user.is_approved);
        assert_eq!(user.role, Role::Staff);
        assert_eq!(user.email, None);
        assert!(PROFILE_COLORS.contains(&user.profile_color.as_str()));

        let err = auth.login(login_request("ayse.k", "secret123")).await.unwrap_err();
        assert!(matches!(err, AppError::AuthError(msg) if msg == "Account not approved yet"));

        UserService::new(pool).approve_user(admin.id, user.id).await.unwrap();

        let session = auth.login(login_request("ayse.k", "secret123")).await.unwrap();
        assert_eq!(session.user.id, user.id);
        assert_eq!(session.expires_in, 3600);

        let refreshed = auth.refresh_token(&session.refresh_token).await.unwrap();
        assert_eq!(refreshed.user.id, user.id);
        assert!(auth.refresh_token(&session.access_token).await.is_err());
    }

    #[tokio::test]
    async fn test_register_rejects_bad_input() {
        let pool = memory_pool().await;
        let auth = service(pool);
        auth.register(register_request("ayse.k")).await.unwrap();

        let err = auth.register(register_request("ayse.k")).await.unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));

        let err = auth.register(register_request("a b")).await.unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));

        let mut short = register_request("mehmet");
        short.password = "123".to_string();
        assert!(auth.register(short).await.is_err());

        let mut nameless = register_request("mehmet");
        nameless.full_name = "  ".to_string();
        assert!(auth.register(nameless).await.is_err());
    }

    #[tokio::test]
    async fn test_login_wrong_credentials() {
        let pool = memory_pool().await;
        let auth = service(pool);
        auth.register(register_request("ayse.k")).await.unwrap();

        let err = auth.login(login_request("ayse.k", "wrong-pw")).await.unwrap_err();
        assert!(matches!(err, AppError::AuthError(msg) if msg == BAD_CREDENTIALS));
        let err = auth.login(login_request("nobody", "secret123")).await.unwrap_err();
        assert!(matches!(err, AppError::AuthError(_)));
    }

    #[tokio::test]
    async fn test_bootstrap_admin_is_idempotent() {
        let pool = memory_pool().await;
        let auth = service(pool.clone());
        let config = AdminConfig {
            username: "admin".to_string(),
            password: "change-me".to_string(),
            full_name: "Administrator".to_string(),
        };

        auth.bootstrap_admin(&config).await.unwrap();
        auth.bootstrap_admin(&config).await.unwrap();

        let session = auth.login(login_request("admin", "change-me")).await.unwrap();
        assert_eq!(session.user.role, Role::Admin);
        assert!(session.user.is_approved);
        assert_eq!(users::Entity::find().all(&pool).await.unwrap().len(), 1);

        auth.bootstrap_admin(&AdminConfig::default()).await.unwrap();
    }
}
