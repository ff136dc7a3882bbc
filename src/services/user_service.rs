use crate::entities::{Role, user_entity as users};
use crate::error::{AppError, AppResult};
use crate::models::*;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    IntoActiveModel, QueryFilter, QueryOrder, Set,
};

/// Loads the acting identity and checks it may run admin actions.
pub async fn ensure_admin<C: ConnectionTrait>(conn: &C, actor_id: i64) -> AppResult<users::Model> {
    let actor = users::Entity::find_by_id(actor_id).one(conn).await?;
    match actor {
        Some(user) if user.is_approved && user.role.can_administer() => Ok(user),
        _ => {
            log::warn!("User {actor_id} attempted an admin action");
            Err(AppError::PermissionDenied)
        }
    }
}

#[derive(Clone)]
pub struct UserService {
    pool: DatabaseConnection,
}

impl UserService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    pub async fn get_user(&self, user_id: i64) -> AppResult<UserResponse> {
        let user = users::Entity::find_by_id(user_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;
        Ok(user.into())
    }

    /// Pending and approved accounts, oldest first
    pub async fn list_users(&self, actor_id: i64) -> AppResult<UserListResponse> {
        ensure_admin(&self.pool, actor_id).await?;

        let all = users::Entity::find()
            .order_by_asc(users::Column::Id)
            .all(&self.pool)
            .await?;

        let (approved, pending): (Vec<_>, Vec<_>) = all.into_iter().partition(|u| u.is_approved);

        Ok(UserListResponse {
            pending: pending.into_iter().map(Into::into).collect(),
            approved: approved.into_iter().map(Into::into).collect(),
        })
    }

    pub async fn approve_user(&self, actor_id: i64, user_id: i64) -> AppResult<UserResponse> {
        ensure_admin(&self.pool, actor_id).await?;

        let user = users::Entity::find_by_id(user_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        if user.is_approved {
            return Ok(user.into());
        }

        let mut am = user.into_active_model();
        am.is_approved = Set(true);
        let updated = am.update(&self.pool).await?;

        log::info!("User {} ({}) approved by {actor_id}", updated.id, updated.username);
        Ok(updated.into())
    }

    /// Removes a staff account together with its sales, wins and grants.
    /// Admin accounts cannot be deleted.
    pub async fn delete_user(&self, actor_id: i64, user_id: i64) -> AppResult<()> {
        ensure_admin(&self.pool, actor_id).await?;

        let user = users::Entity::find_by_id(user_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        if user.role == Role::Admin {
            return Err(AppError::Forbidden(
                "Admin accounts cannot be deleted".to_string(),
            ));
        }

        users::Entity::delete_by_id(user.id).exec(&self.pool).await?;

        log::info!("User {} ({}) deleted by {actor_id}", user.id, user.username);
        Ok(())
    }

    /// Approved staff accounts, i.e. everyone a sale can be recorded for
    pub async fn list_ranked_users(&self, actor_id: i64) -> AppResult<Vec<UserResponse>> {
        ensure_admin(&self.pool, actor_id).await?;

        let list = users::Entity::find()
            .filter(users::Column::IsApproved.eq(true))
            .filter(users::Column::Role.eq(Role::Staff))
            .order_by_asc(users::Column::FullName)
            .all(&self.pool)
            .await?;
        Ok(list.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::memory_pool;
    use crate::services::RewardService;
    use crate::services::test_support::*;
    use crate::utils::Period;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[tokio::test]
    async fn test_list_users_splits_pending() {
        let pool = memory_pool().await;
        let admin = insert_user(&pool, "boss", Role::Admin, true).await;
        insert_user(&pool, "anna", Role::Staff, true).await;
        insert_user(&pool, "neu", Role::Staff, false).await;

        let svc = UserService::new(pool);
        let list = svc.list_users(admin.id).await.unwrap();
        assert_eq!(list.pending.len(), 1);
        assert_eq!(list.pending[0].username, "neu");
        assert_eq!(list.approved.len(), 2);
    }

    #[tokio::test]
    async fn test_staff_cannot_run_admin_actions() {
        let pool = memory_pool().await;
        let staff = insert_user(&pool, "anna", Role::Staff, true).await;
        let pending = insert_user(&pool, "neu", Role::Staff, false).await;

        let svc = UserService::new(pool);
        let err = svc.approve_user(staff.id, pending.id).await.unwrap_err();
        assert!(matches!(err, AppError::PermissionDenied));
        let err = svc.list_users(9999).await.unwrap_err();
        assert!(matches!(err, AppError::PermissionDenied));
    }

    #[tokio::test]
    async fn test_approve_user() {
        let pool = memory_pool().await;
        let admin = insert_user(&pool, "boss", Role::Admin, true).await;
        let pending = insert_user(&pool, "neu", Role::Staff, false).await;

        let svc = UserService::new(pool);
        let approved = svc.approve_user(admin.id, pending.id).await.unwrap();
        assert!(approved.is_approved);

        let err = svc.approve_user(admin.id, 4242).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_user_cascades_and_protects_admins() {
        let pool = memory_pool().await;
        let admin = insert_user(&pool, "boss", Role::Admin, true).await;
        let other_admin = insert_user(&pool, "boss2", Role::Admin, true).await;
        let staff = insert_user(&pool, "anna", Role::Staff, true).await;
        insert_sale(&pool, staff.id, (2025, 3, 1), 4, 0).await;
        insert_grant(&pool, staff.id, 2025, 2).await;
        insert_grant(&pool, staff.id, 2025, 3).await;
        insert_prize(&pool, "Kino", 10, true).await;
        RewardService::new(pool.clone())
            .draw_at(
                staff.id,
                Period::new(2025, 3).unwrap(),
                Language::De,
                &mut StdRng::seed_from_u64(7),
            )
            .await
            .unwrap();
        assert_eq!(count_wins(&pool).await, 1);
        assert_eq!(count_grants(&pool).await, 2);

        let svc = UserService::new(pool.clone());
        let err = svc.delete_user(admin.id, other_admin.id).await.unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));

        svc.delete_user(admin.id, staff.id).await.unwrap();
        assert!(users::Entity::find_by_id(staff.id).one(&pool).await.unwrap().is_none());
        assert_eq!(count_sales(&pool).await, 0);
        assert_eq!(count_grants(&pool).await, 0);
        assert_eq!(count_wins(&pool).await, 0);

        let err = svc.delete_user(admin.id, staff.id).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
