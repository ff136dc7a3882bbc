pub mod admin;
pub mod auth;
pub mod dashboard;
pub mod reward;
pub mod user;

pub use admin::admin_config;
pub use auth::auth_config;
pub use dashboard::dashboard_config;
pub use reward::reward_config;
pub use user::user_config;

use crate::error::{AppError, AppResult};
use actix_web::{HttpMessage, HttpRequest};

/// User id the auth middleware stored for this request
pub(crate) fn current_user_id(req: &HttpRequest) -> AppResult<i64> {
    req.extensions()
        .get::<i64>()
        .copied()
        .ok_or_else(|| AppError::AuthError("Missing access token".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::memory_pool;
    use crate::entities::Role;
    use crate::middlewares::AuthMiddleware;
    use crate::services::test_support::*;
    use crate::services::{RankingService, RewardService};
    use crate::utils::{JwtService, Period};
    use actix_web::http::StatusCode;
    use actix_web::{App, test, web};

    #[actix_web::test]
    async fn test_draw_route_spends_the_grant_once() {
        let pool = memory_pool().await;
        let user = insert_user(&pool, "ulla", Role::Staff, true).await;
        let last_month = Period::current().previous();
        insert_grant(&pool, user.id, last_month.year, last_month.month_i32()).await;
        insert_prize(&pool, "Kino", 10, true).await;

        let jwt = JwtService::new("test-secret", 3600, 86400);
        let token = jwt.generate_access_token(user.id, &user.username).unwrap();

        let app = test::init_service(
            App::new()
                .wrap(AuthMiddleware::new(jwt.clone()))
                .app_data(web::Data::new(RewardService::new(pool.clone())))
                .app_data(web::Data::new(RankingService::new(pool.clone())))
                .service(
                    web::scope("/api/v1")
                        .configure(reward_config)
                        .configure(dashboard_config),
                ),
        )
        .await;

        let anonymous = test::TestRequest::post()
            .uri("/api/v1/rewards/draw")
            .to_request();
        let err = test::try_call_service(&app, anonymous).await.err().unwrap();
        assert_eq!(err.as_response_error().status_code(), StatusCode::UNAUTHORIZED);

        let draw = || {
            test::TestRequest::post()
                .uri("/api/v1/rewards/draw?lang=tr")
                .insert_header(("Authorization", format!("Bearer {token}")))
                .to_request()
        };

        let resp = test::call_service(&app, draw()).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["data"]["prize_name"], "Kino (tr)");

        let resp = test::call_service(&app, draw()).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["code"], "NOT_ELIGIBLE");

        let dashboard = test::TestRequest::get()
            .uri("/api/v1/dashboard?month=13")
            .insert_header(("Authorization", format!("Bearer {token}")))
            .to_request();
        let resp = test::call_service(&app, dashboard).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
