use actix_web::{HttpRequest, HttpResponse, Result, ResponseError, web};

use super::current_user_id;
use crate::models::*;
use crate::services::{RankingService, UserService};

#[utoipa::path(
    get,
    path = "/me",
    tag = "user",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Current account", body = UserResponse),
        (status = 401, description = "Not logged in"),
        (status = 404, description = "Account no longer exists")
    )
)]
pub async fn me(user_service: web::Data<UserService>, req: HttpRequest) -> Result<HttpResponse> {
    let user_id = current_user_id(&req)?;

    match user_service.get_user(user_id).await {
        Ok(user) => Ok(HttpResponse::Ok().json(ApiResponse::success(user))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/stats/me",
    tag = "user",
    params(
        ("year" = Option<i32>, Query, description = "Defaults to the current year"),
        ("month" = Option<u32>, Query, description = "1-12, defaults to the current month")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Caller's ranking entry", body = RankingEntry),
        (status = 400, description = "Invalid period"),
        (status = 404, description = "Caller is not ranked")
    )
)]
pub async fn my_stats(
    ranking_service: web::Data<RankingService>,
    req: HttpRequest,
    query: web::Query<RankingQuery>,
) -> Result<HttpResponse> {
    let user_id = current_user_id(&req)?;
    let period = query.period()?;

    match ranking_service.user_stats(user_id, period).await {
        Ok(entry) => Ok(HttpResponse::Ok().json(ApiResponse::success(entry))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn user_config(cfg: &mut web::ServiceConfig) {
    cfg.route("/me", web::get().to(me))
        .route("/stats/me", web::get().to(my_stats));
}
