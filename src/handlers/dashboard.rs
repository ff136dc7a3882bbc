use actix_web::{HttpResponse, Result, ResponseError, web};

use crate::models::*;
use crate::services::RankingService;

#[utoipa::path(
    get,
    path = "/dashboard",
    tag = "dashboard",
    params(
        ("year" = Option<i32>, Query, description = "Defaults to the current year"),
        ("month" = Option<u32>, Query, description = "1-12, defaults to the current month"),
        ("lang" = Option<Language>, Query, description = "de (default) or tr")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Monthly leaderboard and podium", body = RankingResponse),
        (status = 400, description = "Invalid period")
    )
)]
pub async fn get_dashboard(
    ranking_service: web::Data<RankingService>,
    query: web::Query<RankingQuery>,
) -> Result<HttpResponse> {
    let period = query.period()?;

    match ranking_service.monthly_ranking(period, query.lang).await {
        Ok(ranking) => Ok(HttpResponse::Ok().json(ApiResponse::success(ranking))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn dashboard_config(cfg: &mut web::ServiceConfig) {
    cfg.route("/dashboard", web::get().to(get_dashboard));
}
