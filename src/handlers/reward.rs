use actix_web::{HttpRequest, HttpResponse, Result, ResponseError, web};

use super::current_user_id;
use crate::models::*;
use crate::services::RewardService;

#[utoipa::path(
    get,
    path = "/rewards",
    tag = "rewards",
    params(
        ("lang" = Option<Language>, Query, description = "de (default) or tr")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Eligibility, active prizes and own wins", body = RewardOverviewResponse),
        (status = 401, description = "Not logged in")
    )
)]
pub async fn get_rewards(
    reward_service: web::Data<RewardService>,
    req: HttpRequest,
    query: web::Query<LangQuery>,
) -> Result<HttpResponse> {
    let user_id = current_user_id(&req)?;

    match reward_service.overview(user_id, query.lang).await {
        Ok(overview) => Ok(HttpResponse::Ok().json(ApiResponse::success(overview))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/rewards/draw",
    tag = "rewards",
    params(
        ("lang" = Option<Language>, Query, description = "de (default) or tr")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Prize won", body = DrawResponse),
        (status = 403, description = "No unused champion grant"),
        (status = 409, description = "No active prizes")
    )
)]
pub async fn draw(
    reward_service: web::Data<RewardService>,
    req: HttpRequest,
    query: web::Query<LangQuery>,
) -> Result<HttpResponse> {
    let user_id = current_user_id(&req)?;

    match reward_service.draw(user_id, query.lang).await {
        Ok(result) => Ok(HttpResponse::Ok().json(ApiResponse::success(result))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn reward_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/rewards")
            .route("", web::get().to(get_rewards))
            .route("/draw", web::post().to(draw)),
    );
}
