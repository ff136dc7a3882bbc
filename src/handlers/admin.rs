use actix_web::{HttpRequest, HttpResponse, Result, ResponseError, web};

use super::current_user_id;
use crate::models::*;
use crate::services::{PrizeService, RewardService, SalesService, UserService};

#[utoipa::path(
    get,
    path = "/admin/users",
    tag = "admin",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Pending and approved accounts", body = UserListResponse),
        (status = 403, description = "Not an admin")
    )
)]
pub async fn list_users(
    user_service: web::Data<UserService>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    let actor_id = current_user_id(&req)?;

    match user_service.list_users(actor_id).await {
        Ok(list) => Ok(HttpResponse::Ok().json(ApiResponse::success(list))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/admin/users/{id}/approve",
    tag = "admin",
    params(
        ("id" = i64, Path, description = "User id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Account approved", body = UserResponse),
        (status = 403, description = "Not an admin"),
        (status = 404, description = "Unknown user")
    )
)]
pub async fn approve_user(
    user_service: web::Data<UserService>,
    req: HttpRequest,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    let actor_id = current_user_id(&req)?;

    match user_service.approve_user(actor_id, path.into_inner()).await {
        Ok(user) => Ok(HttpResponse::Ok().json(ApiResponse::success(user))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/admin/users/{id}",
    tag = "admin",
    params(
        ("id" = i64, Path, description = "User id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Account and its records deleted"),
        (status = 403, description = "Not an admin, or target is an admin"),
        (status = 404, description = "Unknown user")
    )
)]
pub async fn delete_user(
    user_service: web::Data<UserService>,
    req: HttpRequest,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    let actor_id = current_user_id(&req)?;

    match user_service.delete_user(actor_id, path.into_inner()).await {
        Ok(()) => Ok(HttpResponse::Ok().json(ApiResponse::<()>::message("User deleted"))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/admin/employees",
    tag = "admin",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Approved staff", body = [UserResponse]),
        (status = 403, description = "Not an admin")
    )
)]
pub async fn list_employees(
    user_service: web::Data<UserService>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    let actor_id = current_user_id(&req)?;

    match user_service.list_ranked_users(actor_id).await {
        Ok(list) => Ok(HttpResponse::Ok().json(ApiResponse::success(list))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/admin/sales",
    tag = "admin",
    params(
        ("page" = Option<u32>, Query, description = "Page, starting at 1"),
        ("per_page" = Option<u32>, Query, description = "Page size, default 50")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Sales, newest first", body = SalePage),
        (status = 403, description = "Not an admin")
    )
)]
pub async fn list_sales(
    sales_service: web::Data<SalesService>,
    req: HttpRequest,
    query: web::Query<SaleQuery>,
) -> Result<HttpResponse> {
    let actor_id = current_user_id(&req)?;

    match sales_service.list_sales(actor_id, query.into_inner()).await {
        Ok(page) => Ok(HttpResponse::Ok().json(ApiResponse::success(page))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/admin/sales",
    tag = "admin",
    request_body = CreateSaleRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Sale recorded", body = SaleResponse),
        (status = 400, description = "Invalid input"),
        (status = 403, description = "Not an admin"),
        (status = 404, description = "Unknown employee")
    )
)]
pub async fn create_sale(
    sales_service: web::Data<SalesService>,
    req: HttpRequest,
    request: web::Json<CreateSaleRequest>,
) -> Result<HttpResponse> {
    let actor_id = current_user_id(&req)?;

    match sales_service.record_sale(actor_id, request.into_inner()).await {
        Ok(sale) => Ok(HttpResponse::Ok().json(ApiResponse::success(sale))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/admin/prizes",
    tag = "admin",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "All prizes", body = [PrizeResponse]),
        (status = 403, description = "Not an admin")
    )
)]
pub async fn list_prizes(
    prize_service: web::Data<PrizeService>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    let actor_id = current_user_id(&req)?;

    match prize_service.list_prizes(actor_id).await {
        Ok(list) => Ok(HttpResponse::Ok().json(ApiResponse::success(list))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/admin/prizes",
    tag = "admin",
    request_body = CreatePrizeRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Prize created", body = PrizeResponse),
        (status = 400, description = "Invalid input"),
        (status = 403, description = "Not an admin")
    )
)]
pub async fn create_prize(
    prize_service: web::Data<PrizeService>,
    req: HttpRequest,
    request: web::Json<CreatePrizeRequest>,
) -> Result<HttpResponse> {
    let actor_id = current_user_id(&req)?;

    match prize_service.create_prize(actor_id, request.into_inner()).await {
        Ok(prize) => Ok(HttpResponse::Ok().json(ApiResponse::success(prize))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/admin/prizes/{id}/toggle",
    tag = "admin",
    params(
        ("id" = i64, Path, description = "Prize id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Active flag flipped", body = PrizeResponse),
        (status = 403, description = "Not an admin"),
        (status = 404, description = "Unknown prize")
    )
)]
pub async fn toggle_prize(
    prize_service: web::Data<PrizeService>,
    req: HttpRequest,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    let actor_id = current_user_id(&req)?;

    match prize_service.toggle_prize(actor_id, path.into_inner()).await {
        Ok(prize) => Ok(HttpResponse::Ok().json(ApiResponse::success(prize))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/admin/prizes/{id}",
    tag = "admin",
    params(
        ("id" = i64, Path, description = "Prize id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Prize deleted"),
        (status = 403, description = "Not an admin"),
        (status = 404, description = "Unknown prize")
    )
)]
pub async fn delete_prize(
    prize_service: web::Data<PrizeService>,
    req: HttpRequest,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    let actor_id = current_user_id(&req)?;

    match prize_service.delete_prize(actor_id, path.into_inner()).await {
        Ok(()) => Ok(HttpResponse::Ok().json(ApiResponse::<()>::message("Prize deleted"))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/admin/champions",
    tag = "admin",
    params(
        ("year" = Option<i32>, Query, description = "Together with month"),
        ("month" = Option<u32>, Query, description = "Together with year")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Champion grants", body = [ChampionResponse]),
        (status = 400, description = "Invalid period"),
        (status = 403, description = "Not an admin")
    )
)]
pub async fn list_champions(
    reward_service: web::Data<RewardService>,
    req: HttpRequest,
    query: web::Query<ChampionQuery>,
) -> Result<HttpResponse> {
    let actor_id = current_user_id(&req)?;
    let period = query.period()?;

    match reward_service.list_champions(actor_id, period).await {
        Ok(list) => Ok(HttpResponse::Ok().json(ApiResponse::success(list))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/admin/champions",
    tag = "admin",
    request_body = DesignateChampionRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Grant created", body = ChampionResponse),
        (status = 400, description = "Invalid period"),
        (status = 403, description = "Not an admin"),
        (status = 404, description = "Unknown user"),
        (status = 409, description = "Grant already exists for this month")
    )
)]
pub async fn designate_champion(
    reward_service: web::Data<RewardService>,
    req: HttpRequest,
    request: web::Json<DesignateChampionRequest>,
) -> Result<HttpResponse> {
    let actor_id = current_user_id(&req)?;

    match reward_service
        .designate_champion(actor_id, request.into_inner())
        .await
    {
        Ok(grant) => Ok(HttpResponse::Ok().json(ApiResponse::success(grant))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn admin_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/admin")
            .route("/users", web::get().to(list_users))
            .route("/users/{id}/approve", web::post().to(approve_user))
            .route("/users/{id}", web::delete().to(delete_user))
            .route("/employees", web::get().to(list_employees))
            .route("/sales", web::get().to(list_sales))
            .route("/sales", web::post().to(create_sale))
            .route("/prizes", web::get().to(list_prizes))
            .route("/prizes", web::post().to(create_prize))
            .route("/prizes/{id}/toggle", web::post().to(toggle_prize))
            .route("/prizes/{id}", web::delete().to(delete_prize))
            .route("/champions", web::get().to(list_champions))
            .route("/champions", web::post().to(designate_champion)),
    );
}
