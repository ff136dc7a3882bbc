use actix_web::web;
use utoipa::OpenApi;
use utoipa::{
    Modify,
    openapi::security::{Http, HttpAuthScheme, SecurityScheme},
};
use utoipa_swagger_ui::SwaggerUi;

use crate::entities::{PeriodType, PrizeCategory, Role};
use crate::handlers;
use crate::models::*;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
            )
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::auth::register,
        handlers::auth::login,
        handlers::auth::refresh,
        handlers::auth::logout,
        handlers::user::me,
        handlers::user::my_stats,
        handlers::dashboard::get_dashboard,
        handlers::reward::get_rewards,
        handlers::reward::draw,
        handlers::admin::list_users,
        handlers::admin::approve_user,
        handlers::admin::delete_user,
        handlers::admin::list_employees,
        handlers::admin::list_sales,
        handlers::admin::create_sale,
        handlers::admin::list_prizes,
        handlers::admin::create_prize,
        handlers::admin::toggle_prize,
        handlers::admin::delete_prize,
        handlers::admin::list_champions,
        handlers::admin::designate_champion,
    ),
    components(
        schemas(
            Role,
            PrizeCategory,
            PeriodType,
            Language,
            ApiError,
            RegisterRequest,
            LoginRequest,
            UserResponse,
            AuthResponse,
            UserListResponse,
            RankingEntry,
            RankingResponse,
            CreateSaleRequest,
            SaleResponse,
            SalePage,
            CreatePrizeRequest,
            PrizeResponse,
            PrizeView,
            PrizeWinResponse,
            RewardOverviewResponse,
            DrawResponse,
            DesignateChampionRequest,
            ChampionResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "Registration and login"),
        (name = "user", description = "Own account and statistics"),
        (name = "dashboard", description = "Monthly sales leaderboard"),
        (name = "rewards", description = "Balloon game for monthly champions"),
        (name = "admin", description = "Back office"),
    ),
    info(
        title = "Sales Podium API",
        version = "1.0.0",
        description = "Sales ranking and champion reward draw"
    ),
    servers(
        (url = "/api/v1", description = "Local server")
    )
)]
pub struct ApiDoc;

pub fn swagger_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    )
    .route(
        "/swagger-ui",
        web::get().to(|| async {
            actix_web::HttpResponse::Found()
                .append_header(("Location", "/swagger-ui/"))
                .finish()
        }),
    );
}
