use actix_cors::Cors;

pub fn create_cors() -> Cors {
    Cors::default()
        // intranet deployment, the dashboard may be served from any host
        .allowed_origin_fn(|_, _req_head| true)
        .allowed_methods(vec!["GET", "POST", "DELETE", "OPTIONS"])
        .allow_any_header()
        .max_age(3600)
}
