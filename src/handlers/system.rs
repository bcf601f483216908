use actix_web::HttpResponse;
use serde::Serialize;
use utoipa::ToSchema;

pub const BANNER: &str = "Shiv Shakti Steel Tubes Backend is running!";

#[derive(Debug, Serialize, ToSchema)]
pub struct PingResponse {
    pub message: String,
}

/// GET /
pub async fn index() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body(BANNER)
}

/// GET /api/ping
#[utoipa::path(
    get,
    path = "/api/ping",
    responses(
        (status = 200, description = "Server is up", body = PingResponse),
    ),
    tag = "system"
)]
pub async fn ping() -> HttpResponse {
    HttpResponse::Ok().json(PingResponse {
        message: "Server is live!".to_string(),
    })
}
