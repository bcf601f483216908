use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::application::po_service::PoService;
use crate::domain::order::PoSide;
use crate::errors::AppError;

// ── Request / response DTOs ──────────────────────────────────────────────────

/// Documented shape of a PO submission. Handlers accept any JSON object:
/// fields not listed here are stored and returned untouched.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreatePoRequest {
    /// Shape descriptor, e.g. "373ODx4.5mm" or "600x300x12mm".
    pub size: String,
    /// Piece count. Non-numeric values count as 0.
    pub quantity: Option<f64>,
    /// Price per piece. Non-numeric values count as 0.
    pub rate: Option<f64>,
    pub po_number: Option<String>,
    /// Used on customer POs.
    pub customer_name: Option<String>,
    /// Used on supplier POs.
    pub supplier_name: Option<String>,
    /// Order date, "YYYY-MM-DD".
    pub date: Option<String>,
    /// Defaults to "Pending".
    pub status: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PoCreatedResponse {
    pub success: bool,
    pub message: String,
    #[schema(value_type = Vec<Object>)]
    pub data: Vec<Value>,
}

// ── Pagination ───────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListPosParams {
    /// Page number (1-based). Defaults to 1.
    #[serde(default = "default_page")]
    pub page: i64,
    /// Number of items per page. Defaults to 20, maximum 100.
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_page() -> i64 {
    1
}

fn default_limit() -> i64 {
    20
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ListPosResponse {
    #[schema(value_type = Vec<Object>)]
    pub items: Vec<Value>,
    pub total: i64,
    pub page: i64,
    pub limit: i64,
}

// ── Shared implementations ───────────────────────────────────────────────────

async fn create_po(
    side: PoSide,
    service: web::Data<PoService>,
    body: web::Json<Map<String, Value>>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();

    let po = web::block(move || service.create_po(side, body)).await??;

    Ok(HttpResponse::Ok().json(PoCreatedResponse {
        success: true,
        message: format!("{} PO added successfully", side.label()),
        data: vec![po.to_json()],
    }))
}

async fn get_po(
    side: PoSide,
    service: web::Data<PoService>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();

    let po = web::block(move || service.get_po(side, id)).await??;

    Ok(HttpResponse::Ok().json(po.to_json()))
}

async fn list_pos(
    side: PoSide,
    service: web::Data<PoService>,
    query: web::Query<ListPosParams>,
) -> Result<HttpResponse, AppError> {
    let params = query.into_inner();
    let page = params.page.max(1);
    let limit = params.limit.clamp(1, 100);

    let result = web::block(move || service.list_pos(side, page, limit)).await??;

    Ok(HttpResponse::Ok().json(ListPosResponse {
        items: result.items.iter().map(|po| po.to_json()).collect(),
        total: result.total,
        page,
        limit,
    }))
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// POST /api/customer-po
///
/// Computes weight per piece, total weight, price, GST and total price from
/// the submitted size, quantity and rate, then stores the order.
#[utoipa::path(
    post,
    path = "/api/customer-po",
    request_body = CreatePoRequest,
    responses(
        (status = 200, description = "Customer PO added", body = PoCreatedResponse),
        (status = 400, description = "Size missing"),
        (status = 500, description = "Store failure"),
    ),
    tag = "purchase-orders"
)]
pub async fn create_customer_po(
    service: web::Data<PoService>,
    body: web::Json<Map<String, Value>>,
) -> Result<HttpResponse, AppError> {
    create_po(PoSide::Customer, service, body).await
}

/// POST /api/supplier-po
#[utoipa::path(
    post,
    path = "/api/supplier-po",
    request_body = CreatePoRequest,
    responses(
        (status = 200, description = "Supplier PO added", body = PoCreatedResponse),
        (status = 400, description = "Size missing"),
        (status = 500, description = "Store failure"),
    ),
    tag = "purchase-orders"
)]
pub async fn create_supplier_po(
    service: web::Data<PoService>,
    body: web::Json<Map<String, Value>>,
) -> Result<HttpResponse, AppError> {
    create_po(PoSide::Supplier, service, body).await
}

/// GET /api/customer-po/{id}
#[utoipa::path(
    get,
    path = "/api/customer-po/{id}",
    params(
        ("id" = Uuid, Path, description = "PO UUID"),
    ),
    responses(
        (status = 200, description = "PO found"),
        (status = 404, description = "PO not found"),
        (status = 500, description = "Store failure"),
    ),
    tag = "purchase-orders"
)]
pub async fn get_customer_po(
    service: web::Data<PoService>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    get_po(PoSide::Customer, service, path).await
}

/// GET /api/supplier-po/{id}
#[utoipa::path(
    get,
    path = "/api/supplier-po/{id}",
    params(
        ("id" = Uuid, Path, description = "PO UUID"),
    ),
    responses(
        (status = 200, description = "PO found"),
        (status = 404, description = "PO not found"),
        (status = 500, description = "Store failure"),
    ),
    tag = "purchase-orders"
)]
pub async fn get_supplier_po(
    service: web::Data<PoService>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    get_po(PoSide::Supplier, service, path).await
}

/// GET /api/customer-po
///
/// Newest first. Use `page` (1-based) and `limit` to control pagination.
#[utoipa::path(
    get,
    path = "/api/customer-po",
    params(ListPosParams),
    responses(
        (status = 200, description = "Paginated customer POs", body = ListPosResponse),
        (status = 500, description = "Store failure"),
    ),
    tag = "purchase-orders"
)]
pub async fn list_customer_pos(
    service: web::Data<PoService>,
    query: web::Query<ListPosParams>,
) -> Result<HttpResponse, AppError> {
    list_pos(PoSide::Customer, service, query).await
}

/// GET /api/supplier-po
#[utoipa::path(
    get,
    path = "/api/supplier-po",
    params(ListPosParams),
    responses(
        (status = 200, description = "Paginated supplier POs", body = ListPosResponse),
        (status = 500, description = "Store failure"),
    ),
    tag = "purchase-orders"
)]
pub async fn list_supplier_pos(
    service: web::Data<PoService>,
    query: web::Query<ListPosParams>,
) -> Result<HttpResponse, AppError> {
    list_pos(PoSide::Supplier, service, query).await
}
