use actix_web::{web, HttpResponse};
use serde::Serialize;
use serde_json::Value;
use utoipa::ToSchema;

use crate::application::po_service::PoService;
use crate::errors::AppError;

#[derive(Debug, Serialize, ToSchema)]
pub struct MaterialTotalResponse {
    pub size: String,
    pub total_weight: f64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TopMaterialsResponse {
    pub success: bool,
    pub top_materials: Vec<MaterialTotalResponse>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MonthlyTotalResponse {
    /// e.g. "Oct 2025"
    pub month: String,
    pub total: f64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MonthlySalesResponse {
    pub success: bool,
    pub monthly_sales: Vec<MonthlyTotalResponse>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PendingPosResponse {
    pub success: bool,
    #[schema(value_type = Vec<Object>)]
    pub pending_customers: Vec<Value>,
    #[schema(value_type = Vec<Object>)]
    pub pending_suppliers: Vec<Value>,
}

/// GET /api/reports/top-materials
///
/// Customer order weight per size, heaviest first.
#[utoipa::path(
    get,
    path = "/api/reports/top-materials",
    responses(
        (status = 200, description = "Sizes ranked by total weight", body = TopMaterialsResponse),
        (status = 500, description = "Store failure"),
    ),
    tag = "reports"
)]
pub async fn top_materials(service: web::Data<PoService>) -> Result<HttpResponse, AppError> {
    let totals = web::block(move || service.top_materials()).await??;

    Ok(HttpResponse::Ok().json(TopMaterialsResponse {
        success: true,
        top_materials: totals
            .into_iter()
            .map(|t| MaterialTotalResponse {
                size: t.size,
                total_weight: t.total_weight,
            })
            .collect(),
    }))
}

/// GET /api/reports/monthly-sales
#[utoipa::path(
    get,
    path = "/api/reports/monthly-sales",
    responses(
        (status = 200, description = "Customer sales per month", body = MonthlySalesResponse),
        (status = 500, description = "Store failure"),
    ),
    tag = "reports"
)]
pub async fn monthly_sales(service: web::Data<PoService>) -> Result<HttpResponse, AppError> {
    let totals = web::block(move || service.monthly_sales()).await??;

    Ok(HttpResponse::Ok().json(MonthlySalesResponse {
        success: true,
        monthly_sales: totals
            .into_iter()
            .map(|t| MonthlyTotalResponse {
                month: t.month,
                total: t.total,
            })
            .collect(),
    }))
}

/// GET /api/reports/pending-pos
#[utoipa::path(
    get,
    path = "/api/reports/pending-pos",
    responses(
        (status = 200, description = "Customer and supplier POs still pending", body = PendingPosResponse),
        (status = 500, description = "Store failure"),
    ),
    tag = "reports"
)]
pub async fn pending_pos(service: web::Data<PoService>) -> Result<HttpResponse, AppError> {
    let pending = web::block(move || service.pending_pos()).await??;

    Ok(HttpResponse::Ok().json(PendingPosResponse {
        success: true,
        pending_customers: pending.customers.iter().map(|po| po.to_json()).collect(),
        pending_suppliers: pending.suppliers.iter().map(|po| po.to_json()).collect(),
    }))
}
