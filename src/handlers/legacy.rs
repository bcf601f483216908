//! The older single-table `/po` endpoints, kept for existing clients.

use actix_web::{web, HttpResponse};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::po_service::PoService;
use crate::domain::order::{parse_po_date, LegacyPo, NewLegacyPo};
use crate::errors::LegacyError;

/// Older forms post numbers as text, so quantities and the date are read
/// loosely and checked in [`NewLegacyPo::try_from`].
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateLegacyPoRequest {
    pub po_number: Option<String>,
    pub customer_name: Option<String>,
    pub material: Option<String>,
    /// Number or numeric text.
    #[schema(value_type = Option<f64>)]
    pub quantity: Option<Value>,
    #[schema(value_type = Option<f64>)]
    pub pending_qty: Option<Value>,
    /// "YYYY-MM-DD" or an RFC 3339 timestamp.
    #[schema(value_type = Option<String>)]
    pub date: Option<Value>,
}

fn numeric_field(field: &str, value: Option<Value>) -> Result<Option<f64>, LegacyError> {
    let parsed = match &value {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        Some(_) => None,
    };
    match parsed.filter(|x| x.is_finite()) {
        Some(x) => Ok(Some(x)),
        None => Err(LegacyError::Store(format!(
            "invalid input for {}: {}",
            field,
            value.unwrap_or(Value::Null)
        ))),
    }
}

fn date_field(value: Option<Value>) -> Result<Option<NaiveDate>, LegacyError> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(raw)) => parse_po_date(&raw)
            .map(Some)
            .ok_or_else(|| LegacyError::Store(format!("invalid input for date: {:?}", raw))),
        Some(other) => Err(LegacyError::Store(format!("invalid input for date: {}", other))),
    }
}

impl TryFrom<CreateLegacyPoRequest> for NewLegacyPo {
    type Error = LegacyError;

    fn try_from(req: CreateLegacyPoRequest) -> Result<Self, Self::Error> {
        Ok(NewLegacyPo {
            po_number: req.po_number,
            customer_name: req.customer_name,
            material: req.material,
            quantity: numeric_field("quantity", req.quantity)?,
            pending_qty: numeric_field("pending_qty", req.pending_qty)?,
            date: date_field(req.date)?,
        })
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LegacyPoResponse {
    pub id: Uuid,
    pub po_number: Option<String>,
    pub customer_name: Option<String>,
    pub material: Option<String>,
    pub quantity: Option<f64>,
    pub pending_qty: Option<f64>,
    pub date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

impl From<LegacyPo> for LegacyPoResponse {
    fn from(po: LegacyPo) -> Self {
        LegacyPoResponse {
            id: po.id,
            po_number: po.po_number,
            customer_name: po.customer_name,
            material: po.material,
            quantity: po.quantity,
            pending_qty: po.pending_qty,
            date: po.date,
            created_at: po.created_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LegacyPoCreatedResponse {
    pub message: String,
    pub data: Vec<LegacyPoResponse>,
}

/// POST /po
#[utoipa::path(
    post,
    path = "/po",
    request_body = CreateLegacyPoRequest,
    responses(
        (status = 200, description = "PO added", body = LegacyPoCreatedResponse),
        (status = 400, description = "Store rejected the PO"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "legacy"
)]
pub async fn create_po(
    service: web::Data<PoService>,
    body: web::Json<CreateLegacyPoRequest>,
) -> Result<HttpResponse, LegacyError> {
    let po = NewLegacyPo::try_from(body.into_inner())?;

    let stored = web::block(move || service.create_legacy_po(po)).await??;

    Ok(HttpResponse::Ok().json(LegacyPoCreatedResponse {
        message: "PO added successfully".to_string(),
        data: vec![stored.into()],
    }))
}

/// GET /po
#[utoipa::path(
    get,
    path = "/po",
    responses(
        (status = 200, description = "All POs", body = Vec<LegacyPoResponse>),
        (status = 400, description = "Store rejected the query"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "legacy"
)]
pub async fn list_pos(service: web::Data<PoService>) -> Result<HttpResponse, LegacyError> {
    let rows = web::block(move || service.list_legacy_pos()).await??;

    let body: Vec<LegacyPoResponse> = rows.into_iter().map(LegacyPoResponse::from).collect();
    Ok(HttpResponse::Ok().json(body))
}
