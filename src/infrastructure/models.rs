use std::str::FromStr;

use bigdecimal::{BigDecimal, ToPrimitive};
use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::domain::errors::DomainError;
use crate::domain::order::{LegacyPo, NewLegacyPo, NewPricedPo, PoSide, PricedPo};
use crate::schema::{priced_orders, purchase_orders};

// ── Numeric conversions ──────────────────────────────────────────────────────

/// `f64` Display is the shortest round-tripping form, so `246.84` is stored
/// as exactly `246.84`.
pub fn to_decimal(x: f64) -> Result<BigDecimal, DomainError> {
    BigDecimal::from_str(&x.to_string())
        .map_err(|e| DomainError::Internal(format!("cannot store {} as NUMERIC: {}", x, e)))
}

pub fn from_decimal(d: &BigDecimal) -> f64 {
    d.to_f64().unwrap_or(0.0)
}

fn to_optional_decimal(x: Option<f64>) -> Result<Option<BigDecimal>, DomainError> {
    x.map(to_decimal).transpose()
}

// ── priced_orders ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = priced_orders)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct PricedOrderRow {
    pub id: Uuid,
    pub side: String,
    pub po_number: Option<String>,
    pub party_name: Option<String>,
    pub size: String,
    pub quantity: BigDecimal,
    pub rate: BigDecimal,
    pub weight_per_pc: BigDecimal,
    pub total_weight: BigDecimal,
    pub price: BigDecimal,
    pub gst_18: BigDecimal,
    pub total_price: BigDecimal,
    pub status: String,
    pub po_date: Option<NaiveDate>,
    pub extra: Value,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = priced_orders)]
pub struct NewPricedOrderRow {
    pub id: Uuid,
    pub side: String,
    pub po_number: Option<String>,
    pub party_name: Option<String>,
    pub size: String,
    pub quantity: BigDecimal,
    pub rate: BigDecimal,
    pub weight_per_pc: BigDecimal,
    pub total_weight: BigDecimal,
    pub price: BigDecimal,
    pub gst_18: BigDecimal,
    pub total_price: BigDecimal,
    pub status: String,
    pub po_date: Option<NaiveDate>,
    pub extra: Value,
}

impl NewPricedOrderRow {
    pub fn from_domain(id: Uuid, po: NewPricedPo) -> Result<Self, DomainError> {
        Ok(Self {
            id,
            side: po.side.as_str().to_string(),
            po_number: po.po_number,
            party_name: po.party_name,
            size: po.size,
            quantity: to_decimal(po.quantity)?,
            rate: to_decimal(po.rate)?,
            weight_per_pc: to_decimal(po.weight_per_pc)?,
            total_weight: to_decimal(po.total_weight)?,
            price: to_decimal(po.price)?,
            gst_18: to_decimal(po.gst_18)?,
            total_price: to_decimal(po.total_price)?,
            status: po.status,
            po_date: po.date,
            extra: Value::Object(po.extra),
        })
    }
}

impl TryFrom<PricedOrderRow> for PricedPo {
    type Error = DomainError;

    fn try_from(row: PricedOrderRow) -> Result<Self, Self::Error> {
        let side = PoSide::from_str(&row.side).map_err(DomainError::Internal)?;
        let extra = match row.extra {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        Ok(PricedPo {
            id: row.id,
            side,
            po_number: row.po_number,
            party_name: row.party_name,
            size: row.size,
            quantity: from_decimal(&row.quantity),
            rate: from_decimal(&row.rate),
            weight_per_pc: from_decimal(&row.weight_per_pc),
            total_weight: from_decimal(&row.total_weight),
            price: from_decimal(&row.price),
            gst_18: from_decimal(&row.gst_18),
            total_price: from_decimal(&row.total_price),
            status: row.status,
            date: row.po_date,
            extra,
            created_at: row.created_at,
        })
    }
}

// ── purchase_orders ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = purchase_orders)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct LegacyOrderRow {
    pub id: Uuid,
    pub po_number: Option<String>,
    pub customer_name: Option<String>,
    pub material: Option<String>,
    pub quantity: Option<BigDecimal>,
    pub pending_qty: Option<BigDecimal>,
    pub po_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = purchase_orders)]
pub struct NewLegacyOrderRow {
    pub id: Uuid,
    pub po_number: Option<String>,
    pub customer_name: Option<String>,
    pub material: Option<String>,
    pub quantity: Option<BigDecimal>,
    pub pending_qty: Option<BigDecimal>,
    pub po_date: Option<NaiveDate>,
}

impl NewLegacyOrderRow {
    pub fn from_domain(id: Uuid, po: NewLegacyPo) -> Result<Self, DomainError> {
        Ok(Self {
            id,
            po_number: po.po_number,
            customer_name: po.customer_name,
            material: po.material,
            quantity: to_optional_decimal(po.quantity)?,
            pending_qty: to_optional_decimal(po.pending_qty)?,
            po_date: po.date,
        })
    }
}

impl From<LegacyOrderRow> for LegacyPo {
    fn from(row: LegacyOrderRow) -> Self {
        LegacyPo {
            id: row.id,
            po_number: row.po_number,
            customer_name: row.customer_name,
            material: row.material,
            quantity: row.quantity.as_ref().map(from_decimal),
            pending_qty: row.pending_qty.as_ref().map(from_decimal),
            date: row.po_date,
            created_at: row.created_at,
        }
    }
}
