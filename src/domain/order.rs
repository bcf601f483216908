use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde_json::{json, Map, Value};
use uuid::Uuid;

use super::errors::ValidationError;
use super::pricing::{coerce_number, required_size};

pub const DEFAULT_STATUS: &str = "Pending";

/// Which party a purchase order was raised with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PoSide {
    /// Sales order placed by a customer.
    Customer,
    /// Procurement order placed with a supplier.
    Supplier,
}

impl PoSide {
    pub fn as_str(&self) -> &'static str {
        match self {
            PoSide::Customer => "customer",
            PoSide::Supplier => "supplier",
        }
    }

    /// JSON key holding the counterparty's name.
    pub fn party_key(&self) -> &'static str {
        match self {
            PoSide::Customer => "customer_name",
            PoSide::Supplier => "supplier_name",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PoSide::Customer => "Customer",
            PoSide::Supplier => "Supplier",
        }
    }
}

impl fmt::Display for PoSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PoSide {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "customer" => Ok(PoSide::Customer),
            "supplier" => Ok(PoSide::Supplier),
            other => Err(format!("unknown purchase order side '{}'", other)),
        }
    }
}

/// Accepts `YYYY-MM-DD` or a full RFC 3339 timestamp.
pub fn parse_po_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
}

/// Remove `key` from `map` when it holds text (or a number, kept as text).
/// Other shapes stay in the map and travel with the pass-through fields.
fn take_text(map: &mut Map<String, Value>, key: &str) -> Option<String> {
    let text = match map.get(key)? {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    map.remove(key);
    Some(text)
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewPricedPo {
    pub side: PoSide,
    pub po_number: Option<String>,
    pub party_name: Option<String>,
    pub size: String,
    pub quantity: f64,
    pub rate: f64,
    pub weight_per_pc: f64,
    pub total_weight: f64,
    pub price: f64,
    pub gst_18: f64,
    pub total_price: f64,
    pub status: String,
    pub date: Option<NaiveDate>,
    /// Caller-supplied fields with no dedicated column.
    pub extra: Map<String, Value>,
}

impl NewPricedPo {
    /// Split a calculator result into typed columns and pass-through fields.
    pub fn from_priced(side: PoSide, mut priced: Map<String, Value>) -> Result<Self, ValidationError> {
        let size = required_size(&priced)?.to_string();
        priced.remove("size");

        let mut number = |key: &str| coerce_number(priced.remove(key).as_ref());
        let quantity = number("quantity");
        let rate = number("rate");
        let weight_per_pc = number("weight_per_pc");
        let total_weight = number("total_weight");
        let price = number("price");
        let gst_18 = number("gst_18");
        let total_price = number("total_price");

        let po_number = take_text(&mut priced, "po_number");
        let party_name = take_text(&mut priced, side.party_key());
        let status = take_text(&mut priced, "status").unwrap_or_else(|| DEFAULT_STATUS.to_string());

        let date = match priced.get("date") {
            Some(Value::String(raw)) => parse_po_date(raw),
            _ => None,
        };
        if date.is_some() {
            priced.remove("date");
        }

        Ok(Self {
            side,
            po_number,
            party_name,
            size,
            quantity,
            rate,
            weight_per_pc,
            total_weight,
            price,
            gst_18,
            total_price,
            status,
            date,
            extra: priced,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PricedPo {
    pub id: Uuid,
    pub side: PoSide,
    pub po_number: Option<String>,
    pub party_name: Option<String>,
    pub size: String,
    pub quantity: f64,
    pub rate: f64,
    pub weight_per_pc: f64,
    pub total_weight: f64,
    pub price: f64,
    pub gst_18: f64,
    pub total_price: f64,
    pub status: String,
    pub date: Option<NaiveDate>,
    pub extra: Map<String, Value>,
    pub created_at: DateTime<Utc>,
}

impl PricedPo {
    pub fn from_new(id: Uuid, created_at: DateTime<Utc>, new: NewPricedPo) -> Self {
        Self {
            id,
            side: new.side,
            po_number: new.po_number,
            party_name: new.party_name,
            size: new.size,
            quantity: new.quantity,
            rate: new.rate,
            weight_per_pc: new.weight_per_pc,
            total_weight: new.total_weight,
            price: new.price,
            gst_18: new.gst_18,
            total_price: new.total_price,
            status: new.status,
            date: new.date,
            extra: new.extra,
            created_at,
        }
    }

    /// Flatten back into one JSON object using the caller's key names.
    pub fn to_json(&self) -> Value {
        let mut out = self.extra.clone();
        out.insert("id".to_string(), json!(self.id));
        out.insert("po_number".to_string(), json!(self.po_number));
        out.insert(self.side.party_key().to_string(), json!(self.party_name));
        out.insert("size".to_string(), json!(self.size));
        out.insert("quantity".to_string(), json!(self.quantity));
        out.insert("rate".to_string(), json!(self.rate));
        out.insert("weight_per_pc".to_string(), json!(self.weight_per_pc));
        out.insert("total_weight".to_string(), json!(self.total_weight));
        out.insert("price".to_string(), json!(self.price));
        out.insert("gst_18".to_string(), json!(self.gst_18));
        out.insert("total_price".to_string(), json!(self.total_price));
        out.insert("status".to_string(), json!(self.status));
        if let Some(date) = self.date {
            out.insert("date".to_string(), json!(date.format("%Y-%m-%d").to_string()));
        }
        out.insert("created_at".to_string(), json!(self.created_at.to_rfc3339()));
        Value::Object(out)
    }
}

/// Columns read by the sales reports.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRow {
    pub size: String,
    pub date: Option<NaiveDate>,
    pub total_weight: f64,
    pub total_price: f64,
}

#[derive(Debug, Clone)]
pub struct ListResult {
    pub items: Vec<PricedPo>,
    pub total: i64,
}

/// Unpriced order captured by the older `/po` form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewLegacyPo {
    pub po_number: Option<String>,
    pub customer_name: Option<String>,
    pub material: Option<String>,
    pub quantity: Option<f64>,
    pub pending_qty: Option<f64>,
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LegacyPo {
    pub id: Uuid,
    pub po_number: Option<String>,
    pub customer_name: Option<String>,
    pub material: Option<String>,
    pub quantity: Option<f64>,
    pub pending_qty: Option<f64>,
    pub date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

impl LegacyPo {
    pub fn from_new(id: Uuid, created_at: DateTime<Utc>, new: NewLegacyPo) -> Self {
        Self {
            id,
            po_number: new.po_number,
            customer_name: new.customer_name,
            material: new.material,
            quantity: new.quantity,
            pending_qty: new.pending_qty,
            date: new.date,
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::pricing::calculate_po;

    fn priced(value: Value) -> Map<String, Value> {
        let Value::Object(map) = value else {
            panic!("expected an object");
        };
        calculate_po(map).expect("priceable order")
    }

    #[test]
    fn from_priced_splits_columns_and_extras() {
        let new = NewPricedPo::from_priced(
            PoSide::Customer,
            priced(json!({
                "size": "400x400x12mm",
                "quantity": 5,
                "rate": 200,
                "po_number": "PO-1",
                "customer_name": "Acme",
                "date": "2025-10-03",
                "remarks": "urgent"
            })),
        )
        .unwrap();

        assert_eq!(new.po_number.as_deref(), Some("PO-1"));
        assert_eq!(new.party_name.as_deref(), Some("Acme"));
        assert_eq!(new.status, DEFAULT_STATUS);
        assert_eq!(new.date, NaiveDate::from_ymd_opt(2025, 10, 3));
        assert_eq!(new.total_price, 1180.0);
        assert_eq!(new.extra.len(), 1);
        assert_eq!(new.extra["remarks"], "urgent");
    }

    #[test]
    fn supplier_side_reads_supplier_name() {
        let new = NewPricedPo::from_priced(
            PoSide::Supplier,
            priced(json!({
                "size": "219ODx6",
                "supplier_name": "Tata",
                "customer_name": "ignored here",
                "status": "Delivered"
            })),
        )
        .unwrap();

        assert_eq!(new.party_name.as_deref(), Some("Tata"));
        assert_eq!(new.status, "Delivered");
        assert_eq!(new.extra["customer_name"], "ignored here");
    }

    #[test]
    fn unparseable_date_stays_in_extras() {
        let new = NewPricedPo::from_priced(
            PoSide::Customer,
            priced(json!({ "size": "40x40x2", "date": "next tuesday" })),
        )
        .unwrap();

        assert_eq!(new.date, None);
        assert_eq!(new.extra["date"], "next tuesday");
    }

    #[test]
    fn to_json_restores_caller_keys() {
        let new = NewPricedPo::from_priced(
            PoSide::Supplier,
            priced(json!({
                "size": "40x40x2",
                "supplier_name": "Jindal",
                "date": "2025-01-31T10:00:00Z",
                "truck": "MH-12"
            })),
        )
        .unwrap();
        let po = PricedPo::from_new(Uuid::new_v4(), Utc::now(), new);
        let out = po.to_json();

        assert_eq!(out["supplier_name"], "Jindal");
        assert_eq!(out["date"], "2025-01-31");
        assert_eq!(out["truck"], "MH-12");
        assert_eq!(out["status"], "Pending");
        assert_eq!(out["id"], json!(po.id));
    }

    #[test]
    fn side_round_trips_through_text() {
        for side in [PoSide::Customer, PoSide::Supplier] {
            assert_eq!(side.as_str().parse::<PoSide>(), Ok(side));
        }
        assert!("vendor".parse::<PoSide>().is_err());
    }
}
