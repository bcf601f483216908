//! Weight and price calculation for steel tube purchase orders.
//!
//! Pricing happens in two steps: the `size` descriptor is parsed into a
//! [`ShapeKind`], then the shape's per-piece weight is combined with the
//! coerced `quantity` and `rate` to produce the derived fields. Every derived
//! value is rounded to two decimals.

use std::sync::OnceLock;

use regex::Regex;
use serde_json::{json, Map, Value};

use super::errors::ValidationError;

/// GST rate applied to every order.
pub const GST_RATE: f64 = 0.18;

/// Divisor for round tubes: `od * thickness / 6.8`.
const ROUND_WEIGHT_DIVISOR: f64 = 6.8;

/// Divisor for square and rectangular tubes: `(l + b) * thickness / 10.8`.
const RECT_WEIGHT_DIVISOR: f64 = 10.8;

const ROUND_PATTERN: &str = r"(?i)(\d+(?:\.\d+)?)odx(\d+(?:\.\d+)?)";
const RECT_PATTERN: &str = r"(?i)(\d+(?:\.\d+)?)x(\d+(?:\.\d+)?)x(\d+(?:\.\d+)?)";

fn round_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(ROUND_PATTERN).expect("round size pattern is valid"))
}

fn rect_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(RECT_PATTERN).expect("rect size pattern is valid"))
}

/// Cross-section inferred from a size descriptor such as `373ODx4.5mm` or
/// `600x300x12mm`. Dimensions are in millimetres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShapeKind {
    Round { outer_diameter: f64, thickness: f64 },
    Rect { length: f64, breadth: f64, thickness: f64 },
    /// The descriptor matched neither pattern.
    Unknown,
}

impl ShapeKind {
    /// Parse a size descriptor. Anything containing `od` (any case) is
    /// treated as a round tube; everything else as square/rectangular.
    pub fn parse(size: &str) -> Self {
        if size.to_lowercase().contains("od") {
            round_regex()
                .captures(size)
                .and_then(|caps| {
                    Some(ShapeKind::Round {
                        outer_diameter: caps.get(1)?.as_str().parse().ok()?,
                        thickness: caps.get(2)?.as_str().parse().ok()?,
                    })
                })
                .unwrap_or(ShapeKind::Unknown)
        } else {
            rect_regex()
                .captures(size)
                .and_then(|caps| {
                    Some(ShapeKind::Rect {
                        length: caps.get(1)?.as_str().parse().ok()?,
                        breadth: caps.get(2)?.as_str().parse().ok()?,
                        thickness: caps.get(3)?.as_str().parse().ok()?,
                    })
                })
                .unwrap_or(ShapeKind::Unknown)
        }
    }

    /// Unrounded weight of a single piece. `Unknown` weighs nothing.
    pub fn weight_per_piece(&self) -> f64 {
        match *self {
            ShapeKind::Round {
                outer_diameter,
                thickness,
            } => outer_diameter * thickness / ROUND_WEIGHT_DIVISOR,
            ShapeKind::Rect {
                length,
                breadth,
                thickness,
            } => (length + breadth) * thickness / RECT_WEIGHT_DIVISOR,
            ShapeKind::Unknown => 0.0,
        }
    }
}

/// Coerce a loosely typed JSON value to a number.
///
/// Numbers pass through, strings are trimmed and parsed, booleans become
/// `1`/`0`. Missing values, `null`, unparseable strings, arrays, objects and
/// non-finite results all default to `0`.
pub fn coerce_number(value: Option<&Value>) -> f64 {
    let n = match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => {
            let s = s.trim();
            if s.is_empty() {
                0.0
            } else {
                s.parse::<f64>().unwrap_or(0.0)
            }
        }
        Some(Value::Bool(true)) => 1.0,
        _ => 0.0,
    };
    if n.is_finite() {
        n
    } else {
        0.0
    }
}

/// Round half away from zero to two decimal places.
pub fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// The five fields derived for every purchase order line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricedLine {
    pub weight_per_pc: f64,
    pub total_weight: f64,
    pub price: f64,
    pub gst_18: f64,
    pub total_price: f64,
}

impl PricedLine {
    pub fn compute(shape: ShapeKind, quantity: f64, rate: f64) -> Self {
        let weight_per_pc = shape.weight_per_piece();
        let price = quantity * rate;
        let gst_18 = price * GST_RATE;
        let total_price = price + gst_18;

        Self {
            weight_per_pc: round2(weight_per_pc),
            total_weight: round2(weight_per_pc * quantity),
            price: round2(price),
            gst_18: round2(gst_18),
            total_price: round2(total_price),
        }
    }
}

/// Extract the mandatory size descriptor from a raw order.
pub fn required_size(input: &Map<String, Value>) -> Result<&str, ValidationError> {
    match input.get("size") {
        None | Some(Value::Null) => Err(ValidationError::MissingSize),
        Some(Value::String(s)) if s.is_empty() => Err(ValidationError::MissingSize),
        Some(Value::String(s)) => Ok(s),
        Some(_) => Err(ValidationError::SizeNotText),
    }
}

/// Price a raw order without touching it.
pub fn price_line(input: &Map<String, Value>) -> Result<PricedLine, ValidationError> {
    let size = required_size(input)?;
    let shape = ShapeKind::parse(size);
    if shape == ShapeKind::Unknown {
        log::warn!("size {:?} matches no known shape, weight defaults to 0", size);
    }

    let quantity = coerce_number(input.get("quantity"));
    let rate = coerce_number(input.get("rate"));

    Ok(PricedLine::compute(shape, quantity, rate))
}

/// Return `input` with `weight_per_pc`, `total_weight`, `price`, `gst_18` and
/// `total_price` set. All other fields are left as they were.
pub fn calculate_po(mut input: Map<String, Value>) -> Result<Map<String, Value>, ValidationError> {
    let priced = price_line(&input)?;

    input.insert("weight_per_pc".to_string(), json!(priced.weight_per_pc));
    input.insert("total_weight".to_string(), json!(priced.total_weight));
    input.insert("price".to_string(), json!(priced.price));
    input.insert("gst_18".to_string(), json!(priced.gst_18));
    input.insert("total_price".to_string(), json!(priced.total_price));

    Ok(input)
}
