//! Product record and upstream mapping
//!
//! A [`Product`] is built once per fetch from the upstream catalog and is never
//! mutated afterwards. Upstream JSON is first decoded into a lenient
//! [`RawProduct`] and then converted, so a single malformed item surfaces as a
//! [`HarvestError::Parse`] naming the offending product.

use crate::{HarvestError, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// One catalog item as exposed by the search API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct Product {
    /// Upstream identifier
    pub product_id: i64,
    /// Display name
    pub name: String,
    /// Product type, e.g. "vegetable" or "grain"
    #[serde(rename = "type")]
    pub product_type: String,
    /// Identifier of the farm offering the product
    pub farm_id: String,
    /// Available units
    pub quantity: u32,
    /// Price of one unit
    pub price_per_unit: f64,
    /// Free-form description
    pub description: Option<String>,
    /// Harvest date and time
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = DateTime))]
    pub harvest_date: NaiveDateTime,
    /// When the upstream record was created
    #[cfg_attr(feature = "openapi", schema(value_type = Option<String>, format = DateTime))]
    pub created_at: Option<NaiveDateTime>,
}

impl Product {
    /// Create a product with the required attributes; optional ones start empty
    pub fn new<S: Into<String>>(
        product_id: i64,
        name: S,
        price_per_unit: f64,
        quantity: u32,
        harvest_date: NaiveDateTime,
    ) -> Self {
        Self {
            product_id,
            name: name.into(),
            product_type: String::new(),
            farm_id: String::new(),
            quantity,
            price_per_unit,
            description: None,
            harvest_date,
            created_at: None,
        }
    }

    /// Set the product type
    pub fn with_type<S: Into<String>>(mut self, product_type: S) -> Self {
        self.product_type = product_type.into();
        self
    }

    /// Set the farm identifier
    pub fn with_farm<S: Into<String>>(mut self, farm_id: S) -> Self {
        self.farm_id = farm_id.into();
        self
    }

    /// Set the description
    pub fn with_description<S: Into<String>>(mut self, description: S) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the creation timestamp
    pub fn with_created_at(mut self, created_at: NaiveDateTime) -> Self {
        self.created_at = Some(created_at);
        self
    }
}

/// Product as returned by `GET /api/v1/products` on the upstream catalog
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawProduct {
    pub product_id: Option<i64>,
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub product_type: Option<String>,
    pub farm_id: Option<serde_json::Value>,
    pub quantity: Option<i64>,
    pub price_per_unit: Option<f64>,
    pub description: Option<String>,
    pub harvest_date: Option<String>,
    pub created_at: Option<String>,
}

impl TryFrom<RawProduct> for Product {
    type Error = HarvestError;

    fn try_from(raw: RawProduct) -> Result<Self> {
        let product_id = raw
            .product_id
            .ok_or_else(|| HarvestError::parse("product is missing 'product_id'"))?;
        let missing = |field: &str| {
            HarvestError::parse(format!("product {} is missing '{}'", product_id, field))
        };

        let name = raw.name.ok_or_else(|| missing("name"))?;

        let quantity = raw.quantity.ok_or_else(|| missing("quantity"))?;
        let quantity = u32::try_from(quantity).map_err(|_| {
            HarvestError::parse(format!(
                "product {} has invalid quantity {}",
                product_id, quantity
            ))
        })?;

        let price_per_unit = raw.price_per_unit.ok_or_else(|| missing("price_per_unit"))?;
        if !price_per_unit.is_finite() || price_per_unit < 0.0 {
            return Err(HarvestError::parse(format!(
                "product {} has invalid price_per_unit {}",
                product_id, price_per_unit
            )));
        }

        let harvest_raw = raw.harvest_date.ok_or_else(|| missing("harvest_date"))?;
        let harvest_date = parse_iso_datetime(&harvest_raw).ok_or_else(|| {
            HarvestError::parse(format!(
                "product {} has malformed harvest_date '{}'",
                product_id, harvest_raw
            ))
        })?;

        let created_at = match raw.created_at.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(text) => Some(parse_iso_datetime(text).ok_or_else(|| {
                HarvestError::parse(format!(
                    "product {} has malformed created_at '{}'",
                    product_id, text
                ))
            })?),
        };

        let farm_id = match raw.farm_id {
            None | Some(serde_json::Value::Null) => String::new(),
            Some(serde_json::Value::String(s)) => s,
            Some(other) => other.to_string(),
        };

        Ok(Product {
            product_id,
            name,
            product_type: raw.product_type.unwrap_or_default(),
            farm_id,
            quantity,
            price_per_unit,
            description: raw.description,
            harvest_date,
            created_at,
        })
    }
}

/// Map a batch of upstream records; the first failure aborts the whole batch
pub fn map_raw_products(raw: Vec<RawProduct>) -> Result<Vec<Product>> {
    raw.into_iter().map(Product::try_from).collect()
}

/// Parse ISO-8601 text into a date-time.
///
/// Accepts a bare date (midnight), a local date-time with `T` or space
/// separator and optional fraction, and RFC 3339 with an offset, which is
/// normalized to UTC.
pub fn parse_iso_datetime(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_utc());
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return Some(dt);
        }
    }

    parse_iso_date(value).map(|date| date.and_time(NaiveTime::MIN))
}

/// Parse a bare `YYYY-MM-DD` date
pub fn parse_iso_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

/// Parse an inclusive lower date bound; a bare date means the start of that day
pub fn parse_lower_bound(value: &str) -> Option<NaiveDateTime> {
    parse_iso_datetime(value)
}

/// Parse an inclusive upper date bound; a bare date means the end of that day
pub fn parse_upper_bound(value: &str) -> Option<NaiveDateTime> {
    match parse_iso_date(value) {
        Some(date) => date.and_hms_nano_opt(23, 59, 59, 999_999_999),
        None => parse_iso_datetime(value),
    }
}
