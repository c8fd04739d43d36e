//! Query-string parameters of the product search endpoint
//!
//! Every parameter arrives as text. Values that do not parse (a price of
//! `abc`, a date of `tomorrow`) are treated as if the parameter were absent,
//! so a malformed filter never turns into a failed request.

use chrono::NaiveDateTime;
use harvest_core::product::{parse_lower_bound, parse_upper_bound};
use harvest_core::{FilterCriteria, SearchRequest};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[cfg(feature = "openapi")]
use utoipa::IntoParams;

/// Query parameters for `GET /api/v1/product-search`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(IntoParams))]
#[cfg_attr(feature = "openapi", into_params(parameter_in = Query))]
pub struct SearchQueryParams {
    /// Partial or full product name (case-insensitive)
    pub name: Option<String>,
    /// Partial or full product type (case-insensitive)
    #[serde(rename = "type")]
    pub product_type: Option<String>,
    /// Minimum price per unit (inclusive)
    pub min_price: Option<String>,
    /// Maximum price per unit (inclusive)
    pub max_price: Option<String>,
    /// Minimum quantity (inclusive)
    pub min_quantity: Option<String>,
    /// Maximum quantity (inclusive)
    pub max_quantity: Option<String>,
    /// Earliest harvest date (YYYY-MM-DD, inclusive)
    pub harvest_start: Option<String>,
    /// Latest harvest date (YYYY-MM-DD, inclusive through the end of that day)
    pub harvest_end: Option<String>,
    /// One of name, price_per_unit, quantity, harvest_date; anything else is ignored
    pub order_by: Option<String>,
    /// asc (default) or desc
    pub order_dir: Option<String>,
}

impl SearchQueryParams {
    /// Build from decoded query-string pairs.
    ///
    /// When a key repeats, its first occurrence wins. Unknown keys are ignored.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut params = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "name" => &mut params.name,
                "type" => &mut params.product_type,
                "min_price" => &mut params.min_price,
                "max_price" => &mut params.max_price,
                "min_quantity" => &mut params.min_quantity,
                "max_quantity" => &mut params.max_quantity,
                "harvest_start" => &mut params.harvest_start,
                "harvest_end" => &mut params.harvest_end,
                "order_by" => &mut params.order_by,
                "order_dir" => &mut params.order_dir,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }
        params
    }

    /// Convert raw parameters into the use case's typed input
    pub fn into_request(self) -> SearchRequest {
        let criteria = FilterCriteria {
            name: text(self.name),
            product_type: text(self.product_type),
            min_price: finite("min_price", self.min_price.as_deref()),
            max_price: finite("max_price", self.max_price.as_deref()),
            min_quantity: number("min_quantity", self.min_quantity.as_deref()),
            max_quantity: number("max_quantity", self.max_quantity.as_deref()),
            harvest_start: date("harvest_start", self.harvest_start.as_deref(), parse_lower_bound),
            harvest_end: date("harvest_end", self.harvest_end.as_deref(), parse_upper_bound),
        };

        SearchRequest {
            criteria,
            order_by: text(self.order_by),
            order_dir: text(self.order_dir),
        }
    }
}

fn text(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn number<T: FromStr>(param: &str, value: Option<&str>) -> Option<T> {
    let raw = value.map(str::trim).filter(|v| !v.is_empty())?;
    match raw.parse() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            tracing::debug!(param, value = raw, "Ignoring malformed numeric parameter");
            None
        }
    }
}

fn finite(param: &str, value: Option<&str>) -> Option<f64> {
    number::<f64>(param, value).filter(|v| {
        let ok = v.is_finite();
        if !ok {
            tracing::debug!(param, "Ignoring non-finite numeric parameter");
        }
        ok
    })
}

fn date(
    param: &str,
    value: Option<&str>,
    parse: fn(&str) -> Option<NaiveDateTime>,
) -> Option<NaiveDateTime> {
    let raw = value.map(str::trim).filter(|v| !v.is_empty())?;
    let parsed = parse(raw);
    if parsed.is_none() {
        tracing::debug!(param, value = raw, "Ignoring malformed date parameter");
    }
    parsed
}
