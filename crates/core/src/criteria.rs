//! Filter criteria and sort specification

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Optional constraints applied to a product list.
///
/// Every field is independent; `None` means no constraint on that dimension.
/// All bounds are inclusive.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// Case-insensitive substring of the product name
    pub name: Option<String>,
    /// Case-insensitive substring of the product type
    pub product_type: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub min_quantity: Option<i64>,
    pub max_quantity: Option<i64>,
    pub harvest_start: Option<NaiveDateTime>,
    pub harvest_end: Option<NaiveDateTime>,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_type<S: Into<String>>(mut self, product_type: S) -> Self {
        self.product_type = Some(product_type.into());
        self
    }

    pub fn with_price_range(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.min_price = min;
        self.max_price = max;
        self
    }

    pub fn with_quantity_range(mut self, min: Option<i64>, max: Option<i64>) -> Self {
        self.min_quantity = min;
        self.max_quantity = max;
        self
    }

    pub fn with_harvest_range(
        mut self,
        start: Option<NaiveDateTime>,
        end: Option<NaiveDateTime>,
    ) -> Self {
        self.harvest_start = start;
        self.harvest_end = end;
        self
    }

    /// True when no criterion is active
    pub fn is_empty(&self) -> bool {
        self.active_count() == 0
    }

    /// Number of active criteria
    pub fn active_count(&self) -> usize {
        [
            self.name.as_deref().is_some_and(|s| !s.is_empty()),
            self.product_type.as_deref().is_some_and(|s| !s.is_empty()),
            self.min_price.is_some(),
            self.max_price.is_some(),
            self.min_quantity.is_some(),
            self.max_quantity.is_some(),
            self.harvest_start.is_some(),
            self.harvest_end.is_some(),
        ]
        .iter()
        .filter(|active| **active)
        .count()
    }
}

/// Fields a product list can be ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    Name,
    PricePerUnit,
    Quantity,
    HarvestDate,
}

impl SortField {
    /// Wire name of the field
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::PricePerUnit => "price_per_unit",
            Self::Quantity => "quantity",
            Self::HarvestDate => "harvest_date",
        }
    }

    /// Parse a wire name; unknown names yield `None`
    pub fn parse(value: &str) -> Option<Self> {
        value.parse().ok()
    }

    pub fn all() -> [SortField; 4] {
        [
            Self::Name,
            Self::PricePerUnit,
            Self::Quantity,
            Self::HarvestDate,
        ]
    }
}

impl FromStr for SortField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(Self::Name),
            "price_per_unit" => Ok(Self::PricePerUnit),
            "quantity" => Ok(Self::Quantity),
            "harvest_date" => Ok(Self::HarvestDate),
            other => Err(format!("Unknown sort field: {}", other)),
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sort direction; anything other than `desc` is ascending
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// Parse a direction, case-insensitively; absence means ascending
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some(dir) if dir.trim().eq_ignore_ascii_case("desc") => Self::Desc,
            _ => Self::Asc,
        }
    }

    pub fn is_descending(&self) -> bool {
        matches!(self, Self::Desc)
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Asc => f.write_str("asc"),
            Self::Desc => f.write_str("desc"),
        }
    }
}
