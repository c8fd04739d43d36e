//! Product search service: predicate filtering and stable ordering

use crate::criteria::{FilterCriteria, SortDirection, SortField};
use crate::product::Product;
use crate::provider::ProductProvider;
use crate::Result;
use std::cmp::Ordering;
use std::sync::Arc;

/// Applies filter criteria and sort orders to the provider's catalog
#[derive(Clone)]
pub struct ProductSearchService {
    provider: Arc<dyn ProductProvider>,
}

impl ProductSearchService {
    pub fn new(provider: Arc<dyn ProductProvider>) -> Self {
        Self { provider }
    }

    /// Fetch the full catalog and narrow it down with `criteria`
    pub async fn search(&self, criteria: &FilterCriteria) -> Result<Vec<Product>> {
        let products = self.provider.get_all_products().await?;
        let fetched = products.len();
        let filtered = Self::filter(products, criteria);

        tracing::debug!(
            fetched,
            matched = filtered.len(),
            criteria = criteria.active_count(),
            "Filtered product catalog"
        );

        Ok(filtered)
    }

    /// Apply every active criterion as its own order-preserving pass.
    ///
    /// Criteria combine with logical AND; absent criteria are no-ops.
    pub fn filter(mut products: Vec<Product>, criteria: &FilterCriteria) -> Vec<Product> {
        if let Some(name) = criteria.name.as_deref().filter(|s| !s.is_empty()) {
            let needle = name.to_lowercase();
            products.retain(|p| p.name.to_lowercase().contains(&needle));
        }

        if let Some(product_type) = criteria.product_type.as_deref().filter(|s| !s.is_empty()) {
            let needle = product_type.to_lowercase();
            products.retain(|p| p.product_type.to_lowercase().contains(&needle));
        }

        if let Some(min) = criteria.min_price {
            products.retain(|p| p.price_per_unit >= min);
        }

        if let Some(max) = criteria.max_price {
            products.retain(|p| p.price_per_unit <= max);
        }

        if let Some(min) = criteria.min_quantity {
            products.retain(|p| i64::from(p.quantity) >= min);
        }

        if let Some(max) = criteria.max_quantity {
            products.retain(|p| i64::from(p.quantity) <= max);
        }

        if let Some(start) = criteria.harvest_start {
            products.retain(|p| p.harvest_date >= start);
        }

        if let Some(end) = criteria.harvest_end {
            products.retain(|p| p.harvest_date <= end);
        }

        products
    }

    /// Stable sort by `field`; equal keys keep their input order in both directions
    pub fn sort(
        mut products: Vec<Product>,
        field: SortField,
        direction: SortDirection,
    ) -> Vec<Product> {
        products.sort_by(|a, b| {
            let ordering = compare_by(a, b, field);
            if direction.is_descending() {
                ordering.reverse()
            } else {
                ordering
            }
        });
        products
    }

    /// Sort by a wire field name. Unknown names leave the input untouched.
    pub fn sort_products(
        products: Vec<Product>,
        order_by: &str,
        order_dir: Option<&str>,
    ) -> Vec<Product> {
        match SortField::parse(order_by.trim()) {
            Some(field) => Self::sort(products, field, SortDirection::parse(order_dir)),
            None => {
                tracing::debug!(order_by, "Ignoring unknown sort field");
                products
            }
        }
    }
}

fn compare_by(a: &Product, b: &Product, field: SortField) -> Ordering {
    match field {
        SortField::Name => a.name.cmp(&b.name),
        SortField::PricePerUnit => a.price_per_unit.total_cmp(&b.price_per_unit),
        SortField::Quantity => a.quantity.cmp(&b.quantity),
        SortField::HarvestDate => a.harvest_date.cmp(&b.harvest_date),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::parse_iso_datetime;
    use crate::provider::InMemoryProductProvider;

    fn product(id: i64, name: &str, price: f64, quantity: u32, harvest: &str) -> Product {
        Product::new(
            id,
            name,
            price,
            quantity,
            parse_iso_datetime(harvest).unwrap(),
        )
    }

    fn ids(products: &[Product]) -> Vec<i64> {
        products.iter().map(|p| p.product_id).collect()
    }

    fn catalog() -> Vec<Product> {
        vec![
            product(1, "Corn", 10.0, 5, "2025-02-01").with_type("Grain"),
            product(2, "Corn Sweet", 20.0, 3, "2024-11-15").with_type("grain"),
            product(3, "Tomato", 15.0, 12, "2025-07-20").with_type("Vegetable"),
            product(4, "Apple", 15.0, 0, "2026-01-05").with_type("fruit"),
        ]
    }

    #[test]
    fn test_filter_name_case_insensitive() {
        let criteria = FilterCriteria::new().with_name("corn");
        assert_eq!(ids(&ProductSearchService::filter(catalog(), &criteria)), vec![1, 2]);

        let criteria = FilterCriteria::new().with_name("SWEET");
        assert_eq!(ids(&ProductSearchService::filter(catalog(), &criteria)), vec![2]);
    }

    #[test]
    fn test_filter_min_price() {
        let records = vec![
            product(1, "Corn", 10.0, 5, "2025-01-01"),
            product(2, "Corn Sweet", 20.0, 3, "2025-01-01"),
        ];
        let criteria = FilterCriteria::new().with_price_range(Some(15.0), None);
        assert_eq!(ids(&ProductSearchService::filter(records, &criteria)), vec![2]);
    }

    #[test]
    fn test_filter_bounds_are_inclusive() {
        let criteria = FilterCriteria::new()
            .with_price_range(Some(15.0), Some(15.0))
            .with_quantity_range(Some(0), Some(12));
        assert_eq!(ids(&ProductSearchService::filter(catalog(), &criteria)), vec![3, 4]);
    }

    #[test]
    fn test_filter_product_type_partial_match() {
        let criteria = FilterCriteria::new().with_type("GRA");
        assert_eq!(ids(&ProductSearchService::filter(catalog(), &criteria)), vec![1, 2]);

        let criteria = FilterCriteria::new().with_type("vegetable");
        assert_eq!(ids(&ProductSearchService::filter(catalog(), &criteria)), vec![3]);
    }

    #[test]
    fn test_filter_harvest_range() {
        let criteria = FilterCriteria::new().with_harvest_range(
            parse_iso_datetime("2025-01-01"),
            crate::product::parse_upper_bound("2025-12-31"),
        );
        assert_eq!(ids(&ProductSearchService::filter(catalog(), &criteria)), vec![1, 3]);
    }

    #[test]
    fn test_filter_no_criteria_is_identity() {
        let filtered = ProductSearchService::filter(catalog(), &FilterCriteria::default());
        assert_eq!(filtered, catalog());
    }

    #[test]
    fn test_filter_is_monotonic() {
        let steps = [
            FilterCriteria::new(),
            FilterCriteria::new().with_price_range(Some(12.0), None),
            FilterCriteria::new()
                .with_price_range(Some(12.0), None)
                .with_quantity_range(Some(1), None),
            FilterCriteria::new()
                .with_price_range(Some(12.0), None)
                .with_quantity_range(Some(1), None)
                .with_name("o"),
        ];

        let sizes: Vec<usize> = steps
            .iter()
            .map(|c| ProductSearchService::filter(catalog(), c).len())
            .collect();
        assert!(sizes.windows(2).all(|w| w[1] <= w[0]), "{:?}", sizes);
    }

    #[test]
    fn test_filter_preserves_relative_order() {
        let criteria = FilterCriteria::new().with_price_range(Some(12.0), None);
        assert_eq!(ids(&ProductSearchService::filter(catalog(), &criteria)), vec![2, 3, 4]);
    }

    #[test]
    fn test_sort_by_price() {
        let records = vec![
            product(1, "a", 30.0, 1, "2025-01-01"),
            product(2, "b", 10.0, 1, "2025-01-01"),
            product(3, "c", 20.0, 1, "2025-01-01"),
        ];

        let asc = ProductSearchService::sort(records.clone(), SortField::PricePerUnit, SortDirection::Asc);
        let prices: Vec<f64> = asc.iter().map(|p| p.price_per_unit).collect();
        assert_eq!(prices, vec![10.0, 20.0, 30.0]);

        let desc = ProductSearchService::sort(records, SortField::PricePerUnit, SortDirection::Desc);
        let prices: Vec<f64> = desc.iter().map(|p| p.price_per_unit).collect();
        assert_eq!(prices, vec![30.0, 20.0, 10.0]);
    }

    #[test]
    fn test_sort_by_name_quantity_and_date() {
        let by_name = ProductSearchService::sort(catalog(), SortField::Name, SortDirection::Asc);
        assert_eq!(ids(&by_name), vec![4, 1, 2, 3]);

        let by_qty = ProductSearchService::sort(catalog(), SortField::Quantity, SortDirection::Desc);
        assert_eq!(ids(&by_qty), vec![3, 1, 2, 4]);

        let by_date = ProductSearchService::sort(catalog(), SortField::HarvestDate, SortDirection::Asc);
        assert_eq!(ids(&by_date), vec![2, 1, 3, 4]);
    }

    #[test]
    fn test_sort_is_stable_in_both_directions() {
        // products 3 and 4 share a price of 15.0
        let asc = ProductSearchService::sort(catalog(), SortField::PricePerUnit, SortDirection::Asc);
        assert_eq!(ids(&asc), vec![1, 3, 4, 2]);

        let desc = ProductSearchService::sort(catalog(), SortField::PricePerUnit, SortDirection::Desc);
        assert_eq!(ids(&desc), vec![2, 3, 4, 1]);
    }

    #[test]
    fn test_sort_unknown_field_is_noop() {
        let sorted = ProductSearchService::sort_products(catalog(), "farm_id", Some("desc"));
        assert_eq!(sorted, catalog());
    }

    #[test]
    fn test_sort_products_direction_case_insensitive() {
        let sorted = ProductSearchService::sort_products(catalog(), "quantity", Some("DESC"));
        assert_eq!(ids(&sorted), vec![3, 1, 2, 4]);
    }

    #[tokio::test]
    async fn test_search_fetches_then_filters() {
        let provider = Arc::new(InMemoryProductProvider::new(catalog()));
        let service = ProductSearchService::new(provider);

        let all = service.search(&FilterCriteria::default()).await.unwrap();
        assert_eq!(ids(&all), vec![1, 2, 3, 4]);

        let corn = service
            .search(&FilterCriteria::new().with_name("corn"))
            .await
            .unwrap();
        assert_eq!(ids(&corn), vec![1, 2]);
    }
}
