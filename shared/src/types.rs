//! Common types used across the platform

use serde::{Deserialize, Serialize};

/// Marker indicating whether a product's price changed since last review
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum PriceAdjustment {
    #[default]
    #[serde(rename = "NONE")]
    None,
    #[serde(rename = "NEW")]
    New,
}

impl PriceAdjustment {
    pub fn as_str(&self) -> &'static str {
        match self {
            PriceAdjustment::None => "NONE",
            PriceAdjustment::New => "NEW",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "NONE" => Some(PriceAdjustment::None),
            "NEW" => Some(PriceAdjustment::New),
            _ => None,
        }
    }
}

/// Kind of stock increase recorded on a purchase order
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TransactionKind {
    #[serde(rename = "RESTOCK")]
    Restock,
    #[serde(rename = "NEW PRODUCT")]
    NewProduct,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Restock => "RESTOCK",
            TransactionKind::NewProduct => "NEW PRODUCT",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "RESTOCK" => Some(TransactionKind::Restock),
            "NEW PRODUCT" => Some(TransactionKind::NewProduct),
            _ => None,
        }
    }
}

/// Product category filter used by listing endpoints
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ProductCategory {
    /// Regular shelf products (`productType = 'PRODUCT'`)
    Product,
    /// Everything else
    Other,
}

impl ProductCategory {
    pub fn matches(&self, product_type: &str) -> bool {
        match self {
            ProductCategory::Product => product_type == "PRODUCT",
            ProductCategory::Other => product_type != "PRODUCT",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_adjustment_round_trips_wire_values() {
        assert_eq!(PriceAdjustment::from_str("NONE"), Some(PriceAdjustment::None));
        assert_eq!(PriceAdjustment::from_str("NEW"), Some(PriceAdjustment::New));
        assert_eq!(PriceAdjustment::from_str("new"), None);
        assert_eq!(PriceAdjustment::New.as_str(), "NEW");
    }

    #[test]
    fn transaction_kind_uses_original_labels() {
        // The 'NEW PRODUCT' label contains a space; it is a stored value,
        // not an identifier.
        assert_eq!(TransactionKind::NewProduct.as_str(), "NEW PRODUCT");
        assert_eq!(
            TransactionKind::from_str("NEW PRODUCT"),
            Some(TransactionKind::NewProduct)
        );
        assert_eq!(TransactionKind::from_str("RESTOCK"), Some(TransactionKind::Restock));
    }

    #[test]
    fn category_filter_matches_product_type() {
        assert!(ProductCategory::Product.matches("PRODUCT"));
        assert!(!ProductCategory::Product.matches("FRESH"));
        assert!(ProductCategory::Other.matches("FRESH"));
        assert!(!ProductCategory::Other.matches("PRODUCT"));
    }
}
