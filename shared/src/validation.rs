//! Validation rules for the Inventory Management System
//!
//! Pure functions shared by the backend workflows and the test suites.
//! Monetary amounts use `Decimal`; unit quantities are integers.

use rust_decimal::Decimal;

// ============================================================================
// Quantity and money validations
// ============================================================================

/// Validate a quantity that may be zero (fresh receipts, product registration)
pub fn validate_non_negative_quantity(quantity: i32) -> Result<(), &'static str> {
    if quantity < 0 {
        return Err("Quantity must be a number greater than or equal to zero");
    }
    Ok(())
}

/// Validate a restock quantity (must add at least one unit)
pub fn validate_restock_quantity(quantity: i32) -> Result<(), &'static str> {
    if quantity < 1 {
        return Err("Quantity must be a number greater than or equal to 1");
    }
    Ok(())
}

/// Validate an order line quantity (must sell at least one unit)
pub fn validate_order_quantity(quantity: i32) -> Result<(), &'static str> {
    if quantity < 1 {
        return Err("Quantity must be a number greater than or equal to 1");
    }
    Ok(())
}

/// Validate a unit price
pub fn validate_price(price: Decimal) -> Result<(), &'static str> {
    if price < Decimal::ZERO {
        return Err("Price must be a number greater than or equal to zero");
    }
    Ok(())
}

/// Validate a payment amount
pub fn validate_payment(payment: Decimal) -> Result<(), &'static str> {
    if payment < Decimal::ZERO {
        return Err("Payment must be a number greater than or equal to zero");
    }
    Ok(())
}

// ============================================================================
// Order arithmetic
// ============================================================================

/// Subtotal for one order line: quantity × unit price − discount
///
/// A missing discount counts as zero. The result is not floored at zero;
/// an over-discounted line stays visible in the totals.
pub fn line_subtotal(quantity: i32, unit_price: Decimal, discount: Option<Decimal>) -> Decimal {
    Decimal::from(quantity) * unit_price - discount.unwrap_or(Decimal::ZERO)
}

/// Change owed to the customer: payment − order total
///
/// May be negative; an underpaid order is accepted and left to the caller.
pub fn order_change(payment: Decimal, total_price: Decimal) -> Decimal {
    payment - total_price
}

// ============================================================================
// Generated identifier formats
// ============================================================================

/// Check the 13-digit order reference number format
///
/// Reference numbers are human-readable tags, not guaranteed unique; the
/// primary key is a separate identifier.
pub fn is_valid_reference_number(reference: &str) -> bool {
    reference.len() == 13 && reference.chars().all(|c| c.is_ascii_digit())
}

/// Check the generated product code format: `PROD-` + 10 decimal digits
pub fn is_valid_product_code(code: &str) -> bool {
    match code.strip_prefix("PROD-") {
        Some(digits) => digits.len() == 10 && digits.chars().all(|c| c.is_ascii_digit()),
        None => false,
    }
}

/// Reduce a product variant to a filename-safe stem for stored images
pub fn sanitize_variant(variant: &str) -> String {
    let cleaned: String = variant.chars().filter(|c| c.is_ascii_alphanumeric()).collect();
    if cleaned.is_empty() {
        "default".to_string()
    } else {
        cleaned
    }
}
