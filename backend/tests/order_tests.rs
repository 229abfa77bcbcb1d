//! Order workflow tests
//!
//! Covers cart pricing, total/change arithmetic, reference-number format,
//! per-line stock decrements, and the all-or-nothing rollback property.

use proptest::prelude::*;
use rust_decimal::Decimal;
use std::str::FromStr;

use shared::validation::{
    is_valid_reference_number, line_subtotal, order_change, validate_order_quantity,
};

// Helper to create Decimal from string
fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn test_line_subtotal_without_discount() {
        assert_eq!(line_subtotal(2, dec("10.00"), None), dec("20.00"));
    }

    #[test]
    fn test_line_subtotal_with_discount() {
        assert_eq!(line_subtotal(1, dec("20.00"), Some(dec("5"))), dec("15.00"));
    }

    #[test]
    fn test_missing_discount_defaults_to_zero() {
        assert_eq!(
            line_subtotal(3, dec("7.50"), None),
            line_subtotal(3, dec("7.50"), Some(Decimal::ZERO))
        );
    }

    #[test]
    fn test_change_is_payment_minus_total() {
        assert_eq!(order_change(dec("50"), dec("35")), dec("15"));
    }

    #[test]
    fn test_underpayment_yields_negative_change() {
        // Not rejected; the caller decides what to do with it
        assert_eq!(order_change(dec("10"), dec("35")), dec("-25"));
    }

    #[test]
    fn test_reference_number_format() {
        assert!(is_valid_reference_number("0000000000000"));
        assert!(is_valid_reference_number("9876543210123"));
        assert!(!is_valid_reference_number(""));
        assert!(!is_valid_reference_number("12345678901234"));
        assert!(!is_valid_reference_number("123456789012a"));
    }

    /// Two-line scenario: product A price 10.00 (stock 5), product B price
    /// 20.00 (stock 3); cart [{A, qty 2, discount 0}, {B, qty 1, discount 5}],
    /// payment 50.
    #[test]
    fn test_two_line_order_scenario() {
        let line_a = line_subtotal(2, dec("10.00"), Some(Decimal::ZERO));
        let line_b = line_subtotal(1, dec("20.00"), Some(dec("5")));

        let total_quantity = 2 + 1;
        let total_price = line_a + line_b;
        let change = order_change(dec("50"), total_price);

        assert_eq!(total_quantity, 3);
        assert_eq!(total_price, dec("35.00"));
        assert_eq!(change, dec("15.00"));

        // Stock decrements per line
        assert_eq!(5 - 2, 3);
        assert_eq!(3 - 1, 2);
    }
}

// ============================================================================
// Workflow simulation (mirrors the transactional register sequence)
// ============================================================================

#[cfg(test)]
mod workflow_simulation {
    use super::*;
    use std::collections::BTreeMap;

    #[derive(Debug, Clone, PartialEq)]
    struct StockProduct {
        price: Decimal,
        quantity: i32,
    }

    struct CartLine {
        product_id: u32,
        quantity: i32,
        discount: Option<Decimal>,
    }

    /// Simulate the order registration transaction against an in-memory
    /// ledger: validate, price every line, then decrement stock. Any error
    /// leaves the ledger untouched, matching rollback semantics.
    fn register_order(
        ledger: &mut BTreeMap<u32, StockProduct>,
        cart: &[CartLine],
        payment: Decimal,
    ) -> Result<(i32, Decimal, Decimal), &'static str> {
        if cart.is_empty() {
            return Err("Products array is required and cannot be empty");
        }

        for line in cart {
            validate_order_quantity(line.quantity)?;
        }

        // Work on a copy; only commit on full success
        let mut pending = ledger.clone();
        let mut total_quantity = 0;
        let mut total_price = Decimal::ZERO;

        for line in cart {
            let product = pending.get_mut(&line.product_id).ok_or("Product not found")?;
            total_quantity += line.quantity;
            total_price += line_subtotal(line.quantity, product.price, line.discount);
            product.quantity -= line.quantity;
        }

        let change = order_change(payment, total_price);
        *ledger = pending;
        Ok((total_quantity, total_price, change))
    }

    fn two_product_ledger() -> BTreeMap<u32, StockProduct> {
        BTreeMap::from([
            (1, StockProduct { price: dec("10.00"), quantity: 5 }),
            (2, StockProduct { price: dec("20.00"), quantity: 3 }),
        ])
    }

    #[test]
    fn test_successful_order_decrements_each_line() {
        let mut ledger = two_product_ledger();
        let cart = [
            CartLine { product_id: 1, quantity: 2, discount: Some(Decimal::ZERO) },
            CartLine { product_id: 2, quantity: 1, discount: Some(dec("5")) },
        ];

        let (total_quantity, total_price, change) =
            register_order(&mut ledger, &cart, dec("50")).unwrap();

        assert_eq!(total_quantity, 3);
        assert_eq!(total_price, dec("35.00"));
        assert_eq!(change, dec("15.00"));
        assert_eq!(ledger[&1].quantity, 3);
        assert_eq!(ledger[&2].quantity, 2);
    }

    #[test]
    fn test_unknown_product_rolls_back_everything() {
        let mut ledger = two_product_ledger();
        let snapshot = ledger.clone();
        let cart = [
            CartLine { product_id: 1, quantity: 2, discount: None },
            CartLine { product_id: 99, quantity: 1, discount: None },
        ];

        let result = register_order(&mut ledger, &cart, dec("50"));

        assert!(result.is_err());
        // Pre/post snapshot equality: no partial stock change persists
        assert_eq!(ledger, snapshot);
    }

    #[test]
    fn test_empty_cart_is_rejected() {
        let mut ledger = two_product_ledger();
        let snapshot = ledger.clone();

        assert!(register_order(&mut ledger, &[], dec("50")).is_err());
        assert_eq!(ledger, snapshot);
    }

    #[test]
    fn test_untouched_products_keep_their_quantity() {
        let mut ledger = two_product_ledger();
        let cart = [CartLine { product_id: 1, quantity: 4, discount: None }];

        register_order(&mut ledger, &cart, dec("100")).unwrap();

        assert_eq!(ledger[&1].quantity, 1);
        assert_eq!(ledger[&2].quantity, 3);
    }

    #[test]
    fn test_non_positive_line_quantity_is_rejected() {
        let mut ledger = two_product_ledger();
        let snapshot = ledger.clone();

        for quantity in [0, -1, i32::MIN] {
            let cart = [CartLine { product_id: 1, quantity, discount: None }];
            assert!(register_order(&mut ledger, &cart, dec("50")).is_err());
        }

        assert_eq!(ledger, snapshot);
    }

    #[test]
    fn test_oversell_is_not_floored() {
        // Known gap kept on purpose: no on-hand check before a sale
        let mut ledger = two_product_ledger();
        let cart = [CartLine { product_id: 2, quantity: 5, discount: None }];

        register_order(&mut ledger, &cart, dec("100")).unwrap();

        assert_eq!(ledger[&2].quantity, -2);
    }
}

// ============================================================================
// Property Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    fn price_strategy() -> impl Strategy<Value = Decimal> {
        (0i64..100_000).prop_map(|cents| Decimal::new(cents, 2))
    }

    fn line_strategy() -> impl Strategy<Value = (i32, Decimal, Decimal)> {
        (1i32..100, price_strategy(), price_strategy())
    }

    proptest! {
        /// Property: order total equals the sum of per-line subtotals
        #[test]
        fn prop_total_is_sum_of_subtotals(
            lines in prop::collection::vec(line_strategy(), 1..10)
        ) {
            let total: Decimal = lines
                .iter()
                .map(|(qty, price, discount)| line_subtotal(*qty, *price, Some(*discount)))
                .sum();
            let expected: Decimal = lines
                .iter()
                .map(|(qty, price, discount)| Decimal::from(*qty) * *price - *discount)
                .sum();

            prop_assert_eq!(total, expected);
        }

        /// Property: change = payment − total, exactly
        #[test]
        fn prop_change_exact(payment in price_strategy(), total in price_strategy()) {
            let change = order_change(payment, total);
            prop_assert_eq!(change + total, payment);
        }

        /// Property: a sale of n units moves stock down by exactly n
        #[test]
        fn prop_sale_decrements_exactly(initial in -1000i32..1000, qty in 1i32..100) {
            let after = initial - qty;
            prop_assert_eq!(initial - after, qty);
        }
    }
}
