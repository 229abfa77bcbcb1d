//! Business logic services for the Inventory Management System

pub mod fresh_product;
pub mod order;
pub mod product;
pub mod purchase_order;
pub mod stock;
pub mod storage;

pub use fresh_product::FreshProductService;
pub use order::OrderService;
pub use product::ProductService;
pub use purchase_order::PurchaseOrderService;
pub use storage::FileStorage;

/// Generate a string of independently sampled decimal digits.
///
/// Used for the 13-digit order reference numbers and the 10-digit product
/// code suffixes. No uniqueness is guaranteed or checked.
pub(crate) fn random_digits(len: usize) -> String {
    use rand::Rng;

    let mut rng = rand::thread_rng();
    (0..len)
        .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
        .collect()
}
