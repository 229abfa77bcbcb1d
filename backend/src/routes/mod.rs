//! Route definitions for the Inventory Management System

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};

use crate::{handlers, middleware::auth_middleware, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health check (public)
        .route("/health", get(handlers::health_check))
        // Protected routes - order workflow
        .nest("/orders", order_routes())
        // Protected routes - purchase/restock workflow
        .nest("/purchase-orders", purchase_order_routes())
        // Protected routes - fresh-product workflow
        .nest("/fresh-products", fresh_product_routes())
        // Protected routes - product management
        .nest("/products", product_routes())
}

/// Order routes (protected)
fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_orders).post(handlers::register_order))
        .route(
            "/:order_id",
            get(handlers::get_order).delete(handlers::delete_order),
        )
        .route("/:order_id/receipt", put(handlers::attach_receipt))
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Purchase-order routes (protected); purchase orders are append-only, so
/// no update route exists
fn purchase_order_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_purchase_orders))
        .route("/add-stock", post(handlers::add_stock))
        .route("/register-product", post(handlers::register_product_purchase))
        .route(
            "/:purchase_order_id",
            get(handlers::get_purchase_order).delete(handlers::delete_purchase_order),
        )
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Fresh-product routes (protected)
fn fresh_product_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_fresh_products).post(handlers::register_fresh_product),
        )
        .route(
            "/:receipt_id",
            get(handlers::get_fresh_product)
                .put(handlers::update_fresh_product)
                .delete(handlers::delete_fresh_product),
        )
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Product routes (protected)
fn product_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_products).post(handlers::register_product),
        )
        .route(
            "/:product_id",
            get(handlers::get_product)
                .put(handlers::update_product)
                .delete(handlers::delete_product),
        )
        .route_layer(middleware::from_fn(auth_middleware))
}
