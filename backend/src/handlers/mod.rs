//! HTTP handlers for the Inventory Management System

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
};

use crate::error::AppError;

pub mod fresh_product;
pub mod health;
pub mod order;
pub mod product;
pub mod purchase_order;

pub use fresh_product::*;
pub use health::*;
pub use order::*;
pub use product::*;
pub use purchase_order::*;

/// Generic success payload
#[derive(Debug, serde::Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

/// JSON body extractor that reports malformed or incomplete payloads as a
/// 400 in the standard error envelope instead of axum's plain-text
/// rejection. Missing mandatory fields surface here, before any handler
/// logic runs.
pub struct AppJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for AppJson<T>
where
    axum::Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match axum::Json::<T>::from_request(req, state).await {
            Ok(axum::Json(value)) => Ok(AppJson(value)),
            Err(rejection) => Err(AppError::ValidationError(rejection.body_text())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::AppJson;
    use crate::error::AppError;
    use crate::services::purchase_order::AddStockInput;
    use axum::{
        body::Body,
        extract::{FromRequest, Request},
        http::{header::CONTENT_TYPE, StatusCode},
        response::IntoResponse,
    };

    #[tokio::test]
    async fn missing_mandatory_field_is_a_validation_error() {
        // supplier_id alone; the remaining mandatory fields are absent
        let request = Request::builder()
            .method("POST")
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(
                r#"{"supplier_id":"11111111-1111-1111-1111-111111111111"}"#,
            ))
            .unwrap();

        let rejection = AppJson::<AddStockInput>::from_request(request, &())
            .await
            .err()
            .expect("incomplete payload must be rejected");

        assert!(matches!(rejection, AppError::ValidationError(_)));
        assert_eq!(rejection.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn malformed_json_is_a_validation_error() {
        let request = Request::builder()
            .method("POST")
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();

        let rejection = AppJson::<AddStockInput>::from_request(request, &())
            .await
            .err()
            .expect("malformed payload must be rejected");

        assert_eq!(rejection.into_response().status(), StatusCode::BAD_REQUEST);
    }
}
