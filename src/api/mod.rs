pub mod handlers;

pub use handlers::*;

use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;

/// 构建路由
pub fn router() -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/invoices/calculate", post(calculate_invoice))
        .route("/api/invoices/batch", post(calculate_batch))
        .route("/api/invoices/export/csv", post(export_csv))
        .route("/api/invoices/export/text", post(export_text))
        .layer(ServiceBuilder::new())
}
