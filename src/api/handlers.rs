use crate::error::{AppError, AppResult};
use crate::export;
use crate::models::{InvoiceSummary, PickupRecord, StorageInvoice};
use crate::service::{self, BatchOutcome};
use axum::{
    extract::Json,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// 请求体: 提货记录列表
#[derive(Debug, Deserialize)]
pub struct BatchRequest {
    pub pickups: Vec<PickupRecord>,
}

/// 单条失败记录
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordError {
    pub pickup_id: String,
    pub message: String,
}

/// 批量计费响应体
#[derive(Debug, Serialize)]
pub struct BatchResponse {
    pub invoices: Vec<StorageInvoice>,
    pub summary: InvoiceSummary,
    pub errors: Vec<RecordError>,
}

impl From<BatchOutcome> for BatchResponse {
    fn from(outcome: BatchOutcome) -> Self {
        let summary = service::summarize(&outcome.invoices);
        let errors = outcome
            .errors
            .iter()
            .map(|e| RecordError {
                pickup_id: e.pickup_id().to_string(),
                message: e.to_string(),
            })
            .collect();
        Self {
            invoices: outcome.invoices,
            summary,
            errors,
        }
    }
}

/// 附件文件名: 发票号只保留 [A-Za-z0-9-], id 中的引号、控制字符等一律丢弃
fn attachment_name(invoice_number: &str) -> String {
    let name: String = invoice_number
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-')
        .collect();
    if name.is_empty() {
        "storage-invoice".to_string()
    } else {
        name
    }
}

/// 健康检查
pub async fn health_check() -> &'static str {
    "OK"
}

/// 单条计费
pub async fn calculate_invoice(Json(pickup): Json<PickupRecord>) -> AppResult<Json<StorageInvoice>> {
    let invoice = service::calculate(&pickup)?;
    Ok(Json(invoice))
}

/// 批量计费 (供应商发票页)
pub async fn calculate_batch(Json(req): Json<BatchRequest>) -> Json<BatchResponse> {
    Json(service::calculate_batch(&req.pickups).into())
}

/// 导出 CSV, 任一记录无法计费则整体拒绝
pub async fn export_csv(Json(req): Json<BatchRequest>) -> AppResult<Response> {
    let invoices = req
        .pickups
        .iter()
        .map(service::calculate)
        .collect::<Result<Vec<_>, _>>()?;

    let body = export::write_invoices(&invoices)?;
    tracing::info!("导出 CSV: {} 张发票, {} 字节", invoices.len(), body.len());

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"storage-invoices.csv\"",
            ),
        ],
        body,
    )
        .into_response())
}

/// 导出纯文本发票 (开票日期取当天 UTC)
pub async fn export_text(Json(pickup): Json<PickupRecord>) -> AppResult<Response> {
    let invoice = service::calculate(&pickup)?;
    let document = export::render_invoice(&invoice, Utc::now().date_naive());

    let disposition = format!("attachment; filename=\"{}.txt\"", attachment_name(&invoice.invoice_number));
    let disposition = header::HeaderValue::from_str(&disposition)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, header::HeaderValue::from_static("text/plain; charset=utf-8")),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        document,
    )
        .into_response())
}

#[cfg(test)]
mod tests {
    use super::attachment_name;

    #[test]
    fn attachment_name_strips_unsafe_characters() {
        assert_eq!(attachment_name("INV-A1B2C3D4"), "INV-A1B2C3D4");
        assert_eq!(attachment_name("INV-AB\nCD\"X"), "INV-ABCDX");
        assert_eq!(attachment_name("INV-ÉCOLE"), "INV-COLE");
        assert_eq!(attachment_name("\r\n"), "storage-invoice");
    }
}
