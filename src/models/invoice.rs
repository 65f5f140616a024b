use bigdecimal::BigDecimal;
use serde::{Serialize, Serializer};

/// 仓储费用发票 (由 PickupRecord 纯计算得出, 不落库)
///
/// 金额字段均已四舍五入到 2 位小数, 序列化为 "150.00" 形式的字符串;
/// `quantity` 与 `storageRate` 序列化为 JSON 数字.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageInvoice {
    pub invoice_number: String,
    pub pickup_id: String,
    pub company_name: String,
    pub item: String,
    #[serde(serialize_with = "as_number")]
    pub quantity: BigDecimal,
    pub storage_type: String,
    pub days_stored: i64,
    #[serde(serialize_with = "as_number")]
    pub storage_rate: BigDecimal,
    pub storage_cost: BigDecimal,
    pub handling_fee: BigDecimal,
    pub subtotal: BigDecimal,
    pub tax: BigDecimal,
    pub total: BigDecimal,
}

/// 单个公司的汇总
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyTotal {
    pub company_name: String,
    pub invoice_count: usize,
    #[serde(serialize_with = "as_number")]
    pub total_amount: BigDecimal,
}

/// 供应商发票页汇总
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceSummary {
    pub invoice_count: usize,
    #[serde(serialize_with = "as_number")]
    pub total_amount: BigDecimal,
    pub companies: Vec<CompanyTotal>,
}

fn as_number<S: Serializer>(value: &BigDecimal, serializer: S) -> Result<S::Ok, S::Error> {
    // 经十进制字符串转换, 保证 5.00 -> 5.0, 365.80 -> 365.8
    match value.to_string().parse::<f64>() {
        Ok(n) => serializer.serialize_f64(n),
        Err(_) => serializer.collect_str(value),
    }
}
