use crate::models::StorageInvoice;
use bigdecimal::BigDecimal;
use csv::Writer;

const HEADER: [&str; 12] = [
    "Invoice Number",
    "Company",
    "Item",
    "Quantity",
    "Storage Type",
    "Days Stored",
    "Storage Rate",
    "Storage Cost",
    "Handling Fee",
    "Subtotal",
    "Tax",
    "Total",
];

/// 金额列加 "$" 前缀
fn currency(val: &BigDecimal) -> String {
    format!("${}", val)
}

/// 导出发票列表为 CSV (含表头)
pub fn write_invoices(invoices: &[StorageInvoice]) -> Result<Vec<u8>, csv::Error> {
    let mut writer = Writer::from_writer(Vec::new());
    writer.write_record(HEADER)?;

    for invoice in invoices {
        writer.write_record(&[
            invoice.invoice_number.clone(),
            invoice.company_name.clone(),
            invoice.item.clone(),
            invoice.quantity.to_string(),
            invoice.storage_type.clone(),
            invoice.days_stored.to_string(),
            currency(&invoice.storage_rate),
            currency(&invoice.storage_cost),
            currency(&invoice.handling_fee),
            currency(&invoice.subtotal),
            currency(&invoice.tax),
            currency(&invoice.total),
        ])?;
    }

    writer.flush()?;
    writer
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))
}
