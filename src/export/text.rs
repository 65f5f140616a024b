use crate::models::StorageInvoice;
use chrono::NaiveDate;

const RULE: &str = "========================================";
const THIN_RULE: &str = "----------------------------------------";

/// 渲染纯文本发票 (开票日期由调用方传入, 渲染本身无副作用)
pub fn render_invoice(invoice: &StorageInvoice, issued_on: NaiveDate) -> String {
    format!(
        "STORAGE INVOICE\n\
         {rule}\n\
         Invoice Number: {number}\n\
         Invoice Date: {date}\n\
         \n\
         Bill To: {company}\n\
         Item: {item}\n\
         Quantity: {quantity}\n\
         Storage Type: {storage_type}\n\
         Days Stored: {days}\n\
         Storage Rate: ${rate} per unit per day\n\
         {thin}\n\
         Storage Cost: ${storage_cost}\n\
         Handling Fee: ${handling_fee}\n\
         Subtotal: ${subtotal}\n\
         Tax (18%): ${tax}\n\
         {thin}\n\
         TOTAL: ${total}\n\
         {rule}\n\
         Thank you for your business!\n",
        rule = RULE,
        thin = THIN_RULE,
        number = invoice.invoice_number,
        date = issued_on.format("%Y-%m-%d"),
        company = invoice.company_name,
        item = invoice.item,
        quantity = invoice.quantity,
        storage_type = invoice.storage_type,
        days = invoice.days_stored,
        rate = invoice.storage_rate,
        storage_cost = invoice.storage_cost,
        handling_fee = invoice.handling_fee,
        subtotal = invoice.subtotal,
        tax = invoice.tax,
        total = invoice.total,
    )
}
