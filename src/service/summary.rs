use crate::error::InvoiceError;
use crate::models::{CompanyTotal, InvoiceSummary, PickupRecord, StorageInvoice};
use crate::service::calculator;
use bigdecimal::{BigDecimal, Zero};
use indexmap::IndexMap;
use rayon::prelude::*;

/// 批量计算结果: 成功的发票与失败的记录分开返回, 由调用方决定如何展示
#[derive(Debug, Clone, Default)]
pub struct BatchOutcome {
    pub invoices: Vec<StorageInvoice>,
    pub errors: Vec<InvoiceError>,
}

/// 批量计算 (并行, 结果保持输入顺序)
pub fn calculate_batch(pickups: &[PickupRecord]) -> BatchOutcome {
    let results: Vec<Result<StorageInvoice, InvoiceError>> =
        pickups.par_iter().map(calculator::calculate).collect();

    let mut outcome = BatchOutcome::default();
    for result in results {
        match result {
            Ok(invoice) => outcome.invoices.push(invoice),
            Err(e) => {
                tracing::warn!("跳过无法计费的记录: {}", e);
                outcome.errors.push(e);
            }
        }
    }

    tracing::info!(
        "批量计费完成: {} 条记录, 成功 {}, 失败 {}",
        pickups.len(),
        outcome.invoices.len(),
        outcome.errors.len()
    );
    outcome
}

/// 汇总: 总金额 + 按公司分组 (按首次出现顺序)
pub fn summarize(invoices: &[StorageInvoice]) -> InvoiceSummary {
    let mut by_company: IndexMap<&str, (usize, BigDecimal)> = IndexMap::new();
    let mut total_amount = BigDecimal::zero();

    for invoice in invoices {
        total_amount += &invoice.total;
        let entry = by_company
            .entry(invoice.company_name.as_str())
            .or_insert_with(|| (0, BigDecimal::zero()));
        entry.0 += 1;
        entry.1 += &invoice.total;
    }

    let companies = by_company
        .into_iter()
        .map(|(name, (count, total))| CompanyTotal {
            company_name: name.to_string(),
            invoice_count: count,
            total_amount: total.with_scale(2),
        })
        .collect();

    InvoiceSummary {
        invoice_count: invoices.len(),
        total_amount: total_amount.with_scale(2),
        companies,
    }
}
