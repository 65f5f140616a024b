//! 仓储费用计算 (所有页面共用的唯一实现)
//!
//! 计算步骤:
//! 1. 存储天数 = max(1, ceil((提货时间 - 入库时间) / 1天))
//! 2. 单价 = 费率表[存储类型], 未知或缺失时按 Ambient
//! 3. 存储费 = 数量 × 单价 × 天数            (先舍入到分)
//! 4. 装卸费 = 数量 × 0.50                   (先舍入到分)
//! 5. 小计 = 舍入后的存储费 + 舍入后的装卸费
//! 6. 税额 = 小计 × 18%                      (舍入到分)
//! 7. 合计 = 小计 + 税额
//!
//! 每一步都先舍入再参与下一步累加, 与页面上逐项 toFixed(2) 后再相加的结果逐分一致.

use crate::error::InvoiceError;
use crate::models::{PickupRecord, RawTimestamp, StorageInvoice, StorageType};
use bigdecimal::{BigDecimal, Zero};
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};

const MILLIS_PER_DAY: i64 = 86_400_000;
const MONEY_SCALE: i64 = 2;

/// 每件装卸费 0.50
fn handling_fee_per_unit() -> BigDecimal {
    BigDecimal::new(50i64.into(), 2)
}

/// 税率 18%
fn tax_rate() -> BigDecimal {
    BigDecimal::new(18i64.into(), 2)
}

/// 计算单条记录的仓储发票
pub fn calculate(pickup: &PickupRecord) -> Result<StorageInvoice, InvoiceError> {
    let created_at = parse_field(pickup, "createdAt", pickup.created_at.as_ref())?;
    let pickup_date = parse_field(pickup, "pickupDate", pickup.pickup_date.as_ref())?;
    let days_stored = days_stored(created_at, pickup_date);

    let storage_type = resolve_storage_label(pickup.storage_type.as_deref());
    let storage_rate = StorageType::from_label(&storage_type)
        .unwrap_or_default()
        .rate();

    let quantity = &pickup.quantity;
    let storage_cost = round_money(&(quantity * &storage_rate * BigDecimal::from(days_stored)));
    let handling_fee = round_money(&(quantity * &handling_fee_per_unit()));
    let subtotal = round_money(&(&storage_cost + &handling_fee));
    let tax = round_money(&(&subtotal * &tax_rate()));
    let total = round_money(&(&subtotal + &tax));

    tracing::debug!(
        "pickup {}: {} 天, 类型 {}, 单价 {}, 合计 {}",
        pickup.id, days_stored, storage_type, storage_rate, total
    );

    Ok(StorageInvoice {
        invoice_number: invoice_number(&pickup.id),
        pickup_id: pickup.id.clone(),
        company_name: pickup.company_name.clone(),
        item: pickup.item.clone(),
        quantity: quantity.clone(),
        storage_type,
        days_stored,
        storage_rate: storage_rate.with_scale(MONEY_SCALE),
        storage_cost,
        handling_fee,
        subtotal,
        tax,
        total,
    })
}

/// 发票号: "INV-" + id 前 8 个字符 (大写)
pub fn invoice_number(id: &str) -> String {
    let prefix: String = id.chars().take(8).collect();
    format!("INV-{}", prefix.to_uppercase())
}

/// 存储天数, 至少 1 天 (同一时刻或提货早于入库都按 1 天计)
pub fn days_stored(created_at: DateTime<Utc>, pickup_date: DateTime<Utc>) -> i64 {
    let millis = (pickup_date - created_at).num_milliseconds();
    let mut days = millis / MILLIS_PER_DAY;
    if millis % MILLIS_PER_DAY > 0 {
        days += 1;
    }
    days.max(1)
}

/// 舍入到分, 0.5 远离零进位 (与 toFixed(2) 的十进制语义一致)
pub fn round_money(value: &BigDecimal) -> BigDecimal {
    // with_scale 截断 (向零), 再根据被截掉的部分决定是否进位
    let truncated = value.with_scale(MONEY_SCALE);
    let remainder = (value - &truncated).abs();
    let half_cent = BigDecimal::new(5i64.into(), MONEY_SCALE + 1);
    if remainder < half_cent {
        return truncated;
    }
    let cent = BigDecimal::new(1i64.into(), MONEY_SCALE);
    if *value < BigDecimal::zero() {
        (truncated - cent).with_scale(MONEY_SCALE)
    } else {
        (truncated + cent).with_scale(MONEY_SCALE)
    }
}

/// 缺失或空字符串按 Ambient; 未知标签原样保留 (单价按 Ambient)
fn resolve_storage_label(label: Option<&str>) -> String {
    match label {
        Some(s) if !s.is_empty() => s.to_string(),
        _ => StorageType::default().label().to_string(),
    }
}

fn parse_field(
    pickup: &PickupRecord,
    field: &'static str,
    raw: Option<&RawTimestamp>,
) -> Result<DateTime<Utc>, InvoiceError> {
    let raw = raw.ok_or_else(|| InvoiceError::MissingTimestamp {
        pickup_id: pickup.id.clone(),
        field,
    })?;
    parse_timestamp(raw).ok_or_else(|| InvoiceError::InvalidTimestamp {
        pickup_id: pickup.id.clone(),
        field,
        value: raw.to_string(),
    })
}

/// 解析时间戳; 不带时区的格式按 UTC 处理, 小数毫秒截断到整数毫秒
pub fn parse_timestamp(raw: &RawTimestamp) -> Option<DateTime<Utc>> {
    match raw {
        RawTimestamp::Millis(ms) => Utc.timestamp_millis_opt(*ms).single(),
        RawTimestamp::FractionalMillis(ms) => {
            if !ms.is_finite() || ms.abs() >= i64::MAX as f64 {
                return None;
            }
            Utc.timestamp_millis_opt(ms.trunc() as i64).single()
        }
        RawTimestamp::Text(text) => parse_text(text.trim()),
    }
}

const OFFSET_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M%z",
    "%Y-%m-%dT%H:%M%:z",
];

const NAIVE_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

fn parse_text(text: &str) -> Option<DateTime<Utc>> {
    if text.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }

    // "Z" 统一换成 +00:00, 兼容省略秒或不带冒号的偏移
    let with_offset = match text.strip_suffix('Z').or_else(|| text.strip_suffix('z')) {
        Some(head) => format!("{}+00:00", head),
        None => text.to_string(),
    };
    for fmt in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(&with_offset, fmt) {
            return Some(dt.with_timezone(&Utc));
        }
    }

    for fmt in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, fmt) {
            return Some(naive.and_utc());
        }
    }

    // 仅日期: YYYY-MM-DD, YYYY-MM, YYYY
    let date_text = match text.len() {
        4 => format!("{}-01-01", text),
        7 => format!("{}-01", text),
        _ => text.to_string(),
    };
    NaiveDate::parse_from_str(&date_text, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> BigDecimal {
        BigDecimal::from_str(s).unwrap()
    }

    fn at(s: &str) -> DateTime<Utc> {
        parse_timestamp(&RawTimestamp::Text(s.to_string())).unwrap()
    }

    #[test]
    fn round_money_half_away_from_zero() {
        assert_eq!(round_money(&dec("0.025")).to_string(), "0.03");
        assert_eq!(round_money(&dec("0.0249")).to_string(), "0.02");
        assert_eq!(round_money(&dec("-0.025")).to_string(), "-0.03");
        assert_eq!(round_money(&dec("27.9")).to_string(), "27.90");
        assert_eq!(round_money(&dec("150")).to_string(), "150.00");
        assert_eq!(round_money(&dec("0.995")).to_string(), "1.00");
    }

    #[test]
    fn days_round_up_partial_days() {
        assert_eq!(days_stored(at("2025-01-01T00:00:00Z"), at("2025-01-04T00:00:00Z")), 3);
        assert_eq!(days_stored(at("2025-01-01T00:00:00Z"), at("2025-01-04T00:00:01Z")), 4);
        assert_eq!(days_stored(at("2025-01-01T08:00:00Z"), at("2025-01-01T09:00:00Z")), 1);
    }

    #[test]
    fn days_floor_at_one() {
        let t = at("2025-03-10T12:00:00Z");
        assert_eq!(days_stored(t, t), 1);
        assert_eq!(days_stored(at("2025-03-10T00:00:00Z"), at("2025-03-01T00:00:00Z")), 1);
    }

    #[test]
    fn parses_supported_timestamp_shapes() {
        let expected = at("2025-01-04T00:00:00Z");
        for text in [
            "2025-01-04T00:00:00.000Z",
            "2025-01-04T02:00:00+02:00",
            "2025-01-04T00:00:00",
            "2025-01-04 00:00:00",
            "2025-01-04",
            "2025-01-04T00:00Z",
            "2025-01-04T00:00:00.000+0000",
            "2025-01-04T05:30+05:30",
        ] {
            assert_eq!(parse_timestamp(&RawTimestamp::Text(text.to_string())), Some(expected), "{}", text);
        }
        assert_eq!(
            parse_timestamp(&RawTimestamp::Millis(expected.timestamp_millis())),
            Some(expected)
        );
        assert_eq!(
            parse_timestamp(&RawTimestamp::FractionalMillis(expected.timestamp_millis() as f64 + 0.75)),
            Some(expected)
        );
    }

    #[test]
    fn year_month_and_year_only_dates() {
        assert_eq!(parse_timestamp(&RawTimestamp::Text("2025-01".to_string())), Some(at("2025-01-01T00:00:00Z")));
        assert_eq!(parse_timestamp(&RawTimestamp::Text("2025".to_string())), Some(at("2025-01-01T00:00:00Z")));
    }

    #[test]
    fn rejects_non_finite_millis() {
        assert_eq!(parse_timestamp(&RawTimestamp::FractionalMillis(f64::NAN)), None);
        assert_eq!(parse_timestamp(&RawTimestamp::FractionalMillis(f64::INFINITY)), None);
    }

    #[test]
    fn rejects_garbage_timestamps() {
        for text in ["", "not a date", "2025-13-01", "04/01/2025", "2025-13", "abcd"] {
            assert_eq!(parse_timestamp(&RawTimestamp::Text(text.to_string())), None, "{}", text);
        }
    }

    #[test]
    fn invoice_number_uses_first_eight_chars() {
        assert_eq!(invoice_number("a1b2c3d4e5f6"), "INV-A1B2C3D4");
        assert_eq!(invoice_number("abc"), "INV-ABC");
    }

    #[test]
    fn empty_storage_type_defaults_to_ambient() {
        assert_eq!(resolve_storage_label(Some("")), "Ambient");
        assert_eq!(resolve_storage_label(None), "Ambient");
        assert_eq!(resolve_storage_label(Some("Unknown")), "Unknown");
    }
}
