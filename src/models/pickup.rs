use bigdecimal::BigDecimal;
use serde::{Deserialize, Deserializer, Serialize};
use std::str::FromStr;

/// 时间戳原始值: 字符串或毫秒时间戳 (整数或小数)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawTimestamp {
    Millis(i64),
    FractionalMillis(f64),
    Text(String),
}

impl std::fmt::Display for RawTimestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RawTimestamp::Millis(ms) => write!(f, "{}", ms),
            RawTimestamp::FractionalMillis(ms) => write!(f, "{}", ms),
            RawTimestamp::Text(s) => f.write_str(s),
        }
    }
}

/// 数量原始值
#[derive(Deserialize)]
#[serde(untagged)]
enum RawQuantity {
    Integer(i64),
    Float(f64),
    Text(String),
}

/// 提货/入库记录 (上游接口返回的JSON, 仅保留计费相关字段)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PickupRecord {
    pub id: String,
    #[serde(default)]
    pub company_name: String,
    #[serde(default)]
    pub item: String,
    #[serde(default = "zero_quantity", deserialize_with = "deserialize_quantity")]
    pub quantity: BigDecimal,
    #[serde(default, alias = "storage_type")]
    pub storage_type: Option<String>,
    #[serde(default)]
    pub created_at: Option<RawTimestamp>,
    #[serde(default)]
    pub pickup_date: Option<RawTimestamp>,

    // 以下字段仅用于展示
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pickup_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_instructions: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supplier: Option<String>,
}

fn zero_quantity() -> BigDecimal {
    BigDecimal::from(0)
}

/// 数量反序列化; 浮点数按最短十进制表示转换 (0.1 -> 0.1, 不带二进制尾数), null 按 0
fn deserialize_quantity<'de, D: Deserializer<'de>>(deserializer: D) -> Result<BigDecimal, D::Error> {
    let raw = Option::<RawQuantity>::deserialize(deserializer)?;
    let text = match raw {
        None => return Ok(zero_quantity()),
        Some(RawQuantity::Integer(n)) => return Ok(BigDecimal::from(n)),
        Some(RawQuantity::Float(n)) => n.to_string(),
        Some(RawQuantity::Text(s)) => s.trim().to_string(),
    };
    BigDecimal::from_str(&text)
        .map_err(|e| serde::de::Error::custom(format!("invalid quantity {:?}: {}", text, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn quantity_of(value: serde_json::Value) -> String {
        let record: PickupRecord = serde_json::from_value(json!({ "id": "q", "quantity": value })).unwrap();
        record.quantity.to_string()
    }

    #[test]
    fn float_quantity_keeps_shortest_form() {
        assert_eq!(quantity_of(json!(0.1)), "0.1");
        assert_eq!(quantity_of(json!(2.75)), "2.75");
        assert_eq!(quantity_of(json!(10)), "10");
        assert_eq!(quantity_of(json!("0.01")), "0.01");
        assert_eq!(quantity_of(json!(null)), "0");
    }

    #[test]
    fn non_numeric_quantity_is_rejected() {
        let result: Result<PickupRecord, _> =
            serde_json::from_value(json!({ "id": "q", "quantity": "lots" }));
        assert!(result.is_err());
    }

    #[test]
    fn fractional_epoch_millis_deserialize() {
        let record: PickupRecord =
            serde_json::from_value(json!({ "id": "t", "createdAt": 1735689600000.5 })).unwrap();
        assert_eq!(record.created_at, Some(RawTimestamp::FractionalMillis(1735689600000.5)));
    }
}
