use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

/// 存储类型 (费率表, 每件每天)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StorageType {
    #[default]
    Ambient,
    Refrigerated,
    Frozen,
    #[serde(rename = "Dry Storage")]
    DryStorage,
    Hazardous,
}

impl StorageType {
    pub const ALL: [StorageType; 5] = [
        StorageType::Ambient,
        StorageType::Refrigerated,
        StorageType::Frozen,
        StorageType::DryStorage,
        StorageType::Hazardous,
    ];

    /// 按标签精确匹配 (区分大小写), 未知标签返回 None
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.label() == label)
    }

    pub fn label(self) -> &'static str {
        match self {
            StorageType::Ambient => "Ambient",
            StorageType::Refrigerated => "Refrigerated",
            StorageType::Frozen => "Frozen",
            StorageType::DryStorage => "Dry Storage",
            StorageType::Hazardous => "Hazardous",
        }
    }

    /// 单价: 分为单位, 避免浮点误差
    fn rate_cents(self) -> i64 {
        match self {
            StorageType::Ambient => 250,
            StorageType::Refrigerated => 500,
            StorageType::Frozen => 750,
            StorageType::DryStorage => 200,
            StorageType::Hazardous => 1000,
        }
    }

    pub fn rate(self) -> BigDecimal {
        BigDecimal::new(self.rate_cents().into(), 2)
    }
}

impl std::fmt::Display for StorageType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn rate_table_matches_price_list() {
        let expected = [
            ("Ambient", "2.50"),
            ("Refrigerated", "5.00"),
            ("Frozen", "7.50"),
            ("Dry Storage", "2.00"),
            ("Hazardous", "10.00"),
        ];
        for (label, rate) in expected {
            let t = StorageType::from_label(label).unwrap();
            assert_eq!(t.rate(), BigDecimal::from_str(rate).unwrap());
            assert_eq!(t.label(), label);
        }
    }

    #[test]
    fn default_is_ambient() {
        assert_eq!(StorageType::default(), StorageType::Ambient);
        assert_eq!(StorageType::default().rate(), BigDecimal::from_str("2.50").unwrap());
    }

    #[test]
    fn label_lookup_is_case_sensitive() {
        assert_eq!(StorageType::from_label("frozen"), None);
        assert_eq!(StorageType::from_label("DryStorage"), None);
        assert_eq!(StorageType::from_label("Unknown"), None);
    }
}
