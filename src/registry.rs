//! 市場設定表。
//!
//! 把市場代號（`"沪A"`、`"创业板"`、`"bond"`…）對應到上游清單查詢用的
//! `fs` 篩選式，另外持有市場編號與市場名稱的對照表。
//! 建構時載入內建資料列，之後唯讀；要支援新市場只需
//! [`MarketRegistry::add_market`] 加一列，各 facade 不用改。

use hashbrown::HashMap;

use crate::error::{Error, Result};

/// 內建的市場代號對 `fs` 篩選式。
const BUNDLED_SCOPES: &[(&str, &str)] = &[
    ("bond", "b:MK0354"),
    ("可转债", "b:MK0354"),
    ("stock", "m:0 t:6,m:0 t:80,m:1 t:2,m:1 t:23,m:0 t:81 s:2048"),
    ("沪深A股", "m:0 t:6,m:0 t:80,m:1 t:2,m:1 t:23"),
    ("沪深京A股", "m:0 t:6,m:0 t:80,m:1 t:2,m:1 t:23,m:0 t:81 s:2048"),
    ("北证A股", "m:0 t:81 s:2048"),
    ("北A", "m:0 t:81 s:2048"),
    ("futures", "m:113,m:114,m:115,m:8,m:142,m:225"),
    ("期货", "m:113,m:114,m:115,m:8,m:142,m:225"),
    ("上证A股", "m:1 t:2,m:1 t:23"),
    ("沪A", "m:1 t:2,m:1 t:23"),
    ("深证A股", "m:0 t:6,m:0 t:80"),
    ("深A", "m:0 t:6,m:0 t:80"),
    ("新股", "m:0 f:8,m:1 f:8"),
    ("创业板", "m:0 t:80"),
    ("科创板", "m:1 t:23"),
    ("沪股通", "b:BK0707"),
    ("深股通", "b:BK0804"),
    ("风险警示板", "m:0 f:4,m:1 f:4"),
    ("两网及退市", "m:0 s:3"),
    ("地域板块", "m:90 t:1 f:!50"),
    ("行业板块", "m:90 t:2 f:!50"),
    ("概念板块", "m:90 t:3 f:!50"),
    ("上证系列指数", "m:1 s:2"),
    ("深证系列指数", "m:0 t:5"),
    ("沪深系列指数", "m:1 s:2,m:0 t:5"),
    ("ETF", "b:MK0021,b:MK0022,b:MK0023,b:MK0024"),
    ("LOF", "b:MK0404,b:MK0405,b:MK0406,b:MK0407"),
    ("美股", "m:105,m:106,m:107"),
    ("港股", "m:128 t:3,m:128 t:4,m:128 t:1,m:128 t:2"),
    (
        "英股",
        "m:155 t:1,m:155 t:2,m:155 t:3,m:156 t:1,m:156 t:2,m:156 t:5,m:156 t:6,m:156 t:7,m:156 t:8",
    ),
    ("中概股", "b:MK0201"),
    ("中国概念股", "b:MK0201"),
];

/// 市場編號對市場名稱。
const MARKET_NUMBER_NAMES: &[(&str, &str)] = &[
    ("0", "深A"),
    ("1", "沪A"),
    ("105", "美股"),
    ("106", "美股"),
    ("107", "美股"),
    ("116", "港股"),
    ("128", "港股"),
    ("113", "上期所"),
    ("114", "大商所"),
    ("115", "郑商所"),
    ("8", "中金所"),
    ("142", "上海能源期货交易所"),
    ("155", "英股"),
    ("90", "板块"),
    ("225", "广期所"),
];

pub struct MarketRegistry {
    scopes: HashMap<String, String>,
    market_names: HashMap<&'static str, &'static str>,
}

impl MarketRegistry {
    /// 載入內建資料列，不做任何 I/O。
    pub fn new() -> Self {
        MarketRegistry {
            scopes: BUNDLED_SCOPES
                .iter()
                .map(|(qualifier, fs)| (qualifier.to_string(), fs.to_string()))
                .collect(),
            market_names: MARKET_NUMBER_NAMES.iter().copied().collect(),
        }
    }

    /// 市場代號換 `fs` 篩選式。查無此代號回 [`Error::ConfigNotFound`]，
    /// 不會走到請求層。
    pub fn resolve(&self, qualifier: &str) -> Result<&str> {
        self.scopes
            .get(qualifier)
            .map(String::as_str)
            .ok_or_else(|| Error::ConfigNotFound(qualifier.to_string()))
    }

    /// 市場編號換市場名稱（`"1"` -> `"沪A"`）。
    pub fn market_name(&self, number: &str) -> Option<&str> {
        self.market_names.get(number).copied()
    }

    /// 註冊新市場代號。重複註冊以新值覆蓋。
    pub fn add_market(&mut self, qualifier: impl Into<String>, fs: impl Into<String>) {
        self.scopes.insert(qualifier.into(), fs.into());
    }

    pub fn qualifiers(&self) -> impl Iterator<Item = &str> {
        self.scopes.keys().map(String::as_str)
    }
}

impl Default for MarketRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_bundled_qualifier_resolves() {
        let registry = MarketRegistry::new();
        for (qualifier, fs) in BUNDLED_SCOPES {
            assert_eq!(registry.resolve(qualifier).unwrap(), *fs);
        }

        let listed: Vec<&str> = registry.qualifiers().collect();
        assert_eq!(listed.len(), BUNDLED_SCOPES.len());
        assert!(listed.contains(&"沪深A股"));
    }

    #[test]
    fn test_unknown_qualifier() {
        let registry = MarketRegistry::new();
        match registry.resolve("ZZ") {
            Err(Error::ConfigNotFound(q)) => assert_eq!(q, "ZZ"),
            other => panic!("unexpected: {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_add_market() {
        let mut registry = MarketRegistry::new();
        assert!(registry.resolve("新三板精选").is_err());

        registry.add_market("新三板精选", "m:0 t:81 s:2048");
        assert_eq!(registry.resolve("新三板精选").unwrap(), "m:0 t:81 s:2048");
    }

    #[test]
    fn test_market_name() {
        let registry = MarketRegistry::new();
        assert_eq!(registry.market_name("1"), Some("沪A"));
        assert_eq!(registry.market_name("0"), Some("深A"));
        assert_eq!(registry.market_name("999"), None);
    }
}
