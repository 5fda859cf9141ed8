use std::{collections::HashSet, str::FromStr};

use rust_decimal::Decimal;

const NUMBER_ESCAPE_CHAR: &[char] = &['%', ',', ' ', '"', '\n'];

/// 盡力將字串轉成 `Decimal`，容忍千分位逗號與百分比符號。
///
/// 轉不動就回 `None`，由呼叫端決定要保留原字串還是視為缺值。
pub fn to_decimal(s: &str) -> Option<Decimal> {
    let cleaned = clean_escape_chars(s, None);
    if cleaned.is_empty() {
        return None;
    }
    Decimal::from_str(&cleaned).ok()
}

/// 移除字串中的逸脫字元（預設集合加上呼叫端指定者）。
pub(crate) fn clean_escape_chars(s: &str, escape_chars: Option<Vec<char>>) -> String {
    let mut combined: Vec<char> = NUMBER_ESCAPE_CHAR.to_vec();
    if let Some(ec) = escape_chars {
        combined.extend(ec);
    }

    let filters = combined.iter().collect::<HashSet<_>>();
    s.chars().filter(|c| !filters.contains(c)).collect()
}
