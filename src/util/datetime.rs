use chrono::NaiveDate;

use crate::error::{Error, Result};

const COMPACT_FORMAT: &str = "%Y%m%d";

/// 將 `NaiveDate` 轉成上游要的 `yyyyMMdd`。
pub(crate) fn to_compact(date: NaiveDate) -> String {
    date.format(COMPACT_FORMAT).to_string()
}

/// 解析 `yyyy-MM-dd` 或 `yyyyMMdd`。
pub(crate) fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(s, COMPACT_FORMAT))
        .map_err(|why| Error::parse("date", format!("'{}' is not a date: {}", s, why)))
}
