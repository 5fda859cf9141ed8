//! 跨模組共用的宣告：K 線週期、復權方式、歷史查詢選項。

use chrono::NaiveDate;

use crate::error::{Error, Result};
use crate::util::datetime;

/// 歷史行情起迄預設值，對應上游允許的最早與最晚日期參數。
pub(crate) const DEFAULT_BEGIN: &str = "19000101";
pub(crate) const DEFAULT_END: &str = "20500101";

/// K 線週期，值即上游 `klt` 參數。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interval {
    Minute1,
    Minute5,
    Minute15,
    Minute30,
    Minute60,
    Daily,
    Weekly,
    Monthly,
}

impl Interval {
    pub(crate) fn klt(&self) -> u32 {
        match self {
            Interval::Minute1 => 1,
            Interval::Minute5 => 5,
            Interval::Minute15 => 15,
            Interval::Minute30 => 30,
            Interval::Minute60 => 60,
            Interval::Daily => 101,
            Interval::Weekly => 102,
            Interval::Monthly => 103,
        }
    }
}

impl Default for Interval {
    fn default() -> Self {
        Interval::Daily
    }
}

/// 復權方式，值即上游 `fqt` 參數。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Adjust {
    None,
    #[default]
    Forward,
    Backward,
}

impl Adjust {
    pub(crate) fn fqt(&self) -> u32 {
        match self {
            Adjust::None => 0,
            Adjust::Forward => 1,
            Adjust::Backward => 2,
        }
    }
}

/// 歷史行情查詢選項。
///
/// `begin` / `end` 留空表示不設界；`quote_id_mode` 表示傳入的識別字
/// 已是 `市場編號.代碼` 形式，跳過搜尋解析。
#[derive(Debug, Clone, Default)]
pub struct HistoryOptions {
    pub begin: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub interval: Interval,
    pub adjust: Adjust,
    pub quote_id_mode: bool,
}

impl HistoryOptions {
    /// 在 facade 邊界檢查選項，通過後才會發出請求。
    pub(crate) fn validate(&self) -> Result<()> {
        if let (Some(begin), Some(end)) = (self.begin, self.end) {
            if begin > end {
                return Err(Error::InvalidOption(format!(
                    "begin {} is after end {}",
                    begin, end
                )));
            }
        }
        Ok(())
    }

    pub(crate) fn beg_param(&self) -> String {
        self.begin
            .map(datetime::to_compact)
            .unwrap_or_else(|| DEFAULT_BEGIN.to_string())
    }

    pub(crate) fn end_param(&self) -> String {
        self.end
            .map(datetime::to_compact)
            .unwrap_or_else(|| DEFAULT_END.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_klt() {
        assert_eq!(Interval::Minute5.klt(), 5);
        assert_eq!(Interval::Daily.klt(), 101);
        assert_eq!(Interval::Monthly.klt(), 103);
    }

    #[test]
    fn test_options_validate() {
        let ok = HistoryOptions {
            begin: NaiveDate::from_ymd_opt(2024, 1, 1),
            end: NaiveDate::from_ymd_opt(2024, 6, 30),
            ..Default::default()
        };
        assert!(ok.validate().is_ok());

        let inverted = HistoryOptions {
            begin: NaiveDate::from_ymd_opt(2024, 6, 30),
            end: NaiveDate::from_ymd_opt(2024, 1, 1),
            ..Default::default()
        };
        assert!(matches!(
            inverted.validate(),
            Err(Error::InvalidOption(_))
        ));
    }

    #[test]
    fn test_date_params() {
        let opts = HistoryOptions::default();
        assert_eq!(opts.beg_param(), "19000101");
        assert_eq!(opts.end_param(), "20500101");

        let bounded = HistoryOptions {
            begin: NaiveDate::from_ymd_opt(2023, 7, 1),
            end: NaiveDate::from_ymd_opt(2023, 12, 31),
            ..Default::default()
        };
        assert_eq!(bounded.beg_param(), "20230701");
        assert_eq!(bounded.end_param(), "20231231");
    }
}
