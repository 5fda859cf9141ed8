//! K 線與分鐘走勢（push2his kline / trends2）。

use concat_string::concat_string;

use crate::declare::HistoryOptions;
use crate::error::Result;
use crate::extract;
use crate::net::Session;
use crate::record::{RecordSet, Value};

use super::{code_of, fields, quote_headers, HOST_PUSH2HIS};

const FIELDS1: &str = "f1,f2,f3,f4,f5,f6,f7,f8,f9,f10,f11,f12,f13";

fn field_keys(table: fields::FieldTable) -> String {
    table
        .iter()
        .map(|(key, _)| *key)
        .collect::<Vec<_>>()
        .join(",")
}

/// 依選項拉一檔證券的 K 線，表前補上名稱與代碼兩欄。
pub(crate) async fn history(
    session: &Session,
    quote_id: &str,
    opts: &HistoryOptions,
) -> Result<RecordSet> {
    let url = concat_string!(HOST_PUSH2HIS, "/api/qt/stock/kline/get");
    let query = [
        ("fields1", FIELDS1.to_string()),
        ("fields2", field_keys(fields::KLINE)),
        ("beg", opts.beg_param()),
        ("end", opts.end_param()),
        ("rtntype", "6".to_string()),
        ("secid", quote_id.to_string()),
        ("klt", opts.interval.klt().to_string()),
        ("fqt", opts.adjust.fqt().to_string()),
    ];

    let payload = session
        .get_json(&url, Some(quote_headers()), &query)
        .await?;
    let mut set = extract::rows_of_csv(&payload, "..klines", fields::KLINE, "kline")?;
    prepend_identity(&mut set, &payload, quote_id);

    Ok(set)
}

/// 最近 `ndays` 天的 1 分鐘走勢。
pub(crate) async fn minute(
    session: &Session,
    quote_id: &str,
    ndays: u8,
) -> Result<RecordSet> {
    let url = concat_string!(HOST_PUSH2HIS, "/api/qt/stock/trends2/get");
    let query = [
        ("fields1", FIELDS1.to_string()),
        ("fields2", field_keys(fields::KLINE_NDAYS)),
        ("ndays", ndays.to_string()),
        ("iscr", "0".to_string()),
        ("iscca", "0".to_string()),
        ("secid", quote_id.to_string()),
    ];

    let payload = session
        .get_json(&url, Some(quote_headers()), &query)
        .await?;
    let mut set = extract::rows_of_csv(&payload, "..trends", fields::KLINE_NDAYS, "minute kline")?;
    prepend_identity(&mut set, &payload, quote_id);

    Ok(set)
}

/// 表前插入 `名称`、`代码` 兩欄，名稱取自回應本身。
pub(crate) fn prepend_identity(set: &mut RecordSet, payload: &serde_json::Value, quote_id: &str) {
    let name = extract::locate(payload, "..name")
        .and_then(|v| v.as_str())
        .map(|s| Value::Text(s.to_string()))
        .unwrap_or(Value::Null);
    set.insert_column(0, "代码", Value::Text(code_of(quote_id).to_string()));
    set.insert_column(0, "名称", name);
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_prepend_identity() {
        let payload = json!({
            "data": {
                "code": "600519",
                "name": "贵州茅台",
                "klines": ["2024-01-02,1685.00,1697.50,1702.00,1680.11,40000,67890000.0,1.3,0.74,12.5,0.32"]
            }
        });
        let mut set =
            extract::rows_of_csv(&payload, "..klines", fields::KLINE, "kline").unwrap();
        prepend_identity(&mut set, &payload, "1.600519");

        assert_eq!(set.columns()[0], "名称");
        assert_eq!(set.columns()[1], "代码");
        assert_eq!(set.get(0, "名称"), Some(&Value::Text("贵州茅台".to_string())));
        assert_eq!(set.get(0, "代码"), Some(&Value::Text("600519".to_string())));
        assert_eq!(set.get(0, "收盘"), Some(&Value::Number(dec!(1697.50))));
    }
}
