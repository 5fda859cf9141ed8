//! 行情榜單與最新報價（push2 clist / ulist.np）。

use chrono::{Local, TimeZone};
use concat_string::concat_string;

use crate::error::Result;
use crate::extract;
use crate::net::Session;
use crate::record::{RecordSet, Value};
use crate::registry::MarketRegistry;
use crate::util::datetime;

use super::{fields, quote_headers, HOST_PUSH2};

fn field_keys(table: fields::FieldTable) -> String {
    table
        .iter()
        .map(|(key, _)| *key)
        .collect::<Vec<_>>()
        .join(",")
}

/// 以 `fs` 篩選式拉整個市場的即時行情。
/// 後處理交給 [`decorate`]，呼叫端才拿得到市場設定表。
pub(crate) async fn realtime_by_fs(session: &Session, fs: &str) -> Result<RecordSet> {
    let url = concat_string!(HOST_PUSH2, "/api/qt/clist/get");
    let query = [
        ("pn", "1".to_string()),
        ("pz", "1000000".to_string()),
        ("po", "1".to_string()),
        ("np", "1".to_string()),
        ("fltt", "2".to_string()),
        ("invt", "2".to_string()),
        ("fid", "f3".to_string()),
        ("fs", fs.to_string()),
        ("fields", field_keys(fields::QUOTE)),
    ];

    let payload = session
        .get_json(&url, Some(quote_headers()), &query)
        .await?;

    extract::rows_of_objects(&payload, "data.diff", fields::QUOTE, "quote list")
}

/// 依行情ID清單拉最新報價。
pub(crate) async fn latest_by_quote_ids(
    session: &Session,
    quote_ids: &[String],
) -> Result<RecordSet> {
    let url = concat_string!(HOST_PUSH2, "/api/qt/ulist.np/get");
    let query = [
        ("OSVersion", "14.3".to_string()),
        ("appVersion", "6.3.8".to_string()),
        ("fields", field_keys(fields::QUOTE)),
        ("fltt", "2".to_string()),
        ("plat", "Iphone".to_string()),
        ("product", "EFund".to_string()),
        ("secids", quote_ids.join(",")),
        ("serverVersion", "6.3.6".to_string()),
        ("version", "6.3.8".to_string()),
    ];

    let payload = session
        .get_json(&url, Some(quote_headers()), &query)
        .await?;

    extract::rows_of_objects(&payload, "..diff", fields::QUOTE, "latest quotes")
}

/// 榜單共同的後處理：補行情ID與市場類型，把時間戳換成可讀時間，
/// 並將最新交易日移到表尾。
pub(crate) fn decorate(set: &mut RecordSet, registry: &MarketRegistry) {
    let quote_ids: Vec<Value> = (0..set.len())
        .map(|i| {
            match (
                set.get(i, "市场编号").and_then(Value::as_str),
                set.get(i, "代码").and_then(Value::as_str),
            ) {
                (Some(market), Some(code)) => Value::Text(concat_string!(market, ".", code)),
                _ => Value::Null,
            }
        })
        .collect();
    set.append_column("行情ID", quote_ids);

    let market_types: Vec<Value> = (0..set.len())
        .map(|i| {
            set.get(i, "市场编号")
                .and_then(Value::as_str)
                .and_then(|number| registry.market_name(number))
                .map(|name| Value::Text(name.to_string()))
                .unwrap_or(Value::Null)
        })
        .collect();
    set.append_column("市场类型", market_types);

    let update_times: Vec<Value> = (0..set.len())
        .map(|i| match set.get(i, "更新时间戳") {
            Some(Value::Number(ts)) => {
                let secs: i64 = ts.trunc().try_into().unwrap_or(0);
                match Local.timestamp_opt(secs, 0) {
                    chrono::LocalResult::Single(at) => {
                        Value::Text(at.format("%Y-%m-%d %H:%M:%S").to_string())
                    }
                    _ => Value::Null,
                }
            }
            _ => Value::Null,
        })
        .collect();
    set.append_column("更新时间", update_times);
    set.remove_column("更新时间戳");

    let trading_days: Vec<Value> = (0..set.len())
        .map(|i| match set.get(i, "最新交易日") {
            Some(Value::Number(day)) => match datetime::parse_date(&day.trunc().to_string()) {
                Ok(date) => Value::Text(date.format("%Y-%m-%d").to_string()),
                Err(_) => Value::Null,
            },
            Some(Value::Text(s)) => match datetime::parse_date(s) {
                Ok(date) => Value::Text(date.format("%Y-%m-%d").to_string()),
                Err(_) => Value::Null,
            },
            _ => Value::Null,
        })
        .collect();
    set.remove_column("最新交易日");
    set.append_column("最新交易日", trading_days);
}
