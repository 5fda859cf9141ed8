//! 資金流端點（push2his fflow）。

use concat_string::concat_string;

use crate::error::Result;
use crate::extract;
use crate::net::Session;
use crate::record::RecordSet;

use super::{fields, kline::prepend_identity, quote_headers, HOST_PUSH2HIS};

fn field_keys(table: fields::FieldTable) -> String {
    table
        .iter()
        .map(|(key, _)| *key)
        .collect::<Vec<_>>()
        .join(",")
}

/// 歷史（日級）資金流。
pub(crate) async fn history_bill(session: &Session, quote_id: &str) -> Result<RecordSet> {
    let url = concat_string!(HOST_PUSH2HIS, "/api/qt/stock/fflow/daykline/get");
    let query = [
        ("lmt", "100000".to_string()),
        ("klt", "101".to_string()),
        ("secid", quote_id.to_string()),
        ("fields1", "f1,f2,f3,f7".to_string()),
        ("fields2", field_keys(fields::HISTORY_BILL)),
    ];

    let payload = session
        .get_json(&url, Some(quote_headers()), &query)
        .await?;
    let mut set = extract::rows_of_csv(&payload, "..klines", fields::HISTORY_BILL, "history bill")?;
    prepend_identity(&mut set, &payload, quote_id);

    Ok(set)
}

/// 最新交易日的分鐘級資金流。
pub(crate) async fn today_bill(session: &Session, quote_id: &str) -> Result<RecordSet> {
    let url = concat_string!(HOST_PUSH2HIS, "/api/qt/stock/fflow/kline/get");
    let query = [
        ("lmt", "0".to_string()),
        ("klt", "1".to_string()),
        ("secid", quote_id.to_string()),
        ("fields1", "f1,f2,f3,f7".to_string()),
        (
            "fields2",
            "f51,f52,f53,f54,f55,f56,f57,f58,f59,f60,f61,f62,f63".to_string(),
        ),
    ];

    let payload = session
        .get_json(&url, Some(quote_headers()), &query)
        .await?;
    // 上游每列帶滿十三段，輸出只取前六欄
    let mut set = extract::rows_of_csv(&payload, "..klines", fields::TODAY_BILL, "today bill")?;
    prepend_identity(&mut set, &payload, quote_id);

    Ok(set)
}
