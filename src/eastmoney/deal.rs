//! 最新交易日成交明細（push2 details/get）。

use concat_string::concat_string;

use crate::error::Result;
use crate::extract;
use crate::net::Session;
use crate::record::{RecordSet, Value};

use super::{fields, quote_headers, HOST_PUSH2};

/// 成交明細：`时间 / 昨收 / 成交价 / 成交量 / 单数`。
/// 名稱與代碼由上層補，因為這個端點不回它們。
pub(crate) async fn deal_detail(
    session: &Session,
    quote_id: &str,
    max_count: u32,
) -> Result<RecordSet> {
    let url = concat_string!(HOST_PUSH2, "/api/qt/stock/details/get");
    let query = [
        ("secid", quote_id.to_string()),
        ("fields1", "f1,f2,f3,f4,f5".to_string()),
        ("fields2", "f51,f52,f53,f54,f55".to_string()),
        ("pos", concat_string!("-", max_count.to_string())),
    ];

    let payload = session
        .get_json(&url, Some(quote_headers()), &query)
        .await?;
    let mut set =
        extract::rows_of_csv(&payload, "data.details", fields::DEAL_DETAIL, "deal detail")?;

    let pre_price = extract::locate(&payload, "data.prePrice")
        .map(|raw| Value::coerce(raw, false))
        .unwrap_or(Value::Null);
    let index = set.column_index("时间").map(|i| i + 1).unwrap_or(0);
    set.insert_column(index, "昨收", pre_price);

    Ok(set)
}
