//! 前十大流通股東（emh5 股本股東 API，POST JSON）。

use concat_string::concat_string;
use serde_json::json;

use crate::error::Result;
use crate::extract;
use crate::net::Session;
use crate::record::{RecordSet, Value};

use super::{code_of, fields, HOST_EMH5};

/// 組出股本股東 API 的 `fc` 參數：深市代碼加 `02`，滬市加 `01`。
pub(crate) fn gen_fc(quote_id: &str) -> String {
    let code = code_of(quote_id);
    if quote_id.starts_with("0.") {
        concat_string!(code, "02")
    } else {
        concat_string!(code, "01")
    }
}

/// 股東資訊的公開報告期清單，新的在前。
pub(crate) async fn report_dates(session: &Session, fc: &str) -> Result<Vec<String>> {
    let url = concat_string!(HOST_EMH5, "/api/GuBenGuDong/GetFirstRequest2Data");
    let payload = session.post_json(&url, None, &json!({ "fc": fc })).await?;

    Ok(extract::collect_strings(&payload, "BaoGaoQi"))
}

/// 取最近 `top` 期的前十大流通股東，各期串在同一張表。
pub(crate) async fn top10_holders(
    session: &Session,
    quote_id: &str,
    top: usize,
) -> Result<RecordSet> {
    let fc = gen_fc(quote_id);
    let code = code_of(quote_id).to_string();
    let dates = report_dates(session, &fc).await?;

    let mut all = RecordSet::default();
    let url = concat_string!(HOST_EMH5, "/api/GuBenGuDong/GetShiDaLiuTongGuDong");
    for date in dates.iter().take(top) {
        let payload = session
            .post_json(&url, None, &json!({ "fc": fc, "BaoGaoQi": date }))
            .await?;
        let mut set = extract::rows_of_objects(
            &payload,
            "..ShiDaLiuTongGuDongList",
            fields::HOLDER,
            "top10 holders",
        )?;
        if set.is_empty() {
            continue;
        }
        set.insert_column(0, "更新日期", Value::Text(date.clone()));
        set.insert_column(0, "股票代码", Value::Text(code.clone()));
        all.extend(set);
    }

    if all.columns().is_empty() {
        let mut columns = vec!["股票代码", "更新日期"];
        columns.extend(fields::HOLDER.iter().map(|(_, name)| *name));
        return Ok(RecordSet::with_columns(columns));
    }

    Ok(all)
}
