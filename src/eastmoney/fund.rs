//! 基金端點（fundmobapi 與天天基金排行榜）。

use concat_string::concat_string;
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::header;

use crate::error::Result;
use crate::extract;
use crate::net::Session;
use crate::record::{RecordSet, Value};

use super::{fields, fund_headers, HOST_FUND_MOB, HOST_FUND_RANK};

const DEVICE_ID: &str = "3EA024C2-7F22-408B-95E4-383D38160FB3";

/// 排行榜回應是 JS 片段，基金列以 `"代码,名称,..."` 內嵌其中。
static RANK_ROW: Lazy<Regex> = Lazy::new(|| Regex::new(r#""(\d{6}),(.*?),"#).expect("rank row pattern"));

fn mob_url(api: &str) -> String {
    concat_string!(HOST_FUND_MOB, "/FundMNewApi/", api)
}

/// 單一基金的歷史淨值，新的在前。
pub(crate) async fn net_value_history(
    session: &Session,
    fund_code: &str,
    page_size: u32,
) -> Result<RecordSet> {
    let query = [
        ("FCODE", fund_code.to_string()),
        ("IsShareNet", "true".to_string()),
        ("MobileKey", "1".to_string()),
        ("appType", "ttjj".to_string()),
        ("appVersion", "6.2.8".to_string()),
        ("cToken", "1".to_string()),
        ("deviceid", "1".to_string()),
        ("pageIndex", "1".to_string()),
        ("pageSize", page_size.to_string()),
        ("plat", "Iphone".to_string()),
        ("product", "EFund".to_string()),
        ("serverVersion", "6.2.8".to_string()),
        ("uToken", "1".to_string()),
        ("userId", "1".to_string()),
        ("version", "6.2.8".to_string()),
    ];

    let payload = session
        .get_json(&mob_url("FundMNHisNetList"), Some(fund_headers()), &query)
        .await?;

    extract::rows_of_objects(&payload, "Datas", fields::FUND_NET_VALUE, "fund net value")
}

/// 多檔基金的即時估算漲跌幅。
pub(crate) async fn realtime_increase_rate(
    session: &Session,
    fund_codes: &[String],
) -> Result<RecordSet> {
    let query = [
        ("pageIndex", "1".to_string()),
        ("pageSize", "300000".to_string()),
        ("Sort", String::new()),
        ("Fcodes", fund_codes.join(",")),
        ("SortColumn", String::new()),
        ("IsShowSE", "false".to_string()),
        ("P", "F".to_string()),
        ("deviceid", DEVICE_ID.to_string()),
        ("plat", "Iphone".to_string()),
        ("product", "EFund".to_string()),
        ("version", "6.2.8".to_string()),
    ];

    let payload = session
        .get_json(&mob_url("FundMNFInfo"), Some(fund_headers()), &query)
        .await?;

    extract::rows_of_objects(&payload, "..Datas", fields::FUND_RATE, "fund rate")
}

/// 天天基金的公募基金名單。`fund_type` 是排行榜的 `ft` 參數
/// （`gp` 股票型、`zq` 債券型、`etf`、`hh` 混合、`zs` 指數、
/// `fof`、`qdii`），`None` 表示全部。
pub(crate) async fn fund_codes(session: &Session, fund_type: Option<&str>) -> Result<RecordSet> {
    let url = concat_string!(HOST_FUND_RANK, "/data/rankhandler.aspx");
    let mut query = vec![
        ("op", "dy".to_string()),
        ("dt", "kf".to_string()),
        ("rs", String::new()),
        ("gs", "0".to_string()),
        ("sc", "qjzf".to_string()),
        ("st", "desc".to_string()),
        ("es", "0".to_string()),
        ("qdii", String::new()),
        ("pi", "1".to_string()),
        ("pn", "50000".to_string()),
        ("dx", "0".to_string()),
    ];
    if let Some(ft) = fund_type {
        query.push(("ft", ft.to_string()));
    }

    let mut headers = header::HeaderMap::new();
    headers.insert(
        header::REFERER,
        header::HeaderValue::from_static("http://fund.eastmoney.com/data/fundranking.html"),
    );

    let body = session.get_text(&url, Some(headers), &query).await?;
    Ok(parse_rank_rows(&body))
}

pub(crate) fn parse_rank_rows(body: &str) -> RecordSet {
    let mut set = RecordSet::with_columns(["基金代码", "基金简称"]);
    for caps in RANK_ROW.captures_iter(body) {
        set.push_row(vec![
            Value::Text(caps[1].to_string()),
            Value::Text(caps[2].to_string()),
        ]);
    }
    set
}

/// 單一基金的基本資料，一列。
pub(crate) async fn base_info(session: &Session, fund_code: &str) -> Result<RecordSet> {
    let query = [
        ("FCODE", fund_code.to_string()),
        ("deviceid", DEVICE_ID.to_string()),
        ("plat", "Iphone".to_string()),
        ("product", "EFund".to_string()),
        ("version", "6.3.8".to_string()),
    ];

    let payload = session
        .get_json(
            &mob_url("FundMNNBasicInformation"),
            Some(fund_headers()),
            &query,
        )
        .await?;

    extract::single_object(&payload, "Datas", fields::FUND_BASE_INFO, "fund base info")
}

/// 指定公開日的持倉占比；`date` 為 `None` 時取最新公開日。
pub(crate) async fn invest_position(
    session: &Session,
    fund_code: &str,
    date: Option<&str>,
) -> Result<RecordSet> {
    let mut query = vec![
        ("FCODE", fund_code.to_string()),
        ("appType", "ttjj".to_string()),
        ("deviceid", DEVICE_ID.to_string()),
        ("plat", "Iphone".to_string()),
        ("product", "EFund".to_string()),
        ("serverVersion", "6.2.8".to_string()),
        ("version", "6.2.8".to_string()),
    ];
    if let Some(d) = date {
        query.push(("DATE", d.to_string()));
    }

    let payload = session
        .get_json(
            &mob_url("FundMNInverstPosition"),
            Some(fund_headers()),
            &query,
        )
        .await?;
    let mut set = extract::rows_of_objects(
        &payload,
        "..fundStocks",
        fields::FUND_POSITION,
        "fund position",
    )?;

    let public_date = extract::locate(&payload, "Expansion")
        .and_then(|v| v.as_str())
        .map(|s| Value::Text(s.to_string()))
        .unwrap_or(Value::Null);
    set.insert_column(0, "基金代码", Value::Text(fund_code.to_string()));
    set.insert_column(set.columns().len(), "公开日期", public_date);

    Ok(set)
}

/// 指定公開日的資產類型占比（股票、債券、現金等），一列。
/// `date` 為 `None` 時取最新公開日。
pub(crate) async fn types_percentage(
    session: &Session,
    fund_code: &str,
    date: Option<&str>,
) -> Result<RecordSet> {
    let mut query = vec![
        ("FCODE", fund_code.to_string()),
        ("OSVersion", "14.3".to_string()),
        ("appVersion", "6.3.8".to_string()),
        ("deviceid", DEVICE_ID.to_string()),
        ("plat", "Iphone".to_string()),
        ("product", "EFund".to_string()),
        ("serverVersion", "6.3.6".to_string()),
        ("version", "6.3.8".to_string()),
    ];
    if let Some(d) = date {
        query.push(("DATE", d.to_string()));
    }

    let payload = session
        .get_json(
            &mob_url("FundMNAssetAllocationNew"),
            Some(fund_headers()),
            &query,
        )
        .await?;

    extract::rows_of_objects(&payload, "Datas", fields::FUND_TYPES, "fund types percentage")
}

/// 指定公開日的行業持倉分布；`date` 為 `None` 時取最新公開日。
pub(crate) async fn industry_distribution(
    session: &Session,
    fund_code: &str,
    date: Option<&str>,
) -> Result<RecordSet> {
    let mut query = vec![
        ("FCODE", fund_code.to_string()),
        ("OSVersion", "14.4".to_string()),
        ("appVersion", "6.3.8".to_string()),
        ("deviceid", DEVICE_ID.to_string()),
        ("plat", "Iphone".to_string()),
        ("product", "EFund".to_string()),
        ("serverVersion", "6.3.6".to_string()),
        ("version", "6.3.8".to_string()),
    ];
    if let Some(d) = date {
        query.push(("DATE", d.to_string()));
    }

    let payload = session
        .get_json(
            &mob_url("FundMNSectorAllocation"),
            Some(fund_headers()),
            &query,
        )
        .await?;

    extract::rows_of_objects(
        &payload,
        "Datas",
        fields::FUND_INDUSTRY,
        "fund industry distribution",
    )
}

/// 持倉公開日期清單，新的在前。
pub(crate) async fn public_dates(session: &Session, fund_code: &str) -> Result<Vec<String>> {
    let query = [
        ("FCODE", fund_code.to_string()),
        ("appVersion", "6.3.8".to_string()),
        ("deviceid", DEVICE_ID.to_string()),
        ("plat", "Iphone".to_string()),
        ("product", "EFund".to_string()),
        ("serverVersion", "6.3.6".to_string()),
        ("version", "6.3.8".to_string()),
    ];

    let payload = session
        .get_json(
            &mob_url("FundMNIVInfoMultiple"),
            Some(fund_headers()),
            &query,
        )
        .await?;

    let dates = match payload.get("Datas") {
        Some(serde_json::Value::Array(items)) => items
            .iter()
            .filter_map(|item| item.as_str().map(String::from))
            .collect(),
        _ => Vec::new(),
    };

    Ok(dates)
}

/// 階段漲跌幅，時間段代號換成中文描述。
pub(crate) async fn period_change(session: &Session, fund_code: &str) -> Result<RecordSet> {
    let query = [
        ("AppVersion", "6.3.8".to_string()),
        ("FCODE", fund_code.to_string()),
        ("MobileKey", DEVICE_ID.to_string()),
        ("OSVersion", "14.3".to_string()),
        ("deviceid", DEVICE_ID.to_string()),
        ("plat", "Iphone".to_string()),
        ("product", "EFund".to_string()),
        ("version", "6.3.6".to_string()),
    ];

    let payload = session
        .get_json(
            &mob_url("FundMNPeriodIncrease"),
            Some(fund_headers()),
            &query,
        )
        .await?;
    let mut set =
        extract::rows_of_objects(&payload, "Datas", fields::FUND_PERIOD, "fund period change")?;

    let titles: Vec<Value> = set
        .rows()
        .iter()
        .map(|row| {
            let code = set
                .column_index("时间段")
                .and_then(|i| row.get(i))
                .and_then(Value::as_str)
                .unwrap_or("");
            Value::Text(period_title(code).to_string())
        })
        .collect();
    set.replace_column("时间段", titles);
    set.insert_column(0, "基金代码", Value::Text(fund_code.to_string()));

    Ok(set)
}

fn period_title(code: &str) -> &str {
    match code {
        "Z" => "近一周",
        "Y" => "近一月",
        "3Y" => "近三月",
        "6Y" => "近六月",
        "1N" => "近一年",
        "2Y" => "近两年",
        "3N" => "近三年",
        "5N" => "近五年",
        "JN" => "今年以来",
        "LN" => "成立以来",
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rank_rows() {
        let body = r#"var rankData = {datas:["003834,华夏能源革新股票,HXNYGXGP,2024-05-30,1.234","005669,前海开源公用事业股票,QHKYGYSYGP,2024-05-30,2.345"],allRecords:2};"#;
        let set = parse_rank_rows(body);
        assert_eq!(set.len(), 2);
        assert_eq!(
            set.get(0, "基金代码"),
            Some(&Value::Text("003834".to_string()))
        );
        assert_eq!(
            set.get(1, "基金简称"),
            Some(&Value::Text("前海开源公用事业股票".to_string()))
        );
    }

    #[test]
    fn test_parse_types_percentage_payload() {
        let payload = serde_json::json!({
            "Datas": [
                {"GP": "94.4", "ZQ": "--", "HB": "6.06", "JZC": "880.157", "QT": "0"}
            ]
        });
        let set = crate::extract::rows_of_objects(
            &payload,
            "Datas",
            fields::FUND_TYPES,
            "fund types percentage",
        )
        .unwrap();

        assert_eq!(set.len(), 1);
        assert_eq!(
            set.get(0, "股票比重"),
            Some(&Value::Number(rust_decimal_macros::dec!(94.4)))
        );
        assert_eq!(set.get(0, "债券比重"), Some(&Value::Null));
    }

    #[test]
    fn test_parse_industry_distribution_payload() {
        let payload = serde_json::json!({
            "Datas": [
                {"HYMC": "制造业", "ZJZBL": "93.07", "FSRQ": "2021-06-30", "SZ": "6492580.019556"},
                {"HYMC": "采矿业", "ZJZBL": "--", "FSRQ": "2021-06-30", "SZ": "--"}
            ]
        });
        let set = crate::extract::rows_of_objects(
            &payload,
            "Datas",
            fields::FUND_INDUSTRY,
            "fund industry distribution",
        )
        .unwrap();

        assert_eq!(set.len(), 2);
        assert_eq!(
            set.get(0, "行业名称"),
            Some(&Value::Text("制造业".to_string()))
        );
        assert_eq!(set.get(1, "持仓比例"), Some(&Value::Null));
    }

    #[test]
    fn test_period_title() {
        assert_eq!(period_title("Z"), "近一周");
        assert_eq!(period_title("LN"), "成立以来");
        assert_eq!(period_title("??"), "??");
    }
}
