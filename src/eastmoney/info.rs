//! 證券基本資料（push2 stock/get 與 datacenter 可轉債報表）。

use concat_string::concat_string;

use crate::error::Result;
use crate::extract;
use crate::net::Session;
use crate::record::RecordSet;

use super::{fields, quote_headers, HOST_DATACENTER, HOST_PUSH2};

const UT_TOKEN: &str = "fa5fd1943c7b386f172d6893dbfba10b";

fn field_keys(table: fields::FieldTable) -> String {
    table
        .iter()
        .map(|(key, _)| *key)
        .collect::<Vec<_>>()
        .join(",")
}

/// 單一證券的基本資料，一列。
pub(crate) async fn base_info(session: &Session, quote_id: &str) -> Result<RecordSet> {
    let url = concat_string!(HOST_PUSH2, "/api/qt/stock/get");
    let query = [
        ("ut", UT_TOKEN.to_string()),
        ("invt", "2".to_string()),
        ("fltt", "2".to_string()),
        ("fields", field_keys(fields::BASE_INFO)),
        ("secid", quote_id.to_string()),
    ];

    let payload = session
        .get_json(&url, Some(quote_headers()), &query)
        .await?;

    extract::single_object(&payload, "data", fields::BASE_INFO, "base info")
}

/// 單一可轉債的報表列。查無資料時回空表。
pub(crate) async fn bond_base_info(session: &Session, bond_code: &str) -> Result<RecordSet> {
    let query = [
        ("reportName", "RPT_BOND_CB_LIST".to_string()),
        ("columns", "ALL".to_string()),
        ("source", "WEB".to_string()),
        ("client", "WEB".to_string()),
        (
            "filter",
            concat_string!("(SECURITY_CODE=\"", bond_code, "\")"),
        ),
    ];

    let payload = fetch_bond_report(session, &query).await?;
    parse_bond_report(&payload)
}

/// 全部可轉債報表，逐頁抓到上游回空為止。
pub(crate) async fn bond_all_base_info(session: &Session) -> Result<RecordSet> {
    let mut all = RecordSet::with_columns(fields::BOND_BASE_INFO.iter().map(|(_, name)| *name));
    let mut page: u32 = 1;

    loop {
        let query = [
            ("sortColumns", "SECURITY_CODE".to_string()),
            ("sortTypes", "-1".to_string()),
            ("pageSize", "500".to_string()),
            ("pageNumber", page.to_string()),
            ("reportName", "RPT_BOND_CB_LIST".to_string()),
            ("columns", "ALL".to_string()),
            ("source", "WEB".to_string()),
            ("client", "WEB".to_string()),
        ];

        let payload = fetch_bond_report(session, &query).await?;
        let set = parse_bond_report(&payload)?;
        if set.is_empty() {
            break;
        }
        all.extend(set);
        page += 1;
    }

    Ok(all)
}

async fn fetch_bond_report(
    session: &Session,
    query: &[(&str, String)],
) -> Result<serde_json::Value> {
    let url = concat_string!(HOST_DATACENTER, "/api/data/v1/get");
    session.get_json(&url, Some(quote_headers()), query).await
}

fn parse_bond_report(payload: &serde_json::Value) -> Result<RecordSet> {
    // 查無資料時整個 result 是 null，不是 result.data
    if payload.get("result").map(|r| r.is_null()).unwrap_or(false) {
        return Ok(RecordSet::with_columns(
            fields::BOND_BASE_INFO.iter().map(|(_, name)| *name),
        ));
    }

    extract::rows_of_objects(payload, "result.data", fields::BOND_BASE_INFO, "bond report")
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::record::Value;

    use super::*;

    #[test]
    fn test_parse_bond_report() {
        let payload = json!({
            "result": {
                "data": [
                    {
                        "SECURITY_CODE": "123111",
                        "SECURITY_NAME_ABBR": "东财转3",
                        "CONVERT_STOCK_CODE": "300059",
                        "SECURITY_SHORT_NAME": "东方财富",
                        "RATING": "AA+",
                        "ACTUAL_ISSUE_SCALE": 158.0,
                        "BOND_EXPIRE": "6"
                    }
                ]
            }
        });
        let set = parse_bond_report(&payload).unwrap();
        assert_eq!(set.len(), 1);
        assert_eq!(
            set.get(0, "债券代码"),
            Some(&Value::Text("123111".to_string()))
        );
        assert_eq!(
            set.get(0, "正股代码"),
            Some(&Value::Text("300059".to_string()))
        );
        assert_eq!(
            set.get(0, "债券评级"),
            Some(&Value::Text("AA+".to_string()))
        );
        assert_eq!(set.get(0, "上市日期"), Some(&Value::Null));
    }

    #[test]
    fn test_parse_bond_report_no_result() {
        let payload = json!({"result": null});
        let set = parse_bond_report(&payload).unwrap();
        assert!(set.is_empty());
        assert_eq!(set.columns().len(), fields::BOND_BASE_INFO.len());
    }
}
