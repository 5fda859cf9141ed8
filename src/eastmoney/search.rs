//! 代碼搜尋（searchapi suggest/get）。

use concat_string::concat_string;
use serde::Deserialize;

use crate::error::Result;
use crate::net::Session;

use super::HOST_SEARCH;

const SEARCH_TOKEN: &str = "D43BF722C8E33BDC906FB84D85E326E8";

/// 搜尋端點回的單筆證券資訊，足以組出行情 ID。
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Quote {
    /// 證券代碼
    #[serde(rename = "Code", default)]
    pub code: String,
    /// 證券名稱
    #[serde(rename = "Name", default)]
    pub name: String,
    /// 拼音縮寫
    #[serde(rename = "PinYin", default)]
    pub pinyin: String,
    #[serde(rename = "ID", default)]
    pub id: String,
    #[serde(rename = "JYS", default)]
    pub jys: String,
    #[serde(rename = "Classify", default)]
    pub classify: String,
    #[serde(rename = "MarketType", default)]
    pub market_type: String,
    /// 證券類型名稱，例如「股票」「可轉債」
    #[serde(rename = "SecurityTypeName", default)]
    pub security_type_name: String,
    #[serde(rename = "SecurityType", default)]
    pub security_type: String,
    /// 市場編號，行情 ID 的前段
    #[serde(rename = "MktNum", default)]
    pub market_number: String,
    #[serde(rename = "TypeUS", default)]
    pub type_us: String,
    /// 上游直接給的行情 ID，可能帶市場後綴
    #[serde(rename = "QuoteID", default)]
    pub quote_id: String,
    #[serde(rename = "UnifiedCode", default)]
    pub unified_code: String,
    #[serde(rename = "InnerCode", default)]
    pub inner_code: String,
}

impl Quote {
    /// `市場編號.代碼` 形式的行情 ID。
    pub fn secid(&self) -> String {
        concat_string!(self.market_number, ".", self.code)
    }
}

#[derive(Deserialize)]
struct SuggestResponse {
    #[serde(rename = "QuotationCodeTable", default)]
    table: Option<SuggestTable>,
}

#[derive(Deserialize)]
struct SuggestTable {
    #[serde(rename = "Data", default)]
    data: Option<Vec<Quote>>,
}

/// 以代碼或關鍵字搜尋，回傳最接近的一筆。查無結果回 `None`。
pub(crate) async fn search_quote(session: &Session, keyword: &str) -> Result<Option<Quote>> {
    let mut quotes = search_quotes(session, keyword, 1).await?;
    if quotes.is_empty() {
        Ok(None)
    } else {
        Ok(Some(quotes.swap_remove(0)))
    }
}

/// 同上，但最多回 `count` 筆候選。
pub(crate) async fn search_quotes(
    session: &Session,
    keyword: &str,
    count: usize,
) -> Result<Vec<Quote>> {
    let url = concat_string!(HOST_SEARCH, "/api/suggest/get");
    // 上游對太小的 count 會亂回，至少帶 5
    let query = [
        ("input", keyword.to_string()),
        ("type", "14".to_string()),
        ("token", SEARCH_TOKEN.to_string()),
        ("count", count.max(5).to_string()),
    ];

    let payload = session.get_json(&url, None, &query).await?;
    let response: SuggestResponse = serde_json::from_value(payload)
        .map_err(|e| crate::error::Error::parse("quote search", e.to_string()))?;

    let mut quotes = response
        .table
        .and_then(|t| t.data)
        .unwrap_or_default();
    quotes.truncate(count);

    Ok(quotes)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_parse_suggest_payload() {
        let payload = json!({
            "QuotationCodeTable": {
                "Data": [
                    {
                        "Code": "300059",
                        "Name": "东方财富",
                        "PinYin": "DFCF",
                        "MktNum": "0",
                        "SecurityTypeName": "深A",
                        "QuoteID": "0.300059"
                    }
                ],
                "Status": 0
            }
        });
        let response: SuggestResponse = serde_json::from_value(payload).unwrap();
        let quotes = response.table.and_then(|t| t.data).unwrap();
        assert_eq!(quotes.len(), 1);
        assert_eq!(quotes[0].code, "300059");
        assert_eq!(quotes[0].secid(), "0.300059");
    }

    #[test]
    fn test_parse_suggest_payload_no_match() {
        let payload = json!({ "QuotationCodeTable": { "Data": null, "Status": 0 } });
        let response: SuggestResponse = serde_json::from_value(payload).unwrap();
        assert!(response.table.and_then(|t| t.data).is_none());
    }
}
