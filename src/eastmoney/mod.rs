//! 東方財富各端點的請求與解析。
//!
//! 每個子模組對應一族端點，只負責組參數、發請求、套欄位表解析；
//! 跨資產類別的欄位改名與快取策略放在上層 facade。

use reqwest::header;

pub(crate) mod bill;
pub(crate) mod deal;
pub(crate) mod fields;
pub(crate) mod fund;
pub(crate) mod holder;
pub(crate) mod info;
pub(crate) mod kline;
pub(crate) mod quote;
pub(crate) mod search;

pub(crate) const HOST_PUSH2: &str = "https://push2.eastmoney.com";
pub(crate) const HOST_PUSH2HIS: &str = "https://push2his.eastmoney.com";
pub(crate) const HOST_SEARCH: &str = "https://searchapi.eastmoney.com";
pub(crate) const HOST_DATACENTER: &str = "https://datacenter-web.eastmoney.com";
pub(crate) const HOST_FUND_MOB: &str = "https://fundmobapi.eastmoney.com";
pub(crate) const HOST_FUND_RANK: &str = "https://fund.eastmoney.com";
pub(crate) const HOST_EMH5: &str = "https://emh5.eastmoney.com";

/// 行情端點共用的 referer。
pub(crate) fn quote_headers() -> header::HeaderMap {
    let mut headers = header::HeaderMap::new();
    headers.insert(
        header::REFERER,
        header::HeaderValue::from_static("http://quote.eastmoney.com/center/gridlist.html"),
    );
    headers
}

/// 基金行動端專用的標頭組。
pub(crate) fn fund_headers() -> header::HeaderMap {
    let mut headers = header::HeaderMap::new();
    headers.insert(
        header::USER_AGENT,
        header::HeaderValue::from_static("EMProjJijin/6.2.8 (iPhone; iOS 13.6; Scale/2.00)"),
    );
    headers.insert(
        "GTOKEN",
        header::HeaderValue::from_static("98B423068C1F4DEF9842F82ADF08C5db"),
    );
    headers.insert(
        "clientInfo",
        header::HeaderValue::from_static("ttjj-iPhone10,1-iOS-iOS13.6"),
    );
    headers.insert(
        header::REFERER,
        header::HeaderValue::from_static(
            "https://mpservice.com/516939c37bdb4ba2b1138c50cf69a2e1/release/pages/FundHistoryNetWorth",
        ),
    );
    headers
}

/// 從 `市場編號.代碼` 取出代碼部分。
pub(crate) fn code_of(quote_id: &str) -> &str {
    quote_id.rsplit('.').next().unwrap_or(quote_id)
}
