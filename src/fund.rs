//! 基金 facade。

use concat_string::concat_string;

use crate::client::DataClient;
use crate::eastmoney::{fields, fund};
use crate::error::Result;
use crate::record::{RecordSet, Value};

/// 歷史淨值單次抓的筆數上限，足以涵蓋最老的開放式基金。
const NET_VALUE_PAGE_SIZE: u32 = 30000;

pub struct Fund<'a> {
    client: &'a DataClient,
}

impl<'a> Fund<'a> {
    pub(crate) fn new(client: &'a DataClient) -> Self {
        Fund { client }
    }

    /// 單檔基金的歷史淨值，新的在前。
    pub async fn net_value_history(&self, fund_code: &str) -> Result<RecordSet> {
        fund::net_value_history(self.client.session(), fund_code, NET_VALUE_PAGE_SIZE).await
    }

    /// 多檔基金的即時估算漲跌幅，一檔一列。
    pub async fn realtime_increase_rate(&self, fund_codes: &[&str]) -> Result<RecordSet> {
        let codes: Vec<String> = fund_codes.iter().map(|c| c.to_string()).collect();

        fund::realtime_increase_rate(self.client.session(), &codes).await
    }

    /// 公募基金代碼與簡稱清單。`fund_type` 是排行榜的類型參數
    /// （`gp`、`zq`、`etf`、`hh`、`zs`、`fof`、`qdii`），`None` 取全部。
    pub async fn fund_codes(&self, fund_type: Option<&str>) -> Result<RecordSet> {
        fund::fund_codes(self.client.session(), fund_type).await
    }

    /// 單檔基金的基本資料，一列。
    pub async fn base_info(&self, fund_code: &str) -> Result<RecordSet> {
        let key = concat_string!("fund-base:", fund_code);
        self.client
            .info_cache()
            .get_or_compute(&key, self.client.settings().default_ttl, || {
                fund::base_info(self.client.session(), fund_code)
            })
            .await
    }

    /// 指定公開日的股票持倉占比；`date` 為 `None` 時取最新一期。
    /// 可用日期見 [`Fund::public_dates`]。
    pub async fn invest_position(
        &self,
        fund_code: &str,
        date: Option<&str>,
    ) -> Result<RecordSet> {
        fund::invest_position(self.client.session(), fund_code, date).await
    }

    /// 持倉公開日期清單，新的在前。
    pub async fn public_dates(&self, fund_code: &str) -> Result<Vec<String>> {
        fund::public_dates(self.client.session(), fund_code).await
    }

    /// 各時間段的漲跌幅與同類排名。
    pub async fn period_change(&self, fund_code: &str) -> Result<RecordSet> {
        fund::period_change(self.client.session(), fund_code).await
    }

    /// 各公開日的資產類型占比（股票、債券、現金），一期一列。
    /// `dates` 為空時取最新一期；可用日期見 [`Fund::public_dates`]。
    pub async fn types_percentage(&self, fund_code: &str, dates: &[&str]) -> Result<RecordSet> {
        let mut all = RecordSet::default();
        for date in date_params(dates) {
            let set = fund::types_percentage(self.client.session(), fund_code, date).await?;
            if !set.is_empty() {
                all.extend(set);
            }
        }

        Ok(with_fund_code(fund_code, all, fields::FUND_TYPES))
    }

    /// 各公開日的行業持倉分布，各期串在同一張表。
    /// `dates` 為空時取最新一期。
    pub async fn industry_distribution(
        &self,
        fund_code: &str,
        dates: &[&str],
    ) -> Result<RecordSet> {
        let mut all = RecordSet::default();
        for date in date_params(dates) {
            let set = fund::industry_distribution(self.client.session(), fund_code, date).await?;
            if !set.is_empty() {
                all.extend(set);
            }
        }

        Ok(with_fund_code(fund_code, all, fields::FUND_INDUSTRY))
    }
}

fn date_params<'a>(dates: &'a [&'a str]) -> Vec<Option<&'a str>> {
    if dates.is_empty() {
        vec![None]
    } else {
        dates.iter().map(|d| Some(*d)).collect()
    }
}

/// 表前補上基金代碼；整批查無資料時回空表但欄位齊全。
fn with_fund_code(fund_code: &str, mut all: RecordSet, table: fields::FieldTable) -> RecordSet {
    if all.columns().is_empty() {
        let mut columns = vec!["基金代码"];
        columns.extend(table.iter().map(|(_, name)| *name));
        return RecordSet::with_columns(columns);
    }
    all.insert_column(0, "基金代码", Value::Text(fund_code.to_string()));
    all
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn test_date_params() {
        assert_eq!(date_params(&[]), vec![None]);
        assert_eq!(
            date_params(&["2024-03-31", "2023-12-31"]),
            vec![Some("2024-03-31"), Some("2023-12-31")]
        );
    }

    #[test]
    fn test_with_fund_code() {
        let mut set = RecordSet::with_columns(["股票比重", "债券比重"]);
        set.push_row(vec![Value::Number(dec!(94.4)), Value::Null]);

        let out = with_fund_code("161725", set, fields::FUND_TYPES);
        assert_eq!(out.columns()[0], "基金代码");
        assert_eq!(
            out.get(0, "基金代码"),
            Some(&Value::Text("161725".to_string()))
        );
        assert_eq!(out.get(0, "股票比重"), Some(&Value::Number(dec!(94.4))));
    }

    #[test]
    fn test_with_fund_code_empty() {
        let out = with_fund_code("161725", RecordSet::default(), fields::FUND_INDUSTRY);
        assert!(out.is_empty());
        assert_eq!(out.columns().len(), fields::FUND_INDUSTRY.len() + 1);
        assert_eq!(out.columns()[0], "基金代码");
    }

    #[tokio::test]
    #[ignore]
    async fn test_types_percentage() {
        dotenv::dotenv().ok();
        let client = DataClient::new().unwrap();
        let set = client.fund().types_percentage("161725", &[]).await.unwrap();
        println!("rows: {}", set.len());
        assert!(set.column_index("股票比重").is_some());
    }

    #[tokio::test]
    #[ignore]
    async fn test_industry_distribution() {
        dotenv::dotenv().ok();
        let client = DataClient::new().unwrap();
        let set = client
            .fund()
            .industry_distribution("161725", &[])
            .await
            .unwrap();
        println!("rows: {}", set.len());
        assert!(set.column_index("行业名称").is_some());
    }

    #[tokio::test]
    #[ignore]
    async fn test_net_value_history() {
        dotenv::dotenv().ok();
        let client = DataClient::new().unwrap();
        let set = client.fund().net_value_history("161725").await.unwrap();
        println!("rows: {}", set.len());
        assert!(!set.is_empty());
        assert!(set.column_index("单位净值").is_some());
    }

    #[tokio::test]
    #[ignore]
    async fn test_invest_position() {
        dotenv::dotenv().ok();
        let client = DataClient::new().unwrap();
        let set = client.fund().invest_position("161725", None).await.unwrap();
        println!("rows: {}", set.len());
        assert!(set.column_index("公开日期").is_some());
    }

    #[tokio::test]
    #[ignore]
    async fn test_period_change() {
        dotenv::dotenv().ok();
        let client = DataClient::new().unwrap();
        let set = client.fund().period_change("161725").await.unwrap();
        println!("rows: {}", set.len());
        assert!(!set.is_empty());
    }
}
