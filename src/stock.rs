//! 股票 facade。
//!
//! 所有操作都是 `DataClient` 上的無狀態視圖：解析設定、發請求、
//! 解析欄位，查詢型結果（代碼搜尋、基本資料）走快取。

use concat_string::concat_string;

use crate::client::DataClient;
use crate::declare::HistoryOptions;
use crate::eastmoney::{bill, deal, holder, info, kline, quote};
use crate::error::{Error, Result};
use crate::record::{RecordSet, Value};

pub struct Stock<'a> {
    client: &'a DataClient,
}

impl<'a> Stock<'a> {
    pub(crate) fn new(client: &'a DataClient) -> Self {
        Stock { client }
    }

    /// 指定市場代號的全市場即時行情快照。
    pub async fn realtime_quotes(&self, qualifier: &str) -> Result<RecordSet> {
        let fs = self.client.fs(qualifier)?;
        let mut set = quote::realtime_by_fs(self.client.session(), &fs).await?;
        self.client
            .with_registry(|registry| quote::decorate(&mut set, registry))?;

        Ok(set)
    }

    /// 指定板塊（`BK` 開頭的板塊編號）的成分證券即時行情。
    pub async fn board_members(&self, board_code: &str) -> Result<RecordSet> {
        let fs = if board_code.starts_with("b:") {
            board_code.to_string()
        } else {
            concat_string!("b:", board_code)
        };
        let mut set = quote::realtime_by_fs(self.client.session(), &fs).await?;
        self.client
            .with_registry(|registry| quote::decorate(&mut set, registry))?;

        Ok(set)
    }

    /// 多檔證券的最新報價，一檔一列。
    pub async fn latest_quotes(&self, codes: &[&str]) -> Result<RecordSet> {
        let mut quote_ids = Vec::with_capacity(codes.len());
        for code in codes {
            quote_ids.push(self.client.quote_id(code).await?);
        }

        let mut set = quote::latest_by_quote_ids(self.client.session(), &quote_ids).await?;
        self.client
            .with_registry(|registry| quote::decorate(&mut set, registry))?;

        Ok(set)
    }

    /// 單檔證券的 K 線。
    pub async fn quote_history(&self, code: &str, opts: &HistoryOptions) -> Result<RecordSet> {
        opts.validate()?;
        let quote_id = self.resolve(code, opts).await?;

        kline::history(self.client.session(), &quote_id, opts).await
    }

    /// 多檔證券的 K 線，逐檔循序抓，結果依輸入順序排列。
    pub async fn quote_history_multi(
        &self,
        codes: &[&str],
        opts: &HistoryOptions,
    ) -> Result<Vec<RecordSet>> {
        opts.validate()?;

        let mut sets = Vec::with_capacity(codes.len());
        for code in codes {
            let quote_id = self.resolve(code, opts).await?;
            sets.push(kline::history(self.client.session(), &quote_id, opts).await?);
        }

        Ok(sets)
    }

    /// 最近 `ndays` 天的 1 分鐘走勢，上游最多回五天。
    pub async fn minute_quotes(&self, code: &str, ndays: u8) -> Result<RecordSet> {
        if !(1..=5).contains(&ndays) {
            return Err(Error::InvalidOption(format!(
                "ndays must be 1..=5, got {}",
                ndays
            )));
        }
        let quote_id = self.client.quote_id(code).await?;

        kline::minute(self.client.session(), &quote_id, ndays).await
    }

    /// 單檔股票的基本資料，一列，欄名帶「股票」前綴。
    pub async fn base_info(&self, code: &str) -> Result<RecordSet> {
        let quote_id = self.client.quote_id(code).await?;
        let mut set = cached_base_info(self.client, &quote_id).await?;
        set.rename_column("代码", "股票代码");
        set.rename_column("名称", "股票名称");

        Ok(set)
    }

    /// 歷史（日級）資金流。
    pub async fn history_bill(&self, code: &str) -> Result<RecordSet> {
        let quote_id = self.client.quote_id(code).await?;

        bill::history_bill(self.client.session(), &quote_id).await
    }

    /// 最新交易日的分鐘級資金流。
    pub async fn today_bill(&self, code: &str) -> Result<RecordSet> {
        let quote_id = self.client.quote_id(code).await?;

        bill::today_bill(self.client.session(), &quote_id).await
    }

    /// 最新交易日的成交明細，最多 `max_count` 筆。
    pub async fn deal_detail(&self, quote_id: &str, max_count: u32) -> Result<RecordSet> {
        named_deal_detail(self.client, quote_id, max_count).await
    }

    /// 最近 `top` 期的前十大流通股東。
    pub async fn top10_holders(&self, code: &str, top: usize) -> Result<RecordSet> {
        let quote_id = self.client.quote_id(code).await?;

        holder::top10_holders(self.client.session(), &quote_id, top).await
    }

    async fn resolve(&self, code: &str, opts: &HistoryOptions) -> Result<String> {
        if opts.quote_id_mode {
            Ok(code.to_string())
        } else {
            self.client.quote_id(code).await
        }
    }
}

/// 基本資料查詢，以行情 ID 為 key 走 `default_ttl` 快取。
pub(crate) async fn cached_base_info(client: &DataClient, quote_id: &str) -> Result<RecordSet> {
    let key = concat_string!("base-info:", quote_id);
    client
        .info_cache()
        .get_or_compute(&key, client.settings().default_ttl, || {
            info::base_info(client.session(), quote_id)
        })
        .await
}

/// 成交明細本身不帶名稱代碼，從快取的基本資料補在表前。
pub(crate) async fn named_deal_detail(
    client: &DataClient,
    quote_id: &str,
    max_count: u32,
) -> Result<RecordSet> {
    let mut set = deal::deal_detail(client.session(), quote_id, max_count).await?;

    let base = cached_base_info(client, quote_id).await?;
    let name = base.get(0, "名称").cloned().unwrap_or(Value::Null);
    let code = base.get(0, "代码").cloned().unwrap_or(Value::Null);
    set.insert_column(0, "代码", code);
    set.insert_column(0, "名称", name);

    Ok(set)
}
