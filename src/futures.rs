//! 期貨 facade。
//!
//! 期貨合約沒有裸代碼搜尋，歷史行情只收 `市場編號.代碼` 形式的
//! 行情 ID；基本資料直接從即時行情表整理出來。

use crate::client::DataClient;
use crate::declare::HistoryOptions;
use crate::eastmoney::{kline, quote};
use crate::error::Result;
use crate::record::RecordSet;
use crate::stock::named_deal_detail;

pub struct Futures<'a> {
    client: &'a DataClient,
}

impl<'a> Futures<'a> {
    pub(crate) fn new(client: &'a DataClient) -> Self {
        Futures { client }
    }

    /// 全部交易所的期貨即時行情。
    pub async fn realtime_quotes(&self) -> Result<RecordSet> {
        let fs = self.client.fs("futures")?;
        let mut set = quote::realtime_by_fs(self.client.session(), &fs).await?;
        self.client
            .with_registry(|registry| quote::decorate(&mut set, registry))?;

        Ok(set)
    }

    /// 全部期貨合約的基本資料：代碼、名稱、行情 ID 與所屬交易所。
    pub async fn base_info(&self) -> Result<RecordSet> {
        let quotes = self.realtime_quotes().await?;
        let mut set = quotes.select(&["代码", "名称", "行情ID", "市场类型"]);
        set.rename_column("代码", "期货代码");
        set.rename_column("名称", "期货名称");

        Ok(set)
    }

    /// 單一合約的 K 線。只接受行情 ID，不做代碼搜尋。
    pub async fn quote_history(&self, quote_id: &str, opts: &HistoryOptions) -> Result<RecordSet> {
        opts.validate()?;

        kline::history(self.client.session(), quote_id, opts).await
    }

    /// 最新交易日的成交明細，最多 `max_count` 筆。
    pub async fn deal_detail(&self, quote_id: &str, max_count: u32) -> Result<RecordSet> {
        named_deal_detail(self.client, quote_id, max_count).await
    }
}
