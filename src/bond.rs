//! 可轉債 facade。
//!
//! 走與股票相同的行情端點，輸出欄名帶「债券」前綴；
//! 報表型基本資料另取自 datacenter 的可轉債清單。

use crate::client::DataClient;
use crate::declare::HistoryOptions;
use crate::eastmoney::{bill, info, kline, quote};
use crate::error::Result;
use crate::record::RecordSet;
use crate::stock::named_deal_detail;

use concat_string::concat_string;

pub struct Bond<'a> {
    client: &'a DataClient,
}

impl<'a> Bond<'a> {
    pub(crate) fn new(client: &'a DataClient) -> Self {
        Bond { client }
    }

    /// 全市場可轉債的即時行情。
    pub async fn realtime_quotes(&self) -> Result<RecordSet> {
        let fs = self.client.fs("bond")?;
        let mut set = quote::realtime_by_fs(self.client.session(), &fs).await?;
        self.client
            .with_registry(|registry| quote::decorate(&mut set, registry))?;
        rename_identity(&mut set);

        Ok(set)
    }

    /// 單檔可轉債的報表基本資料（發行規模、轉股資訊等），一列。
    pub async fn base_info(&self, bond_code: &str) -> Result<RecordSet> {
        let key = concat_string!("bond-report:", bond_code);
        self.client
            .info_cache()
            .get_or_compute(&key, self.client.settings().default_ttl, || {
                info::bond_base_info(self.client.session(), bond_code)
            })
            .await
    }

    /// 全部可轉債的報表基本資料，逐頁抓齊。
    pub async fn all_base_info(&self) -> Result<RecordSet> {
        info::bond_all_base_info(self.client.session()).await
    }

    /// 單檔可轉債的 K 線。
    pub async fn quote_history(&self, code: &str, opts: &HistoryOptions) -> Result<RecordSet> {
        opts.validate()?;
        let quote_id = if opts.quote_id_mode {
            code.to_string()
        } else {
            self.client.quote_id(code).await?
        };
        let mut set = kline::history(self.client.session(), &quote_id, opts).await?;
        rename_identity(&mut set);

        Ok(set)
    }

    /// 歷史（日級）資金流。
    pub async fn history_bill(&self, code: &str) -> Result<RecordSet> {
        let quote_id = self.client.quote_id(code).await?;
        let mut set = bill::history_bill(self.client.session(), &quote_id).await?;
        rename_identity(&mut set);

        Ok(set)
    }

    /// 最新交易日的分鐘級資金流。
    pub async fn today_bill(&self, code: &str) -> Result<RecordSet> {
        let quote_id = self.client.quote_id(code).await?;
        let mut set = bill::today_bill(self.client.session(), &quote_id).await?;
        rename_identity(&mut set);

        Ok(set)
    }

    /// 最新交易日的成交明細，最多 `max_count` 筆。
    pub async fn deal_detail(&self, code: &str, max_count: u32) -> Result<RecordSet> {
        let quote_id = self.client.quote_id(code).await?;
        let mut set = named_deal_detail(self.client, &quote_id, max_count).await?;
        rename_identity(&mut set);

        Ok(set)
    }
}

fn rename_identity(set: &mut RecordSet) {
    set.rename_column("代码", "债券代码");
    set.rename_column("名称", "债券名称");
}
