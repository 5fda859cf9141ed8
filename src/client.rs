//! 資料入口。
//!
//! `DataClient` 集中持有請求層、市場設定表與各查詢快取，
//! 各資產類別的操作掛在 [`stock`](crate::stock)、[`fund`](crate::fund)、
//! [`bond`](crate::bond)、[`futures`](crate::futures) facade 上，
//! 由對應的存取器取得。不依賴任何全域狀態，建幾個 client 都行。

use std::{sync::RwLock, time::Duration};

use crate::bond::Bond;
use crate::cache::ResultCache;
use crate::config::Settings;
use crate::eastmoney::search::{self, Quote};
use crate::error::{Error, Result};
use crate::futures::Futures;
use crate::fund::Fund;
use crate::net::Session;
use crate::record::RecordSet;
use crate::registry::MarketRegistry;
use crate::stock::Stock;

/// 代碼搜尋結果的存活時間，三天
const SEARCH_TTL: Duration = Duration::from_secs(3600 * 24 * 3);

pub struct DataClient {
    settings: Settings,
    session: Session,
    registry: RwLock<MarketRegistry>,
    search_cache: ResultCache<Quote>,
    info_cache: ResultCache<RecordSet>,
}

impl DataClient {
    /// 以預設 [`Settings`] 建立。
    pub fn new() -> Result<Self> {
        Self::with_settings(Settings::default())
    }

    /// 以自訂 [`Settings`] 建立。
    pub fn with_settings(settings: Settings) -> Result<Self> {
        let session = Session::new(&settings)?;

        Ok(DataClient {
            settings,
            session,
            registry: RwLock::new(MarketRegistry::new()),
            search_cache: ResultCache::new(),
            info_cache: ResultCache::new(),
        })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub(crate) fn session(&self) -> &Session {
        &self.session
    }

    pub(crate) fn info_cache(&self) -> &ResultCache<RecordSet> {
        &self.info_cache
    }

    /// 市場代號換 `fs` 篩選式。鎖損毀視同查無此代號。
    pub(crate) fn fs(&self, qualifier: &str) -> Result<String> {
        match self.registry.read() {
            Ok(registry) => registry.resolve(qualifier).map(String::from),
            Err(_) => Err(Error::ConfigNotFound(qualifier.to_string())),
        }
    }

    /// 以市場設定表為參數執行 `f`，讓請求層能查市場名稱。
    pub(crate) fn with_registry<T>(&self, f: impl FnOnce(&MarketRegistry) -> T) -> Result<T> {
        match self.registry.read() {
            Ok(registry) => Ok(f(&registry)),
            Err(_) => Err(Error::ConfigNotFound("market registry".to_string())),
        }
    }

    /// 註冊新市場代號，之後 `realtime_quotes` 就吃得到。
    pub fn add_market(&self, qualifier: impl Into<String>, fs: impl Into<String>) {
        if let Ok(mut registry) = self.registry.write() {
            registry.add_market(qualifier, fs);
        }
    }

    /// 以代碼或關鍵字搜尋證券，取最接近的一筆。
    /// 結果以關鍵字為 key 快取三天；查無結果回 `None`，不進快取。
    pub async fn search_quote(&self, keyword: &str) -> Result<Option<Quote>> {
        if let Some(hit) = self.search_cache.get(keyword) {
            return Ok(Some(hit));
        }

        match search::search_quote(&self.session, keyword).await? {
            Some(quote) => {
                self.search_cache.set(keyword, quote.clone(), SEARCH_TTL);
                Ok(Some(quote))
            }
            None => Ok(None),
        }
    }

    /// 把裸代碼解析成 `市場編號.代碼` 形式的行情 ID。
    /// 空字串或查無此證券都回 [`Error::ConfigNotFound`]。
    pub async fn quote_id(&self, code: &str) -> Result<String> {
        if code.trim().is_empty() {
            return Err(Error::ConfigNotFound(code.to_string()));
        }

        match self.search_quote(code).await? {
            Some(quote) => Ok(quote.secid()),
            None => Err(Error::ConfigNotFound(code.to_string())),
        }
    }

    /// 清空搜尋與基本資料快取。
    pub fn clear_caches(&self) {
        self.search_cache.clear();
        self.info_cache.clear();
    }

    /// 淘汰已過期的快取項目。
    pub fn sweep_caches(&self) {
        self.search_cache.sweep();
        self.info_cache.sweep();
    }

    pub fn stock(&self) -> Stock<'_> {
        Stock::new(self)
    }

    pub fn fund(&self) -> Fund<'_> {
        Fund::new(self)
    }

    pub fn bond(&self) -> Bond<'_> {
        Bond::new(self)
    }

    pub fn futures(&self) -> Futures<'_> {
        Futures::new(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fs_resolution() {
        let client = DataClient::new().unwrap();
        assert!(client.fs("沪A").is_ok());
        assert!(matches!(client.fs("ZZ"), Err(Error::ConfigNotFound(_))));

        client.add_market("新三板精选", "m:0 t:81 s:2048");
        assert_eq!(client.fs("新三板精选").unwrap(), "m:0 t:81 s:2048");
    }

    #[tokio::test]
    async fn test_quote_id_rejects_empty_code() {
        let client = DataClient::new().unwrap();
        assert!(matches!(
            client.quote_id("  ").await,
            Err(Error::ConfigNotFound(_))
        ));
    }

    #[tokio::test]
    #[ignore]
    async fn test_search_quote() {
        dotenv::dotenv().ok();
        let client = DataClient::new().unwrap();
        let quote = client.search_quote("600519").await.unwrap().unwrap();
        assert_eq!(quote.secid(), "1.600519");

        // 第二次應命中快取
        let again = client.search_quote("600519").await.unwrap().unwrap();
        assert_eq!(again.code, quote.code);
    }
}
