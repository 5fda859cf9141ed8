//! 查詢結果的 TTL 快取。
//!
//! 以 `RwLock` 保護的 `HashMap`，key 是查詢簽名字串，value 附帶到期時間。
//! 讀多寫少，過期項目在讀取時懶惰淘汰。不設容量上限，也不做
//! 進行中查詢的合併：同一個 key 同時 miss 時各自計算，後寫者覆蓋。

use std::{
    future::Future,
    sync::RwLock,
    time::{Duration, Instant},
};

use hashbrown::HashMap;

use crate::error::Result;

struct Entry<V> {
    value: V,
    expires_at: Instant,
}

pub struct ResultCache<V> {
    entries: RwLock<HashMap<String, Entry<V>>>,
}

impl<V: Clone> ResultCache<V> {
    pub fn new() -> Self {
        ResultCache {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// 讀取未過期的快取值。鎖失敗視同未命中。
    pub fn get(&self, key: &str) -> Option<V> {
        match self.entries.read() {
            Ok(map) => map
                .get(key)
                .filter(|entry| entry.expires_at > Instant::now())
                .map(|entry| entry.value.clone()),
            Err(_) => None,
        }
    }

    pub fn set(&self, key: impl Into<String>, value: V, ttl: Duration) {
        if let Ok(mut map) = self.entries.write() {
            map.insert(
                key.into(),
                Entry {
                    value,
                    expires_at: Instant::now() + ttl,
                },
            );
        }
    }

    /// 命中就直接回快取值；未命中或過期則執行 `compute` 並存入結果。
    ///
    /// `compute` 失敗時錯誤原樣往上傳，不會寫入快取，
    /// 下次呼叫會重新計算。
    pub async fn get_or_compute<F, Fut>(
        &self,
        key: &str,
        ttl: Duration,
        compute: F,
    ) -> Result<V>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V>>,
    {
        if let Some(hit) = self.get(key) {
            return Ok(hit);
        }

        let value = compute().await?;
        self.set(key, value.clone(), ttl);

        Ok(value)
    }

    /// 移除所有已過期的項目。
    pub fn sweep(&self) {
        if let Ok(mut map) = self.entries.write() {
            let now = Instant::now();
            map.retain(|_, entry| entry.expires_at > now);
        }
    }

    pub fn clear(&self) {
        if let Ok(mut map) = self.entries.write() {
            map.clear();
        }
    }

    pub fn len(&self) -> usize {
        match self.entries.read() {
            Ok(map) => map.len(),
            Err(_) => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<V: Clone> Default for ResultCache<V> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::error::Error;

    #[tokio::test]
    async fn test_hit_skips_compute() {
        let cache: ResultCache<String> = ResultCache::new();
        let calls = AtomicUsize::new(0);
        let ttl = Duration::from_secs(60);

        for _ in 0..3 {
            let value = cache
                .get_or_compute("沪A", ttl, || async {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok("snapshot".to_string())
                })
                .await
                .unwrap();
            assert_eq!(value, "snapshot");
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_expired_entry_recomputed() {
        let cache: ResultCache<u32> = ResultCache::new();
        let calls = AtomicUsize::new(0);
        let ttl = Duration::from_millis(50);

        let first = cache
            .get_or_compute("600519", ttl, || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(1)
            })
            .await
            .unwrap();
        assert_eq!(first, 1);

        tokio::time::sleep(Duration::from_millis(80)).await;

        let second = cache
            .get_or_compute("600519", ttl, || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(2)
            })
            .await
            .unwrap();
        assert_eq!(second, 2);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_failure_not_cached() {
        let cache: ResultCache<u32> = ResultCache::new();
        let ttl = Duration::from_secs(60);

        let failed = cache
            .get_or_compute("000001", ttl, || async {
                Err(Error::parse("quote list", "empty body"))
            })
            .await;
        assert!(failed.is_err());
        assert!(cache.get("000001").is_none());

        let ok = cache
            .get_or_compute("000001", ttl, || async { Ok(7) })
            .await
            .unwrap();
        assert_eq!(ok, 7);
    }

    #[test]
    fn test_sweep_and_clear() {
        let cache: ResultCache<u32> = ResultCache::new();
        cache.set("a", 1, Duration::from_millis(0));
        cache.set("b", 2, Duration::from_secs(60));

        std::thread::sleep(Duration::from_millis(10));
        cache.sweep();
        assert_eq!(cache.len(), 1);
        assert!(cache.get("b").is_some());

        cache.clear();
        assert!(cache.is_empty());
    }
}
