//! 執行期設定。
//!
//! 預設值即可直接使用；部署端可用 `CNFINANCE_*` 環境變數覆蓋，
//! 不需要設定檔。

use std::{env, time::Duration};

/// `DataClient` 的可調參數。
#[derive(Debug, Clone)]
pub struct Settings {
    /// 查詢型結果（搜尋、基本資料）的快取存活時間
    pub default_ttl: Duration,
    /// 建立連線逾時
    pub connect_timeout: Duration,
    /// 整體請求逾時
    pub timeout: Duration,
    /// 同時在途請求上限
    pub max_concurrency: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            default_ttl: Duration::from_secs(60 * 60 * 24),
            connect_timeout: Duration::from_secs(10),
            timeout: Duration::from_secs(30),
            max_concurrency: 5,
        }
    }
}

impl Settings {
    /// 以預設值為底，套用環境變數覆蓋。
    ///
    /// 支援的變數（秒數或整數，解析失敗時沿用預設）：
    /// `CNFINANCE_DEFAULT_TTL_SECS`、`CNFINANCE_CONNECT_TIMEOUT_SECS`、
    /// `CNFINANCE_TIMEOUT_SECS`、`CNFINANCE_MAX_CONCURRENCY`。
    pub fn from_env() -> Self {
        let mut settings = Settings::default();

        if let Some(secs) = read_env_u64("CNFINANCE_DEFAULT_TTL_SECS") {
            settings.default_ttl = Duration::from_secs(secs);
        }
        if let Some(secs) = read_env_u64("CNFINANCE_CONNECT_TIMEOUT_SECS") {
            settings.connect_timeout = Duration::from_secs(secs);
        }
        if let Some(secs) = read_env_u64("CNFINANCE_TIMEOUT_SECS") {
            settings.timeout = Duration::from_secs(secs);
        }
        if let Some(n) = read_env_u64("CNFINANCE_MAX_CONCURRENCY") {
            if n > 0 {
                settings.max_concurrency = n as usize;
            }
        }

        settings
    }
}

fn read_env_u64(key: &str) -> Option<u64> {
    env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let settings = Settings::default();
        assert_eq!(settings.max_concurrency, 5);
        assert_eq!(settings.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_from_env_override() {
        dotenv::dotenv().ok();
        env::set_var("CNFINANCE_MAX_CONCURRENCY", "9");
        env::set_var("CNFINANCE_TIMEOUT_SECS", "7");

        let settings = Settings::from_env();
        assert_eq!(settings.max_concurrency, 9);
        assert_eq!(settings.timeout, Duration::from_secs(7));

        env::remove_var("CNFINANCE_MAX_CONCURRENCY");
        env::remove_var("CNFINANCE_TIMEOUT_SECS");
    }
}
