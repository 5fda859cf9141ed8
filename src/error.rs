use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// 依失敗階段區分的錯誤：設定 / 請求 / 上游回應 / 解析。
///
/// 每個呼叫只嘗試一次，不做內部重試，錯誤一律往呼叫端傳。
#[derive(Debug, Error)]
pub enum Error {
    /// 市場代號或證券代碼不在設定表內
    #[error("unknown market or security identifier: {0}")]
    ConfigNotFound(String),

    /// 傳輸層失敗（連線、逾時）
    #[error("request to {url} failed: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// 上游回應非 2xx
    #[error("{url} returned status {status}")]
    Upstream {
        url: String,
        status: reqwest::StatusCode,
    },

    /// 回應內容與預期欄位結構不符
    #[error("failed to parse {context}: {message}")]
    Parse { context: String, message: String },

    /// 呼叫端給的選項不合法，於 facade 邊界驗證
    #[error("invalid option: {0}")]
    InvalidOption(String),
}

impl Error {
    pub(crate) fn parse(context: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Parse {
            context: context.into(),
            message: message.into(),
        }
    }
}
