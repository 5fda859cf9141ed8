//! cnfinance
//!
//! 中國證券市場資料擷取函式庫：股票、基金、債券、期貨的即時行情、
//! 歷史 K 線、資金流與基本資料，統一解析成 [`RecordSet`] 表格。
//!
//! ```no_run
//! use cnfinance::{DataClient, HistoryOptions};
//!
//! #[tokio::main]
//! async fn main() -> cnfinance::Result<()> {
//!     let client = DataClient::new()?;
//!     let quotes = client.stock().realtime_quotes("沪深A股").await?;
//!     println!("{} rows", quotes.len());
//!
//!     let kline = client
//!         .stock()
//!         .quote_history("600519", &HistoryOptions::default())
//!         .await?;
//!     println!("{:?}", kline.columns());
//!     Ok(())
//! }
//! ```

pub mod bond;
mod cache;
mod client;
mod config;
mod declare;
mod eastmoney;
mod error;
mod extract;
pub mod fund;
pub mod futures;
mod net;
mod record;
mod registry;
pub mod stock;
mod util;

pub use cache::ResultCache;
pub use client::DataClient;
pub use config::Settings;
pub use declare::{Adjust, HistoryOptions, Interval};
pub use eastmoney::search::Quote;
pub use error::{Error, Result};
pub use record::{RecordSet, Value};
pub use registry::MarketRegistry;
