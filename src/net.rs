//! 請求層。
//!
//! 每個 `DataClient` 持有一個 `Session`，內含單一 `reqwest::Client`
//! （cookie、壓縮、連線池共用）與限制並發的號誌。
//! 每次呼叫只發送一次請求，不重試；傳輸失敗與非 2xx 狀態
//! 分別對應 [`Error::Network`] 與 [`Error::Upstream`]，由呼叫端處置。

use std::time::Instant;

use log::{debug, warn};
use reqwest::{header, Client, Method, RequestBuilder, Response};
use tokio::sync::Semaphore;

use crate::config::Settings;
use crate::error::{Error, Result};

const USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 6.3; WOW64; Trident/7.0; Touch; rv:11.0) like Gecko";
const ACCEPT_LANGUAGE: &str = "zh-CN,zh;q=0.8,zh-TW;q=0.7,zh-HK;q=0.5,en-US;q=0.3,en;q=0.2";

pub struct Session {
    client: Client,
    semaphore: Semaphore,
}

impl Session {
    pub fn new(settings: &Settings) -> Result<Self> {
        let client = Client::builder()
            .brotli(true)
            .gzip(true)
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.timeout)
            .tcp_nodelay(true)
            .pool_max_idle_per_host(20)
            .cookie_store(true)
            .redirect(reqwest::redirect::Policy::limited(5))
            .user_agent(USER_AGENT)
            .default_headers(default_headers())
            .build()
            .map_err(|source| Error::Network {
                url: "client builder".to_string(),
                source,
            })?;

        Ok(Session {
            client,
            semaphore: Semaphore::new(settings.max_concurrency),
        })
    }

    /// GET 後把 body 解成 JSON。
    pub async fn get_json(
        &self,
        url: &str,
        headers: Option<header::HeaderMap>,
        query: &[(&str, String)],
    ) -> Result<serde_json::Value> {
        let response = self.send(Method::GET, url, headers, query, None).await?;
        Self::read_json(url, response).await
    }

    /// GET 後回傳原始文字，給非 JSON 端點用。
    pub async fn get_text(
        &self,
        url: &str,
        headers: Option<header::HeaderMap>,
        query: &[(&str, String)],
    ) -> Result<String> {
        let response = self.send(Method::GET, url, headers, query, None).await?;
        response.text().await.map_err(|source| Error::Network {
            url: url.to_string(),
            source,
        })
    }

    /// 以表單 body POST，回傳 JSON。
    pub async fn post_form_json(
        &self,
        url: &str,
        headers: Option<header::HeaderMap>,
        form: &[(&str, String)],
    ) -> Result<serde_json::Value> {
        let response = self
            .send(Method::POST, url, headers, &[], Some(form))
            .await?;
        Self::read_json(url, response).await
    }

    /// 以 JSON body POST，回傳 JSON。
    pub async fn post_json(
        &self,
        url: &str,
        headers: Option<header::HeaderMap>,
        body: &serde_json::Value,
    ) -> Result<serde_json::Value> {
        let response = self
            .send_with(Method::POST, url, headers, &[], |rb| rb.json(body))
            .await?;
        Self::read_json(url, response).await
    }

    async fn read_json(url: &str, response: Response) -> Result<serde_json::Value> {
        // 少數端點以 text/plain 回 JSON，所以不走 response.json()
        let body = response.text().await.map_err(|source| Error::Network {
            url: url.to_string(),
            source,
        })?;

        serde_json::from_str(&body).map_err(|why| {
            warn!("response from {} is not JSON: {}", url, why);
            Error::parse(url.to_string(), format!("body is not JSON: {}", why))
        })
    }

    async fn send(
        &self,
        method: Method,
        url: &str,
        headers: Option<header::HeaderMap>,
        query: &[(&str, String)],
        form: Option<&[(&str, String)]>,
    ) -> Result<Response> {
        self.send_with(method, url, headers, query, |rb| match form {
            Some(f) => rb.form(f),
            None => rb,
        })
        .await
    }

    async fn send_with<F>(
        &self,
        method: Method,
        url: &str,
        headers: Option<header::HeaderMap>,
        query: &[(&str, String)],
        body: F,
    ) -> Result<Response>
    where
        F: FnOnce(RequestBuilder) -> RequestBuilder,
    {
        let mut rb: RequestBuilder = self.client.request(method.clone(), url);
        if !query.is_empty() {
            rb = rb.query(query);
        }
        if let Some(h) = headers {
            rb = rb.headers(h);
        }
        rb = body(rb);

        // 號誌損毀時放行，寧可失去節流也不讓呼叫卡死
        let _permit = self.semaphore.acquire().await.ok();
        let start = Instant::now();
        let result = rb.send().await;
        let elapsed = start.elapsed().as_millis();

        let response = result.map_err(|source| {
            warn!("{} {} failed after {} ms: {}", method, url, elapsed, source);
            Error::Network {
                url: url.to_string(),
                source,
            }
        })?;

        debug!("{} {} {} {} ms", method, url, response.status(), elapsed);

        if !response.status().is_success() {
            return Err(Error::Upstream {
                url: url.to_string(),
                status: response.status(),
            });
        }

        Ok(response)
    }
}

fn default_headers() -> header::HeaderMap {
    let mut headers = header::HeaderMap::new();
    headers.insert(header::ACCEPT, header::HeaderValue::from_static("*/*"));
    headers.insert(
        header::ACCEPT_LANGUAGE,
        header::HeaderValue::from_static(ACCEPT_LANGUAGE),
    );
    headers
}
