use crate::errors::AppError;
use reqwest::{Client, Url};
use std::{env::var, time::Duration};

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3000";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Clone)]
pub struct AppState {
    http_client: Client,
    api_base_url: Url,
    max_pages: Option<usize>,
}

impl AppState {
    pub fn new(
        api_base_url: &str,
        timeout: Duration,
        max_pages: Option<usize>,
    ) -> Result<Self, AppError> {
        let api_base_url = Url::parse(api_base_url).map_err(|err| AppError::InvalidUrl {
            url: api_base_url.to_string(),
            reason: err.to_string(),
        })?;

        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| AppError::Config(format!("http client: {}", err)))?;

        Ok(Self {
            http_client,
            api_base_url,
            max_pages,
        })
    }

    /// 從環境變數建立，沒設定的用預設值
    pub fn from_env() -> Result<Self, AppError> {
        let api_base_url =
            var("API_BASE_URL").unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string());

        let timeout_secs = match var("REQUEST_TIMEOUT_SECS") {
            Ok(value) => parse_env_number::<u64>("REQUEST_TIMEOUT_SECS", &value)?,
            Err(_) => DEFAULT_REQUEST_TIMEOUT_SECS,
        };

        let max_pages = match var("MAX_PAGES") {
            Ok(value) => Some(parse_max_pages(&value)?),
            Err(_) => None,
        };

        Self::new(&api_base_url, Duration::from_secs(timeout_secs), max_pages)
    }

    pub fn get_http_client(&self) -> &Client {
        &self.http_client
    }

    pub fn get_max_pages(&self) -> Option<usize> {
        self.max_pages
    }

    /// 把 resource path 接到 base url 後面
    pub fn resource_url(&self, path: &str) -> Result<Url, AppError> {
        self.api_base_url.join(path).map_err(|err| AppError::InvalidUrl {
            url: format!("{}{}", self.api_base_url, path),
            reason: err.to_string(),
        })
    }
}

// 0 頁等於什麼都不抓，當成設定錯誤
fn parse_max_pages(value: &str) -> Result<usize, AppError> {
    match parse_env_number::<usize>("MAX_PAGES", value)? {
        0 => Err(AppError::Config("MAX_PAGES must be at least 1".to_string())),
        max_pages => Ok(max_pages),
    }
}

fn parse_env_number<T>(key: &str, value: &str) -> Result<T, AppError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse::<T>()
        .map_err(|err| AppError::Config(format!("{} = {:?}: {}", key, value, err)))
}
