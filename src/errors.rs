use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("unexpected status {status} from {url}")]
    UnexpectedStatus { url: String, status: StatusCode },
    #[error("invalid response from {url}: {source}")]
    InvalidResponse {
        url: String,
        source: serde_json::Error,
    },
    #[error("invalid url {url}: {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("{url} still has a next page after {max_pages} pages")]
    PageLimitExceeded { url: String, max_pages: usize },
    #[error("configuration error: {0}")]
    Config(String),
    #[error("failed to render report: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl AppError {
    /// 網路層或 HTTP 狀態碼錯誤
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            AppError::Request(_) | AppError::UnexpectedStatus { .. }
        )
    }

    pub fn category(&self) -> &'static str {
        if self.is_transport() {
            "transport failure"
        } else {
            "unexpected failure"
        }
    }
}
