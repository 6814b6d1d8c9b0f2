use crate::errors::AppError;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;

/// 通用的 JSON GET，狀態碼非 2xx 或格式不符都回錯誤
pub async fn get_json<T>(request_client: &Client, url: &Url) -> Result<T, AppError>
where
    T: DeserializeOwned,
{
    // 發送請求獲取數據
    let response = request_client.get(url.clone()).send().await?;

    // 檢查請求是否成功
    if !response.status().is_success() {
        return Err(AppError::UnexpectedStatus {
            url: url.to_string(),
            status: response.status(),
        });
    }

    // 先拿 bytes 再自己 decode，格式錯誤才會歸到 InvalidResponse
    let body = response.bytes().await?;

    serde_json::from_slice(&body).map_err(|source| AppError::InvalidResponse {
        url: url.to_string(),
        source,
    })
}
