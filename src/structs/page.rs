use serde::Deserialize;

/// 分頁 API 的回應：一頁資料加上下一頁的連結
#[derive(Deserialize, Debug, Clone)]
pub struct Page<T> {
    pub data: Vec<T>,
    #[serde(default)]
    pub links: Links,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct Links {
    #[serde(default)]
    pub next: Option<String>,
}

impl<T> Page<T> {
    pub fn new(data: Vec<T>, next: Option<&str>) -> Self {
        Self {
            data,
            links: Links {
                next: next.map(str::to_string),
            },
        }
    }

    /// 空字串也當作最後一頁
    pub fn next_link(&self) -> Option<&str> {
        self.links.next.as_deref().filter(|next| !next.is_empty())
    }
}
