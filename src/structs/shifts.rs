use serde::Deserialize;

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Shift {
    pub id: i64,
    pub workplace_id: i64,
    #[serde(default)]
    pub worker_id: Option<i64>,
    // 只看有沒有值，不解析時間格式
    #[serde(default)]
    pub cancelled_at: Option<String>,
}

impl Shift {
    /// 有人接且沒被取消才算完成
    pub fn is_completed(&self) -> bool {
        self.worker_id.is_some() && self.cancelled_at.is_none()
    }
}
