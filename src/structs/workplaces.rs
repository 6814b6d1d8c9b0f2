use serde::Deserialize;

pub const ACTIVE_STATUS: i32 = 0;

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Workplace {
    pub id: i64,
    pub name: String,
    // 0 = active, 1 = inactive，其他值保留
    pub status: i32,
}

impl Workplace {
    pub fn is_active(&self) -> bool {
        self.status == ACTIVE_STATUS
    }
}
