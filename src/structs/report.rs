use serde::Serialize;

/// 輸出報表的一列
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct WorkplaceShiftCount {
    pub name: String,
    pub shifts: usize,
}
