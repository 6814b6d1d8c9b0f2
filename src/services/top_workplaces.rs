use crate::{
    errors::AppError,
    repositories::{shifts::get_all_shifts, workplaces::get_all_workplaces},
    state::AppState,
    structs::{report::WorkplaceShiftCount, shifts::Shift, workplaces::Workplace},
};
use std::collections::HashMap;

pub const TOP_WORKPLACES_LIMIT: usize = 3;

/// 只留下 active 的 workplace：id -> name
pub fn active_workplace_names(workplaces: &[Workplace]) -> HashMap<i64, String> {
    workplaces
        .iter()
        .filter(|workplace| workplace.is_active())
        .map(|workplace| (workplace.id, workplace.name.clone()))
        .collect()
}

/// 每個 active workplace 的完成班數，記住每個 id 第一次出現的順序
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ShiftCounts {
    order: Vec<i64>,
    counts: HashMap<i64, usize>,
}

impl ShiftCounts {
    fn increment(&mut self, workplace_id: i64) {
        let count = self.counts.entry(workplace_id).or_insert_with(|| {
            self.order.push(workplace_id);
            0
        });
        *count += 1;
    }

    pub fn get(&self, workplace_id: i64) -> usize {
        self.counts.get(&workplace_id).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (i64, usize)> + '_ {
        self.order.iter().map(|id| (*id, self.get(*id)))
    }
}

pub fn count_completed_shifts(shifts: &[Shift], active: &HashMap<i64, String>) -> ShiftCounts {
    let mut counts = ShiftCounts::default();

    for shift in shifts {
        if shift.is_completed() && active.contains_key(&shift.workplace_id) {
            counts.increment(shift.workplace_id);
        }
    }

    counts
}

/// 依班數由大到小排序，同數量保留第一次出現的順序
pub fn rank_workplaces(
    counts: &ShiftCounts,
    active: &HashMap<i64, String>,
    limit: usize,
) -> Vec<WorkplaceShiftCount> {
    let mut ranked: Vec<WorkplaceShiftCount> = counts
        .iter()
        .filter_map(|(workplace_id, shifts)| match active.get(&workplace_id) {
            Some(name) => Some(WorkplaceShiftCount {
                name: name.clone(),
                shifts,
            }),
            None => {
                tracing::warn!(workplace_id, "skipping count for unknown workplace");
                None
            }
        })
        .collect();

    // sort_by 是 stable sort
    ranked.sort_by(|a, b| b.shifts.cmp(&a.shifts));
    ranked.truncate(limit);
    ranked
}

pub fn top_workplaces(
    workplaces: &[Workplace],
    shifts: &[Shift],
    limit: usize,
) -> Vec<WorkplaceShiftCount> {
    let active = active_workplace_names(workplaces);
    let counts = count_completed_shifts(shifts, &active);

    tracing::info!(
        workplaces = workplaces.len(),
        active_workplaces = active.len(),
        shifts = shifts.len(),
        counted_workplaces = counts.len(),
        "aggregated completed shifts"
    );

    rank_workplaces(&counts, &active, limit)
}

/// 兩個 resource 同時抓，都抓完才開始計算
pub async fn fetch_top_workplaces(state: &AppState) -> Result<Vec<WorkplaceShiftCount>, AppError> {
    let (workplaces, shifts) =
        tokio::try_join!(get_all_workplaces(state), get_all_shifts(state))?;

    Ok(top_workplaces(&workplaces, &shifts, TOP_WORKPLACES_LIMIT))
}

/// 2 格縮排的 JSON
pub fn render_report(rows: &[WorkplaceShiftCount]) -> Result<String, AppError> {
    Ok(serde_json::to_string_pretty(rows)?)
}

pub async fn top_workplaces_report(state: &AppState) -> Result<String, AppError> {
    let rows = fetch_top_workplaces(state).await?;
    render_report(&rows)
}
