use crate::{
    errors::AppError,
    repositories::pagination::{fetch_all, HttpPageSource},
    state::AppState,
    structs::shifts::Shift,
};

pub const SHIFTS_PATH: &str = "/shifts";

pub async fn get_all_shifts(state: &AppState) -> Result<Vec<Shift>, AppError> {
    let url = state.resource_url(SHIFTS_PATH)?;
    let source = HttpPageSource::new(state.get_http_client());

    fetch_all(&source, url, state.get_max_pages()).await
}
