use crate::{
    errors::AppError,
    repositories::pagination::{fetch_all, HttpPageSource},
    state::AppState,
    structs::workplaces::Workplace,
};

pub const WORKPLACES_PATH: &str = "/workplaces";

pub async fn get_all_workplaces(state: &AppState) -> Result<Vec<Workplace>, AppError> {
    let url = state.resource_url(WORKPLACES_PATH)?;
    let source = HttpPageSource::new(state.get_http_client());

    fetch_all(&source, url, state.get_max_pages()).await
}
