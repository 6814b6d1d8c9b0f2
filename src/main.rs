use std::process::ExitCode;
use top_workplaces::{
    errors::AppError, services::top_workplaces::top_workplaces_report, state::AppState,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    // log 一律寫到 stderr，stdout 只放報表
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "top_workplaces=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match run().await {
        Ok(report) => {
            println!("{}", report);
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {}: {}", err.category(), err);
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<String, AppError> {
    let state = AppState::from_env()?;
    top_workplaces_report(&state).await
}
