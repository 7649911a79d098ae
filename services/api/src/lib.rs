mod cli;
mod dashboard;
mod infra;
mod routes;
mod server;

use call_dashboard::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
